use clap::Parser;
use std::path::PathBuf;

/// Build the neighborhood indicator map. With no arguments the source tables
/// are read from the current directory and the map is written to index.html.
#[derive(Parser, Debug)]
#[command(name = "indicator_map", version, about)]
pub struct Cli {
    /// JSON file overriding file names, column names and map settings
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Directory holding the source tables
    #[arg(short, long, value_hint = clap::ValueHint::DirPath)]
    pub input_dir: Option<PathBuf>,

    /// Output HTML file
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub output: Option<PathBuf>,

    /// Open the map with the system default application once written
    #[arg(long)]
    pub open: bool,

    /// Increase output verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Log filter implied by `-v` flags.
    pub fn log_filter(&self) -> &'static str {
        match self.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    }
}
