//! Map Pipeline
//! Loads the four indicator tables and draws them onto one map.
//!
//! Every table is read before the canvas exists: the map center comes from
//! the HDI table, and the income radii need the extent of the whole income
//! table before the first circle is placed.

use crate::config::MapConfig;
use crate::data::{Coordinates, DataLoader, LoaderError};
use crate::indicators::{
    EducationRecord, HdiRecord, IncomeRecord, Indicator, LayerSource, MarkerStyle, UrbanRecord,
};
use crate::map::{MapCanvas, RenderError};
use crate::stats::StatsCalculator;
use anyhow::{anyhow, Context, Result};
use log::{debug, info};
use std::path::PathBuf;

/// Markers drawn per layer, in drawing order.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub output: PathBuf,
    pub layers: Vec<(String, usize)>,
}

impl RunSummary {
    pub fn total_markers(&self) -> usize {
        self.layers.iter().map(|(_, n)| n).sum()
    }
}

/// Load one table and turn its rows into records.
pub fn load_records<I: Indicator>(config: &MapConfig, source: &I::Source) -> Result<Vec<I>> {
    let path = config.source_path(source.file());
    let mut loader = DataLoader::new();
    loader
        .load(&path, config.csv_separator)
        .with_context(|| format!("Failed to load {}", path.display()))?;
    I::prepare(&mut loader, source)
        .with_context(|| format!("Failed to prepare {}", path.display()))?;

    let df = loader.get_dataframe().ok_or(LoaderError::NoData)?;
    let records = I::extract(df, source)
        .with_context(|| format!("Failed to read columns of {}", path.display()))?;

    debug!(
        "{}: kept {} of {} rows (columns: {})",
        source.layer_name(),
        records.len(),
        loader.get_row_count(),
        loader.get_columns().join(", ")
    );
    Ok(records)
}

/// Add one layer holding a marker per record.
pub fn draw_layer<I: Indicator>(
    canvas: &mut MapCanvas,
    source: &I::Source,
    records: &[I],
) -> Result<usize, RenderError> {
    // Table-wide pass first; markers may depend on it.
    let scale = I::scale(records);
    let layer = canvas.add_layer(source.layer_name());

    for record in records {
        let Coordinates { lat, lon } = record.location();
        let popup = record.popup_html();
        match record.marker(&scale) {
            MarkerStyle::Point { color, radius } => {
                canvas.add_point_marker(layer, lat, lon, color, radius, popup)?
            }
            MarkerStyle::Icon {
                color,
                icon,
                icon_color,
            } => canvas.add_icon_marker(layer, lat, lon, color, icon, icon_color, popup)?,
        }
    }

    I::decorate(canvas, source);
    Ok(canvas.layer(layer).map_or(0, |l| l.markers.len()))
}

/// Build the full map without writing it.
pub fn build_map(config: &MapConfig) -> Result<(MapCanvas, Vec<(String, usize)>)> {
    let hdi: Vec<HdiRecord> = load_records(config, &config.hdi)?;
    let urban: Vec<UrbanRecord> = load_records(config, &config.urban)?;
    let education: Vec<EducationRecord> = load_records(config, &config.education)?;
    let income: Vec<IncomeRecord> = load_records(config, &config.income)?;

    info!(
        "Education areas with valid coordinates and shares: {}",
        education.len()
    );

    let points: Vec<Coordinates> = hdi.iter().map(|r| r.location).collect();
    let center = StatsCalculator::map_center(&points).ok_or_else(|| {
        anyhow!(
            "{} has no rows with valid coordinates, cannot center the map",
            config.hdi.file
        )
    })?;
    debug!("Map center: {:.5}, {:.5}", center.lat, center.lon);

    let mut canvas = MapCanvas::new(center.lat, center.lon, config.zoom);
    let layers = vec![
        (
            config.hdi.layer_name.clone(),
            draw_layer(&mut canvas, &config.hdi, &hdi)?,
        ),
        (
            config.urban.layer_name.clone(),
            draw_layer(&mut canvas, &config.urban, &urban)?,
        ),
        (
            config.education.layer_name.clone(),
            draw_layer(&mut canvas, &config.education, &education)?,
        ),
        (
            config.income.layer_name.clone(),
            draw_layer(&mut canvas, &config.income, &income)?,
        ),
    ];
    canvas.add_layer_toggle_control();

    for (name, count) in &layers {
        info!("{}: {} markers", name, count);
    }
    debug!("{} markers in total", canvas.marker_count());
    Ok((canvas, layers))
}

/// Build the map and write it to `config.output`.
pub fn run(config: &MapConfig) -> Result<RunSummary> {
    let (canvas, layers) = build_map(config)?;
    canvas
        .save(&config.output)
        .with_context(|| format!("Failed to write {}", config.output.display()))?;

    info!("Interactive map saved to {}", config.output.display());
    Ok(RunSummary {
        output: config.output.clone(),
        layers,
    })
}
