//! Table Loader Module
//! Reads indicator tables (CSV or spreadsheet) into polars DataFrames.

use calamine::{open_workbook_auto, Data, Reader};
use log::{debug, warn};
use polars::prelude::*;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Input file not found: {}", .0.display())]
    FileNotFound(PathBuf),
    #[error("Unsupported input format: {}", .0.display())]
    UnsupportedFormat(PathBuf),
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
    #[error("Failed to read spreadsheet: {0}")]
    SpreadsheetError(#[from] calamine::Error),
    #[error("Spreadsheet has no worksheet: {}", .0.display())]
    EmptyWorkbook(PathBuf),
    #[error("CSV separator must be a single ASCII character, got {0:?}")]
    InvalidSeparator(char),
    #[error("No data loaded")]
    NoData,
}

/// Loads one indicator table and keeps it for column access.
pub struct DataLoader {
    df: Option<DataFrame>,
}

impl Default for DataLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl DataLoader {
    pub fn new() -> Self {
        Self { df: None }
    }

    /// Load a table, choosing the reader from the file extension.
    pub fn load(&mut self, path: &Path, csv_separator: char) -> Result<&DataFrame, LoaderError> {
        if !path.is_file() {
            return Err(LoaderError::FileNotFound(path.to_path_buf()));
        }
        let extension = path
            .extension()
            .map(|ext| ext.to_string_lossy().to_lowercase())
            .unwrap_or_default();

        let df = match extension.as_str() {
            "csv" | "txt" => Self::read_csv(path, csv_separator)?,
            "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => Self::read_spreadsheet(path)?,
            _ => return Err(LoaderError::UnsupportedFormat(path.to_path_buf())),
        };

        debug!(
            "Loaded {}: {} rows, {} columns",
            path.display(),
            df.height(),
            df.width()
        );

        self.df = Some(df);
        self.df.as_ref().ok_or(LoaderError::NoData)
    }

    fn read_csv(path: &Path, separator: char) -> Result<DataFrame, LoaderError> {
        let path_str = path.to_string_lossy().to_string();
        if !separator.is_ascii() {
            return Err(LoaderError::InvalidSeparator(separator));
        }
        let separator = separator as u8;

        let df = LazyCsvReader::new(&path_str)
            .with_separator(separator)
            .with_infer_schema_length(Some(10000))
            .with_ignore_errors(true)
            .finish()?
            .collect()?;

        Ok(df)
    }

    /// Read the first worksheet; the first row is the header and every cell
    /// is kept as text so numeric coercion happens in one place.
    fn read_spreadsheet(path: &Path) -> Result<DataFrame, LoaderError> {
        let mut workbook = open_workbook_auto(path)?;
        let range = workbook
            .worksheet_range_at(0)
            .ok_or_else(|| LoaderError::EmptyWorkbook(path.to_path_buf()))??;

        let mut rows = range.rows();
        let Some(header) = rows.next() else {
            return Ok(DataFrame::empty());
        };
        let names = Self::unique_headers(header);

        let mut cells: Vec<Vec<Option<String>>> = vec![Vec::new(); names.len()];
        for row in rows {
            for (i, column) in cells.iter_mut().enumerate() {
                column.push(row.get(i).and_then(Self::cell_text));
            }
        }

        let columns: Vec<Column> = names
            .into_iter()
            .zip(cells)
            .map(|(name, values)| Column::new(name.into(), values))
            .collect();

        Ok(DataFrame::new(columns)?)
    }

    fn cell_text(cell: &Data) -> Option<String> {
        match cell {
            Data::Empty | Data::Error(_) => None,
            Data::String(s) => Some(s.clone()),
            Data::Float(f) => Some(f.to_string()),
            Data::Int(i) => Some(i.to_string()),
            other => Some(other.to_string()),
        }
    }

    /// Header names, made non-empty and unique so they can become column names.
    fn unique_headers(header: &[Data]) -> Vec<String> {
        let mut seen = HashSet::new();
        header
            .iter()
            .enumerate()
            .map(|(i, cell)| {
                let base = Self::cell_text(cell)
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .unwrap_or_else(|| format!("column_{}", i + 1));
                let mut name = base.clone();
                let mut n = 1;
                while !seen.insert(name.clone()) {
                    name = format!("{}.{}", base, n);
                    n += 1;
                }
                name
            })
            .collect()
    }

    /// Make `canonical` name the column that was expected under `expected`.
    ///
    /// Spreadsheet revisions sometimes rename the header; in that case the
    /// first column is assumed to hold the same data.
    pub fn ensure_column(&mut self, expected: &str, canonical: &str) -> Result<(), LoaderError> {
        let df = self.df.as_mut().ok_or(LoaderError::NoData)?;
        if df.get_column_index(canonical).is_some() {
            return Ok(());
        }

        let source = if df.get_column_index(expected).is_some() {
            expected.to_string()
        } else {
            let first = df
                .get_column_names()
                .first()
                .map(|s| s.to_string())
                .ok_or(LoaderError::NoData)?;
            warn!(
                "Column '{}' not found, using first column '{}' as '{}'",
                expected, first, canonical
            );
            first
        };

        df.rename(&source, canonical.into())?;
        Ok(())
    }

    /// Get list of column names from loaded DataFrame.
    pub fn get_columns(&self) -> Vec<String> {
        self.df
            .as_ref()
            .map(|df| {
                df.get_column_names()
                    .iter()
                    .map(|s| s.to_string())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Get the number of rows in the DataFrame.
    pub fn get_row_count(&self) -> usize {
        self.df.as_ref().map(|df| df.height()).unwrap_or(0)
    }

    /// Get a reference to the loaded DataFrame.
    pub fn get_dataframe(&self) -> Option<&DataFrame> {
        self.df.as_ref()
    }

    #[cfg(test)]
    fn set_dataframe(&mut self, df: DataFrame) {
        self.df = Some(df);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loader_with(columns: Vec<Column>) -> DataLoader {
        let mut loader = DataLoader::new();
        loader.set_dataframe(DataFrame::new(columns).unwrap());
        loader
    }

    #[test]
    fn missing_file_is_fatal() {
        let mut loader = DataLoader::new();
        let err = loader
            .load(Path::new("definitely/not/here.xlsx"), ',')
            .unwrap_err();
        assert!(matches!(err, LoaderError::FileNotFound(_)));
    }

    #[test]
    fn ensure_column_renames_expected_header() {
        let mut loader = loader_with(vec![
            Column::new("id".into(), vec![1i64, 2]),
            Column::new("Nome da Área de Ponderação".into(), vec!["A", "B"]),
        ]);
        loader
            .ensure_column("Nome da Área de Ponderação", "Area_Ponderacao")
            .unwrap();
        assert_eq!(loader.get_columns(), vec!["id", "Area_Ponderacao"]);
    }

    #[test]
    fn ensure_column_falls_back_to_first_column() {
        let mut loader = loader_with(vec![
            Column::new("Area (2010)".into(), vec!["A", "B"]),
            Column::new("Bairro".into(), vec!["x", "y"]),
        ]);
        loader
            .ensure_column("Nome da Área de Ponderação", "Area_Ponderacao")
            .unwrap();
        assert_eq!(loader.get_columns(), vec!["Area_Ponderacao", "Bairro"]);
    }

    #[test]
    fn duplicate_and_blank_headers_are_made_unique() {
        let header = vec![
            Data::String("Bairro".to_string()),
            Data::Empty,
            Data::String("Bairro".to_string()),
        ];
        assert_eq!(
            DataLoader::unique_headers(&header),
            vec!["Bairro", "column_2", "Bairro.1"]
        );
    }

    #[test]
    fn csv_separator_must_be_ascii() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("IDH.csv");
        std::fs::write(&path, "Bairro§Valor\nGávea§0.97\n").unwrap();

        let err = DataLoader::new().load(&path, '§').unwrap_err();
        assert!(matches!(err, LoaderError::InvalidSeparator('§')));

        std::fs::write(&path, "Bairro;Valor\nGávea;0.97\n").unwrap();
        let mut loader = DataLoader::new();
        loader.load(&path, ';').unwrap();
        assert_eq!(loader.get_columns(), vec!["Bairro", "Valor"]);
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dados.json");
        std::fs::write(&path, "{}").unwrap();
        let err = DataLoader::new().load(&path, ',').unwrap_err();
        assert!(matches!(err, LoaderError::UnsupportedFormat(_)));
    }
}
