//! Data Processor Module
//! Column coercion and row filtering shared by the indicator layers.

use polars::prelude::*;
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProcessorError {
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
    #[error("Column not found: {0}")]
    MissingColumn(String),
    #[error("None of the columns {0:?} were found")]
    MissingAliases(Vec<String>),
}

/// How decimal numbers are written in a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DecimalStyle {
    /// `1234.5` only.
    #[default]
    Plain,
    /// Comma decimal separators are accepted (`12,5` reads as `12.5`).
    Comma,
}

/// A geographic point in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

/// Handles column extraction and coercion.
pub struct DataProcessor;

impl DataProcessor {
    /// Parse a cell as a finite number. Anything else is missing.
    pub fn parse_number(raw: &str, style: DecimalStyle) -> Option<f64> {
        let trimmed = raw.trim();
        let value = match style {
            DecimalStyle::Plain => trimmed.parse::<f64>().ok(),
            DecimalStyle::Comma => trimmed.replace(',', ".").parse::<f64>().ok(),
        }?;
        value.is_finite().then_some(value)
    }

    /// Read a column as text, one entry per row.
    pub fn text_column(df: &DataFrame, name: &str) -> Result<Vec<Option<String>>, ProcessorError> {
        let column = df
            .column(name)
            .map_err(|_| ProcessorError::MissingColumn(name.to_string()))?;
        let as_text = column.cast(&DataType::String)?;
        let values = as_text
            .str()?
            .into_iter()
            .map(|v| v.map(|s| s.trim().to_string()).filter(|s| !s.is_empty()))
            .collect();
        Ok(values)
    }

    /// Text column that may legitimately be absent.
    pub fn optional_text_column(df: &DataFrame, name: &str) -> Result<Vec<Option<String>>, ProcessorError> {
        if df.get_column_index(name).is_none() {
            return Ok(vec![None; df.height()]);
        }
        Self::text_column(df, name)
    }

    /// Coerce a column to numbers; unparseable cells become missing.
    pub fn numeric_column(
        df: &DataFrame,
        name: &str,
        style: DecimalStyle,
    ) -> Result<Vec<Option<f64>>, ProcessorError> {
        Ok(Self::text_column(df, name)?
            .into_iter()
            .map(|cell| cell.and_then(|raw| Self::parse_number(&raw, style)))
            .collect())
    }

    /// Numeric column that may legitimately be absent.
    pub fn optional_numeric_column(
        df: &DataFrame,
        name: &str,
        style: DecimalStyle,
    ) -> Result<Vec<Option<f64>>, ProcessorError> {
        if df.get_column_index(name).is_none() {
            return Ok(vec![None; df.height()]);
        }
        Self::numeric_column(df, name, style)
    }

    /// First of `candidates` present in the table.
    pub fn resolve_column<'a>(df: &DataFrame, candidates: &'a [String]) -> Result<&'a str, ProcessorError> {
        candidates
            .iter()
            .find(|name| df.get_column_index(name).is_some())
            .map(|name| name.as_str())
            .ok_or_else(|| ProcessorError::MissingAliases(candidates.to_vec()))
    }

    /// Row-wise coordinates; a row is `None` unless both axes parse.
    pub fn coordinates(
        df: &DataFrame,
        lat_col: &str,
        lon_col: &str,
        style: DecimalStyle,
    ) -> Result<Vec<Option<Coordinates>>, ProcessorError> {
        let lats = Self::numeric_column(df, lat_col, style)?;
        let lons = Self::numeric_column(df, lon_col, style)?;
        Ok(lats
            .into_iter()
            .zip(lons)
            .map(|(lat, lon)| Some(Coordinates { lat: lat?, lon: lon? }))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame() -> DataFrame {
        DataFrame::new(vec![
            Column::new("Bairro".into(), vec![Some("Centro"), Some("Lapa"), None]),
            Column::new("Lat".into(), vec!["-22.90", "abc", "-22.95"]),
            Column::new("Lon".into(), vec![Some(-43.17), Some(-43.18), None]),
            Column::new("Pct".into(), vec!["12,5", " 40 ", ""]),
        ])
        .unwrap()
    }

    #[test]
    fn parse_number_handles_comma_decimals_only_when_asked() {
        assert_eq!(DataProcessor::parse_number("12,5", DecimalStyle::Comma), Some(12.5));
        assert_eq!(DataProcessor::parse_number("12,5", DecimalStyle::Plain), None);
        assert_eq!(DataProcessor::parse_number(" 7 ", DecimalStyle::Plain), Some(7.0));
        assert_eq!(DataProcessor::parse_number("inf", DecimalStyle::Plain), None);
        assert_eq!(DataProcessor::parse_number("NaN", DecimalStyle::Comma), None);
    }

    #[test]
    fn numeric_column_coerces_strings_and_floats() {
        let df = frame();
        let pct = DataProcessor::numeric_column(&df, "Pct", DecimalStyle::Comma).unwrap();
        assert_eq!(pct, vec![Some(12.5), Some(40.0), None]);

        let lon = DataProcessor::numeric_column(&df, "Lon", DecimalStyle::Plain).unwrap();
        assert_eq!(lon[0], Some(-43.17));
        assert_eq!(lon[2], None);
    }

    #[test]
    fn coordinates_drop_rows_with_any_bad_axis() {
        let df = frame();
        let coords = DataProcessor::coordinates(&df, "Lat", "Lon", DecimalStyle::Plain).unwrap();
        assert_eq!(coords[0], Some(Coordinates { lat: -22.90, lon: -43.17 }));
        assert_eq!(coords[1], None);
        assert_eq!(coords[2], None);
    }

    #[test]
    fn missing_required_column_is_an_error() {
        let df = frame();
        let err = DataProcessor::text_column(&df, "Classificação").unwrap_err();
        assert!(matches!(err, ProcessorError::MissingColumn(_)));
    }

    #[test]
    fn optional_columns_fill_with_missing() {
        let df = frame();
        let values =
            DataProcessor::optional_numeric_column(&df, "IDE-1", DecimalStyle::Comma).unwrap();
        assert_eq!(values, vec![None, None, None]);
    }

    #[test]
    fn resolve_column_takes_first_present_alias() {
        let df = frame();
        let aliases = vec!["Nome do Bairro".to_string(), "Bairro".to_string()];
        assert_eq!(DataProcessor::resolve_column(&df, &aliases).unwrap(), "Bairro");

        let absent = vec!["Nome".to_string()];
        assert!(DataProcessor::resolve_column(&df, &absent).is_err());
    }
}
