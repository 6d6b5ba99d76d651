//! HDI layer: one circle per neighborhood, sized by the index.

use super::palette::ColorBucket;
use super::{format_optional, Indicator, MarkerStyle};
use crate::config::HdiSource;
use crate::data::{Coordinates, DataProcessor, DecimalStyle, ProcessorError};
use crate::map::escape_html;
use crate::stats::StatsCalculator;
use polars::prelude::DataFrame;

#[derive(Debug, Clone, PartialEq)]
pub struct HdiRecord {
    pub name: String,
    /// Index in [0, 1].
    pub value: Option<f64>,
    pub class_label: String,
    pub location: Coordinates,
}

impl Indicator for HdiRecord {
    type Source = HdiSource;
    type Scale = ();

    fn extract(df: &DataFrame, source: &HdiSource) -> Result<Vec<Self>, ProcessorError> {
        let locations = DataProcessor::coordinates(
            df,
            &source.latitude_column,
            &source.longitude_column,
            DecimalStyle::Plain,
        )?;
        let names = DataProcessor::text_column(df, &source.name_column)?;
        let values = DataProcessor::numeric_column(df, &source.value_column, DecimalStyle::Plain)?;
        let classes = DataProcessor::text_column(df, &source.class_column)?;

        Ok(locations
            .into_iter()
            .enumerate()
            .filter_map(|(i, location)| {
                Some(HdiRecord {
                    name: names[i].clone().unwrap_or_default(),
                    value: values[i],
                    class_label: classes[i].clone().unwrap_or_default(),
                    location: location?,
                })
            })
            .collect())
    }

    fn scale(_records: &[Self]) -> Self::Scale {}

    fn location(&self) -> Coordinates {
        self.location
    }

    fn marker(&self, _scale: &()) -> MarkerStyle {
        MarkerStyle::Point {
            color: ColorBucket::from_label(&self.class_label),
            radius: StatsCalculator::hdi_radius(self.value.unwrap_or(0.0)),
        }
    }

    fn popup_html(&self) -> String {
        format!(
            "<b>Bairro:</b> {}<br><b>IDH:</b> {}<br><b>Classificação:</b> {}",
            escape_html(&self.name),
            format_optional(self.value, 4),
            escape_html(&self.class_label)
        )
    }
}
