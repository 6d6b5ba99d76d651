//! Urban conditions layer (IBEU): a house pin per neighborhood.

use super::palette::ColorBucket;
use super::{format_optional, Indicator, MarkerStyle};
use crate::config::UrbanSource;
use crate::data::{Coordinates, DataProcessor, DecimalStyle, ProcessorError};
use crate::map::escape_html;
use polars::prelude::DataFrame;

#[derive(Debug, Clone, PartialEq)]
pub struct UrbanRecord {
    pub name: String,
    pub class_label: String,
    /// Urban environmental conditions sub-index (D2).
    pub environmental: Option<f64>,
    /// Urban housing conditions sub-index (D3).
    pub housing: Option<f64>,
    pub location: Coordinates,
}

impl Indicator for UrbanRecord {
    type Source = UrbanSource;
    type Scale = ();

    fn extract(df: &DataFrame, source: &UrbanSource) -> Result<Vec<Self>, ProcessorError> {
        let locations = DataProcessor::coordinates(
            df,
            &source.latitude_column,
            &source.longitude_column,
            DecimalStyle::Plain,
        )?;
        let names = DataProcessor::text_column(df, &source.name_column)?;
        let classes = DataProcessor::text_column(df, &source.class_column)?;
        let environmental =
            DataProcessor::numeric_column(df, &source.environmental_column, DecimalStyle::Plain)?;
        let housing = DataProcessor::numeric_column(df, &source.housing_column, DecimalStyle::Plain)?;

        Ok(locations
            .into_iter()
            .enumerate()
            .filter_map(|(i, location)| {
                Some(UrbanRecord {
                    name: names[i].clone().unwrap_or_default(),
                    class_label: classes[i].clone().unwrap_or_default(),
                    environmental: environmental[i],
                    housing: housing[i],
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
        MarkerStyle::Icon {
            color: ColorBucket::from_label(&self.class_label),
            icon: "home",
            icon_color: "white",
        }
    }

    fn popup_html(&self) -> String {
        format!(
            "<b>Bairro:</b> {}<br>\
             <b>Classificação:</b> {}<br>\
             <b>Condições Ambientais Urbanas:</b> {}<br>\
             <b>Condições Habitacionais Urbanas:</b> {}",
            escape_html(&self.name),
            escape_html(&self.class_label),
            format_optional(self.environmental, 4),
            format_optional(self.housing, 4)
        )
    }
}
