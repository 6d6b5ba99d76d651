//! Income layer: circles sized by family income relative to the whole table.

use super::palette::ColorBucket;
use super::{Indicator, MarkerStyle};
use crate::config::IncomeSource;
use crate::data::{Coordinates, DataProcessor, DecimalStyle, ProcessorError};
use crate::map::escape_html;
use crate::stats::{Extent, StatsCalculator};
use polars::prelude::DataFrame;

#[derive(Debug, Clone, PartialEq)]
pub struct IncomeRecord {
    pub name: String,
    pub income: f64,
    /// Income bracket, same vocabulary as the HDI classes.
    pub class_label: String,
    pub location: Coordinates,
}

impl Indicator for IncomeRecord {
    type Source = IncomeSource;
    type Scale = Extent;

    fn extract(df: &DataFrame, source: &IncomeSource) -> Result<Vec<Self>, ProcessorError> {
        let name_column = DataProcessor::resolve_column(df, &source.name_columns)?;
        let locations = DataProcessor::coordinates(
            df,
            &source.latitude_column,
            &source.longitude_column,
            DecimalStyle::Plain,
        )?;
        let names = DataProcessor::text_column(df, name_column)?;
        let incomes = DataProcessor::numeric_column(df, &source.income_column, DecimalStyle::Plain)?;
        let classes = DataProcessor::optional_text_column(df, &source.class_column)?;

        Ok(locations
            .into_iter()
            .enumerate()
            .filter_map(|(i, location)| {
                Some(IncomeRecord {
                    name: names[i].clone().unwrap_or_default(),
                    income: incomes[i]?,
                    class_label: classes[i].clone().unwrap_or_default(),
                    location: location?,
                })
            })
            .collect())
    }

    /// Income extent over every retained record.
    fn scale(records: &[Self]) -> Extent {
        let incomes: Vec<f64> = records.iter().map(|r| r.income).collect();
        StatsCalculator::value_extent(&incomes).unwrap_or(Extent { min: 0.0, max: 0.0 })
    }

    fn location(&self) -> Coordinates {
        self.location
    }

    fn marker(&self, extent: &Extent) -> MarkerStyle {
        MarkerStyle::Point {
            color: ColorBucket::from_label(&self.class_label),
            radius: StatsCalculator::income_radius(self.income, *extent),
        }
    }

    fn popup_html(&self) -> String {
        format!(
            "<b>Bairro:</b> {}<br><b>Renda Média:</b> {:.2}<br><b>Faixa de Renda:</b> {}",
            escape_html(&self.name),
            self.income,
            escape_html(&self.class_label)
        )
    }
}
