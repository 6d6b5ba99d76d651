//! Indicators module - one record type per map layer
//!
//! Every layer goes through the same steps: extract records from its table
//! (coercion and row filtering), compute whatever the layer needs from the
//! whole table, then turn each record into one marker with a popup.

pub mod education;
pub mod hdi;
pub mod income;
pub mod palette;
pub mod urban;

use crate::config::{EducationSource, HdiSource, IncomeSource, UrbanSource};
use crate::data::{Coordinates, DataLoader, LoaderError, ProcessorError};
use crate::map::MapCanvas;
use palette::ColorBucket;
use polars::prelude::DataFrame;

pub use education::{summary_text, EducationRecord};
pub use hdi::HdiRecord;
pub use income::IncomeRecord;
pub use urban::UrbanRecord;

/// Text shown for a missing number.
pub const MISSING: &str = "n/d";

/// Per-layer configuration record: where the table lives and what the layer is called.
pub trait LayerSource {
    fn file(&self) -> &str;
    fn layer_name(&self) -> &str;
}

macro_rules! impl_layer_source {
    ($($source:ty),*) => {
        $(impl LayerSource for $source {
            fn file(&self) -> &str {
                &self.file
            }

            fn layer_name(&self) -> &str {
                &self.layer_name
            }
        })*
    };
}

impl_layer_source!(HdiSource, UrbanSource, EducationSource, IncomeSource);

/// How a record is drawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MarkerStyle {
    Point {
        color: ColorBucket,
        radius: f64,
    },
    Icon {
        color: ColorBucket,
        icon: &'static str,
        icon_color: &'static str,
    },
}

pub trait Indicator: Sized {
    type Source: LayerSource;
    /// Table-wide context, computed before the first marker is drawn.
    type Scale;

    /// Fix up the loaded table before extraction.
    fn prepare(_loader: &mut DataLoader, _source: &Self::Source) -> Result<(), LoaderError> {
        Ok(())
    }

    /// Records that survive coercion and filtering, in table order.
    fn extract(df: &DataFrame, source: &Self::Source) -> Result<Vec<Self>, ProcessorError>;

    fn scale(records: &[Self]) -> Self::Scale;

    fn location(&self) -> Coordinates;

    fn marker(&self, scale: &Self::Scale) -> MarkerStyle;

    fn popup_html(&self) -> String;

    /// Extra map decorations for the layer, such as a legend.
    fn decorate(_canvas: &mut MapCanvas, _source: &Self::Source) {}
}

/// Format an optional number, `n/d` when missing.
pub fn format_optional(value: Option<f64>, decimals: usize) -> String {
    value.map_or_else(|| MISSING.to_string(), |v| format!("{:.*}", decimals, v))
}
