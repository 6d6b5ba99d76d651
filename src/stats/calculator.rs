//! Statistics Calculator Module
//! Corpus-wide aggregates and the numeric encodings used by the map markers.

use crate::data::Coordinates;
use statrs::statistics::Statistics;

/// HDI circle radius at value 0.
pub const HDI_BASE_RADIUS: f64 = 5.0;
/// Radius added per unit of HDI.
pub const HDI_RADIUS_SCALE: f64 = 10.0;

/// Income circles are rescaled into this range.
pub const INCOME_MIN_RADIUS: f64 = 3.0;
pub const INCOME_MAX_RADIUS: f64 = 18.0;
/// Radius used when every income in the table is the same.
pub const INCOME_FLAT_RADIUS: f64 = 5.0;

/// Ordinal rank of each education share, lowest attainment first.
pub const EDUCATION_RANKS: [f64; 4] = [1.0, 2.0, 3.0, 4.0];

/// Minimum and maximum of a value over a whole table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extent {
    pub min: f64,
    pub max: f64,
}

impl Extent {
    pub fn span(&self) -> f64 {
        self.max - self.min
    }
}

pub struct StatsCalculator;

impl StatsCalculator {
    /// Mean latitude and longitude, or `None` for an empty table.
    pub fn map_center(points: &[Coordinates]) -> Option<Coordinates> {
        if points.is_empty() {
            return None;
        }
        let lat = Statistics::mean(points.iter().map(|p| p.lat));
        let lon = Statistics::mean(points.iter().map(|p| p.lon));
        Some(Coordinates { lat, lon })
    }

    /// Minimum and maximum over all values, or `None` when there are none.
    pub fn value_extent(values: &[f64]) -> Option<Extent> {
        if values.is_empty() {
            return None;
        }
        Some(Extent {
            min: Statistics::min(values.iter()),
            max: Statistics::max(values.iter()),
        })
    }

    /// `5 + 10 × value`, so HDI in [0, 1] gives radii in [5, 15].
    pub fn hdi_radius(value: f64) -> f64 {
        HDI_BASE_RADIUS + value * HDI_RADIUS_SCALE
    }

    /// Linear rescale of income into [3, 18] over the table's extent.
    pub fn income_radius(income: f64, extent: Extent) -> f64 {
        if extent.span() <= 0.0 {
            return INCOME_FLAT_RADIUS;
        }
        let t = (income - extent.min) / extent.span();
        INCOME_MIN_RADIUS + (INCOME_MAX_RADIUS - INCOME_MIN_RADIUS) * t
    }

    /// Percentage shares as fractions of 1. Negative shares are dropped.
    pub fn normalize_shares(shares: &[Option<f64>; 4]) -> [Option<f64>; 4] {
        shares.map(|s| s.filter(|v| *v >= 0.0).map(|v| v / 100.0))
    }

    /// Weighted mean attainment level in [1, 4].
    ///
    /// Missing fractions count as zero. Returns `None` when no fraction is
    /// present or they do not sum to a positive value.
    pub fn average_level(fractions: &[Option<f64>; 4]) -> Option<f64> {
        if fractions.iter().all(Option::is_none) {
            return None;
        }
        let total: f64 = fractions.iter().flatten().sum();
        if total <= 0.0 {
            return None;
        }
        let weighted: f64 = fractions
            .iter()
            .zip(EDUCATION_RANKS)
            .map(|(f, rank)| f.unwrap_or(0.0) * rank)
            .sum();
        Some(weighted / total)
    }
}
