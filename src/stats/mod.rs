//! Stats module - aggregates and marker scaling

mod calculator;

pub use calculator::{
    Extent, StatsCalculator, EDUCATION_RANKS, INCOME_FLAT_RADIUS, INCOME_MAX_RADIUS,
    INCOME_MIN_RADIUS,
};
