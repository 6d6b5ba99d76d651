//! Indicator Map - neighborhood socioeconomic indicators on one interactive map
//!
//! Reads the HDI, urban conditions, education and income tables of a city and
//! writes a self-contained HTML map with one toggleable layer per indicator.

pub mod cli;
pub mod config;
pub mod data;
pub mod indicators;
pub mod map;
pub mod pipeline;
pub mod stats;
