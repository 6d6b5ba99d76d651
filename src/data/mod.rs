//! Data module - table loading and column coercion

mod loader;
mod processor;

pub use loader::{DataLoader, LoaderError};
pub use processor::{Coordinates, DataProcessor, DecimalStyle, ProcessorError};
