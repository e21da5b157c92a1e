//! Data module - CSV loading and processing

mod loader;
mod processor;
pub mod schema;

pub use loader::DataLoader;
pub use processor::{AdjacencyTable, BarRow, BarTable, DataProcessor, Response, SankeyTable};
