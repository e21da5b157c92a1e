//! Assignment Charts - bar, Sankey and network charts from CSV tables,
//! collated into a single PDF figure.

pub mod charts;
pub mod collate;
pub mod config;
pub mod data;
pub mod error;
pub mod logger;
pub mod pdf;
pub mod pipeline;

pub use config::{ReportConfig, StyleConfig};
pub use error::{ChartError, Result};
pub use pipeline::{run, ReportOutputs};
