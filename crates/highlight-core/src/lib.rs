//! Highlight Core — error taxonomy, aggregation policies, run configuration.

pub mod aggregation;
pub mod config;
pub mod error;

pub use aggregation::Aggregation;
pub use config::{HighlightConfig, RunPaths};
pub use error::{Error, Result};
