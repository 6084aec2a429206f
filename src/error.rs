//! Error types for the humidity collector

use std::path::PathBuf;
use thiserror::Error;

/// Errors that stop the collector
#[derive(Debug, Error)]
pub enum CollectorError {
    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Sensor initialization failed: {0}")]
    SensorInit(String),

    #[error("Failed to write log file {}: {source}", .path.display())]
    LogWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Time formatting error: {0}")]
    Time(String),
}

pub type Result<T> = std::result::Result<T, CollectorError>;

impl From<time::error::Format> for CollectorError {
    fn from(e: time::error::Format) -> Self {
        CollectorError::Time(e.to_string())
    }
}
