use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use crate::detection::{DEFAULT_THRESHOLD, DEFAULT_WINDOW_SIZE};
use crate::error::{CollectorError, Result};

const DEFAULT_PIN: u8 = 21; // BCM numbering
const DEFAULT_POLL_INTERVAL_SECS: u64 = 1;
const DEFAULT_IIO_ROOT: &str = "/sys/bus/iio/devices";

#[derive(Debug, Clone, PartialEq)]
pub struct CollectorConfig {
    pub pin: u8,
    pub threshold: u32,
    pub window_size: usize,
    pub poll_interval_seconds: u64,
    pub log_dir: PathBuf,
    pub iio_root: PathBuf,
}

impl Default for CollectorConfig {
    fn default() -> Self {
        CollectorConfig {
            pin: DEFAULT_PIN,
            threshold: DEFAULT_THRESHOLD,
            window_size: DEFAULT_WINDOW_SIZE,
            poll_interval_seconds: DEFAULT_POLL_INTERVAL_SECS,
            log_dir: PathBuf::from("."),
            iio_root: PathBuf::from(DEFAULT_IIO_ROOT),
        }
    }
}

impl CollectorConfig {
    pub fn new() -> Result<Self> {
        // Load environment variables
        dotenv::dotenv().ok();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a configuration from any key lookup, defaulting unset keys
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = CollectorConfig::default();

        let config = CollectorConfig {
            pin: parse_var(&lookup, "WHISPER_SENSOR_PIN", defaults.pin)?,
            threshold: parse_var(&lookup, "WHISPER_THRESHOLD", defaults.threshold)?,
            window_size: parse_var(&lookup, "WHISPER_WINDOW_SIZE", defaults.window_size)?,
            poll_interval_seconds: parse_var(
                &lookup,
                "WHISPER_POLL_INTERVAL_SECS",
                defaults.poll_interval_seconds,
            )?,
            log_dir: lookup("WHISPER_LOG_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.log_dir),
            iio_root: lookup("WHISPER_IIO_ROOT")
                .map(PathBuf::from)
                .unwrap_or(defaults.iio_root),
        };

        if config.window_size == 0 {
            return Err(CollectorError::Config(
                "WHISPER_WINDOW_SIZE must be at least 1".into(),
            ));
        }
        if config.poll_interval_seconds == 0 {
            return Err(CollectorError::Config(
                "WHISPER_POLL_INTERVAL_SECS must be at least 1".into(),
            ));
        }

        Ok(config)
    }
}

fn parse_var<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .map_err(|e| CollectorError::Config(format!("{} = '{}': {}", key, raw, e))),
        _ => Ok(default),
    }
}
