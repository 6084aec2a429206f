/// Append-only CSV log of observations
use log::info;
use std::path::{Path, PathBuf};
use time::OffsetDateTime;
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;

use crate::error::{CollectorError, Result};
use crate::models::Observation;
use crate::utils::{iso_timestamp, log_filename};

const HEADERS: [&str; 4] = ["datetime", "humidity", "baseline", "pause"];
const PAUSE_TOKEN: &str = "pause";

/// CSV file for one collection run
///
/// No handle is kept open between rows: every append opens the file, writes
/// one line, flushes and closes it, so a crash loses at most the row in
/// flight.
#[derive(Debug, Clone)]
pub struct PauseLog {
    path: PathBuf,
}

impl PauseLog {
    /// Create `<dir>/<start time>.csv` and write the header row
    ///
    /// Fails if the file already exists.
    pub async fn create(dir: &Path, started_at: &OffsetDateTime) -> Result<Self> {
        let path = dir.join(log_filename(started_at)?);
        let log = PauseLog { path };

        let mut header = HEADERS.join(",");
        header.push('\n');
        log.write_line(OpenOptions::new().write(true).create_new(true), &header)
            .await?;

        info!("Logging readings to {}", log.path.display());
        Ok(log)
    }

    #[cfg(test)]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one observation stamped with `written_at`
    pub async fn append(&self, observation: &Observation, written_at: &OffsetDateTime) -> Result<()> {
        let row = format_row(observation, &iso_timestamp(written_at)?);
        self.write_line(OpenOptions::new().append(true), &row).await
    }

    async fn write_line(&self, options: &mut OpenOptions, line: &str) -> Result<()> {
        let io_err = |source: std::io::Error| CollectorError::LogWrite {
            path: self.path.clone(),
            source,
        };

        let mut file = options.open(&self.path).await.map_err(io_err)?;
        file.write_all(line.as_bytes()).await.map_err(io_err)?;
        file.flush().await.map_err(io_err)?;
        file.sync_data().await.map_err(io_err)?;
        Ok(())
    }
}

/// `datetime,humidity,baseline,pause` with a trailing newline
pub fn format_row(observation: &Observation, datetime: &str) -> String {
    let pause = if observation.pause { PAUSE_TOKEN } else { "" };
    let row = [
        datetime.to_string(),
        observation.humidity.to_string(),
        observation.baseline.to_string(),
        pause.to_string(),
    ];
    format!("{}\n", row.join(","))
}
