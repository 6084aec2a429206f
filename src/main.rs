mod chart;
mod collector;
mod config;
mod detection;
mod error;
mod models;
mod sensor;
mod storage;
mod utils;

use log::{debug, error, info};
use time::UtcOffset;
use tokio::time::{sleep, Duration};

use chart::{render_line, LEGEND};
use collector::Collector;
use config::CollectorConfig;
use error::Result;
use models::Observation;
use sensor::{Dht11Sensor, HumiditySensor};
use storage::PauseLog;
use utils::{format_datetime, local_offset, now_local};

/// Poll the sensor once; chart and log the result if there is one
///
/// Invalid readings and the seed sample produce no output. A failed log
/// write is returned as an error.
async fn poll_once<S: HumiditySensor>(
    sensor: &mut S,
    collector: &mut Collector,
    log: &PauseLog,
    offset: UtcOffset,
) -> Result<Option<Observation>> {
    let reading = sensor.read().await;
    let Some(sample) = reading.sample() else {
        if reading.is_valid() {
            debug!("Discarding out-of-range humidity {}", reading.humidity);
        } else {
            debug!("Skipping invalid reading");
        }
        return Ok(None);
    };

    let Some(observation) = collector.process(sample) else {
        return Ok(None);
    };

    println!("{}", render_line(&observation));
    log.append(&observation, &now_local(offset)).await?;

    if observation.pause {
        info!(
            "Whispering pause at {}% (baseline {}%)",
            observation.humidity, observation.baseline
        );
    }

    Ok(Some(observation))
}

async fn main_loop<S: HumiditySensor>(
    mut sensor: S,
    mut collector: Collector,
    log: PauseLog,
    poll_interval: Duration,
    offset: UtcOffset,
) -> Result<()> {
    info!("Starting humidity collection");

    loop {
        poll_once(&mut sensor, &mut collector, &log, offset).await?;
        sleep(poll_interval).await;
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .format_timestamp_secs()
        .init();

    // Read before anything spawns a thread
    let offset = local_offset();
    let started_at = now_local(offset);

    // Load configuration
    let config = match CollectorConfig::new() {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };
    info!(
        "Started at {} (GPIO {}, threshold {}, window {}, every {}s)",
        format_datetime(&started_at),
        config.pin,
        config.threshold,
        config.window_size,
        config.poll_interval_seconds
    );

    let sensor = match Dht11Sensor::open(&config.iio_root, config.pin).await {
        Ok(sensor) => sensor,
        Err(e) => {
            error!("{}", e);
            return Err(e.into());
        }
    };

    let log = PauseLog::create(&config.log_dir, &started_at).await?;
    let collector = Collector::new(config.threshold, config.window_size);
    let poll_interval = Duration::from_secs(config.poll_interval_seconds);

    println!("{}", LEGEND);

    // Handle Ctrl+C gracefully
    let (tx, mut rx) = tokio::sync::oneshot::channel();
    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
            return;
        }
        let _ = tx.send(());
    });

    // Run main loop or wait for shutdown signal
    tokio::select! {
        result = main_loop(sensor, collector, log, poll_interval, offset) => {
            if let Err(e) = result {
                error!("Fatal error: {}", e);
                return Err(e.into());
            }
        }
        _ = &mut rx => {
            info!("Program terminated by user. Exiting gracefully.");
        }
    }

    Ok(())
}
