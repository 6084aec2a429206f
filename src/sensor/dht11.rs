/// DHT11 access through the Linux kernel IIO driver
use log::{debug, info, warn};
use std::path::{Path, PathBuf};

use crate::error::{CollectorError, Result};
use crate::models::Reading;
use crate::sensor::HumiditySensor;

// The dht11 overlay names its IIO device after the GPIO pin in hex, e.g.
// `dtoverlay=dht11,gpiopin=21` shows up as "dht11@15".
const DRIVER_NAME: &str = "dht11";
const HUMIDITY_FILE: &str = "in_humidityrelative_input"; // milli-percent

#[derive(Debug, Clone)]
pub struct Dht11Sensor {
    humidity_path: PathBuf,
}

impl Dht11Sensor {
    /// Locate the IIO device wired to `pin` under `iio_root`
    ///
    /// A device named exactly `dht11@<pin hex>` wins. A bare `dht11` device is
    /// accepted only if it is the single one present.
    pub async fn open(iio_root: &Path, pin: u8) -> Result<Self> {
        let wanted = format!("{}@{:x}", DRIVER_NAME, pin);

        let mut entries = tokio::fs::read_dir(iio_root).await.map_err(|e| {
            CollectorError::SensorInit(format!("Cannot list {}: {}", iio_root.display(), e))
        })?;

        let mut bare = Vec::new();
        while let Some(entry) = entries.next_entry().await.map_err(|e| {
            CollectorError::SensorInit(format!("Cannot list {}: {}", iio_root.display(), e))
        })? {
            let device = entry.path();
            let name = match tokio::fs::read_to_string(device.join("name")).await {
                Ok(name) => name.trim().to_string(),
                Err(_) => continue,
            };

            if name == wanted {
                info!("Found {} at {}", name, device.display());
                return Ok(Self::at(&device));
            }
            if name == DRIVER_NAME {
                bare.push(device);
            }
        }

        match bare.as_slice() {
            [device] => {
                warn!(
                    "No device named {}, using unnamed {} at {}",
                    wanted,
                    DRIVER_NAME,
                    device.display()
                );
                Ok(Self::at(device))
            }
            [] => Err(CollectorError::SensorInit(format!(
                "No {} device for GPIO {} under {} (is the dht11 overlay loaded?)",
                DRIVER_NAME,
                pin,
                iio_root.display()
            ))),
            _ => Err(CollectorError::SensorInit(format!(
                "Several {} devices under {} and none named {}",
                DRIVER_NAME,
                iio_root.display(),
                wanted
            ))),
        }
    }

    fn at(device: &Path) -> Self {
        Dht11Sensor {
            humidity_path: device.join(HUMIDITY_FILE),
        }
    }
}

impl HumiditySensor for Dht11Sensor {
    async fn read(&mut self) -> Reading {
        // The driver answers EIO/ETIMEDOUT on checksum or timing failures
        let raw = match tokio::fs::read_to_string(&self.humidity_path).await {
            Ok(raw) => raw,
            Err(e) => {
                debug!("Sensor read failed: {}", e);
                return Reading::failed();
            }
        };

        match raw.trim().parse::<f32>() {
            Ok(milli) => Reading::ok(milli / 1000.0),
            Err(e) => {
                debug!("Unparseable sensor value '{}': {}", raw.trim(), e);
                Reading::failed()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Sample;
    use std::fs;

    fn add_device(root: &Path, dir: &str, name: &str, humidity: Option<&str>) -> PathBuf {
        let device = root.join(dir);
        fs::create_dir_all(&device).unwrap();
        fs::write(device.join("name"), format!("{}\n", name)).unwrap();
        if let Some(value) = humidity {
            fs::write(device.join(HUMIDITY_FILE), format!("{}\n", value)).unwrap();
        }
        device
    }

    #[tokio::test]
    async fn test_open_matches_pin_name() {
        let root = tempfile::tempdir().unwrap();
        add_device(root.path(), "iio:device0", "mcp3424", None);
        add_device(root.path(), "iio:device1", "dht11@4", Some("10000"));
        add_device(root.path(), "iio:device2", "dht11@15", Some("47000"));

        let mut sensor = Dht11Sensor::open(root.path(), 21).await.unwrap();
        let reading = sensor.read().await;
        assert!(reading.is_valid());
        assert_eq!(reading.sample(), Some(Sample { humidity: 47 }));
    }

    #[tokio::test]
    async fn test_open_falls_back_to_single_unnamed_device() {
        let root = tempfile::tempdir().unwrap();
        add_device(root.path(), "iio:device0", "dht11", Some("55500"));

        let mut sensor = Dht11Sensor::open(root.path(), 21).await.unwrap();
        // 55.5 rounds half to even
        assert_eq!(sensor.read().await.sample(), Some(Sample { humidity: 56 }));
    }

    #[tokio::test]
    async fn test_open_fails_without_device() {
        let root = tempfile::tempdir().unwrap();
        add_device(root.path(), "iio:device0", "dht11@4", None);

        let err = Dht11Sensor::open(root.path(), 21).await.unwrap_err();
        assert!(matches!(err, CollectorError::SensorInit(_)));

        let missing = root.path().join("nope");
        assert!(matches!(
            Dht11Sensor::open(&missing, 21).await,
            Err(CollectorError::SensorInit(_))
        ));
    }

    #[tokio::test]
    async fn test_open_rejects_ambiguous_unnamed_devices() {
        let root = tempfile::tempdir().unwrap();
        add_device(root.path(), "iio:device0", "dht11", None);
        add_device(root.path(), "iio:device1", "dht11", None);

        assert!(matches!(
            Dht11Sensor::open(root.path(), 21).await,
            Err(CollectorError::SensorInit(_))
        ));
    }

    #[tokio::test]
    async fn test_failed_reads_are_invalid() {
        let root = tempfile::tempdir().unwrap();
        let device = add_device(root.path(), "iio:device0", "dht11@15", None);
        let mut sensor = Dht11Sensor::open(root.path(), 21).await.unwrap();

        assert!(!sensor.read().await.is_valid());

        fs::write(device.join(HUMIDITY_FILE), "garbage\n").unwrap();
        assert!(!sensor.read().await.is_valid());

        fs::write(device.join(HUMIDITY_FILE), "120000\n").unwrap();
        let reading = sensor.read().await;
        assert!(reading.is_valid());
        assert_eq!(reading.sample(), None);
    }
}
