pub mod dht11;

pub use dht11::Dht11Sensor;

use std::future::Future;

use crate::models::Reading;

/// Anything the collector can poll for relative humidity
///
/// A failed poll is reported as an invalid reading, never as an error: the
/// loop skips it and tries again on the next tick.
pub trait HumiditySensor {
    fn read(&mut self) -> impl Future<Output = Reading> + Send;
}
