pub mod baseline;
pub mod pause;

pub use baseline::{BaselineEstimator, DEFAULT_THRESHOLD, DEFAULT_WINDOW_SIZE};
pub use pause::PauseDetector;
