use log::debug;

use crate::detection::{BaselineEstimator, PauseDetector};
use crate::models::{Observation, Sample};

/// All mutable state of a collection run
///
/// Each accepted sample is compared against the baseline as it stood before
/// the sample arrived, then pushed into the window. The very first sample has
/// no prior baseline: it only seeds the detector and produces no observation.
#[derive(Debug, Clone)]
pub struct Collector {
    estimator: BaselineEstimator,
    detector: PauseDetector,
}

impl Collector {
    pub fn new(threshold: u32, window_size: usize) -> Self {
        Self {
            estimator: BaselineEstimator::new(threshold, window_size),
            detector: PauseDetector::new(),
        }
    }

    pub fn process(&mut self, sample: Sample) -> Option<Observation> {
        let humidity = sample.humidity;

        let Some(baseline) = self.estimator.baseline() else {
            self.detector.seed(humidity);
            let baseline = self.estimator.accept(humidity);
            debug!("Seeded with {}%, initial baseline {}%", humidity, baseline);
            return None;
        };

        let pause = self.detector.observe(humidity, baseline);
        let next = self.estimator.accept(humidity);
        debug!(
            "humidity={}% baseline={}% next_baseline={}% window={} state={:?}",
            humidity,
            baseline,
            next,
            self.estimator.len(),
            self.detector.state()
        );

        Some(Observation {
            humidity,
            baseline,
            pause,
        })
    }

    /// Baseline the next sample will be compared against
    #[cfg(test)]
    pub fn baseline(&self) -> Option<u32> {
        self.estimator.baseline()
    }

    #[cfg(test)]
    pub fn detector_state(&self) -> crate::detection::pause::DetectorState {
        self.detector.state()
    }
}
