/// Ambient humidity baseline from a sliding median window
use std::collections::VecDeque;

/// Default number of accepted readings kept for the median
pub const DEFAULT_WINDOW_SIZE: usize = 50;

/// Default offset added above the median, in percentage points
pub const DEFAULT_THRESHOLD: u32 = 2;

/// Bounded history of accepted readings and the baseline derived from it
///
/// The baseline is `median(window) + threshold`, rounded half to even, and is
/// recomputed once every time a reading is accepted. It stays unset until the
/// first reading arrives.
#[derive(Debug, Clone)]
pub struct BaselineEstimator {
    window: VecDeque<u32>,
    window_size: usize,
    threshold: u32,
    baseline: Option<u32>,
}

impl Default for BaselineEstimator {
    fn default() -> Self {
        Self::new(DEFAULT_THRESHOLD, DEFAULT_WINDOW_SIZE)
    }
}

impl BaselineEstimator {
    /// `window_size` must be at least 1; configuration enforces this.
    pub fn new(threshold: u32, window_size: usize) -> Self {
        Self {
            window: VecDeque::with_capacity(window_size + 1),
            window_size,
            threshold,
            baseline: None,
        }
    }

    /// Push an accepted reading and return the recomputed baseline
    pub fn accept(&mut self, humidity: u32) -> u32 {
        self.window.push_back(humidity);
        while self.window.len() > self.window_size {
            self.window.pop_front();
        }

        let median = median(self.window.iter().copied()).unwrap_or(f64::from(humidity));
        let baseline = (median + f64::from(self.threshold)).round_ties_even() as u32;
        self.baseline = Some(baseline);
        baseline
    }

    pub fn baseline(&self) -> Option<u32> {
        self.baseline
    }

    /// Readings currently in the window, oldest first
    #[cfg(test)]
    pub fn window(&self) -> impl Iterator<Item = u32> + '_ {
        self.window.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.window.len()
    }
}

/// Statistical median; the mean of the two middle values for even counts
pub fn median<I>(values: I) -> Option<f64>
where
    I: IntoIterator<Item = u32>,
{
    let mut sorted: Vec<u32> = values.into_iter().collect();
    if sorted.is_empty() {
        return None;
    }
    sorted.sort_unstable();

    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 1 {
        Some(f64::from(sorted[mid]))
    } else {
        Some((f64::from(sorted[mid - 1]) + f64::from(sorted[mid])) / 2.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_median_odd_and_even() {
        assert_eq!(median(Vec::<u32>::new()), None);
        assert_eq!(median([7]), Some(7.0));
        assert_eq!(median([9, 1, 5]), Some(5.0));
        assert_eq!(median([60, 61]), Some(60.5));
        assert_eq!(median([40, 10, 30, 20]), Some(25.0));
    }

    #[test]
    fn test_baseline_unset_until_first_reading() {
        let mut estimator = BaselineEstimator::default();
        assert_eq!(estimator.baseline(), None);
        assert_eq!(estimator.accept(0), 2);
        assert_eq!(estimator.baseline(), Some(2));
    }

    #[test]
    fn test_baseline_ties_round_to_even() {
        // 60.5 + 2 = 62.5 -> 62
        let mut estimator = BaselineEstimator::default();
        estimator.accept(60);
        assert_eq!(estimator.accept(61), 62);

        // 61.5 + 2 = 63.5 -> 64
        let mut estimator = BaselineEstimator::default();
        estimator.accept(61);
        assert_eq!(estimator.accept(62), 64);
    }

    #[test]
    fn test_window_keeps_most_recent_readings() {
        let mut estimator = BaselineEstimator::new(2, 3);
        for humidity in [10, 20, 30, 40, 50] {
            estimator.accept(humidity);
        }
        assert_eq!(estimator.window().collect::<Vec<_>>(), vec![30, 40, 50]);
        assert_eq!(estimator.baseline(), Some(42));
    }

    #[test]
    fn test_steady_humidity_settles_two_points_above() {
        let mut estimator = BaselineEstimator::default();
        for _ in 0..60 {
            estimator.accept(60);
        }
        assert_eq!(estimator.len(), DEFAULT_WINDOW_SIZE);
        assert_eq!(estimator.baseline(), Some(62));
    }

    #[test]
    fn test_median_ignores_single_outlier() {
        let mut estimator = BaselineEstimator::default();
        for _ in 0..10 {
            estimator.accept(55);
        }
        assert_eq!(estimator.accept(95), 57);
    }

    proptest! {
        #[test]
        fn window_never_exceeds_size(
            readings in prop::collection::vec(0u32..=100, 1..200),
            window_size in 1usize..60,
        ) {
            let mut estimator = BaselineEstimator::new(DEFAULT_THRESHOLD, window_size);
            for (n, humidity) in readings.iter().enumerate() {
                estimator.accept(*humidity);
                prop_assert!(estimator.len() <= window_size);

                let seen = &readings[..=n];
                let expected = &seen[seen.len().saturating_sub(window_size)..];
                prop_assert_eq!(estimator.window().collect::<Vec<_>>(), expected.to_vec());
            }
        }

        #[test]
        fn baseline_depends_only_on_window_contents(
            mut readings in prop::collection::vec(0u32..=100, 1..=50),
        ) {
            let mut forward = BaselineEstimator::default();
            let forward_baseline = readings.iter().map(|h| forward.accept(*h)).last();

            readings.reverse();
            let mut reversed = BaselineEstimator::default();
            let reversed_baseline = readings.iter().map(|h| reversed.accept(*h)).last();

            prop_assert_eq!(forward_baseline, reversed_baseline);
        }
    }
}
