/// A raw result from one sensor poll
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reading {
    pub humidity: f32,
    pub valid: bool,
}

impl Reading {
    pub fn ok(humidity: f32) -> Self {
        Reading {
            humidity,
            valid: true,
        }
    }

    pub fn failed() -> Self {
        Reading {
            humidity: 0.0,
            valid: false,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// Round an accepted reading to whole percent.
    ///
    /// Returns None for invalid readings and for values that are not a
    /// relative humidity (non-finite or outside 0..=100).
    pub fn sample(&self) -> Option<Sample> {
        if !self.valid || !self.humidity.is_finite() {
            return None;
        }
        let rounded = f64::from(self.humidity).round_ties_even();
        if !(0.0..=100.0).contains(&rounded) {
            return None;
        }
        Some(Sample {
            humidity: rounded as u32,
        })
    }
}

/// An accepted humidity reading in whole percent (0-100)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sample {
    pub humidity: u32,
}

/// Outcome of processing one accepted, non-seed sample
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Observation {
    pub humidity: u32,
    pub baseline: u32,
    pub pause: bool,
}
