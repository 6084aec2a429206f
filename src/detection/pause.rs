//! Edge-triggered detection of whispering pauses
//!
//! A pause is the first strict decrease in humidity after humidity climbed
//! above the baseline. Once it fires the detector stays quiet for the rest of
//! the downward run and only re-arms when humidity rises again while the
//! previous reading was above the baseline.

/// Lifecycle of the detector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetectorState {
    /// No reading accepted yet
    Uninitialized,
    /// One reading seen; nothing to compare against yet
    Seeded { current: u32 },
    /// A decrease above the baseline will fire
    Armed { current: u32 },
    /// Fired during the current downward run
    Disarmed { current: u32 },
}

impl DetectorState {
    /// Last reading the detector has seen
    pub fn current(&self) -> Option<u32> {
        match *self {
            DetectorState::Uninitialized => None,
            DetectorState::Seeded { current }
            | DetectorState::Armed { current }
            | DetectorState::Disarmed { current } => Some(current),
        }
    }

    pub fn is_armed(&self) -> bool {
        !matches!(self, DetectorState::Disarmed { .. })
    }
}

/// One detector transition over `(previous, current, baseline)`
///
/// Returns `(fires, armed)` for the next step. Equal readings, or a previous
/// reading at or below the baseline, leave `armed` untouched.
pub fn step(previous: u32, current: u32, baseline: u32, armed: bool) -> (bool, bool) {
    let mut fires = false;
    let mut armed = armed;

    if previous > current && previous > baseline && armed {
        fires = true;
        armed = false;
    }

    if previous < current && previous > baseline {
        armed = true;
    }

    (fires, armed)
}

#[derive(Debug, Clone)]
pub struct PauseDetector {
    state: DetectorState,
}

impl Default for PauseDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl PauseDetector {
    pub fn new() -> Self {
        Self {
            state: DetectorState::Uninitialized,
        }
    }

    pub fn state(&self) -> DetectorState {
        self.state
    }

    /// Record the first accepted reading without evaluating it
    pub fn seed(&mut self, current: u32) {
        self.state = DetectorState::Seeded { current };
    }

    /// Feed the next reading and report whether it starts a pause
    ///
    /// Called before the detector is seeded, the reading becomes the seed and
    /// never fires.
    pub fn observe(&mut self, current: u32, baseline: u32) -> bool {
        let Some(previous) = self.state.current() else {
            self.seed(current);
            return false;
        };

        let (fires, armed) = step(previous, current, baseline, self.state.is_armed());
        self.state = if armed {
            DetectorState::Armed { current }
        } else {
            DetectorState::Disarmed { current }
        };
        fires
    }
}
