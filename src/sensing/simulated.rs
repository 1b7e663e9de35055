use std::ops::RangeInclusive;

use rand::{rngs::StdRng, Rng, SeedableRng};

use super::providers::{BiometricSensor, GazeTracker, HandTracker};

pub const FOCUS_RANGE: RangeInclusive<f64> = 0.6..=0.95;
pub const PRECISION_RANGE: RangeInclusive<f64> = 0.7..=0.98;
pub const HEART_RATE_RANGE: RangeInclusive<u32> = 75..=110;
pub const STRESS_RANGE: RangeInclusive<f64> = 0.2..=0.8;

/// Stand-in for every sensor capability, drawing uniformly from the
/// documented fallback ranges.
pub struct SimulatedSensors {
    rng: StdRng,
}

impl SimulatedSensors {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for SimulatedSensors {
    fn default() -> Self {
        Self::new()
    }
}

impl GazeTracker for SimulatedSensors {
    fn focus_score(&mut self) -> f64 {
        self.rng.gen_range(FOCUS_RANGE)
    }
}

impl HandTracker for SimulatedSensors {
    fn precision_score(&mut self) -> f64 {
        self.rng.gen_range(PRECISION_RANGE)
    }
}

impl BiometricSensor for SimulatedSensors {
    fn average_heart_rate(&mut self) -> u32 {
        self.rng.gen_range(HEART_RATE_RANGE)
    }

    fn stress_level(&mut self) -> f64 {
        self.rng.gen_range(STRESS_RANGE)
    }
}
