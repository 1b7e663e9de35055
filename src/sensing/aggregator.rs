use serde::{Deserialize, Serialize};

use super::providers::{BiometricSensor, GazeTracker, HandTracker};
use super::simulated::SimulatedSensors;

/// Instantaneous sensor readings for one payload.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SensorSample {
    pub gaze_focus_score: f64,
    pub hand_tracking_precision: f64,
    pub heart_rate_avg: u32,
    pub stress_level: f64,
}

/// Reads each attached provider, falling back to simulated values for any
/// capability that is absent.
pub struct SensorAggregator {
    gaze: Option<Box<dyn GazeTracker>>,
    hand: Option<Box<dyn HandTracker>>,
    biometric: Option<Box<dyn BiometricSensor>>,
    fallback: SimulatedSensors,
}

impl SensorAggregator {
    pub fn new() -> Self {
        Self::with_fallback(SimulatedSensors::new())
    }

    pub fn with_fallback(fallback: SimulatedSensors) -> Self {
        Self {
            gaze: None,
            hand: None,
            biometric: None,
            fallback,
        }
    }

    pub fn gaze(mut self, tracker: Box<dyn GazeTracker>) -> Self {
        self.gaze = Some(tracker);
        self
    }

    pub fn hand(mut self, tracker: Box<dyn HandTracker>) -> Self {
        self.hand = Some(tracker);
        self
    }

    pub fn biometric(mut self, sensor: Box<dyn BiometricSensor>) -> Self {
        self.biometric = Some(sensor);
        self
    }

    /// Provider readings are clamped into their documented ranges so a
    /// misbehaving device cannot push a payload out of schema.
    pub fn sample(&mut self) -> SensorSample {
        let gaze_focus_score = match self.gaze.as_mut() {
            Some(tracker) => unit(tracker.focus_score()),
            None => self.fallback.focus_score(),
        };
        let hand_tracking_precision = match self.hand.as_mut() {
            Some(tracker) => unit(tracker.precision_score()),
            None => self.fallback.precision_score(),
        };
        let (heart_rate_avg, stress_level) = match self.biometric.as_mut() {
            Some(sensor) => (sensor.average_heart_rate().max(1), unit(sensor.stress_level())),
            None => (
                self.fallback.average_heart_rate(),
                self.fallback.stress_level(),
            ),
        };

        SensorSample {
            gaze_focus_score,
            hand_tracking_precision,
            heart_rate_avg,
            stress_level,
        }
    }
}

impl Default for SensorAggregator {
    fn default() -> Self {
        Self::new()
    }
}

fn unit(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}
