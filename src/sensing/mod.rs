//! Auxiliary sensor signals: capability traits, simulated fallbacks and the
//! aggregator that samples them for each payload.

mod aggregator;
mod providers;
mod simulated;

pub use aggregator::{SensorAggregator, SensorSample};
pub use providers::{BiometricSensor, GazeTracker, HandTracker};
pub use simulated::{
    SimulatedSensors, FOCUS_RANGE, HEART_RATE_RANGE, PRECISION_RANGE, STRESS_RANGE,
};
