/// Eye tracking capability.
pub trait GazeTracker: Send {
    /// Focus score in `[0, 1]`.
    fn focus_score(&mut self) -> f64;
}

/// Hand tracking capability.
pub trait HandTracker: Send {
    /// Precision score in `[0, 1]`.
    fn precision_score(&mut self) -> f64;
}

/// Heart rate / stress capability.
pub trait BiometricSensor: Send {
    /// Average heart rate in beats per minute.
    fn average_heart_rate(&mut self) -> u32;
    /// Stress level in `[0, 1]`.
    fn stress_level(&mut self) -> f64;
}
