//! Derived session metrics.
//!
//! Pure functions over session counters. The only non-determinism
//! (engagement jitter) comes in through a [`JitterSource`] supplied by the
//! caller.

mod jitter;

pub use jitter::{FixedJitter, JitterSource, RandomJitter};

/// Tasks assumed per zone when turning an error count into an error rate.
pub const TASKS_PER_ZONE: f64 = 10.0;

/// Elapsed time over which engagement decays from 1 to 0.
pub const ENGAGEMENT_DECAY_SECS: f64 = 600.0;

/// Maximum absolute jitter added to the engagement score.
pub const ENGAGEMENT_JITTER: f64 = 0.1;

/// Reported when no zone has been completed yet.
pub const DEFAULT_RESPONSE_TIME_MS: u32 = 2000;

fn clamp01(value: f64) -> f64 {
    value.clamp(0.0, 1.0)
}

/// Percentage of tasks answered without error, in `[0, 100]`.
pub fn compute_accuracy(zones_completed: u32, errors_made: u32) -> f64 {
    if zones_completed == 0 {
        return 100.0;
    }

    let error_rate = f64::from(errors_made) / (f64::from(zones_completed) * TASKS_PER_ZONE);
    (100.0 - error_rate * 100.0).clamp(0.0, 100.0)
}

/// Engagement in `[0, 1]`, decaying linearly over ten minutes with bounded
/// jitter on top.
pub fn compute_engagement(elapsed_secs: f64, jitter: &mut dyn JitterSource) -> f64 {
    let decay = clamp01(elapsed_secs.max(0.0) / ENGAGEMENT_DECAY_SECS);
    let base = clamp01(1.0 - decay);
    clamp01(base + jitter.next(-ENGAGEMENT_JITTER, ENGAGEMENT_JITTER))
}

/// Latest zone completion time in whole milliseconds.
pub fn compute_response_time_ms(response_times: &[f64]) -> u32 {
    match response_times.last() {
        Some(secs) => (secs * 1000.0).round().clamp(0.0, f64::from(u32::MAX)) as u32,
        None => DEFAULT_RESPONSE_TIME_MS,
    }
}
