use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SessionStatus {
    #[default]
    Idle,
    Active,
    Ended,
}

/// One continuous assessment session.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Session {
    pub session_id: String,
    pub player_id: String,
    pub scenario_type: String,
    pub started_at: DateTime<Utc>,
    pub zones_completed: u32,
    pub total_zones: u32,
    pub errors_made: u32,
    pub hints_used: u32,
    /// Zone completion times in seconds, in the order they occurred.
    pub response_times: Vec<f64>,
}

/// Owned copy of a [`Session`] taken at a point in time, plus the elapsed
/// wall time at capture. Holds no reference back to the live session.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSnapshot {
    pub session: Session,
    pub elapsed_secs: f64,
}
