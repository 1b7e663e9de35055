use thiserror::Error;

/// Failures of a single transmission. None of them are fatal; the caller
/// logs and drops the payload.
#[derive(Debug, Error)]
pub enum TelemetryError {
    #[error("failed to encode payload: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("transport failure: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("backend returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("failed to parse analysis response: {0}")]
    PayloadParse(#[source] serde_json::Error),
}

impl TelemetryError {
    /// The request never produced a usable response (unreachable endpoint or
    /// non-success status).
    pub fn is_transmission(&self) -> bool {
        matches!(self, TelemetryError::Transport(_) | TelemetryError::Status { .. })
    }

    pub fn status_code(&self) -> Option<u16> {
        match self {
            TelemetryError::Status { status, .. } => Some(*status),
            TelemetryError::Transport(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
