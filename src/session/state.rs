use anyhow::{anyhow, bail, Result};
use chrono::{DateTime, Utc};
use rand::Rng;
use tokio::time::Instant;
use uuid::Uuid;

use crate::models::{Session, SessionSnapshot, SessionStatus};

const ENABLE_LOGS: bool = true;

use crate::log_info;

/// Identity and fixed configuration handed to [`SessionState::initialize`].
#[derive(Debug, Clone)]
pub struct SessionIdentity {
    /// Overrides the generated `player_NNNN` id when set.
    pub player_id: Option<String>,
    pub scenario_type: String,
    pub total_zones: u32,
}

/// Single-writer owner of the live session counters.
#[derive(Debug, Default)]
pub struct SessionState {
    status: SessionStatus,
    session: Option<Session>,
    /// Monotonic start anchor for elapsed-time math; `started_at` is only
    /// used for display and the wire.
    anchor: Option<Instant>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn zones_completed(&self) -> u32 {
        self.session.as_ref().map_or(0, |s| s.zones_completed)
    }

    /// Assigns session and player identity. Identity is set exactly once; a
    /// second call fails and leaves the existing session untouched.
    pub fn initialize(
        &mut self,
        identity: SessionIdentity,
        started_at: DateTime<Utc>,
        now: Instant,
    ) -> Result<&Session> {
        if self.status != SessionStatus::Idle {
            bail!("session already initialized");
        }
        if identity.total_zones == 0 {
            bail!("total_zones must be greater than zero");
        }

        let player_id = identity
            .player_id
            .unwrap_or_else(|| format!("player_{}", rand::thread_rng().gen_range(1000..=9999)));

        self.session = Some(Session {
            session_id: Uuid::new_v4().to_string(),
            player_id,
            scenario_type: identity.scenario_type,
            started_at,
            zones_completed: 0,
            total_zones: identity.total_zones,
            errors_made: 0,
            hints_used: 0,
            response_times: Vec::new(),
        });
        self.anchor = Some(now);
        self.status = SessionStatus::Active;

        self.session
            .as_ref()
            .ok_or_else(|| anyhow!("session missing after initialization"))
    }

    /// Records a finished zone. `accuracy` is informational only; the
    /// session's accuracy is always derived from the error count.
    pub fn record_zone_completion(
        &mut self,
        completion_time: f64,
        accuracy: f64,
        errors_in_zone: u32,
    ) -> Result<u32> {
        if !completion_time.is_finite() || completion_time < 0.0 {
            bail!("invalid zone completion time {completion_time}");
        }
        let session = self.active_session_mut()?;

        session.zones_completed = session.zones_completed.saturating_add(1);
        session.response_times.push(completion_time);
        session.errors_made = session.errors_made.saturating_add(errors_in_zone);

        log_info!(
            "Zone {} completed in {:.2}s (reported accuracy {:.1}%, errors {})",
            session.zones_completed,
            completion_time,
            accuracy,
            errors_in_zone
        );
        Ok(session.zones_completed)
    }

    pub fn record_hint_used(&mut self) -> Result<u32> {
        let session = self.active_session_mut()?;
        session.hints_used = session.hints_used.saturating_add(1);
        log_info!("Hint used. Total hints: {}", session.hints_used);
        Ok(session.hints_used)
    }

    /// Independent copy of the current counters. Later mutation of this
    /// state never shows through an earlier snapshot.
    pub fn snapshot(&self) -> Result<SessionSnapshot> {
        let session = self
            .session
            .as_ref()
            .ok_or_else(|| anyhow!("no session has been initialized"))?;
        let elapsed_secs = self
            .anchor
            .map(|anchor| anchor.elapsed().as_secs_f64())
            .unwrap_or(0.0);

        Ok(SessionSnapshot {
            session: session.clone(),
            elapsed_secs,
        })
    }

    /// Closes the session. Counters stay readable via [`snapshot`](Self::snapshot)
    /// but no further events are accepted.
    pub fn end(&mut self) -> Result<()> {
        match self.status {
            SessionStatus::Active => {
                self.status = SessionStatus::Ended;
                Ok(())
            }
            SessionStatus::Idle => Err(anyhow!("no active session to end")),
            SessionStatus::Ended => Err(anyhow!("session already ended")),
        }
    }

    fn active_session_mut(&mut self) -> Result<&mut Session> {
        match self.status {
            SessionStatus::Active => self
                .session
                .as_mut()
                .ok_or_else(|| anyhow!("missing session record")),
            SessionStatus::Idle => Err(anyhow!("session not started")),
            SessionStatus::Ended => Err(anyhow!("session has ended")),
        }
    }
}
