#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SchedulerStatus {
    /// No session yet.
    #[default]
    Idle,
    /// Timer armed, nothing in flight.
    Waiting,
    /// At least one transmission in flight.
    Sending,
    /// Session torn down; nothing more is sent.
    Stopped,
}

/// What asked for a transmission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    TimerElapsed,
    ZoneCompleted,
    Pause,
    Teardown,
}

impl Trigger {
    pub fn as_str(&self) -> &'static str {
        match self {
            Trigger::TimerElapsed => "timer",
            Trigger::ZoneCompleted => "zone",
            Trigger::Pause => "pause",
            Trigger::Teardown => "teardown",
        }
    }
}

/// Decides when a send may start and tracks sends in flight.
///
/// Sends may overlap: every `begin_send` bumps the in-flight count and the
/// scheduler only drops back to `Waiting` once all of them have finished.
#[derive(Debug, Clone, Default)]
pub struct SchedulerState {
    status: SchedulerStatus,
    in_flight: usize,
    next_sequence: u64,
}

impl SchedulerState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> SchedulerStatus {
        self.status
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    /// Number of sends started so far.
    pub fn sends_started(&self) -> u64 {
        self.next_sequence
    }

    /// `Idle -> Waiting` on session start. Returns false if already armed.
    pub fn arm(&mut self) -> bool {
        if self.status != SchedulerStatus::Idle {
            return false;
        }
        self.status = SchedulerStatus::Waiting;
        true
    }

    /// Timer ticks need at least one completed zone; explicit triggers
    /// always pass while a session is live.
    pub fn permits(&self, trigger: Trigger, zones_completed: u32) -> bool {
        match self.status {
            SchedulerStatus::Idle | SchedulerStatus::Stopped => false,
            SchedulerStatus::Waiting | SchedulerStatus::Sending => match trigger {
                Trigger::TimerElapsed => zones_completed > 0,
                Trigger::ZoneCompleted | Trigger::Pause | Trigger::Teardown => true,
            },
        }
    }

    /// Enters `Sending` and returns the sequence number for the new send.
    pub fn begin_send(&mut self) -> u64 {
        self.next_sequence += 1;
        self.in_flight += 1;
        if self.status == SchedulerStatus::Waiting {
            self.status = SchedulerStatus::Sending;
        }
        self.next_sequence
    }

    pub fn finish_send(&mut self) {
        self.in_flight = self.in_flight.saturating_sub(1);
        if self.status == SchedulerStatus::Sending && self.in_flight == 0 {
            self.status = SchedulerStatus::Waiting;
        }
    }

    pub fn stop(&mut self) {
        self.status = SchedulerStatus::Stopped;
    }
}
