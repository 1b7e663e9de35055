pub mod controller;
pub mod state;

pub use controller::{SendOutcome, TelemetryController};
pub use state::{SchedulerState, SchedulerStatus, Trigger};
