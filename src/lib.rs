//! Session telemetry for interactive cognitive assessments.
//!
//! A [`TelemetryController`] owns one session. Zone completions, pauses,
//! teardown and a periodic timer each capture an owned
//! [`PerformancePayload`], post it to the analysis backend and route the
//! returned [`AnalysisResult`] to the host's UI and scenario queue.

mod utils;

pub mod metrics;
pub mod models;
pub mod router;
pub mod scheduler;
pub mod sensing;
pub mod session;
pub mod settings;
pub mod telemetry;

pub use models::{Session, SessionSnapshot, SessionStatus};
pub use router::{Dispatch, RecommendationDisplay, ResponseRouter, ScenarioQueue};
pub use scheduler::{SchedulerStatus, SendOutcome, TelemetryController, Trigger};
pub use sensing::{BiometricSensor, GazeTracker, HandTracker, SensorAggregator, SensorSample};
pub use settings::TelemetryConfig;
pub use telemetry::{AnalysisResult, PerformancePayload, TelemetryClient, TelemetryError};
pub use utils::logging::init as init_logging;
