pub mod client;
pub mod error;
pub mod payload;

pub use client::{TelemetryClient, INTEGRATION_PATH};
pub use error::TelemetryError;
pub use payload::{AnalysisResult, CognitiveProfile, PerformancePayload, StressIndicators};
