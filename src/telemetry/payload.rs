use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};

use crate::metrics::{self, JitterSource};
use crate::models::SessionSnapshot;
use crate::sensing::SensorSample;

/// Body of `POST /api/unity-integration`.
///
/// Built fresh for every send from owned data only, so it never observes
/// session mutations that happen after it was assembled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformancePayload {
    pub session_id: String,
    pub player_id: String,
    pub scenario_type: String,
    pub duration_seconds: f64,
    pub response_time_ms: u32,
    pub accuracy_percentage: f64,
    pub zones_completed: u32,
    pub total_zones: u32,
    pub errors_made: u32,
    pub hints_used: u32,
    pub gaze_focus_score: f64,
    pub hand_tracking_precision: f64,
    pub stress_indicators: StressIndicators,
    #[serde(with = "millis_timestamp")]
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StressIndicators {
    pub heart_rate_avg: u32,
    pub stress_level: f64,
    pub engagement_score: f64,
}

impl PerformancePayload {
    pub fn assemble(
        snapshot: &SessionSnapshot,
        sample: SensorSample,
        jitter: &mut dyn JitterSource,
        now: DateTime<Utc>,
    ) -> Self {
        let session = &snapshot.session;

        Self {
            session_id: session.session_id.clone(),
            player_id: session.player_id.clone(),
            scenario_type: session.scenario_type.clone(),
            duration_seconds: snapshot.elapsed_secs,
            response_time_ms: metrics::compute_response_time_ms(&session.response_times),
            accuracy_percentage: metrics::compute_accuracy(
                session.zones_completed,
                session.errors_made,
            ),
            zones_completed: session.zones_completed,
            total_zones: session.total_zones,
            errors_made: session.errors_made,
            hints_used: session.hints_used,
            gaze_focus_score: sample.gaze_focus_score,
            hand_tracking_precision: sample.hand_tracking_precision,
            stress_indicators: StressIndicators {
                heart_rate_avg: sample.heart_rate_avg,
                stress_level: sample.stress_level,
                engagement_score: metrics::compute_engagement(snapshot.elapsed_secs, jitter),
            },
            // The wire format carries milliseconds; drop the rest so a
            // decoded payload compares equal to the one we sent.
            timestamp: now.trunc_subsecs(3),
        }
    }
}

/// Backend analysis of one payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub status: String,
    pub session_id: String,
    pub analysis: String,
    pub cognitive_profile: CognitiveProfile,
    #[serde(default)]
    pub recommended_careers: Vec<String>,
    #[serde(default)]
    pub next_vr_scenarios: Vec<String>,
    pub confidence_score: f64,
    pub processing_time_ms: u64,
    pub timestamp: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CognitiveProfile {
    pub problem_solving: f64,
    pub response_speed: f64,
    pub attention_focus: f64,
    pub motor_precision: f64,
    pub persistence: f64,
}

/// `YYYY-MM-DDTHH:mm:ss.sssZ`
mod millis_timestamp {
    use chrono::{DateTime, Utc};
    use serde::{de, Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3fZ";

    pub fn serialize<S: Serializer>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&value.format(FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|err| de::Error::custom(format!("invalid timestamp '{raw}': {err}")))
    }
}
