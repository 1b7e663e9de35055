use std::time::Duration;

use reqwest::header::CONTENT_TYPE;

use super::error::TelemetryError;
use super::payload::{AnalysisResult, PerformancePayload};
use crate::settings::TelemetryConfig;

const ENABLE_LOGS: bool = true;

use crate::{log_info, log_warn};

pub const INTEGRATION_PATH: &str = "/api/unity-integration";

/// Posts performance payloads to the analysis backend.
///
/// Each call to [`send`](Self::send) is one attempt: no retry, no queueing.
/// Cloning is cheap and shares the connection pool.
#[derive(Clone)]
pub struct TelemetryClient {
    http: reqwest::Client,
    endpoint: String,
}

impl TelemetryClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, TelemetryError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .pool_max_idle_per_host(2)
            .build()?;

        Ok(Self {
            http,
            endpoint: format!("{}{}", base_url.trim_end_matches('/'), INTEGRATION_PATH),
        })
    }

    pub fn from_config(config: &TelemetryConfig) -> Result<Self, TelemetryError> {
        Self::new(&config.base_url, config.request_timeout())
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub async fn send(&self, payload: &PerformancePayload) -> Result<AnalysisResult, TelemetryError> {
        let body = serde_json::to_vec(payload).map_err(TelemetryError::Encode)?;
        log_info!(
            "Transmitting session {} ({} zones) to {}, payload size {} bytes",
            payload.session_id,
            payload.zones_completed,
            self.endpoint,
            body.len()
        );

        let response = self
            .http
            .post(&self.endpoint)
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            log_warn!("Analysis request rejected with status {}", status);
            return Err(TelemetryError::Status {
                status: status.as_u16(),
                body: text,
            });
        }

        let analysis: AnalysisResult =
            serde_json::from_str(&text).map_err(TelemetryError::PayloadParse)?;

        log_info!(
            "Analysis received for session {}: confidence {}, top career {}, processed in {}ms",
            analysis.session_id,
            analysis.confidence_score,
            analysis
                .recommended_careers
                .first()
                .map(String::as_str)
                .unwrap_or("<none>"),
            analysis.processing_time_ms
        );

        Ok(analysis)
    }
}
