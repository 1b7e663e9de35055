use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::{env, fs, path::Path, time::Duration};

pub const BASE_URL_ENV: &str = "TELEMETRY_BASE_URL";
pub const SEND_INTERVAL_ENV: &str = "TELEMETRY_SEND_INTERVAL_SECS";

/// Telemetry configuration. Fixed once the controller is built.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TelemetryConfig {
    pub base_url: String,
    /// Period of the background send timer.
    pub send_interval_secs: f64,
    pub scenario_type: String,
    pub total_zones: u32,
    pub request_timeout_secs: f64,
    /// How long teardown waits on its final send before detaching it.
    pub teardown_grace_secs: f64,
    pub player_id: Option<String>,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".into(),
            send_interval_secs: 30.0,
            scenario_type: "problem_solving".into(),
            total_zones: 12,
            request_timeout_secs: 30.0,
            teardown_grace_secs: 5.0,
            player_id: None,
        }
    }
}

impl TelemetryConfig {
    /// Reads a JSON config file. Missing fields fall back to defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read telemetry config from {}", path.display()))?;
        let config: Self = serde_json::from_str(&contents)
            .with_context(|| format!("Invalid telemetry config in {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(url) = env::var(BASE_URL_ENV) {
            self.base_url = url;
        }
        if let Ok(raw) = env::var(SEND_INTERVAL_ENV) {
            self.send_interval_secs = raw
                .trim()
                .parse()
                .with_context(|| format!("{SEND_INTERVAL_ENV} is not a number: {raw}"))?;
        }
        self.validate()
    }

    pub fn validate(&self) -> Result<()> {
        if self.base_url.trim().is_empty() {
            bail!("base_url must not be empty");
        }
        if self.total_zones == 0 {
            bail!("total_zones must be greater than zero");
        }
        for (name, value) in [
            ("send_interval_secs", self.send_interval_secs),
            ("request_timeout_secs", self.request_timeout_secs),
            ("teardown_grace_secs", self.teardown_grace_secs),
        ] {
            if !value.is_finite() || value <= 0.0 {
                bail!("{name} must be a positive number of seconds, got {value}");
            }
        }
        Ok(())
    }

    pub fn send_interval(&self) -> Duration {
        Duration::from_secs_f64(self.send_interval_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs_f64(self.request_timeout_secs)
    }

    pub fn teardown_grace(&self) -> Duration {
        Duration::from_secs_f64(self.teardown_grace_secs)
    }
}
