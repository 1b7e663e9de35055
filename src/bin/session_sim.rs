//! Drives a simulated assessment session against an analysis backend.
//!
//! ```text
//! session-sim --base-url http://localhost:8000 --zones 4 --zone-delay-ms 1500
//! ```

use std::{path::PathBuf, sync::Arc, time::Duration};

use anyhow::Result;
use assessment_telemetry::{
    metrics::RandomJitter,
    sensing::SimulatedSensors,
    RecommendationDisplay, ResponseRouter, ScenarioQueue, SensorAggregator, TelemetryConfig,
    TelemetryController,
};
use clap::Parser;
use log::info;
use rand::{rngs::StdRng, Rng, SeedableRng};

#[derive(Parser, Debug)]
#[command(name = "session-sim", about = "Simulate an assessment session and stream telemetry")]
struct Cli {
    /// JSON config file; defaults are used when omitted
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the backend base URL
    #[arg(long)]
    base_url: Option<String>,

    /// Override the periodic send interval (seconds)
    #[arg(long)]
    send_interval: Option<f64>,

    /// Zones to complete before ending the session
    #[arg(long, default_value_t = 3)]
    zones: u32,

    /// Pause between zone completions
    #[arg(long, default_value_t = 1000)]
    zone_delay_ms: u64,

    /// Seed for simulated sensors, jitter and zone results
    #[arg(long)]
    seed: Option<u64>,
}

struct LogSink;

impl RecommendationDisplay for LogSink {
    fn update_recommendations(&self, careers: &[String]) {
        info!("Recommended careers: {}", careers.join(", "));
    }

    fn show_analysis(&self, text: &str) {
        info!("Analysis: {text}");
    }
}

impl ScenarioQueue for LogSink {
    fn queue_next_scenario(&self, scenario_id: &str) {
        info!("Next scenario queued: {scenario_id}");
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    assessment_telemetry::init_logging();
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => TelemetryConfig::load(path)?,
        None => TelemetryConfig::default(),
    };
    config.apply_env_overrides()?;
    if let Some(url) = cli.base_url {
        config.base_url = url;
    }
    if let Some(interval) = cli.send_interval {
        config.send_interval_secs = interval;
    }

    let (sensors, jitter, mut rng) = match cli.seed {
        Some(seed) => (
            SimulatedSensors::seeded(seed),
            RandomJitter::seeded(seed.wrapping_add(1)),
            StdRng::seed_from_u64(seed.wrapping_add(2)),
        ),
        None => (
            SimulatedSensors::new(),
            RandomJitter::new(),
            StdRng::from_entropy(),
        ),
    };

    let sink = Arc::new(LogSink);
    let controller = TelemetryController::with_providers(
        config,
        ResponseRouter::new(sink.clone(), sink),
        SensorAggregator::with_fallback(sensors),
        Box::new(jitter),
    )?;

    controller.start_session().await?;

    for _ in 0..cli.zones {
        tokio::time::sleep(Duration::from_millis(cli.zone_delay_ms)).await;

        if rng.gen_bool(0.25) {
            controller.on_hint_used().await?;
        }
        let completion_time = rng.gen_range(0.5..3.0);
        let errors = rng.gen_range(0..=3);
        let accuracy = 100.0 - f64::from(errors) * 10.0;
        controller
            .on_zone_completed(completion_time, accuracy, errors)
            .await?;
    }

    let outcome = controller.end_session().await?;
    info!("Simulation finished, final send: {outcome:?}");
    Ok(())
}
