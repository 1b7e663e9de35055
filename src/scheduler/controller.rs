use std::{sync::Arc, time::Duration};

use anyhow::{anyhow, bail, Result};
use chrono::Utc;
use tokio::{
    sync::Mutex,
    task::JoinHandle,
    time::{self, Instant},
};
use tokio_util::sync::CancellationToken;

use crate::{
    metrics::{JitterSource, RandomJitter},
    models::{SessionSnapshot, SessionStatus},
    router::{Dispatch, ResponseRouter},
    sensing::SensorAggregator,
    session::{SessionIdentity, SessionState},
    settings::TelemetryConfig,
    telemetry::{PerformancePayload, TelemetryClient},
};

use super::{SchedulerState, SchedulerStatus, Trigger};

const ENABLE_LOGS: bool = true;

use crate::{log_debug, log_error, log_info, log_warn};

/// How a single transmission ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendOutcome {
    /// Analysis received and forwarded to the collaborators.
    Delivered,
    /// Analysis received but it carried no recommendations.
    NoRecommendations,
    /// Transport, status or parse failure; the payload was dropped.
    Failed,
    /// Teardown stopped waiting; the send continues in the background.
    InFlight,
}

struct LiveState {
    session: SessionState,
    scheduler: SchedulerState,
    sensors: SensorAggregator,
    jitter: Box<dyn JitterSource>,
}

struct Ticker {
    handle: JoinHandle<()>,
    cancel: CancellationToken,
}

/// Owns the session, the periodic send timer and every send it spawns.
///
/// Session events and the timer both go through the same lock; payloads are
/// assembled under it and then handed, owned, to a spawned send task. Sends
/// never hold the lock across the network call, so they may overlap.
#[derive(Clone)]
pub struct TelemetryController {
    live: Arc<Mutex<LiveState>>,
    client: TelemetryClient,
    router: ResponseRouter,
    config: Arc<TelemetryConfig>,
    ticker: Arc<Mutex<Option<Ticker>>>,
}

impl TelemetryController {
    pub fn new(config: TelemetryConfig, router: ResponseRouter) -> Result<Self> {
        Self::with_providers(
            config,
            router,
            SensorAggregator::new(),
            Box::new(RandomJitter::new()),
        )
    }

    pub fn with_providers(
        config: TelemetryConfig,
        router: ResponseRouter,
        sensors: SensorAggregator,
        jitter: Box<dyn JitterSource>,
    ) -> Result<Self> {
        config.validate()?;
        let client = TelemetryClient::from_config(&config)?;

        Ok(Self {
            live: Arc::new(Mutex::new(LiveState {
                session: SessionState::new(),
                scheduler: SchedulerState::new(),
                sensors,
                jitter,
            })),
            client,
            router,
            config: Arc::new(config),
            ticker: Arc::new(Mutex::new(None)),
        })
    }

    pub fn config(&self) -> &TelemetryConfig {
        &self.config
    }

    pub async fn status(&self) -> SchedulerStatus {
        self.live.lock().await.scheduler.status()
    }

    pub async fn in_flight(&self) -> usize {
        self.live.lock().await.scheduler.in_flight()
    }

    pub async fn snapshot(&self) -> Result<SessionSnapshot> {
        self.live.lock().await.session.snapshot()
    }

    /// Starts the session and arms the periodic timer.
    pub async fn start_session(&self) -> Result<SessionSnapshot> {
        let snapshot = {
            let mut guard = self.live.lock().await;
            let live = &mut *guard;

            let identity = SessionIdentity {
                player_id: self.config.player_id.clone(),
                scenario_type: self.config.scenario_type.clone(),
                total_zones: self.config.total_zones,
            };
            let session = live
                .session
                .initialize(identity, Utc::now(), Instant::now())?;
            log_info!(
                "Assessment session {} started for {} ({})",
                session.session_id,
                session.player_id,
                session.scenario_type
            );

            live.scheduler.arm();
            live.session.snapshot()?
        };

        log_info!("Reporting to analysis backend at {}", self.client.endpoint());
        self.spawn_ticker().await;

        Ok(snapshot)
    }

    /// Records a finished zone and immediately sends the updated counters.
    pub async fn on_zone_completed(
        &self,
        completion_time: f64,
        accuracy: f64,
        errors_in_zone: u32,
    ) -> Result<Option<JoinHandle<SendOutcome>>> {
        let prepared = {
            let mut guard = self.live.lock().await;
            guard
                .session
                .record_zone_completion(completion_time, accuracy, errors_in_zone)?;
            prepare_send(&mut guard, Trigger::ZoneCompleted)
        };

        Ok(prepared.map(|(sequence, payload)| self.spawn_send(sequence, Trigger::ZoneCompleted, payload)))
    }

    /// Counts a hint. The count goes out with the next send.
    pub async fn on_hint_used(&self) -> Result<u32> {
        self.live.lock().await.session.record_hint_used()
    }

    /// Sends the current state when the host pauses. Resuming sends nothing.
    pub async fn on_pause(&self, paused: bool) -> Result<Option<JoinHandle<SendOutcome>>> {
        if !paused {
            return Ok(None);
        }

        let prepared = {
            let mut guard = self.live.lock().await;
            prepare_send(&mut guard, Trigger::Pause)
        };
        if prepared.is_none() {
            log_warn!("Pause ignored: no live session to report");
        }

        Ok(prepared.map(|(sequence, payload)| self.spawn_send(sequence, Trigger::Pause, payload)))
    }

    /// Ends the session: stops the timer, issues one final send and waits
    /// for it up to the configured grace period.
    pub async fn end_session(&self) -> Result<SendOutcome> {
        let (sequence, payload) = {
            let mut guard = self.live.lock().await;
            let live = &mut *guard;
            if live.session.status() != SessionStatus::Active {
                bail!("no active session to end");
            }

            let prepared = prepare_send(live, Trigger::Teardown);
            live.scheduler.stop();
            live.session.end()?;
            prepared.ok_or_else(|| anyhow!("final payload could not be assembled"))?
        };

        self.cancel_ticker().await;

        let handle = self.spawn_send(sequence, Trigger::Teardown, payload);
        let grace = self.config.teardown_grace();
        match time::timeout(grace, handle).await {
            Ok(Ok(outcome)) => {
                log_info!("Session ended; final send #{} finished: {:?}", sequence, outcome);
                Ok(outcome)
            }
            Ok(Err(join_err)) => Err(anyhow!("final send task failed: {join_err}")),
            Err(_) => {
                log_warn!(
                    "Final send #{} still running after {:?}; leaving it in the background",
                    sequence,
                    grace
                );
                Ok(SendOutcome::InFlight)
            }
        }
    }

    fn spawn_send(
        &self,
        sequence: u64,
        trigger: Trigger,
        payload: PerformancePayload,
    ) -> JoinHandle<SendOutcome> {
        let live = self.live.clone();
        let client = self.client.clone();
        let router = self.router.clone();

        tokio::spawn(async move {
            let outcome = deliver(&client, &router, sequence, trigger, payload).await;
            live.lock().await.scheduler.finish_send();
            outcome
        })
    }

    async fn spawn_ticker(&self) {
        let mut ticker_guard = self.ticker.lock().await;
        if let Some(previous) = ticker_guard.take() {
            previous.cancel.cancel();
        }

        let cancel = CancellationToken::new();
        let handle = tokio::spawn(timer_loop(
            self.live.clone(),
            self.client.clone(),
            self.router.clone(),
            self.config.send_interval(),
            cancel.clone(),
        ));

        *ticker_guard = Some(Ticker { handle, cancel });
    }

    /// Stops future ticks. A timer send already on the wire is left to
    /// finish, so the handle is dropped rather than aborted.
    async fn cancel_ticker(&self) {
        if let Some(ticker) = self.ticker.lock().await.take() {
            ticker.cancel.cancel();
            drop(ticker.handle);
        }
    }
}

/// Checks the scheduler and, if allowed, captures an owned payload and
/// reserves a sequence number for it.
fn prepare_send(live: &mut LiveState, trigger: Trigger) -> Option<(u64, PerformancePayload)> {
    if !live
        .scheduler
        .permits(trigger, live.session.zones_completed())
    {
        return None;
    }

    let snapshot = match live.session.snapshot() {
        Ok(snapshot) => snapshot,
        Err(err) => {
            log_warn!("Cannot capture session for {} send: {err}", trigger.as_str());
            return None;
        }
    };

    let sample = live.sensors.sample();
    let payload = PerformancePayload::assemble(&snapshot, sample, live.jitter.as_mut(), Utc::now());
    let sequence = live.scheduler.begin_send();
    log_debug!("Prepared send #{} ({})", sequence, trigger.as_str());

    Some((sequence, payload))
}

async fn deliver(
    client: &TelemetryClient,
    router: &ResponseRouter,
    sequence: u64,
    trigger: Trigger,
    payload: PerformancePayload,
) -> SendOutcome {
    match client.send(&payload).await {
        Ok(analysis) => match router.dispatch(&analysis) {
            Dispatch::Delivered { .. } => SendOutcome::Delivered,
            Dispatch::NoRecommendations => SendOutcome::NoRecommendations,
        },
        Err(err) if err.is_transmission() => {
            log_error!(
                "Send #{} ({}) failed (status {:?}): {err}",
                sequence,
                trigger.as_str(),
                err.status_code()
            );
            SendOutcome::Failed
        }
        Err(err) => {
            log_error!("Send #{} ({}) dropped: {err}", sequence, trigger.as_str());
            SendOutcome::Failed
        }
    }
}

async fn timer_loop(
    live: Arc<Mutex<LiveState>>,
    client: TelemetryClient,
    router: ResponseRouter,
    period: Duration,
    cancel: CancellationToken,
) {
    loop {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                log_info!("Telemetry timer stopped");
                break;
            }
            _ = time::sleep(period) => {}
        }

        let prepared = {
            let mut guard = live.lock().await;
            prepare_send(&mut guard, Trigger::TimerElapsed)
        };

        let Some((sequence, payload)) = prepared else {
            log_debug!("Timer elapsed with nothing to report");
            continue;
        };

        // Awaited inline: the timer rearms only after its own send resolves.
        deliver(&client, &router, sequence, Trigger::TimerElapsed, payload).await;
        live.lock().await.scheduler.finish_send();
    }
}
