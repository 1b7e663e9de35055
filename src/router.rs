use std::sync::Arc;

use crate::telemetry::AnalysisResult;

const ENABLE_LOGS: bool = true;

use crate::{log_debug, log_info};

/// UI surface that shows analysis output.
pub trait RecommendationDisplay: Send + Sync {
    fn update_recommendations(&self, careers: &[String]);
    fn show_analysis(&self, text: &str);
}

/// Scenario scheduler fed by the backend's suggestions.
pub trait ScenarioQueue: Send + Sync {
    fn queue_next_scenario(&self, scenario_id: &str);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatch {
    Delivered { queued_scenario: Option<String> },
    /// The result carried no career recommendations; nothing was forwarded.
    NoRecommendations,
}

/// Hands successful analysis results to the injected collaborators.
#[derive(Clone)]
pub struct ResponseRouter {
    display: Arc<dyn RecommendationDisplay>,
    scenarios: Arc<dyn ScenarioQueue>,
}

impl ResponseRouter {
    pub fn new(display: Arc<dyn RecommendationDisplay>, scenarios: Arc<dyn ScenarioQueue>) -> Self {
        Self { display, scenarios }
    }

    pub fn dispatch(&self, result: &AnalysisResult) -> Dispatch {
        if result.recommended_careers.is_empty() {
            log_debug!(
                "Analysis for session {} has no career recommendations; skipping dispatch",
                result.session_id
            );
            return Dispatch::NoRecommendations;
        }

        self.display
            .update_recommendations(&result.recommended_careers);
        self.display.show_analysis(&result.analysis);

        let queued_scenario = result.next_vr_scenarios.first().cloned();
        if let Some(scenario) = queued_scenario.as_deref() {
            log_info!("Queueing next scenario {}", scenario);
            self.scenarios.queue_next_scenario(scenario);
        }

        Dispatch::Delivered { queued_scenario }
    }
}
