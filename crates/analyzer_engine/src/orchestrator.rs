use std::sync::{mpsc, Arc};
use std::time::Duration;

use analyzer_core::{update, AnalysisError, AppState, AppViewModel, Effect, Msg, UiState};
use analyzer_logging::{analyzer_info, analyzer_warn};
use serde_json::Value;

use crate::{AnalysisBackend, AnalyzeError, FailureKind};

/// Receives every lifecycle transition after it has been applied.
pub trait TransitionSink: Send + Sync {
    fn emit(&self, state: &AppState);
}

/// Forwards a copy of each new UI state over a channel.
pub struct ChannelTransitionSink {
    tx: mpsc::Sender<UiState>,
}

impl ChannelTransitionSink {
    pub fn new(tx: mpsc::Sender<UiState>) -> Self {
        Self { tx }
    }
}

impl TransitionSink for ChannelTransitionSink {
    fn emit(&self, state: &AppState) {
        let _ = self.tx.send(state.ui().clone());
    }
}

/// Drives the request lifecycle: feeds submissions through the pure state
/// machine, performs the backend call it asks for and reports every
/// transition to the registered sinks.
///
/// `submit` borrows the orchestrator mutably for the whole call, so one
/// instance never has two requests in flight.
pub struct Orchestrator {
    backend: Arc<dyn AnalysisBackend>,
    state: AppState,
    sinks: Vec<Box<dyn TransitionSink>>,
    settle_timeout: Option<Duration>,
}

impl Orchestrator {
    pub fn new(backend: Arc<dyn AnalysisBackend>) -> Self {
        Self {
            backend,
            state: AppState::new(),
            sinks: Vec::new(),
            settle_timeout: None,
        }
    }

    /// Fails a backend call that has not settled after `timeout`.
    pub fn with_settle_timeout(mut self, timeout: Duration) -> Self {
        self.settle_timeout = Some(timeout);
        self
    }

    pub fn subscribe(&mut self, sink: Box<dyn TransitionSink>) {
        self.sinks.push(sink);
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn ui(&self) -> &UiState {
        self.state.ui()
    }

    pub fn view(&self) -> AppViewModel {
        self.state.view()
    }

    /// Validates `raw_input` and, if accepted, runs one analysis to
    /// completion. Always returns with the state settled (or unchanged when
    /// nothing was accepted).
    pub async fn submit(&mut self, raw_input: &str) {
        let effects = self.dispatch(Msg::Submit(raw_input.to_string()));
        for effect in effects {
            self.run_effect(effect).await;
        }
    }

    fn dispatch(&mut self, msg: Msg) -> Vec<Effect> {
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        let changed = state.consume_dirty();
        self.state = state;
        if changed {
            for sink in &self.sinks {
                sink.emit(&self.state);
            }
        }
        effects
    }

    async fn run_effect(&mut self, effect: Effect) {
        match effect {
            Effect::Analyze {
                request_id,
                request,
            } => {
                analyzer_logging::set_request_id(request_id);
                analyzer_info!("Analyze url={}", request.target_url);
                let outcome = self.call_backend(&request.target_url).await;
                match &outcome {
                    Ok(_) => analyzer_info!("Analysis of {} succeeded", request.target_url),
                    Err(err) => analyzer_warn!(
                        "Analysis of {} failed: {:?}",
                        request.target_url,
                        err
                    ),
                }
                self.dispatch(Msg::AnalysisCompleted {
                    request_id,
                    outcome,
                });
                analyzer_logging::clear_request_id();
            }
        }
    }

    async fn call_backend(&self, target_url: &str) -> Result<Value, AnalysisError> {
        let call = self.backend.analyze(target_url);
        let result = match self.settle_timeout {
            Some(limit) => match tokio::time::timeout(limit, call).await {
                Ok(result) => result,
                Err(_) => {
                    return Err(AnalysisError::transport(format!(
                        "analysis did not complete within {} ms",
                        limit.as_millis()
                    )))
                }
            },
            None => call.await,
        };
        result.map_err(map_failure)
    }
}

fn map_failure(err: AnalyzeError) -> AnalysisError {
    match err.kind {
        FailureKind::Remote { status, message } => AnalysisError::remote(status, message),
        FailureKind::MalformedResponse => AnalysisError::MalformedResponse(err.message),
        FailureKind::Transport | FailureKind::Timeout | FailureKind::TooLarge { .. } => {
            AnalysisError::transport(err.message)
        }
    }
}
