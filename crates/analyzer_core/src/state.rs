use crate::view_model::{present, AppViewModel};
use crate::{AnalysisError, AnalysisResult};

pub type RequestId = u64;

/// A validated submission: the trimmed target URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisRequest {
    pub target_url: String,
}

/// Lifecycle of the single analysis the screen shows.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum UiState {
    #[default]
    Idle,
    Loading,
    Success(AnalysisResult),
    Failed(AnalysisError),
}

impl UiState {
    pub fn phase(&self) -> Phase {
        match self {
            UiState::Idle => Phase::Idle,
            UiState::Loading => Phase::Loading,
            UiState::Success(_) => Phase::Success,
            UiState::Failed(_) => Phase::Failed,
        }
    }

    pub fn result(&self) -> Option<&AnalysisResult> {
        match self {
            UiState::Success(result) => Some(result),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&AnalysisError> {
        match self {
            UiState::Failed(error) => Some(error),
            _ => None,
        }
    }

    pub fn error_message(&self) -> Option<String> {
        self.error().map(ToString::to_string)
    }
}

/// Payload-free discriminant of [`UiState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Loading,
    Success,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    input: String,
    ui: UiState,
    in_flight: Option<InFlight>,
    next_request_id: RequestId,
    dirty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct InFlight {
    request_id: RequestId,
    request: AnalysisRequest,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ui(&self) -> &UiState {
        &self.ui
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn in_flight_request(&self) -> Option<(RequestId, &AnalysisRequest)> {
        self.in_flight
            .as_ref()
            .map(|flight| (flight.request_id, &flight.request))
    }

    pub fn view(&self) -> AppViewModel {
        let mut view = present(&self.ui);
        view.input = self.input.clone();
        view.dirty = self.dirty;
        view
    }

    /// Returns whether anything changed since the last call and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn set_input(&mut self, input: String) {
        if self.input != input {
            self.input = input;
            self.dirty = true;
        }
    }

    /// Enters `Loading`, dropping any previous result or error, and returns
    /// the id the completion must carry.
    pub(crate) fn begin_request(&mut self, request: AnalysisRequest) -> RequestId {
        self.next_request_id += 1;
        let request_id = self.next_request_id;
        self.in_flight = Some(InFlight {
            request_id,
            request,
        });
        self.ui = UiState::Loading;
        self.dirty = true;
        request_id
    }

    /// Takes the in-flight request if `request_id` matches it.
    pub(crate) fn settle(&mut self, request_id: RequestId) -> Option<AnalysisRequest> {
        let matches = self
            .in_flight
            .as_ref()
            .is_some_and(|flight| flight.request_id == request_id);
        if matches {
            self.in_flight.take().map(|flight| flight.request)
        } else {
            None
        }
    }

    pub(crate) fn succeed(&mut self, result: AnalysisResult) {
        self.ui = UiState::Success(result);
        self.dirty = true;
    }

    pub(crate) fn fail(&mut self, error: AnalysisError) {
        self.in_flight = None;
        self.ui = UiState::Failed(error);
        self.dirty = true;
    }
}
