use std::sync::Once;

use analyzer_core::{
    update, AnalysisError, AnalysisRequest, AppState, Effect, Msg, Phase, RequestId, UiState,
};
use serde_json::json;

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(analyzer_logging::initialize_for_tests);
}

fn submit_url(state: AppState, input: &str) -> (AppState, Vec<Effect>) {
    update(state, Msg::Submit(input.to_string()))
}

fn request_id_of(effects: &[Effect]) -> RequestId {
    match effects {
        [Effect::Analyze { request_id, .. }] => *request_id,
        other => panic!("expected a single analyze effect, got {other:?}"),
    }
}

#[test]
fn blank_input_fails_without_effects() {
    init_logging();
    for input in ["", "   ", "\n\t "] {
        let (mut next, effects) = submit_url(AppState::new(), input);

        assert!(effects.is_empty());
        assert_eq!(next.ui(), &UiState::Failed(AnalysisError::Validation));
        assert_eq!(next.ui().error_message().as_deref(), Some("URL is required"));
        assert!(next.consume_dirty());
    }
}

#[test]
fn valid_input_enters_loading_and_emits_one_request() {
    init_logging();
    let (state, effects) = submit_url(AppState::new(), "  example.com \n");

    assert_eq!(state.ui(), &UiState::Loading);
    assert_eq!(
        effects,
        vec![Effect::Analyze {
            request_id: 1,
            request: AnalysisRequest {
                target_url: "example.com".to_string(),
            },
        }]
    );
    let (id, request) = state.in_flight_request().expect("request in flight");
    assert_eq!(id, 1);
    assert_eq!(request.target_url, "example.com");
}

#[test]
fn successful_completion_normalizes_with_submitted_url_as_fallback() {
    init_logging();
    let (state, effects) = submit_url(AppState::new(), "example.com");
    let request_id = request_id_of(&effects);

    let (state, effects) = update(
        state,
        Msg::AnalysisCompleted {
            request_id,
            outcome: Ok(json!({ "title": "Example" })),
        },
    );

    assert!(effects.is_empty());
    assert_eq!(state.ui().phase(), Phase::Success);
    let result = state.ui().result().expect("result");
    assert_eq!(result.source_url, "example.com");
    assert_eq!(result.title.as_deref(), Some("Example"));
    assert!(state.in_flight_request().is_none());
}

#[test]
fn failed_completion_holds_the_error() {
    init_logging();
    let (state, effects) = submit_url(AppState::new(), "example.com");
    let request_id = request_id_of(&effects);

    let (state, _) = update(
        state,
        Msg::AnalysisCompleted {
            request_id,
            outcome: Err(AnalysisError::remote(404, Some("page not found".into()))),
        },
    );

    assert_eq!(state.ui().error_message().as_deref(), Some("page not found"));
    assert!(state.ui().result().is_none());
}

#[test]
fn resubmit_after_success_clears_the_previous_result() {
    init_logging();
    let (state, effects) = submit_url(AppState::new(), "a.example.com");
    let (state, _) = update(
        state,
        Msg::AnalysisCompleted {
            request_id: request_id_of(&effects),
            outcome: Ok(json!({ "title": "A" })),
        },
    );
    assert_eq!(state.ui().phase(), Phase::Success);

    let (state, effects) = submit_url(state, "b.example.com");

    assert_eq!(state.ui(), &UiState::Loading);
    assert!(state.ui().result().is_none());
    assert!(state.view().result.is_none());
    assert_eq!(request_id_of(&effects), 2);
}

#[test]
fn resubmit_after_failure_clears_the_error() {
    init_logging();
    let (state, _) = submit_url(AppState::new(), "");
    assert_eq!(state.ui().phase(), Phase::Failed);

    let (state, effects) = submit_url(state, "example.com");

    assert_eq!(state.ui(), &UiState::Loading);
    assert!(state.view().error.is_none());
    assert_eq!(effects.len(), 1);
}

#[test]
fn blank_resubmit_after_success_drops_the_result() {
    init_logging();
    let (state, effects) = submit_url(AppState::new(), "example.com");
    let (state, _) = update(
        state,
        Msg::AnalysisCompleted {
            request_id: request_id_of(&effects),
            outcome: Ok(json!({})),
        },
    );

    let (state, effects) = submit_url(state, "  ");

    assert!(effects.is_empty());
    assert_eq!(state.ui(), &UiState::Failed(AnalysisError::Validation));
}

#[test]
fn submit_while_loading_is_ignored() {
    init_logging();
    let (mut state, _) = submit_url(AppState::new(), "first.example.com");
    assert!(state.consume_dirty());

    let (mut next, effects) = submit_url(state, "second.example.com");

    assert!(effects.is_empty());
    assert_eq!(next.ui(), &UiState::Loading);
    assert_eq!(next.input(), "first.example.com");
    let (id, request) = next.in_flight_request().expect("request in flight");
    assert_eq!(id, 1);
    assert_eq!(request.target_url, "first.example.com");
    assert!(!next.consume_dirty());
}

#[test]
fn stale_completion_is_ignored() {
    init_logging();
    let (state, effects) = submit_url(AppState::new(), "example.com");
    let request_id = request_id_of(&effects);

    let (state, _) = update(
        state,
        Msg::AnalysisCompleted {
            request_id: request_id + 41,
            outcome: Ok(json!({ "title": "Wrong" })),
        },
    );
    assert_eq!(state.ui(), &UiState::Loading);

    // A completion for a settled request changes nothing either.
    let (state, _) = update(
        state,
        Msg::AnalysisCompleted {
            request_id,
            outcome: Err(AnalysisError::transport("connection refused")),
        },
    );
    let before = state.clone();
    let (state, _) = update(
        state,
        Msg::AnalysisCompleted {
            request_id,
            outcome: Ok(json!({ "title": "Late" })),
        },
    );
    assert_eq!(state, before);
}

#[test]
fn submit_replaces_the_previous_input() {
    init_logging();
    let (state, effects) = submit_url(AppState::new(), "old.example");
    let (state, _) = update(
        state,
        Msg::AnalysisCompleted {
            request_id: request_id_of(&effects),
            outcome: Ok(json!({})),
        },
    );

    let (state, effects) = submit_url(state, " new.example ");

    assert_eq!(state.input(), " new.example ");
    assert_eq!(
        effects,
        vec![Effect::Analyze {
            request_id: 2,
            request: AnalysisRequest {
                target_url: "new.example".to_string(),
            },
        }]
    );
}
