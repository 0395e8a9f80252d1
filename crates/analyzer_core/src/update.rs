use crate::{normalize, validate_url, AnalysisRequest, AppState, Effect, Msg, Phase};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::Submit(input) => {
            // At most one request in flight: submits while loading are dropped.
            if state.ui().phase() == Phase::Loading {
                return (state, Vec::new());
            }
            state.set_input(input);
            start_analysis(&mut state)
        }
        Msg::AnalysisCompleted {
            request_id,
            outcome,
        } => {
            let Some(request) = state.settle(request_id) else {
                return (state, Vec::new());
            };
            match outcome {
                Ok(body) => state.succeed(normalize(&body, &request.target_url)),
                Err(error) => state.fail(error),
            }
            Vec::new()
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

fn start_analysis(state: &mut AppState) -> Vec<Effect> {
    match validate_url(state.input()) {
        Ok(target_url) => {
            let request = AnalysisRequest { target_url };
            let request_id = state.begin_request(request.clone());
            vec![Effect::Analyze {
                request_id,
                request,
            }]
        }
        Err(error) => {
            state.fail(error);
            Vec::new()
        }
    }
}
