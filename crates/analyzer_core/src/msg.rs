use serde_json::Value;

use crate::{AnalysisError, RequestId};

#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// User submitted the URL input box for analysis.
    Submit(String),
    /// The backend call for `request_id` settled. `Ok` carries the raw 2xx
    /// JSON body, not yet normalized.
    AnalysisCompleted {
        request_id: RequestId,
        outcome: Result<Value, AnalysisError>,
    },
    /// Fallback for placeholder wiring.
    NoOp,
}
