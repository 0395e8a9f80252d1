use crate::{AnalysisRequest, RequestId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Issue exactly one backend call; its completion must come back as
    /// `Msg::AnalysisCompleted` with the same `request_id`.
    Analyze {
        request_id: RequestId,
        request: AnalysisRequest,
    },
}
