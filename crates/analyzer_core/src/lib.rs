//! Analyzer core: canonical result model, response normalization and the
//! pure request-lifecycle state machine.
mod effect;
mod error;
mod msg;
mod normalize;
mod result;
mod state;
mod update;
mod validate;
mod view_model;

pub use effect::Effect;
pub use error::{AnalysisError, MALFORMED_RESPONSE, UNKNOWN_REMOTE_ERROR, URL_REQUIRED};
pub use msg::Msg;
pub use normalize::normalize;
pub use result::{AnalysisResult, HeadingCounts, LinkTally};
pub use state::{AnalysisRequest, AppState, Phase, RequestId, UiState};
pub use update::update;
pub use validate::validate_url;
pub use view_model::{
    present, AppViewModel, ResultRow, ResultView, RowValue, SUBMIT_LABEL, SUBMIT_LABEL_BUSY,
};
