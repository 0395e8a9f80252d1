use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalyzeError {
    pub kind: FailureKind,
    pub message: String,
}

impl AnalyzeError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for AnalyzeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl std::error::Error for AnalyzeError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    /// Connection could not be made or broke mid-response.
    Transport,
    Timeout,
    TooLarge { max_bytes: u64, actual: Option<u64> },
    /// Non-2xx answer. `message` is the body's `message` field, if any.
    Remote { status: u16, message: Option<String> },
    /// 2xx answer whose body is not JSON.
    MalformedResponse,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::Transport => write!(f, "transport error"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::TooLarge { max_bytes, actual } => {
                write!(f, "response too large (max {max_bytes}, actual {actual:?})")
            }
            FailureKind::Remote { status, .. } => write!(f, "http status {status}"),
            FailureKind::MalformedResponse => write!(f, "malformed response"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ClientBuildError {
    #[error("invalid backend url {base_url:?}: {message}")]
    InvalidBaseUrl { base_url: String, message: String },
    #[error("failed to build http client: {0}")]
    Http(#[from] reqwest::Error),
}
