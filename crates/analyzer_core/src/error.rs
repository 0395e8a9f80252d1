use thiserror::Error;

pub const URL_REQUIRED: &str = "URL is required";
pub const UNKNOWN_REMOTE_ERROR: &str = "Unknown error";
pub const MALFORMED_RESPONSE: &str = "Failed to parse the analysis response";

/// Every way an analysis can end in the failed state. None of them is fatal;
/// a new submit recovers from all of them.
///
/// `Display` yields the text shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalysisError {
    /// Blank input, caught before any request is made.
    #[error("{}", URL_REQUIRED)]
    Validation,
    /// The request did not complete (connection, timeout, oversize body).
    #[error("{0}")]
    Transport(String),
    /// The backend answered with a non-2xx status.
    #[error("{message}")]
    Remote { status: u16, message: String },
    /// A 2xx answer whose body is not JSON. The detail is logged, not shown.
    #[error("{}", MALFORMED_RESPONSE)]
    MalformedResponse(String),
}

impl AnalysisError {
    /// Builds a remote error, substituting the generic text when the backend
    /// gave no usable message.
    pub fn remote(status: u16, message: Option<String>) -> Self {
        let message = message
            .filter(|text| !text.trim().is_empty())
            .unwrap_or_else(|| UNKNOWN_REMOTE_ERROR.to_string());
        AnalysisError::Remote { status, message }
    }

    /// Transport errors always carry some description, even if the
    /// underlying error rendered as an empty string.
    pub fn transport(description: impl Into<String>) -> Self {
        let description = description.into();
        if description.trim().is_empty() {
            AnalysisError::Transport("Request failed".to_string())
        } else {
            AnalysisError::Transport(description)
        }
    }
}
