use crate::AnalysisError;

/// Trims the raw input and rejects it when nothing is left.
///
/// No syntax check happens here; the backend owns URL validation and its
/// rejection surfaces as a remote error.
pub fn validate_url(raw_input: &str) -> Result<String, AnalysisError> {
    let trimmed = raw_input.trim();
    if trimmed.is_empty() {
        return Err(AnalysisError::Validation);
    }
    Ok(trimmed.to_string())
}
