use thiserror::Error;
use trendlens_core::Platform;

#[derive(Debug, Error)]
pub enum NormalizerError {
    #[error("malformed {platform} payload: {reason}")]
    MalformedInput { platform: Platform, reason: String },
}

/// A normalized record that does not satisfy the required-field and range
/// checks. Returned to the caller, who decides whether to drop the record.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("record {content_id} failed validation: {}", problems.join("; "))]
pub struct ValidationFailure {
    pub content_id: String,
    pub problems: Vec<String>,
}
