//! Platform adapters.
//!
//! Each supported platform has one adapter that maps its payload field names
//! into [`RawContent`], the platform-free intermediate the normalizer builds
//! records from. Adapters are selected by an explicit [`Platform`] tag, never
//! by inspecting the payload.

mod instagram;
mod tiktok;

use chrono::{DateTime, Utc};
use trendlens_core::{ContentType, Platform};

use crate::error::NormalizerError;

pub use instagram::InstagramAdapter;
pub use tiktok::TikTokAdapter;

/// Platform-free view of a raw payload, before any derived fields are computed.
#[derive(Debug, Clone, PartialEq)]
pub struct RawContent {
    pub raw_id: String,
    pub created_at: DateTime<Utc>,
    pub content_type: ContentType,
    pub caption: String,
    pub impressions: u64,
    pub likes: u64,
    pub comments: u64,
    pub shares: u64,
    pub saves: u64,
    pub sound_id: Option<String>,
    pub duration: Option<f64>,
    pub username: String,
    pub follower_count: u64,
    pub verified: bool,
    pub location_name: Option<String>,
}

/// Maps one platform's raw payload into [`RawContent`].
pub trait PlatformAdapter: Send + Sync {
    fn platform(&self) -> Platform;

    /// # Errors
    ///
    /// Returns [`NormalizerError::MalformedInput`] when a field the platform
    /// requires is missing or has the wrong type.
    fn extract(&self, raw: &serde_json::Value) -> Result<RawContent, NormalizerError>;
}

/// Returns the adapter registered for `platform`.
#[must_use]
pub fn adapter_for(platform: Platform) -> &'static dyn PlatformAdapter {
    match platform {
        Platform::Instagram => &InstagramAdapter,
        Platform::TikTok => &TikTokAdapter,
    }
}

/// Converts platform epoch seconds into an absolute instant.
pub(crate) fn timestamp_from_secs(
    platform: Platform,
    secs: i64,
) -> Result<DateTime<Utc>, NormalizerError> {
    DateTime::from_timestamp(secs, 0).ok_or_else(|| NormalizerError::MalformedInput {
        platform,
        reason: format!("timestamp {secs} is out of range"),
    })
}

/// Rejects empty required string fields, which serde happily accepts.
pub(crate) fn require_non_empty(
    platform: Platform,
    field: &str,
    value: &str,
) -> Result<(), NormalizerError> {
    if value.trim().is_empty() {
        return Err(NormalizerError::MalformedInput {
            platform,
            reason: format!("required field `{field}` is empty"),
        });
    }
    Ok(())
}
