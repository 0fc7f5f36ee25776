//! Platform payload normalization.
//!
//! Turns raw Instagram / `TikTok` JSON into [`trendlens_core::ContentRecord`]s
//! and computes the per-record engagement and virality fields.

pub mod adapters;
pub mod engagement;
pub mod error;
pub mod normalize;
pub mod types;
pub mod validate;

mod parse;

pub use adapters::{adapter_for, InstagramAdapter, PlatformAdapter, RawContent, TikTokAdapter};
pub use error::{NormalizerError, ValidationFailure};
pub use normalize::{normalize, normalize_batch, NormalizeContext};
pub use validate::validate_record;
