//! Per-record engagement formulas.
//!
//! All functions are pure and total: degenerate inputs (zero impressions,
//! zero or negative age) resolve to finite, in-range values.

use chrono::{DateTime, Utc};
use trendlens_core::GrowthPhase;

const LIKE_WEIGHT: f64 = 1.0;
const COMMENT_WEIGHT: f64 = 2.0;
const SHARE_WEIGHT: f64 = 3.0;
const SAVE_WEIGHT: f64 = 2.5;

pub const MAX_ENGAGEMENT_SCORE: f64 = 1000.0;
pub const MAX_RECORD_VIRAL_SCORE: f64 = 100.0;

const CREATOR_BOOST_FOLLOWERS: u64 = 100_000;
const CREATOR_BOOST: f64 = 1.2;

/// Weighted engagement per thousand impressions, clamped to `[0, 1000]`.
///
/// Comments, shares and saves cost the viewer more than a like, so they
/// weigh more.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn engagement_score(
    impressions: u64,
    likes: u64,
    comments: u64,
    shares: u64,
    saves: u64,
) -> f64 {
    let weighted = likes as f64 * LIKE_WEIGHT
        + comments as f64 * COMMENT_WEIGHT
        + shares as f64 * SHARE_WEIGHT
        + saves as f64 * SAVE_WEIGHT;
    let score = weighted / impressions.max(1) as f64 * 1000.0;
    score.clamp(0.0, MAX_ENGAGEMENT_SCORE)
}

/// Content age in fractional hours. Negative when `created` is in the future.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn age_hours(created: DateTime<Utc>, now: DateTime<Utc>) -> f64 {
    (now - created).num_milliseconds() as f64 / 3_600_000.0
}

/// Engagement per hour of age; `0` when the age is not positive.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn engagement_velocity(total_engagement: u64, age_hours: f64) -> f64 {
    if age_hours <= 0.0 {
        return 0.0;
    }
    total_engagement as f64 / age_hours
}

/// Single-record virality in `[0, 100]`.
///
/// `engagement_rate` is a percentage of impressions. Creators above 100k
/// followers get a 1.2x boost.
#[must_use]
pub fn record_viral_score(engagement_rate: f64, velocity: f64, follower_count: u64) -> f64 {
    let boost = if follower_count > CREATOR_BOOST_FOLLOWERS {
        CREATOR_BOOST
    } else {
        1.0
    };
    let score = (engagement_rate / 10.0 + velocity / 100.0) * boost;
    score.clamp(0.0, MAX_RECORD_VIRAL_SCORE)
}

/// Lifecycle label for a single record. First matching rule wins.
#[must_use]
pub fn growth_phase(age_hours: f64, velocity: f64) -> GrowthPhase {
    if age_hours < 6.0 && velocity > 1000.0 {
        GrowthPhase::Emerging
    } else if age_hours < 24.0 && velocity > 500.0 {
        GrowthPhase::Rising
    } else if age_hours < 72.0 && velocity > 100.0 {
        GrowthPhase::Peak
    } else {
        GrowthPhase::Declining
    }
}
