//! Normalization from raw platform payloads to [`ContentRecord`].
//!
//! Field mapping lives in [`crate::adapters`]; this module computes every
//! derived field (scores, phase, extracted tags, advisory estimates) the same
//! way for all platforms.

use chrono::{DateTime, Utc};
use trendlens_core::{
    AudienceEstimate, BrandOpportunities, ContentDetails, ContentMetrics, ContentRecord,
    CreatorCategory, CreatorInfo, EngagementQuality, GeographicInfo, Platform, Taxonomy,
    TrendIndicators,
};

use crate::adapters::{adapter_for, RawContent};
use crate::engagement::{
    age_hours, engagement_score, engagement_velocity, growth_phase, record_viral_score,
};
use crate::error::NormalizerError;
use crate::parse::{extract_hashtags, extract_mentions};

const SPONSORED_TAGS: &[&str] = &["#ad", "#sponsored", "#partner"];

/// Inputs that normalization depends on besides the payload itself.
///
/// Holding `now` here keeps [`normalize`] a pure function: the same payload
/// and context always produce the same record.
#[derive(Debug, Clone, Copy)]
pub struct NormalizeContext<'a> {
    pub now: DateTime<Utc>,
    pub taxonomy: &'a Taxonomy,
}

impl<'a> NormalizeContext<'a> {
    /// Context pinned to the current wall-clock time.
    #[must_use]
    pub fn new(taxonomy: &'a Taxonomy) -> Self {
        Self {
            now: Utc::now(),
            taxonomy,
        }
    }

    #[must_use]
    pub fn at(taxonomy: &'a Taxonomy, now: DateTime<Utc>) -> Self {
        Self { now, taxonomy }
    }
}

/// Normalizes one raw payload from `platform` into a [`ContentRecord`].
///
/// # Errors
///
/// Returns [`NormalizerError::MalformedInput`] if the payload lacks a field
/// the platform adapter requires.
pub fn normalize(
    raw: &serde_json::Value,
    platform: Platform,
    ctx: &NormalizeContext<'_>,
) -> Result<ContentRecord, NormalizerError> {
    let content = adapter_for(platform).extract(raw)?;
    Ok(build_record(content, platform, ctx))
}

/// Normalizes a batch, skipping items that fail.
///
/// Failures are logged at `warn` with the item index; one bad item never
/// aborts the batch.
#[must_use]
pub fn normalize_batch(
    items: &[serde_json::Value],
    platform: Platform,
    ctx: &NormalizeContext<'_>,
) -> Vec<ContentRecord> {
    let records: Vec<ContentRecord> = items
        .iter()
        .enumerate()
        .filter_map(|(index, raw)| match normalize(raw, platform, ctx) {
            Ok(record) => Some(record),
            Err(e) => {
                tracing::warn!(
                    platform = %platform,
                    index,
                    error = %e,
                    "skipping item: normalization failed"
                );
                None
            }
        })
        .collect();

    tracing::debug!(
        platform = %platform,
        received = items.len(),
        normalized = records.len(),
        "normalized batch"
    );

    records
}

fn build_record(raw: RawContent, platform: Platform, ctx: &NormalizeContext<'_>) -> ContentRecord {
    let metrics = build_metrics(&raw, ctx.now);
    let engagement_rate = metrics.engagement_rate();
    let age = age_hours(raw.created_at, ctx.now);

    let hashtags = extract_hashtags(&raw.caption);
    let mentions = extract_mentions(&raw.caption);

    let tag_text = format!("{} {}", raw.caption, hashtags.join(" "));
    let trend_indicators = TrendIndicators {
        viral_score: record_viral_score(
            engagement_rate,
            metrics.engagement_velocity,
            raw.follower_count,
        ),
        trend_category: ctx.taxonomy.matches(&tag_text),
        growth_phase: growth_phase(age, metrics.engagement_velocity),
        // A single payload cannot tell whether the same content exists
        // elsewhere; cross-platform reach is reported per group by the matcher.
        cross_platform_reach: false,
    };

    let category = CreatorCategory::from_followers(raw.follower_count);

    let audience = AudienceEstimate {
        estimated_reach: raw.impressions.max(raw.follower_count / 10),
        engagement_quality: EngagementQuality::from_rate(engagement_rate),
    };

    let brand_opportunities = BrandOpportunities {
        is_sponsored: hashtags.iter().any(|t| SPONSORED_TAGS.contains(&t.as_str())),
        brand_safe: ctx.taxonomy.is_brand_safe(&raw.caption),
        collaboration_potential: collaboration_potential(category, engagement_rate),
    };

    ContentRecord {
        content_id: format!("{platform}_{}", raw.raw_id),
        platform,
        timestamp: raw.created_at,
        metrics,
        content: ContentDetails {
            content_type: raw.content_type,
            caption: raw.caption,
            hashtags,
            mentions,
            sound_id: raw.sound_id,
            duration: raw.duration,
        },
        creator: CreatorInfo {
            username: raw.username,
            follower_count: raw.follower_count,
            verified: raw.verified,
            category,
        },
        trend_indicators,
        geographic: GeographicInfo {
            location_name: raw.location_name,
        },
        audience,
        brand_opportunities,
    }
}

fn build_metrics(raw: &RawContent, now: DateTime<Utc>) -> ContentMetrics {
    let mut metrics = ContentMetrics {
        impressions: raw.impressions,
        likes: raw.likes,
        comments: raw.comments,
        shares: raw.shares,
        saves: raw.saves,
        engagement_score: engagement_score(
            raw.impressions,
            raw.likes,
            raw.comments,
            raw.shares,
            raw.saves,
        ),
        engagement_velocity: 0.0,
    };
    metrics.engagement_velocity = engagement_velocity(
        metrics.total_engagement(),
        age_hours(raw.created_at, now),
    );
    metrics
}

/// Partnership fit in `[0, 1]`: creator-size weight scaled by how far the
/// engagement rate gets towards 10%.
fn collaboration_potential(category: CreatorCategory, engagement_rate: f64) -> f64 {
    let weight = match category {
        CreatorCategory::Micro => 0.7,
        CreatorCategory::MidTier => 1.0,
        CreatorCategory::Macro => 0.9,
        CreatorCategory::Mega => 0.8,
    };
    (weight * (engagement_rate / 10.0).min(1.0)).clamp(0.0, 1.0)
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
