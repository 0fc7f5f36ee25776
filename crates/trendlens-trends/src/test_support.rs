//! Record fixtures for unit tests.

use chrono::{DateTime, Duration, TimeZone, Utc};
use trendlens_core::{
    AudienceEstimate, BrandOpportunities, ContentDetails, ContentMetrics, ContentRecord,
    ContentType, CreatorCategory, CreatorInfo, EngagementQuality, GeographicInfo, GrowthPhase,
    Platform, TrendIndicators,
};

use crate::types::TrendScore;

pub(crate) fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
}

/// A record with 1000 impressions and 100 likes posted at [`base_time`].
/// Hashtags are pulled from the caption by whitespace split.
pub(crate) fn record(id: &str, platform: &str, username: &str, caption: &str) -> ContentRecord {
    let platform: Platform = platform.parse().unwrap();
    let mut hashtags: Vec<String> = Vec::new();
    for word in caption.split_whitespace().filter(|w| w.starts_with('#')) {
        let tag = word.to_lowercase();
        if !hashtags.contains(&tag) {
            hashtags.push(tag);
        }
    }

    ContentRecord {
        content_id: format!("{platform}_{id}"),
        platform,
        timestamp: base_time(),
        metrics: ContentMetrics {
            impressions: 1_000,
            likes: 100,
            comments: 0,
            shares: 0,
            saves: 0,
            engagement_score: 100.0,
            engagement_velocity: 0.0,
        },
        content: ContentDetails {
            content_type: ContentType::Video,
            caption: caption.to_string(),
            hashtags,
            mentions: Vec::new(),
            sound_id: None,
            duration: None,
        },
        creator: CreatorInfo {
            username: username.to_string(),
            follower_count: 5_000,
            verified: false,
            category: CreatorCategory::Micro,
        },
        trend_indicators: TrendIndicators {
            viral_score: 0.0,
            trend_category: Vec::new(),
            growth_phase: GrowthPhase::Dormant,
            cross_platform_reach: false,
        },
        geographic: GeographicInfo::default(),
        audience: AudienceEstimate {
            estimated_reach: 1_000,
            engagement_quality: EngagementQuality::High,
        },
        brand_opportunities: BrandOpportunities {
            is_sponsored: false,
            brand_safe: true,
            collaboration_potential: 0.0,
        },
    }
}

/// Overrides impressions and likes.
pub(crate) fn with_engagement(
    mut record: ContentRecord,
    impressions: u64,
    likes: u64,
) -> ContentRecord {
    record.metrics.impressions = impressions;
    record.metrics.likes = likes;
    #[allow(clippy::cast_precision_loss)]
    {
        record.metrics.engagement_score = likes as f64;
    }
    record
}

/// Moves the record `hours` after [`base_time`].
pub(crate) fn posted_at(mut record: ContentRecord, hours: i64) -> ContentRecord {
    record.timestamp = base_time() + Duration::hours(hours);
    record
}

/// A group score carrying only a viral score; other fields are neutral.
pub(crate) fn score(viral_score: f64) -> TrendScore {
    TrendScore {
        viral_score,
        engagement_rate: 0.0,
        growth_rate: 0.0,
        reach: 0,
        velocity: 0.0,
        creator_diversity: 0,
        is_viral: viral_score >= 80.0,
        is_potentially_viral: (60.0..80.0).contains(&viral_score),
        phase: GrowthPhase::Dormant,
    }
}
