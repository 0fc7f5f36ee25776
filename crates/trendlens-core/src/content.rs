use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::CoreError;

/// Source platform of a piece of content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Instagram,
    TikTok,
}

impl Platform {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Platform::Instagram => "instagram",
            Platform::TikTok => "tiktok",
        }
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "instagram" | "ig" => Ok(Platform::Instagram),
            "tiktok" | "tt" => Ok(Platform::TikTok),
            other => Err(CoreError::UnknownPlatform(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    Image,
    Video,
    Carousel,
    Reel,
    Story,
    Unknown,
}

/// Creator size bucket derived from follower count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CreatorCategory {
    Micro,
    MidTier,
    Macro,
    Mega,
}

impl CreatorCategory {
    /// Micro below 10k followers, mid-tier below 100k, macro below 1M,
    /// mega at or above 1M.
    #[must_use]
    pub fn from_followers(followers: u64) -> Self {
        match followers {
            0..10_000 => CreatorCategory::Micro,
            10_000..100_000 => CreatorCategory::MidTier,
            100_000..1_000_000 => CreatorCategory::Macro,
            _ => CreatorCategory::Mega,
        }
    }
}

/// Coarse lifecycle label shared by single records and scored groups.
///
/// Records only ever carry `Emerging`, `Rising`, `Peak` or `Declining`;
/// `Dormant` and `Viral` are reserved for group scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GrowthPhase {
    Dormant,
    Emerging,
    Rising,
    Peak,
    Declining,
    Viral,
}

impl std::fmt::Display for GrowthPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            GrowthPhase::Dormant => "dormant",
            GrowthPhase::Emerging => "emerging",
            GrowthPhase::Rising => "rising",
            GrowthPhase::Peak => "peak",
            GrowthPhase::Declining => "declining",
            GrowthPhase::Viral => "viral",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentMetrics {
    pub impressions: u64,
    pub likes: u64,
    pub comments: u64,
    pub shares: u64,
    pub saves: u64,
    /// Weighted engagement per thousand impressions, clamped to `[0, 1000]`.
    pub engagement_score: f64,
    /// Total engagement per hour of content age. Never negative.
    pub engagement_velocity: f64,
}

impl ContentMetrics {
    /// Likes + comments + shares + saves.
    #[must_use]
    pub fn total_engagement(&self) -> u64 {
        self.likes
            .saturating_add(self.comments)
            .saturating_add(self.shares)
            .saturating_add(self.saves)
    }

    /// Total engagement as a percentage of impressions. Zero impressions are
    /// treated as one so the rate stays finite.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn engagement_rate(&self) -> f64 {
        self.total_engagement() as f64 / self.impressions.max(1) as f64 * 100.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentDetails {
    pub content_type: ContentType,
    pub caption: String,
    /// Lowercased, `#` marker kept, in caption order. Duplicates are kept.
    pub hashtags: Vec<String>,
    /// Original case, `@` marker stripped.
    pub mentions: Vec<String>,
    pub sound_id: Option<String>,
    /// Media duration in seconds, for video-like content.
    pub duration: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatorInfo {
    pub username: String,
    pub follower_count: u64,
    pub verified: bool,
    pub category: CreatorCategory,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendIndicators {
    /// Per-record virality in `[0, 100]`.
    pub viral_score: f64,
    /// Matched taxonomy topic names, in taxonomy order.
    pub trend_category: Vec<String>,
    pub growth_phase: GrowthPhase,
    pub cross_platform_reach: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GeographicInfo {
    pub location_name: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EngagementQuality {
    High,
    Medium,
    Low,
}

impl EngagementQuality {
    /// High above a 5% engagement rate, medium above 2%, low otherwise.
    #[must_use]
    pub fn from_rate(engagement_rate: f64) -> Self {
        if engagement_rate > 5.0 {
            EngagementQuality::High
        } else if engagement_rate > 2.0 {
            EngagementQuality::Medium
        } else {
            EngagementQuality::Low
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AudienceEstimate {
    pub estimated_reach: u64,
    pub engagement_quality: EngagementQuality,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrandOpportunities {
    pub is_sponsored: bool,
    pub brand_safe: bool,
    /// Rough partnership fit in `[0, 1]`.
    pub collaboration_potential: f64,
}

/// One piece of social content in the platform-independent shape.
///
/// Built once per raw payload by the normalizer and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentRecord {
    /// `"<platform>_<raw id>"`, e.g. `"instagram_3141592653"`.
    pub content_id: String,
    pub platform: Platform,
    pub timestamp: DateTime<Utc>,
    pub metrics: ContentMetrics,
    pub content: ContentDetails,
    pub creator: CreatorInfo,
    pub trend_indicators: TrendIndicators,
    pub geographic: GeographicInfo,
    pub audience: AudienceEstimate,
    pub brand_opportunities: BrandOpportunities,
}
