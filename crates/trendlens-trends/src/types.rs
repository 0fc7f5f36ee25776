use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use trendlens_core::{AppConfig, ContentRecord, GrowthPhase, Platform};

/// Score for a group of records evaluated together.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendScore {
    /// Composite virality in `[0, 100]`.
    pub viral_score: f64,
    /// Total engagement as a percentage of total reach.
    pub engagement_rate: f64,
    /// Percent change in engagement rate from the older half of the group to
    /// the newer half.
    pub growth_rate: f64,
    /// Sum of impressions.
    pub reach: u64,
    /// Engagement per hour across the group's time span.
    pub velocity: f64,
    /// Distinct creator usernames.
    pub creator_diversity: usize,
    pub is_viral: bool,
    pub is_potentially_viral: bool,
    pub phase: GrowthPhase,
}

/// Aggregate counters behind a [`TrendScore`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupMetrics {
    pub content_count: usize,
    pub total_reach: u64,
    pub total_engagement: u64,
    pub avg_engagement_rate: f64,
    pub time_span_hours: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CandidateKind {
    Hashtag,
    Keyword,
}

/// A hashtag- or keyword-defined group that scored high enough to surface.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendCandidate {
    pub kind: CandidateKind,
    pub identifier: String,
    pub score: TrendScore,
    pub contents: Vec<ContentRecord>,
    pub metrics: GroupMetrics,
}

/// Records sharing one content key across at least two platforms.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrossPlatformTrend {
    pub key: String,
    pub platforms: Vec<Platform>,
    pub score: TrendScore,
    pub metrics: GroupMetrics,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendSummary {
    pub total_content: usize,
    pub platform_counts: BTreeMap<Platform, usize>,
    pub candidate_count: usize,
    pub viral_count: usize,
    pub potentially_viral_count: usize,
    pub cross_platform_count: usize,
    pub avg_engagement_score: f64,
    /// Most used hashtags with the number of records using each.
    pub top_hashtags: Vec<(String, usize)>,
    /// Identifier of the highest-scoring candidate, if any surfaced.
    pub top_trend: Option<String>,
}

/// Output of one [`crate::analyze_trends`] run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendAnalysis {
    pub candidates: Vec<TrendCandidate>,
    pub cross_platform: Vec<CrossPlatformTrend>,
    pub summary: TrendSummary,
}

/// Knobs for [`crate::analyze_trends`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisConfig {
    /// Records beyond this count are dropped before analysis.
    pub max_batch_size: usize,
    /// Minimum records sharing a caption keyword for a keyword group.
    pub keyword_min_records: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            max_batch_size: 5_000,
            keyword_min_records: crate::grouper::KEYWORD_MIN_RECORDS,
        }
    }
}

impl From<&AppConfig> for AnalysisConfig {
    fn from(config: &AppConfig) -> Self {
        Self {
            max_batch_size: config.max_batch_size,
            keyword_min_records: config.keyword_min_records,
        }
    }
}

/// Which tracker collection a trend lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrackedPhase {
    Emerging,
    Confirmed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendSnapshot {
    pub timestamp: DateTime<Utc>,
    pub metrics: TrendScore,
}

/// Lifecycle record for one trend identifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackedTrend {
    pub identifier: String,
    pub first_seen: DateTime<Utc>,
    pub history: Vec<TrendSnapshot>,
    pub current_phase: TrackedPhase,
}

impl TrackedTrend {
    #[must_use]
    pub fn new(identifier: impl Into<String>, first_seen: DateTime<Utc>) -> Self {
        Self {
            identifier: identifier.into(),
            first_seen,
            history: Vec::new(),
            current_phase: TrackedPhase::Emerging,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trajectory {
    Rising,
    Declining,
}

/// 24-hour-ahead forecast for an emerging trend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendPrediction {
    pub identifier: String,
    pub current_score: f64,
    /// Forecast viral score 24 hours from the prediction time, in `[0, 100]`.
    pub predicted_score_24h: f64,
    pub current_trajectory: Trajectory,
    /// Whole-number confidence in `[0, 100]`; steadier histories score higher.
    pub confidence: f64,
    /// Expected peak, only for rising trends.
    pub peak_time: Option<DateTime<Utc>>,
    pub data_points: usize,
}
