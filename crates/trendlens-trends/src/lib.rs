//! Trend detection over normalized content records.
//!
//! Groups records by hashtag and caption keyword, scores each group for
//! virality, matches content across platforms, tracks trend lifecycles, and
//! forecasts where emerging trends are heading.

pub mod error;
pub mod grouper;
pub mod matcher;
pub mod pipeline;
pub mod predictor;
pub mod scorer;
pub mod tracker;
pub mod types;

mod text;

#[cfg(test)]
mod test_support;

pub use error::TrackerError;
pub use grouper::{extract_keyword_groups, group_by_hashtag};
pub use matcher::{content_key, detect_cross_platform_trends};
pub use pipeline::analyze_trends;
pub use predictor::get_trend_predictions;
pub use scorer::score_group;
pub use tracker::{InMemoryTrendStore, TrendStore, TrendTracker};
pub use types::{
    AnalysisConfig, CandidateKind, CrossPlatformTrend, GroupMetrics, TrackedPhase, TrackedTrend,
    Trajectory, TrendAnalysis, TrendCandidate, TrendPrediction, TrendScore, TrendSnapshot,
    TrendSummary,
};
