//! Group-level trend scoring.
//!
//! A group is any set of records evaluated together: a hashtag group, a
//! keyword group, or records sharing a cross-platform content key.

use std::collections::HashSet;

use trendlens_core::{ContentRecord, GrowthPhase};

use crate::types::{GroupMetrics, TrendScore};

/// Engagement rate (percent) that earns the full engagement share.
const ENGAGEMENT_BENCHMARK: f64 = 5.0;
/// Growth rate (percent) that earns the full growth share.
const GROWTH_BENCHMARK: f64 = 100.0;
/// Reach (impressions) that earns the full reach share.
const REACH_BENCHMARK: f64 = 1_000_000.0;
/// Distinct creators that earn the full diversity share.
const DIVERSITY_BENCHMARK: f64 = 100.0;
/// Points per component when its ratio hits 1.0.
const COMPONENT_WEIGHT: f64 = 25.0;

pub const MAX_VIRAL_SCORE: f64 = 100.0;
pub const VIRAL_THRESHOLD: f64 = 80.0;
pub const POTENTIALLY_VIRAL_THRESHOLD: f64 = 60.0;

const EMERGING_GROWTH: f64 = 200.0;
const RISING_GROWTH: f64 = 50.0;
const DECLINING_GROWTH: f64 = -20.0;
const PEAK_REACH: u64 = 100_000;

/// Aggregate counters for a group. Empty groups yield all zeros.
#[must_use]
pub fn group_metrics(group: &[ContentRecord]) -> GroupMetrics {
    let total_reach = sum_impressions(group);
    let total_engagement = sum_engagement(group);

    GroupMetrics {
        content_count: group.len(),
        total_reach,
        total_engagement,
        avg_engagement_rate: rate(total_engagement, total_reach),
        time_span_hours: time_span_hours(group),
    }
}

/// Scores a group of records.
///
/// The four components (engagement rate, growth, reach, creator diversity)
/// are each scaled against a benchmark and weighted equally. Components are
/// not capped individually, so one extreme component can dominate; only the
/// final sum is clamped to `[0, 100]`.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn score_group(group: &[ContentRecord]) -> TrendScore {
    let metrics = group_metrics(group);
    let engagement_rate = metrics.avg_engagement_rate;
    let growth_rate = growth_rate(group);
    let creator_diversity = creator_diversity(group);

    let velocity = if metrics.time_span_hours > 0.0 {
        metrics.total_engagement as f64 / metrics.time_span_hours
    } else {
        0.0
    };

    let raw = (engagement_rate / ENGAGEMENT_BENCHMARK) * COMPONENT_WEIGHT
        + (growth_rate / GROWTH_BENCHMARK) * COMPONENT_WEIGHT
        + (metrics.total_reach as f64 / REACH_BENCHMARK) * COMPONENT_WEIGHT
        + (creator_diversity as f64 / DIVERSITY_BENCHMARK) * COMPONENT_WEIGHT;
    let viral_score = raw.clamp(0.0, MAX_VIRAL_SCORE);

    let is_viral = viral_score >= VIRAL_THRESHOLD;
    let is_potentially_viral = !is_viral && viral_score >= POTENTIALLY_VIRAL_THRESHOLD;

    TrendScore {
        viral_score,
        engagement_rate,
        growth_rate,
        reach: metrics.total_reach,
        velocity,
        creator_diversity,
        is_viral,
        is_potentially_viral,
        phase: phase_for(viral_score, growth_rate, metrics.total_reach),
    }
}

/// Lifecycle phase of a scored group. First matching rule wins, so a viral
/// group is reported as viral no matter how fast it grows.
#[must_use]
pub fn phase_for(viral_score: f64, growth_rate: f64, reach: u64) -> GrowthPhase {
    if viral_score >= VIRAL_THRESHOLD {
        GrowthPhase::Viral
    } else if growth_rate > EMERGING_GROWTH {
        GrowthPhase::Emerging
    } else if growth_rate > RISING_GROWTH {
        GrowthPhase::Rising
    } else if growth_rate < DECLINING_GROWTH {
        GrowthPhase::Declining
    } else if reach > PEAK_REACH {
        GrowthPhase::Peak
    } else {
        GrowthPhase::Dormant
    }
}

/// Percent change in engagement rate between the older and newer halves of
/// the group, ordered by timestamp. The older half takes the extra record
/// when the count is odd.
///
/// Zero for fewer than two records or when the older half had no engagement.
#[must_use]
pub fn growth_rate(group: &[ContentRecord]) -> f64 {
    if group.len() < 2 {
        return 0.0;
    }

    let mut sorted: Vec<&ContentRecord> = group.iter().collect();
    sorted.sort_by_key(|r| r.timestamp);

    let split = group.len().div_ceil(2);
    let (first, second) = sorted.split_at(split);

    let first_rate = half_rate(first);
    if first_rate == 0.0 {
        return 0.0;
    }
    let second_rate = half_rate(second);

    (second_rate - first_rate) / first_rate * 100.0
}

/// Number of distinct creator usernames in the group.
#[must_use]
pub fn creator_diversity(group: &[ContentRecord]) -> usize {
    group
        .iter()
        .map(|r| r.creator.username.as_str())
        .collect::<HashSet<_>>()
        .len()
}

fn half_rate(half: &[&ContentRecord]) -> f64 {
    let reach = half
        .iter()
        .fold(0u64, |acc, r| acc.saturating_add(r.metrics.impressions));
    let engagement = half
        .iter()
        .fold(0u64, |acc, r| acc.saturating_add(r.metrics.total_engagement()));
    rate(engagement, reach)
}

fn sum_impressions(group: &[ContentRecord]) -> u64 {
    group
        .iter()
        .fold(0u64, |acc, r| acc.saturating_add(r.metrics.impressions))
}

fn sum_engagement(group: &[ContentRecord]) -> u64 {
    group
        .iter()
        .fold(0u64, |acc, r| acc.saturating_add(r.metrics.total_engagement()))
}

#[allow(clippy::cast_precision_loss)]
fn rate(engagement: u64, reach: u64) -> f64 {
    if reach == 0 {
        return 0.0;
    }
    engagement as f64 / reach as f64 * 100.0
}

#[allow(clippy::cast_precision_loss)]
fn time_span_hours(group: &[ContentRecord]) -> f64 {
    let earliest = group.iter().map(|r| r.timestamp).min();
    let latest = group.iter().map(|r| r.timestamp).max();
    match (earliest, latest) {
        (Some(min), Some(max)) => (max - min).num_milliseconds() as f64 / 3_600_000.0,
        _ => 0.0,
    }
}

#[cfg(test)]
#[path = "scorer_test.rs"]
mod tests;
