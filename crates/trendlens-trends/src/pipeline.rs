//! Trend analysis orchestration.

use std::collections::{BTreeMap, HashMap};

use trendlens_core::{ContentRecord, Platform};

use crate::grouper::{extract_keyword_groups_with_min, group_by_hashtag};
use crate::matcher::detect_cross_platform_trends;
use crate::scorer::{group_metrics, score_group};
use crate::types::{
    AnalysisConfig, CandidateKind, CrossPlatformTrend, TrendAnalysis, TrendCandidate, TrendSummary,
};

const TOP_HASHTAG_COUNT: usize = 10;

/// Run the full analysis over one batch of normalized records.
///
/// 1. Cap the batch at `config.max_batch_size` (excess is dropped with a warning).
/// 2. Group by hashtag and by caption keyword; score every group.
/// 3. Keep groups that are viral or potentially viral as candidates, highest
///    score first.
/// 4. Detect cross-platform groups.
/// 5. Summarize the batch.
///
/// An empty batch yields an empty analysis with a zeroed summary.
#[must_use]
pub fn analyze_trends(records: &[ContentRecord], config: &AnalysisConfig) -> TrendAnalysis {
    let records = if records.len() > config.max_batch_size {
        tracing::warn!(
            received = records.len(),
            max_batch_size = config.max_batch_size,
            "batch exceeds limit; extra records dropped"
        );
        &records[..config.max_batch_size]
    } else {
        records
    };

    let mut candidates: Vec<TrendCandidate> = Vec::new();
    collect_candidates(&mut candidates, CandidateKind::Hashtag, group_by_hashtag(records));
    collect_candidates(
        &mut candidates,
        CandidateKind::Keyword,
        extract_keyword_groups_with_min(records, config.keyword_min_records),
    );
    candidates.sort_by(|a, b| {
        b.score
            .viral_score
            .total_cmp(&a.score.viral_score)
            .then_with(|| a.identifier.cmp(&b.identifier))
    });

    let cross_platform = detect_cross_platform_trends(records);
    let summary = summarize(records, &candidates, &cross_platform);

    tracing::info!(
        records = summary.total_content,
        candidates = summary.candidate_count,
        viral = summary.viral_count,
        cross_platform = summary.cross_platform_count,
        "trend analysis complete"
    );

    TrendAnalysis {
        candidates,
        cross_platform,
        summary,
    }
}

fn collect_candidates(
    out: &mut Vec<TrendCandidate>,
    kind: CandidateKind,
    groups: BTreeMap<String, Vec<ContentRecord>>,
) {
    for (identifier, contents) in groups {
        let score = score_group(&contents);
        if !score.is_viral && !score.is_potentially_viral {
            continue;
        }
        tracing::debug!(
            identifier = %identifier,
            viral_score = score.viral_score,
            phase = %score.phase,
            "trend candidate surfaced"
        );
        out.push(TrendCandidate {
            kind,
            identifier,
            metrics: group_metrics(&contents),
            score,
            contents,
        });
    }
}

#[allow(clippy::cast_precision_loss)]
fn summarize(
    records: &[ContentRecord],
    candidates: &[TrendCandidate],
    cross_platform: &[CrossPlatformTrend],
) -> TrendSummary {
    let mut platform_counts: BTreeMap<Platform, usize> = BTreeMap::new();
    for record in records {
        *platform_counts.entry(record.platform).or_default() += 1;
    }

    let avg_engagement_score = if records.is_empty() {
        0.0
    } else {
        records
            .iter()
            .map(|r| r.metrics.engagement_score)
            .sum::<f64>()
            / records.len() as f64
    };

    TrendSummary {
        total_content: records.len(),
        platform_counts,
        candidate_count: candidates.len(),
        viral_count: candidates.iter().filter(|c| c.score.is_viral).count(),
        potentially_viral_count: candidates
            .iter()
            .filter(|c| c.score.is_potentially_viral)
            .count(),
        cross_platform_count: cross_platform.len(),
        avg_engagement_score,
        top_hashtags: top_hashtags(records),
        top_trend: candidates.first().map(|c| c.identifier.clone()),
    }
}

/// Most used hashtags by number of records, ties broken alphabetically.
fn top_hashtags(records: &[ContentRecord]) -> Vec<(String, usize)> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for record in records {
        let mut tags: Vec<&str> = record.content.hashtags.iter().map(String::as_str).collect();
        tags.sort_unstable();
        tags.dedup();
        for tag in tags {
            *counts.entry(tag).or_default() += 1;
        }
    }

    let mut ranked: Vec<(String, usize)> = counts
        .into_iter()
        .map(|(tag, count)| (tag.to_string(), count))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    ranked.truncate(TOP_HASHTAG_COUNT);
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{record, with_engagement};

    fn hot(id: usize, platform: &str, caption: &str) -> ContentRecord {
        with_engagement(record(&id.to_string(), platform, &format!("u{id}"), caption), 1_000, 150)
    }

    fn cold(id: usize, platform: &str, caption: &str) -> ContentRecord {
        with_engagement(record(&id.to_string(), platform, &format!("u{id}"), caption), 1_000, 5)
    }

    #[test]
    fn empty_batch_yields_empty_analysis() {
        let analysis = analyze_trends(&[], &AnalysisConfig::default());
        assert!(analysis.candidates.is_empty());
        assert!(analysis.cross_platform.is_empty());
        assert_eq!(analysis.summary.total_content, 0);
        assert_eq!(analysis.summary.avg_engagement_score, 0.0);
        assert!(analysis.summary.top_trend.is_none());
    }

    #[test]
    fn only_viral_or_potentially_viral_groups_surface() {
        let mut records: Vec<_> = (0..3).map(|i| hot(i, "instagram", "#hot")).collect();
        records.extend((3..6).map(|i| cold(i, "instagram", "#cold")));

        let analysis = analyze_trends(&records, &AnalysisConfig::default());
        let ids: Vec<&str> = analysis.candidates.iter().map(|c| c.identifier.as_str()).collect();
        assert_eq!(ids, vec!["#hot"]);
        assert_eq!(analysis.candidates[0].kind, CandidateKind::Hashtag);
        assert_eq!(analysis.candidates[0].contents.len(), 3);
        assert!(analysis.candidates[0].score.is_potentially_viral);
    }

    #[test]
    fn keyword_groups_become_candidates() {
        let records: Vec<_> = (0..5).map(|i| hot(i, "tiktok", "matcha")).collect();
        let analysis = analyze_trends(&records, &AnalysisConfig::default());
        assert_eq!(analysis.candidates.len(), 1);
        assert_eq!(analysis.candidates[0].kind, CandidateKind::Keyword);
        assert_eq!(analysis.candidates[0].identifier, "matcha");
    }

    #[test]
    fn keyword_threshold_comes_from_config() {
        let records: Vec<_> = (0..2).map(|i| hot(i, "tiktok", "matcha")).collect();
        let config = AnalysisConfig {
            keyword_min_records: 2,
            ..AnalysisConfig::default()
        };
        assert_eq!(analyze_trends(&records, &config).candidates.len(), 1);
        assert!(analyze_trends(&records, &AnalysisConfig::default())
            .candidates
            .is_empty());
    }

    #[test]
    fn candidates_sorted_by_score_then_identifier() {
        let records = vec![
            with_engagement(record("1", "tiktok", "a", "#b #a"), 1_000, 150),
            with_engagement(record("2", "tiktok", "b", "#top"), 1_000, 200),
        ];
        let analysis = analyze_trends(&records, &AnalysisConfig::default());
        let ids: Vec<&str> = analysis.candidates.iter().map(|c| c.identifier.as_str()).collect();
        assert_eq!(ids, vec!["#top", "#a", "#b"]);
        assert_eq!(analysis.summary.top_trend.as_deref(), Some("#top"));
    }

    #[test]
    fn batch_is_capped_at_max_size() {
        let records: Vec<_> = (0..10).map(|i| hot(i, "instagram", "#hot")).collect();
        let config = AnalysisConfig {
            max_batch_size: 4,
            ..AnalysisConfig::default()
        };
        let analysis = analyze_trends(&records, &config);
        assert_eq!(analysis.summary.total_content, 4);
        assert_eq!(analysis.candidates[0].contents.len(), 4);
    }

    #[test]
    fn summary_counts_platforms_and_hashtags() {
        let records = vec![
            hot(1, "instagram", "#beach summer vibes"),
            hot(2, "tiktok", "#beach summer vibes"),
            cold(3, "tiktok", "#snow"),
        ];
        let summary = analyze_trends(&records, &AnalysisConfig::default()).summary;

        assert_eq!(summary.total_content, 3);
        assert_eq!(summary.platform_counts[&Platform::Instagram], 1);
        assert_eq!(summary.platform_counts[&Platform::TikTok], 2);
        assert_eq!(summary.cross_platform_count, 1);
        assert_eq!(
            summary.top_hashtags,
            vec![("#beach".to_string(), 2), ("#snow".to_string(), 1)]
        );
        // (150 + 150 + 5) / 3
        assert!((summary.avg_engagement_score - 305.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn top_hashtags_capped_at_ten_with_alphabetical_ties() {
        let caption = "#a #b #c #d #e #f #g #h #i #j #k #l";
        let records = vec![record("1", "tiktok", "a", caption), record("2", "tiktok", "b", "#l")];
        let top = top_hashtags(&records);
        assert_eq!(top.len(), 10);
        assert_eq!(top[0], ("#l".to_string(), 2));
        assert_eq!(top[1], ("#a".to_string(), 1));
        assert_eq!(top[9], ("#i".to_string(), 1));
    }
}
