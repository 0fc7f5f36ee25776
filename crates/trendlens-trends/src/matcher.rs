//! Cross-platform matching on a platform-agnostic content key.

use std::collections::{BTreeMap, BTreeSet};

use trendlens_core::{ContentRecord, Platform};

use crate::scorer::{group_metrics, score_group};
use crate::text::unique_significant_tokens;
use crate::types::CrossPlatformTrend;

/// Keywords must be longer than this to contribute to a content key.
const KEY_KEYWORD_MIN_EXCLUSIVE: usize = 4;
const KEY_KEYWORD_COUNT: usize = 3;

/// Builds the key two records on different platforms must share to count as
/// the same piece of content: the sorted hashtags, then the three longest
/// caption keywords, all joined with `-`.
#[must_use]
pub fn content_key(record: &ContentRecord) -> String {
    let hashtags: BTreeSet<&str> = record.content.hashtags.iter().map(String::as_str).collect();

    let mut keywords: Vec<String> = unique_significant_tokens(&record.content.caption)
        .into_iter()
        .filter(|word| word.chars().count() > KEY_KEYWORD_MIN_EXCLUSIVE)
        .collect();
    // stable: equal lengths keep caption order
    keywords.sort_by_key(|word| std::cmp::Reverse(word.chars().count()));
    keywords.truncate(KEY_KEYWORD_COUNT);

    let tags: Vec<&str> = hashtags.into_iter().collect();
    format!("{}-{}", tags.join("-"), keywords.join("-"))
}

/// Groups records by [`content_key`] and returns the groups that appear on
/// more than one platform, highest viral score first.
///
/// Every record takes part. Records with neither hashtags nor qualifying
/// keywords all share the bare `-` key and match each other.
#[must_use]
pub fn detect_cross_platform_trends(records: &[ContentRecord]) -> Vec<CrossPlatformTrend> {
    let mut groups: BTreeMap<String, Vec<ContentRecord>> = BTreeMap::new();
    for record in records {
        groups
            .entry(content_key(record))
            .or_default()
            .push(record.clone());
    }

    let mut trends: Vec<CrossPlatformTrend> = groups
        .into_iter()
        .filter_map(|(key, members)| {
            let platforms: BTreeSet<Platform> = members.iter().map(|r| r.platform).collect();
            if platforms.len() < 2 {
                return None;
            }
            tracing::debug!(key = %key, platforms = platforms.len(), "cross-platform match");
            Some(CrossPlatformTrend {
                score: score_group(&members),
                metrics: group_metrics(&members),
                platforms: platforms.into_iter().collect(),
                key,
            })
        })
        .collect();

    trends.sort_by(|a, b| b.score.viral_score.total_cmp(&a.score.viral_score));
    trends
}
