//! Partitioning a batch into candidate groups by hashtag or caption keyword.

use std::collections::{BTreeMap, HashSet};

use trendlens_core::ContentRecord;

use crate::text::unique_significant_tokens;

/// Keywords used by fewer records than this are treated as noise.
pub const KEYWORD_MIN_RECORDS: usize = 5;

/// Groups records by hashtag. A record with N distinct hashtags lands in N
/// groups; a hashtag repeated inside one caption counts once.
#[must_use]
pub fn group_by_hashtag(records: &[ContentRecord]) -> BTreeMap<String, Vec<ContentRecord>> {
    let mut groups: BTreeMap<String, Vec<ContentRecord>> = BTreeMap::new();

    for record in records {
        let mut seen = HashSet::new();
        for tag in &record.content.hashtags {
            if seen.insert(tag.as_str()) {
                groups.entry(tag.clone()).or_default().push(record.clone());
            }
        }
    }

    groups
}

/// Groups records by significant caption keyword, keeping only keywords
/// shared by at least [`KEYWORD_MIN_RECORDS`] records.
#[must_use]
pub fn extract_keyword_groups(records: &[ContentRecord]) -> BTreeMap<String, Vec<ContentRecord>> {
    extract_keyword_groups_with_min(records, KEYWORD_MIN_RECORDS)
}

/// [`extract_keyword_groups`] with an explicit significance threshold.
#[must_use]
pub fn extract_keyword_groups_with_min(
    records: &[ContentRecord],
    min_records: usize,
) -> BTreeMap<String, Vec<ContentRecord>> {
    let mut groups: BTreeMap<String, Vec<ContentRecord>> = BTreeMap::new();

    for record in records {
        for keyword in unique_significant_tokens(&record.content.caption) {
            groups.entry(keyword).or_default().push(record.clone());
        }
    }

    groups.retain(|_, members| members.len() >= min_records);
    groups
}
