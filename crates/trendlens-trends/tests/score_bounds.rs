//! Property tests: group scores stay in range whatever the counts.

use chrono::{Duration, TimeZone, Utc};
use proptest::prelude::*;
use serde_json::json;

use trendlens_core::{Platform, Taxonomy};
use trendlens_normalizer::{normalize, NormalizeContext};
use trendlens_trends::scorer::{score_group, MAX_VIRAL_SCORE};
use trendlens_trends::{analyze_trends, AnalysisConfig};

fn post() -> impl Strategy<Value = (u64, u64, u64, i64, u8)> {
    (
        prop_oneof![Just(0u64), Just(u64::MAX), 0u64..10_000_000],
        prop_oneof![Just(0u64), Just(u64::MAX), 0u64..10_000_000],
        0u64..1_000_000,
        0i64..500,
        0u8..4,
    )
}

proptest! {
    #[test]
    fn group_viral_score_in_range(posts in prop::collection::vec(post(), 0..25)) {
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
        let taxonomy = Taxonomy::default();
        let ctx = NormalizeContext::at(&taxonomy, now);

        let records: Vec<_> = posts
            .iter()
            .enumerate()
            .map(|(i, &(plays, likes, shares, hours, creator))| {
                let raw = json!({
                    "id": i.to_string(),
                    "createTime": (now - Duration::hours(hours)).timestamp(),
                    "desc": "#prop",
                    "author": {"uniqueId": format!("c{creator}")},
                    "stats": {"playCount": plays, "diggCount": likes, "shareCount": shares}
                });
                normalize(&raw, Platform::TikTok, &ctx).unwrap()
            })
            .collect();

        let score = score_group(&records);
        prop_assert!(score.viral_score.is_finite());
        prop_assert!(
            (0.0..=MAX_VIRAL_SCORE).contains(&score.viral_score),
            "score {}",
            score.viral_score
        );
        prop_assert!(!(score.is_viral && score.is_potentially_viral));

        let analysis = analyze_trends(&records, &AnalysisConfig::default());
        for candidate in &analysis.candidates {
            prop_assert!(candidate.score.is_viral || candidate.score.is_potentially_viral);
        }
    }
}
