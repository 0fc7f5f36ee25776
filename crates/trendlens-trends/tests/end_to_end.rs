//! Raw platform payloads through normalization, analysis and tracking.

use chrono::{DateTime, Duration, TimeZone, Utc};
use serde_json::{json, Value};

use trendlens_core::{Platform, Taxonomy};
use trendlens_normalizer::{normalize_batch, NormalizeContext};
use trendlens_trends::{
    analyze_trends, AnalysisConfig, CandidateKind, TrackedPhase, TrendTracker,
};

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
}

fn instagram_post(id: usize, username: &str, caption: &str, likes: u64) -> Value {
    json!({
        "id": id.to_string(),
        "taken_at": (now() - Duration::hours(3)).timestamp(),
        "media_type": 1,
        "caption": {"text": caption},
        "impression_count": 1000,
        "like_count": likes,
        "user": {"username": username, "follower_count": 1_000, "is_verified": false}
    })
}

fn tiktok_item(id: usize, username: &str, desc: &str, likes: u64) -> Value {
    json!({
        "id": id.to_string(),
        "createTime": (now() - Duration::hours(3)).timestamp(),
        "desc": desc,
        "author": {"uniqueId": username},
        "stats": {"playCount": 1000, "diggCount": likes}
    })
}

#[test]
fn shared_hashtag_surfaces_as_potentially_viral() {
    let taxonomy = Taxonomy::default();
    let ctx = NormalizeContext::at(&taxonomy, now());

    let mut raw: Vec<Value> = (0..6)
        .map(|i| instagram_post(i, &format!("creator{i}"), &format!("#trend clip{i}"), 150))
        .collect();
    raw.extend((6..10).map(|i| instagram_post(i, &format!("creator{i}"), &format!("note{i}"), 10)));

    let records = normalize_batch(&raw, Platform::Instagram, &ctx);
    assert_eq!(records.len(), 10);
    let tagged: Vec<_> = records
        .iter()
        .filter(|r| r.content.hashtags.contains(&"#trend".to_string()))
        .collect();
    assert_eq!(tagged.len(), 6);
    assert!(tagged
        .iter()
        .all(|r| (r.metrics.engagement_score - 150.0).abs() < 1e-9));

    let analysis = analyze_trends(&records, &AnalysisConfig::default());
    assert_eq!(analysis.candidates.len(), 1);

    let candidate = &analysis.candidates[0];
    assert_eq!(candidate.kind, CandidateKind::Hashtag);
    assert_eq!(candidate.identifier, "#trend");
    assert_eq!(candidate.contents.len(), 6);
    assert_eq!(candidate.score.creator_diversity, 6);
    assert!(candidate.score.is_potentially_viral);
    assert!(!candidate.score.is_viral);
    assert!((candidate.score.viral_score - 76.65).abs() < 1e-9);

    assert_eq!(analysis.summary.total_content, 10);
    assert_eq!(analysis.summary.top_trend.as_deref(), Some("#trend"));
    assert_eq!(analysis.summary.top_hashtags, vec![("#trend".to_string(), 6)]);
    assert!(analysis.cross_platform.is_empty());
}

#[test]
fn same_content_on_both_platforms_is_matched() {
    let taxonomy = Taxonomy::default();
    let ctx = NormalizeContext::at(&taxonomy, now());

    let mut records = normalize_batch(
        &[instagram_post(1, "sunny", "Summer vibes at the #Beach", 40)],
        Platform::Instagram,
        &ctx,
    );
    records.extend(normalize_batch(
        &[tiktok_item(2, "wave_rider", "summer vibes #beach", 60)],
        Platform::TikTok,
        &ctx,
    ));

    let analysis = analyze_trends(&records, &AnalysisConfig::default());
    assert_eq!(analysis.cross_platform.len(), 1);

    let trend = &analysis.cross_platform[0];
    assert_eq!(trend.key, "#beach-summer-vibes");
    assert_eq!(trend.platforms, vec![Platform::Instagram, Platform::TikTok]);
    assert_eq!(trend.metrics.total_reach, 2_000);
    assert_eq!(analysis.summary.platform_counts[&Platform::TikTok], 1);
}

#[test]
fn analysis_candidates_feed_the_tracker() {
    let taxonomy = Taxonomy::default();
    let ctx = NormalizeContext::at(&taxonomy, now());
    let raw: Vec<Value> = (0..6)
        .map(|i| instagram_post(i, &format!("creator{i}"), "#trend", 150))
        .collect();
    let records = normalize_batch(&raw, Platform::Instagram, &ctx);
    let analysis = analyze_trends(&records, &AnalysisConfig::default());

    let tracker = TrendTracker::in_memory();
    tracker.track_candidates(&analysis.candidates).unwrap();
    assert_eq!(tracker.status("#trend").unwrap(), Some(TrackedPhase::Emerging));

    for _ in 0..2 {
        tracker.track_candidates(&analysis.candidates).unwrap();
    }
    let predictions = tracker.predictions(Utc::now()).unwrap();
    assert_eq!(predictions.len(), 1);
    assert_eq!(predictions[0].identifier, "#trend");
    assert_eq!(predictions[0].data_points, 3);
}
