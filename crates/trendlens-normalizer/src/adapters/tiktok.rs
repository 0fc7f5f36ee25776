use serde::Deserialize;
use trendlens_core::{ContentType, Platform};

use super::{require_non_empty, timestamp_from_secs, PlatformAdapter, RawContent};
use crate::error::NormalizerError;
use crate::types::TikTokItem;

#[derive(Debug, Clone, Copy, Default)]
pub struct TikTokAdapter;

impl TikTokAdapter {
    /// Maps `TikTok`'s `aweme_type` code to a [`ContentType`]. An absent code
    /// is a regular video.
    #[must_use]
    pub fn content_type(aweme_type: Option<i64>) -> ContentType {
        match aweme_type.unwrap_or(0) {
            0 => ContentType::Video,
            150 => ContentType::Carousel,
            _ => ContentType::Unknown,
        }
    }
}

impl PlatformAdapter for TikTokAdapter {
    fn platform(&self) -> Platform {
        Platform::TikTok
    }

    fn extract(&self, raw: &serde_json::Value) -> Result<RawContent, NormalizerError> {
        let platform = self.platform();
        let item = TikTokItem::deserialize(raw).map_err(|e| NormalizerError::MalformedInput {
            platform,
            reason: e.to_string(),
        })?;

        require_non_empty(platform, "id", &item.id)?;
        require_non_empty(platform, "author.uniqueId", &item.author.unique_id)?;
        let created_at = timestamp_from_secs(platform, item.create_time)?;

        Ok(RawContent {
            raw_id: item.id,
            created_at,
            content_type: Self::content_type(item.aweme_type),
            caption: item.desc,
            impressions: item.stats.play_count,
            likes: item.stats.digg_count,
            comments: item.stats.comment_count,
            shares: item.stats.share_count,
            saves: item.stats.collect_count,
            sound_id: item.music.map(|m| m.id),
            duration: item.video.and_then(|v| v.duration),
            username: item.author.unique_id,
            follower_count: item.author_stats.map_or(0, |s| s.follower_count),
            verified: item.author.verified,
            location_name: item.poi_info.map(|p| p.poi_name),
        })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn content_type_mapping() {
        assert_eq!(TikTokAdapter::content_type(None), ContentType::Video);
        assert_eq!(TikTokAdapter::content_type(Some(0)), ContentType::Video);
        assert_eq!(TikTokAdapter::content_type(Some(150)), ContentType::Carousel);
        assert_eq!(TikTokAdapter::content_type(Some(51)), ContentType::Unknown);
    }

    #[test]
    fn maps_stats_fields() {
        let raw = json!({
            "id": "7300000000000000001",
            "createTime": 1_700_000_000,
            "desc": "hello",
            "author": {"uniqueId": "creator", "verified": true},
            "authorStats": {"followerCount": 250_000},
            "stats": {
                "playCount": 10_000, "diggCount": 900, "commentCount": 40,
                "shareCount": 12, "collectCount": 30
            },
            "video": {"duration": 15.0},
            "music": {"id": 6_800_000_000_u64}
        });

        let content = TikTokAdapter.extract(&raw).unwrap();
        assert_eq!(content.impressions, 10_000);
        assert_eq!(content.likes, 900);
        assert_eq!(content.comments, 40);
        assert_eq!(content.shares, 12);
        assert_eq!(content.saves, 30);
        assert_eq!(content.follower_count, 250_000);
        assert!(content.verified);
        assert_eq!(content.sound_id.as_deref(), Some("6800000000"));
        assert_eq!(content.duration, Some(15.0));
    }

    #[test]
    fn missing_stats_default_to_zero() {
        let raw = json!({"id": "1", "createTime": 1_700_000_000, "author": {"uniqueId": "c"}});
        let content = TikTokAdapter.extract(&raw).unwrap();
        assert_eq!(content.impressions, 0);
        assert_eq!(content.likes, 0);
        assert_eq!(content.follower_count, 0);
    }

    #[test]
    fn missing_create_time_is_malformed() {
        let raw = json!({"id": "1", "author": {"uniqueId": "c"}});
        let err = TikTokAdapter.extract(&raw).unwrap_err();
        assert!(matches!(
            err,
            NormalizerError::MalformedInput {
                platform: Platform::TikTok,
                ref reason,
            } if reason.contains("createTime")
        ));
    }

    #[test]
    fn out_of_range_timestamp_is_malformed() {
        let raw = json!({"id": "1", "createTime": i64::MAX, "author": {"uniqueId": "c"}});
        let err = TikTokAdapter.extract(&raw).unwrap_err();
        assert!(matches!(
            err,
            NormalizerError::MalformedInput { ref reason, .. } if reason.contains("out of range")
        ));
    }
}
