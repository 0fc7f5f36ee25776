use serde::Deserialize;
use trendlens_core::{ContentType, Platform};

use super::{require_non_empty, timestamp_from_secs, PlatformAdapter, RawContent};
use crate::error::NormalizerError;
use crate::types::InstagramPost;

#[derive(Debug, Clone, Copy, Default)]
pub struct InstagramAdapter;

impl InstagramAdapter {
    /// Maps Instagram's `media_type` code (refined by `product_type`) to a
    /// [`ContentType`].
    #[must_use]
    pub fn content_type(media_type: Option<i64>, product_type: Option<&str>) -> ContentType {
        match (media_type, product_type) {
            (Some(1), _) => ContentType::Image,
            (Some(2), Some("clips")) => ContentType::Reel,
            (Some(2), Some("story")) => ContentType::Story,
            (Some(2), _) => ContentType::Video,
            (Some(8), _) => ContentType::Carousel,
            _ => ContentType::Unknown,
        }
    }
}

impl PlatformAdapter for InstagramAdapter {
    fn platform(&self) -> Platform {
        Platform::Instagram
    }

    fn extract(&self, raw: &serde_json::Value) -> Result<RawContent, NormalizerError> {
        let platform = self.platform();
        let post = InstagramPost::deserialize(raw).map_err(|e| NormalizerError::MalformedInput {
            platform,
            reason: e.to_string(),
        })?;

        require_non_empty(platform, "id", &post.id)?;
        require_non_empty(platform, "user.username", &post.user.username)?;
        let created_at = timestamp_from_secs(platform, post.taken_at)?;

        let impressions = post
            .impression_count
            .or(post.play_count)
            .or(post.view_count)
            .unwrap_or(0);

        Ok(RawContent {
            raw_id: post.id,
            created_at,
            content_type: Self::content_type(post.media_type, post.product_type.as_deref()),
            caption: post.caption.map(|c| c.text).unwrap_or_default(),
            impressions,
            likes: post.like_count,
            comments: post.comment_count,
            shares: post.reshare_count,
            saves: post.save_count,
            sound_id: post.music_info.map(|m| m.audio_id),
            duration: post.video_duration,
            username: post.user.username,
            follower_count: post.user.follower_count,
            verified: post.user.is_verified,
            location_name: post.location.map(|l| l.name),
        })
    }
}
