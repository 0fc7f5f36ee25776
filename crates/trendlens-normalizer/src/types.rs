//! Raw payload types for each supported platform.
//!
//! These mirror the JSON blobs handed over by the acquisition layer. Only the
//! fields the normalizer reads are modelled; anything else in the payload is
//! ignored by serde.
//!
//! ### Instagram
//! Post objects from the private web API. `taken_at` is unix seconds.
//! `media_type` is a numeric code (`1` image, `2` video, `8` carousel) and
//! `product_type` refines videos (`"clips"` for reels, `"story"` for stories).
//! The view counter depends on the media kind: reels expose `play_count`,
//! older videos `view_count`, and images usually neither. When the acquisition
//! layer has insight data it is passed as `impression_count` and wins.
//!
//! ### `TikTok`
//! Item objects from the web `item_list` endpoint, camelCase keys.
//! `createTime` is unix seconds. Photo-mode posts carry `aweme_type = 150`;
//! plain videos carry `0` or omit the field.
//!
//! Ids arrive as JSON strings on some endpoints and numbers on others, so
//! both are accepted.

use serde::{Deserialize, Deserializer};

/// A single Instagram post.
#[derive(Debug, Deserialize)]
pub struct InstagramPost {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,

    /// Creation time, unix seconds.
    pub taken_at: i64,

    #[serde(default)]
    pub media_type: Option<i64>,

    /// `"clips"`, `"story"`, `"feed"`, `"carousel_container"`, ...
    #[serde(default)]
    pub product_type: Option<String>,

    /// `null` when the post has no caption.
    #[serde(default)]
    pub caption: Option<InstagramCaption>,

    #[serde(default)]
    pub impression_count: Option<u64>,
    #[serde(default)]
    pub play_count: Option<u64>,
    #[serde(default)]
    pub view_count: Option<u64>,

    #[serde(default)]
    pub like_count: u64,
    #[serde(default)]
    pub comment_count: u64,
    #[serde(default)]
    pub reshare_count: u64,
    #[serde(default)]
    pub save_count: u64,

    pub user: InstagramUser,

    /// Seconds; present for videos and reels only.
    #[serde(default)]
    pub video_duration: Option<f64>,

    #[serde(default)]
    pub music_info: Option<InstagramMusicInfo>,

    #[serde(default)]
    pub location: Option<InstagramLocation>,
}

#[derive(Debug, Deserialize)]
pub struct InstagramCaption {
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub struct InstagramUser {
    pub username: String,
    #[serde(default)]
    pub follower_count: u64,
    #[serde(default)]
    pub is_verified: bool,
}

#[derive(Debug, Deserialize)]
pub struct InstagramMusicInfo {
    #[serde(deserialize_with = "string_or_number")]
    pub audio_id: String,
}

#[derive(Debug, Deserialize)]
pub struct InstagramLocation {
    pub name: String,
}

/// A single `TikTok` item.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TikTokItem {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,

    /// Creation time, unix seconds.
    pub create_time: i64,

    /// Caption text. Empty string when the author wrote nothing.
    #[serde(default)]
    pub desc: String,

    #[serde(default, rename = "aweme_type")]
    pub aweme_type: Option<i64>,

    pub author: TikTokAuthor,

    #[serde(default)]
    pub author_stats: Option<TikTokAuthorStats>,

    #[serde(default)]
    pub stats: TikTokStats,

    #[serde(default)]
    pub video: Option<TikTokVideo>,

    #[serde(default)]
    pub music: Option<TikTokMusic>,

    #[serde(default)]
    pub poi_info: Option<TikTokPoi>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TikTokAuthor {
    pub unique_id: String,
    #[serde(default)]
    pub verified: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TikTokAuthorStats {
    #[serde(default)]
    pub follower_count: u64,
}

/// Engagement counters. `diggCount` is `TikTok`'s like count and
/// `collectCount` its save count.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TikTokStats {
    #[serde(default)]
    pub play_count: u64,
    #[serde(default)]
    pub digg_count: u64,
    #[serde(default)]
    pub comment_count: u64,
    #[serde(default)]
    pub share_count: u64,
    #[serde(default)]
    pub collect_count: u64,
}

#[derive(Debug, Deserialize)]
pub struct TikTokVideo {
    /// Seconds.
    #[serde(default)]
    pub duration: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub struct TikTokMusic {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TikTokPoi {
    pub poi_name: String,
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Str(String),
        Num(u64),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Str(s) => s,
        RawId::Num(n) => n.to_string(),
    })
}
