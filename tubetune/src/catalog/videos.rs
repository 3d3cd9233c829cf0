//! Catalog video resources.

use crate::catalog::types::{Snippet, count_from_str};
use serde::{Deserialize, Deserializer, Serialize};

/// A `video` resource represents a single playable catalog item.
///
/// See: <https://developers.google.com/youtube/v3/docs/videos#resource>
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Video {
    /// The ID that uniquely identifies the video.
    ///
    /// Upstream sends this either as a plain string or wrapped as `{kind, videoId}`;
    /// both forms decode to the bare id.
    #[serde(deserialize_with = "video_id")]
    pub id: String,
    pub snippet: Snippet,
    /// Engagement counts. Only present when `part=statistics` was requested.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub statistics: Option<VideoStatistics>,
    #[serde(
        rename = "contentDetails",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub content_details: Option<VideoContentDetails>,
}

/// Statistics about the video.
///
/// All counts arrive as strings and are parsed on decode. A count the owner has
/// hidden is simply absent.
///
/// See: <https://developers.google.com/youtube/v3/docs/videos#statistics>
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoStatistics {
    /// The number of times the video has been viewed.
    #[serde(rename = "viewCount", default, deserialize_with = "count_from_str")]
    pub view_count: Option<u64>,
    /// The number of users who have indicated that they liked the video.
    #[serde(rename = "likeCount", default, deserialize_with = "count_from_str")]
    pub like_count: Option<u64>,
    /// Deprecated upstream and always `0`.
    #[serde(rename = "favoriteCount", default, deserialize_with = "count_from_str")]
    pub favorite_count: Option<u64>,
    #[serde(rename = "commentCount", default, deserialize_with = "count_from_str")]
    pub comment_count: Option<u64>,
}

/// See: <https://developers.google.com/youtube/v3/docs/videos#contentDetails>
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoContentDetails {
    /// ISO 8601 duration, e.g. `PT3M33S`.
    pub duration: String,
    /// `2d` or `3d`.
    #[serde(default)]
    pub dimension: String,
    /// `hd` or `sd`.
    #[serde(default)]
    pub definition: String,
}

fn video_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawVideoId {
        Plain(String),
        Wrapped {
            #[serde(rename = "videoId")]
            video_id: String,
        },
    }

    Ok(match RawVideoId::deserialize(deserializer)? {
        RawVideoId::Plain(id) | RawVideoId::Wrapped { video_id: id } => id,
    })
}
