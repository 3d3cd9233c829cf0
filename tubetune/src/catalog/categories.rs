//! Catalog video categories.

use serde::{Deserialize, Serialize};

/// A category that can be associated with videos.
///
/// See: <https://developers.google.com/youtube/v3/docs/videoCategories#resource>
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoCategory {
    pub id: String,
    pub snippet: VideoCategorySnippet,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoCategorySnippet {
    pub title: String,
    /// Whether videos can be tagged with this category.
    #[serde(default)]
    pub assignable: bool,
    #[serde(rename = "channelId", default)]
    pub channel_id: String,
}
