//! Catalog channel resources.

use crate::catalog::types::{Thumbnails, count_from_str};
use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// A `channel` resource contains information about a catalog channel.
///
/// See: <https://developers.google.com/youtube/v3/docs/channels#resource>
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Channel {
    /// The ID that uniquely identifies the channel.
    pub id: String,
    pub snippet: ChannelSnippet,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub statistics: Option<ChannelStatistics>,
    #[serde(
        rename = "contentDetails",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub content_details: Option<ChannelContentDetails>,
}

/// The snippet object contains basic details about the channel.
///
/// Unlike a video [`Snippet`](crate::catalog::Snippet), a channel is its own owner,
/// so there is no `channelId`/`channelTitle` pair here.
///
/// See: <https://developers.google.com/youtube/v3/docs/channels#snippet>
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelSnippet {
    /// The channel's title.
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// The channel's handle, e.g. `@someartist`.
    #[serde(rename = "customUrl", default, skip_serializing_if = "Option::is_none")]
    pub custom_url: Option<String>,
    /// The date and time that the channel was created.
    #[serde(rename = "publishedAt")]
    pub published_at: Timestamp,
    pub thumbnails: Thumbnails,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
}

/// See: <https://developers.google.com/youtube/v3/docs/channels#statistics>
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelStatistics {
    #[serde(rename = "viewCount", default, deserialize_with = "count_from_str")]
    pub view_count: Option<u64>,
    /// Rounded to three significant figures upstream.
    #[serde(
        rename = "subscriberCount",
        default,
        deserialize_with = "count_from_str"
    )]
    pub subscriber_count: Option<u64>,
    #[serde(rename = "hiddenSubscriberCount", default)]
    pub hidden_subscriber_count: bool,
    #[serde(rename = "videoCount", default, deserialize_with = "count_from_str")]
    pub video_count: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelContentDetails {
    #[serde(rename = "relatedPlaylists", default)]
    pub related_playlists: RelatedPlaylists,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelatedPlaylists {
    /// The playlist holding every upload of the channel.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uploads: Option<String>,
}
