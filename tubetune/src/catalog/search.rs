//! Catalog search results and their tagged resource ids.

use crate::catalog::types::Snippet;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A kind of resource the `search` endpoint can return.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchKind {
    Video,
    Channel,
    Playlist,
}

impl SearchKind {
    /// The value upstream expects in the `type` query parameter.
    pub fn as_str(self) -> &'static str {
        match self {
            SearchKind::Video => "video",
            SearchKind::Channel => "channel",
            SearchKind::Playlist => "playlist",
        }
    }

    fn resource_kind(self) -> &'static str {
        match self {
            SearchKind::Video => "youtube#video",
            SearchKind::Channel => "youtube#channel",
            SearchKind::Playlist => "youtube#playlist",
        }
    }
}

impl fmt::Display for SearchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Joins kinds into the comma-separated form of the `type` parameter.
///
/// Upstream rejects some combinations (notably `playlist` alongside anything
/// else); those are passed through as-is.
pub(crate) fn join_kinds(kinds: &[SearchKind]) -> String {
    kinds
        .iter()
        .map(|kind| kind.as_str())
        .collect::<Vec<_>>()
        .join(",")
}

/// The id of a search hit, tagged with the kind of resource it refers to.
///
/// Upstream encodes this as an object where exactly one of `videoId`, `channelId`
/// or `playlistId` is set. Anything else fails to decode.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawResourceId", into = "RawResourceId")]
pub enum ResourceId {
    Video(String),
    Channel(String),
    Playlist(String),
}

impl ResourceId {
    pub fn kind(&self) -> SearchKind {
        match self {
            ResourceId::Video(_) => SearchKind::Video,
            ResourceId::Channel(_) => SearchKind::Channel,
            ResourceId::Playlist(_) => SearchKind::Playlist,
        }
    }

    /// The bare id, whatever its kind.
    pub fn as_str(&self) -> &str {
        match self {
            ResourceId::Video(id) | ResourceId::Channel(id) | ResourceId::Playlist(id) => id,
        }
    }

    pub fn video_id(&self) -> Option<&str> {
        match self {
            ResourceId::Video(id) => Some(id),
            _ => None,
        }
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind(), self.as_str())
    }
}

#[derive(Clone, Serialize, Deserialize)]
struct RawResourceId {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    kind: Option<String>,
    #[serde(rename = "videoId", default, skip_serializing_if = "Option::is_none")]
    video_id: Option<String>,
    #[serde(rename = "channelId", default, skip_serializing_if = "Option::is_none")]
    channel_id: Option<String>,
    #[serde(
        rename = "playlistId",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    playlist_id: Option<String>,
}

impl TryFrom<RawResourceId> for ResourceId {
    type Error = String;

    fn try_from(raw: RawResourceId) -> Result<Self, Self::Error> {
        match (raw.video_id, raw.channel_id, raw.playlist_id) {
            (Some(id), None, None) => Ok(ResourceId::Video(id)),
            (None, Some(id), None) => Ok(ResourceId::Channel(id)),
            (None, None, Some(id)) => Ok(ResourceId::Playlist(id)),
            (None, None, None) => Err(format!(
                "search result id of kind {:?} has none of videoId, channelId or playlistId",
                raw.kind.as_deref().unwrap_or("unknown")
            )),
            _ => Err(format!(
                "search result id of kind {:?} has several of videoId, channelId or playlistId",
                raw.kind.as_deref().unwrap_or("unknown")
            )),
        }
    }
}

impl From<ResourceId> for RawResourceId {
    fn from(id: ResourceId) -> Self {
        let mut raw = RawResourceId {
            kind: Some(id.kind().resource_kind().to_string()),
            video_id: None,
            channel_id: None,
            playlist_id: None,
        };
        match id {
            ResourceId::Video(id) => raw.video_id = Some(id),
            ResourceId::Channel(id) => raw.channel_id = Some(id),
            ResourceId::Playlist(id) => raw.playlist_id = Some(id),
        }
        raw
    }
}

/// A single hit from the `search` endpoint.
///
/// See: <https://developers.google.com/youtube/v3/docs/search#resource>
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub id: ResourceId,
    pub snippet: Snippet,
}
