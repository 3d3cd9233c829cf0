//! Shared types for catalog API responses.

use jiff::Timestamp;
use jiff::tz::TimeZone;
use serde::{Deserialize, Deserializer, Serialize};

/// The envelope every catalog `list` endpoint wraps its results in.
///
/// Only [`ListResponse::items`] is consumed by the client; the remaining fields are
/// decoded so they show up in trace output. Pagination tokens are never followed.
///
/// See: <https://developers.google.com/youtube/v3/docs/videos/list#response>
#[derive(Debug, Deserialize)]
pub struct ListResponse<T> {
    /// Identifies the API resource's type, e.g. `youtube#searchListResponse`.
    #[serde(default)]
    pub kind: String,
    /// The Etag of this resource.
    #[serde(default)]
    pub etag: String,
    /// The results of the request.
    ///
    /// Upstream omits the array entirely for some empty results.
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
    #[serde(rename = "pageInfo")]
    pub page_info: Option<PageInfo>,
    /// Token for the next page in the result set.
    #[serde(rename = "nextPageToken")]
    pub next_page_token: Option<String>,
    /// Token for the previous page in the result set.
    #[serde(rename = "prevPageToken")]
    pub prev_page_token: Option<String>,
}

/// Paging details for lists of resources.
///
/// Includes the total number of items available and the number of resources
/// returned in a single page response.
///
/// See: <https://developers.google.com/youtube/v3/docs/pageInfo>
#[derive(Debug, Serialize, Deserialize)]
pub struct PageInfo {
    /// The total number of results in the result set.
    #[serde(rename = "totalResults")]
    pub total_results: u32,
    /// The number of results included in the API response.
    #[serde(rename = "resultsPerPage")]
    pub results_per_page: u32,
}

/// The descriptive payload attached to videos, search hits and playlists.
///
/// See: <https://developers.google.com/youtube/v3/docs/videos#snippet>
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snippet {
    /// When the resource was published.
    #[serde(rename = "publishedAt")]
    pub published_at: Timestamp,
    /// The ID of the channel that owns the resource.
    #[serde(rename = "channelId")]
    pub channel_id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub thumbnails: Thumbnails,
    /// Display name of the owning channel.
    #[serde(rename = "channelTitle")]
    pub channel_title: String,
    /// `none`, `upcoming` or `live`.
    #[serde(
        rename = "liveBroadcastContent",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub live_broadcast_content: Option<String>,
}

impl Snippet {
    /// The calendar year (UTC) the resource was published in.
    pub fn published_year(&self) -> i16 {
        self.published_at.to_zoned(TimeZone::UTC).year()
    }
}

/// A single thumbnail image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Thumbnail {
    pub url: String,
    /// Omitted upstream for some channel thumbnails.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
}

/// The sizes a [`Thumbnails`] set may carry, smallest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ThumbnailSize {
    Default,
    Medium,
    High,
    Standard,
    Maxres,
}

/// Thumbnail images for a resource, keyed by size.
///
/// `default` and `medium` are always present. Everything above that is optional, so
/// use [`Thumbnails::get`] rather than reaching into the optional fields directly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Thumbnails {
    pub default: Thumbnail,
    pub medium: Thumbnail,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub high: Option<Thumbnail>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub standard: Option<Thumbnail>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maxres: Option<Thumbnail>,
}

impl Thumbnails {
    /// Returns the thumbnail of the requested size, or the next smaller one that exists.
    ///
    /// Never goes below `medium` for sizes above it.
    pub fn get(&self, size: ThumbnailSize) -> &Thumbnail {
        match size {
            ThumbnailSize::Default => &self.default,
            ThumbnailSize::Medium => &self.medium,
            ThumbnailSize::High => self.high.as_ref().unwrap_or(&self.medium),
            ThumbnailSize::Standard => self
                .standard
                .as_ref()
                .or(self.high.as_ref())
                .unwrap_or(&self.medium),
            ThumbnailSize::Maxres => self
                .maxres
                .as_ref()
                .or(self.standard.as_ref())
                .or(self.high.as_ref())
                .unwrap_or(&self.medium),
        }
    }

    /// The largest thumbnail available.
    pub fn largest(&self) -> &Thumbnail {
        self.get(ThumbnailSize::Maxres)
    }
}

/// Decodes an optional count that upstream transmits as a decimal string.
pub(crate) fn count_from_str<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(raw) = Option::<String>::deserialize(deserializer)? else {
        return Ok(None);
    };
    match raw.parse() {
        Ok(count) => Ok(Some(count)),
        Err(e) => {
            let msg = format!("count {raw:?} is not an integer: {e}");
            Err(serde::de::Error::custom(msg))
        }
    }
}

/// Renders a count with `,` thousands separators, e.g. `1234567` as `1,234,567`.
pub fn format_count(count: u64) -> String {
    let digits = count.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, digit) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(digit);
    }
    out
}
