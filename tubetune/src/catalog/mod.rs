//! Read-only client for the video catalog API.
//!
//! The catalog speaks the YouTube Data API v3 shape: every list endpoint wraps its
//! results in a [`types::ListResponse`] envelope, counts arrive as strings, and
//! search hits carry an id object where exactly one of `videoId`, `channelId` or
//! `playlistId` is set. All of that is normalized once, at decode time:
//!
//! - search hit ids become a [`ResourceId`] with exactly one active variant
//! - video ids are plain strings whichever form upstream used
//! - statistics are `Option<u64>`
//! - thumbnails are looked up through [`Thumbnails::get`], which falls back to
//!   smaller sizes rather than failing
//!
//! # Example Usage
//!
//! ```rust,no_run
//! use tubetune::catalog::{CatalogClient, SearchKind};
//! use tubetune::config::CatalogConfig;
//!
//! # async fn example() -> eyre::Result<()> {
//! let client = CatalogClient::new(CatalogConfig::from_env()?, reqwest::Client::new());
//!
//! for hit in client.search("lofi beats", 10, &[SearchKind::Video]).await? {
//!     println!("{} ({})", hit.snippet.title, hit.id);
//! }
//! # Ok(())
//! # }
//! ```

pub mod categories;
pub mod channels;
pub mod client;
pub mod error;
pub mod search;
pub mod types;
pub mod videos;

#[cfg(test)]
pub(crate) mod stub;

pub use client::{CatalogClient, DEFAULT_MAX_RESULTS, DEFAULT_SHORT_LIST_RESULTS};
pub use error::CatalogError;
pub use types::{PageInfo, Snippet, Thumbnail, ThumbnailSize, Thumbnails, format_count};

pub use categories::{VideoCategory, VideoCategorySnippet};
pub use channels::{Channel, ChannelSnippet, ChannelStatistics};
pub use search::{ResourceId, SearchKind, SearchResult};
pub use videos::{Video, VideoContentDetails, VideoStatistics};
