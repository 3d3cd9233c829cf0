//! Core catalog API client.

use crate::catalog::{
    categories::VideoCategory,
    channels::Channel,
    error::{CatalogError, upstream_message},
    search::{SearchKind, SearchResult, join_kinds},
    types::ListResponse,
    videos::Video,
};
use crate::config::{CatalogConfig, MUSIC_CATEGORY_ID};
use reqwest::Url;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::instrument;

/// Page size used by list operations when the caller has no preference.
pub const DEFAULT_MAX_RESULTS: u32 = 20;
/// Page size for playlist searches and related videos.
pub const DEFAULT_SHORT_LIST_RESULTS: u32 = 10;

/// Client for the read-only catalog endpoints.
///
/// The client is stateless: it holds no cache and no cross-call state, and never
/// retries. Every call is a single request (or, for [`Self::related_videos`], two
/// sequential requests), and every failure is scoped to that call.
///
/// Cloning is cheap; clones share the configuration and the underlying HTTP
/// connection pool.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    config: Arc<CatalogConfig>,
    /// HTTP client for API requests
    client: reqwest::Client,
}

impl CatalogClient {
    /// Creates a new catalog client.
    ///
    /// # Arguments
    ///
    /// * `config` - Where the API lives and which key to present
    /// * `client` - Shared HTTP client for making API requests; its timeouts are the
    ///   only ones that apply
    pub fn new(config: CatalogConfig, client: reqwest::Client) -> Self {
        Self {
            config: Arc::new(config),
            client,
        }
    }

    pub fn config(&self) -> &CatalogConfig {
        &self.config
    }

    fn endpoint_url(&self, endpoint: &str) -> Result<Url, CatalogError> {
        let mut url = self.config.base_url().clone();
        url.path_segments_mut()
            .map_err(|()| CatalogError::InvalidBaseUrl {
                base_url: self.config.base_url().to_string(),
            })?
            .pop_if_empty()
            .push(endpoint);
        Ok(url)
    }

    /// Issues a GET against one catalog endpoint and decodes the list envelope.
    ///
    /// This is the one place that:
    /// - attaches the API key
    /// - turns non-success statuses into [`CatalogError::Upstream`], carrying the
    ///   upstream `error.message` when the body has one
    /// - maps transport failures to [`CatalogError::Network`]
    /// - maps undecodable success bodies to [`CatalogError::Decode`]
    #[instrument(skip(self), level = tracing::Level::TRACE)]
    pub(crate) async fn fetch<T>(
        &self,
        endpoint: &'static str,
        query_params: &[(&str, &str)],
    ) -> Result<ListResponse<T>, CatalogError>
    where
        T: DeserializeOwned,
    {
        let url = self.endpoint_url(endpoint)?;

        let response = self
            .client
            .get(url)
            .query(&[("key", self.config.api_key())])
            .query(query_params)
            .send()
            .await
            .map_err(|source| CatalogError::Network { endpoint, source })?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|source| CatalogError::Network { endpoint, source })?;

        if !status.is_success() {
            let message = upstream_message(&body);
            tracing::debug!(
                endpoint,
                %status,
                upstream_message = %message,
                "catalog API request failed"
            );
            return Err(CatalogError::Upstream {
                endpoint,
                status,
                message,
            });
        }

        let list: ListResponse<T> = serde_json::from_slice(&body)
            .map_err(|source| CatalogError::Decode { endpoint, source })?;

        tracing::trace!(
            endpoint,
            kind = list.kind,
            total_results = list.page_info.as_ref().map(|p| p.total_results),
            has_next_page = list.next_page_token.is_some(),
            "decoded catalog API response"
        );

        Ok(list)
    }

    /// Returns the current most popular music videos.
    ///
    /// Uses the `videos.list` API with `chart=mostPopular`, restricted to the music
    /// category in the configured region. Items are returned in the order the API
    /// ranks them.
    ///
    /// # API Reference
    ///
    /// <https://developers.google.com/youtube/v3/docs/videos/list>
    #[instrument(skip(self))]
    pub async fn most_popular(&self, max_results: u32) -> Result<Vec<Video>, CatalogError> {
        let max_results = max_results.to_string();
        let query_params = [
            ("part", "snippet,statistics"),
            ("chart", "mostPopular"),
            ("videoCategoryId", MUSIC_CATEGORY_ID),
            ("maxResults", max_results.as_str()),
            ("regionCode", self.config.region_code()),
        ];

        let videos = self.fetch::<Video>("videos", &query_params).await?.items;

        tracing::debug!(returned_items = videos.len(), "fetched most popular videos");

        Ok(videos)
    }

    /// Searches the catalog by keyword.
    ///
    /// # Arguments
    ///
    /// * `query` - Free-text search terms
    /// * `max_results` - Upper bound on the number of hits (upstream caps this at 50)
    /// * `kinds` - Which resource kinds to search for. An empty slice leaves the
    ///   choice to upstream.
    ///
    /// Upstream rejects some kind combinations, notably `playlist` mixed with other
    /// kinds. Such requests are sent as-is and fail with [`CatalogError::Upstream`].
    ///
    /// Hits of a kind that was not asked for are dropped, so a playlist-only search
    /// only ever yields [`ResourceId::Playlist`](crate::catalog::ResourceId::Playlist)
    /// ids.
    ///
    /// # API Reference
    ///
    /// <https://developers.google.com/youtube/v3/docs/search/list>
    #[instrument(skip(self))]
    pub async fn search(
        &self,
        query: &str,
        max_results: u32,
        kinds: &[SearchKind],
    ) -> Result<Vec<SearchResult>, CatalogError> {
        let max_results = max_results.to_string();
        let kinds_param = join_kinds(kinds);
        let mut query_params = vec![
            ("part", "snippet"),
            ("q", query),
            ("maxResults", max_results.as_str()),
        ];
        if !kinds.is_empty() {
            query_params.push(("type", kinds_param.as_str()));
        }

        let mut results = self
            .fetch::<SearchResult>("search", &query_params)
            .await?
            .items;

        if !kinds.is_empty() {
            retain_kinds(&mut results, kinds);
        }

        tracing::debug!(returned_items = results.len(), "fetched search results");

        Ok(results)
    }

    /// Searches for playlists only.
    pub async fn search_playlists(
        &self,
        query: &str,
        max_results: u32,
    ) -> Result<Vec<SearchResult>, CatalogError> {
        self.search(query, max_results, &[SearchKind::Playlist]).await
    }

    /// Gets snippet, statistics and content details for a single video.
    ///
    /// # Returns
    ///
    /// * `Ok(Some(video))` - The video exists
    /// * `Ok(None)` - Upstream returned no items for this id
    /// * `Err(_)` - The request failed
    ///
    /// # API Reference
    ///
    /// <https://developers.google.com/youtube/v3/docs/videos/list>
    #[instrument(skip(self))]
    pub async fn video_details(&self, video_id: &str) -> Result<Option<Video>, CatalogError> {
        let query_params = [
            ("part", "snippet,statistics,contentDetails"),
            ("id", video_id),
        ];

        let videos = self.fetch::<Video>("videos", &query_params).await?.items;

        tracing::debug!(
            video_id,
            returned_items = videos.len(),
            "fetched video details"
        );

        Ok(videos.into_iter().next())
    }

    /// Finds videos related to the given one.
    ///
    /// There is no dependable "related videos" endpoint, so this looks up the
    /// video's title and channel name and runs a video search for the two combined.
    /// The video itself is removed from the hits.
    ///
    /// An unknown video has no related videos and yields an empty list. Any failure
    /// along the way is returned as-is; use
    /// [`pages::related_or_empty`](crate::pages::related_or_empty) to degrade to an
    /// empty list instead.
    #[instrument(skip(self))]
    pub async fn related_videos(
        &self,
        video_id: &str,
        max_results: u32,
    ) -> Result<Vec<SearchResult>, CatalogError> {
        let Some(video) = self.video_details(video_id).await? else {
            tracing::debug!(video_id, "no such video, so nothing is related to it");
            return Ok(Vec::new());
        };
        self.related_to(&video, max_results).await
    }

    /// Like [`Self::related_videos`], for a video that has already been looked up.
    pub async fn related_to(
        &self,
        video: &Video,
        max_results: u32,
    ) -> Result<Vec<SearchResult>, CatalogError> {
        let query = format!("{} {}", video.snippet.title, video.snippet.channel_title);
        let mut related = self.search(&query, max_results, &[SearchKind::Video]).await?;
        related.retain(|hit| hit.id.video_id() != Some(video.id.as_str()));
        Ok(related)
    }

    /// Gets snippet, statistics and content details for a single channel.
    ///
    /// Returns `Ok(None)` if upstream has no channel with this id.
    ///
    /// # API Reference
    ///
    /// <https://developers.google.com/youtube/v3/docs/channels/list>
    #[instrument(skip(self))]
    pub async fn channel_details(
        &self,
        channel_id: &str,
    ) -> Result<Option<Channel>, CatalogError> {
        let query_params = [
            ("part", "snippet,statistics,contentDetails"),
            ("id", channel_id),
        ];

        let channels = self
            .fetch::<Channel>("channels", &query_params)
            .await?
            .items;

        tracing::debug!(
            channel_id,
            returned_items = channels.len(),
            "fetched channel details"
        );

        Ok(channels.into_iter().next())
    }

    /// Lists a channel's videos, newest first.
    ///
    /// Upstream is asked for `order=date`, and the hits are additionally sorted by
    /// publish time here so the order holds regardless.
    #[instrument(skip(self))]
    pub async fn channel_videos(
        &self,
        channel_id: &str,
        max_results: u32,
    ) -> Result<Vec<SearchResult>, CatalogError> {
        let max_results = max_results.to_string();
        let query_params = [
            ("part", "snippet"),
            ("channelId", channel_id),
            ("order", "date"),
            ("type", SearchKind::Video.as_str()),
            ("maxResults", max_results.as_str()),
        ];

        let mut videos = self
            .fetch::<SearchResult>("search", &query_params)
            .await?
            .items;
        retain_kinds(&mut videos, &[SearchKind::Video]);
        videos.sort_by(|a, b| b.snippet.published_at.cmp(&a.snippet.published_at));

        tracing::debug!(
            channel_id,
            returned_items = videos.len(),
            "fetched channel videos"
        );

        Ok(videos)
    }

    /// Lists the video categories of the configured region that videos can be
    /// assigned to.
    ///
    /// # API Reference
    ///
    /// <https://developers.google.com/youtube/v3/docs/videoCategories/list>
    #[instrument(skip(self))]
    pub async fn video_categories(&self) -> Result<Vec<VideoCategory>, CatalogError> {
        let query_params = [
            ("part", "snippet"),
            ("regionCode", self.config.region_code()),
        ];

        let mut categories = self
            .fetch::<VideoCategory>("videoCategories", &query_params)
            .await?
            .items;
        categories.retain(|category| category.snippet.assignable);

        tracing::debug!(
            returned_items = categories.len(),
            "fetched assignable video categories"
        );

        Ok(categories)
    }
}

/// Drops hits whose kind is not in `kinds`.
///
/// Upstream does not always honor the `type` parameter.
fn retain_kinds(hits: &mut Vec<SearchResult>, kinds: &[SearchKind]) {
    let before = hits.len();
    hits.retain(|hit| kinds.contains(&hit.id.kind()));
    if hits.len() != before {
        tracing::debug!(
            dropped = before - hits.len(),
            "dropped search hits of unrequested kinds"
        );
    }
}
