//! Data loading for each page of the front end.
//!
//! Every loader issues the catalog queries its page needs and hands back a typed
//! page model. Loaders that need several queries run them concurrently and are
//! all-or-nothing: if any query fails, the whole page fails with that error, and no
//! partially-filled page is ever returned as a success.
//!
//! The one deliberate exception is the "up next" list on the watch page, which
//! degrades to an empty list through [`related_or_empty`].

use crate::catalog::{
    CatalogClient, CatalogError, Channel, DEFAULT_MAX_RESULTS, DEFAULT_SHORT_LIST_RESULTS,
    ResourceId, SearchKind, SearchResult, Video, VideoCategory,
};
use crate::playback::PlaybackStore;
use serde::Serialize;
use tracing::instrument;

/// Mood shortcuts shown above the home page.
pub const MOOD_CHIPS: [&str; 10] = [
    "Energize",
    "Relax",
    "Feel good",
    "Party",
    "Workout",
    "Commute",
    "Romance",
    "Sad",
    "Focus",
    "Sleep",
];

#[derive(Debug, Clone, Serialize)]
pub struct HomePage {
    pub quick_picks: Vec<SearchResult>,
    pub albums: Vec<SearchResult>,
    pub music_videos: Vec<SearchResult>,
    pub community_playlists: Vec<SearchResult>,
}

/// Loads the four home page shelves concurrently.
///
/// Songs and playlists are requested separately because upstream rejects
/// `playlist` mixed with other kinds in one search.
#[instrument(skip(client))]
pub async fn home(client: &CatalogClient) -> Result<HomePage, CatalogError> {
    let (quick_picks, albums, music_videos, community_playlists) = tokio::try_join!(
        client.search("global top songs", 16, &[SearchKind::Video]),
        client.search_playlists("popular albums", DEFAULT_SHORT_LIST_RESULTS),
        client.search("popular music videos", 4, &[SearchKind::Video]),
        client.search_playlists("community playlists", DEFAULT_SHORT_LIST_RESULTS),
    )?;

    Ok(HomePage {
        quick_picks,
        albums,
        music_videos,
        community_playlists,
    })
}

#[derive(Debug, Clone, Serialize)]
pub struct ExplorePage {
    pub new_releases: Vec<SearchResult>,
    /// Most popular music videos, in chart order.
    pub trending: Vec<Video>,
}

#[instrument(skip(client))]
pub async fn explore(client: &CatalogClient) -> Result<ExplorePage, CatalogError> {
    let (new_releases, trending) = tokio::try_join!(
        client.search("new music video 2024", 4, &[SearchKind::Video]),
        client.most_popular(DEFAULT_MAX_RESULTS),
    )?;

    Ok(ExplorePage {
        new_releases,
        trending,
    })
}

/// Search hits split up by kind, each in upstream order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SearchPage {
    pub query: String,
    pub videos: Vec<SearchResult>,
    pub channels: Vec<SearchResult>,
    pub playlists: Vec<SearchResult>,
}

impl SearchPage {
    pub fn is_empty(&self) -> bool {
        self.videos.is_empty() && self.channels.is_empty() && self.playlists.is_empty()
    }
}

/// Searches every kind at once.
///
/// A blank query yields an empty page without contacting upstream.
#[instrument(skip(client))]
pub async fn search(client: &CatalogClient, query: &str) -> Result<SearchPage, CatalogError> {
    let query = query.trim();
    let mut page = SearchPage {
        query: query.to_string(),
        ..SearchPage::default()
    };
    if query.is_empty() {
        return Ok(page);
    }

    let hits = client
        .search(
            query,
            DEFAULT_MAX_RESULTS,
            &[SearchKind::Video, SearchKind::Channel, SearchKind::Playlist],
        )
        .await?;
    for hit in hits {
        match hit.id {
            ResourceId::Video(_) => page.videos.push(hit),
            ResourceId::Channel(_) => page.channels.push(hit),
            ResourceId::Playlist(_) => page.playlists.push(hit),
        }
    }

    Ok(page)
}

#[derive(Debug, Clone, Serialize)]
pub struct WatchPage {
    /// `None` if there is no such video.
    pub video: Option<Video>,
    pub up_next: Vec<SearchResult>,
}

/// Loads a video and what to play after it, and selects the video for playback.
///
/// The details lookup must succeed; the "up next" list never fails the page.
#[instrument(skip(client, store))]
pub async fn watch(
    client: &CatalogClient,
    store: &PlaybackStore,
    video_id: &str,
) -> Result<WatchPage, CatalogError> {
    let Some(video) = client.video_details(video_id).await? else {
        return Ok(WatchPage {
            video: None,
            up_next: Vec::new(),
        });
    };

    let up_next = or_empty(
        video_id,
        client.related_to(&video, DEFAULT_SHORT_LIST_RESULTS).await,
    );
    store.select(video.id.clone(), video.snippet.clone());

    Ok(WatchPage {
        video: Some(video),
        up_next,
    })
}

/// [`CatalogClient::related_videos`], with any failure turned into an empty list.
pub async fn related_or_empty(
    client: &CatalogClient,
    video_id: &str,
    max_results: u32,
) -> Vec<SearchResult> {
    let related = client.related_videos(video_id, max_results).await;
    or_empty(video_id, related)
}

fn or_empty(
    video_id: &str,
    related: Result<Vec<SearchResult>, CatalogError>,
) -> Vec<SearchResult> {
    related.unwrap_or_else(|e| {
        tracing::warn!(video_id, error = %e, "failed to fetch related videos");
        Vec::new()
    })
}

#[derive(Debug, Clone, Serialize)]
pub struct ChannelPage {
    /// `None` if there is no such channel.
    pub channel: Option<Channel>,
    /// Newest first.
    pub videos: Vec<SearchResult>,
}

#[instrument(skip(client))]
pub async fn channel(
    client: &CatalogClient,
    channel_id: &str,
) -> Result<ChannelPage, CatalogError> {
    let (channel, videos) = tokio::try_join!(
        client.channel_details(channel_id),
        client.channel_videos(channel_id, DEFAULT_MAX_RESULTS),
    )?;

    Ok(ChannelPage { channel, videos })
}

#[derive(Debug, Clone, Serialize)]
pub struct MoodsPage {
    pub categories: Vec<VideoCategory>,
}

#[instrument(skip(client))]
pub async fn moods(client: &CatalogClient) -> Result<MoodsPage, CatalogError> {
    Ok(MoodsPage {
        categories: client.video_categories().await?,
    })
}
