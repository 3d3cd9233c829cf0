use clap::{Parser, Subcommand};
use eyre::Context;
use reqwest::Url;
use serde::Serialize;
use std::io::IsTerminal;
use std::time::Duration;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;
use tubetune::catalog::{
    CatalogClient, DEFAULT_MAX_RESULTS, DEFAULT_SHORT_LIST_RESULTS, SearchResult, ThumbnailSize,
    Video, format_count,
};
use tubetune::config::{self, CatalogConfig};
use tubetune::pages::{self, MOOD_CHIPS};
use tubetune::playback::{PlaybackState, PlaybackStore};

/// Browse the music catalog from the terminal.
#[derive(Parser, Debug)]
#[command(name = "tubetune")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Catalog API key
    #[arg(long, env = config::API_KEY_VAR, hide_env_values = true)]
    api_key: String,

    /// Catalog API base URL, e.g. https://www.googleapis.com/youtube/v3
    #[arg(long, env = config::BASE_URL_VAR)]
    base_url: Url,

    /// Region for charts and categories
    #[arg(
        long,
        env = config::REGION_VAR,
        default_value = config::DEFAULT_REGION_CODE
    )]
    region: String,

    /// Give up on a request after this many seconds
    #[arg(long, default_value = "30")]
    timeout_secs: u64,

    /// Print the page as JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Quick picks, albums, music videos and community playlists
    Home,
    /// New releases and what's trending
    Explore,
    /// Search videos, channels and playlists
    Search { query: String },
    /// Show a video and what to play after it
    Watch { video_id: String },
    /// Only the videos that would play after this one
    UpNext {
        video_id: String,
        #[arg(short, long, default_value_t = DEFAULT_SHORT_LIST_RESULTS)]
        max: u32,
    },
    /// Show a channel and its latest videos
    Channel { channel_id: String },
    /// Mood shortcuts and music categories
    Moods,
    /// The most popular music videos right now
    Popular {
        #[arg(short, long, default_value_t = DEFAULT_MAX_RESULTS)]
        max: u32,
    },
}

#[tokio::main]
async fn main() -> eyre::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .from_env_lossy(),
        )
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .init();

    let cli = Cli::parse();

    let config = CatalogConfig::try_new(cli.api_key, cli.base_url)
        .context("check catalog settings")?
        .with_region_code(cli.region);
    tracing::debug!(?config, "loaded configuration");

    let http = reqwest::Client::builder()
        .timeout(Duration::from_secs(cli.timeout_secs))
        .build()
        .context("build HTTP client")?;
    let client = CatalogClient::new(config, http);
    let json = cli.json;

    match cli.command {
        Command::Home => {
            let page = pages::home(&client).await.context("load home page")?;
            emit(json, &page, || {
                println!("{}", MOOD_CHIPS.join(" | "));
                print_hits("Quick picks", &page.quick_picks);
                print_hits("Albums", &page.albums);
                print_hits("Music videos", &page.music_videos);
                print_hits("Community playlists", &page.community_playlists);
            })?;
        }
        Command::Explore => {
            let page = pages::explore(&client).await.context("load explore page")?;
            emit(json, &page, || {
                print_hits("New releases", &page.new_releases);
                print_videos("Trending", &page.trending);
            })?;
        }
        Command::Search { query } => {
            let page = pages::search(&client, &query)
                .await
                .with_context(|| format!("search for {query:?}"))?;
            emit(json, &page, || {
                if page.is_empty() {
                    println!("No results for {:?}", page.query);
                    return;
                }
                print_hits("Videos", &page.videos);
                print_hits("Channels", &page.channels);
                print_hits("Playlists", &page.playlists);
            })?;
        }
        Command::Watch { video_id } => {
            let store = PlaybackStore::new();
            let page = pages::watch(&client, &store, &video_id)
                .await
                .with_context(|| format!("load video {video_id}"))?;
            emit(json, &page, || {
                let Some(video) = &page.video else {
                    println!("Video {video_id} not found");
                    return;
                };
                print_video_details(video);
                print_hits("Up next", &page.up_next);
            })?;
            if !json {
                println!();
                println!("{}", player_bar(&store.snapshot()));
            }
        }
        Command::UpNext { video_id, max } => {
            let related = pages::related_or_empty(&client, &video_id, max).await;
            emit(json, &related, || print_hits("Up next", &related))?;
        }
        Command::Channel { channel_id } => {
            let page = pages::channel(&client, &channel_id)
                .await
                .with_context(|| format!("load channel {channel_id}"))?;
            emit(json, &page, || {
                match &page.channel {
                    Some(channel) => {
                        println!("{}", channel.snippet.title);
                        if let Some(custom_url) = &channel.snippet.custom_url {
                            println!("  {custom_url}");
                        }
                        if let Some(stats) = &channel.statistics {
                            println!(
                                "  {} subscribers, {} videos",
                                count_or_hidden(stats.subscriber_count),
                                count_or_hidden(stats.video_count),
                            );
                        }
                    }
                    None => println!("Channel {channel_id} not found"),
                }
                print_hits("Videos", &page.videos);
            })?;
        }
        Command::Moods => {
            let page = pages::moods(&client).await.context("load moods page")?;
            emit(json, &page, || {
                println!("{}", MOOD_CHIPS.join(" | "));
                println!();
                println!("Categories");
                for category in &page.categories {
                    println!("  {:>3}  {}", category.id, category.snippet.title);
                }
            })?;
        }
        Command::Popular { max } => {
            let videos = client
                .most_popular(max)
                .await
                .context("fetch most popular videos")?;
            emit(json, &videos, || print_videos("Most popular", &videos))?;
        }
    }

    Ok(())
}

/// Prints `value` as JSON when asked to, and runs `render` otherwise.
fn emit<T: Serialize>(json: bool, value: &T, render: impl FnOnce()) -> eyre::Result<()> {
    if json {
        let out = serde_json::to_string_pretty(value).context("serialize output as JSON")?;
        println!("{out}");
    } else {
        render();
    }
    Ok(())
}

fn print_hits(heading: &str, hits: &[SearchResult]) {
    println!("{heading}");
    if hits.is_empty() {
        println!("  (nothing)");
    }
    for hit in hits {
        println!(
            "  {:<8} {:<24} {} - {} ({})",
            hit.id.kind().as_str(),
            hit.id.as_str(),
            hit.snippet.title,
            hit.snippet.channel_title,
            hit.snippet.published_year(),
        );
    }
    println!();
}

fn print_videos(heading: &str, videos: &[Video]) {
    println!("{heading}");
    for (rank, video) in videos.iter().enumerate() {
        let views = video
            .statistics
            .as_ref()
            .and_then(|s| s.view_count)
            .map(format_count)
            .unwrap_or_else(|| "-".to_string());
        println!(
            "  {:>2}. {} - {} ({views} views)",
            rank + 1,
            video.snippet.title,
            video.snippet.channel_title,
        );
    }
    println!();
}

fn print_video_details(video: &Video) {
    let snippet = &video.snippet;
    println!("{}", snippet.title);
    println!("  {} ({})", snippet.channel_title, snippet.published_year());
    if let Some(stats) = &video.statistics {
        println!(
            "  {} views, {} likes",
            count_or_hidden(stats.view_count),
            count_or_hidden(stats.like_count),
        );
    }
    if let Some(details) = &video.content_details {
        println!("  duration {}", details.duration);
    }
    println!("  {}", snippet.thumbnails.get(ThumbnailSize::High).url);
    println!();
}

fn count_or_hidden(count: Option<u64>) -> String {
    count.map(format_count).unwrap_or_else(|| "-".to_string())
}

fn player_bar(state: &PlaybackState) -> String {
    match state.selection() {
        None => "[ ] nothing selected".to_string(),
        Some(selection) => {
            let icon = if state.is_playing() { ">" } else { "||" };
            format!(
                "[{icon}] {} - {}",
                selection.snippet.title, selection.snippet.channel_title
            )
        }
    }
}
