//! In-process stand-in for the catalog API, plus JSON fixtures for its resources.
//!
//! The stub binds to a random local port, answers each endpoint with a canned body,
//! and records every query it receives so tests can assert on what was asked.

use crate::catalog::{CatalogClient, SearchKind};
use crate::config::CatalogConfig;
use http_body_util::Full;
use hyper::body::{Bytes, Incoming};
use hyper::service::service_fn;
use hyper::{Request, Response};
use hyper_util::rt::TokioIo;
use reqwest::Url;
use serde_json::{Value, json};
use std::convert::Infallible;
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;

pub(crate) const API_KEY: &str = "test-key";

/// A request the stub received.
#[derive(Debug, Clone)]
pub(crate) struct RecordedRequest {
    pub(crate) path: String,
    pub(crate) params: Vec<(String, String)>,
}

impl RecordedRequest {
    pub(crate) fn param(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

#[derive(Debug)]
struct Route {
    endpoint: &'static str,
    /// Only answer requests carrying this query parameter value.
    when: Option<(&'static str, String)>,
    status: u16,
    body: String,
}

#[derive(Debug, Default)]
pub(crate) struct StubBuilder {
    routes: Vec<Route>,
}

impl StubBuilder {
    fn add(
        mut self,
        endpoint: &'static str,
        when: Option<(&'static str, &str)>,
        status: u16,
        body: String,
    ) -> Self {
        self.routes.push(Route {
            endpoint,
            when: when.map(|(k, v)| (k, v.to_string())),
            status,
            body,
        });
        self
    }

    /// Answer every request to `endpoint` with `200` and `body`.
    pub(crate) fn route(self, endpoint: &'static str, body: Value) -> Self {
        self.add(endpoint, None, 200, body.to_string())
    }

    /// Answer requests to `endpoint` whose `param` is `value` with `200` and `body`.
    ///
    /// Takes precedence over a plain [`Self::route`] for the same endpoint.
    pub(crate) fn route_when(
        self,
        endpoint: &'static str,
        (param, value): (&'static str, &str),
        body: Value,
    ) -> Self {
        self.add(endpoint, Some((param, value)), 200, body.to_string())
    }

    pub(crate) fn fail(self, endpoint: &'static str, status: u16, body: Value) -> Self {
        self.add(endpoint, None, status, body.to_string())
    }

    pub(crate) fn fail_when(
        self,
        endpoint: &'static str,
        (param, value): (&'static str, &str),
        status: u16,
        body: Value,
    ) -> Self {
        self.add(endpoint, Some((param, value)), status, body.to_string())
    }

    /// Fail with a body that isn't JSON at all.
    pub(crate) fn fail_raw(self, endpoint: &'static str, status: u16, body: &str) -> Self {
        self.add(endpoint, None, status, body.to_string())
    }

    pub(crate) async fn start(self) -> Stub {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind stub listener");
        let addr = listener.local_addr().expect("stub listener address");
        let routes = Arc::new(self.routes);
        let requests = Arc::new(Mutex::new(Vec::new()));

        let server = tokio::spawn({
            let requests = Arc::clone(&requests);
            async move {
                while let Ok((conn, _)) = listener.accept().await {
                    let routes = Arc::clone(&routes);
                    let requests = Arc::clone(&requests);
                    tokio::spawn(async move {
                        let service = service_fn(move |req: Request<Incoming>| {
                            let response = respond(&routes, &requests, &req);
                            async move { Ok::<_, Infallible>(response) }
                        });
                        let _ = hyper::server::conn::http1::Builder::new()
                            .serve_connection(TokioIo::new(conn), service)
                            .await;
                    });
                }
            }
        });

        Stub {
            base_url: base_url_for(&addr.to_string()),
            requests,
            server,
        }
    }
}

fn respond(
    routes: &[Route],
    requests: &Mutex<Vec<RecordedRequest>>,
    req: &Request<Incoming>,
) -> Response<Full<Bytes>> {
    let recorded = RecordedRequest {
        path: req.uri().path().to_string(),
        params: form_urlencoded::parse(req.uri().query().unwrap_or("").as_bytes())
            .into_owned()
            .collect(),
    };
    let endpoint = recorded.path.rsplit('/').next().unwrap_or_default();

    let candidates: Vec<&Route> = routes
        .iter()
        .filter(|route| route.endpoint == endpoint)
        .collect();
    let route = candidates
        .iter()
        .find(|route| {
            route
                .when
                .as_ref()
                .is_some_and(|(k, v)| recorded.param(k) == Some(v.as_str()))
        })
        .or_else(|| candidates.iter().find(|route| route.when.is_none()));

    let (status, body) = match route {
        Some(route) => (route.status, route.body.clone()),
        None => (
            404,
            error_body(404, &format!("no stub route for {endpoint}")).to_string(),
        ),
    };

    requests
        .lock()
        .expect("stub request log poisoned")
        .push(recorded);

    Response::builder()
        .status(status)
        .header("content-type", "application/json")
        .body(Full::new(Bytes::from(body)))
        .expect("stub response is well-formed")
}

fn base_url_for(authority: &str) -> Url {
    Url::parse(&format!("http://{authority}/youtube/v3")).expect("stub base URL")
}

fn client_for(base_url: Url) -> CatalogClient {
    let http = reqwest::Client::builder()
        .no_proxy()
        .build()
        .expect("build reqwest client");
    CatalogClient::new(CatalogConfig::new(API_KEY, base_url), http)
}

/// A running stub. The server stops when this is dropped.
pub(crate) struct Stub {
    base_url: Url,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    server: tokio::task::JoinHandle<()>,
}

impl Stub {
    pub(crate) fn builder() -> StubBuilder {
        StubBuilder::default()
    }

    /// A client pointed at this stub.
    pub(crate) fn client(&self) -> CatalogClient {
        client_for(self.base_url.clone())
    }

    /// Every request received so far, in arrival order.
    pub(crate) fn requests(&self) -> Vec<RecordedRequest> {
        self.requests
            .lock()
            .expect("stub request log poisoned")
            .clone()
    }
}

impl Drop for Stub {
    fn drop(&mut self) {
        self.server.abort();
    }
}

/// A client whose requests can never connect.
pub(crate) async fn unreachable_client() -> CatalogClient {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind throwaway listener");
    let addr = listener.local_addr().expect("throwaway listener address");
    drop(listener);
    client_for(base_url_for(&addr.to_string()))
}

pub(crate) fn list(items: Vec<Value>) -> Value {
    let count = items.len();
    json!({
        "kind": "youtube#listResponse",
        "etag": "stub-etag",
        "pageInfo": { "totalResults": count, "resultsPerPage": count },
        "items": items,
    })
}

pub(crate) fn error_body(code: u16, message: &str) -> Value {
    json!({ "error": { "code": code, "message": message, "errors": [] } })
}

fn thumbnails(id: &str) -> Value {
    let thumb = |name: &str, width: u32, height: u32| {
        let url = format!("https://i.ytimg.com/vi/{id}/{name}.jpg");
        json!({ "url": url, "width": width, "height": height })
    };
    json!({
        "default": thumb("default", 120, 90),
        "medium": thumb("mqdefault", 320, 180),
        "high": thumb("hqdefault", 480, 360),
    })
}

pub(crate) fn snippet(id: &str, title: &str, channel_title: &str, published_at: &str) -> Value {
    json!({
        "publishedAt": published_at,
        "channelId": format!("UC{}", channel_title.to_lowercase().replace(' ', "")),
        "title": title,
        "description": format!("{title} by {channel_title}"),
        "thumbnails": thumbnails(id),
        "channelTitle": channel_title,
        "liveBroadcastContent": "none",
    })
}

pub(crate) fn video(id: &str, title: &str, channel_title: &str, published_at: &str) -> Value {
    json!({
        "kind": "youtube#video",
        "etag": "stub-etag",
        "id": id,
        "snippet": snippet(id, title, channel_title, published_at),
    })
}

pub(crate) fn search_hit(kind: SearchKind, id: &str, title: &str, published_at: &str) -> Value {
    let id_field = match kind {
        SearchKind::Video => json!({ "kind": "youtube#video", "videoId": id }),
        SearchKind::Channel => json!({ "kind": "youtube#channel", "channelId": id }),
        SearchKind::Playlist => json!({ "kind": "youtube#playlist", "playlistId": id }),
    };
    json!({
        "kind": "youtube#searchResult",
        "etag": "stub-etag",
        "id": id_field,
        "snippet": snippet(id, title, "Stub Channel", published_at),
    })
}

pub(crate) fn channel(id: &str, title: &str, subscriber_count: &str) -> Value {
    json!({
        "kind": "youtube#channel",
        "etag": "stub-etag",
        "id": id,
        "snippet": {
            "title": title,
            "description": format!("Official channel of {title}"),
            "customUrl": format!("@{}", title.to_lowercase().replace(' ', "")),
            "publishedAt": "2010-06-01T12:00:00Z",
            "thumbnails": thumbnails(id),
            "country": "US",
        },
        "statistics": {
            "viewCount": "987654321",
            "subscriberCount": subscriber_count,
            "hiddenSubscriberCount": false,
            "videoCount": "321",
        },
        "contentDetails": {
            "relatedPlaylists": { "likes": "", "uploads": id.replacen("UC", "UU", 1) },
        },
    })
}

pub(crate) fn category(id: &str, title: &str, assignable: bool) -> Value {
    json!({
        "kind": "youtube#videoCategory",
        "etag": "stub-etag",
        "id": id,
        "snippet": {
            "title": title,
            "assignable": assignable,
            "channelId": "UCBR8-60-B28hp2BmDPdntcQ",
        },
    })
}
