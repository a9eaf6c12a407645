#![allow(dead_code)]

use std::{
    collections::HashMap,
    net::SocketAddr,
    sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    },
    time::Duration,
};

use axum::{
    Form, Json, Router,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use base64::{Engine, engine::general_purpose::STANDARD};
use serde_json::{Value, json};
use spottransfer::config::Config;
use tokio::net::TcpListener;

pub const CLIENT_ID: &str = "stub-client";
pub const CLIENT_SECRET: &str = "stub-secret";
pub const ACCESS_TOKEN: &str = "stub-token";
pub const PAGE_SIZE: usize = 100;

/// How long slow stub endpoints stall, well past the test timeouts.
pub const STALL: Duration = Duration::from_secs(3);

pub const COOKIE: &str = "PREF=f6=8; __Secure-3PAPISID=abcSAPISID; SID=xyz";

pub async fn bind() -> (TcpListener, SocketAddr) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    (listener, addr)
}

pub fn serve(listener: TcpListener, router: Router) {
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
}

/// Config pointing both catalogs at stub servers.
pub fn config(spotify: Option<SocketAddr>, ytmusic: Option<SocketAddr>) -> Config {
    let mut config = Config::from_lookup(|_| None).unwrap();
    config.spotify_client_id = Some(CLIENT_ID.to_string());
    config.spotify_client_secret = Some(CLIENT_SECRET.to_string());
    if let Some(addr) = spotify {
        config.spotify_api_url = format!("http://{}/v1", addr);
        config.spotify_token_url = format!("http://{}/api/token", addr);
    }
    if let Some(addr) = ytmusic {
        config.ytmusic_api_url = format!("http://{}/youtubei/v1", addr);
    }
    config
}

pub fn track_item(title: &str, artist: &str) -> Value {
    json!({
        "track": {
            "name": title,
            "artists": [{"name": artist}, {"name": "Featured"}],
            "album": {"name": "Album"},
            "is_local": false
        }
    })
}

// Spotify stub

pub struct SpotifyStub {
    pub pages: Vec<Vec<Value>>,
    pub playlist_name: String,
    pub token_status: StatusCode,
    pub failing_page: Option<usize>,
    pub slow_token: bool,
    pub token_calls: AtomicUsize,
    pub page_calls: AtomicUsize,
    addr: SocketAddr,
}

impl SpotifyStub {
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn token_calls(&self) -> usize {
        self.token_calls.load(Ordering::SeqCst)
    }

    pub fn page_calls(&self) -> usize {
        self.page_calls.load(Ordering::SeqCst)
    }
}

pub struct SpotifyStubBuilder {
    pub pages: Vec<Vec<Value>>,
    pub playlist_name: String,
    pub token_status: StatusCode,
    pub failing_page: Option<usize>,
    pub slow_token: bool,
}

impl SpotifyStubBuilder {
    pub fn new(pages: Vec<Vec<Value>>) -> Self {
        SpotifyStubBuilder {
            pages,
            playlist_name: "Stub Playlist".to_string(),
            token_status: StatusCode::OK,
            failing_page: None,
            slow_token: false,
        }
    }

    pub async fn spawn(self) -> Arc<SpotifyStub> {
        let (listener, addr) = bind().await;
        let stub = Arc::new(SpotifyStub {
            pages: self.pages,
            playlist_name: self.playlist_name,
            token_status: self.token_status,
            failing_page: self.failing_page,
            slow_token: self.slow_token,
            token_calls: AtomicUsize::new(0),
            page_calls: AtomicUsize::new(0),
            addr,
        });

        let router = Router::new()
            .route("/api/token", post(spotify_token))
            .route("/v1/playlists/{id}", get(spotify_playlist))
            .route("/v1/playlists/{id}/tracks", get(spotify_tracks))
            .with_state(Arc::clone(&stub));
        serve(listener, router);
        stub
    }
}

/// Pages of generated tracks, numbered across pages, with the given sizes.
pub fn generated_pages(sizes: &[usize]) -> Vec<Vec<Value>> {
    let mut n = 0;
    sizes
        .iter()
        .map(|size| {
            (0..*size)
                .map(|_| {
                    n += 1;
                    track_item(&format!("Track {}", n), &format!("Artist {}", n))
                })
                .collect()
        })
        .collect()
}

async fn spotify_token(
    State(stub): State<Arc<SpotifyStub>>,
    headers: HeaderMap,
    Form(form): Form<HashMap<String, String>>,
) -> Response {
    stub.token_calls.fetch_add(1, Ordering::SeqCst);
    if stub.slow_token {
        tokio::time::sleep(STALL).await;
    }

    let expected = format!(
        "Basic {}",
        STANDARD.encode(format!("{}:{}", CLIENT_ID, CLIENT_SECRET))
    );
    let authorized = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == expected);

    if !authorized
        || form.get("grant_type").map(String::as_str) != Some("client_credentials")
        || stub.token_status != StatusCode::OK
    {
        let status = if stub.token_status == StatusCode::OK {
            StatusCode::BAD_REQUEST
        } else {
            stub.token_status
        };
        return (status, Json(json!({"error": "invalid_client"}))).into_response();
    }

    Json(json!({
        "access_token": ACCESS_TOKEN,
        "token_type": "Bearer",
        "expires_in": 3600
    }))
    .into_response()
}

fn bearer_ok(headers: &HeaderMap) -> bool {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == format!("Bearer {}", ACCESS_TOKEN))
}

async fn spotify_playlist(
    State(stub): State<Arc<SpotifyStub>>,
    Path(_id): Path<String>,
    headers: HeaderMap,
) -> Response {
    if !bearer_ok(&headers) {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    Json(json!({ "name": stub.playlist_name })).into_response()
}

async fn spotify_tracks(
    State(stub): State<Arc<SpotifyStub>>,
    Path(id): Path<String>,
    Query(query): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> Response {
    stub.page_calls.fetch_add(1, Ordering::SeqCst);
    if !bearer_ok(&headers) {
        return StatusCode::UNAUTHORIZED.into_response();
    }

    let offset: usize = query
        .get("offset")
        .and_then(|o| o.parse().ok())
        .unwrap_or(0);
    let index = offset / PAGE_SIZE;

    if stub.failing_page == Some(index) {
        return (StatusCode::INTERNAL_SERVER_ERROR, "boom").into_response();
    }

    let Some(items) = stub.pages.get(index) else {
        return StatusCode::NOT_FOUND.into_response();
    };

    let next = if index + 1 < stub.pages.len() {
        Value::String(format!(
            "http://{}/v1/playlists/{}/tracks?offset={}&limit={}",
            stub.addr,
            id,
            offset + PAGE_SIZE,
            PAGE_SIZE
        ))
    } else {
        Value::Null
    };

    Json(json!({
        "items": items,
        "next": next,
        "total": stub.pages.iter().map(Vec::len).sum::<usize>()
    }))
    .into_response()
}

// YouTube Music stub

#[derive(Default)]
pub struct YtMusicStub {
    pub results: HashMap<String, String>,
    pub failing_queries: Vec<String>,
    pub slow_queries: Vec<String>,
    pub search_headers: Mutex<Vec<HeaderMap>>,
    pub search_bodies: Mutex<Vec<Value>>,
    pub create_bodies: Mutex<Vec<Value>>,
}

impl YtMusicStub {
    pub fn new(results: &[(&str, &str)]) -> Self {
        YtMusicStub {
            results: results
                .iter()
                .map(|(q, id)| (q.to_string(), id.to_string()))
                .collect(),
            ..Default::default()
        }
    }

    pub async fn spawn(self) -> (Arc<YtMusicStub>, SocketAddr) {
        let (listener, addr) = bind().await;
        let stub = Arc::new(self);
        let router = Router::new()
            .route("/youtubei/v1/search", post(ytm_search))
            .route("/youtubei/v1/playlist/create", post(ytm_create))
            .with_state(Arc::clone(&stub));
        serve(listener, router);
        (stub, addr)
    }
}

/// A filtered search response with a single song.
pub fn song_search_response(video_id: &str) -> Value {
    json!({
        "contents": {
            "tabbedSearchResultsRenderer": {
                "tabs": [{
                    "tabRenderer": {
                        "content": {
                            "sectionListRenderer": {
                                "contents": [
                                    {"itemSectionRenderer": {"contents": []}},
                                    {"musicShelfRenderer": {
                                        "contents": [
                                            {"musicResponsiveListItemRenderer": {
                                                "playlistItemData": {"videoId": video_id}
                                            }},
                                            {"musicResponsiveListItemRenderer": {
                                                "playlistItemData": {"videoId": "second"}
                                            }}
                                        ]
                                    }}
                                ]
                            }
                        }
                    }
                }]
            }
        }
    })
}

pub fn empty_search_response() -> Value {
    json!({
        "contents": {
            "tabbedSearchResultsRenderer": {
                "tabs": [{
                    "tabRenderer": {
                        "content": {
                            "sectionListRenderer": {
                                "contents": [
                                    {"itemSectionRenderer": {"contents": [
                                        {"messageRenderer": {"text": {"runs": [{"text": "No results found"}]}}}
                                    ]}}
                                ]
                            }
                        }
                    }
                }]
            }
        }
    })
}

async fn ytm_search(
    State(stub): State<Arc<YtMusicStub>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    stub.search_headers.lock().unwrap().push(headers);
    stub.search_bodies.lock().unwrap().push(body.clone());

    let query = body["query"].as_str().unwrap_or_default().to_string();
    if stub.slow_queries.contains(&query) {
        tokio::time::sleep(STALL).await;
    }
    if stub.failing_queries.contains(&query) {
        return (StatusCode::SERVICE_UNAVAILABLE, "unavailable").into_response();
    }

    match stub.results.get(&query) {
        Some(id) => Json(song_search_response(id)).into_response(),
        None => Json(empty_search_response()).into_response(),
    }
}

async fn ytm_create(State(stub): State<Arc<YtMusicStub>>, Json(body): Json<Value>) -> Response {
    stub.create_bodies.lock().unwrap().push(body);
    Json(json!({ "status": "STATUS_SUCCEEDED", "playlistId": "PLstub" })).into_response()
}
