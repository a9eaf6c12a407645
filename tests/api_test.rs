mod common;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use serde_json::{Value, json};
use spottransfer::api::AppState;
use spottransfer::config::Config;
use spottransfer::server;
use tower::ServiceExt;

use common::{COOKIE, SpotifyStubBuilder, YtMusicStub, track_item};

fn app(config: Config) -> Router {
    server::router(AppState::new(config))
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

fn post_create(body: String) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/create")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body))
        .unwrap()
}

#[tokio::test]
async fn test_home_and_health() {
    let get = |uri: &str| Request::builder().uri(uri).body(Body::empty()).unwrap();

    let (status, body) = send(app(common::config(None, None)), get("/")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"message": "Server Online"}));

    let (status, body) = send(app(common::config(None, None)), get("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn test_create_requires_playlist_link() {
    for body in [
        json!({"auth_headers": {"cookie": COOKIE}}),
        json!({"playlist_link": "  ", "auth_headers": {"cookie": COOKIE}}),
    ] {
        let (status, response) = send(
            app(common::config(None, None)),
            post_create(body.to_string()),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(response["message"], "Playlist link is required");
    }
}

#[tokio::test]
async fn test_create_requires_auth_headers() {
    for body in [
        json!({"playlist_link": "https://open.spotify.com/playlist/abc"}),
        json!({"playlist_link": "https://open.spotify.com/playlist/abc", "auth_headers": {}}),
        json!({"playlist_link": "https://open.spotify.com/playlist/abc", "auth_headers": ""}),
    ] {
        let (status, response) = send(
            app(common::config(None, None)),
            post_create(body.to_string()),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(response["message"], "Auth headers are required");
    }
}

#[tokio::test]
async fn test_create_rejects_malformed_body() {
    let (status, response) = send(
        app(common::config(None, None)),
        post_create("{not json".to_string()),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(response["message"].as_str().is_some());
}

#[tokio::test]
async fn test_create_rejects_headers_without_sapisid() {
    let body = json!({
        "playlist_link": "https://open.spotify.com/playlist/abc",
        "auth_headers": {"cookie": "SID=1; HSID=2"}
    });

    let (status, _) = send(
        app(common::config(None, None)),
        post_create(body.to_string()),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_create_rejects_non_playlist_link() {
    let body = json!({
        "playlist_link": "https://open.spotify.com/album/abc",
        "auth_headers": {"cookie": COOKIE}
    });

    let (status, _) = send(
        app(common::config(None, None)),
        post_create(body.to_string()),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_create_transfers_playlist() {
    let spotify = SpotifyStubBuilder::new(vec![vec![
        track_item("Song A", "Artist1"),
        track_item("Song B", "Artist2"),
    ]])
    .spawn()
    .await;
    let (ytm, ytm_addr) = YtMusicStub::new(&[("Song A Artist1", "vidA")]).spawn().await;

    let body = json!({
        "playlist_link": "https://open.spotify.com/playlist/stub123",
        "auth_headers": format!("cookie: {}\nx-goog-authuser: 0", COOKIE)
    });

    let (status, response) = send(
        app(common::config(Some(spotify.addr()), Some(ytm_addr))),
        post_create(body.to_string()),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        response,
        json!({
            "message": "Playlist created successfully!",
            "playlist_id": "PLstub",
            "missed_tracks": {"count": 1, "tracks": ["Song B Artist2"]}
        })
    );

    let created = ytm.create_bodies.lock().unwrap()[0].clone();
    assert_eq!(created["title"], "Stub Playlist");
    assert_eq!(created["videoIds"], json!(["vidA"]));
}

#[tokio::test]
async fn test_create_with_no_matches_is_bad_gateway() {
    let spotify = SpotifyStubBuilder::new(vec![vec![track_item("Song B", "Artist2")]])
        .spawn()
        .await;
    let (ytm, ytm_addr) = YtMusicStub::new(&[]).spawn().await;

    let body = json!({
        "playlist_link": "https://open.spotify.com/playlist/stub123",
        "auth_headers": {"cookie": COOKIE}
    });

    let (status, response) = send(
        app(common::config(Some(spotify.addr()), Some(ytm_addr))),
        post_create(body.to_string()),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(response["message"].as_str().is_some());
    assert!(ytm.create_bodies.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_cors_allows_frontend_origin() {
    let mut config = common::config(None, None);
    config.frontend_url = Some("https://frontend.example/".to_string());

    let request = Request::builder()
        .method("OPTIONS")
        .uri("/create")
        .header(header::ORIGIN, "https://frontend.example")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .body(Body::empty())
        .unwrap();

    let response = app(config).oneshot(request).await.unwrap();

    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "https://frontend.example"
    );
}
