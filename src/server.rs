use axum::{
    Router,
    http::{HeaderValue, Method},
    routing::{get, post},
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{
    api::{self, AppState},
    config::Config,
};

/// Builds the application router.
pub fn router(state: AppState) -> Router {
    let cors = cors_layer(&state.config);

    Router::new()
        .route("/", get(api::home))
        .route("/health", get(api::health))
        .route("/create", post(api::create))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// CORS limited to `FRONTEND_URL` when configured, any origin otherwise.
fn cors_layer(config: &Config) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any);

    match config
        .frontend_url
        .as_deref()
        .and_then(|url| HeaderValue::from_str(url.trim_end_matches('/')).ok())
    {
        Some(origin) => layer.allow_origin(origin),
        None => {
            tracing::warn!("FRONTEND_URL not set or invalid, allowing any origin");
            layer.allow_origin(Any)
        }
    }
}

pub async fn start_api_server(config: Config) -> std::io::Result<()> {
    let addr = config.server_addr;
    let app = router(AppState::new(config));

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await
}
