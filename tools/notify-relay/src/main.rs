//! Notification relay for the grievance portal
//!
//! Accepts portal notification requests on POST `/`, formats the chat
//! message, and forwards it to the webhook named by `WEBHOOK_URL`. The
//! upstream status and body are relayed back verbatim.

use std::net::SocketAddr;

use axum::extract::State;
use axum::http::{header, Method, StatusCode};
use axum::routing::post;
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use portal_net::RelayRequest;

#[derive(Clone)]
struct AppState {
    client: reqwest::Client,
    webhook_url: Option<String>,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "notify_relay=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8787);

    let webhook_url = std::env::var("WEBHOOK_URL")
        .ok()
        .filter(|v| !v.trim().is_empty());
    if webhook_url.is_none() {
        warn!("WEBHOOK_URL is not set; relay requests will be refused");
    }

    let state = AppState {
        client: reqwest::Client::new(),
        webhook_url,
    };

    // Browser clients call this cross-origin; preflights are answered
    // here, and anything other than POST falls through to a 405.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    let app = Router::new()
        .route("/", post(relay))
        .with_state(state)
        .layer(cors);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!("listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}

async fn relay(State(state): State<AppState>, body: String) -> (StatusCode, String) {
    let request: RelayRequest = match serde_json::from_str(&body) {
        Ok(request) => request,
        Err(e) => return (StatusCode::BAD_REQUEST, format!("Bad Request: {}", e)),
    };

    let webhook_url = match &state.webhook_url {
        Some(url) => url,
        None => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Missing webhook".to_string(),
            )
        }
    };

    info!(kind = request.kind.as_str(), "relaying notification");

    let payload = request.webhook_payload();
    match state.client.post(webhook_url).json(&payload).send().await {
        Ok(upstream) => {
            let status = StatusCode::from_u16(upstream.status().as_u16())
                .unwrap_or(StatusCode::BAD_GATEWAY);
            let text = upstream.text().await.unwrap_or_default();
            let body = if text.is_empty() {
                "ok".to_string()
            } else {
                text
            };
            (status, body)
        }
        Err(e) => {
            error!("webhook call failed: {}", e);
            (
                StatusCode::BAD_GATEWAY,
                format!("Webhook call failed: {}", e),
            )
        }
    }
}
