//! Syllabus Tracker - submission status dashboard.
//!
//! Serves the tracking dashboard and CRUD screens. All business data lives
//! in a remote spreadsheet-backed store; this binary reaches it over HTTP
//! and keeps a derived in-memory cache that is reloaded wholesale after
//! every mutation.
//!
//! # Architecture
//!
//! - Axum web framework
//! - Askama templates for server-side rendering
//! - Transport-polymorphic store client (HTTP here; embedding hosts can
//!   supply a bridge transport through the library crate)
//! - In-memory sessions (the remote store is the only persistence)

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::{Router, routing::get};
use tower_http::trace::{DefaultOnResponse, OnResponse, TraceLayer};
use tracing::Span;

use syllabus_dashboard::config::DashboardConfig;
use syllabus_dashboard::middleware::create_session_layer;
use syllabus_dashboard::routes;
use syllabus_dashboard::state::AppState;
use syllabus_dashboard::store::{HttpTransport, SyllabusStore};

#[tokio::main]
async fn main() {
    // Load configuration from environment
    let config = DashboardConfig::from_env().expect("Failed to load configuration");

    // Initialize tracing with EnvFilter
    // Defaults to info level for our crate if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "syllabus_dashboard=info,tower_http=debug".into());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    // Store client over the HTTP transport
    let transport = Arc::new(HttpTransport::new(config.store_endpoint.clone()));
    let store = SyllabusStore::new(transport);

    // Session layer (in-memory, SameSite=Strict)
    let session_layer = create_session_layer(&config);

    // Build application state and load the initial record set. A failed
    // initial load is not fatal: the dashboard starts empty and the next
    // successful reload fills it.
    let state = AppState::new(config.clone(), store);
    if let Err(e) = state.refresh().await {
        tracing::warn!(error = %e, "Initial record load failed; starting with an empty cache");
    }

    // Build router
    let app = Router::new()
        .route("/health", get(health))
        .route("/health/ready", get(readiness))
        .merge(routes::routes())
        .layer(session_layer)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &axum::http::Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        uri = %request.uri(),
                        status = tracing::field::Empty,
                        latency_ms = tracing::field::Empty,
                    )
                })
                .on_response(
                    |response: &axum::http::Response<_>,
                     latency: std::time::Duration,
                     span: &Span| {
                        span.record("status", response.status().as_u16());
                        span.record("latency_ms", u64::try_from(latency.as_millis()).unwrap_or(u64::MAX));
                        DefaultOnResponse::default().on_response(response, latency, span);
                    },
                ),
        )
        .with_state(state);

    // Start server
    let addr = config.socket_addr();
    tracing::info!("dashboard listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check dependencies.
async fn health() -> &'static str {
    "ok"
}

/// Readiness health check endpoint.
///
/// Verifies remote store connectivity before returning OK.
/// Returns 503 Service Unavailable if the store is not reachable.
async fn readiness(State(state): State<AppState>) -> StatusCode {
    match state.store().fetch_all().await {
        Ok(_) => StatusCode::OK,
        Err(_) => StatusCode::SERVICE_UNAVAILABLE,
    }
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}
