//! Documentation of the marketing-site feedback backend.
//!
//! The SPA frontend (Home, About, Services, Contact) is static and lives in
//! its own container; this service is the only dynamic surface behind it.
//!
//!
//!
//! # General Infrastructure
//! - Static frontend is served separately and calls `/api/feedback`
//! - This service fronts two collaborators: MongoDB for the feedback
//!   documents and an SMTP relay for the owner notification
//! - Containers talk to each other using internal names
//! - SMTP credentials come from a mounted secret, everything else from
//!   environment variables
//!
//!
//!
//! # API
//! - `POST /api/feedback` validates and persists a submission, then fires the
//!   owner notification without awaiting it
//! - `GET /api/feedback` lists every submission newest-first, for admin use
//! - `GET /api/health` is the container liveness probe
//!
//!
//!
//! # Notes
//!
//! ## Notification delivery
//! The email is a courtesy signal, not part of the transaction. The write is
//! durable before the response is produced, and the send runs on a detached
//! task under a bounded timeout. A dead relay shows up in the logs only.

use std::{sync::Arc, time::Duration};

use axum::{
    Router,
    http::{Method, header::CONTENT_TYPE},
    routing::{get, post},
};

use signal::{
    ctrl_c,
    unix::{SignalKind, signal},
};
use tokio::{net::TcpListener, signal};
use tower_http::cors::{Any, CorsLayer};
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

pub mod config;
pub mod error;
pub mod feedback;
pub mod mailer;
pub mod routes;
pub mod state;
pub mod store;

use routes::{health_handler, list_feedback_handler, submit_feedback_handler};
use state::AppState;

pub async fn start_server() {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    info!("Initializing state...");
    let state = AppState::new().await;

    info!("Starting server...");

    let address = format!("0.0.0.0:{}", state.config.port);
    let router = app(state);

    info!("Binding to {address}");

    let listener = TcpListener::bind(&address).await.unwrap();
    info!("Server running on {address}");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .unwrap();

    println!("Server shutting down...");
}

/// Router over the shared state, split out so tests can drive it directly.
pub fn app(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .allow_origin(Any)
        .max_age(Duration::from_secs(60 * 60));

    Router::new()
        .route(
            "/api/feedback",
            post(submit_feedback_handler).get(list_feedback_handler),
        )
        .route("/api/health", get(health_handler))
        .layer(cors)
        .with_state(state)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        ctrl_c().await.expect("Failed to install Ctrl+C handler");

        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        signal(SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;

        info!("Received terminate signal, shutting down");
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
