//! JSON-over-HTTP surface of the catalog.
//!
//! Each route maps onto one [`CatalogService`] operation. Store calls run on
//! tokio's blocking pool; failures become [`ApiError`] responses carrying
//! `{"status": "error", "message": ...}`.

mod error;
mod routes;

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use axum::{
    Router,
    http::{Method, header::CONTENT_TYPE},
    routing::{delete, get, post},
};
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::cors::{Any, CorsLayer};
use tracing::{error, info};

use crate::CatalogService;

pub use error::ApiError;
pub use routes::{AppState, Confirmation};

/// Builds the router with every catalog route and permissive CORS.
pub fn router(service: Arc<CatalogService>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60));

    Router::new()
        .route(
            "/resources",
            get(routes::list_resources).post(routes::create_resource),
        )
        .route(
            "/resources/{res_id}",
            get(routes::get_resource).delete(routes::delete_resource),
        )
        .route(
            "/resources/{res_id}/comments",
            get(routes::list_comments).post(routes::create_comment),
        )
        .route(
            "/resources/comments/{comment_id}",
            delete(routes::delete_comment),
        )
        .route(
            "/resources/{res_id}/likes",
            get(routes::vote_tally)
                .post(routes::set_vote)
                .delete(routes::delete_votes),
        )
        .route(
            "/tags",
            get(routes::list_tags)
                .post(routes::create_tag)
                .delete(routes::delete_tag),
        )
        .route("/users", get(routes::list_users))
        .route(
            "/users/{user_id}/study-list",
            get(routes::list_study_list)
                .post(routes::add_to_study_list)
                .delete(routes::remove_from_study_list),
        )
        // Older clients post to the underscore spelling.
        .route(
            "/users/{user_id}/study_list",
            post(routes::add_to_study_list),
        )
        .layer(cors)
        .with_state(service)
}

/// Serves the catalog on `0.0.0.0:{port}` until Ctrl+C or SIGTERM.
pub async fn serve(service: Arc<CatalogService>, port: u16) -> Result<()> {
    let app = router(service);

    let address = format!("0.0.0.0:{port}");
    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {address}"))?;
    info!("Server is up and running on {address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match signal::ctrl_c().await {
            Ok(()) => info!("Received Ctrl+C, shutting down"),
            Err(e) => {
                error!(error = %e, "Failed to listen for Ctrl+C");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal as unix_signal};

        match unix_signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                error!(error = %e, "Failed to install terminate handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
