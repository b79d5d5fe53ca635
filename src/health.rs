//! Liveness endpoint for container orchestration. Answers 200 on the health
//! path and falls through to 404 everywhere else.

use axum::{Router, http::StatusCode, routing::get};
use tracing::info;

use crate::errors::Error;

pub fn router() -> Router {
    Router::new().route("/healthz", get(healthz))
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}

/// Bind and serve the liveness router; runs until the process exits.
pub async fn serve(port: u16) -> Result<(), Error> {
    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("health endpoint on http://{addr}/healthz");
    axum::serve(listener, router()).await?;
    Ok(())
}
