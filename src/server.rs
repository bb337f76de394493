use std::net::SocketAddr;

use anyhow::{Context, Result};
use axum::{response::Html, routing::get, Router};
use tokio::net::TcpListener;
use tokio::sync::watch;
use tracing::info;

use crate::render::RenderedOverlay;

pub async fn run_overlay_server(
    bind: &str,
    snapshot_rx: watch::Receiver<RenderedOverlay>,
) -> Result<()> {
    let app = Router::new()
        .route(
            "/",
            get({
                let snapshot_rx = snapshot_rx.clone();
                move || {
                    let snapshot_rx = snapshot_rx.clone();
                    async move { Html(snapshot_rx.borrow().document.clone()) }
                }
            }),
        )
        .route("/health", get(|| async { "ok" }));

    let addr: SocketAddr = bind
        .parse()
        .with_context(|| format!("invalid http bind address: {bind}"))?;
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed binding overlay listener on {addr}"))?;

    info!("overlay page available at http://{addr}/");
    axum::serve(listener, app)
        .await
        .context("axum serve failed")?;
    Ok(())
}
