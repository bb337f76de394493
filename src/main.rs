mod app;
mod battle;
mod config;
mod feed;
mod protocol;
mod render;
mod server;
mod session;

use anyhow::Result;
use tokio::sync::watch;
use tracing::info;

use crate::{
    app::OverlayApp,
    config::OverlayConfig,
    feed::{run_battle_feed, FeedEvent},
    render::render_overlay,
    server::run_overlay_server,
};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let (config, config_path) = OverlayConfig::load_or_create()?;
    info!(
        path = %config_path.display(),
        feed = %config.battle_feed_url,
        variant = ?config.protocol,
        "loaded overlay config"
    );

    let (tx, rx) = crossbeam_channel::unbounded::<FeedEvent>();
    let (snapshot_tx, snapshot_rx) = watch::channel(render_overlay(f64::NAN, false));

    std::thread::spawn(move || OverlayApp::new(snapshot_tx).run(rx));
    tokio::spawn(run_battle_feed(
        config.battle_feed_url.clone(),
        config.protocol,
        tx,
    ));

    run_overlay_server(&config.http_bind, snapshot_rx).await
}
