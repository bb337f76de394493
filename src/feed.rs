use crossbeam_channel::Sender;
use futures_util::{SinkExt, StreamExt};
use tokio_tungstenite::{connect_async, tungstenite::Message};
use tracing::{error, info, warn};

use crate::{battle::BattleResult, protocol::ProtocolVariant};

#[derive(Debug, Clone)]
pub enum FeedEvent {
    Results(Vec<BattleResult>),
    Disconnected,
}

// One connection attempt for the lifetime of the process. Clean close,
// transport error, and connect failure all funnel into the same terminal
// Disconnected event; the feed is never reopened.
pub async fn run_battle_feed(url: String, variant: ProtocolVariant, tx: Sender<FeedEvent>) {
    let (mut stream, _response) = match connect_async(&url).await {
        Ok(ok) => ok,
        Err(err) => {
            error!(?err, %url, "failed connecting to battle feed");
            let _ = tx.send(FeedEvent::Disconnected);
            return;
        }
    };
    info!(%url, "connected to battle feed");

    for frame in variant.handshake_frames() {
        if let Err(err) = stream.send(Message::Text(frame)).await {
            error!(?err, "failed sending battle feed handshake");
            let _ = tx.send(FeedEvent::Disconnected);
            return;
        }
    }

    while let Some(next) = stream.next().await {
        match next {
            Ok(Message::Text(text)) => match variant.decode_frame(&text) {
                Ok(results) => {
                    if results.is_empty() {
                        continue;
                    }
                    if tx.send(FeedEvent::Results(results)).is_err() {
                        warn!("overlay receiver dropped; shutting down battle feed");
                        return;
                    }
                }
                // Fatal for this frame only; the next frame decodes independently.
                Err(err) => warn!(?err, payload = %text, "dropped undecodable frame"),
            },
            Ok(Message::Close(_)) => break,
            Ok(_) => {}
            Err(err) => {
                error!(?err, "battle feed read error");
                break;
            }
        }
    }

    warn!("battle feed disconnected");
    let _ = tx.send(FeedEvent::Disconnected);
}
