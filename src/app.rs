use crossbeam_channel::Receiver;
use tokio::sync::watch;
use tracing::{info, warn};

use crate::{
    feed::FeedEvent,
    render::{render_overlay, RenderedOverlay},
    session::{BattleOutcome, SessionCounters},
};

pub struct OverlayApp {
    counters: SessionCounters,
    disconnected: bool,
    snapshot_tx: watch::Sender<RenderedOverlay>,
}

impl OverlayApp {
    pub fn new(snapshot_tx: watch::Sender<RenderedOverlay>) -> Self {
        let app = Self {
            counters: SessionCounters::default(),
            disconnected: false,
            snapshot_tx,
        };
        app.publish();
        app
    }

    // Single-consumer drain loop; all session state is mutated here and
    // nowhere else. Ends once every feed sender has dropped.
    pub fn run(mut self, rx: Receiver<FeedEvent>) {
        while let Ok(event) = rx.recv() {
            self.handle_event(event);
        }
        info!("battle feed channel closed; overlay loop exiting");
    }

    pub fn handle_event(&mut self, event: FeedEvent) {
        match event {
            FeedEvent::Results(results) => {
                for result in results {
                    let Some(outcome) = self.counters.record_result(&result) else {
                        continue;
                    };
                    match outcome {
                        BattleOutcome::Victory => info!(
                            victories = self.counters.victories(),
                            defeats = self.counters.defeats(),
                            "recorded victory"
                        ),
                        BattleOutcome::Defeat => info!(
                            victories = self.counters.victories(),
                            defeats = self.counters.defeats(),
                            "recorded defeat"
                        ),
                    }
                    self.publish();
                }
            }
            FeedEvent::Disconnected => {
                // One-way transition; nothing ever clears it.
                warn!("battle feed lost; overlay stays disconnected until restart");
                self.disconnected = true;
                self.publish();
            }
        }
    }

    fn publish(&self) {
        let snapshot = render_overlay(self.counters.win_rate(), self.disconnected);
        self.snapshot_tx.send_replace(snapshot);
    }
}
