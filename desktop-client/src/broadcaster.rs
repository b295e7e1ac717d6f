use common::games::snake::SnakeFrameSnapshot;
use common::{GameBroadcaster, GameOverNotification};

use crate::state::SharedState;

/// Publishes session output into the UI's shared state and wakes the UI.
#[derive(Clone)]
pub struct LocalBroadcaster {
    shared_state: SharedState,
    repaint: egui::Context,
}

impl LocalBroadcaster {
    pub fn new(shared_state: SharedState, repaint: egui::Context) -> Self {
        Self {
            shared_state,
            repaint,
        }
    }
}

impl GameBroadcaster for LocalBroadcaster {
    async fn broadcast_state(&self, snapshot: SnakeFrameSnapshot) {
        self.shared_state.update_snapshot(snapshot);
        self.repaint.request_repaint();
    }

    async fn broadcast_game_over(&self, notification: GameOverNotification) {
        self.shared_state.set_game_over(notification);
        self.repaint.request_repaint();
    }
}
