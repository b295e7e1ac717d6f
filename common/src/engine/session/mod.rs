mod snake_session;

use std::future::Future;

use crate::games::snake::{GameEndReason, SnakeFrameSnapshot};

pub use snake_session::{
    SessionCommand, SessionCommandSender, SessionHandle, SessionSummary, SnakeSession,
};

/// Receives everything the embedding surface displays.
pub trait GameBroadcaster: Send + Sync + Clone + 'static {
    fn broadcast_state(&self, snapshot: SnakeFrameSnapshot) -> impl Future<Output = ()> + Send;

    fn broadcast_game_over(
        &self,
        notification: GameOverNotification,
    ) -> impl Future<Output = ()> + Send;
}

#[derive(Debug, Clone, PartialEq)]
pub struct GameOverNotification {
    pub score: u32,
    pub reason: GameEndReason,
    pub ticks: u64,
    pub foods_eaten: u32,
}
