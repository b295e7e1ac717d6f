use std::sync::{Arc, Mutex, MutexGuard};

use chrono::Local;
use common::GameOverNotification;
use common::games::snake::SnakeFrameSnapshot;
use ringbuffer::{AllocRingBuffer, RingBuffer};

pub const EVENT_LOG_SIZE: usize = 8;

pub struct FrameState {
    pub snapshot: Option<SnakeFrameSnapshot>,
    pub game_over: Option<GameOverNotification>,
    pub best_score: u32,
    pub event_log: AllocRingBuffer<String>,
}

impl Default for FrameState {
    fn default() -> Self {
        Self {
            snapshot: None,
            game_over: None,
            best_score: 0,
            event_log: AllocRingBuffer::new(EVENT_LOG_SIZE),
        }
    }
}

/// State shared between the session task and the UI thread.
#[derive(Clone, Default)]
pub struct SharedState {
    inner: Arc<Mutex<FrameState>>,
}

impl SharedState {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, FrameState> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn update_snapshot(&self, snapshot: SnakeFrameSnapshot) {
        let mut state = self.lock();
        let previous_score = state.snapshot.as_ref().map(|s| s.score);
        let restarted = state.game_over.is_some() && !snapshot.is_game_over();

        if restarted {
            state.game_over = None;
            push_event(&mut state, "New game".to_string());
        } else if let Some(previous_score) = previous_score
            && snapshot.score > previous_score
        {
            push_event(
                &mut state,
                format!("+{} (speed {:.0}ms)", snapshot.score - previous_score, snapshot.tick_interval_ms),
            );
        }

        state.best_score = state.best_score.max(snapshot.score);
        state.snapshot = Some(snapshot);
    }

    pub fn set_game_over(&self, notification: GameOverNotification) {
        let mut state = self.lock();
        let message = if notification.reason.is_win() {
            format!("Board filled! Final score {}", notification.score)
        } else {
            format!("Game over ({:?}), score {}", notification.reason, notification.score)
        };
        push_event(&mut state, message);
        state.game_over = Some(notification);
    }

    pub fn snapshot(&self) -> Option<SnakeFrameSnapshot> {
        self.lock().snapshot.clone()
    }

    pub fn game_over(&self) -> Option<GameOverNotification> {
        self.lock().game_over.clone()
    }

    pub fn best_score(&self) -> u32 {
        self.lock().best_score
    }

    pub fn events(&self) -> Vec<String> {
        self.lock().event_log.iter().cloned().collect()
    }
}

fn push_event(state: &mut FrameState, message: String) {
    let timestamp = Local::now().format("%H:%M:%S");
    state.event_log.enqueue(format!("[{}] {}", timestamp, message));
}
