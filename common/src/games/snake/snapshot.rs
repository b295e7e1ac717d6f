use super::types::{Direction, GameEndReason, Point};

/// Read-only copy of the game handed to the embedding surface.
#[derive(Clone, Debug, PartialEq)]
pub struct SnakeFrameSnapshot {
    pub grid_size: i32,
    pub snake: Vec<Point>,
    pub food: Point,
    pub direction: Direction,
    pub score: u32,
    pub tick_interval_ms: f64,
    pub tick: u64,
    pub end_reason: Option<GameEndReason>,
}

impl SnakeFrameSnapshot {
    pub fn is_game_over(&self) -> bool {
        self.end_reason.is_some()
    }

    pub fn head(&self) -> Option<Point> {
        self.snake.first().copied()
    }
}
