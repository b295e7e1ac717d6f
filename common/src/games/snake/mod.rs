mod collision;
mod food;
mod game_state;
mod input;
mod position;
mod settings;
mod snake;
mod snapshot;
mod types;

pub use collision::CollisionPolicy;
pub use food::{FoodSpawner, MAX_SPAWN_ATTEMPTS};
pub use game_state::{INITIAL_DIRECTION, SnakeGameState, TickOutcome, TurnOutcome};
pub use input::{
    InputController, InputEvent, KeyCode, TouchPoint, direction_for_key, is_valid_turn,
    swipe_direction,
};
pub use position::{BoundedStep, clamp, step, step_bounded, wrap, wrap_coordinate};
pub use settings::{
    FLOOR_INTERVAL_MS, FOOD_MOTION_INTERVAL, SCORE_PER_FOOD, SnakeSessionSettings,
    interval_duration,
};
pub use snake::Snake;
pub use snapshot::SnakeFrameSnapshot;
pub use types::{
    BoundaryPolicy, DeathReason, Direction, FoodMotion, FoodPlacement, GameEndReason, Grid, Point,
};
