use std::time::Duration;

use crate::config::{GameConfig, Validate};
use super::types::{BoundaryPolicy, FoodMotion, FoodPlacement, Grid, Point};

pub const SCORE_PER_FOOD: u32 = 100;
pub const FLOOR_INTERVAL_MS: f64 = 50.0;
/// Food wanders on its own schedule, independent of the tick interval.
pub const FOOD_MOTION_INTERVAL: Duration = Duration::from_millis(1000);

/// Engine-side view of a validated `GameConfig`. Only built through
/// `TryFrom<&GameConfig>`, so the grid is never degenerate.
#[derive(Clone, Debug, PartialEq)]
pub struct SnakeSessionSettings {
    pub(crate) grid: Grid,
    pub(crate) boundary_policy: BoundaryPolicy,
    pub(crate) food_placement: FoodPlacement,
    pub(crate) food_motion: FoodMotion,
    pub(crate) initial_position: Point,
    pub(crate) initial_tick_interval_ms: f64,
    pub(crate) decay_factor: f64,
}

impl TryFrom<&GameConfig> for SnakeSessionSettings {
    type Error = String;

    fn try_from(config: &GameConfig) -> Result<Self, Self::Error> {
        config.validate()?;
        Ok(Self::from_valid(config))
    }
}

impl Default for SnakeSessionSettings {
    fn default() -> Self {
        Self::from_valid(&GameConfig::default())
    }
}

impl SnakeSessionSettings {
    fn from_valid(config: &GameConfig) -> Self {
        let grid = Grid::new(config.grid_size as i32);
        Self {
            grid,
            boundary_policy: config.boundary_policy,
            food_placement: config.food_placement,
            food_motion: config.food_motion,
            initial_position: config.initial_position.unwrap_or_else(|| grid.center()),
            initial_tick_interval_ms: config.initial_tick_interval_ms as f64,
            decay_factor: config.decay_factor,
        }
    }

    pub fn grid(&self) -> Grid {
        self.grid
    }

    pub fn boundary_policy(&self) -> BoundaryPolicy {
        self.boundary_policy
    }

    pub fn food_placement(&self) -> FoodPlacement {
        self.food_placement
    }

    pub fn food_motion(&self) -> FoodMotion {
        self.food_motion
    }

    /// `max(FLOOR_INTERVAL_MS, interval * decay)`.
    pub fn decayed_interval_ms(&self, interval_ms: f64) -> f64 {
        (interval_ms * self.decay_factor).max(FLOOR_INTERVAL_MS)
    }
}

/// Converts a tick interval in (possibly fractional) milliseconds to a timer period.
pub fn interval_duration(interval_ms: f64) -> Duration {
    Duration::from_secs_f64(interval_ms.max(1.0) / 1000.0)
}
