use super::position::{BoundedStep, step_bounded};
use super::snake::Snake;
use super::types::{BoundaryPolicy, DeathReason, Direction, Grid, Point};

/// Decides whether the next head cell is survivable. Fixed for one game.
#[derive(Clone, Copy, Debug)]
pub struct CollisionPolicy {
    grid: Grid,
    boundary: BoundaryPolicy,
}

impl CollisionPolicy {
    pub fn new(grid: Grid, boundary: BoundaryPolicy) -> Self {
        Self { grid, boundary }
    }

    /// Computes where the head lands when moving in `direction`, or why that
    /// move kills the snake. The wall check runs before the body check.
    pub fn next_head(&self, snake: &Snake, direction: Direction) -> Result<Point, DeathReason> {
        let next_head = match step_bounded(snake.head(), direction, self.grid, self.boundary) {
            BoundedStep::Inside(point) => point,
            BoundedStep::OutOfBounds(_) => return Err(DeathReason::WallCollision),
        };

        if snake.body_without_head_contains(&next_head) {
            return Err(DeathReason::SelfCollision);
        }

        Ok(next_head)
    }
}
