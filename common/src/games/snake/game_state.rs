use std::time::Duration;

use crate::{debug_log, log};
use crate::games::SessionRng;
use super::collision::CollisionPolicy;
use super::food::FoodSpawner;
use super::input::is_valid_turn;
use super::settings::{SCORE_PER_FOOD, SnakeSessionSettings, interval_duration};
use super::snake::Snake;
use super::snapshot::SnakeFrameSnapshot;
use super::types::{DeathReason, Direction, FoodMotion, GameEndReason, Point};

pub const INITIAL_DIRECTION: Direction = Direction::Right;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TickOutcome {
    /// The game had already ended.
    Ignored,
    Moved,
    Ate { score: u32, tick_interval_ms: f64 },
    Died(DeathReason),
    /// Food was eaten and no free cell is left for the next one.
    Won { score: u32 },
}

impl TickOutcome {
    pub fn ends_game(&self) -> bool {
        matches!(self, TickOutcome::Died(_) | TickOutcome::Won { .. })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TurnOutcome {
    Accepted,
    /// Exact reversal of the current direction.
    Reversal,
    GameOver,
}

#[derive(Clone, Debug)]
pub struct SnakeGameState {
    settings: SnakeSessionSettings,
    collision: CollisionPolicy,
    spawner: FoodSpawner,
    snake: Snake,
    food: Point,
    score: u32,
    tick_interval_ms: f64,
    end_reason: Option<GameEndReason>,
    tick: u64,
    foods_eaten: u32,
}

impl SnakeGameState {
    pub fn new(settings: SnakeSessionSettings, rng: &mut SessionRng) -> Self {
        let snake = Snake::new(settings.initial_position, INITIAL_DIRECTION);
        let spawner = Self::spawner_for(&settings);
        let (food, end_reason) = match spawner.spawn(&snake, rng) {
            Some(food) => (food, None),
            None => (snake.head(), Some(GameEndReason::BoardFilled)),
        };
        Self::assemble(settings, snake, food, end_reason)
    }

    /// Starts from an explicit layout instead of the initial one.
    #[cfg(test)]
    pub(crate) fn from_parts(settings: SnakeSessionSettings, snake: Snake, food: Point) -> Self {
        Self::assemble(settings, snake, food, None)
    }

    fn assemble(
        settings: SnakeSessionSettings,
        snake: Snake,
        food: Point,
        end_reason: Option<GameEndReason>,
    ) -> Self {
        Self {
            collision: CollisionPolicy::new(settings.grid, settings.boundary_policy),
            spawner: Self::spawner_for(&settings),
            tick_interval_ms: settings.initial_tick_interval_ms,
            settings,
            snake,
            food,
            score: 0,
            end_reason,
            tick: 0,
            foods_eaten: 0,
        }
    }

    fn spawner_for(settings: &SnakeSessionSettings) -> FoodSpawner {
        FoodSpawner::new(settings.grid, settings.food_placement, settings.food_motion)
    }

    pub fn settings(&self) -> &SnakeSessionSettings {
        &self.settings
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn food(&self) -> Point {
        self.food
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn direction(&self) -> Direction {
        self.snake.direction()
    }

    pub fn pending_direction(&self) -> Direction {
        self.snake.pending_direction()
    }

    pub fn tick_interval_ms(&self) -> f64 {
        self.tick_interval_ms
    }

    pub fn tick_interval(&self) -> Duration {
        interval_duration(self.tick_interval_ms)
    }

    pub fn is_game_over(&self) -> bool {
        self.end_reason.is_some()
    }

    pub fn end_reason(&self) -> Option<GameEndReason> {
        self.end_reason
    }

    pub fn ticks(&self) -> u64 {
        self.tick
    }

    pub fn foods_eaten(&self) -> u32 {
        self.foods_eaten
    }

    pub fn has_food_motion(&self) -> bool {
        self.spawner.motion() == FoodMotion::RandomWalk
    }

    /// Records `direction` for the next tick unless it reverses the current
    /// heading. Later accepted requests overwrite earlier ones.
    pub fn request_direction(&mut self, direction: Direction) -> TurnOutcome {
        if self.is_game_over() {
            return TurnOutcome::GameOver;
        }
        if !is_valid_turn(self.snake.direction(), direction) {
            return TurnOutcome::Reversal;
        }
        self.snake.set_pending_direction(direction);
        TurnOutcome::Accepted
    }

    /// Advances the game by one cell. A lethal move only flips the game-over
    /// flag; the snake, food, score and direction stay as they were.
    pub fn tick(&mut self, rng: &mut SessionRng) -> TickOutcome {
        if self.is_game_over() {
            return TickOutcome::Ignored;
        }

        self.tick += 1;
        let direction = self.snake.pending_direction();

        let next_head = match self.collision.next_head(&self.snake, direction) {
            Ok(next_head) => next_head,
            Err(reason) => {
                self.end_reason = Some(GameEndReason::Death(reason));
                log!(
                    "Snake died ({:?}) at tick {} with score {}",
                    reason,
                    self.tick,
                    self.score
                );
                return TickOutcome::Died(reason);
            }
        };

        self.snake.commit_direction(direction);
        self.snake.push_head(next_head);

        if next_head != self.food {
            self.snake.pop_tail();
            return TickOutcome::Moved;
        }

        self.score += SCORE_PER_FOOD;
        self.foods_eaten += 1;
        self.tick_interval_ms = self.settings.decayed_interval_ms(self.tick_interval_ms);
        log!(
            "Ate food at ({}, {}). Score: {}, interval: {:.1}ms",
            next_head.x,
            next_head.y,
            self.score,
            self.tick_interval_ms
        );

        match self.spawner.spawn(&self.snake, rng) {
            Some(food) => {
                self.food = food;
                debug_log!("Food spawned at ({}, {})", food.x, food.y);
                TickOutcome::Ate {
                    score: self.score,
                    tick_interval_ms: self.tick_interval_ms,
                }
            }
            None => {
                self.end_reason = Some(GameEndReason::BoardFilled);
                log!("Board filled with score {}", self.score);
                TickOutcome::Won { score: self.score }
            }
        }
    }

    /// One random-walk move of the food. `None` when food is static or the game
    /// has ended.
    pub fn step_food(&mut self, rng: &mut SessionRng) -> Option<Point> {
        if self.is_game_over() || !self.has_food_motion() {
            return None;
        }
        self.food = self.spawner.step(self.food, rng);
        debug_log!("Food wandered to ({}, {})", self.food.x, self.food.y);
        Some(self.food)
    }

    /// Back to the creation state: one segment at the initial position, fresh
    /// food, heading right, zero score, initial interval.
    pub fn reset(&mut self, rng: &mut SessionRng) {
        *self = Self::new(self.settings.clone(), rng);
        log!("Game reset");
    }

    pub fn snapshot(&self) -> SnakeFrameSnapshot {
        SnakeFrameSnapshot {
            grid_size: self.settings.grid.size,
            snake: self.snake.segments().copied().collect(),
            food: self.food,
            direction: self.snake.direction(),
            score: self.score,
            tick_interval_ms: self.tick_interval_ms,
            tick: self.tick,
            end_reason: self.end_reason,
        }
    }
}
