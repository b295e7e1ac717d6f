use crate::debug_log;
use crate::games::SessionRng;
use super::position;
use super::snake::Snake;
use super::types::{FoodMotion, FoodPlacement, Grid, Point};

/// Random draws tried before falling back to a scan for a free cell.
pub const MAX_SPAWN_ATTEMPTS: usize = 100;

#[derive(Clone, Copy, Debug)]
pub struct FoodSpawner {
    grid: Grid,
    placement: FoodPlacement,
    motion: FoodMotion,
}

impl FoodSpawner {
    pub fn new(grid: Grid, placement: FoodPlacement, motion: FoodMotion) -> Self {
        Self {
            grid,
            placement,
            motion,
        }
    }

    pub fn motion(&self) -> FoodMotion {
        self.motion
    }

    /// Picks a cell for new food. `None` means the snake covers the whole grid,
    /// which can only happen with `FoodPlacement::AvoidSnake`.
    pub fn spawn(&self, snake: &Snake, rng: &mut SessionRng) -> Option<Point> {
        match self.placement {
            FoodPlacement::NoAvoid => Some(rng.random_cell(self.grid)),
            FoodPlacement::AvoidSnake => self.spawn_avoiding(snake, rng),
        }
    }

    fn spawn_avoiding(&self, snake: &Snake, rng: &mut SessionRng) -> Option<Point> {
        if snake.len() >= self.grid.cell_count() {
            return None;
        }

        for _ in 0..MAX_SPAWN_ATTEMPTS {
            let pos = rng.random_cell(self.grid);
            if !snake.contains(&pos) {
                return Some(pos);
            }
        }

        debug_log!(
            "Food resampling gave up after {} attempts, scanning for a free cell",
            MAX_SPAWN_ATTEMPTS
        );
        self.grid.cells().find(|cell| !snake.contains(cell))
    }

    /// One random-walk move: a uniformly chosen unit step, clamped to the grid.
    pub fn step(&self, food: Point, rng: &mut SessionRng) -> Point {
        let direction = rng.random_direction();
        position::clamp(position::step(food, direction), self.grid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::super::types::Direction;

    fn spawner(size: i32, placement: FoodPlacement) -> FoodSpawner {
        FoodSpawner::new(Grid::new(size), placement, FoodMotion::Static)
    }

    /// Fills the grid row by row in a zig-zag, leaving the last `free` cells empty.
    fn serpentine(size: i32, free: usize) -> Snake {
        let mut cells: Vec<Point> = Vec::new();
        for y in 0..size {
            if y % 2 == 0 {
                cells.extend((0..size).map(|x| Point::new(x, y)));
            } else {
                cells.extend((0..size).rev().map(|x| Point::new(x, y)));
            }
        }
        cells.truncate(cells.len() - free);
        cells.reverse();
        Snake::from_segments(&cells, Direction::Left).expect("valid body")
    }

    #[test]
    fn test_avoiding_spawn_never_lands_on_snake() {
        let spawner = spawner(10, FoodPlacement::AvoidSnake);
        let mut rng = SessionRng::new(3);
        for free in [1usize, 2, 5, 30, 99] {
            let snake = serpentine(10, free);
            for _ in 0..20 {
                let food = spawner.spawn(&snake, &mut rng).expect("free cell exists");
                assert!(!snake.contains(&food));
                assert!(Grid::new(10).contains(food));
            }
        }
    }

    #[test]
    fn test_avoiding_spawn_finds_single_free_cell() {
        let spawner = spawner(4, FoodPlacement::AvoidSnake);
        let snake = serpentine(4, 1);
        let free_cell = Grid::new(4)
            .cells()
            .find(|c| !snake.contains(c))
            .expect("one cell left");
        let mut rng = SessionRng::new(11);
        assert_eq!(spawner.spawn(&snake, &mut rng), Some(free_cell));
    }

    #[test]
    fn test_avoiding_spawn_on_full_grid_is_none() {
        let spawner = spawner(3, FoodPlacement::AvoidSnake);
        let snake = serpentine(3, 0);
        let mut rng = SessionRng::new(5);
        assert_eq!(spawner.spawn(&snake, &mut rng), None);
    }

    #[test]
    fn test_no_avoid_spawn_always_returns_cell() {
        let spawner = spawner(3, FoodPlacement::NoAvoid);
        let snake = serpentine(3, 0);
        let mut rng = SessionRng::new(5);
        let food = spawner.spawn(&snake, &mut rng).expect("no-avoid always places food");
        assert!(snake.contains(&food));
    }

    #[test]
    fn test_random_walk_moves_one_cell_and_clamps() {
        let grid = Grid::new(10);
        let spawner = FoodSpawner::new(grid, FoodPlacement::AvoidSnake, FoodMotion::RandomWalk);
        let mut rng = SessionRng::new(21);
        let mut food = Point::new(0, 0);
        for _ in 0..500 {
            let next = spawner.step(food, &mut rng);
            assert!(grid.contains(next));
            let distance = (next.x - food.x).abs() + (next.y - food.y).abs();
            assert!(distance <= 1);
            food = next;
        }
    }
}
