use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::snake::{Direction, Grid, Point};

/// Seedable randomness for one game session. The same seed replays the same
/// food placements and food walks.
#[derive(Clone, Debug)]
pub struct SessionRng {
    rng: StdRng,
    seed: u64,
}

impl SessionRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            seed,
        }
    }

    pub fn from_random() -> Self {
        let seed: u64 = rand::rng().random();
        Self::new(seed)
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn random_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distr::uniform::SampleUniform,
        R: rand::distr::uniform::SampleRange<T>,
    {
        self.rng.random_range(range)
    }

    pub fn random_cell(&mut self, grid: Grid) -> Point {
        let x = self.random_range(0..grid.size);
        let y = self.random_range(0..grid.size);
        Point::new(x, y)
    }

    pub fn random_direction(&mut self) -> Direction {
        Direction::ALL[self.random_range(0..Direction::ALL.len())]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_cells() {
        let grid = Grid::new(20);
        let mut a = SessionRng::new(7);
        let mut b = SessionRng::new(7);
        for _ in 0..50 {
            assert_eq!(a.random_cell(grid), b.random_cell(grid));
        }
    }

    #[test]
    fn test_random_cell_stays_on_grid() {
        let grid = Grid::new(3);
        let mut rng = SessionRng::new(1);
        for _ in 0..200 {
            assert!(grid.contains(rng.random_cell(grid)));
        }
    }
}
