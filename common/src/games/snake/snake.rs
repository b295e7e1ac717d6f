use std::collections::{HashSet, VecDeque};

use super::types::{Direction, Point};

/// Body ordered head (front) to tail (back); never empty.
#[derive(Clone, Debug)]
pub struct Snake {
    body: VecDeque<Point>,
    body_set: HashSet<Point>,
    direction: Direction,
    pending_direction: Direction,
}

impl Snake {
    pub fn new(start_pos: Point, direction: Direction) -> Self {
        Self {
            body: VecDeque::from([start_pos]),
            body_set: HashSet::from([start_pos]),
            direction,
            pending_direction: direction,
        }
    }

    /// Builds a snake from explicit segments, head first. Returns `None` for an
    /// empty body or one that overlaps itself.
    pub fn from_segments(segments: &[Point], direction: Direction) -> Option<Self> {
        if segments.is_empty() {
            return None;
        }
        let body: VecDeque<Point> = segments.iter().copied().collect();
        let body_set: HashSet<Point> = segments.iter().copied().collect();
        if body_set.len() != body.len() {
            return None;
        }
        Some(Self {
            body,
            body_set,
            direction,
            pending_direction: direction,
        })
    }

    pub fn head(&self) -> Point {
        *self.body.front().expect("Snake body should never be empty")
    }

    pub fn tail(&self) -> Point {
        *self.body.back().expect("Snake body should never be empty")
    }

    /// Direction applied by the last surviving tick.
    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn pending_direction(&self) -> Direction {
        self.pending_direction
    }

    pub(crate) fn set_pending_direction(&mut self, direction: Direction) {
        self.pending_direction = direction;
    }

    pub(crate) fn commit_direction(&mut self, direction: Direction) {
        self.direction = direction;
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn segments(&self) -> impl ExactSizeIterator<Item = &Point> {
        self.body.iter()
    }

    pub fn contains(&self, point: &Point) -> bool {
        self.body_set.contains(point)
    }

    /// True when `point` is any segment other than the head.
    pub fn body_without_head_contains(&self, point: &Point) -> bool {
        self.body_set.contains(point) && *point != self.head()
    }

    pub(crate) fn push_head(&mut self, point: Point) {
        self.body.push_front(point);
        self.body_set.insert(point);
    }

    pub(crate) fn pop_tail(&mut self) -> Option<Point> {
        if self.body.len() <= 1 {
            return None;
        }
        let tail = self.body.pop_back()?;
        self.body_set.remove(&tail);
        Some(tail)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_segments_rejects_overlap_and_empty() {
        assert!(Snake::from_segments(&[], Direction::Right).is_none());
        assert!(
            Snake::from_segments(&[Point::new(1, 1), Point::new(1, 1)], Direction::Right).is_none()
        );
        let snake = Snake::from_segments(&[Point::new(5, 5), Point::new(4, 5)], Direction::Right)
            .expect("valid body");
        assert_eq!(snake.head(), Point::new(5, 5));
        assert_eq!(snake.tail(), Point::new(4, 5));
    }

    #[test]
    fn test_body_without_head_contains_excludes_head() {
        let snake = Snake::from_segments(
            &[Point::new(2, 2), Point::new(1, 2), Point::new(0, 2)],
            Direction::Right,
        )
        .expect("valid body");
        assert!(!snake.body_without_head_contains(&Point::new(2, 2)));
        assert!(snake.body_without_head_contains(&Point::new(1, 2)));
        assert!(snake.body_without_head_contains(&Point::new(0, 2)));
    }

    #[test]
    fn test_pending_direction_is_committed_separately() {
        let mut snake = Snake::new(Point::new(3, 3), Direction::Up);
        snake.set_pending_direction(Direction::Left);
        assert_eq!(snake.direction(), Direction::Up);
        assert_eq!(snake.pending_direction(), Direction::Left);

        snake.commit_direction(Direction::Left);
        assert_eq!(snake.direction(), Direction::Left);
    }

    #[test]
    fn test_pop_tail_never_empties_body() {
        let mut snake = Snake::new(Point::new(3, 3), Direction::Up);
        assert_eq!(snake.pop_tail(), None);
        assert_eq!(snake.len(), 1);
    }
}
