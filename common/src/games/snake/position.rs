use super::types::{BoundaryPolicy, Direction, Grid, Point};

/// Result of moving a point one cell under a boundary policy.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BoundedStep {
    Inside(Point),
    OutOfBounds(Point),
}

pub fn wrap_coordinate(value: i32, size: i32) -> i32 {
    ((value % size) + size) % size
}

pub fn wrap(point: Point, grid: Grid) -> Point {
    Point::new(
        wrap_coordinate(point.x, grid.size),
        wrap_coordinate(point.y, grid.size),
    )
}

pub fn clamp(point: Point, grid: Grid) -> Point {
    let max = grid.size - 1;
    Point::new(point.x.clamp(0, max), point.y.clamp(0, max))
}

/// The raw neighbouring cell, possibly outside the grid.
pub fn step(point: Point, direction: Direction) -> Point {
    point.offset(direction.unit_vector())
}

pub fn step_bounded(point: Point, direction: Direction, grid: Grid, policy: BoundaryPolicy) -> BoundedStep {
    let candidate = step(point, direction);
    match policy {
        BoundaryPolicy::Wrap => BoundedStep::Inside(wrap(candidate, grid)),
        BoundaryPolicy::Lethal if grid.contains(candidate) => BoundedStep::Inside(candidate),
        BoundaryPolicy::Lethal => BoundedStep::OutOfBounds(candidate),
    }
}
