use super::types::Direction;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyCode {
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    /// Any key without a game binding.
    Other,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TouchPoint {
    pub x: f32,
    pub y: f32,
}

impl TouchPoint {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Raw input as delivered by the host surface.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InputEvent {
    Key(KeyCode),
    TouchStart(TouchPoint),
    TouchMove(TouchPoint),
    TouchEnd,
}

pub fn direction_for_key(key: KeyCode) -> Option<Direction> {
    match key {
        KeyCode::ArrowUp => Some(Direction::Up),
        KeyCode::ArrowDown => Some(Direction::Down),
        KeyCode::ArrowLeft => Some(Direction::Left),
        KeyCode::ArrowRight => Some(Direction::Right),
        KeyCode::Other => None,
    }
}

/// The dominant axis of `current - start` decides the direction; a tie goes
/// to the vertical axis and a zero delta yields nothing.
pub fn swipe_direction(start: TouchPoint, current: TouchPoint) -> Option<Direction> {
    let dx = current.x - start.x;
    let dy = current.y - start.y;

    if dx == 0.0 && dy == 0.0 {
        return None;
    }

    if dx.abs() > dy.abs() {
        Some(if dx > 0.0 { Direction::Right } else { Direction::Left })
    } else {
        Some(if dy > 0.0 { Direction::Down } else { Direction::Up })
    }
}

/// A turn is valid unless it reverses straight into the neck.
pub fn is_valid_turn(current: Direction, candidate: Direction) -> bool {
    candidate != current.opposite()
}

/// Turns keyboard and swipe events into direction requests.
#[derive(Clone, Debug, Default)]
pub struct InputController {
    gesture_start: Option<TouchPoint>,
}

impl InputController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn translate(&mut self, event: InputEvent) -> Option<Direction> {
        match event {
            InputEvent::Key(key) => direction_for_key(key),
            InputEvent::TouchStart(point) => {
                self.gesture_start = Some(point);
                None
            }
            InputEvent::TouchMove(point) => {
                let start = self.gesture_start?;
                swipe_direction(start, point)
            }
            InputEvent::TouchEnd => {
                self.gesture_start = None;
                None
            }
        }
    }

    pub fn cancel_gesture(&mut self) {
        self.gesture_start = None;
    }
}
