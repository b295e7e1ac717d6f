use common::SessionCommandSender;
use common::games::snake::{InputEvent, KeyCode, TouchPoint};
use common::{debug_log, log};
use eframe::egui;

const ARROW_KEYS: [(egui::Key, KeyCode); 4] = [
    (egui::Key::ArrowUp, KeyCode::ArrowUp),
    (egui::Key::ArrowDown, KeyCode::ArrowDown),
    (egui::Key::ArrowLeft, KeyCode::ArrowLeft),
    (egui::Key::ArrowRight, KeyCode::ArrowRight),
];

/// Forwards raw keyboard and pointer input to one session. Created once per
/// session and reused every frame, so each physical event is sent once.
pub struct InputBindings {
    commands: SessionCommandSender,
    disconnected: bool,
}

impl InputBindings {
    pub fn new(commands: SessionCommandSender) -> Self {
        Self {
            commands,
            disconnected: false,
        }
    }

    /// Keys go through unfiltered; the session ignores unbound ones.
    pub fn collect_keys(&self, ctx: &egui::Context) -> Vec<InputEvent> {
        ctx.input(|i| {
            ARROW_KEYS
                .iter()
                .filter(|(key, _)| i.key_pressed(*key))
                .map(|(_, code)| InputEvent::Key(*code))
                .collect()
        })
    }

    /// Maps a drag on the board to the touch start/move/end sequence.
    pub fn collect_swipe(&self, response: &egui::Response) -> Vec<InputEvent> {
        let mut events = Vec::new();
        let position = response.interact_pointer_pos();

        if response.drag_started()
            && let Some(pos) = position
        {
            events.push(InputEvent::TouchStart(TouchPoint::new(pos.x, pos.y)));
        } else if response.dragged()
            && let Some(pos) = position
        {
            events.push(InputEvent::TouchMove(TouchPoint::new(pos.x, pos.y)));
        }

        if response.drag_stopped() {
            events.push(InputEvent::TouchEnd);
        }
        events
    }

    pub fn dispatch(&mut self, events: Vec<InputEvent>) {
        if self.disconnected {
            return;
        }
        for event in events {
            debug_log!("Input: {:?}", event);
            if let Err(e) = self.commands.input(event) {
                log!("Dropping input, {}", e);
                self.disconnected = true;
                return;
            }
        }
    }

    pub fn request_reset(&mut self) {
        if let Err(e) = self.commands.reset() {
            log!("Reset failed: {}", e);
            self.disconnected = true;
        }
    }

    pub fn is_disconnected(&self) -> bool {
        self.disconnected || self.commands.is_closed()
    }
}
