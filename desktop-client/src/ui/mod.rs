mod board;
mod input_bindings;

use common::SessionHandle;
use common::games::snake::GameEndReason;
use eframe::egui;

use crate::config::Config;
use crate::state::SharedState;
use board::render_board;
use input_bindings::InputBindings;

pub struct FrameApp {
    shared_state: SharedState,
    config: Config,
    bindings: InputBindings,
    preset_name: String,
    // Dropped with the app, which cancels the session.
    _session: SessionHandle,
}

impl FrameApp {
    pub fn new(
        session: SessionHandle,
        shared_state: SharedState,
        config: Config,
        preset_name: String,
    ) -> Self {
        Self {
            bindings: InputBindings::new(session.commands()),
            shared_state,
            config,
            preset_name,
            _session: session,
        }
    }

    fn render_header(&self, ui: &mut egui::Ui, score: u32, tick_interval_ms: f64) {
        ui.horizontal(|ui| {
            ui.heading(format!("Score: {}", score));
            ui.add_space(20.0);
            ui.label(format!("Best: {}", self.shared_state.best_score()));
            ui.add_space(20.0);
            ui.label(format!("Speed: {:.0}ms", tick_interval_ms));
            ui.add_space(20.0);
            ui.label(&self.preset_name);
            if self.config.frame.added_to_client {
                ui.add_space(20.0);
                ui.small("Saved to client");
            }
        });
    }

    fn render_footer(&mut self, ui: &mut egui::Ui) {
        if let Some(game_over) = self.shared_state.game_over() {
            let (text, color) = match game_over.reason {
                GameEndReason::BoardFilled => ("Board filled, you win!", egui::Color32::GREEN),
                GameEndReason::Death(_) => ("Game Over", egui::Color32::RED),
            };
            ui.label(egui::RichText::new(text).color(color).size(24.0));
            ui.label(format!(
                "Score {} after {} ticks, {} food eaten",
                game_over.score, game_over.ticks, game_over.foods_eaten
            ));
            if ui.button("Play again").clicked() {
                self.bindings.request_reset();
            }
        } else {
            ui.label("Arrow keys or swipe on the board to steer");
        }

        if self.bindings.is_disconnected() {
            ui.colored_label(egui::Color32::YELLOW, "Session is no longer running");
        }

        ui.add_space(8.0);
        for event in self.shared_state.events().iter().rev() {
            ui.small(event);
        }
    }
}

impl eframe::App for FrameApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let mut events = self.bindings.collect_keys(ctx);
        if self.shared_state.game_over().is_some()
            && ctx.input(|i| i.key_pressed(egui::Key::Space))
        {
            self.bindings.request_reset();
        }

        let insets = self.config.frame.safe_area;
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.add_space(insets.top);
            ui.horizontal(|ui| {
                ui.add_space(insets.left);
                ui.vertical(|ui| {
                    let Some(snapshot) = self.shared_state.snapshot() else {
                        ui.heading("Starting...");
                        ui.spinner();
                        return;
                    };

                    self.render_header(ui, snapshot.score, snapshot.tick_interval_ms);
                    ui.separator();

                    let response = render_board(ui, &snapshot, self.config.cell_pixels);
                    events.extend(self.bindings.collect_swipe(&response));

                    ui.separator();
                    self.render_footer(ui);
                });
            });
        });

        self.bindings.dispatch(events);
    }
}
