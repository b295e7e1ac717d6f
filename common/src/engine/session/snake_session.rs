use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::engine::clock::{ClockEvent, GameClock};
use crate::games::SessionRng;
use crate::games::snake::{
    Direction, FOOD_MOTION_INTERVAL, GameEndReason, InputController, InputEvent, SnakeGameState,
    SnakeSessionSettings, TickOutcome, TurnOutcome,
};
use crate::{debug_log, log};
use super::{GameBroadcaster, GameOverNotification};

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SessionCommand {
    Input(InputEvent),
    Turn(Direction),
    Reset,
    Stop,
}

/// Cloneable sending side of a running session. Sends fail once the session
/// has stopped.
#[derive(Clone)]
pub struct SessionCommandSender {
    tx: mpsc::UnboundedSender<SessionCommand>,
}

impl SessionCommandSender {
    pub fn send(&self, command: SessionCommand) -> Result<(), String> {
        self.tx
            .send(command)
            .map_err(|e| format!("Session is no longer running: {:?}", e.0))
    }

    pub fn input(&self, event: InputEvent) -> Result<(), String> {
        self.send(SessionCommand::Input(event))
    }

    pub fn turn(&self, direction: Direction) -> Result<(), String> {
        self.send(SessionCommand::Turn(direction))
    }

    pub fn reset(&self) -> Result<(), String> {
        self.send(SessionCommand::Reset)
    }

    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SessionSummary {
    pub score: u32,
    pub ticks: u64,
    pub foods_eaten: u32,
    pub end_reason: Option<GameEndReason>,
    pub resets: u32,
}

/// Owns the session task. Dropping the handle aborts the task, which cancels
/// both timers and closes the command channel.
pub struct SessionHandle {
    commands: SessionCommandSender,
    task: Option<JoinHandle<SessionSummary>>,
}

impl SessionHandle {
    pub fn commands(&self) -> SessionCommandSender {
        self.commands.clone()
    }

    /// Asks the session to stop and waits for its summary.
    pub async fn stop(mut self) -> Result<SessionSummary, String> {
        let Some(task) = self.task.take() else {
            return Err("Session was already stopped".to_string());
        };
        // The task may have exited on its own; the join below still yields its summary.
        let _ = self.commands.send(SessionCommand::Stop);
        task.await
            .map_err(|e| format!("Session task failed: {}", e))
    }
}

impl Drop for SessionHandle {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

pub struct SnakeSession;

impl SnakeSession {
    /// Starts a fresh game on the current tokio runtime.
    pub fn spawn(
        settings: SnakeSessionSettings,
        mut rng: SessionRng,
        broadcaster: impl GameBroadcaster,
    ) -> SessionHandle {
        let state = SnakeGameState::new(settings, &mut rng);
        Self::spawn_with_state(state, rng, broadcaster)
    }

    pub fn spawn_with_state(
        state: SnakeGameState,
        rng: SessionRng,
        broadcaster: impl GameBroadcaster,
    ) -> SessionHandle {
        let (tx, rx) = mpsc::unbounded_channel();
        let task = tokio::spawn(Self::run(state, rng, rx, broadcaster));
        SessionHandle {
            commands: SessionCommandSender { tx },
            task: Some(task),
        }
    }

    /// The session loop. Timers, food motion and commands are handled one at
    /// a time; pending commands are drained before a due tick.
    pub async fn run(
        mut state: SnakeGameState,
        mut rng: SessionRng,
        mut commands: mpsc::UnboundedReceiver<SessionCommand>,
        broadcaster: impl GameBroadcaster,
    ) -> SessionSummary {
        let mut input = InputController::new();
        let mut clock = GameClock::new(FOOD_MOTION_INTERVAL);
        let mut resets = 0u32;

        log!(
            "Session started: seed {}, grid {}x{}, {:?} walls, {:?} food, {:?} placement",
            rng.seed(),
            state.settings().grid().size,
            state.settings().grid().size,
            state.settings().boundary_policy(),
            state.settings().food_motion(),
            state.settings().food_placement()
        );

        if !state.is_game_over() {
            clock.start(state.tick_interval(), state.has_food_motion());
        }
        broadcaster.broadcast_state(state.snapshot()).await;

        loop {
            tokio::select! {
                biased;

                command = commands.recv() => {
                    let Some(command) = command else {
                        break;
                    };
                    match command {
                        SessionCommand::Input(event) => {
                            if let Some(direction) = input.translate(event) {
                                Self::apply_turn(&mut state, direction);
                            }
                        }
                        SessionCommand::Turn(direction) => {
                            Self::apply_turn(&mut state, direction);
                        }
                        SessionCommand::Reset => {
                            state.reset(&mut rng);
                            input.cancel_gesture();
                            resets += 1;
                            clock.start(state.tick_interval(), state.has_food_motion());
                            broadcaster.broadcast_state(state.snapshot()).await;
                        }
                        SessionCommand::Stop => break,
                    }
                }

                event = clock.next() => match event {
                    ClockEvent::Tick => {
                        let outcome = state.tick(&mut rng);
                        if let TickOutcome::Ate { .. } = outcome {
                            clock.set_tick_period(state.tick_interval());
                        }
                        broadcaster.broadcast_state(state.snapshot()).await;

                        if outcome.ends_game() {
                            clock.stop();
                            if let Some(reason) = state.end_reason() {
                                broadcaster
                                    .broadcast_game_over(GameOverNotification {
                                        score: state.score(),
                                        reason,
                                        ticks: state.ticks(),
                                        foods_eaten: state.foods_eaten(),
                                    })
                                    .await;
                            }
                        }
                    }
                    ClockEvent::FoodStep => {
                        if state.step_food(&mut rng).is_some() {
                            broadcaster.broadcast_state(state.snapshot()).await;
                        }
                    }
                },
            }
        }

        clock.stop();
        log!("Session stopped with score {}", state.score());

        SessionSummary {
            score: state.score(),
            ticks: state.ticks(),
            foods_eaten: state.foods_eaten(),
            end_reason: state.end_reason(),
            resets,
        }
    }

    fn apply_turn(state: &mut SnakeGameState, direction: Direction) {
        let outcome = state.request_direction(direction);
        if outcome != TurnOutcome::Accepted {
            debug_log!("Turn to {:?} ignored: {:?}", direction, outcome);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;
    use tokio::time::{Instant, sleep};

    use crate::config::GamePreset;
    use crate::games::snake::{DeathReason, Point, Snake, SnakeFrameSnapshot, TouchPoint};

    #[derive(Clone, Default)]
    struct RecordingBroadcaster {
        states: Arc<Mutex<Vec<(Instant, SnakeFrameSnapshot)>>>,
        game_overs: Arc<Mutex<Vec<GameOverNotification>>>,
    }

    impl RecordingBroadcaster {
        fn states(&self) -> Vec<(Instant, SnakeFrameSnapshot)> {
            self.states.lock().unwrap().clone()
        }

        fn last_state(&self) -> SnakeFrameSnapshot {
            self.states.lock().unwrap().last().unwrap().1.clone()
        }

        fn game_overs(&self) -> Vec<GameOverNotification> {
            self.game_overs.lock().unwrap().clone()
        }
    }

    impl GameBroadcaster for RecordingBroadcaster {
        async fn broadcast_state(&self, snapshot: SnakeFrameSnapshot) {
            self.states.lock().unwrap().push((Instant::now(), snapshot));
        }

        async fn broadcast_game_over(&self, notification: GameOverNotification) {
            self.game_overs.lock().unwrap().push(notification);
        }
    }

    fn settings(preset: GamePreset) -> SnakeSessionSettings {
        SnakeSessionSettings::try_from(&preset.config()).unwrap()
    }

    fn layout(
        preset: GamePreset,
        segments: &[(i32, i32)],
        direction: Direction,
        food: (i32, i32),
    ) -> SnakeGameState {
        let points: Vec<Point> = segments.iter().copied().map(Point::from).collect();
        let snake = Snake::from_segments(&points, direction).unwrap();
        SnakeGameState::from_parts(settings(preset), snake, Point::from(food))
    }

    #[tokio::test(start_paused = true)]
    async fn test_session_ticks_on_schedule() {
        let broadcaster = RecordingBroadcaster::default();
        let state = layout(GamePreset::Classic, &[(5, 5)], Direction::Right, (0, 0));
        let handle = SnakeSession::spawn_with_state(state, SessionRng::new(1), broadcaster.clone());

        sleep(Duration::from_millis(450)).await;
        let summary = handle.stop().await.unwrap();

        assert_eq!(summary.ticks, 2);
        assert_eq!(broadcaster.last_state().head(), Some(Point::new(7, 5)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_turn_and_swipe_reach_the_next_tick() {
        let broadcaster = RecordingBroadcaster::default();
        let state = layout(GamePreset::Classic, &[(5, 5)], Direction::Right, (0, 0));
        let handle = SnakeSession::spawn_with_state(state, SessionRng::new(1), broadcaster.clone());
        let commands = handle.commands();

        commands.turn(Direction::Up).unwrap();
        sleep(Duration::from_millis(250)).await;
        assert_eq!(broadcaster.last_state().head(), Some(Point::new(5, 4)));

        commands.input(InputEvent::TouchStart(TouchPoint::new(0.0, 0.0))).unwrap();
        commands.input(InputEvent::TouchMove(TouchPoint::new(30.0, 4.0))).unwrap();
        sleep(Duration::from_millis(200)).await;
        assert_eq!(broadcaster.last_state().head(), Some(Point::new(6, 4)));

        handle.stop().await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_eating_rearms_movement_timer() {
        let broadcaster = RecordingBroadcaster::default();
        let state = layout(GamePreset::Classic, &[(5, 5)], Direction::Right, (6, 5));
        let handle = SnakeSession::spawn_with_state(state, SessionRng::new(3), broadcaster.clone());

        sleep(Duration::from_millis(600)).await;
        let summary = handle.stop().await.unwrap();
        assert!(summary.foods_eaten >= 1);
        assert_eq!(summary.score, 100 * summary.foods_eaten);

        let states = broadcaster.states();
        // Initial snapshot, the eating tick at 200ms, then the first tick of the
        // re-armed 190ms schedule.
        let tick_times: Vec<Instant> = states.iter().skip(1).map(|(at, _)| *at).collect();
        assert!(tick_times.len() >= 2);
        assert_eq!(states[1].1.tick_interval_ms, 190.0);
        assert_eq!(tick_times[1] - tick_times[0], Duration::from_millis(190));
    }

    #[tokio::test(start_paused = true)]
    async fn test_game_over_stops_timers_until_reset() {
        let broadcaster = RecordingBroadcaster::default();
        let state = layout(GamePreset::Walled, &[(19, 5)], Direction::Right, (0, 0));
        let handle = SnakeSession::spawn_with_state(state, SessionRng::new(5), broadcaster.clone());

        sleep(Duration::from_millis(2000)).await;
        let game_overs = broadcaster.game_overs();
        assert_eq!(game_overs.len(), 1);
        assert_eq!(game_overs[0].reason, GameEndReason::Death(DeathReason::WallCollision));
        // Initial snapshot plus the fatal tick; nothing fires afterwards.
        assert_eq!(broadcaster.states().len(), 2);

        handle.commands().turn(Direction::Up).unwrap();
        handle.commands().reset().unwrap();
        sleep(Duration::from_millis(250)).await;
        let last = broadcaster.last_state();
        assert!(!last.is_game_over());
        assert_eq!(last.tick, 1);
        assert_eq!(last.head(), Some(Point::new(11, 10)));

        let summary = handle.stop().await.unwrap();
        assert_eq!(summary.resets, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_food_wanders_on_its_own_timer() {
        let broadcaster = RecordingBroadcaster::default();
        let state = layout(GamePreset::Wander, &[(0, 0)], Direction::Down, (10, 10));
        let handle = SnakeSession::spawn_with_state(state, SessionRng::new(8), broadcaster.clone());

        sleep(Duration::from_millis(1050)).await;
        handle.stop().await.unwrap();

        let foods: Vec<Point> = broadcaster.states().iter().map(|(_, s)| s.food).collect();
        let last = *foods.last().unwrap();
        assert!((last.x - 10).abs() + (last.y - 10).abs() <= 1);
        // Five movement ticks plus one food step after the initial snapshot.
        assert_eq!(foods.len(), 7);
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropping_handle_cancels_session() {
        let broadcaster = RecordingBroadcaster::default();
        let handle = SnakeSession::spawn(settings(GamePreset::Wander), SessionRng::new(2), broadcaster.clone());
        let commands = handle.commands();

        sleep(Duration::from_millis(250)).await;
        drop(handle);
        sleep(Duration::from_millis(10)).await;
        let count = broadcaster.states().len();

        sleep(Duration::from_millis(3000)).await;
        assert_eq!(broadcaster.states().len(), count);
        assert!(commands.is_closed());
        assert!(commands.turn(Direction::Up).is_err());
    }
}
