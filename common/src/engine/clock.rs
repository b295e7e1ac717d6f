use std::time::Duration;
use tokio::time::{Instant, Interval, MissedTickBehavior, interval_at};

use crate::debug_log;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClockEvent {
    Tick,
    FoodStep,
}

/// Movement timer plus the optional food-motion timer. Both start one full
/// period after being armed and never burst to catch up.
pub struct GameClock {
    movement: Option<Interval>,
    movement_period: Duration,
    food_motion: Option<Interval>,
    food_motion_period: Duration,
}

impl GameClock {
    pub fn new(food_motion_period: Duration) -> Self {
        Self {
            movement: None,
            movement_period: Duration::ZERO,
            food_motion: None,
            food_motion_period,
        }
    }

    pub fn start(&mut self, tick_period: Duration, food_motion: bool) {
        self.arm_movement(tick_period);
        self.food_motion = food_motion.then(|| arm(self.food_motion_period));
    }

    /// Re-arms the movement timer when the period changed. Returns whether it did.
    pub fn set_tick_period(&mut self, tick_period: Duration) -> bool {
        if self.movement.is_none() || tick_period == self.movement_period {
            return false;
        }
        debug_log!(
            "Movement timer re-armed: {:?} -> {:?}",
            self.movement_period,
            tick_period
        );
        self.arm_movement(tick_period);
        true
    }

    pub fn stop(&mut self) {
        self.movement = None;
        self.food_motion = None;
    }

    pub fn is_running(&self) -> bool {
        self.movement.is_some() || self.food_motion.is_some()
    }

    pub fn tick_period(&self) -> Option<Duration> {
        self.movement.as_ref().map(|_| self.movement_period)
    }

    pub fn has_food_motion(&self) -> bool {
        self.food_motion.is_some()
    }

    /// Waits for the next timer to fire. Pends forever while stopped.
    pub async fn next(&mut self) -> ClockEvent {
        tokio::select! {
            _ = wait(&mut self.movement) => ClockEvent::Tick,
            _ = wait(&mut self.food_motion) => ClockEvent::FoodStep,
        }
    }

    fn arm_movement(&mut self, period: Duration) {
        self.movement_period = period;
        self.movement = Some(arm(period));
    }
}

fn arm(period: Duration) -> Interval {
    let mut timer = interval_at(Instant::now() + period, period);
    timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
    timer
}

async fn wait(timer: &mut Option<Interval>) {
    match timer {
        Some(timer) => {
            timer.tick().await;
        }
        None => std::future::pending::<()>().await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_tick_fires_after_one_period() {
        let mut clock = GameClock::new(Duration::from_millis(1000));
        clock.start(Duration::from_millis(200), false);
        let started = Instant::now();

        assert_eq!(clock.next().await, ClockEvent::Tick);
        assert_eq!(started.elapsed(), Duration::from_millis(200));
        assert_eq!(clock.next().await, ClockEvent::Tick);
        assert_eq!(started.elapsed(), Duration::from_millis(400));
    }

    #[tokio::test(start_paused = true)]
    async fn test_rearm_uses_new_period() {
        let mut clock = GameClock::new(Duration::from_millis(1000));
        clock.start(Duration::from_millis(200), false);
        clock.next().await;

        assert!(clock.set_tick_period(Duration::from_millis(100)));
        assert!(!clock.set_tick_period(Duration::from_millis(100)));
        let rearmed = Instant::now();
        clock.next().await;
        assert_eq!(rearmed.elapsed(), Duration::from_millis(100));
        assert_eq!(clock.tick_period(), Some(Duration::from_millis(100)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_food_motion_runs_independently() {
        let mut clock = GameClock::new(Duration::from_millis(1000));
        clock.start(Duration::from_millis(300), true);

        let mut ticks = 0;
        loop {
            match clock.next().await {
                ClockEvent::Tick => ticks += 1,
                ClockEvent::FoodStep => break,
            }
        }
        assert_eq!(ticks, 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stopped_clock_never_fires() {
        let mut clock = GameClock::new(Duration::from_millis(1000));
        clock.start(Duration::from_millis(50), true);
        clock.stop();
        assert!(!clock.is_running());
        assert!(!clock.set_tick_period(Duration::from_millis(10)));

        let fired = tokio::time::timeout(Duration::from_secs(5), clock.next()).await;
        assert!(fired.is_err());
    }
}
