// a single repeating timer, polled by the main loop
// there is never more than one pending tick: setting a new interval replaces the old one
use std::time::{Duration, Instant};

use crate::event::ClockCommand;

pub trait Scheduler {
    fn set_interval(&mut self, interval: Duration);
    fn cancel(&mut self);

    fn apply(&mut self, command: ClockCommand) {
        match command {
            ClockCommand::Start(interval) => self.set_interval(interval),
            ClockCommand::Stop => self.cancel(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct TickClock {
    interval: Option<Duration>,
    last_tick: Option<Instant>,
}

impl TickClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn interval(&self) -> Option<Duration> {
        self.interval
    }

    pub fn is_active(&self) -> bool {
        self.interval.is_some()
    }

    /// Is a tick due at `now`? Consumes it if so.
    pub fn poll(&mut self, now: Instant) -> bool {
        let (Some(interval), Some(last_tick)) = (self.interval, self.last_tick) else {
            return false;
        };
        if now.saturating_duration_since(last_tick) < interval {
            return false;
        }
        self.last_tick = Some(now);
        true
    }

    /// How long until the next tick, if any is pending.
    pub fn time_left(&self, now: Instant) -> Option<Duration> {
        let (interval, last_tick) = (self.interval?, self.last_tick?);
        Some(interval.saturating_sub(now.saturating_duration_since(last_tick)))
    }

    fn start_at(&mut self, interval: Duration, now: Instant) {
        self.interval = Some(interval);
        self.last_tick = Some(now);
    }
}

impl Scheduler for TickClock {
    fn set_interval(&mut self, interval: Duration) {
        self.start_at(interval, Instant::now());
    }

    fn cancel(&mut self) {
        self.interval = None;
        self.last_tick = None;
    }
}
