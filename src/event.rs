//! Everything the game tells the outside world about itself.
use std::time::Duration;

use crate::pit::{Cell, Coordinates};
use crate::snake::{Heading, Lifecycle};

#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    /// The whole board was thrown away, redraw from a snapshot.
    PitReset { size: usize },
    CellChanged { position: Coordinates, cell: Cell },
    HudChanged(Hud),
    Clock(ClockCommand),
}

/// What the scheduler should do with its pending tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ClockCommand {
    /// Drop any pending tick and fire every `Duration` from now on.
    Start(Duration),
    Stop,
}

/// Head-up display data: the bits of state shown next to the pit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hud {
    pub score: u32,
    pub speed_level: u32,
    /// Milliseconds between ticks, rounded down.
    pub speed_ms: u64,
    pub lifecycle: Lifecycle,
    pub heading: Heading,
    pub pit_size: usize,
}

impl Hud {
    /// Label for the start/stop control, depending on what space would do.
    pub fn action_label(&self) -> &'static str {
        match self.lifecycle {
            Lifecycle::Dead => "Restart (space)",
            Lifecycle::Running => "Pause (space)",
            Lifecycle::Paused => "Resume (space)",
        }
    }
}
