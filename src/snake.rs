// the snake moves from tail-end to head, the head being the last element of the tail
// eating an apple keeps the tail-end in place, so the snake grows by one
// every 5 apples the clock speeds up by 10%
use std::collections::VecDeque;
use std::time::Duration;

use log::{debug, info, warn};
use num::Integer;
use rand::rngs::ThreadRng;
use rand::seq::IndexedRandom;
use rand::Rng;

use crate::config::GameConfig;
use crate::event::{ClockCommand, GameEvent, Hud};
use crate::input::Command;
use crate::pit::{is_valid_size, Cell, Coordinates, Pit};

pub const INIT_TAIL_SIZE: usize = 3;
pub const APPLES_PER_SPEEDUP: u32 = 5;
pub const SPEEDUP_FACTOR: f64 = 0.9;
/// Rejection sampling gives up after this many misses.
pub const MAX_APPLE_ATTEMPTS: usize = 10_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Heading {
    #[default]
    Up,
    Down,
    Left,
    Right,
}

impl Heading {
    /// Unit step as (row, column) delta.
    pub fn delta(&self) -> (i32, i32) {
        match self {
            Heading::Up => (-1, 0),
            Heading::Down => (1, 0),
            Heading::Left => (0, -1),
            Heading::Right => (0, 1),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Lifecycle {
    #[default]
    Dead,
    Running,
    Paused,
}

/// What a single call to [`SnakeGame::advance`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Not running, nothing happened.
    Idle,
    Moved,
    Ate,
    Died,
}

#[derive(Debug, Clone)]
pub struct SnakeGame<R = ThreadRng> {
    rng: R,
    pit: Pit,
    tail: VecDeque<Coordinates>, // The head is the last element
    heading: Heading,
    apple: Option<Coordinates>,
    score: u32,
    default_speed: f64,
    speed: f64,
    speed_level: u32,
    lifecycle: Lifecycle,
    events: Vec<GameEvent>,
}

impl SnakeGame<ThreadRng> {
    pub fn new(config: GameConfig) -> Self {
        Self::new_with_rng(config, rand::rng())
    }
}

impl<R: Rng> SnakeGame<R> {
    pub fn new_with_rng(config: GameConfig, rng: R) -> Self {
        let mut game = SnakeGame {
            rng,
            pit: Pit::new(config.pit_size()),
            tail: VecDeque::new(),
            heading: Heading::Up,
            apple: None,
            score: 0,
            default_speed: config.speed_ms(),
            speed: config.speed_ms(),
            speed_level: 1,
            lifecycle: Lifecycle::Dead,
            events: vec![],
        };
        game.events.push(GameEvent::PitReset {
            size: config.pit_size(),
        });
        game.publish_hud();
        game
    }

    pub fn pit(&self) -> &Pit {
        &self.pit
    }

    pub fn tail(&self) -> &VecDeque<Coordinates> {
        &self.tail
    }

    pub fn head(&self) -> Option<Coordinates> {
        self.tail.back().copied()
    }

    pub fn heading(&self) -> Heading {
        self.heading
    }

    pub fn apple(&self) -> Option<Coordinates> {
        self.apple
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    /// Milliseconds between ticks.
    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn default_speed(&self) -> f64 {
        self.default_speed
    }

    pub fn interval(&self) -> Duration {
        Duration::from_secs_f64(self.speed / 1000.0)
    }

    pub fn speed_level(&self) -> u32 {
        self.speed_level
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    pub fn is_dead(&self) -> bool {
        self.lifecycle == Lifecycle::Dead
    }

    pub fn is_running(&self) -> bool {
        self.lifecycle == Lifecycle::Running
    }

    pub fn hud(&self) -> Hud {
        Hud {
            score: self.score,
            speed_level: self.speed_level,
            speed_ms: self.speed.floor() as u64,
            lifecycle: self.lifecycle,
            heading: self.heading,
            pit_size: self.pit.size(),
        }
    }

    /// Hands over every event emitted since the last call.
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Applies one input command. Heading and speed commands only count
    /// while the game is running. Returns whether anything changed.
    pub fn handle_command(&mut self, command: Command) -> bool {
        match command {
            Command::SetHeading(heading) => self.steer(heading),
            Command::ToggleStartPause => {
                self.toggle();
                true
            }
            Command::GoFaster => self.go_faster(),
            Command::ResizeBoard(difference) => self.resize(difference),
            Command::Quit => false,
        }
    }

    /// Start over when dead, pause when running, resume when paused.
    pub fn toggle(&mut self) -> Lifecycle {
        match self.lifecycle {
            Lifecycle::Dead => self.start(),
            Lifecycle::Running => self.pause(),
            Lifecycle::Paused => self.resume(),
        };
        self.lifecycle
    }

    pub fn start(&mut self) -> bool {
        if !self.is_dead() {
            return false;
        }
        self.clean_up(self.pit.size());
        self.lifecycle = Lifecycle::Running;
        self.new_tail();
        if !self.place_apple() {
            // a 3 cell snake always leaves room on a 10x10 pit
            warn!("no room for the first apple");
        }
        self.restart_clock();
        info!(
            "new game on a {0}x{0} pit at {1}ms per tick",
            self.pit.size(),
            self.speed
        );
        self.publish_hud();
        true
    }

    pub fn pause(&mut self) -> bool {
        if !self.is_running() {
            return false;
        }
        self.lifecycle = Lifecycle::Paused;
        self.events.push(GameEvent::Clock(ClockCommand::Stop));
        info!("paused at score {}", self.score);
        self.publish_hud();
        true
    }

    pub fn resume(&mut self) -> bool {
        if self.lifecycle != Lifecycle::Paused {
            return false;
        }
        self.lifecycle = Lifecycle::Running;
        self.restart_clock();
        info!("resumed");
        self.publish_hud();
        true
    }

    /// Grows or shrinks the pit by `difference`, ending whatever game is
    /// going on. Sizes outside the allowed range are ignored.
    pub fn resize(&mut self, difference: i32) -> bool {
        let new_size = self.pit.size() as i64 + difference as i64;
        if new_size < 0 || !is_valid_size(new_size as usize) {
            debug!("ignoring resize to {new_size}");
            return false;
        }
        self.events.push(GameEvent::Clock(ClockCommand::Stop));
        self.clean_up(new_size as usize);
        info!("pit resized to {new_size}x{new_size}");
        self.publish_hud();
        true
    }

    /// Turns the snake. A real change of heading restarts the clock and
    /// moves right away so the controls feel snappy.
    pub fn steer(&mut self, heading: Heading) -> bool {
        if !self.is_running() || heading == self.heading {
            return false;
        }
        self.heading = heading;
        self.restart_clock();
        if self.advance() != TickOutcome::Died {
            self.publish_hud();
        }
        true
    }

    pub fn go_faster(&mut self) -> bool {
        if !self.is_running() {
            return false;
        }
        self.speed *= SPEEDUP_FACTOR;
        self.speed_level += 1;
        self.restart_clock();
        debug!(
            "speed level {} at {:.1}ms per tick",
            self.speed_level, self.speed
        );
        self.publish_hud();
        true
    }

    /// One simulation tick.
    pub fn advance(&mut self) -> TickOutcome {
        if !self.is_running() {
            return TickOutcome::Idle;
        }
        let Some(head) = self.head() else {
            return TickOutcome::Idle;
        };
        let next = head.offset(self.heading.delta());

        // did we hit the wall?
        if !self.pit.contains(&next) {
            debug!("hit the wall at {next:?}");
            self.die();
            return TickOutcome::Died;
        }
        // did we bite ourselves?
        if self.tail.contains(&next) {
            debug!("bit own tail at {next:?}");
            self.die();
            return TickOutcome::Died;
        }

        let mut outcome = TickOutcome::Moved;
        let mut board_full = false;
        if self.pit.get(&next) == Some(Cell::Apple) {
            outcome = TickOutcome::Ate;
            board_full = !self.get_big();
        } else if let Some(tail_end) = self.tail.pop_front() {
            // shed before marking, so the head may step where the tail-end was
            let event = self.pit.set_cell(tail_end, Cell::Empty);
            self.events.push(event);
        }

        self.tail.push_back(next);
        let event = self.pit.set_cell(next, Cell::Tail);
        self.events.push(event);

        if board_full {
            info!("the snake fills the whole pit");
            self.die();
            return TickOutcome::Died;
        }
        outcome
    }

    /// Scripted placement of the apple. Only empty cells of a live game
    /// are accepted.
    pub fn move_apple(&mut self, position: Coordinates) -> bool {
        if self.is_dead() {
            return false;
        }
        if self.apple == Some(position) {
            return true;
        }
        if self.pit.get(&position) != Some(Cell::Empty) {
            return false;
        }
        if let Some(old) = self.apple.take() {
            let event = self.pit.set_cell(old, Cell::Empty);
            self.events.push(event);
        }
        self.put_apple(position);
        true
    }

    // returns false when there was no room left for a new apple
    fn get_big(&mut self) -> bool {
        self.apple = None;
        let placed = self.place_apple();
        self.score += 1;
        debug!("apple eaten, score {}", self.score);

        if self.score % APPLES_PER_SPEEDUP == 0 {
            self.go_faster();
        } else {
            self.publish_hud();
        }
        placed
    }

    fn place_apple(&mut self) -> bool {
        let size = self.pit.size() as i32;
        // if the snake covers more than 80% of the pit, sampling is a waste
        let crowded = self.tail.len() * 5 > self.pit.area() * 4;
        if !crowded {
            for _ in 0..MAX_APPLE_ATTEMPTS {
                let candidate = Coordinates::new(
                    self.rng.random_range(0..size),
                    self.rng.random_range(0..size),
                );
                if self.pit.get(&candidate) == Some(Cell::Empty) {
                    self.put_apple(candidate);
                    return true;
                }
            }
            warn!("no empty cell after {MAX_APPLE_ATTEMPTS} attempts, enumerating");
        }
        let empty_cells = self.pit.empty_cells();
        match empty_cells.choose(&mut self.rng) {
            Some(&position) => {
                self.put_apple(position);
                true
            }
            None => false,
        }
    }

    fn put_apple(&mut self, position: Coordinates) {
        self.apple = Some(position);
        let event = self.pit.set_cell(position, Cell::Apple);
        self.events.push(event);
    }

    // middle of the board, 3 units long, heading up
    fn new_tail(&mut self) {
        let center = Integer::div_ceil(&(self.pit.size() as i32), &2);
        for offset in (-1..=1).rev() {
            let position = Coordinates::new(center + offset, center);
            self.tail.push_back(position);
            let event = self.pit.set_cell(position, Cell::Tail);
            self.events.push(event);
        }
        debug_assert_eq!(self.tail.len(), INIT_TAIL_SIZE);
    }

    fn die(&mut self) {
        self.lifecycle = Lifecycle::Dead;
        self.events.push(GameEvent::Clock(ClockCommand::Stop));
        info!("snake died with score {}", self.score);
        self.publish_hud();
    }

    fn clean_up(&mut self, size: usize) {
        self.lifecycle = Lifecycle::Dead;
        self.heading = Heading::Up;
        self.score = 0;
        self.speed = self.default_speed;
        self.speed_level = 1;
        self.tail.clear();
        self.apple = None;
        let event = self.pit.reset(size);
        self.events.push(event);
    }

    fn restart_clock(&mut self) {
        let interval = self.interval();
        self.events
            .push(GameEvent::Clock(ClockCommand::Start(interval)));
    }

    fn publish_hud(&mut self) {
        let hud = self.hud();
        self.events.push(GameEvent::HudChanged(hud));
    }
}
