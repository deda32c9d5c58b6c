//! Main loop: feeds key presses and clock ticks into the game and hands the
//! resulting events to the renderer and the clock.
use std::io;
use std::sync::mpsc::{Receiver, TryRecvError};
use std::thread;
use std::time::{Duration, Instant};

use log::info;
use rand::Rng;

use crate::clock::{Scheduler, TickClock};
use crate::error::Result;
use crate::event::GameEvent;
use crate::input::{Command, InputDecoder};
use crate::render::Renderer;
use crate::snake::SnakeGame;

/// Longest nap between polls, so key presses are picked up quickly.
const POLL_INTERVAL: Duration = Duration::from_millis(3);

/// Sleep until the next poll, but never past a pending tick.
pub fn next_nap(clock: &TickClock, now: Instant) -> Duration {
    clock
        .time_left(now)
        .map_or(POLL_INTERVAL, |left| left.min(POLL_INTERVAL))
}

/// Routes everything the game emitted since the last call.
pub fn dispatch<R: Rng, S: Scheduler>(
    game: &mut SnakeGame<R>,
    renderer: &mut dyn Renderer,
    scheduler: &mut S,
) -> io::Result<()> {
    let events = game.take_events();
    if events.is_empty() {
        return Ok(());
    }
    for event in events {
        match event {
            GameEvent::PitReset { .. } => renderer.pit_reset(game.pit())?,
            GameEvent::CellChanged { position, cell } => renderer.cell_changed(position, cell)?,
            GameEvent::HudChanged(hud) => renderer.hud_changed(&hud)?,
            GameEvent::Clock(command) => scheduler.apply(command),
        }
    }
    renderer.present(game.pit())
}

/// Runs until the player quits or stdin goes away.
pub fn run<R: Rng>(
    game: &mut SnakeGame<R>,
    renderer: &mut dyn Renderer,
    clock: &mut TickClock,
    keys: &Receiver<u8>,
) -> Result<()> {
    let mut decoder = InputDecoder::new();
    dispatch(game, renderer, clock)?;
    loop {
        // receive input from pipe
        loop {
            match keys.try_recv() {
                Ok(key) => decoder.push(key),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    info!("input closed, leaving");
                    return Ok(());
                }
            }
        }
        for command in decoder.drain_commands() {
            if command == Command::Quit {
                info!("quit with score {}", game.score());
                return Ok(());
            }
            game.handle_command(command);
            dispatch(game, renderer, clock)?;
        }

        let now = Instant::now();
        if clock.poll(now) {
            game.advance();
            dispatch(game, renderer, clock)?;
        }
        // wait for next frame
        thread::sleep(next_nap(clock, now));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::event::Hud;
    use crate::pit::{Cell, Coordinates, Pit};
    use crate::snake::Lifecycle;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::sync::mpsc;

    #[derive(Default)]
    struct Recorder {
        resets: usize,
        cells: Vec<(Coordinates, Cell)>,
        huds: Vec<Hud>,
        presents: usize,
    }

    impl Renderer for Recorder {
        fn pit_reset(&mut self, _pit: &Pit) -> io::Result<()> {
            self.resets += 1;
            Ok(())
        }

        fn cell_changed(&mut self, position: Coordinates, cell: Cell) -> io::Result<()> {
            self.cells.push((position, cell));
            Ok(())
        }

        fn hud_changed(&mut self, hud: &Hud) -> io::Result<()> {
            self.huds.push(*hud);
            Ok(())
        }

        fn present(&mut self, _pit: &Pit) -> io::Result<()> {
            self.presents += 1;
            Ok(())
        }
    }

    fn game() -> SnakeGame<StdRng> {
        SnakeGame::new_with_rng(GameConfig::default(), StdRng::seed_from_u64(3))
    }

    #[test]
    fn dispatch_routes_events() {
        let mut game = game();
        let mut renderer = Recorder::default();
        let mut clock = TickClock::new();

        dispatch(&mut game, &mut renderer, &mut clock).unwrap();
        assert_eq!(renderer.resets, 1);
        assert_eq!(renderer.presents, 1);
        assert!(!clock.is_active());

        game.start();
        dispatch(&mut game, &mut renderer, &mut clock).unwrap();
        assert_eq!(renderer.resets, 2);
        // three tail cells and an apple
        assert_eq!(renderer.cells.len(), 4);
        assert_eq!(clock.interval(), Some(game.interval()));
        assert_eq!(renderer.huds.last().unwrap().lifecycle, Lifecycle::Running);

        // nothing new, nothing drawn
        dispatch(&mut game, &mut renderer, &mut clock).unwrap();
        assert_eq!(renderer.presents, 2);
    }

    #[test]
    fn pause_stops_the_clock() {
        let mut game = game();
        let mut renderer = Recorder::default();
        let mut clock = TickClock::new();
        game.start();
        game.pause();
        dispatch(&mut game, &mut renderer, &mut clock).unwrap();
        assert!(!clock.is_active());
    }

    #[test]
    fn run_applies_keys_until_quit() {
        let mut game = game();
        let mut renderer = Recorder::default();
        let mut clock = TickClock::new();
        let (tx, rx) = mpsc::channel();
        for key in *b" fq" {
            tx.send(key).unwrap();
        }

        run(&mut game, &mut renderer, &mut clock, &rx).unwrap();
        assert!(game.is_running());
        assert_eq!(game.speed_level(), 2);
        assert!(clock.is_active());
    }

    #[test]
    fn nap_never_oversleeps_a_tick() {
        let mut clock = TickClock::new();
        let now = Instant::now();
        assert_eq!(next_nap(&clock, now), POLL_INTERVAL);

        clock.set_interval(Duration::from_millis(1));
        assert!(next_nap(&clock, Instant::now()) <= Duration::from_millis(1));

        clock.set_interval(Duration::from_millis(500));
        assert_eq!(next_nap(&clock, Instant::now()), POLL_INTERVAL);
    }

    #[test]
    fn run_stops_when_input_closes() {
        let mut game = game();
        let mut renderer = Recorder::default();
        let mut clock = TickClock::new();
        let (tx, rx) = mpsc::channel::<u8>();
        drop(tx);

        run(&mut game, &mut renderer, &mut clock, &rx).unwrap();
        assert!(game.is_dead());
    }
}
