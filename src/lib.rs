//! Snake in a square pit.
//!
//! [`snake::SnakeGame`] is a headless game engine: it moves the snake one
//! tick at a time and reports every change as a [`event::GameEvent`]. The
//! terminal front end in [`app`] feeds it key presses and clock ticks and
//! hands its events to a [`render::Renderer`] and a [`clock::Scheduler`].
pub mod app;
pub mod clock;
pub mod config;
pub mod error;
pub mod event;
pub mod input;
pub mod pit;
pub mod render;
pub mod snake;
pub mod terminal;

pub use config::GameConfig;
pub use error::{Error, Result};
pub use snake::SnakeGame;
