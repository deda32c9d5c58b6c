//! Command-line options and the validated game configuration built from them.
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use simplelog::LevelFilter;

use crate::error::{Error, Result};
use crate::pit::is_valid_size;

pub const DEFAULT_PIT_SIZE: usize = 25;
pub const DEFAULT_SPEED_MS: u64 = 150;
pub const DEFAULT_LOG_FILE: &str = "snake_pit.log";

/// How the pit gets drawn on the terminal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum RendererKind {
    /// Repaint the whole pit after every change.
    Full,
    /// Repaint only the cells that changed.
    Incremental,
}

/// Snake in a square pit, played in the terminal.
#[derive(Debug, Parser)]
#[command(name = "snake_pit", version)]
pub struct Options {
    /// Number of rows and columns of the pit.
    #[arg(
        long,
        value_name = "CELLS",
        default_value_t = DEFAULT_PIT_SIZE as u64,
        value_parser = clap::value_parser!(u64).range(10..=100)
    )]
    pub size: u64,
    /// Milliseconds between ticks at the start of a game. Smaller is faster.
    #[arg(
        long,
        value_name = "MILLISECONDS",
        default_value_t = DEFAULT_SPEED_MS,
        value_parser = clap::value_parser!(u64).range(1..=60_000)
    )]
    pub speed: u64,
    #[arg(long, value_enum, default_value_t = RendererKind::Incremental)]
    pub renderer: RendererKind,
    /// Where log output goes, the terminal is busy with the game.
    #[arg(long, value_name = "PATH", default_value = DEFAULT_LOG_FILE)]
    pub log_file: PathBuf,
    #[arg(long, value_name = "LEVEL", default_value_t = LevelFilter::Info)]
    pub log_level: LevelFilter,
}

impl Options {
    pub fn game_config(&self) -> Result<GameConfig> {
        GameConfig::new(self.size as usize, self.speed as f64)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GameConfig {
    pit_size: usize,
    speed_ms: f64,
}

impl GameConfig {
    pub fn new(pit_size: usize, speed_ms: f64) -> Result<Self> {
        if !is_valid_size(pit_size) {
            return Err(Error::InvalidPitSize(pit_size));
        }
        if !speed_ms.is_finite() || speed_ms <= 0.0 {
            return Err(Error::InvalidSpeed(speed_ms));
        }
        Ok(GameConfig { pit_size, speed_ms })
    }

    pub fn pit_size(&self) -> usize {
        self.pit_size
    }

    pub fn speed_ms(&self) -> f64 {
        self.speed_ms
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            pit_size: DEFAULT_PIT_SIZE,
            speed_ms: DEFAULT_SPEED_MS as f64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let options = Options::parse_from(["snake_pit"]);
        assert_eq!(options.size, 25);
        assert_eq!(options.speed, 150);
        assert_eq!(options.renderer, RendererKind::Incremental);
        assert_eq!(options.log_level, LevelFilter::Info);
        assert_eq!(options.game_config().unwrap(), GameConfig::default());
    }

    #[test]
    fn parses_overrides() {
        let options = Options::parse_from([
            "snake_pit",
            "--size",
            "40",
            "--speed",
            "90",
            "--renderer",
            "full",
            "--log-level",
            "debug",
        ]);
        assert_eq!(options.size, 40);
        assert_eq!(options.renderer, RendererKind::Full);
        assert_eq!(options.log_level, LevelFilter::Debug);
        let config = options.game_config().unwrap();
        assert_eq!(config.pit_size(), 40);
        assert_eq!(config.speed_ms(), 90.0);
    }

    #[test]
    fn size_limits_are_inclusive() {
        let smallest = Options::try_parse_from(["snake_pit", "--size", "10"]).unwrap();
        assert_eq!(smallest.game_config().unwrap().pit_size(), 10);
        let largest = Options::try_parse_from(["snake_pit", "--size", "100"]).unwrap();
        assert_eq!(largest.game_config().unwrap().pit_size(), 100);
    }

    #[test]
    fn rejects_out_of_range_size() {
        assert!(Options::try_parse_from(["snake_pit", "--size", "9"]).is_err());
        assert!(Options::try_parse_from(["snake_pit", "--size", "101"]).is_err());
        assert!(Options::try_parse_from(["snake_pit", "--speed", "0"]).is_err());
    }

    #[test]
    fn game_config_validation() {
        assert!(matches!(
            GameConfig::new(5, 150.0),
            Err(Error::InvalidPitSize(5))
        ));
        assert!(matches!(
            GameConfig::new(10, -1.0),
            Err(Error::InvalidSpeed(_))
        ));
        assert!(GameConfig::new(100, 0.5).is_ok());
    }
}
