use std::fs::File;
use std::io;

use clap::Parser;
use log::info;
use simplelog::{Config, WriteLogger};

use snake_pit::clock::TickClock;
use snake_pit::config::{Options, RendererKind};
use snake_pit::render::{FullRedraw, Incremental, Renderer};
use snake_pit::terminal::{spawn_stdin_channel, HiddenCursor, RawMode};
use snake_pit::{app, SnakeGame};

fn main() -> snake_pit::Result<()> {
    let options = Options::parse();
    let config = options.game_config()?;

    // the terminal belongs to the game, so logs go to a file
    WriteLogger::init(
        options.log_level,
        Config::default(),
        File::create(&options.log_file)?,
    )?;
    info!("starting with {options:?}");

    let mut game = SnakeGame::new(config);
    let mut renderer: Box<dyn Renderer> = match options.renderer {
        RendererKind::Full => Box::new(FullRedraw::new(io::stdout())),
        RendererKind::Incremental => Box::new(Incremental::new(io::stdout())),
    };
    let mut clock = TickClock::new();

    {
        let _raw_mode = RawMode::enable()?;
        let _cursor = HiddenCursor::new(io::stdout())?;
        let keys = spawn_stdin_channel();
        app::run(&mut game, renderer.as_mut(), &mut clock, &keys)?;
    }

    // When its over display final screen
    println!();
    println!("Game Over!");
    println!("Final Score: {}", game.score());
    Ok(())
}
