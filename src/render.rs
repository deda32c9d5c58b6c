// draws the pit on an ANSI terminal, two cells wide per square
// terminal rows and columns are 1-based, the border takes row 1 and column 1
use std::io::{self, Write};

use colored::Colorize;

use crate::event::Hud;
use crate::pit::{Cell, Coordinates, Pit};
use crate::snake::{Heading, Lifecycle};

const EMPTY_GLYPH: &str = "  ";
const BODY_GLYPH: &str = "⏺ ";
const APPLE_GLYPH: &str = "♦ ";

pub trait Renderer {
    /// The board was rebuilt from scratch.
    fn pit_reset(&mut self, pit: &Pit) -> io::Result<()>;
    fn cell_changed(&mut self, position: Coordinates, cell: Cell) -> io::Result<()>;
    fn hud_changed(&mut self, hud: &Hud) -> io::Result<()>;
    /// End of a batch of changes.
    fn present(&mut self, pit: &Pit) -> io::Result<()>;
}

fn head_glyph(heading: Heading) -> &'static str {
    match heading {
        Heading::Up => "▲ ",
        Heading::Down => "▼ ",
        Heading::Left => "◀ ",
        Heading::Right => "▶ ",
    }
}

fn write_cell<W: Write>(out: &mut W, cell: Cell) -> io::Result<()> {
    match cell {
        Cell::Empty => write!(out, "{EMPTY_GLYPH}"),
        Cell::Tail => write!(out, "{}", BODY_GLYPH.green()),
        Cell::Apple => write!(out, "{}", APPLE_GLYPH.red()),
    }
}

fn clear_screen<W: Write>(out: &mut W) -> io::Result<()> {
    write!(out, "{}[2J", 27 as char)?;
    write!(out, "{}[1;1H", 27 as char)
}

fn move_to<W: Write>(out: &mut W, row: usize, column: usize) -> io::Result<()> {
    write!(out, "{}[{};{}H", 27 as char, row, column)
}

fn move_to_cell<W: Write>(out: &mut W, position: Coordinates) -> io::Result<()> {
    move_to(out, position.x as usize + 2, 2 * position.y as usize + 2)
}

fn border_top<W: Write>(out: &mut W, size: usize) -> io::Result<()> {
    write!(out, "▗{}▖\r\n", "▄▄".repeat(size))
}

fn border_bottom<W: Write>(out: &mut W, size: usize) -> io::Result<()> {
    write!(out, "▝{}▘\r\n", "▀▀".repeat(size))
}

fn lifecycle_text(lifecycle: Lifecycle) -> String {
    match lifecycle {
        Lifecycle::Dead => "Game Over".red().to_string(),
        Lifecycle::Running => "Running".green().to_string(),
        Lifecycle::Paused => "Paused".yellow().to_string(),
    }
}

const KEYS_HELP: &str = "wasd/arrows steer  f faster  o/p resize  q quit";

/// Repaints the whole pit whenever anything changed.
pub struct FullRedraw<W: Write> {
    out: W,
    hud: Option<Hud>,
    dirty: bool,
}

impl<W: Write> FullRedraw<W> {
    pub fn new(out: W) -> Self {
        FullRedraw {
            out,
            hud: None,
            dirty: true,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn draw(&mut self, pit: &Pit) -> io::Result<()> {
        clear_screen(&mut self.out)?;
        let size = pit.size();
        border_top(&mut self.out, size)?;
        for x in 0..size {
            write!(self.out, "▐")?;
            for y in 0..size {
                let cell = pit
                    .get(&Coordinates::new(x as i32, y as i32))
                    .unwrap_or_default();
                write_cell(&mut self.out, cell)?;
            }
            write!(self.out, "▌\r\n")?;
        }
        border_bottom(&mut self.out, size)?;
        if let Some(hud) = self.hud {
            write!(
                self.out,
                "Points: {}  Speed: {}ms  Pit: {}x{}  {}\r\n",
                hud.score,
                hud.speed_ms,
                hud.pit_size,
                hud.pit_size,
                lifecycle_text(hud.lifecycle)
            )?;
            write!(self.out, "{}  {KEYS_HELP}\r\n", hud.action_label())?;
        }
        Ok(())
    }
}

impl<W: Write> Renderer for FullRedraw<W> {
    fn pit_reset(&mut self, _pit: &Pit) -> io::Result<()> {
        self.dirty = true;
        Ok(())
    }

    fn cell_changed(&mut self, _position: Coordinates, _cell: Cell) -> io::Result<()> {
        self.dirty = true;
        Ok(())
    }

    fn hud_changed(&mut self, hud: &Hud) -> io::Result<()> {
        self.hud = Some(*hud);
        self.dirty = true;
        Ok(())
    }

    fn present(&mut self, pit: &Pit) -> io::Result<()> {
        if !self.dirty {
            return Ok(());
        }
        self.draw(pit)?;
        self.dirty = false;
        self.out.flush()
    }
}

/// Paints the board once, then only touches the cells that change.
/// The head is drawn as an arrow pointing where the snake is going.
pub struct Incremental<W: Write> {
    out: W,
    size: usize,
    head: Option<Coordinates>,
    heading: Heading,
}

impl<W: Write> Incremental<W> {
    pub fn new(out: W) -> Self {
        Incremental {
            out,
            size: 0,
            head: None,
            heading: Heading::Up,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn draw_head(&mut self, position: Coordinates) -> io::Result<()> {
        move_to_cell(&mut self.out, position)?;
        write!(self.out, "{}", head_glyph(self.heading).yellow())
    }

    fn hud_row(&self) -> usize {
        self.size + 3
    }
}

impl<W: Write> Renderer for Incremental<W> {
    fn pit_reset(&mut self, pit: &Pit) -> io::Result<()> {
        self.size = pit.size();
        self.head = None;
        clear_screen(&mut self.out)?;
        border_top(&mut self.out, self.size)?;
        let row = format!("▐{}▌\r\n", EMPTY_GLYPH.repeat(self.size));
        for _ in 0..self.size {
            write!(self.out, "{row}")?;
        }
        border_bottom(&mut self.out, self.size)?;
        // a reset pit is normally empty, but paint whatever is there
        for (position, cell) in pit.cells() {
            if cell != Cell::Empty {
                move_to_cell(&mut self.out, position)?;
                write_cell(&mut self.out, cell)?;
            }
        }
        Ok(())
    }

    fn cell_changed(&mut self, position: Coordinates, cell: Cell) -> io::Result<()> {
        if cell == Cell::Tail {
            // a fresh tail cell is always the new head
            if let Some(old_head) = self.head.replace(position) {
                if old_head != position {
                    move_to_cell(&mut self.out, old_head)?;
                    write_cell(&mut self.out, Cell::Tail)?;
                }
            }
            return self.draw_head(position);
        }
        if self.head == Some(position) {
            self.head = None;
        }
        move_to_cell(&mut self.out, position)?;
        write_cell(&mut self.out, cell)
    }

    fn hud_changed(&mut self, hud: &Hud) -> io::Result<()> {
        if hud.heading != self.heading {
            self.heading = hud.heading;
            if let Some(head) = self.head {
                self.draw_head(head)?;
            }
        }
        let row = self.hud_row();
        move_to(&mut self.out, row, 1)?;
        write!(
            self.out,
            "{}[2KPoints: {}  Speed: {}ms (level {})  Pit: {}x{}  {}\r\n",
            27 as char,
            hud.score,
            hud.speed_ms,
            hud.speed_level,
            hud.pit_size,
            hud.pit_size,
            lifecycle_text(hud.lifecycle)
        )?;
        write!(
            self.out,
            "{}[2K{}  {KEYS_HELP}",
            27 as char,
            hud.action_label()
        )
    }

    fn present(&mut self, _pit: &Pit) -> io::Result<()> {
        // park the cursor below the hud
        let row = self.hud_row() + 2;
        move_to(&mut self.out, row, 1)?;
        self.out.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hud(heading: Heading) -> Hud {
        Hud {
            score: 7,
            speed_level: 2,
            speed_ms: 135,
            lifecycle: Lifecycle::Running,
            heading,
            pit_size: 10,
        }
    }

    fn text(bytes: Vec<u8>) -> String {
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn full_redraw_paints_every_row() {
        let mut pit = Pit::new(10);
        pit.set_cell(Coordinates::new(0, 0), Cell::Apple);
        pit.set_cell(Coordinates::new(5, 5), Cell::Tail);
        let mut renderer = FullRedraw::new(Vec::new());
        renderer.hud_changed(&hud(Heading::Up)).unwrap();
        renderer.present(&pit).unwrap();

        let output = text(renderer.into_inner());
        assert_eq!(output.matches('▐').count(), 10);
        assert_eq!(output.matches('♦').count(), 1);
        assert_eq!(output.matches('⏺').count(), 1);
        assert!(output.contains("Points: 7"));
        assert!(output.contains("Speed: 135ms"));
        assert!(output.contains("Pit: 10x10"));
        assert!(output.contains("Pause (space)"));
    }

    #[test]
    fn full_redraw_skips_clean_frames() {
        let pit = Pit::new(10);
        let mut renderer = FullRedraw::new(Vec::new());
        renderer.present(&pit).unwrap();
        let painted = renderer.out.len();
        renderer.present(&pit).unwrap();
        assert_eq!(renderer.out.len(), painted);
        renderer
            .cell_changed(Coordinates::new(1, 1), Cell::Tail)
            .unwrap();
        renderer.present(&pit).unwrap();
        assert!(renderer.out.len() > painted);
    }

    #[test]
    fn incremental_moves_cursor_to_the_cell() {
        let pit = Pit::new(10);
        let mut renderer = Incremental::new(Vec::new());
        renderer.pit_reset(&pit).unwrap();
        renderer.out.clear();

        renderer
            .cell_changed(Coordinates::new(2, 3), Cell::Apple)
            .unwrap();
        let output = text(renderer.into_inner());
        assert!(output.starts_with("\u{1b}[4;8H"));
        assert!(output.contains('♦'));
    }

    #[test]
    fn incremental_keeps_a_single_head_sprite() {
        let pit = Pit::new(10);
        let mut renderer = Incremental::new(Vec::new());
        renderer.pit_reset(&pit).unwrap();
        for x in [6, 5, 4] {
            renderer
                .cell_changed(Coordinates::new(x, 5), Cell::Tail)
                .unwrap();
        }
        assert_eq!(renderer.head, Some(Coordinates::new(4, 5)));
        renderer.out.clear();

        renderer
            .cell_changed(Coordinates::new(3, 5), Cell::Tail)
            .unwrap();
        let output = text(std::mem::take(&mut renderer.out));
        // old head repainted as body, new head as arrow
        assert!(output.contains("\u{1b}[6;12H"));
        assert!(output.contains('⏺'));
        assert!(output.contains("\u{1b}[5;12H"));
        assert!(output.contains('▲'));

        renderer.hud_changed(&hud(Heading::Left)).unwrap();
        let output = text(renderer.into_inner());
        assert!(output.contains('◀'));
        assert!(output.contains("(level 2)"));
        assert!(output.contains("Pit: 10x10"));
    }
}
