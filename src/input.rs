// turns raw key bytes from stdin into game commands
// arrow keys are long 3 bytes: 27, 91 and then 65..=68
use circular_buffer::CircularBuffer;
use log::warn;

use crate::snake::Heading;

pub const INPUT_BUFFER_SIZE: usize = 1024;
type InputBuffer = CircularBuffer<INPUT_BUFFER_SIZE, u8>; // 1024 bytes in input buffer

const ESCAPE: u8 = 27;
const BRACKET: u8 = 91;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    SetHeading(Heading),
    ToggleStartPause,
    GoFaster,
    /// Grow (+1) or shrink (-1) the pit.
    ResizeBoard(i32),
    Quit,
}

impl Command {
    /// Single byte keys. Arrow keys go through [`InputDecoder`].
    pub fn from_key(key: u8) -> Option<Command> {
        let command = match key {
            b'w' => Command::SetHeading(Heading::Up),
            b'a' => Command::SetHeading(Heading::Left),
            b's' => Command::SetHeading(Heading::Down),
            b'd' => Command::SetHeading(Heading::Right),
            b'f' => Command::GoFaster,
            b'o' => Command::ResizeBoard(-1),
            b'p' => Command::ResizeBoard(1),
            b' ' => Command::ToggleStartPause,
            b'q' => Command::Quit,
            _ => return None,
        };
        Some(command)
    }

    fn from_arrow(code: u8) -> Option<Command> {
        let heading = match code {
            65 => Heading::Up,
            66 => Heading::Down,
            67 => Heading::Right,
            68 => Heading::Left,
            _ => return None,
        };
        Some(Command::SetHeading(heading))
    }
}

#[derive(Debug)]
pub struct InputDecoder {
    buffer: InputBuffer,
}

impl InputDecoder {
    pub fn new() -> Self {
        InputDecoder {
            buffer: InputBuffer::new(),
        }
    }

    pub fn push(&mut self, key: u8) {
        // if the buffer is full, ignore the input
        if self.buffer.is_full() {
            warn!("input buffer full, dropping key {key}");
            return;
        }
        self.buffer.push_back(key);
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Pops the next complete command. An escape sequence that has not
    /// fully arrived yet stays in the buffer.
    pub fn next_command(&mut self) -> Option<Command> {
        while let Some(&key) = self.buffer.front() {
            if key != ESCAPE {
                self.buffer.pop_front();
                if let Some(command) = Command::from_key(key) {
                    return Some(command);
                }
                continue;
            }
            // escape sequence, wait for the rest of it
            let Some(&second) = self.buffer.nth_front(1) else {
                return None;
            };
            if second != BRACKET {
                // lone escape, not an arrow
                self.buffer.pop_front();
                continue;
            }
            let Some(&code) = self.buffer.nth_front(2) else {
                return None;
            };
            self.buffer.pop_front();
            self.buffer.pop_front();
            self.buffer.pop_front();
            if let Some(command) = Command::from_arrow(code) {
                return Some(command);
            }
        }
        None
    }

    /// Everything decodable right now, in arrival order.
    pub fn drain_commands(&mut self) -> Vec<Command> {
        std::iter::from_fn(|| self.next_command()).collect()
    }
}

impl Default for InputDecoder {
    fn default() -> Self {
        Self::new()
    }
}
