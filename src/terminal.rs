// stdin in raw mode: no enter press needed and no echo of the keys
use std::io::{self, Read};
use std::sync::mpsc::{self, Receiver};
use std::thread;

use log::{debug, error};
use termios::{tcsetattr, Termios, ECHO, ICANON, TCSANOW};

const STDIN_FD: i32 = 0;

/// Puts stdin in non-canonical, no-echo mode until dropped.
pub struct RawMode {
    old_termios: Termios,
}

impl RawMode {
    pub fn enable() -> io::Result<Self> {
        let old_termios = Termios::from_fd(STDIN_FD)?;
        let mut new_termios = old_termios;
        new_termios.c_lflag &= !(ICANON | ECHO);
        tcsetattr(STDIN_FD, TCSANOW, &new_termios)?;
        debug!("stdin switched to raw mode");
        Ok(RawMode { old_termios })
    }
}

impl Drop for RawMode {
    fn drop(&mut self) {
        // reset stdin to default
        if let Err(err) = tcsetattr(STDIN_FD, TCSANOW, &self.old_termios) {
            error!("could not restore terminal settings: {err}");
        }
    }
}

/// Reads stdin one byte at a time on a background thread.
/// The channel disconnects once stdin closes.
pub fn spawn_stdin_channel() -> Receiver<u8> {
    let (tx, rx) = mpsc::channel::<u8>();
    thread::spawn(move || {
        let mut reader = io::stdin();
        let mut buffer = [0u8; 1];
        loop {
            if let Err(err) = reader.read_exact(&mut buffer) {
                debug!("stdin closed: {err}");
                break;
            }
            if tx.send(buffer[0]).is_err() {
                break;
            }
        }
    });
    rx
}

/// Hides the cursor while alive, so it does not blink over the pit.
pub struct HiddenCursor<W: io::Write> {
    out: W,
}

impl<W: io::Write> HiddenCursor<W> {
    pub fn new(mut out: W) -> io::Result<Self> {
        write!(out, "{}[?25l", 27 as char)?;
        out.flush()?;
        Ok(HiddenCursor { out })
    }
}

impl<W: io::Write> Drop for HiddenCursor<W> {
    fn drop(&mut self) {
        let _ = write!(self.out, "{}[?25h", 27 as char);
        let _ = self.out.flush();
    }
}
