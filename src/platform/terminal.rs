//! POSIX terminal frontend.
//!
//! Three pieces, each implementing one side of the core's contracts:
//! [`RawModeGuard`] switches the controlling terminal into raw mode and
//! restores it on drop, [`TerminalInput`] decodes the byte stream into
//! [`Key`] events, and [`AnsiScreen`] flushes a composed [`CellGrid`] to
//! stdout with 16-color SGR sequences.

use std::collections::VecDeque;
use std::io::{self, Read, Stdin, Stdout, Write};

use crate::core::input::{EventSource, Key};
use crate::logging::log_debug;
use crate::render::{Cell, CellGrid, ColorPair, DisplaySink};

#[cfg(unix)]
use std::sync::atomic::{AtomicBool, Ordering};
#[cfg(unix)]
use std::sync::Arc;

/// Restores the original termios state when dropped.
#[cfg(unix)]
pub struct RawModeGuard {
    original: libc::termios,
}

#[cfg(unix)]
impl RawModeGuard {
    /// Switches stdin to raw mode (no echo, no canonical line buffering).
    pub fn enable() -> io::Result<Self> {
        // Safety: termios is plain-old-data; the fd is the process's stdin.
        unsafe {
            let mut original = std::mem::zeroed::<libc::termios>();
            if libc::tcgetattr(libc::STDIN_FILENO, &mut original) != 0 {
                return Err(io::Error::last_os_error());
            }
            let mut raw = original;
            libc::cfmakeraw(&mut raw);
            if libc::tcsetattr(libc::STDIN_FILENO, libc::TCSANOW, &raw) != 0 {
                return Err(io::Error::last_os_error());
            }
            Ok(Self { original })
        }
    }
}

#[cfg(unix)]
impl Drop for RawModeGuard {
    fn drop(&mut self) {
        // Safety: restoring the state captured in `enable`.
        unsafe {
            libc::tcsetattr(libc::STDIN_FILENO, libc::TCSANOW, &self.original);
        }
    }
}

/// Blocking [`EventSource`] over a byte reader.
///
/// Escape-sequence decoding is best-effort: sequences normally arrive in one
/// read, so a lone ESC byte at the end of a chunk is reported as the escape
/// key rather than held back.
pub struct TerminalInput<R = Stdin> {
    reader: R,
    buffer: VecDeque<u8>,
}

impl TerminalInput<Stdin> {
    pub fn stdin() -> Self {
        Self::new(io::stdin())
    }
}

impl<R: Read> TerminalInput<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buffer: VecDeque::new(),
        }
    }

    /// Blocks for more bytes; `None` on EOF or read error.
    fn fill_buffer(&mut self) -> Option<()> {
        let mut chunk = [0u8; 64];
        match self.reader.read(&mut chunk) {
            Ok(0) => None,
            Ok(count) => {
                self.buffer.extend(&chunk[..count]);
                Some(())
            }
            Err(error) if error.kind() == io::ErrorKind::Interrupted => Some(()),
            Err(error) => {
                log_debug(&format!("terminal read failed: {error}"));
                None
            }
        }
    }
}

impl<R: Read> EventSource for TerminalInput<R> {
    fn next_key(&mut self) -> Option<Key> {
        loop {
            if self.buffer.is_empty() {
                self.fill_buffer()?;
                continue;
            }
            if let Some(key) = decode_key(&mut self.buffer) {
                return Some(key);
            }
        }
    }
}

/// Decodes one key from the front of the buffer; `None` consumes and drops
/// bytes that map to no event.
fn decode_key(buffer: &mut VecDeque<u8>) -> Option<Key> {
    let first = buffer.pop_front()?;
    match first {
        b'\r' | b'\n' => Some(Key::Enter),
        0x08 | 0x7f => Some(Key::Backspace),
        b'\t' => Some(Key::Tab),
        0x1b => decode_escape(buffer),
        byte @ 0x20..=0x7e => Some(Key::Char(byte as char)),
        _ => None,
    }
}

fn decode_escape(buffer: &mut VecDeque<u8>) -> Option<Key> {
    match buffer.front() {
        None => Some(Key::Escape),
        Some(b'[') => {
            buffer.pop_front();
            decode_csi(buffer)
        }
        Some(b'O') => {
            buffer.pop_front();
            match buffer.pop_front() {
                Some(b'P') => Some(Key::Function(1)),
                Some(b'Q') => Some(Key::Function(2)),
                Some(b'R') => Some(Key::Function(3)),
                Some(b'S') => Some(Key::Function(4)),
                _ => Some(Key::Escape),
            }
        }
        Some(_) => Some(Key::Escape),
    }
}

fn decode_csi(buffer: &mut VecDeque<u8>) -> Option<Key> {
    let mut params = String::new();
    while let Some(&byte) = buffer.front() {
        match byte {
            b'0'..=b'9' | b';' => {
                buffer.pop_front();
                params.push(byte as char);
            }
            final_byte @ 0x40..=0x7e => {
                buffer.pop_front();
                return decode_csi_final(&params, final_byte);
            }
            _ => {
                buffer.pop_front();
                return None;
            }
        }
    }
    // Truncated sequence; treat the consumed ESC as the escape key.
    Some(Key::Escape)
}

fn decode_csi_final(params: &str, final_byte: u8) -> Option<Key> {
    match final_byte {
        b'A' => Some(Key::Up),
        b'B' => Some(Key::Down),
        b'C' => Some(Key::Right),
        b'D' => Some(Key::Left),
        b'~' => match params {
            "3" => Some(Key::Delete),
            "11" => Some(Key::Function(1)),
            "12" => Some(Key::Function(2)),
            "13" => Some(Key::Function(3)),
            "14" => Some(Key::Function(4)),
            "15" => Some(Key::Function(5)),
            "17" => Some(Key::Function(6)),
            "18" => Some(Key::Function(7)),
            "19" => Some(Key::Function(8)),
            "20" => Some(Key::Function(9)),
            "21" => Some(Key::Function(10)),
            _ => None,
        },
        _ => None,
    }
}

/// [`DisplaySink`] that composes into a [`CellGrid`] and flushes full frames
/// to a writer on `present`.
pub struct AnsiScreen<W: Write = Stdout> {
    grid: CellGrid,
    out: W,
    #[cfg(unix)]
    resized: Arc<AtomicBool>,
    force_clear: bool,
}

impl AnsiScreen<Stdout> {
    pub fn stdout(columns: u16, rows: u16) -> Self {
        Self::new(columns, rows, io::stdout())
    }
}

impl<W: Write> AnsiScreen<W> {
    pub fn new(columns: u16, rows: u16, out: W) -> Self {
        #[cfg(unix)]
        let resized = {
            let flag = Arc::new(AtomicBool::new(false));
            // Registration only fails on invalid signal numbers; a failed
            // registration just means no resize-triggered clears.
            let _ = signal_hook::flag::register(signal_hook::consts::SIGWINCH, Arc::clone(&flag));
            flag
        };
        Self {
            grid: CellGrid::new(columns, rows),
            out,
            #[cfg(unix)]
            resized,
            force_clear: true,
        }
    }

    pub fn grid(&self) -> &CellGrid {
        &self.grid
    }

    fn flush_frame(&mut self) -> io::Result<()> {
        #[cfg(unix)]
        if self.resized.swap(false, Ordering::SeqCst) {
            self.force_clear = true;
        }

        let mut frame = String::from("\x1b[?25l\x1b[H");
        if std::mem::take(&mut self.force_clear) {
            frame.push_str("\x1b[2J\x1b[H");
        }

        let mut last_colors: Option<ColorPair> = None;
        for y in 0..self.grid.rows() {
            if y > 0 {
                frame.push_str("\r\n");
            }
            for x in 0..self.grid.columns() {
                let Cell { glyph, colors } = self.grid.cell(x, y).unwrap_or_default();
                if last_colors != Some(colors) {
                    frame.push_str(&format!(
                        "\x1b[{};{}m",
                        colors.fg.ansi_fg(),
                        colors.bg.ansi_bg()
                    ));
                    last_colors = Some(colors);
                }
                frame.push(glyph);
            }
        }
        frame.push_str("\x1b[0m");

        self.out.write_all(frame.as_bytes())?;
        self.out.flush()
    }
}

impl<W: Write> DisplaySink for AnsiScreen<W> {
    fn columns(&self) -> u16 {
        self.grid.columns()
    }

    fn rows(&self) -> u16 {
        self.grid.rows()
    }

    fn put(&mut self, x: u16, y: u16, glyph: char, colors: ColorPair) {
        self.grid.put(x, y, glyph, colors);
    }

    fn present(&mut self) {
        if let Err(error) = self.flush_frame() {
            log_debug(&format!("terminal flush failed: {error}"));
        }
    }
}
