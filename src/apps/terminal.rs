//! Command shell: an input line feeding a bounded scrollback.

use crate::core::input::Key;
use crate::render::text::{clip_to_width, grapheme_len, pop_grapheme};
use crate::store::FileStore;

/// Scrollback depth; output beyond this is silently dropped.
pub const MAX_SCROLLBACK: usize = 16;
/// Input line bound.
pub const MAX_INPUT_COLS: usize = 58;
/// Scrollback lines visible at once.
const VISIBLE_LINES: usize = 12;

const VERSION_LINE: &str = concat!(
    "textdesk v",
    env!("CARGO_PKG_VERSION"),
    " - in-memory file store"
);

const HELP_LINES: [&str; 5] = [
    "Available commands:",
    "  help  - Show this help",
    "  ver   - Show version",
    "  clear - Clear screen",
    "  ls    - List files",
];

/// Minimal command shell.
#[derive(Debug, Default)]
pub struct Terminal {
    scrollback: Vec<String>,
    input: String,
}

impl Terminal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn scrollback(&self) -> &[String] {
        &self.scrollback
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn handle_key(&mut self, store: &FileStore, key: Key) {
        match key {
            Key::Enter => {
                if !self.input.is_empty() {
                    let command = std::mem::take(&mut self.input);
                    self.push_line(clip_to_width(&format!("> {command}"), MAX_INPUT_COLS));
                    self.dispatch(&command, store);
                }
            }
            Key::Backspace => pop_grapheme(&mut self.input),
            _ => {
                if let Some(c) = key.printable() {
                    if grapheme_len(&self.input) < MAX_INPUT_COLS {
                        self.input.push(c);
                    }
                }
            }
        }
    }

    /// Prefix dispatch in a fixed order, kept from the original behavior:
    /// `starts_with` matching means "helpme" runs `help` and "lsx" runs `ls`.
    fn dispatch(&mut self, command: &str, store: &FileStore) {
        if command.starts_with("help") {
            for line in HELP_LINES {
                self.push_line(line);
            }
        } else if command.starts_with("ver") {
            self.push_line(VERSION_LINE);
        } else if command.starts_with("ls") {
            let names = store.list();
            if names.is_empty() {
                self.push_line("No files found.");
            } else {
                for name in names {
                    self.push_line(&name);
                }
            }
        } else if command.starts_with("clear") {
            self.scrollback.clear();
        } else {
            self.push_line("Unknown command. Type 'help'");
        }
    }

    fn push_line(&mut self, line: &str) {
        if self.scrollback.len() < MAX_SCROLLBACK {
            self.scrollback.push(line.to_string());
        }
    }

    pub fn render(&self) -> Vec<String> {
        let mut out = vec![
            "textdesk terminal".to_string(),
            "Type 'help' for commands".to_string(),
            "========================".to_string(),
        ];
        let start = self.scrollback.len().saturating_sub(VISIBLE_LINES);
        out.extend(self.scrollback[start..].iter().cloned());
        out.push(format!("> {}_", self.input));
        out
    }
}
