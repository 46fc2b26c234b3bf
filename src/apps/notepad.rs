//! Line editor with a modal save dialog.

use crate::core::input::Key;
use crate::render::text::{byte_index_at, grapheme_len, pop_grapheme};
use crate::store::FileStore;

/// Document depth.
pub const MAX_LINES: usize = 20;
/// Insertion stops at this cursor column.
pub const MAX_LINE_COLS: usize = 55;
/// Loaded lines are clipped to this many columns.
pub const LOAD_LINE_COLS: usize = 59;
/// Save-dialog filename buffer bound.
pub const MAX_FILENAME_COLS: usize = 30;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Mode {
    Edit,
    SaveDialog,
}

/// Bounded multi-line editor.
///
/// Two modes: normal editing, and a save dialog that redirects keystrokes to
/// a filename buffer. F2 saves (prompting only when no filename is bound),
/// F3 always prompts (save-as).
#[derive(Debug)]
pub struct Notepad {
    lines: Vec<String>,
    cursor_line: usize,
    cursor_col: usize,
    filename: Option<String>,
    mode: Mode,
    save_buffer: String,
}

impl Default for Notepad {
    fn default() -> Self {
        Self::new()
    }
}

impl Notepad {
    pub fn new() -> Self {
        Self {
            lines: vec![String::new()],
            cursor_line: 0,
            cursor_col: 0,
            filename: None,
            mode: Mode::Edit,
            save_buffer: String::new(),
        }
    }

    pub fn filename(&self) -> Option<&str> {
        self.filename.as_deref()
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn in_save_dialog(&self) -> bool {
        self.mode == Mode::SaveDialog
    }

    /// Replaces the document with a stored payload: lossy UTF-8, split on
    /// `\n`, clipped to the line and column bounds, cursor reset to the
    /// origin, filename bound.
    pub fn load(&mut self, name: &str, bytes: &[u8]) {
        let text = String::from_utf8_lossy(bytes);
        self.lines = text
            .split('\n')
            .take(MAX_LINES)
            .map(|line| {
                let end = byte_index_at(line, LOAD_LINE_COLS);
                line[..end].to_string()
            })
            .collect();
        if self.lines.is_empty() {
            self.lines.push(String::new());
        }
        self.cursor_line = 0;
        self.cursor_col = 0;
        self.filename = Some(name.to_string());
        self.mode = Mode::Edit;
    }

    pub fn handle_key(&mut self, store: &mut FileStore, key: Key) {
        match key {
            // F2: save, prompting only when unbound. F3: always prompt.
            Key::Function(2) => {
                if self.filename.is_some() {
                    self.save(store);
                } else {
                    self.open_save_dialog();
                }
            }
            Key::Function(3) => self.open_save_dialog(),
            _ if self.mode == Mode::SaveDialog => self.handle_dialog_key(store, key),
            _ => self.handle_edit_key(key),
        }
    }

    fn open_save_dialog(&mut self) {
        self.mode = Mode::SaveDialog;
        self.save_buffer.clear();
    }

    fn handle_dialog_key(&mut self, store: &mut FileStore, key: Key) {
        match key {
            Key::Enter => {
                if !self.save_buffer.is_empty() {
                    self.filename = Some(self.save_buffer.clone());
                    self.save(store);
                }
                self.mode = Mode::Edit;
            }
            Key::Escape => self.mode = Mode::Edit,
            Key::Backspace => pop_grapheme(&mut self.save_buffer),
            _ => {
                if let Some(c) = key.printable() {
                    if grapheme_len(&self.save_buffer) < MAX_FILENAME_COLS {
                        self.save_buffer.push(c);
                    }
                }
            }
        }
    }

    fn handle_edit_key(&mut self, key: Key) {
        match key {
            Key::Backspace => {
                if self.cursor_col > 0 {
                    let line = &mut self.lines[self.cursor_line];
                    let start = byte_index_at(line, self.cursor_col - 1);
                    let end = byte_index_at(line, self.cursor_col);
                    line.replace_range(start..end, "");
                    self.cursor_col -= 1;
                }
            }
            // Enter moves to the next line without splitting; the line count
            // grows when the cursor moves past the last existing line.
            Key::Enter => {
                if self.cursor_line < MAX_LINES - 1 {
                    self.cursor_line += 1;
                    self.cursor_col = 0;
                    if self.cursor_line >= self.lines.len() {
                        self.lines.push(String::new());
                    }
                }
            }
            _ => {
                if let Some(c) = key.printable() {
                    if self.cursor_col < MAX_LINE_COLS {
                        let line = &mut self.lines[self.cursor_line];
                        let at = byte_index_at(line, self.cursor_col);
                        line.insert(at, c);
                        self.cursor_col += 1;
                    }
                }
            }
        }
    }

    /// Joins the document with `\n` separators and writes it; the store
    /// truncates to its per-file capacity. Requires a bound filename.
    fn save(&mut self, store: &mut FileStore) {
        if let Some(name) = &self.filename {
            let _ = store.write(name, self.document_bytes().as_slice());
        }
    }

    fn document_bytes(&self) -> Vec<u8> {
        self.lines.join("\n").into_bytes()
    }

    pub fn render(&self) -> Vec<String> {
        if self.mode == Mode::SaveDialog {
            return vec![
                "Save As - Enter filename:".to_string(),
                String::new(),
                format!("Filename: {}_", self.save_buffer),
                String::new(),
                "Press ENTER to save, ESC to cancel".to_string(),
            ];
        }

        let mut out = Vec::with_capacity(12);
        match &self.filename {
            Some(name) => out.push(format!("File: {name}")),
            None => out.push("Unsaved Document".to_string()),
        }
        out.push("F2:Save  F3:Save As".to_string());
        out.push("----------------------------".to_string());

        let start = self.cursor_line.saturating_sub(8);
        let end = self.lines.len().min(start + 9);
        for (index, line) in self.lines[start..end].iter().enumerate() {
            if start + index == self.cursor_line {
                let at = byte_index_at(line, self.cursor_col);
                out.push(format!("{}_{}", &line[..at], &line[at..]));
            } else if line.is_empty() {
                out.push(" ".to_string());
            } else {
                out.push(line.clone());
            }
        }
        out
    }
}
