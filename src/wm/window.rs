//! Window records and identifiers.

use crate::core::pool::Handle;
use crate::render::text::clip_to_width;
use crate::render::ColorPair;

/// Number of window slots.
pub const MAX_WINDOWS: usize = 10;
/// Per-window text buffer depth.
pub const MAX_WINDOW_TEXT_LINES: usize = 20;
/// Buffered lines are truncated to this many display columns.
pub const MAX_WINDOW_TEXT_COLS: usize = 80;
/// Titles are truncated to this many characters.
pub const MAX_TITLE_LEN: usize = 31;

/// Generation-checked identifier for a window slot.
///
/// A `WindowId` addressing a closed-and-reused slot fails lookup instead of
/// aliasing the new window, so a queued event racing a just-closed window
/// degrades to a dropped keystroke.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct WindowId(pub(crate) Handle);

impl WindowId {
    /// Slot position; stable while the window lives.
    pub fn index(self) -> usize {
        self.0.index()
    }
}

/// A bordered rectangle with a title and a bounded text buffer.
///
/// Geometry is owned by the window manager; applications only reach it
/// through the manager's move operation.
#[derive(Debug)]
pub struct Window {
    pub(crate) x: u16,
    pub(crate) y: u16,
    pub(crate) width: u16,
    pub(crate) height: u16,
    pub(crate) title: String,
    pub(crate) colors: ColorPair,
    pub(crate) focused: bool,
    pub(crate) lines: Vec<String>,
}

impl Window {
    pub(crate) fn new(
        x: u16,
        y: u16,
        width: u16,
        height: u16,
        title: &str,
        colors: ColorPair,
    ) -> Self {
        Self {
            x,
            y,
            width,
            height,
            title: title.chars().take(MAX_TITLE_LEN).collect(),
            colors,
            focused: false,
            lines: Vec::new(),
        }
    }

    /// Appends one line, truncated to the column bound; dropped when the
    /// buffer is full.
    pub(crate) fn push_line(&mut self, text: &str) {
        if self.lines.len() >= MAX_WINDOW_TEXT_LINES {
            return;
        }
        self.lines
            .push(clip_to_width(text, MAX_WINDOW_TEXT_COLS).to_string());
    }

    pub fn x(&self) -> u16 {
        self.x
    }

    pub fn y(&self) -> u16 {
        self.y
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn colors(&self) -> ColorPair {
        self.colors
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }
}
