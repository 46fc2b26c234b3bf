//! Window manager: slot table, focus, move mode, composition.

use thiserror::Error;

use crate::core::pool::Pool;
use crate::render::sink::{draw_box, put_str};
use crate::render::text::clip_to_width;
use crate::render::{Color, ColorPair, DisplaySink};
use crate::wm::window::{Window, WindowId, MAX_WINDOWS};

/// Border colors of the focused window.
pub const FOCUS_BORDER: ColorPair = ColorPair::new(Color::White, Color::Red);

#[derive(Debug, Error, Eq, PartialEq)]
pub enum WindowError {
    #[error("no free window slot")]
    NoFreeSlot,
}

/// Owner of every window record.
///
/// Invariants:
/// - At most one live window is focused, and the focused id is always live.
/// - Geometry changes only through [`WindowManager::move_focused`], which is
///   gated by the manager-wide move mode.
pub struct WindowManager {
    windows: Pool<Window>,
    focused: Option<WindowId>,
    columns: u16,
    rows: u16,
    move_mode: bool,
}

impl Default for WindowManager {
    fn default() -> Self {
        Self::new(80, 25)
    }
}

impl WindowManager {
    pub fn new(columns: u16, rows: u16) -> Self {
        Self {
            windows: Pool::with_capacity(MAX_WINDOWS),
            focused: None,
            columns,
            rows,
            move_mode: false,
        }
    }

    /// Logical display size used for move clamping.
    pub fn display_size(&self) -> (u16, u16) {
        (self.columns, self.rows)
    }

    /// Allocates the first free slot. Does not focus the new window.
    pub fn create_window(
        &mut self,
        x: u16,
        y: u16,
        width: u16,
        height: u16,
        title: &str,
        colors: ColorPair,
    ) -> Result<WindowId, WindowError> {
        self.windows
            .insert(Window::new(x, y, width, height, title, colors))
            .map(WindowId)
            .ok_or(WindowError::NoFreeSlot)
    }

    /// Closes a window; transfers focus to the first remaining live window
    /// in slot order. No-op on a stale id.
    pub fn close_window(&mut self, id: WindowId) {
        if self.windows.remove(id.0).is_none() {
            return;
        }
        if self.focused == Some(id) {
            self.focused = None;
            if let Some(next) = self.first_live() {
                self.focus_window(next);
            }
        }
    }

    pub fn close_all_windows(&mut self) {
        self.windows.clear();
        self.focused = None;
    }

    /// Focuses a live window; silently ignored otherwise.
    pub fn focus_window(&mut self, id: WindowId) {
        if !self.windows.contains(id.0) {
            return;
        }
        for (_, window) in self.windows.iter_mut() {
            window.focused = false;
        }
        if let Some(window) = self.windows.get_mut(id.0) {
            window.focused = true;
        }
        self.focused = Some(id);
    }

    /// Advances focus to the next live window after the focused slot,
    /// wrapping around. No-op when nothing is live.
    pub fn cycle_focus(&mut self) {
        if self.windows.live() == 0 {
            return;
        }
        let start = self
            .focused
            .map(|id| (id.index() + 1) % MAX_WINDOWS)
            .unwrap_or(0);
        for offset in 0..MAX_WINDOWS {
            let index = (start + offset) % MAX_WINDOWS;
            if let Some(handle) = self.windows.handle_at(index) {
                self.focus_window(WindowId(handle));
                return;
            }
        }
    }

    pub fn focused(&self) -> Option<WindowId> {
        self.focused
    }

    pub fn active_count(&self) -> usize {
        self.windows.live()
    }

    pub fn window(&self, id: WindowId) -> Option<&Window> {
        self.windows.get(id.0)
    }

    /// Live windows in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (WindowId, &Window)> {
        self.windows
            .iter()
            .map(|(handle, window)| (WindowId(handle), window))
    }

    /// Appends one line to the window's text buffer; silently dropped when
    /// the buffer is full or the id is stale.
    pub fn add_window_text(&mut self, id: WindowId, text: &str) {
        if let Some(window) = self.windows.get_mut(id.0) {
            window.push_line(text);
        }
    }

    /// Resets the text buffer ahead of a render pass (full-buffer replace).
    pub fn clear_window_text(&mut self, id: WindowId) {
        if let Some(window) = self.windows.get_mut(id.0) {
            window.lines.clear();
        }
    }

    pub fn move_mode(&self) -> bool {
        self.move_mode
    }

    pub fn set_move_mode(&mut self, enabled: bool) {
        self.move_mode = enabled;
    }

    /// Shifts the focused window one cell, clamped so it stays on the
    /// display, below the menu row, and above the hint row. Returns whether
    /// anything moved; a no-op unless move mode is on.
    pub fn move_focused(&mut self, dx: i32, dy: i32) -> bool {
        if !self.move_mode {
            return false;
        }
        let Some(id) = self.focused else {
            return false;
        };
        let (columns, rows) = (self.columns, self.rows);
        let Some(window) = self.windows.get_mut(id.0) else {
            return false;
        };

        if dy < 0 && window.y > 1 {
            window.y -= 1;
            true
        } else if dy > 0 && window.y + window.height < rows.saturating_sub(1) {
            window.y += 1;
            true
        } else if dx < 0 && window.x > 0 {
            window.x -= 1;
            true
        } else if dx > 0 && window.x + window.width < columns {
            window.x += 1;
            true
        } else {
            false
        }
    }

    /// Composes one window onto the sink: border, title, buffered lines.
    pub fn draw_window(&self, id: WindowId, sink: &mut dyn DisplaySink) {
        if let Some(window) = self.windows.get(id.0) {
            draw_one(window, sink);
        }
    }

    /// Composes every live window, unfocused first in slot order, focused
    /// last, so the focused window wins every overlap.
    pub fn draw_all_windows(&self, sink: &mut dyn DisplaySink) {
        for (_, window) in self.windows.iter() {
            if !window.focused {
                draw_one(window, sink);
            }
        }
        if let Some(id) = self.focused {
            if let Some(window) = self.windows.get(id.0) {
                draw_one(window, sink);
            }
        }
    }
}

impl WindowManager {
    fn first_live(&self) -> Option<WindowId> {
        self.windows.iter().next().map(|(handle, _)| WindowId(handle))
    }
}

fn draw_one(window: &Window, sink: &mut dyn DisplaySink) {
    let border = if window.focused {
        FOCUS_BORDER
    } else {
        window.colors
    };

    draw_box(sink, window.x, window.y, window.width, window.height, border);

    let title_cols = window.width.saturating_sub(3) as usize;
    put_str(
        sink,
        window.x + 2,
        window.y,
        clip_to_width(&window.title, title_cols),
        border,
    );

    let interior_cols = window.width.saturating_sub(2) as usize;
    let visible = window.height.saturating_sub(2) as usize;
    for (row, line) in window.lines.iter().take(visible).enumerate() {
        put_str(
            sink,
            window.x + 1,
            window.y + 1 + row as u16,
            clip_to_width(line, interior_cols),
            window.colors,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::{WindowError, WindowManager, FOCUS_BORDER};
    use crate::render::{CellGrid, Color, ColorPair};

    const COLORS: ColorPair = ColorPair::new(Color::Black, Color::White);

    fn manager() -> WindowManager {
        WindowManager::new(80, 25)
    }

    #[test]
    fn create_does_not_auto_focus() {
        let mut wm = manager();
        let id = wm.create_window(1, 1, 10, 5, "a", COLORS).unwrap();
        assert_eq!(wm.focused(), None);
        assert!(!wm.window(id).unwrap().is_focused());
    }

    #[test]
    fn at_most_one_window_is_focused() {
        let mut wm = manager();
        let a = wm.create_window(0, 1, 10, 5, "a", COLORS).unwrap();
        let b = wm.create_window(5, 3, 10, 5, "b", COLORS).unwrap();
        wm.focus_window(a);
        wm.focus_window(b);

        let focused: Vec<_> = wm.iter().filter(|(_, w)| w.is_focused()).collect();
        assert_eq!(focused.len(), 1);
        assert_eq!(wm.focused(), Some(b));
    }

    #[test]
    fn closing_the_focused_window_repairs_focus() {
        let mut wm = manager();
        let a = wm.create_window(0, 1, 10, 5, "a", COLORS).unwrap();
        let b = wm.create_window(5, 3, 10, 5, "b", COLORS).unwrap();
        wm.focus_window(b);
        wm.close_window(b);

        assert_eq!(wm.focused(), Some(a));
        assert!(wm.window(a).unwrap().is_focused());

        wm.close_window(a);
        assert_eq!(wm.focused(), None);
        assert_eq!(wm.active_count(), 0);
    }

    #[test]
    fn stale_ids_are_silent_no_ops() {
        let mut wm = manager();
        let a = wm.create_window(0, 1, 10, 5, "a", COLORS).unwrap();
        wm.close_window(a);
        // Slot 0 is reoccupied; the stale id must not alias it.
        let b = wm.create_window(0, 1, 10, 5, "b", COLORS).unwrap();
        assert_eq!(a.index(), b.index());

        wm.focus_window(a);
        assert_eq!(wm.focused(), None);
        assert!(wm.window(a).is_none());
        wm.add_window_text(a, "dropped");
        assert!(wm.window(b).unwrap().lines().is_empty());
    }

    #[test]
    fn cycle_focus_wraps_in_slot_order() {
        let mut wm = manager();
        let a = wm.create_window(0, 1, 10, 5, "a", COLORS).unwrap();
        let b = wm.create_window(5, 3, 10, 5, "b", COLORS).unwrap();
        let c = wm.create_window(9, 5, 10, 5, "c", COLORS).unwrap();

        wm.cycle_focus();
        assert_eq!(wm.focused(), Some(a));
        wm.cycle_focus();
        assert_eq!(wm.focused(), Some(b));
        wm.close_window(b);
        wm.cycle_focus();
        assert_eq!(wm.focused(), Some(c));
        wm.cycle_focus();
        assert_eq!(wm.focused(), Some(a));
    }

    #[test]
    fn capacity_is_enforced() {
        let mut wm = manager();
        for i in 0..super::MAX_WINDOWS {
            wm.create_window(0, 1, 4, 3, &format!("w{i}"), COLORS).unwrap();
        }
        assert_eq!(
            wm.create_window(0, 1, 4, 3, "extra", COLORS),
            Err(WindowError::NoFreeSlot)
        );
        assert_eq!(wm.active_count(), super::MAX_WINDOWS);
    }

    #[test]
    fn move_is_gated_by_move_mode_and_clamped() {
        let mut wm = manager();
        let id = wm.create_window(0, 1, 10, 5, "a", COLORS).unwrap();
        wm.focus_window(id);

        assert!(!wm.move_focused(-1, 0));
        wm.set_move_mode(true);
        // Already at the left edge and the menu row.
        assert!(!wm.move_focused(-1, 0));
        assert!(!wm.move_focused(0, -1));
        assert!(wm.move_focused(1, 0));
        assert!(wm.move_focused(0, 1));
        let window = wm.window(id).unwrap();
        assert_eq!((window.x(), window.y()), (1, 2));
    }

    #[test]
    fn focused_window_paints_last_on_overlap() {
        let mut wm = manager();
        let back = wm.create_window(2, 2, 12, 6, "back", COLORS).unwrap();
        let front = wm
            .create_window(4, 4, 12, 6, "front", ColorPair::new(Color::White, Color::Cyan))
            .unwrap();
        wm.focus_window(front);
        let _ = back;

        let mut grid = CellGrid::new(80, 25);
        wm.draw_all_windows(&mut grid);

        // (4, 4) is inside `back` but is `front`'s top-left corner; the
        // focused window must win the overlap with its highlight border.
        let cell = grid.cell(4, 4).unwrap();
        assert_eq!(cell.glyph, '+');
        assert_eq!(cell.colors, FOCUS_BORDER);
    }

    #[test]
    fn window_content_is_clipped_to_its_width() {
        let mut wm = manager();
        let id = wm.create_window(0, 1, 8, 4, "t", COLORS).unwrap();
        wm.add_window_text(id, "0123456789abcdef");

        let mut grid = CellGrid::new(80, 25);
        wm.draw_window(id, &mut grid);
        // Interior is 6 columns; the border must survive on both sides.
        assert_eq!(grid.row_text(2).trim_end(), "|012345|");
    }
}
