//! Display sink contract and cell-level drawing helpers.

use unicode_width::UnicodeWidthChar;

use crate::render::color::ColorPair;

/// Character-cell output device.
///
/// The core computes every cell it wants drawn and performs no physical I/O;
/// implementations decide what a cell write means. Writes outside the sink's
/// bounds must be ignored, so callers can draw partially visible content
/// without pre-clipping.
pub trait DisplaySink {
    fn columns(&self) -> u16;
    fn rows(&self) -> u16;
    fn put(&mut self, x: u16, y: u16, glyph: char, colors: ColorPair);

    /// Commits the composed frame to the output device. No-op by default;
    /// offscreen sinks have nothing to commit.
    fn present(&mut self) {}
}

/// Writes a string starting at `(x, y)`, advancing by display width and
/// stopping at the sink's right edge.
pub fn put_str(sink: &mut dyn DisplaySink, x: u16, y: u16, text: &str, colors: ColorPair) {
    if y >= sink.rows() {
        return;
    }
    let mut column = x;
    for ch in text.chars() {
        let width = UnicodeWidthChar::width(ch).unwrap_or(0) as u16;
        if width == 0 {
            continue;
        }
        if column >= sink.columns() {
            return;
        }
        sink.put(column, y, ch, colors);
        column = column.saturating_add(width);
    }
}

/// Fills a rectangle with one glyph.
pub fn fill_rect(
    sink: &mut dyn DisplaySink,
    x: u16,
    y: u16,
    width: u16,
    height: u16,
    glyph: char,
    colors: ColorPair,
) {
    for row in y..y.saturating_add(height) {
        for col in x..x.saturating_add(width) {
            sink.put(col, row, glyph, colors);
        }
    }
}

/// Draws a `+`/`-`/`|` box with a space-filled interior.
pub fn draw_box(sink: &mut dyn DisplaySink, x: u16, y: u16, width: u16, height: u16, colors: ColorPair) {
    if width < 2 || height < 2 {
        return;
    }
    let right = x + width - 1;
    let bottom = y + height - 1;

    sink.put(x, y, '+', colors);
    for col in x + 1..right {
        sink.put(col, y, '-', colors);
    }
    sink.put(right, y, '+', colors);

    for row in y + 1..bottom {
        sink.put(x, row, '|', colors);
        sink.put(right, row, '|', colors);
        for col in x + 1..right {
            sink.put(col, row, ' ', colors);
        }
    }

    sink.put(x, bottom, '+', colors);
    for col in x + 1..right {
        sink.put(col, bottom, '-', colors);
    }
    sink.put(right, bottom, '+', colors);
}

#[cfg(test)]
mod tests {
    use super::{draw_box, put_str};
    use crate::render::color::{Color, ColorPair};
    use crate::render::grid::CellGrid;

    const COLORS: ColorPair = ColorPair::new(Color::White, Color::Blue);

    #[test]
    fn put_str_clips_at_right_edge() {
        let mut grid = CellGrid::new(5, 2);
        put_str(&mut grid, 3, 0, "abcdef", COLORS);
        assert_eq!(grid.row_text(0), "   ab");
        assert_eq!(grid.row_text(1), "     ");
    }

    #[test]
    fn draw_box_outline_and_interior() {
        let mut grid = CellGrid::new(6, 4);
        draw_box(&mut grid, 1, 0, 4, 3, COLORS);
        assert_eq!(grid.row_text(0), " +--+ ");
        assert_eq!(grid.row_text(1), " |  | ");
        assert_eq!(grid.row_text(2), " +--+ ");
    }

    #[test]
    fn degenerate_boxes_are_skipped() {
        let mut grid = CellGrid::new(4, 2);
        draw_box(&mut grid, 0, 0, 1, 2, COLORS);
        assert_eq!(grid.row_text(0), "    ");
    }
}
