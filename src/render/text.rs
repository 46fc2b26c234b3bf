//! Width- and grapheme-aware text helpers.

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthChar;

/// Longest prefix of `text` that fits in `max_columns` display columns.
pub fn clip_to_width(text: &str, max_columns: usize) -> &str {
    let mut used = 0;
    for (index, ch) in text.char_indices() {
        let width = UnicodeWidthChar::width(ch).unwrap_or(0);
        if used + width > max_columns {
            return &text[..index];
        }
        used += width;
    }
    text
}

/// Removes the last grapheme, if any.
pub fn pop_grapheme(text: &mut String) {
    if let Some((index, _)) = text.grapheme_indices(true).next_back() {
        text.truncate(index);
    }
}

/// Number of graphemes in `text`.
pub fn grapheme_len(text: &str) -> usize {
    text.graphemes(true).count()
}

/// Byte offset of the grapheme at `column`, or the text length past the end.
pub fn byte_index_at(text: &str, column: usize) -> usize {
    text.grapheme_indices(true)
        .nth(column)
        .map(|(index, _)| index)
        .unwrap_or(text.len())
}

#[cfg(test)]
mod tests {
    use super::{byte_index_at, clip_to_width, grapheme_len, pop_grapheme};

    #[test]
    fn clip_respects_display_columns() {
        assert_eq!(clip_to_width("hello", 3), "hel");
        assert_eq!(clip_to_width("hello", 10), "hello");
        // Wide CJK glyphs occupy two columns each.
        assert_eq!(clip_to_width("你好", 3), "你");
    }

    #[test]
    fn pop_grapheme_removes_whole_clusters() {
        let mut text = String::from("ab");
        pop_grapheme(&mut text);
        assert_eq!(text, "a");

        let mut accented = String::from("e\u{301}");
        pop_grapheme(&mut accented);
        assert_eq!(accented, "");

        let mut empty = String::new();
        pop_grapheme(&mut empty);
        assert_eq!(empty, "");
    }

    #[test]
    fn byte_index_tracks_grapheme_columns() {
        assert_eq!(byte_index_at("abc", 0), 0);
        assert_eq!(byte_index_at("abc", 2), 2);
        assert_eq!(byte_index_at("abc", 5), 3);
        assert_eq!(grapheme_len("abc"), 3);
    }
}
