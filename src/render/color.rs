//! 16-color character-cell attributes.
//!
//! The palette is the classic text-mode set; frontends map it to whatever
//! their output device supports (see `Color::ansi_fg`/`ansi_bg` for the
//! SGR mapping used by the POSIX terminal frontend).

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[repr(u8)]
pub enum Color {
    Black = 0,
    Blue,
    Green,
    Cyan,
    Red,
    Magenta,
    Brown,
    LightGray,
    DarkGray,
    LightBlue,
    LightGreen,
    LightCyan,
    LightRed,
    Pink,
    Yellow,
    White,
}

impl Color {
    /// ANSI 16-color index (text-mode palette order differs from ANSI's).
    fn ansi_index(self) -> u8 {
        match self {
            Color::Black => 0,
            Color::Blue => 4,
            Color::Green => 2,
            Color::Cyan => 6,
            Color::Red => 1,
            Color::Magenta => 5,
            Color::Brown => 3,
            Color::LightGray => 7,
            Color::DarkGray => 8,
            Color::LightBlue => 12,
            Color::LightGreen => 10,
            Color::LightCyan => 14,
            Color::LightRed => 9,
            Color::Pink => 13,
            Color::Yellow => 11,
            Color::White => 15,
        }
    }

    /// SGR code selecting this color as the foreground.
    pub fn ansi_fg(self) -> u8 {
        let index = self.ansi_index();
        if index < 8 {
            30 + index
        } else {
            90 + index - 8
        }
    }

    /// SGR code selecting this color as the background.
    pub fn ansi_bg(self) -> u8 {
        let index = self.ansi_index();
        if index < 8 {
            40 + index
        } else {
            100 + index - 8
        }
    }
}

/// Foreground/background attribute pair for one cell.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct ColorPair {
    pub fg: Color,
    pub bg: Color,
}

impl ColorPair {
    pub const fn new(fg: Color, bg: Color) -> Self {
        Self { fg, bg }
    }
}

impl Default for ColorPair {
    fn default() -> Self {
        Self::new(Color::LightGray, Color::Black)
    }
}
