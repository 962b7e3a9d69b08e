// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Escape sequences emitted by the dashboard.
//!
//! Everything here is a pure builder or a constant. More info:
//! - <https://notes.burke.libbey.me/ansi-escape-codes/>
//! - <https://en.wikipedia.org/wiki/ANSI_escape_code>
//! - <https://vt100.net/docs/vt100-ug/chapter3.html#T3-9> (DEC special graphics)

use std::fmt::{Display, Formatter, Result};

use strum::IntoEnumIterator;
use strum_macros::EnumIter;

pub const ESC: char = '\x1b';
pub const BEL: char = '\x07';
pub const CSI: &str = "\x1b[";
pub const OSC: &str = "\x1b]";
const SGR: &str = "m";

/// Alternate screen buffer (DEC private mode 1049).
pub const ALT_SCREEN_ENTER: &str = "\x1b[?1049h";
pub const ALT_SCREEN_EXIT: &str = "\x1b[?1049l";

pub const CURSOR_SHOW: &str = "\x1b[?25h";
pub const CURSOR_HIDE: &str = "\x1b[?25l";
pub const CURSOR_BLINK_ON: &str = "\x1b[?12h";
pub const CURSOR_BLINK_OFF: &str = "\x1b[?12l";

pub const CLEAR_SCREEN: &str = "\x1b[2J";
pub const ERASE_LINE: &str = "\x1b[2K";

/// `ESC ( 0`: G0 is the DEC special graphics set, see [`BoxGlyph`].
pub const LINE_DRAWING_MODE: &str = "\x1b(0";
/// `ESC ( B`: G0 is ASCII again.
pub const ASCII_MODE: &str = "\x1b(B";

pub const SGR_RESET: &str = "\x1b[0m";

/// Longer window titles are truncated by [`window_title`].
pub const MAX_TITLE_LEN: usize = 256;

/// The 8 standard and 8 bright terminal colors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter)]
pub enum AnsiColor {
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
    BrightBlack,
    BrightRed,
    BrightGreen,
    BrightYellow,
    BrightBlue,
    BrightMagenta,
    BrightCyan,
    BrightWhite,
}

impl AnsiColor {
    const fn offset(self) -> u8 {
        match self {
            AnsiColor::Black | AnsiColor::BrightBlack => 0,
            AnsiColor::Red | AnsiColor::BrightRed => 1,
            AnsiColor::Green | AnsiColor::BrightGreen => 2,
            AnsiColor::Yellow | AnsiColor::BrightYellow => 3,
            AnsiColor::Blue | AnsiColor::BrightBlue => 4,
            AnsiColor::Magenta | AnsiColor::BrightMagenta => 5,
            AnsiColor::Cyan | AnsiColor::BrightCyan => 6,
            AnsiColor::White | AnsiColor::BrightWhite => 7,
        }
    }

    #[must_use]
    pub const fn is_bright(self) -> bool {
        matches!(
            self,
            AnsiColor::BrightBlack
                | AnsiColor::BrightRed
                | AnsiColor::BrightGreen
                | AnsiColor::BrightYellow
                | AnsiColor::BrightBlue
                | AnsiColor::BrightMagenta
                | AnsiColor::BrightCyan
                | AnsiColor::BrightWhite
        )
    }

    /// 30-37, or 90-97 for bright colors.
    #[must_use]
    pub const fn fg_param(self) -> u8 {
        if self.is_bright() { 90 + self.offset() } else { 30 + self.offset() }
    }

    /// 40-47, or 100-107 for bright colors.
    #[must_use]
    pub const fn bg_param(self) -> u8 {
        if self.is_bright() { 100 + self.offset() } else { 40 + self.offset() }
    }

    #[must_use]
    pub fn fg(self) -> String { SgrCode::Foreground(self).to_string() }

    #[must_use]
    pub fn bg(self) -> String { SgrCode::Background(self).to_string() }
}

/// SGR (Select Graphic Rendition) attributes and their "off" counterparts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SgrCode {
    Reset,
    Bold,
    BoldOff,
    Underline,
    UnderlineOff,
    Blink,
    BlinkOff,
    Negative,
    NegativeOff,
    Strike,
    StrikeOff,
    Overline,
    OverlineOff,
    Foreground(AnsiColor),
    Background(AnsiColor),
    ForegroundAnsi256(u8),
    BackgroundAnsi256(u8),
}

impl Display for SgrCode {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        f.write_str(CSI)?;
        match *self {
            SgrCode::Reset => f.write_str("0")?,
            SgrCode::Bold => f.write_str("1")?,
            SgrCode::BoldOff => f.write_str("22")?,
            SgrCode::Underline => f.write_str("4")?,
            SgrCode::UnderlineOff => f.write_str("24")?,
            SgrCode::Blink => f.write_str("5")?,
            SgrCode::BlinkOff => f.write_str("25")?,
            SgrCode::Negative => f.write_str("7")?,
            SgrCode::NegativeOff => f.write_str("27")?,
            SgrCode::Strike => f.write_str("9")?,
            SgrCode::StrikeOff => f.write_str("29")?,
            SgrCode::Overline => f.write_str("53")?,
            SgrCode::OverlineOff => f.write_str("55")?,
            SgrCode::Foreground(color) => write!(f, "{}", color.fg_param())?,
            SgrCode::Background(color) => write!(f, "{}", color.bg_param())?,
            SgrCode::ForegroundAnsi256(index) => write!(f, "38;5;{index}")?,
            SgrCode::BackgroundAnsi256(index) => write!(f, "48;5;{index}")?,
        }
        f.write_str(SGR)
    }
}

#[must_use]
pub fn fg_256(index: u8) -> String { SgrCode::ForegroundAnsi256(index).to_string() }

#[must_use]
pub fn bg_256(index: u8) -> String { SgrCode::BackgroundAnsi256(index).to_string() }

/// Move the cursor to the 0-based `(x, y)`. The terminal is 1-based, so this emits
/// `CSI y+1 ; x+1 H`.
#[must_use]
pub fn cursor_to(x: u16, y: u16) -> String {
    format!("{CSI}{};{}H", u32::from(y) + 1, u32::from(x) + 1)
}

/// `OSC 0 ; title BEL`. Payloads longer than [`MAX_TITLE_LEN`] characters are
/// truncated. Control characters are dropped since they would terminate the sequence.
#[must_use]
pub fn window_title(title: &str) -> String {
    let payload: String = title
        .chars()
        .filter(|it| !it.is_control())
        .take(MAX_TITLE_LEN)
        .collect();
    format!("{OSC}0;{payload}{BEL}")
}

/// Wrap `text` so it is drawn from the DEC special graphics set.
#[must_use]
pub fn line_drawing(text: &str) -> String { format!("{LINE_DRAWING_MODE}{text}{ASCII_MODE}") }

/// Box drawing glyphs in the DEC special graphics set. Only meaningful between
/// [`LINE_DRAWING_MODE`] and [`ASCII_MODE`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter)]
pub enum BoxGlyph {
    /// `┌`
    TopLeft,
    /// `┐`
    TopRight,
    /// `└`
    BottomLeft,
    /// `┘`
    BottomRight,
    /// `├`
    TeeRight,
    /// `┤`
    TeeLeft,
    /// `─`
    Horizontal,
    /// `│`
    Vertical,
}

impl BoxGlyph {
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            BoxGlyph::TopLeft => 'l',
            BoxGlyph::TopRight => 'k',
            BoxGlyph::BottomLeft => 'm',
            BoxGlyph::BottomRight => 'j',
            BoxGlyph::TeeRight => 't',
            BoxGlyph::TeeLeft => 'u',
            BoxGlyph::Horizontal => 'q',
            BoxGlyph::Vertical => 'x',
        }
    }

    /// The glyph drawn by `ch` in line drawing mode, if any.
    #[must_use]
    pub fn from_char(ch: char) -> Option<Self> { Self::iter().find(|it| it.as_char() == ch) }

    /// Plain ASCII stand-in for terminals without the DEC special graphics set.
    #[must_use]
    pub const fn ascii_fallback(self) -> char {
        match self {
            BoxGlyph::Horizontal => '-',
            BoxGlyph::Vertical => '|',
            BoxGlyph::TopLeft
            | BoxGlyph::TopRight
            | BoxGlyph::BottomLeft
            | BoxGlyph::BottomRight
            | BoxGlyph::TeeRight
            | BoxGlyph::TeeLeft => '+',
        }
    }
}
