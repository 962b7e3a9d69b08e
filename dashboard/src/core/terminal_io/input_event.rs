// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Canonical input events. Every backend decodes its platform format (VT100 bytes,
//! crossterm events, cooked lines) into [`InputEvent`], so nothing above
//! [`crate::TerminalDevice`] knows which terminal it is talking to.

use std::{fmt::{Display, Formatter},
          ops::{BitAnd, BitOr, Not},
          str::FromStr};

use crate::DashboardError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    Keyboard(KeyPress),
    /// Emitted for every change of mouse button state, press and release. Carries the
    /// *current* button state, the manager remembers the previous one.
    Click(MouseClick),
    MouseMove { x: u16, y: u16 },
    Resize { width: u16, height: u16 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MouseClick {
    pub buttons: MouseButtons,
    pub x: u16,
    pub y: u16,
    pub mask: ModifierKeysMask,
}

impl MouseClick {
    /// `true` if a button held in `previous` is not held anymore. Presses and drags
    /// (where no bit is dropped) are never dispatched as clicks.
    #[must_use]
    pub fn is_release_of(&self, previous: MouseButtons) -> bool {
        !(previous & !self.buttons).is_empty()
    }
}

/// Bitmask of held mouse buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct MouseButtons(pub u8);

impl MouseButtons {
    pub const NONE: MouseButtons = MouseButtons(0);
    pub const LEFT: MouseButtons = MouseButtons(1);
    pub const RIGHT: MouseButtons = MouseButtons(2);
    pub const MIDDLE: MouseButtons = MouseButtons(4);

    #[must_use]
    pub const fn is_empty(self) -> bool { self.0 == 0 }

    #[must_use]
    pub const fn contains(self, other: MouseButtons) -> bool { self.0 & other.0 == other.0 }
}

impl BitOr for MouseButtons {
    type Output = Self;
    fn bitor(self, rhs: Self) -> Self { MouseButtons(self.0 | rhs.0) }
}

impl BitAnd for MouseButtons {
    type Output = Self;
    fn bitand(self, rhs: Self) -> Self { MouseButtons(self.0 & rhs.0) }
}

impl Not for MouseButtons {
    type Output = Self;
    fn not(self) -> Self { MouseButtons(!self.0) }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyPress {
    pub key: Key,
    pub mask: ModifierKeysMask,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// Printable character. For `Shift + x` this is `X` and the shift bit is not set.
    Character(char),
    SpecialKey(SpecialKey),
    FunctionKey(u8),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpecialKey {
    Backspace,
    Enter,
    Left,
    Right,
    Up,
    Down,
    Home,
    End,
    PageUp,
    PageDown,
    Tab,
    BackTab, /* Shift + Tab */
    Delete,
    Insert,
    Esc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct ModifierKeysMask {
    pub shift_key_state: KeyState,
    pub ctrl_key_state: KeyState,
    pub alt_key_state: KeyState,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum KeyState {
    Pressed,
    #[default]
    NotPressed,
}

impl From<bool> for KeyState {
    fn from(pressed: bool) -> Self {
        if pressed { KeyState::Pressed } else { KeyState::NotPressed }
    }
}

impl ModifierKeysMask {
    #[must_use]
    pub fn new() -> Self { Self::default() }

    #[must_use]
    pub fn with_shift(mut self) -> Self {
        self.shift_key_state = KeyState::Pressed;
        self
    }

    #[must_use]
    pub fn with_ctrl(mut self) -> Self {
        self.ctrl_key_state = KeyState::Pressed;
        self
    }

    #[must_use]
    pub fn with_alt(mut self) -> Self {
        self.alt_key_state = KeyState::Pressed;
        self
    }

    #[must_use]
    pub fn is_empty(&self) -> bool { *self == Self::default() }

    #[must_use]
    pub fn shift(&self) -> bool { self.shift_key_state == KeyState::Pressed }

    #[must_use]
    pub fn ctrl(&self) -> bool { self.ctrl_key_state == KeyState::Pressed }

    #[must_use]
    pub fn alt(&self) -> bool { self.alt_key_state == KeyState::Pressed }
}

impl KeyPress {
    #[must_use]
    pub fn plain(key: Key) -> Self {
        Self {
            key,
            mask: ModifierKeysMask::default(),
        }
    }

    #[must_use]
    pub fn with(key: Key, mask: ModifierKeysMask) -> Self { Self { key, mask } }

    #[must_use]
    pub fn char(ch: char) -> Self { Self::plain(Key::Character(ch)) }

    #[must_use]
    pub fn special(special: SpecialKey) -> Self { Self::plain(Key::SpecialKey(special)) }

    #[must_use]
    pub fn ctrl(ch: char) -> Self {
        Self::with(Key::Character(ch), ModifierKeysMask::new().with_ctrl())
    }

    #[must_use]
    pub fn is_unmodified(&self) -> bool { self.mask.is_empty() }

    /// The character this key inserts into a line buffer, if any. Control and Alt
    /// combinations don't insert anything.
    #[must_use]
    pub fn printable_char(&self) -> Option<char> {
        match self.key {
            Key::Character(ch) if !self.mask.ctrl() && !self.mask.alt() && !ch.is_control() => {
                Some(ch)
            }
            _ => None,
        }
    }

    #[must_use]
    pub fn is_special(&self, special: SpecialKey) -> bool {
        self.key == Key::SpecialKey(special)
    }
}

impl Display for KeyPress {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.mask.ctrl() {
            f.write_str("ctrl+")?;
        }
        if self.mask.alt() {
            f.write_str("alt+")?;
        }
        if self.mask.shift() {
            f.write_str("shift+")?;
        }
        match self.key {
            Key::Character(' ') => f.write_str("space"),
            Key::Character(ch) => write!(f, "{ch}"),
            Key::FunctionKey(n) => write!(f, "f{n}"),
            Key::SpecialKey(special) => f.write_str(match special {
                SpecialKey::Backspace => "backspace",
                SpecialKey::Enter => "enter",
                SpecialKey::Left => "left",
                SpecialKey::Right => "right",
                SpecialKey::Up => "up",
                SpecialKey::Down => "down",
                SpecialKey::Home => "home",
                SpecialKey::End => "end",
                SpecialKey::PageUp => "pageup",
                SpecialKey::PageDown => "pagedown",
                SpecialKey::Tab => "tab",
                SpecialKey::BackTab => "backtab",
                SpecialKey::Delete => "delete",
                SpecialKey::Insert => "insert",
                SpecialKey::Esc => "esc",
            }),
        }
    }
}

/// Parse key bindings like `ctrl+c`, `alt+left`, `f5`, `q`. Used by
/// [`crate::DashboardConfig`] and the demo's command line.
impl FromStr for KeyPress {
    type Err = DashboardError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let invalid = || DashboardError::InvalidKeyBinding {
            input: input.to_string(),
        };

        let mut mask = ModifierKeysMask::new();
        let mut parts: Vec<&str> = input.split('+').collect();
        let key_part = parts.pop().filter(|it| !it.is_empty()).ok_or_else(invalid)?;
        for modifier in parts {
            mask = match modifier.to_ascii_lowercase().as_str() {
                "ctrl" | "control" => mask.with_ctrl(),
                "alt" | "meta" => mask.with_alt(),
                "shift" => mask.with_shift(),
                _ => return Err(invalid()),
            };
        }

        let lower = key_part.to_ascii_lowercase();
        let key = match lower.as_str() {
            "space" => Key::Character(' '),
            "backspace" => Key::SpecialKey(SpecialKey::Backspace),
            "enter" | "return" => Key::SpecialKey(SpecialKey::Enter),
            "left" => Key::SpecialKey(SpecialKey::Left),
            "right" => Key::SpecialKey(SpecialKey::Right),
            "up" => Key::SpecialKey(SpecialKey::Up),
            "down" => Key::SpecialKey(SpecialKey::Down),
            "home" => Key::SpecialKey(SpecialKey::Home),
            "end" => Key::SpecialKey(SpecialKey::End),
            "pageup" | "pgup" => Key::SpecialKey(SpecialKey::PageUp),
            "pagedown" | "pgdn" => Key::SpecialKey(SpecialKey::PageDown),
            "tab" => Key::SpecialKey(SpecialKey::Tab),
            "backtab" => Key::SpecialKey(SpecialKey::BackTab),
            "delete" | "del" => Key::SpecialKey(SpecialKey::Delete),
            "insert" | "ins" => Key::SpecialKey(SpecialKey::Insert),
            "esc" | "escape" => Key::SpecialKey(SpecialKey::Esc),
            _ => {
                let mut chars = key_part.chars();
                match (chars.next(), chars.next()) {
                    (Some(ch), None) => Key::Character(ch),
                    _ => match lower.strip_prefix('f').map(str::parse::<u8>) {
                        Some(Ok(n)) if (1..=12).contains(&n) => Key::FunctionKey(n),
                        _ => return Err(invalid()),
                    },
                }
            }
        };

        Ok(KeyPress::with(key, mask))
    }
}
