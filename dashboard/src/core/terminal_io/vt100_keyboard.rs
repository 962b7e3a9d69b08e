// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Decode one keypress from raw VT100 input bytes.
//!
//! Used by [`crate::PosixTerminalDevice`], which reads bytes from the terminal in raw
//! mode. Handles:
//!
//! - Arrow keys, Home, End (`CSI A/B/C/D/H/F`, `SS3 A/B/C/D/H/F`)
//! - Function keys F1-F12 (`SS3 P/Q/R/S`, `CSI n~`)
//! - Insert, Delete, Page Up/Down (`CSI 2~`, `CSI 3~`, `CSI 5~`, `CSI 6~`)
//! - Modifier parameters (`CSI 1;m X`, `CSI n;m ~`)
//! - Shift+Tab (`CSI Z`)
//! - Alt+key (`ESC` prefix), Ctrl+letter (`0x01..=0x1A`)
//! - Tab, Enter, Backspace, UTF-8 characters
//!
//! Mouse and resize reports are not decoded.

use crate::{Key, KeyPress, ModifierKeysMask, SpecialKey};

const ESC: u8 = 0x1B;

/// CSI sequences longer than this without a final byte are garbage.
const MAX_SEQUENCE_LEN: usize = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeResult {
    /// A key, and the number of bytes it used.
    Key(KeyPress, usize),
    /// This many bytes form a sequence that isn't a key. Drop them.
    Unknown(usize),
    /// Need more bytes.
    Incomplete,
}

/// Decode the first keypress at the start of `buffer`.
#[must_use]
pub fn decode_key(buffer: &[u8]) -> DecodeResult {
    let Some(&first) = buffer.first() else {
        return DecodeResult::Incomplete;
    };

    match first {
        ESC => decode_escape(buffer),
        b'\r' | b'\n' => key(SpecialKey::Enter, 1),
        b'\t' => key(SpecialKey::Tab, 1),
        0x7F | 0x08 => key(SpecialKey::Backspace, 1),
        0x00 => DecodeResult::Key(KeyPress::ctrl(' '), 1),
        0x01..=0x1A => DecodeResult::Key(KeyPress::ctrl(char::from(b'a' + first - 1)), 1),
        0x1C..=0x1F => {
            DecodeResult::Key(KeyPress::ctrl(char::from(b'\\' + first - 0x1C)), 1)
        }
        _ => decode_utf8(buffer),
    }
}

fn key(special: SpecialKey, consumed: usize) -> DecodeResult {
    DecodeResult::Key(KeyPress::special(special), consumed)
}

fn decode_utf8(buffer: &[u8]) -> DecodeResult {
    let len = match buffer[0] {
        0x00..=0x7F => 1,
        0xC0..=0xDF => 2,
        0xE0..=0xEF => 3,
        0xF0..=0xF7 => 4,
        _ => return DecodeResult::Unknown(1),
    };
    if buffer.len() < len {
        return DecodeResult::Incomplete;
    }
    match std::str::from_utf8(&buffer[..len]).ok().and_then(|it| it.chars().next()) {
        Some(ch) => DecodeResult::Key(KeyPress::char(ch), len),
        None => DecodeResult::Unknown(1),
    }
}

fn decode_escape(buffer: &[u8]) -> DecodeResult {
    match buffer.get(1) {
        None => DecodeResult::Incomplete,
        Some(b'[') => decode_csi(buffer),
        Some(b'O') => decode_ss3(buffer),
        Some(&ESC) => DecodeResult::Key(
            KeyPress::with(Key::SpecialKey(SpecialKey::Esc), ModifierKeysMask::new().with_alt()),
            2,
        ),
        // Alt + key.
        Some(_) => match decode_key(&buffer[1..]) {
            DecodeResult::Key(key_press, consumed) => DecodeResult::Key(
                KeyPress::with(key_press.key, key_press.mask.with_alt()),
                consumed + 1,
            ),
            DecodeResult::Unknown(consumed) => DecodeResult::Unknown(consumed + 1),
            DecodeResult::Incomplete => DecodeResult::Incomplete,
        },
    }
}

/// `ESC O x`: F1-F4 and application mode cursor keys.
fn decode_ss3(buffer: &[u8]) -> DecodeResult {
    let Some(&final_byte) = buffer.get(2) else {
        return DecodeResult::Incomplete;
    };
    let key = match final_byte {
        b'P' => Key::FunctionKey(1),
        b'Q' => Key::FunctionKey(2),
        b'R' => Key::FunctionKey(3),
        b'S' => Key::FunctionKey(4),
        _ => match cursor_key(final_byte) {
            Some(special) => Key::SpecialKey(special),
            None => return DecodeResult::Unknown(3),
        },
    };
    DecodeResult::Key(KeyPress::plain(key), 3)
}

fn cursor_key(final_byte: u8) -> Option<SpecialKey> {
    Some(match final_byte {
        b'A' => SpecialKey::Up,
        b'B' => SpecialKey::Down,
        b'C' => SpecialKey::Right,
        b'D' => SpecialKey::Left,
        b'H' => SpecialKey::Home,
        b'F' => SpecialKey::End,
        _ => return None,
    })
}

/// `ESC [ [param;param;...] final_byte`
fn decode_csi(buffer: &[u8]) -> DecodeResult {
    let Some(final_pos) = buffer[2..]
        .iter()
        .position(|it| (0x40..=0x7E).contains(it))
        .map(|it| it + 2)
    else {
        return if buffer.len() > MAX_SEQUENCE_LEN {
            DecodeResult::Unknown(buffer.len())
        } else {
            DecodeResult::Incomplete
        };
    };
    let consumed = final_pos + 1;
    let final_byte = buffer[final_pos];

    let mut params: Vec<u16> = vec![];
    for part in buffer[2..final_pos].split(|it| *it == b';') {
        if part.is_empty() {
            params.push(0);
            continue;
        }
        let Some(value) = std::str::from_utf8(part).ok().and_then(|it| it.parse().ok()) else {
            return DecodeResult::Unknown(consumed);
        };
        params.push(value);
    }

    let mask = match params.get(1) {
        Some(&modifier_param) => decode_modifiers(modifier_param),
        None => ModifierKeysMask::new(),
    };

    let key = match final_byte {
        b'Z' => Key::SpecialKey(SpecialKey::BackTab),
        b'~' => match params.first().and_then(|it| function_or_special_key(*it)) {
            Some(key) => key,
            None => return DecodeResult::Unknown(consumed),
        },
        _ => match cursor_key(final_byte) {
            Some(special) => Key::SpecialKey(special),
            None => return DecodeResult::Unknown(consumed),
        },
    };

    DecodeResult::Key(KeyPress::with(key, mask), consumed)
}

/// Function key codes have gaps:
/// - F1: 11, F2: 12, F3: 13, F4: 14, F5: 15
/// - F6: 17, F7: 18, F8: 19, F9: 20, F10: 21
/// - F11: 23, F12: 24
fn function_or_special_key(code: u16) -> Option<Key> {
    Some(match code {
        11..=15 => Key::FunctionKey(u8::try_from(code - 10).ok()?),
        17..=21 => Key::FunctionKey(u8::try_from(code - 11).ok()?),
        23 | 24 => Key::FunctionKey(u8::try_from(code - 12).ok()?),
        1 | 7 => Key::SpecialKey(SpecialKey::Home),
        4 | 8 => Key::SpecialKey(SpecialKey::End),
        2 => Key::SpecialKey(SpecialKey::Insert),
        3 => Key::SpecialKey(SpecialKey::Delete),
        5 => Key::SpecialKey(SpecialKey::PageUp),
        6 => Key::SpecialKey(SpecialKey::PageDown),
        _ => return None,
    })
}

/// Parameter value = 1 + bitfield, where bitfield = Shift(1) | Alt(2) | Ctrl(4).
fn decode_modifiers(modifier_param: u16) -> ModifierKeysMask {
    let bits = modifier_param.saturating_sub(1);
    let mut mask = ModifierKeysMask::new();
    if bits & 1 != 0 {
        mask = mask.with_shift();
    }
    if bits & 2 != 0 {
        mask = mask.with_alt();
    }
    if bits & 4 != 0 {
        mask = mask.with_ctrl();
    }
    mask
}
