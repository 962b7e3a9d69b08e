// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Backend for `TERM=dumb`, pipes, and CI logs. Nothing is positioned: every cursor
//! move becomes a line break, escape sequences are stripped, and input arrives one
//! cooked line at a time (each line is replayed as its characters plus Enter). Box
//! drawing glyphs are replaced with `+`, `-` and `|`.

use std::{collections::VecDeque,
          io::BufRead,
          sync::atomic::{AtomicBool, Ordering},
          time::Duration};

use crate::{ASCII_MODE, BoxGlyph, DashboardError, DashboardResult, DeviceCapabilities,
            FlashFlags, InputEvent, KeyPress, LINE_DRAWING_MODE, LockExt, OutputDevice,
            SpecialKey, StdMutex, TerminalDevice, TextSegment, segments};

#[derive(Debug, Default)]
pub struct DumbTerminalDevice {
    output: OutputDevice,
    write_buffer: StdMutex<String>,
    queued_keys: StdMutex<VecDeque<KeyPress>>,
    /// Between `ESC ( 0` and `ESC ( B`. Kept across writes.
    is_line_drawing: AtomicBool,
}

impl DumbTerminalDevice {
    #[must_use]
    pub fn new(output: OutputDevice) -> Self {
        Self {
            output,
            ..Default::default()
        }
    }

    /// Replay `line` as keystrokes on the following [`TerminalDevice::read_input`]
    /// calls.
    pub fn queue_line(&self, line: &str) {
        let mut queue = self.queued_keys.lock_or_recover();
        queue.extend(
            line.trim_end_matches(['\r', '\n'])
                .chars()
                .filter(|it| !it.is_control())
                .map(KeyPress::char),
        );
        queue.push_back(KeyPress::special(SpecialKey::Enter));
    }

    /// Replace box drawing glyphs inside line drawing runs and drop the charset
    /// switches. Other control sequences are left for [`strip_ansi_escapes`].
    fn replace_line_drawing(&self, text: &str) -> String {
        let mut is_line_drawing = self.is_line_drawing.load(Ordering::SeqCst);
        let mut acc = String::with_capacity(text.len());
        for segment in segments(text) {
            match segment {
                TextSegment::Control(LINE_DRAWING_MODE) => is_line_drawing = true,
                TextSegment::Control(ASCII_MODE) => is_line_drawing = false,
                TextSegment::Control(seq) => acc.push_str(seq),
                TextSegment::Grapheme(grapheme) => {
                    let glyph = is_line_drawing
                        .then(|| single_char(grapheme).and_then(BoxGlyph::from_char))
                        .flatten();
                    match glyph {
                        Some(glyph) => acc.push(glyph.ascii_fallback()),
                        None => acc.push_str(grapheme),
                    }
                }
            }
        }
        self.is_line_drawing.store(is_line_drawing, Ordering::SeqCst);
        acc
    }

    fn pop_queued(&self) -> Option<InputEvent> {
        self.queued_keys
            .lock_or_recover()
            .pop_front()
            .map(InputEvent::Keyboard)
    }
}

fn single_char(text: &str) -> Option<char> {
    let mut chars = text.chars();
    match (chars.next(), chars.next()) {
        (Some(ch), None) => Some(ch),
        _ => None,
    }
}

impl TerminalDevice for DumbTerminalDevice {
    fn capabilities(&self) -> DeviceCapabilities { DeviceCapabilities::default() }

    fn setup(&self) -> DashboardResult<()> { Ok(()) }

    fn write(&self, text: &str) {
        let text = self.replace_line_drawing(text);
        self.write_buffer
            .lock_or_recover()
            .push_str(&strip_ansi_escapes::strip_str(text));
    }

    fn flush(&self) -> DashboardResult<()> {
        let text = std::mem::take(&mut *self.write_buffer.lock_or_recover());
        if text.is_empty() {
            return Ok(());
        }
        self.output.write_and_flush(text.as_bytes())?;
        Ok(())
    }

    fn set_cursor(&self, _x: u16, _y: u16) { self.write_buffer.lock_or_recover().push('\n'); }

    fn read_input(&self) -> DashboardResult<Option<InputEvent>> {
        if let Some(event) = self.pop_queued() {
            return Ok(Some(event));
        }
        let mut line = String::new();
        if std::io::stdin().lock().read_line(&mut line)? == 0 {
            return Err(DashboardError::InputClosed);
        }
        self.queue_line(&line);
        Ok(self.pop_queued())
    }

    fn get_clipboard(&self) -> String { String::new() }

    fn set_title(&self, _title: &str) {}

    fn flash(&self, flags: FlashFlags, count: u32, _interval: Duration) {
        tracing::debug!(message = "DumbTerminalDevice::flash -> ignored", ?flags, count);
    }

    fn restore(&self) -> DashboardResult<()> { self.flush() }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{OutputDeviceExt, line_drawing};

    #[test]
    fn test_write_strips_escapes_and_cursor_moves_break_lines() {
        let (output, stdout_mock) = OutputDevice::new_mock();
        let device = DumbTerminalDevice::new(output);
        device.set_cursor(3, 4);
        device.write("\x1b[1mbold\x1b[0m");
        device.set_cursor(3, 5);
        device.write("plain");
        device.flush().unwrap();
        assert_eq!(stdout_mock.get_copy_of_buffer_as_string(), "\nbold\nplain");
    }

    #[test]
    fn test_box_drawing_falls_back_to_ascii() {
        let (output, stdout_mock) = OutputDevice::new_mock();
        let device = DumbTerminalDevice::new(output);
        device.write(&format!("\x1b[34m{}\x1b[0m lq", line_drawing("lqqk")));
        // A line drawing run split across two writes.
        device.write(LINE_DRAWING_MODE);
        device.write("x");
        device.write(&format!("{ASCII_MODE}x"));
        device.flush().unwrap();
        assert_eq!(stdout_mock.get_copy_of_buffer_as_string(), "+--+ lq|x");
    }

    #[test]
    fn test_queued_line_is_replayed_as_keys() {
        let device = DumbTerminalDevice::default();
        device.queue_line("hi\n");
        assert_eq!(
            device.read_input().unwrap(),
            Some(InputEvent::Keyboard(KeyPress::char('h')))
        );
        assert_eq!(
            device.read_input().unwrap(),
            Some(InputEvent::Keyboard(KeyPress::char('i')))
        );
        assert_eq!(
            device.read_input().unwrap(),
            Some(InputEvent::Keyboard(KeyPress::special(SpecialKey::Enter)))
        );
    }

    #[test]
    fn test_capabilities_are_minimal() {
        let device = DumbTerminalDevice::default();
        assert_eq!(device.capabilities(), DeviceCapabilities::default());
        assert_eq!(device.get_clipboard(), "");
    }
}
