// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::{collections::VecDeque,
          sync::atomic::{AtomicUsize, Ordering},
          time::Duration};

use crate::{DashboardError, DashboardResult, DeviceCapabilities, FlashFlags, InputEvent,
            LockExt, OutputDevice, OutputDeviceExt, StdMutex, StdoutMock, TerminalDevice,
            cursor_to, flash_with_escape_sequences, window_title};

/// [`TerminalDevice`] that replays a script of [`InputEvent`]s and records everything
/// written into a [`StdoutMock`].
///
/// [`TerminalDevice::read_input`] returns [`DashboardError::InputClosed`] once the
/// script is exhausted. [`TerminalDevice::quit`] panics instead of exiting the
/// process, so a test can assert on it with `#[should_panic]`.
#[derive(Debug)]
pub struct MockTerminalDevice {
    pub stdout_mock: StdoutMock,
    output: OutputDevice,
    pending: StdMutex<String>,
    input: StdMutex<VecDeque<InputEvent>>,
    clipboard: StdMutex<String>,
    titles: StdMutex<Vec<String>>,
    cursor_moves: StdMutex<Vec<(u16, u16)>>,
    capabilities: DeviceCapabilities,
    setup_count: AtomicUsize,
    restore_count: AtomicUsize,
}

impl MockTerminalDevice {
    #[must_use]
    pub fn new(script: Vec<InputEvent>) -> Self {
        let (output, stdout_mock) = OutputDevice::new_mock();
        Self {
            stdout_mock,
            output,
            pending: StdMutex::new(String::new()),
            input: StdMutex::new(script.into()),
            clipboard: StdMutex::new(String::new()),
            titles: StdMutex::new(vec![]),
            cursor_moves: StdMutex::new(vec![]),
            capabilities: DeviceCapabilities {
                mouse: true,
                resize: true,
                cursor_control: true,
                alternate_screen: true,
                clipboard: true,
            },
            setup_count: AtomicUsize::new(0),
            restore_count: AtomicUsize::new(0),
        }
    }

    #[must_use]
    pub fn with_clipboard(self, content: impl Into<String>) -> Self {
        *self.clipboard.lock_or_recover() = content.into();
        self
    }

    pub fn push_input(&self, event: InputEvent) { self.input.lock_or_recover().push_back(event); }

    #[must_use]
    pub fn titles(&self) -> Vec<String> { self.titles.lock_or_recover().clone() }

    #[must_use]
    pub fn cursor_moves(&self) -> Vec<(u16, u16)> { self.cursor_moves.lock_or_recover().clone() }

    #[must_use]
    pub fn last_cursor(&self) -> Option<(u16, u16)> {
        self.cursor_moves.lock_or_recover().last().copied()
    }

    #[must_use]
    pub fn setup_count(&self) -> usize { self.setup_count.load(Ordering::SeqCst) }

    #[must_use]
    pub fn restore_count(&self) -> usize { self.restore_count.load(Ordering::SeqCst) }

    /// Bytes written but not flushed yet.
    #[must_use]
    pub fn pending_output(&self) -> String { self.pending.lock_or_recover().clone() }
}

impl TerminalDevice for MockTerminalDevice {
    fn capabilities(&self) -> DeviceCapabilities { self.capabilities }

    fn setup(&self) -> DashboardResult<()> {
        self.setup_count.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn write(&self, text: &str) { self.pending.lock_or_recover().push_str(text); }

    fn flush(&self) -> DashboardResult<()> {
        let text = std::mem::take(&mut *self.pending.lock_or_recover());
        self.output.write_and_flush(text.as_bytes())?;
        Ok(())
    }

    fn set_cursor(&self, x: u16, y: u16) {
        self.cursor_moves.lock_or_recover().push((x, y));
        self.write(&cursor_to(x, y));
    }

    fn read_input(&self) -> DashboardResult<Option<InputEvent>> {
        self.input
            .lock_or_recover()
            .pop_front()
            .map(Some)
            .ok_or(DashboardError::InputClosed)
    }

    fn get_clipboard(&self) -> String { self.clipboard.lock_or_recover().clone() }

    fn set_title(&self, title: &str) {
        self.titles.lock_or_recover().push(title.to_string());
        self.write(&window_title(title));
    }

    fn flash(&self, flags: FlashFlags, count: u32, interval: Duration) {
        flash_with_escape_sequences(self, flags, count, interval);
    }

    fn restore(&self) -> DashboardResult<()> {
        self.restore_count.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn quit(&self, exit_message: &str, error: Option<miette::Report>) -> ! {
        let _unused: DashboardResult<()> = self.restore();
        match error {
            None => panic!("MockTerminalDevice::quit: {exit_message}"),
            Some(report) => panic!("MockTerminalDevice::quit: {report}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::KeyPress;

    #[test]
    fn test_script_then_closed() {
        let device = MockTerminalDevice::new(vec![InputEvent::Keyboard(KeyPress::char('a'))]);
        assert_eq!(
            device.read_input().unwrap(),
            Some(InputEvent::Keyboard(KeyPress::char('a')))
        );
        assert!(matches!(device.read_input(), Err(DashboardError::InputClosed)));
    }

    #[test]
    fn test_write_is_buffered_until_flush() {
        let device = MockTerminalDevice::new(vec![]);
        device.write("abc");
        device.set_cursor(1, 2);
        assert_eq!(device.stdout_mock.get_copy_of_buffer_as_string(), "");
        assert_eq!(device.pending_output(), "abc\x1b[3;2H");

        device.flush().unwrap();
        assert_eq!(device.stdout_mock.get_copy_of_buffer_as_string(), "abc\x1b[3;2H");
        assert_eq!(device.pending_output(), "");
        assert_eq!(device.last_cursor(), Some((1, 2)));
    }

    #[test]
    #[should_panic(expected = "MockTerminalDevice::quit: bye")]
    fn test_quit_panics() {
        let device = MockTerminalDevice::new(vec![]);
        device.quit("bye", None);
    }
}
