// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! The one seam between the dashboard and a physical terminal.
//!
//! There are three implementations, picked by [`crate::TerminalBackendSelection`]:
//!
//! | Backend                      | Raw mode        | Input decoding                 | Mouse / resize |
//! |:-----------------------------|:----------------|:-------------------------------|:---------------|
//! | [`crate::PosixTerminalDevice`]   | rustix termios  | VT100 bytes, one key at a time | no             |
//! | [`crate::ConsoleTerminalDevice`] | crossterm       | crossterm events               | yes            |
//! | [`crate::DumbTerminalDevice`]    | none            | cooked lines from stdin        | no             |
//!
//! What a backend can do is reported by [`DeviceCapabilities`] instead of being
//! guessed by callers.

use std::{fmt::Debug, thread, time::Duration};

use crate::{DashboardResult, InputEvent};

pub const DEFAULT_EXIT_MESSAGE: &str = "Exiting...";

/// DECSCNM: reverse video for the whole screen.
const REVERSE_SCREEN_ON: &str = "\x1b[?5h";
const REVERSE_SCREEN_OFF: &str = "\x1b[?5l";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DeviceCapabilities {
    pub mouse: bool,
    pub resize: bool,
    pub cursor_control: bool,
    pub alternate_screen: bool,
    pub clipboard: bool,
}

/// What [`TerminalDevice::flash`] should do on each cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlashFlags {
    /// Invert the whole screen.
    pub screen: bool,
    /// Ring the bell.
    pub bell: bool,
}

impl FlashFlags {
    pub const ALL: FlashFlags = FlashFlags {
        screen: true,
        bell: true,
    };

    #[must_use]
    pub fn is_empty(&self) -> bool { !self.screen && !self.bell }
}

pub trait TerminalDevice: Debug + Send + Sync {
    fn capabilities(&self) -> DeviceCapabilities;

    /// Enter raw input mode and the alternate screen, remembering the prior state for
    /// [`TerminalDevice::restore`].
    ///
    /// # Errors
    ///
    /// Any failure here is fatal: [`crate::DashboardError::Setup`] or
    /// [`crate::DashboardError::NotInteractive`].
    fn setup(&self) -> DashboardResult<()>;

    /// Append to the output buffer. Nothing reaches the terminal until
    /// [`TerminalDevice::flush`].
    fn write(&self, text: &str);

    /// # Errors
    ///
    /// Returns the I/O error from the underlying output.
    fn flush(&self) -> DashboardResult<()>;

    /// Buffered like [`TerminalDevice::write`]. Coordinates are 0-based.
    fn set_cursor(&self, x: u16, y: u16);

    /// Block until one event is decoded. `Ok(None)` means bytes were consumed that
    /// don't map to an [`InputEvent`] (eg: focus change, unknown sequence).
    ///
    /// # Errors
    ///
    /// [`crate::DashboardError::NotInteractive`] if input is not a terminal, or the
    /// read error. Both end the session.
    fn read_input(&self) -> DashboardResult<Option<InputEvent>>;

    /// Best effort, empty when there's no clipboard.
    fn get_clipboard(&self) -> String;

    /// Buffered. Truncated to [`crate::MAX_TITLE_LEN`] characters.
    fn set_title(&self, title: &str);

    /// Best effort, blocks the caller for `count * interval * 2`.
    fn flash(&self, flags: FlashFlags, count: u32, interval: Duration);

    /// Undo [`TerminalDevice::setup`]: leave the alternate screen, show the cursor,
    /// restore cursor blink and the original input mode. No-op if setup never ran.
    ///
    /// # Errors
    ///
    /// Returns the I/O or termios error. Callers on the exit path log it and carry on.
    fn restore(&self) -> DashboardResult<()>;

    /// The only sanctioned way to end the process once [`TerminalDevice::setup`] has
    /// succeeded. Restores the terminal, prints `exit_message` (or the error report)
    /// and exits with status 0 (or 1).
    fn quit(&self, exit_message: &str, error: Option<miette::Report>) -> ! {
        if let Err(restore_error) = self.restore() {
            tracing::error!(message = "TerminalDevice::quit -> restore failed", ?restore_error);
        }
        match error {
            None => {
                println!("{exit_message}");
                std::process::exit(0);
            }
            Some(report) => {
                eprintln!("{report:?}");
                std::process::exit(1);
            }
        }
    }
}

/// VT flash shared by the backends that can emit escape sequences.
pub(crate) fn flash_with_escape_sequences(
    device: &dyn TerminalDevice,
    flags: FlashFlags,
    count: u32,
    interval: Duration,
) {
    if flags.is_empty() || count == 0 {
        return;
    }
    for _ in 0..count {
        if flags.bell {
            device.write(&crate::BEL.to_string());
        }
        if flags.screen {
            device.write(REVERSE_SCREEN_ON);
        }
        if device.flush().is_err() {
            return;
        }
        thread::sleep(interval);
        if flags.screen {
            device.write(REVERSE_SCREEN_OFF);
        }
        if device.flush().is_err() {
            return;
        }
        thread::sleep(interval);
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::MockTerminalDevice;

    #[test]
    fn test_flash_sequences() {
        let device = MockTerminalDevice::new(vec![]);
        flash_with_escape_sequences(&device, FlashFlags::ALL, 2, Duration::ZERO);
        assert_eq!(
            device.stdout_mock.get_copy_of_buffer_as_string(),
            "\x07\x1b[?5h\x1b[?5l\x07\x1b[?5h\x1b[?5l"
        );
    }

    #[test]
    fn test_flash_no_flags_is_noop() {
        let device = MockTerminalDevice::new(vec![]);
        let flags = FlashFlags {
            screen: false,
            bell: false,
        };
        flash_with_escape_sequences(&device, flags, 3, Duration::ZERO);
        assert_eq!(device.stdout_mock.get_copy_of_buffer_as_string(), "");
    }
}
