// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Raw VT100 backend for Unix terminals. Termios raw mode via rustix, bytes decoded by
//! [`decode_key`]. No mouse or resize events: the terminal isn't asked to report them.

use std::{sync::{OnceLock,
                 atomic::{AtomicBool, Ordering}},
          time::Duration};

use rustix::io::Errno;

use crate::{ALT_SCREEN_ENTER, ALT_SCREEN_EXIT, CLEAR_SCREEN, CURSOR_BLINK_ON, CURSOR_SHOW,
            DEBUG_DASHBOARD_INPUT, DashboardError, DashboardResult, DecodeResult,
            DeviceCapabilities, FlashFlags, InputEvent, KeyPress, LockExt, OutputDevice,
            SGR_RESET, SpecialKey, StdMutex, TerminalDevice, TerminalFd, cursor_to,
            decode_key, disable_raw_mode, enable_raw_mode, flash_with_escape_sequences,
            get_system_clipboard_text, get_terminal_fd, window_title};

const READ_BUFFER_SIZE: usize = 256;

#[derive(Debug, Default)]
pub struct PosixTerminalDevice {
    output: OutputDevice,
    write_buffer: StdMutex<String>,
    /// Bytes read but not decoded yet (eg: the first half of an escape sequence).
    pending_input: StdMutex<Vec<u8>>,
    fd: OnceLock<TerminalFd>,
    is_setup: AtomicBool,
}

impl PosixTerminalDevice {
    fn terminal_fd(&self) -> DashboardResult<&TerminalFd> {
        if let Some(fd) = self.fd.get() {
            return Ok(fd);
        }
        let _unused: Result<(), TerminalFd> = self.fd.set(get_terminal_fd()?);
        self.fd.get().ok_or(DashboardError::NotInteractive)
    }

    /// Blocking read of whatever is available, at least one byte.
    fn read_bytes(&self, into: &mut Vec<u8>) -> DashboardResult<()> {
        let fd = self.terminal_fd()?;
        let mut buf = [0_u8; READ_BUFFER_SIZE];
        loop {
            match rustix::io::read(fd, &mut buf[..]) {
                Ok(0) => return Err(DashboardError::InputClosed),
                Ok(count) => {
                    into.extend_from_slice(&buf[..count]);
                    return Ok(());
                }
                Err(Errno::INTR) => {}
                Err(errno) => return Err(DashboardError::Io(errno.into())),
            }
        }
    }
}

impl TerminalDevice for PosixTerminalDevice {
    fn capabilities(&self) -> DeviceCapabilities {
        DeviceCapabilities {
            mouse: false,
            resize: false,
            cursor_control: true,
            alternate_screen: true,
            clipboard: true,
        }
    }

    fn setup(&self) -> DashboardResult<()> {
        enable_raw_mode()?;
        self.is_setup.store(true, Ordering::SeqCst);
        self.write(ALT_SCREEN_ENTER);
        self.write(CLEAR_SCREEN);
        self.flush()
    }

    fn write(&self, text: &str) { self.write_buffer.lock_or_recover().push_str(text); }

    fn flush(&self) -> DashboardResult<()> {
        let text = std::mem::take(&mut *self.write_buffer.lock_or_recover());
        if text.is_empty() {
            return Ok(());
        }
        self.output.write_and_flush(text.as_bytes())?;
        Ok(())
    }

    fn set_cursor(&self, x: u16, y: u16) { self.write(&cursor_to(x, y)); }

    fn read_input(&self) -> DashboardResult<Option<InputEvent>> {
        let mut pending = self.pending_input.lock_or_recover();
        loop {
            match decode_key(&pending) {
                DecodeResult::Key(key_press, consumed) => {
                    pending.drain(..consumed);
                    DEBUG_DASHBOARD_INPUT.then(|| {
                        tracing::debug!(message = "PosixTerminalDevice::read_input", %key_press);
                    });
                    return Ok(Some(InputEvent::Keyboard(key_press)));
                }
                DecodeResult::Unknown(consumed) => {
                    let consumed = consumed.min(pending.len());
                    pending.drain(..consumed);
                    return Ok(None);
                }
                DecodeResult::Incomplete => {
                    let had_bytes = !pending.is_empty();
                    self.read_bytes(&mut pending)?;
                    // A lone ESC that arrived in a read of its own is the Esc key, not
                    // the start of a sequence.
                    if !had_bytes && pending.as_slice() == [0x1B] {
                        pending.clear();
                        return Ok(Some(InputEvent::Keyboard(KeyPress::special(
                            SpecialKey::Esc,
                        ))));
                    }
                }
            }
        }
    }

    fn get_clipboard(&self) -> String { get_system_clipboard_text() }

    fn set_title(&self, title: &str) { self.write(&window_title(title)); }

    fn flash(&self, flags: FlashFlags, count: u32, interval: Duration) {
        flash_with_escape_sequences(self, flags, count, interval);
    }

    fn restore(&self) -> DashboardResult<()> {
        if !self.is_setup.swap(false, Ordering::SeqCst) {
            return Ok(());
        }
        self.write(ALT_SCREEN_EXIT);
        self.write(CURSOR_SHOW);
        self.write(CURSOR_BLINK_ON);
        self.write(SGR_RESET);
        let flushed = self.flush();
        disable_raw_mode()?;
        flushed
    }
}
