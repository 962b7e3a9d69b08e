// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! crossterm backend. The only one that reports mouse and resize events. Default on
//! Windows, and available on Unix with `R3BL_DASHBOARD_BACKEND=console`.

use std::{sync::atomic::{AtomicBool, Ordering},
          time::Duration};

use crossterm::{cursor::Show,
                event::{DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent,
                        KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
                        MouseEventKind},
                terminal::{EnterAlternateScreen, LeaveAlternateScreen}};

use crate::{CURSOR_BLINK_ON, DEBUG_DASHBOARD_INPUT, DashboardError, DashboardResult,
            DeviceCapabilities, FlashFlags, InputEvent, Key, KeyPress, LockExt,
            ModifierKeysMask, MouseButtons, MouseClick, OutputDevice, SGR_RESET,
            SpecialKey, StdMutex, TerminalDevice, cursor_to, disable_raw_mode,
            enable_raw_mode, flash_with_escape_sequences, get_system_clipboard_text,
            window_title};

#[derive(Debug, Default)]
pub struct ConsoleTerminalDevice {
    output: OutputDevice,
    write_buffer: StdMutex<String>,
    /// crossterm reports which button changed, [`InputEvent::Click`] carries the set
    /// of held buttons.
    held_buttons: StdMutex<MouseButtons>,
    is_setup: AtomicBool,
}

impl ConsoleTerminalDevice {
    fn convert_mouse_event(&self, mouse_event: MouseEvent) -> Option<InputEvent> {
        let MouseEvent {
            kind,
            column: x,
            row: y,
            modifiers,
        } = mouse_event;
        let mut held = self.held_buttons.lock_or_recover();
        match kind {
            MouseEventKind::Down(button) => *held = *held | convert_mouse_button(button),
            MouseEventKind::Up(button) => *held = *held & !convert_mouse_button(button),
            MouseEventKind::Drag(_) | MouseEventKind::Moved => {
                return Some(InputEvent::MouseMove { x, y });
            }
            _ => return None,
        }
        Some(InputEvent::Click(MouseClick {
            buttons: *held,
            x,
            y,
            mask: convert_modifiers(modifiers),
        }))
    }
}

fn convert_mouse_button(button: MouseButton) -> MouseButtons {
    match button {
        MouseButton::Left => MouseButtons::LEFT,
        MouseButton::Right => MouseButtons::RIGHT,
        MouseButton::Middle => MouseButtons::MIDDLE,
    }
}

fn convert_modifiers(modifiers: KeyModifiers) -> ModifierKeysMask {
    let mut mask = ModifierKeysMask::new();
    if modifiers.contains(KeyModifiers::SHIFT) {
        mask = mask.with_shift();
    }
    if modifiers.contains(KeyModifiers::CONTROL) {
        mask = mask.with_ctrl();
    }
    if modifiers.contains(KeyModifiers::ALT) {
        mask = mask.with_alt();
    }
    mask
}

/// Key releases are dropped. Shift is folded into the character for printable keys
/// and into [`SpecialKey::BackTab`].
pub(crate) fn convert_key_event(key_event: KeyEvent) -> Option<KeyPress> {
    if key_event.kind == KeyEventKind::Release {
        return None;
    }
    let mut mask = convert_modifiers(key_event.modifiers);
    let key = match key_event.code {
        KeyCode::Char(ch) => {
            mask.shift_key_state = crate::KeyState::NotPressed;
            Key::Character(ch)
        }
        KeyCode::BackTab => {
            mask.shift_key_state = crate::KeyState::NotPressed;
            Key::SpecialKey(SpecialKey::BackTab)
        }
        KeyCode::F(n) => Key::FunctionKey(n),
        KeyCode::Backspace => Key::SpecialKey(SpecialKey::Backspace),
        KeyCode::Enter => Key::SpecialKey(SpecialKey::Enter),
        KeyCode::Left => Key::SpecialKey(SpecialKey::Left),
        KeyCode::Right => Key::SpecialKey(SpecialKey::Right),
        KeyCode::Up => Key::SpecialKey(SpecialKey::Up),
        KeyCode::Down => Key::SpecialKey(SpecialKey::Down),
        KeyCode::Home => Key::SpecialKey(SpecialKey::Home),
        KeyCode::End => Key::SpecialKey(SpecialKey::End),
        KeyCode::PageUp => Key::SpecialKey(SpecialKey::PageUp),
        KeyCode::PageDown => Key::SpecialKey(SpecialKey::PageDown),
        KeyCode::Tab => Key::SpecialKey(SpecialKey::Tab),
        KeyCode::Delete => Key::SpecialKey(SpecialKey::Delete),
        KeyCode::Insert => Key::SpecialKey(SpecialKey::Insert),
        KeyCode::Esc => Key::SpecialKey(SpecialKey::Esc),
        KeyCode::Null => {
            mask = mask.with_ctrl();
            Key::Character(' ')
        }
        _ => return None,
    };
    Some(KeyPress::with(key, mask))
}

impl TerminalDevice for ConsoleTerminalDevice {
    fn capabilities(&self) -> DeviceCapabilities {
        DeviceCapabilities {
            mouse: true,
            resize: true,
            cursor_control: true,
            alternate_screen: true,
            clipboard: true,
        }
    }

    fn setup(&self) -> DashboardResult<()> {
        enable_raw_mode()?;
        self.is_setup.store(true, Ordering::SeqCst);
        crossterm::execute!(std::io::stdout(), EnterAlternateScreen, EnableMouseCapture)
            .map_err(|e| DashboardError::setup(format!("failed to enter alternate screen: {e}")))
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
        let event = crossterm::event::read()?;
        DEBUG_DASHBOARD_INPUT.then(|| {
            tracing::debug!(message = "ConsoleTerminalDevice::read_input", ?event);
        });
        Ok(match event {
            Event::Key(key_event) => convert_key_event(key_event).map(InputEvent::Keyboard),
            Event::Mouse(mouse_event) => self.convert_mouse_event(mouse_event),
            Event::Resize(width, height) => Some(InputEvent::Resize { width, height }),
            _ => None,
        })
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
        self.write(CURSOR_BLINK_ON);
        self.write(SGR_RESET);
        let flushed = self.flush();
        let left = crossterm::execute!(
            std::io::stdout(),
            DisableMouseCapture,
            LeaveAlternateScreen,
            Show
        );
        disable_raw_mode()?;
        flushed?;
        left.map_err(DashboardError::Io)
    }
}
