// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! The one write section in front of the [`TerminalDevice`]. Every paint (a single
//! module after a content change, or the whole active page) happens inside it, from
//! hiding the cursor to parking it back on the focused line input, so escape
//! sequences from two writers never interleave.

use std::{fmt::{Debug, Formatter},
          sync::Arc};

use crate::{CLEAR_SCREEN, CURSOR_HIDE, CURSOR_SHOW, DEBUG_DASHBOARD_PAINT, DashboardResult,
            LockExt, Rect, SGR_RESET, StdMutex, TerminalDevice,
            core::log::module_log_layer::ModuleSinkPause};

/// Where to leave the cursor after a paint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorHome {
    /// Wherever the last [`CursorHome::Set`] put it.
    Keep,
    /// Remember this position (`None` hides the cursor).
    Set(Option<(u16, u16)>),
}

#[derive(Debug, Default)]
struct ScreenState {
    is_live: bool,
    cursor_home: Option<(u16, u16)>,
}

/// Cheap to clone, all clones share the device and the write section.
#[derive(Clone)]
pub struct Screen {
    device: Arc<dyn TerminalDevice>,
    write_section: Arc<StdMutex<ScreenState>>,
}

impl Debug for Screen {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Screen")
            .field("device", &self.device)
            .finish_non_exhaustive()
    }
}

impl Screen {
    #[must_use]
    pub fn new(device: Arc<dyn TerminalDevice>) -> Self {
        Self {
            device,
            write_section: Arc::new(StdMutex::new(ScreenState::default())),
        }
    }

    #[must_use]
    pub fn device(&self) -> &Arc<dyn TerminalDevice> { &self.device }

    /// Paints are dropped until the manager has set up the terminal.
    pub fn set_live(&self, is_live: bool) { self.write_section.lock_or_recover().is_live = is_live; }

    #[must_use]
    pub fn is_live(&self) -> bool { self.write_section.lock_or_recover().is_live }

    /// Draw one module's rows at its rect.
    ///
    /// # Errors
    ///
    /// Returns the flush error.
    pub fn paint(&self, rect: Rect, rows: &[String], cursor_home: CursorHome) -> DashboardResult<()> {
        self.paint_frames(false, &[(rect, rows)], cursor_home)
    }

    /// Draw several frames in one critical section, optionally clearing the screen
    /// first (page switch, resize).
    ///
    /// # Errors
    ///
    /// Returns the flush error.
    pub fn paint_frames(
        &self,
        clear: bool,
        frames: &[(Rect, &[String])],
        cursor_home: CursorHome,
    ) -> DashboardResult<()> {
        let _pause = ModuleSinkPause::new();
        let mut state = self.write_section.lock_or_recover();
        if !state.is_live {
            return Ok(());
        }
        if let CursorHome::Set(position) = cursor_home {
            state.cursor_home = position;
        }

        let device = &self.device;
        let can_position = device.capabilities().cursor_control;
        if can_position {
            device.write(CURSOR_HIDE);
        }
        if clear && can_position {
            device.write(CLEAR_SCREEN);
        }
        for (rect, rows) in frames {
            DEBUG_DASHBOARD_PAINT.then(|| {
                tracing::debug!(message = "Screen::paint_frames", rect = %rect, rows = rows.len());
            });
            for (offset, row) in rows.iter().enumerate() {
                let y = rect.y.saturating_add(u16::try_from(offset).unwrap_or(u16::MAX));
                device.set_cursor(rect.x, y);
                device.write(row);
                device.write(SGR_RESET);
            }
        }
        if can_position && let Some((x, y)) = state.cursor_home {
            device.set_cursor(x, y);
            device.write(CURSOR_SHOW);
        }
        device.flush()
    }
}
