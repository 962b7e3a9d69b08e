// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

#[cfg(unix)]
use super::raw_mode_unix;
#[cfg(windows)]
use super::raw_mode_windows;
use crate::DashboardResult;

/// # Errors
///
/// Returns [`crate::DashboardError::NotInteractive`] when there is no terminal to put
/// in raw mode, or [`crate::DashboardError::Setup`] when the terminal refuses.
pub fn enable_raw_mode() -> DashboardResult<()> {
    #[cfg(unix)]
    {
        raw_mode_unix::enable_raw_mode()
    }

    #[cfg(windows)]
    {
        raw_mode_windows::enable_raw_mode()
    }

    #[cfg(not(any(unix, windows)))]
    {
        Err(crate::DashboardError::setup("Platform not supported"))
    }
}

/// Restore the settings saved by [`enable_raw_mode`]. No-op if raw mode was never
/// enabled.
///
/// # Errors
///
/// Returns [`crate::DashboardError::Setup`] if the original settings can't be applied.
pub fn disable_raw_mode() -> DashboardResult<()> {
    #[cfg(unix)]
    {
        raw_mode_unix::disable_raw_mode()
    }

    #[cfg(windows)]
    {
        raw_mode_windows::disable_raw_mode()
    }

    #[cfg(not(any(unix, windows)))]
    {
        Ok(())
    }
}
