// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Raw mode: keystrokes are delivered immediately, unprocessed, without line
//! buffering or local echo.
//!
//! - Unix uses rustix's termios API directly, see [`raw_mode_unix`].
//! - Windows delegates to crossterm, which owns the console mode bit flags.

// Private modules (hide internal structure).
mod raw_mode_core;

#[cfg(unix)]
mod raw_mode_unix;

#[cfg(windows)]
mod raw_mode_windows;

// Re-export the public API (flat, ergonomic surface).
pub use raw_mode_core::*;
#[cfg(unix)]
pub(crate) use raw_mode_unix::{TerminalFd, get_terminal_fd};
