// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Unix/Linux/macOS implementation of raw mode using rustix's safe termios API.

use std::{fs::File,
          io,
          sync::{LazyLock, Mutex}};

use rustix::{fd::{AsFd, BorrowedFd},
             termios::{self, OptionalActions, Termios}};

use crate::{DashboardError, DashboardResult, LockExt};

/// Stores the original terminal settings to restore later.
static ORIGINAL_TERMIOS: LazyLock<Mutex<Option<Termios>>> =
    LazyLock::new(|| Mutex::new(None));

/// Either stdin (when it's a tty) or `/dev/tty` (when stdin is redirected).
#[derive(Debug)]
pub(crate) enum TerminalFd {
    Stdin(io::Stdin),
    DevTty(File),
}

impl AsFd for TerminalFd {
    fn as_fd(&self) -> BorrowedFd<'_> {
        match self {
            TerminalFd::Stdin(stdin) => stdin.as_fd(),
            TerminalFd::DevTty(file) => file.as_fd(),
        }
    }
}

/// Gets a file descriptor for the controlling terminal.
///
/// Follows crossterm's approach: checks if stdin is a tty and uses it if so;
/// otherwise opens `/dev/tty`. This handles cases where stdin is redirected
/// (e.g., `echo "data" | your_app`).
///
/// # Errors
///
/// Returns [`DashboardError::NotInteractive`] if stdin is not a tty and `/dev/tty`
/// cannot be opened.
pub(crate) fn get_terminal_fd() -> DashboardResult<TerminalFd> {
    let stdin = io::stdin();
    if termios::isatty(&stdin) {
        return Ok(TerminalFd::Stdin(stdin));
    }
    File::options()
        .read(true)
        .write(true)
        .open("/dev/tty")
        .map(TerminalFd::DevTty)
        .map_err(|_| DashboardError::NotInteractive)
}

/// Save the current termios and apply `cfmakeraw` semantics via
/// [`Termios::make_raw`]: no canonical mode, no echo, no signal generation,
/// `VMIN=1`, `VTIME=0`.
pub fn enable_raw_mode() -> DashboardResult<()> {
    let fd = get_terminal_fd()?;

    let mut termios = termios::tcgetattr(&fd).map_err(|e| {
        DashboardError::setup(format!("failed to retrieve terminal attributes: {e}"))
    })?;

    {
        let mut original = ORIGINAL_TERMIOS.lock_or_recover();
        if original.is_none() {
            *original = Some(termios.clone());
        }
    }

    termios.make_raw();

    termios::tcsetattr(&fd, OptionalActions::Now, &termios).map_err(|e| {
        DashboardError::setup(format!("failed to set terminal attributes: {e}"))
    })?;

    Ok(())
}

pub fn disable_raw_mode() -> DashboardResult<()> {
    let original = ORIGINAL_TERMIOS.lock_or_recover();

    if let Some(ref termios) = *original {
        let fd = get_terminal_fd()?;
        termios::tcsetattr(&fd, OptionalActions::Now, termios).map_err(|e| {
            DashboardError::setup(format!("failed to restore terminal attributes: {e}"))
        })?;
    }
    Ok(())
}
