// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::{io::Write, sync::Arc};

use crate::{LockExt, Safe, StdMutex};

pub type SendRawTerminal = dyn Write + Send;
pub type SafeRawTerminal = Safe<SendRawTerminal>;

/// Where terminal backends send their bytes.
/// - It is safe to clone.
/// - Tests swap in a `StdoutMock` via `OutputDeviceExt::new_mock` (`test-fixtures`
///   feature).
#[derive(Clone)]
pub struct OutputDevice {
    pub resource: SafeRawTerminal,
    pub is_mock: bool,
}

impl std::fmt::Debug for OutputDevice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OutputDevice")
            .field("is_mock", &self.is_mock)
            .finish_non_exhaustive()
    }
}

impl Default for OutputDevice {
    fn default() -> Self { Self::new_stdout() }
}

impl OutputDevice {
    #[must_use]
    pub fn new_stdout() -> Self {
        Self {
            resource: Arc::new(StdMutex::new(std::io::stdout())),
            is_mock: false,
        }
    }

    /// Locks the output device for writing. Don't call this again in the same scope
    /// while the guard is alive, it will deadlock.
    pub fn lock(&self) -> std::sync::MutexGuard<'_, SendRawTerminal> {
        self.resource.lock_or_recover()
    }

    /// Write all of `bytes` and flush, in one critical section.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error.
    pub fn write_and_flush(&self, bytes: &[u8]) -> std::io::Result<()> {
        let mut guard = self.lock();
        guard.write_all(bytes)?;
        guard.flush()
    }
}
