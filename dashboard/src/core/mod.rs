// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// Attach sources.
pub mod ansi;
pub mod common;
pub mod log;
pub mod terminal_io;
#[cfg(any(test, feature = "test-fixtures"))]
pub mod test_fixtures;

// Re-export.
pub use ansi::*;
pub use common::*;
pub use log::*;
pub use terminal_io::*;
#[cfg(any(test, feature = "test-fixtures"))]
pub use test_fixtures::*;
