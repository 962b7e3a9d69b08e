// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Fixtures for tests of this crate and of apps built on it. They never touch a real
//! terminal. Outside this crate's own tests they need the `test-fixtures` feature, eg:
//!
//! ```toml
//! [dev-dependencies]
//! r3bl_dashboard = { version = "0.1", features = ["test-fixtures"] }
//! ```

// Attach sources.
pub mod mock_terminal_device;
pub mod output_device_ext;
pub mod stdout_mock;

// Re-export.
pub use mock_terminal_device::*;
pub use output_device_ext::*;
pub use stdout_mock::*;
