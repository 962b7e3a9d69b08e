// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! # r3bl_dashboard
//!
//! Split one terminal screen into bordered rectangular [`Module`]s, group them into
//! [`ModulePage`]s, and let a [`ModuleManager`] route keyboard and mouse input to the
//! focused module while background tasks write into other modules.
//!
//! ```no_run
//! use r3bl_dashboard::{DashboardConfig, Module, ModuleManager, ModulePage, Rect};
//!
//! fn main() -> miette::Result<()> {
//!     let config = DashboardConfig::default().with_window_title("ops");
//!     let manager = ModuleManager::new(config.clone());
//!
//!     let mut page = ModulePage::new("main");
//!     let log = page.add_module(Module::new(Rect::new(0, 0, 80, 20), "log", config.text_log()))?;
//!     page.add_module(Module::new(Rect::new(0, 20, 80, 3), "cmd", config.line_input("> ")))?;
//!     manager.add_page(page);
//!
//!     log.add_text("hello");
//!     let input_thread = manager.start()?;
//!     let _unused = input_thread.join();
//!     Ok(())
//! }
//! ```
//!
//! Module layout:
//! - [`core`] has the parts that know nothing about modules: escape sequences and
//!   visible width text layout, ring buffers, errors, logging, and the terminal
//!   devices (POSIX, Windows console, dumb) with their input decoders.
//! - [`dashboard`] has modules, pages, the manager, key routing and the screen.
//!
//! The test fixtures (`MockTerminalDevice`, `StdoutMock`) are only built for this
//! crate's tests, or for other crates with the `test-fixtures` feature:
//!
//! ```compile_fail
//! use r3bl_dashboard::MockTerminalDevice;
//! ```

// Enforce strict error handling in production library code only. Tests and examples are
// allowed to use .unwrap().
#![cfg_attr(not(test), deny(clippy::unwrap_in_result))]

// Attach modules (re-exported below to provide a flat public API).
pub mod core;
pub mod dashboard;

#[allow(ambiguous_glob_reexports)]
pub use core::*;
#[allow(ambiguous_glob_reexports)]
pub use dashboard::*;
