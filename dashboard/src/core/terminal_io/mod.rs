// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

pub const DEBUG_DASHBOARD_SHOW_TERMINAL_BACKEND: bool = false;
pub const DEBUG_DASHBOARD_INPUT: bool = false;
pub const DEBUG_DASHBOARD_COPY_PASTE: bool = false;

// Attach sources.
pub mod backend_selection;
pub mod console_device;
pub mod dumb_device;
pub mod input_event;
pub mod output_device;
#[cfg(unix)]
pub mod posix_device;
pub mod raw_mode;
pub mod system_clipboard;
pub mod terminal_device;
pub mod vt100_keyboard;

// Re-export.
pub use backend_selection::*;
pub use console_device::*;
pub use dumb_device::*;
pub use input_event::*;
pub use output_device::*;
#[cfg(unix)]
pub use posix_device::*;
pub use raw_mode::*;
pub use system_clipboard::*;
pub use terminal_device::*;
pub use vt100_keyboard::*;
