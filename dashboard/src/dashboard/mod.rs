// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

pub const DEBUG_DASHBOARD_PAINT: bool = false;
pub const DEBUG_DASHBOARD_FOCUS: bool = false;
pub const DEBUG_DASHBOARD_ROUTING: bool = false;

// Attach sources.
pub mod dashboard_config;
pub mod geometry;
pub mod key_routing;
pub mod module;
pub mod module_handle;
pub mod module_manager;
pub mod module_page;
pub mod screen;

// Re-export.
pub use dashboard_config::*;
pub use geometry::*;
pub use key_routing::*;
pub use module::*;
pub use module_handle::*;
pub use module_manager::*;
pub use module_page::*;
pub use screen::*;
