// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// Attach sources.
pub mod button;
pub mod cell_canvas;
pub mod frame;
pub mod label;
pub mod line_input;
pub mod list_view;
pub mod module_behavior;
pub mod module_event;
pub mod module_struct;
pub mod progress_bar;
pub mod scroll_state;
pub mod tab_bar;
pub mod text_log;
pub mod toast;
pub mod toggle;

// Re-export.
pub use button::*;
pub use cell_canvas::*;
pub use frame::*;
pub use label::*;
pub use line_input::*;
pub use list_view::*;
pub use module_behavior::*;
pub use module_event::*;
pub use module_struct::*;
pub use progress_bar::*;
pub use scroll_state::*;
pub use tab_bar::*;
pub use text_log::*;
pub use toast::*;
pub use toggle::*;
