// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// Attach sources.
pub mod dashboard_error;
pub mod lock_ext;
pub mod miette_setup_global_report_handler;
pub mod reversed_buffer;
pub mod ring_buffer;
pub mod ring_buffer_heap;

// Re-export.
pub use dashboard_error::*;
pub use lock_ext::*;
pub use miette_setup_global_report_handler::*;
pub use reversed_buffer::*;
pub use ring_buffer::*;
pub use ring_buffer_heap::*;
