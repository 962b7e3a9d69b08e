// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// Attach sources.
pub mod module_log_layer;
pub mod module_logger;
pub mod rolling_file_appender_impl;
pub mod severity;
pub mod tracing_config;
pub mod tracing_init;

// Re-export.
pub use module_log_layer::*;
pub use module_logger::*;
pub use severity::*;
pub use tracing_config::*;
pub use tracing_init::*;
