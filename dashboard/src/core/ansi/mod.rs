// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// Attach sources.
pub mod escape_sequences;
pub mod visible_text;

// Re-export.
pub use escape_sequences::*;
pub use visible_text::*;
