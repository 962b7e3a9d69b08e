// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::{DEFAULT_EXIT_MESSAGE, DEFAULT_HISTORY_CAPACITY, DEFAULT_LOG_CAPACITY,
            DashboardResult, KeyPress, LineInput, TerminalBackendSelection, TextLog};

/// Settings for a [`crate::ModuleManager`]. Start from [`DashboardConfig::default`] and
/// chain the `with_*` methods.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardConfig {
    pub backend: TerminalBackendSelection,
    pub quit_key: KeyPress,
    pub log_capacity: usize,
    pub history_capacity: usize,
    pub exit_message: String,
    pub window_title: Option<String>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            backend: TerminalBackendSelection::Auto,
            quit_key: KeyPress::ctrl('c'),
            log_capacity: DEFAULT_LOG_CAPACITY,
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            exit_message: DEFAULT_EXIT_MESSAGE.to_string(),
            window_title: None,
        }
    }
}

impl DashboardConfig {
    #[must_use]
    pub fn with_backend(mut self, backend: TerminalBackendSelection) -> Self {
        self.backend = backend;
        self
    }

    #[must_use]
    pub fn with_quit_key(mut self, quit_key: KeyPress) -> Self {
        self.quit_key = quit_key;
        self
    }

    /// Parse the quit key from a binding like `ctrl+q`.
    ///
    /// # Errors
    ///
    /// [`crate::DashboardError::InvalidKeyBinding`] if it doesn't parse.
    pub fn try_with_quit_key(self, binding: &str) -> DashboardResult<Self> {
        Ok(self.with_quit_key(binding.parse()?))
    }

    #[must_use]
    pub fn with_log_capacity(mut self, log_capacity: usize) -> Self {
        self.log_capacity = log_capacity;
        self
    }

    #[must_use]
    pub fn with_history_capacity(mut self, history_capacity: usize) -> Self {
        self.history_capacity = history_capacity;
        self
    }

    #[must_use]
    pub fn with_exit_message(mut self, exit_message: impl Into<String>) -> Self {
        self.exit_message = exit_message.into();
        self
    }

    #[must_use]
    pub fn with_window_title(mut self, window_title: impl Into<String>) -> Self {
        self.window_title = Some(window_title.into());
        self
    }

    /// A text log sized by this config.
    #[must_use]
    pub fn text_log(&self) -> TextLog { TextLog::new(self.log_capacity) }

    /// A line input sized by this config.
    #[must_use]
    pub fn line_input(&self, prompt: impl Into<String>) -> LineInput {
        LineInput::new(prompt, self.history_capacity)
    }
}
