// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Error taxonomy for the dashboard.
//!
//! | Kind                | Variants                                      | Handling                       |
//! |:--------------------|:----------------------------------------------|:-------------------------------|
//! | Fatal               | [`Setup`], [`NotInteractive`], [`InputClosed`] | routed through the quit path   |
//! | Recoverable / local | [`IndexOutOfRange`], [`DuplicateTitle`], [`NoSuchPage`], [`InvalidKeyBinding`] | returned to the caller |
//! | I/O                 | [`Io`]                                        | depends on the call site       |
//!
//! Best effort operations (clipboard, window flash) never produce an error, they
//! degrade to a neutral value instead.
//!
//! [`Setup`]: DashboardError::Setup
//! [`NotInteractive`]: DashboardError::NotInteractive
//! [`InputClosed`]: DashboardError::InputClosed
//! [`IndexOutOfRange`]: DashboardError::IndexOutOfRange
//! [`DuplicateTitle`]: DashboardError::DuplicateTitle
//! [`NoSuchPage`]: DashboardError::NoSuchPage
//! [`InvalidKeyBinding`]: DashboardError::InvalidKeyBinding
//! [`Io`]: DashboardError::Io

use miette::Diagnostic;

pub type DashboardResult<T> = Result<T, DashboardError>;

#[derive(Debug, thiserror::Error, Diagnostic)]
pub enum DashboardError {
    /// Entering raw mode or the alternate screen failed. The terminal can't be used.
    #[error("Terminal setup failed: {message}")]
    #[diagnostic(
        code(r3bl_dashboard::terminal::setup),
        help("Make sure the process is attached to an interactive terminal")
    )]
    Setup { message: String },

    #[error("Input is not an interactive terminal")]
    #[diagnostic(
        code(r3bl_dashboard::terminal::not_interactive),
        help("Run the program directly in a terminal, or set R3BL_DASHBOARD_BACKEND=dumb")
    )]
    NotInteractive,

    #[error("Input stream closed")]
    #[diagnostic(code(r3bl_dashboard::terminal::input_closed))]
    InputClosed,

    #[error("Index {index} is out of range, length is {len}")]
    #[diagnostic(code(r3bl_dashboard::buffer::index_out_of_range))]
    IndexOutOfRange { index: usize, len: usize },

    #[error("A module titled '{title}' already exists on page '{page}'")]
    #[diagnostic(
        code(r3bl_dashboard::page::duplicate_title),
        help("Module titles are identity keys and must be unique within a page")
    )]
    DuplicateTitle { title: String, page: String },

    #[error("Page {index} does not exist, there are {count} pages")]
    #[diagnostic(code(r3bl_dashboard::manager::no_such_page))]
    NoSuchPage { index: usize, count: usize },

    #[error("Invalid key binding '{input}'")]
    #[diagnostic(
        code(r3bl_dashboard::config::invalid_key_binding),
        help("Use modifiers joined with '+', eg: ctrl+c, alt+left, f5, shift+tab")
    )]
    InvalidKeyBinding { input: String },

    #[error(transparent)]
    #[diagnostic(code(r3bl_dashboard::io))]
    Io(#[from] std::io::Error),
}

impl DashboardError {
    /// Errors that leave the terminal unusable. These end the session via
    /// [`crate::TerminalDevice::quit`].
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            DashboardError::Setup { .. }
                | DashboardError::NotInteractive
                | DashboardError::InputClosed
        )
    }

    pub fn setup(message: impl Into<String>) -> Self {
        DashboardError::Setup {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_fatal_classification() {
        assert!(DashboardError::setup("tcgetattr").is_fatal());
        assert!(DashboardError::NotInteractive.is_fatal());
        assert!(DashboardError::InputClosed.is_fatal());
        assert!(!DashboardError::IndexOutOfRange { index: 3, len: 1 }.is_fatal());
        assert!(
            !DashboardError::Io(std::io::Error::other("boom")).is_fatal()
        );
    }

    #[test]
    fn test_display() {
        let it = DashboardError::IndexOutOfRange { index: 5, len: 2 };
        assert_eq!(it.to_string(), "Index 5 is out of range, length is 2");

        let it = DashboardError::DuplicateTitle {
            title: "log".into(),
            page: "main".into(),
        };
        assert_eq!(
            it.to_string(),
            "A module titled 'log' already exists on page 'main'"
        );
    }

    #[test]
    fn test_diagnostic_code() {
        let it = DashboardError::NotInteractive;
        let code = it.code().map(|c| c.to_string());
        assert_eq!(
            code.as_deref(),
            Some("r3bl_dashboard::terminal::not_interactive")
        );
    }
}
