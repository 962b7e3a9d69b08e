// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Pick a [`TerminalDevice`] implementation at runtime.
//!
//! The choice can be forced with [`DashboardConfig::backend`](crate::DashboardConfig)
//! or the [`BACKEND_ENV_VAR`] environment variable. Otherwise it is detected:
//!
//! | Condition                         | Backend                      |
//! |:----------------------------------|:-----------------------------|
//! | `TERM=dumb`, or stdin is no tty   | [`DumbTerminalDevice`]       |
//! | Unix                              | [`PosixTerminalDevice`]      |
//! | Windows                           | [`ConsoleTerminalDevice`]    |
//!
//! [`PosixTerminalDevice`]: crate::PosixTerminalDevice

use std::{io::IsTerminal, sync::Arc};

use strum_macros::{Display, EnumString};

use crate::{ConsoleTerminalDevice, DEBUG_DASHBOARD_SHOW_TERMINAL_BACKEND,
            DumbTerminalDevice, TerminalDevice};

/// Overrides detection, eg: `R3BL_DASHBOARD_BACKEND=dumb`.
pub const BACKEND_ENV_VAR: &str = "R3BL_DASHBOARD_BACKEND";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum TerminalBackendSelection {
    #[default]
    Auto,
    /// Raw VT100 over termios. Falls back to [`TerminalBackendSelection::Console`]
    /// off Unix.
    Posix,
    /// crossterm, with mouse and resize events.
    Console,
    /// Line oriented, escape sequences stripped.
    Dumb,
}

impl TerminalBackendSelection {
    /// Resolve [`TerminalBackendSelection::Auto`] (and unsupported choices) into a
    /// concrete backend. Pure, so the rules are testable without a terminal.
    #[must_use]
    pub fn resolve(self, env_override: Option<&str>, term: Option<&str>, is_tty: bool) -> Self {
        let requested = match (self, env_override.and_then(|it| it.trim().parse().ok())) {
            (TerminalBackendSelection::Auto, Some(from_env)) => from_env,
            (requested, _) => requested,
        };

        match requested {
            TerminalBackendSelection::Auto => {
                if term.is_some_and(|it| it.eq_ignore_ascii_case("dumb")) || !is_tty {
                    TerminalBackendSelection::Dumb
                } else if cfg!(unix) {
                    TerminalBackendSelection::Posix
                } else {
                    TerminalBackendSelection::Console
                }
            }
            TerminalBackendSelection::Posix if !cfg!(unix) => TerminalBackendSelection::Console,
            other => other,
        }
    }

    /// Resolve against the real environment and construct the device.
    #[must_use]
    pub fn create_device(self) -> Arc<dyn TerminalDevice> {
        let env_override = std::env::var(BACKEND_ENV_VAR).ok();
        let term = std::env::var("TERM").ok();
        let is_tty = std::io::stdin().is_terminal();
        let resolved = self.resolve(env_override.as_deref(), term.as_deref(), is_tty);

        DEBUG_DASHBOARD_SHOW_TERMINAL_BACKEND.then(|| {
            tracing::debug!(
                message = "TerminalBackendSelection::create_device",
                requested = %self,
                resolved = %resolved,
                ?term,
                is_tty
            );
        });

        match resolved {
            #[cfg(unix)]
            TerminalBackendSelection::Posix => Arc::new(crate::PosixTerminalDevice::default()),
            TerminalBackendSelection::Dumb => Arc::new(DumbTerminalDevice::default()),
            _ => Arc::new(ConsoleTerminalDevice::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serial_test::serial;
    use test_case::test_case;

    use super::*;
    use crate::DeviceCapabilities;

    #[test_case("auto", TerminalBackendSelection::Auto)]
    #[test_case("POSIX", TerminalBackendSelection::Posix)]
    #[test_case("console", TerminalBackendSelection::Console)]
    #[test_case("Dumb", TerminalBackendSelection::Dumb)]
    fn test_parse(input: &str, expected: TerminalBackendSelection) {
        assert_eq!(input.parse::<TerminalBackendSelection>().unwrap(), expected);
    }

    #[test]
    fn test_display_is_lowercase() {
        assert_eq!(TerminalBackendSelection::Console.to_string(), "console");
    }

    #[test]
    fn test_dumb_when_term_is_dumb_or_no_tty() {
        let auto = TerminalBackendSelection::Auto;
        assert_eq!(auto.resolve(None, Some("dumb"), true), TerminalBackendSelection::Dumb);
        assert_eq!(
            auto.resolve(None, Some("xterm-256color"), false),
            TerminalBackendSelection::Dumb
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_auto_is_posix_on_unix() {
        assert_eq!(
            TerminalBackendSelection::Auto.resolve(None, Some("xterm"), true),
            TerminalBackendSelection::Posix
        );
    }

    #[test]
    fn test_env_override_only_applies_to_auto() {
        assert_eq!(
            TerminalBackendSelection::Auto.resolve(Some("console"), Some("xterm"), true),
            TerminalBackendSelection::Console
        );
        assert_eq!(
            TerminalBackendSelection::Dumb.resolve(Some("console"), Some("xterm"), true),
            TerminalBackendSelection::Dumb
        );
        // Garbage in the env var is ignored.
        assert_eq!(
            TerminalBackendSelection::Auto.resolve(Some("nope"), Some("dumb"), true),
            TerminalBackendSelection::Dumb
        );
    }

    #[test]
    #[serial]
    fn test_create_device_honours_env_var() {
        // SAFETY: serial, no other test touches the environment at the same time.
        unsafe { std::env::set_var(BACKEND_ENV_VAR, "dumb") };
        let device = TerminalBackendSelection::Auto.create_device();
        unsafe { std::env::remove_var(BACKEND_ENV_VAR) };
        assert_eq!(device.capabilities(), DeviceCapabilities::default());
    }

    #[test]
    #[serial]
    fn test_explicit_choice_ignores_env_var() {
        // SAFETY: serial, no other test touches the environment at the same time.
        unsafe { std::env::set_var(BACKEND_ENV_VAR, "dumb") };
        let device = TerminalBackendSelection::Console.create_device();
        unsafe { std::env::remove_var(BACKEND_ENV_VAR) };
        assert!(device.capabilities().mouse);
    }
}
