// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use strum_macros::{Display, EnumIter, EnumString};

use crate::{AnsiColor, SgrCode};

/// Ordered from least to most severe, so `severity >= minimum` is the filter.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Display, EnumString, EnumIter,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Severity {
    Trace,
    Debug,
    #[default]
    Information,
    Warning,
    Error,
    Critical,
}

impl Severity {
    /// Four letter tag used in the `EVENTID:SEV` column.
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Severity::Trace => "trce",
            Severity::Debug => "dbug",
            Severity::Information => "info",
            Severity::Warning => "warn",
            Severity::Error => "fail",
            Severity::Critical => "crit",
        }
    }

    /// SGR prefix for this severity. Close it with [`crate::SGR_RESET`].
    #[must_use]
    pub fn style(self) -> String {
        match self {
            Severity::Trace => AnsiColor::Cyan.fg(),
            Severity::Information => format!("{}{}", AnsiColor::Cyan.fg(), SgrCode::Bold),
            Severity::Debug => format!("{}{}", AnsiColor::Magenta.fg(), SgrCode::Bold),
            Severity::Warning => format!("{}{}", AnsiColor::Yellow.fg(), SgrCode::Bold),
            Severity::Error => format!("{}{}", AnsiColor::Red.fg(), SgrCode::Bold),
            Severity::Critical => format!(
                "{}{}{}{}",
                AnsiColor::White.bg(),
                AnsiColor::Red.fg(),
                SgrCode::Bold,
                SgrCode::Negative
            ),
        }
    }
}

impl From<tracing::Level> for Severity {
    fn from(level: tracing::Level) -> Self {
        match level {
            tracing::Level::TRACE => Severity::Trace,
            tracing::Level::DEBUG => Severity::Debug,
            tracing::Level::INFO => Severity::Information,
            tracing::Level::WARN => Severity::Warning,
            tracing::Level::ERROR => Severity::Error,
        }
    }
}
