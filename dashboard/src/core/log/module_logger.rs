// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::{error::Error, panic::Location};

use chrono::Local;

use crate::{ModuleHandle, SGR_RESET, Severity};

pub const TIMESTAMP_FORMAT: &str = "%H:%M:%S%.3f";

/// One structured log entry, before it is formatted.
#[derive(Debug, Clone, Copy)]
pub struct LogEntry<'a> {
    pub severity: Severity,
    pub event_id: i32,
    pub event_name: &'a str,
    pub message: &'a str,
}

/// Structured logging endpoint that writes into a dashboard module, usually a
/// [`crate::TextLog`]. Entries below `min_severity` are dropped before formatting.
///
/// ```text
/// 12:04:05.120|7:warn|reconnect
/// lost connection, retrying
/// Exception in net: connection reset at src/net.rs:42:9
/// ```
#[derive(Debug, Clone)]
pub struct ModuleLogger {
    module: ModuleHandle,
    min_severity: Severity,
    category: String,
}

impl ModuleLogger {
    #[must_use]
    pub fn new(module: ModuleHandle) -> Self {
        let category = module.title().to_string();
        Self {
            module,
            min_severity: Severity::default(),
            category,
        }
    }

    #[must_use]
    pub fn with_min_severity(mut self, min_severity: Severity) -> Self {
        self.min_severity = min_severity;
        self
    }

    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    #[must_use]
    pub fn module(&self) -> &ModuleHandle { &self.module }

    #[must_use]
    pub fn is_enabled(&self, severity: Severity) -> bool { severity >= self.min_severity }

    /// Returns `false` if the entry was filtered out or nothing was written.
    #[track_caller]
    pub fn log(
        &self,
        severity: Severity,
        event_id: i32,
        event_name: &str,
        message: &str,
        error: Option<&dyn Error>,
    ) -> bool {
        if !self.is_enabled(severity) {
            return false;
        }
        let entry = LogEntry {
            severity,
            event_id,
            event_name,
            message,
        };
        let exception = error.map(|error| {
            format_exception(&self.category, &error.to_string(), Location::caller())
        });
        let timestamp = Local::now().format(TIMESTAMP_FORMAT).to_string();
        self.module
            .add_text(&format_entry(&timestamp, entry, exception.as_deref()))
    }

    #[track_caller]
    pub fn information(&self, event_id: i32, event_name: &str, message: &str) -> bool {
        self.log(Severity::Information, event_id, event_name, message, None)
    }

    #[track_caller]
    pub fn warning(&self, event_id: i32, event_name: &str, message: &str) -> bool {
        self.log(Severity::Warning, event_id, event_name, message, None)
    }

    #[track_caller]
    pub fn error(&self, event_id: i32, event_name: &str, message: &str, error: &dyn Error) -> bool {
        self.log(Severity::Error, event_id, event_name, message, Some(error))
    }
}

/// `TIMESTAMP|EVENTID:SEV|EVENTNAME` in the severity style, then the message on its
/// own line, then the exception line if there is one.
#[must_use]
pub fn format_entry(timestamp: &str, entry: LogEntry<'_>, exception: Option<&str>) -> String {
    let LogEntry {
        severity,
        event_id,
        event_name,
        message,
    } = entry;
    let mut acc = format!(
        "{style}{timestamp}|{event_id}:{tag}|{event_name}{SGR_RESET}\n{message}",
        style = severity.style(),
        tag = severity.tag(),
    );
    if let Some(exception) = exception {
        acc.push('\n');
        acc.push_str(exception);
    }
    acc
}

#[must_use]
pub fn format_exception(source: &str, message: &str, site: &Location<'_>) -> String {
    let message = message.lines().next().unwrap_or_default();
    format!(
        "Exception in {source}: {message} at {}:{}:{}",
        site.file(),
        site.line(),
        site.column()
    )
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{Module, ModuleKind, ModulePage, Rect, TextLog, strip_control_sequences};

    fn logger(min_severity: Severity) -> ModuleLogger {
        let handle = ModulePage::new("logs")
            .add_module(Module::new(Rect::new(0, 0, 160, 10), "log", TextLog::default()))
            .unwrap();
        ModuleLogger::new(handle).with_min_severity(min_severity)
    }

    fn rows(logger: &ModuleLogger) -> Vec<String> {
        logger.module().read(|module| match module.kind() {
            ModuleKind::TextLog(log) => {
                log.rows().iter().map(|it| strip_control_sequences(it)).collect()
            }
            _ => vec![],
        })
    }

    #[test]
    fn test_format_entry_without_exception() {
        let entry = LogEntry {
            severity: Severity::Warning,
            event_id: 7,
            event_name: "reconnect",
            message: "retrying",
        };
        assert_eq!(
            format_entry("12:04:05.120", entry, None),
            "\x1b[33m\x1b[1m12:04:05.120|7:warn|reconnect\x1b[0m\nretrying"
        );
    }

    #[test]
    fn test_format_exception_uses_first_line() {
        let site = Location::caller();
        let line = format_exception("net", "reset\nbacktrace", site);
        assert!(line.starts_with("Exception in net: reset at "));
        assert!(line.contains("module_logger.rs"));
    }

    #[test]
    fn test_below_minimum_is_dropped() {
        let logger = logger(Severity::Warning);
        assert!(!logger.information(1, "boot", "hello"));
        assert!(rows(&logger).is_empty());
        assert!(logger.warning(2, "disk", "almost full"));
        let rows = rows(&logger);
        assert_eq!(rows.len(), 2);
        assert!(rows[0].ends_with("|2:warn|disk"));
        assert_eq!(rows[1], "almost full");
    }

    #[test]
    fn test_error_adds_exception_line() {
        let logger = logger(Severity::Trace).with_category("worker");
        let error = std::io::Error::other("broken pipe");
        assert!(logger.error(3, "send", "send failed", &error));
        let rows = rows(&logger);
        assert_eq!(rows.len(), 3);
        assert!(rows[2].starts_with("Exception in worker: broken pipe at "));
        assert!(rows[2].contains("module_logger.rs"));
    }
}
