// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::{cell::Cell, fmt::Write as _};

use tracing::{Event, Subscriber,
              field::{Field, Visit}};
use tracing_subscriber::{Layer, layer::Context};

use crate::{ModuleHandle, ModuleLogger, Severity};

thread_local! {
    static IS_SINK_PAUSED: Cell<bool> = const { Cell::new(false) };
}

/// While alive, `tracing` events on this thread are not written into any module. Held
/// by every code path that owns a module or screen lock, since writing an event takes
/// those same locks.
#[derive(Debug)]
pub(crate) struct ModuleSinkPause {
    previous: bool,
}

impl ModuleSinkPause {
    pub(crate) fn new() -> Self {
        Self {
            previous: IS_SINK_PAUSED.replace(true),
        }
    }
}

impl Drop for ModuleSinkPause {
    fn drop(&mut self) { IS_SINK_PAUSED.set(self.previous); }
}

/// Forwards `tracing` events into a dashboard module through a [`ModuleLogger`].
///
/// - `event_id` and `event_name` fields fill those columns. Without them the id is `0`
///   and the name is the event's target.
/// - Every other field is appended to the message as `name=value`.
#[derive(Debug, Clone)]
pub struct ModuleLogLayer {
    logger: ModuleLogger,
}

impl ModuleLogLayer {
    #[must_use]
    pub fn new(module: ModuleHandle) -> Self {
        Self {
            logger: ModuleLogger::new(module).with_min_severity(Severity::Trace),
        }
    }

    #[must_use]
    pub fn from_logger(logger: ModuleLogger) -> Self { Self { logger } }
}

impl<S: Subscriber> Layer<S> for ModuleLogLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let severity = Severity::from(*event.metadata().level());
        if !self.logger.is_enabled(severity) || IS_SINK_PAUSED.get() {
            return;
        }

        let mut visitor = EventVisitor::default();
        event.record(&mut visitor);
        let event_name = visitor
            .event_name
            .as_deref()
            .unwrap_or_else(|| event.metadata().target());

        let _pause = ModuleSinkPause::new();
        self.logger.log(
            severity,
            visitor.event_id.unwrap_or_default(),
            event_name,
            &visitor.message,
            None,
        );
    }
}

#[derive(Debug, Default)]
struct EventVisitor {
    message: String,
    event_id: Option<i32>,
    event_name: Option<String>,
}

impl EventVisitor {
    fn push_field(&mut self, name: &str, value: impl std::fmt::Display) {
        if !self.message.is_empty() {
            self.message.push(' ');
        }
        let _unused = write!(self.message, "{name}={value}");
    }

    fn push_message(&mut self, value: impl std::fmt::Display) {
        let fields = std::mem::take(&mut self.message);
        self.message = value.to_string();
        if !fields.is_empty() {
            self.message.push(' ');
            self.message.push_str(&fields);
        }
    }
}

impl Visit for EventVisitor {
    fn record_i64(&mut self, field: &Field, value: i64) {
        match field.name() {
            "event_id" => self.event_id = i32::try_from(value).ok(),
            name => self.push_field(name, value),
        }
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        match field.name() {
            "event_id" => self.event_id = i32::try_from(value).ok(),
            name => self.push_field(name, value),
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        match field.name() {
            "message" => self.push_message(value),
            "event_name" => self.event_name = Some(value.to_string()),
            name => self.push_field(name, value),
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        match field.name() {
            "message" => self.push_message(format_args!("{value:?}")),
            "event_name" => self.event_name = Some(format!("{value:?}")),
            name => self.push_field(name, format_args!("{value:?}")),
        }
    }
}
