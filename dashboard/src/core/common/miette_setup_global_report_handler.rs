// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Install a graphical [miette] report handler for the process.
//!
//! Used by [`crate::TerminalDevice::quit`] callers (and the demo's `main`) so that a
//! fatal [`crate::DashboardError`] is printed with its diagnostic code and help text
//! after the terminal has been restored.

use miette::MietteHandlerOpts;

/// The [`miette::ErrorHook`] is lazily evaluated, so the terminal width is only queried
/// when an error report is actually rendered.
pub fn setup_default_miette_global_report_handler(issues_url: &'static str) {
    miette::set_hook(Box::new(|_report| {
        let terminal_width = {
            let it = usize::from(
                crossterm::terminal::size()
                    .map(|(columns, _rows)| columns)
                    .unwrap_or(80),
            );
            tracing::debug!(message = "miette::set_hook", terminal_width = it);
            it
        };
        Box::new(
            MietteHandlerOpts::new()
                .width(terminal_width)
                .wrap_lines(true)
                .force_graphical(true)
                .unicode(true)
                .context_lines(3)
                .tab_width(4)
                .with_cause_chain()
                .footer(issues_url.to_string())
                .build(),
        )
    }))
    .ok();
}
