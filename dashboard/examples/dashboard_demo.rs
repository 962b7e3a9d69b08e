// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Two page operator console. Run with:
//!
//! ```text
//! cargo run --example dashboard_demo -- --log-file /tmp/dashboard.log
//! ```
//!
//! Type `help` in the `cmd` line for the commands. `alt+right` / `alt+left` switch
//! pages, `tab` moves the focus, `ctrl+c` quits.

#![warn(clippy::all)]
#![warn(rust_2018_idioms)]

use std::time::Duration;

use clap::Parser;
use r3bl_dashboard::{AnsiColor, Button, CellCanvas, CellStyle, DashboardConfig, KeyPress,
                     Label, ListView, Module, ModuleEvent, ModuleHandle, ModuleKind, ModuleLogger,
                     ModuleManager, ModulePage, ProgressBar, Rect, Severity, TabBar,
                     TerminalBackendSelection, Toast, Toggle, TracingConfig, WriterConfig,
                     setup_default_miette_global_report_handler,
                     try_initialize_logging_global};
use tokio_util::sync::CancellationToken;

const ISSUES_URL: &str = "https://github.com/r3bl-org/r3bl-open-core/issues/new";
const HELP: &str = "Commands: help, progress <n>, toast <text>, clear, exit";

#[derive(Debug, Parser)]
#[command(bin_name = "dashboard_demo")]
#[command(about = "Terminal dashboard with a log, a command line, and a few widgets")]
#[command(version)]
#[command(next_line_help = true)]
/// More info: <https://docs.rs/clap/latest/clap/_derive/#overview>
struct CLIArg {
    #[arg(long, short = 'b', default_value_t = TerminalBackendSelection::Auto, help = "auto, posix, console, or dumb")]
    backend: TerminalBackendSelection,

    #[arg(long, short = 'q', default_value = "ctrl+c", help = "Key that quits, eg: `ctrl+q`")]
    quit_key: String,

    #[arg(long, short = 't', help = "Window title")]
    title: Option<String>,

    #[arg(long, short = 'l', help = "Also write the log to this file")]
    log_file: Option<String>,

    #[arg(long, default_value_t = tracing::Level::INFO, help = "Most verbose level to log")]
    log_level: tracing::Level,
}

struct Widgets {
    log: ModuleHandle,
    cmd: ModuleHandle,
    progress: ModuleHandle,
    verbose: ModuleHandle,
    toast: ModuleHandle,
    ping: ModuleHandle,
    canvas: ModuleHandle,
}

#[tokio::main]
async fn main() -> miette::Result<()> {
    setup_default_miette_global_report_handler(ISSUES_URL);
    let cli_arg = CLIArg::parse();

    let mut config = DashboardConfig::default()
        .with_backend(cli_arg.backend)
        .try_with_quit_key(&cli_arg.quit_key)?;
    if let Some(title) = &cli_arg.title {
        config = config.with_window_title(title);
    }

    let manager = ModuleManager::new(config.clone());
    let (columns, rows) = crossterm::terminal::size().unwrap_or((80, 24));
    let widgets = build_pages(&manager, &config, columns.max(40), rows.max(16))?;

    let writer_config = match cli_arg.log_file {
        Some(path) => WriterConfig::ModuleAndFile(widgets.log.clone(), path),
        None => WriterConfig::Module(widgets.log.clone()),
    };
    try_initialize_logging_global(TracingConfig {
        writer_config,
        level_filter: cli_arg.log_level.into(),
    })?;

    let verbose = widgets.verbose.clone();
    manager.bind_key(KeyPress::ctrl('t'), move |_manager, _key| {
        verbose.apply(|it| match it.kind_mut() {
            ModuleKind::Toggle(toggle) => toggle.set(!toggle.is_on()),
            _ => false,
        });
        Ok(())
    });

    let _input_thread = manager.start()?;
    tracing::info!(event_id = 1, event_name = "startup", "dashboard is up");

    let shutdown = CancellationToken::new();
    spawn_workers(&widgets, shutdown.clone());

    while let Some(line) = widgets.cmd.read_line(shutdown.clone()).await {
        run_command(&widgets, line.trim(), &shutdown);
    }

    manager.quit(None)
}

fn build_pages(
    manager: &ModuleManager,
    config: &DashboardConfig,
    columns: u16,
    rows: u16,
) -> miette::Result<Widgets> {
    let half = columns / 2;
    let log_height = rows - 9;

    let mut main = ModulePage::new("main");
    let log = main.add_module(
        Module::new(Rect::new(0, 0, columns, log_height), "log", config.text_log())
            .with_display_name("Log"),
    )?;
    let progress = main.add_module(Module::new(
        Rect::new(0, log_height, half, 3),
        "progress",
        ProgressBar::new(100),
    ))?;
    let verbose = main.add_module(Module::new(
        Rect::new(half, log_height, columns - half, 3),
        "verbose",
        Toggle::new("verbose", false),
    ))?;
    let toast = main.add_module(Module::new(
        Rect::new(0, log_height + 3, columns, 3),
        "toast",
        Toast::new(),
    ))?;
    let cmd = main.add_module(
        Module::new(Rect::new(0, log_height + 6, columns, 3), "cmd", config.line_input("> "))
            .with_display_name("Command"),
    )?;
    main.select("cmd");

    let mut more = ModulePage::new("more");
    more.add_module(Module::new(
        Rect::new(0, 0, columns, 3),
        "tabs",
        TabBar::new(["overview", "jobs", "help"]),
    ))?;
    let ping = more.add_module(Module::new(Rect::new(0, 3, half, 3), "ping", Button::new("ping")))?;
    let canvas = more.add_module(Module::new(
        Rect::new(half, 3, columns - half, 6),
        "canvas",
        CellCanvas::new(),
    ))?;
    more.add_module(Module::new(
        Rect::new(0, 9, half, rows - 9),
        "jobs",
        ListView::new(
            Some("ID  NAME      STATE".into()),
            vec![
                "1   backup    done".into(),
                "2   reindex   running".into(),
                "3   vacuum    queued".into(),
            ],
        ),
    ))?;
    let help = more.add_module(Module::new(
        Rect::new(half, 9, columns - half, rows - 9),
        "help",
        Label::new(),
    ))?;
    help.set_label_text(HELP);

    manager.add_page(main);
    manager.add_page(more);

    Ok(Widgets {
        log,
        cmd,
        progress,
        verbose,
        toast,
        ping,
        canvas,
    })
}

fn spawn_workers(widgets: &Widgets, shutdown: CancellationToken) {
    let progress = widgets.progress.clone();
    let canvas = widgets.canvas.clone();
    let token = shutdown.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_millis(250));
        let mut tick: u16 = 0;
        loop {
            tokio::select! {
                () = token.cancelled() => break,
                _ = interval.tick() => {
                    if !progress.increment_progress(1) {
                        progress.set_progress(0, 100);
                        tracing::info!(event_id = 2, event_name = "progress", "wrapped around");
                    }
                    let x = tick % 20;
                    canvas.clear_cell((x + 19) % 20, 1);
                    canvas.set_cell(x, 1, '●', CellStyle::fg(AnsiColor::Green));
                    tick = tick.wrapping_add(1);
                }
            }
        }
    });

    let logger = ModuleLogger::new(widgets.log.clone()).with_category("ping");
    let mut ping_events = widgets.ping.subscribe();
    tokio::spawn(async move {
        loop {
            tokio::select! {
                () = shutdown.cancelled() => break,
                Ok(event) = ping_events.recv() => {
                    if let ModuleEvent::ButtonPressed { count } = event {
                        logger.information(3, "ping", &format!("pong #{count}"));
                    }
                }
            }
        }
    });
}

fn run_command(widgets: &Widgets, line: &str, shutdown: &CancellationToken) {
    let (command, rest) = line.split_once(' ').unwrap_or((line, ""));
    match command {
        "" => {}
        "help" => {
            widgets.log.add_text(HELP);
        }
        "progress" => match rest.trim().parse::<u64>() {
            Ok(value) => {
                widgets.progress.set_progress(value, 100);
            }
            Err(error) => {
                let logger = ModuleLogger::new(widgets.log.clone()).with_category("cmd");
                logger.error(4, "progress", "not a number", &error);
            }
        },
        "toast" => {
            widgets.toast.show_toast(rest, Severity::Warning);
        }
        "clear" => {
            widgets.log.clear(true);
        }
        "exit" => shutdown.cancel(),
        other => {
            widgets.log.add_text(&format!("unknown command: {other}"));
        }
    }
}
