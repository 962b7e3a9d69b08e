// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use miette::IntoDiagnostic;
use tracing::dispatcher;
use tracing_core::LevelFilter;
use tracing_subscriber::{Layer, Registry, layer::SubscriberExt, registry::LookupSpan,
                         util::SubscriberInitExt};

use crate::{ModuleLogLayer, TracingConfig, WriterConfig, core::log::rolling_file_appender_impl};

/// Type alias for a boxed layer.
pub type DynLayer<S> = dyn Layer<S> + Send + Sync + 'static;

/// Install a global subscriber for the whole process. Does nothing if the level filter
/// is [`LevelFilter::OFF`].
///
/// ```no_run
/// use r3bl_dashboard::try_initialize_logging_global;
/// try_initialize_logging_global(tracing::Level::DEBUG).unwrap();
/// ```
///
/// # Errors
///
/// If the log file can't be created, or a global subscriber is already set.
pub fn try_initialize_logging_global(config: impl Into<TracingConfig>) -> miette::Result<()> {
    let config: TracingConfig = config.into();
    if config.get_level_filter() == LevelFilter::OFF {
        return Ok(());
    }
    if let Some(layers) = try_create_layers(config)? {
        tracing_subscriber::registry()
            .with(layers)
            .try_init()
            .into_diagnostic()?;
    }
    Ok(())
}

/// Install a subscriber for the current thread only. It is removed when the returned
/// guard is dropped. Handy in tests.
///
/// # Errors
///
/// If the log file can't be created.
pub fn try_initialize_logging_thread_local(
    config: impl Into<TracingConfig>,
) -> miette::Result<Option<dispatcher::DefaultGuard>> {
    let config: TracingConfig = config.into();
    if config.get_level_filter() == LevelFilter::OFF {
        return Ok(None);
    }
    Ok(try_create_layers(config)?
        .map(|layers| tracing::subscriber::set_default(tracing_subscriber::registry().with(layers))))
}

/// Returns the layers without installing them. The level filter goes first so it
/// applies to every layer after it.
///
/// # Errors
///
/// If the log file can't be created.
pub fn try_create_layers(
    config: TracingConfig,
) -> miette::Result<Option<Vec<Box<DynLayer<Registry>>>>> {
    let mut layers: Vec<Box<DynLayer<Registry>>> = vec![Box::new(config.get_level_filter())];

    if let Some(layer) = try_create_module_layer(config.get_level_filter(), &config.writer_config) {
        layers.push(layer);
    }

    if let Some(layer) = try_create_file_layer(config.get_level_filter(), &config.writer_config)? {
        layers.push(layer);
    }

    Ok(Some(layers))
}

#[must_use]
pub fn try_create_module_layer<S>(
    level_filter: LevelFilter,
    writer_config: &WriterConfig,
) -> Option<Box<DynLayer<S>>>
where
    S: tracing_core::Subscriber,
    for<'a> S: LookupSpan<'a>,
{
    let module = writer_config.module()?;
    Some(Box::new(
        ModuleLogLayer::new(module.clone()).with_filter(level_filter),
    ))
}

/// File output has no colors, the file is meant to be read with `tail -f` or an editor.
///
/// # Errors
///
/// If the log file can't be created.
pub fn try_create_file_layer<S>(
    level_filter: LevelFilter,
    writer_config: &WriterConfig,
) -> miette::Result<Option<Box<DynLayer<S>>>>
where
    S: tracing_core::Subscriber,
    for<'a> S: LookupSpan<'a>,
{
    let Some(path) = writer_config.file_path() else {
        return Ok(None);
    };
    let file = rolling_file_appender_impl::try_create(path)?;
    Ok(Some(Box::new(
        tracing_subscriber::fmt::layer()
            .with_ansi(false)
            .with_writer(file)
            .with_filter(level_filter),
    )))
}
