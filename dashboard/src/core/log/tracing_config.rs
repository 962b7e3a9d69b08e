// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Where `tracing` output goes while the dashboard owns the terminal. stdout is in raw
//! mode on the alternate screen, so it is never a target. The choices are a file, a
//! dashboard module (usually a [`crate::TextLog`]), or both.
//!
//! Configs compose with `+`, the right hand side wins where both set the same thing:
//!
//! ```no_run
//! use r3bl_dashboard::{TracingConfig, WriterConfig};
//! let config = TracingConfig::from(tracing::Level::INFO)
//!     + TracingConfig::from(WriterConfig::File("dashboard.log".into()));
//! ```

use std::ops::Add;

use tracing_core::LevelFilter;

use crate::ModuleHandle;

pub const DEFAULT_LOG_FILE_NAME: &str = "log.txt";

#[derive(Debug, Clone, PartialEq)]
pub struct TracingConfig {
    pub writer_config: WriterConfig,
    pub level_filter: LevelFilter,
}

#[derive(Debug, Clone, PartialEq)]
pub enum WriterConfig {
    None,
    File(String /* log file path */),
    Module(ModuleHandle),
    ModuleAndFile(ModuleHandle, String /* log file path */),
}

impl TracingConfig {
    #[must_use]
    pub fn get_writer_config(&self) -> WriterConfig { self.writer_config.clone() }

    #[must_use]
    pub fn get_level_filter(&self) -> LevelFilter { self.level_filter }
}

impl WriterConfig {
    #[must_use]
    pub fn module(&self) -> Option<&ModuleHandle> {
        match self {
            WriterConfig::Module(handle) | WriterConfig::ModuleAndFile(handle, _) => Some(handle),
            _ => None,
        }
    }

    #[must_use]
    pub fn file_path(&self) -> Option<&str> {
        match self {
            WriterConfig::File(path) | WriterConfig::ModuleAndFile(_, path) => Some(path),
            _ => None,
        }
    }
}

impl From<tracing::Level> for TracingConfig {
    fn from(level: tracing::Level) -> Self {
        Self {
            level_filter: level.into(),
            writer_config: WriterConfig::File(DEFAULT_LOG_FILE_NAME.to_string()),
        }
    }
}

impl From<LevelFilter> for TracingConfig {
    fn from(level_filter: LevelFilter) -> Self {
        Self {
            level_filter,
            writer_config: WriterConfig::File(DEFAULT_LOG_FILE_NAME.to_string()),
        }
    }
}

impl From<WriterConfig> for TracingConfig {
    fn from(writer_config: WriterConfig) -> Self {
        Self {
            level_filter: LevelFilter::DEBUG,
            writer_config,
        }
    }
}

impl From<ModuleHandle> for TracingConfig {
    fn from(handle: ModuleHandle) -> Self { WriterConfig::Module(handle).into() }
}

impl Add<TracingConfig> for TracingConfig {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self {
            level_filter: self.level_filter.max(rhs.level_filter),
            writer_config: self.writer_config + rhs.writer_config,
        }
    }
}

impl Add<WriterConfig> for WriterConfig {
    type Output = Self;

    fn add(self, rhs: WriterConfig) -> Self::Output {
        use WriterConfig::{File, Module, ModuleAndFile, None};

        match (self, rhs) {
            (None, rhs) => rhs,
            (lhs, None) => lhs,

            (Module(_), Module(m_rhs)) => Module(m_rhs),
            (File(_), File(f_rhs)) => File(f_rhs),

            (Module(m_lhs), File(f_rhs)) => ModuleAndFile(m_lhs, f_rhs),
            (File(f_lhs), Module(m_rhs)) => ModuleAndFile(m_rhs, f_lhs),

            (Module(_) | File(_), ModuleAndFile(m_rhs, f_rhs))
            | (ModuleAndFile(_, _), ModuleAndFile(m_rhs, f_rhs)) => ModuleAndFile(m_rhs, f_rhs),

            (ModuleAndFile(_, f_lhs), Module(m_rhs)) => ModuleAndFile(m_rhs, f_lhs),
            (ModuleAndFile(m_lhs, _), File(f_rhs)) => ModuleAndFile(m_lhs, f_rhs),
        }
    }
}
