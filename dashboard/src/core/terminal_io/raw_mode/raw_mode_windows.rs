// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::{DashboardError, DashboardResult};

pub fn enable_raw_mode() -> DashboardResult<()> {
    crossterm::terminal::enable_raw_mode()
        .map_err(|e| DashboardError::setup(format!("failed to enable raw mode: {e}")))
}

pub fn disable_raw_mode() -> DashboardResult<()> {
    crossterm::terminal::disable_raw_mode()
        .map_err(|e| DashboardError::setup(format!("failed to disable raw mode: {e}")))
}
