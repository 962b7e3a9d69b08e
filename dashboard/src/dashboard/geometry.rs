// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::fmt::{Display, Formatter};

/// Where a module lives on screen, in 0-based terminal cells. Fixed when the module is
/// created. The framework never lays modules out, so overlap is the caller's problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl Rect {
    #[must_use]
    pub const fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Columns inside the border.
    #[must_use]
    pub const fn inner_width(&self) -> u16 { self.width.saturating_sub(2) }

    /// Rows inside the border.
    #[must_use]
    pub const fn inner_height(&self) -> u16 { self.height.saturating_sub(2) }

    #[must_use]
    pub fn contains(&self, x: u16, y: u16) -> bool {
        let right = u32::from(self.x) + u32::from(self.width);
        let bottom = u32::from(self.y) + u32::from(self.height);
        x >= self.x && u32::from(x) < right && y >= self.y && u32::from(y) < bottom
    }

    /// `(x, y)` relative to the top left of the area inside the border, if it falls
    /// there.
    #[must_use]
    pub fn to_inner(&self, x: u16, y: u16) -> Option<(u16, u16)> {
        let inner_x = x.checked_sub(self.x)?.checked_sub(1)?;
        let inner_y = y.checked_sub(self.y)?.checked_sub(1)?;
        (inner_x < self.inner_width() && inner_y < self.inner_height())
            .then_some((inner_x, inner_y))
    }
}

impl Display for Rect {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{},{} {}x{}]", self.x, self.y, self.width, self.height)
    }
}
