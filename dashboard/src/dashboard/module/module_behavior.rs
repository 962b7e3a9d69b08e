// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::fmt::Debug;

use crate::{KeyPress, ModuleEvents, ScrollOrigin};

/// What a module did with an input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventPropagation {
    /// Handled, and the module must be repainted.
    ConsumedRender,
    /// Handled, nothing visible changed.
    Consumed,
    /// Not handled.
    Propagate,
}

impl EventPropagation {
    #[must_use]
    pub fn needs_render(self) -> bool { self == EventPropagation::ConsumedRender }
}

/// The inner area (inside the border) a variant draws into, and which content row is
/// at its top.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: usize,
    pub height: usize,
    pub first_row: usize,
}

/// Capability interface shared by every module variant. [`crate::Module`] owns the
/// border, title, focus and scroll state, and delegates content to this.
pub trait ModuleBehavior: Debug + Send {
    /// `None` means the content never scrolls.
    fn scroll_origin(&self) -> Option<ScrollOrigin> { None }

    /// Rows available to scroll through.
    fn content_rows(&self) -> usize { 0 }

    /// Rows of the inner area that scroll. Defaults to all of them.
    fn scroll_viewport_height(&self, inner_height: usize) -> usize { inner_height }

    /// Content row that must stay visible after a key is handled (eg: list cursor).
    fn focus_row(&self) -> Option<usize> { None }

    /// Append text wrapped at `width` columns. Returns how many rows were added. A
    /// no-op for variants without text content.
    fn add_text(&mut self, _text: &str, _width: usize) -> usize { 0 }

    fn clear(&mut self);

    fn handle_key(
        &mut self,
        key: KeyPress,
        viewport: Viewport,
        events: &ModuleEvents,
    ) -> EventPropagation;

    /// `(x, y)` is relative to the inner area. Only called on button release.
    fn handle_click(
        &mut self,
        _x: u16,
        _y: u16,
        _viewport: Viewport,
        _events: &ModuleEvents,
    ) -> EventPropagation {
        EventPropagation::Propagate
    }

    /// Exactly `viewport.height` rows. They don't have to be padded, the frame fits
    /// each one to `viewport.width`.
    fn render(&self, viewport: Viewport) -> Vec<String>;

    /// Text cursor inside the inner area, for variants that edit text.
    fn cursor(&self, _viewport: Viewport) -> Option<(u16, u16)> { None }
}

/// Rows `first_row..first_row + height` of `rows`, blank filled past the end.
pub(crate) fn window_of_rows<'a>(
    rows: impl Iterator<Item = &'a String>,
    viewport: Viewport,
) -> Vec<String> {
    let mut acc: Vec<String> = rows
        .skip(viewport.first_row)
        .take(viewport.height)
        .cloned()
        .collect();
    acc.resize(viewport.height, String::new());
    acc
}
