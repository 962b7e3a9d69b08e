// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::{EventPropagation, KeyPress, ModuleBehavior, ModuleEvents, RingBuffer,
            RingBufferHeap, ScrollOrigin, Viewport, window_of_rows, wrap_visible};

pub const DEFAULT_LOG_CAPACITY: usize = 1_000;

/// Scrolling log. Text is wrapped on its visible width when it is added, and the
/// wrapped rows are kept in a ring buffer, so `capacity` counts screen rows and the
/// oldest rows fall off first.
#[derive(Debug)]
pub struct TextLog {
    rows: RingBufferHeap<String>,
}

impl Default for TextLog {
    fn default() -> Self { Self::new(DEFAULT_LOG_CAPACITY) }
}

impl TextLog {
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            rows: RingBufferHeap::new(capacity),
        }
    }

    #[must_use]
    pub fn rows(&self) -> &RingBufferHeap<String> { &self.rows }
}

impl ModuleBehavior for TextLog {
    fn scroll_origin(&self) -> Option<ScrollOrigin> { Some(ScrollOrigin::LiveEdge) }

    fn content_rows(&self) -> usize { self.rows.len() }

    fn add_text(&mut self, text: &str, width: usize) -> usize {
        let mut added = 0;
        for line in text.split('\n') {
            for row in wrap_visible(line.trim_end_matches('\r'), width) {
                self.rows.add(row);
                added += 1;
            }
        }
        added
    }

    fn clear(&mut self) { self.rows.clear(); }

    fn handle_key(&mut self, _: KeyPress, _: Viewport, _: &ModuleEvents) -> EventPropagation {
        EventPropagation::Propagate
    }

    fn render(&self, viewport: Viewport) -> Vec<String> {
        window_of_rows(self.rows.iter(), viewport)
    }
}
