// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Scroll position of a module, clamped to `[0, max(0, content_rows - viewport)]`.
//!
//! There are two states: at the live edge (nothing new is hidden) and scrolled back.
//! Appending while scrolled back keeps the same rows on screen and raises
//! `has_unread`. Getting back to the live edge clears it. Nothing changes on a timer.

use std::ops::Range;

/// Which end of the content an offset of 0 pins to the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollOrigin {
    /// Offset counts rows back from the newest row (logs).
    LiveEdge,
    /// Offset is the index of the first visible row (labels, lists).
    Top,
}

#[must_use]
pub fn max_scroll_offset(content_rows: usize, viewport: usize) -> usize {
    content_rows.saturating_sub(viewport)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScrollState {
    pub offset: usize,
    pub has_unread: bool,
}

impl ScrollState {
    /// `delta > 0` shows earlier content. Returns `false` if the clamped offset didn't
    /// move, so the caller can skip repainting.
    pub fn scroll_by(
        &mut self,
        origin: ScrollOrigin,
        delta: isize,
        content_rows: usize,
        viewport: usize,
    ) -> bool {
        let target = match origin {
            ScrollOrigin::LiveEdge => self.offset.saturating_add_signed(delta),
            ScrollOrigin::Top => self.offset.saturating_add_signed(delta.saturating_neg()),
        };
        self.set_offset(origin, target, content_rows, viewport)
    }

    /// Make content row `line` the top visible row (as far as the clamp allows).
    pub fn scroll_to(
        &mut self,
        origin: ScrollOrigin,
        line: usize,
        content_rows: usize,
        viewport: usize,
    ) -> bool {
        let target = match origin {
            ScrollOrigin::LiveEdge => max_scroll_offset(content_rows, viewport).saturating_sub(line),
            ScrollOrigin::Top => line,
        };
        self.set_offset(origin, target, content_rows, viewport)
    }

    pub fn set_offset(
        &mut self,
        origin: ScrollOrigin,
        offset: usize,
        content_rows: usize,
        viewport: usize,
    ) -> bool {
        let clamped = offset.min(max_scroll_offset(content_rows, viewport));
        if clamped == self.offset {
            return false;
        }
        self.offset = clamped;
        self.update_unread(origin, content_rows, viewport);
        true
    }

    /// Call after `added` rows were appended, with the new `content_rows`.
    pub fn on_append(
        &mut self,
        origin: ScrollOrigin,
        added: usize,
        content_rows: usize,
        viewport: usize,
    ) {
        if added == 0 {
            return;
        }
        match origin {
            ScrollOrigin::LiveEdge => {
                if self.offset > 0 {
                    self.offset = self.offset.saturating_add(added);
                    self.has_unread = true;
                }
            }
            ScrollOrigin::Top => {
                if self.offset + viewport < content_rows {
                    self.has_unread = true;
                }
            }
        }
        self.clamp(origin, content_rows, viewport);
    }

    /// Re-apply the clamp after content shrank (eg: ring buffer eviction).
    pub fn clamp(&mut self, origin: ScrollOrigin, content_rows: usize, viewport: usize) {
        self.offset = self.offset.min(max_scroll_offset(content_rows, viewport));
        self.update_unread(origin, content_rows, viewport);
    }

    pub fn reset(&mut self) { *self = Self::default(); }

    /// Content rows to draw, top to bottom.
    #[must_use]
    pub fn visible_range(
        &self,
        origin: ScrollOrigin,
        content_rows: usize,
        viewport: usize,
    ) -> Range<usize> {
        match origin {
            ScrollOrigin::LiveEdge => {
                let end = content_rows.saturating_sub(self.offset);
                end.saturating_sub(viewport)..end
            }
            ScrollOrigin::Top => {
                let start = self.offset.min(content_rows);
                start..(start + viewport).min(content_rows)
            }
        }
    }

    fn update_unread(&mut self, origin: ScrollOrigin, content_rows: usize, viewport: usize) {
        let at_live_edge = match origin {
            ScrollOrigin::LiveEdge => self.offset == 0,
            ScrollOrigin::Top => self.offset >= max_scroll_offset(content_rows, viewport),
        };
        if at_live_edge {
            self.has_unread = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    use super::*;

    #[test_case(0, 3, 5, 0)]
    #[test_case(10, 3, 5, 5)]
    #[test_case(10, 3, 100, 7)]
    #[test_case(2, 3, 1, 0; "content shorter than viewport")]
    fn test_clamp(content_rows: usize, viewport: usize, requested: usize, expected: usize) {
        for origin in [ScrollOrigin::LiveEdge, ScrollOrigin::Top] {
            let mut state = ScrollState::default();
            state.set_offset(origin, requested, content_rows, viewport);
            assert_eq!(state.offset, expected);
            assert!(state.offset <= max_scroll_offset(content_rows, viewport));
        }
    }

    #[test]
    fn test_clamp_holds_for_any_request() {
        for content_rows in 0..12 {
            for viewport in 0..6 {
                for delta in -15..15 {
                    let mut state = ScrollState::default();
                    state.scroll_by(ScrollOrigin::LiveEdge, delta, content_rows, viewport);
                    assert!(state.offset <= max_scroll_offset(content_rows, viewport));
                }
            }
        }
    }

    #[test]
    fn test_no_change_returns_false() {
        let mut state = ScrollState::default();
        assert!(!state.scroll_by(ScrollOrigin::LiveEdge, -1, 10, 3));
        assert!(state.scroll_by(ScrollOrigin::LiveEdge, 1, 10, 3));
        assert!(!state.set_offset(ScrollOrigin::LiveEdge, 1, 10, 3));
    }

    #[test]
    fn test_append_at_live_edge_stays_put() {
        let mut state = ScrollState::default();
        state.on_append(ScrollOrigin::LiveEdge, 5, 5, 3);
        assert_eq!(state, ScrollState::default());
    }

    #[test]
    fn test_append_while_scrolled_back() {
        let mut state = ScrollState::default();
        state.scroll_by(ScrollOrigin::LiveEdge, 1, 5, 3);
        state.on_append(ScrollOrigin::LiveEdge, 2, 7, 3);
        assert_eq!(state.offset, 3);
        assert!(state.has_unread);

        // Same rows stay on screen.
        assert_eq!(state.visible_range(ScrollOrigin::LiveEdge, 7, 3), 1..4);

        state.scroll_by(ScrollOrigin::LiveEdge, -3, 7, 3);
        assert_eq!(state.offset, 0);
        assert!(!state.has_unread);
    }

    #[test]
    fn test_top_origin() {
        let mut state = ScrollState::default();
        assert_eq!(state.visible_range(ScrollOrigin::Top, 10, 3), 0..3);

        // scroll_up shows earlier rows, so from the top it does nothing.
        assert!(!state.scroll_by(ScrollOrigin::Top, 1, 10, 3));
        assert!(state.scroll_by(ScrollOrigin::Top, -2, 10, 3));
        assert_eq!(state.visible_range(ScrollOrigin::Top, 10, 3), 2..5);

        state.on_append(ScrollOrigin::Top, 1, 11, 3);
        assert!(state.has_unread);
        state.scroll_to(ScrollOrigin::Top, 100, 11, 3);
        assert_eq!(state.offset, 8);
        assert!(!state.has_unread);
    }

    #[test]
    fn test_scroll_to_live_edge() {
        let mut state = ScrollState::default();
        state.scroll_to(ScrollOrigin::LiveEdge, 2, 10, 3);
        assert_eq!(state.visible_range(ScrollOrigin::LiveEdge, 10, 3), 2..5);
        state.scroll_to(ScrollOrigin::LiveEdge, 0, 10, 3);
        assert_eq!(state.visible_range(ScrollOrigin::LiveEdge, 10, 3), 0..3);
    }
}
