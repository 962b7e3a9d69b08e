// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Read only list of pre-rendered rows under an optional header row. The rows are
//! opaque (eg: produced by a table formatter), they are never wrapped, only clipped
//! by the frame and scrolled. Up / Down move a highlighted cursor row, Enter or a
//! click selects it.

use crate::{EventPropagation, Key, KeyPress, ModuleBehavior, ModuleEvent, ModuleEvents,
            ScrollOrigin, SgrCode, SpecialKey, Viewport};

#[derive(Debug, Default)]
pub struct ListView {
    header: Option<String>,
    rows: Vec<String>,
    cursor: usize,
}

impl ListView {
    #[must_use]
    pub fn new(header: Option<String>, rows: Vec<String>) -> Self {
        Self {
            header,
            rows,
            cursor: 0,
        }
    }

    pub fn set_rows(&mut self, header: Option<String>, rows: Vec<String>) {
        self.header = header;
        self.rows = rows;
        self.cursor = self.cursor.min(self.rows.len().saturating_sub(1));
    }

    #[must_use]
    pub fn rows(&self) -> &[String] { &self.rows }

    #[must_use]
    pub fn cursor(&self) -> usize { self.cursor }

    fn header_rows(&self) -> usize { usize::from(self.header.is_some()) }

    fn move_cursor(&mut self, delta: isize) -> bool {
        let last = self.rows.len().saturating_sub(1);
        let next = self.cursor.saturating_add_signed(delta).min(last);
        let changed = next != self.cursor;
        self.cursor = next;
        changed
    }

    fn select(&self, events: &ModuleEvents) -> EventPropagation {
        if self.rows.is_empty() {
            return EventPropagation::Consumed;
        }
        events.emit(ModuleEvent::ListSelected(self.cursor));
        EventPropagation::Consumed
    }
}

impl ModuleBehavior for ListView {
    fn scroll_origin(&self) -> Option<ScrollOrigin> { Some(ScrollOrigin::Top) }

    fn content_rows(&self) -> usize { self.rows.len() }

    fn scroll_viewport_height(&self, inner_height: usize) -> usize {
        inner_height.saturating_sub(self.header_rows())
    }

    fn focus_row(&self) -> Option<usize> { (!self.rows.is_empty()).then_some(self.cursor) }

    /// Each line is one row, as is.
    fn add_text(&mut self, text: &str, _width: usize) -> usize {
        let before = self.rows.len();
        self.rows
            .extend(text.split('\n').map(|it| it.trim_end_matches('\r').to_string()));
        self.rows.len() - before
    }

    fn clear(&mut self) {
        self.rows.clear();
        self.cursor = 0;
    }

    fn handle_key(
        &mut self,
        key: KeyPress,
        _viewport: Viewport,
        events: &ModuleEvents,
    ) -> EventPropagation {
        if !key.is_unmodified() {
            return EventPropagation::Propagate;
        }
        let changed = match key.key {
            Key::SpecialKey(SpecialKey::Up) => self.move_cursor(-1),
            Key::SpecialKey(SpecialKey::Down) => self.move_cursor(1),
            Key::SpecialKey(SpecialKey::Home) => self.move_cursor(isize::MIN),
            Key::SpecialKey(SpecialKey::End) => self.move_cursor(isize::MAX),
            Key::SpecialKey(SpecialKey::Enter) => return self.select(events),
            _ => return EventPropagation::Propagate,
        };
        if changed { EventPropagation::ConsumedRender } else { EventPropagation::Consumed }
    }

    fn handle_click(
        &mut self,
        _x: u16,
        y: u16,
        viewport: Viewport,
        events: &ModuleEvents,
    ) -> EventPropagation {
        let Some(row) = usize::from(y).checked_sub(self.header_rows()) else {
            return EventPropagation::Propagate;
        };
        let index = viewport.first_row + row;
        if index >= self.rows.len() {
            return EventPropagation::Propagate;
        }
        self.cursor = index;
        self.select(events);
        EventPropagation::ConsumedRender
    }

    fn render(&self, viewport: Viewport) -> Vec<String> {
        let mut acc = Vec::with_capacity(viewport.height);
        if let Some(header) = &self.header {
            acc.push(format!("{}{}{header}{}", SgrCode::Bold, SgrCode::Underline, SgrCode::Reset));
        }
        let body_height = viewport.height.saturating_sub(acc.len());
        for (index, row) in self
            .rows
            .iter()
            .enumerate()
            .skip(viewport.first_row)
            .take(body_height)
        {
            if index == self.cursor {
                acc.push(format!("{}{row}{}", SgrCode::Negative, SgrCode::NegativeOff));
            } else {
                acc.push(row.clone());
            }
        }
        acc.truncate(viewport.height);
        acc.resize(viewport.height, String::new());
        acc
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::strip_control_sequences;

    fn list() -> ListView {
        ListView::new(
            Some("NAME  SIZE".into()),
            vec!["a  1".into(), "b  2".into(), "c  3".into()],
        )
    }

    const VIEWPORT: Viewport = Viewport {
        width: 10,
        height: 3,
        first_row: 0,
    };

    #[test]
    fn test_header_reduces_scroll_viewport() {
        assert_eq!(list().scroll_viewport_height(3), 2);
        assert_eq!(ListView::default().scroll_viewport_height(3), 3);
    }

    #[test]
    fn test_render_highlights_cursor() {
        let rows = list().render(VIEWPORT);
        assert_eq!(
            rows.iter().map(|it| strip_control_sequences(it)).collect::<Vec<_>>(),
            vec!["NAME  SIZE", "a  1", "b  2"]
        );
        assert!(rows[1].starts_with(&SgrCode::Negative.to_string()));
        assert!(!rows[2].starts_with(&SgrCode::Negative.to_string()));
    }

    #[test]
    fn test_cursor_keys_and_select() {
        let events = ModuleEvents::new();
        let mut rx = events.subscribe();
        let mut list = list();

        list.handle_key(KeyPress::special(SpecialKey::End), VIEWPORT, &events);
        assert_eq!(list.cursor(), 2);
        assert_eq!(list.focus_row(), Some(2));
        assert_eq!(
            list.handle_key(KeyPress::special(SpecialKey::Down), VIEWPORT, &events),
            EventPropagation::Consumed
        );
        list.handle_key(KeyPress::special(SpecialKey::Up), VIEWPORT, &events);
        list.handle_key(KeyPress::special(SpecialKey::Enter), VIEWPORT, &events);
        assert_eq!(rx.try_recv().unwrap(), ModuleEvent::ListSelected(1));
    }

    #[test]
    fn test_click_on_scrolled_row() {
        let events = ModuleEvents::new();
        let mut list = list();
        let scrolled = Viewport {
            first_row: 1,
            ..VIEWPORT
        };
        // Header row.
        assert_eq!(list.handle_click(0, 0, scrolled, &events), EventPropagation::Propagate);
        assert_eq!(list.handle_click(0, 2, scrolled, &events), EventPropagation::ConsumedRender);
        assert_eq!(list.cursor(), 2);
    }
}
