// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::{EventPropagation, KeyPress, ModuleBehavior, ModuleEvents, ScrollOrigin, Viewport,
            window_of_rows, wrap_visible};

/// Read only, multi line, wrapped text. Scrolls from the top.
#[derive(Debug, Default)]
pub struct Label {
    rows: Vec<String>,
}

impl Label {
    #[must_use]
    pub fn new() -> Self { Self::default() }

    /// Replace all text.
    pub fn set_text(&mut self, text: &str, width: usize) {
        self.rows.clear();
        self.add_text(text, width);
    }

    #[must_use]
    pub fn rows(&self) -> &[String] { &self.rows }
}

impl ModuleBehavior for Label {
    fn scroll_origin(&self) -> Option<ScrollOrigin> { Some(ScrollOrigin::Top) }

    fn content_rows(&self) -> usize { self.rows.len() }

    fn add_text(&mut self, text: &str, width: usize) -> usize {
        let before = self.rows.len();
        for line in text.split('\n') {
            self.rows.extend(wrap_visible(line.trim_end_matches('\r'), width));
        }
        self.rows.len() - before
    }

    fn clear(&mut self) { self.rows.clear(); }

    fn handle_key(&mut self, _: KeyPress, _: Viewport, _: &ModuleEvents) -> EventPropagation {
        EventPropagation::Propagate
    }

    fn render(&self, viewport: Viewport) -> Vec<String> {
        window_of_rows(self.rows.iter(), viewport)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_set_text_replaces() {
        let mut label = Label::new();
        label.set_text("hello world", 5);
        assert_eq!(label.rows(), &["hello", " worl", "d"]);
        label.set_text("bye", 5);
        assert_eq!(label.rows(), &["bye"]);
    }

    #[test]
    fn test_render_window() {
        let mut label = Label::new();
        label.add_text("a\nb\nc", 5);
        let viewport = Viewport {
            width: 5,
            height: 2,
            first_row: 1,
        };
        assert_eq!(label.render(viewport), vec!["b", "c"]);
    }
}
