// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Single line editor with a prompt and a bounded command history.
//!
//! The buffer is a [`Vec<char>`] and the cursor is a char index into it. What is drawn
//! is measured in terminal columns: when the text is wider than the inner width, the
//! view scrolls horizontally so the cursor column stays visible.
//!
//! History browsing starts with the first Up key. Up walks to older lines, Down walks
//! back and finally restores the draft that was being typed. Committing a line or
//! editing the buffer leaves browsing mode.

use unicode_width::UnicodeWidthChar;

use crate::{AnsiColor, EventPropagation, Key, KeyPress, ModuleBehavior, ModuleEvent,
            ModuleEvents, ReversedBuffer, RingBuffer, SGR_RESET, SpecialKey, Viewport,
            visible_len};

pub const DEFAULT_HISTORY_CAPACITY: usize = 50;

#[derive(Debug)]
pub struct LineInput {
    prompt: String,
    buffer: Vec<char>,
    cursor: usize,
    view_start: usize,
    history: ReversedBuffer<String>,
    /// Index into `history` while browsing.
    browsing: Option<usize>,
    draft: Vec<char>,
}

impl Default for LineInput {
    fn default() -> Self { Self::new("> ", DEFAULT_HISTORY_CAPACITY) }
}

fn char_width(ch: char) -> usize { ch.width().unwrap_or(0) }

fn chars_width(chars: &[char]) -> usize { chars.iter().copied().map(char_width).sum() }

impl LineInput {
    #[must_use]
    pub fn new(prompt: impl Into<String>, history_capacity: usize) -> Self {
        Self {
            prompt: prompt.into(),
            buffer: vec![],
            cursor: 0,
            view_start: 0,
            history: ReversedBuffer::new(history_capacity),
            browsing: None,
            draft: vec![],
        }
    }

    #[must_use]
    pub fn prompt(&self) -> &str { &self.prompt }

    #[must_use]
    pub fn text(&self) -> String { self.buffer.iter().collect() }

    #[must_use]
    pub fn is_empty(&self) -> bool { self.buffer.is_empty() }

    /// Char index of the cursor.
    #[must_use]
    pub fn cursor_index(&self) -> usize { self.cursor }

    #[must_use]
    pub fn history(&self) -> &ReversedBuffer<String> { &self.history }

    #[must_use]
    pub fn is_browsing_history(&self) -> bool { self.browsing.is_some() }

    /// Columns left for the buffer after the prompt.
    fn text_width(&self, width: usize) -> usize {
        width.saturating_sub(visible_len(&self.prompt)).max(1)
    }

    fn scroll_into_view(&mut self, width: usize) {
        let text_width = self.text_width(width);
        if self.cursor < self.view_start {
            self.view_start = self.cursor;
        }
        // Keep one column free for the cursor itself.
        while self.view_start < self.cursor
            && chars_width(&self.buffer[self.view_start..self.cursor]) >= text_width
        {
            self.view_start += 1;
        }
    }

    fn set_buffer(&mut self, chars: Vec<char>, width: usize) {
        self.buffer = chars;
        self.cursor = self.buffer.len();
        self.view_start = 0;
        self.scroll_into_view(width);
    }

    fn edited(&mut self, width: usize) {
        self.browsing = None;
        self.scroll_into_view(width);
    }

    /// Insert at the cursor. Control characters (eg: newlines in a paste) are dropped.
    pub fn insert_str(&mut self, text: &str, width: usize) -> bool {
        let chars: Vec<char> = text.chars().filter(|it| !it.is_control()).collect();
        if chars.is_empty() {
            return false;
        }
        let count = chars.len();
        self.buffer.splice(self.cursor..self.cursor, chars);
        self.cursor += count;
        self.edited(width);
        true
    }

    pub fn insert_char(&mut self, ch: char, width: usize) -> bool {
        self.insert_str(ch.encode_utf8(&mut [0; 4]), width)
    }

    /// Delete before the cursor. `false` if there was nothing to delete.
    pub fn backspace(&mut self, width: usize) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        self.buffer.remove(self.cursor);
        self.edited(width);
        true
    }

    /// Delete under the cursor.
    pub fn delete(&mut self, width: usize) -> bool {
        if self.cursor >= self.buffer.len() {
            return false;
        }
        self.buffer.remove(self.cursor);
        self.edited(width);
        true
    }

    pub fn move_cursor_to(&mut self, index: usize, width: usize) -> bool {
        let index = index.min(self.buffer.len());
        if index == self.cursor {
            return false;
        }
        self.cursor = index;
        self.scroll_into_view(width);
        true
    }

    /// Take the buffer, record it in history, publish it. Empty lines are published
    /// but not recorded, nor is a repeat of the newest history entry.
    pub fn commit(&mut self, events: &ModuleEvents) -> String {
        let line: String = self.buffer.drain(..).collect();
        self.cursor = 0;
        self.view_start = 0;
        self.browsing = None;
        self.draft.clear();
        if !line.is_empty() && self.history.first() != Some(&line) {
            self.history.add(line.clone());
        }
        events.emit(ModuleEvent::LineCommitted(line.clone()));
        line
    }

    /// Up. `false` when already at the oldest entry or there's no history.
    pub fn history_back(&mut self, width: usize) -> bool {
        let next = match self.browsing {
            None if self.history.is_empty() => return false,
            None => {
                self.draft = self.buffer.clone();
                0
            }
            Some(index) if index + 1 < self.history.len() => index + 1,
            Some(_) => return false,
        };
        self.browsing = Some(next);
        let entry = self.history.get(next).map(|it| it.chars().collect()).unwrap_or_default();
        self.set_buffer(entry, width);
        true
    }

    /// Down. Past the newest entry the draft comes back and browsing ends.
    pub fn history_forward(&mut self, width: usize) -> bool {
        match self.browsing {
            None => false,
            Some(0) => {
                self.browsing = None;
                let draft = std::mem::take(&mut self.draft);
                self.set_buffer(draft, width);
                true
            }
            Some(index) => {
                self.browsing = Some(index - 1);
                let entry = self
                    .history
                    .get(index - 1)
                    .map(|it| it.chars().collect())
                    .unwrap_or_default();
                self.set_buffer(entry, width);
                true
            }
        }
    }
}

fn rendered(changed: bool) -> EventPropagation {
    if changed { EventPropagation::ConsumedRender } else { EventPropagation::Consumed }
}

impl ModuleBehavior for LineInput {
    fn clear(&mut self) {
        self.buffer.clear();
        self.cursor = 0;
        self.view_start = 0;
        self.browsing = None;
    }

    fn handle_key(
        &mut self,
        key: KeyPress,
        viewport: Viewport,
        events: &ModuleEvents,
    ) -> EventPropagation {
        let width = viewport.width;
        if let Some(ch) = key.printable_char() {
            return rendered(self.insert_char(ch, width));
        }
        if !key.is_unmodified() {
            return EventPropagation::Propagate;
        }
        match key.key {
            Key::SpecialKey(SpecialKey::Enter) => {
                self.commit(events);
                EventPropagation::ConsumedRender
            }
            Key::SpecialKey(SpecialKey::Backspace) => rendered(self.backspace(width)),
            Key::SpecialKey(SpecialKey::Delete) => rendered(self.delete(width)),
            Key::SpecialKey(SpecialKey::Left) => {
                rendered(self.move_cursor_to(self.cursor.saturating_sub(1), width))
            }
            Key::SpecialKey(SpecialKey::Right) => {
                rendered(self.move_cursor_to(self.cursor + 1, width))
            }
            Key::SpecialKey(SpecialKey::Home) => rendered(self.move_cursor_to(0, width)),
            Key::SpecialKey(SpecialKey::End) => {
                rendered(self.move_cursor_to(self.buffer.len(), width))
            }
            Key::SpecialKey(SpecialKey::Up) => rendered(self.history_back(width)),
            Key::SpecialKey(SpecialKey::Down) => rendered(self.history_forward(width)),
            _ => EventPropagation::Propagate,
        }
    }

    fn render(&self, viewport: Viewport) -> Vec<String> {
        let mut acc = vec![String::new(); viewport.height];
        if let Some(first) = acc.first_mut() {
            let text_width = self.text_width(viewport.width);
            let mut used = 0;
            let visible: String = self.buffer[self.view_start.min(self.buffer.len())..]
                .iter()
                .take_while(|it| {
                    used += char_width(**it);
                    used <= text_width
                })
                .collect();
            *first = format!(
                "{}{}{SGR_RESET}{visible}",
                AnsiColor::BrightGreen.fg(),
                self.prompt
            );
        }
        acc
    }

    fn cursor(&self, viewport: Viewport) -> Option<(u16, u16)> {
        if viewport.height == 0 || viewport.width == 0 {
            return None;
        }
        let start = self.view_start.min(self.cursor);
        let column = visible_len(&self.prompt) + chars_width(&self.buffer[start..self.cursor]);
        let column = column.min(viewport.width - 1);
        Some((u16::try_from(column).unwrap_or(u16::MAX), 0))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::strip_control_sequences;

    const WIDTH: usize = 10;

    fn viewport() -> Viewport {
        Viewport {
            width: WIDTH,
            height: 1,
            first_row: 0,
        }
    }

    fn type_text(input: &mut LineInput, text: &str, events: &ModuleEvents) {
        for ch in text.chars() {
            input.handle_key(KeyPress::char(ch), viewport(), events);
        }
    }

    #[test]
    fn test_type_and_commit() {
        let events = ModuleEvents::new();
        let mut rx = events.subscribe();
        let mut input = LineInput::new("> ", 5);

        type_text(&mut input, "hello", &events);
        assert_eq!(input.text(), "hello");

        let result = input.handle_key(KeyPress::special(SpecialKey::Enter), viewport(), &events);
        assert_eq!(result, EventPropagation::ConsumedRender);
        assert!(input.is_empty());
        assert_eq!(input.history().get(0).unwrap(), "hello");
        assert_eq!(rx.try_recv().unwrap(), ModuleEvent::LineCommitted("hello".into()));
    }

    #[test]
    fn test_editing_keys() {
        let events = ModuleEvents::new();
        let mut input = LineInput::new("", 5);
        type_text(&mut input, "abc", &events);

        input.handle_key(KeyPress::special(SpecialKey::Left), viewport(), &events);
        input.handle_key(KeyPress::special(SpecialKey::Backspace), viewport(), &events);
        assert_eq!(input.text(), "ac");
        assert_eq!(input.cursor_index(), 1);

        input.handle_key(KeyPress::special(SpecialKey::Home), viewport(), &events);
        input.handle_key(KeyPress::special(SpecialKey::Delete), viewport(), &events);
        assert_eq!(input.text(), "c");

        type_text(&mut input, "x", &events);
        assert_eq!(input.text(), "xc");

        input.handle_key(KeyPress::special(SpecialKey::End), viewport(), &events);
        assert_eq!(input.cursor_index(), 2);
    }

    #[test]
    fn test_backspace_on_empty_is_noop() {
        let mut input = LineInput::new("", 5);
        assert!(!input.backspace(WIDTH));
        assert_eq!(
            input.handle_key(
                KeyPress::special(SpecialKey::Backspace),
                viewport(),
                &ModuleEvents::new()
            ),
            EventPropagation::Consumed
        );
    }

    #[test]
    fn test_history_browsing() {
        let events = ModuleEvents::new();
        let mut input = LineInput::new("", 5);
        for line in ["one", "two", "three"] {
            type_text(&mut input, line, &events);
            input.commit(&events);
        }
        type_text(&mut input, "dra", &events);

        assert!(input.history_back(WIDTH));
        assert_eq!(input.text(), "three");
        assert!(input.history_back(WIDTH));
        assert!(input.history_back(WIDTH));
        assert_eq!(input.text(), "one");
        // Oldest entry, stays put.
        assert!(!input.history_back(WIDTH));

        assert!(input.history_forward(WIDTH));
        assert_eq!(input.text(), "two");
        assert!(input.history_forward(WIDTH));
        assert!(input.history_forward(WIDTH));
        assert_eq!(input.text(), "dra");
        assert!(!input.is_browsing_history());
        assert!(!input.history_forward(WIDTH));
    }

    #[test]
    fn test_commit_resets_browsing_and_skips_duplicates() {
        let events = ModuleEvents::new();
        let mut input = LineInput::new("", 5);
        type_text(&mut input, "same", &events);
        input.commit(&events);
        input.history_back(WIDTH);
        assert!(input.is_browsing_history());
        input.commit(&events);
        assert!(!input.is_browsing_history());
        assert_eq!(input.history().len(), 1);

        // Empty commits are not recorded.
        input.commit(&events);
        assert_eq!(input.history().len(), 1);
    }

    #[test]
    fn test_history_is_bounded() {
        let events = ModuleEvents::new();
        let mut input = LineInput::new("", 2);
        for line in ["a", "b", "c"] {
            type_text(&mut input, line, &events);
            input.commit(&events);
        }
        assert_eq!(input.history().iter().cloned().collect::<Vec<_>>(), vec!["c", "b"]);
    }

    #[test]
    fn test_horizontal_view_follows_cursor() {
        let events = ModuleEvents::new();
        let mut input = LineInput::new("> ", 5);
        type_text(&mut input, "abcdefghijkl", &events);

        let row = strip_control_sequences(&input.render(viewport())[0]);
        assert_eq!(row, "> fghijkl");
        assert_eq!(input.cursor(viewport()), Some((9, 0)));

        input.move_cursor_to(0, WIDTH);
        let row = strip_control_sequences(&input.render(viewport())[0]);
        assert_eq!(row, "> abcdefgh");
        assert_eq!(input.cursor(viewport()), Some((2, 0)));
    }

    #[test]
    fn test_paste_drops_control_chars() {
        let mut input = LineInput::new("", 5);
        assert!(input.insert_str("a\nb\tc", WIDTH));
        assert_eq!(input.text(), "abc");
        assert!(!input.insert_str("\n", WIDTH));
    }

    #[test]
    fn test_modified_keys_propagate() {
        let mut input = LineInput::new("", 5);
        let result = input.handle_key(KeyPress::ctrl('x'), viewport(), &ModuleEvents::new());
        assert_eq!(result, EventPropagation::Propagate);
    }
}
