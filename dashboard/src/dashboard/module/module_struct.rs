// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use tokio::sync::broadcast;

use crate::{Button, CellCanvas, CellStyle, DashboardResult, EventPropagation, FrameStyle,
            KeyPress, Label, LineInput, ListView, ModuleBehavior, ModuleEvent, ModuleEvents,
            MouseButtons, MouseClick, ProgressBar, Rect, ScrollOrigin, ScrollState, Severity,
            TabBar, TextLog, Toast, Toggle, Viewport, render_frame};

/// The closed set of module variants.
#[derive(Debug)]
pub enum ModuleKind {
    TextLog(TextLog),
    LineInput(LineInput),
    Button(Button),
    Toggle(Toggle),
    ProgressBar(ProgressBar),
    CellCanvas(CellCanvas),
    TabBar(TabBar),
    Toast(Toast),
    Label(Label),
    ListView(ListView),
}

impl ModuleKind {
    #[must_use]
    pub fn behavior(&self) -> &dyn ModuleBehavior {
        match self {
            ModuleKind::TextLog(it) => it,
            ModuleKind::LineInput(it) => it,
            ModuleKind::Button(it) => it,
            ModuleKind::Toggle(it) => it,
            ModuleKind::ProgressBar(it) => it,
            ModuleKind::CellCanvas(it) => it,
            ModuleKind::TabBar(it) => it,
            ModuleKind::Toast(it) => it,
            ModuleKind::Label(it) => it,
            ModuleKind::ListView(it) => it,
        }
    }

    pub fn behavior_mut(&mut self) -> &mut dyn ModuleBehavior {
        match self {
            ModuleKind::TextLog(it) => it,
            ModuleKind::LineInput(it) => it,
            ModuleKind::Button(it) => it,
            ModuleKind::Toggle(it) => it,
            ModuleKind::ProgressBar(it) => it,
            ModuleKind::CellCanvas(it) => it,
            ModuleKind::TabBar(it) => it,
            ModuleKind::Toast(it) => it,
            ModuleKind::Label(it) => it,
            ModuleKind::ListView(it) => it,
        }
    }
}

macro_rules! impl_from_variant {
    ($($variant:ident),* $(,)?) => {
        $(impl From<$variant> for ModuleKind {
            fn from(it: $variant) -> Self { ModuleKind::$variant(it) }
        })*
    };
}

impl_from_variant!(
    TextLog,
    LineInput,
    Button,
    Toggle,
    ProgressBar,
    CellCanvas,
    TabBar,
    Toast,
    Label,
    ListView,
);

/// One rectangular region of the screen. Owns everything shared by the variants:
/// geometry, title, focus flag, scroll state and the event channel. Lives behind a
/// [`crate::ModuleHandle`] once added to a page.
#[derive(Debug)]
pub struct Module {
    rect: Rect,
    title: String,
    display_name: Option<String>,
    selected: bool,
    scroll: ScrollState,
    kind: ModuleKind,
    events: ModuleEvents,
}

impl Module {
    #[must_use]
    pub fn new(rect: Rect, title: impl Into<String>, kind: impl Into<ModuleKind>) -> Self {
        Self {
            rect,
            title: title.into(),
            display_name: None,
            selected: false,
            scroll: ScrollState::default(),
            kind: kind.into(),
            events: ModuleEvents::new(),
        }
    }

    /// Drawn in the border instead of the title. The title stays the identity key.
    #[must_use]
    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = Some(display_name.into());
        self
    }

    #[must_use]
    pub fn rect(&self) -> Rect { self.rect }

    #[must_use]
    pub fn title(&self) -> &str { &self.title }

    #[must_use]
    pub fn display_name(&self) -> &str { self.display_name.as_deref().unwrap_or(&self.title) }

    #[must_use]
    pub fn is_selected(&self) -> bool { self.selected }

    /// Only pages change focus.
    pub(crate) fn set_selected(&mut self, selected: bool) { self.selected = selected; }

    #[must_use]
    pub fn scroll_state(&self) -> ScrollState { self.scroll }

    #[must_use]
    pub fn scroll_offset(&self) -> usize { self.scroll.offset }

    #[must_use]
    pub fn has_unread(&self) -> bool { self.scroll.has_unread }

    #[must_use]
    pub fn kind(&self) -> &ModuleKind { &self.kind }

    /// Direct access to the variant. Changes made here don't adjust scrolling, prefer
    /// the methods on [`Module`] for content.
    pub fn kind_mut(&mut self) -> &mut ModuleKind { &mut self.kind }

    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<ModuleEvent> { self.events.subscribe() }

    #[must_use]
    pub fn is_scrollable(&self) -> bool { self.kind.behavior().scroll_origin().is_some() }

    #[must_use]
    pub fn is_line_input(&self) -> bool { matches!(self.kind, ModuleKind::LineInput(_)) }

    fn inner_width(&self) -> usize { usize::from(self.rect.inner_width()) }

    fn scroll_viewport(&self) -> usize {
        self.kind
            .behavior()
            .scroll_viewport_height(usize::from(self.rect.inner_height()))
    }

    fn viewport(&self) -> Viewport {
        let behavior = self.kind.behavior();
        let first_row = match behavior.scroll_origin() {
            Some(origin) => {
                self.scroll
                    .visible_range(origin, behavior.content_rows(), self.scroll_viewport())
                    .start
            }
            None => 0,
        };
        Viewport {
            width: self.inner_width(),
            height: usize::from(self.rect.inner_height()),
            first_row,
        }
    }

    /// Append text. Returns `false` for variants without text content.
    pub fn add_text(&mut self, text: &str) -> bool {
        let width = self.inner_width();
        let viewport = self.scroll_viewport();
        let behavior = self.kind.behavior_mut();
        let added = behavior.add_text(text, width);
        if let Some(origin) = behavior.scroll_origin() {
            let content_rows = behavior.content_rows();
            self.scroll.on_append(origin, added, content_rows, viewport);
        }
        added > 0
    }

    /// Drop all content and scroll back to the live edge. `refresh` is whether the
    /// owning handle should repaint, it is passed through unchanged.
    pub fn clear(&mut self, refresh: bool) -> bool {
        self.kind.behavior_mut().clear();
        self.scroll.reset();
        refresh
    }

    /// Scroll by `delta` rows, positive towards earlier content. `false` if the clamped
    /// offset didn't change.
    pub fn scroll_by(&mut self, delta: isize) -> bool {
        let viewport = self.scroll_viewport();
        let behavior = self.kind.behavior();
        match behavior.scroll_origin() {
            Some(origin) => {
                self.scroll
                    .scroll_by(origin, delta, behavior.content_rows(), viewport)
            }
            None => false,
        }
    }

    /// Show `amount` rows of earlier content.
    pub fn scroll_up(&mut self, amount: usize) -> bool {
        self.scroll_by(isize::try_from(amount).unwrap_or(isize::MAX))
    }

    /// Same as `scroll_up(-amount)`.
    pub fn scroll_down(&mut self, amount: usize) -> bool {
        self.scroll_by(isize::try_from(amount).map_or(isize::MIN, |it| -it))
    }

    /// Make content row `line` the top visible row.
    pub fn scroll_to(&mut self, line: usize) -> bool {
        let viewport = self.scroll_viewport();
        let behavior = self.kind.behavior();
        match behavior.scroll_origin() {
            Some(origin) => {
                self.scroll
                    .scroll_to(origin, line, behavior.content_rows(), viewport)
            }
            None => false,
        }
    }

    pub fn page_up(&mut self) -> bool { self.scroll_up(self.scroll_viewport().max(1)) }

    pub fn page_down(&mut self) -> bool { self.scroll_down(self.scroll_viewport().max(1)) }

    /// Oldest content.
    pub fn scroll_to_top(&mut self) -> bool { self.scroll_to(0) }

    /// Newest content (the live edge).
    pub fn scroll_to_bottom(&mut self) -> bool { self.scroll_to(usize::MAX) }

    /// Keep the variant's focus row (eg: list cursor) on screen.
    fn follow_focus_row(&mut self) {
        let viewport = self.scroll_viewport();
        let behavior = self.kind.behavior();
        let (Some(origin), Some(row)) = (behavior.scroll_origin(), behavior.focus_row()) else {
            return;
        };
        let content_rows = behavior.content_rows();
        let range = self.scroll.visible_range(origin, content_rows, viewport);
        if row < range.start {
            self.scroll.scroll_to(origin, row, content_rows, viewport);
        } else if row >= range.end && viewport > 0 {
            self.scroll
                .scroll_to(origin, row + 1 - viewport, content_rows, viewport);
        }
    }

    pub fn handle_key(&mut self, key: KeyPress) -> EventPropagation {
        let viewport = self.viewport();
        let result = self.kind.behavior_mut().handle_key(key, viewport, &self.events);
        if result.needs_render() {
            self.follow_focus_row();
        }
        result
    }

    /// Dispatched only on a release transition (`previous` holds a button `click`
    /// doesn't) that lands inside the border.
    pub fn handle_click(&mut self, click: MouseClick, previous: MouseButtons) -> EventPropagation {
        if !click.is_release_of(previous) {
            return EventPropagation::Propagate;
        }
        let Some((x, y)) = self.rect.to_inner(click.x, click.y) else {
            return EventPropagation::Propagate;
        };
        let viewport = self.viewport();
        let result = self
            .kind
            .behavior_mut()
            .handle_click(x, y, viewport, &self.events);
        if result.needs_render() {
            self.follow_focus_row();
        }
        result
    }

    /// `rect.height` rows, each `rect.width` visible columns.
    #[must_use]
    pub fn render(&self) -> Vec<String> {
        let body = self.kind.behavior().render(self.viewport());
        let style = FrameStyle {
            selected: self.selected,
            has_unread: self.scroll.has_unread,
        };
        render_frame(self.rect, self.display_name(), style, &body)
    }

    /// Absolute screen position of the text cursor, for an editing variant.
    #[must_use]
    pub fn cursor_position(&self) -> Option<(u16, u16)> {
        let (x, y) = self.kind.behavior().cursor(self.viewport())?;
        Some((
            self.rect.x.saturating_add(1).saturating_add(x),
            self.rect.y.saturating_add(1).saturating_add(y),
        ))
    }

    /// The line editor, if this module is one.
    pub fn line_input_mut(&mut self) -> Option<&mut LineInput> {
        match &mut self.kind {
            ModuleKind::LineInput(it) => Some(it),
            _ => None,
        }
    }

    #[must_use]
    pub fn line_input(&self) -> Option<&LineInput> {
        match &self.kind {
            ModuleKind::LineInput(it) => Some(it),
            _ => None,
        }
    }

    /// Commit the line editor's buffer. `None` if this isn't a line input.
    pub fn commit_line(&mut self) -> Option<String> {
        let ModuleKind::LineInput(input) = &mut self.kind else {
            return None;
        };
        Some(input.commit(&self.events))
    }

    pub fn history_back(&mut self) -> bool {
        let width = self.inner_width();
        self.line_input_mut().is_some_and(|it| it.history_back(width))
    }

    pub fn history_forward(&mut self) -> bool {
        let width = self.inner_width();
        self.line_input_mut().is_some_and(|it| it.history_forward(width))
    }

    pub fn backspace(&mut self) -> bool {
        let width = self.inner_width();
        self.line_input_mut().is_some_and(|it| it.backspace(width))
    }

    /// Insert `text` at the line editor's cursor.
    pub fn paste(&mut self, text: &str) -> bool {
        let width = self.inner_width();
        self.line_input_mut().is_some_and(|it| it.insert_str(text, width))
    }

    /// Replace a [`Label`]'s text. `false` for other variants.
    pub fn set_label_text(&mut self, text: &str) -> bool {
        let width = self.inner_width();
        let ModuleKind::Label(label) = &mut self.kind else {
            return false;
        };
        label.set_text(text, width);
        let content_rows = label.content_rows();
        let viewport = self.scroll_viewport();
        self.scroll.reset();
        self.scroll.clamp(ScrollOrigin::Top, content_rows, viewport);
        true
    }

    /// See [`ProgressBar::set_progress`]. `false` for other variants.
    pub fn set_progress(&mut self, current: u64, max: u64) -> bool {
        match &mut self.kind {
            ModuleKind::ProgressBar(bar) => bar.set_progress(current, max),
            _ => false,
        }
    }

    pub fn increment_progress(&mut self, by: u64) -> bool {
        match &mut self.kind {
            ModuleKind::ProgressBar(bar) => bar.increment(by),
            _ => false,
        }
    }

    /// See [`CellCanvas::set_cell`]. `false` for other variants.
    pub fn set_cell(&mut self, x: u16, y: u16, ch: char, style: CellStyle) -> bool {
        match &mut self.kind {
            ModuleKind::CellCanvas(canvas) => canvas.set_cell(x, y, ch, style),
            _ => false,
        }
    }

    pub fn clear_cell(&mut self, x: u16, y: u16) -> bool {
        match &mut self.kind {
            ModuleKind::CellCanvas(canvas) => canvas.clear_cell(x, y),
            _ => false,
        }
    }

    /// Replace a [`Toast`]'s message. `false` for other variants.
    pub fn show_toast(&mut self, message: &str, severity: Severity) -> bool {
        match &mut self.kind {
            ModuleKind::Toast(toast) => {
                toast.show(message, severity);
                true
            }
            _ => false,
        }
    }

    pub fn set_toggle(&mut self, is_on: bool) -> bool {
        match &mut self.kind {
            ModuleKind::Toggle(toggle) => toggle.set(is_on),
            _ => false,
        }
    }

    /// Activate a [`TabBar`] tab and publish [`ModuleEvent::TabSelected`] if it changed.
    ///
    /// # Errors
    ///
    /// [`crate::DashboardError::IndexOutOfRange`] if there is no such tab.
    pub fn select_tab(&mut self, index: usize) -> DashboardResult<bool> {
        match &mut self.kind {
            ModuleKind::TabBar(tabs) => tabs.select(index, &self.events),
            _ => Ok(false),
        }
    }

    /// Replace a [`ListView`]'s rows.
    pub fn set_list_rows(&mut self, header: Option<String>, rows: Vec<String>) -> bool {
        let ModuleKind::ListView(list) = &mut self.kind else {
            return false;
        };
        list.set_rows(header, rows);
        let content_rows = list.content_rows();
        let viewport = self.scroll_viewport();
        self.scroll.clamp(ScrollOrigin::Top, content_rows, viewport);
        self.follow_focus_row();
        true
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{ModifierKeysMask, SpecialKey, strip_control_sequences, visible_len};

    fn log_module(height: u16) -> Module {
        Module::new(Rect::new(0, 0, 12, height + 2), "log", TextLog::new(100))
    }

    fn release_at(x: u16, y: u16) -> MouseClick {
        MouseClick {
            buttons: MouseButtons::NONE,
            x,
            y,
            mask: ModifierKeysMask::new(),
        }
    }

    #[test]
    fn test_render_is_exactly_rect_sized() {
        let mut module = log_module(3);
        module.add_text("a line that is far too long for this module");
        let rows = module.render();
        assert_eq!(rows.len(), 5);
        for row in &rows {
            assert_eq!(visible_len(row), 12);
        }
    }

    #[test]
    fn test_log_unread_and_offset() {
        let mut module = log_module(3);
        for it in 1..=5 {
            module.add_text(&format!("line {it}"));
        }
        assert_eq!(module.scroll_offset(), 0);
        assert!(!module.has_unread());

        assert!(module.scroll_up(1));
        module.add_text("line 6");
        module.add_text("line 7");
        assert!(module.has_unread());
        assert_eq!(module.scroll_offset(), 3);

        // Still showing lines 2..=4.
        let body: Vec<String> = module.render()[1..4]
            .iter()
            .map(|it| strip_control_sequences(it).trim_matches('x').trim().to_string())
            .collect();
        assert_eq!(body, vec!["line 2", "line 3", "line 4"]);

        assert!(module.scroll_to_bottom());
        assert!(!module.has_unread());
    }

    #[test]
    fn test_scroll_noop_returns_false() {
        let mut module = log_module(3);
        module.add_text("1\n2");
        assert!(!module.scroll_up(1));
        assert!(!module.page_down());
        assert!(!module.scroll_to_top());
    }

    #[test]
    fn test_page_up_and_down() {
        let mut module = log_module(3);
        module.add_text("1\n2\n3\n4\n5\n6\n7\n8\n9\n10");
        assert!(module.page_up());
        assert_eq!(module.scroll_offset(), 3);
        assert!(module.scroll_to_top());
        assert_eq!(module.scroll_offset(), 7);
        assert!(module.page_down());
        assert_eq!(module.scroll_offset(), 4);
    }

    #[test]
    fn test_clear_resets_scroll() {
        let mut module = log_module(3);
        module.add_text("1\n2\n3\n4\n5");
        module.scroll_up(2);
        assert!(module.clear(true));
        assert_eq!(module.scroll_state(), ScrollState::default());
        assert_eq!(module.kind().behavior().content_rows(), 0);
    }

    #[test]
    fn test_non_text_variants_ignore_add_text_and_scroll() {
        let mut module = Module::new(Rect::new(0, 0, 10, 3), "go", Button::new("go"));
        assert!(!module.add_text("hello"));
        assert!(!module.scroll_up(1));
        assert!(!module.is_scrollable());
    }

    #[test]
    fn test_click_only_on_release_inside_border() {
        let mut module = Module::new(Rect::new(5, 5, 10, 3), "go", Button::new("go"));
        let held = MouseButtons::LEFT;

        // Press: previous had nothing.
        let mut press = release_at(6, 6);
        press.buttons = MouseButtons::LEFT;
        assert_eq!(module.handle_click(press, MouseButtons::NONE), EventPropagation::Propagate);
        // Same state twice.
        assert_eq!(module.handle_click(press, held), EventPropagation::Propagate);
        // Release on the border.
        assert_eq!(module.handle_click(release_at(5, 6), held), EventPropagation::Propagate);
        // Release inside.
        assert_eq!(
            module.handle_click(release_at(6, 6), held),
            EventPropagation::ConsumedRender
        );
    }

    #[test]
    fn test_line_input_cursor_position_is_absolute() {
        let mut module = Module::new(Rect::new(2, 3, 20, 3), "cmd", LineInput::new("> ", 5));
        module.handle_key(KeyPress::char('h'));
        module.handle_key(KeyPress::char('i'));
        assert_eq!(module.cursor_position(), Some((2 + 1 + 4, 3 + 1)));
        assert_eq!(module.commit_line(), Some("hi".to_string()));
        assert_eq!(
            module.line_input().unwrap().history().iter().next().map(String::as_str),
            Some("hi")
        );
    }

    #[test]
    fn test_list_cursor_scrolls_into_view() {
        let rows: Vec<String> = (0..10).map(|it| format!("row {it}")).collect();
        let mut module = Module::new(
            Rect::new(0, 0, 12, 5),
            "list",
            ListView::new(Some("header".into()), rows),
        );
        // 3 inner rows, 1 of them the header.
        for _ in 0..4 {
            module.handle_key(KeyPress::special(SpecialKey::Down));
        }
        assert_eq!(module.scroll_offset(), 3);
        module.handle_key(KeyPress::special(SpecialKey::Home));
        assert_eq!(module.scroll_offset(), 0);
    }

    #[test]
    fn test_display_name_in_border() {
        let module = log_module(1).with_display_name("Logs");
        assert_eq!(module.title(), "log");
        assert!(strip_control_sequences(&module.render()[0]).contains(" Logs "));
    }
}
