// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::{EventPropagation, Key, KeyPress, ModuleBehavior, ModuleEvent, ModuleEvents,
            SgrCode, SpecialKey, Viewport, visible_len};

/// Fires on Enter, Space, or a click release anywhere inside it.
#[derive(Debug, Default)]
pub struct Button {
    label: String,
    press_count: u64,
}

impl Button {
    #[must_use]
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            press_count: 0,
        }
    }

    #[must_use]
    pub fn label(&self) -> &str { &self.label }

    #[must_use]
    pub fn press_count(&self) -> u64 { self.press_count }

    pub fn press(&mut self, events: &ModuleEvents) {
        self.press_count += 1;
        events.emit(ModuleEvent::ButtonPressed {
            count: self.press_count,
        });
    }
}

impl ModuleBehavior for Button {
    fn clear(&mut self) { self.press_count = 0; }

    fn handle_key(
        &mut self,
        key: KeyPress,
        _viewport: Viewport,
        events: &ModuleEvents,
    ) -> EventPropagation {
        match (key.key, key.is_unmodified()) {
            (Key::SpecialKey(SpecialKey::Enter) | Key::Character(' '), true) => {
                self.press(events);
                EventPropagation::ConsumedRender
            }
            _ => EventPropagation::Propagate,
        }
    }

    fn handle_click(
        &mut self,
        _x: u16,
        _y: u16,
        _viewport: Viewport,
        events: &ModuleEvents,
    ) -> EventPropagation {
        self.press(events);
        EventPropagation::ConsumedRender
    }

    /// The label, centered, in reverse video.
    fn render(&self, viewport: Viewport) -> Vec<String> {
        let mut acc = vec![String::new(); viewport.height];
        let label = format!("[ {} ]", self.label);
        let left = viewport.width.saturating_sub(visible_len(&label)) / 2;
        if let Some(row) = acc.get_mut(viewport.height.saturating_sub(1) / 2) {
            *row = format!(
                "{}{}{label}{}",
                " ".repeat(left),
                SgrCode::Negative,
                SgrCode::NegativeOff
            );
        }
        acc
    }
}
