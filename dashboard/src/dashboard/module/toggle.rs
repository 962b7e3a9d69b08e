// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::{AnsiColor, EventPropagation, Key, KeyPress, ModuleBehavior, ModuleEvent,
            ModuleEvents, SGR_RESET, SpecialKey, Viewport};

#[derive(Debug, Default)]
pub struct Toggle {
    label: String,
    is_on: bool,
}

impl Toggle {
    #[must_use]
    pub fn new(label: impl Into<String>, is_on: bool) -> Self {
        Self {
            label: label.into(),
            is_on,
        }
    }

    #[must_use]
    pub fn is_on(&self) -> bool { self.is_on }

    /// Set without publishing an event. Returns `true` if the value changed.
    pub fn set(&mut self, is_on: bool) -> bool {
        let changed = self.is_on != is_on;
        self.is_on = is_on;
        changed
    }

    pub fn flip(&mut self, events: &ModuleEvents) {
        self.is_on = !self.is_on;
        events.emit(ModuleEvent::Toggled(self.is_on));
    }
}

impl ModuleBehavior for Toggle {
    fn clear(&mut self) { self.is_on = false; }

    fn handle_key(
        &mut self,
        key: KeyPress,
        _viewport: Viewport,
        events: &ModuleEvents,
    ) -> EventPropagation {
        match (key.key, key.is_unmodified()) {
            (Key::SpecialKey(SpecialKey::Enter) | Key::Character(' '), true) => {
                self.flip(events);
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
        self.flip(events);
        EventPropagation::ConsumedRender
    }

    fn render(&self, viewport: Viewport) -> Vec<String> {
        let mut acc = vec![String::new(); viewport.height];
        if let Some(first) = acc.first_mut() {
            let (color, mark) = if self.is_on {
                (AnsiColor::BrightGreen, 'x')
            } else {
                (AnsiColor::BrightBlack, ' ')
            };
            *first = format!("{}[{mark}]{SGR_RESET} {}", color.fg(), self.label);
        }
        acc
    }
}
