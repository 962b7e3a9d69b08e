// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::{DashboardError, DashboardResult, EventPropagation, Key, KeyPress, ModuleBehavior,
            ModuleEvent, ModuleEvents, SgrCode, SpecialKey, Viewport, visible_len};

const SEPARATOR: &str = "|";

/// One row of tab names. Left / Right cycle through them, a click picks the one under
/// the pointer.
#[derive(Debug, Default)]
pub struct TabBar {
    tabs: Vec<String>,
    active: usize,
}

impl TabBar {
    #[must_use]
    pub fn new(tabs: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            tabs: tabs.into_iter().map(Into::into).collect(),
            active: 0,
        }
    }

    #[must_use]
    pub fn tabs(&self) -> &[String] { &self.tabs }

    #[must_use]
    pub fn active(&self) -> usize { self.active }

    /// # Errors
    ///
    /// [`DashboardError::IndexOutOfRange`] if there's no tab at `index`.
    pub fn select(&mut self, index: usize, events: &ModuleEvents) -> DashboardResult<bool> {
        if index >= self.tabs.len() {
            return Err(DashboardError::IndexOutOfRange {
                index,
                len: self.tabs.len(),
            });
        }
        if index == self.active {
            return Ok(false);
        }
        self.active = index;
        events.emit(ModuleEvent::TabSelected(index));
        Ok(true)
    }

    fn cycle(&mut self, forward: bool, events: &ModuleEvents) -> bool {
        let count = self.tabs.len();
        if count < 2 {
            return false;
        }
        let next = if forward {
            (self.active + 1) % count
        } else {
            (self.active + count - 1) % count
        };
        self.select(next, events).unwrap_or(false)
    }

    /// `[start, end)` columns of each tab label, as drawn by `render`.
    fn spans(&self) -> Vec<(usize, usize)> {
        let mut column = 0;
        self.tabs
            .iter()
            .map(|tab| {
                let start = column;
                column += visible_len(tab) + 2 + SEPARATOR.len();
                (start, start + visible_len(tab) + 2)
            })
            .collect()
    }
}

impl ModuleBehavior for TabBar {
    fn clear(&mut self) { self.active = 0; }

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
            Key::SpecialKey(SpecialKey::Left) => self.cycle(false, events),
            Key::SpecialKey(SpecialKey::Right) => self.cycle(true, events),
            _ => return EventPropagation::Propagate,
        };
        if changed { EventPropagation::ConsumedRender } else { EventPropagation::Consumed }
    }

    fn handle_click(
        &mut self,
        x: u16,
        y: u16,
        _viewport: Viewport,
        events: &ModuleEvents,
    ) -> EventPropagation {
        if y != 0 {
            return EventPropagation::Propagate;
        }
        let x = usize::from(x);
        match self.spans().iter().position(|(start, end)| (*start..*end).contains(&x)) {
            Some(index) if self.select(index, events).unwrap_or(false) => {
                EventPropagation::ConsumedRender
            }
            Some(_) => EventPropagation::Consumed,
            None => EventPropagation::Propagate,
        }
    }

    fn render(&self, viewport: Viewport) -> Vec<String> {
        let mut acc = vec![String::new(); viewport.height];
        if let Some(first) = acc.first_mut() {
            for (index, tab) in self.tabs.iter().enumerate() {
                if index == self.active {
                    first.push_str(&format!(
                        "{}{} {tab} {}",
                        SgrCode::Bold,
                        SgrCode::Negative,
                        SgrCode::Reset
                    ));
                } else {
                    first.push_str(&format!(" {tab} "));
                }
                first.push_str(SEPARATOR);
            }
        }
        acc
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::strip_control_sequences;

    const VIEWPORT: Viewport = Viewport {
        width: 30,
        height: 1,
        first_row: 0,
    };

    #[test]
    fn test_keys_cycle() {
        let events = ModuleEvents::new();
        let mut rx = events.subscribe();
        let mut tabs = TabBar::new(["a", "b", "c"]);

        tabs.handle_key(KeyPress::special(SpecialKey::Left), VIEWPORT, &events);
        assert_eq!(tabs.active(), 2);
        tabs.handle_key(KeyPress::special(SpecialKey::Right), VIEWPORT, &events);
        assert_eq!(tabs.active(), 0);
        assert_eq!(rx.try_recv().unwrap(), ModuleEvent::TabSelected(2));
        assert_eq!(rx.try_recv().unwrap(), ModuleEvent::TabSelected(0));
    }

    #[test]
    fn test_click_selects_tab_under_pointer() {
        let events = ModuleEvents::new();
        let mut tabs = TabBar::new(["one", "two"]);
        assert_eq!(strip_control_sequences(&tabs.render(VIEWPORT)[0]), " one | two |");

        // The separator isn't a tab.
        assert_eq!(tabs.handle_click(5, 0, VIEWPORT, &events), EventPropagation::Propagate);
        assert_eq!(tabs.handle_click(7, 0, VIEWPORT, &events), EventPropagation::ConsumedRender);
        assert_eq!(tabs.active(), 1);
        assert_eq!(tabs.handle_click(7, 0, VIEWPORT, &events), EventPropagation::Consumed);
    }

    #[test]
    fn test_select_out_of_range() {
        let mut tabs = TabBar::new(["one"]);
        assert!(matches!(
            tabs.select(3, &ModuleEvents::new()),
            Err(DashboardError::IndexOutOfRange { index: 3, len: 1 })
        ));
    }
}
