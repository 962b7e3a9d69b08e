// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::{EventPropagation, Key, KeyPress, ModuleBehavior, ModuleEvents, SGR_RESET,
            Severity, SpecialKey, Viewport, wrap_visible};

/// A single transient message, colored by severity. Showing a new one replaces the
/// old. Esc dismisses it.
#[derive(Debug, Default)]
pub struct Toast {
    message: Option<(String, Severity)>,
}

impl Toast {
    #[must_use]
    pub fn new() -> Self { Self::default() }

    pub fn show(&mut self, message: impl Into<String>, severity: Severity) {
        self.message = Some((message.into(), severity));
    }

    pub fn dismiss(&mut self) -> bool { self.message.take().is_some() }

    #[must_use]
    pub fn message(&self) -> Option<&str> { self.message.as_ref().map(|(it, _)| it.as_str()) }
}

impl ModuleBehavior for Toast {
    fn clear(&mut self) { self.message = None; }

    fn handle_key(&mut self, key: KeyPress, _: Viewport, _: &ModuleEvents) -> EventPropagation {
        let is_dismiss_key = key.is_unmodified()
            && matches!(key.key, Key::SpecialKey(SpecialKey::Esc | SpecialKey::Enter));
        if is_dismiss_key && self.dismiss() {
            EventPropagation::ConsumedRender
        } else {
            EventPropagation::Propagate
        }
    }

    fn handle_click(&mut self, _: u16, _: u16, _: Viewport, _: &ModuleEvents) -> EventPropagation {
        if self.dismiss() { EventPropagation::ConsumedRender } else { EventPropagation::Propagate }
    }

    fn render(&self, viewport: Viewport) -> Vec<String> {
        let mut acc: Vec<String> = match &self.message {
            None => vec![],
            Some((message, severity)) => {
                let style = severity.style();
                wrap_visible(message, viewport.width)
                    .into_iter()
                    .take(viewport.height)
                    .map(|row| format!("{style}{row}{SGR_RESET}"))
                    .collect()
            }
        };
        acc.resize(viewport.height, String::new());
        acc
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{ModifierKeysMask, strip_control_sequences};

    const VIEWPORT: Viewport = Viewport {
        width: 5,
        height: 2,
        first_row: 0,
    };

    #[test]
    fn test_show_replaces_and_wraps() {
        let mut toast = Toast::new();
        toast.show("first", Severity::Information);
        toast.show("disk full!", Severity::Error);
        let rows = toast.render(VIEWPORT);
        assert_eq!(
            rows.iter().map(|it| strip_control_sequences(it)).collect::<Vec<_>>(),
            vec!["disk ", "full!"]
        );
        assert!(rows[0].starts_with(&Severity::Error.style()));
    }

    #[test]
    fn test_esc_dismisses() {
        let mut toast = Toast::new();
        let esc = KeyPress::special(SpecialKey::Esc);
        assert_eq!(
            toast.handle_key(esc, VIEWPORT, &ModuleEvents::new()),
            EventPropagation::Propagate
        );
        toast.show("hi", Severity::Warning);
        assert_eq!(
            toast.handle_key(esc, VIEWPORT, &ModuleEvents::new()),
            EventPropagation::ConsumedRender
        );
        assert_eq!(toast.message(), None);
        assert_eq!(toast.render(VIEWPORT), vec!["", ""]);
    }

    #[test]
    fn test_modified_enter_does_not_dismiss() {
        let mut toast = Toast::new();
        toast.show("hi", Severity::Warning);
        for key in [
            KeyPress {
                key: Key::SpecialKey(SpecialKey::Enter),
                mask: ModifierKeysMask::new().with_ctrl(),
            },
            KeyPress {
                key: Key::SpecialKey(SpecialKey::Enter),
                mask: ModifierKeysMask::new().with_alt(),
            },
        ] {
            assert_eq!(
                toast.handle_key(key, VIEWPORT, &ModuleEvents::new()),
                EventPropagation::Propagate
            );
        }
        assert!(toast.message().is_some());

        let enter = KeyPress::special(SpecialKey::Enter);
        assert_eq!(
            toast.handle_key(enter, VIEWPORT, &ModuleEvents::new()),
            EventPropagation::ConsumedRender
        );
        assert_eq!(toast.message(), None);
    }
}
