// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Global key routing. A pure function from a key press (plus a little context about
//! the focused module) to the one action the manager performs. First match wins:
//!
//! | #  | Keys                                      | Action                        |
//! |:---|:------------------------------------------|:------------------------------|
//! | 1  | quit binding (default `ctrl+c`)           | [`GlobalAction::Quit`]        |
//! | 2  | caller bindings from `bind_key`           | [`GlobalAction::UserBinding`] |
//! | 3  | `ctrl+home`, `ctrl+end`, `pageup`, `pagedown`, `shift+up`, `shift+down` | [`GlobalAction::Scroll`] |
//! | 4  | `up`, `down` on a line input              | history back / forward        |
//! | 5  | `ctrl+pagedown`, `ctrl+pageup`, `alt+right`, `alt+left` | next / prev page |
//! | 6  | `tab`, `shift+tab`                        | focus next / prev             |
//! | 7  | `enter`, `alt+enter` on a line input      | commit (alt keeps scroll)     |
//! | 8  | `backspace` on a line input               | [`GlobalAction::Backspace`]   |
//! | 9  | `ctrl+v` on a line input                  | [`GlobalAction::Paste`]       |
//! | 10 | anything else                             | [`GlobalAction::Forward`]     |

use crate::{Key, KeyPress, SpecialKey};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollAction {
    ToTop,
    ToBottom,
    PageUp,
    PageDown,
    /// Positive shows earlier content.
    Lines(isize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GlobalAction {
    Quit,
    /// Index into the registered bindings.
    UserBinding(usize),
    Scroll(ScrollAction),
    HistoryBack,
    HistoryForward,
    NextPage,
    PrevPage,
    FocusNext,
    FocusPrev,
    Commit { keep_scroll: bool },
    Backspace,
    Paste,
    Forward,
}

#[derive(Debug, Clone, Copy)]
pub struct RoutingContext<'a> {
    pub quit_key: KeyPress,
    pub bindings: &'a [KeyPress],
    pub focused_is_line_input: bool,
}

#[must_use]
pub fn route_key(key: KeyPress, context: RoutingContext<'_>) -> GlobalAction {
    if key == context.quit_key {
        return GlobalAction::Quit;
    }
    if let Some(index) = context.bindings.iter().position(|it| *it == key) {
        return GlobalAction::UserBinding(index);
    }

    let mask = key.mask;
    let plain = key.is_unmodified();
    let ctrl_only = mask.ctrl() && !mask.alt() && !mask.shift();
    let alt_only = mask.alt() && !mask.ctrl() && !mask.shift();
    let shift_only = mask.shift() && !mask.ctrl() && !mask.alt();
    let on_line_input = context.focused_is_line_input;

    let Key::SpecialKey(special) = key.key else {
        return match key.key {
            Key::Character('v') if ctrl_only && on_line_input => GlobalAction::Paste,
            _ => GlobalAction::Forward,
        };
    };

    match special {
        SpecialKey::Home if ctrl_only => GlobalAction::Scroll(ScrollAction::ToTop),
        SpecialKey::End if ctrl_only => GlobalAction::Scroll(ScrollAction::ToBottom),
        SpecialKey::PageUp if plain => GlobalAction::Scroll(ScrollAction::PageUp),
        SpecialKey::PageDown if plain => GlobalAction::Scroll(ScrollAction::PageDown),
        SpecialKey::Up if shift_only => GlobalAction::Scroll(ScrollAction::Lines(1)),
        SpecialKey::Down if shift_only => GlobalAction::Scroll(ScrollAction::Lines(-1)),

        SpecialKey::Up if plain && on_line_input => GlobalAction::HistoryBack,
        SpecialKey::Down if plain && on_line_input => GlobalAction::HistoryForward,

        SpecialKey::PageDown if ctrl_only => GlobalAction::NextPage,
        SpecialKey::PageUp if ctrl_only => GlobalAction::PrevPage,
        SpecialKey::Right if alt_only => GlobalAction::NextPage,
        SpecialKey::Left if alt_only => GlobalAction::PrevPage,

        SpecialKey::Tab if plain => GlobalAction::FocusNext,
        SpecialKey::BackTab => GlobalAction::FocusPrev,

        SpecialKey::Enter if plain && on_line_input => GlobalAction::Commit { keep_scroll: false },
        SpecialKey::Enter if alt_only && on_line_input => GlobalAction::Commit { keep_scroll: true },

        SpecialKey::Backspace if plain && on_line_input => GlobalAction::Backspace,

        _ => GlobalAction::Forward,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    use super::*;
    use crate::ModifierKeysMask;

    fn special_with(special: SpecialKey, mask: ModifierKeysMask) -> KeyPress {
        KeyPress::with(Key::SpecialKey(special), mask)
    }

    fn context(bindings: &[KeyPress], focused_is_line_input: bool) -> RoutingContext<'_> {
        RoutingContext {
            quit_key: KeyPress::ctrl('c'),
            bindings,
            focused_is_line_input,
        }
    }

    #[test]
    fn test_quit_beats_everything() {
        let bindings = [KeyPress::ctrl('c')];
        assert_eq!(route_key(KeyPress::ctrl('c'), context(&bindings, true)), GlobalAction::Quit);
    }

    #[test]
    fn test_user_binding_beats_builtin_keys() {
        let bindings = [KeyPress::char('q'), KeyPress::special(SpecialKey::Tab)];
        assert_eq!(
            route_key(KeyPress::special(SpecialKey::Tab), context(&bindings, false)),
            GlobalAction::UserBinding(1)
        );
    }

    #[test_case(special_with(SpecialKey::Home, ModifierKeysMask::new().with_ctrl()), GlobalAction::Scroll(ScrollAction::ToTop))]
    #[test_case(special_with(SpecialKey::End, ModifierKeysMask::new().with_ctrl()), GlobalAction::Scroll(ScrollAction::ToBottom))]
    #[test_case(KeyPress::special(SpecialKey::PageUp), GlobalAction::Scroll(ScrollAction::PageUp))]
    #[test_case(special_with(SpecialKey::Down, ModifierKeysMask::new().with_shift()), GlobalAction::Scroll(ScrollAction::Lines(-1)))]
    #[test_case(KeyPress::special(SpecialKey::Up), GlobalAction::HistoryBack)]
    #[test_case(KeyPress::special(SpecialKey::Down), GlobalAction::HistoryForward)]
    #[test_case(special_with(SpecialKey::PageDown, ModifierKeysMask::new().with_ctrl()), GlobalAction::NextPage)]
    #[test_case(special_with(SpecialKey::Left, ModifierKeysMask::new().with_alt()), GlobalAction::PrevPage)]
    #[test_case(KeyPress::special(SpecialKey::Tab), GlobalAction::FocusNext)]
    #[test_case(KeyPress::special(SpecialKey::BackTab), GlobalAction::FocusPrev)]
    #[test_case(KeyPress::special(SpecialKey::Enter), GlobalAction::Commit { keep_scroll: false })]
    #[test_case(special_with(SpecialKey::Enter, ModifierKeysMask::new().with_alt()), GlobalAction::Commit { keep_scroll: true })]
    #[test_case(KeyPress::special(SpecialKey::Backspace), GlobalAction::Backspace)]
    #[test_case(KeyPress::ctrl('v'), GlobalAction::Paste)]
    #[test_case(KeyPress::char('x'), GlobalAction::Forward)]
    fn test_routing_on_line_input(key: KeyPress, expected: GlobalAction) {
        assert_eq!(route_key(key, context(&[], true)), expected);
    }

    #[test_case(KeyPress::special(SpecialKey::Up))]
    #[test_case(KeyPress::special(SpecialKey::Enter))]
    #[test_case(KeyPress::special(SpecialKey::Backspace))]
    #[test_case(KeyPress::ctrl('v'))]
    fn test_line_input_keys_forwarded_elsewhere(key: KeyPress) {
        assert_eq!(route_key(key, context(&[], false)), GlobalAction::Forward);
    }

    #[test]
    fn test_modified_history_key_is_not_history() {
        let key = special_with(SpecialKey::Up, ModifierKeysMask::new().with_ctrl());
        assert_eq!(route_key(key, context(&[], true)), GlobalAction::Forward);
    }
}
