// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::{AnsiColor, EventPropagation, KeyPress, ModuleBehavior, ModuleEvents, SGR_RESET,
            Viewport};

/// Width of the `" 100%"` suffix.
const PERCENT_WIDTH: usize = 5;

/// `current / max`, drawn as a bar plus a percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressBar {
    current: u64,
    max: u64,
}

impl Default for ProgressBar {
    fn default() -> Self { Self::new(100) }
}

impl ProgressBar {
    #[must_use]
    pub fn new(max: u64) -> Self { Self { current: 0, max } }

    #[must_use]
    pub fn current(&self) -> u64 { self.current }

    #[must_use]
    pub fn max(&self) -> u64 { self.max }

    /// `current` is capped at `max`. Returns `true` if anything changed.
    pub fn set_progress(&mut self, current: u64, max: u64) -> bool {
        let next = Self {
            current: current.min(max),
            max,
        };
        let changed = next != *self;
        *self = next;
        changed
    }

    pub fn increment(&mut self, by: u64) -> bool {
        self.set_progress(self.current.saturating_add(by), self.max)
    }

    /// 0 when `max` is 0.
    #[must_use]
    pub fn percent(&self) -> u64 {
        if self.max == 0 {
            return 0;
        }
        let percent = u128::from(self.current) * 100 / u128::from(self.max);
        u64::try_from(percent).unwrap_or(100)
    }
}

impl ModuleBehavior for ProgressBar {
    fn clear(&mut self) { self.current = 0; }

    fn handle_key(&mut self, _: KeyPress, _: Viewport, _: &ModuleEvents) -> EventPropagation {
        EventPropagation::Propagate
    }

    fn render(&self, viewport: Viewport) -> Vec<String> {
        let mut acc = vec![String::new(); viewport.height];
        if let Some(first) = acc.first_mut() {
            let bar_width = viewport.width.saturating_sub(PERCENT_WIDTH);
            let percent = self.percent();
            let filled = usize::try_from(u64::try_from(bar_width).unwrap_or(0) * percent / 100)
                .unwrap_or(bar_width);
            *first = format!(
                "{}{}{}{}{SGR_RESET}{:>4}%",
                AnsiColor::Green.bg(),
                " ".repeat(filled),
                AnsiColor::BrightBlack.bg(),
                " ".repeat(bar_width - filled),
                percent,
            );
        }
        acc
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    use super::*;
    use crate::{strip_control_sequences, visible_len};

    #[test_case(0, 10, 0)]
    #[test_case(5, 10, 50)]
    #[test_case(10, 10, 100)]
    #[test_case(3, 0, 0; "zero max")]
    fn test_percent(current: u64, max: u64, expected: u64) {
        let mut bar = ProgressBar::new(max);
        bar.set_progress(current, max);
        assert_eq!(bar.percent(), expected);
    }

    #[test]
    fn test_current_is_capped() {
        let mut bar = ProgressBar::new(10);
        assert!(bar.increment(7));
        assert!(bar.increment(7));
        assert_eq!(bar.current(), 10);
        assert!(!bar.increment(1));
    }

    #[test]
    fn test_render() {
        let mut bar = ProgressBar::new(4);
        bar.set_progress(1, 4);
        let viewport = Viewport {
            width: 13,
            height: 2,
            first_row: 0,
        };
        let rows = bar.render(viewport);
        assert_eq!(visible_len(&rows[0]), 13);
        assert_eq!(strip_control_sequences(&rows[0]), "          25%");
        let filled = format!("{}  {}", AnsiColor::Green.bg(), AnsiColor::BrightBlack.bg());
        assert!(rows[0].starts_with(&filled));
        assert_eq!(rows[1], "");
    }
}
