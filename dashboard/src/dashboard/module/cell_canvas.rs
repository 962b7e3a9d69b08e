// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::collections::HashMap;

use unicode_width::UnicodeWidthChar;

use crate::{AnsiColor, EventPropagation, KeyPress, ModuleBehavior, ModuleEvents, SGR_RESET,
            SgrCode, Viewport};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct CellStyle {
    pub fg: Option<AnsiColor>,
    pub bg: Option<AnsiColor>,
    pub bold: bool,
}

impl CellStyle {
    #[must_use]
    pub fn fg(color: AnsiColor) -> Self {
        Self {
            fg: Some(color),
            ..Default::default()
        }
    }

    #[must_use]
    pub fn to_sgr(&self) -> String {
        let mut acc = String::new();
        if self.bold {
            acc.push_str(&SgrCode::Bold.to_string());
        }
        if let Some(fg) = self.fg {
            acc.push_str(&fg.fg());
        }
        if let Some(bg) = self.bg {
            acc.push_str(&bg.bg());
        }
        acc
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    pub ch: char,
    pub style: CellStyle,
}

/// Sparse grid of styled characters, addressed from the top left of the inner area.
/// Cells outside the module are kept but not drawn.
#[derive(Debug, Default)]
pub struct CellCanvas {
    cells: HashMap<(u16, u16), Cell>,
}

impl CellCanvas {
    #[must_use]
    pub fn new() -> Self { Self::default() }

    /// Returns `true` if the cell changed.
    pub fn set_cell(&mut self, x: u16, y: u16, ch: char, style: CellStyle) -> bool {
        let cell = Cell { ch, style };
        self.cells.insert((x, y), cell) != Some(cell)
    }

    pub fn clear_cell(&mut self, x: u16, y: u16) -> bool { self.cells.remove(&(x, y)).is_some() }

    #[must_use]
    pub fn get_cell(&self, x: u16, y: u16) -> Option<&Cell> { self.cells.get(&(x, y)) }
}

impl ModuleBehavior for CellCanvas {
    fn clear(&mut self) { self.cells.clear(); }

    fn handle_key(&mut self, _: KeyPress, _: Viewport, _: &ModuleEvents) -> EventPropagation {
        EventPropagation::Propagate
    }

    fn render(&self, viewport: Viewport) -> Vec<String> {
        (0..viewport.height)
            .map(|row| {
                let Ok(y) = u16::try_from(row) else {
                    return String::new();
                };
                let mut acc = String::new();
                let mut column = 0;
                while column < viewport.width {
                    let cell = u16::try_from(column)
                        .ok()
                        .and_then(|x| self.cells.get(&(x, y)));
                    match cell {
                        Some(cell) if !cell.ch.is_control() => {
                            let cell_width = cell.ch.width().unwrap_or(1).max(1);
                            if column + cell_width > viewport.width {
                                break;
                            }
                            acc.push_str(&cell.style.to_sgr());
                            acc.push(cell.ch);
                            acc.push_str(SGR_RESET);
                            column += cell_width;
                        }
                        _ => {
                            acc.push(' ');
                            column += 1;
                        }
                    }
                }
                acc
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{strip_control_sequences, visible_len};

    const VIEWPORT: Viewport = Viewport {
        width: 4,
        height: 2,
        first_row: 0,
    };

    #[test]
    fn test_set_and_render() {
        let mut canvas = CellCanvas::new();
        assert!(canvas.set_cell(1, 0, '*', CellStyle::fg(AnsiColor::Red)));
        assert!(!canvas.set_cell(1, 0, '*', CellStyle::fg(AnsiColor::Red)));
        canvas.set_cell(3, 1, '#', CellStyle::default());
        // Off canvas.
        canvas.set_cell(9, 9, '!', CellStyle::default());

        let rows = canvas.render(VIEWPORT);
        assert_eq!(
            rows.iter().map(|it| strip_control_sequences(it)).collect::<Vec<_>>(),
            vec![" *  ", "   #"]
        );
        assert!(rows[0].contains(&AnsiColor::Red.fg()));
    }

    #[test]
    fn test_wide_char_takes_two_columns() {
        let mut canvas = CellCanvas::new();
        canvas.set_cell(0, 0, '日', CellStyle::default());
        canvas.set_cell(1, 0, 'x', CellStyle::default());
        let rows = canvas.render(VIEWPORT);
        assert_eq!(visible_len(&rows[0]), 4);
        assert_eq!(strip_control_sequences(&rows[0]), "日  ");
    }

    #[test]
    fn test_clear_cell() {
        let mut canvas = CellCanvas::new();
        canvas.set_cell(0, 0, 'a', CellStyle::default());
        assert!(canvas.clear_cell(0, 0));
        assert!(!canvas.clear_cell(0, 0));
        assert_eq!(canvas.get_cell(0, 0), None);
    }
}
