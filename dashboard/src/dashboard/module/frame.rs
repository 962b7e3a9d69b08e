// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Border and title drawn around every module with the DEC line drawing set.
//!
//! ```text
//! ┌ title ─────┐
//! │content     │
//! └───── more ─┘   <- " more " only while has_unread
//! ```

use crate::{AnsiColor, BoxGlyph, Rect, SGR_RESET, SgrCode, fit_visible, line_drawing,
            truncate_visible, visible_len};

const UNREAD_MARKER: &str = " more ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameStyle {
    pub selected: bool,
    pub has_unread: bool,
}

fn border_color(style: FrameStyle) -> String {
    if style.selected {
        format!("{}{}", SgrCode::Bold, AnsiColor::BrightCyan.fg())
    } else {
        AnsiColor::BrightBlack.fg()
    }
}

fn horizontal(count: usize) -> String {
    std::iter::repeat_n(BoxGlyph::Horizontal.as_char(), count).collect()
}

/// `rect.height` rows, each exactly `rect.width` columns wide. `body` holds the inner
/// rows. A rect too small for a border is filled with blanks.
#[must_use]
pub fn render_frame(rect: Rect, title: &str, style: FrameStyle, body: &[String]) -> Vec<String> {
    let width = usize::from(rect.width);
    let height = usize::from(rect.height);
    if width < 2 || height < 2 {
        return vec![" ".repeat(width); height];
    }
    let inner_width = width - 2;
    let color = border_color(style);
    let mut acc = Vec::with_capacity(height);

    // Top.
    let title_text = if inner_width >= 3 && !title.is_empty() {
        truncate_visible(&format!(" {title} "), inner_width)
    } else {
        String::new()
    };
    let title_len = visible_len(&title_text);
    acc.push(format!(
        "{color}{corner}{SGR_RESET}{color}{title_text}{SGR_RESET}{color}{rest}{SGR_RESET}",
        corner = line_drawing(&BoxGlyph::TopLeft.as_char().to_string()),
        rest = line_drawing(&format!(
            "{}{}",
            horizontal(inner_width - title_len),
            BoxGlyph::TopRight.as_char()
        )),
    ));

    // Body.
    let vertical = line_drawing(&BoxGlyph::Vertical.as_char().to_string());
    for row in 0..height - 2 {
        let content = body.get(row).map_or("", String::as_str);
        acc.push(format!(
            "{color}{vertical}{SGR_RESET}{}{SGR_RESET}{color}{vertical}{SGR_RESET}",
            fit_visible(content, inner_width)
        ));
    }

    // Bottom.
    let marker_len = UNREAD_MARKER.len();
    let bottom = if style.has_unread && inner_width >= marker_len + 2 {
        format!(
            "{color}{left}{SGR_RESET}{bold}{yellow}{UNREAD_MARKER}{SGR_RESET}{color}{right}{SGR_RESET}",
            left = line_drawing(&format!(
                "{}{}",
                BoxGlyph::BottomLeft.as_char(),
                horizontal(inner_width - marker_len - 1)
            )),
            bold = SgrCode::Bold,
            yellow = AnsiColor::BrightYellow.fg(),
            right = line_drawing(&format!(
                "{}{}",
                horizontal(1),
                BoxGlyph::BottomRight.as_char()
            )),
        )
    } else {
        format!(
            "{color}{}{SGR_RESET}",
            line_drawing(&format!(
                "{}{}{}",
                BoxGlyph::BottomLeft.as_char(),
                horizontal(inner_width),
                BoxGlyph::BottomRight.as_char()
            ))
        )
    };
    acc.push(bottom);

    acc
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::strip_control_sequences;

    const PLAIN: FrameStyle = FrameStyle {
        selected: false,
        has_unread: false,
    };

    #[test]
    fn test_frame_shape() {
        let rows = render_frame(Rect::new(0, 0, 12, 4), "log", PLAIN, &["hi".to_string()]);
        let plain: Vec<String> = rows.iter().map(|it| strip_control_sequences(it)).collect();
        assert_eq!(
            plain,
            vec![
                "l log qqqqqk".to_string(),
                "xhi        x".to_string(),
                "x          x".to_string(),
                "mqqqqqqqqqqj".to_string(),
            ]
        );
        for row in &rows {
            assert_eq!(visible_len(row), 12);
        }
    }

    #[test]
    fn test_unread_marker() {
        let style = FrameStyle {
            selected: true,
            has_unread: true,
        };
        let rows = render_frame(Rect::new(0, 0, 12, 3), "", style, &[]);
        assert_eq!(strip_control_sequences(&rows[2]), "mqqq more qj");
        assert_eq!(visible_len(&rows[2]), 12);
    }

    #[test]
    fn test_long_title_is_truncated() {
        let rows = render_frame(Rect::new(0, 0, 8, 2), "a very long title", PLAIN, &[]);
        assert_eq!(strip_control_sequences(&rows[0]), "l a verk");
        assert_eq!(visible_len(&rows[0]), 8);
    }

    #[test]
    fn test_too_small_for_border() {
        let rows = render_frame(Rect::new(0, 0, 1, 3), "x", PLAIN, &[]);
        assert_eq!(rows, vec![" ".to_string(); 3]);
    }
}
