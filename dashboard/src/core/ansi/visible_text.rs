// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Escape sequence aware text measurement and reflow.
//!
//! Module content carries inline styling, so nothing in the dashboard measures or
//! wraps on byte or `char` length. These functions treat the following as zero width
//! control sequences:
//!
//! | Grammar               | Example            | Terminator                       |
//! |:----------------------|:-------------------|:---------------------------------|
//! | `ESC [ params final`  | `ESC [ 3 1 m`      | first byte in `0x40..=0x7E`      |
//! | `ESC ] payload BEL`   | `ESC ] 0 ; t BEL`  | `BEL`, or `ESC \` (ST)           |
//! | `ESC ( c`, `ESC ) c`  | `ESC ( 0`          | the charset designator `c`       |
//! | `ESC c`               | `ESC 7`            | any single char after `ESC`      |
//!
//! An unterminated sequence extends to the end of the string. Visible text is
//! measured per grapheme cluster in terminal columns ([`unicode_width`]), so a wide
//! CJK character counts as 2.

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

use super::{BEL, ESC};

/// One piece of a string, either a complete control sequence or one grapheme.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextSegment<'a> {
    Control(&'a str),
    Grapheme(&'a str),
}

impl TextSegment<'_> {
    #[must_use]
    pub fn visible_width(&self) -> usize {
        match self {
            TextSegment::Control(_) => 0,
            TextSegment::Grapheme(it) => UnicodeWidthStr::width(*it),
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            TextSegment::Control(it) | TextSegment::Grapheme(it) => it,
        }
    }
}

/// Iterate `text` as [`TextSegment`]s. Concatenating the segments gives back `text`.
#[must_use]
pub fn segments(text: &str) -> Segments<'_> { Segments { rest: text } }

#[derive(Clone, Debug)]
pub struct Segments<'a> {
    rest: &'a str,
}

impl<'a> Iterator for Segments<'a> {
    type Item = TextSegment<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.rest.is_empty() {
            return None;
        }

        if self.rest.starts_with(ESC) {
            let len = control_sequence_len(self.rest);
            let (seq, rest) = self.rest.split_at(len);
            self.rest = rest;
            return Some(TextSegment::Control(seq));
        }

        // Graphemes never span an ESC.
        let run_end = self.rest.find(ESC).unwrap_or(self.rest.len());
        let run = &self.rest[..run_end];
        let grapheme_len = run.graphemes(true).next().map_or(run.len(), str::len);
        let (grapheme, rest) = self.rest.split_at(grapheme_len);
        self.rest = rest;
        Some(TextSegment::Grapheme(grapheme))
    }
}

/// Byte length of the control sequence at the start of `text`, which must start with
/// [`ESC`]. All terminators are ASCII so every returned length is a char boundary.
fn control_sequence_len(text: &str) -> usize {
    let bytes = text.as_bytes();
    match bytes.get(1) {
        None => 1,
        Some(b'[') => bytes[2..]
            .iter()
            .position(|it| (0x40..=0x7E).contains(it))
            .map_or(bytes.len(), |pos| pos + 3),
        Some(b']') => {
            let payload = &bytes[2..];
            let bel = payload.iter().position(|it| *it == BEL as u8);
            let st = payload.windows(2).position(|it| it == b"\x1b\\");
            match (bel, st) {
                (Some(bel), Some(st)) if st < bel => st + 4,
                (Some(bel), _) => bel + 3,
                (None, Some(st)) => st + 4,
                (None, None) => bytes.len(),
            }
        }
        Some(b'(' | b')') => {
            2 + text[2..].chars().next().map_or(0, char::len_utf8)
        }
        Some(_) => 1 + text[1..].chars().next().map_or(0, char::len_utf8),
    }
}

/// Displayed width of `text`, ignoring control sequences.
///
/// ```
/// use r3bl_dashboard::visible_len;
/// assert_eq!(visible_len("\x1b[31mhi\x1b[0m"), 2);
/// ```
#[must_use]
pub fn visible_len(text: &str) -> usize {
    segments(text).map(|it| it.visible_width()).sum()
}

/// `text` without any control sequences.
#[must_use]
pub fn strip_control_sequences(text: &str) -> String {
    segments(text)
        .filter_map(|it| match it {
            TextSegment::Grapheme(grapheme) => Some(grapheme),
            TextSegment::Control(_) => None,
        })
        .collect()
}

/// Split `text` into chunks whose visible width is at most `width`. See
/// [`SplitVisible`].
#[must_use]
pub fn split_visible(text: &str, width: usize) -> SplitVisible<'_> {
    SplitVisible {
        rest: text,
        width: width.max(1),
    }
}

/// Lazy width bounded splitter. Cloning it restarts from the same position.
///
/// - Chunks are slices of the input, so concatenating them yields the input.
/// - A control sequence is never split, it stays in the chunk of the visible
///   grapheme that precedes it (or the first chunk if there is none).
/// - A single grapheme wider than `width` is emitted as its own chunk.
/// - An empty input yields no chunks.
#[derive(Clone, Debug)]
pub struct SplitVisible<'a> {
    rest: &'a str,
    width: usize,
}

impl<'a> Iterator for SplitVisible<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        if self.rest.is_empty() {
            return None;
        }

        let mut used = 0;
        let mut end = 0;
        for segment in segments(self.rest) {
            let segment_width = segment.visible_width();
            if used > 0 && used + segment_width > self.width {
                break;
            }
            used += segment_width;
            end += segment.as_str().len();
        }

        let (chunk, rest) = self.rest.split_at(end);
        self.rest = rest;
        Some(chunk)
    }
}

/// Wrap `text` into owned rows of at most `width` columns. Unlike [`split_visible`],
/// an empty input is one empty row, since it still occupies a line on screen.
///
/// Rows are painted one by one and each ends with a reset, so the SGR sequences in
/// effect at the end of a row are repeated at the start of the next one.
#[must_use]
pub fn wrap_visible(text: &str, width: usize) -> Vec<String> {
    let mut active_sgr = String::new();
    let rows: Vec<String> = split_visible(text, width)
        .map(|chunk| {
            let row = format!("{active_sgr}{chunk}");
            for segment in segments(chunk) {
                if let TextSegment::Control(seq) = segment {
                    track_sgr(&mut active_sgr, seq);
                }
            }
            row
        })
        .collect();
    if rows.is_empty() { vec![String::new()] } else { rows }
}

/// Fold one control sequence into the SGR run in effect. A reset (`ESC [ m` or
/// `ESC [ 0 m`) empties it, any other SGR is appended, the rest is ignored.
fn track_sgr(active_sgr: &mut String, seq: &str) {
    let Some(params) = seq.strip_prefix("\x1b[").and_then(|it| it.strip_suffix('m')) else {
        return;
    };
    if !params.bytes().all(|it| it.is_ascii_digit() || it == b';') {
        return;
    }
    if params.is_empty() || params == "0" {
        active_sgr.clear();
    } else {
        active_sgr.push_str(seq);
    }
}

/// Append spaces until the visible width of `text` is `width`. Wider text is returned
/// unchanged.
#[must_use]
pub fn pad_visible(text: &str, width: usize) -> String {
    let len = visible_len(text);
    let mut acc = String::with_capacity(text.len() + width.saturating_sub(len));
    acc.push_str(text);
    acc.extend(std::iter::repeat_n(' ', width.saturating_sub(len)));
    acc
}

/// Append spaces until the visible width of `text` is a multiple of `width`. Empty
/// text is padded to one full `width`.
#[must_use]
pub fn pad_to_multiple(text: &str, width: usize) -> String {
    let width = width.max(1);
    let len = visible_len(text);
    let target = if len == 0 { width } else { len.div_ceil(width) * width };
    pad_visible(text, target)
}

/// Drop visible graphemes past `width` columns. All control sequences are kept, so a
/// trailing style reset still applies.
#[must_use]
pub fn truncate_visible(text: &str, width: usize) -> String {
    let mut used = 0;
    let mut acc = String::with_capacity(text.len());
    for segment in segments(text) {
        match segment {
            TextSegment::Control(seq) => acc.push_str(seq),
            TextSegment::Grapheme(grapheme) => {
                let grapheme_width = segment.visible_width();
                if used + grapheme_width <= width {
                    used += grapheme_width;
                    acc.push_str(grapheme);
                } else {
                    // Nothing after this can be visible either.
                    used = width + 1;
                }
            }
        }
    }
    acc
}

/// Exactly `width` visible columns: truncate, then pad.
#[must_use]
pub fn fit_visible(text: &str, width: usize) -> String {
    pad_visible(&truncate_visible(text, width), width)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    use super::*;

    #[test_case("", 0)]
    #[test_case("hello", 5)]
    #[test_case("\x1b[31mhi\x1b[0m", 2; "sgr around text")]
    #[test_case("\x1b[38;5;208mx", 1; "256 color")]
    #[test_case("\x1b]0;title\x07ab", 2; "osc with bel")]
    #[test_case("\x1b]0;title\x1b\\ab", 2; "osc with st")]
    #[test_case("\x1b(0lqk\x1b(B", 3; "line drawing mode switch")]
    #[test_case("\x1b[1mm\x1b[0m", 1; "terminator letter not counted as content")]
    #[test_case("\x1b[31", 0; "unterminated csi")]
    #[test_case("日本", 4; "wide graphemes")]
    #[test_case("e\u{301}", 1; "combining mark")]
    fn test_visible_len(input: &str, expected: usize) {
        assert_eq!(visible_len(input), expected);
    }

    #[test]
    fn test_strip() {
        assert_eq!(strip_control_sequences("\x1b[1;31mred\x1b[0m!"), "red!");
    }

    #[test]
    fn test_split_simple() {
        let chunks: Vec<&str> = split_visible("abcdefg", 3).collect();
        assert_eq!(chunks, vec!["abc", "def", "g"]);
        assert_eq!(split_visible("", 3).count(), 0);
    }

    #[test]
    fn test_split_carries_control_with_preceding_char() {
        let input = "ab\x1b[31mcd\x1b[0m";
        let chunks: Vec<&str> = split_visible(input, 2).collect();
        assert_eq!(chunks, vec!["ab\x1b[31m", "cd\x1b[0m"]);
    }

    #[test]
    fn test_split_is_restartable() {
        let splitter = split_visible("abcdef", 4);
        let first: Vec<&str> = splitter.clone().collect();
        let second: Vec<&str> = splitter.collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_split_wide_grapheme_alone() {
        let chunks: Vec<&str> = split_visible("a日b", 1).collect();
        assert_eq!(chunks, vec!["a", "日", "b"]);
    }

    #[test_case("\x1b[1mbold\x1b[22m and \x1b[4munderline\x1b[24m text", 4)]
    #[test_case("\x1b[31m\x1b[42mxy\x1b[0m\x1b]0;t\x07zzzzzz", 3)]
    #[test_case("plain text without styling at all", 7)]
    #[test_case("\x1b(0lqqqqqqqk\x1b(B", 5)]
    #[test_case("only\x1b[0m", 1)]
    fn test_split_properties(input: &str, width: usize) {
        let chunks: Vec<&str> = split_visible(input, width).collect();

        // Round trip.
        assert_eq!(chunks.concat(), input);
        assert_eq!(
            chunks.iter().map(|it| strip_control_sequences(it)).collect::<String>(),
            strip_control_sequences(input)
        );

        for chunk in &chunks {
            assert!(visible_len(chunk) <= width, "{chunk:?} wider than {width}");
            // No chunk ends mid sequence: every control segment in the chunk is
            // terminated.
            for segment in segments(chunk) {
                if let TextSegment::Control(seq) = segment {
                    let last = seq.as_bytes()[seq.len() - 1];
                    let terminated = (0x40..=0x7E).contains(&last)
                        || last == BEL as u8
                        || seq.len() == 3;
                    assert!(terminated, "{seq:?} split in {chunk:?}");
                }
            }
        }

        // Minimal: every chunk but the last is full.
        let visible = visible_len(input);
        assert_eq!(chunks.len(), visible.div_ceil(width).max(1));
    }

    #[test]
    fn test_wrap_visible_repeats_style_on_continuation_rows() {
        assert_eq!(
            wrap_visible("\x1b[31mabcdef\x1b[0m", 4),
            vec!["\x1b[31mabcd".to_string(), "\x1b[31mef\x1b[0m".to_string()]
        );
        assert_eq!(
            wrap_visible("\x1b[1m\x1b[32mab\x1b[0mcdef", 2),
            vec![
                "\x1b[1m\x1b[32mab\x1b[0m".to_string(),
                "cd".to_string(),
                "ef".to_string()
            ]
        );
        assert_eq!(
            wrap_visible("ab\x1b[4mcd\x1b[m", 2),
            vec!["ab\x1b[4m".to_string(), "\x1b[4mcd\x1b[m".to_string()]
        );
    }

    #[test]
    fn test_wrap_visible_empty_is_one_row() {
        assert_eq!(wrap_visible("", 5), vec![String::new()]);
        assert_eq!(wrap_visible("abcdef", 5), vec!["abcde".to_string(), "f".to_string()]);
    }

    #[test]
    fn test_pad() {
        assert_eq!(pad_visible("ab", 4), "ab  ");
        assert_eq!(pad_visible("abcdef", 4), "abcdef");
        assert_eq!(pad_visible("\x1b[31mab\x1b[0m", 3), "\x1b[31mab\x1b[0m ");
    }

    #[test_case("abc", 4, "abc ")]
    #[test_case("abcd", 4, "abcd")]
    #[test_case("abcde", 4, "abcde   ")]
    #[test_case("", 3, "   ")]
    fn test_pad_to_multiple(input: &str, width: usize, expected: &str) {
        assert_eq!(pad_to_multiple(input, width), expected);
    }

    #[test]
    fn test_truncate_keeps_trailing_reset() {
        assert_eq!(
            truncate_visible("\x1b[31mhello\x1b[0m", 3),
            "\x1b[31mhel\x1b[0m"
        );
        assert_eq!(truncate_visible("a日", 2), "a");
        assert_eq!(fit_visible("a日", 2), "a ");
        assert_eq!(fit_visible("xy", 4), "xy  ");
    }
}
