//! Sequence scanning and SGR style tracking.
//!
//! The scanner recognizes every family `core::sequence` can emit, in both the 7-bit `ESC`
//! and the 8-bit C1 introducer forms, so layout code can treat them as zero-width.

use crate::core::sequence::{sgr_codes, ESC, ST};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequenceSpanKind {
    Csi,
    Osc,
    Apc,
    Dcs,
    /// `ESC` plus one character.
    Esc,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequenceSpan<'a> {
    pub code: &'a str,
    /// Length in bytes.
    pub length: usize,
    pub kind: SequenceSpanKind,
}

/// Returns the complete sequence starting at byte `pos`, if there is one.
///
/// Unterminated string sequences are not sequences: they are left to be measured as text.
pub fn extract_sequence(input: &str, pos: usize) -> Option<SequenceSpan<'_>> {
    let mut chars = input.get(pos..)?.chars();
    let first = chars.next()?;
    match first {
        ESC => {
            let second = chars.next()?;
            let body = pos + 1 + second.len_utf8();
            match second {
                '[' => scan_csi(input, pos, body),
                ']' => scan_string(input, pos, body, SequenceSpanKind::Osc),
                '_' => scan_string(input, pos, body, SequenceSpanKind::Apc),
                'P' => scan_string(input, pos, body, SequenceSpanKind::Dcs),
                _ => Some(span(input, pos, body, SequenceSpanKind::Esc)),
            }
        }
        '\u{9b}' => scan_csi(input, pos, pos + first.len_utf8()),
        '\u{9d}' => scan_string(input, pos, pos + first.len_utf8(), SequenceSpanKind::Osc),
        '\u{9f}' => scan_string(input, pos, pos + first.len_utf8(), SequenceSpanKind::Apc),
        '\u{90}' => scan_string(input, pos, pos + first.len_utf8(), SequenceSpanKind::Dcs),
        _ => None,
    }
}

fn span(input: &str, start: usize, end: usize, kind: SequenceSpanKind) -> SequenceSpan<'_> {
    SequenceSpan {
        code: &input[start..end],
        length: end - start,
        kind,
    }
}

fn scan_csi(input: &str, pos: usize, body: usize) -> Option<SequenceSpan<'_>> {
    let bytes = input.as_bytes();
    let mut idx = body;
    while idx < bytes.len() {
        let b = bytes[idx];
        if (0x40..=0x7e).contains(&b) {
            return Some(span(input, pos, idx + 1, SequenceSpanKind::Csi));
        }
        if !(0x20..=0x3f).contains(&b) {
            return None;
        }
        idx += 1;
    }
    None
}

fn scan_string(
    input: &str,
    pos: usize,
    body: usize,
    kind: SequenceSpanKind,
) -> Option<SequenceSpan<'_>> {
    let rest = input.get(body..)?;
    for (offset, ch) in rest.char_indices() {
        let at = body + offset;
        match ch {
            '\x07' if kind == SequenceSpanKind::Osc => {
                return Some(span(input, pos, at + 1, kind));
            }
            ST => return Some(span(input, pos, at + ST.len_utf8(), kind)),
            ESC => {
                if rest[offset + 1..].starts_with('\\') {
                    return Some(span(input, pos, at + 2, kind));
                }
                return None;
            }
            _ => {}
        }
    }
    None
}

/// Byte index of the next sequence start (or the end of `input`) at or after `idx`.
pub fn next_sequence_or_end(input: &str, mut idx: usize) -> usize {
    while idx < input.len() {
        if extract_sequence(input, idx).is_some() {
            break;
        }
        match input[idx..].chars().next() {
            Some(ch) => idx += ch.len_utf8(),
            None => break,
        }
    }
    idx
}

/// `input` with every recognized sequence removed.
pub fn strip_sequences(input: &str) -> String {
    let mut clean = String::with_capacity(input.len());
    let mut idx = 0;
    while idx < input.len() {
        if let Some(code) = extract_sequence(input, idx) {
            idx += code.length;
            continue;
        }
        let end = next_sequence_or_end(input, idx);
        if end == idx {
            break;
        }
        clean.push_str(&input[idx..end]);
        idx = end;
    }
    clean
}

/// SGR state accumulated while walking styled text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct TextStyle {
    bold: bool,
    dim: bool,
    italic: bool,
    underline: bool,
    blink: bool,
    inverse: bool,
    hidden: bool,
    strikethrough: bool,
    fg_color: Option<String>,
    bg_color: Option<String>,
}

impl TextStyle {
    /// Applies one sequence. Anything that is not SGR is ignored.
    pub fn process(&mut self, code: &str) {
        let Some(params) = code
            .strip_prefix("\x1b[")
            .or_else(|| code.strip_prefix('\u{9b}'))
            .and_then(|rest| rest.strip_suffix('m'))
        else {
            return;
        };

        if params.is_empty() || params == "0" {
            self.reset();
            return;
        }

        let parts: Vec<&str> = params.split(';').collect();
        let mut idx = 0;
        while idx < parts.len() {
            let code = parts[idx].parse::<u16>().unwrap_or(0);
            if code == 38 || code == 48 {
                let width = match parts.get(idx + 1) {
                    Some(&"5") => 3,
                    Some(&"2") => 5,
                    _ => 0,
                };
                if width > 0 && idx + width <= parts.len() {
                    let color = parts[idx..idx + width].join(";");
                    if code == 38 {
                        self.fg_color = Some(color);
                    } else {
                        self.bg_color = Some(color);
                    }
                    idx += width;
                    continue;
                }
            }

            match code {
                0 => self.reset(),
                1 => self.bold = true,
                2 => self.dim = true,
                3 => self.italic = true,
                4 => self.underline = true,
                5 => self.blink = true,
                7 => self.inverse = true,
                8 => self.hidden = true,
                9 => self.strikethrough = true,
                21 => self.bold = false,
                22 => {
                    self.bold = false;
                    self.dim = false;
                }
                23 => self.italic = false,
                24 => self.underline = false,
                25 => self.blink = false,
                27 => self.inverse = false,
                28 => self.hidden = false,
                29 => self.strikethrough = false,
                39 => self.fg_color = None,
                49 => self.bg_color = None,
                30..=37 | 90..=97 => self.fg_color = Some(code.to_string()),
                40..=47 | 100..=107 => self.bg_color = Some(code.to_string()),
                _ => {}
            }
            idx += 1;
        }
    }

    /// Runs every sequence in `text` through [`TextStyle::process`].
    pub fn absorb(&mut self, text: &str) {
        let mut idx = 0;
        while idx < text.len() {
            if let Some(code) = extract_sequence(text, idx) {
                self.process(code.code);
                idx += code.length;
            } else {
                let next = next_sequence_or_end(text, idx);
                if next == idx {
                    break;
                }
                idx = next;
            }
        }
    }

    pub fn is_plain(&self) -> bool {
        *self == Self::default()
    }

    pub fn foreground(&self) -> Option<&str> {
        self.fg_color.as_deref()
    }

    pub fn background(&self) -> Option<&str> {
        self.bg_color.as_deref()
    }

    /// One SGR sequence that recreates this style from a reset state, or `""` when plain.
    pub fn active_codes(&self) -> String {
        let mut codes: Vec<String> = Vec::new();
        let flags = [
            (self.bold, 1u16),
            (self.dim, 2),
            (self.italic, 3),
            (self.underline, 4),
            (self.blink, 5),
            (self.inverse, 7),
            (self.hidden, 8),
            (self.strikethrough, 9),
        ];
        for (enabled, code) in flags {
            if enabled {
                codes.push(code.to_string());
            }
        }
        if let Some(color) = self.fg_color.as_ref() {
            codes.push(color.clone());
        }
        if let Some(color) = self.bg_color.as_ref() {
            codes.push(color.clone());
        }

        if codes.is_empty() {
            return String::new();
        }
        format!("\x1b[{}m", codes.join(";"))
    }

    /// Sequence that closes attributes which would otherwise bleed past a line end.
    pub fn line_end_reset(&self) -> String {
        if self.underline {
            return sgr_codes(&[24]);
        }
        String::new()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scans_seven_and_eight_bit_forms() {
        let csi = extract_sequence("\x1b[31mx", 0).unwrap();
        assert_eq!((csi.code, csi.kind), ("\x1b[31m", SequenceSpanKind::Csi));

        let c1 = extract_sequence("\u{9b}2Jx", 0).unwrap();
        assert_eq!(c1.code, "\u{9b}2J");

        let osc = extract_sequence("\x1b]0;t\x07x", 0).unwrap();
        assert_eq!(osc.kind, SequenceSpanKind::Osc);
        assert_eq!(osc.length, 6);

        let apc = extract_sequence("\u{9f}data\u{9c}x", 0).unwrap();
        assert_eq!(apc.kind, SequenceSpanKind::Apc);

        let esc = extract_sequence("\x1bMx", 0).unwrap();
        assert_eq!((esc.code, esc.kind), ("\x1bM", SequenceSpanKind::Esc));
    }

    #[test]
    fn apc_does_not_end_at_bell() {
        assert!(extract_sequence("\x1b_ab\x07cd", 0).is_none());
        assert_eq!(
            extract_sequence("\x1b_ab\x07cd\x1b\\", 0).unwrap().code,
            "\x1b_ab\x07cd\x1b\\"
        );
    }

    #[test]
    fn unterminated_strings_are_not_sequences() {
        assert!(extract_sequence("\x1b]8;;http", 0).is_none());
    }

    #[test]
    fn tracks_true_color_and_resets() {
        let mut style = TextStyle::default();
        style.process("\x1b[1;38;2;1;2;3m");
        style.process("\x1b[48;5;9m");
        assert_eq!(style.active_codes(), "\x1b[1;38;2;1;2;3;48;5;9m");
        style.process("\x1b[39m");
        assert_eq!(style.foreground(), None);
        style.process("\x1b[0m");
        assert!(style.is_plain());
    }

    #[test]
    fn absorb_walks_mixed_text() {
        let mut style = TextStyle::default();
        style.absorb("héllo \x1b[4mworld\x1b[31m!");
        assert_eq!(style.active_codes(), "\x1b[4;31m");
        assert_eq!(style.line_end_reset(), "\x1b[24m");
    }
}
