//! Numeric CSI helpers used on the hot render path.
//!
//! These take only integers, so they cannot produce malformed output; the grammar check runs
//! under `debug_assert!` instead of returning a `Result`.

use crate::core::coordinate::Coordinate;

use super::{grammar, EscCommand, SequenceKind, ESC};

pub const RESET_STYLE: &str = "\x1b[0m";
pub const RESET_FOREGROUND: &str = "\x1b[39m";
pub const RESET_BACKGROUND: &str = "\x1b[49m";
pub const ERASE_DISPLAY: &str = "\x1b[2J";
pub const CURSOR_HOME: &str = "\x1b[H";
pub const HIDE_CURSOR: &str = "\x1b[?25l";
pub const SHOW_CURSOR: &str = "\x1b[?25h";

/// `ESC [ row ; col H` for a 0-based coordinate.
pub fn cursor_position(at: Coordinate) -> String {
    let text = format!("{ESC}[{};{}H", u32::from(at.y) + 1, u32::from(at.x) + 1);
    debug_assert!(grammar::regex(SequenceKind::CursorPosition).is_match(&text));
    text
}

pub fn sgr_codes(codes: &[u16]) -> String {
    let mut text = String::with_capacity(2 + codes.len() * 4);
    text.push(ESC);
    text.push('[');
    for (idx, code) in codes.iter().enumerate() {
        if idx > 0 {
            text.push(';');
        }
        text.push_str(&code.to_string());
    }
    text.push('m');
    debug_assert!(grammar::regex(SequenceKind::Sgr).is_match(&text));
    text
}

pub fn reset_style() -> &'static str {
    RESET_STYLE
}

pub fn erase_display() -> &'static str {
    ERASE_DISPLAY
}

pub fn hide_cursor() -> &'static str {
    HIDE_CURSOR
}

pub fn show_cursor() -> &'static str {
    SHOW_CURSOR
}

pub fn esc(command: EscCommand) -> String {
    let text = format!("{ESC}{}", command.final_char());
    debug_assert!(grammar::regex(SequenceKind::Esc).is_match(&text));
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::sequence::regex;

    #[test]
    fn constants_match_their_grammars() {
        for sgr in [RESET_STYLE, RESET_FOREGROUND, RESET_BACKGROUND] {
            assert!(regex(SequenceKind::Sgr).is_match(sgr));
        }
        for csi in [ERASE_DISPLAY, CURSOR_HOME, HIDE_CURSOR, SHOW_CURSOR] {
            assert!(regex(SequenceKind::Csi).is_match(csi));
        }
    }

    #[test]
    fn sgr_codes_joins_with_semicolons() {
        assert_eq!(sgr_codes(&[38, 2, 1, 2, 3]), "\x1b[38;2;1;2;3m");
        assert_eq!(sgr_codes(&[]), "\x1b[m");
    }

    #[test]
    fn cursor_position_handles_grid_extremes() {
        assert_eq!(cursor_position(Coordinate::new(0, 0)), "\x1b[1;1H");
        assert_eq!(
            cursor_position(Coordinate::new(u16::MAX, u16::MAX)),
            "\x1b[65536;65536H"
        );
    }
}
