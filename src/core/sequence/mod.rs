//! Control-sequence construction and validation.
//!
//! Every family has a `generate` path and a grammar exposed through [`regex`]. `generate`
//! re-checks its own output against that grammar, so a payload smuggling a terminator (or any
//! other parameter that breaks the sequence shape) is rejected instead of leaking onto the
//! wire.

mod csi;
mod grammar;

pub use csi::{
    cursor_position, erase_display, esc, hide_cursor, reset_style, sgr_codes, show_cursor,
    CURSOR_HOME, ERASE_DISPLAY, HIDE_CURSOR, RESET_BACKGROUND, RESET_FOREGROUND, RESET_STYLE,
    SHOW_CURSOR,
};

use regex::Regex;

use crate::core::coordinate::Coordinate;
use crate::error::SequenceError;

pub const ESC: char = '\x1b';
pub const BEL: char = '\x07';
/// 8-bit String Terminator.
pub const ST: char = '\u{9c}';
const CSI_C1: char = '\u{9b}';
const OSC_C1: char = '\u{9d}';
const APC_C1: char = '\u{9f}';
const DCS_C1: char = '\u{90}';

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SequenceKind {
    /// `ESC` followed by a single final character.
    Esc,
    /// Generic CSI: parameters and a final byte.
    Csi,
    /// CSI `row ; col H`.
    CursorPosition,
    /// CSI `params m` (select graphic rendition).
    Sgr,
    Osc,
    Apc,
    Dcs,
}

impl SequenceKind {
    pub const ALL: [SequenceKind; 7] = [
        SequenceKind::Esc,
        SequenceKind::Csi,
        SequenceKind::CursorPosition,
        SequenceKind::Sgr,
        SequenceKind::Osc,
        SequenceKind::Apc,
        SequenceKind::Dcs,
    ];

    fn is_string(self) -> bool {
        matches!(self, SequenceKind::Osc | SequenceKind::Apc | SequenceKind::Dcs)
    }
}

/// How a string-delimited sequence (OSC/APC/DCS) is closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StringTerminator {
    /// `BEL` (0x07). Only OSC accepts it.
    Bell,
    /// 7-bit introducer closed by `ESC \`.
    EscBackslash,
    /// 8-bit introducer closed by `0x9C`.
    C1,
}

/// The single-character `ESC` commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EscCommand {
    Index,
    NextLine,
    TabSet,
    ReverseIndex,
    SingleShift2,
    SingleShift3,
    DeviceControlString,
    StartGuardedArea,
    EndGuardedArea,
    StartOfString,
    ReturnTerminalId,
    ControlSequenceIntroducer,
    StringTerminator,
    OperatingSystemCommand,
    PrivacyMessage,
    ApplicationProgramCommand,
}

impl EscCommand {
    pub const ALL: [EscCommand; 16] = [
        EscCommand::Index,
        EscCommand::NextLine,
        EscCommand::TabSet,
        EscCommand::ReverseIndex,
        EscCommand::SingleShift2,
        EscCommand::SingleShift3,
        EscCommand::DeviceControlString,
        EscCommand::StartGuardedArea,
        EscCommand::EndGuardedArea,
        EscCommand::StartOfString,
        EscCommand::ReturnTerminalId,
        EscCommand::ControlSequenceIntroducer,
        EscCommand::StringTerminator,
        EscCommand::OperatingSystemCommand,
        EscCommand::PrivacyMessage,
        EscCommand::ApplicationProgramCommand,
    ];

    pub fn final_char(self) -> char {
        match self {
            EscCommand::Index => 'D',
            EscCommand::NextLine => 'E',
            EscCommand::TabSet => 'H',
            EscCommand::ReverseIndex => 'M',
            EscCommand::SingleShift2 => 'N',
            EscCommand::SingleShift3 => 'O',
            EscCommand::DeviceControlString => 'P',
            EscCommand::StartGuardedArea => 'V',
            EscCommand::EndGuardedArea => 'W',
            EscCommand::StartOfString => 'X',
            EscCommand::ReturnTerminalId => 'Z',
            EscCommand::ControlSequenceIntroducer => '[',
            EscCommand::StringTerminator => '\\',
            EscCommand::OperatingSystemCommand => ']',
            EscCommand::PrivacyMessage => '^',
            EscCommand::ApplicationProgramCommand => '_',
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Terminator {
    None,
    Final(char),
    String(StringTerminator),
}

/// A logical control sequence: `{kind, parameters, terminator}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EscapeSequence {
    kind: SequenceKind,
    parameters: Vec<String>,
    terminator: Terminator,
}

impl EscapeSequence {
    pub fn new(kind: SequenceKind, parameters: Vec<String>, terminator: Terminator) -> Self {
        Self {
            kind,
            parameters,
            terminator,
        }
    }

    pub fn esc(command: EscCommand) -> Self {
        Self::new(
            SequenceKind::Esc,
            vec![command.final_char().to_string()],
            Terminator::None,
        )
    }

    pub fn csi<I, P>(parameters: I, final_byte: char) -> Self
    where
        I: IntoIterator<Item = P>,
        P: ToString,
    {
        Self::new(
            SequenceKind::Csi,
            parameters.into_iter().map(|p| p.to_string()).collect(),
            Terminator::Final(final_byte),
        )
    }

    /// Cursor move to a 0-based coordinate.
    pub fn cursor_position(at: Coordinate) -> Self {
        Self::new(
            SequenceKind::CursorPosition,
            vec![
                (u32::from(at.y) + 1).to_string(),
                (u32::from(at.x) + 1).to_string(),
            ],
            Terminator::Final('H'),
        )
    }

    pub fn sgr<I, P>(parameters: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: ToString,
    {
        Self::new(
            SequenceKind::Sgr,
            parameters.into_iter().map(|p| p.to_string()).collect(),
            Terminator::Final('m'),
        )
    }

    pub fn osc(payload: impl Into<String>, terminator: StringTerminator) -> Self {
        Self::string(SequenceKind::Osc, payload, terminator)
    }

    pub fn apc(payload: impl Into<String>, terminator: StringTerminator) -> Self {
        Self::string(SequenceKind::Apc, payload, terminator)
    }

    pub fn dcs(payload: impl Into<String>, terminator: StringTerminator) -> Self {
        Self::string(SequenceKind::Dcs, payload, terminator)
    }

    fn string(kind: SequenceKind, payload: impl Into<String>, terminator: StringTerminator) -> Self {
        Self::new(
            kind,
            vec![payload.into()],
            Terminator::String(terminator),
        )
    }

    pub fn kind(&self) -> SequenceKind {
        self.kind
    }

    pub fn parameters(&self) -> &[String] {
        &self.parameters
    }

    pub fn terminator(&self) -> Terminator {
        self.terminator
    }

    pub fn generate(&self) -> Result<String, SequenceError> {
        generate(self)
    }
}

/// Builds the wire text for `sequence` and validates it against [`regex`] for its kind.
pub fn generate(sequence: &EscapeSequence) -> Result<String, SequenceError> {
    let kind = sequence.kind;
    let rendered = match (kind, sequence.terminator) {
        (SequenceKind::Esc, _) => {
            let [command] = sequence.parameters.as_slice() else {
                return Err(SequenceError::ParameterCount {
                    kind,
                    expected: 1,
                    actual: sequence.parameters.len(),
                });
            };
            format!("{ESC}{command}")
        }
        (SequenceKind::CursorPosition, _) => {
            let [row, column] = sequence.parameters.as_slice() else {
                return Err(SequenceError::ParameterCount {
                    kind,
                    expected: 2,
                    actual: sequence.parameters.len(),
                });
            };
            format!("{ESC}[{row};{column}H")
        }
        (SequenceKind::Sgr, _) => format!("{ESC}[{}m", sequence.parameters.join(";")),
        (SequenceKind::Csi, Terminator::Final(final_byte)) => {
            if !('@'..='~').contains(&final_byte) {
                return Err(SequenceError::InvalidFinalByte(final_byte));
            }
            format!("{ESC}[{}{final_byte}", sequence.parameters.join(";"))
        }
        (SequenceKind::Csi, _) => return Err(SequenceError::MissingTerminator(kind)),
        (_, Terminator::String(terminator)) if kind.is_string() => {
            string_sequence(kind, &sequence.parameters.join(";"), terminator)?
        }
        (_, _) => return Err(SequenceError::MissingTerminator(kind)),
    };

    if !regex(kind).is_match(&rendered) {
        return Err(SequenceError::GrammarMismatch { kind, rendered });
    }
    Ok(rendered)
}

fn string_sequence(
    kind: SequenceKind,
    payload: &str,
    terminator: StringTerminator,
) -> Result<String, SequenceError> {
    let (seven_bit, eight_bit) = match kind {
        SequenceKind::Osc => (']', OSC_C1),
        SequenceKind::Apc => ('_', APC_C1),
        _ => ('P', DCS_C1),
    };
    let text = match terminator {
        StringTerminator::Bell if kind == SequenceKind::Osc => {
            format!("{ESC}{seven_bit}{payload}{BEL}")
        }
        StringTerminator::Bell => {
            return Err(SequenceError::UnsupportedTerminator { kind, terminator })
        }
        StringTerminator::EscBackslash => format!("{ESC}{seven_bit}{payload}{ESC}\\"),
        StringTerminator::C1 => format!("{eight_bit}{payload}{ST}"),
    };
    Ok(text)
}

/// Operating system command, e.g. a window title (`0;title`) or hyperlink (`8;;url`).
pub fn osc(payload: &str, terminator: StringTerminator) -> Result<String, SequenceError> {
    EscapeSequence::osc(payload, terminator).generate()
}

pub fn apc(payload: &str, terminator: StringTerminator) -> Result<String, SequenceError> {
    EscapeSequence::apc(payload, terminator).generate()
}

pub fn dcs(payload: &str, terminator: StringTerminator) -> Result<String, SequenceError> {
    EscapeSequence::dcs(payload, terminator).generate()
}

/// Anchored grammar for `kind`: matches exactly one complete sequence.
pub fn regex(kind: SequenceKind) -> &'static Regex {
    grammar::regex(kind)
}

/// Unanchored grammar for `kind`, suitable for searching inside text.
pub fn pattern(kind: SequenceKind) -> &'static str {
    grammar::pattern(kind)
}

/// Finds every control sequence of any supported family in `text`.
pub fn find_all(text: &str) -> impl Iterator<Item = regex::Match<'_>> + '_ {
    grammar::any_sequence().find_iter(text)
}

/// Removes every supported control sequence from `text`.
pub fn strip(text: &str) -> String {
    grammar::any_sequence().replace_all(text, "").into_owned()
}

pub(crate) fn is_c1_introducer(ch: char) -> bool {
    matches!(ch, CSI_C1 | OSC_C1 | APC_C1 | DCS_C1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cursor_position_is_one_based_row_then_column() {
        let text = generate(&EscapeSequence::cursor_position(Coordinate::new(4, 9))).unwrap();
        assert_eq!(text, "\x1b[10;5H");
        assert!(regex(SequenceKind::CursorPosition).is_match(&text));
    }

    #[test]
    fn every_esc_command_matches_its_grammar() {
        for command in EscCommand::ALL {
            let text = EscapeSequence::esc(command).generate().unwrap();
            assert_eq!(text.chars().count(), 2);
            assert!(regex(SequenceKind::Esc).is_match(&text), "{command:?}");
        }
    }

    #[test]
    fn osc_accepts_every_terminator() {
        for terminator in [
            StringTerminator::Bell,
            StringTerminator::EscBackslash,
            StringTerminator::C1,
        ] {
            let text = EscapeSequence::osc("0;title", terminator).generate().unwrap();
            assert!(regex(SequenceKind::Osc).is_match(&text));
        }
    }

    #[test]
    fn apc_rejects_bell_terminator() {
        let err = EscapeSequence::apc("payload", StringTerminator::Bell)
            .generate()
            .unwrap_err();
        assert!(matches!(err, SequenceError::UnsupportedTerminator { .. }));
    }

    #[test]
    fn embedded_terminator_breaks_out_and_is_rejected() {
        let err = EscapeSequence::osc("evil\x07\x1b[2J", StringTerminator::Bell)
            .generate()
            .unwrap_err();
        assert!(matches!(err, SequenceError::GrammarMismatch { .. }));

        let err = EscapeSequence::apc("a\x1b\\b", StringTerminator::EscBackslash)
            .generate()
            .unwrap_err();
        assert!(matches!(err, SequenceError::GrammarMismatch { .. }));
    }

    #[test]
    fn dcs_eight_bit_form() {
        let text = EscapeSequence::dcs("$q\"p", StringTerminator::C1)
            .generate()
            .unwrap();
        assert!(text.starts_with('\u{90}'));
        assert!(text.ends_with(ST));
        assert!(regex(SequenceKind::Dcs).is_match(&text));
    }

    #[test]
    fn csi_rejects_bad_final_byte() {
        let err = EscapeSequence::csi(["2"], '\n').generate().unwrap_err();
        assert_eq!(err, SequenceError::InvalidFinalByte('\n'));
    }

    #[test]
    fn sgr_with_non_numeric_parameter_is_rejected() {
        let err = EscapeSequence::sgr(["38", "x"]).generate().unwrap_err();
        assert!(matches!(err, SequenceError::GrammarMismatch { .. }));
    }

    #[test]
    fn strip_removes_all_families() {
        let text = format!(
            "a{}b\x1b]0;t\x07c\x1b_x\x1b\\d{}e\x1bMf",
            cursor_position(Coordinate::new(0, 0)),
            sgr_codes(&[1, 31])
        );
        assert_eq!(strip(&text), "abcdef");
    }
}
