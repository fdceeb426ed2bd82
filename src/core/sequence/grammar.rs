//! Wire grammars for every sequence family.
//!
//! Search patterns are unanchored so they can locate sequences inside arbitrary text. The
//! validation regexes wrap the same pattern in `^(?:..)$` so a generated sequence must be
//! exactly one well-formed sequence and nothing else.

use once_cell::sync::Lazy;
use regex::Regex;

use super::SequenceKind;

pub(crate) const ESC_PATTERN: &str = r"\x1b[DEHMNOPVWXZ\[\\\]\^_]";
pub(crate) const CSI_PATTERN: &str = r"(?:\x1b\[|\x{9B})[0-9;:<=>?]*[ -/]*[@-~]";
pub(crate) const CURSOR_POSITION_PATTERN: &str = r"(?:\x1b\[|\x{9B})[0-9]*;[0-9]*H";
pub(crate) const SGR_PATTERN: &str = r"(?:\x1b\[|\x{9B})[0-9;:]*m";
pub(crate) const OSC_PATTERN: &str =
    r"(?:\x1b\]|\x{9D})[^\x07\x1b\x{9C}]*(?:\x07|\x1b\\|\x{9C})";
pub(crate) const APC_PATTERN: &str = r"(?:\x1b_|\x{9F})[^\x07\x1b\x{9C}]*(?:\x1b\\|\x{9C})";
pub(crate) const DCS_PATTERN: &str = r"(?:\x1bP|\x{90})[^\x07\x1b\x{9C}]*(?:\x1b\\|\x{9C})";

fn anchored(pattern: &str) -> Regex {
    Regex::new(&format!("^(?:{pattern})$")).expect("sequence grammar must compile")
}

static ESC: Lazy<Regex> = Lazy::new(|| anchored(ESC_PATTERN));
static CSI: Lazy<Regex> = Lazy::new(|| anchored(CSI_PATTERN));
static CURSOR_POSITION: Lazy<Regex> = Lazy::new(|| anchored(CURSOR_POSITION_PATTERN));
static SGR: Lazy<Regex> = Lazy::new(|| anchored(SGR_PATTERN));
static OSC: Lazy<Regex> = Lazy::new(|| anchored(OSC_PATTERN));
static APC: Lazy<Regex> = Lazy::new(|| anchored(APC_PATTERN));
static DCS: Lazy<Regex> = Lazy::new(|| anchored(DCS_PATTERN));

/// Any sequence family, in the order the scanners should try them.
static ANY: Lazy<Regex> = Lazy::new(|| {
    let joined = [
        OSC_PATTERN,
        APC_PATTERN,
        DCS_PATTERN,
        CSI_PATTERN,
        ESC_PATTERN,
    ]
    .join("|");
    Regex::new(&joined).expect("sequence grammar must compile")
});

pub(crate) fn pattern(kind: SequenceKind) -> &'static str {
    match kind {
        SequenceKind::Esc => ESC_PATTERN,
        SequenceKind::Csi => CSI_PATTERN,
        SequenceKind::CursorPosition => CURSOR_POSITION_PATTERN,
        SequenceKind::Sgr => SGR_PATTERN,
        SequenceKind::Osc => OSC_PATTERN,
        SequenceKind::Apc => APC_PATTERN,
        SequenceKind::Dcs => DCS_PATTERN,
    }
}

pub(crate) fn regex(kind: SequenceKind) -> &'static Regex {
    match kind {
        SequenceKind::Esc => &ESC,
        SequenceKind::Csi => &CSI,
        SequenceKind::CursorPosition => &CURSOR_POSITION,
        SequenceKind::Sgr => &SGR,
        SequenceKind::Osc => &OSC,
        SequenceKind::Apc => &APC,
        SequenceKind::Dcs => &DCS,
    }
}

pub(crate) fn any_sequence() -> &'static Regex {
    &ANY
}
