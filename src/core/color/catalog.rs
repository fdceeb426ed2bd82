//! Named color lookup.
//!
//! Full name tables are data, not logic: callers plug their own catalog in through
//! [`ColorCatalog`]. The builtin catalog only knows the sixteen system colors.

pub trait ColorCatalog: Send + Sync {
    /// Palette index for `name`, if known.
    fn lookup(&self, name: &str) -> Option<u8>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemColors;

const SYSTEM_NAMES: [(&str, u8); 18] = [
    ("black", 0),
    ("maroon", 1),
    ("green", 2),
    ("olive", 3),
    ("navy", 4),
    ("purple", 5),
    ("teal", 6),
    ("silver", 7),
    ("grey", 8),
    ("gray", 8),
    ("red", 9),
    ("lime", 10),
    ("yellow", 11),
    ("blue", 12),
    ("fuchsia", 13),
    ("magenta", 13),
    ("aqua", 14),
    ("white", 15),
];

impl ColorCatalog for SystemColors {
    fn lookup(&self, name: &str) -> Option<u8> {
        let name = name.trim();
        SYSTEM_NAMES
            .iter()
            .find(|(candidate, _)| candidate.eq_ignore_ascii_case(name))
            .map(|(_, index)| *index)
    }
}
