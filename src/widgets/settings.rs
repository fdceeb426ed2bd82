//! Option sets shared by the framed widgets.

use crate::core::color::Color;
use crate::core::text::Alignment;

/// One glyph slot of a border.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BorderPart {
    UpperLeftCorner,
    UpperRightCorner,
    LowerLeftCorner,
    LowerRightCorner,
    UpperFrame,
    LowerFrame,
    LeftFrame,
    RightFrame,
    /// `├`: a horizontal line leaving the left edge.
    LeftHorizontalIntersection,
    /// `┤`: a horizontal line reaching the right edge.
    RightHorizontalIntersection,
    HorizontalIntersection,
    TopVerticalIntersection,
    BottomVerticalIntersection,
    VerticalIntersection,
    WholeIntersection,
}

impl BorderPart {
    pub const ALL: [BorderPart; 15] = [
        BorderPart::UpperLeftCorner,
        BorderPart::UpperRightCorner,
        BorderPart::LowerLeftCorner,
        BorderPart::LowerRightCorner,
        BorderPart::UpperFrame,
        BorderPart::LowerFrame,
        BorderPart::LeftFrame,
        BorderPart::RightFrame,
        BorderPart::LeftHorizontalIntersection,
        BorderPart::RightHorizontalIntersection,
        BorderPart::HorizontalIntersection,
        BorderPart::TopVerticalIntersection,
        BorderPart::BottomVerticalIntersection,
        BorderPart::VerticalIntersection,
        BorderPart::WholeIntersection,
    ];

    fn slot(self) -> usize {
        self as usize
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct BorderGlyph {
    glyph: char,
    enabled: bool,
}

/// Glyph and enable flag for every corner, edge and intersection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BorderSettings {
    glyphs: [BorderGlyph; 15],
}

impl Default for BorderSettings {
    fn default() -> Self {
        Self::rounded()
    }
}

impl BorderSettings {
    /// Builds a set from glyphs listed in [`BorderPart::ALL`] order, all enabled.
    pub fn from_glyphs(glyphs: [char; 15]) -> Self {
        Self {
            glyphs: glyphs.map(|glyph| BorderGlyph {
                glyph,
                enabled: true,
            }),
        }
    }

    pub fn rounded() -> Self {
        Self::from_glyphs([
            '╭', '╮', '╰', '╯', '─', '─', '│', '│', '├', '┤', '─', '┬', '┴', '│', '┼',
        ])
    }

    pub fn thin() -> Self {
        Self::from_glyphs([
            '┌', '┐', '└', '┘', '─', '─', '│', '│', '├', '┤', '─', '┬', '┴', '│', '┼',
        ])
    }

    pub fn double() -> Self {
        Self::from_glyphs([
            '╔', '╗', '╚', '╝', '═', '═', '║', '║', '╠', '╣', '═', '╦', '╩', '║', '╬',
        ])
    }

    /// Double outer edge with thin inner separators.
    pub fn double_edge() -> Self {
        Self::from_glyphs([
            '╔', '╗', '╚', '╝', '═', '═', '║', '║', '╟', '╢', '─', '╤', '╧', '│', '┼',
        ])
    }

    pub fn ascii() -> Self {
        Self::from_glyphs([
            '+', '+', '+', '+', '-', '-', '|', '|', '+', '+', '-', '+', '+', '|', '+',
        ])
    }

    /// The glyph for `part`, or `None` when the part is disabled.
    pub fn glyph(&self, part: BorderPart) -> Option<char> {
        let slot = self.glyphs[part.slot()];
        slot.enabled.then_some(slot.glyph)
    }

    /// The glyph for `part` regardless of its enable flag.
    pub fn raw_glyph(&self, part: BorderPart) -> char {
        self.glyphs[part.slot()].glyph
    }

    pub fn is_enabled(&self, part: BorderPart) -> bool {
        self.glyphs[part.slot()].enabled
    }

    pub fn set_glyph(&mut self, part: BorderPart, glyph: char) {
        self.glyphs[part.slot()].glyph = glyph;
    }

    pub fn set_enabled(&mut self, part: BorderPart, enabled: bool) {
        self.glyphs[part.slot()].enabled = enabled;
    }

    pub fn with_glyph(mut self, part: BorderPart, glyph: char) -> Self {
        self.set_glyph(part, glyph);
        self
    }

    pub fn with_enabled(mut self, part: BorderPart, enabled: bool) -> Self {
        self.set_enabled(part, enabled);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TextSettings {
    pub alignment: Alignment,
    pub title_alignment: Alignment,
}

impl TextSettings {
    pub fn aligned(alignment: Alignment) -> Self {
        Self {
            alignment,
            title_alignment: alignment,
        }
    }
}

/// Colors of a framed widget. Unset entries fall back to the render context defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrameColors {
    pub frame: Option<Color>,
    pub title: Option<Color>,
    pub text: Option<Color>,
    pub background: Option<Color>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_set_is_rounded() {
        let settings = BorderSettings::default();
        let glyphs: String = BorderPart::ALL
            .iter()
            .filter_map(|part| settings.glyph(*part))
            .collect();
        assert_eq!(glyphs, "╭╮╰╯──││├┤─┬┴│┼");
    }

    #[test]
    fn disabled_parts_hide_their_glyph() {
        let settings = BorderSettings::default()
            .with_enabled(BorderPart::UpperFrame, false)
            .with_glyph(BorderPart::LowerFrame, '=');
        assert_eq!(settings.glyph(BorderPart::UpperFrame), None);
        assert_eq!(settings.raw_glyph(BorderPart::UpperFrame), '─');
        assert_eq!(settings.glyph(BorderPart::LowerFrame), Some('='));
    }
}
