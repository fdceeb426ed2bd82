//! Color model.
//!
//! A [`Color`] remembers the space it was requested in but always resolves to RGB, which is
//! what equality, hashing and gradients operate on. The foreground/background sequences are
//! rendered once at construction.

mod catalog;
mod convert;
mod gradient;

pub use catalog::{ColorCatalog, SystemColors};
pub use convert::{nearest_palette_index, palette_rgb, Cmyk, Hsl};
pub use gradient::{gradient, multi_stop, shades, tints};

use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use crate::core::sequence::{sgr_codes, RESET_BACKGROUND, RESET_FOREGROUND};
use crate::error::ColorError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// The space a color was requested in.
#[derive(Debug, Clone, PartialEq)]
pub enum ColorSpace {
    Indexed(u8),
    Rgb,
    Cmyk(Cmyk),
    Hsl(Hsl),
    Named { name: String, index: u8 },
}

/// Output depth a render context allows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorDepth {
    #[default]
    TrueColor,
    Palette256,
}

#[derive(Debug, Clone)]
pub struct Color {
    rgb: Rgb,
    origin: ColorSpace,
    foreground: String,
    background: String,
}

impl Color {
    fn build(rgb: Rgb, origin: ColorSpace) -> Self {
        let (foreground, background) = match &origin {
            ColorSpace::Indexed(index) | ColorSpace::Named { index, .. } => {
                indexed_sequences(*index)
            }
            _ => true_color_sequences(rgb),
        };
        Self {
            rgb,
            origin,
            foreground,
            background,
        }
    }

    pub fn indexed(index: u8) -> Self {
        Self::build(palette_rgb(index), ColorSpace::Indexed(index))
    }

    pub fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::build(Rgb::new(r, g, b), ColorSpace::Rgb)
    }

    pub fn from_rgb(rgb: Rgb) -> Self {
        Self::build(rgb, ColorSpace::Rgb)
    }

    /// Components in `0..=100`.
    pub fn cmyk(c: f64, m: f64, y: f64, k: f64) -> Result<Self, ColorError> {
        for (component, value) in [("cyan", c), ("magenta", m), ("yellow", y), ("key", k)] {
            check_range(component, value, 100.0)?;
        }
        let cmyk = Cmyk { c, m, y, k };
        Ok(Self::build(convert::cmyk_to_rgb(cmyk), ColorSpace::Cmyk(cmyk)))
    }

    /// Hue in degrees, saturation and lightness in `0..=100`.
    pub fn hsl(h: f64, s: f64, l: f64) -> Result<Self, ColorError> {
        check_range("hue", h, 360.0)?;
        check_range("saturation", s, 100.0)?;
        check_range("lightness", l, 100.0)?;
        let hsl = Hsl { h, s, l };
        Ok(Self::build(convert::hsl_to_rgb(hsl), ColorSpace::Hsl(hsl)))
    }

    pub fn named(name: &str, catalog: &dyn ColorCatalog) -> Result<Self, ColorError> {
        let index = catalog
            .lookup(name)
            .ok_or_else(|| ColorError::UnknownName(name.to_string()))?;
        Ok(Self::build(
            palette_rgb(index),
            ColorSpace::Named {
                name: name.trim().to_string(),
                index,
            },
        ))
    }

    pub fn resolved(&self) -> Rgb {
        self.rgb
    }

    pub fn origin(&self) -> &ColorSpace {
        &self.origin
    }

    pub fn as_cmyk(&self) -> Cmyk {
        convert::rgb_to_cmyk(self.rgb)
    }

    pub fn as_hsl(&self) -> Hsl {
        convert::rgb_to_hsl(self.rgb)
    }

    /// Formats the color back in the form it was requested in.
    pub fn specifier(&self) -> String {
        match &self.origin {
            ColorSpace::Indexed(index) => index.to_string(),
            ColorSpace::Rgb => format!("{};{};{}", self.rgb.r, self.rgb.g, self.rgb.b),
            ColorSpace::Cmyk(cmyk) => {
                format!("cmyk:{};{};{};{}", cmyk.c, cmyk.m, cmyk.y, cmyk.k)
            }
            ColorSpace::Hsl(hsl) => format!("hsl:{};{};{}", hsl.h, hsl.s, hsl.l),
            ColorSpace::Named { name, .. } => name.clone(),
        }
    }

    pub fn hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.rgb.r, self.rgb.g, self.rgb.b)
    }

    pub fn render_foreground(&self) -> &str {
        &self.foreground
    }

    pub fn render_background(&self) -> &str {
        &self.background
    }

    /// Both default colors restored.
    pub fn render_reset() -> String {
        format!("{RESET_FOREGROUND}{RESET_BACKGROUND}")
    }

    pub fn reset_foreground() -> &'static str {
        RESET_FOREGROUND
    }

    pub fn reset_background() -> &'static str {
        RESET_BACKGROUND
    }

    pub fn render_foreground_at(&self, depth: ColorDepth) -> String {
        match (depth, &self.origin) {
            (ColorDepth::Palette256, ColorSpace::Rgb | ColorSpace::Cmyk(_) | ColorSpace::Hsl(_)) => {
                indexed_sequences(nearest_palette_index(self.rgb)).0
            }
            _ => self.foreground.clone(),
        }
    }

    pub fn render_background_at(&self, depth: ColorDepth) -> String {
        match (depth, &self.origin) {
            (ColorDepth::Palette256, ColorSpace::Rgb | ColorSpace::Cmyk(_) | ColorSpace::Hsl(_)) => {
                indexed_sequences(nearest_palette_index(self.rgb)).1
            }
            _ => self.background.clone(),
        }
    }

    /// Perceived brightness check used to pick readable text over a background.
    pub fn is_dark(&self) -> bool {
        let Rgb { r, g, b } = self.rgb;
        let luma = 0.299 * f64::from(r) + 0.587 * f64::from(g) + 0.114 * f64::from(b);
        luma < 128.0
    }
}

fn check_range(component: &'static str, value: f64, max: f64) -> Result<(), ColorError> {
    if !(0.0..=max).contains(&value) {
        return Err(ColorError::OutOfRange { component, value });
    }
    Ok(())
}

fn indexed_sequences(index: u8) -> (String, String) {
    let index = u16::from(index);
    (sgr_codes(&[38, 5, index]), sgr_codes(&[48, 5, index]))
}

fn true_color_sequences(rgb: Rgb) -> (String, String) {
    let (r, g, b) = (u16::from(rgb.r), u16::from(rgb.g), u16::from(rgb.b));
    (sgr_codes(&[38, 2, r, g, b]), sgr_codes(&[48, 2, r, g, b]))
}

impl PartialEq for Color {
    fn eq(&self, other: &Self) -> bool {
        self.rgb == other.rgb
    }
}

impl Eq for Color {}

impl Hash for Color {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.rgb.hash(state);
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.specifier())
    }
}

impl From<Rgb> for Color {
    fn from(rgb: Rgb) -> Self {
        Self::from_rgb(rgb)
    }
}

impl FromStr for Color {
    type Err = ColorError;

    /// Accepts `R;G;B`, `#RRGGBB`, `#RGB`, `cmyk:C;M;Y;K`, `hsl:H;S;L`, a palette number or
    /// a system color name.
    fn from_str(spec: &str) -> Result<Self, Self::Err> {
        let spec = spec.trim();
        if spec.is_empty() {
            return Err(ColorError::Empty);
        }

        if let Some(hex) = spec.strip_prefix('#') {
            return parse_hex(hex).ok_or_else(|| ColorError::Unrecognized(spec.to_string()));
        }

        let lower = spec.to_ascii_lowercase();
        if let Some(rest) = lower.strip_prefix("cmyk:") {
            let [c, m, y, k] = parse_components::<4>(rest, spec)?;
            return Self::cmyk(c, m, y, k);
        }
        if let Some(rest) = lower.strip_prefix("hsl:") {
            let [h, s, l] = parse_components::<3>(rest, spec)?;
            return Self::hsl(h, s, l);
        }

        if spec.contains(';') {
            let [r, g, b] = parse_channels(spec)?;
            return Ok(Self::rgb(r, g, b));
        }

        if spec.chars().all(|ch| ch.is_ascii_digit()) {
            let value: u32 = spec
                .parse()
                .map_err(|_| ColorError::Unrecognized(spec.to_string()))?;
            let index = u8::try_from(value).map_err(|_| ColorError::OutOfRange {
                component: "index",
                value: f64::from(value),
            })?;
            return Ok(Self::indexed(index));
        }

        Self::named(spec, &SystemColors)
    }
}

fn parse_components<const N: usize>(text: &str, spec: &str) -> Result<[f64; N], ColorError> {
    let parts: Vec<&str> = text.split(';').collect();
    if parts.len() != N {
        return Err(ColorError::Unrecognized(spec.to_string()));
    }
    let mut values = [0.0; N];
    for (slot, part) in values.iter_mut().zip(parts) {
        *slot = part
            .trim()
            .parse::<f64>()
            .map_err(|_| ColorError::Unrecognized(spec.to_string()))?;
    }
    Ok(values)
}

/// Whole-number `R;G;B` channels; fractions are not truncated.
fn parse_channels(spec: &str) -> Result<[u8; 3], ColorError> {
    let parts: Vec<&str> = spec.split(';').collect();
    if parts.len() != 3 {
        return Err(ColorError::Unrecognized(spec.to_string()));
    }
    let mut channels = [0; 3];
    let components = ["red", "green", "blue"];
    for ((slot, part), component) in channels.iter_mut().zip(parts).zip(components) {
        let value: u32 = part
            .trim()
            .parse()
            .map_err(|_| ColorError::Unrecognized(spec.to_string()))?;
        *slot = u8::try_from(value).map_err(|_| ColorError::OutOfRange {
            component,
            value: f64::from(value),
        })?;
    }
    Ok(channels)
}

fn parse_hex(hex: &str) -> Option<Color> {
    if !hex.chars().all(|ch| ch.is_ascii_hexdigit()) {
        return None;
    }
    match hex.len() {
        6 => {
            let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
            let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
            let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
            Some(Color::rgb(r, g, b))
        }
        3 => {
            let digit = |idx: usize| u8::from_str_radix(&hex[idx..idx + 1], 16).ok();
            let (r, g, b) = (digit(0)?, digit(1)?, digit(2)?);
            Some(Color::rgb(r * 17, g * 17, b * 17))
        }
        _ => None,
    }
}
