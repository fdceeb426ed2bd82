//! Color-space conversions and the xterm 256-color palette.

use super::Rgb;

/// Cyan/magenta/yellow/key, each in `0.0..=100.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cmyk {
    pub c: f64,
    pub m: f64,
    pub y: f64,
    pub k: f64,
}

/// Hue in degrees (`0.0..=360.0`), saturation and lightness in `0.0..=100.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsl {
    pub h: f64,
    pub s: f64,
    pub l: f64,
}

const SYSTEM_COLORS: [(u8, u8, u8); 16] = [
    (0, 0, 0),
    (128, 0, 0),
    (0, 128, 0),
    (128, 128, 0),
    (0, 0, 128),
    (128, 0, 128),
    (0, 128, 128),
    (192, 192, 192),
    (128, 128, 128),
    (255, 0, 0),
    (0, 255, 0),
    (255, 255, 0),
    (0, 0, 255),
    (255, 0, 255),
    (0, 255, 255),
    (255, 255, 255),
];

const CUBE_LEVELS: [u8; 6] = [0, 95, 135, 175, 215, 255];

pub fn palette_rgb(index: u8) -> Rgb {
    match index {
        0..=15 => {
            let (r, g, b) = SYSTEM_COLORS[index as usize];
            Rgb::new(r, g, b)
        }
        16..=231 => {
            let cube = index - 16;
            Rgb::new(
                CUBE_LEVELS[(cube / 36) as usize],
                CUBE_LEVELS[((cube / 6) % 6) as usize],
                CUBE_LEVELS[(cube % 6) as usize],
            )
        }
        _ => {
            let level = 8 + 10 * (index - 232);
            Rgb::new(level, level, level)
        }
    }
}

/// Closest palette entry by squared RGB distance. The system colors are skipped because
/// terminals remap them freely.
pub fn nearest_palette_index(rgb: Rgb) -> u8 {
    let mut best = 16u8;
    let mut best_distance = u32::MAX;
    for index in 16..=255u8 {
        let candidate = palette_rgb(index);
        let distance = channel_distance(rgb.r, candidate.r)
            + channel_distance(rgb.g, candidate.g)
            + channel_distance(rgb.b, candidate.b);
        if distance < best_distance {
            best = index;
            best_distance = distance;
            if distance == 0 {
                break;
            }
        }
    }
    best
}

fn channel_distance(a: u8, b: u8) -> u32 {
    let delta = i32::from(a) - i32::from(b);
    (delta * delta) as u32
}

pub fn cmyk_to_rgb(cmyk: Cmyk) -> Rgb {
    let k = 1.0 - cmyk.k / 100.0;
    let channel = |value: f64| to_channel(255.0 * (1.0 - value / 100.0) * k);
    Rgb::new(channel(cmyk.c), channel(cmyk.m), channel(cmyk.y))
}

pub fn rgb_to_cmyk(rgb: Rgb) -> Cmyk {
    let r = f64::from(rgb.r) / 255.0;
    let g = f64::from(rgb.g) / 255.0;
    let b = f64::from(rgb.b) / 255.0;
    let key = 1.0 - r.max(g).max(b);
    let component = |value: f64| {
        let result = (1.0 - value - key) / (1.0 - key);
        if result.is_nan() {
            0.0
        } else {
            result * 100.0
        }
    };
    Cmyk {
        c: component(r),
        m: component(g),
        y: component(b),
        k: key * 100.0,
    }
}

pub fn hsl_to_rgb(hsl: Hsl) -> Rgb {
    let h = (hsl.h % 360.0) / 360.0;
    let s = hsl.s / 100.0;
    let l = hsl.l / 100.0;
    if s == 0.0 {
        let gray = to_channel(l * 255.0);
        return Rgb::new(gray, gray, gray);
    }

    let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let p = 2.0 * l - q;
    Rgb::new(
        to_channel(hue_to_channel(p, q, h + 1.0 / 3.0) * 255.0),
        to_channel(hue_to_channel(p, q, h) * 255.0),
        to_channel(hue_to_channel(p, q, h - 1.0 / 3.0) * 255.0),
    )
}

fn hue_to_channel(p: f64, q: f64, mut t: f64) -> f64 {
    if t < 0.0 {
        t += 1.0;
    }
    if t > 1.0 {
        t -= 1.0;
    }
    if t < 1.0 / 6.0 {
        return p + (q - p) * 6.0 * t;
    }
    if t < 0.5 {
        return q;
    }
    if t < 2.0 / 3.0 {
        return p + (q - p) * (2.0 / 3.0 - t) * 6.0;
    }
    p
}

pub fn rgb_to_hsl(rgb: Rgb) -> Hsl {
    let r = f64::from(rgb.r) / 255.0;
    let g = f64::from(rgb.g) / 255.0;
    let b = f64::from(rgb.b) / 255.0;
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let l = (max + min) / 2.0;
    if max == min {
        return Hsl {
            h: 0.0,
            s: 0.0,
            l: l * 100.0,
        };
    }

    let delta = max - min;
    let s = if l > 0.5 {
        delta / (2.0 - max - min)
    } else {
        delta / (max + min)
    };
    let h = if max == r {
        (g - b) / delta + if g < b { 6.0 } else { 0.0 }
    } else if max == g {
        (b - r) / delta + 2.0
    } else {
        (r - g) / delta + 4.0
    };
    Hsl {
        h: h * 60.0,
        s: s * 100.0,
        l: l * 100.0,
    }
}

pub(crate) fn to_channel(value: f64) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_covers_cube_and_grays() {
        assert_eq!(palette_rgb(16), Rgb::new(0, 0, 0));
        assert_eq!(palette_rgb(196), Rgb::new(255, 0, 0));
        assert_eq!(palette_rgb(231), Rgb::new(255, 255, 255));
        assert_eq!(palette_rgb(232), Rgb::new(8, 8, 8));
        assert_eq!(palette_rgb(255), Rgb::new(238, 238, 238));
    }

    #[test]
    fn nearest_palette_is_exact_for_cube_colors() {
        assert_eq!(nearest_palette_index(Rgb::new(255, 0, 0)), 196);
        assert_eq!(nearest_palette_index(Rgb::new(95, 135, 175)), 67);
    }

    #[test]
    fn cmyk_round_trip() {
        let rgb = Rgb::new(51, 102, 153);
        assert_eq!(cmyk_to_rgb(rgb_to_cmyk(rgb)), rgb);
    }

    #[test]
    fn black_cmyk_has_no_nan() {
        let cmyk = rgb_to_cmyk(Rgb::new(0, 0, 0));
        assert_eq!((cmyk.c, cmyk.m, cmyk.y, cmyk.k), (0.0, 0.0, 0.0, 100.0));
    }

    #[test]
    fn hsl_round_trip() {
        for rgb in [
            Rgb::new(255, 0, 0),
            Rgb::new(12, 200, 90),
            Rgb::new(128, 128, 128),
        ] {
            assert_eq!(hsl_to_rgb(rgb_to_hsl(rgb)), rgb);
        }
    }
}
