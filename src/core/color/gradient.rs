//! Gradients by per-channel linear interpolation.
//!
//! The first and last entries are the endpoint colors themselves, so endpoints are exact and
//! keep their original color space.

use super::convert::to_channel;
use super::{Color, Rgb};

/// `steps` colors from `from` to `to` inclusive.
pub fn gradient(from: &Color, to: &Color, steps: usize) -> Vec<Color> {
    match steps {
        0 => Vec::new(),
        1 => vec![from.clone()],
        _ => {
            let last = steps - 1;
            (0..steps)
                .map(|step| {
                    if step == 0 {
                        from.clone()
                    } else if step == last {
                        to.clone()
                    } else {
                        let t = step as f64 / last as f64;
                        Color::from_rgb(lerp(from.resolved(), to.resolved(), t))
                    }
                })
                .collect()
        }
    }
}

/// Darkening ramp ending at black.
pub fn shades(color: &Color, steps: usize) -> Vec<Color> {
    gradient(color, &Color::rgb(0, 0, 0), steps)
}

/// Lightening ramp ending at white.
pub fn tints(color: &Color, steps: usize) -> Vec<Color> {
    gradient(color, &Color::rgb(255, 255, 255), steps)
}

/// `steps` colors spread evenly over several stops.
pub fn multi_stop(stops: &[Color], steps: usize) -> Vec<Color> {
    match stops {
        [] => Vec::new(),
        [only] => vec![only.clone(); steps],
        [first, second] => gradient(first, second, steps),
        _ => {
            if steps < 2 {
                return stops.iter().take(steps).cloned().collect();
            }
            let segments = (stops.len() - 1) as f64;
            let last = steps - 1;
            (0..steps)
                .map(|step| {
                    if step == last {
                        return stops[stops.len() - 1].clone();
                    }
                    let position = step as f64 / last as f64 * segments;
                    let segment = position.floor() as usize;
                    let t = position - segment as f64;
                    if t == 0.0 {
                        return stops[segment].clone();
                    }
                    Color::from_rgb(lerp(
                        stops[segment].resolved(),
                        stops[segment + 1].resolved(),
                        t,
                    ))
                })
                .collect()
        }
    }
}

fn lerp(from: Rgb, to: Rgb, t: f64) -> Rgb {
    let channel =
        |a: u8, b: u8| to_channel(f64::from(a) + (f64::from(b) - f64::from(a)) * t);
    Rgb::new(
        channel(from.r, to.r),
        channel(from.g, to.g),
        channel(from.b, to.b),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_are_exact() {
        let from = Color::rgb(10, 20, 30);
        let to = Color::indexed(231);
        let steps = gradient(&from, &to, 7);
        assert_eq!(steps.len(), 7);
        assert_eq!(steps[0], from);
        assert_eq!(steps[6], to);
        assert_eq!(steps[6].render_foreground(), to.render_foreground());
    }

    #[test]
    fn degenerate_step_counts() {
        let a = Color::rgb(0, 0, 0);
        let b = Color::rgb(255, 255, 255);
        assert!(gradient(&a, &b, 0).is_empty());
        assert_eq!(gradient(&a, &b, 1), vec![a.clone()]);
        assert_eq!(gradient(&a, &b, 2), vec![a, b]);
    }

    #[test]
    fn midpoint_rounds_per_channel() {
        let steps = gradient(&Color::rgb(0, 0, 0), &Color::rgb(255, 100, 1), 3);
        assert_eq!(steps[1].resolved(), Rgb::new(128, 50, 1));
    }

    #[test]
    fn shades_and_tints_reach_black_and_white() {
        let base = Color::rgb(100, 150, 200);
        assert_eq!(shades(&base, 4)[3].resolved(), Rgb::new(0, 0, 0));
        assert_eq!(tints(&base, 4)[3].resolved(), Rgb::new(255, 255, 255));
    }

    #[test]
    fn multi_stop_hits_every_stop() {
        let stops = [
            Color::rgb(255, 0, 0),
            Color::rgb(0, 255, 0),
            Color::rgb(0, 0, 255),
        ];
        let ramp = multi_stop(&stops, 5);
        assert_eq!(ramp[0], stops[0]);
        assert_eq!(ramp[2], stops[1]);
        assert_eq!(ramp[4], stops[2]);
    }
}
