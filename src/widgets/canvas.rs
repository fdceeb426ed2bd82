//! Block-pixel canvas.

use crate::core::color::Color;
use crate::core::coordinate::Rect;
use crate::core::renderable::{RenderContext, StaticWidget};
use crate::error::RenderError;
use crate::widgets::{cursor_at, span};

/// One colored pixel at a 0-based pixel coordinate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pixel {
    pub x: u16,
    pub y: u16,
    pub color: Color,
}

impl Pixel {
    pub fn new(x: u16, y: u16, color: Color) -> Self {
        Self { x, y, color }
    }
}

/// `geometry` places the canvas origin and gives its size in pixels. A pixel is two cells
/// wide unless `double_width` is off.
#[derive(Debug, Clone)]
pub struct Canvas {
    pub geometry: Option<Rect>,
    pub pixels: Vec<Pixel>,
    pub double_width: bool,
    /// Skip painting the canvas background so only pixels are drawn.
    pub transparent: bool,
    pub color: Option<Color>,
}

impl Default for Canvas {
    fn default() -> Self {
        Self {
            geometry: None,
            pixels: Vec::new(),
            double_width: true,
            transparent: false,
            color: None,
        }
    }
}

impl Canvas {
    pub fn new(geometry: Rect) -> Self {
        Self {
            geometry: Some(geometry),
            ..Self::default()
        }
    }

    pub fn with_pixels(mut self, pixels: impl IntoIterator<Item = Pixel>) -> Self {
        self.pixels.extend(pixels);
        self
    }

    pub fn with_double_width(mut self, double_width: bool) -> Self {
        self.double_width = double_width;
        self
    }

    pub fn with_transparency(mut self, transparent: bool) -> Self {
        self.transparent = transparent;
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    pub fn put(&mut self, pixel: Pixel) {
        self.pixels.push(pixel);
    }

    fn pixel_width(&self) -> i64 {
        if self.double_width {
            2
        } else {
            1
        }
    }

    fn geometry(&self, ctx: &RenderContext) -> Rect {
        self.geometry.unwrap_or_else(|| {
            let area = ctx.area;
            let width = if self.double_width {
                area.width / 2
            } else {
                area.width
            };
            Rect::new(area.left, area.top, width, area.height)
        })
    }
}

impl StaticWidget for Canvas {
    fn render(&self, ctx: &RenderContext) -> Result<String, RenderError> {
        let geometry = self.geometry(ctx);
        let (left, top) = (i64::from(geometry.left), i64::from(geometry.top));
        let cell = self.pixel_width();
        let mut out = String::new();

        if !self.transparent {
            out.push_str(&ctx.bg_or_default(self.color.as_ref()));
            let blank = span(' ', i64::from(geometry.width) * cell);
            for y in 0..i64::from(geometry.height) {
                out.push_str(&cursor_at(left + 1, top + y + 1));
                out.push_str(&blank);
            }
        }

        let block = span(' ', cell);
        for pixel in &self.pixels {
            if pixel.x >= geometry.width || pixel.y >= geometry.height {
                continue;
            }
            out.push_str(&ctx.bg(&pixel.color));
            out.push_str(&cursor_at(
                left + i64::from(pixel.x) * cell + 1,
                top + i64::from(pixel.y) + 1,
            ));
            out.push_str(&block);
        }
        out.push_str(&ctx.reset());
        Ok(out)
    }

    fn bounds(&self, ctx: &RenderContext) -> Option<Rect> {
        let geometry = self.geometry(ctx);
        let width = i64::from(geometry.width) * self.pixel_width();
        Some(Rect::new(
            geometry.left,
            geometry.top,
            width.min(i64::from(u16::MAX)) as u16,
            geometry.height,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::coordinate::Size;

    #[test]
    fn pixels_are_two_cells_wide() {
        let red = Color::indexed(1);
        let canvas = Canvas::new(Rect::new(2, 1, 4, 3))
            .with_transparency(true)
            .with_pixels([Pixel::new(1, 2, red.clone())]);
        let ctx = RenderContext::new(Size::new(20, 10));
        let text = canvas.render(&ctx).unwrap();
        assert!(text.starts_with(&format!("{}\x1b[4;5H  ", ctx.bg(&red))));
    }

    #[test]
    fn out_of_range_pixels_are_ignored() {
        let canvas = Canvas::new(Rect::new(0, 0, 2, 2))
            .with_transparency(true)
            .with_pixels([Pixel::new(2, 0, Color::indexed(1)), Pixel::new(0, 5, Color::indexed(2))]);
        let ctx = RenderContext::new(Size::new(10, 10)).without_colors();
        assert_eq!(canvas.render(&ctx).unwrap(), "");
    }

    #[test]
    fn opaque_canvas_fills_its_area() {
        let canvas = Canvas::new(Rect::new(0, 0, 2, 2)).with_double_width(false);
        let ctx = RenderContext::new(Size::new(10, 10)).without_colors();
        assert_eq!(canvas.render(&ctx).unwrap(), "\x1b[1;1H  \x1b[2;1H  ");
        assert_eq!(canvas.bounds(&ctx), Some(Rect::new(0, 0, 2, 2)));
    }
}
