//! Cell coordinates and rectangles.
//!
//! All values here are 0-based cell positions. The 1-based wire form only exists inside
//! `core::sequence`.

/// A column/row position on the cell grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Coordinate {
    pub x: u16,
    pub y: u16,
}

impl Coordinate {
    pub const fn new(x: u16, y: u16) -> Self {
        Self { x, y }
    }

    pub fn offset(self, dx: u16, dy: u16) -> Self {
        Self {
            x: self.x.saturating_add(dx),
            y: self.y.saturating_add(dy),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Size {
    pub width: u16,
    pub height: u16,
}

impl Size {
    pub const fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }

    pub fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Extra cells around a region, used to grow pointer hit areas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Padding {
    pub left: u16,
    pub top: u16,
    pub right: u16,
    pub bottom: u16,
}

impl Padding {
    pub const fn uniform(cells: u16) -> Self {
        Self {
            left: cells,
            top: cells,
            right: cells,
            bottom: cells,
        }
    }
}

/// Axis-aligned cell rectangle anchored at its top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    pub left: u16,
    pub top: u16,
    pub width: u16,
    pub height: u16,
}

impl Rect {
    pub const fn new(left: u16, top: u16, width: u16, height: u16) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn from_size(size: Size) -> Self {
        Self::new(0, 0, size.width, size.height)
    }

    pub fn origin(self) -> Coordinate {
        Coordinate::new(self.left, self.top)
    }

    pub fn size(self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Inclusive bottom-right cell. Empty rectangles report their origin.
    pub fn bottom_right(self) -> Coordinate {
        Coordinate::new(
            self.left.saturating_add(self.width.saturating_sub(1)),
            self.top.saturating_add(self.height.saturating_sub(1)),
        )
    }

    pub fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn contains(self, point: Coordinate) -> bool {
        if self.is_empty() {
            return false;
        }
        let end = self.bottom_right();
        point.x >= self.left && point.x <= end.x && point.y >= self.top && point.y <= end.y
    }

    /// Grows the rectangle by `padding`, saturating at the grid origin.
    pub fn pad(self, padding: Padding) -> Self {
        let left = self.left.saturating_sub(padding.left);
        let top = self.top.saturating_sub(padding.top);
        let grown_left = self.left - left;
        let grown_top = self.top - top;
        Self {
            left,
            top,
            width: self
                .width
                .saturating_add(grown_left)
                .saturating_add(padding.right),
            height: self
                .height
                .saturating_add(grown_top)
                .saturating_add(padding.bottom),
        }
    }

    /// Returns a rectangle of `size` centered inside `self`.
    pub fn center(self, size: Size) -> Self {
        let left = self.left + self.width.saturating_sub(size.width) / 2;
        let top = self.top + self.height.saturating_sub(size.height) / 2;
        Self::new(left, top, size.width, size.height)
    }
}

#[cfg(test)]
mod tests {
    use super::{Coordinate, Padding, Rect, Size};

    #[test]
    fn contains_is_inclusive_of_bottom_right() {
        let rect = Rect::new(2, 3, 4, 2);
        assert!(rect.contains(Coordinate::new(2, 3)));
        assert!(rect.contains(Coordinate::new(5, 4)));
        assert!(!rect.contains(Coordinate::new(6, 4)));
        assert!(!rect.contains(Coordinate::new(5, 5)));
    }

    #[test]
    fn empty_rect_contains_nothing() {
        assert!(!Rect::new(0, 0, 0, 5).contains(Coordinate::new(0, 0)));
    }

    #[test]
    fn padding_saturates_at_origin() {
        let rect = Rect::new(1, 0, 4, 2).pad(Padding::uniform(2));
        assert_eq!(rect, Rect::new(0, 0, 7, 4));
    }

    #[test]
    fn center_keeps_size() {
        let outer = Rect::new(0, 0, 80, 24);
        assert_eq!(outer.center(Size::new(10, 4)), Rect::new(35, 10, 10, 4));
    }
}
