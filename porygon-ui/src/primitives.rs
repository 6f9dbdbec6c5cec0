//! Geometry and color value types.
//!
//! Everything here is `Copy` and compared by value. Layout caching relies on
//! `Rect: PartialEq` to detect parent-rect changes frame over frame.

use std::ops::Sub;

use serde::{Deserialize, Serialize};

use crate::layout::Padding;

/// A point in screen space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const ORIGIN: Self = Self { x: 0.0, y: 0.0 };

    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl Sub for Point {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self {
            x: self.x - rhs.x,
            y: self.y - rhs.y,
        }
    }
}

/// A 2D size.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// An axis-aligned rectangle in screen pixels.
///
/// This is the layout rectangle every component resolves to. It is an
/// immutable value: operations return new rectangles.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const ZERO: Self = Self {
        x: 0.0,
        y: 0.0,
        width: 0.0,
        height: 0.0,
    };

    #[inline]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// Check if a point is inside this rectangle (right/bottom exclusive).
    #[inline]
    pub fn contains(&self, point: Point) -> bool {
        self.contains_xy(point.x, point.y)
    }

    #[inline]
    pub fn contains_xy(&self, x: f32, y: f32) -> bool {
        x >= self.x && x < self.x + self.width && y >= self.y && y < self.y + self.height
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    #[inline]
    pub fn center(&self) -> Point {
        Point {
            x: self.x + self.width / 2.0,
            y: self.y + self.height / 2.0,
        }
    }

    /// Whether the rectangle covers no area.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Smallest rectangle containing both.
    pub fn union(&self, other: &Rect) -> Rect {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        let right = self.right().max(other.right());
        let bottom = self.bottom().max(other.bottom());
        Rect { x, y, width: right - x, height: bottom - y }
    }

    #[inline]
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }

    /// Overlapping area of two rectangles, if any.
    pub fn intersection(&self, other: &Rect) -> Option<Rect> {
        if !self.intersects(other) {
            return None;
        }

        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());

        Some(Rect {
            x,
            y,
            width: right - x,
            height: bottom - y,
        })
    }

    #[inline]
    pub fn translate(&self, offset: Point) -> Self {
        Self {
            x: self.x + offset.x,
            y: self.y + offset.y,
            ..*self
        }
    }

    /// Shrink by per-edge insets. Width and height never go negative.
    pub fn inset(&self, insets: &Padding) -> Self {
        Self {
            x: self.x + insets.left,
            y: self.y + insets.top,
            width: (self.width - insets.horizontal()).max(0.0),
            height: (self.height - insets.vertical()).max(0.0),
        }
    }
}

/// RGBA color with components in 0.0-1.0 range.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    #[serde(default = "opaque")]
    pub a: f32,
}

fn opaque() -> f32 {
    1.0
}

impl Color {
    pub const BLACK: Self = Self::rgb(0.0, 0.0, 0.0);
    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);

    #[inline]
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    #[inline]
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    #[inline]
    pub const fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_contains_is_right_bottom_exclusive() {
        let rect = Rect::new(10.0, 20.0, 100.0, 50.0);

        assert!(rect.contains(Point::new(10.0, 20.0)));
        assert!(rect.contains(Point::new(109.9, 69.9)));
        assert!(!rect.contains(Point::new(110.0, 70.0)));
        assert!(!rect.contains(Point::new(5.0, 40.0)));
    }

    #[test]
    fn rect_intersection() {
        let a = Rect::new(0.0, 0.0, 100.0, 100.0);
        let b = Rect::new(50.0, 50.0, 100.0, 100.0);
        assert_eq!(a.intersection(&b), Some(Rect::new(50.0, 50.0, 50.0, 50.0)));

        let c = Rect::new(200.0, 200.0, 50.0, 50.0);
        assert!(a.intersection(&c).is_none());
        assert!(!a.intersects(&c));
    }

    #[test]
    fn rect_center() {
        assert_eq!(Rect::new(10.0, 20.0, 100.0, 50.0).center(), Point::new(60.0, 45.0));
    }

    #[test]
    fn rect_union() {
        let a = Rect::new(0.0, 0.0, 50.0, 50.0);
        let b = Rect::new(25.0, 25.0, 50.0, 50.0);
        assert_eq!(a.union(&b), Rect::new(0.0, 0.0, 75.0, 75.0));
    }

    #[test]
    fn rect_inset_never_negative() {
        let r = Rect::new(0.0, 0.0, 100.0, 20.0);
        let inset = r.inset(&Padding::all(8.0));
        assert_eq!(inset, Rect::new(8.0, 8.0, 84.0, 4.0));

        let collapsed = r.inset(&Padding::all(30.0));
        assert_eq!(collapsed.width, 40.0);
        assert_eq!(collapsed.height, 0.0);
        assert!(collapsed.is_empty());
    }

    #[test]
    fn rect_translate() {
        let r = Rect::new(10.0, 20.0, 100.0, 50.0);
        assert_eq!(r.translate(Point::new(5.0, -10.0)), Rect::new(15.0, 10.0, 100.0, 50.0));
    }

    #[test]
    fn color_deserializes_without_alpha() {
        let c: Color = serde_json::from_str(r#"{"r":0.1,"g":0.2,"b":0.3}"#).unwrap();
        assert_eq!(c.a, 1.0);
    }
}
