//! Per-edge insets, used for both padding and margin.

/// Insets on each edge of a rectangle.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Padding {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

/// Margins share the padding representation; they inset the parent rect
/// instead of the owner's own rect.
pub type Margin = Padding;

impl Padding {
    pub const ZERO: Self = Self {
        top: 0.0,
        right: 0.0,
        bottom: 0.0,
        left: 0.0,
    };

    /// Explicit values for each side, CSS order.
    pub const fn new(top: f32, right: f32, bottom: f32, left: f32) -> Self {
        Self { top, right, bottom, left }
    }

    /// Uniform inset on all sides.
    pub const fn all(value: f32) -> Self {
        Self {
            top: value,
            right: value,
            bottom: value,
            left: value,
        }
    }

    /// Symmetric inset (horizontal, vertical).
    pub const fn symmetric(horizontal: f32, vertical: f32) -> Self {
        Self {
            top: vertical,
            right: horizontal,
            bottom: vertical,
            left: horizontal,
        }
    }

    /// Total horizontal inset.
    pub fn horizontal(&self) -> f32 {
        self.left + self.right
    }

    /// Total vertical inset.
    pub fn vertical(&self) -> f32 {
        self.top + self.bottom
    }

    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn totals() {
        let p = Padding::new(1.0, 2.0, 3.0, 4.0);
        assert_eq!(p.horizontal(), 6.0);
        assert_eq!(p.vertical(), 4.0);
        assert!(!p.is_zero());
        assert!(Padding::default().is_zero());
    }

    #[test]
    fn symmetric() {
        let p = Padding::symmetric(8.0, 2.0);
        assert_eq!(p.left, 8.0);
        assert_eq!(p.right, 8.0);
        assert_eq!(p.top, 2.0);
        assert_eq!(p.bottom, 2.0);
    }
}
