//! Declarative layout constraint attached to a component.
//!
//! A constraint describes how a component's rectangle derives from its
//! parent's content rectangle. Setters track a dirty flag so the owning
//! component can skip re-resolution when nothing changed.

use super::anchor::Anchor;
use super::padding::{Margin, Padding};

/// Anchor, offsets, sizing and insets for one component.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutConstraint {
    anchor: Anchor,
    offset_x: f32,
    offset_y: f32,
    width: Option<f32>,
    height: Option<f32>,
    width_percent: Option<f32>,
    height_percent: Option<f32>,
    min_width: Option<f32>,
    max_width: Option<f32>,
    min_height: Option<f32>,
    max_height: Option<f32>,
    padding: Padding,
    margin: Margin,
    dirty: bool,
}

impl Default for LayoutConstraint {
    fn default() -> Self {
        Self::new(Anchor::TopLeft)
    }
}

/// Generates a setter that only flags the constraint dirty on a real change.
macro_rules! tracked_setter {
    ($(#[$meta:meta])* $name:ident, $field:ident, $ty:ty) => {
        $(#[$meta])*
        pub fn $name(&mut self, value: $ty) {
            if self.$field != value {
                self.$field = value;
                self.dirty = true;
            }
        }
    };
}

impl LayoutConstraint {
    /// A fresh constraint. New constraints start dirty.
    pub fn new(anchor: Anchor) -> Self {
        Self {
            anchor,
            offset_x: 0.0,
            offset_y: 0.0,
            width: None,
            height: None,
            width_percent: None,
            height_percent: None,
            min_width: None,
            max_width: None,
            min_height: None,
            max_height: None,
            padding: Padding::ZERO,
            margin: Padding::ZERO,
            dirty: true,
        }
    }

    /// Both axes stretched over the parent content rect.
    pub fn fill() -> Self {
        Self::new(Anchor::Fill)
    }

    // =====================================================================
    // Builders
    // =====================================================================

    pub fn with_offset(mut self, x: f32, y: f32) -> Self {
        self.set_offset(x, y);
        self
    }

    pub fn with_size(mut self, width: f32, height: f32) -> Self {
        self.set_width(Some(width));
        self.set_height(Some(height));
        self
    }

    pub fn with_width(mut self, width: f32) -> Self {
        self.set_width(Some(width));
        self
    }

    pub fn with_height(mut self, height: f32) -> Self {
        self.set_height(Some(height));
        self
    }

    pub fn with_width_percent(mut self, fraction: f32) -> Self {
        self.set_width_percent(Some(fraction));
        self
    }

    pub fn with_height_percent(mut self, fraction: f32) -> Self {
        self.set_height_percent(Some(fraction));
        self
    }

    pub fn with_min_size(mut self, min_width: f32, min_height: f32) -> Self {
        self.set_min_width(Some(min_width));
        self.set_min_height(Some(min_height));
        self
    }

    pub fn with_max_size(mut self, max_width: f32, max_height: f32) -> Self {
        self.set_max_width(Some(max_width));
        self.set_max_height(Some(max_height));
        self
    }

    pub fn with_min_width(mut self, value: f32) -> Self {
        self.set_min_width(Some(value));
        self
    }

    pub fn with_max_width(mut self, value: f32) -> Self {
        self.set_max_width(Some(value));
        self
    }

    pub fn with_min_height(mut self, value: f32) -> Self {
        self.set_min_height(Some(value));
        self
    }

    pub fn with_max_height(mut self, value: f32) -> Self {
        self.set_max_height(Some(value));
        self
    }

    pub fn with_padding(mut self, padding: Padding) -> Self {
        self.set_padding(padding);
        self
    }

    pub fn with_margin(mut self, margin: Margin) -> Self {
        self.set_margin(margin);
        self
    }

    // =====================================================================
    // Setters (dirty-tracked)
    // =====================================================================

    tracked_setter!(set_anchor, anchor, Anchor);
    tracked_setter!(set_offset_x, offset_x, f32);
    tracked_setter!(set_offset_y, offset_y, f32);
    tracked_setter!(
        /// Explicit width in pixels; `None` falls back to percent/stretch/intrinsic.
        set_width, width, Option<f32>
    );
    tracked_setter!(
        /// Explicit height in pixels; `None` falls back to percent/stretch/intrinsic.
        set_height, height, Option<f32>
    );
    tracked_setter!(
        /// Fraction (0.0-1.0) of the parent content width.
        set_width_percent, width_percent, Option<f32>
    );
    tracked_setter!(
        /// Fraction (0.0-1.0) of the parent content height.
        set_height_percent, height_percent, Option<f32>
    );
    tracked_setter!(set_min_width, min_width, Option<f32>);
    tracked_setter!(set_max_width, max_width, Option<f32>);
    tracked_setter!(set_min_height, min_height, Option<f32>);
    tracked_setter!(set_max_height, max_height, Option<f32>);
    tracked_setter!(set_padding, padding, Padding);
    tracked_setter!(set_margin, margin, Margin);

    pub fn set_offset(&mut self, x: f32, y: f32) {
        self.set_offset_x(x);
        self.set_offset_y(y);
    }

    // =====================================================================
    // Accessors
    // =====================================================================

    pub fn anchor(&self) -> Anchor {
        self.anchor
    }

    pub fn offset_x(&self) -> f32 {
        self.offset_x
    }

    pub fn offset_y(&self) -> f32 {
        self.offset_y
    }

    pub fn width(&self) -> Option<f32> {
        self.width
    }

    pub fn height(&self) -> Option<f32> {
        self.height
    }

    pub fn width_percent(&self) -> Option<f32> {
        self.width_percent
    }

    pub fn height_percent(&self) -> Option<f32> {
        self.height_percent
    }

    pub fn min_width(&self) -> Option<f32> {
        self.min_width
    }

    pub fn max_width(&self) -> Option<f32> {
        self.max_width
    }

    pub fn min_height(&self) -> Option<f32> {
        self.min_height
    }

    pub fn max_height(&self) -> Option<f32> {
        self.max_height
    }

    pub fn padding(&self) -> Padding {
        self.padding
    }

    pub fn margin(&self) -> Margin {
        self.margin
    }

    // =====================================================================
    // Dirty tracking
    // =====================================================================

    /// Whether any property changed since the last resolve.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Force the next render to re-resolve.
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Called by the owner once the constraint has been resolved.
    pub fn mark_clean(&mut self) {
        self.dirty = false;
    }
}
