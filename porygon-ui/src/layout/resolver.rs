//! Constraint resolution.
//!
//! `resolve` is a pure function of (constraint, parent content rect,
//! intrinsic size). It never calls back into components: content-driven
//! sizing is pushed in through `intrinsic` once per call.
//!
//! Per axis:
//!
//! ```text
//! size   = explicit | percent * parent | (stretch) span - 2*offset | intrinsic | 0
//! size   = clamp(size, min, max)            // max first, min wins
//! origin = start + offset                   // Start, Stretch
//!        | far - size - offset              // End
//!        | start + (span - size)/2 + offset // Center
//! ```
//!
//! Margin shrinks the span used for positioning (and stretch sizing).
//! Percentages are taken of the un-margined parent size.

use super::anchor::AxisPin;
use super::constraint::LayoutConstraint;
use crate::primitives::{Rect, Size};

/// Resolves a constraint against a parent content rect.
///
/// The engine holds one resolver per context; tests swap in instrumented
/// resolvers to observe how often layout actually runs.
pub trait LayoutResolver {
    fn resolve(&self, constraint: &LayoutConstraint, parent: Rect, intrinsic: Option<Size>) -> Rect;
}

/// The standard anchor-based resolver.
#[derive(Debug, Default, Clone, Copy)]
pub struct AnchorResolver;

impl LayoutResolver for AnchorResolver {
    #[inline]
    fn resolve(&self, constraint: &LayoutConstraint, parent: Rect, intrinsic: Option<Size>) -> Rect {
        resolve(constraint, parent, intrinsic)
    }
}

/// One axis worth of resolution inputs.
struct Axis {
    pin: AxisPin,
    /// Start coordinate of the (margin-reduced) span.
    start: f32,
    /// Length of the (margin-reduced) span.
    span: f32,
    /// Full parent length, basis for percentages.
    parent_length: f32,
    offset: f32,
    explicit: Option<f32>,
    percent: Option<f32>,
    min: Option<f32>,
    max: Option<f32>,
    intrinsic: Option<f32>,
}

/// Resolve a constraint to a screen-space rectangle.
pub fn resolve(constraint: &LayoutConstraint, parent: Rect, intrinsic: Option<Size>) -> Rect {
    let area = parent.inset(&constraint.margin());
    let anchor = constraint.anchor();

    let (x, width) = resolve_axis(Axis {
        pin: anchor.horizontal(),
        start: area.x,
        span: area.width,
        parent_length: parent.width,
        offset: constraint.offset_x(),
        explicit: constraint.width(),
        percent: constraint.width_percent(),
        min: constraint.min_width(),
        max: constraint.max_width(),
        intrinsic: intrinsic.map(|s| s.width),
    });

    let (y, height) = resolve_axis(Axis {
        pin: anchor.vertical(),
        start: area.y,
        span: area.height,
        parent_length: parent.height,
        offset: constraint.offset_y(),
        explicit: constraint.height(),
        percent: constraint.height_percent(),
        min: constraint.min_height(),
        max: constraint.max_height(),
        intrinsic: intrinsic.map(|s| s.height),
    });

    Rect::new(x, y, width, height)
}

fn resolve_axis(axis: Axis) -> (f32, f32) {
    let candidate = match (axis.explicit, axis.percent) {
        (Some(explicit), _) => explicit,
        (None, Some(percent)) => percent * axis.parent_length,
        (None, None) if axis.pin == AxisPin::Stretch => axis.span - 2.0 * axis.offset,
        (None, None) => axis.intrinsic.unwrap_or(0.0),
    };

    let size = clamp_size(candidate, axis.min, axis.max);

    let origin = match axis.pin {
        AxisPin::Start | AxisPin::Stretch => axis.start + axis.offset,
        AxisPin::End => axis.start + axis.span - size - axis.offset,
        AxisPin::Center => axis.start + (axis.span - size) / 2.0 + axis.offset,
    };

    (origin, size)
}

/// Apply max then min so that `min` wins for malformed (min > max) pairs.
/// Non-finite or negative sizes collapse to zero.
#[inline]
fn clamp_size(value: f32, min: Option<f32>, max: Option<f32>) -> f32 {
    let mut size = if value.is_finite() { value } else { 0.0 };
    if let Some(max) = max {
        size = size.min(max);
    }
    if let Some(min) = min {
        size = size.max(min);
    }
    size.max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{Anchor, Padding};

    const PARENT: Rect = Rect::new(0.0, 0.0, 800.0, 600.0);

    #[test]
    fn top_left_with_offset() {
        let c = LayoutConstraint::new(Anchor::TopLeft)
            .with_offset(10.0, 10.0)
            .with_size(100.0, 50.0);
        assert_eq!(resolve(&c, PARENT, None), Rect::new(10.0, 10.0, 100.0, 50.0));
    }

    #[test]
    fn bottom_right_offsets_move_inward() {
        let c = LayoutConstraint::new(Anchor::BottomRight)
            .with_offset(10.0, 10.0)
            .with_size(100.0, 50.0);
        assert_eq!(resolve(&c, PARENT, None), Rect::new(690.0, 540.0, 100.0, 50.0));
    }

    #[test]
    fn stretch_top_fills_width() {
        let c = LayoutConstraint::new(Anchor::StretchTop).with_height(40.0);
        assert_eq!(resolve(&c, PARENT, None), Rect::new(0.0, 0.0, 800.0, 40.0));
    }

    #[test]
    fn stretch_bottom_pins_to_bottom_edge() {
        let c = LayoutConstraint::new(Anchor::StretchBottom).with_height(24.0);
        assert_eq!(resolve(&c, PARENT, None), Rect::new(0.0, 576.0, 800.0, 24.0));
    }

    #[test]
    fn stretch_offset_insets_both_edges() {
        let c = LayoutConstraint::new(Anchor::StretchLeft)
            .with_offset(4.0, 10.0)
            .with_width(200.0);
        assert_eq!(resolve(&c, PARENT, None), Rect::new(4.0, 10.0, 200.0, 580.0));
    }

    #[test]
    fn percent_then_min_clamp() {
        let c = LayoutConstraint::new(Anchor::TopLeft)
            .with_width_percent(0.5)
            .with_min_width(500.0)
            .with_height(10.0);
        let rect = resolve(&c, PARENT, None);
        assert_eq!(rect.width, 500.0, "min must win over 0.5 * 800 = 400");
    }

    #[test]
    fn percent_respects_max() {
        let c = LayoutConstraint::new(Anchor::TopLeft)
            .with_height_percent(0.5)
            .with_max_height(100.0);
        assert_eq!(resolve(&c, PARENT, None).height, 100.0);
    }

    #[test]
    fn min_wins_over_max_when_malformed() {
        let c = LayoutConstraint::new(Anchor::TopLeft)
            .with_width(300.0)
            .with_min_width(200.0)
            .with_max_width(100.0);
        assert_eq!(resolve(&c, PARENT, None).width, 200.0);
    }

    #[test]
    fn intrinsic_size_used_as_fallback() {
        let c = LayoutConstraint::new(Anchor::TopLeft);
        let rect = resolve(&c, PARENT, Some(Size::new(120.0, 18.0)));
        assert_eq!(rect, Rect::new(0.0, 0.0, 120.0, 18.0));

        // Stretch axes ignore intrinsic width.
        let stretched = LayoutConstraint::new(Anchor::StretchTop);
        let rect = resolve(&stretched, PARENT, Some(Size::new(120.0, 18.0)));
        assert_eq!(rect, Rect::new(0.0, 0.0, 800.0, 18.0));
    }

    #[test]
    fn explicit_beats_percent_and_intrinsic() {
        let c = LayoutConstraint::new(Anchor::TopLeft)
            .with_width(64.0)
            .with_width_percent(0.9)
            .with_height(8.0);
        assert_eq!(resolve(&c, PARENT, Some(Size::new(999.0, 999.0))).width, 64.0);
    }

    #[test]
    fn center_anchor() {
        let c = LayoutConstraint::new(Anchor::Center).with_size(200.0, 100.0);
        assert_eq!(resolve(&c, PARENT, None), Rect::new(300.0, 250.0, 200.0, 100.0));
    }

    #[test]
    fn margin_shifts_position_not_size() {
        let c = LayoutConstraint::new(Anchor::BottomRight)
            .with_size(100.0, 50.0)
            .with_margin(Padding::all(20.0));
        assert_eq!(resolve(&c, PARENT, None), Rect::new(680.0, 530.0, 100.0, 50.0));
    }

    #[test]
    fn margin_reduces_stretch_size() {
        let c = LayoutConstraint::fill().with_margin(Padding::new(10.0, 20.0, 30.0, 40.0));
        assert_eq!(resolve(&c, PARENT, None), Rect::new(40.0, 10.0, 740.0, 560.0));
    }

    #[test]
    fn parent_origin_is_respected() {
        let parent = Rect::new(100.0, 50.0, 200.0, 100.0);
        let c = LayoutConstraint::new(Anchor::TopRight)
            .with_offset(5.0, 5.0)
            .with_size(20.0, 10.0);
        assert_eq!(resolve(&c, parent, None), Rect::new(275.0, 55.0, 20.0, 10.0));
    }

    #[test]
    fn oversized_offsets_never_go_negative() {
        let c = LayoutConstraint::fill().with_offset(500.0, 500.0);
        let rect = resolve(&c, PARENT, None);
        assert_eq!(rect.width, 0.0);
        assert_eq!(rect.height, 0.0);
    }

    #[test]
    fn resolution_is_deterministic() {
        let c = LayoutConstraint::new(Anchor::CenterRight)
            .with_offset(3.0, -7.0)
            .with_width_percent(0.33)
            .with_min_height(12.0);
        let first = resolve(&c, PARENT, Some(Size::new(10.0, 10.0)));
        let second = resolve(&c, PARENT, Some(Size::new(10.0, 10.0)));
        assert_eq!(first, second);
        assert_eq!(AnchorResolver.resolve(&c, PARENT, Some(Size::new(10.0, 10.0))), first);
    }
}
