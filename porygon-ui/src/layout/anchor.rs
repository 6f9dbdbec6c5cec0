//! Anchors: which parent edges a component is pinned to.

/// Named rule describing how a component's rectangle is placed inside its
/// parent's content rectangle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Anchor {
    #[default]
    TopLeft,
    TopCenter,
    TopRight,
    CenterLeft,
    Center,
    CenterRight,
    BottomLeft,
    BottomCenter,
    BottomRight,
    /// Full parent width, pinned to the top edge.
    StretchTop,
    /// Full parent width, pinned to the bottom edge.
    StretchBottom,
    /// Full parent height, pinned to the left edge.
    StretchLeft,
    /// Full parent height, pinned to the right edge.
    StretchRight,
    /// Full parent width, vertically centered.
    StretchHorizontal,
    /// Full parent height, horizontally centered.
    StretchVertical,
    /// Both axes stretched.
    Fill,
}

/// How one axis of an anchor is pinned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisPin {
    /// Left or top edge.
    Start,
    Center,
    /// Right or bottom edge.
    End,
    /// Pinned to both edges.
    Stretch,
}

impl Anchor {
    /// Pin for the horizontal axis.
    pub fn horizontal(self) -> AxisPin {
        match self {
            Anchor::TopLeft | Anchor::CenterLeft | Anchor::BottomLeft | Anchor::StretchLeft => {
                AxisPin::Start
            }
            Anchor::TopCenter | Anchor::Center | Anchor::BottomCenter | Anchor::StretchVertical => {
                AxisPin::Center
            }
            Anchor::TopRight | Anchor::CenterRight | Anchor::BottomRight | Anchor::StretchRight => {
                AxisPin::End
            }
            Anchor::StretchTop | Anchor::StretchBottom | Anchor::StretchHorizontal | Anchor::Fill => {
                AxisPin::Stretch
            }
        }
    }

    /// Pin for the vertical axis.
    pub fn vertical(self) -> AxisPin {
        match self {
            Anchor::TopLeft | Anchor::TopCenter | Anchor::TopRight | Anchor::StretchTop => {
                AxisPin::Start
            }
            Anchor::CenterLeft | Anchor::Center | Anchor::CenterRight | Anchor::StretchHorizontal => {
                AxisPin::Center
            }
            Anchor::BottomLeft | Anchor::BottomCenter | Anchor::BottomRight | Anchor::StretchBottom => {
                AxisPin::End
            }
            Anchor::StretchLeft | Anchor::StretchRight | Anchor::StretchVertical | Anchor::Fill => {
                AxisPin::Stretch
            }
        }
    }

    /// Whether either axis is stretched.
    pub fn is_stretch(self) -> bool {
        self.horizontal() == AxisPin::Stretch || self.vertical() == AxisPin::Stretch
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corner_pins() {
        assert_eq!(Anchor::TopLeft.horizontal(), AxisPin::Start);
        assert_eq!(Anchor::TopLeft.vertical(), AxisPin::Start);
        assert_eq!(Anchor::BottomRight.horizontal(), AxisPin::End);
        assert_eq!(Anchor::BottomRight.vertical(), AxisPin::End);
    }

    #[test]
    fn stretch_pins() {
        assert_eq!(Anchor::StretchTop.horizontal(), AxisPin::Stretch);
        assert_eq!(Anchor::StretchTop.vertical(), AxisPin::Start);
        assert_eq!(Anchor::StretchRight.horizontal(), AxisPin::End);
        assert_eq!(Anchor::StretchRight.vertical(), AxisPin::Stretch);
        assert!(Anchor::Fill.is_stretch());
        assert!(!Anchor::Center.is_stretch());
    }
}
