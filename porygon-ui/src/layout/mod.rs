//! Constraint layout.
//!
//! Every component owns a [`LayoutConstraint`]. During render the component
//! resolves it against the content rect of the innermost open container:
//!
//! ```text
//! parent content rect + constraint (+ intrinsic size) -> resolver -> Rect
//! ```
//!
//! Resolution is cached per component and only re-runs when the constraint
//! or the parent rect changes.

pub mod anchor;
pub mod constraint;
pub mod padding;
pub mod resolver;

pub use anchor::{Anchor, AxisPin};
pub use constraint::LayoutConstraint;
pub use padding::{Margin, Padding};
pub use resolver::{AnchorResolver, LayoutResolver, resolve};
