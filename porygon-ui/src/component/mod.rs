//! Component and container model.
//!
//! A component owns a [`ComponentBase`] (identity, constraint, cached rect)
//! and renders into a [`UiContext`] it only borrows for the duration of the
//! call. Containers own their children and render them inside a nested
//! content rect.
//!
//! # Render flow
//!
//! ```text
//! render(ctx)
//!   ├─ invisible? -> return
//!   ├─ resolve layout (only if constraint/parent/invalidation changed)
//!   ├─ ctx.register(id, rect, interactive)
//!   └─ on_render(ctx)          // containers: chrome, then children
//! ```

mod base;
mod container;

pub use base::ComponentBase;
pub use container::{render_container, Children, Container};

use crate::context::UiContext;
use crate::error::Result;
use crate::id::ComponentId;
use crate::layout::LayoutConstraint;
use crate::primitives::{Rect, Size};

/// A retained UI element rendered once per frame.
pub trait Component {
    fn base(&self) -> &ComponentBase;

    fn base_mut(&mut self) -> &mut ComponentBase;

    /// Whether this component takes part in press/click/focus. Non-interactive
    /// components still block hover for anything beneath them.
    fn is_interactive(&self) -> bool {
        false
    }

    /// Content-driven size, consulted only when the constraint leaves an
    /// axis unsized and layout actually re-runs.
    fn intrinsic_size(&self, _ctx: &UiContext) -> Option<Size> {
        None
    }

    /// Draw and handle input. Called after layout and registration.
    fn on_render(&mut self, ctx: &mut UiContext) -> Result<()>;

    fn render(&mut self, ctx: &mut UiContext) -> Result<()> {
        render_component(self, ctx)
    }

    fn id(&self) -> ComponentId {
        self.base().id()
    }

    fn name(&self) -> &str {
        self.base().name()
    }

    fn is_visible(&self) -> bool {
        self.base().is_visible()
    }

    fn constraint(&self) -> &LayoutConstraint {
        self.base().constraint()
    }

    fn rect(&self) -> Rect {
        self.base().rect()
    }
}

/// The standard render lifecycle shared by every component.
pub fn render_component<C: Component + ?Sized>(component: &mut C, ctx: &mut UiContext) -> Result<()> {
    if !component.base().is_visible() {
        return Ok(());
    }
    ctx.ensure_in_frame("render")?;

    let parent = ctx.content_rect();
    if component.base().needs_layout(parent) {
        let intrinsic = component.intrinsic_size(ctx);
        let rect = ctx.resolve_layout(component.base().constraint(), parent, intrinsic);
        component.base_mut().apply_layout(rect, parent);
    }

    let base = component.base();
    let interactive = component.is_interactive() && base.is_enabled();
    ctx.register(base.id(), base.rect(), interactive)?;

    component.on_render(ctx)
}
