//! Containers: components that own and lay out children.

use super::Component;
use crate::context::UiContext;
use crate::error::{Result, UiError};
use crate::id::ComponentId;

/// Ordered child list. Order is render order: later children draw on top
/// and win hover.
#[derive(Default)]
pub struct Children {
    items: Vec<Box<dyn Component>>,
}

impl Children {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a child. Fails if a sibling already has the same id.
    pub fn add_child(&mut self, child: Box<dyn Component>) -> Result<ComponentId> {
        let id = child.id();
        if self.items.iter().any(|c| c.id() == id) {
            return Err(UiError::DuplicateChild {
                name: child.name().to_owned(),
            });
        }
        self.items.push(child);
        Ok(id)
    }

    /// Boxing shorthand for [`add_child`](Self::add_child).
    pub fn add(&mut self, child: impl Component + 'static) -> Result<ComponentId> {
        self.add_child(Box::new(child))
    }

    /// Detach a child and hand it back. No cleanup runs here.
    pub fn remove_child(&mut self, id: ComponentId) -> Option<Box<dyn Component>> {
        let index = self.items.iter().position(|c| c.id() == id)?;
        Some(self.items.remove(index))
    }

    pub fn clear_children(&mut self) {
        self.items.clear();
    }

    /// Swap in a rebuilt child list, returning the old one.
    ///
    /// Use this instead of removing while iterating.
    pub fn replace_children(&mut self, children: Vec<Box<dyn Component>>) -> Result<Vec<Box<dyn Component>>> {
        for (i, child) in children.iter().enumerate() {
            if children[..i].iter().any(|c| c.id() == child.id()) {
                return Err(UiError::DuplicateChild {
                    name: child.name().to_owned(),
                });
            }
        }
        Ok(std::mem::replace(&mut self.items, children))
    }

    pub fn child(&self, id: ComponentId) -> Option<&dyn Component> {
        self.items.iter().find(|c| c.id() == id).map(|c| c.as_ref())
    }

    pub fn child_mut(&mut self, id: ComponentId) -> Option<&mut (dyn Component + 'static)> {
        self.items.iter_mut().find(|c| c.id() == id).map(|c| c.as_mut())
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn Component> {
        self.items.iter().map(|c| c.as_ref())
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Box<dyn Component>> {
        self.items.iter_mut()
    }

    /// Render every child in list order. The first error aborts the rest.
    pub fn render_all(&mut self, ctx: &mut UiContext) -> Result<()> {
        for child in &mut self.items {
            child.render(ctx)?;
        }
        Ok(())
    }
}

impl std::fmt::Debug for Children {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.items.iter().map(|c| c.name())).finish()
    }
}

/// A component that renders children inside its padded content rect.
///
/// Implementors call [`render_container`] from `on_render`.
pub trait Container: Component {
    fn children(&self) -> &Children;

    fn children_mut(&mut self) -> &mut Children;

    /// Chrome (background, border, title) drawn before the children.
    fn on_render_container(&mut self, _ctx: &mut UiContext) -> Result<()> {
        Ok(())
    }

    /// Render children. Override for an explicit z-order.
    fn on_render_children(&mut self, ctx: &mut UiContext) -> Result<()> {
        self.children_mut().render_all(ctx)
    }

    /// Rect the children lay out against. Defaults to the padded content
    /// rect; override to reserve space for chrome such as a title line.
    fn children_rect(&self, _ctx: &UiContext) -> crate::primitives::Rect {
        self.base().content_rect()
    }

    /// Scroll offset applied to the content rect. Zero for plain containers.
    fn scroll_offset(&self) -> crate::primitives::Point {
        crate::primitives::Point::ORIGIN
    }

    fn add_child(&mut self, child: Box<dyn Component>) -> Result<ComponentId> {
        self.children_mut().add_child(child)
    }

    fn remove_child(&mut self, id: ComponentId) -> Option<Box<dyn Component>> {
        self.children_mut().remove_child(id)
    }

    fn clear_children(&mut self) {
        self.children_mut().clear_children();
    }
}

/// Two-phase container render: chrome, then children inside a nested
/// content rect. The content rect is closed when the scope guard drops, so
/// nesting stays balanced on early `Err` returns and on panics.
pub fn render_container<C: Container + ?Sized>(this: &mut C, ctx: &mut UiContext) -> Result<()> {
    this.on_render_container(ctx)?;

    let content = this.children_rect(ctx);
    let mut scope = ctx.begin_container_at(this.id(), content, this.scroll_offset())?;
    this.on_render_children(&mut scope)
}
