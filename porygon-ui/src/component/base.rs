//! Per-component state shared by every component.

use crate::id::ComponentId;
use crate::layout::{Anchor, LayoutConstraint, LayoutResolver};
use crate::primitives::{Rect, Size};

/// Identity, visibility, constraint and cached layout of one component.
#[derive(Debug, Clone)]
pub struct ComponentBase {
    id: ComponentId,
    name: String,
    visible: bool,
    enabled: bool,
    constraint: LayoutConstraint,
    rect: Rect,
    /// Parent content rect the cached `rect` was resolved against.
    last_parent: Option<Rect>,
    layout_dirty: bool,
}

impl ComponentBase {
    /// New base with a freshly allocated id and a `TopLeft` constraint.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_id(ComponentId::new(), name)
    }

    pub fn with_id(id: ComponentId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            visible: true,
            enabled: true,
            constraint: LayoutConstraint::new(Anchor::TopLeft),
            rect: Rect::ZERO,
            last_parent: None,
            layout_dirty: true,
        }
    }

    pub fn with_constraint(mut self, constraint: LayoutConstraint) -> Self {
        self.set_constraint(constraint);
        self
    }

    pub fn id(&self) -> ComponentId {
        self.id
    }

    /// Diagnostic name. Not used for identity.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn constraint(&self) -> &LayoutConstraint {
        &self.constraint
    }

    /// Mutable access for dirty-tracked setters.
    pub fn constraint_mut(&mut self) -> &mut LayoutConstraint {
        &mut self.constraint
    }

    /// Replace the whole constraint. Always forces a re-resolve.
    pub fn set_constraint(&mut self, constraint: LayoutConstraint) {
        self.constraint = constraint;
        self.constraint.mark_dirty();
    }

    /// Rectangle resolved on the last layout pass.
    pub fn rect(&self) -> Rect {
        self.rect
    }

    /// Force a re-resolve on the next render, e.g. after content-driven
    /// size inputs (text) changed.
    pub fn invalidate_layout(&mut self) {
        if !self.layout_dirty {
            tracing::trace!(component = %self.name, id = %self.id, "layout invalidated");
        }
        self.layout_dirty = true;
    }

    /// Whether the cached rect is stale for this parent content rect.
    pub fn needs_layout(&self, parent: Rect) -> bool {
        self.layout_dirty || self.constraint.is_dirty() || self.last_parent != Some(parent)
    }

    /// Resolve against `parent` if needed. `intrinsic` is only invoked when a
    /// resolve actually happens. Returns whether layout ran.
    pub fn update_layout(
        &mut self,
        resolver: &dyn LayoutResolver,
        parent: Rect,
        intrinsic: impl FnOnce() -> Option<Size>,
    ) -> bool {
        if !self.needs_layout(parent) {
            return false;
        }
        let rect = resolver.resolve(&self.constraint, parent, intrinsic());
        self.apply_layout(rect, parent);
        true
    }

    /// Store a freshly resolved rect for `parent` and clear dirty state.
    pub fn apply_layout(&mut self, rect: Rect, parent: Rect) {
        self.rect = rect;
        self.last_parent = Some(parent);
        self.constraint.mark_clean();
        self.layout_dirty = false;
    }

    /// Inner rect children lay out against: own rect minus padding.
    pub fn content_rect(&self) -> Rect {
        self.rect.inset(&self.constraint.padding())
    }
}
