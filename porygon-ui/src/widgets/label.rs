//! Static text.

use crate::component::{Component, ComponentBase};
use crate::context::UiContext;
use crate::error::Result;
use crate::layout::LayoutConstraint;
use crate::primitives::{Color, Size};
use crate::render::Renderer;

/// A line (or lines) of text sized by its content unless the constraint
/// says otherwise.
pub struct Label {
    base: ComponentBase,
    text: String,
    color: Option<Color>,
}

impl Label {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            base: ComponentBase::new("label"),
            text: text.into(),
            color: None,
        }
    }

    pub fn named(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            base: ComponentBase::new(name),
            text: text.into(),
            color: None,
        }
    }

    pub fn with_constraint(mut self, constraint: LayoutConstraint) -> Self {
        self.base.set_constraint(constraint);
        self
    }

    /// Override the theme's primary foreground.
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replace the text. Re-runs layout only when the text changed.
    pub fn set_text(&mut self, text: impl Into<String>) {
        let text = text.into();
        if text != self.text {
            self.text = text;
            self.base.invalidate_layout();
        }
    }

    pub fn set_color(&mut self, color: Option<Color>) {
        self.color = color;
    }
}

impl Component for Label {
    fn base(&self) -> &ComponentBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ComponentBase {
        &mut self.base
    }

    fn intrinsic_size(&self, ctx: &UiContext) -> Option<Size> {
        Some(ctx.measure_text(&self.text))
    }

    fn on_render(&mut self, ctx: &mut UiContext) -> Result<()> {
        let color = self.color.unwrap_or(ctx.theme().fg_primary);
        let rect = self.base.rect();
        ctx.draw().draw_text(&self.text, rect.x, rect.y, color);
        Ok(())
    }
}
