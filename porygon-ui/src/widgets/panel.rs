//! Generic themed container.

use crate::component::{render_container, Children, Component, ComponentBase, Container};
use crate::context::UiContext;
use crate::error::Result;
use crate::layout::LayoutConstraint;
use crate::primitives::{Color, Rect};
use crate::render::Renderer;

/// Background + border + optional title around a list of children.
pub struct Panel {
    base: ComponentBase,
    children: Children,
    title: Option<String>,
    background: Option<Color>,
    border: bool,
}

impl Panel {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            base: ComponentBase::new(name),
            children: Children::new(),
            title: None,
            background: None,
            border: true,
        }
    }

    pub fn with_constraint(mut self, constraint: LayoutConstraint) -> Self {
        self.base.set_constraint(constraint);
        self
    }

    /// Adds a header line; children start one line below it.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_background(mut self, color: Color) -> Self {
        self.background = Some(color);
        self
    }

    pub fn with_border(mut self, border: bool) -> Self {
        self.border = border;
        self
    }

    pub fn with_child(mut self, child: impl Component + 'static) -> Result<Self> {
        self.children.add(child)?;
        Ok(self)
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = Some(title.into());
    }
}

impl Component for Panel {
    fn base(&self) -> &ComponentBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ComponentBase {
        &mut self.base
    }

    fn on_render(&mut self, ctx: &mut UiContext) -> Result<()> {
        render_container(self, ctx)
    }
}

impl Container for Panel {
    fn children(&self) -> &Children {
        &self.children
    }

    fn children_mut(&mut self) -> &mut Children {
        &mut self.children
    }

    fn children_rect(&self, ctx: &UiContext) -> Rect {
        let content = self.base.content_rect();
        if self.title.is_none() {
            return content;
        }
        let header = ctx.line_height().min(content.height);
        Rect::new(content.x, content.y + header, content.width, content.height - header)
    }

    fn on_render_container(&mut self, ctx: &mut UiContext) -> Result<()> {
        let theme = ctx.theme();
        let background = self.background.unwrap_or(theme.bg_secondary);
        let border = theme.border;
        let thickness = theme.border_thickness;
        let title_color = theme.fg_secondary;
        let pad = self.base.constraint().padding();

        let rect = self.base.rect();
        let draw = ctx.draw();
        draw.draw_rectangle(rect, background);
        if self.border {
            draw.draw_rectangle_outline(rect, border, thickness);
        }
        if let Some(title) = &self.title {
            draw.draw_text(title, rect.x + pad.left, rect.y + pad.top, title_color);
        }
        Ok(())
    }
}
