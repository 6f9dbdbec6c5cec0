//! Clickable button.

use crate::component::{Component, ComponentBase};
use crate::context::UiContext;
use crate::error::Result;
use crate::input::{Key, NamedKey};
use crate::layout::LayoutConstraint;
use crate::primitives::Size;
use crate::render::Renderer;

type ClickHandler = Box<dyn FnMut()>;

/// A text button. Activates on mouse click or on Enter while focused.
pub struct Button {
    base: ComponentBase,
    label: String,
    on_click: Option<ClickHandler>,
    clicks: u64,
}

impl Button {
    pub fn new(label: impl Into<String>) -> Self {
        let label = label.into();
        Self {
            base: ComponentBase::new(format!("button:{label}")),
            label,
            on_click: None,
            clicks: 0,
        }
    }

    pub fn with_constraint(mut self, constraint: LayoutConstraint) -> Self {
        self.base.set_constraint(constraint);
        self
    }

    pub fn with_on_click(mut self, handler: impl FnMut() + 'static) -> Self {
        self.on_click = Some(Box::new(handler));
        self
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn set_label(&mut self, label: impl Into<String>) {
        let label = label.into();
        if label != self.label {
            self.label = label;
            self.base.invalidate_layout();
        }
    }

    /// Total activations so far.
    pub fn clicks(&self) -> u64 {
        self.clicks
    }

    fn activate(&mut self) {
        self.clicks += 1;
        tracing::debug!(button = %self.label, "button activated");
        if let Some(handler) = self.on_click.as_mut() {
            handler();
        }
    }
}

impl Component for Button {
    fn base(&self) -> &ComponentBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ComponentBase {
        &mut self.base
    }

    fn is_interactive(&self) -> bool {
        true
    }

    fn intrinsic_size(&self, ctx: &UiContext) -> Option<Size> {
        let text = ctx.measure_text(&self.label);
        let pad = ctx.theme().padding;
        Some(Size::new(text.width + pad * 4.0, text.height + pad * 2.0))
    }

    fn on_render(&mut self, ctx: &mut UiContext) -> Result<()> {
        let id = self.base.id();
        let enabled = self.base.is_enabled();

        let mut activated = enabled && ctx.was_clicked(id);
        if enabled && ctx.is_focused(id) && ctx.input_mut().take_key_pressed(Key::Named(NamedKey::Enter)) {
            activated = true;
        }
        if activated {
            self.activate();
        }

        let theme = ctx.theme();
        let fill = if !enabled {
            theme.bg_tertiary.with_alpha(0.5)
        } else if ctx.is_pressed(id) {
            theme.accent_pressed
        } else if ctx.is_hovered(id) {
            theme.accent_hover
        } else {
            theme.bg_tertiary
        };
        let border = if ctx.is_focused(id) {
            theme.border_focused
        } else {
            theme.border
        };
        let text_color = if enabled { theme.fg_primary } else { theme.fg_muted };
        let thickness = theme.border_thickness;

        let rect = self.base.rect();
        let text = ctx.measure_text(&self.label);
        let center = rect.center();
        let draw = ctx.draw();
        draw.draw_rectangle(rect, fill);
        draw.draw_rectangle_outline(rect, border, thickness);
        draw.draw_text(
            &self.label,
            center.x - text.width / 2.0,
            center.y - text.height / 2.0,
            text_color,
        );
        Ok(())
    }
}
