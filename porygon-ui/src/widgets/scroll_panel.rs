//! Vertically scrolling container.
//!
//! Children lay out against a content rect shifted up by the scroll offset
//! while the clip stays on the visible area. Scroll input:
//! - wheel while the mouse is over the panel,
//! - PageUp/PageDown (with repeat) while the mouse is over the panel,
//! - dragging the scrollbar thumb, which holds pointer capture so the drag
//!   keeps tracking outside the panel until the button is released.

use crate::component::{render_container, Children, Component, ComponentBase, Container};
use crate::context::UiContext;
use crate::error::Result;
use crate::id::ComponentId;
use crate::input::{Key, MouseButton, NamedKey};
use crate::layout::LayoutConstraint;
use crate::primitives::{Point, Rect};
use crate::render::Renderer;

/// Pixels scrolled per wheel unit.
const WHEEL_STEP: f32 = 40.0;

/// Smallest thumb height, so very long content stays grabbable.
const MIN_THUMB: f32 = 20.0;

/// Grab tolerance for thumb clicks (absorbs float rounding).
const GRAB_TOLERANCE: f32 = 4.0;

/// Scroll track geometry for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollTrack {
    pub track_y: f32,
    pub track_height: f32,
    pub thumb_height: f32,
    pub max_scroll: f32,
}

impl ScrollTrack {
    fn new(track: Rect, content_height: f32, max_scroll: f32) -> Self {
        let ratio = if content_height > 0.0 {
            (track.height / content_height).min(1.0)
        } else {
            1.0
        };
        Self {
            track_y: track.y,
            track_height: track.height,
            thumb_height: (track.height * ratio).max(MIN_THUMB).min(track.height),
            max_scroll,
        }
    }

    /// Scroll offset for a mouse Y, keeping the grab point under the cursor.
    pub fn offset_from_y(&self, mouse_y: f32, grab_offset: f32) -> f32 {
        let available = self.track_height - self.thumb_height;
        if available <= 0.0 {
            return 0.0;
        }
        let thumb_top = mouse_y - grab_offset;
        let relative = (thumb_top - self.track_y).clamp(0.0, available);
        (relative / available) * self.max_scroll
    }

    /// Thumb top Y for a scroll offset.
    pub fn thumb_y(&self, scroll_offset: f32) -> f32 {
        let available = self.track_height - self.thumb_height;
        if available <= 0.0 || self.max_scroll <= 0.0 {
            return self.track_y;
        }
        self.track_y + (scroll_offset / self.max_scroll) * available
    }
}

pub struct ScrollPanel {
    base: ComponentBase,
    children: Children,
    offset: f32,
    max: f32,
    content_height: f32,
    grab_offset: f32,
    /// Interactive id for the scrollbar track (thumb included).
    track_id: ComponentId,
}

impl ScrollPanel {
    pub fn new(name: impl Into<String>) -> Self {
        let base = ComponentBase::new(name);
        let track_id = base.id().child(1);
        Self {
            base,
            children: Children::new(),
            offset: 0.0,
            max: 0.0,
            content_height: 0.0,
            grab_offset: 0.0,
            track_id,
        }
    }

    pub fn with_constraint(mut self, constraint: LayoutConstraint) -> Self {
        self.base.set_constraint(constraint);
        self
    }

    pub fn with_child(mut self, child: impl Component + 'static) -> Result<Self> {
        self.children.add(child)?;
        Ok(self)
    }

    pub fn offset(&self) -> f32 {
        self.offset
    }

    pub fn max_offset(&self) -> f32 {
        self.max
    }

    /// Height of the children's extent measured on the last render.
    pub fn content_height(&self) -> f32 {
        self.content_height
    }

    pub fn track_id(&self) -> ComponentId {
        self.track_id
    }

    /// Scroll by a delta (positive = toward the start).
    pub fn scroll_by(&mut self, delta: f32) {
        self.offset = (self.offset - delta).clamp(0.0, self.max);
    }

    pub fn scroll_to(&mut self, offset: f32) {
        self.offset = offset.clamp(0.0, self.max);
    }

    pub fn scroll_to_end(&mut self) {
        self.offset = self.max;
    }

    pub fn is_at_end(&self) -> bool {
        self.offset >= self.max - 0.5
    }

    fn visible_rect(&self) -> Rect {
        self.base.rect().inset(&self.base.constraint().padding())
    }

    fn track_rect(&self, scrollbar_width: f32) -> Rect {
        let visible = self.visible_rect();
        Rect::new(visible.right() - scrollbar_width, visible.y, scrollbar_width, visible.height)
    }

    fn handle_scroll_input(&mut self, ctx: &mut UiContext) {
        let mouse = ctx.input().mouse_position();
        let over = self.base.rect().contains(mouse) && ctx.clip_rect().contains(mouse);
        if !over {
            return;
        }

        let wheel = ctx.input().wheel_delta();
        if wheel != 0.0 && self.max > 0.0 {
            self.scroll_by(wheel * WHEEL_STEP);
            ctx.input_mut().consume_wheel();
        }

        let page = self.visible_rect().height;
        if ctx.input_mut().take_key_pressed_with_repeat(Key::Named(NamedKey::PageDown)) {
            self.scroll_by(-page);
        }
        if ctx.input_mut().take_key_pressed_with_repeat(Key::Named(NamedKey::PageUp)) {
            self.scroll_by(page);
        }
    }

    fn handle_thumb(&mut self, ctx: &mut UiContext, track: ScrollTrack) {
        let mouse_y = ctx.input().mouse_position().y;

        if ctx.is_hovered(self.track_id) && ctx.input().is_mouse_button_pressed(MouseButton::Left) {
            let thumb_top = track.thumb_y(self.offset);
            let thumb_bottom = thumb_top + track.thumb_height;
            if mouse_y >= thumb_top - GRAB_TOLERANCE && mouse_y <= thumb_bottom + GRAB_TOLERANCE {
                self.grab_offset = mouse_y - thumb_top;
            } else {
                // Track click: jump the thumb center to the cursor.
                self.grab_offset = track.thumb_height / 2.0;
                self.scroll_to(track.offset_from_y(mouse_y, self.grab_offset));
            }
            ctx.capture_input(self.track_id);
            ctx.input_mut().consume_mouse_button(MouseButton::Left);
        } else if ctx.is_captured_by(self.track_id) && ctx.input().is_mouse_button_down(MouseButton::Left) {
            self.scroll_to(track.offset_from_y(mouse_y, self.grab_offset));
        }
    }
}

impl Component for ScrollPanel {
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

impl Container for ScrollPanel {
    fn children(&self) -> &Children {
        &self.children
    }

    fn children_mut(&mut self) -> &mut Children {
        &mut self.children
    }

    fn scroll_offset(&self) -> Point {
        Point::new(0.0, self.offset)
    }

    fn on_render_container(&mut self, ctx: &mut UiContext) -> Result<()> {
        self.offset = self.offset.clamp(0.0, self.max);
        let theme = ctx.theme();
        let (background, border, thickness) = (theme.bg_primary, theme.border, theme.border_thickness);
        let rect = self.base.rect();
        ctx.draw().draw_rectangle(rect, background);
        ctx.draw().draw_rectangle_outline(rect, border, thickness);
        Ok(())
    }

    /// Children first, then the scrollbar on top of them.
    fn on_render_children(&mut self, ctx: &mut UiContext) -> Result<()> {
        self.children.render_all(ctx)?;

        let content = ctx.content_rect();
        let extent = self
            .children
            .iter()
            .filter(|c| c.is_visible())
            .map(|c| c.rect())
            .fold(Rect::new(content.x, content.y, 0.0, 0.0), |acc, r| acc.union(&r));
        let visible = self.visible_rect();
        self.content_height = extent.bottom() - content.y;
        self.max = (self.content_height - visible.height).max(0.0);

        // Inner scroll panels rendered above already had their chance at the wheel.
        self.handle_scroll_input(ctx);

        if self.max <= 0.0 {
            return Ok(());
        }

        let theme = ctx.theme();
        let (width, track_color, thumb_color, active_color) = (
            theme.scrollbar_width,
            theme.scrollbar_track,
            theme.scrollbar_thumb,
            theme.accent,
        );
        let track_rect = self.track_rect(width);
        ctx.register(self.track_id, track_rect, true)?;

        let track = ScrollTrack::new(track_rect, self.content_height, self.max);
        self.handle_thumb(ctx, track);

        let thumb = Rect::new(track_rect.x, track.thumb_y(self.offset), width, track.thumb_height);
        let thumb_color = if ctx.is_captured_by(self.track_id) {
            active_color
        } else {
            thumb_color
        };
        ctx.draw().draw_rectangle(track_rect, track_color);
        ctx.draw().draw_rectangle(thumb, thumb_color);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn track() -> ScrollTrack {
        ScrollTrack {
            track_y: 0.0,
            track_height: 100.0,
            thumb_height: 20.0,
            max_scroll: 400.0,
        }
    }

    #[test]
    fn scroll_by_clamps() {
        let mut panel = ScrollPanel::new("scroll");
        panel.max = 100.0;

        panel.scroll_by(-50.0);
        assert_eq!(panel.offset(), 50.0);

        panel.scroll_by(-200.0);
        assert_eq!(panel.offset(), 100.0);

        panel.scroll_by(300.0);
        assert_eq!(panel.offset(), 0.0);
    }

    #[test]
    fn thumb_position_tracks_offset() {
        let t = track();
        assert_eq!(t.thumb_y(0.0), 0.0);
        assert_eq!(t.thumb_y(400.0), 80.0);
        assert_eq!(t.thumb_y(200.0), 40.0);
    }

    #[test]
    fn offset_from_y_keeps_grab_point() {
        let t = track();
        assert_eq!(t.offset_from_y(50.0, 10.0), 200.0);
        assert_eq!(t.offset_from_y(-100.0, 0.0), 0.0);
        assert_eq!(t.offset_from_y(500.0, 0.0), 400.0);
    }

    #[test]
    fn thumb_height_is_proportional_with_floor() {
        let t = ScrollTrack::new(Rect::new(0.0, 0.0, 8.0, 100.0), 200.0, 100.0);
        assert_eq!(t.thumb_height, 50.0);
        let long = ScrollTrack::new(Rect::new(0.0, 0.0, 8.0, 100.0), 100_000.0, 99_900.0);
        assert_eq!(long.thumb_height, MIN_THUMB);
    }
}
