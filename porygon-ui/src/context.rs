//! Per-session frame context.
//!
//! `UiContext` owns everything that lives across components for one debug-UI
//! session: the input snapshot, the container stack, hover/focus/press/capture
//! bookkeeping and the frame's draw list.
//!
//! # Frame order
//!
//! ```text
//! begin_frame(input, theme)
//! update_hover_state()      // pre-pass: last frame's registrations
//! root.render(ctx)          // components register in z-order
//! update_pressed_state()    // authoritative hover, then press/click/focus
//! end_frame() -> FrameStats
//! ```
//!
//! [`UiContext::run_frame`] performs exactly this sequence.

use std::ops::{Deref, DerefMut};
use std::sync::Arc;

use crate::component::Component;
use crate::error::{Result, UiError};
use crate::frame_timing;
use crate::id::ComponentId;
use crate::input::{InputSample, InputState, MouseButton};
use crate::layout::{AnchorResolver, LayoutConstraint, LayoutResolver};
use crate::primitives::{Point, Rect, Size};
use crate::render::{DrawList, Renderer, TextMetrics};
use crate::theme::Theme;

/// Exclusive pointer capture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CaptureState {
    /// Input routes by hover.
    #[default]
    None,
    /// All pointer input goes to this component until released.
    Captured(ComponentId),
}

impl CaptureState {
    pub fn is_captured(&self) -> bool {
        matches!(self, CaptureState::Captured(_))
    }

    pub fn captured_by(&self) -> Option<ComponentId> {
        match self {
            CaptureState::Captured(id) => Some(*id),
            CaptureState::None => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FramePhase {
    Idle,
    InFrame,
}

/// One open container.
#[derive(Debug, Clone, Copy)]
struct ContainerEntry {
    /// `None` for the root (viewport) entry.
    id: Option<ComponentId>,
    /// Rect children resolve against (padding applied, scroll shifted).
    content_rect: Rect,
    /// Effective clip: intersection with every enclosing clip.
    clip: Rect,
}

/// A component's footprint for this frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Registration {
    pub id: ComponentId,
    pub rect: Rect,
    pub clip: Rect,
    pub interactive: bool,
}

impl Registration {
    /// Visible part of the rect contains the point.
    #[inline]
    pub fn hit(&self, point: Point) -> bool {
        self.rect.contains(point) && self.clip.contains(point)
    }
}

/// Summary returned by [`UiContext::end_frame`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FrameStats {
    pub frame: u64,
    pub registrations: usize,
    pub layout_resolves: usize,
    pub max_depth: usize,
    pub draw_commands: usize,
    pub culled: usize,
    pub hovered: Option<ComponentId>,
    pub focused: Option<ComponentId>,
}

/// Frame engine state for one UI session.
pub struct UiContext {
    phase: FramePhase,
    frame: u64,
    input: InputState,
    theme: Arc<Theme>,
    resolver: Box<dyn LayoutResolver>,
    draw: DrawList,
    viewport: Rect,

    stack: Vec<ContainerEntry>,
    max_depth: usize,
    layout_resolves: usize,

    registrations: Vec<Registration>,
    previous: Vec<Registration>,

    hovered: Option<ComponentId>,
    /// Hover candidate carried over from last frame that has not
    /// re-registered yet this frame.
    stale_hover: bool,
    focused: Option<ComponentId>,
    pressed: Option<ComponentId>,
    clicked: Option<ComponentId>,
    /// Component under the pointer on the last left-button press edge.
    press_origin: Option<ComponentId>,
    capture: CaptureState,
    left_was_down: bool,
}

impl UiContext {
    pub fn new(viewport: Size) -> Self {
        let viewport = Rect::new(0.0, 0.0, viewport.width, viewport.height);
        Self {
            phase: FramePhase::Idle,
            frame: 0,
            input: InputState::new(),
            theme: Arc::new(Theme::default()),
            resolver: Box::new(AnchorResolver),
            draw: DrawList::new(),
            viewport,
            stack: vec![Self::root_entry(viewport)],
            max_depth: 0,
            layout_resolves: 0,
            registrations: Vec::new(),
            previous: Vec::new(),
            hovered: None,
            stale_hover: false,
            focused: None,
            pressed: None,
            clicked: None,
            press_origin: None,
            capture: CaptureState::None,
            left_was_down: false,
        }
    }

    /// Swap the layout resolver.
    pub fn with_resolver(mut self, resolver: impl LayoutResolver + 'static) -> Self {
        self.resolver = Box::new(resolver);
        self
    }

    /// Swap the text metrics used for measurement and culling.
    pub fn with_metrics(mut self, metrics: impl TextMetrics + Send + 'static) -> Self {
        self.draw = DrawList::with_metrics(metrics);
        self
    }

    pub fn with_input(mut self, input: InputState) -> Self {
        self.input = input;
        self
    }

    fn root_entry(viewport: Rect) -> ContainerEntry {
        ContainerEntry {
            id: None,
            content_rect: viewport,
            clip: viewport,
        }
    }

    // =====================================================================
    // Frame lifecycle
    // =====================================================================

    /// Open a frame: roll input, install the theme, clear this frame's
    /// registrations and draw list, reset the stack to the viewport.
    pub fn begin_frame(&mut self, input: InputSample, theme: Arc<Theme>) -> Result<()> {
        if self.phase == FramePhase::InFrame {
            return Err(UiError::FrameAlreadyActive);
        }
        self.phase = FramePhase::InFrame;
        self.frame += 1;
        self.input.advance(input);
        self.theme = theme;
        self.registrations.clear();
        self.stack.clear();
        self.stack.push(Self::root_entry(self.viewport));
        self.max_depth = 0;
        self.layout_resolves = 0;
        self.draw.clear();
        Ok(())
    }

    /// Pre-render hover from last frame's registrations.
    pub fn update_hover_state(&mut self) -> Result<()> {
        self.ensure_in_frame("update_hover_state")?;
        let mouse = self.input.mouse_position();
        self.hovered = topmost_hit(&self.previous, mouse).map(|r| r.id);
        self.stale_hover = self.hovered.is_some();
        Ok(())
    }

    /// Post-render: authoritative hover from this frame's registrations,
    /// then press, click, focus and capture release.
    pub fn update_pressed_state(&mut self) -> Result<()> {
        self.ensure_in_frame("update_pressed_state")?;
        let mouse = self.input.mouse_position();
        let top = topmost_hit(&self.registrations, mouse).copied();
        self.hovered = top.map(|r| r.id);
        self.stale_hover = false;

        let left_down = self.input.is_mouse_button_down(MouseButton::Left);
        let press_edge = left_down && !self.left_was_down;
        let release_edge = !left_down && self.left_was_down;
        self.left_was_down = left_down;


        self.pressed = match self.capture {
            CaptureState::Captured(holder) => {
                if left_down {
                    Some(holder)
                } else {
                    if release_edge {
                        tracing::debug!(%holder, "capture released on button up");
                        self.capture = CaptureState::None;
                    }
                    None
                }
            }
            CaptureState::None => top.filter(|r| r.interactive && left_down).map(|r| r.id),
        };

        if press_edge {
            self.press_origin = self.pressed;
            match self.pressed {
                Some(id) => self.focused = Some(id),
                None => self.focused = None,
            }
        }

        // A click needs press and release over the same component.
        self.clicked = None;
        if release_edge {
            if let Some(origin) = self.press_origin.take() {
                if self.hovered == Some(origin) {
                    self.clicked = Some(origin);
                }
            }
        }

        Ok(())
    }

    /// Close the frame. Rotates registrations, drops focus/capture held by
    /// components that did not render, and reports stats.
    pub fn end_frame(&mut self) -> Result<FrameStats> {
        self.ensure_in_frame("end_frame")?;

        let open = self.stack.len() - 1;
        if open > 0 {
            tracing::warn!(depth = open, frame = self.frame, "unbalanced container stack at end of frame");
            self.unwind_to(1);
        }

        if let Some(id) = self.focused {
            if !self.registrations.iter().any(|r| r.id == id) {
                tracing::debug!(%id, "focus dropped: component not rendered");
                self.focused = None;
            }
        }
        if let CaptureState::Captured(id) = self.capture {
            if !self.registrations.iter().any(|r| r.id == id) {
                tracing::debug!(%id, "capture dropped: component not rendered");
                self.capture = CaptureState::None;
            }
        }

        let stats = FrameStats {
            frame: self.frame,
            registrations: self.registrations.len(),
            layout_resolves: self.layout_resolves,
            max_depth: self.max_depth,
            draw_commands: self.draw.len(),
            culled: self.draw.culled(),
            hovered: self.hovered,
            focused: self.focused,
        };

        std::mem::swap(&mut self.registrations, &mut self.previous);
        self.registrations.clear();
        self.phase = FramePhase::Idle;

        frame_timing::stat("registrations", self.frame, stats.registrations);
        frame_timing::stat("draw_commands", self.frame, stats.draw_commands);

        if open > 0 {
            return Err(UiError::UnbalancedContainers { depth: open });
        }
        Ok(stats)
    }

    /// Run one complete frame for `root` in the required order.
    ///
    /// A render error still closes the frame so the context stays usable;
    /// the error is returned after `end_frame`.
    pub fn run_frame(&mut self, input: InputSample, theme: Arc<Theme>, root: &mut dyn Component) -> Result<FrameStats> {
        self.begin_frame(input, theme)?;
        let frame = self.frame;
        let rendered = self
            .update_hover_state()
            .and_then(|()| frame_timing::measure("render", frame, || root.render(self)));
        self.update_pressed_state()?;
        let stats = self.end_frame();
        rendered?;
        stats
    }

    pub fn is_in_frame(&self) -> bool {
        self.phase == FramePhase::InFrame
    }

    /// Fail fast with `NotInFrame` outside a begin/end bracket.
    pub fn ensure_in_frame(&self, operation: &'static str) -> Result<()> {
        if self.phase == FramePhase::InFrame {
            Ok(())
        } else {
            Err(UiError::NotInFrame { operation })
        }
    }

    pub fn frame_number(&self) -> u64 {
        self.frame
    }

    // =====================================================================
    // Layout and containers
    // =====================================================================

    /// Resolve through this context's resolver.
    pub fn resolve_layout(&mut self, constraint: &LayoutConstraint, parent: Rect, intrinsic: Option<Size>) -> Rect {
        self.layout_resolves += 1;
        self.resolver.resolve(constraint, parent, intrinsic)
    }

    /// Content rect of the innermost open container (the viewport at root).
    pub fn content_rect(&self) -> Rect {
        self.top().content_rect
    }

    /// Effective clip of the innermost open container.
    pub fn clip_rect(&self) -> Rect {
        self.top().clip
    }

    /// Open containers, not counting the root.
    pub fn container_depth(&self) -> usize {
        self.stack.len() - 1
    }

    /// Id of the innermost open container.
    pub fn current_container(&self) -> Option<ComponentId> {
        self.top().id
    }

    fn top(&self) -> &ContainerEntry {
        // The root entry is never popped.
        &self.stack[self.stack.len() - 1]
    }

    /// Open a container whose content area is `constraint` resolved against
    /// the current content rect. The returned guard closes it on drop.
    pub fn begin_container(&mut self, id: ComponentId, constraint: &LayoutConstraint) -> Result<ContainerScope<'_>> {
        self.begin_scroll_container(id, constraint, Point::ORIGIN)
    }

    /// Like [`begin_container`](Self::begin_container), with children laid
    /// out shifted by `-scroll` while the clip stays on the visible area.
    pub fn begin_scroll_container(
        &mut self,
        id: ComponentId,
        constraint: &LayoutConstraint,
        scroll: Point,
    ) -> Result<ContainerScope<'_>> {
        let depth = self.stack.len();
        self.push_container(id, constraint, scroll)?;
        Ok(ContainerScope { ctx: self, depth })
    }

    /// Open a container over an already resolved content rect.
    pub fn begin_container_at(&mut self, id: ComponentId, content: Rect, scroll: Point) -> Result<ContainerScope<'_>> {
        self.ensure_in_frame("begin_container")?;
        let depth = self.stack.len();
        self.push_entry(id, content, scroll);
        Ok(ContainerScope { ctx: self, depth })
    }

    /// Manual counterpart of `begin_container`. Must be paired with
    /// [`pop_container`](Self::pop_container).
    pub fn push_container(&mut self, id: ComponentId, constraint: &LayoutConstraint, scroll: Point) -> Result<()> {
        self.ensure_in_frame("begin_container")?;
        let parent = self.content_rect();
        let visible = self.resolve_layout(constraint, parent, None);
        self.push_entry(id, visible, scroll);
        Ok(())
    }

    fn push_entry(&mut self, id: ComponentId, visible: Rect, scroll: Point) {
        let parent = *self.top();
        let clip = parent
            .clip
            .intersection(&visible)
            .unwrap_or(Rect::new(visible.x, visible.y, 0.0, 0.0));

        self.stack.push(ContainerEntry {
            id: Some(id),
            content_rect: visible.translate(Point::new(-scroll.x, -scroll.y)),
            clip,
        });
        self.max_depth = self.max_depth.max(self.container_depth());
        self.draw.push_clip(clip);
    }

    pub fn pop_container(&mut self) -> Result<()> {
        self.ensure_in_frame("end_container")?;
        if self.stack.len() <= 1 {
            return Err(UiError::ContainerUnderflow);
        }
        self.stack.pop();
        self.draw.pop_clip();
        Ok(())
    }

    /// Close containers until `depth` entries remain (root counts as one).
    fn unwind_to(&mut self, depth: usize) {
        let depth = depth.max(1);
        while self.stack.len() > depth {
            self.stack.pop();
            self.draw.pop_clip();
        }
    }

    // =====================================================================
    // Registration and hover
    // =====================================================================

    /// Record a component's rect for this frame, in z-order.
    pub fn register(&mut self, id: ComponentId, rect: Rect, interactive: bool) -> Result<()> {
        self.ensure_in_frame("register")?;
        let registration = Registration {
            id,
            rect,
            clip: self.clip_rect(),
            interactive,
        };
        self.registrations.push(registration);

        let hit = registration.hit(self.input.mouse_position());
        let pending_other = self.stale_hover && self.hovered.is_some_and(|h| h != id);
        if self.stale_hover && self.hovered == Some(id) {
            self.stale_hover = false;
            if !hit {
                self.hovered = None;
            }
        } else if hit && !pending_other {
            self.hovered = Some(id);
        }
        Ok(())
    }

    /// This frame's rect for `id`, falling back to last frame's.
    pub fn registered_rect(&self, id: ComponentId) -> Option<Rect> {
        self.registrations
            .iter()
            .rev()
            .chain(self.previous.iter().rev())
            .find(|r| r.id == id)
            .map(|r| r.rect)
    }

    pub fn registrations(&self) -> &[Registration] {
        &self.registrations
    }

    pub fn hovered(&self) -> Option<ComponentId> {
        self.hovered
    }

    pub fn is_hovered(&self, id: ComponentId) -> bool {
        self.hovered == Some(id)
    }

    pub fn pressed(&self) -> Option<ComponentId> {
        self.pressed
    }

    pub fn is_pressed(&self, id: ComponentId) -> bool {
        self.pressed == Some(id)
    }

    /// Released over the same component that was pressed. Set by
    /// `update_pressed_state` and visible during the following render.
    pub fn was_clicked(&self, id: ComponentId) -> bool {
        self.clicked == Some(id)
    }

    // =====================================================================
    // Focus
    // =====================================================================

    pub fn set_focus(&mut self, id: ComponentId) {
        self.focused = Some(id);
    }

    pub fn clear_focus(&mut self) {
        self.focused = None;
    }

    pub fn is_focused(&self, id: ComponentId) -> bool {
        self.focused == Some(id)
    }

    pub fn focused(&self) -> Option<ComponentId> {
        self.focused
    }

    // =====================================================================
    // Capture
    // =====================================================================

    /// Route all pointer input to `id`. The last caller wins.
    pub fn capture_input(&mut self, id: ComponentId) {
        match self.capture {
            CaptureState::Captured(previous) if previous == id => {}
            CaptureState::Captured(previous) => {
                tracing::debug!(%previous, %id, "capture reassigned");
                self.capture = CaptureState::Captured(id);
            }
            CaptureState::None => {
                tracing::debug!(%id, "capture acquired");
                self.capture = CaptureState::Captured(id);
            }
        }
    }

    pub fn release_capture(&mut self) {
        if let CaptureState::Captured(id) = self.capture {
            tracing::debug!(%id, "capture released");
        }
        self.capture = CaptureState::None;
    }

    pub fn capture(&self) -> CaptureState {
        self.capture
    }

    pub fn is_captured_by(&self, id: ComponentId) -> bool {
        self.capture == CaptureState::Captured(id)
    }

    /// Whether pointer input should go to `id` right now: the capture
    /// holder, or the hovered component when nothing holds capture.
    pub fn is_input_target(&self, id: ComponentId) -> bool {
        match self.capture {
            CaptureState::Captured(holder) => holder == id,
            CaptureState::None => self.hovered == Some(id),
        }
    }

    // =====================================================================
    // Input, theme, drawing
    // =====================================================================

    pub fn input(&self) -> &InputState {
        &self.input
    }

    pub fn input_mut(&mut self) -> &mut InputState {
        &mut self.input
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn theme_arc(&self) -> Arc<Theme> {
        Arc::clone(&self.theme)
    }

    pub fn draw(&mut self) -> &mut DrawList {
        &mut self.draw
    }

    pub fn draw_list(&self) -> &DrawList {
        &self.draw
    }

    pub fn measure_text(&self, text: &str) -> Size {
        self.draw.measure_text(text)
    }

    pub fn line_height(&self) -> f32 {
        self.draw.line_height()
    }

    pub fn text_metrics(&self) -> &dyn TextMetrics {
        self.draw.metrics()
    }

    pub fn viewport(&self) -> Rect {
        self.viewport
    }

    /// Takes effect at the next `begin_frame`.
    pub fn set_viewport(&mut self, size: Size) {
        self.viewport = Rect::new(0.0, 0.0, size.width, size.height);
    }
}

impl std::fmt::Debug for UiContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UiContext")
            .field("phase", &self.phase)
            .field("frame", &self.frame)
            .field("viewport", &self.viewport)
            .field("depth", &self.container_depth())
            .field("hovered", &self.hovered)
            .field("focused", &self.focused)
            .field("pressed", &self.pressed)
            .field("capture", &self.capture)
            .finish_non_exhaustive()
    }
}

fn topmost_hit(registrations: &[Registration], point: Point) -> Option<&Registration> {
    registrations.iter().rev().find(|r| r.hit(point))
}

/// Open container guard. Derefs to the context so children render through
/// it; dropping it closes the container and anything left open inside.
pub struct ContainerScope<'a> {
    ctx: &'a mut UiContext,
    depth: usize,
}

impl ContainerScope<'_> {
    /// Close explicitly. Same as dropping.
    pub fn end(self) {}
}

impl Deref for ContainerScope<'_> {
    type Target = UiContext;

    fn deref(&self) -> &UiContext {
        self.ctx
    }
}

impl DerefMut for ContainerScope<'_> {
    fn deref_mut(&mut self) -> &mut UiContext {
        self.ctx
    }
}

impl Drop for ContainerScope<'_> {
    fn drop(&mut self) {
        self.ctx.unwind_to(self.depth);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{Key, NamedKey};
    use crate::layout::Anchor;

    fn ctx() -> UiContext {
        UiContext::new(Size::new(800.0, 600.0))
    }

    fn theme() -> Arc<Theme> {
        Arc::new(Theme::dark())
    }

    fn frame(ctx: &mut UiContext, sample: InputSample, body: impl FnOnce(&mut UiContext)) -> FrameStats {
        ctx.begin_frame(sample, theme()).unwrap();
        ctx.update_hover_state().unwrap();
        body(ctx);
        ctx.update_pressed_state().unwrap();
        ctx.end_frame().unwrap()
    }

    #[test]
    fn calls_outside_frame_fail_fast() {
        let mut ctx = ctx();
        let id = ComponentId::new();
        assert!(matches!(
            ctx.register(id, Rect::ZERO, false),
            Err(UiError::NotInFrame { operation: "register" })
        ));
        assert!(matches!(ctx.end_frame(), Err(UiError::NotInFrame { .. })));
        assert!(ctx.begin_container(id, &LayoutConstraint::fill()).is_err());
    }

    #[test]
    fn begin_frame_twice_is_an_error() {
        let mut ctx = ctx();
        ctx.begin_frame(InputSample::at(0.0), theme()).unwrap();
        assert!(matches!(
            ctx.begin_frame(InputSample::at(0.0), theme()),
            Err(UiError::FrameAlreadyActive)
        ));
    }

    #[test]
    fn scope_guard_restores_depth() {
        let mut ctx = ctx();
        ctx.begin_frame(InputSample::at(0.0), theme()).unwrap();
        {
            let mut outer = ctx.begin_container(ComponentId::new(), &LayoutConstraint::fill()).unwrap();
            assert_eq!(outer.container_depth(), 1);
            let inner = outer
                .begin_container(ComponentId::new(), &LayoutConstraint::new(Anchor::TopLeft).with_size(10.0, 10.0))
                .unwrap();
            assert_eq!(inner.container_depth(), 2);
        }
        assert_eq!(ctx.container_depth(), 0);
        assert_eq!(ctx.draw_list().clip_depth(), 0);
        let stats = ctx.end_frame().unwrap();
        assert_eq!(stats.max_depth, 2);
    }

    #[test]
    fn manual_pop_underflow() {
        let mut ctx = ctx();
        ctx.begin_frame(InputSample::at(0.0), theme()).unwrap();
        assert!(matches!(ctx.pop_container(), Err(UiError::ContainerUnderflow)));
    }

    #[test]
    fn unbalanced_frame_is_reported_and_reset() {
        let mut ctx = ctx();
        ctx.begin_frame(InputSample::at(0.0), theme()).unwrap();
        ctx.push_container(ComponentId::new(), &LayoutConstraint::fill(), Point::ORIGIN)
            .unwrap();
        assert!(matches!(ctx.end_frame(), Err(UiError::UnbalancedContainers { depth: 1 })));
        assert_eq!(ctx.container_depth(), 0);
        assert!(!ctx.is_in_frame());
        ctx.begin_frame(InputSample::at(0.1), theme()).unwrap();
    }

    #[test]
    fn nested_content_rect_and_clip() {
        let mut ctx = ctx();
        ctx.begin_frame(InputSample::at(0.0), theme()).unwrap();
        let outer = LayoutConstraint::new(Anchor::TopLeft)
            .with_offset(100.0, 100.0)
            .with_size(200.0, 200.0);
        let mut scope = ctx.begin_container(ComponentId::new(), &outer).unwrap();
        assert_eq!(scope.content_rect(), Rect::new(100.0, 100.0, 200.0, 200.0));

        let spill = LayoutConstraint::new(Anchor::TopLeft)
            .with_offset(150.0, 150.0)
            .with_size(200.0, 200.0);
        let inner = scope.begin_container(ComponentId::new(), &spill).unwrap();
        assert_eq!(inner.content_rect(), Rect::new(250.0, 250.0, 200.0, 200.0));
        assert_eq!(inner.clip_rect(), Rect::new(250.0, 250.0, 50.0, 50.0));
    }

    #[test]
    fn scroll_container_shifts_layout_not_clip() {
        let mut ctx = ctx();
        ctx.begin_frame(InputSample::at(0.0), theme()).unwrap();
        let c = LayoutConstraint::new(Anchor::TopLeft).with_size(100.0, 100.0);
        let scope = ctx
            .begin_scroll_container(ComponentId::new(), &c, Point::new(0.0, 40.0))
            .unwrap();
        assert_eq!(scope.content_rect(), Rect::new(0.0, -40.0, 100.0, 100.0));
        assert_eq!(scope.clip_rect(), Rect::new(0.0, 0.0, 100.0, 100.0));
    }

    #[test]
    fn topmost_registration_wins_hover() {
        let mut ctx = ctx();
        let below = ComponentId::new();
        let above = ComponentId::new();
        let sample = InputSample::at(0.0).with_mouse(50.0, 50.0);
        let stats = frame(&mut ctx, sample, |ctx| {
            ctx.register(below, Rect::new(0.0, 0.0, 100.0, 100.0), true).unwrap();
            ctx.register(above, Rect::new(25.0, 25.0, 100.0, 100.0), true).unwrap();
        });
        assert_eq!(stats.hovered, Some(above));
    }

    #[test]
    fn clipped_part_does_not_hover() {
        let mut ctx = ctx();
        let id = ComponentId::new();
        let sample = InputSample::at(0.0).with_mouse(150.0, 10.0);
        frame(&mut ctx, sample, |ctx| {
            let clip = LayoutConstraint::new(Anchor::TopLeft).with_size(100.0, 100.0);
            let mut scope = ctx.begin_container(ComponentId::new(), &clip).unwrap();
            scope.register(id, Rect::new(0.0, 0.0, 300.0, 20.0), true).unwrap();
        });
        assert_eq!(ctx.hovered(), None);
    }

    #[test]
    fn stale_candidate_blocks_lower_components_until_it_registers() {
        let mut ctx = ctx();
        let below = ComponentId::new();
        let above = ComponentId::new();
        let mouse = InputSample::at(0.0).with_mouse(10.0, 10.0);
        let full = Rect::new(0.0, 0.0, 100.0, 100.0);

        frame(&mut ctx, mouse.clone(), |ctx| {
            ctx.register(below, full, true).unwrap();
            ctx.register(above, full, true).unwrap();
        });

        ctx.begin_frame(mouse.clone().at_time(0.1), theme()).unwrap();
        ctx.update_hover_state().unwrap();
        assert_eq!(ctx.hovered(), Some(above));
        ctx.register(below, full, true).unwrap();
        assert!(ctx.is_hovered(above), "pre-pass candidate is still pending");
        ctx.register(above, full, true).unwrap();
        assert!(ctx.is_hovered(above));
        ctx.update_pressed_state().unwrap();
        ctx.end_frame().unwrap();
    }

    #[test]
    fn press_focus_and_click() {
        let mut ctx = ctx();
        let button = ComponentId::new();
        let rect = Rect::new(0.0, 0.0, 100.0, 30.0);
        let up = InputSample::at(0.0).with_mouse(10.0, 10.0);
        let down = up.clone().at_time(0.1).with_button(MouseButton::Left);

        frame(&mut ctx, up.clone(), |ctx| ctx.register(button, rect, true).unwrap());
        frame(&mut ctx, down, |ctx| ctx.register(button, rect, true).unwrap());
        assert!(ctx.is_pressed(button));
        assert!(ctx.is_focused(button));
        assert!(!ctx.was_clicked(button));

        frame(&mut ctx, up.at_time(0.2), |ctx| ctx.register(button, rect, true).unwrap());
        assert!(!ctx.is_pressed(button));
        assert!(ctx.was_clicked(button));
    }

    #[test]
    fn non_interactive_components_are_not_pressed() {
        let mut ctx = ctx();
        let label = ComponentId::new();
        let sample = InputSample::at(0.0)
            .with_mouse(5.0, 5.0)
            .with_button(MouseButton::Left);
        frame(&mut ctx, sample, |ctx| {
            ctx.register(label, Rect::new(0.0, 0.0, 50.0, 50.0), false).unwrap();
        });
        assert_eq!(ctx.pressed(), None);
        assert_eq!(ctx.focused(), None);
        assert!(ctx.is_hovered(label));
    }

    #[test]
    fn focus_dropped_when_component_stops_rendering() {
        let mut ctx = ctx();
        let id = ComponentId::new();
        frame(&mut ctx, InputSample::at(0.0), |ctx| {
            ctx.register(id, Rect::new(0.0, 0.0, 10.0, 10.0), true).unwrap();
            ctx.set_focus(id);
        });
        assert!(ctx.is_focused(id));
        frame(&mut ctx, InputSample::at(0.1), |_| {});
        assert_eq!(ctx.focused(), None);
    }

    #[test]
    fn capture_last_caller_wins() {
        let mut ctx = ctx();
        let a = ComponentId::new();
        let b = ComponentId::new();
        ctx.capture_input(a);
        ctx.capture_input(b);
        assert!(ctx.is_captured_by(b));
        assert!(!ctx.is_captured_by(a));
        assert!(ctx.is_input_target(b));
        ctx.release_capture();
        assert_eq!(ctx.capture(), CaptureState::None);
    }

    #[test]
    fn key_consumption_visible_through_context() {
        let mut ctx = ctx();
        let enter = Key::Named(NamedKey::Enter);
        ctx.begin_frame(InputSample::at(0.0).with_key(enter), theme()).unwrap();
        assert!(ctx.input_mut().take_key_pressed(enter));
        assert!(!ctx.input().is_key_pressed(enter));
        ctx.end_frame().unwrap();
    }
}
