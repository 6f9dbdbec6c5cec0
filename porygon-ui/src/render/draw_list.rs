//! Recorded draw commands for one frame.
//!
//! The draw list is itself a [`Renderer`], so components draw into it with
//! the same calls a backend would see. It keeps a clip stack and stores every
//! `PushClip` already intersected with its parent, so a replay target can
//! treat each clip as absolute. Primitives fully outside the active clip are
//! dropped at record time.

use super::metrics::{CachedMetrics, TextMetrics};
use super::Renderer;
use crate::primitives::{Color, Rect, Size};

/// One recorded drawing operation.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Rect { rect: Rect, color: Color },
    Outline { rect: Rect, color: Color, thickness: f32 },
    Text { text: String, x: f32, y: f32, color: Color },
    /// Absolute clip: already intersected with every enclosing clip.
    PushClip(Rect),
    PopClip,
}

pub struct DrawList {
    commands: Vec<DrawCommand>,
    clip_stack: Vec<Rect>,
    metrics: Box<dyn TextMetrics + Send>,
    culled: usize,
}

impl Default for DrawList {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for DrawList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DrawList")
            .field("commands", &self.commands.len())
            .field("clip_depth", &self.clip_stack.len())
            .field("culled", &self.culled)
            .finish()
    }
}

impl DrawList {
    pub fn new() -> Self {
        Self::with_metrics(CachedMetrics::default())
    }

    pub fn with_metrics(metrics: impl TextMetrics + Send + 'static) -> Self {
        Self {
            commands: Vec::with_capacity(256),
            clip_stack: Vec::new(),
            metrics: Box::new(metrics),
            culled: 0,
        }
    }

    /// Drop all commands and clips, keeping allocations.
    pub fn clear(&mut self) {
        self.commands.clear();
        self.clip_stack.clear();
        self.culled = 0;
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Primitives skipped because they fell outside the active clip.
    pub fn culled(&self) -> usize {
        self.culled
    }

    pub fn clip_depth(&self) -> usize {
        self.clip_stack.len()
    }

    /// Effective clip: the top of the stack (entries are pre-intersected).
    #[inline]
    pub fn current_clip(&self) -> Option<Rect> {
        self.clip_stack.last().copied()
    }

    pub fn metrics(&self) -> &dyn TextMetrics {
        self.metrics.as_ref()
    }

    /// Replay every command into a backend, in recording order.
    pub fn replay(&self, target: &mut dyn Renderer) {
        for command in &self.commands {
            match command {
                DrawCommand::Rect { rect, color } => target.draw_rectangle(*rect, *color),
                DrawCommand::Outline { rect, color, thickness } => {
                    target.draw_rectangle_outline(*rect, *color, *thickness)
                }
                DrawCommand::Text { text, x, y, color } => target.draw_text(text, *x, *y, *color),
                DrawCommand::PushClip(rect) => target.push_clip(*rect),
                DrawCommand::PopClip => target.pop_clip(),
            }
        }
    }

    #[inline]
    fn visible(&mut self, rect: &Rect) -> bool {
        match self.current_clip() {
            Some(clip) if !clip.intersects(rect) => {
                self.culled += 1;
                false
            }
            _ => true,
        }
    }
}

impl Renderer for DrawList {
    fn draw_text(&mut self, text: &str, x: f32, y: f32, color: Color) {
        if text.is_empty() {
            return;
        }
        let size = self.metrics.measure(text);
        if !self.visible(&Rect::new(x, y, size.width, size.height)) {
            return;
        }
        self.commands.push(DrawCommand::Text {
            text: text.to_owned(),
            x,
            y,
            color,
        });
    }

    fn measure_text(&self, text: &str) -> Size {
        self.metrics.measure(text)
    }

    fn draw_rectangle(&mut self, rect: Rect, color: Color) {
        if rect.is_empty() || !self.visible(&rect) {
            return;
        }
        self.commands.push(DrawCommand::Rect { rect, color });
    }

    fn draw_rectangle_outline(&mut self, rect: Rect, color: Color, thickness: f32) {
        if rect.is_empty() || thickness <= 0.0 || !self.visible(&rect) {
            return;
        }
        self.commands.push(DrawCommand::Outline { rect, color, thickness });
    }

    fn push_clip(&mut self, rect: Rect) {
        let effective = match self.current_clip() {
            // Disjoint clips collapse to an empty rect so everything inside is culled.
            Some(parent) => parent
                .intersection(&rect)
                .unwrap_or(Rect::new(rect.x, rect.y, 0.0, 0.0)),
            None => rect,
        };
        self.clip_stack.push(effective);
        self.commands.push(DrawCommand::PushClip(effective));
    }

    fn pop_clip(&mut self) {
        if self.clip_stack.pop().is_some() {
            self.commands.push(DrawCommand::PopClip);
        } else {
            tracing::warn!("pop_clip with empty clip stack");
        }
    }

    fn line_height(&self) -> f32 {
        self.metrics.line_height()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::MonospaceMetrics;

    #[derive(Default)]
    struct Recorder {
        log: Vec<String>,
        depth: i32,
    }

    impl Renderer for Recorder {
        fn draw_text(&mut self, text: &str, _x: f32, _y: f32, _color: Color) {
            self.log.push(format!("text:{text}"));
        }
        fn measure_text(&self, text: &str) -> Size {
            MonospaceMetrics::default().measure(text)
        }
        fn draw_rectangle(&mut self, rect: Rect, _color: Color) {
            self.log.push(format!("rect:{}", rect.width));
        }
        fn draw_rectangle_outline(&mut self, _rect: Rect, _color: Color, thickness: f32) {
            self.log.push(format!("outline:{thickness}"));
        }
        fn push_clip(&mut self, _rect: Rect) {
            self.depth += 1;
            self.log.push("push".into());
        }
        fn pop_clip(&mut self) {
            self.depth -= 1;
            self.log.push("pop".into());
        }
        fn line_height(&self) -> f32 {
            18.0
        }
    }

    #[test]
    fn nested_clips_are_intersected() {
        let mut list = DrawList::new();
        list.push_clip(Rect::new(0.0, 0.0, 100.0, 100.0));
        list.push_clip(Rect::new(50.0, 50.0, 100.0, 100.0));
        assert_eq!(list.current_clip(), Some(Rect::new(50.0, 50.0, 50.0, 50.0)));
        list.pop_clip();
        assert_eq!(list.current_clip(), Some(Rect::new(0.0, 0.0, 100.0, 100.0)));
        list.pop_clip();
        assert_eq!(list.current_clip(), None);
    }

    #[test]
    fn primitives_outside_clip_are_culled() {
        let mut list = DrawList::new();
        list.push_clip(Rect::new(0.0, 0.0, 100.0, 100.0));
        list.draw_rectangle(Rect::new(200.0, 200.0, 10.0, 10.0), Color::WHITE);
        list.draw_rectangle(Rect::new(10.0, 10.0, 10.0, 10.0), Color::WHITE);
        list.pop_clip();
        assert_eq!(list.culled(), 1);
        assert_eq!(list.len(), 3);
    }

    #[test]
    fn replay_preserves_order_and_balance() {
        let mut list = DrawList::new();
        list.draw_rectangle(Rect::new(0.0, 0.0, 800.0, 600.0), Color::BLACK);
        list.push_clip(Rect::new(0.0, 0.0, 200.0, 200.0));
        list.draw_text("hi", 4.0, 4.0, Color::WHITE);
        list.draw_rectangle_outline(Rect::new(0.0, 0.0, 20.0, 20.0), Color::WHITE, 1.0);
        list.pop_clip();

        let mut recorder = Recorder::default();
        list.replay(&mut recorder);
        assert_eq!(recorder.log, ["rect:800", "push", "text:hi", "outline:1", "pop"]);
        assert_eq!(recorder.depth, 0);
    }

    #[test]
    fn unbalanced_pop_is_ignored() {
        let mut list = DrawList::new();
        list.pop_clip();
        assert!(list.is_empty());
    }

    #[test]
    fn clear_resets_state() {
        let mut list = DrawList::with_metrics(MonospaceMetrics::default());
        list.push_clip(Rect::new(0.0, 0.0, 10.0, 10.0));
        list.draw_text("x", 0.0, 0.0, Color::WHITE);
        list.clear();
        assert!(list.is_empty());
        assert_eq!(list.clip_depth(), 0);
    }
}
