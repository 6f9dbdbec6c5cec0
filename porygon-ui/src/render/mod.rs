//! Renderer contract and the per-frame draw list.
//!
//! Components never talk to a graphics backend directly. They draw into the
//! context's [`DrawList`], which records clip-resolved commands. After
//! `end_frame` the host replays the list into its backend [`Renderer`].

pub mod draw_list;
pub mod metrics;

pub use draw_list::{DrawCommand, DrawList};
pub use metrics::{CachedMetrics, MonospaceMetrics, TextMetrics, CHAR_WIDTH, LINE_HEIGHT};

use crate::primitives::{Color, Rect, Size};

/// The drawing surface consumed by the UI engine.
///
/// `push_clip`/`pop_clip` must balance like container begin/end.
pub trait Renderer {
    fn draw_text(&mut self, text: &str, x: f32, y: f32, color: Color);

    fn measure_text(&self, text: &str) -> Size;

    fn draw_rectangle(&mut self, rect: Rect, color: Color);

    fn draw_rectangle_outline(&mut self, rect: Rect, color: Color, thickness: f32);

    fn push_clip(&mut self, rect: Rect);

    fn pop_clip(&mut self);

    fn line_height(&self) -> f32;
}
