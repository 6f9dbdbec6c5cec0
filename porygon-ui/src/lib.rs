//! Porygon UI: immediate-mode debug UI layout and frame engine.
//!
//! Retained components with declarative anchor constraints, rendered once
//! per frame into a [`UiContext`] that tracks hover, focus, press and
//! pointer capture and records a clip-resolved [`DrawList`].
//!
//! # Usage
//!
//! ```ignore
//! use porygon_ui::{ThemeManager, UiContext, Size, widgets::Panel};
//!
//! let mut ctx = UiContext::new(Size::new(1280.0, 720.0));
//! let mut root = Panel::new("root");
//! loop {
//!     let sample = input_source.sample();
//!     let stats = ctx.run_frame(sample, ThemeManager::current(), &mut root)?;
//!     ctx.draw_list().replay(&mut backend);
//! }
//! ```

// Core primitives
pub mod error;
pub mod id;
pub mod primitives;

// Layout (constraints + resolver)
pub mod layout;

// Components and frame context
pub mod component;
pub mod context;
pub mod input;

// Rendering contract, theming, instrumentation
pub mod frame_timing;
pub mod render;
pub mod theme;

// Built-in widgets
pub mod widgets;

pub use component::{render_component, render_container, Children, Component, ComponentBase, Container};
pub use context::{CaptureState, ContainerScope, FrameStats, Registration, UiContext};
pub use error::{Result, ThemeError, UiError};
pub use id::ComponentId;
pub use input::{
    InputSample, InputSource, InputState, Key, Modifiers, MouseButton, NamedKey, RepeatConfig, ScriptedInput,
};
pub use layout::{Anchor, AnchorResolver, LayoutConstraint, LayoutResolver, Margin, Padding};
pub use primitives::{Color, Point, Rect, Size};
pub use render::{CachedMetrics, DrawCommand, DrawList, MonospaceMetrics, Renderer, TextMetrics};
pub use theme::{Theme, ThemeManager};
