//! Single-line text entry.

use crate::component::{Component, ComponentBase};
use crate::context::UiContext;
use crate::error::Result;
use crate::input::{Key, NamedKey};
use crate::layout::LayoutConstraint;
use crate::primitives::{Rect, Size};
use crate::render::Renderer;

/// Minimum width in columns when sized by content.
const MIN_COLUMNS: usize = 20;

type SubmitHandler = Box<dyn FnMut(&str)>;

/// Focused text entry: typing, Backspace/Delete/arrows with repeat,
/// Home/End, Enter submits and clears.
pub struct TextInput {
    base: ComponentBase,
    text: String,
    /// Caret position as a char index.
    cursor: usize,
    placeholder: String,
    on_submit: Option<SubmitHandler>,
    submitted: Option<String>,
    /// Game time of the last edit; the caret is solid right after typing.
    blink_epoch: f64,
}

impl TextInput {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            base: ComponentBase::new(name),
            text: String::new(),
            cursor: 0,
            placeholder: String::new(),
            on_submit: None,
            submitted: None,
            blink_epoch: 0.0,
        }
    }

    pub fn with_constraint(mut self, constraint: LayoutConstraint) -> Self {
        self.base.set_constraint(constraint);
        self
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    pub fn with_on_submit(mut self, handler: impl FnMut(&str) + 'static) -> Self {
        self.on_submit = Some(Box::new(handler));
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        let text = text.into();
        if text != self.text {
            self.text = text;
            self.base.invalidate_layout();
        }
        self.cursor = self.char_count();
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Text submitted with Enter since the last call.
    pub fn take_submitted(&mut self) -> Option<String> {
        self.submitted.take()
    }

    fn char_count(&self) -> usize {
        self.text.chars().count()
    }

    fn byte_index(&self, char_index: usize) -> usize {
        self.text
            .char_indices()
            .nth(char_index)
            .map_or(self.text.len(), |(i, _)| i)
    }

    fn insert(&mut self, typed: &str) {
        for c in typed.chars().filter(|c| !c.is_control()) {
            let at = self.byte_index(self.cursor);
            self.text.insert(at, c);
            self.cursor += 1;
            self.base.invalidate_layout();
        }
    }

    fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }
        let at = self.byte_index(self.cursor - 1);
        self.text.remove(at);
        self.cursor -= 1;
        self.base.invalidate_layout();
    }

    fn delete(&mut self) {
        if self.cursor >= self.char_count() {
            return;
        }
        let at = self.byte_index(self.cursor);
        self.text.remove(at);
        self.base.invalidate_layout();
    }

    fn submit(&mut self) {
        let text = std::mem::take(&mut self.text);
        self.cursor = 0;
        if !text.is_empty() {
            self.base.invalidate_layout();
        }
        if let Some(handler) = self.on_submit.as_mut() {
            handler(&text);
        }
        self.submitted = Some(text);
    }

    /// Apply this frame's keyboard input. Only called while focused.
    fn handle_keys(&mut self, ctx: &mut UiContext) {
        let input = ctx.input_mut();
        let mut edited = false;

        let typed = input.take_text_input();
        if !typed.is_empty() {
            self.insert(&typed);
            edited = true;
        }
        if input.take_key_pressed_with_repeat(Key::Named(NamedKey::Backspace)) {
            self.backspace();
            edited = true;
        }
        if input.take_key_pressed_with_repeat(Key::Named(NamedKey::Delete)) {
            self.delete();
            edited = true;
        }
        if input.take_key_pressed_with_repeat(Key::Named(NamedKey::ArrowLeft)) {
            self.cursor = self.cursor.saturating_sub(1);
            edited = true;
        }
        if input.take_key_pressed_with_repeat(Key::Named(NamedKey::ArrowRight)) {
            self.cursor = (self.cursor + 1).min(self.char_count());
            edited = true;
        }
        if input.take_key_pressed(Key::Named(NamedKey::Home)) {
            self.cursor = 0;
            edited = true;
        }
        if input.take_key_pressed(Key::Named(NamedKey::End)) {
            self.cursor = self.char_count();
            edited = true;
        }
        if input.take_key_pressed(Key::Named(NamedKey::Enter)) {
            self.submit();
            edited = true;
        }

        if edited {
            self.blink_epoch = input.time();
        }
    }
}

impl Component for TextInput {
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
        let pad = ctx.theme().padding;
        let column = ctx.measure_text("M").width;
        let text = ctx.measure_text(&self.text).width;
        Some(Size::new(
            text.max(column * MIN_COLUMNS as f32) + pad * 2.0,
            ctx.line_height() + pad * 2.0,
        ))
    }

    fn on_render(&mut self, ctx: &mut UiContext) -> Result<()> {
        let id = self.base.id();
        let focused = ctx.is_focused(id) && self.base.is_enabled();
        if focused {
            self.handle_keys(ctx);
        }

        let theme = ctx.theme();
        let pad = theme.padding;
        let background = theme.bg_primary;
        let border = if focused { theme.border_focused } else { theme.border };
        let thickness = theme.border_thickness;
        let (text, color) = if self.text.is_empty() {
            (self.placeholder.as_str(), theme.fg_muted)
        } else {
            (self.text.as_str(), theme.fg_primary)
        };
        let caret_color = theme.fg_primary;
        let blink = theme.cursor_blink;

        let elapsed = ctx.input().time() - self.blink_epoch;
        let caret_on = blink <= 0.0 || (elapsed / blink).floor() as i64 % 2 == 0;
        let caret_x = ctx.text_metrics().caret_x(&self.text, self.cursor);
        let line_height = ctx.line_height();

        let rect = self.base.rect();
        let draw = ctx.draw();
        draw.draw_rectangle(rect, background);
        draw.draw_rectangle_outline(rect, border, thickness);
        draw.draw_text(text, rect.x + pad, rect.y + pad, color);
        if focused && caret_on {
            draw.draw_rectangle(Rect::new(rect.x + pad + caret_x, rect.y + pad, 1.0, line_height), caret_color);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edits_respect_char_boundaries() {
        let mut input = TextInput::new("input");
        input.insert("héllo");
        assert_eq!(input.cursor(), 5);
        input.backspace();
        assert_eq!(input.text(), "héll");
        input.cursor = 1;
        input.delete();
        assert_eq!(input.text(), "hll");
        input.insert("é");
        assert_eq!(input.text(), "héll");
        assert_eq!(input.cursor(), 2);
    }

    #[test]
    fn control_chars_are_ignored() {
        let mut input = TextInput::new("input");
        input.insert("a\r\nb\u{8}");
        assert_eq!(input.text(), "ab");
    }

    #[test]
    fn submit_clears_and_records() {
        let mut input = TextInput::new("input");
        input.set_text("help");
        input.submit();
        assert_eq!(input.text(), "");
        assert_eq!(input.cursor(), 0);
        assert_eq!(input.take_submitted().as_deref(), Some("help"));
        assert_eq!(input.take_submitted(), None);
    }

    #[test]
    fn content_sized_input_grows_with_typed_text() {
        use std::sync::Arc;

        use crate::input::InputSample;
        use crate::render::CHAR_WIDTH;
        use crate::theme::Theme;

        let theme = Arc::new(Theme::dark());
        let pad = theme.padding;
        let mut ctx = UiContext::new(Size::new(800.0, 600.0));
        let mut input = TextInput::new("input");

        ctx.run_frame(InputSample::at(0.1), Arc::clone(&theme), &mut input).unwrap();
        let narrow = input.rect().width;
        assert_eq!(narrow, CHAR_WIDTH * MIN_COLUMNS as f32 + pad * 2.0);

        ctx.set_focus(input.id());
        let typed = "x".repeat(30);
        ctx.run_frame(InputSample::at(0.2).with_text(typed), Arc::clone(&theme), &mut input)
            .unwrap();
        ctx.run_frame(InputSample::at(0.3), Arc::clone(&theme), &mut input).unwrap();
        assert_eq!(input.rect().width, CHAR_WIDTH * 30.0 + pad * 2.0);

        input.set_text("");
        ctx.run_frame(InputSample::at(0.4), Arc::clone(&theme), &mut input).unwrap();
        assert_eq!(input.rect().width, narrow);
    }

    #[test]
    fn backspace_at_start_is_noop() {
        let mut input = TextInput::new("input");
        input.backspace();
        input.delete();
        assert_eq!(input.text(), "");
    }
}
