//! Command console: scroll-back log plus a command line.

use std::collections::VecDeque;

use porygon_ui::widgets::TextInput;
use porygon_ui::{
    Anchor, Color, Component, ComponentBase, Key, LayoutConstraint, NamedKey, Padding, Point, Rect, Renderer,
    Result as UiResult, Theme, UiContext,
};

/// Lines scrolled per wheel notch.
const WHEEL_LINES: f32 = 3.0;

type CommandHandler = Box<dyn FnMut(&str) -> Result<String, String>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleLevel {
    Info,
    /// Echo of a submitted command.
    Command,
    Output,
    Warning,
    Error,
}

impl ConsoleLevel {
    fn color(self, theme: &Theme) -> Color {
        match self {
            ConsoleLevel::Info => theme.fg_secondary,
            ConsoleLevel::Command => theme.accent,
            ConsoleLevel::Output => theme.fg_primary,
            ConsoleLevel::Warning => theme.warning,
            ConsoleLevel::Error => theme.error,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsoleLine {
    pub level: ConsoleLevel,
    pub text: String,
}

pub struct ConsolePanel {
    base: ComponentBase,
    lines: VecDeque<ConsoleLine>,
    capacity: usize,
    input: TextInput,
    handler: Option<CommandHandler>,
    history: Vec<String>,
    /// Index into `history` while browsing with the arrow keys.
    history_cursor: Option<usize>,
    /// Lines scrolled back from the newest.
    scroll_back: usize,
    focus_requested: bool,
}

impl ConsolePanel {
    pub fn new(capacity: usize) -> Self {
        let input = TextInput::new("console:input")
            .with_placeholder("type a command")
            .with_constraint(LayoutConstraint::new(Anchor::StretchBottom));
        Self {
            base: ComponentBase::new("console"),
            lines: VecDeque::new(),
            capacity: capacity.max(1),
            input,
            handler: None,
            history: Vec::new(),
            history_cursor: None,
            scroll_back: 0,
            focus_requested: false,
        }
    }

    pub fn with_constraint(mut self, constraint: LayoutConstraint) -> Self {
        self.base.set_constraint(constraint);
        self
    }

    pub fn with_handler(mut self, handler: impl FnMut(&str) -> Result<String, String> + 'static) -> Self {
        self.handler = Some(Box::new(handler));
        self
    }

    /// Focus the command line on the next render.
    pub fn request_focus(&mut self) {
        self.focus_requested = true;
    }

    pub fn lines(&self) -> impl Iterator<Item = &ConsoleLine> {
        self.lines.iter()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn history(&self) -> &[String] {
        &self.history
    }

    pub fn input_text(&self) -> &str {
        self.input.text()
    }

    pub fn scroll_back(&self) -> usize {
        self.scroll_back
    }

    pub fn clear(&mut self) {
        self.lines.clear();
        self.scroll_back = 0;
    }

    /// Append a line, evicting the oldest once full. Multi-line text is split.
    pub fn push(&mut self, level: ConsoleLevel, text: impl AsRef<str>) {
        for line in text.as_ref().lines() {
            if self.lines.len() == self.capacity {
                self.lines.pop_front();
            }
            self.lines.push_back(ConsoleLine {
                level,
                text: line.to_string(),
            });
        }
    }

    /// Echo and run a command line.
    pub fn execute(&mut self, command: &str) {
        let command = command.trim();
        if command.is_empty() {
            return;
        }
        if self.history.last().map(String::as_str) != Some(command) {
            self.history.push(command.to_string());
        }
        self.history_cursor = None;
        self.scroll_back = 0;
        self.push(ConsoleLevel::Command, format!("> {command}"));

        let Some(handler) = self.handler.as_mut() else {
            self.push(ConsoleLevel::Error, "no command handler configured");
            return;
        };
        match handler(command) {
            Ok(output) => self.push(ConsoleLevel::Output, output),
            Err(message) => {
                tracing::debug!(%command, %message, "console command failed");
                self.push(ConsoleLevel::Error, message);
            }
        }
    }

    fn history_prev(&mut self) {
        if self.history.is_empty() {
            return;
        }
        let index = match self.history_cursor {
            Some(i) => i.saturating_sub(1),
            None => self.history.len() - 1,
        };
        self.history_cursor = Some(index);
        self.input.set_text(self.history[index].clone());
    }

    fn history_next(&mut self) {
        match self.history_cursor {
            Some(i) if i + 1 < self.history.len() => {
                self.history_cursor = Some(i + 1);
                self.input.set_text(self.history[i + 1].clone());
            }
            Some(_) => {
                self.history_cursor = None;
                self.input.set_text("");
            }
            None => {}
        }
    }

    fn scroll_lines(&mut self, delta: isize, visible_rows: usize) {
        let max = self.lines.len().saturating_sub(visible_rows);
        self.scroll_back = self.scroll_back.saturating_add_signed(delta).min(max);
    }

    fn handle_keys(&mut self, ctx: &mut UiContext, visible_rows: usize) {
        let input = ctx.input_mut();
        if input.take_key_pressed(Key::Named(NamedKey::ArrowUp)) {
            self.history_prev();
        }
        if input.take_key_pressed(Key::Named(NamedKey::ArrowDown)) {
            self.history_next();
        }
        let page = visible_rows.max(1) as isize;
        if input.take_key_pressed_with_repeat(Key::Named(NamedKey::PageUp)) {
            self.scroll_lines(page, visible_rows);
        }
        if input.take_key_pressed_with_repeat(Key::Named(NamedKey::PageDown)) {
            self.scroll_lines(-page, visible_rows);
        }
    }

    fn draw_log(&self, ctx: &mut UiContext, area: Rect, visible_rows: usize) {
        let line_height = ctx.line_height();
        let end = self.lines.len().saturating_sub(self.scroll_back);
        let start = end.saturating_sub(visible_rows);
        // Newest line sits on the bottom row.
        let top = area.bottom() - (end - start) as f32 * line_height;

        let colors: Vec<Color> = self
            .lines
            .range(start..end)
            .map(|line| line.level.color(ctx.theme()))
            .collect();

        ctx.draw().push_clip(area);
        for (i, (line, color)) in self.lines.range(start..end).zip(colors).enumerate() {
            ctx.draw().draw_text(&line.text, area.x, top + i as f32 * line_height, color);
        }
        ctx.draw().pop_clip();
    }
}

impl Component for ConsolePanel {
    fn base(&self) -> &ComponentBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ComponentBase {
        &mut self.base
    }

    fn on_render(&mut self, ctx: &mut UiContext) -> UiResult<()> {
        let theme = ctx.theme();
        let (background, border, thickness, pad) =
            (theme.bg_tertiary, theme.border, theme.border_thickness, theme.padding);
        let rect = self.base.rect();
        let content = rect.inset(&Padding::all(pad));
        let line_height = ctx.line_height();
        let input_height = line_height + pad * 2.0;
        let log_area = Rect::new(
            content.x,
            content.y,
            content.width,
            (content.height - input_height - pad).max(0.0),
        );
        let visible_rows = (log_area.height / line_height).floor() as usize;

        if self.focus_requested {
            self.focus_requested = false;
            ctx.set_focus(self.input.id());
        }

        if ctx.is_focused(self.input.id()) {
            self.handle_keys(ctx, visible_rows);
        }
        if rect.contains(ctx.input().mouse_position()) {
            let wheel = ctx.input().wheel_delta();
            if wheel != 0.0 {
                self.scroll_lines((wheel * WHEEL_LINES).round() as isize, visible_rows);
                ctx.input_mut().consume_wheel();
            }
        }

        ctx.draw().draw_rectangle(rect, background);
        ctx.draw().draw_rectangle_outline(rect, border, thickness);
        self.draw_log(ctx, log_area, visible_rows);

        {
            let mut scope = ctx.begin_container_at(self.base.id(), content, Point::ORIGIN)?;
            self.input.render(&mut scope)?;
        }

        if let Some(command) = self.input.take_submitted() {
            self.execute(&command);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use porygon_ui::{InputSample, Size};

    use super::*;

    fn texts(console: &ConsolePanel) -> Vec<&str> {
        console.lines().map(|l| l.text.as_str()).collect()
    }

    #[test]
    fn execute_echoes_and_runs_handler() {
        let mut console = ConsolePanel::new(10).with_handler(|cmd| match cmd {
            "ping" => Ok("pong".into()),
            other => Err(format!("unknown command: {other}")),
        });
        console.execute("  ping ");
        console.execute("warp");

        assert_eq!(texts(&console), ["> ping", "pong", "> warp", "unknown command: warp"]);
        assert_eq!(console.lines().nth(3).map(|l| l.level), Some(ConsoleLevel::Error));
        assert_eq!(console.history(), ["ping", "warp"]);
    }

    #[test]
    fn missing_handler_reports_error() {
        let mut console = ConsolePanel::new(10);
        console.execute("help");
        assert_eq!(texts(&console), ["> help", "no command handler configured"]);
    }

    #[test]
    fn capacity_evicts_oldest() {
        let mut console = ConsolePanel::new(3);
        console.push(ConsoleLevel::Info, "a\nb\nc\nd");
        assert_eq!(texts(&console), ["b", "c", "d"]);
    }

    #[test]
    fn history_browsing_walks_back_and_forward() {
        let mut console = ConsolePanel::new(10);
        console.execute("one");
        console.execute("two");

        console.history_prev();
        assert_eq!(console.input_text(), "two");
        console.history_prev();
        console.history_prev();
        assert_eq!(console.input_text(), "one");
        console.history_next();
        assert_eq!(console.input_text(), "two");
        console.history_next();
        assert_eq!(console.input_text(), "");
    }

    #[test]
    fn typed_command_submits_through_frames() {
        let theme = Arc::new(Theme::dark());
        let mut ctx = UiContext::new(Size::new(640.0, 480.0));
        let mut console = ConsolePanel::new(10)
            .with_constraint(LayoutConstraint::fill())
            .with_handler(|cmd| Ok(cmd.to_uppercase()));
        console.request_focus();

        ctx.run_frame(InputSample::at(0.1), Arc::clone(&theme), &mut console).unwrap();
        ctx.run_frame(InputSample::at(0.2).with_text("hi"), Arc::clone(&theme), &mut console)
            .unwrap();
        ctx.run_frame(
            InputSample::at(0.3).with_key(NamedKey::Enter),
            Arc::clone(&theme),
            &mut console,
        )
        .unwrap();

        assert_eq!(texts(&console), ["> hi", "HI"]);
        assert_eq!(console.input_text(), "");
    }

    #[test]
    fn scroll_back_is_bounded() {
        let mut console = ConsolePanel::new(100);
        for i in 0..30 {
            console.push(ConsoleLevel::Info, i.to_string());
        }
        console.scroll_lines(100, 10);
        assert_eq!(console.scroll_back(), 20);
        console.scroll_lines(-100, 10);
        assert_eq!(console.scroll_back(), 0);
    }
}
