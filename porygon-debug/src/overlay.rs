//! Root container for the debug panels.

use porygon_ui::widgets::Label;
use porygon_ui::{
    render_container, Anchor, Children, Component, ComponentBase, Container, FrameStats, Key, LayoutConstraint,
    NamedKey, Result as UiResult, UiContext,
};

use crate::console::ConsolePanel;
use crate::stats::StatsPanel;
use crate::watch::WatchPanel;

pub const CONSOLE_KEY: Key = Key::Named(NamedKey::Grave);
pub const STATS_KEY: Key = Key::Named(NamedKey::F3);
pub const WATCH_KEY: Key = Key::Named(NamedKey::F4);

const SIDE_PANEL_WIDTH: f32 = 280.0;
const SIDE_PANEL_HEIGHT: f32 = 200.0;
const EDGE: f32 = 8.0;

/// Full-viewport overlay owning the console, stats and watch panels.
///
/// Extra components added with [`Container::add_child`] render after the
/// built-in panels. The status bar always renders last so it stays on top.
pub struct DebugOverlay {
    base: ComponentBase,
    console: ConsolePanel,
    stats: StatsPanel,
    watch: WatchPanel,
    children: Children,
    status_bar: Label,
}

impl DebugOverlay {
    pub fn new(console: ConsolePanel, stats: StatsPanel, watch: WatchPanel) -> Self {
        let mut console = console.with_constraint(
            LayoutConstraint::new(Anchor::StretchTop).with_height_percent(0.4),
        );
        let mut stats = stats.with_constraint(
            LayoutConstraint::new(Anchor::TopRight)
                .with_offset(EDGE, EDGE)
                .with_size(SIDE_PANEL_WIDTH, SIDE_PANEL_HEIGHT),
        );
        let mut watch = watch.with_constraint(
            LayoutConstraint::new(Anchor::BottomRight)
                .with_offset(EDGE, EDGE)
                .with_size(SIDE_PANEL_WIDTH, SIDE_PANEL_HEIGHT),
        );
        console.base_mut().set_visible(false);
        stats.base_mut().set_visible(false);
        watch.base_mut().set_visible(false);

        // One line tall from its own text metrics.
        let status_bar =
            Label::named("debug:status", "").with_constraint(LayoutConstraint::new(Anchor::StretchBottom));

        Self {
            base: ComponentBase::new("debug-overlay").with_constraint(LayoutConstraint::fill()),
            console,
            stats,
            watch,
            children: Children::new(),
            status_bar,
        }
    }

    pub fn console(&self) -> &ConsolePanel {
        &self.console
    }

    pub fn console_mut(&mut self) -> &mut ConsolePanel {
        &mut self.console
    }

    pub fn stats_mut(&mut self) -> &mut StatsPanel {
        &mut self.stats
    }

    pub fn watch_mut(&mut self) -> &mut WatchPanel {
        &mut self.watch
    }

    pub fn status_text(&self) -> &str {
        self.status_bar.text()
    }

    pub fn is_console_open(&self) -> bool {
        self.console.is_visible()
    }

    pub fn set_console_open(&mut self, open: bool) {
        self.console.base_mut().set_visible(open);
        if open {
            self.console.request_focus();
        }
    }

    pub fn toggle_console(&mut self) {
        self.set_console_open(!self.is_console_open());
    }

    pub fn toggle_stats(&mut self) {
        let visible = self.stats.is_visible();
        self.stats.base_mut().set_visible(!visible);
    }

    pub fn toggle_watch(&mut self) {
        let visible = self.watch.is_visible();
        self.watch.base_mut().set_visible(!visible);
    }

    /// Feed the summary of the frame that just ended.
    pub fn record_frame(&mut self, stats: FrameStats) {
        self.status_bar.set_text(format!(
            "frame {}  |  ` console  F3 stats  F4 watch",
            stats.frame
        ));
        self.stats.record_frame(stats);
    }

    /// Size line-dependent constraints from the context's metrics. The
    /// setters only dirty layout when the value actually changes.
    fn fit_to_line_height(&mut self, line: f32) {
        self.console.base_mut().constraint_mut().set_min_height(Some(line * 4.0));
        // Keep the watch panel clear of the status bar.
        self.watch.base_mut().constraint_mut().set_offset_y(EDGE + line);
    }

    fn handle_toggles(&mut self, ctx: &mut UiContext) {
        let input = ctx.input_mut();
        if input.take_key_pressed(CONSOLE_KEY) {
            // The backquote also arrives as typed text.
            let typed = input.take_text_input();
            if typed.chars().any(|c| c != '`' && c != '~') {
                tracing::debug!(dropped = %typed, "text typed with the console toggle");
            }
            self.toggle_console();
        }
        if input.take_key_pressed(STATS_KEY) {
            self.toggle_stats();
        }
        if input.take_key_pressed(WATCH_KEY) {
            self.toggle_watch();
        }
    }
}

impl Component for DebugOverlay {
    fn base(&self) -> &ComponentBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ComponentBase {
        &mut self.base
    }

    fn on_render(&mut self, ctx: &mut UiContext) -> UiResult<()> {
        render_container(self, ctx)
    }
}

impl Container for DebugOverlay {
    fn children(&self) -> &Children {
        &self.children
    }

    fn children_mut(&mut self) -> &mut Children {
        &mut self.children
    }

    fn on_render_container(&mut self, ctx: &mut UiContext) -> UiResult<()> {
        self.fit_to_line_height(ctx.line_height());
        self.handle_toggles(ctx);
        Ok(())
    }

    fn on_render_children(&mut self, ctx: &mut UiContext) -> UiResult<()> {
        self.stats.render(ctx)?;
        self.watch.render(ctx)?;
        self.children.render_all(ctx)?;
        self.console.render(ctx)?;
        // Last registration is topmost.
        self.status_bar.render(ctx)
    }
}
