//! Frame statistics panel.

use porygon_ui::{
    Component, ComponentBase, FrameStats, LayoutConstraint, Padding, Renderer, Result as UiResult, UiContext,
};

/// Supplies extra `(label, value)` rows, e.g. entity counts from the game.
pub trait StatsProvider {
    fn rows(&self) -> Vec<(String, String)>;
}

impl<F> StatsProvider for F
where
    F: Fn() -> Vec<(String, String)>,
{
    fn rows(&self) -> Vec<(String, String)> {
        self()
    }
}

pub struct StatsPanel {
    base: ComponentBase,
    provider: Option<Box<dyn StatsProvider>>,
    last_frame: Option<FrameStats>,
}

impl StatsPanel {
    pub fn new() -> Self {
        Self {
            base: ComponentBase::new("stats"),
            provider: None,
            last_frame: None,
        }
    }

    pub fn with_constraint(mut self, constraint: LayoutConstraint) -> Self {
        self.base.set_constraint(constraint);
        self
    }

    pub fn with_provider(mut self, provider: impl StatsProvider + 'static) -> Self {
        self.provider = Some(Box::new(provider));
        self
    }

    pub fn set_provider(&mut self, provider: Option<Box<dyn StatsProvider>>) {
        self.provider = provider;
    }

    /// Feed the summary of the frame that just ended.
    pub fn record_frame(&mut self, stats: FrameStats) {
        self.last_frame = Some(stats);
    }

    pub fn last_frame(&self) -> Option<&FrameStats> {
        self.last_frame.as_ref()
    }

    /// Rows shown on the next render. Empty when no provider is set.
    pub fn rows(&self) -> Vec<(String, String)> {
        let Some(provider) = self.provider.as_ref() else {
            return Vec::new();
        };
        let mut rows = Vec::new();
        if let Some(stats) = &self.last_frame {
            rows.push(("frame".to_string(), stats.frame.to_string()));
            rows.push(("components".to_string(), stats.registrations.to_string()));
            rows.push(("layout resolves".to_string(), stats.layout_resolves.to_string()));
            rows.push(("nesting".to_string(), stats.max_depth.to_string()));
            rows.push((
                "draw commands".to_string(),
                format!("{} ({} culled)", stats.draw_commands, stats.culled),
            ));
            if let Some(id) = stats.hovered {
                rows.push(("hovered".to_string(), id.to_string()));
            }
            if let Some(id) = stats.focused {
                rows.push(("focused".to_string(), id.to_string()));
            }
        }
        rows.extend(provider.rows());
        rows
    }
}

impl Default for StatsPanel {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for StatsPanel {
    fn base(&self) -> &ComponentBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ComponentBase {
        &mut self.base
    }

    fn on_render(&mut self, ctx: &mut UiContext) -> UiResult<()> {
        let theme = ctx.theme();
        let (background, border, thickness) = (theme.bg_secondary, theme.border, theme.border_thickness);
        let (label_color, value_color, muted, pad) =
            (theme.fg_secondary, theme.fg_primary, theme.fg_muted, theme.padding);

        let rect = self.base.rect();
        let content = rect.inset(&Padding::all(pad));
        ctx.draw().draw_rectangle(rect, background);
        ctx.draw().draw_rectangle_outline(rect, border, thickness);

        if self.provider.is_none() {
            ctx.draw().draw_text("stats: not configured", content.x, content.y, muted);
            return Ok(());
        }

        let rows = self.rows();
        let label_width = rows
            .iter()
            .map(|(label, _)| ctx.measure_text(label).width)
            .fold(0.0_f32, f32::max);
        let value_x = content.x + label_width + pad * 2.0;
        let line = ctx.line_height();

        ctx.draw().push_clip(content);
        for (i, (label, value)) in rows.iter().enumerate() {
            let y = content.y + i as f32 * line;
            ctx.draw().draw_text(label, content.x, y, label_color);
            ctx.draw().draw_text(value, value_x, y, value_color);
        }
        ctx.draw().pop_clip();
        Ok(())
    }
}
