//! Headless debug UI driver.
//!
//! Runs the debug overlay against a scripted input sequence and replays
//! each frame's draw list into a renderer that logs every command.

use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use porygon_debug::{ConsoleLevel, ConsolePanel, DebugOverlay, DebugUiConfig, StatsPanel, WatchEvaluator, WatchPanel};
use porygon_ui::{
    frame_timing, Color, InputSample, InputSource, InputState, MonospaceMetrics, NamedKey, Rect, Renderer,
    ScriptedInput, Size, TextMetrics, ThemeManager, UiContext,
};
use tracing_subscriber::EnvFilter;

/// Seconds per simulated frame.
const TICK: f64 = 1.0 / 60.0;

#[derive(Parser)]
#[command(name = "porygon-debug")]
#[command(about = "Drive the debug overlay headlessly and log its draw output", long_about = None)]
struct Cli {
    /// Config file (default: <config dir>/porygon/debug_ui.json)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of frames to run
    #[arg(short, long, default_value_t = 8)]
    frames: u64,

    /// Log sampled frame timings (also enabled by `frame_timing` in the config)
    #[arg(long)]
    timing: bool,
}

/// Logs draw commands at trace level.
struct TracingRenderer {
    metrics: MonospaceMetrics,
    commands: usize,
    clip_depth: usize,
}

impl TracingRenderer {
    fn new() -> Self {
        Self {
            metrics: MonospaceMetrics::default(),
            commands: 0,
            clip_depth: 0,
        }
    }
}

impl Renderer for TracingRenderer {
    fn draw_text(&mut self, text: &str, x: f32, y: f32, color: Color) {
        self.commands += 1;
        tracing::trace!(x, y, ?color, "text {:?}", text);
    }

    fn measure_text(&self, text: &str) -> Size {
        self.metrics.measure(text)
    }

    fn draw_rectangle(&mut self, rect: Rect, color: Color) {
        self.commands += 1;
        tracing::trace!(?rect, ?color, "rect");
    }

    fn draw_rectangle_outline(&mut self, rect: Rect, color: Color, thickness: f32) {
        self.commands += 1;
        tracing::trace!(?rect, ?color, thickness, "outline");
    }

    fn push_clip(&mut self, rect: Rect) {
        self.clip_depth += 1;
        tracing::trace!(?rect, depth = self.clip_depth, "push clip");
    }

    fn pop_clip(&mut self) {
        self.clip_depth = self.clip_depth.saturating_sub(1);
        tracing::trace!(depth = self.clip_depth, "pop clip");
    }

    fn line_height(&self) -> f32 {
        self.metrics.line_height()
    }
}

/// Opens the console, types a command, toggles the side panels.
fn script(frames: u64) -> ScriptedInput {
    let mut samples = Vec::new();
    let mut time = 0.0;
    for frame in 0..frames {
        time += TICK;
        let sample = InputSample::at(time).with_mouse(640.0, 120.0);
        let sample = match frame {
            1 => sample.with_key(NamedKey::Grave).with_text("`"),
            2 => sample.with_text("frame"),
            3 => sample.with_key(NamedKey::Enter),
            4 => sample.with_key(NamedKey::F3),
            5 => sample.with_key(NamedKey::F4),
            _ => sample,
        };
        samples.push(sample);
    }
    ScriptedInput::new(samples)
}

/// The overlay plus the tick counter its demo providers read.
fn build_overlay(config: &DebugUiConfig) -> (DebugOverlay, Arc<AtomicU64>) {
    let frame_counter = Arc::new(AtomicU64::new(0));

    let console = {
        let counter = Arc::clone(&frame_counter);
        ConsolePanel::new(config.console_capacity).with_handler(move |command| match command {
            "frame" => Ok(format!("frame {}", counter.load(Ordering::Relaxed))),
            "help" => Ok("commands: frame, help".to_string()),
            other => Err(format!("unknown command: {other}")),
        })
    };

    let stats = {
        let counter = Arc::clone(&frame_counter);
        StatsPanel::new().with_provider(move || {
            vec![("ticks".to_string(), counter.load(Ordering::Relaxed).to_string())]
        })
    };

    let evaluator = WatchEvaluator::spawn(config.watch_timeout(), config.watch_queue_capacity);
    let mut watch = WatchPanel::new(evaluator, config.watch_refresh_interval);
    let (value, even) = (Arc::clone(&frame_counter), Arc::clone(&frame_counter));
    watch.add_conditional_watch(
        "frame",
        move || Ok(value.load(Ordering::Relaxed).to_string()),
        move || Ok(even.load(Ordering::Relaxed) % 2 == 0),
    );
    watch.add_watch("player", || Err("no player loaded".to_string()));

    let mut overlay = DebugOverlay::new(console, stats, watch);
    overlay.console_mut().push(ConsoleLevel::Info, "debug console ready");
    (overlay, frame_counter)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let config = DebugUiConfig::load(cli.config.as_deref()).context("failed to load debug UI config")?;
    let theme = config.load_theme().context("failed to load theme")?;
    tracing::info!(theme = %theme.name, frames = cli.frames, "starting debug UI");
    ThemeManager::set(theme);
    if cli.timing || config.frame_timing {
        frame_timing::enable();
    }

    let mut ctx = UiContext::new(config.viewport()).with_input(InputState::with_repeat(config.repeat()));
    let mut input = script(cli.frames);
    let (mut overlay, ticks) = build_overlay(&config);
    let mut renderer = TracingRenderer::new();

    for _ in 0..cli.frames {
        ticks.fetch_add(1, Ordering::Relaxed);
        match ctx.run_frame(input.sample(), ThemeManager::current(), &mut overlay) {
            Ok(stats) => {
                ctx.draw_list().replay(&mut renderer);
                overlay.record_frame(stats);
                tracing::debug!(
                    frame = stats.frame,
                    registrations = stats.registrations,
                    resolves = stats.layout_resolves,
                    commands = stats.draw_commands,
                    "frame done"
                );
            }
            Err(e) => tracing::error!("frame {} failed: {}", ctx.frame_number(), e),
        }
    }

    for line in overlay.console().lines() {
        println!("{:?}: {}", line.level, line.text);
    }
    println!("{} draw commands replayed", renderer.commands);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timing_flag_parses() {
        let cli = Cli::try_parse_from(["porygon-debug", "--timing", "--frames", "3"]).unwrap();
        assert!(cli.timing);
        assert_eq!(cli.frames, 3);
        assert!(!Cli::try_parse_from(["porygon-debug"]).unwrap().timing);
    }
}
