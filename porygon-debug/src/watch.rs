//! Watch expressions evaluated off the UI thread.
//!
//! The evaluator owns one worker thread draining a bounded work channel.
//! Each evaluation runs on a short-lived helper thread so a getter that
//! hangs can be abandoned after the timeout; getter errors and panics are
//! turned into error results. The UI thread drains finished results once
//! per frame, in completion order.

use std::collections::HashSet;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crossbeam_channel::{bounded, Receiver, RecvTimeoutError, SendTimeoutError, Sender, TrySendError};
use porygon_ui::widgets::Label;
use porygon_ui::{
    Anchor, Component, ComponentBase, LayoutConstraint, Point, Renderer, Result as UiResult, UiContext,
};
use thiserror::Error;

/// How often the worker re-checks the stop flag while idle.
const POLL_INTERVAL: Duration = Duration::from_millis(20);

/// Default bounded wait when the evaluator is dropped.
const DEFAULT_JOIN_WAIT: Duration = Duration::from_millis(500);

static NEXT_WATCH_ID: AtomicU64 = AtomicU64::new(1);

pub type WatchGetter = Arc<dyn Fn() -> Result<String, String> + Send + Sync>;
pub type WatchCondition = Arc<dyn Fn() -> Result<bool, String> + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WatchId(u64);

impl WatchId {
    fn next() -> Self {
        Self(NEXT_WATCH_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// One unit of work for the evaluator.
#[derive(Clone)]
pub struct WatchRequest {
    pub id: WatchId,
    pub name: String,
    pub getter: WatchGetter,
    pub condition: Option<WatchCondition>,
}

/// Outcome of one evaluation.
#[derive(Debug, Clone, PartialEq)]
pub struct WatchResult {
    pub id: WatchId,
    pub name: String,
    pub value: Option<String>,
    /// `Some` when the watch has a condition and it evaluated.
    pub condition_met: Option<bool>,
    pub has_error: bool,
    pub error_message: Option<String>,
    pub elapsed: Duration,
}

impl WatchResult {
    fn ok(request: &WatchRequest, value: String, condition_met: Option<bool>, elapsed: Duration) -> Self {
        Self {
            id: request.id,
            name: request.name.clone(),
            value: Some(value),
            condition_met,
            has_error: false,
            error_message: None,
            elapsed,
        }
    }

    fn error(request: &WatchRequest, message: impl Into<String>, elapsed: Duration) -> Self {
        Self {
            id: request.id,
            name: request.name.clone(),
            value: None,
            condition_met: None,
            has_error: true,
            error_message: Some(message.into()),
            elapsed,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum WatchError {
    #[error("watch queue is full")]
    QueueFull,

    #[error("watch evaluator has stopped")]
    Stopped,
}

/// Background evaluator: bounded work queue, one consumer thread, stop flag.
pub struct WatchEvaluator {
    work_tx: Option<Sender<WatchRequest>>,
    result_rx: Receiver<WatchResult>,
    stop: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl WatchEvaluator {
    /// Spawn the worker thread.
    pub fn spawn(timeout: Duration, queue_capacity: usize) -> Self {
        let capacity = queue_capacity.max(1);
        let (work_tx, work_rx) = bounded::<WatchRequest>(capacity);
        let (result_tx, result_rx) = bounded::<WatchResult>(capacity);
        let stop = Arc::new(AtomicBool::new(false));

        let stop_clone = stop.clone();
        let handle = thread::Builder::new()
            .name("watch-evaluator".into())
            .spawn(move || worker_loop(work_rx, result_tx, stop_clone, timeout));

        let handle = match handle {
            Ok(handle) => Some(handle),
            Err(e) => {
                tracing::error!("failed to spawn watch evaluator: {}", e);
                None
            }
        };

        Self {
            work_tx: Some(work_tx),
            result_rx,
            stop,
            handle,
        }
    }

    /// Queue a request without blocking the caller.
    pub fn submit(&self, request: WatchRequest) -> Result<(), WatchError> {
        let Some(tx) = self.work_tx.as_ref() else {
            return Err(WatchError::Stopped);
        };
        if self.handle.is_none() || self.stop.load(Ordering::SeqCst) {
            return Err(WatchError::Stopped);
        }
        tx.try_send(request).map_err(|e| match e {
            TrySendError::Full(_) => WatchError::QueueFull,
            TrySendError::Disconnected(_) => WatchError::Stopped,
        })
    }

    /// All results finished since the last drain, in completion order.
    pub fn drain(&self) -> Vec<WatchResult> {
        self.result_rx.try_iter().collect()
    }

    /// Block up to `timeout` for the next result.
    pub fn recv_timeout(&self, timeout: Duration) -> Option<WatchResult> {
        self.result_rx.recv_timeout(timeout).ok()
    }

    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Signal the worker to stop and wait up to `wait` for it to exit.
    /// Queued work that has not started is dropped. Returns whether the
    /// worker was joined.
    pub fn shutdown(&mut self, wait: Duration) -> bool {
        self.stop.store(true, Ordering::SeqCst);
        self.work_tx.take();

        let Some(handle) = self.handle.take() else {
            return true;
        };
        let deadline = Instant::now() + wait;
        while !handle.is_finished() {
            if Instant::now() >= deadline {
                tracing::warn!("watch evaluator did not stop within {:?}, detaching", wait);
                return false;
            }
            thread::sleep(Duration::from_millis(1));
        }
        if handle.join().is_err() {
            tracing::warn!("watch evaluator thread panicked");
        }
        true
    }
}

impl Drop for WatchEvaluator {
    fn drop(&mut self) {
        self.shutdown(DEFAULT_JOIN_WAIT);
    }
}

/// The worker loop. One bad watch never ends it.
fn worker_loop(
    work_rx: Receiver<WatchRequest>,
    result_tx: Sender<WatchResult>,
    stop: Arc<AtomicBool>,
    timeout: Duration,
) {
    while !stop.load(Ordering::SeqCst) {
        let request = match work_rx.recv_timeout(POLL_INTERVAL) {
            Ok(request) => request,
            Err(RecvTimeoutError::Timeout) => continue,
            Err(RecvTimeoutError::Disconnected) => break,
        };
        if stop.load(Ordering::SeqCst) {
            break;
        }
        let mut result = evaluate_until_stopped(&request, timeout, &stop);
        // A full result queue waits for the UI thread, not forever.
        loop {
            match result_tx.send_timeout(result, POLL_INTERVAL) {
                Ok(()) => break,
                Err(SendTimeoutError::Timeout(pending)) if !stop.load(Ordering::SeqCst) => result = pending,
                Err(_) => {
                    tracing::debug!("watch evaluator stopped");
                    return;
                }
            }
        }
    }
    tracing::debug!("watch evaluator stopped");
}

/// Run one request on a helper thread, bounded by `timeout`.
pub fn evaluate(request: &WatchRequest, timeout: Duration) -> WatchResult {
    evaluate_until_stopped(request, timeout, &AtomicBool::new(false))
}

/// Like [`evaluate`], but gives up early once `stop` is set.
fn evaluate_until_stopped(request: &WatchRequest, timeout: Duration, stop: &AtomicBool) -> WatchResult {
    let start = Instant::now();
    let deadline = start + timeout;
    let (tx, rx) = bounded(1);
    let getter = Arc::clone(&request.getter);
    let condition = request.condition.clone();

    let spawned = thread::Builder::new().name("watch-eval".into()).spawn(move || {
        let outcome = catch_unwind(AssertUnwindSafe(|| -> Result<(String, Option<bool>), String> {
            let value = getter()?;
            let met = match condition {
                Some(condition) => Some(condition()?),
                None => None,
            };
            Ok((value, met))
        }));
        let _ = tx.send(outcome);
    });
    if let Err(e) = spawned {
        return WatchResult::error(request, format!("spawn failed: {e}"), start.elapsed());
    }

    let received = loop {
        let now = Instant::now();
        if now >= deadline {
            break Err(RecvTimeoutError::Timeout);
        }
        match rx.recv_timeout((deadline - now).min(POLL_INTERVAL)) {
            Err(RecvTimeoutError::Timeout) if stop.load(Ordering::SeqCst) => {
                return WatchResult::error(request, "cancelled", start.elapsed());
            }
            Err(RecvTimeoutError::Timeout) => continue,
            other => break other,
        }
    };

    match received {
        Ok(Ok(Ok((value, met)))) => WatchResult::ok(request, value, met, start.elapsed()),
        Ok(Ok(Err(message))) => WatchResult::error(request, message, start.elapsed()),
        Ok(Err(payload)) => WatchResult::error(request, panic_message(payload.as_ref()), start.elapsed()),
        Err(RecvTimeoutError::Timeout) => {
            let elapsed = start.elapsed();
            tracing::debug!(watch = %request.name, ?elapsed, "watch evaluation timed out");
            WatchResult::error(request, format!("timed out after {} ms", elapsed.as_millis()), elapsed)
        }
        Err(RecvTimeoutError::Disconnected) => {
            WatchResult::error(request, "evaluation aborted", start.elapsed())
        }
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        format!("panicked: {s}")
    } else if let Some(s) = payload.downcast_ref::<String>() {
        format!("panicked: {s}")
    } else {
        "panicked".to_string()
    }
}

// =========================================================================
// Panel
// =========================================================================

struct WatchEntry {
    request: WatchRequest,
    last: Option<WatchResult>,
    row: Label,
}

/// Lists watch expressions and their latest values.
pub struct WatchPanel {
    base: ComponentBase,
    entries: Vec<WatchEntry>,
    evaluator: Option<WatchEvaluator>,
    in_flight: HashSet<WatchId>,
    refresh_interval: f64,
    last_refresh: Option<f64>,
    /// Row pitch, taken from the context's text metrics.
    line_height: f32,
}

impl WatchPanel {
    pub fn new(evaluator: WatchEvaluator, refresh_interval: f64) -> Self {
        Self {
            evaluator: Some(evaluator),
            ..Self::unconfigured()
        }
        .with_refresh_interval(refresh_interval)
    }

    /// A panel without an evaluator. Shows a static notice.
    pub fn unconfigured() -> Self {
        Self {
            base: ComponentBase::new("watch"),
            entries: Vec::new(),
            evaluator: None,
            in_flight: HashSet::new(),
            refresh_interval: 0.25,
            last_refresh: None,
            line_height: 0.0,
        }
    }

    pub fn with_constraint(mut self, constraint: LayoutConstraint) -> Self {
        self.base.set_constraint(constraint);
        self
    }

    fn with_refresh_interval(mut self, seconds: f64) -> Self {
        self.refresh_interval = seconds.max(0.0);
        self
    }

    pub fn add_watch(
        &mut self,
        name: impl Into<String>,
        getter: impl Fn() -> Result<String, String> + Send + Sync + 'static,
    ) -> WatchId {
        self.push_entry(name.into(), Arc::new(getter), None)
    }

    /// A watch whose row is highlighted while `condition` holds.
    pub fn add_conditional_watch(
        &mut self,
        name: impl Into<String>,
        getter: impl Fn() -> Result<String, String> + Send + Sync + 'static,
        condition: impl Fn() -> Result<bool, String> + Send + Sync + 'static,
    ) -> WatchId {
        self.push_entry(name.into(), Arc::new(getter), Some(Arc::new(condition)))
    }

    fn push_entry(&mut self, name: String, getter: WatchGetter, condition: Option<WatchCondition>) -> WatchId {
        let id = WatchId::next();
        let row = Label::named(format!("watch:{name}"), format!("{name} = ..."));
        self.entries.push(WatchEntry {
            request: WatchRequest {
                id,
                name,
                getter,
                condition,
            },
            last: None,
            row,
        });
        self.relayout_rows();
        id
    }

    pub fn remove_watch(&mut self, id: WatchId) -> bool {
        let before = self.entries.len();
        let entries = std::mem::take(&mut self.entries);
        self.entries = entries.into_iter().filter(|e| e.request.id != id).collect();
        self.in_flight.remove(&id);
        self.relayout_rows();
        self.entries.len() != before
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Latest result for a watch, if any has arrived.
    pub fn result(&self, id: WatchId) -> Option<&WatchResult> {
        self.entries.iter().find(|e| e.request.id == id)?.last.as_ref()
    }

    /// Force a refresh on the next render.
    pub fn refresh(&mut self) {
        self.last_refresh = None;
    }

    fn relayout_rows(&mut self) {
        let line = self.line_height;
        for (i, entry) in self.entries.iter_mut().enumerate() {
            let constraint = entry.row.base_mut().constraint_mut();
            constraint.set_anchor(Anchor::StretchTop);
            constraint.set_offset_y(i as f32 * line);
            constraint.set_height(Some(line));
        }
    }

    fn apply_results(&mut self) {
        let Some(evaluator) = self.evaluator.as_ref() else {
            return;
        };
        for result in evaluator.drain() {
            self.in_flight.remove(&result.id);
            let Some(entry) = self.entries.iter_mut().find(|e| e.request.id == result.id) else {
                continue;
            };
            let text = match (&result.value, &result.error_message) {
                (Some(value), _) => format!("{} = {}", result.name, value),
                (None, Some(message)) => format!("{}: error: {}", result.name, message),
                (None, None) => format!("{}: error", result.name),
            };
            entry.row.set_text(text);
            entry.last = Some(result);
        }
    }

    fn submit_due(&mut self, now: f64) {
        let due = self.last_refresh.is_none_or(|last| now - last >= self.refresh_interval);
        let Some(evaluator) = self.evaluator.as_ref() else {
            return;
        };
        if !due {
            return;
        }
        self.last_refresh = Some(now);
        for entry in &self.entries {
            if self.in_flight.contains(&entry.request.id) {
                continue;
            }
            match evaluator.submit(entry.request.clone()) {
                Ok(()) => {
                    self.in_flight.insert(entry.request.id);
                }
                Err(WatchError::QueueFull) => break,
                Err(WatchError::Stopped) => {
                    tracing::warn!("watch evaluator stopped, dropping refresh");
                    break;
                }
            }
        }
    }
}

impl Component for WatchPanel {
    fn base(&self) -> &ComponentBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ComponentBase {
        &mut self.base
    }

    fn on_render(&mut self, ctx: &mut UiContext) -> UiResult<()> {
        let line = ctx.line_height();
        if line != self.line_height {
            self.line_height = line;
            self.relayout_rows();
        }
        self.apply_results();
        self.submit_due(ctx.input().time());

        let theme = ctx.theme();
        let (background, border, thickness, pad) =
            (theme.bg_secondary, theme.border, theme.border_thickness, theme.padding);
        let (muted, error, warning, fg) = (theme.fg_muted, theme.error, theme.warning, theme.fg_primary);
        let rect = self.base.rect();
        ctx.draw().draw_rectangle(rect, background);
        ctx.draw().draw_rectangle_outline(rect, border, thickness);

        let content = rect.inset(&porygon_ui::Padding::all(pad));
        if self.evaluator.is_none() {
            ctx.draw().draw_text("watch: not configured", content.x, content.y, muted);
            return Ok(());
        }

        let mut scope = ctx.begin_container_at(self.base.id(), content, Point::ORIGIN)?;
        for entry in &mut self.entries {
            let color = match &entry.last {
                Some(result) if result.has_error => error,
                Some(result) if result.condition_met == Some(true) => warning,
                Some(_) => fg,
                None => muted,
            };
            entry.row.set_color(Some(color));
            entry.row.render(&mut scope)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use porygon_ui::{DrawCommand, InputSample, Size, Theme};

    use super::*;

    fn request(getter: WatchGetter, condition: Option<WatchCondition>) -> WatchRequest {
        WatchRequest {
            id: WatchId::next(),
            name: "test".into(),
            getter,
            condition,
        }
    }

    #[test]
    fn evaluates_value_and_condition() {
        let result = evaluate(
            &request(Arc::new(|| Ok("42".into())), Some(Arc::new(|| Ok(true)))),
            Duration::from_secs(5),
        );
        assert!(!result.has_error);
        assert_eq!(result.value.as_deref(), Some("42"));
        assert_eq!(result.condition_met, Some(true));
    }

    #[test]
    fn getter_error_becomes_error_result() {
        let result = evaluate(&request(Arc::new(|| Err("no player".into())), None), Duration::from_secs(5));
        assert!(result.has_error);
        assert_eq!(result.error_message.as_deref(), Some("no player"));
    }

    #[test]
    fn panic_becomes_error_result() {
        let result = evaluate(&request(Arc::new(|| panic!("boom")), None), Duration::from_secs(5));
        assert!(result.has_error);
        assert_eq!(result.error_message.as_deref(), Some("panicked: boom"));
    }

    #[test]
    fn timeout_reports_elapsed() {
        let slow: WatchGetter = Arc::new(|| {
            thread::sleep(Duration::from_millis(500));
            Ok("late".into())
        });
        let result = evaluate(&request(slow, None), Duration::from_millis(20));
        assert!(result.has_error);
        let message = result.error_message.unwrap();
        assert!(message.starts_with("timed out after"), "{message}");
        assert!(result.elapsed >= Duration::from_millis(20));
    }

    #[test]
    fn worker_survives_bad_watches() {
        let mut evaluator = WatchEvaluator::spawn(Duration::from_secs(5), 8);
        evaluator.submit(request(Arc::new(|| panic!("first")), None)).unwrap();
        evaluator.submit(request(Arc::new(|| Ok("second".into())), None)).unwrap();

        let first = evaluator.recv_timeout(Duration::from_secs(5)).unwrap();
        let second = evaluator.recv_timeout(Duration::from_secs(5)).unwrap();
        assert!(first.has_error);
        assert_eq!(second.value.as_deref(), Some("second"));
        assert!(evaluator.shutdown(Duration::from_secs(5)));
    }

    #[test]
    fn submit_after_shutdown_fails() {
        let mut evaluator = WatchEvaluator::spawn(Duration::from_secs(1), 1);
        assert!(evaluator.shutdown(Duration::from_secs(5)));
        assert!(!evaluator.is_running());
        assert_eq!(
            evaluator.submit(request(Arc::new(|| Ok(String::new())), None)),
            Err(WatchError::Stopped)
        );
    }

    #[test]
    fn remove_watch_reindexes_rows() {
        let mut panel = WatchPanel::unconfigured();
        let a = panel.add_watch("a", || Ok("1".into()));
        let b = panel.add_watch("b", || Ok("2".into()));
        assert!(panel.remove_watch(a));
        assert!(!panel.remove_watch(a));
        assert_eq!(panel.len(), 1);
        assert_eq!(panel.entries[0].request.id, b);
        assert_eq!(panel.entries[0].row.constraint().offset_y(), 0.0);
    }

    fn drawn_text(ctx: &UiContext) -> Vec<(String, porygon_ui::Color)> {
        ctx.draw_list()
            .commands()
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text { text, color, .. } => Some((text.clone(), *color)),
                _ => None,
            })
            .collect()
    }

    /// Drive frames until `done` holds, giving the worker time in between.
    fn run_until(
        ctx: &mut UiContext,
        panel: &mut WatchPanel,
        time: &mut f64,
        done: impl Fn(&WatchPanel) -> bool,
    ) {
        let theme = Arc::new(Theme::dark());
        for _ in 0..300 {
            *time += 0.05;
            ctx.run_frame(InputSample::at(*time), Arc::clone(&theme), panel).unwrap();
            if done(panel) {
                return;
            }
            thread::sleep(Duration::from_millis(10));
        }
        panic!("watch results never arrived");
    }

    #[test]
    fn unconfigured_panel_shows_notice() {
        let mut ctx = UiContext::new(Size::new(400.0, 300.0));
        let mut panel = WatchPanel::unconfigured().with_constraint(LayoutConstraint::fill());
        ctx.run_frame(InputSample::at(0.1), Arc::new(Theme::dark()), &mut panel).unwrap();

        let theme = Theme::dark();
        assert!(drawn_text(&ctx).contains(&("watch: not configured".to_string(), theme.fg_muted)));
    }

    #[test]
    fn results_render_as_colored_rows() {
        let theme = Theme::dark();
        let mut ctx = UiContext::new(Size::new(800.0, 600.0));
        let evaluator = WatchEvaluator::spawn(Duration::from_millis(50), 16);
        let mut panel = WatchPanel::new(evaluator, 0.25).with_constraint(LayoutConstraint::fill());

        let plain = panel.add_watch("hp", || Ok("42".into()));
        let failing = panel.add_watch("player", || Err("no player".into()));
        let alarm = panel.add_conditional_watch("low", || Ok("3".into()), || Ok(true));
        let slow = panel.add_watch("slow", || {
            thread::sleep(Duration::from_millis(400));
            Ok("late".into())
        });

        let mut time = 0.0;
        run_until(&mut ctx, &mut panel, &mut time, |p| {
            [plain, failing, alarm, slow].iter().all(|id| p.result(*id).is_some())
        });

        let rows = drawn_text(&ctx);
        assert!(rows.contains(&("hp = 42".to_string(), theme.fg_primary)));
        assert!(rows.contains(&("player: error: no player".to_string(), theme.error)));
        assert!(rows.contains(&("low = 3".to_string(), theme.warning)));
        let timed_out = rows
            .iter()
            .find(|(text, _)| text.starts_with("slow: error: timed out after"))
            .expect("timeout row");
        assert_eq!(timed_out.1, theme.error);
    }

    #[test]
    fn in_flight_watch_is_not_resubmitted() {
        let calls = Arc::new(AtomicU64::new(0));
        let release = Arc::new(AtomicBool::new(false));
        let (counter, gate) = (Arc::clone(&calls), Arc::clone(&release));
        let mut ctx = UiContext::new(Size::new(800.0, 600.0));
        let evaluator = WatchEvaluator::spawn(Duration::from_secs(5), 16);
        let mut panel = WatchPanel::new(evaluator, 0.0).with_constraint(LayoutConstraint::fill());
        let id = panel.add_watch("blocked", move || {
            counter.fetch_add(1, Ordering::SeqCst);
            while !gate.load(Ordering::SeqCst) {
                thread::sleep(Duration::from_millis(2));
            }
            Ok("done".into())
        });

        let theme = Arc::new(Theme::dark());
        let mut time = 0.0;
        for _ in 0..5 {
            time += 0.05;
            ctx.run_frame(InputSample::at(time), Arc::clone(&theme), &mut panel).unwrap();
            thread::sleep(Duration::from_millis(10));
        }
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        release.store(true, Ordering::SeqCst);
        run_until(&mut ctx, &mut panel, &mut time, |p| p.result(id).is_some());
        assert_eq!(panel.result(id).and_then(|r| r.value.as_deref()), Some("done"));
    }

    #[test]
    fn refresh_waits_for_the_interval() {
        let calls = Arc::new(AtomicU64::new(0));
        let counter = Arc::clone(&calls);
        let mut ctx = UiContext::new(Size::new(800.0, 600.0));
        let evaluator = WatchEvaluator::spawn(Duration::from_secs(2), 16);
        let mut panel = WatchPanel::new(evaluator, 10.0).with_constraint(LayoutConstraint::fill());
        let id = panel.add_watch("ticks", move || Ok(counter.fetch_add(1, Ordering::SeqCst).to_string()));

        let mut time = 0.0;
        run_until(&mut ctx, &mut panel, &mut time, |p| p.result(id).is_some());

        let theme = Arc::new(Theme::dark());
        for _ in 0..5 {
            time += 0.05;
            ctx.run_frame(InputSample::at(time), Arc::clone(&theme), &mut panel).unwrap();
        }
        thread::sleep(Duration::from_millis(50));
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        time += 10.0;
        ctx.run_frame(InputSample::at(time), Arc::clone(&theme), &mut panel).unwrap();
        let deadline = Instant::now() + Duration::from_secs(5);
        while calls.load(Ordering::SeqCst) < 2 && Instant::now() < deadline {
            thread::sleep(Duration::from_millis(5));
        }
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }
}
