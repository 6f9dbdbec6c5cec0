//! Frame timing instrumentation.
//!
//! Emits per-frame timing breakdowns through `tracing` when enabled. Only
//! every 60th frame is reported to avoid flooding the log.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

static ENABLED: AtomicBool = AtomicBool::new(false);

const SAMPLE_EVERY: u64 = 60;

pub fn enable() {
    ENABLED.store(true, Ordering::Relaxed);
}

pub fn disable() {
    ENABLED.store(false, Ordering::Relaxed);
}

#[inline]
pub fn is_enabled() -> bool {
    ENABLED.load(Ordering::Relaxed)
}

#[inline]
fn sampled(frame: u64) -> bool {
    is_enabled() && frame % SAMPLE_EVERY == 0
}

/// Measures elapsed time from creation to drop.
pub struct TimingGuard {
    label: &'static str,
    start: Instant,
    frame: u64,
}

impl TimingGuard {
    #[inline]
    pub fn new(label: &'static str, frame: u64) -> Self {
        Self {
            label,
            start: Instant::now(),
            frame,
        }
    }
}

impl Drop for TimingGuard {
    fn drop(&mut self) {
        if sampled(self.frame) {
            tracing::debug!(frame = self.frame, label = self.label, elapsed = ?self.start.elapsed(), "frame timing");
        }
    }
}

/// Measure a closure. Returns its result.
#[inline]
pub fn measure<T>(label: &'static str, frame: u64, f: impl FnOnce() -> T) -> T {
    let _guard = TimingGuard::new(label, frame);
    f()
}

/// Report a counter value on sampled frames.
#[inline]
pub fn stat(label: &'static str, frame: u64, value: impl std::fmt::Display) {
    if sampled(frame) {
        tracing::debug!(frame, label, %value, "frame stat");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enable_disable() {
        disable();
        assert!(!is_enabled());
        enable();
        assert!(is_enabled());
        disable();
        assert!(!is_enabled());
    }

    #[test]
    fn test_only_every_sixtieth_frame_is_sampled_when_enabled() {
        enable();
        assert!(sampled(120));
        assert!(!sampled(121));
        disable();
        assert!(!sampled(120));
    }

    #[test]
    fn test_measure_returns_value() {
        assert_eq!(measure("test", 0, || 42), 42);
    }

    #[test]
    fn test_stat_accepts_display() {
        stat("draw_commands", 0, 12);
        stat("hovered", 60, "none");
    }
}
