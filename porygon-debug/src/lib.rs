//! Porygon debug panels.
//!
//! Watch, stats and console panels plus the overlay root that hosts them,
//! all built on the `porygon-ui` frame engine. Watch expressions are
//! evaluated on a background thread; everything else runs on the UI thread.

pub mod config;
pub mod console;
pub mod overlay;
pub mod stats;
pub mod watch;

pub use config::{ConfigError, DebugUiConfig};
pub use console::{ConsoleLevel, ConsoleLine, ConsolePanel};
pub use overlay::DebugOverlay;
pub use stats::{StatsPanel, StatsProvider};
pub use watch::{WatchError, WatchEvaluator, WatchId, WatchPanel, WatchRequest, WatchResult};
