//! Typed component identity.
//!
//! Hover, focus, press and capture are keyed by `ComponentId`, a `u64`
//! handle allocated once when a component is constructed. Comparing ids is
//! an integer compare on the per-frame hot path; the human-readable name
//! lives next to it in the component base and is only used for diagnostics.

use std::fmt;
use std::hash::{DefaultHasher, Hash, Hasher};
use std::sync::atomic::{AtomicU64, Ordering};

/// Counter for allocated ids. Starts at 1 so 0 is never handed out.
static NEXT_COMPONENT_ID: AtomicU64 = AtomicU64::new(1);

/// Opaque handle identifying one component (or one interactive sub-region
/// of a component, see [`ComponentId::child`]).
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ComponentId(u64);

impl ComponentId {
    /// Allocate a fresh, process-unique id.
    pub fn new() -> Self {
        Self(NEXT_COMPONENT_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Deterministic id derived from a name.
    ///
    /// Sets the high bit to stay clear of the allocation counter.
    pub fn named(name: &str) -> Self {
        let mut hasher = DefaultHasher::new();
        name.hash(&mut hasher);
        Self(hasher.finish() | (1 << 63))
    }

    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> u64 {
        self.0
    }

    /// Derive a stable id for a sub-region (e.g. a scrollbar thumb) of this
    /// component. Splitmix64 finalizer over `(self, tag)`, high bit set.
    pub const fn child(self, tag: u64) -> Self {
        let mut z = self.0.wrapping_add(tag.wrapping_mul(0x9E3779B97F4A7C15));
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58476D1CE4E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D049BB133111EB);
        Self((z ^ (z >> 31)) | (1 << 63))
    }
}

impl Default for ComponentId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:x}", self.0)
    }
}

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:x}", self.0)
    }
}
