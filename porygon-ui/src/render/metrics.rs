//! Text measurement.
//!
//! The engine assumes a monospace face: width is display columns times a
//! fixed advance, so CJK and emoji count as two columns. Measurements are
//! memoized in an LRU keyed by the string, since panels re-measure the same
//! labels every frame.

use std::cell::{Cell, RefCell};
use std::num::NonZeroUsize;

use lru::LruCache;
use unicode_width::UnicodeWidthStr;

use crate::primitives::Size;

/// Advance of one monospace column at the base font size.
pub const CHAR_WIDTH: f32 = 8.4;

/// Height of one text line at the base font size.
pub const LINE_HEIGHT: f32 = 18.0;

const DEFAULT_CACHE_CAPACITY: usize = 1024;

/// Measures text for layout.
pub trait TextMetrics {
    fn measure(&self, text: &str) -> Size;

    fn line_height(&self) -> f32;

    /// X offset of the caret placed before char index `col`.
    fn caret_x(&self, text: &str, col: usize) -> f32 {
        let prefix: String = text.chars().take(col).collect();
        self.measure(&prefix).width
    }
}

/// Fixed-advance metrics based on Unicode display width.
#[derive(Debug, Clone, Copy)]
pub struct MonospaceMetrics {
    pub char_width: f32,
    pub line_height: f32,
}

impl Default for MonospaceMetrics {
    fn default() -> Self {
        Self {
            char_width: CHAR_WIDTH,
            line_height: LINE_HEIGHT,
        }
    }
}

impl MonospaceMetrics {
    pub fn new(char_width: f32, line_height: f32) -> Self {
        Self { char_width, line_height }
    }
}

impl TextMetrics for MonospaceMetrics {
    fn measure(&self, text: &str) -> Size {
        let mut lines = 0usize;
        let mut widest = 0usize;
        for line in text.split('\n') {
            lines += 1;
            widest = widest.max(UnicodeWidthStr::width(line));
        }
        Size::new(widest as f32 * self.char_width, lines as f32 * self.line_height)
    }

    fn line_height(&self) -> f32 {
        self.line_height
    }
}

/// Memoizing wrapper around another [`TextMetrics`].
pub struct CachedMetrics<M = MonospaceMetrics> {
    inner: M,
    cache: RefCell<LruCache<String, Size>>,
    hits: Cell<u64>,
    misses: Cell<u64>,
}

impl<M: TextMetrics> CachedMetrics<M> {
    pub fn new(inner: M) -> Self {
        Self::with_capacity(inner, DEFAULT_CACHE_CAPACITY)
    }

    pub fn with_capacity(inner: M, capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            inner,
            cache: RefCell::new(LruCache::new(capacity)),
            hits: Cell::new(0),
            misses: Cell::new(0),
        }
    }

    pub fn hits(&self) -> u64 {
        self.hits.get()
    }

    pub fn misses(&self) -> u64 {
        self.misses.get()
    }

    pub fn len(&self) -> usize {
        self.cache.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.borrow().is_empty()
    }

    pub fn inner(&self) -> &M {
        &self.inner
    }
}

impl Default for CachedMetrics<MonospaceMetrics> {
    fn default() -> Self {
        Self::new(MonospaceMetrics::default())
    }
}

impl<M: TextMetrics> TextMetrics for CachedMetrics<M> {
    fn measure(&self, text: &str) -> Size {
        if let Some(size) = self.cache.borrow_mut().get(text) {
            self.hits.set(self.hits.get() + 1);
            return *size;
        }
        self.misses.set(self.misses.get() + 1);
        let size = self.inner.measure(text);
        self.cache.borrow_mut().put(text.to_owned(), size);
        size
    }

    fn line_height(&self) -> f32 {
        self.inner.line_height()
    }
}

impl<M> std::fmt::Debug for CachedMetrics<M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CachedMetrics")
            .field("hits", &self.hits.get())
            .field("misses", &self.misses.get())
            .finish_non_exhaustive()
    }
}
