//! Viewport intersection test for the infinite-scroll sentinel.
//!
//! Models the browser's intersection observer along the vertical axis: the
//! viewport is grown by a root margin on both edges, and the sentinel counts as
//! visible once the visible fraction of its height reaches the threshold.

/// Default pre-fetch margin in pixels.
pub const DEFAULT_ROOT_MARGIN: f64 = 100.0;

/// Default visible fraction that counts as intersecting.
pub const DEFAULT_THRESHOLD: f64 = 0.1;

/// A vertical extent in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Span {
    pub top: f64,
    pub height: f64,
}

impl Span {
    #[must_use]
    pub const fn new(top: f64, height: f64) -> Self {
        Self { top, height }
    }

    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.top + self.height.max(0.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SentinelObserver {
    root_margin: f64,
    threshold: f64,
}

impl SentinelObserver {
    #[must_use]
    pub const fn new(root_margin: f64, threshold: f64) -> Self {
        Self {
            root_margin,
            threshold,
        }
    }

    /// Fraction of the sentinel inside the margin-expanded viewport.
    ///
    /// A zero-height sentinel reports 1.0 when it lies within the expanded
    /// viewport (edges included) and 0.0 otherwise.
    #[must_use]
    pub fn intersection_ratio(&self, sentinel: Span, viewport: Span) -> f64 {
        let top = viewport.top - self.root_margin;
        let bottom = viewport.bottom() + self.root_margin;

        if sentinel.height <= 0.0 {
            return if sentinel.top >= top && sentinel.top <= bottom {
                1.0
            } else {
                0.0
            };
        }

        let overlap = sentinel.bottom().min(bottom) - sentinel.top.max(top);
        (overlap.max(0.0) / sentinel.height).min(1.0)
    }

    /// Whether the sentinel should trigger a load.
    #[must_use]
    pub fn is_visible(&self, sentinel: Span, viewport: Span) -> bool {
        let ratio = self.intersection_ratio(sentinel, viewport);
        ratio > 0.0 && ratio >= self.threshold
    }
}

impl Default for SentinelObserver {
    fn default() -> Self {
        Self::new(DEFAULT_ROOT_MARGIN, DEFAULT_THRESHOLD)
    }
}

/// Geometry of the movie grid, used to place the sentinel below the last row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridLayout {
    pub columns: usize,
    pub row_height: f64,
    pub sentinel_height: f64,
}

impl GridLayout {
    /// Where the sentinel sits once `items` cards are laid out.
    #[must_use]
    pub fn sentinel_span(&self, items: usize) -> Span {
        let rows = items.div_ceil(self.columns.max(1));
        #[allow(clippy::cast_precision_loss)]
        let top = rows as f64 * self.row_height;
        Span::new(top, self.sentinel_height)
    }
}

impl Default for GridLayout {
    fn default() -> Self {
        Self {
            columns: 4,
            row_height: 380.0,
            sentinel_height: 16.0,
        }
    }
}
