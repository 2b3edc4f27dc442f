//! Horizontal carousel scroll position and arrow visibility.

/// Distance one arrow click scrolls, in pixels.
pub const SCROLL_STEP: f64 = 800.0;

/// Card width in a carousel row, in pixels.
pub const CARD_WIDTH: f64 = 256.0;

/// Gap between cards, in pixels.
pub const CARD_GAP: f64 = 16.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollDirection {
    Left,
    Right,
}

/// Scroll state of one carousel row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CarouselScroll {
    offset: f64,
    viewport_width: f64,
    content_width: f64,
}

impl CarouselScroll {
    #[must_use]
    pub fn new(viewport_width: f64, content_width: f64) -> Self {
        Self {
            offset: 0.0,
            viewport_width: viewport_width.max(0.0),
            content_width: content_width.max(0.0),
        }
    }

    /// State for a row of `cards` fixed-width cards.
    #[must_use]
    pub fn for_cards(cards: usize, viewport_width: f64) -> Self {
        #[allow(clippy::cast_precision_loss)]
        let content = if cards == 0 {
            0.0
        } else {
            cards as f64 * (CARD_WIDTH + CARD_GAP) - CARD_GAP
        };
        Self::new(viewport_width, content)
    }

    #[must_use]
    pub const fn offset(&self) -> f64 {
        self.offset
    }

    fn max_offset(&self) -> f64 {
        (self.content_width - self.viewport_width).max(0.0)
    }

    #[must_use]
    pub fn can_scroll_left(&self) -> bool {
        self.offset > 0.0
    }

    #[must_use]
    pub fn can_scroll_right(&self) -> bool {
        self.offset + self.viewport_width < self.content_width
    }

    /// Scrolls one step, clamped to the content bounds.
    pub fn scroll(&mut self, direction: ScrollDirection) {
        let delta = match direction {
            ScrollDirection::Left => -SCROLL_STEP,
            ScrollDirection::Right => SCROLL_STEP,
        };
        self.offset = (self.offset + delta).clamp(0.0, self.max_offset());
    }

    /// Applies an externally observed scroll position (e.g. a drag).
    pub fn set_offset(&mut self, offset: f64) {
        self.offset = offset.clamp(0.0, self.max_offset());
    }

    /// Recomputes after the viewport is resized.
    pub fn resize(&mut self, viewport_width: f64) {
        self.viewport_width = viewport_width.max(0.0);
        self.offset = self.offset.clamp(0.0, self.max_offset());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arrows_track_position() {
        let mut row = CarouselScroll::new(1000.0, 2700.0);
        assert!(!row.can_scroll_left());
        assert!(row.can_scroll_right());

        row.scroll(ScrollDirection::Right);
        assert_eq!(row.offset(), 800.0);
        assert!(row.can_scroll_left());

        row.scroll(ScrollDirection::Right);
        row.scroll(ScrollDirection::Right);
        assert_eq!(row.offset(), 1700.0);
        assert!(!row.can_scroll_right());

        row.scroll(ScrollDirection::Left);
        assert_eq!(row.offset(), 900.0);
    }

    #[test]
    fn short_rows_show_no_arrows() {
        let row = CarouselScroll::for_cards(3, 1200.0);
        assert!(!row.can_scroll_left());
        assert!(!row.can_scroll_right());
    }

    #[test]
    fn shrinking_viewport_reveals_right_arrow() {
        let mut row = CarouselScroll::for_cards(4, 1200.0);
        assert!(!row.can_scroll_right());
        row.resize(600.0);
        assert!(row.can_scroll_right());
    }
}
