//! Horizontal gallery cursor and scroll offset.

/// Width of one card in columns, gap included. Page scroll moves by this much.
pub const CARD_STRIDE: usize = 24;

/// Cursor and horizontal scroll state of one gallery row.
///
/// The offset is in columns and always stays within
/// `[0, content_width - viewport_width]`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GalleryScroll {
    pub cursor: usize,
    pub offset: usize,
}

impl GalleryScroll {
    /// Total width of a row of `len` cards.
    #[must_use]
    pub const fn content_width(len: usize) -> usize {
        len * CARD_STRIDE
    }

    #[must_use]
    pub const fn max_offset(len: usize, viewport_width: usize) -> usize {
        Self::content_width(len).saturating_sub(viewport_width)
    }

    /// Scrolls one card stride left or right, clamped, then pulls the cursor into view.
    pub fn scroll_page(&mut self, forward: bool, len: usize, viewport_width: usize) {
        let max = Self::max_offset(len, viewport_width);
        self.offset = if forward {
            (self.offset + CARD_STRIDE).min(max)
        } else {
            self.offset.saturating_sub(CARD_STRIDE)
        };

        let (first, last) = self.visible_range(len, viewport_width);
        if len > 0 {
            self.cursor = self.cursor.clamp(first, last);
        }
    }

    /// Moves the cursor one card, keeping it visible.
    pub fn step(&mut self, forward: bool, len: usize, viewport_width: usize) {
        if len == 0 {
            return;
        }
        self.cursor = if forward {
            (self.cursor + 1).min(len - 1)
        } else {
            self.cursor.saturating_sub(1)
        };
        self.reveal_cursor(len, viewport_width);
    }

    fn reveal_cursor(&mut self, len: usize, viewport_width: usize) {
        let start = self.cursor * CARD_STRIDE;
        let end = start + CARD_STRIDE;
        if start < self.offset {
            self.offset = start;
        } else if end > self.offset + viewport_width {
            self.offset = end.saturating_sub(viewport_width);
        }
        self.offset = self.offset.min(Self::max_offset(len, viewport_width));
    }

    /// Indices of the first and last card at least partly inside the viewport.
    #[must_use]
    pub fn visible_range(&self, len: usize, viewport_width: usize) -> (usize, usize) {
        if len == 0 {
            return (0, 0);
        }
        let first = (self.offset / CARD_STRIDE).min(len - 1);
        let last = ((self.offset + viewport_width.max(1) - 1) / CARD_STRIDE).min(len - 1);
        (first, last.max(first))
    }

    /// Re-clamps after the list or the viewport changed size.
    pub fn clamp(&mut self, len: usize, viewport_width: usize) {
        self.cursor = self.cursor.min(len.saturating_sub(1));
        self.offset = self.offset.min(Self::max_offset(len, viewport_width));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_scroll_is_clamped_at_both_ends() {
        let mut gallery = GalleryScroll::default();
        let viewport = CARD_STRIDE * 3;

        gallery.scroll_page(false, 10, viewport);
        assert_eq!(gallery.offset, 0);

        for _ in 0..20 {
            gallery.scroll_page(true, 10, viewport);
        }
        assert_eq!(gallery.offset, CARD_STRIDE * 7);
        assert_eq!(gallery.cursor, 7);
    }

    #[test]
    fn narrow_content_never_scrolls() {
        let mut gallery = GalleryScroll::default();
        gallery.scroll_page(true, 2, 200);
        assert_eq!(gallery.offset, 0);
    }

    #[test]
    fn stepping_reveals_the_cursor() {
        let mut gallery = GalleryScroll::default();
        let viewport = CARD_STRIDE * 2;
        gallery.step(true, 5, viewport);
        gallery.step(true, 5, viewport);
        assert_eq!(gallery.cursor, 2);
        assert_eq!(gallery.offset, CARD_STRIDE);

        gallery.step(false, 5, viewport);
        gallery.step(false, 5, viewport);
        assert_eq!(gallery.offset, 0);
    }

    #[test]
    fn clamp_follows_shrinking_lists() {
        let mut gallery = GalleryScroll {
            cursor: 9,
            offset: CARD_STRIDE * 8,
        };
        gallery.clamp(3, CARD_STRIDE);
        assert_eq!(gallery.cursor, 2);
        assert_eq!(gallery.offset, CARD_STRIDE * 2);
    }
}
