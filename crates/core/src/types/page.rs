//! Pagination arithmetic for the course tables.
//!
//! The dashboard never pages server-side: the full filtered record set is
//! in memory and views slice it here. All navigation is clamped to
//! `[1, total_pages]`, with a minimum of one page even when the slice is
//! empty.

use core::ops::Range;

/// Fixed number of rows per table page.
pub const PAGE_SIZE: usize = 5;

/// Current position within a client-side filtered slice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    current: usize,
    total_items: usize,
}

impl Page {
    /// Start on the first page of a slice with `total_items` entries.
    #[must_use]
    pub const fn new(total_items: usize) -> Self {
        Self {
            current: 1,
            total_items,
        }
    }

    /// Resume at `requested` over a slice with `total_items` entries,
    /// clamping into range. Used when the page number round-trips through
    /// a query parameter.
    #[must_use]
    pub fn resume(total_items: usize, requested: usize) -> Self {
        let mut page = Self::new(total_items);
        page.current = requested.clamp(1, page.total_pages());
        page
    }

    /// The 1-based current page number.
    #[must_use]
    pub const fn current(&self) -> usize {
        self.current
    }

    /// Number of items being paged.
    #[must_use]
    pub const fn total_items(&self) -> usize {
        self.total_items
    }

    /// Total page count: `ceil(total_items / PAGE_SIZE)`, minimum 1.
    #[must_use]
    pub const fn total_pages(&self) -> usize {
        let pages = self.total_items.div_ceil(PAGE_SIZE);
        if pages == 0 { 1 } else { pages }
    }

    /// Jump directly to `page`.
    ///
    /// Out-of-range targets are rejected with no state change; returns
    /// whether the jump happened.
    pub fn go_to(&mut self, page: usize) -> bool {
        if page < 1 || page > self.total_pages() {
            return false;
        }
        self.current = page;
        true
    }

    /// Step by `delta` pages (e.g. -1/+1 or -10/+10), clamping at the
    /// first and last page.
    pub fn step(&mut self, delta: i64) {
        let target = i64::try_from(self.current).unwrap_or(i64::MAX) + delta;
        let last = i64::try_from(self.total_pages()).unwrap_or(i64::MAX);
        self.current = usize::try_from(target.clamp(1, last)).unwrap_or(1);
    }

    /// Jump to the first page.
    pub const fn first(&mut self) {
        self.current = 1;
    }

    /// Jump to the last page.
    pub fn last(&mut self) {
        self.current = self.total_pages();
    }

    /// Whether a previous page exists.
    #[must_use]
    pub const fn has_prev(&self) -> bool {
        self.current > 1
    }

    /// Whether a further page exists.
    #[must_use]
    pub fn has_next(&self) -> bool {
        self.current < self.total_pages()
    }

    /// Half-open index range of the current page within the slice.
    #[must_use]
    pub fn bounds(&self) -> Range<usize> {
        let start = (self.current - 1) * PAGE_SIZE;
        let end = (start + PAGE_SIZE).min(self.total_items);
        start.min(self.total_items)..end
    }

    /// The current page's view of `items`.
    ///
    /// `items` must be the slice whose length this page was built from.
    #[must_use]
    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let bounds = self.bounds();
        items.get(bounds).unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_pages_rounds_up() {
        assert_eq!(Page::new(12).total_pages(), 3);
        assert_eq!(Page::new(10).total_pages(), 2);
        assert_eq!(Page::new(1).total_pages(), 1);
    }

    #[test]
    fn test_empty_slice_has_one_page() {
        let page = Page::new(0);
        assert_eq!(page.total_pages(), 1);
        assert_eq!(page.bounds(), 0..0);
        assert!(!page.has_next());
        assert!(!page.has_prev());
    }

    #[test]
    fn test_go_to_rejects_out_of_range() {
        let mut page = Page::new(12);
        assert!(!page.go_to(0));
        assert_eq!(page.current(), 1);
        assert!(!page.go_to(4));
        assert_eq!(page.current(), 1);

        assert!(page.go_to(3));
        assert_eq!(page.current(), 3);
    }

    #[test]
    fn test_step_clamps() {
        let mut page = Page::new(60); // 12 pages
        page.step(10);
        assert_eq!(page.current(), 11);
        page.step(10);
        assert_eq!(page.current(), 12);
        page.step(-100);
        assert_eq!(page.current(), 1);
        page.step(-1);
        assert_eq!(page.current(), 1);
    }

    #[test]
    fn test_first_last() {
        let mut page = Page::new(37); // 8 pages
        page.last();
        assert_eq!(page.current(), 8);
        page.first();
        assert_eq!(page.current(), 1);
    }

    #[test]
    fn test_bounds_on_last_partial_page() {
        let mut page = Page::new(12);
        page.last();
        assert_eq!(page.bounds(), 10..12);
    }

    #[test]
    fn test_slice() {
        let items: Vec<usize> = (0..12).collect();
        let mut page = Page::new(items.len());
        assert_eq!(page.slice(&items), &[0, 1, 2, 3, 4]);
        page.step(1);
        assert_eq!(page.slice(&items), &[5, 6, 7, 8, 9]);
        page.last();
        assert_eq!(page.slice(&items), &[10, 11]);
    }

    #[test]
    fn test_resume_clamps() {
        assert_eq!(Page::resume(12, 7).current(), 3);
        assert_eq!(Page::resume(12, 0).current(), 1);
        assert_eq!(Page::resume(0, 5).current(), 1);
    }
}
