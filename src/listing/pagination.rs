//! Pagination calculator

use crate::models::ListingPage;

pub const DEFAULT_MAX_VISIBLE: u32 = 7;
const MIN_VISIBLE: u32 = 5;

/// One position in the page-number window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageSlot {
    Page(u32),
    Ellipsis,
}

impl std::fmt::Display for PageSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PageSlot::Page(n) => write!(f, "{}", n),
            PageSlot::Ellipsis => write!(f, "..."),
        }
    }
}

/// Page-number window for the pagination bar.
///
/// A page count of 0 is treated as one empty page.
pub fn window(page_number: u32, page_count: u32, max_visible: u32) -> Vec<PageSlot> {
    let page_count = page_count.max(1);
    let current = page_number.clamp(1, page_count);
    // head and tail runs are five pages wide
    let max_visible = max_visible.max(MIN_VISIBLE);

    if page_count <= max_visible {
        return (1..=page_count).map(PageSlot::Page).collect();
    }

    let mut slots = Vec::with_capacity(7);
    if current <= 3 {
        slots.extend((1..=5).map(PageSlot::Page));
        slots.push(PageSlot::Ellipsis);
        slots.push(PageSlot::Page(page_count));
    } else if current >= page_count - 2 {
        slots.push(PageSlot::Page(1));
        slots.push(PageSlot::Ellipsis);
        slots.extend((page_count - 4..=page_count).map(PageSlot::Page));
    } else {
        slots.push(PageSlot::Page(1));
        slots.push(PageSlot::Ellipsis);
        slots.extend((current - 1..=current + 1).map(PageSlot::Page));
        slots.push(PageSlot::Ellipsis);
        slots.push(PageSlot::Page(page_count));
    }
    slots
}

/// Current position within a paginated listing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pager {
    current: u32,
    page_count: u32,
}

impl Pager {
    pub fn new(page_number: u32, page_count: u32) -> Self {
        let page_count = page_count.max(1);
        Self {
            current: page_number.clamp(1, page_count),
            page_count,
        }
    }

    pub fn for_page(page: &ListingPage) -> Self {
        Self::new(page.page_number, page.page_count)
    }

    pub fn current(&self) -> u32 {
        self.current
    }

    pub fn page_count(&self) -> u32 {
        self.page_count
    }

    pub fn window(&self, max_visible: u32) -> Vec<PageSlot> {
        window(self.current, self.page_count, max_visible)
    }

    pub fn prev_disabled(&self) -> bool {
        self.current == 1
    }

    pub fn next_disabled(&self) -> bool {
        self.current == self.page_count
    }

    /// Target page for a jump to `n`, clamped into range.
    ///
    /// `None` when the jump would land on the current page.
    pub fn go_to_page(&self, n: u32) -> Option<u32> {
        let target = n.clamp(1, self.page_count);
        (target != self.current).then_some(target)
    }

    pub fn prev(&self) -> Option<u32> {
        if self.prev_disabled() {
            return None;
        }
        self.go_to_page(self.current - 1)
    }

    pub fn next(&self) -> Option<u32> {
        if self.next_disabled() {
            return None;
        }
        self.go_to_page(self.current + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use PageSlot::{Ellipsis, Page};

    #[test]
    fn test_window_short_listing() {
        assert_eq!(window(2, 4, 7), vec![Page(1), Page(2), Page(3), Page(4)]);
        assert_eq!(window(7, 7, 7).len(), 7);
    }

    #[test]
    fn test_window_at_start() {
        assert_eq!(
            window(1, 10, 7),
            vec![Page(1), Page(2), Page(3), Page(4), Page(5), Ellipsis, Page(10)]
        );
        assert_eq!(window(3, 10, 7), window(1, 10, 7));
    }

    #[test]
    fn test_window_at_end() {
        assert_eq!(
            window(10, 10, 7),
            vec![Page(1), Ellipsis, Page(6), Page(7), Page(8), Page(9), Page(10)]
        );
        assert_eq!(window(8, 10, 7), window(10, 10, 7));
    }

    #[test]
    fn test_window_in_middle() {
        assert_eq!(
            window(5, 10, 7),
            vec![Page(1), Ellipsis, Page(4), Page(5), Page(6), Ellipsis, Page(10)]
        );
    }

    #[test]
    fn test_window_zero_results() {
        assert_eq!(window(1, 0, 7), vec![Page(1)]);
    }

    #[test]
    fn test_window_narrow_limit_is_widened() {
        assert_eq!(
            window(1, 6, 3),
            vec![Page(1), Page(2), Page(3), Page(4), Page(5), Ellipsis, Page(6)]
        );
        assert_eq!(window(2, 5, 3).len(), 5);
    }

    #[test]
    fn test_slot_labels() {
        let labels: Vec<String> = window(5, 10, 7).iter().map(ToString::to_string).collect();
        assert_eq!(labels, vec!["1", "...", "4", "5", "6", "...", "10"]);
    }

    #[test]
    fn test_boundary_controls() {
        let first = Pager::new(1, 5);
        assert!(first.prev_disabled());
        assert!(!first.next_disabled());
        assert_eq!(first.prev(), None);
        assert_eq!(first.next(), Some(2));

        let last = Pager::new(5, 5);
        assert!(last.next_disabled());
        assert_eq!(last.next(), None);
        assert_eq!(last.prev(), Some(4));

        let only = Pager::new(1, 0);
        assert!(only.prev_disabled() && only.next_disabled());
    }

    #[test]
    fn test_go_to_page_clamps_and_skips_current() {
        let pager = Pager::new(3, 5);
        assert_eq!(pager.go_to_page(3), None);
        assert_eq!(pager.go_to_page(4), Some(4));
        assert_eq!(pager.go_to_page(99), Some(5));
        assert_eq!(pager.go_to_page(0), Some(1));
        assert_eq!(Pager::new(5, 5).go_to_page(42), None);
    }
}
