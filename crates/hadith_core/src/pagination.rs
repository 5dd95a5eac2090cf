//! crates/hadith_core/src/pagination.rs
//!
//! Page cursors for the search results and book listing, and the page-number
//! strip shown under them.

use std::ops::RangeInclusive;

pub const ITEMS_PER_PAGE: usize = 20;

/// One entry of the page-number strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageItem {
    Page(usize),
    Dots,
}

/// A 1-based page cursor over `total_items` items.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paginator {
    current: usize,
    per_page: usize,
    total_items: usize,
}

impl Paginator {
    pub fn new(per_page: usize) -> Self {
        Self {
            current: 1,
            per_page: per_page.max(1),
            total_items: 0,
        }
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn total_pages(&self) -> usize {
        self.total_items.div_ceil(self.per_page)
    }

    /// Updates the item count without moving the cursor.
    pub fn set_total(&mut self, total_items: usize) {
        self.total_items = total_items;
    }

    pub fn reset(&mut self) {
        self.current = 1;
    }

    /// Moves to `page` if it exists. Returns whether the cursor moved.
    pub fn go_to(&mut self, page: usize) -> bool {
        if page >= 1 && page <= self.total_pages() && page != self.current {
            self.current = page;
            return true;
        }
        false
    }

    /// Index bounds of the current page for slicing an in-memory list.
    pub fn slice_bounds(&self) -> (usize, usize) {
        let start = ((self.current - 1) * self.per_page).min(self.total_items);
        let end = (self.current * self.per_page).min(self.total_items);
        (start, end)
    }

    /// The 1-based item numbers of the current page, for range requests.
    pub fn item_range(&self) -> Option<RangeInclusive<u32>> {
        let (start, end) = self.slice_bounds();
        if start >= end {
            return None;
        }
        Some((start as u32 + 1)..=(end as u32))
    }

    /// The page-number strip with one sibling on each side of the current page.
    pub fn window(&self) -> Vec<PageItem> {
        page_window(self.current, self.total_pages(), 1)
    }
}

/// Computes a page-number strip: first and last page always shown, `siblings`
/// pages on each side of `current`, and `Dots` for the gaps.
pub fn page_window(current: usize, total_pages: usize, siblings: usize) -> Vec<PageItem> {
    let pages = |range: RangeInclusive<usize>| range.map(PageItem::Page).collect::<Vec<_>>();

    // first + last + current + two dots + siblings
    let slots = siblings + 5;
    if slots >= total_pages {
        return pages(1..=total_pages);
    }

    let left = current.saturating_sub(siblings).max(1);
    let right = (current + siblings).min(total_pages);
    let left_dots = left > 2;
    let right_dots = right + 2 < total_pages;
    let edge_count = 3 + 2 * siblings;

    match (left_dots, right_dots) {
        (false, true) => {
            let mut items = pages(1..=edge_count);
            items.extend([PageItem::Dots, PageItem::Page(total_pages)]);
            items
        }
        (true, false) => {
            let mut items = vec![PageItem::Page(1), PageItem::Dots];
            items.extend(pages(total_pages - edge_count + 1..=total_pages));
            items
        }
        (true, true) => {
            let mut items = vec![PageItem::Page(1), PageItem::Dots];
            items.extend(pages(left..=right));
            items.extend([PageItem::Dots, PageItem::Page(total_pages)]);
            items
        }
        (false, false) => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::PageItem::{Dots, Page};
    use super::*;

    #[test]
    fn small_totals_list_every_page() {
        assert_eq!(page_window(1, 4, 1), vec![Page(1), Page(2), Page(3), Page(4)]);
        assert!(page_window(1, 0, 1).is_empty());
    }

    #[test]
    fn window_near_the_start_has_trailing_dots() {
        assert_eq!(
            page_window(2, 20, 1),
            vec![Page(1), Page(2), Page(3), Page(4), Page(5), Dots, Page(20)]
        );
    }

    #[test]
    fn window_near_the_end_has_leading_dots() {
        assert_eq!(
            page_window(19, 20, 1),
            vec![Page(1), Dots, Page(16), Page(17), Page(18), Page(19), Page(20)]
        );
    }

    #[test]
    fn window_in_the_middle_has_both_dots() {
        assert_eq!(
            page_window(10, 20, 1),
            vec![Page(1), Dots, Page(9), Page(10), Page(11), Dots, Page(20)]
        );
    }

    #[test]
    fn slice_bounds_truncate_the_last_page() {
        let mut paginator = Paginator::new(ITEMS_PER_PAGE);
        paginator.set_total(45);
        assert_eq!(paginator.total_pages(), 3);
        assert!(paginator.go_to(3));
        assert_eq!(paginator.slice_bounds(), (40, 45));
        assert_eq!(paginator.item_range(), Some(41..=45));
    }

    #[test]
    fn go_to_rejects_out_of_range_pages() {
        let mut paginator = Paginator::new(ITEMS_PER_PAGE);
        paginator.set_total(30);
        assert!(!paginator.go_to(0));
        assert!(!paginator.go_to(3));
        assert!(paginator.go_to(2));
        assert_eq!(paginator.current(), 2);
    }

    #[test]
    fn empty_paginator_has_no_range() {
        assert_eq!(Paginator::new(ITEMS_PER_PAGE).item_range(), None);
    }
}
