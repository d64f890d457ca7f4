//! Pager window math and the template-facing page wrapper.

use serde::Serialize;

/// Number of page links rendered when enough pages exist.
const WINDOW_SIZE: usize = 11;
/// Pages shown on each side of the current page.
const HALF_SPAN: usize = 5;

/// Inclusive range of page numbers to render as links.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageWindow {
    pub start: usize,
    pub end: usize,
}

impl PageWindow {
    /// Centers the window on `current_page`, then re-anchors it when it
    /// falls off either edge so that `min(WINDOW_SIZE, last_page)` links
    /// show whenever possible. With no pages at all the degenerate `{1, 1}`
    /// window is returned so the pager still renders.
    pub fn compute(current_page: usize, last_page: usize) -> Self {
        if last_page == 0 {
            return Self { start: 1, end: 1 };
        }

        let mut start = current_page.saturating_sub(HALF_SPAN).max(1);
        let mut end = current_page.saturating_add(HALF_SPAN).min(last_page);

        if end.saturating_sub(start) + 1 < WINDOW_SIZE {
            end = start.saturating_add(WINDOW_SIZE - 1).min(last_page);
        }
        if end.saturating_sub(start) + 1 < WINDOW_SIZE {
            start = end.saturating_sub(WINDOW_SIZE - 1).max(1);
        }

        Self { start, end }
    }
}

/// One page of items plus everything the pager template needs.
#[derive(Debug, Serialize)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub page: usize,
    pub last_page: usize,
    pub total: usize,
    /// Page numbers of the visible window, in order.
    pub pages: Vec<usize>,
}

impl<T> Paginated<T> {
    pub fn new(items: Vec<T>, page: usize, last_page: usize, total: usize) -> Self {
        let page = page.max(1);
        let window = PageWindow::compute(page, last_page);

        Self {
            items,
            page,
            last_page,
            total,
            pages: (window.start..=window.end).collect(),
        }
    }
}
