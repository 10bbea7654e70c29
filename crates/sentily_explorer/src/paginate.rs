//! Fixed-size pagination with clamped navigation.

use serde::Serialize;

/// Page buttons shown in the navigation bar.
pub const PAGE_WINDOW: usize = 5;

/// `ceil(len / page_size)`; zero for an empty list or a zero page size.
pub fn total_pages(len: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    len.div_ceil(page_size)
}

/// One slice of a list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page<'a, T> {
    pub items: &'a [T],
    /// 1-based page number this slice was cut for
    pub number: usize,
    pub total_pages: usize,
    pub total_items: usize,
    /// Offset of `items[0]` in the full list
    pub offset: usize,
}

impl<'a, T> Page<'a, T> {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// 1-based inclusive `(first, last)` item positions, for
    /// "Showing X to Y of Z". `None` when the page is empty.
    pub fn item_range(&self) -> Option<(usize, usize)> {
        if self.items.is_empty() {
            None
        } else {
            Some((self.offset + 1, self.offset + self.items.len()))
        }
    }
}

/// Cut page `page` (1-based) out of `records`. A page past the end yields an
/// empty slice; page 0 is read as page 1.
pub fn paginate<T>(records: &[T], page: usize, page_size: usize) -> Page<'_, T> {
    let total = total_pages(records.len(), page_size);
    let number = page.max(1);
    let start = (number - 1).saturating_mul(page_size).min(records.len());
    let end = start.saturating_add(page_size).min(records.len());
    Page {
        items: &records[start..end],
        number,
        total_pages: total,
        total_items: records.len(),
        offset: start,
    }
}

/// Current page of an interactive view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageState {
    current_page: usize,
    items_per_page: usize,
}

impl PageState {
    pub fn new(items_per_page: usize) -> Self {
        Self {
            current_page: 1,
            items_per_page: items_per_page.max(1),
        }
    }

    pub fn current(&self) -> usize {
        self.current_page
    }

    pub fn items_per_page(&self) -> usize {
        self.items_per_page
    }

    pub fn reset(&mut self) {
        self.current_page = 1;
    }

    /// Clamp into `[1, max(1, total_pages)]`.
    pub fn clamp(&mut self, total_pages: usize) {
        self.current_page = self.current_page.clamp(1, total_pages.max(1));
    }

    pub fn go_to(&mut self, page: usize, total_pages: usize) {
        self.current_page = page;
        self.clamp(total_pages);
    }

    pub fn next(&mut self, total_pages: usize) {
        self.go_to(self.current_page.saturating_add(1), total_pages);
    }

    pub fn previous(&mut self, total_pages: usize) {
        self.go_to(self.current_page.saturating_sub(1), total_pages);
    }

    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    /// Zero and one total pages both mean "nowhere to go".
    pub fn has_next(&self, total_pages: usize) -> bool {
        self.current_page < total_pages
    }

    /// Page numbers offered as direct links: the first `PAGE_WINDOW` pages.
    pub fn page_numbers(total_pages: usize) -> std::ops::RangeInclusive<usize> {
        1..=total_pages.min(PAGE_WINDOW)
    }
}

impl Default for PageState {
    fn default() -> Self {
        Self::new(sentily_protocol::defaults::DEFAULT_PAGE_SIZE)
    }
}
