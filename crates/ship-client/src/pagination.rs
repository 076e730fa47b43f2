//! In-memory paging over an already fetched list.

use std::ops::Range;

pub const ROWS_PER_PAGE_OPTIONS: [usize; 4] = [5, 10, 20, 50];
pub const DEFAULT_ROWS_PER_PAGE: usize = 10;

/// Current page position. Pages are 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paginator {
    total_items: usize,
    rows_per_page: usize,
    current_page: usize,
}

impl Paginator {
    pub fn new(total_items: usize) -> Self {
        Self {
            total_items,
            rows_per_page: DEFAULT_ROWS_PER_PAGE,
            current_page: 1,
        }
    }

    pub fn rows_per_page(&self) -> usize {
        self.rows_per_page
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn total_items(&self) -> usize {
        self.total_items
    }

    /// `ceil(total_items / rows_per_page)`; zero for an empty list.
    pub fn total_pages(&self) -> usize {
        self.total_items.div_ceil(self.rows_per_page)
    }

    /// Switch page size and go back to page 1.
    ///
    /// Returns `false` and changes nothing for sizes outside
    /// [`ROWS_PER_PAGE_OPTIONS`].
    pub fn set_rows_per_page(&mut self, rows: usize) -> bool {
        if !ROWS_PER_PAGE_OPTIONS.contains(&rows) {
            return false;
        }
        self.rows_per_page = rows;
        self.current_page = 1;
        true
    }

    /// Move to `page`. Pages outside `1..=total_pages` are ignored.
    pub fn go_to(&mut self, page: usize) -> bool {
        if page < 1 || page > self.total_pages() {
            return false;
        }
        self.current_page = page;
        true
    }

    pub fn next(&mut self) -> bool {
        self.go_to(self.current_page + 1)
    }

    pub fn previous(&mut self) -> bool {
        self.current_page > 1 && self.go_to(self.current_page - 1)
    }

    /// Index range of the current page.
    pub fn range(&self) -> Range<usize> {
        let start = ((self.current_page - 1) * self.rows_per_page).min(self.total_items);
        let end = (start + self.rows_per_page).min(self.total_items);
        start..end
    }

    pub fn page_of<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let range = self.range();
        let end = range.end.min(items.len());
        &items[range.start.min(end)..end]
    }
}
