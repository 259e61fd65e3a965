use std::ops::Range;

use crate::error::TableError;

pub const PAGE_SIZE_OPTIONS: [usize; 5] = [5, 10, 25, 50, 100];
pub const DEFAULT_PAGE_SIZE: usize = 5;

/// Zero-indexed page over a row set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    page: usize,
    page_size: usize,
}

impl Default for Pagination {
    fn default() -> Self {
        Self { page: 0, page_size: DEFAULT_PAGE_SIZE }
    }
}

impl Pagination {
    pub fn new(page: usize, page_size: usize) -> Result<Self, TableError> {
        let mut pagination = Self::default();
        pagination.set_page_size(page_size)?;
        pagination.page = page;
        Ok(pagination)
    }

    pub const fn page(&self) -> usize {
        self.page
    }

    pub const fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn set_page(&mut self, page: usize) {
        self.page = page;
    }

    /// Changing the size always returns to the first page.
    pub fn set_page_size(&mut self, page_size: usize) -> Result<(), TableError> {
        if !PAGE_SIZE_OPTIONS.contains(&page_size) {
            return Err(TableError::UnsupportedPageSize(page_size));
        }
        self.page_size = page_size;
        self.page = 0;
        Ok(())
    }

    /// Indices of the visible rows. Length is
    /// `min(page_size, max(0, total - page * page_size))`.
    pub fn window(&self, total: usize) -> Range<usize> {
        let start = self.page.saturating_mul(self.page_size).min(total);
        let len = self.page_size.min(total - start);
        start..start + len
    }

    pub fn page_count(&self, total: usize) -> usize {
        total.div_ceil(self.page_size)
    }
}
