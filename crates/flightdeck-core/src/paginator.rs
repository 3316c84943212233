//! Page-at-a-time flight listing.

use log::debug;

use crate::{db::Database, error::Result, filters::FlightQuery, models::FlightListing};

/// Results per page when none is configured.
pub const DEFAULT_PAGE_SIZE: usize = 5;

/// Tracks the current page of a filtered flight listing.
///
/// Each fetch asks for one row more than a page holds; getting it back is
/// how the paginator learns there is a next page without counting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paginator {
    page: usize,
    page_size: usize,
    has_next: bool,
}

impl Default for Paginator {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl Paginator {
    /// A paginator on the first page. A zero page size is treated as one.
    pub fn new(page_size: usize) -> Self {
        Self {
            page: 0,
            page_size: page_size.max(1),
            has_next: false,
        }
    }

    /// Zero-based page index.
    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Whether the last fetch found rows beyond the current page.
    pub fn has_next(&self) -> bool {
        self.has_next
    }

    pub fn has_previous(&self) -> bool {
        self.page > 0
    }

    /// Fetches the current page of flights matching `query`.
    pub fn fetch(&mut self, db: &Database, query: &FlightQuery) -> Result<Vec<FlightListing>> {
        let offset = self.page * self.page_size;
        let mut rows = db.search_flights(query, self.page_size + 1, offset)?;

        self.has_next = rows.len() > self.page_size;
        rows.truncate(self.page_size);

        debug!(
            "Page {} ({} rows, next page: {})",
            self.page + 1,
            rows.len(),
            self.has_next
        );
        Ok(rows)
    }

    /// Moves to the next page if the last fetch found one.
    pub fn next(&mut self) -> bool {
        if self.has_next {
            self.page += 1;
            self.has_next = false;
            true
        } else {
            false
        }
    }

    /// Moves to the previous page unless already on the first.
    pub fn previous(&mut self) -> bool {
        if self.page > 0 {
            self.page -= 1;
            true
        } else {
            false
        }
    }

    /// Back to the first page; used whenever the result set changes shape.
    pub fn reset(&mut self) {
        self.page = 0;
        self.has_next = false;
    }

    /// Changes the page size and returns to the first page.
    pub fn set_page_size(&mut self, page_size: usize) {
        self.page_size = page_size.max(1);
        self.reset();
    }
}
