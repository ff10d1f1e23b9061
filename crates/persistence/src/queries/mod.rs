// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read-side operations.
//!
//! List queries are paginated and return the filtered total alongside the
//! page of items so the HTTP layer can report page counts.

pub mod applications;
pub mod audit;
pub mod deliveries;
pub mod donations;
pub mod operators;
pub mod payment_methods;
pub mod tickets;
pub mod volunteers;

/// The page size used when a request does not name one.
pub const DEFAULT_PAGE_LIMIT: i64 = 20;

/// The largest page size a request may ask for.
pub const MAX_PAGE_LIMIT: i64 = 100;

/// A validated pagination window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    page: i64,
    limit: i64,
}

impl Page {
    /// Builds a page, clamping out-of-range values rather than rejecting
    /// them: page numbers below 1 become 1, limits are clamped to
    /// `1..=MAX_PAGE_LIMIT`.
    #[must_use]
    pub const fn new(page: i64, limit: i64) -> Self {
        let page: i64 = if page < 1 { 1 } else { page };
        let limit: i64 = if limit < 1 {
            1
        } else if limit > MAX_PAGE_LIMIT {
            MAX_PAGE_LIMIT
        } else {
            limit
        };
        Self { page, limit }
    }

    /// The 1-based page number.
    #[must_use]
    pub const fn number(&self) -> i64 {
        self.page
    }

    /// The page size.
    #[must_use]
    pub const fn limit(&self) -> i64 {
        self.limit
    }

    /// The row offset of the first item on this page.
    #[must_use]
    pub const fn offset(&self) -> i64 {
        (self.page - 1) * self.limit
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::new(1, DEFAULT_PAGE_LIMIT)
    }
}

/// One page of results plus the filtered total.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paginated<T> {
    /// The items on this page.
    pub items: Vec<T>,
    /// The total number of items matching the filter, across all pages.
    pub total: i64,
    /// The page that was fetched.
    pub page: Page,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_clamps_out_of_range_values() {
        let page: Page = Page::new(0, 0);
        assert_eq!(page.number(), 1);
        assert_eq!(page.limit(), 1);

        let page: Page = Page::new(-3, 9999);
        assert_eq!(page.number(), 1);
        assert_eq!(page.limit(), MAX_PAGE_LIMIT);
    }

    #[test]
    fn test_page_offset() {
        assert_eq!(Page::new(1, 20).offset(), 0);
        assert_eq!(Page::new(3, 20).offset(), 40);
    }
}
