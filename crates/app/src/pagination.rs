//! Offset-based pagination.

/// A one-based page request with a per-page limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u64,
    pub limit: u64,
}

impl PageRequest {
    pub const DEFAULT_LIMIT: u64 = 10;

    /// Builds a request from raw query values. Absent or zero values fall
    /// back to page 1 and the default limit, matching lenient query parsing
    /// at the HTTP boundary.
    #[must_use]
    pub fn from_query(page: Option<u64>, limit: Option<u64>) -> Self {
        Self {
            page: match page {
                Some(page) if page >= 1 => page,
                _ => 1,
            },
            limit: match limit {
                Some(limit) if limit >= 1 => limit,
                _ => Self::DEFAULT_LIMIT,
            },
        }
    }

    /// Number of rows to skip for this page.
    #[must_use]
    pub fn offset(&self) -> u64 {
        self.page.saturating_sub(1).saturating_mul(self.limit)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::from_query(None, None)
    }
}

/// One page of results together with navigation flags.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: u64,
    pub has_prev: bool,
    pub has_next: bool,
    pub prev_page: Option<u64>,
    pub next_page: Option<u64>,
}

impl<T> Page<T> {
    /// Assembles a page from the fetched items, the request that produced
    /// them, and the total number of matching rows.
    #[must_use]
    pub fn new(items: Vec<T>, request: PageRequest, total: u64) -> Self {
        let total_pages = total.div_ceil(request.limit.max(1)).max(1);

        let page = request.page;
        let has_prev = page > 1;
        let has_next = page < total_pages;

        Self {
            items,
            page,
            has_prev,
            has_next,
            prev_page: has_prev.then(|| page - 1),
            next_page: has_next.then(|| page + 1),
        }
    }

    /// Maps the items of the page, keeping the navigation flags.
    #[must_use]
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            page: self.page,
            has_prev: self.has_prev,
            has_next: self.has_next,
            prev_page: self.prev_page,
            next_page: self.next_page,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_query_defaults_when_absent() {
        let request = PageRequest::from_query(None, None);

        assert_eq!(request.page, 1);
        assert_eq!(request.limit, PageRequest::DEFAULT_LIMIT);
    }

    #[test]
    fn from_query_defaults_when_zero() {
        let request = PageRequest::from_query(Some(0), Some(0));

        assert_eq!(request.page, 1);
        assert_eq!(request.limit, PageRequest::DEFAULT_LIMIT);
    }

    #[test]
    fn offset_skips_previous_pages() {
        let request = PageRequest::from_query(Some(3), Some(25));

        assert_eq!(request.offset(), 50);
    }

    #[test]
    fn middle_page_has_both_neighbours() {
        let page = Page::new(vec!["b"], PageRequest::from_query(Some(2), Some(1)), 3);

        assert_eq!(page.page, 2);
        assert!(page.has_prev, "page 2 of 3 has a previous page");
        assert!(page.has_next, "page 2 of 3 has a next page");
        assert_eq!(page.prev_page, Some(1));
        assert_eq!(page.next_page, Some(3));
    }

    #[test]
    fn first_page_has_no_prev() {
        let page = Page::new(vec![1, 2], PageRequest::default(), 2);

        assert!(!page.has_prev, "first page has no previous page");
        assert!(!page.has_next, "two items fit on one page of ten");
        assert_eq!(page.prev_page, None);
        assert_eq!(page.next_page, None);
    }

    #[test]
    fn last_page_has_no_next() {
        let page = Page::new(vec![3], PageRequest::from_query(Some(2), Some(2)), 3);

        assert!(page.has_prev, "last page has a previous page");
        assert!(!page.has_next, "last page has no next page");
    }

    #[test]
    fn empty_listing_is_a_single_page() {
        let page = Page::<u32>::new(vec![], PageRequest::default(), 0);

        assert_eq!(page.page, 1);
        assert!(!page.has_prev, "empty listing has no previous page");
        assert!(!page.has_next, "empty listing has no next page");
    }

    #[test]
    fn page_past_the_end_keeps_prev_only() {
        let page = Page::<u32>::new(vec![], PageRequest::from_query(Some(9), Some(2)), 3);

        assert!(page.has_prev, "pages before the overrun exist");
        assert!(!page.has_next, "nothing follows a page past the end");
    }

    #[test]
    fn map_preserves_navigation() {
        let page = Page::new(vec![1, 2], PageRequest::from_query(Some(2), Some(2)), 6).map(|n| n * 10);

        assert_eq!(page.items, vec![10, 20]);
        assert_eq!(page.page, 2);
        assert_eq!(page.prev_page, Some(1));
        assert_eq!(page.next_page, Some(3));
    }
}
