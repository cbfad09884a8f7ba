//! Client-side page state and the request-sequence discard rule.
//!
//! A [`Pager`] tracks the page/size/filter a list view currently wants and
//! the totals the backend last reported. It also owns a monotonically
//! increasing request sequence: every dispatch takes a [`FetchTicket`], and
//! only the ticket of the most recent dispatch is accepted back. A late
//! response for parameters that have since changed is discarded instead of
//! overwriting newer state.

use loglens_core::{ClientError, ClientResult, PageResult, is_allowed_page_size};
use tracing::debug;

/// Default page size offered by the dashboard.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Number of page buttons shown at once.
const WINDOW: u32 = 5;

/// Proof of dispatch for one fetch, checked back in via [`Pager::accept`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket(u64);

/// Page/size/filter state for one list view.
#[derive(Debug, Clone)]
pub struct Pager {
    page: u32,
    size: u32,
    total_pages: u32,
    total_elements: u64,
    filter: Option<String>,
    seq: u64,
}

impl Default for Pager {
    fn default() -> Self {
        Self::new()
    }
}

impl Pager {
    /// A pager at page 0 with the default size and no filter.
    #[must_use]
    pub fn new() -> Self {
        Self {
            page: 0,
            size: DEFAULT_PAGE_SIZE,
            total_pages: 0,
            total_elements: 0,
            filter: None,
            seq: 0,
        }
    }

    /// Current page index (0-based).
    #[must_use]
    pub fn page(&self) -> u32 {
        self.page
    }

    /// Current page size.
    #[must_use]
    pub fn size(&self) -> u32 {
        self.size
    }

    /// Total pages last reported by the backend.
    #[must_use]
    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    /// Total elements last reported by the backend.
    #[must_use]
    pub fn total_elements(&self) -> u64 {
        self.total_elements
    }

    /// Current resource filter, if any.
    #[must_use]
    pub fn filter(&self) -> Option<&str> {
        self.filter.as_deref()
    }

    /// Change the page size and reset to page 0.
    ///
    /// # Errors
    ///
    /// Returns a validation error when `size` is not one of the allowed
    /// page sizes; the pager is left unchanged.
    pub fn set_size(&mut self, size: u32) -> ClientResult<()> {
        if !is_allowed_page_size(size) {
            return Err(ClientError::Validation {
                field: "size".to_string(),
                message: format!("{size} is not an allowed page size"),
            });
        }
        self.size = size;
        self.page = 0;
        self.bump();
        Ok(())
    }

    /// Change the resource filter and reset to page 0.
    pub fn set_filter(&mut self, filter: Option<String>) {
        self.filter = filter;
        self.page = 0;
        self.total_pages = 0;
        self.total_elements = 0;
        self.bump();
    }

    /// Move to `page`, rejecting out-of-bounds requests client-side.
    ///
    /// Returns `false` — and dispatches nothing — when the backend has
    /// reported totals and `page` is at or past `total_pages`.
    pub fn goto(&mut self, page: u32) -> bool {
        if self.total_pages > 0 && page >= self.total_pages {
            debug!(page, total_pages = self.total_pages, "page out of bounds");
            return false;
        }
        self.page = page;
        self.bump();
        true
    }

    /// Move to the next page, if one exists.
    pub fn next_page(&mut self) -> bool {
        self.goto(self.page.saturating_add(1))
    }

    /// Move to the previous page, if not already at the first.
    pub fn prev_page(&mut self) -> bool {
        if self.page == 0 {
            return false;
        }
        self.goto(self.page.saturating_sub(1))
    }

    /// Stamp a dispatch. The returned ticket is valid until the next
    /// dispatch or parameter change.
    pub fn begin(&mut self) -> FetchTicket {
        self.bump();
        FetchTicket(self.seq)
    }

    /// Returns `true` when `ticket` belongs to the most recent dispatch.
    ///
    /// A `false` result means the response is superseded and must be
    /// dropped by the caller.
    #[must_use]
    pub fn accept(&self, ticket: FetchTicket) -> bool {
        ticket.0 == self.seq
    }

    /// Record the totals of an accepted page result.
    pub fn record<T>(&mut self, result: &PageResult<T>) {
        self.total_pages = result.total_pages;
        self.total_elements = result.total_elements;
    }

    /// The page indices to offer as direct navigation targets: a window of
    /// up to five pages around the current one, clamped to the known total.
    #[must_use]
    pub fn window(&self) -> Vec<u32> {
        if self.total_pages == 0 {
            return Vec::new();
        }
        let last = self.total_pages.saturating_sub(1);
        let start = self.page.saturating_sub(WINDOW / 2);
        let end = start.saturating_add(WINDOW.saturating_sub(1)).min(last);
        // Widen back toward the front when the tail clamped the window.
        let start = end.saturating_sub(WINDOW.saturating_sub(1));
        (start..=end).collect()
    }

    /// The 1-based element range shown on the current page, or `None` when
    /// the list is empty.
    #[must_use]
    pub fn element_range(&self) -> Option<(u64, u64)> {
        if self.total_elements == 0 {
            return None;
        }
        let size = u64::from(self.size);
        let first = u64::from(self.page).saturating_mul(size).saturating_add(1);
        if first > self.total_elements {
            return None;
        }
        let last = first
            .saturating_add(size.saturating_sub(1))
            .min(self.total_elements);
        Some((first, last))
    }

    fn bump(&mut self) {
        self.seq = self.seq.saturating_add(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loaded_pager() -> Pager {
        let mut pager = Pager::new();
        pager.record(&PageResult::<u32> {
            items: vec![1; 10],
            total_pages: 5,
            total_elements: 47,
            notice: None,
        });
        pager
    }

    #[test]
    fn page_at_or_past_total_is_rejected() {
        let mut pager = loaded_pager();
        assert!(pager.goto(4));
        assert!(!pager.goto(5));
        assert!(!pager.goto(6));
        assert_eq!(pager.page(), 4);
    }

    #[test]
    fn unknown_totals_allow_any_page() {
        let mut pager = Pager::new();
        assert!(pager.goto(12));
    }

    #[test]
    fn size_change_resets_page_and_validates() {
        let mut pager = loaded_pager();
        pager.goto(3);
        pager.set_size(50).unwrap();
        assert_eq!(pager.page(), 0);
        assert_eq!(pager.size(), 50);

        assert!(pager.set_size(15).is_err());
        assert_eq!(pager.size(), 50);
    }

    #[test]
    fn filter_change_resets_page_and_totals() {
        let mut pager = loaded_pager();
        pager.goto(2);
        pager.set_filter(Some("orders".to_string()));
        assert_eq!(pager.page(), 0);
        assert_eq!(pager.total_pages(), 0);
        assert_eq!(pager.filter(), Some("orders"));
    }

    #[test]
    fn superseded_ticket_is_not_accepted() {
        let mut pager = loaded_pager();
        let stale = pager.begin();
        // Parameters change while the first request is in flight.
        pager.goto(2);
        let fresh = pager.begin();

        assert!(!pager.accept(stale));
        assert!(pager.accept(fresh));
    }

    #[test]
    fn redispatch_supersedes_previous_ticket() {
        let mut pager = loaded_pager();
        let first = pager.begin();
        let second = pager.begin();
        assert!(!pager.accept(first));
        assert!(pager.accept(second));
    }

    #[test]
    fn window_centers_on_current_page() {
        let mut pager = Pager::new();
        pager.record(&PageResult::<u32> {
            items: Vec::new(),
            total_pages: 10,
            total_elements: 100,
            notice: None,
        });

        assert_eq!(pager.window(), vec![0, 1, 2, 3, 4]);
        pager.goto(5);
        assert_eq!(pager.window(), vec![3, 4, 5, 6, 7]);
        pager.goto(9);
        assert_eq!(pager.window(), vec![5, 6, 7, 8, 9]);
    }

    #[test]
    fn window_is_clamped_to_few_pages() {
        let mut pager = Pager::new();
        pager.record(&PageResult::<u32> {
            items: Vec::new(),
            total_pages: 2,
            total_elements: 12,
            notice: None,
        });
        assert_eq!(pager.window(), vec![0, 1]);

        let empty = Pager::new();
        assert!(empty.window().is_empty());
    }

    #[test]
    fn element_range_is_one_based_and_clamped() {
        let mut pager = loaded_pager();
        assert_eq!(pager.element_range(), Some((1, 10)));
        pager.goto(4);
        assert_eq!(pager.element_range(), Some((41, 47)));
    }

    #[test]
    fn element_range_is_none_when_empty() {
        assert_eq!(Pager::new().element_range(), None);
    }
}
