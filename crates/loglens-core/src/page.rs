//! Page request/result types.

use serde::{Deserialize, Serialize};

/// The enumerated set of page sizes the dashboard offers.
pub const PAGE_SIZES: [u32; 5] = [5, 10, 20, 50, 100];

/// Returns `true` if `size` is one of the allowed page sizes.
#[must_use]
pub fn is_allowed_page_size(size: u32) -> bool {
    PAGE_SIZES.contains(&size)
}

/// One page of list data.
///
/// `total_elements` is the authoritative count even when `items` is a
/// partial page; `items.len() <= size` always holds for paginated
/// responses. `notice` carries a user-facing informational message (for
/// example the empty-result note produced by a canonical 404), never an
/// error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageResult<T> {
    /// Rows of the current page, in backend order.
    pub items: Vec<T>,
    /// Total number of pages available.
    pub total_pages: u32,
    /// Total number of elements across all pages.
    pub total_elements: u64,
    /// Informational (non-error) message attached to the result.
    pub notice: Option<String>,
}

impl<T> PageResult<T> {
    /// An empty result with no notice.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            total_pages: 0,
            total_elements: 0,
            notice: None,
        }
    }

    /// Attach an informational notice.
    #[must_use]
    pub fn with_notice(mut self, notice: impl Into<String>) -> Self {
        self.notice = Some(notice.into());
        self
    }

    /// Returns `true` if the page carries no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<T> Default for PageResult<T> {
    fn default() -> Self {
        Self::empty()
    }
}
