//! Page-based pagination helpers.

use serde::{Deserialize, Serialize};

/// A 1-based page request.
///
/// Both `page` and `limit` are expected to be at least 1; the HTTP boundary
/// rejects anything else before a request reaches the core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    /// Page number, starting at 1.
    pub page: u32,
    /// Number of items per page.
    pub limit: u32,
}

impl PageRequest {
    pub const fn new(page: u32, limit: u32) -> Self {
        Self { page, limit }
    }

    /// Zero-based row offset of the first item on this page.
    ///
    /// `(page - 1) * limit`, saturating so that a page of 0 behaves like
    /// page 1 and huge values do not overflow.
    pub const fn offset(&self) -> u32 {
        self.page.saturating_sub(1).saturating_mul(self.limit)
    }
}
