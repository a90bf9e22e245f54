//! Page arithmetic for the post listing.

/// A 1-based page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: u64,
    pub limit: u64,
}

impl Pagination {
    pub const DEFAULT_PAGE: u64 = 1;
    pub const DEFAULT_LIMIT: u64 = 10;
    /// Largest offset a SQL backend can bind as a signed 64-bit value.
    pub const MAX_OFFSET: u64 = i64::MAX as u64;

    /// Build from raw request values. Missing or non-positive values fall
    /// back to the defaults.
    pub fn from_request(page: Option<i64>, limit: Option<i64>) -> Self {
        let positive = |v: Option<i64>| v.filter(|v| *v > 0).map(|v| v as u64);

        Self {
            page: positive(page).unwrap_or(Self::DEFAULT_PAGE),
            limit: positive(limit).unwrap_or(Self::DEFAULT_LIMIT),
        }
    }

    /// Rows to skip, capped at [`Self::MAX_OFFSET`].
    pub fn offset(&self) -> u64 {
        (self.page - 1)
            .saturating_mul(self.limit)
            .min(Self::MAX_OFFSET)
    }

    pub fn total_pages(&self, total: u64) -> u64 {
        total.div_ceil(self.limit)
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: Self::DEFAULT_PAGE,
            limit: Self::DEFAULT_LIMIT,
        }
    }
}
