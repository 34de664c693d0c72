const DEFAULT_PAGE_SIZE: u64 = 20;
const MAX_PAGE_SIZE: u64 = 100;
const MAX_SKIP: u64 = i64::MAX as u64;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pagination {
    ///
    /// indexing starts at 1
    ///
    pub page: u64,
    pub limit: u64,
}

impl Pagination {
    ///
    /// Creates pagination from optional query values.
    /// Missing or zero values fall back to defaults,
    /// limit is capped at [MAX_PAGE_SIZE].
    ///
    pub fn new(page: Option<u64>, limit: Option<u64>) -> Self {
        let page = page.filter(|page| *page > 0).unwrap_or(1);
        let limit = limit
            .filter(|limit| *limit > 0)
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .min(MAX_PAGE_SIZE);

        Self { page, limit }
    }

    ///
    /// Clamped to the largest skip the database accepts,
    /// pages far past the last one return no documents.
    ///
    pub fn skip(&self) -> u64 {
        (self.page - 1)
            .saturating_mul(self.limit)
            .min(MAX_SKIP)
    }

    pub fn total_pages(&self, total: u64) -> u64 {
        total.div_ceil(self.limit)
    }
}
