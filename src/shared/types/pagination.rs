/// One page of a query result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginatedResult<T> {
    /// Number of rows matching the filter, ignoring paging
    pub total: u64,
    pub rows: Vec<T>,
    pub limit: u64,
    pub offset: u64,
}

impl<T> PaginatedResult<T> {
    pub fn new(rows: Vec<T>, total: u64, limit: u64, offset: u64) -> Self {
        Self {
            total,
            rows,
            limit,
            offset,
        }
    }

    /// Whether rows remain past this page.
    pub fn has_more(&self) -> bool {
        self.offset + (self.rows.len() as u64) < self.total
    }
}
