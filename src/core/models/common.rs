#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    limit: i64,
    offset: Option<i64>,
}

impl Pagination {
    pub fn new(limit: i64, offset: Option<i64>) -> Self {
        Self { limit, offset }
    }

    pub fn limit(&self) -> i64 {
        self.limit
    }

    pub fn offset(&self) -> i64 {
        self.offset.unwrap_or(0)
    }

    /// Slices an already ordered in-memory list the same way `LIMIT`/`OFFSET` would.
    pub fn apply<T>(&self, items: Vec<T>) -> Vec<T> {
        items.into_iter().skip(self.offset().max(0) as usize).take(self.limit.max(0) as usize).collect()
    }
}
