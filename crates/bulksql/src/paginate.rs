//! Page-number pagination and the paged result envelope.

use serde::Serialize;

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_LIMIT: i64 = 10;

/// A pagination request. Pages start at 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paginate {
    pub page: i64,
    pub limit: i64,
}

impl Default for Paginate {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl Paginate {
    pub fn new(page: i64, limit: i64) -> Self {
        Self { page, limit }
    }

    /// Rows to skip. Pages below 1 start at the first row.
    pub fn offset(&self) -> i64 {
        if self.page < 1 {
            return 0;
        }
        (self.page - 1).saturating_mul(self.limit).max(0)
    }
}

/// One page of results plus the total row count matching the filter.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub data: Vec<T>,
    pub page: i64,
    pub limit: i64,
    pub total: i64,
}

impl<T> Page<T> {
    /// Assemble the envelope. Without pagination, everything is one page of
    /// `total` rows.
    pub fn new(data: Vec<T>, total: i64, paginate: Option<&Paginate>) -> Self {
        match paginate {
            Some(p) => Self {
                data,
                page: p.page,
                limit: p.limit,
                total,
            },
            None => Self {
                data,
                page: DEFAULT_PAGE,
                limit: total,
                total,
            },
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            data: self.data.into_iter().map(f).collect(),
            page: self.page,
            limit: self.limit,
            total: self.total,
        }
    }
}
