// Page/offset arithmetic for the user listing

use super::error::{DomainError, Result};

pub const DEFAULT_PAGE_SIZE: i64 = 10;
pub const MAX_PAGE_SIZE: i64 = 100;

/// Validated page request (1-based page)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: i64,
    pub limit: i64,
}

/// Page resolved against a total row count
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    /// 0 when there is nothing to show
    pub page: i64,
    pub pages: i64,
    pub offset: i64,
    pub limit: i64,
}

impl PageRequest {
    /// Missing values fall back to page 1 / [`DEFAULT_PAGE_SIZE`]; a page
    /// below 1 is treated as 1 and the limit is capped at [`MAX_PAGE_SIZE`].
    pub fn new(page: Option<i64>, limit: Option<i64>) -> Result<Self> {
        let limit = limit.unwrap_or(DEFAULT_PAGE_SIZE);
        if limit <= 0 {
            return Err(DomainError::InvalidPage(format!(
                "limit must be positive, got: {}",
                limit
            )));
        }

        Ok(Self {
            page: page.unwrap_or(1).max(1),
            limit: limit.min(MAX_PAGE_SIZE),
        })
    }

    pub fn window(&self, count: i64) -> PageWindow {
        let pages = if count <= 0 {
            0
        } else {
            (count + self.limit - 1) / self.limit
        };

        if pages == 0 {
            return PageWindow {
                page: 0,
                pages: 0,
                offset: 0,
                limit: self.limit,
            };
        }

        PageWindow {
            page: self.page,
            pages,
            offset: (self.page - 1).saturating_mul(self.limit),
            limit: self.limit,
        }
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            limit: DEFAULT_PAGE_SIZE,
        }
    }
}
