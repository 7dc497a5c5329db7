//! Shared page/limit contract for post and comment listings.
//!
//! # Invariants
//! - `page` and `limit` are 1-based and never zero.
//! - `limit` never exceeds [`MAX_PAGE_LIMIT`].
//! - `skip = (page - 1) * limit`, computed without overflow.

use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Limit used by callers that do not pass one.
pub const DEFAULT_PAGE_LIMIT: u32 = 10;
/// Largest accepted page size.
pub const MAX_PAGE_LIMIT: u32 = 100;

/// Rejected page/limit input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageError {
    ZeroPage,
    ZeroLimit,
    LimitTooLarge { limit: u32, max: u32 },
}

impl Display for PageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ZeroPage => write!(f, "page must be at least 1"),
            Self::ZeroLimit => write!(f, "limit must be at least 1"),
            Self::LimitTooLarge { limit, max } => {
                write!(f, "limit {limit} exceeds maximum {max}")
            }
        }
    }
}

impl Error for PageError {}

/// Validated 1-based page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
    limit: u32,
}

impl PageRequest {
    pub fn new(page: u32, limit: u32) -> Result<Self, PageError> {
        if page == 0 {
            return Err(PageError::ZeroPage);
        }
        if limit == 0 {
            return Err(PageError::ZeroLimit);
        }
        if limit > MAX_PAGE_LIMIT {
            return Err(PageError::LimitTooLarge {
                limit,
                max: MAX_PAGE_LIMIT,
            });
        }
        Ok(Self { page, limit })
    }

    /// First page with the default limit.
    pub fn first() -> Self {
        Self {
            page: 1,
            limit: DEFAULT_PAGE_LIMIT,
        }
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    /// Rows to skip before this page starts.
    pub fn skip(&self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.limit)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::first()
    }
}

/// One page of results plus the unpaginated match count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page<T> {
    pub total: u64,
    pub page: u32,
    pub limit: u32,
    pub items: Vec<T>,
}

impl<T> Page<T> {
    pub fn new(request: PageRequest, total: u64, items: Vec<T>) -> Self {
        Self {
            total,
            page: request.page,
            limit: request.limit,
            items,
        }
    }

    /// Transforms the items while keeping paging metadata.
    pub fn map_items<U>(self, f: impl FnOnce(Vec<T>) -> Vec<U>) -> Page<U> {
        Page {
            total: self.total,
            page: self.page,
            limit: self.limit,
            items: f(self.items),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{PageError, PageRequest, MAX_PAGE_LIMIT};

    #[test]
    fn skip_is_zero_based_offset() {
        assert_eq!(PageRequest::new(1, 10).unwrap().skip(), 0);
        assert_eq!(PageRequest::new(3, 10).unwrap().skip(), 20);
    }

    #[test]
    fn skip_does_not_overflow_u32() {
        let request = PageRequest::new(u32::MAX, MAX_PAGE_LIMIT).unwrap();
        assert_eq!(
            request.skip(),
            u64::from(u32::MAX - 1) * u64::from(MAX_PAGE_LIMIT)
        );
    }

    #[test]
    fn rejects_zero_and_oversized_values() {
        assert_eq!(PageRequest::new(0, 10), Err(PageError::ZeroPage));
        assert_eq!(PageRequest::new(1, 0), Err(PageError::ZeroLimit));
        assert!(matches!(
            PageRequest::new(1, MAX_PAGE_LIMIT + 1),
            Err(PageError::LimitTooLarge { .. })
        ));
    }
}
