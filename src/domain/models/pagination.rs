//! 목록 페이지네이션
//!
//! 목록은 조회 후 메모리에서 필터링되므로 페이지도 메모리에서 자릅니다.

use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE_SIZE: u64 = 20;
pub const MAX_PAGE_SIZE: u64 = 100;

/// 페이지 응답
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u64,
    pub limit: u64,
    pub total_pages: u64,
}

impl<T> Page<T> {
    /// `page`는 1부터 시작. 0이나 None은 1페이지, `limit`은 1..=100으로 제한.
    pub fn paginate(items: Vec<T>, page: Option<u64>, limit: Option<u64>) -> Self {
        let page = page.unwrap_or(1).max(1);
        let limit = limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE);
        let total = items.len() as u64;
        let total_pages = total.div_ceil(limit);
        let skip = usize::try_from((page - 1).saturating_mul(limit)).unwrap_or(usize::MAX);

        let items = items.into_iter().skip(skip).take(limit as usize).collect();

        Self { items, total, page, limit, total_pages }
    }

    pub fn map<U, F: FnMut(T) -> U>(self, f: F) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            page: self.page,
            limit: self.limit,
            total_pages: self.total_pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paginate_middle_page() {
        let page = Page::paginate((1..=45).collect::<Vec<_>>(), Some(2), Some(20));

        assert_eq!(page.items.first(), Some(&21));
        assert_eq!(page.items.len(), 20);
        assert_eq!(page.total, 45);
        assert_eq!(page.total_pages, 3);
    }

    #[test]
    fn test_paginate_defaults_and_bounds() {
        let page = Page::paginate((1..=5).collect::<Vec<_>>(), Some(0), Some(0));
        assert_eq!(page.page, 1);
        assert_eq!(page.limit, 1);
        assert_eq!(page.items, vec![1]);

        let beyond = Page::paginate((1..=5).collect::<Vec<_>>(), Some(9), None);
        assert!(beyond.items.is_empty());
        assert_eq!(beyond.limit, DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn test_paginate_huge_page_number_is_empty() {
        let page = Page::paginate((1..=5).collect::<Vec<_>>(), Some(u64::MAX), Some(100));

        assert!(page.items.is_empty());
        assert_eq!(page.page, u64::MAX);
        assert_eq!(page.total, 5);
        assert_eq!(page.total_pages, 1);
    }
}
