//! Pagination block returned with product pages.

use serde::{Deserialize, Serialize};

/// Pagination info as reported by the products endpoint.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Pagination {
    /// Total number of matching items.
    #[serde(default)]
    pub total: u64,
    /// Current page (1-indexed).
    #[serde(default = "default_page")]
    pub page: u32,
    /// Items per page.
    #[serde(default = "default_limit")]
    pub limit: u32,
    /// Total number of pages.
    #[serde(default)]
    pub pages: u32,
}

fn default_page() -> u32 {
    1
}

fn default_limit() -> u32 {
    24
}

impl Pagination {
    /// Create pagination info, deriving the page count.
    pub fn new(page: u32, limit: u32, total: u64) -> Self {
        let limit = limit.max(1);
        let pages = if total == 0 {
            1
        } else {
            total.div_ceil(u64::from(limit)) as u32
        };

        Self {
            total,
            page: page.max(1),
            limit,
            pages,
        }
    }

    /// Whether there's a next page.
    pub fn has_next(&self) -> bool {
        self.page < self.pages
    }

    /// Whether there's a previous page.
    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    /// Get page numbers for display (e.g., [3, 4, 5, 6, 7]).
    pub fn page_numbers(&self, max_visible: u32) -> Vec<u32> {
        if self.pages <= max_visible {
            return (1..=self.pages).collect();
        }

        let half = max_visible / 2;
        let start = self.page.saturating_sub(half).max(1);
        let end = (start + max_visible - 1).min(self.pages);
        let start = (end + 1).saturating_sub(max_visible).max(1);

        (start..=end).collect()
    }

    /// Get start item number (1-indexed).
    pub fn start_item(&self) -> u64 {
        if self.total == 0 {
            0
        } else {
            u64::from(self.page - 1) * u64::from(self.limit) + 1
        }
    }

    /// Get end item number.
    pub fn end_item(&self) -> u64 {
        (u64::from(self.page) * u64::from(self.limit)).min(self.total)
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(1, default_limit(), 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pagination_basics() {
        let p = Pagination::new(2, 10, 45);
        assert_eq!(p.pages, 5);
        assert!(p.has_next());
        assert!(p.has_prev());
    }

    #[test]
    fn test_pagination_empty() {
        let p = Pagination::new(1, 10, 0);
        assert_eq!(p.pages, 1);
        assert!(!p.has_next());
        assert_eq!(p.start_item(), 0);
        assert_eq!(p.end_item(), 0);
    }

    #[test]
    fn test_pagination_page_numbers() {
        let p = Pagination::new(5, 10, 100);
        assert_eq!(p.page_numbers(5), vec![3, 4, 5, 6, 7]);

        let last = Pagination::new(10, 10, 100);
        assert_eq!(last.page_numbers(5), vec![6, 7, 8, 9, 10]);
    }

    #[test]
    fn test_pagination_item_range() {
        let p = Pagination::new(2, 10, 45);
        assert_eq!(p.start_item(), 11);
        assert_eq!(p.end_item(), 20);
    }

    #[test]
    fn test_pagination_deserialize_partial() {
        let p: Pagination = serde_json::from_str(r#"{"total": 3}"#).unwrap();
        assert_eq!(p.total, 3);
        assert_eq!(p.page, 1);
    }
}
