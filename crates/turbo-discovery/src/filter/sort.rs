//! Sort keys carried in the `sortBy` parameter.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use turbo_catalog::Product;

/// Sort options for product listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOption {
    /// Newest first.
    Newest,
    /// Price, low to high.
    PriceAsc,
    /// Price, high to low.
    PriceDesc,
    /// Name A-Z.
    NameAsc,
    /// Name Z-A.
    NameDesc,
    /// Best selling.
    Popular,
    /// Highest rated.
    Rating,
}

impl SortOption {
    pub const ALL: [SortOption; 7] = [
        SortOption::Newest,
        SortOption::PriceAsc,
        SortOption::PriceDesc,
        SortOption::NameAsc,
        SortOption::NameDesc,
        SortOption::Popular,
        SortOption::Rating,
    ];

    /// Value used in the URL.
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOption::Newest => "newest",
            SortOption::PriceAsc => "price_asc",
            SortOption::PriceDesc => "price_desc",
            SortOption::NameAsc => "name_asc",
            SortOption::NameDesc => "name_desc",
            SortOption::Popular => "popular",
            SortOption::Rating => "rating",
        }
    }

    /// Parse a URL value; unknown keys yield `None`.
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|option| option.as_str() == s)
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            SortOption::Newest => "Newest",
            SortOption::PriceAsc => "Price: Low to High",
            SortOption::PriceDesc => "Price: High to Low",
            SortOption::NameAsc => "Name: A-Z",
            SortOption::NameDesc => "Name: Z-A",
            SortOption::Popular => "Best Selling",
            SortOption::Rating => "Highest Rated",
        }
    }

    /// Ordering over locally held products.
    ///
    /// Keys the catalog payload does not carry (recency, sales, rating)
    /// compare equal so the backend's order is kept by a stable sort.
    pub fn compare(&self, a: &Product, b: &Product) -> Ordering {
        match self {
            SortOption::PriceAsc => a.effective_price().total_cmp(&b.effective_price()),
            SortOption::PriceDesc => b.effective_price().total_cmp(&a.effective_price()),
            SortOption::NameAsc => a.name.cmp(&b.name),
            SortOption::NameDesc => b.name.cmp(&a.name),
            SortOption::Newest | SortOption::Popular | SortOption::Rating => Ordering::Equal,
        }
    }
}
