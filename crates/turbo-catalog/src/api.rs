//! Response envelopes for the catalog endpoints.
//!
//! `GET /products` answers `{ success, data: { products, pagination } }` and
//! `GET /products/price-range` answers `{ success, data: { minPrice, maxPrice } }`.

use crate::pagination::Pagination;
use crate::product::Product;
use serde::{Deserialize, Serialize};

/// The `{ success, data, message }` wrapper every endpoint uses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    #[serde(default)]
    pub success: bool,
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
        }
    }

    /// The payload when the backend reported success.
    pub fn into_data(self) -> Result<T, String> {
        match (self.success, self.data) {
            (true, Some(data)) => Ok(data),
            (_, _) => Err(self
                .message
                .unwrap_or_else(|| "request was not successful".to_string())),
        }
    }
}

/// One page of products.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct ProductPage {
    #[serde(default)]
    pub products: Vec<Product>,
    #[serde(default)]
    pub pagination: Pagination,
}

impl ProductPage {
    pub fn new(products: Vec<Product>, pagination: Pagination) -> Self {
        Self {
            products,
            pagination,
        }
    }

    /// A single page holding every product given.
    pub fn from_products(products: Vec<Product>) -> Self {
        let total = products.len() as u64;
        let limit = u32::try_from(products.len()).unwrap_or(u32::MAX).max(1);
        Self {
            products,
            pagination: Pagination::new(1, limit, total),
        }
    }

    pub fn total(&self) -> u64 {
        self.pagination.total
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

/// Price window reported by the price-range endpoint.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PriceRange {
    #[serde(default)]
    pub min_price: f64,
    #[serde(default)]
    pub max_price: f64,
}
