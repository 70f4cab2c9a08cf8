//! Catalog domain types for TurboCommerce product discovery.
//!
//! This crate provides the shapes the storefront receives from the catalog
//! backend:
//!
//! - **Products**: brand, category, ordered specifications, effective price
//! - **Envelopes**: `{ success, data }` wrappers, product pages, price ranges
//! - **Ids**: newtype identifiers that keep product/brand/category ids apart
//!
//! # Example
//!
//! ```rust
//! use turbo_catalog::prelude::*;
//!
//! let product = Product::new("p1", "Phone X", 199.0)
//!     .with_brand(Brand::new("b1", "Acme", "acme"))
//!     .with_spec("RAM", "8GB");
//!
//! assert_eq!(product.effective_price(), 199.0);
//! assert_eq!(product.spec("RAM"), Some("8GB"));
//! ```

pub mod api;
pub mod ids;
pub mod pagination;
pub mod product;

pub use api::{ApiResponse, PriceRange, ProductPage};
pub use ids::*;
pub use pagination::Pagination;
pub use product::{Brand, BrandRef, CategoryRef, Product, ProductStatus, Specification};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::api::{ApiResponse, PriceRange, ProductPage};
    pub use crate::ids::*;
    pub use crate::pagination::Pagination;
    pub use crate::product::{
        Brand, BrandRef, CategoryRef, Product, ProductStatus, Specification,
    };
}
