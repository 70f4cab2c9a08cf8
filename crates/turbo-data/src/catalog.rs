//! Catalog endpoints consumed by product discovery.

use async_trait::async_trait;
use turbo_catalog::{ApiResponse, PriceRange, ProductPage};

use crate::{FetchClient, FetchError};

/// Parameters for `GET /products`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductQuery {
    pub search: Option<String>,
    pub category: Option<String>,
    pub limit: u32,
    pub page: u32,
    /// Sends `status=active`.
    pub active_only: bool,
}

impl ProductQuery {
    /// A first-page, active-only text query.
    pub fn search(query: impl Into<String>, limit: u32) -> Self {
        Self {
            search: Some(query.into()),
            category: None,
            limit,
            page: 1,
            active_only: true,
        }
    }

    /// A first-page, active-only listing of one category/search scope.
    pub fn scope(category: Option<String>, search: Option<String>, limit: u32) -> Self {
        Self {
            search,
            category,
            limit,
            page: 1,
            active_only: true,
        }
    }

    /// Query parameters in wire order.
    pub fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(search) = &self.search {
            params.push(("search", search.clone()));
        }
        if let Some(category) = &self.category {
            params.push(("category", category.clone()));
        }
        params.push(("limit", self.limit.to_string()));
        params.push(("page", self.page.to_string()));
        if self.active_only {
            params.push(("status", "active".to_string()));
        }
        params
    }
}

/// Parameters for `GET /products/price-range`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PriceRangeQuery {
    pub category: Option<String>,
    pub brands: Vec<String>,
    pub active_only: bool,
}

impl PriceRangeQuery {
    pub fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(category) = &self.category {
            params.push(("category", category.clone()));
        }
        if !self.brands.is_empty() {
            params.push(("brand", self.brands.join(",")));
        }
        params.push(("activeOnly", self.active_only.to_string()));
        params
    }
}

/// Backend operations the discovery subsystem depends on.
#[async_trait]
pub trait CatalogApi: Send + Sync {
    /// `GET /products`.
    async fn products(&self, query: &ProductQuery) -> Result<ProductPage, FetchError>;

    /// `GET /products/price-range`.
    async fn price_range(&self, query: &PriceRangeQuery) -> Result<PriceRange, FetchError>;
}

/// [`CatalogApi`] over HTTP.
#[derive(Debug, Clone)]
pub struct HttpCatalog {
    client: FetchClient,
}

impl HttpCatalog {
    pub fn new(client: FetchClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl CatalogApi for HttpCatalog {
    async fn products(&self, query: &ProductQuery) -> Result<ProductPage, FetchError> {
        let response = self
            .client
            .get("/products")
            .queries(query.params())
            .accept("application/json")
            .send()
            .await?
            .error_for_status()?;

        response
            .json::<ApiResponse<ProductPage>>()?
            .into_data()
            .map_err(FetchError::ApiError)
    }

    async fn price_range(&self, query: &PriceRangeQuery) -> Result<PriceRange, FetchError> {
        let response = self
            .client
            .get("/products/price-range")
            .queries(query.params())
            .accept("application/json")
            .send()
            .await?
            .error_for_status()?;

        response
            .json::<ApiResponse<PriceRange>>()?
            .into_data()
            .map_err(FetchError::ApiError)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_query_params() {
        let query = ProductQuery::search("ipho", 10);
        assert_eq!(
            query.params(),
            vec![
                ("search", "ipho".to_string()),
                ("limit", "10".to_string()),
                ("page", "1".to_string()),
                ("status", "active".to_string()),
            ]
        );
    }

    #[test]
    fn test_scope_query_params() {
        let query = ProductQuery::scope(Some("phones".to_string()), None, 1000);
        let params = query.params();
        assert_eq!(params[0], ("category", "phones".to_string()));
        assert!(params.iter().all(|(k, _)| *k != "search"));
    }

    #[test]
    fn test_price_range_params() {
        let query = PriceRangeQuery {
            category: Some("phones".to_string()),
            brands: vec!["acme".to_string(), "zeta".to_string()],
            active_only: true,
        };
        assert_eq!(
            query.params(),
            vec![
                ("category", "phones".to_string()),
                ("brand", "acme,zeta".to_string()),
                ("activeOnly", "true".to_string()),
            ]
        );
    }

    #[test]
    fn test_http_catalog_builds_products_url() {
        let client = FetchClient::new().with_base_url("https://shop.example.com/api");
        let url = client
            .get("/products")
            .queries(ProductQuery::search("galaxy", 5).params())
            .url();
        assert_eq!(
            url,
            "https://shop.example.com/api/products?search=galaxy&limit=5&page=1&status=active"
        );
    }
}
