//! HTTP client utilities and catalog API access for TurboCommerce.
//!
//! Provides a builder-style `FetchClient` over `reqwest` and the
//! [`CatalogApi`] seam the discovery subsystem consumes:
//!
//! ```rust,ignore
//! use turbo_data::{CatalogApi, FetchClient, HttpCatalog, ProductQuery};
//!
//! let client = FetchClient::new().with_base_url("https://shop.example.com/api");
//! let catalog = HttpCatalog::new(client);
//!
//! let page = catalog.products(&ProductQuery::search("iphone", 10)).await?;
//! println!("{} matches", page.total());
//! ```

mod catalog;
mod error;
mod request;
mod response;

pub use catalog::{CatalogApi, HttpCatalog, PriceRangeQuery, ProductQuery};
pub use error::FetchError;
pub use request::RequestBuilder;
pub use response::Response;

use std::collections::HashMap;
use std::time::Duration;

/// HTTP client for making outbound requests.
///
/// Cheap to clone; the underlying connection pool is shared.
#[derive(Debug, Clone)]
pub struct FetchClient {
    http: reqwest::Client,
    base_url: Option<String>,
    default_headers: HashMap<String, String>,
    timeout: Option<Duration>,
}

impl Default for FetchClient {
    fn default() -> Self {
        Self::new()
    }
}

impl FetchClient {
    /// Create a new HTTP client.
    pub fn new() -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: None,
            default_headers: HashMap::new(),
            timeout: None,
        }
    }

    /// Create a client with a base URL that will be prepended to all requests.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Add a default header that will be included in all requests.
    pub fn with_default_header(
        mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.default_headers.insert(key.into(), value.into());
        self
    }

    /// Apply a total timeout to every request.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Create a GET request. Relative URLs are joined onto the base URL.
    pub fn get(&self, url: impl Into<String>) -> ClientRequestBuilder {
        let url = url.into();
        let full_url = match &self.base_url {
            Some(base) => {
                if url.starts_with("http://") || url.starts_with("https://") {
                    url
                } else {
                    format!("{}{}", base.trim_end_matches('/'), url)
                }
            }
            None => url,
        };

        let mut builder = RequestBuilder::new(full_url);
        for (key, value) in &self.default_headers {
            builder = builder.header(key.clone(), value.clone());
        }

        ClientRequestBuilder {
            http: self.http.clone(),
            builder,
            timeout: self.timeout,
        }
    }
}

/// A request builder bound to a client.
pub struct ClientRequestBuilder {
    http: reqwest::Client,
    builder: RequestBuilder,
    timeout: Option<Duration>,
}

impl ClientRequestBuilder {
    /// Append several query parameters in order.
    pub fn queries<K, V>(mut self, params: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        for (key, value) in params {
            self.builder = self.builder.query(key, value);
        }
        self
    }

    /// Set the Accept header.
    pub fn accept(mut self, content_type: impl Into<String>) -> Self {
        self.builder = self.builder.accept(content_type);
        self
    }

    /// The URL this request will hit.
    pub fn url(&self) -> String {
        self.builder.full_url()
    }

    /// Send the request and return the response.
    pub async fn send(self) -> Result<Response, FetchError> {
        let url = self.builder.full_url();
        tracing::debug!(%url, "sending request");

        let mut request = self.http.get(&url);
        for (key, value) in &self.builder.headers {
            request = request.header(key.as_str(), value.as_str());
        }
        if let Some(timeout) = self.timeout {
            request = request.timeout(timeout);
        }

        let response = request.send().await?;
        let status = response.status().as_u16();
        let body = response.bytes().await?.to_vec();

        Ok(Response::new(status, body))
    }
}

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{
        CatalogApi, FetchClient, FetchError, HttpCatalog, PriceRangeQuery, ProductQuery,
        Response,
    };
}
