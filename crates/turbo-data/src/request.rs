//! GET request builder.

use std::collections::HashMap;

/// A builder for catalog GET requests.
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    pub(crate) url: String,
    pub(crate) headers: HashMap<String, String>,
    pub(crate) query: Vec<(String, String)>,
}

impl RequestBuilder {
    /// Create a new request builder.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            headers: HashMap::new(),
            query: Vec::new(),
        }
    }

    /// Add a header to the request.
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Append a query parameter. Keys and values are percent-encoded on send.
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Set the Accept header.
    pub fn accept(self, content_type: impl Into<String>) -> Self {
        self.header("Accept", content_type)
    }

    /// The final URL with the encoded query string appended.
    pub fn full_url(&self) -> String {
        if self.query.is_empty() {
            return self.url.clone();
        }

        let query = self
            .query
            .iter()
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&");
        let separator = if self.url.contains('?') { '&' } else { '?' };
        format!("{}{}{}", self.url, separator, query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_url_without_query() {
        let builder = RequestBuilder::new("https://api.example.com/products");
        assert_eq!(builder.full_url(), "https://api.example.com/products");
    }

    #[test]
    fn test_full_url_encodes_query() {
        let builder = RequestBuilder::new("/products")
            .query("search", "galaxy s24")
            .query("limit", "10");
        assert_eq!(builder.full_url(), "/products?search=galaxy%20s24&limit=10");
    }

    #[test]
    fn test_full_url_keeps_existing_query() {
        let builder = RequestBuilder::new("/products?x=1").query("page", "2");
        assert_eq!(builder.full_url(), "/products?x=1&page=2");
    }

    #[test]
    fn test_accept_header() {
        let builder = RequestBuilder::new("/").accept("application/json");
        assert_eq!(builder.headers.get("Accept").map(String::as_str), Some("application/json"));
    }
}
