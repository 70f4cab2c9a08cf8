//! Tunables for facets, the price slider, and predictive search.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Discovery configuration. Every field has a default, so an empty
/// `[discovery]` table is valid.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DiscoveryConfig {
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub facets: FacetConfig,
    #[serde(default)]
    pub slider: SliderConfig,
}

/// Predictive search settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Quiet period after the last keystroke before a request fires.
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
    /// Trimmed queries shorter than this clear the dropdown.
    #[serde(default = "default_min_query_len")]
    pub min_query_len: usize,
    /// `limit` sent with each predictive request.
    #[serde(default = "default_request_limit")]
    pub request_limit: u32,
    #[serde(default = "default_max_suggestions")]
    pub max_suggestions: usize,
    #[serde(default = "default_max_products")]
    pub max_products: usize,
}

fn default_debounce_ms() -> u64 {
    400
}

fn default_min_query_len() -> usize {
    2
}

fn default_request_limit() -> u32 {
    10
}

fn default_max_suggestions() -> usize {
    8
}

fn default_max_products() -> usize {
    6
}

impl SearchConfig {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
            min_query_len: default_min_query_len(),
            request_limit: default_request_limit(),
            max_suggestions: default_max_suggestions(),
            max_products: default_max_products(),
        }
    }
}

/// Facet extraction settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FacetConfig {
    /// Spec names matching these terms (case-insensitive substring) are
    /// listed first, in this order.
    #[serde(default = "default_spec_priority")]
    pub spec_priority: Vec<String>,
    /// Upper bound used when the corpus has no positive price.
    #[serde(default = "default_fallback_price_ceiling")]
    pub fallback_price_ceiling: f64,
    /// Width added above `min` when every product costs the same.
    #[serde(default = "default_degenerate_spread")]
    pub degenerate_spread: f64,
    /// Maximum products fetched per category/search scope.
    #[serde(default = "default_corpus_limit")]
    pub corpus_limit: u32,
}

fn default_spec_priority() -> Vec<String> {
    [
        "RAM",
        "Storage",
        "Battery Life",
        "Front Camera",
        "Rear Camera",
        "Screen Size",
        "Processor",
        "Dimensions",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn default_fallback_price_ceiling() -> f64 {
    100_000.0
}

fn default_degenerate_spread() -> f64 {
    100.0
}

fn default_corpus_limit() -> u32 {
    1000
}

impl Default for FacetConfig {
    fn default() -> Self {
        Self {
            spec_priority: default_spec_priority(),
            fallback_price_ceiling: default_fallback_price_ceiling(),
            degenerate_spread: default_degenerate_spread(),
            corpus_limit: default_corpus_limit(),
        }
    }
}

/// Price slider settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SliderConfig {
    /// Minimum distance kept between the two handles while dragging.
    #[serde(default = "default_min_gap")]
    pub min_gap: i64,
}

fn default_min_gap() -> i64 {
    1
}

impl Default for SliderConfig {
    fn default() -> Self {
        Self {
            min_gap: default_min_gap(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = DiscoveryConfig::default();
        assert_eq!(config.search.debounce(), Duration::from_millis(400));
        assert_eq!(config.search.min_query_len, 2);
        assert_eq!(config.search.max_suggestions, 8);
        assert_eq!(config.search.max_products, 6);
        assert_eq!(config.facets.spec_priority[0], "RAM");
        assert_eq!(config.slider.min_gap, 1);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config: DiscoveryConfig =
            serde_json::from_str(r#"{ "search": { "debounce_ms": 250 } }"#).unwrap();
        assert_eq!(config.search.debounce_ms, 250);
        assert_eq!(config.search.request_limit, 10);
        assert_eq!(config.facets.corpus_limit, 1000);
    }
}
