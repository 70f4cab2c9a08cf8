//! Static facet metadata derived once per product corpus.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use serde::{Deserialize, Serialize};
use tracing::debug;
use turbo_catalog::Product;

use crate::config::FacetConfig;

/// A selectable brand with its count over the unfiltered corpus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrandFacet {
    /// Grouping key (brand id, else slug, else name).
    pub id: String,
    pub name: String,
    /// Value written to the `brand` URL parameter.
    pub slug: String,
    pub static_count: usize,
}

/// One value of a specification facet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpecValue {
    pub value: String,
    pub static_count: usize,
}

/// A specification name and its values, sorted lexically by exact string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecFacet {
    pub name: String,
    pub values: Vec<SpecValue>,
}

impl SpecFacet {
    pub fn value(&self, value: &str) -> Option<&SpecValue> {
        self.values.iter().find(|v| v.value == value)
    }
}

/// Effective-price window of a corpus. `min < max` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceBounds {
    pub min: f64,
    pub max: f64,
}

impl PriceBounds {
    /// Build bounds from observed extremes, synthesizing a window when the
    /// input is missing or degenerate.
    ///
    /// - no positive price: `0..fallback_price_ceiling`
    /// - `min == max`: `min..min + degenerate_spread`
    pub fn normalize(min: Option<f64>, max: Option<f64>, config: &FacetConfig) -> Self {
        let fallback = Self::fallback(config);
        let positive = |v: Option<f64>| v.filter(|p| p.is_finite() && *p > 0.0);

        match (positive(min), positive(max)) {
            (Some(a), Some(b)) if a != b => Self {
                min: a.min(b),
                max: a.max(b),
            },
            (Some(only), _) | (None, Some(only)) => Self {
                min: only,
                max: only + config.degenerate_spread.max(1.0),
            },
            (None, None) => fallback,
        }
    }

    /// Window used before any price information is known.
    pub fn fallback(config: &FacetConfig) -> Self {
        Self {
            min: 0.0,
            max: config.fallback_price_ceiling.max(1.0),
        }
    }

    pub fn contains(&self, price: f64) -> bool {
        price >= self.min && price <= self.max
    }

    pub fn clamp(&self, price: f64) -> f64 {
        price.clamp(self.min, self.max)
    }
}

/// Everything the facet panel needs for one corpus.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FacetSet {
    pub brands: Vec<BrandFacet>,
    pub specs: Vec<SpecFacet>,
    pub price_bounds: PriceBounds,
}

impl FacetSet {
    /// Facets for an empty corpus.
    pub fn empty(config: &FacetConfig) -> Self {
        Self {
            brands: Vec::new(),
            specs: Vec::new(),
            price_bounds: PriceBounds::fallback(config),
        }
    }

    pub fn brand(&self, slug: &str) -> Option<&BrandFacet> {
        self.brands.iter().find(|b| b.slug == slug)
    }

    pub fn spec(&self, name: &str) -> Option<&SpecFacet> {
        self.specs.iter().find(|s| s.name == name)
    }

    pub fn is_empty(&self) -> bool {
        self.brands.is_empty() && self.specs.is_empty()
    }
}

struct BrandAccumulator {
    name: String,
    slug: String,
    count: usize,
}

/// Derives brand, spec, and price facets from a product corpus.
#[derive(Debug, Clone)]
pub struct FacetExtractor {
    config: FacetConfig,
    priority: Vec<String>,
}

impl FacetExtractor {
    pub fn new(config: &FacetConfig) -> Self {
        Self {
            priority: config
                .spec_priority
                .iter()
                .map(|term| term.to_lowercase())
                .filter(|term| !term.is_empty())
                .collect(),
            config: config.clone(),
        }
    }

    /// Extract facets in a single pass over `products`.
    pub fn extract(&self, products: &[Product]) -> FacetSet {
        let mut brands: HashMap<String, BrandAccumulator> = HashMap::new();
        let mut specs: BTreeMap<String, BTreeMap<String, usize>> = BTreeMap::new();
        let mut min_price: Option<f64> = None;
        let mut max_price: Option<f64> = None;

        for product in products {
            if let Some(brand) = product.brand.as_ref().filter(|b| !b.is_blank()) {
                brands
                    .entry(brand.key().to_string())
                    .or_insert_with(|| BrandAccumulator {
                        name: brand.name().to_string(),
                        slug: brand.slug().to_string(),
                        count: 0,
                    })
                    .count += 1;
            }

            // A product counts once per (name, value) even if listed twice.
            let mut seen: BTreeSet<(&str, &str)> = BTreeSet::new();
            for spec in &product.specifications {
                if spec.name.trim().is_empty() || spec.value.trim().is_empty() {
                    continue;
                }
                if !seen.insert((spec.name.as_str(), spec.value.as_str())) {
                    continue;
                }
                *specs
                    .entry(spec.name.clone())
                    .or_default()
                    .entry(spec.value.clone())
                    .or_insert(0) += 1;
            }

            let price = product.effective_price();
            if price.is_finite() && price > 0.0 {
                min_price = Some(min_price.map_or(price, |m| m.min(price)));
                max_price = Some(max_price.map_or(price, |m| m.max(price)));
            }
        }

        let mut brand_facets: Vec<BrandFacet> = brands
            .into_iter()
            .map(|(id, acc)| BrandFacet {
                id,
                name: acc.name,
                slug: acc.slug,
                static_count: acc.count,
            })
            .collect();
        brand_facets.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));

        let mut spec_facets: Vec<SpecFacet> = specs
            .into_iter()
            .map(|(name, values)| SpecFacet {
                name,
                values: values
                    .into_iter()
                    .map(|(value, static_count)| SpecValue {
                        value,
                        static_count,
                    })
                    .collect(),
            })
            .collect();
        self.order_specs(&mut spec_facets);

        let price_bounds = PriceBounds::normalize(min_price, max_price, &self.config);

        debug!(
            products = products.len(),
            brands = brand_facets.len(),
            specs = spec_facets.len(),
            min = price_bounds.min,
            max = price_bounds.max,
            "extracted facets"
        );

        FacetSet {
            brands: brand_facets,
            specs: spec_facets,
            price_bounds,
        }
    }

    /// Index of the first priority term contained in `name`.
    pub fn priority_rank(&self, name: &str) -> Option<usize> {
        let lowered = name.to_lowercase();
        self.priority
            .iter()
            .position(|term| lowered.contains(term.as_str()))
    }

    fn order_specs(&self, specs: &mut [SpecFacet]) {
        specs.sort_by_cached_key(|spec| {
            let rank = self.priority_rank(&spec.name);
            (rank.is_none(), rank, spec.name.clone())
        });
    }
}

impl Default for FacetExtractor {
    fn default() -> Self {
        Self::new(&FacetConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use turbo_catalog::{Brand, BrandRef};

    fn acme() -> Brand {
        Brand::new("b1", "Acme", "acme")
    }

    fn zeta() -> Brand {
        Brand::new("b2", "Zeta", "zeta")
    }

    fn sample() -> Vec<Product> {
        vec![
            Product::new("p1", "P1", 100.0).with_brand(acme()).with_spec("RAM", "4GB"),
            Product::new("p2", "P2", 200.0).with_brand(acme()).with_spec("RAM", "8GB"),
            Product::new("p3", "P3", 150.0).with_brand(zeta()).with_spec("RAM", "4GB"),
        ]
    }

    #[test]
    fn test_extract_basic() {
        let facets = FacetExtractor::default().extract(&sample());

        let brands: Vec<(&str, usize)> = facets
            .brands
            .iter()
            .map(|b| (b.name.as_str(), b.static_count))
            .collect();
        assert_eq!(brands, vec![("Acme", 2), ("Zeta", 1)]);

        let ram = facets.spec("RAM").unwrap();
        let values: Vec<(&str, usize)> = ram
            .values
            .iter()
            .map(|v| (v.value.as_str(), v.static_count))
            .collect();
        assert_eq!(values, vec![("4GB", 2), ("8GB", 1)]);

        assert_eq!(facets.price_bounds, PriceBounds { min: 100.0, max: 200.0 });
    }

    #[test]
    fn test_spec_values_sort_lexically() {
        let products = vec![
            Product::new("a", "A", 1.0).with_spec("RAM", "8GB"),
            Product::new("b", "B", 2.0).with_spec("RAM", "16GB"),
            Product::new("c", "C", 3.0).with_spec("RAM", "4GB"),
        ];
        let facets = FacetExtractor::default().extract(&products);
        let values: Vec<&str> = facets.specs[0].values.iter().map(|v| v.value.as_str()).collect();
        assert_eq!(values, vec!["16GB", "4GB", "8GB"]);
    }

    #[test]
    fn test_blank_values_and_duplicates_skipped() {
        let products = vec![
            Product::new("a", "A", 1.0)
                .with_spec("Color", "  ")
                .with_spec("", "x")
                .with_spec("RAM", "4GB")
                .with_spec("RAM", "4GB"),
        ];
        let facets = FacetExtractor::default().extract(&products);
        assert_eq!(facets.specs.len(), 1);
        assert_eq!(facets.specs[0].values[0].static_count, 1);
    }

    #[test]
    fn test_spec_priority_order() {
        let products = vec![Product::new("a", "A", 1.0)
            .with_spec("Weight", "1kg")
            .with_spec("Color", "Red")
            .with_spec("Rear Camera", "48MP")
            .with_spec("Internal Storage", "128GB")
            .with_spec("RAM", "8GB")
            .with_spec("Battery Life", "20h")];
        let facets = FacetExtractor::default().extract(&products);
        let names: Vec<&str> = facets.specs.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["RAM", "Internal Storage", "Battery Life", "Rear Camera", "Color", "Weight"]
        );
    }

    #[test]
    fn test_priority_earliest_term_wins() {
        let extractor = FacetExtractor::default();
        // Matches both "RAM" and "Storage"; "RAM" comes first in the list.
        assert_eq!(extractor.priority_rank("storage (ram)"), Some(0));
        assert_eq!(extractor.priority_rank("Front Camera"), Some(3));
        assert_eq!(extractor.priority_rank("Weight"), None);
    }

    #[test]
    fn test_bare_string_brand_groups_by_name() {
        let products = vec![
            Product::new("a", "A", 1.0).with_brand(BrandRef::Name("Nova".to_string())),
            Product::new("b", "B", 2.0).with_brand(BrandRef::Name("Nova".to_string())),
            Product::new("c", "C", 3.0).with_brand(BrandRef::Name("  ".to_string())),
        ];
        let facets = FacetExtractor::default().extract(&products);
        assert_eq!(facets.brands.len(), 1);
        assert_eq!(facets.brands[0].id, "Nova");
        assert_eq!(facets.brands[0].slug, "Nova");
        assert_eq!(facets.brands[0].static_count, 2);
    }

    #[test]
    fn test_price_uses_effective_price() {
        let products = vec![
            Product::new("a", "A", 300.0).with_flash_price(80.0),
            Product::new("b", "B", 250.0).with_final_price(240.0),
        ];
        let facets = FacetExtractor::default().extract(&products);
        assert_eq!(facets.price_bounds, PriceBounds { min: 80.0, max: 240.0 });
    }

    #[test]
    fn test_degenerate_price_bounds() {
        let config = FacetConfig::default();

        let single = FacetExtractor::new(&config).extract(&[Product::new("a", "A", 50.0)]);
        assert_eq!(single.price_bounds, PriceBounds { min: 50.0, max: 150.0 });

        let free = FacetExtractor::new(&config).extract(&[Product::new("a", "A", 0.0)]);
        assert_eq!(free.price_bounds, PriceBounds { min: 0.0, max: 100_000.0 });

        let empty = FacetExtractor::new(&config).extract(&[]);
        assert!(empty.is_empty());
        assert!(empty.price_bounds.min < empty.price_bounds.max);
    }

    #[test]
    fn test_normalize_from_backend_range() {
        let config = FacetConfig::default();
        let reversed = PriceBounds::normalize(Some(900.0), Some(20.0), &config);
        assert_eq!(reversed, PriceBounds { min: 20.0, max: 900.0 });

        let bounds = PriceBounds::normalize(Some(10.0), Some(10.0), &config);
        assert!(bounds.min < bounds.max);
        assert_eq!(bounds.clamp(5.0), 10.0);
        assert!(bounds.contains(50.0));
    }
}
