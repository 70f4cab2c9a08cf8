//! Narrowing a bounded, in-memory product set by a [`FilterState`].
//!
//! This mirrors what the backend does for a filtered listing; it is used to
//! compute live counts without a round trip and by the CLI.

use turbo_catalog::Product;

use super::state::FilterState;

impl FilterState {
    /// Whether `product` passes every active filter.
    pub fn matches(&self, product: &Product) -> bool {
        self.matches_category(product)
            && self.matches_search(product)
            && self.matches_brand(product)
            && self.matches_specs(product)
            && self.matches_price(product)
    }

    fn matches_category(&self, product: &Product) -> bool {
        let Some(wanted) = &self.category else {
            return true;
        };
        product
            .category
            .as_ref()
            .is_some_and(|c| c.id.as_str() == wanted || c.slug == *wanted)
    }

    fn matches_search(&self, product: &Product) -> bool {
        let Some(search) = &self.search else {
            return true;
        };
        let needle = search.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }

        let brand = product.brand.as_ref().map(|b| b.name()).unwrap_or_default();
        let category = product
            .category
            .as_ref()
            .map(|c| c.name.as_str())
            .unwrap_or_default();

        [product.name.as_str(), brand, category]
            .iter()
            .any(|field| field.to_lowercase().contains(&needle))
    }

    fn matches_brand(&self, product: &Product) -> bool {
        if self.brands.is_empty() {
            return true;
        }
        product
            .brand_slug()
            .is_some_and(|slug| self.brands.contains(slug))
    }

    fn matches_specs(&self, product: &Product) -> bool {
        self.specs
            .iter()
            .all(|(name, value)| product.has_spec(name, value))
    }

    fn matches_price(&self, product: &Product) -> bool {
        let price = product.effective_price();
        self.min_price.map_or(true, |min| price >= min)
            && self.max_price.map_or(true, |max| price <= max)
    }
}

/// Products passing `state`, ordered by its sort key.
///
/// The sort is stable, so keys the payload cannot order keep the input order.
pub fn apply_filter(products: &[Product], state: &FilterState) -> Vec<Product> {
    let mut matched: Vec<Product> = products
        .iter()
        .filter(|product| state.matches(product))
        .cloned()
        .collect();

    if let Some(sort) = state.sort_by {
        matched.sort_by(|a, b| sort.compare(a, b));
    }

    matched
}
