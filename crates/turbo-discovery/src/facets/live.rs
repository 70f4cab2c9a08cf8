//! Per-render facet counts and enabled state.
//!
//! A facet shows live counts (over the filtered result set) only when some
//! *other* kind of filter is active. With nothing else active it shows its
//! static counts, so selecting a brand does not collapse its sibling brands
//! to zero.

use std::collections::HashMap;

use serde::Serialize;
use turbo_catalog::Product;

use super::extract::{FacetSet, SpecFacet};
use crate::filter::FilterState;

/// A brand option as rendered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LiveBrand {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub count: usize,
    pub selected: bool,
    pub disabled: bool,
}

/// A spec value option as rendered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LiveSpecValue {
    pub value: String,
    pub count: usize,
    pub selected: bool,
    pub disabled: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LiveSpec {
    pub name: String,
    pub values: Vec<LiveSpecValue>,
}

impl LiveSpec {
    pub fn value(&self, value: &str) -> Option<&LiveSpecValue> {
        self.values.iter().find(|v| v.value == value)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LiveFacets {
    pub brands: Vec<LiveBrand>,
    pub specs: Vec<LiveSpec>,
}

impl LiveFacets {
    pub fn brand(&self, slug: &str) -> Option<&LiveBrand> {
        self.brands.iter().find(|b| b.slug == slug)
    }

    pub fn spec(&self, name: &str) -> Option<&LiveSpec> {
        self.specs.iter().find(|s| s.name == name)
    }
}

/// Computes [`LiveFacets`] from the filtered result set.
#[derive(Debug, Clone, Copy, Default)]
pub struct LiveCountEngine;

impl LiveCountEngine {
    pub fn compute(filtered: &[Product], facets: &FacetSet, state: &FilterState) -> LiveFacets {
        let actual = ActualCounts::tally(filtered);

        let brand_context = state.has_other_than_brand();
        let brands = facets
            .brands
            .iter()
            .map(|facet| {
                let live = actual.brand(&facet.id);
                let selected = state.is_brand_selected(&facet.slug);
                LiveBrand {
                    id: facet.id.clone(),
                    name: facet.name.clone(),
                    slug: facet.slug.clone(),
                    count: if brand_context { live } else { facet.static_count },
                    selected,
                    disabled: !selected && brand_context && live == 0,
                }
            })
            .collect();

        let specs = facets
            .specs
            .iter()
            .map(|facet| Self::spec(facet, &actual, state))
            .collect();

        LiveFacets { brands, specs }
    }

    fn spec(facet: &SpecFacet, actual: &ActualCounts<'_>, state: &FilterState) -> LiveSpec {
        let context = state.has_other_than_spec(&facet.name);
        let values = facet
            .values
            .iter()
            .map(|option| {
                let live = actual.spec(&facet.name, &option.value);
                let selected = state.is_spec_selected(&facet.name, &option.value);
                LiveSpecValue {
                    value: option.value.clone(),
                    count: if context { live } else { option.static_count },
                    selected,
                    disabled: !selected && context && live == 0,
                }
            })
            .collect();

        LiveSpec {
            name: facet.name.clone(),
            values,
        }
    }
}

/// Occurrence counts over the filtered set, one pass.
struct ActualCounts<'a> {
    brands: HashMap<&'a str, usize>,
    specs: HashMap<(&'a str, &'a str), usize>,
}

impl<'a> ActualCounts<'a> {
    fn tally(products: &'a [Product]) -> Self {
        let mut brands = HashMap::new();
        let mut specs = HashMap::new();

        for product in products {
            if let Some(brand) = &product.brand {
                *brands.entry(brand.key()).or_insert(0) += 1;
            }
            let mut seen = Vec::new();
            for spec in &product.specifications {
                let key = (spec.name.as_str(), spec.value.as_str());
                if !seen.contains(&key) {
                    seen.push(key);
                    *specs.entry(key).or_insert(0) += 1;
                }
            }
        }

        Self { brands, specs }
    }

    fn brand(&self, key: &str) -> usize {
        self.brands.get(key).copied().unwrap_or(0)
    }

    fn spec(&self, name: &str, value: &str) -> usize {
        self.specs.get(&(name, value)).copied().unwrap_or(0)
    }
}
