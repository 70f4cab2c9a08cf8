//! Structured filter state and the mutations the UI performs on it.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use super::codec::is_spec_key;
use super::sort::SortOption;
use crate::error::DiscoveryError;

/// Active filters for a product listing.
///
/// Brands are a set (multi-select). Specs hold at most one value per name
/// (radio semantics).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterState {
    pub category: Option<String>,
    pub brands: BTreeSet<String>,
    pub specs: BTreeMap<String, String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub search: Option<String>,
    pub sort_by: Option<SortOption>,
    pub page: Option<u32>,
}

/// A single user action on the filter state.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterChange {
    SetCategory(Option<String>),
    ToggleBrand(String),
    SetBrands(BTreeSet<String>),
    /// Select `value` for `name`, replacing any previous value.
    SelectSpec { name: String, value: String },
    ClearSpec(String),
    SetPriceRange { min: Option<f64>, max: Option<f64> },
    SetSearch(Option<String>),
    SetSort(Option<SortOption>),
    SetPage(u32),
    /// Drop every filter except category and search text.
    ClearAll,
}

impl FilterChange {
    /// Reject changes the URL could not carry faithfully.
    pub fn validate(&self) -> Result<(), DiscoveryError> {
        match self {
            FilterChange::SelectSpec { name, value } => {
                if !is_spec_key(name) {
                    return Err(DiscoveryError::InvalidValue {
                        field: "spec name".to_string(),
                        value: name.clone(),
                    });
                }
                if value.trim().is_empty() {
                    return Err(DiscoveryError::InvalidValue {
                        field: name.clone(),
                        value: value.clone(),
                    });
                }
                Ok(())
            }
            FilterChange::SetPriceRange { min, max } => {
                for (field, bound) in [("minPrice", min), ("maxPrice", max)] {
                    if let Some(v) = bound {
                        if !v.is_finite() || *v < 0.0 {
                            return Err(DiscoveryError::InvalidValue {
                                field: field.to_string(),
                                value: v.to_string(),
                            });
                        }
                    }
                }
                Ok(())
            }
            FilterChange::SetPage(0) => Err(DiscoveryError::InvalidValue {
                field: "page".to_string(),
                value: "0".to_string(),
            }),
            _ => Ok(()),
        }
    }

    pub fn is_page_change(&self) -> bool {
        matches!(self, FilterChange::SetPage(_))
    }
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a change. Returns whether anything changed.
    ///
    /// Any effective change other than [`FilterChange::SetPage`] resets the
    /// page.
    pub fn apply(&mut self, change: FilterChange) -> bool {
        let resets_page = !change.is_page_change();
        let before = self.clone();

        match change {
            FilterChange::SetCategory(category) => self.category = non_blank(category),
            FilterChange::ToggleBrand(slug) => {
                if !self.brands.remove(&slug) && !slug.is_empty() {
                    self.brands.insert(slug);
                }
            }
            FilterChange::SetBrands(brands) => {
                self.brands = brands.into_iter().filter(|b| !b.is_empty()).collect();
            }
            FilterChange::SelectSpec { name, value } => {
                if is_spec_key(&name) && !value.trim().is_empty() {
                    self.specs.insert(name, value);
                }
            }
            FilterChange::ClearSpec(name) => {
                self.specs.remove(&name);
            }
            FilterChange::SetPriceRange { min, max } => {
                let min = min.filter(|v| v.is_finite());
                let max = max.filter(|v| v.is_finite());
                match (min, max) {
                    (Some(lo), Some(hi)) if lo > hi => {
                        self.min_price = Some(hi);
                        self.max_price = Some(lo);
                    }
                    _ => {
                        self.min_price = min;
                        self.max_price = max;
                    }
                }
            }
            FilterChange::SetSearch(search) => self.search = non_blank(search),
            FilterChange::SetSort(sort) => self.sort_by = sort,
            FilterChange::SetPage(page) => self.page = Some(page.max(1)),
            FilterChange::ClearAll => {
                self.brands.clear();
                self.specs.clear();
                self.min_price = None;
                self.max_price = None;
                self.sort_by = None;
            }
        }

        let changed = *self != before;
        if changed && resets_page {
            self.page = None;
        }
        changed
    }

    /// Builder-style [`apply`](Self::apply).
    pub fn with(mut self, change: FilterChange) -> Self {
        self.apply(change);
        self
    }

    pub fn has_brand_filter(&self) -> bool {
        !self.brands.is_empty()
    }

    pub fn has_price_filter(&self) -> bool {
        self.min_price.is_some() || self.max_price.is_some()
    }

    pub fn has_spec_filter(&self) -> bool {
        !self.specs.is_empty()
    }

    /// Any spec or price filter is active.
    pub fn has_other_than_brand(&self) -> bool {
        self.has_spec_filter() || self.has_price_filter()
    }

    /// Any brand filter, price filter, or a filter on a spec other than `name`.
    pub fn has_other_than_spec(&self, name: &str) -> bool {
        self.has_brand_filter()
            || self.has_price_filter()
            || self.specs.keys().any(|key| key != name)
    }

    pub fn is_brand_selected(&self, slug: &str) -> bool {
        self.brands.contains(slug)
    }

    pub fn is_spec_selected(&self, name: &str, value: &str) -> bool {
        self.specs.get(name).map(String::as_str) == Some(value)
    }

    /// Number of facet selections (brands, specs, price counted once).
    pub fn active_filter_count(&self) -> usize {
        self.brands.len() + self.specs.len() + usize::from(self.has_price_filter())
    }

    /// No facet selection is active.
    pub fn is_empty(&self) -> bool {
        self.active_filter_count() == 0
    }

    pub fn page_or_default(&self) -> u32 {
        self.page.unwrap_or(1)
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paged(page: u32) -> FilterState {
        FilterState::new().with(FilterChange::SetPage(page))
    }

    #[test]
    fn test_toggle_brand_is_multi_select() {
        let mut state = FilterState::new();
        state.apply(FilterChange::ToggleBrand("acme".to_string()));
        state.apply(FilterChange::ToggleBrand("zeta".to_string()));
        assert_eq!(state.brands.len(), 2);

        state.apply(FilterChange::ToggleBrand("acme".to_string()));
        assert!(!state.is_brand_selected("acme"));
        assert!(state.is_brand_selected("zeta"));
    }

    #[test]
    fn test_select_spec_is_radio() {
        let mut state = FilterState::new();
        state.apply(FilterChange::SelectSpec {
            name: "RAM".to_string(),
            value: "4GB".to_string(),
        });
        state.apply(FilterChange::SelectSpec {
            name: "RAM".to_string(),
            value: "8GB".to_string(),
        });
        assert_eq!(state.specs.len(), 1);
        assert!(state.is_spec_selected("RAM", "8GB"));
        assert!(!state.is_spec_selected("RAM", "4GB"));
    }

    #[test]
    fn test_select_spec_ignores_reserved_names() {
        let mut state = paged(2);
        for name in ["sortBy", "page", "brand", " "] {
            let changed = state.apply(FilterChange::SelectSpec {
                name: name.to_string(),
                value: "x".to_string(),
            });
            assert!(!changed);
        }
        assert!(state.specs.is_empty());
        assert_eq!(state.page, Some(2));
        let query = crate::filter::FilterStateCodec::encode(&state);
        assert_eq!(crate::filter::FilterStateCodec::decode(&query), state);
    }

    #[test]
    fn test_filter_change_resets_page() {
        let mut state = paged(3);
        assert_eq!(state.page, Some(3));

        state.apply(FilterChange::ToggleBrand("acme".to_string()));
        assert_eq!(state.page, None);
    }

    #[test]
    fn test_page_change_keeps_filters() {
        let mut state = FilterState::new().with(FilterChange::ToggleBrand("acme".to_string()));
        state.apply(FilterChange::SetPage(2));
        assert_eq!(state.page, Some(2));
        assert!(state.is_brand_selected("acme"));
    }

    #[test]
    fn test_noop_change_keeps_page() {
        let mut state = paged(4);
        assert!(!state.apply(FilterChange::ClearSpec("RAM".to_string())));
        assert_eq!(state.page, Some(4));
    }

    #[test]
    fn test_price_range_is_ordered() {
        let state = FilterState::new().with(FilterChange::SetPriceRange {
            min: Some(500.0),
            max: Some(100.0),
        });
        assert_eq!(state.min_price, Some(100.0));
        assert_eq!(state.max_price, Some(500.0));
    }

    #[test]
    fn test_clear_all_keeps_scope() {
        let mut state = FilterState::new()
            .with(FilterChange::SetCategory(Some("phones".to_string())))
            .with(FilterChange::SetSearch(Some("pro".to_string())))
            .with(FilterChange::ToggleBrand("acme".to_string()))
            .with(FilterChange::SetPriceRange {
                min: Some(1.0),
                max: None,
            });
        state.apply(FilterChange::ClearAll);
        assert!(state.is_empty());
        assert_eq!(state.category.as_deref(), Some("phones"));
        assert_eq!(state.search.as_deref(), Some("pro"));
    }

    #[test]
    fn test_blank_search_clears() {
        let state = FilterState::new().with(FilterChange::SetSearch(Some("   ".to_string())));
        assert_eq!(state.search, None);
    }

    #[test]
    fn test_other_filter_predicates() {
        let brand_only = FilterState::new().with(FilterChange::ToggleBrand("acme".to_string()));
        assert!(!brand_only.has_other_than_brand());
        assert!(brand_only.has_other_than_spec("RAM"));

        let ram_only = FilterState::new().with(FilterChange::SelectSpec {
            name: "RAM".to_string(),
            value: "4GB".to_string(),
        });
        assert!(ram_only.has_other_than_brand());
        assert!(!ram_only.has_other_than_spec("RAM"));
        assert!(ram_only.has_other_than_spec("Storage"));
    }

    #[test]
    fn test_validate_rejects_reserved_spec_names() {
        let change = FilterChange::SelectSpec {
            name: "page".to_string(),
            value: "2".to_string(),
        };
        assert!(matches!(
            change.validate(),
            Err(DiscoveryError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_validate_rejects_bad_prices() {
        let change = FilterChange::SetPriceRange {
            min: Some(f64::NAN),
            max: None,
        };
        assert!(change.validate().is_err());
        assert!(FilterChange::SetPage(0).validate().is_err());
        assert!(FilterChange::SetPage(1).validate().is_ok());
    }
}
