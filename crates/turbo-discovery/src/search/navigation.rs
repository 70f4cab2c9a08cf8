//! Where activating a dropdown row takes the user.

use serde::Serialize;

use crate::filter::{FilterChange, FilterState, FilterStateCodec};

/// A navigation produced by the predictive search dropdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "target", rename_all = "snake_case")]
pub enum Navigation {
    /// The keyword suggestion row.
    Keyword(String),
    /// A category suggestion; carries the category slug (or id).
    Category(String),
    /// A brand suggestion; carries the brand slug.
    Brand(String),
    /// A product hit; carries its slug (or id when the slug is empty).
    Product(String),
    /// Enter with no row highlighted.
    FullSearch(String),
}

impl Navigation {
    /// Listing filter this navigation lands on. Product pages have none.
    pub fn filter_state(&self) -> Option<FilterState> {
        let change = match self {
            Navigation::Keyword(q) | Navigation::FullSearch(q) => {
                FilterChange::SetSearch(Some(q.clone()))
            }
            Navigation::Category(category) => FilterChange::SetCategory(Some(category.clone())),
            Navigation::Brand(slug) => FilterChange::ToggleBrand(slug.clone()),
            Navigation::Product(_) => return None,
        };
        Some(FilterState::new().with(change))
    }

    pub fn href(&self) -> String {
        match (self, self.filter_state()) {
            (Navigation::Product(slug), _) => {
                format!("/products/{}", urlencoding::encode(slug))
            }
            (_, Some(state)) => {
                let query = FilterStateCodec::encode(&state);
                if query.is_empty() {
                    "/products".to_string()
                } else {
                    format!("/products?{}", query)
                }
            }
            (_, None) => "/products".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hrefs() {
        assert_eq!(
            Navigation::Keyword("iphone 15".to_string()).href(),
            "/products?search=iphone%2015"
        );
        assert_eq!(
            Navigation::Category("smart-phones".to_string()).href(),
            "/products?category=smart-phones"
        );
        assert_eq!(Navigation::Brand("acme".to_string()).href(), "/products?brand=acme");
        assert_eq!(
            Navigation::Product("phone-x".to_string()).href(),
            "/products/phone-x"
        );
    }

    #[test]
    fn test_blank_full_search_lands_on_listing() {
        assert_eq!(Navigation::FullSearch("  ".to_string()).href(), "/products");
    }

    #[test]
    fn test_filter_state_seeds_listing() {
        let state = Navigation::Brand("acme".to_string()).filter_state().unwrap();
        assert!(state.is_brand_selected("acme"));
        assert!(Navigation::Product("x".to_string()).filter_state().is_none());
    }
}
