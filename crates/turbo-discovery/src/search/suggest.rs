//! Building dropdown suggestions from one page of search results.

use serde::Serialize;
use turbo_catalog::ProductPage;

use super::navigation::Navigation;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SuggestionKind {
    Keyword,
    Category,
    Brand,
}

/// One suggestion row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Suggestion {
    pub kind: SuggestionKind,
    pub label: String,
    /// Slug or id to navigate to; the query text for keywords.
    pub target: String,
    /// Result total for the keyword row, local occurrences otherwise.
    /// `None` when the search failed.
    pub count: Option<u64>,
}

impl Suggestion {
    pub fn keyword(query: impl Into<String>, count: Option<u64>) -> Self {
        let query = query.into();
        Self {
            kind: SuggestionKind::Keyword,
            label: query.clone(),
            target: query,
            count,
        }
    }

    pub fn navigation(&self) -> Navigation {
        match self.kind {
            SuggestionKind::Keyword => Navigation::Keyword(self.target.clone()),
            SuggestionKind::Category => Navigation::Category(self.target.clone()),
            SuggestionKind::Brand => Navigation::Brand(self.target.clone()),
        }
    }
}

/// Keyword row (with the result total) followed by distinct categories and
/// then distinct brands seen on the page, in first-seen order with their
/// local counts, capped at `max`.
pub fn build_suggestions(query: &str, page: &ProductPage, max: usize) -> Vec<Suggestion> {
    let mut suggestions = vec![Suggestion::keyword(query, Some(page.total()))];

    let mut categories: Vec<Suggestion> = Vec::new();
    let mut brands: Vec<Suggestion> = Vec::new();

    for product in &page.products {
        if let Some(category) = &product.category {
            if !category.name.trim().is_empty() {
                let target = if category.slug.is_empty() {
                    category.id.to_string()
                } else {
                    category.slug.clone()
                };
                bump(&mut categories, SuggestionKind::Category, &category.name, target);
            }
        }
        if let Some(brand) = product.brand.as_ref().filter(|b| !b.is_blank()) {
            bump(&mut brands, SuggestionKind::Brand, brand.name(), brand.slug().to_string());
        }
    }

    suggestions.extend(categories);
    suggestions.extend(brands);
    suggestions.truncate(max.max(1));
    suggestions
}

fn bump(rows: &mut Vec<Suggestion>, kind: SuggestionKind, label: &str, target: String) {
    match rows
        .iter_mut()
        .find(|row| row.kind == kind && row.target == target)
    {
        Some(row) => row.count = Some(row.count.unwrap_or(0) + 1),
        None => rows.push(Suggestion {
            kind,
            label: label.to_string(),
            target,
            count: Some(1),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use turbo_catalog::{Brand, CategoryRef, Pagination, Product};

    fn page() -> ProductPage {
        let phones = CategoryRef::new("c1", "Phones", "phones");
        let cases = CategoryRef::new("c2", "Cases", "");
        let products = vec![
            Product::new("1", "iPhone 15", 900.0)
                .with_category(phones.clone())
                .with_brand(Brand::new("b1", "Apple", "apple")),
            Product::new("2", "iPhone 14", 700.0)
                .with_category(phones)
                .with_brand(Brand::new("b1", "Apple", "apple")),
            Product::new("3", "iPhone Case", 20.0)
                .with_category(cases)
                .with_brand(Brand::new("b2", "Casey", "casey")),
        ];
        ProductPage::new(products, Pagination::new(1, 10, 42))
    }

    #[test]
    fn test_keyword_then_categories_then_brands() {
        let rows = build_suggestions("iphone", &page(), 8);
        let summary: Vec<(&str, Option<u64>)> =
            rows.iter().map(|r| (r.label.as_str(), r.count)).collect();
        assert_eq!(
            summary,
            vec![
                ("iphone", Some(42)),
                ("Phones", Some(2)),
                ("Cases", Some(1)),
                ("Apple", Some(2)),
                ("Casey", Some(1)),
            ]
        );
        assert_eq!(rows[2].target, "c2");
        assert_eq!(rows[3].navigation(), Navigation::Brand("apple".to_string()));
    }

    #[test]
    fn test_same_name_different_targets_stay_apart() {
        let products = vec![
            Product::new("1", "Watch Band", 30.0)
                .with_category(CategoryRef::new("c1", "Accessories", "phone-accessories")),
            Product::new("2", "Watch Strap", 25.0)
                .with_category(CategoryRef::new("c2", "Accessories", "watch-accessories")),
            Product::new("3", "Case", 15.0)
                .with_category(CategoryRef::new("c1", "Accessories", "phone-accessories")),
        ];
        let rows = build_suggestions("watch", &ProductPage::new(products, Pagination::new(1, 10, 3)), 8);
        let categories: Vec<(&str, Option<u64>)> = rows[1..]
            .iter()
            .map(|r| (r.target.as_str(), r.count))
            .collect();
        assert_eq!(
            categories,
            vec![("phone-accessories", Some(2)), ("watch-accessories", Some(1))]
        );
    }

    #[test]
    fn test_capped() {
        let rows = build_suggestions("iphone", &page(), 3);
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].kind, SuggestionKind::Keyword);
    }
}
