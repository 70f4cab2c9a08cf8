//! Product, brand, and specification types.

use crate::ids::{BrandId, CategoryId, ProductId};
use serde::{Deserialize, Serialize};

/// Product visibility status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ProductStatus {
    /// Visible to customers.
    #[default]
    Active,
    /// Hidden from the storefront.
    Inactive,
    /// Not yet published.
    Draft,
    /// Retired, data preserved.
    Archived,
    /// Any status this client does not know about.
    #[serde(other)]
    Unknown,
}

impl ProductStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProductStatus::Active => "active",
            ProductStatus::Inactive => "inactive",
            ProductStatus::Draft => "draft",
            ProductStatus::Archived => "archived",
            ProductStatus::Unknown => "unknown",
        }
    }
}

/// A brand record as embedded in a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Brand {
    #[serde(alias = "_id", default)]
    pub id: BrandId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub slug: String,
}

impl Brand {
    pub fn new(id: impl Into<BrandId>, name: impl Into<String>, slug: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            slug: slug.into(),
        }
    }
}

/// Brand as the backend sends it: populated, or a bare name string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BrandRef {
    Populated(Brand),
    Name(String),
}

impl BrandRef {
    /// Grouping key: id, falling back to slug, then name.
    pub fn key(&self) -> &str {
        match self {
            BrandRef::Populated(brand) => {
                if !brand.id.is_empty() {
                    brand.id.as_str()
                } else if !brand.slug.trim().is_empty() {
                    &brand.slug
                } else {
                    &brand.name
                }
            }
            BrandRef::Name(name) => name,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            BrandRef::Populated(brand) if !brand.name.is_empty() => &brand.name,
            BrandRef::Populated(brand) => &brand.slug,
            BrandRef::Name(name) => name,
        }
    }

    /// The value a brand filter selects on.
    pub fn slug(&self) -> &str {
        match self {
            BrandRef::Populated(brand) if !brand.slug.trim().is_empty() => &brand.slug,
            BrandRef::Populated(brand) => &brand.name,
            BrandRef::Name(name) => name,
        }
    }

    /// Whether this reference carries anything usable.
    pub fn is_blank(&self) -> bool {
        self.key().trim().is_empty()
    }
}

impl From<Brand> for BrandRef {
    fn from(brand: Brand) -> Self {
        BrandRef::Populated(brand)
    }
}

/// Category as embedded in a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct CategoryRef {
    #[serde(alias = "_id", default)]
    pub id: CategoryId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub slug: String,
}

impl CategoryRef {
    pub fn new(id: impl Into<CategoryId>, name: impl Into<String>, slug: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            slug: slug.into(),
        }
    }
}

/// A named specification. `value` is an exact string and is never tokenized.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Specification {
    pub name: String,
    pub value: String,
}

impl Specification {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// A product as listed by the catalog backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(alias = "_id")]
    pub id: ProductId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub slug: String,
    /// List price.
    #[serde(default)]
    pub price: f64,
    /// Discount-adjusted price, when a discount applies.
    #[serde(default, alias = "discountPrice", skip_serializing_if = "Option::is_none")]
    pub final_price: Option<f64>,
    /// Flash-sale price, when a sale is running.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flash_price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<BrandRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<CategoryRef>,
    #[serde(default)]
    pub specifications: Vec<Specification>,
    #[serde(default)]
    pub status: ProductStatus,
}

impl Product {
    /// Create an active product with a list price.
    pub fn new(id: impl Into<ProductId>, name: impl Into<String>, price: f64) -> Self {
        let name = name.into();
        Self {
            id: id.into(),
            slug: slugify(&name),
            name,
            price,
            final_price: None,
            flash_price: None,
            brand: None,
            category: None,
            specifications: Vec::new(),
            status: ProductStatus::Active,
        }
    }

    pub fn with_brand(mut self, brand: impl Into<BrandRef>) -> Self {
        self.brand = Some(brand.into());
        self
    }

    pub fn with_category(mut self, category: CategoryRef) -> Self {
        self.category = Some(category);
        self
    }

    pub fn with_spec(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.specifications.push(Specification::new(name, value));
        self
    }

    pub fn with_final_price(mut self, price: f64) -> Self {
        self.final_price = Some(price);
        self
    }

    pub fn with_flash_price(mut self, price: f64) -> Self {
        self.flash_price = Some(price);
        self
    }

    /// Lowest positive price among list, discount-adjusted, and flash prices.
    ///
    /// Falls back to the list price when no candidate is positive.
    pub fn effective_price(&self) -> f64 {
        [Some(self.price), self.final_price, self.flash_price]
            .into_iter()
            .flatten()
            .filter(|p| p.is_finite() && *p > 0.0)
            .fold(None, |acc: Option<f64>, p| Some(acc.map_or(p, |a| a.min(p))))
            .unwrap_or(self.price)
    }

    /// First value recorded for a specification name (exact match).
    pub fn spec(&self, name: &str) -> Option<&str> {
        self.specifications
            .iter()
            .find(|s| s.name == name)
            .map(|s| s.value.as_str())
    }

    /// Whether the product carries `name = value` exactly.
    pub fn has_spec(&self, name: &str, value: &str) -> bool {
        self.specifications
            .iter()
            .any(|s| s.name == name && s.value == value)
    }

    pub fn brand_slug(&self) -> Option<&str> {
        self.brand.as_ref().map(BrandRef::slug)
    }

    pub fn is_active(&self) -> bool {
        self.status == ProductStatus::Active
    }
}

fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
        } else if !slug.ends_with('-') && !slug.is_empty() {
            slug.push('-');
        }
    }
    slug.trim_end_matches('-').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_creation() {
        let product = Product::new("p1", "Phone X Pro", 100.0);
        assert_eq!(product.slug, "phone-x-pro");
        assert!(product.is_active());
        assert!(product.specifications.is_empty());
    }

    #[test]
    fn test_effective_price_takes_lowest() {
        let product = Product::new("p1", "Phone", 100.0)
            .with_final_price(90.0)
            .with_flash_price(95.0);
        assert_eq!(product.effective_price(), 90.0);

        let flash = Product::new("p2", "Phone", 100.0).with_flash_price(70.0);
        assert_eq!(flash.effective_price(), 70.0);
    }

    #[test]
    fn test_effective_price_ignores_non_positive() {
        let product = Product::new("p1", "Phone", 100.0).with_final_price(0.0);
        assert_eq!(product.effective_price(), 100.0);

        let free = Product::new("p2", "Sticker", 0.0);
        assert_eq!(free.effective_price(), 0.0);
    }

    #[test]
    fn test_brand_ref_key_fallbacks() {
        let full = BrandRef::from(Brand::new("b1", "Acme", "acme"));
        assert_eq!(full.key(), "b1");
        assert_eq!(full.slug(), "acme");

        let no_id = BrandRef::from(Brand::new("", "Acme", "acme"));
        assert_eq!(no_id.key(), "acme");

        let bare = BrandRef::Name("Zeta".to_string());
        assert_eq!(bare.key(), "Zeta");
        assert_eq!(bare.name(), "Zeta");
        assert_eq!(bare.slug(), "Zeta");
    }

    #[test]
    fn test_deserialize_backend_shape() {
        let json = r#"{
            "_id": "p1",
            "name": "Phone",
            "slug": "phone",
            "price": 120,
            "discountPrice": 110,
            "brand": { "_id": "b1", "name": "Acme", "slug": "acme" },
            "category": { "_id": "c1", "name": "Phones", "slug": "phones" },
            "specifications": [{ "name": "RAM", "value": "8GB" }],
            "status": "active"
        }"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.id.as_str(), "p1");
        assert_eq!(product.final_price, Some(110.0));
        assert_eq!(product.brand_slug(), Some("acme"));
        assert_eq!(product.spec("RAM"), Some("8GB"));
    }

    #[test]
    fn test_deserialize_bare_brand_and_unknown_status() {
        let json = r#"{ "id": "p2", "price": 5, "brand": "Zeta", "status": "retired" }"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.brand, Some(BrandRef::Name("Zeta".to_string())));
        assert_eq!(product.status, ProductStatus::Unknown);
    }

    #[test]
    fn test_spec_values_are_exact() {
        let product = Product::new("p1", "Phone", 1.0).with_spec("RAM", "8GB");
        assert!(product.has_spec("RAM", "8GB"));
        assert!(!product.has_spec("RAM", "8gb"));
        assert!(!product.has_spec("ram", "8GB"));
    }
}
