//! Faceted product discovery for TurboCommerce storefronts.
//!
//! The pieces, leaves first:
//!
//! - [`FacetExtractor`]: brand, spec, and price facets from a product corpus
//! - [`FilterStateCodec`]: filter state to and from a URL query string
//! - [`LiveCountEngine`]: per-render counts and disabled flags
//! - [`RangeSliderController`]: dual-handle price range, pending vs committed
//! - [`PredictiveSearch`]: debounced, cancellable autocomplete
//!
//! [`DiscoveryPage`] wires them to a [`CatalogApi`](turbo_data::CatalogApi).
//!
//! # Example
//!
//! ```rust
//! use turbo_catalog::{Brand, Product};
//! use turbo_discovery::prelude::*;
//!
//! let products = vec![
//!     Product::new("p1", "P1", 100.0).with_brand(Brand::new("b1", "Acme", "acme")),
//!     Product::new("p2", "P2", 200.0).with_brand(Brand::new("b2", "Zeta", "zeta")),
//! ];
//!
//! let mut page = DiscoveryPage::from_url("brand=acme", DiscoveryConfig::default());
//! page.set_corpus(products);
//!
//! let filtered = page.filtered_products();
//! let live = page.live_facets(&filtered);
//! assert_eq!(filtered.len(), 1);
//! assert!(live.brand("acme").unwrap().selected);
//! ```

pub mod config;
pub mod error;
pub mod facets;
pub mod filter;
pub mod page;
pub mod search;
pub mod slider;

pub use config::{DiscoveryConfig, FacetConfig, SearchConfig, SliderConfig};
pub use error::DiscoveryError;
pub use facets::{
    BrandFacet, FacetExtractor, FacetSet, LiveBrand, LiveCountEngine, LiveFacets, LiveSpec,
    LiveSpecValue, PriceBounds, SpecFacet, SpecValue,
};
pub use filter::{
    apply_filter, FilterChange, FilterState, FilterStateCodec, QueryParams, SortOption,
};
pub use page::{DiscoveryPage, FilterUpdate, LoadStatus, RefetchPlan};
pub use search::{
    Navigation, PredictiveSearch, SearchEvent, SearchKey, SearchMachine, SearchPhase,
    SearchSession, Suggestion, SuggestionKind, UiAction,
};
pub use slider::{
    GestureListeners, Handle, NoopListeners, PointerSource, PriceSelection,
    RangeSliderController, SliderState, TrackBounds,
};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::config::DiscoveryConfig;
    pub use crate::error::DiscoveryError;
    pub use crate::facets::{FacetExtractor, FacetSet, LiveCountEngine, LiveFacets, PriceBounds};
    pub use crate::filter::{apply_filter, FilterChange, FilterState, FilterStateCodec, SortOption};
    pub use crate::page::{DiscoveryPage, FilterUpdate, LoadStatus, RefetchPlan};
    pub use crate::search::{Navigation, PredictiveSearch, SearchKey, SearchPhase};
    pub use crate::slider::{Handle, PointerSource, RangeSliderController, TrackBounds};
}
