//! Orchestration of one product listing page.
//!
//! [`DiscoveryPage`] ties the pieces together: the URL-backed filter, the
//! static facets of the current category/search scope, the price slider, and
//! load status for the two backend refreshes. Refresh failures keep the
//! previous facets and bounds so filtering stays usable.

use serde::Serialize;
use tracing::{debug, warn};
use turbo_catalog::{PriceRange, Product, ProductPage};
use turbo_data::{CatalogApi, FetchError, PriceRangeQuery, ProductQuery};

use crate::config::DiscoveryConfig;
use crate::error::DiscoveryError;
use crate::facets::{FacetExtractor, FacetSet, LiveCountEngine, LiveFacets, PriceBounds};
use crate::filter::{apply_filter, FilterChange, FilterState, FilterStateCodec};
use crate::slider::RangeSliderController;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "status", content = "message", rename_all = "lowercase")]
pub enum LoadStatus {
    #[default]
    Idle,
    Loading,
    Ready,
    Failed(String),
}

impl LoadStatus {
    pub fn is_failed(&self) -> bool {
        matches!(self, LoadStatus::Failed(_))
    }
}

/// Which backend refreshes a filter change calls for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct RefetchPlan {
    /// Category/search scope changed: reload the corpus and its facets.
    pub corpus: bool,
    /// Category or brands changed: reload the price window.
    pub price_range: bool,
}

impl RefetchPlan {
    pub fn all() -> Self {
        Self {
            corpus: true,
            price_range: true,
        }
    }

    pub fn is_empty(&self) -> bool {
        !self.corpus && !self.price_range
    }
}

/// Result of a filter mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterUpdate {
    pub changed: bool,
    /// Query string to write to the URL.
    pub query: String,
    pub refetch: RefetchPlan,
}

pub struct DiscoveryPage {
    config: DiscoveryConfig,
    extractor: FacetExtractor,
    filter: FilterState,
    corpus: Vec<Product>,
    facets: FacetSet,
    bounds: PriceBounds,
    slider: RangeSliderController,
    corpus_status: LoadStatus,
    price_status: LoadStatus,
}

impl std::fmt::Debug for DiscoveryPage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DiscoveryPage")
            .field("filter", &self.filter)
            .field("corpus", &self.corpus.len())
            .field("bounds", &self.bounds)
            .field("corpus_status", &self.corpus_status)
            .field("price_status", &self.price_status)
            .finish()
    }
}

impl DiscoveryPage {
    pub fn new(filter: FilterState, config: DiscoveryConfig) -> Self {
        let bounds = PriceBounds::fallback(&config.facets);
        let mut slider = RangeSliderController::new(bounds, &config.slider);
        slider.sync_committed(filter.min_price, filter.max_price);
        Self {
            extractor: FacetExtractor::new(&config.facets),
            facets: FacetSet::empty(&config.facets),
            filter,
            corpus: Vec::new(),
            bounds,
            slider,
            corpus_status: LoadStatus::Idle,
            price_status: LoadStatus::Idle,
            config,
        }
    }

    /// Page state for a URL query string.
    pub fn from_url(query: &str, config: DiscoveryConfig) -> Self {
        Self::new(FilterStateCodec::decode(query), config)
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    pub fn query_string(&self) -> String {
        FilterStateCodec::encode(&self.filter)
    }

    pub fn facets(&self) -> &FacetSet {
        &self.facets
    }

    pub fn corpus(&self) -> &[Product] {
        &self.corpus
    }

    pub fn price_bounds(&self) -> PriceBounds {
        self.bounds
    }

    pub fn slider(&self) -> &RangeSliderController {
        &self.slider
    }

    pub fn slider_mut(&mut self) -> &mut RangeSliderController {
        &mut self.slider
    }

    pub fn corpus_status(&self) -> &LoadStatus {
        &self.corpus_status
    }

    pub fn price_status(&self) -> &LoadStatus {
        &self.price_status
    }

    /// Request for the unfiltered corpus of the current scope.
    pub fn corpus_query(&self) -> ProductQuery {
        ProductQuery::scope(
            self.filter.category.clone(),
            self.filter.search.clone(),
            self.config.facets.corpus_limit,
        )
    }

    /// Request for the price window of the current category and brands.
    pub fn price_range_query(&self) -> PriceRangeQuery {
        PriceRangeQuery {
            category: self.filter.category.clone(),
            brands: self.filter.brands.iter().cloned().collect(),
            active_only: true,
        }
    }

    /// Replace the corpus with a local product set (no backend).
    pub fn set_corpus(&mut self, products: Vec<Product>) {
        self.apply_corpus(Ok(ProductPage::from_products(products)));
    }

    /// Reload the corpus for the current scope and rebuild facets.
    pub async fn load_corpus<A: CatalogApi + ?Sized>(&mut self, api: &A) {
        self.corpus_status = LoadStatus::Loading;
        let result = api.products(&self.corpus_query()).await;
        self.apply_corpus(result);
    }

    /// Reload the price window for the current category and brands.
    pub async fn refresh_price_range<A: CatalogApi + ?Sized>(&mut self, api: &A) {
        self.price_status = LoadStatus::Loading;
        let result = api.price_range(&self.price_range_query()).await;
        self.apply_price_range(result);
    }

    /// Run the refreshes in `plan` concurrently.
    pub async fn refresh<A: CatalogApi + ?Sized>(&mut self, api: &A, plan: RefetchPlan) {
        let corpus_query = plan.corpus.then(|| self.corpus_query());
        let price_query = plan.price_range.then(|| self.price_range_query());
        if corpus_query.is_some() {
            self.corpus_status = LoadStatus::Loading;
        }
        if price_query.is_some() {
            self.price_status = LoadStatus::Loading;
        }

        let (corpus, range) = futures::join!(
            async {
                match &corpus_query {
                    Some(query) => Some(api.products(query).await),
                    None => None,
                }
            },
            async {
                match &price_query {
                    Some(query) => Some(api.price_range(query).await),
                    None => None,
                }
            },
        );

        if let Some(result) = corpus {
            self.apply_corpus(result);
        }
        if let Some(result) = range {
            self.apply_price_range(result);
        }
    }

    fn apply_corpus(&mut self, result: Result<ProductPage, FetchError>) {
        match result {
            Ok(page) => {
                self.corpus = page.products;
                self.facets = self.extractor.extract(&self.corpus);
                self.corpus_status = LoadStatus::Ready;
                // The price-range endpoint owns the window once it has answered.
                if self.price_status != LoadStatus::Ready {
                    self.adopt_bounds(self.facets.price_bounds);
                }
                debug!(products = self.corpus.len(), "corpus loaded");
            }
            Err(err) => {
                let err = DiscoveryError::from(err);
                warn!(error = %err, "corpus refresh failed, keeping previous facets");
                self.corpus_status = LoadStatus::Failed(err.to_string());
            }
        }
    }

    fn apply_price_range(&mut self, result: Result<PriceRange, FetchError>) {
        match result {
            Ok(range) => {
                self.adopt_bounds(PriceBounds::normalize(
                    Some(range.min_price),
                    Some(range.max_price),
                    &self.config.facets,
                ));
                self.price_status = LoadStatus::Ready;
                debug!(min = self.bounds.min, max = self.bounds.max, "price bounds loaded");
            }
            Err(err) => {
                let err = DiscoveryError::from(err);
                warn!(error = %err, "price range refresh failed, keeping previous bounds");
                self.price_status = LoadStatus::Failed(err.to_string());
            }
        }
    }

    fn adopt_bounds(&mut self, bounds: PriceBounds) {
        self.bounds = bounds;
        self.slider
            .reset_bounds(bounds, self.filter.min_price, self.filter.max_price);
    }

    /// Apply a user change to the filter.
    ///
    /// A category change clears the price selection and resets the slider;
    /// a brand change only refetches the price window and keeps the user's
    /// range, clamped to the new window when it arrives.
    pub fn apply(&mut self, change: FilterChange) -> Result<FilterUpdate, DiscoveryError> {
        change.validate()?;

        let mut refetch = match &change {
            FilterChange::SetCategory(_) => RefetchPlan::all(),
            FilterChange::SetSearch(_) => RefetchPlan {
                corpus: true,
                price_range: false,
            },
            FilterChange::ToggleBrand(_) | FilterChange::SetBrands(_) => RefetchPlan {
                corpus: false,
                price_range: true,
            },
            FilterChange::ClearAll => RefetchPlan {
                corpus: false,
                price_range: !self.filter.brands.is_empty(),
            },
            _ => RefetchPlan::default(),
        };
        let category_change = matches!(change, FilterChange::SetCategory(_));
        let price_change = matches!(change, FilterChange::SetPriceRange { .. } | FilterChange::ClearAll);

        let mut changed = self.filter.apply(change);
        if changed && category_change {
            changed |= self.filter.apply(FilterChange::SetPriceRange { min: None, max: None });
        }
        if !changed {
            refetch = RefetchPlan::default();
        } else if category_change || price_change {
            self.slider
                .sync_committed(self.filter.min_price, self.filter.max_price);
        }

        Ok(FilterUpdate {
            changed,
            query: self.query_string(),
            refetch,
        })
    }

    /// Commit the slider's pending range into the filter.
    pub fn apply_price(&mut self) -> FilterUpdate {
        let selection = self.slider.apply();
        let changed = self.filter.apply(FilterChange::SetPriceRange {
            min: selection.min,
            max: selection.max,
        });
        FilterUpdate {
            changed,
            query: self.query_string(),
            refetch: RefetchPlan::default(),
        }
    }

    /// The corpus narrowed by the current filter.
    pub fn filtered_products(&self) -> Vec<Product> {
        apply_filter(&self.corpus, &self.filter)
    }

    /// Facet options as rendered for `filtered`, the backend's filtered
    /// result set.
    pub fn live_facets(&self, filtered: &[Product]) -> LiveFacets {
        LiveCountEngine::compute(filtered, &self.facets, &self.filter)
    }
}
