//! Facet extraction and live counts.

mod extract;
mod live;

pub use extract::{BrandFacet, FacetExtractor, FacetSet, PriceBounds, SpecFacet, SpecValue};
pub use live::{LiveBrand, LiveCountEngine, LiveFacets, LiveSpec, LiveSpecValue};
