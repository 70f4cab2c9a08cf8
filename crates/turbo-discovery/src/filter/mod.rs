//! Filter state, its URL form, and local filtering.

mod apply;
mod codec;
mod params;
mod sort;
mod state;

pub use apply::apply_filter;
pub use codec::{
    FilterStateCodec, KEY_BRAND, KEY_CATEGORY, KEY_MAX_PRICE, KEY_MIN_PRICE, KEY_PAGE,
    KEY_SEARCH, KEY_SORT_BY, RESERVED_KEYS,
};
pub use params::QueryParams;
pub use sort::SortOption;
pub use state::{FilterChange, FilterState};
