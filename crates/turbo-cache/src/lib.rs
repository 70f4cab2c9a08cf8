//! Injected key-value persistence for TurboCommerce storefront state.
//!
//! Small pieces of shopper state (the wishlist, saved preferences) live in a
//! [`KeyValueStore`] that is handed to the component that needs it, so tests
//! can swap in a [`MemoryStore`] and the CLI a [`FileStore`].
//!
//! # Example
//!
//! ```rust
//! use turbo_cache::{MemoryStore, Wishlist};
//! use turbo_catalog::ProductId;
//!
//! let wishlist = Wishlist::new(MemoryStore::new());
//! wishlist.toggle(ProductId::new("p1")).unwrap();
//! assert!(wishlist.contains(&ProductId::new("p1")).unwrap());
//! ```

mod error;
mod kv;
mod store;
mod wishlist;

pub use error::CacheError;
pub use kv::Cache;
pub use store::{FileStore, KeyValueStore, MemoryStore};
pub use wishlist::{Wishlist, WISHLIST_KEY};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{Cache, CacheError, FileStore, KeyValueStore, MemoryStore, Wishlist};
}
