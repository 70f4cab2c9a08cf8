//! Wishlist persisted through an injected store.

use turbo_catalog::ProductId;

use crate::{cache_key, Cache, CacheError, KeyValueStore};

/// Key used for the anonymous shopper's wishlist.
pub const WISHLIST_KEY: &str = "wishlist";

/// Saved product ids, in the order they were added.
#[derive(Debug, Clone)]
pub struct Wishlist<S> {
    cache: Cache<S>,
    key: String,
}

impl<S: KeyValueStore> Wishlist<S> {
    /// The anonymous wishlist.
    pub fn new(store: S) -> Self {
        Self {
            cache: Cache::new(store),
            key: WISHLIST_KEY.to_string(),
        }
    }

    /// A wishlist namespaced to one owner (`wishlist:<owner>`).
    pub fn for_owner(store: S, owner: &str) -> Self {
        Self {
            cache: Cache::new(store),
            key: cache_key!(WISHLIST_KEY, owner),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn items(&self) -> Result<Vec<ProductId>, CacheError> {
        Ok(self.cache.get(&self.key)?.unwrap_or_default())
    }

    pub fn contains(&self, id: &ProductId) -> Result<bool, CacheError> {
        Ok(self.items()?.contains(id))
    }

    /// Add an id. Returns `false` if it was already saved.
    pub fn add(&self, id: ProductId) -> Result<bool, CacheError> {
        let mut items = self.items()?;
        if items.contains(&id) {
            return Ok(false);
        }
        items.push(id);
        self.cache.set(&self.key, &items)?;
        Ok(true)
    }

    /// Remove an id. Returns `false` if it was not saved.
    pub fn remove(&self, id: &ProductId) -> Result<bool, CacheError> {
        let mut items = self.items()?;
        let before = items.len();
        items.retain(|item| item != id);
        if items.len() == before {
            return Ok(false);
        }
        self.cache.set(&self.key, &items)?;
        Ok(true)
    }

    /// Flip membership. Returns whether the id is saved afterwards.
    pub fn toggle(&self, id: ProductId) -> Result<bool, CacheError> {
        if self.remove(&id)? {
            tracing::debug!(product = %id, "removed from wishlist");
            Ok(false)
        } else {
            self.add(id)?;
            Ok(true)
        }
    }

    pub fn clear(&self) -> Result<(), CacheError> {
        self.cache.delete(&self.key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryStore;

    #[test]
    fn test_add_and_contains() {
        let wishlist = Wishlist::new(MemoryStore::new());
        assert!(wishlist.add(ProductId::new("p1")).unwrap());
        assert!(!wishlist.add(ProductId::new("p1")).unwrap());
        assert!(wishlist.contains(&ProductId::new("p1")).unwrap());
        assert_eq!(wishlist.items().unwrap().len(), 1);
    }

    #[test]
    fn test_toggle() {
        let wishlist = Wishlist::new(MemoryStore::new());
        assert!(wishlist.toggle(ProductId::new("p1")).unwrap());
        assert!(!wishlist.toggle(ProductId::new("p1")).unwrap());
        assert!(wishlist.items().unwrap().is_empty());
    }

    #[test]
    fn test_remove_missing() {
        let wishlist = Wishlist::new(MemoryStore::new());
        assert!(!wishlist.remove(&ProductId::new("ghost")).unwrap());
    }

    #[test]
    fn test_owners_are_isolated() {
        let store = MemoryStore::new();
        let alice = Wishlist::for_owner(&store, "alice");
        let bob = Wishlist::for_owner(&store, "bob");

        alice.add(ProductId::new("p1")).unwrap();
        assert_eq!(alice.key(), "wishlist:alice");
        assert!(bob.items().unwrap().is_empty());
    }

    #[test]
    fn test_clear() {
        let store = MemoryStore::new();
        let wishlist = Wishlist::new(&store);
        wishlist.add(ProductId::new("p1")).unwrap();
        wishlist.clear().unwrap();
        assert!(!store.exists(WISHLIST_KEY).unwrap());
    }
}
