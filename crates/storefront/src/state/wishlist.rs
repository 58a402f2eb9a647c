//! Wishlist state: the set of products a shopper saved.

use serde::{Deserialize, Serialize};

use cylo_core::ProductId;

/// Saved products, unique, in the order they were first added.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<ProductId>", into = "Vec<ProductId>")]
pub struct Wishlist {
    items: Vec<ProductId>,
}

impl Wishlist {
    /// Save a product. Returns `false` if it was already saved.
    pub fn add(&mut self, product_id: ProductId) -> bool {
        if self.contains(&product_id) {
            return false;
        }
        self.items.push(product_id);
        true
    }

    /// Remove a product. Returns `false` if it was not saved.
    pub fn remove(&mut self, product_id: &ProductId) -> bool {
        let before = self.items.len();
        self.items.retain(|id| id != product_id);
        self.items.len() != before
    }

    /// Add the product if absent, remove it if present.
    ///
    /// Returns whether the product is saved afterwards.
    pub fn toggle(&mut self, product_id: ProductId) -> bool {
        if self.remove(&product_id) {
            false
        } else {
            self.items.push(product_id);
            true
        }
    }

    /// Whether the product is saved.
    #[must_use]
    pub fn contains(&self, product_id: &ProductId) -> bool {
        self.items.contains(product_id)
    }

    /// Saved products in display order.
    #[must_use]
    pub fn items(&self) -> &[ProductId] {
        &self.items
    }

    /// Number of saved products.
    #[must_use]
    pub fn count(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Remove every saved product.
    pub fn clear(&mut self) {
        self.items.clear();
    }
}

impl From<Vec<ProductId>> for Wishlist {
    fn from(ids: Vec<ProductId>) -> Self {
        let mut wishlist = Self::default();
        for id in ids {
            wishlist.add(id);
        }
        wishlist
    }
}

impl From<Wishlist> for Vec<ProductId> {
    fn from(wishlist: Wishlist) -> Self {
        wishlist.items
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn id(s: &str) -> ProductId {
        ProductId::parse(s).unwrap()
    }

    #[test]
    fn test_add_is_idempotent() {
        let mut once = Wishlist::default();
        once.add(id("p1"));

        let mut twice = Wishlist::default();
        assert!(twice.add(id("p1")));
        assert!(!twice.add(id("p1")));

        assert_eq!(once, twice);
        assert_eq!(twice.count(), 1);
    }

    #[test]
    fn test_preserves_insertion_order() {
        let mut wishlist = Wishlist::default();
        for s in ["c", "a", "b", "a"] {
            wishlist.add(id(s));
        }
        let order: Vec<&str> = wishlist.items().iter().map(ProductId::as_str).collect();
        assert_eq!(order, ["c", "a", "b"]);
    }

    #[test]
    fn test_remove() {
        let mut wishlist = Wishlist::default();
        wishlist.add(id("p1"));

        assert!(wishlist.remove(&id("p1")));
        assert!(!wishlist.remove(&id("p1")));
        assert!(wishlist.is_empty());
    }

    #[test]
    fn test_toggle() {
        let mut wishlist = Wishlist::default();
        assert!(wishlist.toggle(id("p1")));
        assert!(wishlist.contains(&id("p1")));
        assert!(!wishlist.toggle(id("p1")));
        assert!(!wishlist.contains(&id("p1")));
    }

    #[test]
    fn test_deserialize_drops_duplicates() {
        let wishlist: Wishlist = serde_json::from_str(r#"["a","b","a"]"#).unwrap();
        assert_eq!(wishlist.count(), 2);
    }
}
