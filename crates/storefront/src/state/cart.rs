//! Cart state: ordered line items, one per product.
//!
//! # Invariants
//!
//! - A product appears in at most one line; adding it again increments that
//!   line's quantity.
//! - Every line holds at least one unit ([`Quantity`] cannot be zero); taking
//!   the last unit away removes the line.
//! - Lines keep the order in which their product was first added.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use cylo_core::{ProductId, Quantity, QuantityError};

/// Errors from cart operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CartError {
    /// The requested quantity is not a valid line quantity.
    #[error("invalid quantity: {0}")]
    InvalidQuantity(#[from] QuantityError),

    /// Adding would push a line past [`Quantity::MAX`].
    #[error("cannot add {requested} of {product_id}: line already holds {current} (max {max})", max = Quantity::MAX)]
    QuantityOverflow {
        product_id: ProductId,
        current: Quantity,
        requested: Quantity,
    },

    /// The product has no line in the cart.
    #[error("product {0} is not in the cart")]
    NotInCart(ProductId),
}

/// One distinct product's presence in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLineItem {
    pub product_id: ProductId,
    pub quantity: Quantity,
}

/// The shopper's cart.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<CartLineItem>", into = "Vec<CartLineItem>")]
pub struct Cart {
    lines: Vec<CartLineItem>,
}

impl Cart {
    /// Add units of a product.
    ///
    /// Returns the line's quantity after the add.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::QuantityOverflow`] if the line would exceed
    /// [`Quantity::MAX`]; the cart is left unchanged.
    pub fn add(&mut self, product_id: ProductId, quantity: Quantity) -> Result<Quantity, CartError> {
        if let Some(line) = self.line_mut(&product_id) {
            let total = line
                .quantity
                .checked_add(quantity)
                .map_err(|_| CartError::QuantityOverflow {
                    product_id: product_id.clone(),
                    current: line.quantity,
                    requested: quantity,
                })?;
            line.quantity = total;
            return Ok(total);
        }

        self.lines.push(CartLineItem {
            product_id,
            quantity,
        });
        Ok(quantity)
    }

    /// Remove a product's line entirely, returning it.
    pub fn remove(&mut self, product_id: &ProductId) -> Option<CartLineItem> {
        let index = self.position(product_id)?;
        Some(self.lines.remove(index))
    }

    /// Take `units` away from a line.
    ///
    /// Returns the remaining quantity, or `None` when the line was removed
    /// because nothing was left.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::NotInCart`] if the product has no line.
    pub fn remove_units(
        &mut self,
        product_id: &ProductId,
        units: u32,
    ) -> Result<Option<Quantity>, CartError> {
        let index = self
            .position(product_id)
            .ok_or_else(|| CartError::NotInCart(product_id.clone()))?;
        let Some(line) = self.lines.get_mut(index) else {
            return Err(CartError::NotInCart(product_id.clone()));
        };

        match line.quantity.saturating_sub(units) {
            Some(remaining) => {
                line.quantity = remaining;
                Ok(Some(remaining))
            }
            None => {
                self.lines.remove(index);
                Ok(None)
            }
        }
    }

    /// Set a line to an exact quantity; zero removes the line.
    ///
    /// Returns the new quantity, or `None` if the line was removed.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::NotInCart`] if the product has no line, or
    /// [`CartError::InvalidQuantity`] above [`Quantity::MAX`].
    pub fn update_quantity(
        &mut self,
        product_id: &ProductId,
        quantity: u32,
    ) -> Result<Option<Quantity>, CartError> {
        if self.position(product_id).is_none() {
            return Err(CartError::NotInCart(product_id.clone()));
        }

        if quantity == 0 {
            self.remove(product_id);
            return Ok(None);
        }

        let quantity = Quantity::new(quantity)?;
        if let Some(line) = self.line_mut(product_id) {
            line.quantity = quantity;
        }
        Ok(Some(quantity))
    }

    /// Quantity of a product, if it is in the cart.
    #[must_use]
    pub fn get(&self, product_id: &ProductId) -> Option<Quantity> {
        self.lines
            .iter()
            .find(|line| &line.product_id == product_id)
            .map(|line| line.quantity)
    }

    /// Line items in insertion order.
    #[must_use]
    pub fn items(&self) -> &[CartLineItem] {
        &self.lines
    }

    /// Sum of quantities across all lines.
    #[must_use]
    pub fn total_quantity(&self) -> u32 {
        let total: u64 = self
            .lines
            .iter()
            .map(|line| u64::from(line.quantity.get()))
            .sum();
        u32::try_from(total).unwrap_or(u32::MAX)
    }

    /// Number of distinct products.
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Remove every line.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    fn position(&self, product_id: &ProductId) -> Option<usize> {
        self.lines
            .iter()
            .position(|line| &line.product_id == product_id)
    }

    fn line_mut(&mut self, product_id: &ProductId) -> Option<&mut CartLineItem> {
        self.lines
            .iter_mut()
            .find(|line| &line.product_id == product_id)
    }
}

impl TryFrom<Vec<CartLineItem>> for Cart {
    type Error = CartError;

    /// Rebuild a cart from stored lines, merging any duplicate products.
    fn try_from(lines: Vec<CartLineItem>) -> Result<Self, Self::Error> {
        let mut cart = Self::default();
        for line in lines {
            cart.add(line.product_id, line.quantity)?;
        }
        Ok(cart)
    }
}

impl From<Cart> for Vec<CartLineItem> {
    fn from(cart: Cart) -> Self {
        cart.lines
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn id(s: &str) -> ProductId {
        ProductId::parse(s).unwrap()
    }

    fn qty(n: u32) -> Quantity {
        Quantity::new(n).unwrap()
    }

    #[test]
    fn test_repeated_add_increments_single_line() {
        let mut cart = Cart::default();
        for n in [1, 2, 3] {
            cart.add(id("coat"), qty(n)).unwrap();
        }

        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.get(&id("coat")), Some(qty(6)));
    }

    #[test]
    fn test_lines_keep_insertion_order() {
        let mut cart = Cart::default();
        cart.add(id("b"), qty(1)).unwrap();
        cart.add(id("a"), qty(1)).unwrap();
        cart.add(id("b"), qty(1)).unwrap();

        let order: Vec<&str> = cart.items().iter().map(|l| l.product_id.as_str()).collect();
        assert_eq!(order, ["b", "a"]);
    }

    #[test]
    fn test_overflow_leaves_cart_unchanged() {
        let mut cart = Cart::default();
        cart.add(id("sock"), qty(Quantity::MAX)).unwrap();

        let err = cart.add(id("sock"), qty(1)).unwrap_err();
        assert!(matches!(err, CartError::QuantityOverflow { .. }));
        assert_eq!(cart.get(&id("sock")), Some(qty(Quantity::MAX)));
    }

    #[test]
    fn test_remove_units_to_zero_removes_line() {
        let mut cart = Cart::default();
        cart.add(id("hat"), qty(2)).unwrap();
        cart.add(id("scarf"), qty(1)).unwrap();

        assert_eq!(cart.remove_units(&id("hat"), 1).unwrap(), Some(qty(1)));
        assert_eq!(cart.remove_units(&id("hat"), 1).unwrap(), None);

        assert_eq!(cart.line_count(), 1);
        assert!(cart.get(&id("hat")).is_none());
    }

    #[test]
    fn test_remove_units_missing_product() {
        let mut cart = Cart::default();
        assert_eq!(
            cart.remove_units(&id("ghost"), 1),
            Err(CartError::NotInCart(id("ghost")))
        );
    }

    #[test]
    fn test_update_quantity() {
        let mut cart = Cart::default();
        cart.add(id("belt"), qty(1)).unwrap();

        assert_eq!(cart.update_quantity(&id("belt"), 4).unwrap(), Some(qty(4)));
        assert_eq!(cart.total_quantity(), 4);

        assert!(matches!(
            cart.update_quantity(&id("belt"), Quantity::MAX + 1),
            Err(CartError::InvalidQuantity(_))
        ));
        assert_eq!(cart.get(&id("belt")), Some(qty(4)));

        assert_eq!(cart.update_quantity(&id("belt"), 0).unwrap(), None);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_update_quantity_missing_product() {
        let mut cart = Cart::default();
        assert!(matches!(
            cart.update_quantity(&id("belt"), 2),
            Err(CartError::NotInCart(_))
        ));
    }

    #[test]
    fn test_remove_returns_line() {
        let mut cart = Cart::default();
        cart.add(id("tee"), qty(3)).unwrap();

        let line = cart.remove(&id("tee")).unwrap();
        assert_eq!(line.quantity, qty(3));
        assert!(cart.remove(&id("tee")).is_none());
    }

    #[test]
    fn test_total_quantity() {
        let mut cart = Cart::default();
        assert_eq!(cart.total_quantity(), 0);
        cart.add(id("a"), qty(2)).unwrap();
        cart.add(id("b"), qty(5)).unwrap();
        assert_eq!(cart.total_quantity(), 7);

        cart.clear();
        assert_eq!(cart.total_quantity(), 0);
    }

    #[test]
    fn test_deserialize_merges_duplicates() {
        let json = r#"[
            {"product_id": "a", "quantity": 1},
            {"product_id": "a", "quantity": 2}
        ]"#;
        let cart: Cart = serde_json::from_str(json).unwrap();
        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.get(&id("a")), Some(qty(3)));
    }

    #[test]
    fn test_deserialize_rejects_zero_quantity() {
        let json = r#"[{"product_id": "a", "quantity": 0}]"#;
        assert!(serde_json::from_str::<Cart>(json).is_err());
    }
}
