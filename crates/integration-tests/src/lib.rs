//! Integration tests for Cylo.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p cylo-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart` - Line item merging and removal
//! - `wishlist` - Set semantics
//! - `filters` - Merge-patch behaviour
//! - `guard` - Guarded navigation and redirects
//! - `header` - Badges, search submission and active links
//! - `persistence` - Save/load through the JSON file store
//!
//! The fixtures below panic on invalid input; they are only ever called
//! with literals.

#![allow(clippy::unwrap_used, clippy::missing_panics_doc)]

use cylo_core::{Email, ProductId, Quantity, UserId};
use cylo_storefront::state::Identity;

/// A product ID from a literal.
#[must_use]
pub fn product(id: &str) -> ProductId {
    ProductId::parse(id).unwrap()
}

/// A quantity from a literal.
#[must_use]
pub fn qty(n: u32) -> Quantity {
    Quantity::new(n).unwrap()
}

/// A verified shopper identity.
#[must_use]
pub fn shopper() -> Identity {
    Identity::new(UserId::new(7), Email::parse("shopper@cylo.example").unwrap())
}
