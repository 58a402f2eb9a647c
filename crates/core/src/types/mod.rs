//! Core types for Cylo.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod category;
pub mod email;
pub mod id;
pub mod product;
pub mod quantity;

pub use category::{Category, CategoryError};
pub use email::{Email, EmailError};
pub use id::*;
pub use product::{ProductId, ProductIdError};
pub use quantity::{Quantity, QuantityError};
