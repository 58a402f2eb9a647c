//! Cylo Core - Shared domain types.
//!
//! This crate provides the value types used across all Cylo components:
//! - `storefront` - Client-side state containers, route guard and navigation shell
//! - `cli` - Command-line driver for scripted storefront sessions
//!
//! # Architecture
//!
//! The core crate contains only types and their validation rules - no I/O,
//! no shared state, no logging. Every constructor that accepts untrusted
//! input returns a `Result`, so an invalid product ID or quantity can never
//! reach a cart or wishlist.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for IDs, quantities, emails, and categories

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
