//! Cylo Storefront library.
//!
//! The client-side core of the storefront: state containers for the
//! session, catalog filters, wishlist and cart, the route guard and route
//! table, and the navigation shell that projects state into header view
//! models. A rendering layer consumes these and draws the UI.
//!
//! # Modules
//!
//! - [`state`] - State containers and the [`state::Shared`] handle
//! - [`guard`] - Route guard for signed-in-only views
//! - [`routes`] - Route table and [`routes::Router`]
//! - [`header`] - Navigation shell
//! - [`app`] - [`app::Storefront`], the root composition
//! - [`persistence`] - Load/save hooks and storage adapters
//! - [`config`] - Environment configuration
//! - [`error`] - `AppError` and Sentry helpers

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod app;
pub mod config;
pub mod error;
pub mod guard;
pub mod header;
pub mod persistence;
pub mod routes;
pub mod state;

pub use app::Storefront;
pub use error::{AppError, Result};
