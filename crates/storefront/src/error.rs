//! Unified error handling with Sentry integration.
//!
//! Provides the crate-level `AppError`. Guarded navigation without an
//! identity is a redirect, not an error, and never surfaces here.

use thiserror::Error;

use cylo_core::{CategoryError, EmailError, ProductIdError, QuantityError};

use crate::config::ConfigError;
use crate::persistence::StoreError;
use crate::state::CartError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// A product ID failed validation.
    #[error("Invalid product id: {0}")]
    InvalidProductId(#[from] ProductIdError),

    /// A quantity failed validation.
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(#[from] QuantityError),

    /// An email address failed validation.
    #[error("Invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    /// A category name was not recognised.
    #[error("Invalid category: {0}")]
    InvalidCategory(#[from] CategoryError),

    /// A cart operation was rejected.
    #[error("Cart error: {0}")]
    Cart(#[from] CartError),

    /// The persistence collaborator failed.
    #[error("Storage error: {0}")]
    Store(#[from] StoreError),

    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl AppError {
    /// Whether the error comes from shopper input rather than the system.
    #[must_use]
    pub const fn is_user_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidProductId(_)
                | Self::InvalidQuantity(_)
                | Self::InvalidEmail(_)
                | Self::InvalidCategory(_)
                | Self::Cart(_)
        )
    }

    /// Log the error, capturing system errors to Sentry.
    pub fn report(&self) {
        if self.is_user_error() {
            tracing::warn!(error = %self, "Rejected input");
            return;
        }

        let event_id = sentry::capture_error(self);
        tracing::error!(
            error = %self,
            sentry_event_id = %event_id,
            "Storefront error"
        );
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Set the Sentry user context from a user ID.
///
/// Call this after successful authentication to associate errors with users.
pub fn set_sentry_user(user_id: &impl ToString, email: Option<&str>) {
    sentry::configure_scope(|scope| {
        scope.set_user(Some(sentry::User {
            id: Some(user_id.to_string()),
            email: email.map(String::from),
            ..Default::default()
        }));
    });
}

/// Clear the Sentry user context.
///
/// Call this on logout to stop associating errors with the user.
pub fn clear_sentry_user() {
    sentry::configure_scope(|scope| {
        scope.set_user(None);
    });
}

/// Add a breadcrumb for user actions.
///
/// Breadcrumbs appear in Sentry error reports to show the trail of user actions
/// leading up to an error.
///
/// # Example
///
/// ```rust,ignore
/// add_breadcrumb("navigation", "/product/42", Some(&[("requested", "/product/42")]));
/// ```
pub fn add_breadcrumb(category: &str, message: &str, data: Option<&[(&str, &str)]>) {
    let mut breadcrumb = sentry::Breadcrumb {
        category: Some(category.to_string()),
        message: Some(message.to_string()),
        level: sentry::Level::Info,
        ..Default::default()
    };

    if let Some(pairs) = data {
        for (key, value) in pairs {
            breadcrumb.data.insert(
                (*key).to_string(),
                serde_json::Value::String((*value).to_string()),
            );
        }
    }

    sentry::add_breadcrumb(breadcrumb);
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use cylo_core::{ProductId, Quantity};

    use super::*;

    #[test]
    fn test_app_error_display() {
        let err = AppError::from(ProductId::parse("").unwrap_err());
        assert_eq!(err.to_string(), "Invalid product id: product id cannot be empty");

        let err = AppError::from(Quantity::new(0).unwrap_err());
        assert_eq!(err.to_string(), "Invalid quantity: quantity must be at least 1");
    }

    #[test]
    fn test_user_errors_are_classified() {
        let cart = AppError::from(CartError::NotInCart(ProductId::parse("x").unwrap()));
        assert!(cart.is_user_error());

        let config = AppError::from(ConfigError::InvalidEnvVar(
            "CYLO_START_PATH".to_string(),
            "unknown route".to_string(),
        ));
        assert!(!config.is_user_error());
    }

    #[test]
    fn test_report_without_sentry_client_is_noop() {
        AppError::from(ConfigError::InvalidEnvVar("X".to_string(), "y".to_string())).report();
        add_breadcrumb("test", "message", Some(&[("k", "v")][..]));
        set_sentry_user(&1, None);
        clear_sentry_user();
    }
}
