//! Root composition of the storefront state.

use tracing::instrument;

use cylo_core::{ProductId, Quantity};

use crate::config::StorefrontConfig;
use crate::error::{self, Result};
use crate::persistence::{Snapshot, StateStore};
use crate::routes::{Navigation, Router};
use crate::state::{Cart, FilterPatch, FilterState, Identity, SessionState, Shared, Wishlist};

/// Application state shared across every view.
///
/// Owns one [`Shared`] handle per state container. Cloning a `Storefront`
/// is cheap and shares all containers, so a view holding a clone always
/// reads the latest committed state.
#[derive(Clone, Debug, Default)]
pub struct Storefront {
    session: Shared<SessionState>,
    filters: Shared<FilterState>,
    wishlist: Shared<Wishlist>,
    cart: Shared<Cart>,
    router: Shared<Router>,
}

impl Storefront {
    /// Create empty state with the router at `start_path`.
    #[must_use]
    pub fn new(start_path: &str) -> Self {
        Self {
            router: Shared::new(Router::new(start_path)),
            ..Self::default()
        }
    }

    /// Create empty state from configuration.
    #[must_use]
    pub fn from_config(config: &StorefrontConfig) -> Self {
        Self::new(&config.start_path)
    }

    /// Session state handle.
    #[must_use]
    pub const fn session(&self) -> &Shared<SessionState> {
        &self.session
    }

    /// Catalog filter state handle.
    #[must_use]
    pub const fn filters(&self) -> &Shared<FilterState> {
        &self.filters
    }

    /// Wishlist state handle.
    #[must_use]
    pub const fn wishlist(&self) -> &Shared<Wishlist> {
        &self.wishlist
    }

    /// Cart state handle.
    #[must_use]
    pub const fn cart(&self) -> &Shared<Cart> {
        &self.cart
    }

    /// Router handle.
    #[must_use]
    pub const fn router(&self) -> &Shared<Router> {
        &self.router
    }

    // =========================================================================
    // Session
    // =========================================================================

    /// Record a shopper the authentication collaborator has verified.
    pub fn sign_in(&self, identity: Identity) {
        error::set_sentry_user(&identity.id, Some(identity.email.as_str()));
        tracing::info!(user_id = %identity.id, "Shopper signed in");
        self.session.update(|session| session.sign_in(identity));
    }

    /// Clear the session, returning the identity that was signed in.
    pub fn sign_out(&self) -> Option<Identity> {
        let identity = self.session.update(SessionState::sign_out);
        if let Some(identity) = &identity {
            error::clear_sentry_user();
            tracing::info!(user_id = %identity.id, "Shopper signed out");
        }
        identity
    }

    // =========================================================================
    // Navigation
    // =========================================================================

    /// Navigate to `path`, consulting the route guard.
    pub fn navigate(&self, path: &str) -> Navigation {
        let navigation = self
            .session
            .read(|session| self.router.update(|router| router.navigate(path, session)));
        error::add_breadcrumb(
            "navigation",
            &navigation.location,
            Some(&[("requested", navigation.requested.as_str())][..]),
        );
        navigation
    }

    /// Go back one history entry.
    pub fn back(&self) -> Option<Navigation> {
        self.session
            .read(|session| self.router.update(|router| router.back(session)))
    }

    /// Re-resolve the current location against the current session.
    pub fn refresh(&self) -> Navigation {
        self.session
            .read(|session| self.router.update(|router| router.resolve_current(session)))
    }

    /// Current pathname.
    #[must_use]
    pub fn current_path(&self) -> String {
        self.router.read(|router| router.location().to_string())
    }

    // =========================================================================
    // Catalog, cart and wishlist
    // =========================================================================

    /// Merge-patch the catalog filters.
    pub fn patch_filters(&self, patch: FilterPatch) {
        tracing::debug!(?patch, "Patching catalog filters");
        self.filters.update(|filters| filters.patch(patch));
    }

    /// Add units of a product to the cart.
    ///
    /// # Errors
    ///
    /// Returns an error if the line would exceed the maximum quantity.
    #[instrument(skip(self, product_id), fields(product_id = %product_id))]
    pub fn add_to_cart(&self, product_id: ProductId, quantity: Quantity) -> Result<Quantity> {
        let total = self.cart.update(|cart| cart.add(product_id, quantity))?;
        tracing::info!(%total, "Added to cart");
        Ok(total)
    }

    /// Remove a product's line from the cart. Returns whether it was there.
    pub fn remove_from_cart(&self, product_id: &ProductId) -> bool {
        let removed = self.cart.update(|cart| cart.remove(product_id)).is_some();
        tracing::info!(%product_id, removed, "Removed from cart");
        removed
    }

    /// Set a cart line's quantity; zero removes the line.
    ///
    /// # Errors
    ///
    /// Returns an error if the product is not in the cart or the quantity is
    /// out of range.
    pub fn set_cart_quantity(
        &self,
        product_id: &ProductId,
        quantity: u32,
    ) -> Result<Option<Quantity>> {
        let updated = self
            .cart
            .update(|cart| cart.update_quantity(product_id, quantity))?;
        tracing::info!(%product_id, quantity, "Updated cart quantity");
        Ok(updated)
    }

    /// Save a product to the wishlist. Returns `false` if it was already saved.
    pub fn add_to_wishlist(&self, product_id: ProductId) -> bool {
        tracing::info!(%product_id, "Saving to wishlist");
        self.wishlist.update(|wishlist| wishlist.add(product_id))
    }

    /// Remove a product from the wishlist. Returns whether it was saved.
    pub fn remove_from_wishlist(&self, product_id: &ProductId) -> bool {
        tracing::info!(%product_id, "Removing from wishlist");
        self.wishlist.update(|wishlist| wishlist.remove(product_id))
    }

    // =========================================================================
    // Persistence hooks
    // =========================================================================

    /// Capture the state a persistence collaborator should keep.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            identity: self.session.read(|s| s.current().cloned()),
            cart: self.cart.get(),
            wishlist: self.wishlist.get(),
        }
    }

    /// Replace cart, wishlist and session with a snapshot.
    pub fn restore(&self, snapshot: Snapshot) {
        let Snapshot {
            identity,
            cart,
            wishlist,
        } = snapshot;

        self.cart.replace(cart);
        self.wishlist.replace(wishlist);
        match identity {
            Some(identity) => self.sign_in(identity),
            None => {
                self.sign_out();
            }
        }
    }

    /// Load state from a store. Returns whether anything was loaded.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read or holds invalid data.
    pub fn load_from(&self, store: &dyn StateStore) -> Result<bool> {
        let Some(snapshot) = store.load()? else {
            tracing::debug!("No saved storefront state");
            return Ok(false);
        };
        tracing::info!(
            cart_lines = snapshot.cart.line_count(),
            wishlist_items = snapshot.wishlist.count(),
            "Restored storefront state"
        );
        self.restore(snapshot);
        Ok(true)
    }

    /// Save state to a store.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be written.
    pub fn save_to(&self, store: &dyn StateStore) -> Result<()> {
        store.save(&self.snapshot())?;
        tracing::debug!("Saved storefront state");
        Ok(())
    }
}
