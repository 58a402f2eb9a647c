//! Guarded navigation.

#![allow(clippy::unwrap_used)]

use cylo_core::{Category, ProductId};
use cylo_integration_tests::shopper;
use cylo_storefront::Storefront;
use cylo_storefront::guard::{self, GuardOutcome};
use cylo_storefront::routes::{Outcome, View};
use cylo_storefront::state::SessionState;

#[test]
fn test_profile_redirects_until_signed_in() {
    let app = Storefront::default();

    let nav = app.navigate("/profile");
    assert_eq!(
        nav.outcome,
        Outcome::Redirected {
            from: "/profile".to_string(),
            to: "/login",
        }
    );
    assert_eq!(app.current_path(), "/login");
    assert!(!app.session().read(SessionState::is_authenticated));

    app.sign_in(shopper());
    let nav = app.navigate("/profile");
    assert_eq!(nav.view(), Some(View::Profile));
    assert_eq!(app.current_path(), "/profile");
}

#[test]
fn test_sign_out_closes_guarded_routes() {
    let app = Storefront::default();
    app.sign_in(shopper());
    assert_eq!(app.navigate("/wishlist").view(), Some(View::Wishlist));

    app.sign_out();

    assert!(app.navigate("/wishlist").is_redirect());
}

#[test]
fn test_public_routes_ignore_session() {
    let app = Storefront::default();

    assert_eq!(
        app.navigate("/women?sort=new").view(),
        Some(View::CategoryPage {
            category: Category::Women,
        })
    );
    assert_eq!(
        app.navigate("/product/linen-shirt").view(),
        Some(View::ProductDetail {
            id: ProductId::parse("linen-shirt").unwrap(),
        })
    );
    assert_eq!(app.navigate("/checkout").outcome, Outcome::NotFound);
}

#[test]
fn test_guard_wrapper_is_pure() {
    let anonymous = SessionState::default();
    let signed_in = SessionState::signed_in(shopper());

    assert_eq!(guard::guard(&anonymous, "secret"), GuardOutcome::Redirect("/login"));
    assert_eq!(guard::guard(&signed_in, "secret"), GuardOutcome::Authorized("secret"));
    assert!(!anonymous.is_authenticated());
}
