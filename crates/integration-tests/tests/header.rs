//! Navigation shell projections and search submission.

#![allow(clippy::unwrap_used)]

use cylo_core::Category;
use cylo_integration_tests::{product, qty, shopper};
use cylo_storefront::Storefront;
use cylo_storefront::header::{self, Header};
use cylo_storefront::state::{FilterPatch, FilterState};

#[test]
fn test_search_submission_lands_on_shop() {
    let app = Storefront::default();
    app.navigate("/about");
    let mut header = Header::default();

    header.open_search();
    header.set_search_input("red dress");
    header.submit_search(&app);

    assert_eq!(app.filters().read(FilterState::read).search_query, "red dress");
    assert_eq!(app.current_path(), "/shop");
    assert!(!header.is_search_open());
    assert_eq!(header.search_input(), "");
}

#[test]
fn test_search_keeps_other_filters() {
    let app = Storefront::default();
    let mut header = Header::default();
    header.follow_link(&app, "/women");
    app.patch_filters(FilterPatch::category(Some(Category::Women)));

    header.set_search_input("linen");
    header.submit_search(&app);

    let criteria = app.filters().read(FilterState::read);
    assert_eq!(criteria.category, Some(Category::Women));
    assert_eq!(criteria.search_query, "linen");
}

#[test]
fn test_cart_badge_appears_with_items() {
    let app = Storefront::default();
    let header = Header::default();
    assert_eq!(header.render(&app).cart_badge, None);

    app.add_to_cart(product("coat"), qty(2)).unwrap();
    app.add_to_cart(product("hat"), qty(1)).unwrap();
    assert_eq!(header.render(&app).cart_badge, Some(3));

    app.remove_from_cart(&product("coat"));
    app.remove_from_cart(&product("hat"));
    assert_eq!(header.render(&app).cart_badge, None);
}

#[test]
fn test_badges_are_pure_projections() {
    let app = Storefront::default();
    app.add_to_wishlist(product("scarf"));
    app.add_to_wishlist(product("scarf"));

    let count = app.wishlist().read(header::wishlist_count);
    assert_eq!(count, 1);
    assert_eq!(app.wishlist().read(header::wishlist_count), count);
}

#[test]
fn test_active_link_and_account_target() {
    let app = Storefront::default();
    let header = Header::default();

    app.navigate("/men");
    let view = header.render(&app);
    let active: Vec<&str> = view.nav.iter().filter(|l| l.active).map(|l| l.path).collect();
    assert_eq!(active, ["/men"]);
    assert_eq!(view.account_path, "/login");

    app.navigate("/product/men-coat");
    assert!(header.render(&app).nav.iter().all(|l| !l.active));

    app.sign_in(shopper());
    assert_eq!(header.render(&app).account_path, "/profile");
}
