//! Catalog filter merge-patch.

use cylo_core::Category;
use cylo_storefront::Storefront;
use cylo_storefront::state::{FilterCriteria, FilterPatch, FilterState, SortOrder};

#[test]
fn test_search_patch_leaves_category() {
    let app = Storefront::default();
    app.patch_filters(FilterPatch::category(Some(Category::Women)));

    app.patch_filters(FilterPatch::search("blue coat"));

    let criteria = app.filters().read(FilterState::read);
    assert_eq!(
        criteria,
        FilterCriteria {
            search_query: "blue coat".to_string(),
            category: Some(Category::Women),
            ..FilterCriteria::default()
        }
    );
}

#[test]
fn test_patch_can_clear_optional_facet() {
    let app = Storefront::default();
    app.patch_filters(
        FilterPatch::category(Some(Category::Men)).with_sort(SortOrder::PriceAsc),
    );

    app.patch_filters(FilterPatch::category(None));

    let criteria = app.filters().read(FilterState::read);
    assert_eq!(criteria.category, None);
    assert_eq!(criteria.sort, SortOrder::PriceAsc);
}

#[test]
fn test_empty_patch_changes_nothing() {
    let app = Storefront::default();
    app.patch_filters(FilterPatch::search("linen"));
    let before = app.filters().read(FilterState::read);

    app.patch_filters(FilterPatch::default());

    assert_eq!(app.filters().read(FilterState::read), before);
}
