//! Catalog filter state.
//!
//! Holds the criteria the browse view passes to the catalog query
//! collaborator. Updates are merge-patches: a [`FilterPatch`] only replaces
//! the fields it carries, so submitting a search never drops a category the
//! shopper picked earlier.

use serde::{Deserialize, Serialize};

use cylo_core::Category;

/// Ordering applied to catalog results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    #[default]
    Featured,
    PriceAsc,
    PriceDesc,
    Newest,
}

impl SortOrder {
    /// Query-string form of the sort order.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Featured => "featured",
            Self::PriceAsc => "price_asc",
            Self::PriceDesc => "price_desc",
            Self::Newest => "newest",
        }
    }

    /// Parse the query-string form; unknown values yield `None`.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "featured" => Some(Self::Featured),
            "price_asc" => Some(Self::PriceAsc),
            "price_desc" => Some(Self::PriceDesc),
            "newest" => Some(Self::Newest),
            _ => None,
        }
    }
}

/// The active product query.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCriteria {
    /// Free-text search, passed through to the catalog untouched.
    pub search_query: String,
    /// Department facet.
    pub category: Option<Category>,
    /// Hide sold-out products.
    pub in_stock_only: bool,
    /// Lower price bound in cents.
    pub price_min_cents: Option<u64>,
    /// Upper price bound in cents.
    pub price_max_cents: Option<u64>,
    /// Result ordering.
    pub sort: SortOrder,
}

impl FilterCriteria {
    /// Merge a patch over these criteria, leaving absent fields untouched.
    pub fn apply(&mut self, patch: FilterPatch) {
        let FilterPatch {
            search_query,
            category,
            in_stock_only,
            price_min_cents,
            price_max_cents,
            sort,
        } = patch;

        if let Some(search_query) = search_query {
            self.search_query = search_query;
        }
        if let Some(category) = category {
            self.category = category;
        }
        if let Some(in_stock_only) = in_stock_only {
            self.in_stock_only = in_stock_only;
        }
        if let Some(price_min_cents) = price_min_cents {
            self.price_min_cents = price_min_cents;
        }
        if let Some(price_max_cents) = price_max_cents {
            self.price_max_cents = price_max_cents;
        }
        if let Some(sort) = sort {
            self.sort = sort;
        }
    }

    /// Whether any criterion differs from the defaults.
    #[must_use]
    pub fn is_active(&self) -> bool {
        *self != Self::default()
    }
}

/// A partial update to [`FilterCriteria`].
///
/// `None` leaves a field untouched. Optional facets are doubly wrapped so a
/// patch can clear them: `category: Some(None)` removes the category facet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterPatch {
    pub search_query: Option<String>,
    pub category: Option<Option<Category>>,
    pub in_stock_only: Option<bool>,
    pub price_min_cents: Option<Option<u64>>,
    pub price_max_cents: Option<Option<u64>>,
    pub sort: Option<SortOrder>,
}

impl FilterPatch {
    /// A patch that only sets the search query.
    #[must_use]
    pub fn search(query: impl Into<String>) -> Self {
        Self {
            search_query: Some(query.into()),
            ..Self::default()
        }
    }

    /// A patch that only sets (or clears) the category facet.
    #[must_use]
    pub fn category(category: Option<Category>) -> Self {
        Self {
            category: Some(category),
            ..Self::default()
        }
    }

    /// Set the in-stock flag on this patch.
    #[must_use]
    pub const fn with_in_stock_only(mut self, in_stock_only: bool) -> Self {
        self.in_stock_only = Some(in_stock_only);
        self
    }

    /// Set (or clear) both price bounds on this patch.
    #[must_use]
    pub const fn with_price_range(mut self, min_cents: Option<u64>, max_cents: Option<u64>) -> Self {
        self.price_min_cents = Some(min_cents);
        self.price_max_cents = Some(max_cents);
        self
    }

    /// Set the sort order on this patch.
    #[must_use]
    pub const fn with_sort(mut self, sort: SortOrder) -> Self {
        self.sort = Some(sort);
        self
    }

    /// Whether the patch would change nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Catalog filter container.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    criteria: FilterCriteria,
}

impl FilterState {
    /// Current criteria, by value.
    #[must_use]
    pub fn read(&self) -> FilterCriteria {
        self.criteria.clone()
    }

    /// Current criteria, borrowed.
    #[must_use]
    pub const fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    /// Merge-patch the criteria.
    pub fn patch(&mut self, patch: FilterPatch) {
        self.criteria.apply(patch);
    }

    /// Restore every criterion to its default.
    pub fn reset(&mut self) {
        self.criteria = FilterCriteria::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_patch_keeps_category() {
        let mut state = FilterState::default();
        state.patch(FilterPatch::category(Some(Category::Women)));

        state.patch(FilterPatch::search("blue coat"));

        let criteria = state.read();
        assert_eq!(criteria.category, Some(Category::Women));
        assert_eq!(criteria.search_query, "blue coat");
    }

    #[test]
    fn test_category_patch_keeps_query() {
        let mut state = FilterState::default();
        state.patch(FilterPatch::search("linen"));
        state.patch(FilterPatch::category(Some(Category::Men)));

        assert_eq!(state.criteria().search_query, "linen");
        assert_eq!(state.criteria().category, Some(Category::Men));
    }

    #[test]
    fn test_patch_can_clear_optional_facet() {
        let mut state = FilterState::default();
        state.patch(FilterPatch::category(Some(Category::Men)).with_price_range(Some(1_000), None));

        state.patch(FilterPatch::category(None));

        assert_eq!(state.criteria().category, None);
        assert_eq!(state.criteria().price_min_cents, Some(1_000));
    }

    #[test]
    fn test_empty_patch_is_noop() {
        let mut state = FilterState::default();
        state.patch(FilterPatch::search("wool").with_sort(SortOrder::Newest));
        let before = state.read();

        let patch = FilterPatch::default();
        assert!(patch.is_empty());
        state.patch(patch);

        assert_eq!(state.read(), before);
    }

    #[test]
    fn test_empty_search_replaces_previous_query() {
        let mut state = FilterState::default();
        state.patch(FilterPatch::search("red dress"));
        state.patch(FilterPatch::search(""));

        assert_eq!(state.criteria().search_query, "");
        assert!(!state.criteria().is_active());
    }

    #[test]
    fn test_reset() {
        let mut state = FilterState::default();
        state.patch(FilterPatch::search("scarf").with_in_stock_only(true));
        assert!(state.criteria().is_active());

        state.reset();
        assert_eq!(state.read(), FilterCriteria::default());
    }

    #[test]
    fn test_sort_order_parse() {
        for sort in [
            SortOrder::Featured,
            SortOrder::PriceAsc,
            SortOrder::PriceDesc,
            SortOrder::Newest,
        ] {
            assert_eq!(SortOrder::parse(sort.as_str()), Some(sort));
        }
        assert_eq!(SortOrder::parse("relevance"), None);
    }
}
