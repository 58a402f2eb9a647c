//! Navigation shell: the site header.
//!
//! Reads cart, wishlist and session state to produce badge counts and links,
//! and turns search submissions into a filter patch plus a navigation to
//! the catalog. Rendering is left to the presentation layer, which consumes
//! a [`HeaderView`].

use tracing::instrument;

use crate::app::Storefront;
use crate::guard::LOGIN_PATH;
use crate::routes::Navigation;
use crate::state::{Cart, FilterPatch, SessionState, Wishlist};

/// A static navigation link.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavItem {
    pub label: &'static str,
    pub path: &'static str,
}

/// Primary navigation.
pub const NAV_ITEMS: [NavItem; 3] = [
    NavItem {
        label: "Women",
        path: "/women",
    },
    NavItem {
        label: "Men",
        path: "/men",
    },
    NavItem {
        label: "Style Advisor",
        path: "/style-advisor",
    },
];

/// Brand link in the header centre.
pub const BRAND: NavItem = NavItem {
    label: "CYLO",
    path: "/",
};

/// Catalog browse path, where search submissions land.
pub const SHOP_PATH: &str = "/shop";

/// Profile path for signed-in shoppers.
pub const PROFILE_PATH: &str = "/profile";

/// Search input placeholder.
pub const SEARCH_PLACEHOLDER: &str = "Search by name, color, or category...";

/// Badge count for the cart icon: the sum of all line quantities.
#[must_use]
pub fn cart_count(cart: &Cart) -> u32 {
    cart.total_quantity()
}

/// Badge count for the wishlist icon: the number of saved products.
#[must_use]
pub fn wishlist_count(wishlist: &Wishlist) -> u32 {
    u32::try_from(wishlist.count()).unwrap_or(u32::MAX)
}

/// A badge shows only for non-zero counts.
#[must_use]
pub const fn badge(count: u32) -> Option<u32> {
    if count == 0 { None } else { Some(count) }
}

/// A nav item is active iff its path equals the current path exactly.
#[must_use]
pub fn is_active(item: &NavItem, current_path: &str) -> bool {
    item.path == current_path
}

/// Where the account icon leads.
#[must_use]
pub const fn account_path(session: &SessionState) -> &'static str {
    if session.is_authenticated() {
        PROFILE_PATH
    } else {
        LOGIN_PATH
    }
}

/// Secondary links shown in the mobile menu.
#[must_use]
pub const fn menu_links(session: &SessionState) -> [NavItem; 3] {
    [
        NavItem {
            label: "All Products",
            path: SHOP_PATH,
        },
        NavItem {
            label: "Wishlist",
            path: "/wishlist",
        },
        NavItem {
            label: "Account",
            path: account_path(session),
        },
    ]
}

/// One rendered link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavLinkView {
    pub label: &'static str,
    pub path: &'static str,
    pub active: bool,
}

/// Everything the presentation layer needs to draw the header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderView {
    pub brand: NavItem,
    pub nav: Vec<NavLinkView>,
    pub menu_links: Vec<NavItem>,
    pub cart_badge: Option<u32>,
    pub wishlist_badge: Option<u32>,
    pub account_path: &'static str,
    pub menu_open: bool,
    pub search_open: bool,
    pub search_input: String,
    pub search_placeholder: &'static str,
}

/// Header-local UI state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Header {
    menu_open: bool,
    search_open: bool,
    search_input: String,
}

impl Header {
    #[must_use]
    pub const fn is_menu_open(&self) -> bool {
        self.menu_open
    }

    #[must_use]
    pub const fn is_search_open(&self) -> bool {
        self.search_open
    }

    /// Text currently typed into the search box.
    #[must_use]
    pub fn search_input(&self) -> &str {
        &self.search_input
    }

    pub const fn toggle_menu(&mut self) {
        self.menu_open = !self.menu_open;
    }

    pub const fn close_menu(&mut self) {
        self.menu_open = false;
    }

    pub const fn open_search(&mut self) {
        self.search_open = true;
    }

    /// Close the search overlay. The typed text is kept.
    pub const fn close_search(&mut self) {
        self.search_open = false;
    }

    pub fn set_search_input(&mut self, text: impl Into<String>) {
        self.search_input = text.into();
    }

    /// Follow a header link, closing the mobile menu.
    pub fn follow_link(&mut self, app: &Storefront, path: &str) -> Navigation {
        self.close_menu();
        app.navigate(path)
    }

    /// Submit the search box.
    ///
    /// Effects, in order:
    /// 1. patch the catalog filter's `search_query` (other filters untouched)
    /// 2. clear the search input
    /// 3. close the search overlay
    /// 4. navigate to [`SHOP_PATH`]
    ///
    /// An empty input is submitted as-is and clears a previous search.
    #[instrument(skip(self, app), fields(query = %self.search_input))]
    pub fn submit_search(&mut self, app: &Storefront) -> Navigation {
        app.patch_filters(FilterPatch::search(self.search_input.as_str()));
        self.search_input.clear();
        self.close_search();
        tracing::info!("Search submitted");
        app.navigate(SHOP_PATH)
    }

    /// Project the current state into a [`HeaderView`].
    #[must_use]
    pub fn render(&self, app: &Storefront) -> HeaderView {
        let current_path = app.current_path();
        let (account, links) = app
            .session()
            .read(|session| (account_path(session), menu_links(session)));

        HeaderView {
            brand: BRAND,
            nav: NAV_ITEMS
                .iter()
                .map(|item| NavLinkView {
                    label: item.label,
                    path: item.path,
                    active: is_active(item, &current_path),
                })
                .collect(),
            menu_links: links.to_vec(),
            cart_badge: badge(app.cart().read(cart_count)),
            wishlist_badge: badge(app.wishlist().read(wishlist_count)),
            account_path: account,
            menu_open: self.menu_open,
            search_open: self.search_open,
            search_input: self.search_input.clone(),
            search_placeholder: SEARCH_PLACEHOLDER,
        }
    }
}
