//! Client-side route table.
//!
//! # Route Structure
//!
//! ```text
//! /                  - Home
//! /shop              - Catalog browse (reads the filter state)
//! /product/:id       - Product detail
//! /cart              - Cart
//! /women             - Category page bound to Women
//! /men               - Category page bound to Men
//! /login             - Login
//! /about             - About
//! /style-advisor     - Style advisor
//!
//! # Guarded (requires a signed-in shopper, otherwise redirects to /login)
//! /wishlist          - Wishlist
//! /profile           - Profile
//! ```
//!
//! Paths are matched on the pathname only: the query string and fragment
//! are ignored, and a single trailing slash is tolerated. Anything else is
//! unmatched and left to the not-found view.

pub mod router;

use std::fmt;

use cylo_core::{Category, ProductId};

pub use router::{Navigation, Outcome, Router};

/// One entry of the route table, for listings and diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteSpec {
    pub pattern: &'static str,
    pub guarded: bool,
}

/// Every routable path pattern, in declaration order.
pub const ROUTE_TABLE: [RouteSpec; 11] = [
    RouteSpec { pattern: "/", guarded: false },
    RouteSpec { pattern: "/shop", guarded: false },
    RouteSpec { pattern: "/product/:id", guarded: false },
    RouteSpec { pattern: "/cart", guarded: false },
    RouteSpec { pattern: "/women", guarded: false },
    RouteSpec { pattern: "/men", guarded: false },
    RouteSpec { pattern: "/login", guarded: false },
    RouteSpec { pattern: "/about", guarded: false },
    RouteSpec { pattern: "/style-advisor", guarded: false },
    RouteSpec { pattern: "/wishlist", guarded: true },
    RouteSpec { pattern: "/profile", guarded: true },
];

/// A matched path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    Shop,
    Product { id: ProductId },
    Cart,
    Category(Category),
    Login,
    About,
    StyleAdvisor,
    Wishlist,
    Profile,
}

/// The view a route renders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
    Home,
    Shop,
    ProductDetail { id: ProductId },
    Cart,
    CategoryPage { category: Category },
    Login,
    About,
    StyleAdvisor,
    Wishlist,
    Profile,
}

impl Route {
    /// Match a path against the route table.
    ///
    /// Returns `None` for unmatched paths, including `/product/` with an
    /// empty or invalid product ID.
    #[must_use]
    pub fn parse(path: &str) -> Option<Self> {
        let pathname = pathname(path);

        let route = match pathname.as_str() {
            "/" => Self::Home,
            "/shop" => Self::Shop,
            "/cart" => Self::Cart,
            "/women" => Self::Category(Category::Women),
            "/men" => Self::Category(Category::Men),
            "/login" => Self::Login,
            "/about" => Self::About,
            "/style-advisor" => Self::StyleAdvisor,
            "/wishlist" => Self::Wishlist,
            "/profile" => Self::Profile,
            other => {
                let id = other.strip_prefix("/product/")?;
                Self::Product {
                    id: ProductId::parse(id).ok()?,
                }
            }
        };

        Some(route)
    }

    /// Canonical path for this route.
    #[must_use]
    pub fn path(&self) -> String {
        match self {
            Self::Home => "/".to_string(),
            Self::Shop => "/shop".to_string(),
            Self::Product { id } => format!("/product/{id}"),
            Self::Cart => "/cart".to_string(),
            Self::Category(category) => category.path().to_string(),
            Self::Login => "/login".to_string(),
            Self::About => "/about".to_string(),
            Self::StyleAdvisor => "/style-advisor".to_string(),
            Self::Wishlist => "/wishlist".to_string(),
            Self::Profile => "/profile".to_string(),
        }
    }

    /// Whether the route requires a signed-in shopper.
    #[must_use]
    pub const fn is_guarded(&self) -> bool {
        matches!(self, Self::Wishlist | Self::Profile)
    }

    /// The view this route renders.
    #[must_use]
    pub fn view(&self) -> View {
        match self {
            Self::Home => View::Home,
            Self::Shop => View::Shop,
            Self::Product { id } => View::ProductDetail { id: id.clone() },
            Self::Cart => View::Cart,
            Self::Category(category) => View::CategoryPage {
                category: *category,
            },
            Self::Login => View::Login,
            Self::About => View::About,
            Self::StyleAdvisor => View::StyleAdvisor,
            Self::Wishlist => View::Wishlist,
            Self::Profile => View::Profile,
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// Reduce a location to its pathname.
///
/// Drops the query string and fragment, collapses an empty path to `/`, and
/// removes a single trailing slash from anything but the root.
#[must_use]
pub fn pathname(path: &str) -> String {
    let end = path.find(['?', '#']).unwrap_or(path.len());
    let path = path.get(..end).unwrap_or(path).trim();

    if path.is_empty() || path == "/" {
        return "/".to_string();
    }

    let path = path.strip_suffix('/').unwrap_or(path);
    if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{path}")
    }
}
