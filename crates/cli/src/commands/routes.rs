//! Route table listing.
//!
//! # Usage
//!
//! ```bash
//! cylo routes
//! ```

use cylo_storefront::guard::LOGIN_PATH;
use cylo_storefront::routes::{ROUTE_TABLE, RouteSpec};

/// Format one route table row.
fn format_row(route: &RouteSpec) -> String {
    if route.guarded {
        format!("{:<16} guarded (redirects to {LOGIN_PATH})", route.pattern)
    } else {
        format!("{:<16} public", route.pattern)
    }
}

/// Print every routable path pattern with its guard flag.
#[allow(clippy::print_stdout)]
pub fn print_table() {
    for route in &ROUTE_TABLE {
        println!("{}", format_row(route));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rows_mark_guarded_routes() {
        let rows: Vec<String> = ROUTE_TABLE.iter().map(format_row).collect();

        assert_eq!(rows.len(), 11);
        assert!(rows[0].starts_with("/ "));
        assert!(rows[0].ends_with("public"));

        let guarded: Vec<&String> = rows.iter().filter(|row| row.contains("guarded")).collect();
        assert_eq!(guarded.len(), 2);
        assert!(guarded.iter().any(|row| row.starts_with("/wishlist")));
        assert!(guarded.iter().any(|row| row.starts_with("/profile")));
    }
}
