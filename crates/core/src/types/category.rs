//! Catalog departments.

use serde::{Deserialize, Serialize};

/// Error returned when a string does not name a [`Category`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid category: {0}")]
pub struct CategoryError(pub String);

/// Catalog department a shopper can browse or filter by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Women,
    Men,
}

impl Category {
    /// Every category, in navigation order.
    pub const ALL: [Self; 2] = [Self::Women, Self::Men];

    /// Display label, as shown in navigation and passed to the catalog.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Women => "Women",
            Self::Men => "Men",
        }
    }

    /// URL path of the category landing page.
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Women => "/women",
            Self::Men => "/men",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for Category {
    type Err = CategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "women" => Ok(Self::Women),
            "men" => Ok(Self::Men),
            _ => Err(CategoryError(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("Women".parse::<Category>(), Ok(Category::Women));
        assert_eq!(" MEN ".parse::<Category>(), Ok(Category::Men));
        assert!("kids".parse::<Category>().is_err());
    }

    #[test]
    fn test_paths() {
        assert_eq!(Category::Women.path(), "/women");
        assert_eq!(Category::Men.path(), "/men");
    }
}
