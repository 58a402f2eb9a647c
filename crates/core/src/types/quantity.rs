//! Cart line quantities.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when constructing a [`Quantity`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum QuantityError {
    /// The input is not a whole number.
    #[error("quantity must be a whole number (got {0:?})")]
    NotAWholeNumber(String),
    /// Zero is not a quantity; a line with no units is removed instead.
    #[error("quantity must be at least 1")]
    Zero,
    /// Negative input (only reachable through [`Quantity::try_from_i64`]).
    #[error("quantity cannot be negative (got {0})")]
    Negative(i64),
    /// The value exceeds the per-line maximum.
    #[error("quantity must be at most {max} (got {got})")]
    TooLarge {
        /// Maximum allowed quantity.
        max: u32,
        /// The rejected value.
        got: u64,
    },
}

/// A positive number of units of one product.
///
/// The type makes `quantity >= 1` unrepresentable to violate: every
/// constructor rejects zero, negatives and values above [`Quantity::MAX`].
///
/// ```
/// use cylo_core::Quantity;
///
/// assert_eq!(Quantity::new(3).unwrap().get(), 3);
/// assert!(Quantity::new(0).is_err());
/// assert!(Quantity::try_from_i64(-2).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Quantity(u32);

impl Quantity {
    /// Largest quantity a single cart line may hold.
    pub const MAX: u32 = 999;

    /// A single unit.
    pub const ONE: Self = Self(1);

    /// Create a quantity.
    ///
    /// # Errors
    ///
    /// Returns [`QuantityError::Zero`] for 0 and [`QuantityError::TooLarge`]
    /// above [`Self::MAX`].
    pub fn new(value: u32) -> Result<Self, QuantityError> {
        if value == 0 {
            return Err(QuantityError::Zero);
        }
        if value > Self::MAX {
            return Err(QuantityError::TooLarge {
                max: Self::MAX,
                got: u64::from(value),
            });
        }
        Ok(Self(value))
    }

    /// Create a quantity from signed user input.
    ///
    /// # Errors
    ///
    /// Returns [`QuantityError::Negative`] for negative input, otherwise the
    /// same errors as [`Self::new`].
    pub fn try_from_i64(value: i64) -> Result<Self, QuantityError> {
        let unsigned = u64::try_from(value).map_err(|_| QuantityError::Negative(value))?;
        let narrowed = u32::try_from(unsigned).map_err(|_| QuantityError::TooLarge {
            max: Self::MAX,
            got: unsigned,
        })?;
        Self::new(narrowed)
    }

    /// Get the underlying count.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }

    /// Add two quantities, failing if the sum exceeds [`Self::MAX`].
    ///
    /// # Errors
    ///
    /// Returns [`QuantityError::TooLarge`] when the sum is out of range.
    pub fn checked_add(self, other: Self) -> Result<Self, QuantityError> {
        Self::new(self.0 + other.0)
    }

    /// Subtract units, returning `None` when nothing would remain.
    #[must_use]
    pub const fn saturating_sub(self, units: u32) -> Option<Self> {
        if units >= self.0 {
            None
        } else {
            Some(Self(self.0 - units))
        }
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<u32> for Quantity {
    type Error = QuantityError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Quantity> for u32 {
    fn from(quantity: Quantity) -> Self {
        quantity.0
    }
}

impl std::str::FromStr for Quantity {
    type Err = QuantityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: i64 = s
            .trim()
            .parse()
            .map_err(|_| QuantityError::NotAWholeNumber(s.to_string()))?;
        Self::try_from_i64(value)
    }
}
