//! The bid record stored in the hash table.
//!
//! A `Bid` is one row of the eBid monthly sales export: an auction article
//! with its identifier, title, owning fund and winning amount.

use std::fmt;

use rust_decimal::Decimal;

use crate::types::amount::format_amount;

/// A single auction bid.
///
/// Fields are private: a bid is immutable once constructed and is moved
/// into the table by value on insert.
///
/// ## Example
///
/// ```
/// use bid_hashtable::types::Bid;
/// use rust_decimal::Decimal;
///
/// let bid = Bid::new("98109", "Table", "General Fund", Decimal::new(2700, 2));
/// assert_eq!(bid.id(), "98109");
/// assert_eq!(bid.to_string(), "98109: Table | 27 | General Fund");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Bid {
    /// Numeric-looking identifier, used as the hash key
    id: String,

    /// Article title
    title: String,

    /// Fund the proceeds are credited to
    fund: String,

    /// Winning bid amount
    amount: Decimal,
}

impl Bid {
    /// Create a new bid
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        fund: impl Into<String>,
        amount: Decimal,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            fund: fund.into(),
            amount,
        }
    }

    /// Get the bid identifier
    #[inline]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Get the article title
    #[inline]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Get the fund name
    #[inline]
    pub fn fund(&self) -> &str {
        &self.fund
    }

    /// Get the winning amount
    #[inline]
    pub fn amount(&self) -> Decimal {
        self.amount
    }
}

impl fmt::Display for Bid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} | {} | {}",
            self.id,
            self.title,
            format_amount(self.amount),
            self.fund
        )
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
