//! Currency amount parsing and formatting.
//!
//! ## Overview
//!
//! Bid amounts arrive from the CSV export as formatted currency strings
//! (`"$1,234.56"`). They are stored as [`Decimal`] so that no value ever
//! passes through floating point.
//!
//! ## Examples
//!
//! ```
//! use bid_hashtable::types::amount::{parse_amount, format_amount};
//!
//! let amount = parse_amount("$1,234.50").unwrap();
//! assert_eq!(format_amount(amount), "1234.5");
//! ```

use rust_decimal::prelude::*;
use rust_decimal::Decimal;

/// Formatting characters removed before a currency string is parsed.
pub const STRIPPED_CHARS: &[char] = &['$', ','];

// ============================================================================
// Conversion Functions
// ============================================================================

/// Parse a currency string into a [`Decimal`].
///
/// The currency symbol and thousands separators are stripped first, then
/// the remainder is parsed as a plain decimal number.
///
/// # Returns
///
/// * `Some(Decimal)` - The parsed amount
/// * `None` - If the string is empty, not a number, or negative
///
/// # Example
///
/// ```
/// use bid_hashtable::types::amount::parse_amount;
/// use rust_decimal::Decimal;
///
/// assert_eq!(parse_amount("$15.50"), Some(Decimal::new(1550, 2)));
/// assert_eq!(parse_amount("$1,000"), Some(Decimal::new(1000, 0)));
/// assert_eq!(parse_amount("n/a"), None);
/// ```
pub fn parse_amount(s: &str) -> Option<Decimal> {
    let cleaned: String = s
        .trim()
        .chars()
        .filter(|c| !STRIPPED_CHARS.contains(c))
        .collect();

    let amount = Decimal::from_str(cleaned.trim()).ok()?;
    if amount.is_sign_negative() {
        return None;
    }
    Some(amount)
}

/// Format an amount for display with trailing zeros trimmed.
///
/// # Example
///
/// ```
/// use bid_hashtable::types::amount::format_amount;
/// use rust_decimal::Decimal;
///
/// assert_eq!(format_amount(Decimal::new(1550, 2)), "15.5");
/// assert_eq!(format_amount(Decimal::new(4200, 2)), "42");
/// ```
pub fn format_amount(amount: Decimal) -> String {
    format!("{}", amount.normalize())
}

// ============================================================================
// Unit Tests
// ============================================================================
