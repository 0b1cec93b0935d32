//! Core data types for the bid table
//!
//! ## Types
//!
//! - [`Bid`]: One auction record (id, title, fund, amount)
//!
//! ## Amounts
//!
//! Amounts are [`rust_decimal::Decimal`] values parsed from currency
//! strings; see [`amount`].

mod bid;
pub mod amount;

pub use bid::Bid;
