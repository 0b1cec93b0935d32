//! # Bid HashTable
//!
//! Fixed-size hash table with separate chaining for eBid auction records.
//!
//! ## Architecture
//!
//! - **Types**: The [`Bid`] record and currency amount parsing
//! - **Table**: [`BidHashTable`] with slab-backed overflow chains
//! - **Loader**: CSV import of the monthly sales export
//!
//! ## Design Principles
//!
//! 1. **Fixed shape**: The slot count is set once; nothing rehashes
//! 2. **No Floating Point**: Amounts are `rust_decimal::Decimal`
//! 3. **Index links**: Chain nodes are linked by slab key, never by pointer
//! 4. **Explicit absence**: Lookups return `Option`, bad input returns `Err`

// ============================================================================
// Module declarations
// ============================================================================

/// Core data types: Bid and amounts
pub mod types;

/// Hash table: fixed slots with slab-based chains
pub mod table;

/// CSV import
pub mod loader;

/// Error types
pub mod error;

/// Console logger setup
pub mod logger;

// ============================================================================
// Re-exports for convenience
// ============================================================================

pub use types::Bid;
pub use table::{BidHashTable, DEFAULT_TABLE_SIZE};
pub use error::{LoadError, RowError, TableError};
pub use loader::{load_bids, LoadReport};
