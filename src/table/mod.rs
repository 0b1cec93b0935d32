//! Hash table module for bid storage.
//!
//! ## Architecture
//!
//! The table is a fixed array of slots with separate chaining:
//!
//! - **Fixed slots**: `table_size` chosen at construction, never rehashed
//! - **Slab-based chains**: Overflow nodes in an arena, linked by key
//! - **Insertion order**: Each chain is FIFO behind its primary entry
//!
//! ## Components
//!
//! - [`BidNode`]: A chained bid with a forward link
//! - [`Slot`]: Primary bid plus chain metadata for one index
//! - [`BidHashTable`]: The table itself
//!
//! ## Performance
//!
//! | Operation | Complexity |
//! |-----------|------------|
//! | Hash | O(1) |
//! | Insert | O(chain length) (duplicate check) |
//! | Search | O(chain length) |
//! | Remove | O(chain length) |
//! | Enumerate | O(table size + n) |

pub mod node;
pub mod slot;
pub mod hashtable;

pub use node::BidNode;
pub use slot::Slot;
pub use hashtable::{parse_key, BidHashTable, DEFAULT_TABLE_SIZE};
