//! Overflow chain node for slab-based storage.
//!
//! ## Design
//!
//! `BidNode` wraps a `Bid` with a single forward link so that every bid
//! hashing to an occupied slot can be appended behind its primary entry.
//!
//! ## Slab Integration
//!
//! Per official slab docs (https://docs.rs/slab/0.4.11):
//! - Keys are `usize` values returned by `slab.insert()`
//! - Keys may be reused after `slab.remove()`
//! - O(1) insert, remove, and lookup
//!
//! Links are slab keys, never references into the slot array, so the
//! arena may grow without invalidating any chain.

use crate::types::Bid;

/// Chain node stored in the slab.
///
/// ## Memory Layout
///
/// ```text
/// BidNode {
///     bid: Bid
///     next: Option<usize> (16 bytes with alignment)
/// }
/// ```
#[derive(Debug, Clone)]
pub struct BidNode {
    /// The stored bid
    pub bid: Bid,

    /// Next node in the chain (slab key)
    /// None if this is the tail (newest entry)
    pub next: Option<usize>,
}

impl BidNode {
    /// Create a new, unlinked chain node
    ///
    /// # Example
    ///
    /// ```
    /// use bid_hashtable::table::BidNode;
    /// use bid_hashtable::types::Bid;
    /// use rust_decimal::Decimal;
    ///
    /// let node = BidNode::new(Bid::new("8", "Lamp", "Enterprise", Decimal::ONE));
    /// assert!(node.is_tail());
    /// ```
    #[inline]
    pub fn new(bid: Bid) -> Self {
        Self { bid, next: None }
    }

    /// Check if this node terminates its chain
    #[inline]
    pub fn is_tail(&self) -> bool {
        self.next.is_none()
    }

    /// Get the bid id
    #[inline]
    pub fn bid_id(&self) -> &str {
        self.bid.id()
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
