//! A single slot of the hash table: a primary bid plus its overflow chain.
//!
//! ## Design
//!
//! The primary bid lives inline in the slot. Further bids hashing to the
//! same index are appended to a singly-linked chain whose nodes live in
//! the table's slab; the slot only holds the chain metadata.
//!
//! ## Chain Structure
//!
//! ```text
//! primary -> head (oldest) -> node2 -> tail (newest) -> None
//! ```
//!
//! - New bids are appended at the tail, so chain order is insertion order
//! - Removing the primary promotes the chain head
//! - Removing a chained bid unlinks only that node

use slab::Slab;

use crate::table::BidNode;
use crate::types::Bid;

/// One slot of the table.
///
/// Invariant: a slot with a non-empty chain always has a primary bid.
///
/// Chain keys are owned by exactly one slot, so `Slot` is not `Clone`, and
/// only the owning table mutates it against its own arena.
#[derive(Debug, Default)]
pub struct Slot {
    /// First bid stored at this index
    primary: Option<Bid>,

    /// Oldest chained bid (slab key)
    head: Option<usize>,

    /// Newest chained bid (slab key); appends go here
    tail: Option<usize>,

    /// Number of chained bids, excluding the primary
    chain_len: usize,
}

impl Slot {
    /// Create an empty slot
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if the slot holds no bids at all
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.primary.is_none()
    }

    /// Number of bids stored at this slot, primary included
    #[inline]
    pub fn len(&self) -> usize {
        usize::from(self.primary.is_some()) + self.chain_len
    }

    /// The primary bid, if any
    #[inline]
    pub fn primary(&self) -> Option<&Bid> {
        self.primary.as_ref()
    }

    /// Number of chained bids, excluding the primary
    #[inline]
    pub fn chain_len(&self) -> usize {
        self.chain_len
    }

    /// Store a bid in this slot.
    ///
    /// An empty slot takes the bid as its primary; otherwise the bid is
    /// appended to the tail of the chain.
    pub(crate) fn push(&mut self, bid: Bid, nodes: &mut Slab<BidNode>) {
        if self.primary.is_none() {
            self.primary = Some(bid);
            return;
        }

        let key = nodes.insert(BidNode::new(bid));
        self.push_back(key, nodes);
    }

    /// Link an already-allocated node at the tail of the chain
    fn push_back(&mut self, key: usize, nodes: &mut Slab<BidNode>) {
        if let Some(node) = nodes.get_mut(key) {
            node.next = None;
        }

        match self.tail {
            Some(tail_key) => {
                if let Some(tail_node) = nodes.get_mut(tail_key) {
                    tail_node.next = Some(key);
                }
            }
            // Empty chain - this is also the head
            None => self.head = Some(key),
        }

        self.tail = Some(key);
        self.chain_len += 1;
    }

    /// Iterate the slot's bids: primary first, then the chain in order
    pub fn iter<'a>(&'a self, nodes: &'a Slab<BidNode>) -> impl Iterator<Item = &'a Bid> + 'a {
        self.primary.iter().chain(Chain {
            nodes,
            next: self.head,
        })
    }

    /// Find the bid with the given id in this slot
    pub fn find<'a>(&'a self, id: &str, nodes: &'a Slab<BidNode>) -> Option<&'a Bid> {
        self.iter(nodes).find(|bid| bid.id() == id)
    }

    /// Remove the bid with the given id, leaving every other bid in place.
    ///
    /// # Returns
    ///
    /// The removed bid, or None if the id is not stored here
    pub(crate) fn remove(&mut self, id: &str, nodes: &mut Slab<BidNode>) -> Option<Bid> {
        if self.primary.as_ref().is_some_and(|bid| bid.id() == id) {
            let removed = self.primary.take();
            self.primary = self.pop_front(nodes);
            return removed;
        }

        let mut prev: Option<usize> = None;
        let mut cursor = self.head;

        while let Some(key) = cursor {
            let node = nodes.get(key)?;
            if node.bid_id() == id {
                let next = node.next;
                self.unlink(prev, key, next, nodes);
                return Some(nodes.remove(key).bid);
            }
            prev = Some(key);
            cursor = node.next;
        }

        None
    }

    /// Detach `key` from the chain given its predecessor and successor
    fn unlink(
        &mut self,
        prev: Option<usize>,
        key: usize,
        next: Option<usize>,
        nodes: &mut Slab<BidNode>,
    ) {
        match prev {
            Some(prev_key) => {
                if let Some(prev_node) = nodes.get_mut(prev_key) {
                    prev_node.next = next;
                }
            }
            // This was the head
            None => self.head = next,
        }

        if self.tail == Some(key) {
            self.tail = prev;
        }

        self.chain_len -= 1;
    }

    /// Remove and return the chain head
    fn pop_front(&mut self, nodes: &mut Slab<BidNode>) -> Option<Bid> {
        let key = self.head?;
        let node = nodes.try_remove(key)?;

        self.head = node.next;
        if self.head.is_none() {
            self.tail = None;
        }
        self.chain_len -= 1;

        Some(node.bid)
    }
}

/// Forward iterator over a slot's chain
struct Chain<'a> {
    nodes: &'a Slab<BidNode>,
    next: Option<usize>,
}

impl<'a> Iterator for Chain<'a> {
    type Item = &'a Bid;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.nodes.get(self.next?)?;
        self.next = node.next;
        Some(&node.bid)
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
