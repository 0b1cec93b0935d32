//! Fixed-size hash table with separate chaining.
//!
//! ## Architecture
//!
//! - **Slots**: A boxed slice sized once at construction; never resized
//! - **Slab**: Arena for overflow chain nodes, linked by `usize` keys
//!
//! A bid id is parsed as an unsigned integer key and placed at
//! `key % table_size`. Collisions are appended to that slot's chain.
//!
//! ## Memory Model
//!
//! Per slab docs (https://docs.rs/slab/0.4.11):
//! - `Slab::with_capacity(n)` pre-allocates n nodes
//! - Keys are reused after removal
//! - O(1) insert, remove, and lookup
//!
//! ## Example
//!
//! ```
//! use bid_hashtable::table::BidHashTable;
//! use bid_hashtable::types::Bid;
//! use rust_decimal::Decimal;
//!
//! let mut table = BidHashTable::with_size(5).unwrap();
//!
//! // 3, 8 and 13 all hash to slot 3
//! for id in ["3", "8", "13"] {
//!     table.insert(Bid::new(id, "Desk", "General Fund", Decimal::ONE)).unwrap();
//! }
//!
//! assert_eq!(table.slot_len(3), Some(3));
//! assert!(table.remove("8").is_some());
//! assert!(table.search("8").is_none());
//! assert!(table.search("13").is_some());
//! ```

use std::io::{self, Write};

use log::trace;
use sha2::{Digest, Sha256};
use slab::Slab;

use crate::error::TableError;
use crate::table::{BidNode, Slot};
use crate::types::Bid;

/// Default number of slots. A small prime keeps `key % size` spread out.
pub const DEFAULT_TABLE_SIZE: usize = 179;

/// Parse a bid id into its integer hash key.
///
/// Surrounding whitespace is ignored. Keys are `u64`: empty, negative and
/// non-numeric ids are rejected rather than coerced, and so are all-digit
/// ids above `u64::MAX`.
///
/// # Example
///
/// ```
/// use bid_hashtable::table::parse_key;
///
/// assert_eq!(parse_key("98109"), Ok(98109));
/// assert!(parse_key("A-17").is_err());
/// ```
pub fn parse_key(id: &str) -> Result<u64, TableError> {
    id.trim()
        .parse::<u64>()
        .map_err(|_| TableError::InvalidId(id.to_string()))
}

/// Hash table of bids keyed by their numeric id.
#[derive(Debug)]
pub struct BidHashTable {
    /// Fixed slot array, indexed by `hash(id)`
    slots: Box<[Slot]>,

    /// Overflow chain nodes for all slots
    nodes: Slab<BidNode>,

    /// Total number of stored bids (primaries + chained)
    len: usize,
}

impl Default for BidHashTable {
    fn default() -> Self {
        Self::new()
    }
}

impl BidHashTable {
    /// Create an empty table with [`DEFAULT_TABLE_SIZE`] slots
    pub fn new() -> Self {
        Self {
            slots: empty_slots(DEFAULT_TABLE_SIZE),
            nodes: Slab::new(),
            len: 0,
        }
    }

    /// Create an empty table with `table_size` slots
    ///
    /// # Errors
    ///
    /// [`TableError::ZeroTableSize`] if `table_size` is 0
    pub fn with_size(table_size: usize) -> Result<Self, TableError> {
        Self::with_capacity(table_size, 0)
    }

    /// Create an empty table with pre-allocated chain storage
    ///
    /// # Arguments
    ///
    /// * `table_size` - Number of slots (fixed for the table's lifetime)
    /// * `chain_capacity` - Number of overflow nodes to pre-allocate
    ///
    /// # Example
    ///
    /// ```
    /// use bid_hashtable::table::BidHashTable;
    ///
    /// let table = BidHashTable::with_capacity(179, 1_000).unwrap();
    /// assert_eq!(table.table_size(), 179);
    /// assert!(table.chain_capacity() >= 1_000);
    /// ```
    pub fn with_capacity(table_size: usize, chain_capacity: usize) -> Result<Self, TableError> {
        if table_size == 0 {
            return Err(TableError::ZeroTableSize);
        }

        Ok(Self {
            slots: empty_slots(table_size),
            nodes: Slab::with_capacity(chain_capacity),
            len: 0,
        })
    }

    // ========================================================================
    // Capacity and Size
    // ========================================================================

    /// Number of slots
    #[inline]
    pub fn table_size(&self) -> usize {
        self.slots.len()
    }

    /// Number of stored bids
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check if the table holds no bids
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Ratio of stored bids to slots. Unmanaged: nothing rehashes on it.
    #[inline]
    pub fn load_factor(&self) -> f64 {
        self.len as f64 / self.slots.len() as f64
    }

    /// Pre-allocated chain node capacity
    #[inline]
    pub fn chain_capacity(&self) -> usize {
        self.nodes.capacity()
    }

    /// Number of bids stored at `index`, or None if out of range
    #[inline]
    pub fn slot_len(&self, index: usize) -> Option<usize> {
        self.slots.get(index).map(Slot::len)
    }

    /// Number of slots holding at least one bid
    pub fn occupied_slots(&self) -> usize {
        self.slots.iter().filter(|slot| !slot.is_empty()).count()
    }

    // ========================================================================
    // Hashing
    // ========================================================================

    /// Compute the slot index for a bid id
    ///
    /// # Returns
    ///
    /// `key % table_size`, always in `[0, table_size)`
    ///
    /// # Errors
    ///
    /// [`TableError::InvalidId`] if the id is not an integer in `0..=u64::MAX`
    pub fn hash(&self, id: &str) -> Result<usize, TableError> {
        let key = parse_key(id)?;
        // Remainder is < table_size, so it fits back into usize
        Ok((key % self.slots.len() as u64) as usize)
    }

    // ========================================================================
    // Bid Management
    // ========================================================================

    /// Insert a bid
    ///
    /// An empty slot takes the bid as its primary entry; an occupied slot
    /// appends it to the tail of its chain.
    ///
    /// # Returns
    ///
    /// The slot index the bid was stored at
    ///
    /// # Errors
    ///
    /// * [`TableError::InvalidId`] - The id does not hash
    /// * [`TableError::DuplicateId`] - A bid with this id is already stored
    ///
    /// # Example
    ///
    /// ```
    /// use bid_hashtable::table::BidHashTable;
    /// use bid_hashtable::types::Bid;
    /// use bid_hashtable::TableError;
    /// use rust_decimal::Decimal;
    ///
    /// let mut table = BidHashTable::new();
    /// let bid = Bid::new("98109", "Table", "General Fund", Decimal::ONE);
    ///
    /// assert_eq!(table.insert(bid.clone()), Ok(98109 % 179));
    /// assert_eq!(table.insert(bid), Err(TableError::DuplicateId("98109".into())));
    /// ```
    pub fn insert(&mut self, bid: Bid) -> Result<usize, TableError> {
        let index = self.hash(bid.id())?;
        let slot = &mut self.slots[index];

        if slot.find(bid.id(), &self.nodes).is_some() {
            return Err(TableError::DuplicateId(bid.id().to_string()));
        }

        trace!("insert bid {} at slot {}", bid.id(), index);
        slot.push(bid, &mut self.nodes);
        self.len += 1;

        Ok(index)
    }

    /// Find a bid by id
    ///
    /// Checks the slot's primary entry, then walks its chain.
    ///
    /// # Returns
    ///
    /// The stored bid, or None if absent. An id that does not parse can
    /// never have been inserted, so it is simply absent.
    pub fn search(&self, id: &str) -> Option<&Bid> {
        let index = self.hash(id).ok()?;
        self.slots[index].find(id, &self.nodes)
    }

    /// Check if a bid id is stored
    #[inline]
    pub fn contains(&self, id: &str) -> bool {
        self.search(id).is_some()
    }

    /// Remove a bid by id
    ///
    /// Only the matching entry is unlinked; every other bid keeps its slot
    /// and chain position. Removing a primary entry promotes the head of
    /// its chain.
    ///
    /// # Returns
    ///
    /// The removed bid, or None if absent
    pub fn remove(&mut self, id: &str) -> Option<Bid> {
        let index = self.hash(id).ok()?;
        let removed = self.slots[index].remove(id, &mut self.nodes)?;

        trace!("removed bid {} from slot {}", id, index);
        self.len -= 1;

        Some(removed)
    }

    /// Remove every bid. The slot count is unchanged.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.slots.iter_mut().for_each(|slot| *slot = Slot::new());
        self.len = 0;
    }

    // ========================================================================
    // Enumeration
    // ========================================================================

    /// Iterate `(slot_index, bid)` pairs in table-layout order
    ///
    /// Occupied slots in index order; within a slot the primary, then the
    /// chain in insertion order.
    pub fn entries(&self) -> impl Iterator<Item = (usize, &Bid)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .flat_map(move |(index, slot)| slot.iter(&self.nodes).map(move |bid| (index, bid)))
    }

    /// Iterate all bids in table-layout order
    pub fn iter(&self) -> impl Iterator<Item = &Bid> + '_ {
        self.entries().map(|(_, bid)| bid)
    }

    /// Write every bid, one per line, in table-layout order
    ///
    /// # Example
    ///
    /// ```
    /// use bid_hashtable::table::BidHashTable;
    /// use bid_hashtable::types::Bid;
    /// use rust_decimal::Decimal;
    ///
    /// let mut table = BidHashTable::new();
    /// table.insert(Bid::new("1", "Lamp", "Enterprise", Decimal::new(1250, 2))).unwrap();
    ///
    /// let mut out = Vec::new();
    /// table.print_all(&mut out).unwrap();
    /// assert_eq!(String::from_utf8(out).unwrap(), "1: Lamp | 12.5 | Enterprise\n");
    /// ```
    pub fn print_all<W: Write>(&self, out: &mut W) -> io::Result<()> {
        for bid in self.iter() {
            writeln!(out, "{}", bid)?;
        }
        Ok(())
    }

    // ========================================================================
    // Layout Digest
    // ========================================================================

    /// SHA-256 over the table's enumeration.
    ///
    /// Two tables with the same size holding the same bids in the same
    /// slot and chain positions produce the same digest.
    pub fn layout_digest(&self) -> [u8; 32] {
        let mut hasher = Sha256::new();
        hasher.update((self.slots.len() as u64).to_le_bytes());

        for (index, bid) in self.entries() {
            hasher.update((index as u64).to_le_bytes());
            for field in [bid.id(), bid.title(), bid.fund()] {
                hasher.update((field.len() as u64).to_le_bytes());
                hasher.update(field.as_bytes());
            }
            hasher.update(bid.amount().serialize());
        }

        let result = hasher.finalize();

        let mut digest = [0u8; 32];
        digest.copy_from_slice(&result);
        digest
    }

    /// Layout digest as a lowercase hex string
    pub fn layout_digest_hex(&self) -> String {
        hex::encode(self.layout_digest())
    }
}

impl<'a> IntoIterator for &'a BidHashTable {
    type Item = &'a Bid;
    type IntoIter = Box<dyn Iterator<Item = &'a Bid> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.iter())
    }
}

fn empty_slots(table_size: usize) -> Box<[Slot]> {
    (0..table_size).map(|_| Slot::new()).collect()
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn bid(id: &str) -> Bid {
        Bid::new(id, format!("Item {id}"), "General Fund", Decimal::new(2500, 2))
    }

    fn ids(table: &BidHashTable) -> Vec<&str> {
        table.iter().map(Bid::id).collect()
    }

    #[test]
    fn test_table_new() {
        let table = BidHashTable::new();

        assert!(table.is_empty());
        assert_eq!(table.len(), 0);
        assert_eq!(table.table_size(), DEFAULT_TABLE_SIZE);
        assert_eq!(table.occupied_slots(), 0);
        assert_eq!(table.load_factor(), 0.0);
    }

    #[test]
    fn test_table_zero_size_rejected() {
        assert_eq!(BidHashTable::with_size(0).unwrap_err(), TableError::ZeroTableSize);
        assert!(BidHashTable::with_size(1).is_ok());
    }

    #[test]
    fn test_parse_key() {
        assert_eq!(parse_key("0"), Ok(0));
        assert_eq!(parse_key(" 98109 "), Ok(98109));
        assert_eq!(parse_key(""), Err(TableError::InvalidId(String::new())));
        assert_eq!(parse_key("-3"), Err(TableError::InvalidId("-3".into())));
        assert_eq!(parse_key("12ab"), Err(TableError::InvalidId("12ab".into())));
    }

    #[test]
    fn test_parse_key_u64_bound() {
        assert_eq!(parse_key("18446744073709551615"), Ok(u64::MAX));

        let err = parse_key("123456789012345678901234").unwrap_err();
        assert_eq!(err, TableError::InvalidId("123456789012345678901234".into()));
        assert_eq!(
            err.to_string(),
            "bid id \"123456789012345678901234\" is not an integer key in 0..=18446744073709551615"
        );
    }

    #[test]
    fn test_hash_modulo() {
        let table = BidHashTable::with_size(5).unwrap();

        assert_eq!(table.hash("3"), Ok(3));
        assert_eq!(table.hash("8"), Ok(3));
        assert_eq!(table.hash("10"), Ok(0));
        assert_eq!(table.hash(&u64::MAX.to_string()), Ok((u64::MAX % 5) as usize));
    }

    #[test]
    fn test_hash_single_slot() {
        let table = BidHashTable::with_size(1).unwrap();

        for id in ["0", "1", "98109", "18446744073709551615"] {
            assert_eq!(table.hash(id), Ok(0));
        }
    }

    #[test]
    fn test_insert_and_search() {
        let mut table = BidHashTable::new();

        let index = table.insert(bid("98109")).unwrap();

        assert_eq!(index, 98109 % DEFAULT_TABLE_SIZE);
        assert_eq!(table.len(), 1);
        assert_eq!(table.search("98109"), Some(&bid("98109")));
        assert!(table.contains("98109"));
    }

    #[test]
    fn test_insert_invalid_id() {
        let mut table = BidHashTable::new();

        let err = table.insert(bid("ABC")).unwrap_err();

        assert_eq!(err, TableError::InvalidId("ABC".into()));
        assert!(table.is_empty());
    }

    #[test]
    fn test_insert_duplicate_rejected() {
        let mut table = BidHashTable::with_size(5).unwrap();

        table.insert(bid("3")).unwrap();
        table.insert(bid("8")).unwrap();

        // Duplicate of a chained entry is caught too
        let replacement = Bid::new("8", "Other", "Enterprise", Decimal::ONE);
        assert_eq!(table.insert(replacement), Err(TableError::DuplicateId("8".into())));

        assert_eq!(table.len(), 2);
        assert_eq!(table.search("8"), Some(&bid("8")));
    }

    #[test]
    fn test_collision_chain() {
        let mut table = BidHashTable::with_size(5).unwrap();

        for id in ["3", "8", "13"] {
            assert_eq!(table.insert(bid(id)), Ok(3));
        }

        assert_eq!(table.slot_len(3), Some(3));
        assert_eq!(table.occupied_slots(), 1);
        for id in ["3", "8", "13"] {
            assert_eq!(table.search(id).map(Bid::id), Some(id));
        }
    }

    #[test]
    fn test_search_missing() {
        let mut table = BidHashTable::with_size(5).unwrap();

        // Empty slot
        assert!(table.search("1").is_none());

        // Occupied slot, id not in chain
        table.insert(bid("3")).unwrap();
        table.insert(bid("8")).unwrap();
        assert!(table.search("13").is_none());

        // Unparseable id is absent, not an error
        assert!(table.search("not-a-number").is_none());
    }

    #[test]
    fn test_remove_mid_chain() {
        let mut table = BidHashTable::with_size(5).unwrap();
        for id in ["3", "8", "13"] {
            table.insert(bid(id)).unwrap();
        }

        assert_eq!(table.search("8").map(Bid::id), Some("8"));

        let removed = table.remove("8");

        assert_eq!(removed, Some(bid("8")));
        assert!(table.search("8").is_none());
        assert!(table.search("3").is_some());
        assert!(table.search("13").is_some());
        assert_eq!(table.len(), 2);
        assert_eq!(ids(&table), vec!["3", "13"]);
    }

    #[test]
    fn test_remove_primary_keeps_chain() {
        let mut table = BidHashTable::with_size(5).unwrap();
        for id in ["3", "8", "13"] {
            table.insert(bid(id)).unwrap();
        }

        table.remove("3");

        assert!(table.search("3").is_none());
        assert_eq!(ids(&table), vec!["8", "13"]);
        assert_eq!(table.slot_len(3), Some(2));
    }

    #[test]
    fn test_remove_does_not_shift_other_slots() {
        let mut table = BidHashTable::with_size(5).unwrap();
        for id in ["1", "2", "3", "4"] {
            table.insert(bid(id)).unwrap();
        }

        table.remove("2");

        assert_eq!(table.search("1").map(Bid::id), Some("1"));
        assert_eq!(table.search("3").map(Bid::id), Some("3"));
        assert_eq!(table.search("4").map(Bid::id), Some("4"));
        assert_eq!(table.slot_len(2), Some(0));
        assert_eq!(table.slot_len(3), Some(1));
    }

    #[test]
    fn test_remove_missing() {
        let mut table = BidHashTable::with_size(5).unwrap();

        assert!(table.remove("3").is_none());
        assert!(table.remove("xyz").is_none());

        table.insert(bid("3")).unwrap();
        assert!(table.remove("8").is_none());
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_remove_then_reinsert() {
        let mut table = BidHashTable::with_size(5).unwrap();
        for id in ["3", "8"] {
            table.insert(bid(id)).unwrap();
        }

        table.remove("3");
        table.insert(bid("3")).unwrap();

        // "3" now sits behind the promoted "8"
        assert_eq!(ids(&table), vec!["8", "3"]);
    }

    #[test]
    fn test_enumeration_layout_order() {
        let mut table = BidHashTable::with_size(5).unwrap();
        for id in ["9", "4", "1", "14", "6"] {
            table.insert(bid(id)).unwrap();
        }

        // slot 1: 1 -> 6, slot 4: 9 -> 4 -> 14
        assert_eq!(ids(&table), vec!["1", "6", "9", "4", "14"]);

        let slots: Vec<usize> = table.entries().map(|(index, _)| index).collect();
        assert_eq!(slots, vec![1, 1, 4, 4, 4]);
    }

    #[test]
    fn test_empty_table_enumeration() {
        let table = BidHashTable::new();

        assert!(table.search("1").is_none());
        assert_eq!(table.iter().count(), 0);

        let mut out = Vec::new();
        table.print_all(&mut out).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn test_print_all_format() {
        let mut table = BidHashTable::with_size(5).unwrap();
        table.insert(Bid::new("3", "Desk", "Enterprise", Decimal::new(1000, 2))).unwrap();
        table.insert(Bid::new("8", "Chair", "General Fund", Decimal::new(575, 2))).unwrap();

        let mut out = Vec::new();
        table.print_all(&mut out).unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "3: Desk | 10 | Enterprise\n8: Chair | 5.75 | General Fund\n"
        );
    }

    #[test]
    fn test_into_iterator() {
        let mut table = BidHashTable::with_size(5).unwrap();
        table.insert(bid("2")).unwrap();

        let mut count = 0;
        for bid in &table {
            assert_eq!(bid.id(), "2");
            count += 1;
        }
        assert_eq!(count, 1);
    }

    #[test]
    fn test_clear() {
        let mut table = BidHashTable::with_size(5).unwrap();
        for id in ["3", "8", "13", "4"] {
            table.insert(bid(id)).unwrap();
        }

        table.clear();

        assert!(table.is_empty());
        assert_eq!(table.table_size(), 5);
        assert_eq!(table.occupied_slots(), 0);
        assert!(table.search("8").is_none());

        // Table is usable after clearing
        table.insert(bid("8")).unwrap();
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_load_factor() {
        let mut table = BidHashTable::with_size(4).unwrap();
        for id in ["1", "2", "5", "9", "13", "17"] {
            table.insert(bid(id)).unwrap();
        }

        // No resizing: 6 bids over 4 slots
        assert_eq!(table.table_size(), 4);
        assert_eq!(table.load_factor(), 1.5);
    }

    #[test]
    fn test_layout_digest_deterministic() {
        let build = || {
            let mut table = BidHashTable::with_size(5).unwrap();
            for id in ["3", "8", "1"] {
                table.insert(bid(id)).unwrap();
            }
            table
        };

        let a = build();
        let b = build();

        assert_eq!(a.layout_digest(), b.layout_digest());
        assert_eq!(a.layout_digest_hex().len(), 64);
    }

    #[test]
    fn test_layout_digest_tracks_chain_order() {
        let mut a = BidHashTable::with_size(5).unwrap();
        let mut b = BidHashTable::with_size(5).unwrap();

        a.insert(bid("3")).unwrap();
        a.insert(bid("8")).unwrap();
        b.insert(bid("8")).unwrap();
        b.insert(bid("3")).unwrap();

        assert_ne!(a.layout_digest(), b.layout_digest());
    }
}
