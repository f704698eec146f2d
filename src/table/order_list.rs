//! Recency list threading all live entries.
//!
//! ## Design
//!
//! An `OrderList` is an intrusive doubly-linked list over the entry slab,
//! ordered by time of last insertion or update.
//!
//! ## List Structure
//!
//! ```text
//! head (oldest) <-> entry2 <-> entry3 <-> tail (newest)
//! ```
//!
//! - New entries are appended at the tail
//! - Updating an existing entry moves it to the tail
//! - Any entry can be unlinked in O(1) using its slab key
//!
//! The list itself only holds endpoints and a length; the link pointers
//! live inside the entries.

use slab::Slab;

use crate::table::Entry;

/// Recency list over all live entries.
///
/// The actual entry data lives in the slab; this struct only holds the
/// list metadata.
#[derive(Debug, Clone, Default)]
pub struct OrderList {
    /// Head of the list (least recently inserted or updated, slab key)
    head: Option<usize>,

    /// Tail of the list (most recently inserted or updated, slab key)
    tail: Option<usize>,

    /// Number of linked entries
    len: usize,
}

impl OrderList {
    /// Create a new empty list
    pub fn new() -> Self {
        Self {
            head: None,
            tail: None,
            len: 0,
        }
    }

    /// Check if the list is empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of linked entries
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Slab key of the oldest entry
    #[inline]
    pub fn head(&self) -> Option<usize> {
        self.head
    }

    /// Slab key of the most recently touched entry
    #[inline]
    pub fn tail(&self) -> Option<usize> {
        self.tail
    }

    /// Append an entry at the tail of the list
    ///
    /// # Arguments
    ///
    /// * `key` - The slab key for the entry
    /// * `entries` - The slab containing all entries
    ///
    /// # Panics
    ///
    /// Panics if the key doesn't exist in the slab
    pub fn push_back<K, V>(&mut self, key: usize, entries: &mut Slab<Entry<K, V>>) {
        let entry = entries.get_mut(key).expect("Invalid slab key");

        // Update linked list pointers
        entry.prev = self.tail;
        entry.next = None;

        if let Some(tail_key) = self.tail {
            // Link the old tail to the new entry
            let tail_entry = entries.get_mut(tail_key).expect("Invalid tail key");
            tail_entry.next = Some(key);
        } else {
            // Empty list - this is also the head
            self.head = Some(key);
        }

        self.tail = Some(key);
        self.len += 1;
    }

    /// Unlink an entry from the list by slab key
    ///
    /// Patches the neighbor pointers and the `head`/`tail` endpoints, then
    /// clears the entry's own pointers. The entry stays in the slab.
    ///
    /// # Panics
    ///
    /// Panics if the key doesn't exist in the slab
    pub fn unlink<K, V>(&mut self, key: usize, entries: &mut Slab<Entry<K, V>>) {
        let entry = entries.get(key).expect("Invalid slab key");
        let prev_key = entry.prev;
        let next_key = entry.next;

        // Update the previous entry's next pointer
        if let Some(prev) = prev_key {
            let prev_entry = entries.get_mut(prev).expect("Invalid prev key");
            prev_entry.next = next_key;
        } else {
            // This was the head
            self.head = next_key;
        }

        // Update the next entry's prev pointer
        if let Some(next) = next_key {
            let next_entry = entries.get_mut(next).expect("Invalid next key");
            next_entry.prev = prev_key;
        } else {
            // This was the tail
            self.tail = prev_key;
        }

        // Clear the unlinked entry's pointers
        let entry = entries.get_mut(key).expect("Invalid slab key");
        entry.prev = None;
        entry.next = None;

        self.len -= 1;
    }

    /// Move an already-linked entry to the tail of the list
    ///
    /// No-op if the entry is already the tail.
    ///
    /// # Panics
    ///
    /// Panics if the key doesn't exist in the slab
    pub fn move_to_back<K, V>(&mut self, key: usize, entries: &mut Slab<Entry<K, V>>) {
        if self.tail == Some(key) {
            return; // Already at the end
        }

        self.unlink(key, entries);
        self.push_back(key, entries);
    }

    /// Reset the list to empty
    pub fn clear(&mut self) {
        self.head = None;
        self.tail = None;
        self.len = 0;
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
