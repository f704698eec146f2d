//! Table entry for slab-based storage.
//!
//! ## Design
//!
//! `Entry` wraps a `(key, value)` pair with doubly-linked list pointers for
//! the recency list. Every live entry is stored exactly once in the slab;
//! the slot array and the recency list both refer to it by its slab key.
//!
//! ## Slab Integration
//!
//! Per official slab docs (https://docs.rs/slab/0.4.11):
//! - Keys are `usize` values returned by `slab.insert()`
//! - Keys stay valid until `slab.remove()`, no matter how the slot array
//!   is rearranged around them
//! - O(1) insert, remove, and lookup
//!
//! ## Linked List
//!
//! Live entries form a doubly-linked list ordered by last insertion or
//! update:
//! - `next`: Points to the next entry (more recently touched)
//! - `prev`: Points to the previous entry (less recently touched)
//!
//! The pointers are slab keys, not slot indices, so relocating an entry to
//! a different slot during cluster repair leaves the list intact.

/// Entry stored in the slab.
///
/// Contains the key/value pair plus linked-list pointers for the recency
/// list. The pointers are slab keys (`usize`), not direct references.
#[derive(Debug, Clone)]
pub struct Entry<K, V> {
    /// The key this entry is addressed by
    pub key: K,

    /// The stored value (replaced in place on update)
    pub value: V,

    /// Next entry in the recency list (slab key)
    /// None if this is the tail (most recently touched)
    pub next: Option<usize>,

    /// Previous entry in the recency list (slab key)
    /// None if this is the head (least recently touched)
    pub prev: Option<usize>,
}

impl<K, V> Entry<K, V> {
    /// Create a new entry (not yet linked)
    ///
    /// # Example
    ///
    /// ```
    /// use probemap::table::Entry;
    ///
    /// let entry = Entry::new("carton", 42u64);
    ///
    /// assert!(entry.next.is_none());
    /// assert!(entry.prev.is_none());
    /// ```
    #[inline]
    pub fn new(key: K, value: V) -> Self {
        Self {
            key,
            value,
            next: None,
            prev: None,
        }
    }

    /// Check if this entry is unlinked (not part of the recency list)
    #[inline]
    pub fn is_unlinked(&self) -> bool {
        self.next.is_none() && self.prev.is_none()
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
