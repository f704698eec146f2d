//! Fixed-capacity probing table with recency tracking.
//!
//! ## Architecture
//!
//! The table is built from three pieces sharing one set of live entries:
//!
//! - **Slab-based storage**: every entry lives once in a pre-allocated
//!   arena and is addressed by its stable slab key
//! - **Slot array**: open addressing with linear probing over slab keys
//! - **Recency list**: intrusive doubly-linked list ordered by last
//!   insertion or update
//!
//! ## Components
//!
//! - [`Entry`]: key/value pair with linked-list pointers for the recency list
//! - [`OrderList`]: the recency list endpoints and link maintenance
//! - [`FixedTable`]: the table itself, with probing and cluster repair
//! - [`TableError`]: the two failure modes, full-on-new-key and missing-key
//!
//! ## Performance
//!
//! | Operation        | Complexity |
//! |------------------|------------|
//! | Insert / update  | O(probe)   |
//! | Get              | O(probe)   |
//! | Remove           | O(cluster) |
//! | Oldest / newest  | O(1)       |
//!
//! Probe and cluster lengths are bounded by the fixed capacity; at low
//! load factors they are short. There is no resizing, so degradation
//! under high load factors is an accepted property of the design.
//!
//! ## Example
//!
//! ```
//! use probemap::table::FixedTable;
//!
//! let mut table = FixedTable::new(1024);
//!
//! table.insert("tale", 1u64).unwrap();
//! assert_eq!(table.newest(), Some((&"tale", &1)));
//! ```

pub mod entry;
pub mod fixed_table;
pub mod order_list;

pub use entry::Entry;
pub use fixed_table::{FixedTable, TableError};
pub use order_list::OrderList;
