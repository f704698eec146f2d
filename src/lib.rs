//! # probemap
//!
//! Fixed-capacity open-addressing hash table with recency tracking.
//!
//! ## Architecture
//!
//! The crate consists of:
//! - **Table**: Fixed-capacity hash table (linear probing + recency list)
//! - **Types**: The aggregate trade record and fixed-point conversions
//! - **Corpus**: Word-frequency producer over a Project Gutenberg text
//! - **Feed**: Live aggregate-trade producer over a Binance websocket
//!
//! ## Design Principles
//!
//! 1. **Fixed Capacity**: The table never resizes or evicts; a full
//!    table rejects new keys and the caller decides what to do
//! 2. **Dual Structure**: Slot array and recency list are two views over
//!    one slab of entries, consistent under every mutation
//! 3. **Synchronous Core**: No async and no I/O inside the table;
//!    producers run on tokio and feed it completed values
//! 4. **No Floating Point on Money**: Prices and quantities convert to
//!    fixed-point u64 (10^8 scaling)

// ============================================================================
// Module declarations
// ============================================================================

/// Word-frequency producer: download, strip, tokenize, count
pub mod corpus;

/// Live trade producer: websocket stream, validation, metrics
pub mod feed;

/// Fixed-capacity hash table with recency tracking
pub mod table;

/// Shared data types: AggTrade, fixed-point conversion
pub mod types;

// ============================================================================
// Re-exports for convenience
// ============================================================================

pub use corpus::{BookCorpus, CorpusError};
pub use feed::{FeedError, ParseMetrics, TradeFeed};
pub use table::{Entry, FixedTable, OrderList, TableError};
pub use types::AggTrade;
