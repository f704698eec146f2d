//! Core data types shared by the producers.
//!
//! ## Types
//!
//! - [`AggTrade`]: The 7-field aggregate trade record from the exchange
//! - [`fixed`]: Decimal-string to fixed-point conversion (scaled by 10^8)
//!
//! ## Fixed-Point Arithmetic
//!
//! Prices and quantities are converted from wire strings to `u64` scaled
//! by 10^8. Example: 50000.12345678 is stored as 5_000_012_345_678u64

mod trade;
pub mod fixed;

// Re-export at module level
pub use trade::AggTrade;
