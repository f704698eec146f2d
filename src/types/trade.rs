//! Aggregate trade record from the Binance futures stream.
//!
//! ## Wire Format
//!
//! The `<symbol>@aggTrade` stream delivers JSON frames with short field
//! names. The record carries exactly seven fields of interest:
//!
//! ```text
//! {
//!   "a": 26129,          // Aggregate trade ID
//!   "p": "0.01633102",   // Price (decimal string)
//!   "q": "4.70443515",   // Quantity (decimal string)
//!   "f": 27781,          // First trade ID
//!   "l": 27781,          // Last trade ID
//!   "T": 1498793709153,  // Trade time (ms)
//!   "m": true            // Was the buyer the maker?
//! }
//! ```
//!
//! Deserialization is strict on field presence and types (a string where
//! an integer belongs rejects the frame); extra envelope fields such as
//! the event type and symbol are ignored.

use serde::{Deserialize, Serialize};

use crate::types::fixed;

/// A single aggregate trade: one price level's worth of fills bundled by
/// the exchange.
///
/// Price and quantity stay in their wire form (decimal strings) until a
/// caller asks for the fixed-point representation.
///
/// ## Example
///
/// ```
/// use probemap::types::AggTrade;
///
/// let frame = r#"{"a":26129,"p":"0.01633102","q":"4.70443515",
///                 "f":27781,"l":27781,"T":1498793709153,"m":true}"#;
/// let trade: AggTrade = serde_json::from_str(frame).unwrap();
///
/// assert_eq!(trade.agg_id, 26129);
/// assert_eq!(trade.price_fixed(), Some(1_633_102));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggTrade {
    /// Aggregate trade ID
    #[serde(rename = "a")]
    pub agg_id: u64,

    /// Price as a decimal string
    #[serde(rename = "p")]
    pub price: String,

    /// Quantity as a decimal string
    #[serde(rename = "q")]
    pub quantity: String,

    /// First bundled trade ID
    #[serde(rename = "f")]
    pub first_id: u64,

    /// Last bundled trade ID
    #[serde(rename = "l")]
    pub last_id: u64,

    /// Trade time in milliseconds since the epoch
    #[serde(rename = "T")]
    pub timestamp: u64,

    /// Whether the buyer was the maker
    #[serde(rename = "m")]
    pub buyer_is_maker: bool,
}

impl AggTrade {
    /// Price in fixed-point (scaled by 10^8)
    ///
    /// `None` if the exchange sent an unparsable price string.
    #[inline]
    pub fn price_fixed(&self) -> Option<u64> {
        fixed::to_fixed(&self.price)
    }

    /// Quantity in fixed-point (scaled by 10^8)
    #[inline]
    pub fn quantity_fixed(&self) -> Option<u64> {
        fixed::to_fixed(&self.quantity)
    }

    /// Notional value of this trade (price * quantity)
    ///
    /// The result is in raw fixed-point form, scaled by 10^16
    /// (10^8 * 10^8). `None` if either field fails to parse.
    pub fn notional_raw(&self) -> Option<u128> {
        let price = self.price_fixed()? as u128;
        let quantity = self.quantity_fixed()? as u128;
        Some(price * quantity)
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const VALID_FRAME: &str = r#"{
        "e": "aggTrade",
        "E": 1498793709188,
        "s": "BTCUSDT",
        "a": 26129,
        "p": "0.01633102",
        "q": "4.70443515",
        "f": 27781,
        "l": 27781,
        "T": 1498793709153,
        "m": true
    }"#;

    #[test]
    fn test_parse_valid_frame() {
        let trade: AggTrade = serde_json::from_str(VALID_FRAME).unwrap();

        assert_eq!(trade.agg_id, 26129);
        assert_eq!(trade.price, "0.01633102");
        assert_eq!(trade.quantity, "4.70443515");
        assert_eq!(trade.first_id, 27781);
        assert_eq!(trade.last_id, 27781);
        assert_eq!(trade.timestamp, 1498793709153);
        assert!(trade.buyer_is_maker);
    }

    #[test]
    fn test_parse_ignores_envelope_fields() {
        // Event type, event time, and symbol are not part of the record
        let trade: AggTrade = serde_json::from_str(VALID_FRAME).unwrap();
        let bare = r#"{"a":26129,"p":"0.01633102","q":"4.70443515",
                       "f":27781,"l":27781,"T":1498793709153,"m":true}"#;
        let bare_trade: AggTrade = serde_json::from_str(bare).unwrap();

        assert_eq!(trade, bare_trade);
    }

    #[test]
    fn test_parse_rejects_missing_field() {
        // No "m" field
        let frame = r#"{"a":26129,"p":"0.01633102","q":"4.70443515",
                        "f":27781,"l":27781,"T":1498793709153}"#;

        assert!(serde_json::from_str::<AggTrade>(frame).is_err());
    }

    #[test]
    fn test_parse_rejects_wrong_types() {
        // "a" as a string instead of an integer
        let frame = r#"{"a":"26129","p":"0.01633102","q":"4.70443515",
                        "f":27781,"l":27781,"T":1498793709153,"m":true}"#;
        assert!(serde_json::from_str::<AggTrade>(frame).is_err());

        // "p" as a number instead of a string
        let frame = r#"{"a":26129,"p":0.01633102,"q":"4.70443515",
                        "f":27781,"l":27781,"T":1498793709153,"m":true}"#;
        assert!(serde_json::from_str::<AggTrade>(frame).is_err());

        // "m" as a string instead of a bool
        let frame = r#"{"a":26129,"p":"0.01633102","q":"4.70443515",
                        "f":27781,"l":27781,"T":1498793709153,"m":"true"}"#;
        assert!(serde_json::from_str::<AggTrade>(frame).is_err());
    }

    #[test]
    fn test_fixed_point_accessors() {
        let trade: AggTrade = serde_json::from_str(VALID_FRAME).unwrap();

        assert_eq!(trade.price_fixed(), Some(1_633_102));
        assert_eq!(trade.quantity_fixed(), Some(470_443_515));
        assert_eq!(
            trade.notional_raw(),
            Some(1_633_102u128 * 470_443_515u128),
        );
    }

    #[test]
    fn test_fixed_point_unparsable() {
        let mut trade: AggTrade = serde_json::from_str(VALID_FRAME).unwrap();
        trade.price = "garbage".to_string();

        assert_eq!(trade.price_fixed(), None);
        assert_eq!(trade.notional_raw(), None);
    }

    #[test]
    fn test_serialize_roundtrip() {
        let trade: AggTrade = serde_json::from_str(VALID_FRAME).unwrap();

        let encoded = serde_json::to_string(&trade).unwrap();
        let decoded: AggTrade = serde_json::from_str(&encoded).unwrap();

        assert_eq!(trade, decoded);
    }
}
