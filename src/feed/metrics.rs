//! Parsing-performance metrics for the trade stream.

use std::fmt;
use std::time::Duration;

/// Result of a parsing measurement over a streaming window.
///
/// Stream throughput is bounded by the network; parsing throughput is
/// bounded by the CPU. Comparing the two shows how much headroom the
/// validation path has over the wire rate.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseMetrics {
    /// Frames received during the window
    pub total_trades: usize,

    /// Frames that passed 7-field validation
    pub valid_trades: usize,

    /// Wall-clock seconds spent streaming
    pub stream_secs: f64,

    /// Total milliseconds spent parsing all frames
    pub parse_ms: f64,

    /// Average parse time per frame in nanoseconds
    pub ns_per_trade: f64,

    /// Frames parsed per second (CPU limited)
    pub parse_throughput: f64,

    /// Frames received per second (network limited)
    pub stream_throughput: f64,
}

impl ParseMetrics {
    /// Derive the metrics from raw counts and timings.
    ///
    /// # Arguments
    ///
    /// * `total` - Frames received (must be nonzero for meaningful rates)
    /// * `valid` - Frames that parsed successfully
    /// * `stream_time` - Wall-clock duration of the streaming window
    /// * `parse_time` - Duration of the parse pass over all frames
    pub fn compute(total: usize, valid: usize, stream_time: Duration, parse_time: Duration) -> Self {
        let stream_secs = stream_time.as_secs_f64();
        let parse_secs = parse_time.as_secs_f64();

        Self {
            total_trades: total,
            valid_trades: valid,
            stream_secs,
            parse_ms: parse_secs * 1_000.0,
            ns_per_trade: parse_secs * 1_000_000_000.0 / total as f64,
            parse_throughput: total as f64 / parse_secs,
            stream_throughput: total as f64 / stream_secs,
        }
    }
}

impl fmt::Display for ParseMetrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Parsing Performance ===")?;
        writeln!(f, "Total trades: {}", self.total_trades)?;
        writeln!(f, "Valid trades: {}", self.valid_trades)?;
        writeln!(f)?;
        writeln!(f, "Stream Performance:")?;
        writeln!(f, "  Duration: {:.2}s", self.stream_secs)?;
        writeln!(
            f,
            "  Throughput: {:.1} trades/sec (network limited)",
            self.stream_throughput
        )?;
        writeln!(f)?;
        writeln!(f, "Parsing Performance:")?;
        writeln!(f, "  Total time: {:.4}ms", self.parse_ms)?;
        writeln!(f, "  Per trade: {:.2}ns", self.ns_per_trade)?;
        write!(
            f,
            "  Throughput: {:.0} trades/sec (CPU limited)",
            self.parse_throughput
        )
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
