//! WebSocket client for the Binance USD(S)-M futures trade stream.
//!
//! ## Stream
//!
//! One connection per symbol to `<base>/<symbol>@aggTrade`. The server
//! pushes one JSON text frame per aggregate trade and pings periodically;
//! unanswered pings get the connection dropped, so the read loop answers
//! them inline.
//!
//! ## Validation
//!
//! Frames are validated by strict deserialization into [`AggTrade`]:
//! all seven fields must be present with their exact types. Envelope
//! fields are ignored.

use std::time::{Duration, Instant};

use futures::{SinkExt, StreamExt};
use thiserror::Error;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::protocol::Message;

use crate::feed::ParseMetrics;
use crate::types::AggTrade;

/// Base URL of the Binance USD(S)-M futures websocket API
pub const WS_BASE_URL: &str = "wss://fstream.binance.com/ws";

/// Errors from the trade stream.
#[derive(Debug, Error)]
pub enum FeedError {
    /// Connection or transport failure.
    #[error("websocket error: {0}")]
    WebSocket(#[from] tokio_tungstenite::tungstenite::Error),

    /// A frame failed 7-field validation.
    #[error("invalid trade message: {0}")]
    Parse(#[from] serde_json::Error),

    /// The measurement window produced no frames to time.
    #[error("no trades received during the measurement window")]
    NoTrades,
}

/// Streaming client for one symbol's aggregate trades.
///
/// ## Example
///
/// ```no_run
/// use std::time::Duration;
/// use probemap::feed::TradeFeed;
///
/// # async fn demo() -> Result<(), probemap::feed::FeedError> {
/// let feed = TradeFeed::new("BTCUSDT");
/// let received = feed
///     .stream_trades(Duration::from_secs(10), |trade| {
///         println!("trade {} at {}", trade.agg_id, trade.price);
///     })
///     .await?;
/// println!("{received} trades");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct TradeFeed {
    symbol: String,
}

impl TradeFeed {
    /// Create a client for `symbol` (e.g. "BTCUSDT")
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
        }
    }

    /// The symbol this client streams
    #[inline]
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// The websocket endpoint for this symbol's aggregate trade stream
    pub fn endpoint(&self) -> String {
        format!("{}/{}@aggTrade", WS_BASE_URL, self.symbol.to_lowercase())
    }

    /// Validate and parse one raw frame into an [`AggTrade`]
    pub fn parse_trade(raw: &str) -> Result<AggTrade, FeedError> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Stream raw text frames until `duration` elapses.
    ///
    /// Calls `on_frame` with each text frame as received, answers pings,
    /// and closes the connection at the deadline. Returns the number of
    /// text frames delivered.
    pub async fn stream_raw<F>(&self, duration: Duration, mut on_frame: F) -> Result<usize, FeedError>
    where
        F: FnMut(String),
    {
        let endpoint = self.endpoint();
        tracing::info!(%endpoint, "connecting");

        let (stream, _response) = connect_async(endpoint.as_str()).await?;
        let (mut sink, mut source) = stream.split();
        tracing::info!(symbol = %self.symbol, "streaming trades");

        let deadline = Instant::now() + duration;
        let mut frames = 0usize;

        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                break;
            }

            let message = match tokio::time::timeout(remaining, source.next()).await {
                // Deadline reached while waiting for the next frame
                Err(_elapsed) => break,
                // Server closed the stream
                Ok(None) => break,
                Ok(Some(message)) => message?,
            };

            match message {
                Message::Text(text) => {
                    frames += 1;
                    on_frame(text);
                }
                Message::Ping(payload) => {
                    sink.send(Message::Pong(payload)).await?;
                }
                Message::Close(_) => break,
                _ => {}
            }
        }

        // Best-effort close; the window is over either way
        let _ = sink.send(Message::Close(None)).await;
        tracing::info!(frames, "stream closed");

        Ok(frames)
    }

    /// Stream parsed trades until `duration` elapses.
    ///
    /// Invalid frames are logged and skipped; the returned count is the
    /// number of text frames received, valid or not.
    pub async fn stream_trades<F>(&self, duration: Duration, mut on_trade: F) -> Result<usize, FeedError>
    where
        F: FnMut(AggTrade),
    {
        self.stream_raw(duration, |raw| match Self::parse_trade(&raw) {
            Ok(trade) => on_trade(trade),
            Err(err) => tracing::warn!("skipping invalid frame: {err}"),
        })
        .await
    }

    /// Measure parsing performance against a live stream.
    ///
    /// Collects raw frames for `duration`, then times a validation pass
    /// over all of them off the wire clock.
    ///
    /// # Errors
    ///
    /// [`FeedError::NoTrades`] if the window produced nothing to parse.
    pub async fn measure_parsing(&self, duration: Duration) -> Result<ParseMetrics, FeedError> {
        tracing::info!(symbol = %self.symbol, ?duration, "collecting trades");

        let mut frames = Vec::new();
        let stream_start = Instant::now();
        self.stream_raw(duration, |raw| frames.push(raw)).await?;
        let stream_time = stream_start.elapsed();

        if frames.is_empty() {
            return Err(FeedError::NoTrades);
        }

        let parse_start = Instant::now();
        let valid = frames
            .iter()
            .filter(|raw| Self::parse_trade(raw).is_ok())
            .count();
        let parse_time = parse_start.elapsed();

        Ok(ParseMetrics::compute(
            frames.len(),
            valid,
            stream_time,
            parse_time,
        ))
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
