//! probemap - Binary Entry Point
//!
//! Three ways to exercise the table:
//! - `demo`: scripted walkthrough of the table operations
//! - `corpus`: word-frequency counting over a Project Gutenberg text
//! - `feed`: live aggregate trades streamed into a bounded recency table

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};

use probemap::corpus::{self, BookCorpus};
use probemap::feed::TradeFeed;
use probemap::table::{FixedTable, TableError};
use probemap::types::{fixed, AggTrade};

/// Command-line configuration
#[derive(Parser, Debug)]
#[command(name = "probemap")]
#[command(version = "0.1.0")]
#[command(about = "Fixed-capacity probing table fed by a word corpus or a live trade stream", long_about = None)]
struct Cli {
    /// Log level
    #[arg(short = 'l', long, default_value = "info", value_parser = ["trace", "debug", "info", "warn", "error"])]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Scripted walkthrough of insert, update, remove, and recency
    Demo,

    /// Count word frequencies from a Project Gutenberg text
    Corpus {
        /// Source URL for the text
        #[arg(long, default_value = corpus::DEFAULT_BOOK_URL)]
        url: String,

        /// Local cache file (written on download, read as fallback)
        #[arg(long, default_value = corpus::DEFAULT_CACHE_FILE)]
        cache: PathBuf,

        /// Table capacity (distinct words)
        #[arg(short, long, default_value_t = 20_000)]
        capacity: usize,
    },

    /// Stream live aggregate trades into a bounded recency table
    Feed {
        /// Futures symbol to stream
        #[arg(short, long, default_value = "BTCUSDT")]
        symbol: String,

        /// Streaming window in seconds
        #[arg(short, long, default_value_t = 10)]
        duration: u64,

        /// Table capacity (trades kept)
        #[arg(short, long, default_value_t = 1024)]
        capacity: usize,

        /// Measure parsing performance instead of filling the table
        #[arg(long, default_value_t = false)]
        measure: bool,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    if let Err(err) = run(cli.command).await {
        tracing::error!("fatal: {err}");
        std::process::exit(1);
    }
}

async fn run(command: Command) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Command::Demo => run_demo(),
        Command::Corpus {
            url,
            cache,
            capacity,
        } => run_corpus(&url, &cache, capacity).await?,
        Command::Feed {
            symbol,
            duration,
            capacity,
            measure,
        } => run_feed(&symbol, duration, capacity, measure).await?,
    }

    Ok(())
}

/// Initialize the log subscriber
fn init_logging(level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

/// Scripted walkthrough of the table behavior
fn run_demo() {
    println!("===========================================");
    println!("  probemap - fixed-capacity recency table");
    println!("===========================================");
    println!();

    let mut table = FixedTable::new(3);
    println!("Created table with capacity {}", table.capacity());

    table.insert("best", 1u64).unwrap();
    table.insert("of", 2).unwrap();
    table.insert("times", 3).unwrap();
    println!("Inserted: best=1, of=2, times=3");
    println!("  oldest: {:?}", table.oldest());
    println!("  newest: {:?}", table.newest());
    println!();

    table.insert("best", 10).unwrap();
    println!("Updated: best=10 (same slot, promoted to newest)");
    println!("  oldest: {:?}", table.oldest());
    println!("  newest: {:?}", table.newest());
    println!();

    table.remove(&"of").unwrap();
    println!("Removed: of");
    println!("  get(\"of\")    -> {:?}", table.get(&"of"));
    println!("  get(\"times\") -> {:?}", table.get(&"times"));
    println!("  get(\"best\")  -> {:?}", table.get(&"best"));
    println!();

    table.insert("worst", 4).unwrap();
    println!("Inserted: worst=4 (freed capacity reused)");

    match table.insert("epoch", 5) {
        Err(TableError::CapacityExceeded { capacity }) => {
            println!("Inserting a {}th distinct key fails: table is full", capacity + 1);
        }
        other => println!("unexpected result: {:?}", other),
    }
    println!();
    println!("Final count: {}/{}", table.len(), table.capacity());
}

/// Fetch a text and count its word frequencies in the table
async fn run_corpus(
    url: &str,
    cache: &PathBuf,
    capacity: usize,
) -> Result<(), Box<dyn std::error::Error>> {
    let loader = BookCorpus::new(url, cache);
    let text = loader.fetch().await?;

    let body = BookCorpus::strip_boilerplate(&text);
    let words = BookCorpus::tokenize(body);
    let freq = BookCorpus::frequencies(&words);

    println!("Total words: {}", words.len());
    println!("Unique words: {}", freq.len());

    // Feed the word sequence through the table: each occurrence bumps
    // the count and promotes the word to the newest end
    let mut table: FixedTable<String, u64> = FixedTable::new(capacity);
    let mut skipped = 0usize;

    for word in &words {
        let count = match table.get(word) {
            Ok(count) => count + 1,
            Err(TableError::KeyNotFound) => 1,
            Err(err) => return Err(err.into()),
        };

        match table.insert(word.clone(), count) {
            Ok(()) => {}
            // Full table: the caller decides; here we just drop new words
            Err(TableError::CapacityExceeded { .. }) => skipped += 1,
            Err(err) => return Err(err.into()),
        }
    }

    println!();
    println!("Table: {}/{} words", table.len(), table.capacity());
    if skipped > 0 {
        println!("Skipped {} occurrences of words beyond capacity", skipped);
    }

    if let Some((word, count)) = table.oldest() {
        println!("Least recently seen: {:?} ({} occurrences)", word, count);
    }
    if let Some((word, count)) = table.newest() {
        println!("Most recently seen:  {:?} ({} occurrences)", word, count);
    }

    for probe in ["the", "city", "guillotine"] {
        match table.get(&probe.to_string()) {
            Ok(count) => println!("count({:?}) = {}", probe, count),
            Err(_) => println!("count({:?}) = not present", probe),
        }
    }

    Ok(())
}

/// Stream live trades into a bounded recency table
async fn run_feed(
    symbol: &str,
    duration: u64,
    capacity: usize,
    measure: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let feed = TradeFeed::new(symbol);
    let window = Duration::from_secs(duration);

    if measure {
        let metrics = feed.measure_parsing(window).await?;
        println!("{metrics}");
        return Ok(());
    }

    let mut table: FixedTable<u64, AggTrade> = FixedTable::new(capacity);
    let mut evicted = 0usize;

    let received = feed
        .stream_trades(window, |trade| {
            // The table never evicts on its own; when it fills up,
            // retire the oldest trade to make room for the new one
            if table.is_full() && !table.contains_key(&trade.agg_id) {
                if let Some(oldest_id) = table.oldest().map(|(id, _)| *id) {
                    table.remove(&oldest_id).ok();
                    evicted += 1;
                }
            }

            if let Err(err) = table.insert(trade.agg_id, trade) {
                tracing::warn!("dropping trade: {err}");
            }
        })
        .await?;

    println!("Received {} trades for {}", received, symbol);
    println!("Table: {}/{} trades ({} evicted)", table.len(), table.capacity(), evicted);

    if let Some((id, trade)) = table.oldest() {
        println!(
            "Oldest trade: id={} price={} qty={}",
            id,
            trade.price_fixed().map(fixed::from_fixed).unwrap_or_else(|| trade.price.clone()),
            trade.quantity,
        );
    }
    if let Some((id, trade)) = table.newest() {
        println!(
            "Newest trade: id={} price={} qty={}",
            id,
            trade.price_fixed().map(fixed::from_fixed).unwrap_or_else(|| trade.price.clone()),
            trade.quantity,
        );
    }

    Ok(())
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["probemap", "demo"]);
        assert_eq!(cli.log_level, "info");
        assert!(matches!(cli.command, Command::Demo));
    }

    #[test]
    fn test_cli_feed_args() {
        let cli = Cli::parse_from([
            "probemap", "feed", "--symbol", "ETHUSDT", "--duration", "5", "--measure",
        ]);

        match cli.command {
            Command::Feed {
                symbol,
                duration,
                capacity,
                measure,
            } => {
                assert_eq!(symbol, "ETHUSDT");
                assert_eq!(duration, 5);
                assert_eq!(capacity, 1024);
                assert!(measure);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_cli_corpus_defaults() {
        let cli = Cli::parse_from(["probemap", "corpus"]);

        match cli.command {
            Command::Corpus { url, cache, capacity } => {
                assert_eq!(url, corpus::DEFAULT_BOOK_URL);
                assert_eq!(cache, PathBuf::from(corpus::DEFAULT_CACHE_FILE));
                assert_eq!(capacity, 20_000);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
