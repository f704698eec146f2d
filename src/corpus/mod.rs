//! Text-corpus loader producing word frequencies.
//!
//! ## Pipeline
//!
//! 1. Download a Project Gutenberg text (cached to a local file; the
//!    cache is the fallback when the network is unavailable)
//! 2. Strip the Gutenberg boilerplate around the actual book text
//! 3. Tokenize into lowercase alphabetic words
//! 4. Count word frequencies
//!
//! The loader is a pure producer: it hands `(word, count)` pairs to
//! whatever consumer wants them and knows nothing about the table.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Default text: "A Tale of Two Cities", Project Gutenberg #98
pub const DEFAULT_BOOK_URL: &str = "https://www.gutenberg.org/files/98/98-0.txt";

/// Default local cache file for the downloaded text
pub const DEFAULT_CACHE_FILE: &str = "98-0.txt";

/// Marker line preceding the book text in Gutenberg files
const START_MARKER: &str = "START OF THE PROJECT GUTENBERG EBOOK";

/// Marker line following the book text in Gutenberg files
const END_MARKER: &str = "END OF THE PROJECT GUTENBERG EBOOK";

/// Errors from fetching the corpus.
#[derive(Debug, Error)]
pub enum CorpusError {
    /// The download failed and no usable cache file existed.
    #[error("corpus unavailable: download failed and cache could not be read: {0}")]
    Io(#[from] std::io::Error),
}

/// Loader for one Project Gutenberg text.
///
/// ## Example
///
/// ```no_run
/// use probemap::corpus::BookCorpus;
///
/// # async fn demo() -> Result<(), probemap::corpus::CorpusError> {
/// let corpus = BookCorpus::default();
/// let text = corpus.fetch().await?;
/// let words = BookCorpus::tokenize(BookCorpus::strip_boilerplate(&text));
/// let freq = BookCorpus::frequencies(&words);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct BookCorpus {
    url: String,
    cache_path: PathBuf,
}

impl Default for BookCorpus {
    fn default() -> Self {
        Self::new(DEFAULT_BOOK_URL, DEFAULT_CACHE_FILE)
    }
}

impl BookCorpus {
    /// Create a loader for `url`, caching the download at `cache_path`
    pub fn new(url: impl Into<String>, cache_path: impl AsRef<Path>) -> Self {
        Self {
            url: url.into(),
            cache_path: cache_path.as_ref().to_path_buf(),
        }
    }

    /// The source URL
    #[inline]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// The local cache path
    #[inline]
    pub fn cache_path(&self) -> &Path {
        &self.cache_path
    }

    /// Fetch the raw text.
    ///
    /// Downloads from the source URL and writes the cache file on
    /// success. If the download fails, falls back to reading the cache;
    /// only when both fail is an error returned.
    pub async fn fetch(&self) -> Result<String, CorpusError> {
        tracing::info!(url = %self.url, "downloading corpus");

        match self.download().await {
            Ok(text) => {
                if let Err(err) = std::fs::write(&self.cache_path, &text) {
                    tracing::warn!(
                        path = %self.cache_path.display(),
                        "failed to write cache file: {err}"
                    );
                } else {
                    tracing::info!(path = %self.cache_path.display(), "corpus cached");
                }
                Ok(text)
            }
            Err(err) => {
                tracing::warn!(
                    "download failed ({err}), reading cache at {}",
                    self.cache_path.display()
                );
                Ok(std::fs::read_to_string(&self.cache_path)?)
            }
        }
    }

    async fn download(&self) -> Result<String, reqwest::Error> {
        let response = reqwest::get(&self.url).await?.error_for_status()?;
        response.text().await
    }

    /// Cut the Gutenberg boilerplate off both ends of the text.
    ///
    /// The book content starts on the line after the first line
    /// containing the START marker and ends before the last line
    /// containing the END marker. A missing marker leaves that end of
    /// the text as-is.
    pub fn strip_boilerplate(text: &str) -> &str {
        let start = match text.find(START_MARKER) {
            Some(pos) => match text[pos..].find('\n') {
                Some(newline) => pos + newline + 1,
                None => text.len(),
            },
            None => 0,
        };

        let end = match text[start..].rfind(END_MARKER) {
            Some(pos) => {
                let marker = start + pos;
                // Cut before the line the marker sits on
                match text[..marker].rfind('\n') {
                    Some(newline) => newline + 1,
                    None => start,
                }
            }
            None => text.len(),
        };

        &text[start..end]
    }

    /// Split the text into lowercase words.
    ///
    /// A word is a maximal run of ASCII alphabetic characters; digits,
    /// punctuation, and accented characters separate words.
    pub fn tokenize(text: &str) -> Vec<String> {
        let mut words = Vec::new();
        let mut current = String::new();

        for ch in text.chars() {
            if ch.is_ascii_alphabetic() {
                current.push(ch.to_ascii_lowercase());
            } else if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
        }

        if !current.is_empty() {
            words.push(current);
        }

        words
    }

    /// Count how often each word occurs
    pub fn frequencies(words: &[String]) -> HashMap<String, u64> {
        let mut freq = HashMap::new();
        for word in words {
            *freq.entry(word.clone()).or_insert(0) += 1;
        }
        freq
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
The Project Gutenberg eBook of A Tale of Two Cities
*** START OF THE PROJECT GUTENBERG EBOOK A TALE OF TWO CITIES ***
It was the best of times,
it was the worst of times.
*** END OF THE PROJECT GUTENBERG EBOOK A TALE OF TWO CITIES ***
Donations are gratefully accepted.
";

    #[test]
    fn test_strip_boilerplate() {
        let body = BookCorpus::strip_boilerplate(SAMPLE);

        assert!(body.starts_with("It was the best"));
        assert!(body.trim_end().ends_with("worst of times."));
        assert!(!body.contains("PROJECT GUTENBERG"));
        assert!(!body.contains("Donations"));
    }

    #[test]
    fn test_strip_boilerplate_without_markers() {
        let text = "no markers in sight";
        assert_eq!(BookCorpus::strip_boilerplate(text), text);
    }

    #[test]
    fn test_strip_boilerplate_start_only() {
        let text = "header\n*** START OF THE PROJECT GUTENBERG EBOOK X ***\nbody text";
        assert_eq!(BookCorpus::strip_boilerplate(text), "body text");
    }

    #[test]
    fn test_tokenize() {
        let words = BookCorpus::tokenize("It was the BEST of times!");

        assert_eq!(words, vec!["it", "was", "the", "best", "of", "times"]);
    }

    #[test]
    fn test_tokenize_splits_on_non_alpha() {
        let words = BookCorpus::tokenize("don't stop-gap 1859");

        assert_eq!(words, vec!["don", "t", "stop", "gap"]);
    }

    #[test]
    fn test_tokenize_empty() {
        assert!(BookCorpus::tokenize("123 456 ...").is_empty());
        assert!(BookCorpus::tokenize("").is_empty());
    }

    #[test]
    fn test_frequencies() {
        let words = BookCorpus::tokenize("it was the best of times it was the worst of times");
        let freq = BookCorpus::frequencies(&words);

        assert_eq!(freq["it"], 2);
        assert_eq!(freq["was"], 2);
        assert_eq!(freq["the"], 2);
        assert_eq!(freq["of"], 2);
        assert_eq!(freq["times"], 2);
        assert_eq!(freq["best"], 1);
        assert_eq!(freq["worst"], 1);
        assert_eq!(freq.len(), 7);
    }

    #[test]
    fn test_default_corpus() {
        let corpus = BookCorpus::default();

        assert_eq!(corpus.url(), DEFAULT_BOOK_URL);
        assert_eq!(corpus.cache_path(), Path::new(DEFAULT_CACHE_FILE));
    }
}
