/*!
 * Sentence boundary capability.
 *
 * Segmentation prefers sentence boundaries as split points but does not own
 * boundary detection: it is a pluggable capability behind the `SentenceSplit`
 * trait. The built-in `RuleSplitter` covers the common case; when a splitter
 * reports itself unavailable the segmenter degrades to `fallback_split`.
 */

use anyhow::Result;

/// Pluggable sentence boundary detection
pub trait SentenceSplit: Send + Sync {
    /// Split text into an ordered sequence of sentences.
    ///
    /// An `Err` means the capability is unavailable; the caller then falls
    /// back to the `". "` heuristic. It does not mean the text is invalid.
    fn split(&self, text: &str) -> Result<Vec<String>>;
}

/// Rule-based splitter: a sentence ends at `.`, `!` or `?` followed by
/// whitespace (or end of input). Decimal points and mid-token punctuation
/// do not terminate a sentence.
#[derive(Debug, Default, Clone, Copy)]
pub struct RuleSplitter;

impl SentenceSplit for RuleSplitter {
    fn split(&self, text: &str) -> Result<Vec<String>> {
        let mut sentences = Vec::new();
        let mut current = String::new();
        let mut chars = text.chars().peekable();

        while let Some(c) = chars.next() {
            current.push(c);
            if matches!(c, '.' | '!' | '?')
                && chars.peek().is_none_or(|next| next.is_whitespace())
            {
                // Swallow the whitespace run that ends the sentence
                while chars.peek().is_some_and(|next| next.is_whitespace()) {
                    chars.next();
                }
                let sentence = current.trim();
                if !sentence.is_empty() {
                    sentences.push(sentence.to_string());
                }
                current.clear();
            }
        }

        let tail = current.trim();
        if !tail.is_empty() {
            sentences.push(tail.to_string());
        }
        Ok(sentences)
    }
}

/// Heuristic degradation for when no splitter is available: split on `". "`
/// and restore the terminal period each non-final fragment lost.
pub fn fallback_split(text: &str) -> Vec<String> {
    let parts: Vec<&str> = text.split(". ").collect();
    let count = parts.len();

    parts
        .into_iter()
        .enumerate()
        .filter_map(|(i, part)| {
            let trimmed = part.trim();
            if trimmed.is_empty() {
                return None;
            }
            if i + 1 < count {
                Some(format!("{}.", trimmed))
            } else {
                Some(trimmed.to_string())
            }
        })
        .collect()
}
