/*!
 * Text segmentation for translation.
 *
 * Splits placeholder-free text into an ordered sequence of bounded-length
 * translation units, packing whole sentences greedily. A single sentence
 * longer than the bound becomes its own oversized segment rather than being
 * split mid-sentence, so the translation capability always sees complete
 * sentences. Output is byte-identical across runs for identical input.
 */

use log::{debug, warn};

use super::sentence::{fallback_split, SentenceSplit};

/// Default maximum characters per translation unit
pub const DEFAULT_MAX_SEGMENT_CHARS: usize = 400;

/// A bounded unit of translatable text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    /// 0-based position in document order; authoritative for reassembly
    pub index: usize,

    /// Non-empty source text, length <= the configured max except for a
    /// single oversized sentence
    pub source_text: String,
}

impl Segment {
    /// Length in characters (Unicode scalar values), the unit all pipeline
    /// offset arithmetic is done in
    pub fn char_len(&self) -> usize {
        self.source_text.chars().count()
    }
}

/// Split text into ordered bounded-length segments.
///
/// Sentences come from the given splitter; if it reports itself unavailable
/// the `". "` heuristic takes over. That is a quality degradation, not an
/// error.
pub fn segment_text(text: &str, max_chars: usize, splitter: &dyn SentenceSplit) -> Vec<Segment> {
    let sentences = match splitter.split(text) {
        Ok(sentences) => sentences,
        Err(e) => {
            warn!("Sentence splitter unavailable, degrading to heuristic: {}", e);
            fallback_split(text)
        }
    };

    let segments = pack_sentences(sentences, max_chars.max(1));
    debug!("Segmented {} chars into {} segment(s)", text.chars().count(), segments.len());
    segments
}

/// Greedily pack sentences into segments no longer than `max_chars`.
fn pack_sentences(sentences: Vec<String>, max_chars: usize) -> Vec<Segment> {
    let mut segments: Vec<Segment> = Vec::new();
    let mut current = String::new();
    let mut current_chars = 0usize;

    let mut close_current = |segments: &mut Vec<Segment>, current: &mut String| {
        let text = current.trim();
        if !text.is_empty() {
            segments.push(Segment {
                index: segments.len(),
                source_text: text.to_string(),
            });
        }
        current.clear();
    };

    for sentence in sentences {
        let sentence = sentence.trim();
        if sentence.is_empty() {
            continue;
        }
        let sentence_chars = sentence.chars().count();
        let separator = usize::from(!current.is_empty());

        if current_chars + separator + sentence_chars <= max_chars {
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(sentence);
            current_chars += separator + sentence_chars;
        } else {
            // Close the running segment and start over with this sentence.
            // An oversized sentence lands alone in the fresh segment and is
            // never split mid-sentence.
            close_current(&mut segments, &mut current);
            current.push_str(sentence);
            current_chars = sentence_chars;
        }
    }
    close_current(&mut segments, &mut current);

    segments
}
