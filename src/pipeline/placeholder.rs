/*!
 * Structural placeholder extraction and reattachment.
 *
 * Extracted document text can carry opaque marker tokens (`[TABLE_001]`,
 * `[FIGURE_002]`) standing in for non-text elements. Markers must never reach
 * the translation capability, so they are stripped before segmentation and
 * mapped back onto segments afterwards by character range containment.
 */

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use regex::Regex;

use super::segmenter::Segment;

// Strict wire format: 3-digit zero-padded sequence, case-sensitive.
// Anything else inside brackets is ordinary text and is left in place.
static MARKER_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\[(TABLE|FIGURE)_([0-9]{3})\]").unwrap()
});

/// Kind of structural element a marker stands in for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerKind {
    /// A table captured as a cell grid
    Table,
    /// A figure captured as a caption
    Figure,
}

impl MarkerKind {
    /// Uppercase wire-format prefix for this kind
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Table => "TABLE",
            Self::Figure => "FIGURE",
        }
    }
}

/// A non-text element recorded during placeholder extraction
#[derive(Debug, Clone, PartialEq)]
pub struct StructuralMarker {
    /// Element kind parsed from the marker token
    pub kind: MarkerKind,

    /// Marker identity, e.g. "TABLE_001"; unique within a document
    pub id: String,

    /// Character offset in the marker-free text where the token sat.
    /// Offsets are computed progressively as markers are stripped so they
    /// stay comparable to segment character ranges computed later.
    pub offset: usize,
}

impl StructuralMarker {
    /// Re-render the marker in its literal `[ID]` wire form
    pub fn token(&self) -> String {
        format!("[{}]", self.id)
    }
}

/// Strip every well-formed marker token from the text.
///
/// Returns the marker-free text plus the ordered marker list with offsets
/// into that clean text. Malformed bracketed tokens stay untouched.
/// Pure function, no side effects.
pub fn strip_markers(text: &str) -> (String, Vec<StructuralMarker>) {
    let mut clean = String::with_capacity(text.len());
    let mut clean_chars = 0usize;
    let mut markers = Vec::new();
    let mut last_end = 0usize;

    for caps in MARKER_REGEX.captures_iter(text) {
        let matched = caps.get(0).unwrap();
        let preceding = &text[last_end..matched.start()];
        clean.push_str(preceding);
        clean_chars += preceding.chars().count();

        let kind = match &caps[1] {
            "TABLE" => MarkerKind::Table,
            _ => MarkerKind::Figure,
        };
        markers.push(StructuralMarker {
            kind,
            id: format!("{}_{}", kind.as_str(), &caps[2]),
            offset: clean_chars,
        });
        last_end = matched.end();
    }

    clean.push_str(&text[last_end..]);
    (clean, markers)
}

/// Map every marker onto the segment whose character range contained it.
///
/// Segment ranges are computed by running offset accumulation over the
/// segments' character lengths, in index order. A marker whose offset lands
/// beyond the last segment's range attaches to the final segment; a marker is
/// never dropped. With no segments at all (a document that was nothing but
/// markers) everything attaches to index 0 and the reassembler emits the
/// markers on their own.
pub fn attach_markers(
    segments: &[Segment],
    markers: &[StructuralMarker],
) -> BTreeMap<usize, Vec<String>> {
    let mut map: BTreeMap<usize, Vec<String>> = BTreeMap::new();
    if markers.is_empty() {
        return map;
    }

    // Half-open char range [start, start + len) per segment
    let mut ranges = Vec::with_capacity(segments.len());
    let mut start = 0usize;
    for segment in segments {
        let len = segment.char_len();
        ranges.push((start, start + len));
        start += len;
    }

    let last_index = segments.len().saturating_sub(1);
    for marker in markers {
        let index = ranges
            .iter()
            .position(|&(range_start, range_end)| {
                marker.offset >= range_start && marker.offset < range_end
            })
            .unwrap_or(last_index);
        map.entry(index).or_default().push(marker.id.clone());
    }

    map
}
