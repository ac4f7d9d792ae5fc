/*!
 * Segmentation, placeholder preservation, concurrent dispatch, reassembly.
 *
 * This module is the core of the application: it turns extracted document
 * text into bounded translation units, keeps non-text structural elements as
 * opaque markers across translation, dispatches units concurrently with
 * per-unit failure isolation, and deterministically reassembles the
 * translated body in document order. Submodules:
 *
 * - `placeholder`: marker extraction and segment reattachment
 * - `sentence`: pluggable sentence boundary capability with heuristic fallback
 * - `segmenter`: greedy bounded-length sentence packing
 * - `dispatcher`: concurrent per-segment translation with outcome collection
 * - `reassembler`: ordered reassembly of segments and markers
 */

// Re-export main types for easier usage
pub use self::dispatcher::{
    failure_placeholder, DispatchResult, DocumentOutcome, SegmentDispatcher, SegmentOutcome,
};
pub use self::placeholder::{attach_markers, strip_markers, MarkerKind, StructuralMarker};
pub use self::reassembler::reassemble;
pub use self::segmenter::{segment_text, Segment, DEFAULT_MAX_SEGMENT_CHARS};
pub use self::sentence::{RuleSplitter, SentenceSplit};

// Submodules
pub mod dispatcher;
pub mod placeholder;
pub mod reassembler;
pub mod segmenter;
pub mod sentence;
