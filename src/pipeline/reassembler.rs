/*!
 * Document reassembly.
 *
 * Walks translated segments in original index order, emitting each segment's
 * text followed by the marker tokens attached to it, all joined by paragraph
 * breaks. This mirrors placeholder extraction exactly, so markers land at
 * their original positions at paragraph granularity.
 */

use std::collections::BTreeMap;

/// Join translated segments and their reattached markers into the translated
/// document body.
///
/// Each segment's text is followed by its markers in literal `[ID]` form,
/// every element separated by a double newline. Map entries at or beyond the
/// segment count (a document that was nothing but markers) are emitted after
/// the last segment so no marker is ever lost.
pub fn reassemble(translated: &[String], marker_map: &BTreeMap<usize, Vec<String>>) -> String {
    let mut parts: Vec<String> = Vec::new();

    for (index, text) in translated.iter().enumerate() {
        let text = text.trim();
        if !text.is_empty() {
            parts.push(text.to_string());
        }
        if let Some(ids) = marker_map.get(&index) {
            parts.extend(ids.iter().map(|id| format!("[{}]", id)));
        }
    }

    // Entries the segment walk could not reach
    for (_, ids) in marker_map.range(translated.len()..) {
        parts.extend(ids.iter().map(|id| format!("[{}]", id)));
    }

    parts.join("\n\n")
}
