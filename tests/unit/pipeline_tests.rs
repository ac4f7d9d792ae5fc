/*!
 * Tests for the segmentation / placeholder / dispatch / reassembly pipeline
 */

use std::collections::HashSet;
use std::sync::Arc;

use doctrans::pipeline::{
    attach_markers, reassemble, segment_text, strip_markers, DocumentOutcome, RuleSplitter,
    SegmentDispatcher,
};
use doctrans::providers::mock::MockTranslator;
use doctrans::translation::TranslateUnit;

/// Strip, segment, and reattach in one go, the way the controller wires it
fn run_front_half(text: &str, max_chars: usize) -> (Vec<doctrans::Segment>, std::collections::BTreeMap<usize, Vec<String>>) {
    let (clean, markers) = strip_markers(text);
    let segments = segment_text(&clean, max_chars, &RuleSplitter);
    let map = attach_markers(&segments, &markers);
    (segments, map)
}

#[test]
fn test_marker_conservation_withManyMarkers_shouldAttachEveryMarkerOnce() {
    let text = "Start. [TABLE_001] Middle part one. [FIGURE_001] More text follows here. \
                [TABLE_002] Almost done. [FIGURE_002] The end. [TABLE_003]";
    let (clean, markers) = strip_markers(text);
    assert_eq!(markers.len(), 5);
    assert!(!clean.contains('['));

    let segments = segment_text(&clean, 30, &RuleSplitter);
    let map = attach_markers(&segments, &markers);

    let attached: usize = map.values().map(|ids| ids.len()).sum();
    assert_eq!(attached, 5);

    let mut seen = HashSet::new();
    for id in map.values().flatten() {
        assert!(seen.insert(id.clone()), "marker {id} attached twice");
    }
}

#[test]
fn test_tableMarkerBetweenSentences_shouldMapToFirstSegment() {
    let (segments, map) = run_front_half("A. [TABLE_001] B.", 400);
    assert_eq!(segments.len(), 1);
    assert_eq!(map.get(&0), Some(&vec!["TABLE_001".to_string()]));
}

#[test]
fn test_segmentation_coverage_shouldReproduceCleanTextWords() {
    let text = "The first sentence of the input. A second sentence arrives. Then a third one. \
                Finally the fourth sentence closes it out.";
    let (clean, _) = strip_markers(text);
    let segments = segment_text(&clean, 50, &RuleSplitter);

    let original_words: Vec<&str> = clean.split_whitespace().collect();
    let segment_words: Vec<String> = segments
        .iter()
        .flat_map(|s| s.source_text.split_whitespace().map(|w| w.to_string()).collect::<Vec<_>>())
        .collect();
    assert_eq!(segment_words, original_words);
}

#[tokio::test]
async fn test_threeSegmentsOneFailure_shouldSubstituteAndReport() {
    let text = "First segment sentence. Second segment sentence. Third segment sentence.";
    let (segments, map) = run_front_half(text, 25);
    assert_eq!(segments.len(), 3);

    // Fail exactly the middle segment
    let capability: Arc<dyn TranslateUnit> =
        Arc::new(MockTranslator::failing_on([segments[1].source_text.clone()]));

    let dispatcher = SegmentDispatcher::new(4);
    let result = dispatcher.dispatch(&segments, capability, |_, _| {}).await;

    assert_eq!(result.outcome, DocumentOutcome::PartialFailure { failed: vec![2] });

    let body = reassemble(&result.translated, &map);
    let paragraphs: Vec<&str> = body.split("\n\n").collect();
    assert_eq!(paragraphs[1], "[TRANSLATION FAILED: Segment 2]");
    assert!(paragraphs[0].starts_with("[TRANSLATED]"));
    assert!(paragraphs[2].starts_with("[TRANSLATED]"));
}

#[tokio::test]
async fn test_full_pipeline_withMarkers_shouldKeepMarkersOutOfTranslationInput() {
    let text = "Before the table. [TABLE_001] After the table. [FIGURE_001]";
    let (segments, map) = run_front_half(text, 400);

    for segment in &segments {
        assert!(
            !segment.source_text.contains("[TABLE_") && !segment.source_text.contains("[FIGURE_"),
            "marker leaked into translation input: {:?}",
            segment
        );
    }

    let capability: Arc<dyn TranslateUnit> = Arc::new(MockTranslator::working());
    let result = SegmentDispatcher::new(8)
        .dispatch(&segments, capability, |_, _| {})
        .await;

    let body = reassemble(&result.translated, &map);
    assert!(body.contains("[TABLE_001]"));
    assert!(body.contains("[FIGURE_001]"));
    // Marker order survives translation
    assert!(body.find("[TABLE_001]").unwrap() < body.find("[FIGURE_001]").unwrap());
}

#[tokio::test]
async fn test_dispatch_completeness_forVariousSegmentCounts_shouldRecordEveryIndex() {
    for count in [0usize, 1, 2, 7, 33] {
        let text: String = (0..count)
            .map(|i| format!("Sentence number {} is right here.", i))
            .collect::<Vec<_>>()
            .join(" ");
        let segments = segment_text(&text, 20, &RuleSplitter);

        let capability: Arc<dyn TranslateUnit> = Arc::new(MockTranslator::working());
        let result = SegmentDispatcher::new(5)
            .dispatch(&segments, capability, |_, _| {})
            .await;

        assert_eq!(result.translated.len(), segments.len());
        assert!(!matches!(result.outcome, DocumentOutcome::Incomplete { .. }));
    }
}

#[tokio::test]
async fn test_failure_isolation_withAllButOneFailing_shouldStillCarryTheSuccess() {
    let text = "Good sentence here. Bad sentence one. Bad sentence two.";
    let (segments, _) = run_front_half(text, 20);
    assert_eq!(segments.len(), 3);

    let capability: Arc<dyn TranslateUnit> = Arc::new(MockTranslator::failing_on([
        segments[1].source_text.clone(),
        segments[2].source_text.clone(),
    ]));
    let result = SegmentDispatcher::new(2)
        .dispatch(&segments, capability, |_, _| {})
        .await;

    assert_eq!(
        result.outcome,
        DocumentOutcome::PartialFailure { failed: vec![2, 3] }
    );
    assert_eq!(result.translated[0], "[TRANSLATED] Good sentence here.");
}

#[test]
fn test_reassembly_withEmptyDocument_shouldProduceEmptyBody() {
    let (segments, map) = run_front_half("", 400);
    assert!(segments.is_empty());
    assert_eq!(reassemble(&[], &map), "");
}

#[test]
fn test_markerOnly_document_shouldSurviveTheFrontHalf() {
    let (segments, map) = run_front_half("[TABLE_001]", 400);
    assert!(segments.is_empty());

    let body = reassemble(&[], &map);
    assert_eq!(body, "[TABLE_001]");
}
