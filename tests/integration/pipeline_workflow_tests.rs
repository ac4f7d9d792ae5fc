/*!
 * End-to-end document translation tests.
 *
 * The mock-driven tests exercise the whole pipeline against the in-process
 * capability; the controller tests run against an unreachable local endpoint
 * so every capability call fails fast, exercising the failure-isolation
 * path without any network dependency.
 */

use std::fs;
use std::sync::Arc;

use doctrans::app_config::{Config, TranslationProvider};
use doctrans::app_controller::Controller;
use doctrans::document::{extract_document, write_output, DocumentFormat};
use doctrans::pipeline::{
    attach_markers, reassemble, segment_text, strip_markers, DocumentOutcome, RuleSplitter,
    SegmentDispatcher,
};
use doctrans::providers::mock::MockTranslator;
use doctrans::translation::TranslateUnit;

use crate::common;

/// Config pointing at a port nothing listens on, with retries disabled
fn offline_config() -> Config {
    let mut config = Config::default();
    config.source_language = "en".to_string();
    config.target_language = "fr".to_string();
    config.translation.provider = TranslationProvider::Ollama;
    config.translation.common.retry_count = 0;
    config.translation.common.retry_backoff_ms = 1;
    if let Some(provider) = config
        .translation
        .available_providers
        .iter_mut()
        .find(|p| p.provider_type == "ollama")
    {
        provider.endpoint = "http://127.0.0.1:9".to_string();
        provider.concurrent_requests = 4;
    }
    config
}

#[tokio::test]
async fn test_mock_workflow_richDocument_shouldTranslateAndRestoreElements() {
    let dir = common::create_temp_dir().unwrap();
    let input = common::create_test_rich_document(&dir.path().to_path_buf(), "report.md").unwrap();

    // Extract and run the front half of the pipeline
    let extracted = extract_document(&input).unwrap();
    let mut catalog = extracted.catalog.unwrap();
    let (clean, markers) = strip_markers(&extracted.text);
    let segments = segment_text(&clean, 400, &RuleSplitter);
    let marker_map = attach_markers(&segments, &markers);

    // Translate table cells and the body with the mock capability
    let capability: Arc<dyn TranslateUnit> = Arc::new(MockTranslator::working());
    for table_id in catalog.table_ids() {
        assert!(catalog.translate_table_cells(&table_id, capability.as_ref()).await);
    }
    let result = SegmentDispatcher::new(8)
        .dispatch(&segments, Arc::clone(&capability), |_, _| {})
        .await;
    assert_eq!(result.outcome, DocumentOutcome::AllSucceeded);

    // Reassemble and write rich output
    let body = reassemble(&result.translated, &marker_map);
    let (bytes, diagnostics) =
        write_output(&body, DocumentFormat::RichDocument, Some(&catalog)).unwrap();
    let output = String::from_utf8(bytes).unwrap();

    assert!(diagnostics.is_empty());
    assert!(output.contains("[TRANSLATED]"));
    assert!(output.contains("| [TRANSLATED] Quarter | [TRANSLATED] Revenue |"));
    assert!(output.contains("**[FIGURE_001: Revenue chart]**"));
    // No raw marker tokens survive in the final document
    assert!(!output.contains("[TABLE_001]"));
}

#[tokio::test]
async fn test_controller_translate_document_withUnreachableProvider_shouldIsolateFailures() {
    let dir = common::create_temp_dir().unwrap();
    let input = common::create_test_file(
        &dir.path().to_path_buf(),
        "tiny.txt",
        "Only one short sentence.",
    )
    .unwrap();

    let controller = Controller::with_config(offline_config()).unwrap();
    let translated = controller.translate_document(&input, |_, _| {}).await.unwrap();

    assert_eq!(
        translated.outcome,
        DocumentOutcome::PartialFailure { failed: vec![1] }
    );
    assert_eq!(translated.body, "[TRANSLATION FAILED: Segment 1]");
}

#[tokio::test]
async fn test_controller_run_withUnreachableProvider_shouldStillWriteOutput() {
    let dir = common::create_temp_dir().unwrap();
    let input = common::create_test_file(
        &dir.path().to_path_buf(),
        "doc.txt",
        "A sentence to translate.",
    )
    .unwrap();

    let controller = Controller::with_config(offline_config()).unwrap();
    controller
        .run(input, dir.path().to_path_buf(), None, true)
        .await
        .unwrap();

    let output_path = dir.path().join("doc.fr.txt");
    let output = fs::read_to_string(&output_path).unwrap();
    assert!(output.contains("[TRANSLATION FAILED: Segment 1]"));
}

#[tokio::test]
async fn test_controller_run_withExistingOutput_shouldSkipWithoutForce() {
    let dir = common::create_temp_dir().unwrap();
    let input = common::create_test_file(
        &dir.path().to_path_buf(),
        "doc.txt",
        "A sentence to translate.",
    )
    .unwrap();
    let existing =
        common::create_test_file(&dir.path().to_path_buf(), "doc.fr.txt", "already here").unwrap();

    let controller = Controller::with_config(offline_config()).unwrap();
    controller
        .run(input, dir.path().to_path_buf(), None, false)
        .await
        .unwrap();

    // Untouched without -f
    assert_eq!(fs::read_to_string(&existing).unwrap(), "already here");
}

#[tokio::test]
async fn test_controller_run_withUnsupportedFormat_shouldFail() {
    let dir = common::create_temp_dir().unwrap();
    let input =
        common::create_test_file(&dir.path().to_path_buf(), "doc.rtf", "content").unwrap();

    let controller = Controller::with_config(offline_config()).unwrap();
    let result = controller.run(input, dir.path().to_path_buf(), None, true).await;
    assert!(result.is_err());
}

#[test]
fn test_controller_new_for_test_shouldBeInitialized() {
    let controller = Controller::new_for_test().unwrap();
    assert!(controller.is_initialized());
}

#[tokio::test]
async fn test_controller_run_withMissingInput_shouldFail() {
    let dir = common::create_temp_dir().unwrap();
    let controller = Controller::with_config(offline_config()).unwrap();
    let result = controller
        .run(dir.path().join("ghost.txt"), dir.path().to_path_buf(), None, true)
        .await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_controller_run_folder_shouldProcessSupportedDocuments() {
    let dir = common::create_temp_dir().unwrap();
    common::create_test_file(&dir.path().to_path_buf(), "one.txt", "First doc.").unwrap();
    common::create_test_file(&dir.path().to_path_buf(), "ignored.rtf", "skip me").unwrap();

    let controller = Controller::with_config(offline_config()).unwrap();
    controller
        .run_folder(dir.path().to_path_buf(), Some(DocumentFormat::PlainText), true)
        .await
        .unwrap();

    assert!(dir.path().join("one.fr.txt").exists());
    assert!(!dir.path().join("ignored.fr.txt").exists());
}

#[tokio::test]
async fn test_controller_outputFormat_crossFormat_shouldEmitRequestedExtension() {
    let dir = common::create_temp_dir().unwrap();
    let input = common::create_test_file(
        &dir.path().to_path_buf(),
        "doc.txt",
        "One sentence only.",
    )
    .unwrap();

    let controller = Controller::with_config(offline_config()).unwrap();
    controller
        .run(
            input,
            dir.path().to_path_buf(),
            Some(DocumentFormat::PrintableDocument),
            true,
        )
        .await
        .unwrap();

    let bytes = fs::read(dir.path().join("doc.fr.pdf")).unwrap();
    assert!(bytes.starts_with(b"%PDF"));
}
