/*!
 * Tests for document format detection, extraction, and output writing
 */

use doctrans::document::{extract_document, write_output, DocumentFormat, ElementCatalog};
use doctrans::errors::DocumentError;

use crate::common;

#[test]
fn test_format_detection_shouldMapKnownExtensions() {
    assert_eq!(DocumentFormat::from_path("a.txt").unwrap(), DocumentFormat::PlainText);
    assert_eq!(DocumentFormat::from_path("a.md").unwrap(), DocumentFormat::RichDocument);
    assert_eq!(DocumentFormat::from_path("a.pdf").unwrap(), DocumentFormat::PrintableDocument);
}

#[test]
fn test_format_detection_withUnsupportedExtension_shouldBeFatal() {
    let error = DocumentFormat::from_path("legacy.rtf").unwrap_err();
    assert!(matches!(error, DocumentError::UnsupportedFormat(_)));
    assert!(error.to_string().contains("rtf"));
}

#[test]
fn test_extract_plainText_shouldHaveNoCatalog() {
    let dir = common::create_temp_dir().unwrap();
    let path = common::create_test_document(&dir.path().to_path_buf(), "doc.txt").unwrap();

    let document = extract_document(&path).unwrap();
    assert!(document.catalog.is_none());
    assert!(document.text.contains("test document"));
}

#[test]
fn test_extract_richDocument_shouldLiftTablesAndFigures() {
    let dir = common::create_temp_dir().unwrap();
    let path = common::create_test_rich_document(&dir.path().to_path_buf(), "report.md").unwrap();

    let document = extract_document(&path).unwrap();
    let catalog = document.catalog.unwrap();

    assert!(document.text.contains("[TABLE_001]"));
    assert!(document.text.contains("[FIGURE_001]"));
    assert!(!document.text.contains('|'));

    let table = catalog.table("TABLE_001").unwrap();
    assert_eq!(table.rows.len(), 3); // header + 2 data rows, separator dropped
    assert_eq!(table.rows[0], vec!["Quarter", "Revenue"]);
    assert_eq!(catalog.figure("FIGURE_001").unwrap().caption, "Revenue chart");
}

#[test]
fn test_write_output_roundTrip_richDocument_shouldRestoreTable() {
    let dir = common::create_temp_dir().unwrap();
    let path = common::create_test_rich_document(&dir.path().to_path_buf(), "report.md").unwrap();
    let document = extract_document(&path).unwrap();
    let catalog = document.catalog.unwrap();

    // Pretend translation left the text untouched
    let (bytes, diagnostics) =
        write_output(&document.text, DocumentFormat::RichDocument, Some(&catalog)).unwrap();
    let output = String::from_utf8(bytes).unwrap();

    assert!(diagnostics.is_empty());
    assert!(output.contains("| Quarter | Revenue |"));
    assert!(output.contains("| Q2 | 150 |"));
    assert!(output.contains("**[FIGURE_001: Revenue chart]**"));
}

#[test]
fn test_write_output_plainText_shouldPassBodyThrough() {
    let (bytes, _) = write_output("Corps traduit.", DocumentFormat::PlainText, None).unwrap();
    assert_eq!(String::from_utf8(bytes).unwrap(), "Corps traduit.\n");
}

#[test]
fn test_write_output_pdf_shouldProduceParsableHeader() {
    let (bytes, _) = write_output(
        "First paragraph of the translation.\n\nSecond paragraph.",
        DocumentFormat::PrintableDocument,
        None,
    )
    .unwrap();
    assert!(bytes.starts_with(b"%PDF"));
    assert!(bytes.len() > 100);
}

#[test]
fn test_write_output_richDocument_withDanglingMarker_shouldReportDiagnostic() {
    let mut catalog = ElementCatalog::new();
    catalog.add_table(vec![vec!["h".to_string()], vec!["v".to_string()]]);

    // Body references a figure the catalog never saw
    let body = "[TABLE_001]\n\n[FIGURE_009]";
    let (bytes, diagnostics) =
        write_output(body, DocumentFormat::RichDocument, Some(&catalog)).unwrap();
    let output = String::from_utf8(bytes).unwrap();

    assert!(output.contains("| h |"));
    assert!(output.contains("[FIGURE_009 - Failed to insert]"));
    assert_eq!(diagnostics, vec!["FIGURE_009: Failed to insert"]);
}
