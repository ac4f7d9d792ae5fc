/*!
 * Tests for the structural element catalog
 */

use doctrans::document::{ElementCatalog, FigureStatus, TableStatus};
use doctrans::providers::mock::MockTranslator;

fn two_by_two() -> Vec<Vec<String>> {
    vec![
        vec!["north".to_string(), "east".to_string()],
        vec!["south".to_string(), "west".to_string()],
    ]
}

#[test]
fn test_add_table_shouldAssignSequentialIds() {
    let mut catalog = ElementCatalog::new();
    assert_eq!(catalog.add_table(two_by_two()), "TABLE_001");
    assert_eq!(catalog.add_table(two_by_two()), "TABLE_002");
    assert_eq!(catalog.add_figure("chart"), "FIGURE_001");
    assert_eq!(catalog.table_ids(), vec!["TABLE_001", "TABLE_002"]);
}

#[test]
fn test_new_catalog_shouldBeEmpty() {
    let catalog = ElementCatalog::new();
    assert!(catalog.is_empty());
    let summary = catalog.summary();
    assert_eq!(summary.tables_total, 0);
    assert_eq!(summary.figures_total, 0);
    assert!(summary.errors.is_empty());
}

#[tokio::test]
async fn test_translate_table_cells_withWorkingCapability_shouldMarkTranslated() {
    let mut catalog = ElementCatalog::new();
    let id = catalog.add_table(two_by_two());

    let ok = catalog.translate_table_cells(&id, &MockTranslator::working()).await;
    assert!(ok);

    let table = catalog.table(&id).unwrap();
    assert_eq!(table.status, TableStatus::Translated);
    let translated = table.translated_rows.as_ref().unwrap();
    assert_eq!(translated[0][0], "[TRANSLATED] north");
    assert_eq!(translated[1][1], "[TRANSLATED] west");
}

#[tokio::test]
async fn test_translate_table_cells_withOneFailedCell_shouldBePartialWithDiagnostic() {
    let mut catalog = ElementCatalog::new();
    let id = catalog.add_table(two_by_two());

    // One specific cell fails; the other three translate
    let capability = MockTranslator::failing_on(["east"]);
    let ok = catalog.translate_table_cells(&id, &capability).await;
    assert!(!ok);

    let table = catalog.table(&id).unwrap();
    assert_eq!(table.status, TableStatus::PartiallyTranslated);

    let translated = table.translated_rows.as_ref().unwrap();
    assert_eq!(translated[0][0], "[TRANSLATED] north");
    assert_eq!(translated[0][1], "east"); // original kept on failure
    assert_eq!(translated[1][0], "[TRANSLATED] south");
    assert_eq!(translated[1][1], "[TRANSLATED] west");

    let summary = catalog.summary();
    assert_eq!(summary.errors.len(), 1);
    assert!(summary.errors[0].contains("Row 1, Col 2"));
    assert_eq!(summary.tables_successful, 0);
}

#[tokio::test]
async fn test_translate_table_cells_withEmptyCells_shouldSkipThem() {
    let mut catalog = ElementCatalog::new();
    let id = catalog.add_table(vec![vec!["filled".to_string(), "".to_string()]]);

    let mock = MockTranslator::working();
    assert!(catalog.translate_table_cells(&id, &mock).await);
    // Only the non-empty cell reached the capability
    assert_eq!(mock.request_count(), 1);

    let table = catalog.table(&id).unwrap();
    assert_eq!(table.translated_rows.as_ref().unwrap()[0][1], "");
}

#[tokio::test]
async fn test_translate_table_cells_withUnknownId_shouldRecordError() {
    let mut catalog = ElementCatalog::new();
    let ok = catalog
        .translate_table_cells("TABLE_999", &MockTranslator::working())
        .await;
    assert!(!ok);
    assert!(catalog.summary().errors[0].contains("TABLE_999"));
}

#[tokio::test]
async fn test_translate_table_cells_twice_shouldNotRetranslate() {
    let mut catalog = ElementCatalog::new();
    let id = catalog.add_table(vec![vec!["cell".to_string()]]);

    assert!(catalog.translate_table_cells(&id, &MockTranslator::working()).await);
    // Second pass is a no-op because the table already left Extracted
    assert!(!catalog.translate_table_cells(&id, &MockTranslator::working()).await);
    assert_eq!(catalog.table(&id).unwrap().status, TableStatus::Translated);
}

#[test]
fn test_summary_shouldCountFiguresAsSuccessfulWhenExtracted() {
    let mut catalog = ElementCatalog::new();
    catalog.add_figure("one");
    catalog.add_figure("two");
    catalog.record_error("something went wrong");

    let summary = catalog.summary();
    assert_eq!(summary.figures_total, 2);
    assert_eq!(summary.figures_successful, 2);
    assert_eq!(summary.errors, vec!["something went wrong"]);

    assert_eq!(catalog.figure("FIGURE_001").unwrap().status, FigureStatus::Extracted);
}
