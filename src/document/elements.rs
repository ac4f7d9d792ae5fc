/*!
 * Structural element catalog for rich documents.
 *
 * Holds the tables and figures lifted out of a document during extraction,
 * keyed by their generated marker ids, tracks per-element translation status,
 * and carries the diagnostics accumulated along the way. Created per
 * document, mutated during table-cell translation, consumed read-only during
 * output reconstruction.
 */

use std::collections::BTreeMap;

use log::debug;

use crate::translation::TranslateUnit;

/// Translation status of an extracted table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableStatus {
    /// Captured from the source document, not yet translated
    Extracted,
    /// Every non-empty cell translated
    Translated,
    /// At least one cell kept its original text after a failed translation
    PartiallyTranslated,
    /// The table could not be processed at all
    Failed,
}

/// Status of an extracted figure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FigureStatus {
    /// Caption captured from the source document
    Extracted,
    /// The figure could not be captured
    Failed,
}

/// A table captured as a grid of cell text
#[derive(Debug, Clone)]
pub struct TableElement {
    /// Original cell grid, row-major
    pub rows: Vec<Vec<String>>,
    /// Current status
    pub status: TableStatus,
    /// Translated grid, present after cell translation ran
    pub translated_rows: Option<Vec<Vec<String>>>,
}

/// A figure captured as its caption
#[derive(Debug, Clone)]
pub struct FigureElement {
    /// Caption text (may be empty)
    pub caption: String,
    /// Current status
    pub status: FigureStatus,
}

/// Processing counts reported after a rich document completes
#[derive(Debug, Clone)]
pub struct CatalogSummary {
    /// Number of tables in the catalog
    pub tables_total: usize,
    /// Tables whose every cell translated
    pub tables_successful: usize,
    /// Number of figures in the catalog
    pub figures_total: usize,
    /// Figures captured intact
    pub figures_successful: usize,
    /// Accumulated diagnostics, in occurrence order
    pub errors: Vec<String>,
}

/// Per-document catalog of non-text structural elements
#[derive(Debug, Default)]
pub struct ElementCatalog {
    /// Tables keyed by marker id; BTreeMap keeps zero-padded ids in
    /// document order
    tables: BTreeMap<String, TableElement>,
    /// Figures keyed by marker id
    figures: BTreeMap<String, FigureElement>,
    /// Append-only diagnostics
    errors: Vec<String>,
}

impl ElementCatalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the catalog holds no elements at all
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty() && self.figures.is_empty()
    }

    /// Register a table, assigning the next id in first-seen order
    pub fn add_table(&mut self, rows: Vec<Vec<String>>) -> String {
        let id = format!("TABLE_{:03}", self.tables.len() + 1);
        self.tables.insert(
            id.clone(),
            TableElement {
                rows,
                status: TableStatus::Extracted,
                translated_rows: None,
            },
        );
        id
    }

    /// Register a figure, assigning the next id in first-seen order
    pub fn add_figure(&mut self, caption: impl Into<String>) -> String {
        let id = format!("FIGURE_{:03}", self.figures.len() + 1);
        self.figures.insert(
            id.clone(),
            FigureElement {
                caption: caption.into(),
                status: FigureStatus::Extracted,
            },
        );
        id
    }

    /// Append a diagnostic message
    pub fn record_error(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
    }

    /// Look up a table by id
    pub fn table(&self, id: &str) -> Option<&TableElement> {
        self.tables.get(id)
    }

    /// Look up a figure by id
    pub fn figure(&self, id: &str) -> Option<&FigureElement> {
        self.figures.get(id)
    }

    /// Table ids in document order
    pub fn table_ids(&self) -> Vec<String> {
        self.tables.keys().cloned().collect()
    }

    /// Translate every non-empty cell of a table, keeping cell positions.
    ///
    /// A failed cell keeps its original text and is recorded in the
    /// diagnostics; the table ends `Translated` only when every cell
    /// succeeded, `PartiallyTranslated` otherwise. Returns whether the whole
    /// table translated cleanly.
    pub async fn translate_table_cells(
        &mut self,
        table_id: &str,
        capability: &dyn TranslateUnit,
    ) -> bool {
        let Some(table) = self.tables.get(table_id) else {
            self.errors.push(format!("{}: Table not found", table_id));
            return false;
        };
        if table.status != TableStatus::Extracted {
            return false;
        }

        let rows = table.rows.clone();
        let mut translated_rows = Vec::with_capacity(rows.len());
        let mut failed_cells = Vec::new();

        for (row_idx, row) in rows.iter().enumerate() {
            let mut translated_row = Vec::with_capacity(row.len());
            for (col_idx, cell_text) in row.iter().enumerate() {
                if cell_text.trim().is_empty() {
                    translated_row.push(cell_text.clone());
                    continue;
                }
                match capability.translate_unit(cell_text).await {
                    Ok(translated) => translated_row.push(translated),
                    Err(e) => {
                        failed_cells.push(format!("Row {}, Col {}: {}", row_idx + 1, col_idx + 1, e));
                        // Keep the original cell text on failure
                        translated_row.push(cell_text.clone());
                    }
                }
            }
            translated_rows.push(translated_row);
        }

        let success = failed_cells.is_empty();
        debug!("Translated {} with {} failed cell(s)", table_id, failed_cells.len());
        if !success {
            self.errors
                .push(format!("{} - Failed cells: {}", table_id, failed_cells.join(", ")));
        }

        if let Some(table) = self.tables.get_mut(table_id) {
            table.translated_rows = Some(translated_rows);
            table.status = if success {
                TableStatus::Translated
            } else {
                TableStatus::PartiallyTranslated
            };
        }
        success
    }

    /// Summarize processing results
    pub fn summary(&self) -> CatalogSummary {
        CatalogSummary {
            tables_total: self.tables.len(),
            tables_successful: self
                .tables
                .values()
                .filter(|t| t.status == TableStatus::Translated)
                .count(),
            figures_total: self.figures.len(),
            figures_successful: self
                .figures
                .values()
                .filter(|f| f.status == FigureStatus::Extracted)
                .count(),
            errors: self.errors.clone(),
        }
    }
}
