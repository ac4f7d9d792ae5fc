/*!
 * Document formats, extraction, structural elements, and output writing.
 *
 * Submodules:
 * - `format`: the closed set of supported formats
 * - `extractor`: format-detecting extraction front door
 * - `elements`: per-document catalog of tables and figures
 * - `markdown`: rich format codec (pipe tables, image figures)
 * - `pdf`: printable format codec backed by oxidize-pdf
 * - `writer`: output byte production per format
 */

// Re-export main types for easier usage
pub use self::elements::{
    CatalogSummary, ElementCatalog, FigureElement, FigureStatus, TableElement, TableStatus,
};
pub use self::extractor::{extract_document, ExtractedDocument};
pub use self::format::DocumentFormat;
pub use self::writer::write_output;

// Submodules
pub mod elements;
pub mod extractor;
pub mod format;
pub mod markdown;
pub mod pdf;
pub mod writer;
