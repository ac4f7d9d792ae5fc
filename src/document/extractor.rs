/*!
 * Text extraction front door.
 *
 * Dispatches on the detected document format and hands back extracted text
 * plus, for the rich format, the structural element catalog. Low-level codec
 * details live with each format module.
 */

use std::fs;
use std::path::Path;

use log::debug;

use crate::errors::DocumentError;

use super::elements::ElementCatalog;
use super::format::DocumentFormat;
use super::{markdown, pdf};

/// Extraction result: text plus an optional element catalog
#[derive(Debug)]
pub struct ExtractedDocument {
    /// Extracted text, markers included for rich documents
    pub text: String,

    /// Structural elements lifted out during extraction (rich formats only)
    pub catalog: Option<ElementCatalog>,
}

/// Extract a document's text, detecting the format from the file extension.
///
/// Fails with `UnsupportedFormat` for unrecognized extensions and
/// `ExtractionFailed` when the file cannot be read or holds no text.
pub fn extract_document<P: AsRef<Path>>(path: P) -> Result<ExtractedDocument, DocumentError> {
    let path = path.as_ref();
    let format = DocumentFormat::from_path(path)?;
    debug!("Extracting {:?} as {}", path, format);

    match format {
        DocumentFormat::PlainText => {
            let text = fs::read_to_string(path)
                .map_err(|e| DocumentError::ExtractionFailed(format!("{:?}: {}", path, e)))?;
            Ok(ExtractedDocument { text, catalog: None })
        }
        DocumentFormat::RichDocument => {
            let content = fs::read_to_string(path)
                .map_err(|e| DocumentError::ExtractionFailed(format!("{:?}: {}", path, e)))?;
            Ok(markdown::extract(&content))
        }
        DocumentFormat::PrintableDocument => pdf::extract(path),
    }
}
