/*!
 * Output writing for translated documents.
 *
 * Turns a translated body into file bytes for the requested format. The
 * rich writer consults the element catalog to re-insert table and figure
 * content at marker sites and degrades to plain-paragraph markdown when no
 * catalog is available.
 */

use log::warn;

use crate::errors::DocumentError;

use super::elements::ElementCatalog;
use super::format::DocumentFormat;
use super::{markdown, pdf};

/// Produce file bytes for the translated body in the requested format.
///
/// Returns the bytes plus any per-element reconstruction diagnostics; those
/// are recoverable conditions already reflected as visible failure markers
/// in the output.
pub fn write_output(
    body: &str,
    format: DocumentFormat,
    catalog: Option<&ElementCatalog>,
) -> Result<(Vec<u8>, Vec<String>), DocumentError> {
    match format {
        DocumentFormat::PlainText => {
            let mut text = body.to_string();
            if !text.ends_with('\n') {
                text.push('\n');
            }
            Ok((text.into_bytes(), Vec::new()))
        }
        DocumentFormat::RichDocument => match catalog {
            Some(catalog) if !catalog.is_empty() => {
                let (reconstructed, diagnostics) = markdown::reconstruct(body, catalog);
                if !diagnostics.is_empty() {
                    warn!("{} element(s) failed to re-insert", diagnostics.len());
                }
                Ok((into_markdown_bytes(reconstructed), diagnostics))
            }
            // No elements to re-insert: plain-paragraph markdown
            _ => Ok((into_markdown_bytes(body.to_string()), Vec::new())),
        },
        DocumentFormat::PrintableDocument => Ok((pdf::write(body)?, Vec::new())),
    }
}

fn into_markdown_bytes(mut content: String) -> Vec<u8> {
    if !content.ends_with('\n') {
        content.push('\n');
    }
    content.into_bytes()
}
