/*!
 * PDF codec: the printable document format.
 *
 * Extraction pulls page text through the oxidize-pdf parser. Writing renders
 * paragraphs with naive width-estimate line wrapping onto A4 pages; layout
 * fidelity is out of scope, paragraph order is what matters.
 */

use std::path::Path;

use oxidize_pdf::parser::PdfReader;
use oxidize_pdf::{Document, Font, Page};

use crate::errors::DocumentError;

use super::extractor::ExtractedDocument;

// A4 geometry in points
const PAGE_WIDTH: f64 = 595.0;
const PAGE_HEIGHT: f64 = 842.0;
const MARGIN: f64 = 50.0;
const FONT_SIZE: f64 = 11.0;
const LINE_HEIGHT: f64 = 16.0;

// Rough average glyph width for Helvetica at FONT_SIZE
const CHAR_WIDTH: f64 = FONT_SIZE * 0.55;

/// Extract the text of every page, joined with newlines
pub fn extract<P: AsRef<Path>>(path: P) -> Result<ExtractedDocument, DocumentError> {
    let document = PdfReader::open_document(path.as_ref())
        .map_err(|e| DocumentError::ExtractionFailed(format!("Failed to open PDF: {}", e)))?;

    let pages = document
        .extract_text()
        .map_err(|e| DocumentError::ExtractionFailed(format!("Failed to extract PDF text: {}", e)))?;

    let text = pages
        .into_iter()
        .map(|page| page.text)
        .collect::<Vec<_>>()
        .join("\n");

    if text.trim().is_empty() {
        return Err(DocumentError::ExtractionFailed(
            "PDF contains no extractable text".to_string(),
        ));
    }

    Ok(ExtractedDocument { text, catalog: None })
}

/// Render the translated body to PDF bytes
pub fn write(body: &str) -> Result<Vec<u8>, DocumentError> {
    let mut document = Document::new();
    let max_chars_per_line = ((PAGE_WIDTH - 2.0 * MARGIN) / CHAR_WIDTH) as usize;

    let mut lines: Vec<String> = Vec::new();
    for paragraph in body.split("\n\n") {
        let paragraph = paragraph.trim();
        if paragraph.is_empty() {
            continue;
        }
        lines.extend(wrap_paragraph(paragraph, max_chars_per_line));
        // Blank line between paragraphs
        lines.push(String::new());
    }

    let mut page = Page::a4();
    let mut y = PAGE_HEIGHT - MARGIN;

    for line in &lines {
        if y < MARGIN {
            document.add_page(page);
            page = Page::a4();
            y = PAGE_HEIGHT - MARGIN;
        }
        if !line.is_empty() {
            page.text()
                .set_font(Font::Helvetica, FONT_SIZE)
                .at(MARGIN, y)
                .write(line)
                .map_err(|e| DocumentError::OutputWrite(format!("PDF text write failed: {}", e)))?;
        }
        y -= LINE_HEIGHT;
    }
    document.add_page(page);

    let mut bytes = Vec::new();
    document
        .write(&mut bytes)
        .map_err(|e| DocumentError::OutputWrite(format!("PDF serialization failed: {}", e)))?;
    Ok(bytes)
}

/// Greedy word wrapping against an estimated line width
fn wrap_paragraph(paragraph: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in paragraph.split_whitespace() {
        let candidate_len = if current.is_empty() {
            word.chars().count()
        } else {
            current.chars().count() + 1 + word.chars().count()
        };

        if candidate_len <= max_chars {
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(word);
        } else {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            current.push_str(word);
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}
