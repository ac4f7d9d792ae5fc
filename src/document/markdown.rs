/*!
 * Markdown codec: the rich document format.
 *
 * Extraction walks the document line by line, lifting pipe tables into the
 * element catalog as cell grids and image references as captioned figures,
 * substituting each element's position with its literal marker token.
 * Reconstruction parses the translated body for marker tokens (standalone
 * paragraphs and markers embedded in mixed text) and re-inserts the
 * translated or original element content. Per-element insertion failures
 * fall back to a visible failure paragraph instead of aborting.
 */

use once_cell::sync::Lazy;
use regex::Regex;

use super::elements::ElementCatalog;
use super::extractor::ExtractedDocument;

static IMAGE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"!\[([^\]]*)\]\(([^)]*)\)").unwrap()
});

static FULL_MARKER_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\[(TABLE|FIGURE)_([0-9]{3})\]$").unwrap()
});

static EMBEDDED_MARKER_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\[(?:TABLE|FIGURE)_[0-9]{3}\])").unwrap()
});

/// Extract markdown content into clean text plus an element catalog.
///
/// Table blocks and image references are replaced in the text stream by
/// their marker tokens, each on its own line.
pub fn extract(content: &str) -> ExtractedDocument {
    let mut catalog = ElementCatalog::new();
    let mut clean_lines: Vec<String> = Vec::new();

    let lines: Vec<&str> = content.lines().collect();
    let mut i = 0;
    while i < lines.len() {
        let line = lines[i].trim();

        if is_table_line(line) {
            // Collect the whole contiguous table block
            let start = i;
            while i < lines.len() && is_table_line(lines[i].trim()) {
                i += 1;
            }
            let rows = parse_table_rows(&lines[start..i]);
            if rows.is_empty() {
                catalog.record_error(format!(
                    "Table block at line {}: no parsable rows",
                    start + 1
                ));
                // Keep the original block as text rather than dropping content
                for original in &lines[start..i] {
                    clean_lines.push(original.to_string());
                }
            } else {
                let id = catalog.add_table(rows);
                clean_lines.push(format!("[{}]", id));
            }
            continue;
        }

        // Image references become figures; anything around them stays text
        if IMAGE_REGEX.is_match(line) {
            let replaced = IMAGE_REGEX
                .replace_all(line, |caps: &regex::Captures| {
                    let id = catalog.add_figure(caps[1].to_string());
                    format!("[{}]", id)
                })
                .into_owned();
            clean_lines.push(replaced);
        } else {
            clean_lines.push(lines[i].to_string());
        }
        i += 1;
    }

    ExtractedDocument {
        text: clean_lines.join("\n"),
        catalog: Some(catalog),
    }
}

fn is_table_line(line: &str) -> bool {
    line.starts_with('|') && line.len() > 1
}

/// Parse a pipe-table block into a cell grid, skipping separator rows
fn parse_table_rows(lines: &[&str]) -> Vec<Vec<String>> {
    lines
        .iter()
        .filter_map(|line| {
            let line = line.trim();
            let cells: Vec<String> = line
                .trim_matches('|')
                .split('|')
                .map(|cell| cell.trim().to_string())
                .collect();
            let is_separator = !cells.is_empty()
                && cells.iter().all(|cell| {
                    !cell.is_empty() && cell.chars().all(|c| matches!(c, '-' | ':' | ' '))
                });
            if is_separator { None } else { Some(cells) }
        })
        .filter(|cells| !cells.is_empty())
        .collect()
}

/// Render a cell grid back to a pipe table, using the first row as header
fn render_table(rows: &[Vec<String>]) -> Option<String> {
    let first = rows.first()?;
    let mut out = Vec::with_capacity(rows.len() + 1);
    out.push(format!("| {} |", first.join(" | ")));
    out.push(format!("| {} |", vec!["---"; first.len()].join(" | ")));
    for row in &rows[1..] {
        out.push(format!("| {} |", row.join(" | ")));
    }
    Some(out.join("\n"))
}

/// Re-insert catalog elements at marker sites in the translated body.
///
/// Returns the reconstructed markdown plus diagnostics for elements that
/// could not be inserted; a failed element becomes a visible failure
/// paragraph and never aborts the rest.
pub fn reconstruct(body: &str, catalog: &ElementCatalog) -> (String, Vec<String>) {
    let mut paragraphs: Vec<String> = Vec::new();
    let mut diagnostics: Vec<String> = Vec::new();

    for paragraph in body.split("\n\n") {
        let paragraph = paragraph.trim();
        if paragraph.is_empty() {
            continue;
        }

        if FULL_MARKER_REGEX.is_match(paragraph) {
            paragraphs.push(insert_element(paragraph, catalog, &mut diagnostics));
            continue;
        }

        if EMBEDDED_MARKER_REGEX.is_match(paragraph) {
            // Markers mixed into running text: split out each token and
            // process the pieces independently
            for part in EMBEDDED_MARKER_REGEX.split_keep(paragraph) {
                let part = part.trim();
                if part.is_empty() {
                    continue;
                }
                if FULL_MARKER_REGEX.is_match(part) {
                    paragraphs.push(insert_element(part, catalog, &mut diagnostics));
                } else {
                    paragraphs.push(part.to_string());
                }
            }
            continue;
        }

        paragraphs.push(paragraph.to_string());
    }

    (paragraphs.join("\n\n"), diagnostics)
}

/// Render one full-token marker paragraph from the catalog
fn insert_element(token: &str, catalog: &ElementCatalog, diagnostics: &mut Vec<String>) -> String {
    let id = token.trim_matches(['[', ']']);

    if id.starts_with("TABLE_") {
        if let Some(table) = catalog.table(id) {
            let rows = table.translated_rows.as_ref().unwrap_or(&table.rows);
            if let Some(rendered) = render_table(rows) {
                return rendered;
            }
        }
        diagnostics.push(format!("{}: Failed to insert", id));
        return format!("[{} - Failed to insert]", id);
    }

    if let Some(figure) = catalog.figure(id) {
        let caption = if figure.caption.is_empty() { "Image" } else { &figure.caption };
        return format!("**[{}: {}]**", id, caption);
    }
    diagnostics.push(format!("{}: Failed to insert", id));
    format!("[{} - Failed to insert]", id)
}

/// Split while keeping the delimiters, in order of appearance
trait SplitKeep {
    fn split_keep<'a>(&self, text: &'a str) -> Vec<&'a str>;
}

impl SplitKeep for Regex {
    fn split_keep<'a>(&self, text: &'a str) -> Vec<&'a str> {
        let mut parts = Vec::new();
        let mut last = 0;
        for m in self.find_iter(text) {
            if m.start() > last {
                parts.push(&text[last..m.start()]);
            }
            parts.push(m.as_str());
            last = m.end();
        }
        if last < text.len() {
            parts.push(&text[last..]);
        }
        parts
    }
}
