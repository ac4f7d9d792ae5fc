/*!
 * Document format identification.
 *
 * A closed set of supported formats, matched exhaustively everywhere a
 * format decision is made. Input format is inferred from the file extension;
 * the same enum selects the output writer.
 */

use std::fmt;
use std::path::Path;

use crate::errors::DocumentError;

/// Supported document formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    /// Plain UTF-8 text (.txt)
    PlainText,
    /// Markdown with tables and figures (.md)
    RichDocument,
    /// PDF (.pdf)
    PrintableDocument,
}

impl DocumentFormat {
    /// Infer the format from a file path's extension
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, DocumentError> {
        let extension = path
            .as_ref()
            .extension()
            .map(|ext| ext.to_string_lossy().to_lowercase())
            .unwrap_or_default();
        Self::from_extension(&extension)
    }

    /// Map a lowercase extension to a format
    pub fn from_extension(extension: &str) -> Result<Self, DocumentError> {
        match extension {
            "txt" | "text" => Ok(Self::PlainText),
            "md" | "markdown" => Ok(Self::RichDocument),
            "pdf" => Ok(Self::PrintableDocument),
            other => Err(DocumentError::UnsupportedFormat(if other.is_empty() {
                "no file extension".to_string()
            } else {
                other.to_string()
            })),
        }
    }

    /// Canonical output extension for this format
    pub fn extension(&self) -> &'static str {
        match self {
            Self::PlainText => "txt",
            Self::RichDocument => "md",
            Self::PrintableDocument => "pdf",
        }
    }

    /// Human-readable format name
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::PlainText => "plain text",
            Self::RichDocument => "rich document",
            Self::PrintableDocument => "printable document",
        }
    }
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}
