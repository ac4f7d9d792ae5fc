/*!
 * Common test utilities for the doctrans test suite
 */

use anyhow::Result;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &PathBuf, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// Creates a sample plain text document for testing
pub fn create_test_document(dir: &PathBuf, filename: &str) -> Result<PathBuf> {
    let content = "This is a test document. It contains several sentences. \
                   Each one is short enough to pack. The pipeline translates them all.";
    create_test_file(dir, filename, content)
}

/// Creates a sample markdown document with a table and a figure
pub fn create_test_rich_document(dir: &PathBuf, filename: &str) -> Result<PathBuf> {
    let content = "Quarterly report introduction.\n\n\
| Quarter | Revenue |\n\
| --- | --- |\n\
| Q1 | 100 |\n\
| Q2 | 150 |\n\n\
![Revenue chart](charts/revenue.png)\n\n\
Closing remarks about the results.\n";
    create_test_file(dir, filename, content)
}
