/*!
 * Translation service for document translation using AI providers.
 *
 * This module contains the capability seam the pipeline translates through:
 *
 * - `core`: the TranslationService, its provider bindings, and the
 *   `TranslateUnit` trait with the `DocumentTranslator` adapter
 */

// Re-export main types for easier usage
pub use self::core::{DocumentTranslator, TranslateUnit, TranslationService};

// Submodules
pub mod core;
