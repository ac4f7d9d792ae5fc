/*!
 * Error types for the doctrans application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

// Allow dead code - error types are for library consumers
#![allow(dead_code)]

use thiserror::Error;

/// Errors that can occur when working with provider APIs
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Error when making an API request fails
    #[error("API request failed: {0}")]
    RequestFailed(String),

    /// Error when parsing an API response fails
    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    /// Error returned by the API itself
    #[error("API responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Error message from the API
        message: String,
    },

    /// Error establishing or maintaining a connection
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// Error related to rate limiting
    #[error("Rate limit exceeded: {0}")]
    RateLimitExceeded(String),

    /// Error with authentication
    #[error("Authentication error: {0}")]
    AuthenticationError(String),
}

/// Errors that can occur while reading or writing documents
#[derive(Error, Debug)]
pub enum DocumentError {
    /// The input file extension maps to no known document format
    #[error("Unsupported document format: {0}")]
    UnsupportedFormat(String),

    /// Text extraction produced nothing usable
    #[error("Failed to extract text: {0}")]
    ExtractionFailed(String),

    /// The output writer could not produce file bytes for the requested format
    #[error("Failed to write output: {0}")]
    OutputWrite(String),
}

/// Errors that can occur during translation
#[derive(Error, Debug)]
pub enum TranslationError {
    /// Error from the provider API
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// The capability reported failure through its in-band "Error:" sentinel
    #[error("Capability signalled failure: {0}")]
    CapabilitySignal(String),

    /// The capability returned an empty response
    #[error("Capability returned an empty response")]
    EmptyResponse,
}

/// Errors raised by the segmentation/dispatch/reassembly pipeline
#[derive(Error, Debug)]
pub enum PipelineError {
    /// One or more segments resolved with no recorded outcome.
    /// This is an invariant violation in dispatch, not a translation failure.
    #[error("Dispatch incomplete: {missing} segment(s) have no recorded outcome")]
    DispatchIncomplete {
        /// Number of segment indices with no outcome
        missing: usize,
    },
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from a provider
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Error from document handling
    #[error("Document error: {0}")]
    Document(#[from] DocumentError),

    /// Error from translation
    #[error("Translation error: {0}")]
    Translation(#[from] TranslationError),

    /// Error from the pipeline
    #[error("Pipeline error: {0}")]
    Pipeline(#[from] PipelineError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
