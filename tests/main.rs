/*!
 * Main test entry point for the doctrans test suite
 */

// Import common test utilities
pub mod common;

// Import unit tests
mod unit {
    // App configuration tests
    pub mod app_config_tests;

    // Document format, extraction, and writer tests
    pub mod document_tests;

    // Structural element catalog tests
    pub mod elements_tests;

    // Language utilities tests
    pub mod language_utils_tests;

    // Segmentation / placeholder / dispatch / reassembly tests
    pub mod pipeline_tests;
}

// Import integration tests
mod integration {
    // End-to-end document translation tests
    pub mod pipeline_workflow_tests;
}
