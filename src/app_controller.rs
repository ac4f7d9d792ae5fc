use anyhow::Result;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use log::{debug, error, info, warn};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::app_config::Config;
use crate::document::{extract_document, write_output, DocumentFormat, ElementCatalog};
use crate::errors::PipelineError;
use crate::file_utils::FileManager;
use crate::pipeline::{
    attach_markers, reassemble, segment_text, strip_markers, DocumentOutcome, RuleSplitter,
    SegmentDispatcher,
};
use crate::translation::{DocumentTranslator, TranslateUnit, TranslationService};

// @module: Application controller for document processing

/// Name of the per-directory diagnostics log
const ISSUES_LOG_NAME: &str = "doctrans.issues.log";

/// A fully translated document, before any output bytes are produced
#[derive(Debug)]
pub struct TranslatedDocument {
    /// Reassembled translated body, markers included
    pub body: String,

    /// Aggregate dispatch outcome
    pub outcome: DocumentOutcome,

    /// Element catalog carried through from extraction (rich formats)
    pub catalog: Option<ElementCatalog>,
}

/// Main application controller for document translation
pub struct Controller {
    // @field: App configuration
    config: Config,
}

impl Controller {
    /// Create a new controller for test purposes with default configuration
    pub fn new_for_test() -> Result<Self> {
        Self::with_config(Config::default())
    }

    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        Ok(Self { config })
    }

    /// Check if the controller is properly initialized with configuration
    pub fn is_initialized(&self) -> bool {
        !self.config.source_language.is_empty() && !self.config.target_language.is_empty()
    }

    /// Run the main workflow with an input document and output directory
    pub async fn run(
        &self,
        input_file: PathBuf,
        output_dir: PathBuf,
        output_format: Option<DocumentFormat>,
        force_overwrite: bool,
    ) -> Result<()> {
        let multi_progress = MultiProgress::new();
        self.run_with_progress(input_file, output_dir, output_format, &multi_progress, force_overwrite)
            .await
    }

    /// Run the controller with progress reporting
    async fn run_with_progress(
        &self,
        input_file: PathBuf,
        output_dir: PathBuf,
        output_format: Option<DocumentFormat>,
        multi_progress: &MultiProgress,
        force_overwrite: bool,
    ) -> Result<()> {
        let start_time = std::time::Instant::now();

        if !input_file.exists() {
            return Err(anyhow::anyhow!("Input file does not exist: {:?}", input_file));
        }

        FileManager::ensure_dir(&output_dir)?;

        // Output format defaults to the input's own format
        let output_format = match output_format {
            Some(format) => format,
            None => DocumentFormat::from_path(&input_file)?,
        };

        let output_path = FileManager::generate_output_path(
            &input_file,
            &output_dir,
            &self.config.target_language,
            output_format.extension(),
        );
        if output_path.exists() && !force_overwrite {
            warn!("Skipping file, translation already exists (use -f to force overwrite)");
            return Ok(());
        }

        // Translate the document body
        let pb = self.make_progress_bar(multi_progress);
        let pb_clone = pb.clone();
        let translated = self
            .translate_document(&input_file, move |completed, total| {
                pb_clone.set_length(total as u64);
                pb_clone.set_position(completed as u64);
            })
            .await;
        pb.finish_and_clear();
        let translated = translated?;

        // Surface the aggregate outcome with locatable detail
        match &translated.outcome {
            DocumentOutcome::AllSucceeded => {
                debug!("All segments translated successfully");
            }
            DocumentOutcome::PartialFailure { failed } => {
                warn!(
                    "{} segment(s) failed and carry placeholders: segment(s) {}",
                    failed.len(),
                    failed.iter().map(|i| i.to_string()).collect::<Vec<_>>().join(", ")
                );
            }
            DocumentOutcome::Incomplete { missing } => {
                // Checked in translate_document; fail loudly if it leaks through
                return Err(PipelineError::DispatchIncomplete { missing: missing.len() }.into());
            }
        }

        // Produce the output file
        let (bytes, reconstruction_diagnostics) = write_output(
            &translated.body,
            output_format,
            translated.catalog.as_ref(),
        )?;
        FileManager::write_bytes(&output_path, &bytes)?;

        // Collect diagnostics from the catalog and the writer into the issues log
        let mut diagnostics: Vec<String> = Vec::new();
        if let Some(catalog) = &translated.catalog {
            let summary = catalog.summary();
            info!(
                "Elements: {}/{} table(s), {}/{} figure(s) processed",
                summary.tables_successful,
                summary.tables_total,
                summary.figures_successful,
                summary.figures_total
            );
            diagnostics.extend(summary.errors);
        }
        diagnostics.extend(reconstruction_diagnostics);
        if !diagnostics.is_empty() {
            self.write_issues_log(&output_dir, &input_file, &diagnostics);
        }

        info!("Success: {}", output_path.display());
        info!("Translation completed in {}", Self::format_duration(start_time.elapsed()));

        Ok(())
    }

    /// Translate one document and return its reassembled body with the
    /// aggregate outcome; no files are written.
    pub async fn translate_document(
        &self,
        input_file: &Path,
        progress_callback: impl Fn(usize, usize) + Clone + Send + 'static,
    ) -> Result<TranslatedDocument> {
        // Extract text (and catalog, for rich formats)
        let extracted = extract_document(input_file)?;

        // Two-phase placeholder handling: strip with offsets, segment, then
        // reattach by range containment
        let (clean_text, markers) = strip_markers(&extracted.text);
        let segments = segment_text(
            &clean_text,
            self.config.pipeline.max_segment_chars,
            &RuleSplitter,
        );
        let marker_map = attach_markers(&segments, &markers);
        debug!(
            "Document: {} segment(s), {} marker(s)",
            segments.len(),
            markers.len()
        );

        // One capability handle serves segment dispatch and cell translation
        let service = TranslationService::new(self.config.translation.clone())?;
        let capability: Arc<dyn TranslateUnit> = Arc::new(DocumentTranslator::new(
            service,
            &self.config.source_language,
            &self.config.target_language,
        ));

        // Translate table cells before the body so the catalog is complete
        // by reconstruction time
        let mut catalog = extracted.catalog;
        if let Some(catalog) = catalog.as_mut() {
            for table_id in catalog.table_ids() {
                if !catalog.translate_table_cells(&table_id, capability.as_ref()).await {
                    warn!("Table {} was not fully translated", table_id);
                }
            }
        }

        let dispatcher =
            SegmentDispatcher::new(self.config.translation.optimal_concurrent_requests());
        let result = dispatcher
            .dispatch(&segments, Arc::clone(&capability), progress_callback)
            .await;

        if let DocumentOutcome::Incomplete { missing } = &result.outcome {
            error!(
                "Dispatch incomplete for {:?}: {} segment(s) missing",
                input_file,
                missing.len()
            );
            return Err(PipelineError::DispatchIncomplete { missing: missing.len() }.into());
        }

        let body = reassemble(&result.translated, &marker_map);
        Ok(TranslatedDocument {
            body,
            outcome: result.outcome,
            catalog,
        })
    }

    /// Run the workflow in folder mode, processing all supported documents
    /// in a directory. Files that already have translations are skipped.
    pub async fn run_folder(
        &self,
        input_dir: PathBuf,
        output_format: Option<DocumentFormat>,
        force_overwrite: bool,
    ) -> Result<()> {
        let start_time = std::time::Instant::now();

        if !input_dir.exists() {
            return Err(anyhow::anyhow!("Input directory does not exist: {:?}", input_dir));
        }

        // Find all supported documents in the directory (recursive)
        let mut document_files = Vec::new();
        for ext in &["txt", "md", "pdf"] {
            let mut files = FileManager::find_files(&input_dir, ext)?;
            document_files.append(&mut files);
        }
        document_files.sort();

        if document_files.is_empty() {
            return Err(anyhow::anyhow!(
                "No supported documents found in directory: {:?}",
                input_dir
            ));
        }

        let multi_progress = MultiProgress::new();
        let folder_pb = multi_progress.add(ProgressBar::new(document_files.len() as u64));
        let template_result = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files ({percent}%) {msg} {eta}")
            .or_else(|_| ProgressStyle::default_bar().template("{spinner} [{elapsed_precise}] [{bar:40}] {pos}/{len} ({percent}%) {msg}"))
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        folder_pb.set_style(template_result.progress_chars("█▓▒░"));
        folder_pb.set_message("Processing files");

        let mut success_count = 0;
        let mut error_count = 0;

        for document_file in document_files.iter() {
            let file_name = document_file
                .file_name()
                .map(|name| name.to_string_lossy().to_string())
                .unwrap_or_else(|| String::from("unknown"));
            folder_pb.set_message(file_name);

            let output_dir = document_file
                .parent()
                .unwrap_or(Path::new("."))
                .to_path_buf();
            match self
                .run_with_progress(
                    document_file.clone(),
                    output_dir,
                    output_format,
                    &multi_progress,
                    force_overwrite,
                )
                .await
            {
                Ok(()) => success_count += 1,
                Err(e) => {
                    error!("Error processing {:?}: {}", document_file, e);
                    error_count += 1;
                }
            }
            folder_pb.inc(1);
        }

        folder_pb.finish_and_clear();
        info!(
            "Processed {} file(s) ({} failed) in {}",
            success_count,
            error_count,
            Self::format_duration(start_time.elapsed())
        );

        Ok(())
    }

    /// Create the per-document segment progress bar
    fn make_progress_bar(&self, multi_progress: &MultiProgress) -> ProgressBar {
        let progress_bar = multi_progress.add(ProgressBar::new(0));
        let template_result = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} segments ({percent}%) {msg} {eta}")
            .or_else(|_| ProgressStyle::default_bar().template("{spinner} [{elapsed_precise}] [{bar:40}] {pos}/{len} ({percent}%) {msg}"))
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        progress_bar.set_style(template_result.progress_chars("█▓▒░"));

        info!(
            "doctrans: {} - {}",
            self.config.translation.provider.display_name(),
            self.config.translation.get_model()
        );
        info!("Translating, please wait…");
        progress_bar.set_message("Translating");
        progress_bar
    }

    /// Append element diagnostics to the issues log next to the output
    fn write_issues_log(&self, output_dir: &Path, input_file: &Path, diagnostics: &[String]) {
        let log_path = output_dir.join(ISSUES_LOG_NAME);
        let header = format!(
            "{:?} - {} ({})",
            input_file,
            self.config.translation.provider.display_name(),
            self.config.translation.get_model()
        );
        if let Err(e) = FileManager::append_to_log_file(&log_path, &header) {
            warn!("Failed to write issues log: {}", e);
            return;
        }
        for diagnostic in diagnostics {
            if let Err(e) = FileManager::append_to_log_file(&log_path, diagnostic) {
                warn!("Failed to write issues log: {}", e);
                return;
            }
        }
        info!("Diagnostics written to {}", log_path.display());
    }

    // Format duration in a human-readable format (HH:MM:SS)
    fn format_duration(duration: std::time::Duration) -> String {
        let total_seconds = duration.as_secs();
        let hours = total_seconds / 3600;
        let minutes = (total_seconds % 3600) / 60;
        let seconds = total_seconds % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}.{:03}s", seconds, duration.subsec_millis())
        }
    }
}
