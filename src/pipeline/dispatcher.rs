/*!
 * Concurrent translation dispatch.
 *
 * Every segment is submitted to the translation capability in parallel under
 * a bounded number of in-flight calls. Results are collected by originating
 * segment index, never by completion order, so reassembly order is document
 * order regardless of worker count. Per-segment failures are isolated and
 * substituted with a deterministic placeholder; a segment with no recorded
 * outcome at all is an invariant violation, reported as a distinct fatal
 * condition.
 */

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use futures::stream::{self, StreamExt};
use log::{debug, error};
use tokio::sync::Semaphore;

use crate::translation::TranslateUnit;

use super::segmenter::Segment;

/// Deterministic substitution text for a failed segment (1-based index in
/// the user-facing message)
pub fn failure_placeholder(index: usize) -> String {
    format!("[TRANSLATION FAILED: Segment {}]", index + 1)
}

/// Outcome of translating one segment
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SegmentOutcome {
    /// Translated text returned by the capability
    Success(String),
    /// The capability failed for the segment at this 0-based index
    Failure {
        /// Originating segment index
        index: usize,
    },
}

/// Aggregate outcome for a whole document
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentOutcome {
    /// Every segment translated successfully
    AllSucceeded,

    /// Some segments failed; their 1-based indices, in document order.
    /// The translated body still carries placeholder text for each.
    PartialFailure {
        /// 1-based failed segment indices
        failed: Vec<usize>,
    },

    /// One or more segments have no recorded outcome at all. This is a
    /// dispatch bug, never a normal failure mode, and is always fatal.
    Incomplete {
        /// 0-based indices with no outcome
        missing: Vec<usize>,
    },
}

/// Result of dispatching a whole document
#[derive(Debug)]
pub struct DispatchResult {
    /// Per-segment translated (possibly failure-substituted) text, in
    /// segment index order. Empty when the outcome is `Incomplete`.
    pub translated: Vec<String>,

    /// Aggregate completion/failure summary
    pub outcome: DocumentOutcome,
}

/// Dispatches segments to a translation capability with bounded concurrency
pub struct SegmentDispatcher {
    /// Maximum concurrent in-flight translation calls. A throughput knob
    /// only; the result never depends on it.
    max_concurrent_requests: usize,
}

impl SegmentDispatcher {
    /// Create a dispatcher with the given concurrency bound
    pub fn new(max_concurrent_requests: usize) -> Self {
        Self {
            max_concurrent_requests: max_concurrent_requests.max(1),
        }
    }

    /// Translate all segments concurrently and collect results in document
    /// order.
    ///
    /// The progress callback receives `(completed, total)` after each
    /// resolved segment; it is advisory only and never affects ordering.
    /// This method waits for every submitted segment before returning.
    pub async fn dispatch(
        &self,
        segments: &[Segment],
        capability: Arc<dyn TranslateUnit>,
        progress_callback: impl Fn(usize, usize) + Clone + Send + 'static,
    ) -> DispatchResult {
        let total = segments.len();
        if total == 0 {
            return DispatchResult {
                translated: Vec::new(),
                outcome: DocumentOutcome::AllSucceeded,
            };
        }

        let semaphore = Arc::new(Semaphore::new(self.max_concurrent_requests));
        let completed = Arc::new(AtomicUsize::new(0));

        let results = stream::iter(segments.iter().map(|s| (s.index, s.source_text.clone())))
            .map(|(index, text)| {
                let capability = Arc::clone(&capability);
                let semaphore = Arc::clone(&semaphore);
                let completed = Arc::clone(&completed);
                let progress_callback = progress_callback.clone();

                async move {
                    // Acquire a permit from the semaphore
                    let _permit = semaphore.acquire().await.unwrap();

                    let outcome = match capability.translate_unit(&text).await {
                        Ok(translated) => SegmentOutcome::Success(translated),
                        Err(e) => {
                            error!("Segment {} failed to translate: {}", index + 1, e);
                            SegmentOutcome::Failure { index }
                        }
                    };

                    let done = completed.fetch_add(1, Ordering::SeqCst) + 1;
                    progress_callback(done, total);

                    (index, outcome)
                }
            })
            .buffer_unordered(self.max_concurrent_requests)
            .collect::<Vec<_>>()
            .await;

        // Key every result by its originating segment index
        let mut slots: Vec<Option<SegmentOutcome>> = vec![None; total];
        for (index, outcome) in results {
            if index < total {
                slots[index] = Some(outcome);
            } else {
                error!("Dropping outcome for out-of-range segment index {}", index);
            }
        }

        let missing: Vec<usize> = slots
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.is_none().then_some(i))
            .collect();
        if !missing.is_empty() {
            error!(
                "Dispatch incomplete: {} of {} segment(s) have no recorded outcome",
                missing.len(),
                total
            );
            return DispatchResult {
                translated: Vec::new(),
                outcome: DocumentOutcome::Incomplete { missing },
            };
        }

        let mut translated = Vec::with_capacity(total);
        let mut failed = Vec::new();
        for outcome in slots.into_iter().flatten() {
            match outcome {
                SegmentOutcome::Success(text) => translated.push(text),
                SegmentOutcome::Failure { index } => {
                    translated.push(failure_placeholder(index));
                    failed.push(index + 1);
                }
            }
        }

        debug!("Dispatched {} segment(s), {} failed", total, failed.len());
        let outcome = if failed.is_empty() {
            DocumentOutcome::AllSucceeded
        } else {
            DocumentOutcome::PartialFailure { failed }
        };
        DispatchResult { translated, outcome }
    }
}
