/*!
 * Mock translation capability for testing.
 *
 * This module provides a `TranslateUnit` implementation that simulates
 * different capability behaviors:
 * - `MockTranslator::working()` - Always succeeds with marked-up text
 * - `MockTranslator::failing()` - Always fails with a provider error
 * - `MockTranslator::intermittent(n)` - Fails every nth request
 * - `MockTranslator::failing_on(texts)` - Fails for specific source texts
 */

use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::errors::{ProviderError, TranslationError};
use crate::translation::TranslateUnit;

/// Behavior mode for the mock capability
#[derive(Debug, Clone)]
pub enum MockBehavior {
    /// Always succeeds with a proper translation
    Working,
    /// Always fails with a provider error
    Failing,
    /// Fails intermittently (every nth request)
    Intermittent {
        /// Every nth request fails
        fail_every: usize,
    },
    /// Fails only for the listed source texts
    FailingOn {
        /// Source texts that trigger failure
        texts: HashSet<String>,
    },
    /// Simulates slow responses (for concurrency testing)
    Slow {
        /// Delay before each response
        delay_ms: u64,
    },
}

/// Mock capability for testing pipeline behavior
pub struct MockTranslator {
    /// Behavior mode
    behavior: MockBehavior,
    /// Request counter, shared across clones
    request_count: Arc<AtomicUsize>,
}

impl MockTranslator {
    /// Create a new mock with the specified behavior
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            request_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Create a working mock that always succeeds
    pub fn working() -> Self {
        Self::new(MockBehavior::Working)
    }

    /// Create a failing mock that always errors
    pub fn failing() -> Self {
        Self::new(MockBehavior::Failing)
    }

    /// Create an intermittently failing mock
    pub fn intermittent(fail_every: usize) -> Self {
        Self::new(MockBehavior::Intermittent { fail_every })
    }

    /// Create a mock that fails only for the given source texts
    pub fn failing_on<I, S>(texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(MockBehavior::FailingOn {
            texts: texts.into_iter().map(Into::into).collect(),
        })
    }

    /// Create a mock with a per-request delay
    pub fn slow(delay_ms: u64) -> Self {
        Self::new(MockBehavior::Slow { delay_ms })
    }

    /// Number of requests the mock has served
    pub fn request_count(&self) -> usize {
        self.request_count.load(Ordering::SeqCst)
    }

    fn failure() -> TranslationError {
        TranslationError::Provider(ProviderError::ApiError {
            status_code: 500,
            message: "Simulated provider failure".to_string(),
        })
    }
}

impl Clone for MockTranslator {
    fn clone(&self) -> Self {
        Self {
            behavior: self.behavior.clone(),
            request_count: Arc::clone(&self.request_count),
        }
    }
}

#[async_trait]
impl TranslateUnit for MockTranslator {
    async fn translate_unit(&self, text: &str) -> Result<String, TranslationError> {
        let count = self.request_count.fetch_add(1, Ordering::SeqCst);

        match &self.behavior {
            MockBehavior::Working => Ok(format!("[TRANSLATED] {}", text)),

            MockBehavior::Failing => Err(Self::failure()),

            MockBehavior::Intermittent { fail_every } => {
                if count % fail_every == fail_every - 1 {
                    Err(Self::failure())
                } else {
                    Ok(format!("[TRANSLATED] {}", text))
                }
            }

            MockBehavior::FailingOn { texts } => {
                if texts.contains(text) {
                    Err(Self::failure())
                } else {
                    Ok(format!("[TRANSLATED] {}", text))
                }
            }

            MockBehavior::Slow { delay_ms } => {
                tokio::time::sleep(tokio::time::Duration::from_millis(*delay_ms)).await;
                Ok(format!("[TRANSLATED] {}", text))
            }
        }
    }
}
