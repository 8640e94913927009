//! Parallel processing of independent documents
//!
//! Documents share no state, so each one is fixed on its own rayon worker.
//! Cancellation and the deadline are checked before a document starts; a
//! document that has started always runs to completion, and one that is
//! skipped or fails comes back unmodified.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::document::SourceDocument;
use crate::error::KemptError;
use crate::result::Result;

/// Why a document was not processed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    Cancelled,
    DeadlineExceeded,
}

/// Result for one input document, in input order
#[derive(Debug)]
pub enum DocumentOutcome {
    Fixed(SourceDocument),
    /// Not started; holds the original document
    Skipped {
        document: SourceDocument,
        reason: SkipReason,
    },
    /// The job failed; holds the original document
    Failed {
        document: SourceDocument,
        error: KemptError,
    },
}

impl DocumentOutcome {
    /// The document to keep: fixed, or the original
    pub fn document(&self) -> &SourceDocument {
        match self {
            DocumentOutcome::Fixed(document)
            | DocumentOutcome::Skipped { document, .. }
            | DocumentOutcome::Failed { document, .. } => document,
        }
    }

    pub fn into_document(self) -> SourceDocument {
        match self {
            DocumentOutcome::Fixed(document)
            | DocumentOutcome::Skipped { document, .. }
            | DocumentOutcome::Failed { document, .. } => document,
        }
    }

    pub fn is_fixed(&self) -> bool {
        matches!(self, DocumentOutcome::Fixed(_))
    }
}

/// Runs a per-document job over many documents in parallel
#[derive(Debug, Clone, Default)]
pub struct DocumentRunner {
    cancelled: Arc<AtomicBool>,
    deadline: Option<Instant>,
}

impl DocumentRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stop starting new documents once `timeout` has elapsed from now
    pub fn with_timeout(self, timeout: Duration) -> Self {
        self.with_deadline(Instant::now() + timeout)
    }

    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Flag shared with clones of this runner; setting it cancels them all
    pub fn cancellation_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.cancelled)
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }

    fn skip_reason(&self) -> Option<SkipReason> {
        if self.is_cancelled() {
            return Some(SkipReason::Cancelled);
        }
        match self.deadline {
            Some(deadline) if Instant::now() >= deadline => Some(SkipReason::DeadlineExceeded),
            _ => None,
        }
    }

    /// Apply `job` to every document
    ///
    /// Outcomes are returned in the order of `documents`.
    pub fn run<F>(&self, documents: Vec<SourceDocument>, job: F) -> Vec<DocumentOutcome>
    where
        F: Fn(&SourceDocument) -> Result<SourceDocument> + Sync,
    {
        let total = documents.len();
        let start = Instant::now();

        let outcomes: Vec<DocumentOutcome> = documents
            .into_par_iter()
            .map(|document| {
                if let Some(reason) = self.skip_reason() {
                    debug!(path = ?document.path(), ?reason, "Skipping document");
                    return DocumentOutcome::Skipped { document, reason };
                }
                match job(&document) {
                    Ok(fixed) => DocumentOutcome::Fixed(fixed),
                    Err(error) => {
                        warn!("Failed to fix {:?}: {}", document.path(), error);
                        DocumentOutcome::Failed { document, error }
                    }
                }
            })
            .collect();

        let fixed = outcomes.iter().filter(|o| o.is_fixed()).count();
        info!(
            "Processed {} documents ({} fixed) in {:?}",
            total,
            fixed,
            start.elapsed()
        );
        outcomes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn documents(count: usize) -> Vec<SourceDocument> {
        (0..count)
            .map(|index| SourceDocument::new(format!("a{index}();\n")).with_path(format!("f{index}.kt")))
            .collect()
    }

    #[test]
    fn test_outcomes_keep_input_order() {
        let runner = DocumentRunner::new();
        let outcomes = runner.run(documents(16), |document| {
            document.with_text(document.text().replace("();", "(); b();"), "test")
        });
        assert_eq!(outcomes.len(), 16);
        for (index, outcome) in outcomes.iter().enumerate() {
            assert!(outcome.is_fixed());
            assert_eq!(outcome.document().text(), format!("a{index}(); b();\n"));
        }
    }

    #[test]
    fn test_failed_document_is_returned_unmodified() {
        let runner = DocumentRunner::new();
        let outcomes = runner.run(documents(2), |document| {
            if document.text().starts_with("a1") {
                Err(KemptError::internal_error("boom"))
            } else {
                Ok(document.clone())
            }
        });
        assert!(outcomes[0].is_fixed());
        assert!(matches!(&outcomes[1], DocumentOutcome::Failed { document, .. } if document.text() == "a1();\n"));
    }

    #[test]
    fn test_cancelled_runner_skips_everything() {
        let runner = DocumentRunner::new();
        runner.clone().cancel();
        assert!(runner.is_cancelled());
        let outcomes = runner.run(documents(3), |_| panic!("job must not run"));
        assert!(outcomes.iter().all(|o| matches!(
            o,
            DocumentOutcome::Skipped { reason: SkipReason::Cancelled, .. }
        )));
    }

    #[test]
    fn test_expired_deadline_skips_documents() {
        let runner = DocumentRunner::new().with_timeout(Duration::ZERO);
        let outcomes = runner.run(documents(2), |document| Ok(document.clone()));
        assert!(outcomes.iter().all(|o| matches!(
            o,
            DocumentOutcome::Skipped { reason: SkipReason::DeadlineExceeded, .. }
        )));
        assert_eq!(outcomes[1].document().text(), "a1();\n");
    }
}
