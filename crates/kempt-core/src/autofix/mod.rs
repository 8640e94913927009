//! Fix application
//!
//! [`AutofixEngine`] is the surface a host uses: `compute_fix` for one
//! violation, `compute_fix_all` for every violation of one rule in one
//! document. [`DefaultAutofixEngine`] resolves the settings of each document
//! through a [`SettingsProvider`] and drives the single and batch paths.

mod batch;
mod edits;
mod preview;
mod single;

pub use batch::{FixAllReport, fix_all};
pub use edits::{Replacement, TextEdit, TreeEdit, apply_edits, normalize};
pub use preview::{FixPreview, unified_diff};
pub use single::{FixOutcome, fix_one};

use tracing::{debug, info};

use crate::diagnostics::Violation;
use crate::document::SourceDocument;
use crate::result::{Result, ResultExt};
use crate::rules::Analyzer;
use crate::settings::{SettingsProvider, StyleSettings};

/// Host-facing fix operations
pub trait AutofixEngine {
    /// Fix a single violation
    ///
    /// Returns `None` when no fix is available: the span did not resolve, the
    /// synthesizer declined, or the edit did not commit cleanly.
    fn compute_fix(&self, document: &SourceDocument, violation: &Violation) -> Option<SourceDocument>;

    /// Fix every violation of one rule in one document as a single update
    ///
    /// On error the batch is discarded and `document` remains current.
    fn compute_fix_all(
        &self,
        document: &SourceDocument,
        violations: &[Violation],
    ) -> Result<SourceDocument>;
}

/// Default implementation of the AutofixEngine
#[derive(Debug, Clone)]
pub struct DefaultAutofixEngine<P = StyleSettings> {
    settings: P,
}

impl Default for DefaultAutofixEngine {
    fn default() -> Self {
        Self::new(StyleSettings::default())
    }
}

impl<P: SettingsProvider> DefaultAutofixEngine<P> {
    pub fn new(settings: P) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &P {
        &self.settings
    }

    /// Fix a single violation, keeping the reason when no fix is available
    pub fn try_compute_fix(
        &self,
        document: &SourceDocument,
        violation: &Violation,
    ) -> Result<FixOutcome> {
        let settings = self.settings.settings_for(document);
        fix_one(document, violation, &settings)
    }

    /// Fix-all with the per-violation outcome
    pub fn compute_fix_all_with_report(
        &self,
        document: &SourceDocument,
        violations: &[Violation],
    ) -> Result<FixAllReport> {
        let settings = self.settings.settings_for(document);
        fix_all(document, violations, &settings)
    }

    /// Diff of what fix-all would change, without committing anything
    pub fn preview(&self, document: &SourceDocument, violations: &[Violation]) -> Result<FixPreview> {
        let report = self.compute_fix_all_with_report(document, violations)?;
        Ok(FixPreview::new(document, &report.document, report.applied))
    }

    /// Apply every enabled analyzer's fix-all batch in turn
    ///
    /// Each analyzer runs on the document produced by the previous batch, so
    /// no batch ever sees spans of an older document version. A rejected
    /// batch fails the whole document.
    pub fn fix_document(
        &self,
        document: &SourceDocument,
        analyzers: &[Box<dyn Analyzer>],
    ) -> Result<SourceDocument> {
        let settings = self.settings.settings_for(document);
        let mut current = document.clone();
        let mut applied = 0;

        for analyzer in analyzers {
            let rule_id = analyzer.rule_id();
            if !settings.is_rule_enabled(rule_id) {
                debug!("Skipping disabled rule '{}'", rule_id);
                continue;
            }
            let violations = analyzer.analyze(&current, &settings);
            if violations.is_empty() {
                continue;
            }
            let report = fix_all(&current, &violations, &settings)?;
            applied += report.applied;
            current = report.document;
        }

        info!(
            path = ?document.path(),
            applied,
            "Fixed document"
        );
        Ok(current)
    }
}

impl<P: SettingsProvider> AutofixEngine for DefaultAutofixEngine<P> {
    fn compute_fix(&self, document: &SourceDocument, violation: &Violation) -> Option<SourceDocument> {
        self.try_compute_fix(document, violation)
            .log_and_continue()
            .and_then(FixOutcome::into_document)
    }

    fn compute_fix_all(
        &self,
        document: &SourceDocument,
        violations: &[Violation],
    ) -> Result<SourceDocument> {
        Ok(self.compute_fix_all_with_report(document, violations)?.document)
    }
}

#[cfg(test)]
mod tests {
    use rowan::TextRange;

    use super::*;
    use crate::indent::IndentationSettings;
    use crate::rules::rule_ids;
    use crate::settings::RuleToggle;

    struct EmptyStatements;

    impl Analyzer for EmptyStatements {
        fn rule_id(&self) -> &'static str {
            rule_ids::NO_EMPTY_STATEMENT
        }

        fn analyze(&self, document: &SourceDocument, _settings: &StyleSettings) -> Vec<Violation> {
            let text = document.text();
            text.match_indices(";;")
                .map(|(start, _)| {
                    let start = start as u32 + 1;
                    Violation::new(self.rule_id(), TextRange::new(start.into(), (start + 1).into()))
                })
                .collect()
        }
    }

    #[test]
    fn test_compute_fix_returns_none_when_declined() {
        let engine: DefaultAutofixEngine = DefaultAutofixEngine::default();
        let document = SourceDocument::new("if (x) ;\n");
        let violation = Violation::new(rule_ids::NO_EMPTY_STATEMENT, TextRange::new(7.into(), 8.into()));
        assert_eq!(engine.compute_fix(&document, &violation), None);
    }

    #[test]
    fn test_compute_fix_uses_document_settings() {
        let engine = DefaultAutofixEngine::new(
            StyleSettings::default().with_indentation(IndentationSettings::tabs()),
        );
        let document = SourceDocument::new("class C\n{\n  int x;\n}\n");
        let violation = Violation::new(rule_ids::INDENTATION, TextRange::new(12.into(), 15.into()));
        let fixed = engine.compute_fix(&document, &violation).unwrap();
        assert_eq!(fixed.text(), "class C\n{\n\tint x;\n}\n");
    }

    #[test]
    fn test_fix_document_skips_disabled_rules() {
        let analyzers: Vec<Box<dyn Analyzer>> = vec![Box::new(EmptyStatements)];
        let document = SourceDocument::new("a();;\n");

        let engine: DefaultAutofixEngine = DefaultAutofixEngine::default();
        assert_eq!(engine.fix_document(&document, &analyzers).unwrap().text(), "a();\n");

        let engine = DefaultAutofixEngine::new(
            StyleSettings::default().with_rule(rule_ids::NO_EMPTY_STATEMENT, RuleToggle::Off),
        );
        assert_eq!(engine.fix_document(&document, &analyzers).unwrap(), document);
    }

    #[test]
    fn test_preview_does_not_commit() {
        let engine: DefaultAutofixEngine = DefaultAutofixEngine::default();
        let document = SourceDocument::new("a();;\n");
        let violation = Violation::new(rule_ids::NO_EMPTY_STATEMENT, TextRange::new(4.into(), 5.into()));
        let preview = engine.preview(&document, &[violation]).unwrap();
        assert_eq!(preview.applied_fixes, 1);
        assert_eq!(preview.modified_content, "a();\n");
        assert_eq!(document.text(), "a();;\n");
    }
}
