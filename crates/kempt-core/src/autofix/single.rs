//! Single-fix path: resolve, synthesize, commit

use tracing::debug;

use super::batch::commit;
use crate::diagnostics::Violation;
use crate::document::SourceDocument;
use crate::fixes::{FixContext, FixProvider, SynthesisDecline};
use crate::resolver::resolve;
use crate::result::Result;
use crate::settings::StyleSettings;

/// Result of fixing one violation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FixOutcome {
    /// The successor document
    Fixed(SourceDocument),
    /// No fix is available for this instance
    Declined(SynthesisDecline),
}

impl FixOutcome {
    pub fn into_document(self) -> Option<SourceDocument> {
        match self {
            FixOutcome::Fixed(document) => Some(document),
            FixOutcome::Declined(_) => None,
        }
    }
}

/// Fix a single violation of `document`
///
/// Errors are reserved for resolution failures and for edits that do not
/// commit cleanly; an impossible fix is a [`FixOutcome::Declined`].
pub fn fix_one(
    document: &SourceDocument,
    violation: &Violation,
    settings: &StyleSettings,
) -> Result<FixOutcome> {
    let root = document.syntax();
    let anchor = resolve(&root, violation.span)?;

    let Some(provider) = FixProvider::from_rule_id(&violation.rule_id) else {
        return Ok(FixOutcome::Declined(SynthesisDecline::new(
            violation.rule_id.clone(),
            "rule has no fix provider",
        )));
    };
    let context = FixContext {
        document,
        root: &root,
        violation,
        anchor: &anchor,
        settings,
    };
    let replacement = match provider.synthesize(&context) {
        Ok(replacement) if replacement.is_empty() => {
            return Ok(FixOutcome::Declined(context.decline("fix has no edits")));
        }
        Ok(replacement) => replacement,
        Err(decline) => {
            debug!("{}", decline);
            return Ok(FixOutcome::Declined(decline));
        }
    };

    let text = commit(&violation.rule_id, document.text(), &root, vec![replacement])?;
    Ok(FixOutcome::Fixed(document.with_text(text, &violation.rule_id)?))
}

#[cfg(test)]
mod tests {
    use rowan::TextRange;

    use super::*;
    use crate::error::KemptError;
    use crate::rules::rule_ids;

    fn span(source: &str, needle: &str) -> TextRange {
        let start = source.find(needle).unwrap() as u32;
        TextRange::new(start.into(), (start + needle.len() as u32).into())
    }

    #[test]
    fn test_text_fix_produces_new_document() {
        let document = SourceDocument::new("a();;\nb();\n").with_path("a.kt");
        let violation = Violation::new(rule_ids::NO_EMPTY_STATEMENT, TextRange::new(4.into(), 5.into()));
        let fixed = fix_one(&document, &violation, &StyleSettings::default())
            .unwrap()
            .into_document()
            .unwrap();
        assert_eq!(fixed.text(), "a();\nb();\n");
        assert_eq!(fixed.path(), document.path());
        assert_eq!(document.text(), "a();;\nb();\n");
    }

    #[test]
    fn test_tree_fix_produces_new_document() {
        let source = "x = (y);\n";
        let document = SourceDocument::new(source);
        let violation = Violation::new(rule_ids::REDUNDANT_PARENTHESES, span(source, "("));
        let outcome = fix_one(&document, &violation, &StyleSettings::default()).unwrap();
        assert_eq!(outcome.into_document().unwrap().text(), "x = y;\n");
    }

    #[test]
    fn test_decline_is_not_an_error() {
        let source = "x = (a + b) * c;\n";
        let document = SourceDocument::new(source);
        let violation = Violation::new(rule_ids::REDUNDANT_PARENTHESES, span(source, "("));
        let outcome = fix_one(&document, &violation, &StyleSettings::default()).unwrap();
        assert!(matches!(outcome, FixOutcome::Declined(_)));

        let violation = Violation::new("style/unknown", span(source, "x"));
        let outcome = fix_one(&document, &violation, &StyleSettings::default()).unwrap();
        assert!(matches!(outcome, FixOutcome::Declined(d) if d.reason.contains("no fix provider")));
    }

    #[test]
    fn test_unresolvable_span_is_an_error() {
        let document = SourceDocument::new("a;");
        let violation = Violation::new(rule_ids::NO_EMPTY_STATEMENT, TextRange::new(1.into(), 9.into()));
        let err = fix_one(&document, &violation, &StyleSettings::default()).unwrap_err();
        assert!(matches!(err, KemptError::Resolution { .. }));
    }
}
