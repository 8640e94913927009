//! Fix-all: every violation of one rule in one document, as one update
//!
//! All violations are resolved and synthesized against the same tree version
//! before anything is committed. The replacements are then committed
//! together by one of two strategies:
//!
//! - **tree**: every replacement is a substitution; the substitutions go into
//!   one [`TreeRewriter`] and the tree is rebuilt in a single traversal.
//! - **text**: at least one replacement is a splice; substitutions are
//!   lowered to splices over their range, and all splices are applied to the
//!   original text in one pass.
//!
//! Either way an overlap rejects the whole batch.

use std::collections::HashSet;

use rowan::NodeOrToken;
use tracing::{debug, warn};

use super::edits::{Replacement, TreeEdit, apply_edits, normalize};
use crate::diagnostics::Violation;
use crate::document::SourceDocument;
use crate::error::KemptError;
use crate::fixes::{FixContext, FixProvider, SynthesisDecline};
use crate::resolver::resolve;
use crate::result::Result;
use crate::settings::StyleSettings;
use crate::syntax::green::green_text;
use crate::syntax::{SyntaxNode, TreeRewriter};

/// What a fix-all batch did
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixAllReport {
    /// The successor document, or the original when nothing applied
    pub document: SourceDocument,
    /// Violations whose replacement was committed
    pub applied: usize,
    /// Violations left unfixed by their synthesizer
    pub declined: Vec<(Violation, SynthesisDecline)>,
    /// Violations whose span did not resolve
    pub unresolved: Vec<Violation>,
}

impl FixAllReport {
    fn unchanged(document: &SourceDocument) -> Self {
        Self {
            document: document.clone(),
            applied: 0,
            declined: Vec::new(),
            unresolved: Vec::new(),
        }
    }
}

/// Fix every violation of one rule in `document` as one atomic update
///
/// All violations must share a rule id ([`KemptError::MixedRules`]
/// otherwise). Unresolvable and declined violations are skipped and listed
/// in the report. Overlapping edits fail the batch with
/// [`KemptError::ConflictingEdits`]; the input document is left as it was.
pub fn fix_all(
    document: &SourceDocument,
    violations: &[Violation],
    settings: &StyleSettings,
) -> Result<FixAllReport> {
    let Some(first) = violations.first() else {
        return Ok(FixAllReport::unchanged(document));
    };
    let rule_id = first.rule_id.as_str();
    if let Some(other) = violations.iter().find(|v| v.rule_id != rule_id) {
        return Err(KemptError::mixed_rules(rule_id, other.rule_id.clone()));
    }

    let mut report = FixAllReport::unchanged(document);
    let Some(provider) = FixProvider::from_rule_id(rule_id) else {
        report.declined = violations
            .iter()
            .map(|v| (v.clone(), SynthesisDecline::new(rule_id, "rule has no fix provider")))
            .collect();
        return Ok(report);
    };

    let root = document.syntax();
    let mut replacements = Vec::with_capacity(violations.len());
    for violation in violations {
        let anchor = match resolve(&root, violation.span) {
            Ok(anchor) => anchor,
            Err(err) => {
                warn!("Skipping violation of '{}': {}", rule_id, err);
                report.unresolved.push(violation.clone());
                continue;
            }
        };
        let context = FixContext {
            document,
            root: &root,
            violation,
            anchor: &anchor,
            settings,
        };
        match provider.synthesize(&context) {
            Ok(replacement) if replacement.is_empty() => {
                report.declined.push((violation.clone(), context.decline("fix has no edits")));
            }
            Ok(replacement) => replacements.push(replacement),
            Err(decline) => {
                debug!("{}", decline);
                report.declined.push((violation.clone(), decline));
            }
        }
    }

    debug!(
        rule_id,
        violations = violations.len(),
        replacements = replacements.len(),
        "Synthesized fix-all batch"
    );
    if replacements.is_empty() {
        return Ok(report);
    }

    let applied = replacements.len();
    let text = commit(rule_id, document.text(), &root, replacements).inspect_err(|err| {
        warn!("Rejected fix-all batch of {} edits: {}", applied, err);
    })?;
    report.document = document.with_text(text, rule_id)?;
    report.applied = applied;
    Ok(report)
}

/// Commit replacements synthesized against `root` and return the new text
pub(crate) fn commit(
    rule_id: &str,
    text: &str,
    root: &SyntaxNode,
    replacements: Vec<Replacement>,
) -> Result<String> {
    if replacements.iter().all(Replacement::is_tree) {
        let edits = replacements
            .into_iter()
            .flat_map(|replacement| match replacement {
                Replacement::Tree(edits) => edits,
                Replacement::Text(_) => Vec::new(),
            })
            .collect();
        return rewrite_tree(rule_id, root, edits);
    }

    let edits = replacements
        .into_iter()
        .flat_map(Replacement::into_text_edits)
        .collect();
    let edits = normalize(rule_id, edits)?;
    debug!(rule_id, edits = edits.len(), "Applying text splices");
    apply_edits(text, &edits)
}

/// Apply substitutions in one traversal, rejecting overlapping targets
///
/// A target nested in another target is an overlap too, including a
/// zero-width one sitting on its ancestor's boundary.
fn rewrite_tree(rule_id: &str, root: &SyntaxNode, mut edits: Vec<TreeEdit>) -> Result<String> {
    edits.sort_by_key(|edit| {
        let range = edit.target.text_range();
        (range.start(), range.end())
    });

    let targets: HashSet<&SyntaxNode> = edits.iter().filter_map(|edit| edit.target.as_node()).collect();
    for edit in edits.iter().filter(|edit| edit.target.text_range().is_empty()) {
        let parent = match &edit.target {
            NodeOrToken::Node(node) => node.parent(),
            NodeOrToken::Token(token) => token.parent(),
        };
        if let Some(outer) = parent.into_iter().flat_map(|p| p.ancestors()).find(|a| targets.contains(&a)) {
            return Err(KemptError::conflicting_edits(
                rule_id,
                outer.text_range(),
                edit.target.text_range(),
            ));
        }
    }

    let mut rewriter = TreeRewriter::new();
    let mut previous: Option<&TreeEdit> = None;
    let mut furthest_end = root.text_range().start();
    for edit in &edits {
        let range = edit.target.text_range();
        if let Some(last) = previous {
            let last_range = last.target.text_range();
            if last.target == edit.target {
                if last.replacement == edit.replacement {
                    continue;
                }
                return Err(KemptError::conflicting_edits(rule_id, last_range, range));
            }
            if range.start() < furthest_end {
                return Err(KemptError::conflicting_edits(rule_id, last_range, range));
            }
        }
        rewriter.replace(edit.target.clone(), edit.replacement.clone());
        furthest_end = furthest_end.max(range.end());
        previous = Some(edit);
    }

    debug!(rule_id, substitutions = rewriter.len(), "Rewriting tree");
    Ok(green_text(&rewriter.rewrite(root)))
}

#[cfg(test)]
mod tests {
    use rowan::{NodeOrToken, TextRange};

    use super::*;
    use crate::autofix::TextEdit;
    use crate::rules::rule_ids;
    use crate::syntax::SyntaxKind;
    use crate::syntax::green::token;

    fn spans(source: &str, needle: &str) -> Vec<TextRange> {
        source
            .match_indices(needle)
            .map(|(start, _)| {
                let start = start as u32;
                TextRange::new(start.into(), (start + needle.len() as u32).into())
            })
            .collect()
    }

    fn violations(rule_id: &str, spans: Vec<TextRange>) -> Vec<Violation> {
        spans.into_iter().map(|span| Violation::new(rule_id, span)).collect()
    }

    #[test]
    fn test_empty_batch_returns_original() {
        let document = SourceDocument::new("a();\n");
        let report = fix_all(&document, &[], &StyleSettings::default()).unwrap();
        assert_eq!(report.document, document);
        assert_eq!(report.applied, 0);
    }

    #[test]
    fn test_text_batch_is_committed_once() {
        let source = "a();;\nb();;\n;\n";
        let document = SourceDocument::new(source);
        let mut spans = spans(source, ";");
        spans.retain(|span| {
            let start = usize::from(span.start());
            start > 0 && &source[start - 1..start] == ";" || source[..start].ends_with('\n')
        });
        let batch = violations(rule_ids::NO_EMPTY_STATEMENT, spans);
        let report = fix_all(&document, &batch, &StyleSettings::default()).unwrap();
        assert_eq!(report.document.text(), "a();\nb();\n");
        assert_eq!(report.applied, 3);
    }

    #[test]
    fn test_tree_batch_rewrites_unrelated_nodes() {
        let source = "x = (a);\ny = (b) + (c);\n";
        let document = SourceDocument::new(source);
        let batch = violations(rule_ids::REDUNDANT_PARENTHESES, spans(source, "("));
        let report = fix_all(&document, &batch, &StyleSettings::default()).unwrap();
        assert_eq!(report.document.text(), "x = a;\ny = b + c;\n");
    }

    #[test]
    fn test_declined_and_unresolved_are_reported() {
        let source = "x = (a + b) * (c);\n";
        let document = SourceDocument::new(source);
        let mut batch = violations(rule_ids::REDUNDANT_PARENTHESES, spans(source, "("));
        batch.push(Violation::new(rule_ids::REDUNDANT_PARENTHESES, TextRange::new(3.into(), 99.into())));
        let report = fix_all(&document, &batch, &StyleSettings::default()).unwrap();
        assert_eq!(report.document.text(), "x = (a + b) * c;\n");
        assert_eq!(report.applied, 1);
        assert_eq!(report.declined.len(), 1);
        assert_eq!(report.unresolved.len(), 1);
    }

    #[test]
    fn test_mixed_rules_are_rejected() {
        let document = SourceDocument::new("a;;\n");
        let batch = vec![
            Violation::new(rule_ids::NO_EMPTY_STATEMENT, TextRange::new(2.into(), 3.into())),
            Violation::new(rule_ids::SEMICOLON_SPACING, TextRange::new(2.into(), 3.into())),
        ];
        let err = fix_all(&document, &batch, &StyleSettings::default()).unwrap_err();
        assert!(matches!(err, KemptError::MixedRules { .. }));
    }

    #[test]
    fn test_overlapping_substitutions_conflict() {
        let document = SourceDocument::new("a = b;\n");
        let root = document.syntax();
        let statement = root.first_child().unwrap();
        let name = statement
            .descendants_with_tokens()
            .find(|e| e.kind() == SyntaxKind::Ident)
            .unwrap();
        let replacements = vec![
            Replacement::tree(NodeOrToken::Node(statement.clone()), vec![]),
            Replacement::tree(name, vec![token(SyntaxKind::Ident, "c")]),
        ];
        let err = commit("test", document.text(), &root, replacements).unwrap_err();
        assert!(matches!(err, KemptError::ConflictingEdits { .. }));
    }

    #[test]
    fn test_zero_width_target_inside_substituted_node_conflicts() {
        let document = SourceDocument::new("a = b;\n");
        let root = document.syntax();
        let eof = root
            .descendants_with_tokens()
            .find(|e| e.kind() == SyntaxKind::Eof)
            .unwrap();
        assert!(eof.text_range().is_empty());
        let replacements = vec![
            Replacement::tree(NodeOrToken::Node(root.clone()), vec![]),
            Replacement::tree(eof, vec![token(SyntaxKind::Eof, "")]),
        ];
        let err = commit("test", document.text(), &root, replacements).unwrap_err();
        assert!(matches!(err, KemptError::ConflictingEdits { .. }));
    }

    #[test]
    fn test_duplicate_substitutions_merge() {
        let document = SourceDocument::new("a = b;\n");
        let root = document.syntax();
        let name = root
            .descendants_with_tokens()
            .find(|e| e.kind() == SyntaxKind::Ident)
            .unwrap();
        let replacement = Replacement::tree(name, vec![token(SyntaxKind::Ident, "c")]);
        let text = commit("test", document.text(), &root, vec![replacement.clone(), replacement]).unwrap();
        assert_eq!(text, "c = b;\n");
    }

    #[test]
    fn test_mixed_strategies_lower_to_text() {
        let document = SourceDocument::new("a = b;\n");
        let root = document.syntax();
        let name = root
            .descendants_with_tokens()
            .find(|e| e.kind() == SyntaxKind::Ident)
            .unwrap();
        let replacements = vec![
            Replacement::tree(name, vec![token(SyntaxKind::Ident, "long_name")]),
            Replacement::text(TextEdit::replace(TextRange::new(4.into(), 5.into()), "x")),
        ];
        let text = commit("test", document.text(), &root, replacements).unwrap();
        assert_eq!(text, "long_name = x;\n");
    }
}
