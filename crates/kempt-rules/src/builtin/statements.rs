//! Empty statements in statement lists

use kempt_core::syntax::SyntaxKind;
use kempt_core::syntax::nodes::direct_token;
use kempt_core::{Analyzer, SourceDocument, StyleSettings, Violation, rule_ids};

use super::token_violation;

/// A lone `;` in a block, switch section or at top level
///
/// An empty statement that is the body of `if` or `while` is left to the
/// reader: removing it would change what the statement controls.
pub struct NoEmptyStatement;

impl Analyzer for NoEmptyStatement {
    fn rule_id(&self) -> &'static str {
        rule_ids::NO_EMPTY_STATEMENT
    }

    fn analyze(&self, document: &SourceDocument, _settings: &StyleSettings) -> Vec<Violation> {
        document
            .syntax()
            .descendants()
            .filter(|node| node.kind() == SyntaxKind::EmptyStmt)
            .filter(|node| {
                node.parent().is_some_and(|parent| {
                    matches!(
                        parent.kind(),
                        SyntaxKind::Block | SyntaxKind::SwitchSection | SyntaxKind::SourceFile
                    )
                })
            })
            .filter_map(|node| direct_token(&node, SyntaxKind::Semicolon))
            .map(|semicolon| {
                token_violation(self.rule_id(), &semicolon).with_message("Remove this empty statement")
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builtin::test_support::report;

    #[test]
    fn test_reports_statement_list_semicolons() {
        let source = "a();;\n;\nswitch (v)\n{\n    case 1:\n        ;\n        break;\n}\n";
        assert_eq!(report(&NoEmptyStatement, source, "").len(), 3);
    }

    #[test]
    fn test_ignores_embedded_empty_statements() {
        let source = "if (x) ;\nwhile (y) ;\n";
        assert!(report(&NoEmptyStatement, source, "").is_empty());
    }
}
