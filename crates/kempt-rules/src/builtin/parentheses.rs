//! Parentheses that change nothing

use kempt_core::syntax::ast::{AstNode, ParenExpr};
use kempt_core::{Analyzer, SourceDocument, StyleSettings, Violation, rule_ids};

use super::token_violation;

/// Outermost redundant parentheses
///
/// Redundant parentheses nested inside a reported pair are removed by the
/// same fix, so only the outermost pair is reported.
pub struct RedundantParentheses;

impl Analyzer for RedundantParentheses {
    fn rule_id(&self) -> &'static str {
        rule_ids::REDUNDANT_PARENTHESES
    }

    fn analyze(&self, document: &SourceDocument, _settings: &StyleSettings) -> Vec<Violation> {
        document
            .syntax()
            .descendants()
            .filter_map(ParenExpr::cast)
            .filter(ParenExpr::is_redundant)
            .filter(|paren| {
                !paren
                    .syntax()
                    .ancestors()
                    .skip(1)
                    .filter_map(ParenExpr::cast)
                    .any(|outer| outer.is_redundant())
            })
            .filter_map(|paren| paren.l_paren())
            .map(|open| token_violation(self.rule_id(), &open).with_message("Remove these parentheses"))
            .collect()
    }
}
