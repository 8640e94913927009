//! Built-in style rules
//!
//! Each analyzer reports spans that the matching fix provider in
//! `kempt-core` resolves to the element it rewrites.

pub mod blank_lines;
pub mod declarations;
pub mod indentation;
pub mod layout;
pub mod parentheses;
pub mod spacing;
pub mod statements;

use kempt_core::syntax::nodes::{first_significant_token, scope_braces};
use kempt_core::syntax::{SyntaxKind, SyntaxNode, SyntaxToken};
use kempt_core::{Analyzer, Violation};

use crate::engine::RuleRegistry;

/// Built-in rule set
pub struct BuiltinRules;

impl BuiltinRules {
    /// Every built-in analyzer, in the order their fixes are applied
    ///
    /// Structural rewrites run first, then line layout, then whitespace, and
    /// indentation last so it sees the final line structure.
    pub fn all() -> Vec<Box<dyn Analyzer>> {
        vec![
            Box::new(declarations::SplitAttributeLists),
            Box::new(declarations::ModifierOrder),
            Box::new(declarations::UseBuiltinTypeAlias),
            Box::new(parentheses::RedundantParentheses),
            Box::new(statements::NoEmptyStatement),
            Box::new(layout::BracesOnOwnLine),
            Box::new(layout::ClosingParenthesisOnLastLine),
            Box::new(layout::BlankLineAfterCloseBrace),
            Box::new(blank_lines::NoBlankLineAfterOpenBrace),
            Box::new(blank_lines::NoBlankLineBeforeCloseBrace),
            Box::new(blank_lines::NoMultipleBlankLines),
            Box::new(spacing::SemicolonSpacing),
            Box::new(spacing::NoMultipleWhitespace),
            Box::new(spacing::NoTrailingWhitespace),
            Box::new(indentation::Indentation),
        ]
    }

    pub fn registry() -> RuleRegistry {
        let mut registry = RuleRegistry::new();
        for analyzer in Self::all() {
            registry.register(analyzer);
        }
        registry
    }
}

/// Violation anchored on a whole token
pub(crate) fn token_violation(rule_id: &str, token: &SyntaxToken) -> Violation {
    Violation::new(rule_id, token.text_range())
}

/// `token` is the first significant token of an enclosing node whose kind
/// satisfies `matches`
pub(crate) fn starts_node(token: &SyntaxToken, matches: impl Fn(SyntaxKind) -> bool) -> bool {
    for ancestor in token.parent_ancestors() {
        if first_significant_token(&ancestor).as_ref() != Some(token) {
            return false;
        }
        if matches(ancestor.kind()) {
            return true;
        }
    }
    false
}

/// Brace pairs of every braced scope under `root`
pub(crate) fn brace_pairs(root: &SyntaxNode) -> impl Iterator<Item = (SyntaxToken, SyntaxToken)> {
    root.descendants().filter_map(|node| scope_braces(&node))
}
