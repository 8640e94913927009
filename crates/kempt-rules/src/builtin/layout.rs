//! Line layout around braces and closing parentheses

use kempt_core::syntax::nodes::{next_significant_token, prev_significant_token};
use kempt_core::syntax::{SyntaxKind, SyntaxToken};
use kempt_core::trivia::{is_blank_line, trivia_lines};
use kempt_core::{Analyzer, SourceDocument, StyleSettings, Token, Violation, properties, rule_ids};
use rowan::TextRange;

use super::{brace_pairs, starts_node, token_violation};

/// Braces of a multi-line scope sit on lines of their own
pub struct BracesOnOwnLine;

impl Analyzer for BracesOnOwnLine {
    fn rule_id(&self) -> &'static str {
        rule_ids::BRACES_ON_OWN_LINE
    }

    fn analyze(&self, document: &SourceDocument, _settings: &StyleSettings) -> Vec<Violation> {
        let text = document.text();
        let mut violations = Vec::new();

        for (open, close) in brace_pairs(&document.syntax()) {
            let inside = TextRange::new(open.text_range().end(), close.text_range().start());
            if !text[inside].contains('\n') {
                continue;
            }

            let open_view = Token::new(open.clone());
            if !open_view.is_first_on_line() {
                violations.push(self.violation(&open, properties::PRECEDED_BY_CODE));
            }
            if !open_view.ends_line() && next_significant_token(&open).is_some_and(|next| next != close) {
                violations.push(self.violation(&open, properties::FOLLOWED_BY_CODE));
            }
            if !Token::new(close.clone()).is_first_on_line() {
                violations.push(self.violation(&close, properties::PRECEDED_BY_CODE));
            }
        }
        violations
    }
}

impl BracesOnOwnLine {
    fn violation(&self, brace: &SyntaxToken, kind: &str) -> Violation {
        let message = if kind == properties::FOLLOWED_BY_CODE {
            "Code following an opening brace belongs on the next line"
        } else {
            "Brace should be on its own line"
        };
        token_violation(self.rule_id(), brace)
            .with_property(properties::VIOLATION, kind)
            .with_message(message)
    }
}

/// A closing brace is followed by a blank line before the next statement
/// or declaration
pub struct BlankLineAfterCloseBrace;

impl Analyzer for BlankLineAfterCloseBrace {
    fn rule_id(&self) -> &'static str {
        rule_ids::BLANK_LINE_AFTER_CLOSE_BRACE
    }

    fn analyze(&self, document: &SourceDocument, _settings: &StyleSettings) -> Vec<Violation> {
        document
            .tokens()
            .into_iter()
            .filter(|token| token.kind() == SyntaxKind::RBrace && token.ends_line())
            .filter_map(|brace| next_significant_token(brace.syntax()))
            .filter(|next| next.kind() != SyntaxKind::Eof)
            .filter(|next| starts_node(next, |kind| kind.is_statement() || kind.is_declaration()))
            .filter_map(|next| {
                let view = Token::new(next.clone());
                let leading = view.leading();
                let separated = trivia_lines(leading)
                    .first()
                    .is_some_and(|line| is_blank_line(&leading[line.clone()]));
                if separated {
                    return None;
                }
                let offset = leading.first().map_or(next.text_range().start(), |t| t.range.start());
                Some(
                    Violation::new(self.rule_id(), TextRange::empty(offset))
                        .with_message("Add a blank line after the closing brace"),
                )
            })
            .collect()
    }
}

/// The closing parenthesis of a parameter or argument list ends the last
/// line of the list instead of starting a new one
pub struct ClosingParenthesisOnLastLine;

impl Analyzer for ClosingParenthesisOnLastLine {
    fn rule_id(&self) -> &'static str {
        rule_ids::CLOSING_PARENTHESIS_ON_LAST_LINE
    }

    fn analyze(&self, document: &SourceDocument, _settings: &StyleSettings) -> Vec<Violation> {
        document
            .tokens()
            .into_iter()
            .filter(|token| token.kind() == SyntaxKind::RParen && token.is_first_on_line())
            .filter(|token| {
                token.syntax().parent().is_some_and(|parent| {
                    matches!(parent.kind(), SyntaxKind::ParamList | SyntaxKind::ArgList)
                })
            })
            .filter(|token| {
                prev_significant_token(token.syntax()).is_some_and(|prev| prev.kind() != SyntaxKind::LParen)
            })
            .map(|token| {
                token_violation(self.rule_id(), token.syntax())
                    .with_message("Closing parenthesis should end the previous line")
            })
            .collect()
    }
}
