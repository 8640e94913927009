//! Whitespace within lines

use kempt_core::syntax::{SyntaxKind, SyntaxToken};
use kempt_core::{Analyzer, SourceDocument, StyleSettings, Violation, rule_ids};

use super::token_violation;

fn whitespace_tokens(document: &SourceDocument) -> impl Iterator<Item = SyntaxToken> {
    document
        .syntax()
        .descendants_with_tokens()
        .filter_map(|element| element.into_token())
        .filter(|token| token.kind() == SyntaxKind::Whitespace)
}

fn is_line_end(token: Option<SyntaxToken>) -> bool {
    token.is_none_or(|token| matches!(token.kind(), SyntaxKind::Newline | SyntaxKind::Eof))
}

/// Whitespace before a line break or the end of the file
pub struct NoTrailingWhitespace;

impl Analyzer for NoTrailingWhitespace {
    fn rule_id(&self) -> &'static str {
        rule_ids::NO_TRAILING_WHITESPACE
    }

    fn analyze(&self, document: &SourceDocument, _settings: &StyleSettings) -> Vec<Violation> {
        whitespace_tokens(document)
            .filter(|whitespace| is_line_end(whitespace.next_token()))
            .map(|whitespace| {
                token_violation(self.rule_id(), &whitespace).with_message("Remove trailing whitespace")
            })
            .collect()
    }
}

/// More than one space between two things on the same line
///
/// Indentation and trailing whitespace are other rules' business.
pub struct NoMultipleWhitespace;

impl Analyzer for NoMultipleWhitespace {
    fn rule_id(&self) -> &'static str {
        rule_ids::NO_MULTIPLE_WHITESPACE
    }

    fn analyze(&self, document: &SourceDocument, _settings: &StyleSettings) -> Vec<Violation> {
        whitespace_tokens(document)
            .filter(|whitespace| whitespace.text().chars().count() > 1)
            .filter(|whitespace| {
                whitespace
                    .prev_token()
                    .is_some_and(|prev| prev.kind() != SyntaxKind::Newline)
            })
            .filter(|whitespace| !is_line_end(whitespace.next_token()))
            .map(|whitespace| {
                token_violation(self.rule_id(), &whitespace).with_message("Use a single space")
            })
            .collect()
    }
}

/// Whitespace between a token and the `;` after it on the same line
pub struct SemicolonSpacing;

impl Analyzer for SemicolonSpacing {
    fn rule_id(&self) -> &'static str {
        rule_ids::SEMICOLON_SPACING
    }

    fn analyze(&self, document: &SourceDocument, _settings: &StyleSettings) -> Vec<Violation> {
        document
            .tokens()
            .into_iter()
            .filter(|token| token.kind() == SyntaxKind::Semicolon && !token.is_first_on_line())
            .filter_map(|semicolon| semicolon.syntax().prev_token())
            .filter(|prev| prev.kind() == SyntaxKind::Whitespace)
            .map(|whitespace| {
                token_violation(self.rule_id(), &whitespace)
                    .with_message("Remove the space before the semicolon")
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builtin::test_support::spans;

    #[test]
    fn test_trailing_whitespace() {
        let source = "a();  \n    \n// note \nb();\t";
        assert_eq!(spans(&NoTrailingWhitespace, source), vec!["  ", "    ", " ", "\t"]);
    }

    #[test]
    fn test_multiple_whitespace_between_tokens() {
        let source = "class C\n{\n    int  x =\t\t1;   // note\n}\n";
        assert_eq!(spans(&NoMultipleWhitespace, source), vec!["  ", "\t\t", "   "]);
    }

    #[test]
    fn test_semicolon_spacing() {
        let source = "a()  ;\nb()\n    ;\nreturn x ;\n";
        assert_eq!(spans(&SemicolonSpacing, source), vec!["  ", " "]);
    }
}
