//! Indentation of lines that start a construct
//!
//! Only the first token of a line is checked, and only when it starts a
//! statement, declaration, label, attribute list or enum member, or is a
//! brace or `else`. Continuation lines of expressions are left alone.

use kempt_core::indent::{DefaultIndentScopes, nesting_depth};
use kempt_core::syntax::{SyntaxKind, SyntaxToken};
use kempt_core::{Analyzer, SourceDocument, StyleSettings, Violation, properties, rule_ids};

use super::starts_node;

pub struct Indentation;

impl Analyzer for Indentation {
    fn rule_id(&self) -> &'static str {
        rule_ids::INDENTATION
    }

    fn analyze(&self, document: &SourceDocument, settings: &StyleSettings) -> Vec<Violation> {
        document
            .tokens()
            .into_iter()
            .filter(|token| token.kind() != SyntaxKind::Eof && token.is_first_on_line())
            .filter(|token| starts_line_construct(token.syntax()))
            .filter_map(|token| {
                let depth = nesting_depth(token.syntax(), &DefaultIndentScopes);
                let expected = settings.indentation.indentation_string(depth);
                if token.indentation() == expected {
                    return None;
                }
                let message = format!(
                    "Expected indentation of {} columns, found {}",
                    settings.indentation.column_width(&expected),
                    settings.indentation.column_width(token.indentation())
                );
                Some(
                    Violation::new(self.rule_id(), token.span())
                        .with_property(properties::EXPECTED_INDENTATION, expected)
                        .with_message(message),
                )
            })
            .collect()
    }
}

fn starts_line_construct(token: &SyntaxToken) -> bool {
    matches!(
        token.kind(),
        SyntaxKind::LBrace | SyntaxKind::RBrace | SyntaxKind::ElseKw
    ) || starts_node(token, |kind| {
        kind.is_statement()
            || kind.is_declaration()
            || matches!(
                kind,
                SyntaxKind::SwitchLabel | SyntaxKind::AttributeList | SyntaxKind::EnumMember
            )
    })
}

#[cfg(test)]
mod tests {
    use kempt_core::IndentationSettings;

    use super::*;
    use crate::builtin::test_support::report;

    #[test]
    fn test_misindented_statements() {
        let source = "class C\n{\n  void M()\n    {\n      x = 1;\n    }\n}\n";
        let found = report(&Indentation, source, properties::EXPECTED_INDENTATION);
        assert_eq!(
            found,
            vec![
                ("void".to_string(), Some("    ".to_string())),
                ("x".to_string(), Some("        ".to_string())),
            ]
        );
    }

    #[test]
    fn test_braces_of_unbraced_if_body() {
        let source = "if (x)\n  {\n  }\n";
        let found = report(&Indentation, source, properties::EXPECTED_INDENTATION);
        assert_eq!(
            found,
            vec![
                ("{".to_string(), Some(String::new())),
                ("}".to_string(), Some(String::new())),
            ]
        );
    }

    #[test]
    fn test_embedded_statement_and_switch_labels() {
        let source = "if (x)\ny();\nswitch (v)\n{\n    case 1:\n        break;\n}\n";
        let found = report(&Indentation, source, properties::EXPECTED_INDENTATION);
        assert_eq!(found, vec![("y".to_string(), Some("    ".to_string()))]);
    }

    #[test]
    fn test_continuation_lines_are_ignored() {
        let source = "M(a,\n        b);\n";
        assert!(report(&Indentation, source, "").is_empty());
    }

    #[test]
    fn test_tabs_setting() {
        let document = SourceDocument::new("class C\n{\n    int x;\n}\n");
        let settings = StyleSettings::default().with_indentation(IndentationSettings::tabs());
        let violations = Indentation.analyze(&document, &settings);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].property(properties::EXPECTED_INDENTATION), Some("\t"));
    }
}
