//! Line-break relocation for braces, parentheses and blocks

use rowan::TextRange;

use super::{FixContext, Synthesis};
use crate::autofix::{Replacement, TextEdit};
use crate::indent::{DefaultIndentScopes, nesting_depth};
use crate::resolver::Anchor;
use crate::rules::properties;
use crate::syntax::nodes::{next_significant_token, prev_significant_token};
use crate::syntax::{SyntaxKind, SyntaxToken};
use crate::trivia::{Token, Trivia, TriviaKind, text_of, without_trailing_whitespace};

/// Move a brace onto a line of its own, or move the code that follows an
/// opening brace onto the next line
pub(super) fn brace_on_own_line(context: &FixContext<'_>) -> Synthesis {
    let brace = context.anchor.token();
    if !matches!(brace.kind(), SyntaxKind::LBrace | SyntaxKind::RBrace) {
        return Err(context.decline("violation does not point at a brace"));
    }

    match context.violation.property(properties::VIOLATION) {
        Some(properties::FOLLOWED_BY_CODE) => {
            let Some(next) = next_significant_token(brace).filter(|t| t.kind() != SyntaxKind::Eof) else {
                return Err(context.decline("nothing follows the brace"));
            };
            let indentation = context
                .settings
                .indentation
                .indentation_string(nesting_depth(&next, &DefaultIndentScopes));
            Ok(Replacement::text(break_line_between(context, brace, &next, &indentation)?))
        }
        _ => {
            let Some(previous) = prev_significant_token(brace) else {
                return Err(context.decline("nothing precedes the brace"));
            };
            let indentation = context.expected_indentation(brace);
            Ok(Replacement::text(break_line_between(context, &previous, brace, &indentation)?))
        }
    }
}

/// Replace the trivia between two tokens on one line with a line break and
/// `indentation`, keeping any comments on the first line
fn break_line_between(
    context: &FixContext<'_>,
    first: &SyntaxToken,
    second: &SyntaxToken,
    indentation: &str,
) -> Result<TextEdit, super::SynthesisDecline> {
    let first_view = Token::new(first.clone());
    let second_view = Token::new(second.clone());
    if first_view.ends_line() || second_view.is_first_on_line() {
        return Err(context.decline("tokens are already on separate lines"));
    }

    let between: Vec<Trivia> = first_view
        .trailing()
        .iter()
        .chain(second_view.leading())
        .cloned()
        .collect();
    let kept = text_of(&without_trailing_whitespace(&between));
    let range = TextRange::new(first.text_range().end(), second.text_range().start());
    Ok(TextEdit::replace(
        range,
        format!("{kept}{}{indentation}", context.line_ending()),
    ))
}

/// Insert a line break at the insertion point following a closing brace
pub(super) fn insert_blank_line(context: &FixContext<'_>) -> Synthesis {
    let Anchor::Insertion { before, offset } = context.anchor else {
        return Err(context.decline("violation does not name an insertion point"));
    };
    let previous = prev_significant_token(before);
    if !previous.is_some_and(|token| token.kind() == SyntaxKind::RBrace) {
        return Err(context.decline("insertion point does not follow a closing brace"));
    }
    Ok(Replacement::text(TextEdit::insert(*offset, context.line_ending())))
}

/// Pull a closing parenthesis up to the end of the previous line
pub(super) fn join_closing_parenthesis(context: &FixContext<'_>) -> Synthesis {
    let close = context.anchor.token();
    if close.kind() != SyntaxKind::RParen {
        return Err(context.decline("violation does not point at a closing parenthesis"));
    }
    let Some(previous) = prev_significant_token(close) else {
        return Err(context.decline("nothing precedes the parenthesis"));
    };
    if previous.kind() == SyntaxKind::LParen {
        return Err(context.decline("parentheses are empty"));
    }

    let previous_view = Token::new(previous.clone());
    let close_view = Token::new(close.clone());
    let between: Vec<&Trivia> = previous_view
        .trailing()
        .iter()
        .chain(close_view.leading())
        .collect();
    if between
        .iter()
        .any(|t| matches!(t.kind, TriviaKind::SingleLineComment | TriviaKind::Directive))
    {
        return Err(context.decline("a line comment or directive precedes the parenthesis"));
    }

    let comments: String = between
        .iter()
        .filter(|t| t.kind == TriviaKind::MultiLineComment)
        .map(|t| format!(" {}", t.text))
        .collect();
    let range = TextRange::new(previous.text_range().end(), close.text_range().start());
    Ok(Replacement::text(TextEdit::replace(range, comments)))
}

#[cfg(test)]
mod tests {
    use rowan::TextRange;

    use crate::fixes::test_support::{fix_text, span_of};
    use crate::rules::properties::{FOLLOWED_BY_CODE, PRECEDED_BY_CODE, VIOLATION};
    use crate::rules::rule_ids::{
        BLANK_LINE_AFTER_CLOSE_BRACE, BRACES_ON_OWN_LINE, CLOSING_PARENTHESIS_ON_LAST_LINE,
    };

    #[test]
    fn test_brace_preceded_by_code_moves_down() {
        let source = "class C {\n}\n";
        let fixed = fix_text(
            source,
            BRACES_ON_OWN_LINE,
            span_of(source, "{", 0),
            &[(VIOLATION, PRECEDED_BY_CODE)],
        );
        assert_eq!(fixed.unwrap(), "class C\n{\n}\n");
    }

    #[test]
    fn test_nested_brace_gets_scope_indentation() {
        let source = "class C\n{\n    void M() {\n    }\n}\n";
        let fixed = fix_text(
            source,
            BRACES_ON_OWN_LINE,
            span_of(source, "{", 1),
            &[(VIOLATION, PRECEDED_BY_CODE)],
        );
        assert_eq!(fixed.unwrap(), "class C\n{\n    void M()\n    {\n    }\n}\n");
    }

    #[test]
    fn test_comment_stays_on_the_first_line() {
        let source = "if (x) /* why */ {\n}\n";
        let fixed = fix_text(
            source,
            BRACES_ON_OWN_LINE,
            span_of(source, "{", 0),
            &[(VIOLATION, PRECEDED_BY_CODE)],
        );
        assert_eq!(fixed.unwrap(), "if (x) /* why */\n{\n}\n");
    }

    #[test]
    fn test_code_after_open_brace_moves_down() {
        let source = "class C\n{ int x;\n}\n";
        let fixed = fix_text(
            source,
            BRACES_ON_OWN_LINE,
            span_of(source, "{", 0),
            &[(VIOLATION, FOLLOWED_BY_CODE)],
        );
        assert_eq!(fixed.unwrap(), "class C\n{\n    int x;\n}\n");
    }

    #[test]
    fn test_blank_line_inserted_after_close_brace() {
        let source = "if (x)\n{\n}\ny();\n";
        let offset = source.find("y").unwrap() as u32;
        let fixed = fix_text(
            source,
            BLANK_LINE_AFTER_CLOSE_BRACE,
            TextRange::empty(offset.into()),
            &[],
        );
        assert_eq!(fixed.unwrap(), "if (x)\n{\n}\n\ny();\n");
    }

    #[test]
    fn test_closing_parenthesis_joins_previous_line() {
        let source = "M(a,\n  b\n);\n";
        let fixed = fix_text(source, CLOSING_PARENTHESIS_ON_LAST_LINE, span_of(source, ")", 0), &[]);
        assert_eq!(fixed.unwrap(), "M(a,\n  b);\n");

        let source = "M(a, b /* last */\n);\n";
        let fixed = fix_text(source, CLOSING_PARENTHESIS_ON_LAST_LINE, span_of(source, ")", 0), &[]);
        assert_eq!(fixed.unwrap(), "M(a, b /* last */);\n");
    }

    #[test]
    fn test_closing_parenthesis_declines_after_line_comment() {
        let source = "M(a, b // last\n);\n";
        let reason =
            fix_text(source, CLOSING_PARENTHESIS_ON_LAST_LINE, span_of(source, ")", 0), &[])
                .unwrap_err();
        assert!(reason.contains("line comment"));
    }
}
