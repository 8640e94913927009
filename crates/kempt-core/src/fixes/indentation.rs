//! Re-indentation of a line's first token

use super::{FixContext, Synthesis};
use crate::autofix::{Replacement, TextEdit};
use crate::trivia::Token;

/// Replace the indentation of the line starting with the anchored token
pub(super) fn reindent(context: &FixContext<'_>) -> Synthesis {
    let token = context.anchor.token();
    let view = Token::new(token.clone());
    let Some(line_start) = view.line_start() else {
        return Err(context.decline("token is not the first on its line"));
    };

    let expected = context.expected_indentation(token);
    if view.indentation() == expected {
        return Err(context.decline("indentation is already correct"));
    }

    let edit = match view.indentation_trivia() {
        Some(current) => TextEdit::replace(current.range, expected),
        None => TextEdit::insert(line_start, expected),
    };
    Ok(Replacement::text(edit))
}

#[cfg(test)]
mod tests {
    use crate::fixes::test_support::{fix_text, span_of};
    use crate::rules::properties::EXPECTED_INDENTATION;
    use crate::rules::rule_ids::INDENTATION;

    #[test]
    fn test_uses_expected_indentation_property() {
        let source = "class C\n{\n  int x;\n}\n";
        let fixed = fix_text(source, INDENTATION, span_of(source, "int", 0), &[(EXPECTED_INDENTATION, "\t")]);
        assert_eq!(fixed.unwrap(), "class C\n{\n\tint x;\n}\n");
    }

    #[test]
    fn test_derives_indentation_from_nesting() {
        let source = "class C\n{\nint x;\n      int y;\n}\n";
        let fixed = fix_text(source, INDENTATION, span_of(source, "int", 0), &[]).unwrap();
        assert_eq!(fixed, "class C\n{\n    int x;\n      int y;\n}\n");

        let fixed = fix_text(source, INDENTATION, span_of(source, "int", 1), &[]).unwrap();
        assert_eq!(fixed, "class C\n{\nint x;\n    int y;\n}\n");
    }

    #[test]
    fn test_removes_indentation_at_top_level() {
        let source = "  class C\n{\n}\n";
        let fixed = fix_text(source, INDENTATION, span_of(source, "class", 0), &[]).unwrap();
        assert_eq!(fixed, "class C\n{\n}\n");
    }

    #[test]
    fn test_declines_when_not_first_on_line() {
        let source = "class C { int x; }\n";
        let reason = fix_text(source, INDENTATION, span_of(source, "int", 0), &[]).unwrap_err();
        assert!(reason.contains("first on its line"));
    }

    #[test]
    fn test_declines_when_already_correct() {
        let source = "class C\n{\n    int x;\n}\n";
        assert!(fix_text(source, INDENTATION, span_of(source, "int", 0), &[]).is_err());
    }
}
