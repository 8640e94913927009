//! Blank line removal around braces and in long runs

use rowan::TextRange;

use super::{FixContext, Synthesis};
use crate::autofix::{Replacement, TextEdit};
use crate::trivia::{Token, TriviaSide, is_blank_line, range_of, trivia_lines};

/// Delete the blank lines of the violation span
///
/// Blank lines always sit in the leading trivia of the token that follows
/// them, so the span is matched against that list line by line.
pub(super) fn remove_blank_lines(context: &FixContext<'_>) -> Synthesis {
    let owner = Token::new(context.anchor.token().clone());
    let leading = owner.trivia(TriviaSide::Leading);
    let span = context.violation.span;

    let edits: Vec<TextEdit> = trivia_lines(leading)
        .into_iter()
        .map(|line| &leading[line])
        .filter(|line| is_blank_line(line))
        .filter_map(range_of)
        .filter(|range| span.contains_range(*range))
        .map(TextEdit::delete)
        .collect();

    if edits.is_empty() {
        return Err(context.decline("no blank line inside the reported span"));
    }
    Ok(Replacement::Text(merge_adjacent(edits)))
}

/// Join deletions of consecutive lines into one
fn merge_adjacent(edits: Vec<TextEdit>) -> Vec<TextEdit> {
    let mut merged: Vec<TextEdit> = Vec::with_capacity(edits.len());
    for edit in edits {
        match merged.last_mut() {
            Some(last) if last.range.end() == edit.range.start() => {
                last.range = TextRange::new(last.range.start(), edit.range.end());
            }
            _ => merged.push(edit),
        }
    }
    merged
}

#[cfg(test)]
mod tests {
    use rowan::TextRange;

    use crate::fixes::test_support::fix_text;
    use crate::rules::rule_ids::{
        NO_BLANK_LINE_AFTER_OPEN_BRACE, NO_BLANK_LINE_BEFORE_CLOSE_BRACE, NO_MULTIPLE_BLANK_LINES,
    };

    fn range(start: usize, end: usize) -> TextRange {
        TextRange::new((start as u32).into(), (end as u32).into())
    }

    #[test]
    fn test_blank_lines_after_open_brace() {
        let source = "class C\n{\n\n    \n    int x;\n}\n";
        let start = source.find("{\n").unwrap() + 2;
        let fixed = fix_text(source, NO_BLANK_LINE_AFTER_OPEN_BRACE, range(start, start + 6), &[]);
        assert_eq!(fixed.unwrap(), "class C\n{\n    int x;\n}\n");
    }

    #[test]
    fn test_blank_lines_before_close_brace_keep_comments() {
        let source = "class C\n{\n    int x;\n\n    // end\n\n}\n";
        let first = source.find(";\n").unwrap() + 2;
        let fixed = fix_text(source, NO_BLANK_LINE_BEFORE_CLOSE_BRACE, range(first, source.len() - 2), &[]);
        assert_eq!(fixed.unwrap(), "class C\n{\n    int x;\n    // end\n}\n");
    }

    #[test]
    fn test_only_surplus_blank_lines_are_removed() {
        let source = "a();\n\n\n\nb();\n";
        let fixed = fix_text(source, NO_MULTIPLE_BLANK_LINES, range(6, 8), &[]);
        assert_eq!(fixed.unwrap(), "a();\n\nb();\n");
    }
}
