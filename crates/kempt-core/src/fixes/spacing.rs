//! Whitespace trimming and collapsing

use rowan::TextRange;

use super::{FixContext, Synthesis};
use crate::autofix::{Replacement, TextEdit};
use crate::resolver::Anchor;
use crate::syntax::SyntaxKind;
use crate::syntax::nodes::next_significant_token;
use crate::trivia::{Token, TriviaKind, TriviaSide, range_of, text_of, trivia_lines, without_trailing_whitespace};

/// Trim the whitespace at the end of the line holding the anchored trivia
pub(super) fn trim_line_end(context: &FixContext<'_>) -> Synthesis {
    let Anchor::Trivia { trivia, owner, side } = context.anchor else {
        return Err(context.decline("violation does not point at trivia"));
    };
    let view = Token::new(owner.clone());
    let list = view.trivia(*side);
    let Some(index) = list.iter().position(|t| t.range == trivia.text_range()) else {
        return Err(context.decline("trivia is not owned by its token"));
    };
    let Some(line) = trivia_lines(list).into_iter().find(|line| line.contains(&index)) else {
        return Err(context.decline("trivia is not owned by its token"));
    };

    let mut segment = &list[line];
    match segment.last() {
        Some(last) if last.kind == TriviaKind::EndOfLine => segment = &segment[..segment.len() - 1],
        // The last line of a list only ends the text when nothing follows
        _ if ends_file(owner, *side) => {}
        _ => return Err(context.decline("whitespace does not end a line")),
    }

    let trimmed = without_trailing_whitespace(segment);
    let Some(range) = range_of(segment) else {
        return Err(context.decline("no whitespace to trim"));
    };
    if trimmed.len() == segment.len() {
        return Err(context.decline("no whitespace to trim"));
    }
    Ok(Replacement::text(TextEdit::replace(range, text_of(&trimmed))))
}

fn ends_file(owner: &crate::syntax::SyntaxToken, side: TriviaSide) -> bool {
    match side {
        TriviaSide::Leading => owner.kind() == SyntaxKind::Eof,
        TriviaSide::Trailing => {
            next_significant_token(owner).is_some_and(|next| next.kind() == SyntaxKind::Eof)
        }
    }
}

/// Collapse a whitespace run between two tokens to a single space
pub(super) fn collapse_whitespace(context: &FixContext<'_>) -> Synthesis {
    let Anchor::Trivia { trivia, .. } = context.anchor else {
        return Err(context.decline("violation does not point at trivia"));
    };
    if trivia.kind() != SyntaxKind::Whitespace {
        return Err(context.decline("violation does not point at whitespace"));
    }
    if trivia.text() == " " {
        return Err(context.decline("whitespace is already a single space"));
    }
    Ok(Replacement::text(TextEdit::replace(trivia.text_range(), " ")))
}

/// Delete the whitespace separating a semicolon from the code before it
pub(super) fn remove_space_before_semicolon(context: &FixContext<'_>) -> Synthesis {
    let Anchor::Trivia {
        owner,
        side: TriviaSide::Trailing,
        ..
    } = context.anchor
    else {
        return Err(context.decline("violation does not point at trailing whitespace"));
    };
    let Some(semicolon) = next_significant_token(owner).filter(|t| t.kind() == SyntaxKind::Semicolon)
    else {
        return Err(context.decline("whitespace is not followed by a semicolon"));
    };

    let view = Token::new(owner.clone());
    if !view.trailing().iter().all(|t| t.kind == TriviaKind::Whitespace) {
        return Err(context.decline("a comment or line break precedes the semicolon"));
    }
    let range = TextRange::new(owner.text_range().end(), semicolon.text_range().start());
    Ok(Replacement::text(TextEdit::delete(range)))
}
