//! Empty statement removal

use rowan::{TextRange, TextSize};

use super::{FixContext, Synthesis};
use crate::autofix::{Replacement, TextEdit};
use crate::resolver::Anchor;
use crate::syntax::nodes::{next_significant_token, prev_significant_token};
use crate::syntax::{SyntaxKind, SyntaxToken};
use crate::trivia::{Token, TriviaKind};

/// Delete an empty statement, together with its line when nothing else is
/// written on it
///
/// Empty statements separated only by spaces on one line form a run. Each
/// member of a run claims its own stretch of whitespace, so a batch over the
/// whole run never overlaps.
pub(super) fn remove_empty_statement(context: &FixContext<'_>) -> Synthesis {
    let Anchor::Token(semicolon) = context.anchor else {
        return Err(context.decline("violation does not point at a token"));
    };
    if semicolon.kind() != SyntaxKind::Semicolon {
        return Err(context.decline("violation does not point at a semicolon"));
    }
    if semicolon.parent().is_none_or(|p| p.kind() != SyntaxKind::EmptyStmt) {
        return Err(context.decline("semicolon does not end an empty statement"));
    }
    if !is_removable(semicolon) {
        return Err(context.decline("empty statement is the body of another statement"));
    }

    let text = context.document.text();
    let same_run = |left: &SyntaxToken, right: &SyntaxToken| {
        let gap = TextRange::new(left.text_range().end(), right.text_range().start());
        text[gap].chars().all(|c| c == ' ' || c == '\t')
    };
    let previous = prev_significant_token(semicolon).filter(|p| is_removable(p) && same_run(p, semicolon));
    let next = next_significant_token(semicolon).filter(|n| is_removable(n) && same_run(semicolon, n));

    let mut first = semicolon.clone();
    while let Some(prev) = prev_significant_token(&first).filter(|p| is_removable(p) && same_run(p, &first)) {
        first = prev;
    }
    let mut last = semicolon.clone();
    while let Some(following) = next_significant_token(&last).filter(|n| is_removable(n) && same_run(&last, n)) {
        last = following;
    }

    let view = Token::new(semicolon.clone());
    let last_view = Token::new(last);
    let closes_line = last_view.trailing().iter().all(|t| t.kind.is_whitespace())
        && (last_view.ends_line() || next_is_end_of_file(&last_view));
    let token_start = view.span().start();
    let token_end = view.span().end();

    let range = match Token::new(first).line_start() {
        Some(line_start) if closes_line => {
            let start = previous.map_or(line_start, |p| p.text_range().end());
            let end = if next.is_some() { token_end } else { view.full_span().end() };
            TextRange::new(start, end)
        }
        Some(_) => {
            let end = next.map_or_else(|| whitespace_after(&view), |n| n.text_range().start());
            TextRange::new(token_start, end)
        }
        None => {
            let start = previous.map_or_else(|| whitespace_before(semicolon), |p| p.text_range().end());
            TextRange::new(start, token_end)
        }
    };
    Ok(Replacement::text(TextEdit::delete(range)))
}

/// An empty statement directly inside a statement list
fn is_removable(token: &SyntaxToken) -> bool {
    token.kind() == SyntaxKind::Semicolon
        && token
            .parent()
            .filter(|statement| statement.kind() == SyntaxKind::EmptyStmt)
            .and_then(|statement| statement.parent())
            .is_some_and(|parent| {
                matches!(
                    parent.kind(),
                    SyntaxKind::Block | SyntaxKind::SwitchSection | SyntaxKind::SourceFile
                )
            })
}

fn whitespace_after(view: &Token) -> TextSize {
    view.trailing()
        .iter()
        .take_while(|t| t.kind == TriviaKind::Whitespace)
        .last()
        .map_or(view.span().end(), |t| t.range.end())
}

fn whitespace_before(token: &SyntaxToken) -> TextSize {
    std::iter::successors(token.prev_token(), |t| t.prev_token())
        .take_while(|t| t.kind() == SyntaxKind::Whitespace)
        .last()
        .map_or(token.text_range().start(), |t| t.text_range().start())
}

fn next_is_end_of_file(view: &Token) -> bool {
    next_significant_token(view.syntax()).is_some_and(|next| next.kind() == SyntaxKind::Eof)
}
