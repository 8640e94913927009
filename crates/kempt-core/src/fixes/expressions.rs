//! Redundant parentheses removal

use rowan::{GreenNode, NodeOrToken, TextRange};

use super::{FixContext, Synthesis};
use crate::autofix::Replacement;
use crate::syntax::ast::{AstNode, ParenExpr};
use crate::syntax::green::{leading_trivia_of, trailing_trivia_of, with_leading_trivia, with_trailing_trivia};
use crate::syntax::nodes::{first_significant_token, last_significant_token, next_significant_token, prev_significant_token};
use crate::syntax::{SyntaxKind, SyntaxNode, SyntaxToken, TreeRewriter};
use crate::trivia::{Token, Trivia, TriviaPiece, retain_meaningful, without_leading_whitespace};

/// Replace a redundant parenthesized expression with its contents
///
/// Nested redundant parentheses are unwrapped in the same step, including
/// those deeper inside the expression. Comments and line breaks next to a
/// removed parenthesis move onto the expression that takes its place.
pub(super) fn remove_parentheses(context: &FixContext<'_>) -> Synthesis {
    let open = context.anchor.token();
    let Some(outer) = open
        .parent()
        .and_then(ParenExpr::cast)
        .filter(|paren| paren.l_paren().as_ref() == Some(open))
    else {
        return Err(context.decline("violation does not point at an opening parenthesis"));
    };
    if !outer.is_complete() {
        return Err(context.decline("parenthesized expression is incomplete"));
    }
    if !outer.is_redundant() {
        return Err(context.decline("parentheses are required here"));
    }
    let Some(replacement) = unwrapped(&outer) else {
        return Err(context.decline("parenthesized expression is incomplete"));
    };

    Ok(Replacement::tree(
        NodeOrToken::Node(outer.syntax().clone()),
        vec![NodeOrToken::Node(replacement)],
    ))
}

/// `outer` without its parentheses, carrying their trivia
fn unwrapped(outer: &ParenExpr) -> Option<GreenNode> {
    let open = outer.l_paren()?;
    let close = outer.r_paren()?;
    // Whitespace after the outer `(` is dropped when some already precedes it
    let spaced_before = open.prev_token().is_some_and(|t| t.kind().is_trivia());

    let mut leading: Vec<TriviaPiece> = Vec::new();
    let mut trailing: Vec<TriviaPiece> = Vec::new();
    let mut current = outer.clone();
    let inner = loop {
        let (Some(l_paren), Some(r_paren), Some(expression)) =
            (current.l_paren(), current.r_paren(), current.expression())
        else {
            return None;
        };
        let is_outer = &current == outer;
        let l_view = Token::new(l_paren);
        let r_view = Token::new(r_paren);

        if is_outer {
            leading.extend(pieces(l_view.leading()));
        } else {
            leading.extend(pieces(&retain_meaningful(l_view.leading())));
        }
        let after_open = retain_meaningful(l_view.trailing());
        if is_outer && spaced_before {
            leading.extend(pieces(&without_leading_whitespace(&after_open)));
        } else {
            leading.extend(pieces(&after_open));
        }

        let mut closing = pieces(&retain_meaningful(r_view.leading()));
        if is_outer {
            closing.extend(pieces(r_view.trailing()));
        } else {
            closing.extend(pieces(&retain_meaningful(r_view.trailing())));
        }
        closing.extend(trailing);
        trailing = closing;

        match ParenExpr::cast(expression.clone()) {
            Some(nested) if nested.is_redundant_in_place_of(outer) => current = nested,
            _ => break expression,
        }
    };

    let green = without_redundant_descendants(&inner);
    leading.extend(leading_trivia_of(&green));
    let mut inner_trailing = trailing_trivia_of(&green);
    inner_trailing.extend(trailing);
    let mut trailing = inner_trailing;

    let detached = SyntaxNode::new_root(green.clone());
    if leading.is_empty() {
        let before = prev_significant_token(&open);
        if glued(before.as_ref(), first_significant_token(&detached).as_ref(), &open) {
            leading.push(TriviaPiece::whitespace(" "));
        }
    }
    if trailing.is_empty() {
        let after = next_significant_token(&close);
        if glued(last_significant_token(&detached).as_ref(), after.as_ref(), &close) {
            trailing.push(TriviaPiece::whitespace(" "));
        }
    }

    Some(with_trailing_trivia(&with_leading_trivia(&green, &leading), &trailing))
}

/// Copy of `node` with every outermost redundant parenthesized descendant
/// unwrapped
fn without_redundant_descendants(node: &SyntaxNode) -> GreenNode {
    let mut rewriter = TreeRewriter::new();
    let mut covered: Option<TextRange> = None;
    for descendant in node.descendants().skip(1) {
        if covered.is_some_and(|range| range.contains_range(descendant.text_range())) {
            continue;
        }
        let Some(paren) = ParenExpr::cast(descendant.clone()).filter(ParenExpr::is_redundant) else {
            continue;
        };
        if let Some(green) = unwrapped(&paren) {
            covered = Some(descendant.text_range());
            rewriter.replace(NodeOrToken::Node(descendant), vec![NodeOrToken::Node(green)]);
        }
    }
    rewriter.rewrite(node)
}

fn pieces(list: &[Trivia]) -> Vec<TriviaPiece> {
    list.iter().map(Trivia::piece).collect()
}

fn is_word(token: &SyntaxToken) -> bool {
    let kind = token.kind();
    kind == SyntaxKind::Ident || kind.is_keyword() || kind.is_literal()
}

/// `left` and `right` are words that would touch once the parenthesis
/// between them is gone; `paren` is the removed parenthesis, and touches the
/// word on its other side
fn glued(left: Option<&SyntaxToken>, right: Option<&SyntaxToken>, paren: &SyntaxToken) -> bool {
    let (Some(left), Some(right)) = (left, right) else {
        return false;
    };
    let touching = if paren.kind() == SyntaxKind::LParen {
        left.text_range().end() == paren.text_range().start()
    } else {
        paren.text_range().end() == right.text_range().start()
    };
    touching && is_word(left) && is_word(right)
}
