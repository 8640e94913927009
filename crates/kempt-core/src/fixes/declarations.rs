//! Declaration rewrites

use rowan::NodeOrToken;

use super::{FixContext, Synthesis};
use crate::autofix::Replacement;
use crate::syntax::ast::{AstNode, AttributeList, ModifierList, TypeRef, modifier_rank};
use crate::syntax::green::{
    leading_trivia_of, node, to_owned_element, token, trailing_trivia_of, trivia_elements,
    with_leading_trivia, with_trailing_trivia,
};
use crate::syntax::nodes::has_interior_trivia;
use crate::syntax::{GreenElement, SyntaxKind, SyntaxNode, SyntaxToken, TrackedTree};
use crate::trivia::{Token, TriviaPiece};

fn is_comment_or_directive(token: &SyntaxToken) -> bool {
    matches!(
        token.kind(),
        SyntaxKind::LineComment | SyntaxKind::BlockComment | SyntaxKind::Directive
    )
}

/// Sort modifiers into access, `static`, other order; trivia between them
/// stays where it is
pub(super) fn reorder_modifiers(context: &FixContext<'_>) -> Synthesis {
    let Some(list) = context
        .anchor
        .token()
        .parent()
        .and_then(ModifierList::cast)
    else {
        return Err(context.decline("violation does not point at a modifier list"));
    };
    if list.is_ordered() {
        return Err(context.decline("modifiers are already ordered"));
    }

    let mut sorted: Vec<SyntaxToken> = list.modifiers().collect();
    sorted.sort_by_key(|modifier| modifier_rank(modifier.kind()));
    let mut sorted = sorted.into_iter();

    let children: Vec<GreenElement> = list
        .syntax()
        .children_with_tokens()
        .map(|element| match element {
            NodeOrToken::Token(original) if !original.kind().is_trivia() => {
                let modifier = sorted.next().unwrap_or(original);
                token(modifier.kind(), modifier.text())
            }
            NodeOrToken::Token(trivia) => token(trivia.kind(), trivia.text()),
            NodeOrToken::Node(child) => NodeOrToken::Node(child.green().into_owned()),
        })
        .collect();

    Ok(Replacement::tree(
        NodeOrToken::Node(list.syntax().clone()),
        vec![NodeOrToken::Node(node(SyntaxKind::ModifierList, children))],
    ))
}

/// Replace `Int32` or `System.Int32` with its keyword alias
pub(super) fn use_builtin_alias(context: &FixContext<'_>) -> Synthesis {
    let Some(type_ref) = context
        .anchor
        .token()
        .parent_ancestors()
        .find_map(TypeRef::cast)
    else {
        return Err(context.decline("violation does not point at a type"));
    };
    let Some(alias) = type_ref.builtin_alias() else {
        return Err(context.decline("type has no keyword alias"));
    };
    let Some(keyword) = alias.keyword_text() else {
        return Err(context.decline("type has no keyword alias"));
    };
    if has_interior_trivia(type_ref.syntax(), is_comment_or_directive) {
        return Err(context.decline("a comment sits inside the type name"));
    }

    let green = type_ref.syntax().green().into_owned();
    let leading = leading_trivia_of(&green);
    let trailing = trailing_trivia_of(&green);
    let mut children: Vec<GreenElement> = trivia_elements(&leading).collect();
    children.push(token(alias, keyword));
    children.extend(trivia_elements(&trailing));

    Ok(Replacement::tree(
        NodeOrToken::Node(type_ref.syntax().clone()),
        vec![NodeOrToken::Node(node(SyntaxKind::TypeRef, children))],
    ))
}

/// Split `[A, B, C]` into `[A] [B] [C]`, one list per line when the original
/// list stood on a line of its own
///
/// The split happens one attribute at a time on a detached copy of the list:
/// each step peels the last attribute off the tracked list, which then
/// refers to the remaining shorter list in the next tree version.
pub(super) fn split_attribute_list(context: &FixContext<'_>) -> Synthesis {
    let Some(list) = context
        .anchor
        .token()
        .parent_ancestors()
        .find_map(AttributeList::cast)
    else {
        return Err(context.decline("violation does not point at an attribute list"));
    };
    let (Some(open), Some(close)) = (list.l_bracket(), list.r_bracket()) else {
        return Err(context.decline("attribute list is incomplete"));
    };
    if list.attributes().count() < 2 {
        return Err(context.decline("attribute list holds a single attribute"));
    }
    if has_interior_trivia(list.syntax(), is_comment_or_directive) {
        return Err(context.decline("a comment sits between the attributes"));
    }

    let open_view = Token::new(open);
    let separator: Vec<TriviaPiece> = if open_view.is_first_on_line() && Token::new(close).ends_line() {
        let mut pieces = vec![TriviaPiece::end_of_line(context.line_ending())];
        if !open_view.indentation().is_empty() {
            pieces.push(TriviaPiece::whitespace(open_view.indentation()));
        }
        pieces
    } else {
        vec![TriviaPiece::whitespace(" ")]
    };

    let wrapper = node(
        SyntaxKind::SourceFile,
        vec![NodeOrToken::Node(list.syntax().green().into_owned())],
    );
    let mut tree = TrackedTree::new(wrapper);
    let Some(detached) = tree.root().first_child() else {
        return Err(context.decline("attribute list could not be copied"));
    };
    let marker = tree.track(&detached);

    while let Some(current) = tree.current(marker).and_then(AttributeList::cast) {
        let attributes: Vec<SyntaxNode> = current.attributes().collect();
        let Some((last, rest)) = attributes.split_last().filter(|(_, rest)| !rest.is_empty()) else {
            break;
        };
        let green = current.syntax().green().into_owned();
        let head = bracketed(&leading_trivia_of(&green), rest, &[]);
        let tail = bracketed(&[], std::slice::from_ref(last), &trailing_trivia_of(&green));

        let mut replacement = vec![NodeOrToken::Node(head)];
        replacement.extend(trivia_elements(&separator));
        replacement.push(NodeOrToken::Node(tail));
        tree.replace(marker, replacement)
            .map_err(|err| context.decline(err.to_string()))?;
    }

    let elements: Vec<GreenElement> = tree.green().children().map(to_owned_element).collect();
    Ok(Replacement::tree(NodeOrToken::Node(list.syntax().clone()), elements))
}

/// `[A, B]` from attribute nodes stripped of their own trivia
fn bracketed(
    leading: &[TriviaPiece],
    attributes: &[SyntaxNode],
    trailing: &[TriviaPiece],
) -> rowan::GreenNode {
    let mut children: Vec<GreenElement> = trivia_elements(leading).collect();
    children.push(token(SyntaxKind::LBracket, "["));
    for (index, attribute) in attributes.iter().enumerate() {
        if index > 0 {
            children.push(token(SyntaxKind::Comma, ","));
            children.push(token(SyntaxKind::Whitespace, " "));
        }
        let green = attribute.green();
        let stripped = with_trailing_trivia(&with_leading_trivia(&green, &[]), &[]);
        children.push(NodeOrToken::Node(stripped));
    }
    children.push(token(SyntaxKind::RBracket, "]"));
    children.extend(trivia_elements(trailing));
    node(SyntaxKind::AttributeList, children)
}
