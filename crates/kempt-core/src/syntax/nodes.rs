//! Navigation helpers over the red tree that skip trivia

use rowan::{NodeOrToken, TextRange};

use super::{SyntaxElement, SyntaxKind, SyntaxNode, SyntaxToken};

/// First significant token inside a node
pub fn first_significant_token(node: &SyntaxNode) -> Option<SyntaxToken> {
    node.descendants_with_tokens()
        .filter_map(|element| element.into_token())
        .find(|token| !token.kind().is_trivia())
}

/// Last significant token inside a node
pub fn last_significant_token(node: &SyntaxNode) -> Option<SyntaxToken> {
    node.descendants_with_tokens()
        .filter_map(|element| element.into_token())
        .filter(|token| !token.kind().is_trivia())
        .last()
}

/// Previous significant token in document order
pub fn prev_significant_token(token: &SyntaxToken) -> Option<SyntaxToken> {
    let mut cursor = token.prev_token();
    while let Some(current) = cursor {
        if !current.kind().is_trivia() {
            return Some(current);
        }
        cursor = current.prev_token();
    }
    None
}

/// Next significant token in document order
pub fn next_significant_token(token: &SyntaxToken) -> Option<SyntaxToken> {
    let mut cursor = token.next_token();
    while let Some(current) = cursor {
        if !current.kind().is_trivia() {
            return Some(current);
        }
        cursor = current.next_token();
    }
    None
}

/// Range of an element without its outer trivia
pub fn trimmed_range(element: &SyntaxElement) -> TextRange {
    match element {
        NodeOrToken::Token(token) => token.text_range(),
        NodeOrToken::Node(node) => {
            match (first_significant_token(node), last_significant_token(node)) {
                (Some(first), Some(last)) => {
                    TextRange::new(first.text_range().start(), last.text_range().end())
                }
                _ => TextRange::empty(node.text_range().start()),
            }
        }
    }
}

/// Node kinds delimited by a pair of braces
pub fn is_braced_scope(kind: SyntaxKind) -> bool {
    matches!(
        kind,
        SyntaxKind::Block
            | SyntaxKind::TypeBody
            | SyntaxKind::NamespaceBody
            | SyntaxKind::SwitchBody
            | SyntaxKind::EnumBody
    )
}

/// Opening and closing brace of a braced scope, when both are present
pub fn scope_braces(node: &SyntaxNode) -> Option<(SyntaxToken, SyntaxToken)> {
    if !is_braced_scope(node.kind()) {
        return None;
    }
    let open = direct_token(node, SyntaxKind::LBrace)?;
    let close = node
        .children_with_tokens()
        .filter_map(|element| element.into_token())
        .filter(|token| token.kind() == SyntaxKind::RBrace)
        .last()?;
    Some((open, close))
}

/// First direct child token of a given kind
pub fn direct_token(node: &SyntaxNode, kind: SyntaxKind) -> Option<SyntaxToken> {
    node.children_with_tokens()
        .filter_map(|element| element.into_token())
        .find(|token| token.kind() == kind)
}

/// Any trivia token strictly between the first and last significant token of
/// a node satisfies `predicate`
pub fn has_interior_trivia(node: &SyntaxNode, predicate: impl Fn(&SyntaxToken) -> bool) -> bool {
    let range = trimmed_range(&NodeOrToken::Node(node.clone()));
    node.descendants_with_tokens()
        .filter_map(|element| element.into_token())
        .filter(|token| token.kind().is_trivia())
        .filter(|token| range.contains_range(token.text_range()))
        .any(|token| predicate(&token))
}
