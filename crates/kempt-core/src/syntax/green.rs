//! Green tree construction helpers
//!
//! Replacements are expressed as owned green elements. These helpers build
//! them and move trivia around a detached subtree, which is how a
//! substituted node keeps the comments and whitespace of the node it
//! replaces.

use rowan::{GreenNode, GreenNodeData, GreenToken, GreenTokenData, Language, NodeOrToken};

use super::{GreenElement, KemptLanguage, SyntaxKind};
use crate::trivia::{TriviaKind, TriviaPiece};

/// Borrowed green child as handed out by `GreenNodeData::children`
pub type GreenElementRef<'a> = NodeOrToken<&'a GreenNodeData, &'a GreenTokenData>;

pub fn to_owned_element(element: GreenElementRef<'_>) -> GreenElement {
    match element {
        NodeOrToken::Node(node) => NodeOrToken::Node(node.to_owned()),
        NodeOrToken::Token(token) => NodeOrToken::Token(token.to_owned()),
    }
}

pub fn kind_of(element: GreenElementRef<'_>) -> SyntaxKind {
    let raw = match element {
        NodeOrToken::Node(node) => node.kind(),
        NodeOrToken::Token(token) => token.kind(),
    };
    KemptLanguage::kind_from_raw(raw)
}

pub fn token(kind: SyntaxKind, text: &str) -> GreenElement {
    NodeOrToken::Token(GreenToken::new(kind.into(), text))
}

pub fn node(kind: SyntaxKind, children: Vec<GreenElement>) -> GreenNode {
    GreenNode::new(kind.into(), children)
}

pub fn trivia_elements(trivia: &[TriviaPiece]) -> impl Iterator<Item = GreenElement> + '_ {
    trivia.iter().map(|piece| NodeOrToken::Token(piece.to_green()))
}

/// Source text of a green subtree
pub fn green_text(node: &GreenNodeData) -> String {
    let mut text = String::new();
    push_text(node, &mut text);
    text
}

pub fn element_text(element: &GreenElement) -> String {
    match element {
        NodeOrToken::Node(node) => green_text(node),
        NodeOrToken::Token(token) => token.text().to_string(),
    }
}

fn push_text(node: &GreenNodeData, text: &mut String) {
    for child in node.children() {
        match child {
            NodeOrToken::Node(child) => push_text(child, text),
            NodeOrToken::Token(token) => text.push_str(token.text()),
        }
    }
}

fn trivia_piece(element: GreenElementRef<'_>) -> Option<TriviaPiece> {
    match element {
        NodeOrToken::Token(token) => TriviaKind::from_syntax(kind_of(element))
            .map(|kind| TriviaPiece::new(kind, token.text())),
        NodeOrToken::Node(_) => None,
    }
}

/// Trivia preceding the first significant token of a subtree
pub fn leading_trivia_of(node: &GreenNodeData) -> Vec<TriviaPiece> {
    let mut trivia = Vec::new();
    for child in node.children() {
        match trivia_piece(child) {
            Some(piece) => trivia.push(piece),
            None => {
                if let NodeOrToken::Node(child) = child {
                    trivia.extend(leading_trivia_of(child));
                }
                break;
            }
        }
    }
    trivia
}

/// Trivia following the last significant token of a subtree
pub fn trailing_trivia_of(node: &GreenNodeData) -> Vec<TriviaPiece> {
    let mut trivia = Vec::new();
    for child in node.children().rev() {
        match trivia_piece(child) {
            Some(piece) => trivia.push(piece),
            None => {
                if let NodeOrToken::Node(child) = child {
                    let mut inner = trailing_trivia_of(child);
                    inner.reverse();
                    trivia.extend(inner);
                }
                break;
            }
        }
    }
    trivia.reverse();
    trivia
}

/// Copy of a subtree whose leading trivia is replaced by `trivia`
pub fn with_leading_trivia(node: &GreenNodeData, trivia: &[TriviaPiece]) -> GreenNode {
    let children: Vec<GreenElementRef<'_>> = node.children().collect();
    let first = children.iter().position(|child| trivia_piece(*child).is_none());

    let mut rebuilt: Vec<GreenElement> = Vec::with_capacity(children.len() + trivia.len());
    match first {
        None => rebuilt.extend(trivia_elements(trivia)),
        Some(index) => {
            match children[index] {
                NodeOrToken::Node(child) => {
                    rebuilt.push(NodeOrToken::Node(with_leading_trivia(child, trivia)));
                }
                NodeOrToken::Token(token) => {
                    rebuilt.extend(trivia_elements(trivia));
                    rebuilt.push(NodeOrToken::Token(token.to_owned()));
                }
            }
            rebuilt.extend(children[index + 1..].iter().copied().map(to_owned_element));
        }
    }
    GreenNode::new(node.kind(), rebuilt)
}

/// Copy of a subtree whose trailing trivia is replaced by `trivia`
pub fn with_trailing_trivia(node: &GreenNodeData, trivia: &[TriviaPiece]) -> GreenNode {
    let children: Vec<GreenElementRef<'_>> = node.children().collect();
    let last = children.iter().rposition(|child| trivia_piece(*child).is_none());

    let mut rebuilt: Vec<GreenElement> = Vec::with_capacity(children.len() + trivia.len());
    match last {
        None => rebuilt.extend(trivia_elements(trivia)),
        Some(index) => {
            rebuilt.extend(children[..index].iter().copied().map(to_owned_element));
            match children[index] {
                NodeOrToken::Node(child) => {
                    rebuilt.push(NodeOrToken::Node(with_trailing_trivia(child, trivia)));
                }
                NodeOrToken::Token(token) => {
                    rebuilt.push(NodeOrToken::Token(token.to_owned()));
                    rebuilt.extend(trivia_elements(trivia));
                }
            }
        }
    }
    GreenNode::new(node.kind(), rebuilt)
}
