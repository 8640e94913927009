//! Position resolution
//!
//! Maps a violation span back to the element of the current tree it refers
//! to. A non-empty span resolves to the token or trivia piece containing its
//! start. A zero-width span strictly inside a token resolves to that token;
//! one that falls between tokens becomes an insertion point in front of the
//! next significant token's leading trivia.

use rowan::{TextRange, TextSize, TokenAtOffset};
use tracing::debug;

use crate::error::KemptError;
use crate::result::Result;
use crate::syntax::nodes::next_significant_token;
use crate::syntax::{SyntaxNode, SyntaxToken};
use crate::trivia::{Token, TriviaSide, trivia_owner};

/// Concrete element a violation is anchored to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Anchor {
    /// A significant token
    Token(SyntaxToken),
    /// A trivia piece, with the significant token owning it
    Trivia {
        trivia: SyntaxToken,
        owner: SyntaxToken,
        side: TriviaSide,
    },
    /// A point between tokens: insert at `offset`, the start of the leading
    /// trivia of `before`
    Insertion { before: SyntaxToken, offset: TextSize },
}

impl Anchor {
    /// Significant token the anchor belongs to
    pub fn token(&self) -> &SyntaxToken {
        match self {
            Anchor::Token(token) => token,
            Anchor::Trivia { owner, .. } => owner,
            Anchor::Insertion { before, .. } => before,
        }
    }

    pub fn range(&self) -> TextRange {
        match self {
            Anchor::Token(token) => token.text_range(),
            Anchor::Trivia { trivia, .. } => trivia.text_range(),
            Anchor::Insertion { offset, .. } => TextRange::empty(*offset),
        }
    }

    pub fn is_insertion(&self) -> bool {
        matches!(self, Anchor::Insertion { .. })
    }
}

/// Resolve `span` against the tree rooted at `root`
pub fn resolve(root: &SyntaxNode, span: TextRange) -> Result<Anchor> {
    let len = root.text_range().end();
    if span.end() > len {
        return Err(KemptError::resolution(span, len.into()));
    }

    let anchor = if span.is_empty() {
        resolve_point(root, span.start())
    } else {
        root.token_at_offset(span.start())
            .right_biased()
            .and_then(anchor_for)
    };
    let anchor = anchor.ok_or_else(|| KemptError::resolution(span, len.into()))?;
    debug!(?span, anchor = ?anchor.range(), "Resolved violation span");
    Ok(anchor)
}

fn resolve_point(root: &SyntaxNode, offset: TextSize) -> Option<Anchor> {
    let candidate = match root.token_at_offset(offset) {
        TokenAtOffset::Single(token) => {
            let range = token.text_range();
            if range.start() < offset && offset < range.end() {
                return anchor_for(token);
            }
            Some(token)
        }
        TokenAtOffset::Between(_, right) => Some(right),
        TokenAtOffset::None => None,
    };

    let before = match candidate {
        Some(token) if !token.kind().is_trivia() && token.text_range().start() >= offset => token,
        Some(token) => next_significant_token(&token)?,
        None => root
            .descendants_with_tokens()
            .filter_map(|element| element.into_token())
            .find(|token| !token.kind().is_trivia())?,
    };
    let offset = Token::new(before.clone())
        .leading()
        .first()
        .map_or(before.text_range().start(), |trivia| trivia.range.start());
    Some(Anchor::Insertion { before, offset })
}

fn anchor_for(token: SyntaxToken) -> Option<Anchor> {
    if !token.kind().is_trivia() {
        return Some(Anchor::Token(token));
    }
    let (owner, side) = trivia_owner(&token)?;
    Some(Anchor::Trivia {
        trivia: token,
        owner,
        side,
    })
}
