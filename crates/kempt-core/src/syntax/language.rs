//! Rowan language implementation
//!
//! This module implements the `rowan::Language` trait, which connects our
//! [`SyntaxKind`] enum to Rowan's generic CST infrastructure.

use rowan::Language;

use super::SyntaxKind;

/// Language implementation for kempt sources
///
/// This is a zero-sized type that implements `rowan::Language` to provide
/// the connection between our syntax kinds and Rowan's generic tree types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct KemptLanguage;

impl Language for KemptLanguage {
    type Kind = SyntaxKind;

    fn kind_from_raw(raw: rowan::SyntaxKind) -> Self::Kind {
        // Raw kinds only ever come from `SyntaxKind as u16`
        SyntaxKind::from_raw(raw.0).unwrap_or(SyntaxKind::Error)
    }

    fn kind_to_raw(kind: Self::Kind) -> rowan::SyntaxKind {
        kind.into()
    }
}

/// Red tree node
pub type SyntaxNode = rowan::SyntaxNode<KemptLanguage>;
/// Red tree token (significant or trivia)
pub type SyntaxToken = rowan::SyntaxToken<KemptLanguage>;
/// Either a node or a token
pub type SyntaxElement = rowan::SyntaxElement<KemptLanguage>;
/// Owned green element, the unit of structural replacement
pub type GreenElement = rowan::NodeOrToken<rowan::GreenNode, rowan::GreenToken>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_round_trip() {
        for kind in SyntaxKind::ALL {
            let raw = KemptLanguage::kind_to_raw(kind);
            assert_eq!(KemptLanguage::kind_from_raw(raw), kind);
        }
    }
}
