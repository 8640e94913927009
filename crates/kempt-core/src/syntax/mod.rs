//! Concrete Syntax Tree (CST) for kempt sources
//!
//! This module implements a lossless syntax tree using the Rowan library.
//! The CST preserves all source information including whitespace, comments,
//! directives and line breaks, which is what lets fixes rewrite one passage
//! while leaving every other byte of the file untouched.
//!
//! ## Architecture
//!
//! - **Green Tree**: immutable, position-independent storage shared between
//!   tree versions. A rewrite rebuilds only the path from the edited element
//!   up to the root; every other subtree is reused as is.
//! - **Red Tree**: positioned view with parent pointers, built on demand for
//!   navigation. Red elements are only meaningful for the tree version they
//!   were created from.
//!
//! ## Trivia Handling
//!
//! Trivia tokens are stored as siblings around the significant token that
//! owns them. See [`crate::trivia`] for the ownership rule and the
//! `(leading, text, trailing)` token view.
//!
//! ## Example
//!
//! ```rust
//! use kempt_core::syntax::{SyntaxKind, SyntaxNode, parse};
//!
//! let source = "x = (a); // note\n";
//! let root = SyntaxNode::new_root(parse(source).green);
//!
//! // Lossless
//! assert_eq!(root.text().to_string(), source);
//!
//! let comments = root
//!     .descendants_with_tokens()
//!     .filter_map(|element| element.into_token())
//!     .filter(|token| token.kind() == SyntaxKind::LineComment)
//!     .count();
//! assert_eq!(comments, 1);
//! ```

mod language;
mod lexer;
mod parser;
mod syntax_kind;

pub mod ast;
pub mod green;
pub mod nodes;
pub mod rewrite;
pub mod tracking;

pub use language::{GreenElement, KemptLanguage, SyntaxElement, SyntaxNode, SyntaxToken};
pub use lexer::{LexResult, LexSpan, LexerError, RawToken, lex_with_trivia};
pub use parser::{Parse, ParseError, parse};
pub use rewrite::TreeRewriter;
pub use syntax_kind::SyntaxKind;
pub use tracking::{Marker, TrackedTree};
