//! Immutable source documents
//!
//! A [`SourceDocument`] pairs a text with its parse tree. Applying a fix
//! never mutates a document: it produces a new one from the edited text.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use rowan::{GreenNode, TextSize};
use tracing::{debug, error};

use crate::error::KemptError;
use crate::result::Result;
use crate::syntax::{ParseError, SyntaxNode, parse};
use crate::trivia::{self, Token};

/// Line break style of a document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LineEnding {
    #[default]
    Lf,
    CrLf,
}

impl LineEnding {
    /// Style of the first line break in `text`, `Lf` when there is none
    pub fn detect(text: &str) -> Self {
        match text.find('\n') {
            Some(index) if text[..index].ends_with('\r') => Self::CrLf,
            _ => Self::Lf,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Lf => "\n",
            Self::CrLf => "\r\n",
        }
    }
}

impl fmt::Display for LineEnding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Lf => "LF",
            Self::CrLf => "CRLF",
        })
    }
}

/// Full text of a file together with its lossless parse tree
#[derive(Debug, Clone)]
pub struct SourceDocument {
    text: Arc<str>,
    green: GreenNode,
    errors: Arc<[ParseError]>,
    path: Option<PathBuf>,
}

impl SourceDocument {
    /// Parse `text` into a new document
    pub fn new(text: impl Into<String>) -> Self {
        let text: String = text.into();
        let parse = parse(&text);
        Self {
            text: text.into(),
            green: parse.green,
            errors: parse.errors.into(),
            path: None,
        }
    }

    /// Attach the path the document was loaded from
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn len(&self) -> TextSize {
        TextSize::of(&*self.text)
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn green(&self) -> &GreenNode {
        &self.green
    }

    /// Red view of the tree, built on demand
    pub fn syntax(&self) -> SyntaxNode {
        SyntaxNode::new_root(self.green.clone())
    }

    pub fn errors(&self) -> &[ParseError] {
        &self.errors
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn line_ending(&self) -> LineEnding {
        LineEnding::detect(&self.text)
    }

    /// Significant tokens with their trivia, in document order
    pub fn tokens(&self) -> Vec<Token> {
        trivia::tokens(&self.syntax())
    }

    /// Successor document holding `text`
    ///
    /// Fails with [`KemptError::Reparse`] when the new text has more parse
    /// errors than this document: a correct fix never breaks the syntax.
    pub fn with_text(&self, text: String, rule_id: &str) -> Result<Self> {
        let mut next = Self::new(text);
        next.path = self.path.clone();

        if next.errors.len() > self.errors.len() {
            let message = next
                .errors
                .iter()
                .map(|err| err.message.as_str())
                .collect::<Vec<_>>()
                .join("; ");
            error!(
                rule_id,
                before = %self.text,
                after = %next.text,
                "Fix produced invalid syntax: {}",
                message
            );
            return Err(KemptError::reparse(rule_id, message));
        }

        debug!(
            rule_id,
            before = self.text.len(),
            after = next.text.len(),
            "Committed document update"
        );
        Ok(next)
    }
}

impl PartialEq for SourceDocument {
    fn eq(&self, other: &Self) -> bool {
        self.text == other.text && self.path == other.path
    }
}

impl Eq for SourceDocument {}
