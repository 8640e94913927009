//! Trivia model
//!
//! Trivia is every piece of source text that carries no syntactic meaning:
//! whitespace runs, line breaks, comments and directives. Each piece belongs
//! to exactly one significant token, either as leading trivia (before it) or
//! trailing trivia (after it).
//!
//! Ownership rule: trivia following a token up to and including the first
//! line break is trailing trivia of that token; if no line break occurs before
//! the next token, all of it is trailing. The remainder is leading trivia of
//! the next token. Trivia before the first token of a file is leading trivia,
//! and trivia after the last real token is leading trivia of the zero-width
//! end-of-file token.
//!
//! The tree stores trivia as sibling tokens around their owner; [`Token`]
//! recomputes the `(leading, text, trailing)` view from it.

use std::ops::Range;

use rowan::{GreenToken, TextRange, TextSize};

use crate::syntax::{SyntaxKind, SyntaxNode, SyntaxToken};

/// Classification of a trivia piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TriviaKind {
    Whitespace,
    EndOfLine,
    SingleLineComment,
    MultiLineComment,
    Directive,
}

impl TriviaKind {
    /// Classify a syntax kind, `None` for significant kinds
    pub fn from_syntax(kind: SyntaxKind) -> Option<Self> {
        match kind {
            SyntaxKind::Whitespace => Some(Self::Whitespace),
            SyntaxKind::Newline => Some(Self::EndOfLine),
            SyntaxKind::LineComment => Some(Self::SingleLineComment),
            SyntaxKind::BlockComment => Some(Self::MultiLineComment),
            SyntaxKind::Directive => Some(Self::Directive),
            _ => None,
        }
    }

    pub fn syntax_kind(self) -> SyntaxKind {
        match self {
            Self::Whitespace => SyntaxKind::Whitespace,
            Self::EndOfLine => SyntaxKind::Newline,
            Self::SingleLineComment => SyntaxKind::LineComment,
            Self::MultiLineComment => SyntaxKind::BlockComment,
            Self::Directive => SyntaxKind::Directive,
        }
    }

    pub fn is_comment(self) -> bool {
        matches!(self, Self::SingleLineComment | Self::MultiLineComment)
    }

    /// Whitespace or line break
    pub fn is_whitespace(self) -> bool {
        matches!(self, Self::Whitespace | Self::EndOfLine)
    }
}

/// Which side of its owner a trivia piece sits on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TriviaSide {
    Leading,
    Trailing,
}

/// Common view over located and detached trivia
pub trait TriviaLike {
    fn kind(&self) -> TriviaKind;
    fn text(&self) -> &str;
}

/// A trivia piece located in a document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trivia {
    pub kind: TriviaKind,
    pub text: String,
    pub range: TextRange,
}

impl Trivia {
    fn from_token(token: &SyntaxToken) -> Option<Self> {
        TriviaKind::from_syntax(token.kind()).map(|kind| Self {
            kind,
            text: token.text().to_string(),
            range: token.text_range(),
        })
    }

    /// Detached copy, for rebuilding trivia lists
    pub fn piece(&self) -> TriviaPiece {
        TriviaPiece::new(self.kind, self.text.clone())
    }
}

impl TriviaLike for Trivia {
    fn kind(&self) -> TriviaKind {
        self.kind
    }

    fn text(&self) -> &str {
        &self.text
    }
}

/// A trivia piece not (yet) part of any document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriviaPiece {
    pub kind: TriviaKind,
    pub text: String,
}

impl TriviaPiece {
    pub fn new(kind: TriviaKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }

    pub fn whitespace(text: impl Into<String>) -> Self {
        Self::new(TriviaKind::Whitespace, text)
    }

    pub fn end_of_line(text: impl Into<String>) -> Self {
        Self::new(TriviaKind::EndOfLine, text)
    }

    pub fn to_green(&self) -> GreenToken {
        GreenToken::new(self.kind.syntax_kind().into(), &self.text)
    }
}

impl TriviaLike for TriviaPiece {
    fn kind(&self) -> TriviaKind {
        self.kind
    }

    fn text(&self) -> &str {
        &self.text
    }
}

/// Number of items of a trivia run (between two significant tokens) that
/// belong to the preceding token: up to and including the first line break,
/// or the whole run when it has none
pub(crate) fn trailing_trivia_len<T>(run: &[T], is_newline: impl Fn(&T) -> bool) -> usize {
    run.iter()
        .position(is_newline)
        .map_or(run.len(), |index| index + 1)
}

/// Token view: a significant token with the trivia it owns
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    syntax: SyntaxToken,
    leading: Vec<Trivia>,
    trailing: Vec<Trivia>,
    /// The token's line starts inside or right after its leading trivia
    starts_after_break: bool,
}

impl Token {
    /// Build the view for a significant token by scanning its neighbours
    pub fn new(syntax: SyntaxToken) -> Self {
        let mut before = Vec::new();
        let mut has_previous = false;
        let mut cursor = syntax.prev_token();
        while let Some(token) = cursor {
            if !token.kind().is_trivia() {
                has_previous = true;
                break;
            }
            cursor = token.prev_token();
            before.push(token);
        }
        before.reverse();

        let mut after = Vec::new();
        let mut cursor = syntax.next_token();
        while let Some(token) = cursor {
            if !token.kind().is_trivia() {
                break;
            }
            cursor = token.next_token();
            after.push(token);
        }
        after.truncate(trailing_trivia_len(&after, is_newline_token));

        let (leading, starts_after_break) = if has_previous {
            let split = trailing_trivia_len(&before, is_newline_token);
            let after_break = split > 0 && is_newline_token(&before[split - 1]);
            (before.split_off(split), after_break)
        } else {
            (before, true)
        };

        Self {
            syntax,
            leading: to_trivia(&leading),
            trailing: to_trivia(&after),
            starts_after_break,
        }
    }

    pub fn syntax(&self) -> &SyntaxToken {
        &self.syntax
    }

    pub fn kind(&self) -> SyntaxKind {
        self.syntax.kind()
    }

    pub fn text(&self) -> &str {
        self.syntax.text()
    }

    /// Range of the token text only
    pub fn span(&self) -> TextRange {
        self.syntax.text_range()
    }

    /// Range covering leading trivia, text and trailing trivia
    pub fn full_span(&self) -> TextRange {
        let start = self.leading.first().map_or(self.span().start(), |t| t.range.start());
        let end = self.trailing.last().map_or(self.span().end(), |t| t.range.end());
        TextRange::new(start, end)
    }

    pub fn leading(&self) -> &[Trivia] {
        &self.leading
    }

    pub fn trailing(&self) -> &[Trivia] {
        &self.trailing
    }

    pub fn trivia(&self, side: TriviaSide) -> &[Trivia] {
        match side {
            TriviaSide::Leading => &self.leading,
            TriviaSide::Trailing => &self.trailing,
        }
    }

    /// Trivia of the token's own line that precedes it
    fn line_prefix(&self) -> Option<&[Trivia]> {
        match self
            .leading
            .iter()
            .rposition(|t| t.kind == TriviaKind::EndOfLine)
        {
            Some(index) => Some(&self.leading[index + 1..]),
            None if self.starts_after_break => Some(&self.leading),
            None => None,
        }
    }

    /// Only whitespace separates the token from the start of its line
    pub fn is_first_on_line(&self) -> bool {
        self.line_prefix()
            .is_some_and(|prefix| prefix.iter().all(|t| t.kind == TriviaKind::Whitespace))
    }

    /// The whitespace trivia indenting this token, when it is first on its line
    pub fn indentation_trivia(&self) -> Option<&Trivia> {
        if !self.is_first_on_line() {
            return None;
        }
        self.line_prefix().and_then(|prefix| prefix.last())
    }

    /// Indentation text, empty when the token is not first on its line
    pub fn indentation(&self) -> &str {
        self.indentation_trivia().map_or("", |t| t.text.as_str())
    }

    /// Offset where the token's line begins, when it is first on its line
    pub fn line_start(&self) -> Option<TextSize> {
        if !self.is_first_on_line() {
            return None;
        }
        let start = match self
            .leading
            .iter()
            .rposition(|t| t.kind == TriviaKind::EndOfLine)
        {
            Some(index) => self.leading[index].range.end(),
            None => self.full_span().start(),
        };
        Some(start)
    }

    /// The trailing trivia ends with a line break
    pub fn ends_line(&self) -> bool {
        self.trailing
            .last()
            .is_some_and(|t| t.kind == TriviaKind::EndOfLine)
    }
}

fn is_newline_token(token: &SyntaxToken) -> bool {
    token.kind() == SyntaxKind::Newline
}

fn to_trivia(tokens: &[SyntaxToken]) -> Vec<Trivia> {
    tokens.iter().filter_map(Trivia::from_token).collect()
}

/// All significant tokens of a tree, in order, with their trivia
///
/// Equivalent to calling [`Token::new`] on every significant token, in a
/// single pass.
pub fn tokens(root: &SyntaxNode) -> Vec<Token> {
    let leaves: Vec<SyntaxToken> = root
        .descendants_with_tokens()
        .filter_map(|element| element.into_token())
        .collect();

    let mut views: Vec<Token> = Vec::new();
    let mut run_start = 0;
    for (index, leaf) in leaves.iter().enumerate() {
        if leaf.kind().is_trivia() {
            continue;
        }
        let run = &leaves[run_start..index];
        let (leading, starts_after_break) = match views.last_mut() {
            None => (run, true),
            Some(previous) => {
                let split = trailing_trivia_len(run, is_newline_token);
                previous.trailing = to_trivia(&run[..split]);
                let after_break = split > 0 && is_newline_token(&run[split - 1]);
                (&run[split..], after_break)
            }
        };
        views.push(Token {
            syntax: leaf.clone(),
            leading: to_trivia(leading),
            trailing: Vec::new(),
            starts_after_break,
        });
        run_start = index + 1;
    }
    views
}

/// Find the significant token owning a trivia token, and on which side
pub fn trivia_owner(trivia: &SyntaxToken) -> Option<(SyntaxToken, TriviaSide)> {
    if !trivia.kind().is_trivia() {
        return None;
    }

    let mut newline_before = false;
    let mut previous = None;
    let mut cursor = trivia.prev_token();
    while let Some(token) = cursor {
        if !token.kind().is_trivia() {
            previous = Some(token);
            break;
        }
        newline_before |= is_newline_token(&token);
        cursor = token.prev_token();
    }

    match previous {
        Some(owner) if !newline_before => Some((owner, TriviaSide::Trailing)),
        _ => {
            let mut cursor = trivia.next_token();
            while let Some(token) = cursor {
                if !token.kind().is_trivia() {
                    return Some((token, TriviaSide::Leading));
                }
                cursor = token.next_token();
            }
            None
        }
    }
}

// ============================================================================
// Trivia list operations
// ============================================================================

/// Concatenated text of a trivia list
pub fn text_of<T: TriviaLike>(list: &[T]) -> String {
    list.iter().map(TriviaLike::text).collect()
}

/// Range covered by a located trivia list
pub fn range_of(list: &[Trivia]) -> Option<TextRange> {
    Some(TextRange::new(list.first()?.range.start(), list.last()?.range.end()))
}

/// Index of the first piece that is not whitespace
///
/// When `end_of_line_is_whitespace` is false, a line break also stops the
/// search.
pub fn index_of_first_non_whitespace<T: TriviaLike>(
    list: &[T],
    end_of_line_is_whitespace: bool,
) -> Option<usize> {
    list.iter().position(|t| match t.kind() {
        TriviaKind::Whitespace => false,
        TriviaKind::EndOfLine => !end_of_line_is_whitespace,
        _ => true,
    })
}

/// Start index of the run of whitespace and line breaks ending the list
/// (`list.len()` when the list does not end with whitespace)
pub fn index_of_trailing_whitespace<T: TriviaLike>(list: &[T]) -> usize {
    list.iter()
        .rposition(|t| !t.kind().is_whitespace())
        .map_or(0, |index| index + 1)
}

/// Copy of the list without the whitespace and line breaks ending it;
/// comments and directives are always retained
pub fn without_trailing_whitespace<T: TriviaLike + Clone>(list: &[T]) -> Vec<T> {
    list[..index_of_trailing_whitespace(list)].to_vec()
}

/// Copy of the list without the whitespace and line breaks starting it
pub fn without_leading_whitespace<T: TriviaLike + Clone>(list: &[T]) -> Vec<T> {
    match index_of_first_non_whitespace(list, true) {
        Some(index) => list[index..].to_vec(),
        None => Vec::new(),
    }
}

/// Split a list after its last comment or directive
///
/// The first half ends with that comment (or is empty when there is none),
/// the second half holds only whitespace and line breaks.
pub fn split_at_last_comment<T: TriviaLike + Clone>(list: &[T]) -> (Vec<T>, Vec<T>) {
    let split = index_of_trailing_whitespace(list);
    (list[..split].to_vec(), list[split..].to_vec())
}

/// Drop a list that holds nothing but spaces on a single line
pub fn retain_meaningful<T: TriviaLike + Clone>(list: &[T]) -> Vec<T> {
    if list.iter().all(|t| t.kind() == TriviaKind::Whitespace) {
        Vec::new()
    } else {
        list.to_vec()
    }
}

/// Index ranges of the lines of a trivia list; each range includes the line
/// break ending it, the last range may lack one
pub fn trivia_lines<T: TriviaLike>(list: &[T]) -> Vec<Range<usize>> {
    let mut lines = Vec::new();
    let mut start = 0;
    for (index, piece) in list.iter().enumerate() {
        if piece.kind() == TriviaKind::EndOfLine {
            lines.push(start..index + 1);
            start = index + 1;
        }
    }
    if start < list.len() {
        lines.push(start..list.len());
    }
    lines
}

/// A complete line holding nothing but whitespace
pub fn is_blank_line<T: TriviaLike>(line: &[T]) -> bool {
    line.last().is_some_and(|t| t.kind() == TriviaKind::EndOfLine)
        && line.iter().all(|t| t.kind().is_whitespace())
}
