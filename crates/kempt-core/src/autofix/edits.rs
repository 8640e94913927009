//! Edits produced by fix synthesis
//!
//! A [`Replacement`] is either a set of text splices or a set of tree
//! substitutions. Text splices are normalized before they are applied:
//! sorted by `(start, end, text)`, identical duplicates merged, and any
//! overlap reported as a conflict.

use rowan::{TextRange, TextSize};
use serde::Serialize;

use crate::error::KemptError;
use crate::result::Result;
use crate::syntax::green::element_text;
use crate::syntax::{GreenElement, SyntaxElement};

/// Replace the text of `range` with `new_text`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct TextEdit {
    pub range: TextRange,
    pub new_text: String,
}

impl TextEdit {
    pub fn replace(range: TextRange, new_text: impl Into<String>) -> Self {
        Self {
            range,
            new_text: new_text.into(),
        }
    }

    pub fn insert(offset: TextSize, new_text: impl Into<String>) -> Self {
        Self::replace(TextRange::empty(offset), new_text)
    }

    pub fn delete(range: TextRange) -> Self {
        Self::replace(range, String::new())
    }

    pub fn is_insertion(&self) -> bool {
        self.range.is_empty()
    }

    /// Leaves the text unchanged
    pub fn is_noop(&self, text: &str) -> bool {
        text.get(std::ops::Range::<usize>::from(self.range)) == Some(self.new_text.as_str())
    }
}

/// Substitute a tree element with zero or more green elements
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeEdit {
    pub target: SyntaxElement,
    pub replacement: Vec<GreenElement>,
}

impl TreeEdit {
    pub fn new(target: SyntaxElement, replacement: Vec<GreenElement>) -> Self {
        Self {
            target,
            replacement,
        }
    }

    /// The same substitution expressed as a splice over the target's range
    pub fn to_text_edit(&self) -> TextEdit {
        let text: String = self.replacement.iter().map(element_text).collect();
        TextEdit::replace(self.target.text_range(), text)
    }
}

/// Outcome of fix synthesis for one violation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Replacement {
    Text(Vec<TextEdit>),
    Tree(Vec<TreeEdit>),
}

impl Replacement {
    pub fn text(edit: TextEdit) -> Self {
        Replacement::Text(vec![edit])
    }

    pub fn tree(target: SyntaxElement, replacement: Vec<GreenElement>) -> Self {
        Replacement::Tree(vec![TreeEdit::new(target, replacement)])
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Replacement::Text(edits) => edits.is_empty(),
            Replacement::Tree(edits) => edits.is_empty(),
        }
    }

    pub fn is_tree(&self) -> bool {
        matches!(self, Replacement::Tree(_))
    }

    /// Lower to text splices
    pub fn into_text_edits(self) -> Vec<TextEdit> {
        match self {
            Replacement::Text(edits) => edits,
            Replacement::Tree(edits) => edits.iter().map(TreeEdit::to_text_edit).collect(),
        }
    }
}

/// Sort, merge identical duplicates, and reject overlapping edits
///
/// Two edits conflict when their ranges overlap, when an insertion falls
/// strictly inside a replaced range, or when two different insertions share
/// an offset (their relative order would be arbitrary).
pub fn normalize(rule_id: &str, mut edits: Vec<TextEdit>) -> Result<Vec<TextEdit>> {
    edits.sort_by(|a, b| {
        (a.range.start(), a.range.end(), &a.new_text).cmp(&(
            b.range.start(),
            b.range.end(),
            &b.new_text,
        ))
    });
    edits.dedup();

    for pair in edits.windows(2) {
        let (first, second) = (&pair[0], &pair[1]);
        let overlaps = second.range.start() < first.range.end();
        let same_insertion_point = first.is_insertion()
            && second.is_insertion()
            && first.range.start() == second.range.start();
        if overlaps || same_insertion_point {
            return Err(KemptError::conflicting_edits(
                rule_id,
                first.range,
                second.range,
            ));
        }
    }
    Ok(edits)
}

/// Apply normalized edits to `text` in one pass
pub fn apply_edits(text: &str, edits: &[TextEdit]) -> Result<String> {
    let mut output = String::with_capacity(text.len());
    let mut cursor = 0usize;
    for edit in edits {
        let start = usize::from(edit.range.start());
        let end = usize::from(edit.range.end());
        if start < cursor || end > text.len() {
            return Err(KemptError::invalid_edit(format!(
                "edit {:?} does not fit a text of length {}",
                edit.range,
                text.len()
            )));
        }
        let (Some(unchanged), true) = (text.get(cursor..start), text.is_char_boundary(end)) else {
            return Err(KemptError::invalid_edit(format!(
                "edit {:?} splits a character",
                edit.range
            )));
        };
        output.push_str(unchanged);
        output.push_str(&edit.new_text);
        cursor = end;
    }
    output.push_str(&text[cursor..]);
    Ok(output)
}
