//! Replacement synthesis
//!
//! One [`FixProvider`] variant per supported rule. Each variant maps a
//! resolved violation to a [`Replacement`], or declines when the construct
//! cannot be fixed mechanically. Declining is a normal outcome, not an error:
//! the violation stays reported and is left to the user.
//!
//! Synthesizers only read the tree version they are given. They never depend
//! on another violation's fix, which is what allows a whole batch to be
//! synthesized against one shared tree.

mod blank_lines;
mod declarations;
mod expressions;
mod indentation;
mod layout;
mod spacing;
mod statements;

use std::fmt;

use crate::autofix::Replacement;
use crate::diagnostics::Violation;
use crate::document::SourceDocument;
use crate::indent::{DefaultIndentScopes, nesting_depth};
use crate::resolver::Anchor;
use crate::rules::{properties, rule_ids};
use crate::settings::StyleSettings;
use crate::syntax::{SyntaxNode, SyntaxToken};

/// A fix that is legitimately impossible for one violation instance
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynthesisDecline {
    pub rule_id: String,
    pub reason: String,
}

impl SynthesisDecline {
    pub fn new(rule_id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            rule_id: rule_id.into(),
            reason: reason.into(),
        }
    }
}

impl fmt::Display for SynthesisDecline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "no fix for '{}': {}", self.rule_id, self.reason)
    }
}

pub type Synthesis = std::result::Result<Replacement, SynthesisDecline>;

/// Everything a synthesizer may look at
#[derive(Debug, Clone, Copy)]
pub struct FixContext<'a> {
    pub document: &'a SourceDocument,
    /// Red root the anchor was resolved against
    pub root: &'a SyntaxNode,
    pub violation: &'a Violation,
    pub anchor: &'a Anchor,
    pub settings: &'a StyleSettings,
}

impl FixContext<'_> {
    pub fn decline(&self, reason: impl Into<String>) -> SynthesisDecline {
        SynthesisDecline::new(self.violation.rule_id.clone(), reason)
    }

    pub fn line_ending(&self) -> &'static str {
        self.document.line_ending().as_str()
    }

    /// Indentation for the line starting with `token`: the rule's hint when
    /// present, otherwise derived from the token's nesting depth
    pub fn expected_indentation(&self, token: &SyntaxToken) -> String {
        match self.violation.property(properties::EXPECTED_INDENTATION) {
            Some(expected) => expected.to_string(),
            None => self
                .settings
                .indentation
                .indentation_string(nesting_depth(token, &DefaultIndentScopes)),
        }
    }
}

/// Closed registry of fix synthesizers, one per rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FixProvider {
    Indentation,
    NoEmptyStatement,
    RedundantParentheses,
    BracesOnOwnLine,
    NoBlankLineAfterOpenBrace,
    NoBlankLineBeforeCloseBrace,
    NoMultipleBlankLines,
    BlankLineAfterCloseBrace,
    NoTrailingWhitespace,
    NoMultipleWhitespace,
    SemicolonSpacing,
    ClosingParenthesisOnLastLine,
    ModifierOrder,
    UseBuiltinTypeAlias,
    SplitAttributeLists,
}

impl FixProvider {
    pub const ALL: [FixProvider; 15] = [
        FixProvider::Indentation,
        FixProvider::NoEmptyStatement,
        FixProvider::RedundantParentheses,
        FixProvider::BracesOnOwnLine,
        FixProvider::NoBlankLineAfterOpenBrace,
        FixProvider::NoBlankLineBeforeCloseBrace,
        FixProvider::NoMultipleBlankLines,
        FixProvider::BlankLineAfterCloseBrace,
        FixProvider::NoTrailingWhitespace,
        FixProvider::NoMultipleWhitespace,
        FixProvider::SemicolonSpacing,
        FixProvider::ClosingParenthesisOnLastLine,
        FixProvider::ModifierOrder,
        FixProvider::UseBuiltinTypeAlias,
        FixProvider::SplitAttributeLists,
    ];

    pub fn rule_id(self) -> &'static str {
        match self {
            FixProvider::Indentation => rule_ids::INDENTATION,
            FixProvider::NoEmptyStatement => rule_ids::NO_EMPTY_STATEMENT,
            FixProvider::RedundantParentheses => rule_ids::REDUNDANT_PARENTHESES,
            FixProvider::BracesOnOwnLine => rule_ids::BRACES_ON_OWN_LINE,
            FixProvider::NoBlankLineAfterOpenBrace => rule_ids::NO_BLANK_LINE_AFTER_OPEN_BRACE,
            FixProvider::NoBlankLineBeforeCloseBrace => rule_ids::NO_BLANK_LINE_BEFORE_CLOSE_BRACE,
            FixProvider::NoMultipleBlankLines => rule_ids::NO_MULTIPLE_BLANK_LINES,
            FixProvider::BlankLineAfterCloseBrace => rule_ids::BLANK_LINE_AFTER_CLOSE_BRACE,
            FixProvider::NoTrailingWhitespace => rule_ids::NO_TRAILING_WHITESPACE,
            FixProvider::NoMultipleWhitespace => rule_ids::NO_MULTIPLE_WHITESPACE,
            FixProvider::SemicolonSpacing => rule_ids::SEMICOLON_SPACING,
            FixProvider::ClosingParenthesisOnLastLine => rule_ids::CLOSING_PARENTHESIS_ON_LAST_LINE,
            FixProvider::ModifierOrder => rule_ids::MODIFIER_ORDER,
            FixProvider::UseBuiltinTypeAlias => rule_ids::USE_BUILTIN_TYPE_ALIAS,
            FixProvider::SplitAttributeLists => rule_ids::SPLIT_ATTRIBUTE_LISTS,
        }
    }

    pub fn from_rule_id(rule_id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|provider| provider.rule_id() == rule_id)
    }

    /// Short description of the code action
    pub fn title(self) -> &'static str {
        match self {
            FixProvider::Indentation => "Fix indentation",
            FixProvider::NoEmptyStatement => "Remove empty statement",
            FixProvider::RedundantParentheses => "Remove redundant parentheses",
            FixProvider::BracesOnOwnLine => "Place brace on its own line",
            FixProvider::NoBlankLineAfterOpenBrace => "Remove blank lines after opening brace",
            FixProvider::NoBlankLineBeforeCloseBrace => "Remove blank lines before closing brace",
            FixProvider::NoMultipleBlankLines => "Remove extra blank lines",
            FixProvider::BlankLineAfterCloseBrace => "Insert blank line after closing brace",
            FixProvider::NoTrailingWhitespace => "Remove trailing whitespace",
            FixProvider::NoMultipleWhitespace => "Collapse whitespace",
            FixProvider::SemicolonSpacing => "Remove space before semicolon",
            FixProvider::ClosingParenthesisOnLastLine => "Move closing parenthesis to the last line",
            FixProvider::ModifierOrder => "Reorder modifiers",
            FixProvider::UseBuiltinTypeAlias => "Use built-in type alias",
            FixProvider::SplitAttributeLists => "Place each attribute in its own list",
        }
    }

    /// Build the replacement for one resolved violation
    pub fn synthesize(self, context: &FixContext<'_>) -> Synthesis {
        match self {
            FixProvider::Indentation => indentation::reindent(context),
            FixProvider::NoEmptyStatement => statements::remove_empty_statement(context),
            FixProvider::RedundantParentheses => expressions::remove_parentheses(context),
            FixProvider::BracesOnOwnLine => layout::brace_on_own_line(context),
            FixProvider::NoBlankLineAfterOpenBrace
            | FixProvider::NoBlankLineBeforeCloseBrace
            | FixProvider::NoMultipleBlankLines => blank_lines::remove_blank_lines(context),
            FixProvider::BlankLineAfterCloseBrace => layout::insert_blank_line(context),
            FixProvider::NoTrailingWhitespace => spacing::trim_line_end(context),
            FixProvider::NoMultipleWhitespace => spacing::collapse_whitespace(context),
            FixProvider::SemicolonSpacing => spacing::remove_space_before_semicolon(context),
            FixProvider::ClosingParenthesisOnLastLine => layout::join_closing_parenthesis(context),
            FixProvider::ModifierOrder => declarations::reorder_modifiers(context),
            FixProvider::UseBuiltinTypeAlias => declarations::use_builtin_alias(context),
            FixProvider::SplitAttributeLists => declarations::split_attribute_list(context),
        }
    }
}

impl fmt::Display for FixProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.rule_id())
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use rowan::TextRange;

    use super::*;
    use crate::autofix::{apply_edits, normalize};
    use crate::resolver::resolve;

    /// Synthesize a fix for `rule_id` at `span` and return the fixed text,
    /// or the decline reason
    pub fn fix_text(
        source: &str,
        rule_id: &str,
        span: TextRange,
        properties: &[(&str, &str)],
    ) -> std::result::Result<String, String> {
        let document = SourceDocument::new(source);
        let root = document.syntax();
        let violation = properties.iter().fold(
            Violation::new(rule_id, span),
            |violation, (key, value)| violation.with_property(*key, *value),
        );
        let anchor = resolve(&root, span).map_err(|e| e.to_string())?;
        let settings = StyleSettings::default();
        let context = FixContext {
            document: &document,
            root: &root,
            violation: &violation,
            anchor: &anchor,
            settings: &settings,
        };
        let provider = FixProvider::from_rule_id(rule_id).ok_or("unknown rule")?;
        let replacement = provider.synthesize(&context).map_err(|d| d.reason)?;
        let edits = normalize(rule_id, replacement.into_text_edits()).map_err(|e| e.to_string())?;
        apply_edits(source, &edits).map_err(|e| e.to_string())
    }

    /// Span of the `nth` occurrence of `needle` in `source`
    pub fn span_of(source: &str, needle: &str, nth: usize) -> TextRange {
        let start = source
            .match_indices(needle)
            .nth(nth)
            .map(|(index, _)| index)
            .unwrap();
        TextRange::new((start as u32).into(), ((start + needle.len()) as u32).into())
    }
}
