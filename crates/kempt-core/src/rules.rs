//! Rule collaborator contract
//!
//! Rules decide whether a violation exists; this crate only consumes what
//! they report. Every rule id listed here has exactly one fix provider.

use crate::diagnostics::Violation;
use crate::document::SourceDocument;
use crate::settings::StyleSettings;

/// Identifiers of the supported style rules
pub mod rule_ids {
    pub const INDENTATION: &str = "layout/indentation";
    pub const NO_EMPTY_STATEMENT: &str = "readability/no-empty-statement";
    pub const REDUNDANT_PARENTHESES: &str = "maintainability/redundant-parentheses";
    pub const BRACES_ON_OWN_LINE: &str = "layout/braces-on-own-line";
    pub const NO_BLANK_LINE_AFTER_OPEN_BRACE: &str = "layout/no-blank-line-after-open-brace";
    pub const NO_BLANK_LINE_BEFORE_CLOSE_BRACE: &str = "layout/no-blank-line-before-close-brace";
    pub const NO_MULTIPLE_BLANK_LINES: &str = "layout/no-multiple-blank-lines";
    pub const BLANK_LINE_AFTER_CLOSE_BRACE: &str = "layout/blank-line-after-close-brace";
    pub const NO_TRAILING_WHITESPACE: &str = "spacing/no-trailing-whitespace";
    pub const NO_MULTIPLE_WHITESPACE: &str = "spacing/no-multiple-whitespace";
    pub const SEMICOLON_SPACING: &str = "spacing/semicolon-spacing";
    pub const CLOSING_PARENTHESIS_ON_LAST_LINE: &str = "layout/closing-parenthesis-on-last-line";
    pub const MODIFIER_ORDER: &str = "ordering/modifier-order";
    pub const USE_BUILTIN_TYPE_ALIAS: &str = "readability/use-builtin-type-alias";
    pub const SPLIT_ATTRIBUTE_LISTS: &str = "readability/split-attribute-lists";
}

/// Property names shared by analyzers and fix providers
pub mod properties {
    /// Indentation text the flagged line should start with
    pub const EXPECTED_INDENTATION: &str = "expectedIndentation";
    /// Which side of a brace holds code: `precededByCode` or `followedByCode`
    pub const VIOLATION: &str = "violation";
    pub const PRECEDED_BY_CODE: &str = "precededByCode";
    pub const FOLLOWED_BY_CODE: &str = "followedByCode";
}

/// Produces the violations of one rule for a document
///
/// Analysis must be deterministic: the same document and settings always
/// yield the same violations.
pub trait Analyzer: Send + Sync {
    fn rule_id(&self) -> &'static str;

    fn analyze(&self, document: &SourceDocument, settings: &StyleSettings) -> Vec<Violation>;
}
