//! Blank lines inside braces and between statements
//!
//! Blank lines always sit in the leading trivia of the token that follows
//! them; each violation spans the blank lines to delete.

use std::ops::Range;

use kempt_core::syntax::nodes::next_significant_token;
use kempt_core::trivia::{Trivia, TriviaKind, is_blank_line, range_of, trivia_lines};
use kempt_core::{Analyzer, SourceDocument, StyleSettings, Token, Violation, rule_ids};
use rowan::TextRange;

use super::brace_pairs;

pub struct NoBlankLineAfterOpenBrace;

impl Analyzer for NoBlankLineAfterOpenBrace {
    fn rule_id(&self) -> &'static str {
        rule_ids::NO_BLANK_LINE_AFTER_OPEN_BRACE
    }

    fn analyze(&self, document: &SourceDocument, _settings: &StyleSettings) -> Vec<Violation> {
        brace_pairs(&document.syntax())
            .filter_map(|(open, _)| next_significant_token(&open))
            .filter_map(|next| {
                let view = Token::new(next);
                let leading = view.leading();
                let blank: Vec<Range<usize>> = trivia_lines(leading)
                    .into_iter()
                    .take_while(|line| is_blank_line(&leading[line.clone()]))
                    .collect();
                covering(leading, &blank)
            })
            .map(|span| Violation::new(self.rule_id(), span).with_message("Remove blank lines after the opening brace"))
            .collect()
    }
}

pub struct NoBlankLineBeforeCloseBrace;

impl Analyzer for NoBlankLineBeforeCloseBrace {
    fn rule_id(&self) -> &'static str {
        rule_ids::NO_BLANK_LINE_BEFORE_CLOSE_BRACE
    }

    fn analyze(&self, document: &SourceDocument, _settings: &StyleSettings) -> Vec<Violation> {
        brace_pairs(&document.syntax())
            .filter_map(|(_, close)| {
                let view = Token::new(close);
                let leading = view.leading();
                let mut lines = trivia_lines(leading);
                // The brace's own line has no break yet
                if lines
                    .last()
                    .is_some_and(|line| leading[line.end - 1].kind != TriviaKind::EndOfLine)
                {
                    lines.pop();
                }
                let mut blank: Vec<Range<usize>> = lines
                    .into_iter()
                    .rev()
                    .take_while(|line| is_blank_line(&leading[line.clone()]))
                    .collect();
                blank.reverse();
                covering(leading, &blank)
            })
            .map(|span| Violation::new(self.rule_id(), span).with_message("Remove blank lines before the closing brace"))
            .collect()
    }
}

/// More consecutive blank lines than the configured maximum
pub struct NoMultipleBlankLines;

impl Analyzer for NoMultipleBlankLines {
    fn rule_id(&self) -> &'static str {
        rule_ids::NO_MULTIPLE_BLANK_LINES
    }

    fn analyze(&self, document: &SourceDocument, settings: &StyleSettings) -> Vec<Violation> {
        let max = settings.layout.max_consecutive_blank_lines;
        let mut violations = Vec::new();

        for token in document.tokens() {
            let leading = token.leading();
            for run in blank_runs(leading) {
                if run.len() <= max {
                    continue;
                }
                if let Some(span) = covering(leading, &run[max..]) {
                    violations.push(Violation::new(self.rule_id(), span).with_message(format!(
                        "More than {max} consecutive blank line{}",
                        if max == 1 { "" } else { "s" }
                    )));
                }
            }
        }
        violations
    }
}

/// Runs of consecutive blank lines in a trivia list
fn blank_runs(list: &[Trivia]) -> Vec<Vec<Range<usize>>> {
    let mut runs: Vec<Vec<Range<usize>>> = Vec::new();
    let mut current: Vec<Range<usize>> = Vec::new();
    for line in trivia_lines(list) {
        if is_blank_line(&list[line.clone()]) {
            current.push(line);
        } else if !current.is_empty() {
            runs.push(std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        runs.push(current);
    }
    runs
}

/// Source range from the first to the last of consecutive `lines`
fn covering(list: &[Trivia], lines: &[Range<usize>]) -> Option<TextRange> {
    let (first, last) = (lines.first()?, lines.last()?);
    range_of(&list[first.start..last.end])
}
