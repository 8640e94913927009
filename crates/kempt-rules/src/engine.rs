//! Rule engine implementation

use kempt_core::{
    Analyzer, DefaultAutofixEngine, Result, SettingsProvider, SourceDocument, StyleSettings,
    Violation,
};
use tracing::debug;

use crate::builtin::BuiltinRules;

/// Registry of analyzers, kept in registration order
///
/// The order is the order in which fix-all batches are applied.
#[derive(Default)]
pub struct RuleRegistry {
    analyzers: Vec<Box<dyn Analyzer>>,
}

impl RuleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an analyzer, replacing any with the same rule id
    pub fn register(&mut self, analyzer: Box<dyn Analyzer>) {
        match self
            .analyzers
            .iter_mut()
            .find(|existing| existing.rule_id() == analyzer.rule_id())
        {
            Some(existing) => *existing = analyzer,
            None => self.analyzers.push(analyzer),
        }
    }

    pub fn get(&self, rule_id: &str) -> Option<&dyn Analyzer> {
        self.analyzers
            .iter()
            .find(|analyzer| analyzer.rule_id() == rule_id)
            .map(|analyzer| analyzer.as_ref())
    }

    pub fn list_ids(&self) -> Vec<&'static str> {
        self.analyzers.iter().map(|analyzer| analyzer.rule_id()).collect()
    }

    pub fn analyzers(&self) -> &[Box<dyn Analyzer>] {
        &self.analyzers
    }

    pub fn len(&self) -> usize {
        self.analyzers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.analyzers.is_empty()
    }
}

/// Runs registered analyzers and applies their fixes
pub struct RuleEngine<P = StyleSettings> {
    registry: RuleRegistry,
    fixer: DefaultAutofixEngine<P>,
}

impl RuleEngine {
    /// Engine with every built-in rule and default settings
    pub fn with_builtin_rules() -> Self {
        Self::new(BuiltinRules::registry(), StyleSettings::default())
    }
}

impl<P: SettingsProvider> RuleEngine<P> {
    pub fn new(registry: RuleRegistry, settings: P) -> Self {
        Self {
            registry,
            fixer: DefaultAutofixEngine::new(settings),
        }
    }

    pub fn registry(&self) -> &RuleRegistry {
        &self.registry
    }

    pub fn fixer(&self) -> &DefaultAutofixEngine<P> {
        &self.fixer
    }

    /// Violations of every enabled rule, ordered by position
    pub fn analyze(&self, document: &SourceDocument) -> Vec<Violation> {
        let settings = self.fixer.settings().settings_for(document);
        let mut violations: Vec<Violation> = self
            .registry
            .analyzers()
            .iter()
            .filter(|analyzer| settings.is_rule_enabled(analyzer.rule_id()))
            .flat_map(|analyzer| analyzer.analyze(document, &settings))
            .collect();
        violations.sort_by(|a, b| {
            (a.span.start(), a.span.end(), &a.rule_id).cmp(&(b.span.start(), b.span.end(), &b.rule_id))
        });
        debug!(path = ?document.path(), violations = violations.len(), "Analyzed document");
        violations
    }

    /// Violations of a single rule, or none when it is unknown or disabled
    pub fn analyze_rule(&self, document: &SourceDocument, rule_id: &str) -> Vec<Violation> {
        let settings = self.fixer.settings().settings_for(document);
        match self.registry.get(rule_id) {
            Some(analyzer) if settings.is_rule_enabled(rule_id) => analyzer.analyze(document, &settings),
            _ => Vec::new(),
        }
    }

    /// Apply the fix-all batch of every enabled rule, in registration order
    pub fn fix(&self, document: &SourceDocument) -> Result<SourceDocument> {
        self.fixer.fix_document(document, self.registry.analyzers())
    }
}
