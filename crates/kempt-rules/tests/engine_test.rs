//! Tests for the rule engine: analysis of every rule, then fixing a whole
//! document rule by rule

use kempt_core::{
    AutofixEngine, IndentationSettings, RuleToggle, SourceDocument, StyleSettings, rule_ids,
};
use kempt_rules::{BuiltinRules, RuleEngine};

const MESSY: &str = "class Sample {\n    static public Int32 count;\n\n    void Run() { x = (a) ;;\n    }\n}\n";

#[test]
fn test_fix_applies_every_rule_in_order() {
    let engine = RuleEngine::with_builtin_rules();
    let fixed = engine.fix(&SourceDocument::new(MESSY)).unwrap();
    insta::assert_snapshot!(fixed.text(), @r"
    class Sample
    {
        public static int count;

        void Run()
        {
            x = a;
        }
    }
    ");
    assert!(engine.analyze(&fixed).is_empty());
}

#[test]
fn test_analyze_reports_each_rule() {
    let engine = RuleEngine::with_builtin_rules();
    let violations = engine.analyze(&SourceDocument::new(MESSY));
    let mut rules: Vec<&str> = violations.iter().map(|v| v.rule_id.as_str()).collect();
    rules.sort();
    rules.dedup();
    assert_eq!(
        rules,
        vec![
            rule_ids::BRACES_ON_OWN_LINE,
            rule_ids::REDUNDANT_PARENTHESES,
            rule_ids::MODIFIER_ORDER,
            rule_ids::NO_EMPTY_STATEMENT,
            rule_ids::USE_BUILTIN_TYPE_ALIAS,
            rule_ids::SEMICOLON_SPACING,
        ]
    );
}

#[test]
fn test_settings_drive_analysis_and_fixes() {
    let settings = StyleSettings::default()
        .with_indentation(IndentationSettings::tabs())
        .with_rule(rule_ids::USE_BUILTIN_TYPE_ALIAS, RuleToggle::Off);
    let engine = RuleEngine::new(BuiltinRules::registry(), settings);
    let fixed = engine
        .fix(&SourceDocument::new("class C\n{\n    Int32 x;\n}\n"))
        .unwrap();
    assert_eq!(fixed.text(), "class C\n{\n\tInt32 x;\n}\n");
}

#[test]
fn test_compute_fix_for_a_reported_violation() {
    let engine = RuleEngine::with_builtin_rules();
    let document = SourceDocument::new("y = (a);\n");
    let violation = engine
        .analyze_rule(&document, rule_ids::REDUNDANT_PARENTHESES)
        .pop()
        .unwrap();
    let fixed = engine.fixer().compute_fix(&document, &violation).unwrap();
    assert_eq!(fixed.text(), "y = a;\n");
    assert_eq!(document.text(), "y = (a);\n");
}

#[test]
fn test_compute_fix_all_per_rule() {
    let engine = RuleEngine::with_builtin_rules();
    let document = SourceDocument::new("a()  ;\nb() ;\n");
    let violations = engine.analyze_rule(&document, rule_ids::SEMICOLON_SPACING);
    let fixed = engine.fixer().compute_fix_all(&document, &violations).unwrap();
    assert_eq!(fixed.text(), "a();\nb();\n");
}
