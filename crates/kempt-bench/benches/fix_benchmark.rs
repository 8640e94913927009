//! Fix Engine Performance Benchmarks
//!
//! Measures parsing, analysis and fix-all batches on generated documents.
//!
//! Run with: `cargo bench --package kempt-bench fix_benchmark`

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use kempt_core::autofix::fix_all;
use kempt_core::{SourceDocument, StyleSettings, rule_ids};
use kempt_rules::{BuiltinRules, RuleEngine};
use std::hint::black_box;

const MESSY_CLASS: &str = r#"class Sample{i} {
  static public Int32 count;


  void Run(Int32 a ,
    String b
  ) { x = (a) ;;
      if (a)
        {
        b = ((a) + 1);
        }
  }
}
"#;

fn generate(classes: usize) -> String {
    (0..classes)
        .map(|i| MESSY_CLASS.replace("{i}", &i.to_string()))
        .collect()
}

/// Benchmark parsing documents of growing size
fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");

    for &size in &[10, 100, 500] {
        let content = generate(size);
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{}_classes_{}KB", size, content.len() / 1024)),
            &content,
            |b, content| b.iter(|| black_box(SourceDocument::new(content.as_str()))),
        );
    }

    group.finish();
}

/// Benchmark one fix-all batch per rule against the same document
fn bench_fix_all(c: &mut Criterion) {
    let mut group = c.benchmark_group("fix_all");
    let settings = StyleSettings::default();
    let document = SourceDocument::new(generate(100));

    for rule_id in [
        rule_ids::INDENTATION,
        rule_ids::REDUNDANT_PARENTHESES,
        rule_ids::BRACES_ON_OWN_LINE,
        rule_ids::NO_MULTIPLE_BLANK_LINES,
    ] {
        let Some(analyzer) = BuiltinRules::all().into_iter().find(|a| a.rule_id() == rule_id) else {
            continue;
        };
        let violations = analyzer.analyze(&document, &settings);
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{}_{}", rule_id.replace('/', "_"), violations.len())),
            &violations,
            |b, violations| {
                b.iter(|| black_box(fix_all(&document, violations, &settings).unwrap()));
            },
        );
    }

    group.finish();
}

/// Benchmark the whole rule set on documents of growing size
fn bench_fix_document(c: &mut Criterion) {
    let mut group = c.benchmark_group("fix_document");
    let engine = RuleEngine::with_builtin_rules();

    for &size in &[10, 100] {
        let document = SourceDocument::new(generate(size));
        group.bench_with_input(BenchmarkId::from_parameter(size), &document, |b, document| {
            b.iter(|| black_box(engine.fix(document).unwrap()));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_parse, bench_fix_all, bench_fix_document);
criterion_main!(benches);
