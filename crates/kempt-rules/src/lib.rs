//! Kempt Rules
//!
//! Built-in analyzers for the kempt style rules, and a small engine that
//! runs them and feeds their violations to the fix engine of `kempt-core`.

pub mod builtin;
pub mod engine;

pub use builtin::BuiltinRules;
pub use engine::{RuleEngine, RuleRegistry};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
