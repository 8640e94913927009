//! Kempt Core
//!
//! Structural fix-application engine for kempt style rules. Given
//! violations anchored to spans of a [`SourceDocument`], this crate locates
//! the token or trivia each one refers to, synthesizes a trivia-preserving
//! replacement, and commits one fix or a whole rule's batch as a new
//! document.

pub mod autofix;
pub mod diagnostics;
pub mod document;
pub mod error;
pub mod fixes;
pub mod indent;
pub mod resolver;
pub mod result;
pub mod rules;
pub mod runner;
pub mod settings;
pub mod syntax; // Concrete Syntax Tree (lossless, Rowan-based)
pub mod trivia;

// Re-export commonly used types
pub use autofix::{
    AutofixEngine, DefaultAutofixEngine, FixAllReport, FixOutcome, FixPreview, Replacement,
    TextEdit, TreeEdit,
};
pub use diagnostics::Violation;
pub use document::{LineEnding, SourceDocument};
pub use error::{ErrorKind, KemptError};
pub use fixes::{FixProvider, SynthesisDecline};
pub use indent::{DefaultIndentScopes, IndentScopes, IndentationSettings};
pub use resolver::{Anchor, resolve};
pub use result::Result;
pub use rules::{Analyzer, properties, rule_ids};
pub use runner::{DocumentOutcome, DocumentRunner, SkipReason};
pub use settings::{RuleToggle, SettingsFormat, SettingsProvider, StyleSettings};
pub use trivia::{Token, Trivia, TriviaKind, TriviaSide};

/// Initialize the tracing subscriber for logging
pub fn init_tracing() {
    use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("kempt=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_file(true)
                .with_line_number(true),
        )
        .init();
}

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
