//! Violations reported by style rules

use std::collections::BTreeMap;

use rowan::TextRange;
use serde::{Deserialize, Serialize};

/// A style violation anchored to a span of one document version
///
/// Properties carry hints computed by the rule, such as the expected
/// indentation text, so that fix synthesis does not need to derive them
/// again.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Violation {
    pub rule_id: String,
    pub span: TextRange,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub properties: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub message: String,
}

impl Violation {
    pub fn new(rule_id: impl Into<String>, span: TextRange) -> Self {
        Self {
            rule_id: rule_id.into(),
            span,
            properties: BTreeMap::new(),
            message: String::new(),
        }
    }

    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn property(&self, key: &str) -> Option<&str> {
        self.properties.get(key).map(String::as_str)
    }
}
