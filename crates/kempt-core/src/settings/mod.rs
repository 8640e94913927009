//! Style settings
//!
//! Settings are read once and resolved per document: every override whose
//! `include` globs match the document path is applied on top of the base
//! settings, in declaration order.
//!
//! ## Example (kempt.json)
//!
//! ```json
//! {
//!   "indentation": { "useTabs": false, "indentationSize": 4 },
//!   "layout": { "maxConsecutiveBlankLines": 1 },
//!   "rules": { "ordering/modifier-order": "off" },
//!   "overrides": [
//!     { "include": ["generated/**"], "indentation": { "indentationSize": 2 } }
//!   ]
//! }
//! ```

mod loader;

pub use loader::SettingsFormat;

use std::collections::BTreeMap;
use std::path::Path;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::document::SourceDocument;
pub use crate::indent::IndentationSettings;

/// Complete style configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct StyleSettings {
    /// JSON Schema reference for IDE support
    #[serde(rename = "$schema", skip_serializing_if = "Option::is_none")]
    #[schemars(skip)]
    pub schema: Option<String>,

    #[schemars(description = "Indentation style")]
    pub indentation: IndentationSettings,

    #[schemars(description = "Blank line limits")]
    pub layout: LayoutSettings,

    #[schemars(description = "Enable or disable rules by id")]
    pub rules: BTreeMap<String, RuleToggle>,

    #[schemars(description = "Settings applied to files matching glob patterns")]
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub overrides: Vec<SettingsOverride>,
}

/// Layout thresholds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct LayoutSettings {
    #[schemars(description = "Longest run of blank lines that is allowed")]
    pub max_consecutive_blank_lines: usize,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            max_consecutive_blank_lines: 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum RuleToggle {
    Off,
    On,
}

/// Partial settings for files matching `include`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct SettingsOverride {
    #[schemars(description = "Glob patterns selecting the files this override applies to")]
    pub include: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub indentation: Option<PartialIndentationSettings>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layout: Option<PartialLayoutSettings>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct PartialIndentationSettings {
    pub use_tabs: Option<bool>,
    pub indentation_size: Option<usize>,
    pub tab_size: Option<usize>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct PartialLayoutSettings {
    pub max_consecutive_blank_lines: Option<usize>,
}

impl SettingsOverride {
    /// Any include pattern matches `path`
    pub fn matches(&self, path: &Path) -> bool {
        self.include.iter().any(|include| match glob::Pattern::new(include) {
            Ok(pattern) => pattern.matches_path(path),
            Err(err) => {
                tracing::warn!("Ignoring invalid override pattern '{}': {}", include, err);
                false
            }
        })
    }

    fn apply_to(&self, settings: &mut StyleSettings) {
        if let Some(indentation) = &self.indentation {
            let target = &mut settings.indentation;
            target.use_tabs = indentation.use_tabs.unwrap_or(target.use_tabs);
            target.indentation_size = indentation.indentation_size.unwrap_or(target.indentation_size);
            target.tab_size = indentation.tab_size.unwrap_or(target.tab_size);
        }
        if let Some(layout) = &self.layout {
            let target = &mut settings.layout;
            target.max_consecutive_blank_lines = layout
                .max_consecutive_blank_lines
                .unwrap_or(target.max_consecutive_blank_lines);
        }
    }
}

impl StyleSettings {
    /// Rules are enabled unless switched off
    pub fn is_rule_enabled(&self, rule_id: &str) -> bool {
        self.rules.get(rule_id) != Some(&RuleToggle::Off)
    }

    pub fn with_rule(mut self, rule_id: impl Into<String>, toggle: RuleToggle) -> Self {
        self.rules.insert(rule_id.into(), toggle);
        self
    }

    pub fn with_indentation(mut self, indentation: IndentationSettings) -> Self {
        self.indentation = indentation;
        self
    }

    /// Settings in effect for a file, with matching overrides applied
    pub fn for_path(&self, path: Option<&Path>) -> StyleSettings {
        let mut resolved = StyleSettings {
            overrides: Vec::new(),
            ..self.clone()
        };
        if let Some(path) = path {
            for settings_override in self.overrides.iter().filter(|o| o.matches(path)) {
                settings_override.apply_to(&mut resolved);
            }
        }
        resolved
    }

    /// JSON schema of the settings file
    pub fn json_schema() -> serde_json::Value {
        schemars::schema_for!(StyleSettings).to_value()
    }
}

/// Supplies the settings in effect for a document
pub trait SettingsProvider: Send + Sync {
    fn settings_for(&self, document: &SourceDocument) -> StyleSettings;
}

impl SettingsProvider for StyleSettings {
    fn settings_for(&self, document: &SourceDocument) -> StyleSettings {
        self.for_path(document.path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings_with_override() -> StyleSettings {
        StyleSettings {
            overrides: vec![SettingsOverride {
                include: vec!["generated/**/*.kt".to_string()],
                indentation: Some(PartialIndentationSettings {
                    use_tabs: Some(true),
                    ..Default::default()
                }),
                layout: Some(PartialLayoutSettings {
                    max_consecutive_blank_lines: Some(3),
                }),
            }],
            ..Default::default()
        }
    }

    #[test]
    fn test_defaults() {
        let settings = StyleSettings::default();
        assert_eq!(settings.indentation, IndentationSettings::default());
        assert_eq!(settings.layout.max_consecutive_blank_lines, 1);
        assert!(settings.is_rule_enabled("layout/indentation"));
    }

    #[test]
    fn test_rule_toggle() {
        let settings = StyleSettings::default().with_rule("ordering/modifier-order", RuleToggle::Off);
        assert!(!settings.is_rule_enabled("ordering/modifier-order"));
        assert!(settings.is_rule_enabled("layout/indentation"));
    }

    #[test]
    fn test_override_applies_to_matching_documents_only() {
        let settings = settings_with_override();

        let generated = SourceDocument::new("a;\n").with_path("generated/api/client.kt");
        let resolved = settings.settings_for(&generated);
        assert!(resolved.indentation.use_tabs);
        assert_eq!(resolved.indentation.indentation_size, 4);
        assert_eq!(resolved.layout.max_consecutive_blank_lines, 3);
        assert!(resolved.overrides.is_empty());

        let handwritten = SourceDocument::new("a;\n").with_path("src/main.kt");
        assert!(!settings.settings_for(&handwritten).indentation.use_tabs);

        let unnamed = SourceDocument::new("a;\n");
        assert!(!settings.settings_for(&unnamed).indentation.use_tabs);
    }

    #[test]
    fn test_json_schema_lists_sections() {
        let schema = StyleSettings::json_schema();
        let properties = schema["properties"].as_object().unwrap();
        assert!(properties.contains_key("indentation"));
        assert!(properties.contains_key("layout"));
        assert!(properties.contains_key("rules"));
        assert!(properties.contains_key("overrides"));
    }
}
