//! Settings file loading

use std::fs;
use std::path::Path;

use super::StyleSettings;
use crate::error::KemptError;
use crate::result::Result;

/// Settings file syntax
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsFormat {
    Json,
    /// JSON with comments and trailing commas
    Jsonc,
    Toml,
}

impl SettingsFormat {
    /// Format implied by a file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Some(Self::Json),
            Some("jsonc") | Some("json5") => Some(Self::Jsonc),
            Some("toml") => Some(Self::Toml),
            _ => None,
        }
    }
}

impl StyleSettings {
    /// Parse settings text
    pub fn parse(content: &str, format: SettingsFormat) -> Result<Self> {
        let parsed = match format {
            SettingsFormat::Json => serde_json::from_str(content).map_err(|e| e.to_string()),
            // Use json5 for JSONC support (comments + trailing commas)
            SettingsFormat::Jsonc => json5::from_str(content).map_err(|e| e.to_string()),
            SettingsFormat::Toml => toml::from_str(content).map_err(|e| e.to_string()),
        };
        parsed.map_err(|message| KemptError::config_error(format!("Invalid {format:?} settings: {message}")))
    }

    /// Load settings from a file, choosing the format by extension
    pub fn load(path: &Path) -> Result<Self> {
        let format = SettingsFormat::from_path(path).ok_or_else(|| {
            KemptError::config_error(format!(
                "Unsupported settings file '{}' (expected .json, .jsonc or .toml)",
                path.display()
            ))
        })?;
        let content = fs::read_to_string(path).map_err(|e| KemptError::io_error(path, e))?;

        let settings = Self::parse(&content, format).map_err(|e| {
            KemptError::config_error(format!("Failed to load settings from '{}': {}", path.display(), e))
        })?;
        tracing::info!("Loaded settings from: {}", path.display());
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::RuleToggle;
    use tempfile::TempDir;

    fn create_temp_settings(dir: &Path, filename: &str, content: &str) -> std::path::PathBuf {
        let path = dir.join(filename);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_load_json() {
        let temp_dir = TempDir::new().unwrap();
        let path = create_temp_settings(
            temp_dir.path(),
            "kempt.json",
            r#"{
                "indentation": { "useTabs": true },
                "rules": { "spacing/no-multiple-whitespace": "off" }
            }"#,
        );

        let settings = StyleSettings::load(&path).unwrap();
        assert!(settings.indentation.use_tabs);
        assert_eq!(settings.indentation.indentation_size, 4);
        assert_eq!(
            settings.rules.get("spacing/no-multiple-whitespace"),
            Some(&RuleToggle::Off)
        );
    }

    #[test]
    fn test_load_jsonc_with_comments() {
        let temp_dir = TempDir::new().unwrap();
        let path = create_temp_settings(
            temp_dir.path(),
            "kempt.jsonc",
            r#"{
                // two-space projects
                "indentation": { "indentationSize": 2, },
            }"#,
        );

        let settings = StyleSettings::load(&path).unwrap();
        assert_eq!(settings.indentation.indentation_size, 2);
    }

    #[test]
    fn test_load_toml() {
        let temp_dir = TempDir::new().unwrap();
        let path = create_temp_settings(
            temp_dir.path(),
            "kempt.toml",
            r#"
[layout]
maxConsecutiveBlankLines = 2

[[overrides]]
include = ["tests/**"]
indentation = { indentationSize = 2 }
"#,
        );

        let settings = StyleSettings::load(&path).unwrap();
        assert_eq!(settings.layout.max_consecutive_blank_lines, 2);
        assert_eq!(settings.overrides.len(), 1);
        assert_eq!(settings.overrides[0].include, vec!["tests/**".to_string()]);
    }

    #[test]
    fn test_load_errors() {
        let temp_dir = TempDir::new().unwrap();

        let missing = temp_dir.path().join("missing.json");
        let err = StyleSettings::load(&missing).unwrap_err();
        assert!(matches!(err, KemptError::Io { .. }));

        let unsupported = create_temp_settings(temp_dir.path(), "kempt.yaml", "a: 1");
        assert!(matches!(
            StyleSettings::load(&unsupported).unwrap_err(),
            KemptError::Config { .. }
        ));

        let invalid = create_temp_settings(temp_dir.path(), "bad.json", "{ not json");
        assert!(matches!(
            StyleSettings::load(&invalid).unwrap_err(),
            KemptError::Config { .. }
        ));
    }
}
