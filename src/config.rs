use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// User settings, read from `~/.config/namestyle/config.json` unless a path is given.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Directory that saved identifiers are written into (defaults to the working directory)
    #[serde(default)]
    pub workspace_root: Option<PathBuf>,
    /// Extension appended to the name entered at the save prompt
    #[serde(default = "default_extension")]
    pub output_extension: String,
    /// Keywords that introduce a declaration when analyzing a document
    #[serde(default = "default_keywords")]
    pub declaration_keywords: Vec<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            workspace_root: None,
            output_extension: default_extension(),
            declaration_keywords: default_keywords(),
        }
    }
}

fn default_extension() -> String {
    "js".into()
}

fn default_keywords() -> Vec<String> {
    vec!["function".into(), "class".into()]
}

impl Settings {
    /// Load settings from an explicit file, or from the default location.
    /// A missing default file yields defaults; a missing explicit file is an error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load_file(path),
            None => match default_config_path() {
                Some(path) if path.exists() => Self::load_file(&path),
                _ => {
                    tracing::debug!("No config file found, using defaults");
                    Ok(Self::default())
                }
            },
        }
    }

    pub fn load_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;
        let settings: Settings = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config JSON in {}", path.display()))?;
        settings.validate()?;
        tracing::debug!("Loaded config from {}", path.display());
        Ok(settings)
    }

    fn validate(&self) -> Result<()> {
        if self.output_extension.is_empty() {
            anyhow::bail!("output_extension must not be empty");
        }
        if self.output_extension.starts_with('.') {
            anyhow::bail!(
                "output_extension '{}' must not start with a dot",
                self.output_extension
            );
        }
        if self.declaration_keywords.is_empty() {
            anyhow::bail!("declaration_keywords must list at least one keyword");
        }
        for kw in &self.declaration_keywords {
            if kw.is_empty() || !kw.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
                anyhow::bail!("Declaration keyword '{}' must be a single word", kw);
            }
        }
        Ok(())
    }

    /// Directory used for saved files.
    pub fn workspace_dir(&self) -> PathBuf {
        self.workspace_root
            .clone()
            .unwrap_or_else(|| PathBuf::from("."))
    }
}

/// Returns the default config path: `<config_dir>/namestyle/config.json`
fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("namestyle").join("config.json"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env::temp_dir;

    fn temp_config(content: &str) -> PathBuf {
        use std::sync::atomic::{AtomicU64, Ordering};
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        let id = COUNTER.fetch_add(1, Ordering::SeqCst);
        let path = temp_dir().join(format!("namestyle_config_{}_{}.json", std::process::id(), id));
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.output_extension, "js");
        assert_eq!(settings.declaration_keywords, vec!["function", "class"]);
        assert_eq!(settings.workspace_dir(), PathBuf::from("."));
    }

    #[test]
    fn test_load_partial_file_fills_defaults() {
        let path = temp_config(r#"{ "output_extension": "rs" }"#);
        let settings = Settings::load(Some(&path)).unwrap();
        assert_eq!(settings.output_extension, "rs");
        assert_eq!(settings.declaration_keywords.len(), 2);
    }

    #[test]
    fn test_load_missing_explicit_file_fails() {
        let path = temp_dir().join("namestyle_definitely_missing.json");
        assert!(Settings::load(Some(&path)).is_err());
    }

    #[test]
    fn test_reject_dotted_extension() {
        let path = temp_config(r#"{ "output_extension": ".js" }"#);
        let err = Settings::load(Some(&path)).unwrap_err();
        assert!(err.to_string().contains("dot"));
    }

    #[test]
    fn test_reject_bad_keywords() {
        let path = temp_config(r#"{ "declaration_keywords": [] }"#);
        assert!(Settings::load(Some(&path)).is_err());

        let path = temp_config(r#"{ "declaration_keywords": ["pub fn"] }"#);
        assert!(Settings::load(Some(&path)).is_err());
    }

    #[test]
    fn test_reject_invalid_json() {
        let path = temp_config("{ not json");
        assert!(Settings::load(Some(&path)).is_err());
    }
}
