//! Persisted user settings and provider credentials.
//!
//! Stored as one pretty-printed JSON file with two top-level objects,
//! `app-settings` and `api-config`. Every field is optional on read so older
//! or hand-edited files still load.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Target languages selected on first run.
pub const DEFAULT_SELECTED_LANGUAGES: [&str; 4] = ["en", "ja", "ko", "fr"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppSettings {
    /// Language codes in display order
    pub selected_languages: Vec<String>,

    /// Translate automatically whenever new clipboard text arrives
    pub auto_translate_on_clipboard: bool,

    /// Name of the provider to select on startup; empty means "first configured"
    pub current_provider: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            selected_languages: DEFAULT_SELECTED_LANGUAGES
                .iter()
                .map(|code| code.to_string())
                .collect(),
            auto_translate_on_clipboard: true,
            current_provider: String::new(),
        }
    }
}

/// Partial update for [`AppSettings`]; `None` fields are left as they are.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsUpdate {
    pub selected_languages: Option<Vec<String>>,
    pub auto_translate_on_clipboard: Option<bool>,
    pub current_provider: Option<String>,
}

impl AppSettings {
    pub fn apply(&mut self, update: SettingsUpdate) {
        if let Some(languages) = update.selected_languages {
            self.selected_languages = languages;
        }
        if let Some(auto) = update.auto_translate_on_clipboard {
            self.auto_translate_on_clipboard = auto;
        }
        if let Some(provider) = update.current_provider {
            self.current_provider = provider;
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GoogleCredentials {
    pub api_key: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MicrosoftCredentials {
    pub api_key: String,
    pub region: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DeepLCredentials {
    pub api_key: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BaiduCredentials {
    pub app_id: String,
    pub secret_key: String,
}

/// Credentials for each back-end. A `None` section means "not set up".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub google: Option<GoogleCredentials>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub microsoft: Option<MicrosoftCredentials>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deepl: Option<DeepLCredentials>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub baidu: Option<BaiduCredentials>,
}

impl ApiConfig {
    /// Replace every section that `other` sets.
    pub fn merge(&mut self, other: ApiConfig) {
        if other.google.is_some() {
            self.google = other.google;
        }
        if other.microsoft.is_some() {
            self.microsoft = other.microsoft;
        }
        if other.deepl.is_some() {
            self.deepl = other.deepl;
        }
        if other.baidu.is_some() {
            self.baidu = other.baidu;
        }
    }
}

/// Everything written to the settings file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersistedState {
    #[serde(rename = "app-settings")]
    pub settings: AppSettings,
    #[serde(rename = "api-config")]
    pub api_config: ApiConfig,
}

/// JSON file backing a [`PersistedState`].
#[derive(Debug, Clone)]
pub struct SettingsFile {
    path: PathBuf,
}

impl SettingsFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the file, or return defaults if it does not exist yet.
    pub fn load(&self) -> Result<PersistedState> {
        if !self.path.exists() {
            debug!("Settings file {} not found, using defaults", self.path.display());
            return Ok(PersistedState::default());
        }

        let raw = std::fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read settings file {}", self.path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse settings file {}", self.path.display()))
    }

    pub fn save(&self, state: &PersistedState) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create settings directory {}", parent.display())
                })?;
            }
        }

        let json = serde_json::to_string_pretty(state).context("Failed to serialize settings")?;
        std::fs::write(&self.path, json)
            .with_context(|| format!("Failed to write settings file {}", self.path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = AppSettings::default();
        assert_eq!(settings.selected_languages, vec!["en", "ja", "ko", "fr"]);
        assert!(settings.auto_translate_on_clipboard);
        assert_eq!(settings.current_provider, "");
    }

    #[test]
    fn test_apply_partial_update() {
        let mut settings = AppSettings::default();
        settings.apply(SettingsUpdate {
            auto_translate_on_clipboard: Some(false),
            ..Default::default()
        });

        assert!(!settings.auto_translate_on_clipboard);
        assert_eq!(settings.selected_languages, vec!["en", "ja", "ko", "fr"]);
    }

    #[test]
    fn test_merge_replaces_only_given_sections() {
        let mut config = ApiConfig {
            google: Some(GoogleCredentials {
                api_key: "old-google".to_string(),
            }),
            deepl: Some(DeepLCredentials {
                api_key: "deepl".to_string(),
            }),
            ..Default::default()
        };

        config.merge(ApiConfig {
            google: Some(GoogleCredentials {
                api_key: "new-google".to_string(),
            }),
            ..Default::default()
        });

        assert_eq!(config.google.as_ref().map(|g| g.api_key.as_str()), Some("new-google"));
        assert_eq!(config.deepl.as_ref().map(|d| d.api_key.as_str()), Some("deepl"));
    }

    #[test]
    fn test_persisted_shape_uses_original_keys() {
        let state = PersistedState {
            settings: AppSettings::default(),
            api_config: ApiConfig {
                baidu: Some(BaiduCredentials {
                    app_id: "app".to_string(),
                    secret_key: "secret".to_string(),
                }),
                ..Default::default()
            },
        };

        let json = serde_json::to_value(&state).expect("Should serialize");
        assert_eq!(json["app-settings"]["selectedLanguages"][1], "ja");
        assert_eq!(json["app-settings"]["autoTranslateOnClipboard"], true);
        assert_eq!(json["api-config"]["baidu"]["appId"], "app");
        assert!(json["api-config"].get("google").is_none());
    }

    #[test]
    fn test_missing_fields_default() {
        let state: PersistedState = serde_json::from_str(
            r#"{"app-settings": {"currentProvider": "DeepL"}}"#,
        )
        .expect("Should deserialize");

        assert_eq!(state.settings.current_provider, "DeepL");
        assert_eq!(state.settings.selected_languages, vec!["en", "ja", "ko", "fr"]);
        assert_eq!(state.api_config, ApiConfig::default());
    }

    #[test]
    fn test_load_missing_file_returns_defaults() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let file = SettingsFile::new(temp_dir.path().join("settings.json"));

        let state = file.load().expect("Should load defaults");
        assert_eq!(state, PersistedState::default());
    }

    #[test]
    fn test_save_then_load() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let file = SettingsFile::new(temp_dir.path().join("nested").join("settings.json"));

        let mut state = PersistedState::default();
        state.settings.current_provider = "百度翻译".to_string();
        state.api_config.microsoft = Some(MicrosoftCredentials {
            api_key: "ms".to_string(),
            region: "westeurope".to_string(),
        });

        file.save(&state).expect("Should save");
        assert!(file.path().exists());

        let loaded = file.load().expect("Should load");
        assert_eq!(loaded, state);
    }

    #[test]
    fn test_load_invalid_json_fails_with_path() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("settings.json");
        std::fs::write(&path, "{ not json").expect("Failed to write file");

        let err = SettingsFile::new(&path).load().unwrap_err();
        assert!(format!("{:#}", err).contains("Failed to parse settings file"));
    }
}
