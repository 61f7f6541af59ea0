use crate::providers::{
    BAIDU_TRANSLATE_URL, DEEPL_TRANSLATE_URL, GOOGLE_TRANSLATE_URL, MICROSOFT_TRANSLATE_URL,
};
use crate::settings::ApiConfig;

/// Where each back-end is reached. Overridable for staging or mock servers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub google: String,
    pub microsoft: String,
    pub deepl: String,
    pub baidu: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            google: GOOGLE_TRANSLATE_URL.to_string(),
            microsoft: MICROSOFT_TRANSLATE_URL.to_string(),
            deepl: DEEPL_TRANSLATE_URL.to_string(),
            baidu: BAIDU_TRANSLATE_URL.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    // Persistence
    pub settings_path: String,

    // Credentials from the environment; override the persisted ones
    pub credentials: CredentialOverrides,

    // Startup overrides for persisted settings
    pub target_languages: Option<Vec<String>>,
    pub provider: Option<String>,

    // Built-in message table ("en" or "zh-CN")
    pub ui_locale: String,

    pub endpoints: Endpoints,
}

impl Config {
    /// Build configuration from environment variables. Nothing is required.
    pub fn from_env() -> Self {
        let defaults = Endpoints::default();

        Self {
            settings_path: std::env::var("CLIP_TRANSLATE_SETTINGS")
                .unwrap_or_else(|_| "data/settings.json".to_string()),

            credentials: CredentialOverrides::from_env(),

            target_languages: non_empty_var("TARGET_LANGUAGES").map(|v| parse_language_list(&v)),
            provider: non_empty_var("TRANSLATION_PROVIDER"),

            ui_locale: std::env::var("UI_LOCALE").unwrap_or_else(|_| "en".to_string()),

            endpoints: Endpoints {
                google: non_empty_var("GOOGLE_TRANSLATE_URL").unwrap_or(defaults.google),
                microsoft: non_empty_var("MICROSOFT_TRANSLATE_URL").unwrap_or(defaults.microsoft),
                deepl: non_empty_var("DEEPL_TRANSLATE_URL").unwrap_or(defaults.deepl),
                baidu: non_empty_var("BAIDU_TRANSLATE_URL").unwrap_or(defaults.baidu),
            },
        }
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Credential fields set in the environment. Each one replaces only the
/// matching field of the persisted [`ApiConfig`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CredentialOverrides {
    pub google_api_key: Option<String>,
    pub microsoft_api_key: Option<String>,
    pub microsoft_region: Option<String>,
    pub deepl_api_key: Option<String>,
    pub baidu_app_id: Option<String>,
    pub baidu_secret_key: Option<String>,
}

impl CredentialOverrides {
    pub fn from_env() -> Self {
        Self {
            google_api_key: non_empty_var("GOOGLE_API_KEY"),
            microsoft_api_key: non_empty_var("MICROSOFT_API_KEY"),
            microsoft_region: non_empty_var("MICROSOFT_REGION"),
            deepl_api_key: non_empty_var("DEEPL_API_KEY"),
            baidu_app_id: non_empty_var("BAIDU_APP_ID"),
            baidu_secret_key: non_empty_var("BAIDU_SECRET_KEY"),
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Overwrite the fields that are set, creating a section when needed.
    pub fn apply_to(&self, api_config: &mut ApiConfig) {
        if let Some(key) = &self.google_api_key {
            api_config.google.get_or_insert_with(Default::default).api_key = key.clone();
        }

        if self.microsoft_api_key.is_some() || self.microsoft_region.is_some() {
            let microsoft = api_config.microsoft.get_or_insert_with(Default::default);
            if let Some(key) = &self.microsoft_api_key {
                microsoft.api_key = key.clone();
            }
            if let Some(region) = &self.microsoft_region {
                microsoft.region = region.clone();
            }
        }

        if let Some(key) = &self.deepl_api_key {
            api_config.deepl.get_or_insert_with(Default::default).api_key = key.clone();
        }

        if self.baidu_app_id.is_some() || self.baidu_secret_key.is_some() {
            let baidu = api_config.baidu.get_or_insert_with(Default::default);
            if let Some(app_id) = &self.baidu_app_id {
                baidu.app_id = app_id.clone();
            }
            if let Some(secret) = &self.baidu_secret_key {
                baidu.secret_key = secret.clone();
            }
        }
    }
}

/// Parse a comma-separated list like `"en, ja,fr"`.
pub fn parse_language_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|code| !code.is_empty())
        .map(str::to_string)
        .collect()
}
