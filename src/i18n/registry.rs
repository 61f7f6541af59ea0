//! Language catalog: the fixed set of target languages a batch can request.
//!
//! The catalog is built once on first access with `OnceLock` and is immutable
//! afterwards. Which entries are "selected" is caller state, not catalog state.

use serde::Serialize;
use std::sync::OnceLock;

/// A target language offered to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LanguageEntry {
    /// ISO 639-1 code sent to the providers (e.g., "en", "zh")
    pub code: &'static str,

    /// English display name (e.g., "Japanese")
    pub name: &'static str,

    /// Name of the language in the language itself (e.g., "日本語")
    pub native_name: &'static str,

    /// Flag emoji shown next to the result card
    pub flag: &'static str,
}

/// Global language catalog singleton.
pub struct LanguageRegistry {
    languages: Vec<LanguageEntry>,
}

static REGISTRY: OnceLock<LanguageRegistry> = OnceLock::new();

impl LanguageRegistry {
    /// Get the global language catalog.
    pub fn get() -> &'static LanguageRegistry {
        REGISTRY.get_or_init(|| LanguageRegistry {
            languages: default_languages(),
        })
    }

    /// Look up a language by its exact code.
    ///
    /// # Returns
    /// * `Some(&LanguageEntry)` if the code is in the catalog
    /// * `None` otherwise (lookup is case-sensitive)
    pub fn get_by_code(&self, code: &str) -> Option<&LanguageEntry> {
        self.languages.iter().find(|lang| lang.code == code)
    }

    /// All catalog entries in display order.
    pub fn list_all(&self) -> &[LanguageEntry] {
        &self.languages
    }
}

fn entry(
    code: &'static str,
    name: &'static str,
    native_name: &'static str,
    flag: &'static str,
) -> LanguageEntry {
    LanguageEntry {
        code,
        name,
        native_name,
        flag,
    }
}

fn default_languages() -> Vec<LanguageEntry> {
    vec![
        entry("en", "English", "English", "🇺🇸"),
        entry("zh", "Chinese", "中文", "🇨🇳"),
        entry("ja", "Japanese", "日本語", "🇯🇵"),
        entry("ko", "Korean", "한국어", "🇰🇷"),
        entry("fr", "French", "Français", "🇫🇷"),
        entry("de", "German", "Deutsch", "🇩🇪"),
        entry("es", "Spanish", "Español", "🇪🇸"),
        entry("it", "Italian", "Italiano", "🇮🇹"),
        entry("ru", "Russian", "Русский", "🇷🇺"),
        entry("pt", "Portuguese", "Português", "🇵🇹"),
        entry("ar", "Arabic", "العربية", "🇸🇦"),
        entry("th", "Thai", "ไทย", "🇹🇭"),
        entry("vi", "Vietnamese", "Tiếng Việt", "🇻🇳"),
        entry("hi", "Hindi", "हिन्दी", "🇮🇳"),
    ]
}
