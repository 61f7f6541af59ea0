//! Localizable failure messages.
//!
//! Providers and the orchestrator never hard-code user-facing error text.
//! They look the message up by [`MessageKey`] in an [`ErrorMessages`] table
//! supplied by the caller, which falls back to the built-in English text for
//! any key it does not override.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Every user-facing failure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MessageKey {
    GoogleApiKeyMissing,
    MicrosoftApiKeyMissing,
    DeeplApiKeyMissing,
    BaiduConfigIncomplete,
    GoogleTranslateFailed,
    MicrosoftTranslateFailed,
    DeeplTranslateFailed,
    BaiduTranslateFailed,
    NoProvider,
    TranslationFailed,
}

impl MessageKey {
    pub const ALL: [MessageKey; 10] = [
        MessageKey::GoogleApiKeyMissing,
        MessageKey::MicrosoftApiKeyMissing,
        MessageKey::DeeplApiKeyMissing,
        MessageKey::BaiduConfigIncomplete,
        MessageKey::GoogleTranslateFailed,
        MessageKey::MicrosoftTranslateFailed,
        MessageKey::DeeplTranslateFailed,
        MessageKey::BaiduTranslateFailed,
        MessageKey::NoProvider,
        MessageKey::TranslationFailed,
    ];

    /// Built-in English text for this category.
    pub fn default_text(self) -> &'static str {
        match self {
            MessageKey::GoogleApiKeyMissing => "Google API Key not configured",
            MessageKey::MicrosoftApiKeyMissing => "Microsoft API Key not configured",
            MessageKey::DeeplApiKeyMissing => "DeepL API Key not configured",
            MessageKey::BaiduConfigIncomplete => "Baidu Translate API configuration incomplete",
            MessageKey::GoogleTranslateFailed => "Google Translate failed",
            MessageKey::MicrosoftTranslateFailed => "Microsoft Translator failed",
            MessageKey::DeeplTranslateFailed => "DeepL translation failed",
            MessageKey::BaiduTranslateFailed => "Baidu translation failed",
            MessageKey::NoProvider => "No translation service provider available",
            MessageKey::TranslationFailed => "Translation failed",
        }
    }
}

/// Caller-supplied overrides for failure messages.
///
/// Deserializes from a flat camelCase object, e.g.
/// `{"noProvider": "没有可用的翻译服务"}`. Keys that are absent fall back to
/// English.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ErrorMessages {
    overrides: HashMap<MessageKey, String>,
}

impl ErrorMessages {
    /// English only; no overrides.
    pub fn english() -> Self {
        Self::default()
    }

    /// Built-in Simplified Chinese table.
    pub fn simplified_chinese() -> Self {
        Self::default()
            .with(MessageKey::GoogleApiKeyMissing, "未配置 Google API 密钥")
            .with(MessageKey::MicrosoftApiKeyMissing, "未配置 Microsoft API 密钥")
            .with(MessageKey::DeeplApiKeyMissing, "未配置 DeepL API 密钥")
            .with(MessageKey::BaiduConfigIncomplete, "百度翻译 API 配置不完整")
            .with(MessageKey::GoogleTranslateFailed, "Google 翻译失败")
            .with(MessageKey::MicrosoftTranslateFailed, "Microsoft 翻译失败")
            .with(MessageKey::DeeplTranslateFailed, "DeepL 翻译失败")
            .with(MessageKey::BaiduTranslateFailed, "百度翻译失败")
            .with(MessageKey::NoProvider, "没有可用的翻译服务提供商")
            .with(MessageKey::TranslationFailed, "翻译失败")
    }

    /// Select a built-in table by UI locale tag. Unknown tags get English.
    pub fn for_locale(locale: &str) -> Self {
        match locale {
            "zh" | "zh-CN" | "zh_CN" => Self::simplified_chinese(),
            _ => Self::english(),
        }
    }

    /// Override one category.
    pub fn with(mut self, key: MessageKey, text: impl Into<String>) -> Self {
        self.overrides.insert(key, text.into());
        self
    }

    /// The caller's override for `key`, if any.
    pub fn lookup(&self, key: MessageKey) -> Option<&str> {
        self.overrides.get(&key).map(String::as_str)
    }

    /// Message for a category that has no underlying cause.
    pub fn text(&self, key: MessageKey) -> String {
        self.lookup(key)
            .unwrap_or_else(|| key.default_text())
            .to_string()
    }

    /// Message for a failure with a cause.
    ///
    /// An override replaces the whole message; the English default is
    /// suffixed with the cause.
    pub fn failure(&self, key: MessageKey, cause: impl std::fmt::Display) -> String {
        match self.lookup(key) {
            Some(text) => text.to_string(),
            None => format!("{}: {}", key.default_text(), cause),
        }
    }
}
