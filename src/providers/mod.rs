//! Translation back-ends.
//!
//! The set of back-ends is closed, so they are modelled as the [`Provider`]
//! enum rather than trait objects. Each variant lives in its own module and
//! issues exactly one HTTP request per `translate` call.

mod baidu;
mod deepl;
mod google;
mod microsoft;

pub use baidu::{BaiduTranslate, BAIDU_TRANSLATE_URL};
pub use deepl::{DeepLTranslate, DEEPL_TRANSLATE_URL};
pub use google::{GoogleTranslate, GOOGLE_TRANSLATE_URL};
pub use microsoft::{MicrosoftTranslator, MICROSOFT_TRANSLATE_URL};

use crate::error::TranslationError;
use crate::i18n::{ErrorMessages, MessageKey};
use serde::de::DeserializeOwned;

/// A configured translation back-end.
#[derive(Debug, Clone)]
pub enum Provider {
    Google(GoogleTranslate),
    Microsoft(MicrosoftTranslator),
    DeepL(DeepLTranslate),
    Baidu(BaiduTranslate),
}

impl Provider {
    /// Display name, also used as the lookup key for `set_provider`.
    pub fn name(&self) -> &'static str {
        match self {
            Provider::Google(_) => GoogleTranslate::NAME,
            Provider::Microsoft(_) => MicrosoftTranslator::NAME,
            Provider::DeepL(_) => DeepLTranslate::NAME,
            Provider::Baidu(_) => BaiduTranslate::NAME,
        }
    }

    /// True iff every credential this back-end needs is non-empty.
    pub fn is_configured(&self) -> bool {
        match self {
            Provider::Google(p) => p.is_configured(),
            Provider::Microsoft(p) => p.is_configured(),
            Provider::DeepL(p) => p.is_configured(),
            Provider::Baidu(p) => p.is_configured(),
        }
    }

    /// Translate `text` into `target` (a catalog language code).
    pub async fn translate(
        &self,
        client: &reqwest::Client,
        text: &str,
        target: &str,
        messages: &ErrorMessages,
    ) -> Result<String, TranslationError> {
        match self {
            Provider::Google(p) => p.translate(client, text, target, messages).await,
            Provider::Microsoft(p) => p.translate(client, text, target, messages).await,
            Provider::DeepL(p) => p.translate(client, text, target, messages).await,
            Provider::Baidu(p) => p.translate(client, text, target, messages).await,
        }
    }
}

impl From<GoogleTranslate> for Provider {
    fn from(p: GoogleTranslate) -> Self {
        Provider::Google(p)
    }
}

impl From<MicrosoftTranslator> for Provider {
    fn from(p: MicrosoftTranslator) -> Self {
        Provider::Microsoft(p)
    }
}

impl From<DeepLTranslate> for Provider {
    fn from(p: DeepLTranslate) -> Self {
        Provider::DeepL(p)
    }
}

impl From<BaiduTranslate> for Provider {
    fn from(p: BaiduTranslate) -> Self {
        Provider::Baidu(p)
    }
}

/// Why a single provider request failed, before it is turned into a
/// user-facing message.
#[derive(Debug)]
pub(crate) enum CallFailure {
    Transport(String),
    Logic(String),
}

impl CallFailure {
    /// Wrap into the provider's failure category.
    ///
    /// Logic failures get the same message treatment as transport failures.
    pub(crate) fn into_error(self, messages: &ErrorMessages, key: MessageKey) -> TranslationError {
        match self {
            CallFailure::Transport(cause) => {
                TranslationError::Transport(messages.failure(key, cause))
            }
            CallFailure::Logic(cause) => {
                TranslationError::ProviderLogic(messages.failure(key, cause))
            }
        }
    }
}

impl From<reqwest::Error> for CallFailure {
    fn from(e: reqwest::Error) -> Self {
        CallFailure::Transport(e.to_string())
    }
}

/// Reject non-2xx responses, then decode the JSON body.
pub(crate) async fn read_json<T: DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, CallFailure> {
    let status = response.status();
    if !status.is_success() {
        let body = response
            .text()
            .await
            .unwrap_or_else(|e| format!("<failed to read body: {}>", e));
        return Err(CallFailure::Transport(format!("HTTP {}: {}", status, body)));
    }

    response
        .json::<T>()
        .await
        .map_err(|e| CallFailure::Transport(format!("failed to decode response: {}", e)))
}

/// First element of a result array, or a decoding failure.
pub(crate) fn first<T>(items: Vec<T>) -> Result<T, CallFailure> {
    items
        .into_iter()
        .next()
        .ok_or_else(|| CallFailure::Transport("response contained no translations".to_string()))
}
