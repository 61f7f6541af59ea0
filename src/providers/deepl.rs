use super::{first, read_json, CallFailure};
use crate::error::TranslationError;
use crate::i18n::{ErrorMessages, MessageKey};
use serde::Deserialize;

pub const DEEPL_TRANSLATE_URL: &str = "https://api-free.deepl.com/v2/translate";

/// DeepL (free API). Key travels as the `auth_key` form field.
#[derive(Debug, Clone)]
pub struct DeepLTranslate {
    api_key: String,
    endpoint: String,
}

#[derive(Debug, Deserialize)]
struct DeepLResponse {
    translations: Vec<DeepLTranslation>,
}

#[derive(Debug, Deserialize)]
struct DeepLTranslation {
    text: String,
}

impl DeepLTranslate {
    pub const NAME: &'static str = "DeepL";

    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            endpoint: DEEPL_TRANSLATE_URL.to_string(),
        }
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn is_configured(&self) -> bool {
        !self.api_key.is_empty()
    }

    pub async fn translate(
        &self,
        client: &reqwest::Client,
        text: &str,
        target: &str,
        messages: &ErrorMessages,
    ) -> Result<String, TranslationError> {
        if !self.is_configured() {
            return Err(TranslationError::Configuration(
                messages.text(MessageKey::DeeplApiKeyMissing),
            ));
        }

        self.request(client, text, target)
            .await
            .map_err(|f| f.into_error(messages, MessageKey::DeeplTranslateFailed))
    }

    async fn request(
        &self,
        client: &reqwest::Client,
        text: &str,
        target: &str,
    ) -> Result<String, CallFailure> {
        // DeepL only accepts upper-case language codes
        let target_lang = target.to_uppercase();

        let response = client
            .post(&self.endpoint)
            .form(&[
                ("auth_key", self.api_key.as_str()),
                ("text", text),
                ("target_lang", target_lang.as_str()),
            ])
            .send()
            .await?;

        let body: DeepLResponse = read_json(response).await?;
        Ok(first(body.translations)?.text)
    }
}
