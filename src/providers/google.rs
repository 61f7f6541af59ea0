use super::{first, read_json, CallFailure};
use crate::error::TranslationError;
use crate::i18n::{ErrorMessages, MessageKey};
use serde::{Deserialize, Serialize};

pub const GOOGLE_TRANSLATE_URL: &str = "https://translation.googleapis.com/language/translate/v2";

/// Google Cloud Translation (v2). API key travels as the `key` query param.
#[derive(Debug, Clone)]
pub struct GoogleTranslate {
    api_key: String,
    endpoint: String,
}

#[derive(Debug, Serialize)]
struct GoogleRequest<'a> {
    q: &'a str,
    target: &'a str,
    format: &'static str,
}

#[derive(Debug, Deserialize)]
struct GoogleResponse {
    data: GoogleData,
}

#[derive(Debug, Deserialize)]
struct GoogleData {
    translations: Vec<GoogleTranslation>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GoogleTranslation {
    translated_text: String,
}

impl GoogleTranslate {
    pub const NAME: &'static str = "Google Translate";

    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            endpoint: GOOGLE_TRANSLATE_URL.to_string(),
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
                messages.text(MessageKey::GoogleApiKeyMissing),
            ));
        }

        self.request(client, text, target)
            .await
            .map_err(|f| f.into_error(messages, MessageKey::GoogleTranslateFailed))
    }

    async fn request(
        &self,
        client: &reqwest::Client,
        text: &str,
        target: &str,
    ) -> Result<String, CallFailure> {
        let response = client
            .post(&self.endpoint)
            .query(&[("key", self.api_key.as_str())])
            .json(&GoogleRequest {
                q: text,
                target,
                format: "text",
            })
            .send()
            .await?;

        let body: GoogleResponse = read_json(response).await?;
        Ok(first(body.data.translations)?.translated_text)
    }
}
