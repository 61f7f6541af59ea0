use super::{first, read_json, CallFailure};
use crate::error::TranslationError;
use crate::i18n::{ErrorMessages, MessageKey};
use serde::{Deserialize, Serialize};

pub const MICROSOFT_TRANSLATE_URL: &str = "https://api.cognitive.microsofttranslator.com/translate";

/// Azure Translator (v3). Key and region travel in subscription headers.
#[derive(Debug, Clone)]
pub struct MicrosoftTranslator {
    api_key: String,
    region: String,
    endpoint: String,
}

#[derive(Debug, Serialize)]
struct MicrosoftRequestItem<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct MicrosoftResult {
    translations: Vec<MicrosoftTranslation>,
}

#[derive(Debug, Deserialize)]
struct MicrosoftTranslation {
    text: String,
}

impl MicrosoftTranslator {
    pub const NAME: &'static str = "Microsoft Translator";
    pub const DEFAULT_REGION: &'static str = "global";

    /// An empty `region` means the global resource.
    pub fn new(api_key: impl Into<String>, region: impl Into<String>) -> Self {
        let region = region.into();
        Self {
            api_key: api_key.into(),
            region: if region.is_empty() {
                Self::DEFAULT_REGION.to_string()
            } else {
                region
            },
            endpoint: MICROSOFT_TRANSLATE_URL.to_string(),
        }
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn region(&self) -> &str {
        &self.region
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
                messages.text(MessageKey::MicrosoftApiKeyMissing),
            ));
        }

        self.request(client, text, target)
            .await
            .map_err(|f| f.into_error(messages, MessageKey::MicrosoftTranslateFailed))
    }

    async fn request(
        &self,
        client: &reqwest::Client,
        text: &str,
        target: &str,
    ) -> Result<String, CallFailure> {
        let response = client
            .post(&self.endpoint)
            .query(&[("api-version", "3.0"), ("to", target)])
            .header("Ocp-Apim-Subscription-Key", &self.api_key)
            .header("Ocp-Apim-Subscription-Region", &self.region)
            .header("Content-Type", "application/json")
            .json(&[MicrosoftRequestItem { text }])
            .send()
            .await?;

        let body: Vec<MicrosoftResult> = read_json(response).await?;
        Ok(first(first(body)?.translations)?.text)
    }
}
