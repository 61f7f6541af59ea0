use super::{first, read_json, CallFailure};
use crate::error::TranslationError;
use crate::i18n::{ErrorMessages, MessageKey};
use serde::Deserialize;

pub const BAIDU_TRANSLATE_URL: &str = "https://fanyi-api.baidu.com/api/trans/vip/translate";

/// Baidu general translation API. Requests are signed with
/// `md5(appid + q + salt + secret)`.
#[derive(Debug, Clone)]
pub struct BaiduTranslate {
    app_id: String,
    secret_key: String,
    endpoint: String,
}

#[derive(Debug, Deserialize)]
struct BaiduResponse {
    #[serde(default)]
    error_code: Option<serde_json::Value>,
    #[serde(default)]
    error_msg: Option<String>,
    #[serde(default)]
    trans_result: Vec<BaiduTransResult>,
}

#[derive(Debug, Deserialize)]
struct BaiduTransResult {
    dst: String,
}

impl BaiduResponse {
    /// Baidu reports failures in-band, usually with HTTP 200.
    ///
    /// Any non-empty string code is a failure, `"0"` and `"52000"` included.
    /// Only a missing, empty or numeric zero code means success.
    fn error(&self) -> Option<String> {
        let code = match &self.error_code {
            None | Some(serde_json::Value::Null) => return None,
            Some(serde_json::Value::String(code)) if code.is_empty() => return None,
            Some(serde_json::Value::Number(code)) if code.as_u64() == Some(0) => return None,
            Some(serde_json::Value::String(code)) => code.clone(),
            Some(other) => other.to_string(),
        };

        Some(match &self.error_msg {
            Some(msg) => format!("Baidu Translate error: {}", msg),
            None => format!("Baidu Translate error: code {}", code),
        })
    }
}

impl BaiduTranslate {
    pub const NAME: &'static str = "百度翻译";

    pub fn new(app_id: impl Into<String>, secret_key: impl Into<String>) -> Self {
        Self {
            app_id: app_id.into(),
            secret_key: secret_key.into(),
            endpoint: BAIDU_TRANSLATE_URL.to_string(),
        }
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn is_configured(&self) -> bool {
        !self.app_id.is_empty() && !self.secret_key.is_empty()
    }

    /// Hex MD5 signature for one request.
    pub fn sign(&self, query: &str, salt: &str) -> String {
        let input = format!("{}{}{}{}", self.app_id, query, salt, self.secret_key);
        format!("{:x}", md5::compute(input.as_bytes()))
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
                messages.text(MessageKey::BaiduConfigIncomplete),
            ));
        }

        self.request(client, text, target)
            .await
            .map_err(|f| f.into_error(messages, MessageKey::BaiduTranslateFailed))
    }

    async fn request(
        &self,
        client: &reqwest::Client,
        text: &str,
        target: &str,
    ) -> Result<String, CallFailure> {
        let salt = chrono::Utc::now().timestamp_millis().to_string();
        let sign = self.sign(text, &salt);

        let response = client
            .get(&self.endpoint)
            .query(&[
                ("q", text),
                ("from", "auto"),
                ("to", target),
                ("appid", self.app_id.as_str()),
                ("salt", salt.as_str()),
                ("sign", sign.as_str()),
            ])
            .send()
            .await?;

        let body: BaiduResponse = read_json(response).await?;
        if let Some(error) = body.error() {
            return Err(CallFailure::Logic(error));
        }

        Ok(first(body.trans_result)?.dst)
    }
}
