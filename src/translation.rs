use crate::error::TranslationError;
use crate::i18n::{ErrorMessages, LanguageEntry, LanguageRegistry, MessageKey};
use crate::providers::Provider;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Outcome of translating one batch text into one language.
///
/// Exactly one of `text` / `error` is meaningful: a failed language has an
/// empty `text` and `Some(error)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslationResult {
    pub language: String,
    pub language_name: String,
    pub flag: String,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl TranslationResult {
    pub fn success(lang: &LanguageEntry, text: String) -> Self {
        Self {
            language: lang.code.to_string(),
            language_name: lang.name.to_string(),
            flag: lang.flag.to_string(),
            text,
            error: None,
        }
    }

    pub fn failure(lang: &LanguageEntry, error: String) -> Self {
        Self {
            language: lang.code.to_string(),
            language_name: lang.name.to_string(),
            flag: lang.flag.to_string(),
            text: String::new(),
            error: Some(error),
        }
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

/// Registry of providers plus the single active one.
///
/// Providers are kept in registration order. The selection is an index into
/// that list and only ever points at a provider that reported itself
/// configured when it was selected.
pub struct TranslationService {
    client: reqwest::Client,
    providers: Vec<Provider>,
    selected: Option<usize>,
}

impl Default for TranslationService {
    fn default() -> Self {
        Self::new()
    }
}

impl TranslationService {
    pub fn new() -> Self {
        Self::with_client(reqwest::Client::new())
    }

    /// Use a caller-built HTTP client (timeouts, proxy, user agent).
    pub fn with_client(client: reqwest::Client) -> Self {
        Self {
            client,
            providers: Vec::new(),
            selected: None,
        }
    }

    /// Register a provider. The first configured provider added while nothing
    /// is selected becomes the selection.
    pub fn add_provider(&mut self, provider: impl Into<Provider>) {
        let provider = provider.into();
        let configured = provider.is_configured();
        debug!(
            provider = provider.name(),
            configured, "Registering translation provider"
        );

        self.providers.push(provider);
        if self.selected.is_none() && configured {
            self.selected = Some(self.providers.len() - 1);
        }
    }

    /// Select the first registered provider named `name`.
    ///
    /// Returns `false` and leaves the selection unchanged when no provider has
    /// that name or the first one found is not configured.
    pub fn set_provider(&mut self, name: &str) -> bool {
        match self.providers.iter().position(|p| p.name() == name) {
            Some(index) if self.providers[index].is_configured() => {
                self.selected = Some(index);
                true
            }
            _ => false,
        }
    }

    /// Names of every configured provider, in registration order.
    pub fn available_providers(&self) -> Vec<&'static str> {
        self.providers
            .iter()
            .filter(|p| p.is_configured())
            .map(Provider::name)
            .collect()
    }

    pub fn current_provider(&self) -> Option<&'static str> {
        self.selected_provider().map(Provider::name)
    }

    fn selected_provider(&self) -> Option<&Provider> {
        self.selected.and_then(|index| self.providers.get(index))
    }

    /// Translate `text` into each of `target_languages`, one request at a time.
    ///
    /// Codes missing from the language catalog are skipped without a result
    /// entry. Every recognized code yields exactly one entry, in request order;
    /// a failing language becomes an error entry and never aborts the batch.
    /// Fails only when no provider is selected, before any request is sent.
    pub async fn translate_to_multiple_languages<S: AsRef<str>>(
        &self,
        text: &str,
        target_languages: &[S],
        messages: &ErrorMessages,
    ) -> Result<Vec<TranslationResult>, TranslationError> {
        let provider = self.selected_provider().ok_or_else(|| {
            TranslationError::NoProviderSelected(messages.text(MessageKey::NoProvider))
        })?;

        let registry = LanguageRegistry::get();
        let mut results = Vec::with_capacity(target_languages.len());

        for code in target_languages {
            let code = code.as_ref();
            // TODO: surface unknown codes as error entries once the UI can render them
            let Some(lang) = registry.get_by_code(code) else {
                debug!(language = code, "Skipping language missing from catalog");
                continue;
            };

            match provider.translate(&self.client, text, code, messages).await {
                Ok(translated) => {
                    debug!(provider = provider.name(), language = code, "Translated");
                    results.push(TranslationResult::success(lang, translated));
                }
                Err(e) => {
                    warn!(
                        provider = provider.name(),
                        language = code,
                        "Translation failed: {}",
                        e
                    );
                    let message = if e.message().trim().is_empty() {
                        messages.text(MessageKey::TranslationFailed)
                    } else {
                        e.to_string()
                    };
                    results.push(TranslationResult::failure(lang, message));
                }
            }
        }

        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::{BaiduTranslate, DeepLTranslate, GoogleTranslate, MicrosoftTranslator};
    use proptest::prelude::*;
    use wiremock::{
        matchers::{body_partial_json, method},
        Mock, MockServer, ResponseTemplate,
    };

    fn google_response(text: &str) -> serde_json::Value {
        serde_json::json!({ "data": { "translations": [ { "translatedText": text } ] } })
    }

    async fn mount_google(mock_server: &MockServer, target: &str, text: &str) {
        Mock::given(method("POST"))
            .and(body_partial_json(serde_json::json!({ "target": target })))
            .respond_with(ResponseTemplate::new(200).set_body_json(google_response(text)))
            .mount(mock_server)
            .await;
    }

    fn google_at(mock_server: &MockServer) -> GoogleTranslate {
        GoogleTranslate::new("test-google-key").with_endpoint(mock_server.uri())
    }

    // ==================== Registry Tests ====================

    #[test]
    fn test_new_service_has_no_selection() {
        let service = TranslationService::new();
        assert_eq!(service.current_provider(), None);
        assert!(service.available_providers().is_empty());
    }

    #[test]
    fn test_add_provider_selects_first_configured() {
        let mut service = TranslationService::new();
        service.add_provider(GoogleTranslate::new(""));
        assert_eq!(service.current_provider(), None);

        service.add_provider(DeepLTranslate::new("deepl-key"));
        assert_eq!(service.current_provider(), Some("DeepL"));

        service.add_provider(MicrosoftTranslator::new("ms-key", ""));
        assert_eq!(service.current_provider(), Some("DeepL"));
    }

    #[test]
    fn test_available_providers_filters_unconfigured() {
        let mut service = TranslationService::new();
        service.add_provider(GoogleTranslate::new("google-key"));
        service.add_provider(BaiduTranslate::new("app", ""));

        assert_eq!(service.available_providers(), vec!["Google Translate"]);
    }

    #[test]
    fn test_set_provider_unconfigured_keeps_selection() {
        let mut service = TranslationService::new();
        service.add_provider(GoogleTranslate::new("google-key"));
        service.add_provider(BaiduTranslate::new("app", ""));

        assert!(!service.set_provider("百度翻译"));
        assert_eq!(service.current_provider(), Some("Google Translate"));
    }

    #[test]
    fn test_set_provider_unknown_keeps_selection() {
        let mut service = TranslationService::new();
        service.add_provider(GoogleTranslate::new("google-key"));

        assert!(!service.set_provider("Yandex"));
        assert_eq!(service.current_provider(), Some("Google Translate"));
    }

    #[test]
    fn test_set_provider_switches() {
        let mut service = TranslationService::new();
        service.add_provider(GoogleTranslate::new("google-key"));
        service.add_provider(BaiduTranslate::new("app", "secret"));

        assert!(service.set_provider("百度翻译"));
        assert_eq!(service.current_provider(), Some("百度翻译"));
    }

    #[test]
    fn test_set_provider_uses_first_match_by_name() {
        let mut service = TranslationService::new();
        service.add_provider(DeepLTranslate::new("deepl-key"));
        service.add_provider(GoogleTranslate::new(""));
        service.add_provider(GoogleTranslate::new("google-key"));

        // First "Google Translate" entry is unconfigured
        assert!(!service.set_provider("Google Translate"));
        assert_eq!(service.current_provider(), Some("DeepL"));
    }

    fn provider_strategy() -> impl Strategy<Value = Provider> {
        let key = |set: bool| if set { "k" } else { "" };
        prop_oneof![
            any::<bool>().prop_map(move |k| Provider::from(GoogleTranslate::new(key(k)))),
            any::<bool>().prop_map(move |k| Provider::from(MicrosoftTranslator::new(key(k), ""))),
            any::<bool>().prop_map(move |k| Provider::from(DeepLTranslate::new(key(k)))),
            (any::<bool>(), any::<bool>())
                .prop_map(move |(a, s)| Provider::from(BaiduTranslate::new(key(a), key(s)))),
        ]
    }

    proptest! {
        #[test]
        fn prop_available_providers_are_configured_in_order(
            providers in prop::collection::vec(provider_strategy(), 0..8)
        ) {
            let expected: Vec<&str> = providers
                .iter()
                .filter(|p| p.is_configured())
                .map(|p| p.name())
                .collect();
            let first_configured = expected.first().copied();

            let mut service = TranslationService::new();
            for provider in providers {
                service.add_provider(provider);
            }

            prop_assert_eq!(service.available_providers(), expected);
            prop_assert_eq!(service.current_provider(), first_configured);
        }
    }

    // ==================== Batch Tests ====================

    #[tokio::test]
    async fn test_batch_without_provider_fails_without_requests() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(google_response("x")))
            .expect(0)
            .mount(&mock_server)
            .await;

        let mut service = TranslationService::new();
        service.add_provider(GoogleTranslate::new("").with_endpoint(mock_server.uri()));

        let err = service
            .translate_to_multiple_languages("hello", &["en", "ja"], &ErrorMessages::english())
            .await
            .unwrap_err();

        assert_eq!(
            err,
            TranslationError::NoProviderSelected(
                "No translation service provider available".to_string()
            )
        );
    }

    #[tokio::test]
    async fn test_batch_without_provider_uses_override() {
        let service = TranslationService::new();
        let messages = ErrorMessages::english().with(MessageKey::NoProvider, "Kein Dienst");

        let err = service
            .translate_to_multiple_languages("hello", &["en"], &messages)
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Kein Dienst");
    }

    #[tokio::test]
    async fn test_empty_batch_returns_empty_list() {
        let mut service = TranslationService::new();
        service.add_provider(GoogleTranslate::new("key"));

        let results = service
            .translate_to_multiple_languages::<&str>("hello", &[], &ErrorMessages::english())
            .await
            .expect("Should succeed");

        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn test_batch_preserves_request_order() {
        let mock_server = MockServer::start().await;
        mount_google(&mock_server, "fr", "bonjour").await;
        mount_google(&mock_server, "ja", "こんにちは").await;
        mount_google(&mock_server, "de", "hallo").await;

        let mut service = TranslationService::new();
        service.add_provider(google_at(&mock_server));

        let results = service
            .translate_to_multiple_languages("hello", &["fr", "ja", "de"], &ErrorMessages::english())
            .await
            .expect("Should succeed");

        let texts: Vec<_> = results.iter().map(|r| r.text.as_str()).collect();
        assert_eq!(texts, vec!["bonjour", "こんにちは", "hallo"]);
        let codes: Vec<_> = results.iter().map(|r| r.language.as_str()).collect();
        assert_eq!(codes, vec!["fr", "ja", "de"]);
        assert!(results.iter().all(|r| !r.is_error()));
        assert_eq!(results[1].language_name, "Japanese");
        assert_eq!(results[1].flag, "🇯🇵");
    }

    #[tokio::test]
    async fn test_batch_isolates_single_failure() {
        let mock_server = MockServer::start().await;
        mount_google(&mock_server, "en", "hello").await;
        Mock::given(method("POST"))
            .and(body_partial_json(serde_json::json!({ "target": "ko" })))
            .respond_with(ResponseTemplate::new(500).set_body_string("backend down"))
            .mount(&mock_server)
            .await;
        mount_google(&mock_server, "fr", "bonjour").await;

        let mut service = TranslationService::new();
        service.add_provider(google_at(&mock_server));

        let results = service
            .translate_to_multiple_languages("hello", &["en", "ko", "fr"], &ErrorMessages::english())
            .await
            .expect("Should succeed");

        assert_eq!(results.len(), 3);
        assert_eq!(results[0].text, "hello");
        assert_eq!(results[0].error, None);

        assert_eq!(results[1].language, "ko");
        assert_eq!(results[1].text, "");
        let error = results[1].error.as_deref().expect("ko should carry an error");
        assert!(error.starts_with("Google Translate failed: "));

        assert_eq!(results[2].text, "bonjour");
        assert_eq!(results[2].error, None);
    }

    #[tokio::test]
    async fn test_batch_drops_unknown_codes() {
        let mock_server = MockServer::start().await;
        mount_google(&mock_server, "en", "hello").await;

        let mut service = TranslationService::new();
        service.add_provider(google_at(&mock_server));

        let results = service
            .translate_to_multiple_languages("hello", &["en", "xx"], &ErrorMessages::english())
            .await
            .expect("Should succeed");

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].language, "en");
    }

    #[tokio::test]
    async fn test_unknown_codes_issue_no_requests() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(google_response("x")))
            .expect(0)
            .mount(&mock_server)
            .await;

        let mut service = TranslationService::new();
        service.add_provider(google_at(&mock_server));

        let results = service
            .translate_to_multiple_languages("hello", &["xx", "EN"], &ErrorMessages::english())
            .await
            .expect("Should succeed");

        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn test_batch_uses_selected_provider_only() {
        let google_server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(google_response("x")))
            .expect(0)
            .mount(&google_server)
            .await;

        let deepl_server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "translations": [ { "text": "Hallo" } ]
            })))
            .expect(1)
            .mount(&deepl_server)
            .await;

        let mut service = TranslationService::new();
        service.add_provider(google_at(&google_server));
        service.add_provider(DeepLTranslate::new("deepl-key").with_endpoint(deepl_server.uri()));
        assert!(service.set_provider("DeepL"));

        let results = service
            .translate_to_multiple_languages("hello", &["de"], &ErrorMessages::english())
            .await
            .expect("Should succeed");

        assert_eq!(results[0].text, "Hallo");
    }

    #[test]
    fn test_result_serializes_camel_case_without_null_error() {
        let lang = LanguageRegistry::get().get_by_code("fr").expect("fr in catalog");
        let json = serde_json::to_value(TranslationResult::success(lang, "bonjour".to_string()))
            .expect("Should serialize");

        assert_eq!(json["languageName"], "French");
        assert_eq!(json["text"], "bonjour");
        assert!(json.get("error").is_none());
    }
}
