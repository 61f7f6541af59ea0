//! Application state consumed by the UI layer.
//!
//! Owns the [`TranslationService`], the persisted settings and credentials,
//! and the results of the latest batch. Every mutation the user can make is
//! saved immediately when the state is backed by a [`SettingsFile`].

use crate::config::Endpoints;
use crate::i18n::{ErrorMessages, LanguageEntry, LanguageRegistry};
use crate::providers::{
    BaiduTranslate, DeepLTranslate, GoogleTranslate, MicrosoftTranslator, Provider,
};
use crate::settings::{ApiConfig, AppSettings, PersistedState, SettingsFile, SettingsUpdate};
use crate::translation::{TranslationResult, TranslationService};
use anyhow::Result;
use serde::Serialize;
use tracing::{info, warn};

/// One card per selected language, as the UI renders it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayCard {
    pub language: String,
    pub language_name: String,
    pub flag: String,
    pub text: String,
    pub error: String,
    pub is_loading: bool,
}

pub struct AppState {
    client: reqwest::Client,
    endpoints: Endpoints,
    service: TranslationService,
    settings: AppSettings,
    api_config: ApiConfig,
    messages: ErrorMessages,
    results: Vec<TranslationResult>,
    input_text: String,
    store: Option<SettingsFile>,
}

/// Providers for every credential section that is filled in, in the fixed
/// order Google, Microsoft, DeepL, Baidu.
pub fn build_providers(api_config: &ApiConfig, endpoints: &Endpoints) -> Vec<Provider> {
    let mut providers = Vec::new();

    if let Some(google) = api_config.google.as_ref().filter(|g| !g.api_key.is_empty()) {
        providers.push(
            GoogleTranslate::new(google.api_key.clone())
                .with_endpoint(endpoints.google.clone())
                .into(),
        );
    }

    if let Some(microsoft) = api_config
        .microsoft
        .as_ref()
        .filter(|m| !m.api_key.is_empty())
    {
        providers.push(
            MicrosoftTranslator::new(microsoft.api_key.clone(), microsoft.region.clone())
                .with_endpoint(endpoints.microsoft.clone())
                .into(),
        );
    }

    if let Some(deepl) = api_config.deepl.as_ref().filter(|d| !d.api_key.is_empty()) {
        providers.push(
            DeepLTranslate::new(deepl.api_key.clone())
                .with_endpoint(endpoints.deepl.clone())
                .into(),
        );
    }

    if let Some(baidu) = api_config
        .baidu
        .as_ref()
        .filter(|b| !b.app_id.is_empty() && !b.secret_key.is_empty())
    {
        providers.push(
            BaiduTranslate::new(baidu.app_id.clone(), baidu.secret_key.clone())
                .with_endpoint(endpoints.baidu.clone())
                .into(),
        );
    }

    providers
}

impl AppState {
    /// Build state from persisted data and register the configured providers.
    pub fn new(
        persisted: PersistedState,
        messages: ErrorMessages,
        endpoints: Endpoints,
        client: reqwest::Client,
    ) -> Self {
        let mut state = Self {
            service: TranslationService::with_client(client.clone()),
            client,
            endpoints,
            settings: persisted.settings,
            api_config: persisted.api_config,
            messages,
            results: Vec::new(),
            input_text: String::new(),
            store: None,
        };
        state.initialize_providers();
        state
    }

    /// Save back to `store` on every change.
    pub fn with_store(mut self, store: SettingsFile) -> Self {
        self.store = Some(store);
        self
    }

    /// Rebuild the provider registry from the current credentials.
    ///
    /// Always starts from an empty registry, so changed credentials replace
    /// the old provider instances instead of being appended after them.
    pub fn initialize_providers(&mut self) {
        let mut service = TranslationService::with_client(self.client.clone());
        for provider in build_providers(&self.api_config, &self.endpoints) {
            service.add_provider(provider);
        }

        if !self.settings.current_provider.is_empty()
            && !service.set_provider(&self.settings.current_provider)
        {
            warn!(
                "Saved provider '{}' is not configured, using {:?}",
                self.settings.current_provider,
                service.current_provider()
            );
        }

        info!(
            "Translation providers ready: {:?} (active: {:?})",
            service.available_providers(),
            service.current_provider()
        );
        self.service = service;
    }

    pub fn settings(&self) -> &AppSettings {
        &self.settings
    }

    pub fn api_config(&self) -> &ApiConfig {
        &self.api_config
    }

    pub fn results(&self) -> &[TranslationResult] {
        &self.results
    }

    pub fn input_text(&self) -> &str {
        &self.input_text
    }

    pub fn set_input_text(&mut self, text: impl Into<String>) {
        self.input_text = text.into();
    }

    pub fn set_messages(&mut self, messages: ErrorMessages) {
        self.messages = messages;
    }

    pub fn available_providers(&self) -> Vec<&'static str> {
        self.service.available_providers()
    }

    pub fn current_provider(&self) -> Option<&'static str> {
        self.service.current_provider()
    }

    pub fn available_languages(&self) -> &'static [LanguageEntry] {
        LanguageRegistry::get().list_all()
    }

    /// Display names of the selected languages, skipping unknown codes.
    pub fn selected_language_names(&self) -> Vec<&'static str> {
        let registry = LanguageRegistry::get();
        self.settings
            .selected_languages
            .iter()
            .filter_map(|code| registry.get_by_code(code))
            .map(|lang| lang.name)
            .collect()
    }

    /// Translate `text`, or the current input text when `text` is `None`.
    ///
    /// Blank text is ignored. The new results replace the previous ones. When
    /// no provider is available every selected language gets an error card.
    pub async fn translate(&mut self, text: Option<&str>) {
        let text = match text {
            Some(text) if !text.is_empty() => text.to_string(),
            _ => self.input_text.clone(),
        };
        if text.trim().is_empty() {
            return;
        }

        info!(
            "Translating {} chars into {} languages",
            text.chars().count(),
            self.settings.selected_languages.len()
        );

        let outcome = self
            .service
            .translate_to_multiple_languages(
                &text,
                &self.settings.selected_languages,
                &self.messages,
            )
            .await;

        self.results = match outcome {
            Ok(results) => results,
            Err(e) => {
                warn!("Translation batch failed: {}", e);
                let registry = LanguageRegistry::get();
                self.settings
                    .selected_languages
                    .iter()
                    .map(|code| match registry.get_by_code(code) {
                        Some(lang) => TranslationResult::failure(lang, e.to_string()),
                        None => TranslationResult {
                            language: code.clone(),
                            language_name: String::new(),
                            flag: String::new(),
                            text: String::new(),
                            error: Some(e.to_string()),
                        },
                    })
                    .collect()
            }
        };
    }

    /// React to new clipboard text. Returns whether a translation ran.
    pub async fn handle_clipboard_text(&mut self, text: &str) -> bool {
        if !self.settings.auto_translate_on_clipboard || text.trim().is_empty() {
            return false;
        }

        self.input_text = text.to_string();
        self.translate(Some(text)).await;
        true
    }

    /// Cards for the selected languages joined with the latest results.
    pub fn display_cards(&self) -> Vec<DisplayCard> {
        self.cards(false)
    }

    /// Cards to show while a batch is in flight: anything without a result
    /// yet is marked loading.
    pub fn loading_cards(&self) -> Vec<DisplayCard> {
        self.cards(true)
    }

    fn cards(&self, translating: bool) -> Vec<DisplayCard> {
        let registry = LanguageRegistry::get();
        self.settings
            .selected_languages
            .iter()
            .map(|code| {
                let lang = registry.get_by_code(code);
                let result = self.results.iter().find(|r| &r.language == code);
                let text = result.map(|r| r.text.clone()).unwrap_or_default();
                let error = result.and_then(|r| r.error.clone()).unwrap_or_default();

                DisplayCard {
                    language: code.clone(),
                    language_name: lang.map(|l| l.name.to_string()).unwrap_or_default(),
                    flag: lang.map(|l| l.flag.to_string()).unwrap_or_default(),
                    is_loading: translating && text.is_empty() && error.is_empty(),
                    text,
                    error,
                }
            })
            .collect()
    }

    /// Merge new credentials, rebuild the providers, then save.
    ///
    /// The registry always matches the in-memory credentials, even when the
    /// save fails.
    pub fn update_api_config(&mut self, config: ApiConfig) -> Result<()> {
        self.api_config.merge(config);
        self.initialize_providers();
        self.save()
    }

    pub fn update_settings(&mut self, update: SettingsUpdate) -> Result<()> {
        let provider_changed = update.current_provider.is_some();
        self.settings.apply(update);
        if provider_changed
            && !self.settings.current_provider.is_empty()
            && !self.service.set_provider(&self.settings.current_provider)
        {
            warn!(
                "Provider '{}' is not configured, keeping {:?}",
                self.settings.current_provider,
                self.service.current_provider()
            );
        }
        self.save()
    }

    /// Select `code` if it is not selected, otherwise deselect it.
    pub fn toggle_language(&mut self, code: &str) -> Result<()> {
        let selected = &mut self.settings.selected_languages;
        match selected.iter().position(|c| c == code) {
            Some(index) => {
                selected.remove(index);
            }
            None => selected.push(code.to_string()),
        }
        self.save()
    }

    /// Switch the active provider and remember the choice.
    ///
    /// Returns `Ok(false)` without saving when the provider is unknown or not
    /// configured.
    pub fn set_provider(&mut self, name: &str) -> Result<bool> {
        if !self.service.set_provider(name) {
            return Ok(false);
        }

        self.settings.current_provider = name.to_string();
        self.save()?;
        Ok(true)
    }

    pub fn persisted(&self) -> PersistedState {
        PersistedState {
            settings: self.settings.clone(),
            api_config: self.api_config.clone(),
        }
    }

    fn save(&self) -> Result<()> {
        match &self.store {
            Some(store) => store.save(&self.persisted()),
            None => Ok(()),
        }
    }
}
