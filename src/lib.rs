//! Clipboard translator core: translate one text into several languages at
//! once through a selectable back-end (Google, Microsoft, DeepL or Baidu).

pub mod app;
pub mod config;
pub mod error;
pub mod i18n;
pub mod providers;
pub mod settings;
pub mod translation;

pub use error::TranslationError;
pub use providers::Provider;
pub use translation::{TranslationResult, TranslationService};
