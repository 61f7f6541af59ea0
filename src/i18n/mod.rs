//! Internationalization (i18n) module.
//!
//! # Architecture
//!
//! - `registry`: the fixed catalog of target languages (code, names, flag)
//! - `strings`: localizable failure messages with English fallbacks
//!
//! # Example
//!
//! ```rust,ignore
//! use clip_translate::i18n::{ErrorMessages, LanguageRegistry, MessageKey};
//!
//! let japanese = LanguageRegistry::get().get_by_code("ja");
//! let messages = ErrorMessages::for_locale("zh-CN");
//! let text = messages.text(MessageKey::NoProvider);
//! ```

mod registry;
mod strings;

pub use registry::{LanguageEntry, LanguageRegistry};
pub use strings::{ErrorMessages, MessageKey};
