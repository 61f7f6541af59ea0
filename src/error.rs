use thiserror::Error;

/// Failure of a single translate call, or of a whole batch.
///
/// Every variant carries the final user-facing message, already resolved
/// against the caller's [`ErrorMessages`](crate::i18n::ErrorMessages), so
/// `Display` can be shown as-is.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TranslationError {
    /// Provider is missing required credentials. Raised before any request.
    #[error("{0}")]
    Configuration(String),

    /// Network or HTTP failure, or an undecodable response.
    #[error("{0}")]
    Transport(String),

    /// Provider answered HTTP 2xx but reported an application-level error.
    #[error("{0}")]
    ProviderLogic(String),

    /// Batch requested while no configured provider is selected.
    #[error("{0}")]
    NoProviderSelected(String),
}

impl TranslationError {
    pub fn message(&self) -> &str {
        match self {
            TranslationError::Configuration(msg)
            | TranslationError::Transport(msg)
            | TranslationError::ProviderLogic(msg)
            | TranslationError::NoProviderSelected(msg) => msg,
        }
    }
}
