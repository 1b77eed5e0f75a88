//! Error types for translation management

use crate::store::StoreError;
use thiserror::Error;

/// Errors produced by the translation helper layer.
///
/// Fallback fetching is not represented here: the fallback accessor
/// surfaces raw [`StoreError`]s so the store's own error reaches the
/// caller unwrapped.
#[derive(Error, Debug)]
pub enum ContentError {
    /// The entity a translation should be copied from does not exist
    #[error("Source entity {id} not found")]
    SourceNotFound { id: u64 },

    /// A translation already exists for the target locale
    #[error("Translation already exists for locale '{locale}'. Set overwrite to update.")]
    TranslationExists { locale: String },

    /// Entity data could not be (de)serialized
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The underlying store failed
    #[error("Store error: {0}")]
    Store(#[source] StoreError),
}

impl From<StoreError> for ContentError {
    fn from(err: StoreError) -> Self {
        Self::Store(err)
    }
}
