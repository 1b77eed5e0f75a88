//! Localized-content access for the clubsite backend
//!
//! This crate sits between the locale core ([`clubsite_i18n`]) and the
//! content store. It provides:
//!
//! - The [`ContentStore`] seam the persistence layer implements
//! - Locale-aware content fetching with fallback to the default locale
//! - Translation helpers: localization listing, missing-translation
//!   computation, translation creation, and JSON export/import
//!
//! # Example
//!
//! ```rust,no_run
//! use clubsite_content::{ContentFallback, ContentStore, Query};
//! use clubsite_i18n::LocaleConfig;
//!
//! # async fn example(store: &dyn ContentStore) -> Result<(), clubsite_content::StoreError> {
//! let config = LocaleConfig::new(vec!["de-AT".into(), "en".into()], "en");
//! let fallback = ContentFallback::new(store, &config);
//!
//! let result = fallback
//!     .fetch_many("article", Some("de"), &Query::new().populate("cover"))
//!     .await?;
//! if result.fallback {
//!     // the Austrian articles were missing; these are the English ones
//! }
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod fallback;
pub mod store;
pub mod translation;

#[cfg(any(test, feature = "testing"))]
pub mod test_utils;

pub use error::ContentError;
pub use fallback::{ContentFallback, FallbackResult};
pub use store::{ContentStore, Query, StoreError};
pub use translation::{
    all_localizations, bulk_create_translations, create_translation, export_translations,
    import_translations, missing_translations, BulkOutcome, ImportOutcome, ImportReport,
    TranslationRequest,
};
