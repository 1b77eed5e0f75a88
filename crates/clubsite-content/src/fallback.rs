//! Locale-aware content fetching with default-locale fallback

use crate::store::{ContentStore, Query, StoreError};
use clubsite_i18n::{resolve, LocaleConfig};
use serde_json::Value;
use tracing::{debug, warn};

/// Content returned from a fallback-aware fetch, tagged with the locale
/// that actually produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct FallbackResult<T> {
    /// The fetched content (possibly empty).
    pub data: T,
    /// The locale the content was fetched under.
    pub locale: String,
    /// Whether the default locale was substituted for the requested one.
    pub fallback: bool,
}

/// Fetches localized content, falling back to the default locale when the
/// requested locale has none.
///
/// The primary and fallback queries are strictly sequential and at most
/// one fallback query is issued per call. Fallback only ever targets the
/// single default locale, never an arbitrary third locale.
pub struct ContentFallback<'a, S: ContentStore + ?Sized> {
    store: &'a S,
    config: &'a LocaleConfig,
}

impl<'a, S: ContentStore + ?Sized> ContentFallback<'a, S> {
    /// Create an accessor over a store and locale configuration.
    pub fn new(store: &'a S, config: &'a LocaleConfig) -> Self {
        Self { store, config }
    }

    /// Resolve the requested locale, falling back to the default when
    /// nothing configured matches.
    fn target_locale(&self, requested: Option<&str>) -> String {
        resolve(requested, self.config)
            .unwrap_or(self.config.default_locale())
            .to_string()
    }

    /// Fetch all entities of `content_type` under the requested locale,
    /// retrying against the default locale when the result is empty.
    ///
    /// If the primary query errors and a distinct fallback locale exists,
    /// the fallback query is attempted once; if that errors too, the
    /// original error is propagated, never the fallback's.
    pub async fn fetch_many(
        &self,
        content_type: &str,
        requested_locale: Option<&str>,
        query: &Query,
    ) -> Result<FallbackResult<Vec<Value>>, StoreError> {
        let target = self.target_locale(requested_locale);
        let default = self.config.default_locale();
        debug!(content_type, locale = %target, "fetching localized content");

        match self
            .store
            .find_many(content_type, &query.clone().locale(&target))
            .await
        {
            Ok(content) => {
                if !content.is_empty() {
                    return Ok(FallbackResult {
                        data: content,
                        locale: target,
                        fallback: false,
                    });
                }

                if target != default {
                    let fallback_content = self
                        .store
                        .find_many(content_type, &query.clone().locale(default))
                        .await?;
                    if !fallback_content.is_empty() {
                        warn!(
                            content_type,
                            requested = %target,
                            fallback = %default,
                            "no content in requested locale, falling back to default"
                        );
                        return Ok(FallbackResult {
                            data: fallback_content,
                            locale: default.to_string(),
                            fallback: true,
                        });
                    }
                }

                Ok(FallbackResult {
                    data: Vec::new(),
                    locale: target,
                    fallback: false,
                })
            }
            Err(primary_err) => {
                if target == default {
                    return Err(primary_err);
                }
                match self
                    .store
                    .find_many(content_type, &query.clone().locale(default))
                    .await
                {
                    Ok(data) => {
                        warn!(
                            content_type,
                            requested = %target,
                            fallback = %default,
                            "primary locale query failed, serving default locale"
                        );
                        Ok(FallbackResult {
                            data,
                            locale: default.to_string(),
                            fallback: true,
                        })
                    }
                    // The original failure is the one the caller cares about
                    Err(_) => Err(primary_err),
                }
            }
        }
    }

    /// Fetch a single entity by id under the requested locale, retrying
    /// against the default locale when it is absent.
    ///
    /// Error handling mirrors [`fetch_many`](Self::fetch_many).
    pub async fn fetch_one(
        &self,
        content_type: &str,
        id: u64,
        requested_locale: Option<&str>,
        query: &Query,
    ) -> Result<FallbackResult<Option<Value>>, StoreError> {
        let target = self.target_locale(requested_locale);
        let default = self.config.default_locale();
        debug!(content_type, id, locale = %target, "fetching localized entity");

        match self
            .store
            .find_one(content_type, id, &query.clone().locale(&target))
            .await
        {
            Ok(entity) => {
                if entity.is_some() {
                    return Ok(FallbackResult {
                        data: entity,
                        locale: target,
                        fallback: false,
                    });
                }

                if target != default {
                    let fallback_entity = self
                        .store
                        .find_one(content_type, id, &query.clone().locale(default))
                        .await?;
                    if fallback_entity.is_some() {
                        warn!(
                            content_type,
                            id,
                            requested = %target,
                            fallback = %default,
                            "entity missing in requested locale, falling back to default"
                        );
                        return Ok(FallbackResult {
                            data: fallback_entity,
                            locale: default.to_string(),
                            fallback: true,
                        });
                    }
                }

                Ok(FallbackResult {
                    data: None,
                    locale: target,
                    fallback: false,
                })
            }
            Err(primary_err) => {
                if target == default {
                    return Err(primary_err);
                }
                match self
                    .store
                    .find_one(content_type, id, &query.clone().locale(default))
                    .await
                {
                    Ok(data) => Ok(FallbackResult {
                        data,
                        locale: default.to_string(),
                        fallback: true,
                    }),
                    Err(_) => Err(primary_err),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MockContentStore;
    use crate::test_utils::MemoryStore;
    use mockall::predicate::{always, eq};
    use serde_json::json;
    use std::io;

    fn config() -> LocaleConfig {
        LocaleConfig::new(vec!["de-AT".into(), "en".into()], "en")
    }

    fn store_error(message: &str) -> StoreError {
        Box::new(io::Error::new(io::ErrorKind::ConnectionReset, message.to_string()))
    }

    #[tokio::test]
    async fn content_in_requested_locale_needs_no_fallback() {
        let store = MemoryStore::new();
        store.insert("article", json!({"title": "Frühjahrsturnier", "locale": "de-AT"}));

        let cfg = config();
        let accessor = ContentFallback::new(&store, &cfg);
        let result = accessor
            .fetch_many("article", Some("de-AT"), &Query::new())
            .await
            .unwrap();

        assert!(!result.fallback);
        assert_eq!(result.locale, "de-AT");
        assert_eq!(result.data.len(), 1);
    }

    #[tokio::test]
    async fn missing_translation_falls_back_to_default() {
        let store = MemoryStore::new();
        store.insert("article", json!({"title": "Spring Open", "locale": "en"}));

        let cfg = config();
        let accessor = ContentFallback::new(&store, &cfg);
        let result = accessor
            .fetch_many("article", Some("de-AT"), &Query::new())
            .await
            .unwrap();

        assert!(result.fallback);
        assert_eq!(result.locale, "en");
        assert_eq!(result.data[0]["title"], "Spring Open");
    }

    #[tokio::test]
    async fn empty_everywhere_is_tagged_as_primary() {
        let store = MemoryStore::new();

        let cfg = config();
        let accessor = ContentFallback::new(&store, &cfg);
        let result = accessor
            .fetch_many("article", Some("de-AT"), &Query::new())
            .await
            .unwrap();

        assert!(!result.fallback);
        assert_eq!(result.locale, "de-AT");
        assert!(result.data.is_empty());
    }

    #[tokio::test]
    async fn no_second_query_when_resolved_equals_default() {
        let mut store = MockContentStore::new();
        store
            .expect_find_many()
            .with(eq("article"), always())
            .times(1)
            .returning(|_, _| Ok(Vec::new()));

        let cfg = config();
        let accessor = ContentFallback::new(&store, &cfg);
        let result = accessor
            .fetch_many("article", Some("en"), &Query::new())
            .await
            .unwrap();
        assert!(!result.fallback);
    }

    #[tokio::test]
    async fn primary_error_with_failing_fallback_surfaces_original() {
        let mut store = MockContentStore::new();
        let mut calls = 0;
        store.expect_find_many().times(2).returning(move |_, query| {
            calls += 1;
            if calls == 1 {
                assert_eq!(query.locale.as_deref(), Some("de-AT"));
                Err(store_error("primary connection reset"))
            } else {
                assert_eq!(query.locale.as_deref(), Some("en"));
                Err(store_error("fallback connection reset"))
            }
        });

        let cfg = config();
        let accessor = ContentFallback::new(&store, &cfg);
        let err = accessor
            .fetch_many("article", Some("de-AT"), &Query::new())
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "primary connection reset");
    }

    #[tokio::test]
    async fn primary_error_with_working_fallback_serves_default() {
        let mut store = MockContentStore::new();
        let mut calls = 0;
        store.expect_find_many().times(2).returning(move |_, _| {
            calls += 1;
            if calls == 1 {
                Err(store_error("primary down"))
            } else {
                Ok(vec![json!({"title": "Spring Open", "locale": "en"})])
            }
        });

        let cfg = config();
        let accessor = ContentFallback::new(&store, &cfg);
        let result = accessor
            .fetch_many("article", Some("de-AT"), &Query::new())
            .await
            .unwrap();
        assert!(result.fallback);
        assert_eq!(result.locale, "en");
    }

    #[tokio::test]
    async fn unresolvable_locale_fetches_default_directly() {
        let store = MemoryStore::new();
        store.insert("article", json!({"title": "Spring Open", "locale": "en"}));

        let cfg = config();
        let accessor = ContentFallback::new(&store, &cfg);
        let result = accessor
            .fetch_many("article", Some("fr"), &Query::new())
            .await
            .unwrap();

        // "fr" resolves to nothing, so the default is the primary locale.
        assert!(!result.fallback);
        assert_eq!(result.locale, "en");
        assert_eq!(result.data.len(), 1);
    }

    #[tokio::test]
    async fn single_entity_lookup_falls_back_when_absent() {
        let mut store = MockContentStore::new();
        store
            .expect_find_one()
            .times(2)
            .returning(|_, id, query| {
                if query.locale.as_deref() == Some("en") {
                    Ok(Some(json!({"id": id, "title": "Spring Open", "locale": "en"})))
                } else {
                    Ok(None)
                }
            });

        let cfg = config();
        let accessor = ContentFallback::new(&store, &cfg);
        let result = accessor
            .fetch_one("article", 7, Some("de-AT"), &Query::new())
            .await
            .unwrap();

        assert!(result.fallback);
        assert_eq!(result.locale, "en");
        assert_eq!(result.data.unwrap()["title"], "Spring Open");
    }
}
