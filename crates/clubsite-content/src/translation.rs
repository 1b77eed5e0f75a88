//! Translation management helpers
//!
//! The helper layer on top of locale resolution: listing localizations,
//! computing missing translations, creating translations from a source
//! entity, and JSON export/import of a locale's content.

use crate::error::ContentError;
use crate::store::{ContentStore, Query};
use clubsite_i18n::LocaleConfig;
use serde_json::{Map, Value};
use tracing::{debug, warn};

/// Fields that identify a specific entity and must not be copied onto a
/// translation.
const IDENTITY_FIELDS: [&str; 4] = ["id", "createdAt", "updatedAt", "localizations"];

/// One entity of a bulk-translation batch.
#[derive(Debug, Clone)]
pub struct TranslationRequest {
    /// Source entity id.
    pub entity_id: u64,
    /// Target locale tag.
    pub locale: String,
    /// Fields to override on the copied translation.
    pub overrides: Map<String, Value>,
}

/// Outcome of one entry of a bulk-translation batch.
#[derive(Debug)]
pub struct BulkOutcome {
    /// Source entity id.
    pub entity_id: u64,
    /// Target locale tag.
    pub locale: String,
    /// The created translation, or why it failed.
    pub result: Result<Value, ContentError>,
}

/// Outcome of one imported entity.
#[derive(Debug)]
pub struct ImportOutcome {
    /// The entity data as supplied to the import.
    pub entity: Value,
    /// The created translation, or why it was rejected.
    pub result: Result<Value, ContentError>,
}

/// Summary of a translation import.
#[derive(Debug)]
pub struct ImportReport {
    /// Per-entity outcomes, in input order.
    pub outcomes: Vec<ImportOutcome>,
}

impl ImportReport {
    /// Number of successfully imported entities.
    pub fn success_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.result.is_ok()).count()
    }

    /// Number of rejected entities.
    pub fn failure_count(&self) -> usize {
        self.outcomes.len() - self.success_count()
    }
}

/// All localizations of an entity, the entity itself included first.
///
/// A missing entity, or one without populated localizations, yields an
/// empty list.
pub async fn all_localizations<S: ContentStore + ?Sized>(
    store: &S,
    content_type: &str,
    id: u64,
) -> Result<Vec<Value>, ContentError> {
    let entity = store
        .find_one(content_type, id, &Query::new().populate("localizations"))
        .await?;

    let Some(entity) = entity else {
        return Ok(Vec::new());
    };
    let Some(localizations) = entity.get("localizations").and_then(Value::as_array).cloned()
    else {
        return Ok(Vec::new());
    };

    let mut all = vec![entity];
    all.extend(localizations);
    Ok(all)
}

/// Configured locales for which the entity has no localization, in
/// configured order.
pub async fn missing_translations<S: ContentStore + ?Sized>(
    store: &S,
    config: &LocaleConfig,
    content_type: &str,
    id: u64,
) -> Result<Vec<String>, ContentError> {
    let localizations = all_localizations(store, content_type, id).await?;

    let mut existing: Vec<&str> = Vec::new();
    for item in &localizations {
        if let Some(locale) = item.get("locale").and_then(Value::as_str) {
            existing.push(locale);
        } else if let Some(nested) = item.get("localizations").and_then(Value::as_array) {
            existing.extend(nested.iter().filter_map(|l| {
                l.get("locale").and_then(Value::as_str)
            }));
        }
    }

    Ok(config
        .locales()
        .iter()
        .filter(|locale| !existing.contains(&locale.as_str()))
        .cloned()
        .collect())
}

/// Build translation data from a source entity: copy its fields, set the
/// locale, apply overrides, and strip identity fields.
fn translation_data(
    source: &Value,
    target_locale: &str,
    overrides: &Map<String, Value>,
    strip_published: bool,
) -> Value {
    let mut data = source.as_object().cloned().unwrap_or_default();
    data.insert("locale".to_string(), Value::String(target_locale.to_string()));
    for (field, value) in overrides {
        data.insert(field.clone(), value.clone());
    }
    for field in IDENTITY_FIELDS {
        data.remove(field);
    }
    if strip_published {
        data.remove("publishedAt");
    }
    Value::Object(data)
}

/// Create a translation of an entity in a target locale.
///
/// The source entity's fields are copied, `overrides` applied on top, and
/// identity and publication fields stripped before creation.
pub async fn create_translation<S: ContentStore + ?Sized>(
    store: &S,
    content_type: &str,
    source_id: u64,
    target_locale: &str,
    overrides: &Map<String, Value>,
) -> Result<Value, ContentError> {
    let source = store
        .find_one(content_type, source_id, &Query::new())
        .await?
        .ok_or(ContentError::SourceNotFound { id: source_id })?;

    debug!(content_type, source_id, target_locale, "creating translation");
    let data = translation_data(&source, target_locale, overrides, true);
    Ok(store.create(content_type, data).await?)
}

/// Create translations for a batch of entities. Failures are recorded per
/// entry and do not abort the batch.
pub async fn bulk_create_translations<S: ContentStore + ?Sized>(
    store: &S,
    content_type: &str,
    requests: Vec<TranslationRequest>,
) -> Vec<BulkOutcome> {
    let mut outcomes = Vec::with_capacity(requests.len());
    for request in requests {
        let result = create_translation(
            store,
            content_type,
            request.entity_id,
            &request.locale,
            &request.overrides,
        )
        .await;
        if let Err(err) = &result {
            warn!(
                content_type,
                entity_id = request.entity_id,
                locale = %request.locale,
                error = %err,
                "bulk translation entry failed"
            );
        }
        outcomes.push(BulkOutcome {
            entity_id: request.entity_id,
            locale: request.locale,
            result,
        });
    }
    outcomes
}

/// Export a locale's entities as pretty-printed JSON.
pub async fn export_translations<S: ContentStore + ?Sized>(
    store: &S,
    content_type: &str,
    locale: &str,
    query: &Query,
) -> Result<String, ContentError> {
    let entities = store
        .find_many(content_type, &query.clone().locale(locale))
        .await?;
    Ok(serde_json::to_string_pretty(&entities)?)
}

/// Import entities as translations for a target locale.
///
/// Accepts a JSON object or array. Unless `overwrite` is set, an entity
/// whose `slug` or `title` already exists in the target locale is rejected
/// (the check issues a single limited lookup per entity). Identity fields
/// are stripped before creation; publication state is carried over.
pub async fn import_translations<S: ContentStore + ?Sized>(
    store: &S,
    content_type: &str,
    json: &str,
    target_locale: &str,
    overwrite: bool,
) -> Result<ImportReport, ContentError> {
    let parsed: Value = serde_json::from_str(json)?;
    let entities = match parsed {
        Value::Array(items) => items,
        single => vec![single],
    };

    let mut outcomes = Vec::with_capacity(entities.len());
    for entity in entities {
        let result = import_entity(store, content_type, &entity, target_locale, overwrite).await;
        if let Err(err) = &result {
            warn!(content_type, target_locale, error = %err, "import entry rejected");
        }
        outcomes.push(ImportOutcome { entity, result });
    }

    Ok(ImportReport { outcomes })
}

async fn import_entity<S: ContentStore + ?Sized>(
    store: &S,
    content_type: &str,
    entity: &Value,
    target_locale: &str,
    overwrite: bool,
) -> Result<Value, ContentError> {
    if !overwrite {
        let mut lookup = Query::new().locale(target_locale).limit(1);
        if let Some(slug) = entity.get("slug") {
            lookup = lookup.filter("slug", slug.clone());
        }
        if let Some(title) = entity.get("title") {
            lookup = lookup.filter("title", title.clone());
        }

        let existing = store.find_many(content_type, &lookup).await?;
        if !existing.is_empty() {
            return Err(ContentError::TranslationExists {
                locale: target_locale.to_string(),
            });
        }
    }

    let data = translation_data(entity, target_locale, &Map::new(), false);
    Ok(store.create(content_type, data).await?)
}
