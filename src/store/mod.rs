/*!
 * Content storage surface.
 *
 * The orchestrator needs a deliberately small interface: read a content
 * record, read all rows of a named repeater, append or overwrite one row,
 * and get/set scalar metadata by key. Two implementations are provided:
 *
 * - `MemoryStore`: in-process maps behind a mutex, used by tests
 * - `JsonStore`: whole-file JSON persistence with read-modify-write
 *
 * Records are explicit struct types validated at this boundary; nothing
 * above the store handles loosely-typed nested arrays.
 */

use serde_json::Value;

use crate::errors::StoreError;

pub mod json;
pub mod memory;
pub mod models;

pub use json::JsonStore;
pub use memory::MemoryStore;
pub use models::{
    ContentEntry, ContentRecord, ContentStatus, LanguageIndexRow, StoreData, TranslationRow,
    opaque_field_key, translation_row_id,
};

/// Public names of the fields exposed through the field-key map
pub const FIELD_TRANSLATIONS: &str = "translations";
pub const FIELD_LANGUAGE_INDEX: &str = "language_index";
pub const FIELD_KNOWN_SLUGS: &str = "known_slugs";
pub const FIELD_KNOWN_SLUGS_LIST: &str = "known_slugs_list";

/// A field the store exposes for public consumption: an opaque storage key
/// paired with the human-readable name external consumers use
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDefinition {
    /// Opaque storage key (e.g. "field_3fa19c02")
    pub key: String,
    /// Stable public name (e.g. "translations")
    pub name: String,
}

/// The exposed field set. Identical for every store implementation.
pub fn field_definitions() -> Vec<FieldDefinition> {
    [
        FIELD_TRANSLATIONS,
        FIELD_LANGUAGE_INDEX,
        FIELD_KNOWN_SLUGS,
        FIELD_KNOWN_SLUGS_LIST,
    ]
    .iter()
    .map(|name| FieldDefinition {
        key: opaque_field_key(name),
        name: (*name).to_string(),
    })
    .collect()
}

/// Common trait for content stores
pub trait ContentStore: Send + Sync {
    /// Fetch one content record
    fn get_content(&self, id: u64) -> Result<ContentRecord, StoreError>;

    /// Insert or replace a content record
    fn insert_content(&self, record: ContentRecord) -> Result<(), StoreError>;

    /// All translation rows for a content item
    fn translation_rows(&self, id: u64) -> Result<Vec<TranslationRow>, StoreError>;

    /// Insert or overwrite the translation row for the row's language,
    /// returning the row identifier
    fn upsert_translation(&self, id: u64, row: TranslationRow) -> Result<String, StoreError>;

    /// All language index rows for a content item
    fn language_index(&self, id: u64) -> Result<Vec<LanguageIndexRow>, StoreError>;

    /// Append one language index row
    fn append_language_index(&self, id: u64, row: LanguageIndexRow) -> Result<(), StoreError>;

    /// Read one scalar metadata value by key
    fn get_meta(&self, id: u64, key: &str) -> Result<Option<Value>, StoreError>;

    /// Write one scalar metadata value by key
    fn set_meta(&self, id: u64, key: &str, value: Value) -> Result<(), StoreError>;

    /// Read an exposed field by its opaque key
    fn read_field(&self, id: u64, field_key: &str) -> Result<Value, StoreError>;

    /// Write an exposed field by its opaque key, validating the payload
    /// against the field's record shape
    fn write_field(&self, id: u64, field_key: &str, value: Value) -> Result<(), StoreError>;

    /// The fields this store exposes for public consumption
    fn field_definitions(&self) -> Vec<FieldDefinition> {
        field_definitions()
    }
}

/// Resolve an opaque field key back to its public name
fn field_name_for_key(field_key: &str) -> Result<&'static str, StoreError> {
    for name in [
        FIELD_TRANSLATIONS,
        FIELD_LANGUAGE_INDEX,
        FIELD_KNOWN_SLUGS,
        FIELD_KNOWN_SLUGS_LIST,
    ] {
        if opaque_field_key(name) == field_key {
            return Ok(name);
        }
    }
    Err(StoreError::UnknownField(field_key.to_string()))
}

/// Shared read path for exposed fields, used by both store implementations
pub(crate) fn read_field_data(
    data: &StoreData,
    id: u64,
    field_key: &str,
) -> Result<Value, StoreError> {
    let entry = data.entry(id)?;
    let value = match field_name_for_key(field_key)? {
        FIELD_TRANSLATIONS => serde_json::to_value(&entry.translations)?,
        FIELD_LANGUAGE_INDEX => serde_json::to_value(&entry.language_index)?,
        FIELD_KNOWN_SLUGS => entry
            .meta
            .get(FIELD_KNOWN_SLUGS)
            .cloned()
            .unwrap_or_else(|| Value::String(String::new())),
        FIELD_KNOWN_SLUGS_LIST => entry
            .meta
            .get(FIELD_KNOWN_SLUGS_LIST)
            .cloned()
            .unwrap_or_else(|| Value::Array(Vec::new())),
        _ => unreachable!(),
    };
    Ok(value)
}

/// Shared write path for exposed fields. Payloads are deserialized into the
/// typed records before anything is stored.
pub(crate) fn write_field_data(
    data: &mut StoreData,
    id: u64,
    field_key: &str,
    value: Value,
) -> Result<(), StoreError> {
    let name = field_name_for_key(field_key)?;
    match name {
        FIELD_TRANSLATIONS => {
            let rows: Vec<TranslationRow> =
                serde_json::from_value(value).map_err(|e| StoreError::InvalidPayload {
                    field: name.to_string(),
                    reason: e.to_string(),
                })?;
            let entry = data.entry_mut(id)?;
            entry.translations.clear();
            for row in rows {
                data.upsert_translation(id, row)?;
            }
        }
        FIELD_LANGUAGE_INDEX => {
            let rows: Vec<LanguageIndexRow> =
                serde_json::from_value(value).map_err(|e| StoreError::InvalidPayload {
                    field: name.to_string(),
                    reason: e.to_string(),
                })?;
            data.entry_mut(id)?.language_index = rows;
        }
        FIELD_KNOWN_SLUGS => {
            if !value.is_string() {
                return Err(StoreError::InvalidPayload {
                    field: name.to_string(),
                    reason: "expected a string".to_string(),
                });
            }
            data.entry_mut(id)?.meta.insert(name.to_string(), value);
        }
        FIELD_KNOWN_SLUGS_LIST => {
            if !value.is_array() {
                return Err(StoreError::InvalidPayload {
                    field: name.to_string(),
                    reason: "expected an array".to_string(),
                });
            }
            data.entry_mut(id)?.meta.insert(name.to_string(), value);
        }
        _ => unreachable!(),
    }
    Ok(())
}
