/*!
 * Public exposure of stored translation data.
 *
 * The store addresses its exposed fields by opaque keys; external
 * consumers use stable public names. `FieldKeyMap` is the bidirectional
 * translation table between the two, rebuilt from the store's field
 * definitions on every pass and never persisted. Reads and writes both go
 * through the map, so consumers never see an opaque key.
 */

use serde_json::{Map, Value};
use std::collections::HashMap;

use crate::errors::StoreError;
use crate::store::ContentStore;

/// Bidirectional opaque-key <-> public-name mapping
#[derive(Debug, Clone, Default)]
pub struct FieldKeyMap {
    by_key: HashMap<String, String>,
    by_name: HashMap<String, String>,
}

impl FieldKeyMap {
    /// Rebuild the map from the store's current field definitions
    pub fn rebuild(store: &dyn ContentStore) -> Self {
        let mut map = FieldKeyMap::default();
        for def in store.field_definitions() {
            map.by_key.insert(def.key.clone(), def.name.clone());
            map.by_name.insert(def.name, def.key);
        }
        map
    }

    /// Public name for an opaque key
    pub fn public_name(&self, key: &str) -> Option<&str> {
        self.by_key.get(key).map(|s| s.as_str())
    }

    /// Opaque key for a public name
    pub fn internal_key(&self, name: &str) -> Option<&str> {
        self.by_name.get(name).map(|s| s.as_str())
    }

    /// Number of mapped fields
    pub fn len(&self) -> usize {
        self.by_key.len()
    }

    /// Whether the map is empty
    pub fn is_empty(&self) -> bool {
        self.by_key.is_empty()
    }
}

/// Read every exposed field of a content item and return a JSON object
/// keyed by public names.
pub fn export_content(
    store: &dyn ContentStore,
    id: u64,
    map: &FieldKeyMap,
) -> Result<Value, StoreError> {
    let mut object = Map::new();
    for def in store.field_definitions() {
        let key = map
            .internal_key(&def.name)
            .ok_or_else(|| StoreError::UnknownField(def.name.clone()))?;
        object.insert(def.name.clone(), store.read_field(id, key)?);
    }
    Ok(Value::Object(object))
}

/// Apply a public-named JSON payload to a content item. Unknown names are
/// rejected; each value is validated against the field's record shape at
/// the storage boundary.
pub fn apply_update(
    store: &dyn ContentStore,
    id: u64,
    map: &FieldKeyMap,
    payload: &Value,
) -> Result<(), StoreError> {
    let object = payload.as_object().ok_or_else(|| StoreError::InvalidPayload {
        field: "payload".to_string(),
        reason: "expected a JSON object".to_string(),
    })?;
    for (name, value) in object {
        let key = map
            .internal_key(name)
            .ok_or_else(|| StoreError::UnknownField(name.clone()))?;
        store.write_field(id, key, value.clone())?;
    }
    Ok(())
}
