/*!
 * Tests for public field-name exposure
 */

use serde_json::json;

use lingopress::errors::StoreError;
use lingopress::publish::{FieldKeyMap, apply_update, export_content};
use lingopress::store::{ContentStore, FIELD_TRANSLATIONS, opaque_field_key};

use crate::common;

#[test]
fn test_rebuild_shouldMapAllExposedFields() {
    let store = common::seeded_store(vec![]);
    let map = FieldKeyMap::rebuild(store.as_ref());

    assert_eq!(map.len(), 4);
    assert!(!map.is_empty());
}

#[test]
fn test_rebuild_shouldBeBidirectional() {
    let store = common::seeded_store(vec![]);
    let map = FieldKeyMap::rebuild(store.as_ref());

    let key = map.internal_key(FIELD_TRANSLATIONS).unwrap();
    assert_eq!(key, opaque_field_key(FIELD_TRANSLATIONS));
    assert_eq!(map.public_name(key), Some(FIELD_TRANSLATIONS));
}

#[test]
fn test_lookup_withUnknownNameOrKey_shouldReturnNone() {
    let store = common::seeded_store(vec![]);
    let map = FieldKeyMap::rebuild(store.as_ref());

    assert_eq!(map.internal_key("secret_field"), None);
    assert_eq!(map.public_name("field_deadbeef"), None);
}

#[test]
fn test_export_content_shouldUsePublicNamesOnly() {
    let store = common::seeded_store(vec![common::sample_content(7)]);
    store
        .upsert_translation(7, common::sample_translation_row("es"))
        .unwrap();
    let map = FieldKeyMap::rebuild(store.as_ref());

    let exported = export_content(store.as_ref(), 7, &map).unwrap();

    let object = exported.as_object().unwrap();
    assert_eq!(object.len(), 4);
    assert!(object.keys().all(|name| !name.starts_with("field_")));
    let translations = object.get("translations").unwrap().as_array().unwrap();
    assert_eq!(translations.len(), 1);
    assert_eq!(translations[0].get("language").unwrap(), "es");
    assert_eq!(object.get("known_slugs").unwrap(), &json!(""));
    assert_eq!(object.get("known_slugs_list").unwrap(), &json!([]));
}

#[test]
fn test_apply_update_withLanguageIndexPayload_shouldWriteRows() {
    let store = common::seeded_store(vec![common::sample_content(7)]);
    let map = FieldKeyMap::rebuild(store.as_ref());
    let payload = json!({
        "language_index": [{ "code": "fr", "title": "Bienvenue", "slug": "bienvenue" }],
        "known_slugs": "welcome\nbienvenue",
    });

    apply_update(store.as_ref(), 7, &map, &payload).unwrap();

    let index = store.language_index(7).unwrap();
    assert_eq!(index.len(), 1);
    assert_eq!(index[0].code, "fr");
    assert_eq!(index[0].slug, "bienvenue");
    assert_eq!(
        store.get_meta(7, "known_slugs").unwrap(),
        Some(json!("welcome\nbienvenue"))
    );
}

#[test]
fn test_apply_update_withUnknownName_shouldRejectIt() {
    let store = common::seeded_store(vec![common::sample_content(7)]);
    let map = FieldKeyMap::rebuild(store.as_ref());
    let payload = json!({ "secret_field": 1 });

    let result = apply_update(store.as_ref(), 7, &map, &payload);
    assert!(matches!(result, Err(StoreError::UnknownField(name)) if name == "secret_field"));
}

#[test]
fn test_apply_update_withNonObjectPayload_shouldRejectIt() {
    let store = common::seeded_store(vec![common::sample_content(7)]);
    let map = FieldKeyMap::rebuild(store.as_ref());

    let result = apply_update(store.as_ref(), 7, &map, &json!([1, 2, 3]));
    assert!(matches!(result, Err(StoreError::InvalidPayload { .. })));
}
