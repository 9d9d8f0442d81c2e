use parking_lot::Mutex;
use serde_json::Value;

use crate::errors::StoreError;
use crate::store::models::{
    ContentRecord, LanguageIndexRow, StoreData, TranslationRow,
};
use crate::store::{ContentStore, read_field_data, write_field_data};

/// In-memory content store. Used by tests and as the seed target when
/// importing content programmatically.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<StoreData>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with records
    pub fn with_contents(records: impl IntoIterator<Item = ContentRecord>) -> Self {
        let store = Self::new();
        {
            let mut data = store.inner.lock();
            for record in records {
                data.insert_content(record);
            }
        }
        store
    }

    /// Snapshot of the full dataset, for equality assertions in tests
    pub fn snapshot(&self) -> StoreData {
        self.inner.lock().clone()
    }
}

impl ContentStore for MemoryStore {
    fn get_content(&self, id: u64) -> Result<ContentRecord, StoreError> {
        self.inner.lock().get_content(id)
    }

    fn insert_content(&self, record: ContentRecord) -> Result<(), StoreError> {
        self.inner.lock().insert_content(record);
        Ok(())
    }

    fn translation_rows(&self, id: u64) -> Result<Vec<TranslationRow>, StoreError> {
        Ok(self.inner.lock().entry(id)?.translations.clone())
    }

    fn upsert_translation(&self, id: u64, row: TranslationRow) -> Result<String, StoreError> {
        self.inner.lock().upsert_translation(id, row)
    }

    fn language_index(&self, id: u64) -> Result<Vec<LanguageIndexRow>, StoreError> {
        Ok(self.inner.lock().entry(id)?.language_index.clone())
    }

    fn append_language_index(&self, id: u64, row: LanguageIndexRow) -> Result<(), StoreError> {
        self.inner.lock().entry_mut(id)?.language_index.push(row);
        Ok(())
    }

    fn get_meta(&self, id: u64, key: &str) -> Result<Option<Value>, StoreError> {
        Ok(self.inner.lock().entry(id)?.meta.get(key).cloned())
    }

    fn set_meta(&self, id: u64, key: &str, value: Value) -> Result<(), StoreError> {
        self.inner
            .lock()
            .entry_mut(id)?
            .meta
            .insert(key.to_string(), value);
        Ok(())
    }

    fn read_field(&self, id: u64, field_key: &str) -> Result<Value, StoreError> {
        read_field_data(&self.inner.lock(), id, field_key)
    }

    fn write_field(&self, id: u64, field_key: &str, value: Value) -> Result<(), StoreError> {
        write_field_data(&mut self.inner.lock(), id, field_key, value)
    }
}
