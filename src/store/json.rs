use parking_lot::Mutex;
use serde_json::Value;
use std::path::{Path, PathBuf};

use crate::errors::StoreError;
use crate::store::models::{ContentRecord, LanguageIndexRow, StoreData, TranslationRow};
use crate::store::{ContentStore, read_field_data, write_field_data};

/// File-backed content store: the whole dataset is one JSON document,
/// loaded and rewritten on every mutation. Fine for the request-scoped,
/// single-writer usage this tool has; concurrent runs against the same
/// file are not coordinated.
#[derive(Debug)]
pub struct JsonStore {
    path: PathBuf,
    // Serializes read-modify-write cycles within one process
    lock: Mutex<()>,
}

impl JsonStore {
    /// Open a store at the given path. A missing file is treated as an
    /// empty dataset and created on first write.
    pub fn open<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            lock: Mutex::new(()),
        }
    }

    fn load(&self) -> Result<StoreData, StoreError> {
        if !self.path.exists() {
            return Ok(StoreData::default());
        }
        let content = std::fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(StoreData::default());
        }
        Ok(serde_json::from_str(&content)?)
    }

    fn save(&self, data: &StoreData) -> Result<(), StoreError> {
        let content = serde_json::to_string_pretty(data)?;
        std::fs::write(&self.path, content)?;
        Ok(())
    }

    fn with_data<T>(
        &self,
        op: impl FnOnce(&StoreData) -> Result<T, StoreError>,
    ) -> Result<T, StoreError> {
        let _guard = self.lock.lock();
        let data = self.load()?;
        op(&data)
    }

    fn with_data_mut<T>(
        &self,
        op: impl FnOnce(&mut StoreData) -> Result<T, StoreError>,
    ) -> Result<T, StoreError> {
        let _guard = self.lock.lock();
        let mut data = self.load()?;
        let result = op(&mut data)?;
        self.save(&data)?;
        Ok(result)
    }
}

impl ContentStore for JsonStore {
    fn get_content(&self, id: u64) -> Result<ContentRecord, StoreError> {
        self.with_data(|data| data.get_content(id))
    }

    fn insert_content(&self, record: ContentRecord) -> Result<(), StoreError> {
        self.with_data_mut(|data| {
            data.insert_content(record);
            Ok(())
        })
    }

    fn translation_rows(&self, id: u64) -> Result<Vec<TranslationRow>, StoreError> {
        self.with_data(|data| Ok(data.entry(id)?.translations.clone()))
    }

    fn upsert_translation(&self, id: u64, row: TranslationRow) -> Result<String, StoreError> {
        self.with_data_mut(|data| data.upsert_translation(id, row))
    }

    fn language_index(&self, id: u64) -> Result<Vec<LanguageIndexRow>, StoreError> {
        self.with_data(|data| Ok(data.entry(id)?.language_index.clone()))
    }

    fn append_language_index(&self, id: u64, row: LanguageIndexRow) -> Result<(), StoreError> {
        self.with_data_mut(|data| {
            data.entry_mut(id)?.language_index.push(row);
            Ok(())
        })
    }

    fn get_meta(&self, id: u64, key: &str) -> Result<Option<Value>, StoreError> {
        self.with_data(|data| Ok(data.entry(id)?.meta.get(key).cloned()))
    }

    fn set_meta(&self, id: u64, key: &str, value: Value) -> Result<(), StoreError> {
        self.with_data_mut(|data| {
            data.entry_mut(id)?.meta.insert(key.to_string(), value);
            Ok(())
        })
    }

    fn read_field(&self, id: u64, field_key: &str) -> Result<Value, StoreError> {
        self.with_data(|data| read_field_data(data, id, field_key))
    }

    fn write_field(&self, id: u64, field_key: &str, value: Value) -> Result<(), StoreError> {
        self.with_data_mut(|data| write_field_data(data, id, field_key, value))
    }
}
