use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;

use crate::errors::StoreError;

/// Publication status of a content record
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ContentStatus {
    /// Saved and visible; eligible as a translation source
    #[default]
    Published,
    /// Not yet saved properly; translation is refused
    Draft,
}

/// A source content record: the editorial fields the orchestrator reads
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ContentRecord {
    /// Content identifier
    pub id: u64,

    /// URL slug of the source content
    pub slug: String,

    /// Publication status
    #[serde(default)]
    pub status: ContentStatus,

    /// Title in the source language
    pub title: String,

    /// HTML body in the source language
    #[serde(default)]
    pub body: String,

    /// Additional named HTML body fields, all translated with the
    /// HTML-preserving prompt
    #[serde(default)]
    pub extra_html: BTreeMap<String, String>,
}

/// One stored translation result for a (content, language) pair.
///
/// `None` for a field means that field has not been translated (either it
/// was empty at the source or its API call failed). Rows are overwritten on
/// every re-run; there is no history.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TranslationRow {
    /// Target language code
    pub language: String,

    /// Translated title
    pub title: Option<String>,

    /// Translated HTML body
    pub body: Option<String>,

    /// Translated extra HTML fields, keyed by field name
    #[serde(default)]
    pub extra_html: BTreeMap<String, String>,

    /// Translated SEO title
    pub seo_title: Option<String>,

    /// Translated SEO description
    pub seo_description: Option<String>,

    /// When this row was last written
    pub translated_at: DateTime<Utc>,
}

/// One row of the language index repeater: a language known for a content
/// item, with the slug its translated version lives under
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LanguageIndexRow {
    /// Language code
    pub code: String,

    /// Translated title at the time the language was first indexed
    pub title: String,

    /// URL-safe slug for the language version
    pub slug: String,
}

/// Everything stored for one content item
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ContentEntry {
    /// The editorial record itself
    pub record: ContentRecord,

    /// Translation rows, at most one per language
    #[serde(default)]
    pub translations: Vec<TranslationRow>,

    /// Language index repeater
    #[serde(default)]
    pub language_index: Vec<LanguageIndexRow>,

    /// Scalar metadata (SEO fields, slug set forms, anything keyed)
    #[serde(default)]
    pub meta: BTreeMap<String, serde_json::Value>,
}

impl Default for ContentRecord {
    fn default() -> Self {
        Self {
            id: 0,
            slug: String::new(),
            status: ContentStatus::Published,
            title: String::new(),
            body: String::new(),
            extra_html: BTreeMap::new(),
        }
    }
}

/// The full dataset a store holds. Both store implementations operate on
/// this structure; `JsonStore` additionally round-trips it through a file.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StoreData {
    /// All content entries, keyed by content id
    pub contents: BTreeMap<u64, ContentEntry>,
}

impl StoreData {
    pub fn get_content(&self, id: u64) -> Result<ContentRecord, StoreError> {
        self.contents
            .get(&id)
            .map(|entry| entry.record.clone())
            .ok_or(StoreError::NotFound(id))
    }

    pub fn entry(&self, id: u64) -> Result<&ContentEntry, StoreError> {
        self.contents.get(&id).ok_or(StoreError::NotFound(id))
    }

    pub fn entry_mut(&mut self, id: u64) -> Result<&mut ContentEntry, StoreError> {
        self.contents.get_mut(&id).ok_or(StoreError::NotFound(id))
    }

    pub fn insert_content(&mut self, record: ContentRecord) {
        let id = record.id;
        let entry = self.contents.entry(id).or_default();
        entry.record = record;
    }

    /// Insert or overwrite the translation row for the row's language.
    /// Returns the row identifier. At most one row per language survives.
    pub fn upsert_translation(&mut self, id: u64, row: TranslationRow) -> Result<String, StoreError> {
        let entry = self.entry_mut(id)?;
        let row_id = translation_row_id(id, &row.language);
        match entry
            .translations
            .iter_mut()
            .find(|existing| existing.language == row.language)
        {
            Some(existing) => *existing = row,
            None => entry.translations.push(row),
        }
        Ok(row_id)
    }
}

/// Identifier under which a translation row is addressable
pub fn translation_row_id(content_id: u64, language: &str) -> String {
    format!("{}:{}", content_id, language)
}

/// Derive the opaque storage key for a public field name.
///
/// Keys are stable across processes so external consumers can cache them,
/// but carry no meaning themselves.
pub fn opaque_field_key(name: &str) -> String {
    let digest = Sha256::digest(format!("lingopress:{}", name).as_bytes());
    format!(
        "field_{:02x}{:02x}{:02x}{:02x}",
        digest[0], digest[1], digest[2], digest[3]
    )
}
