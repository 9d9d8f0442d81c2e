use anyhow::{Context, Result, anyhow};
use indicatif::{ProgressBar, ProgressStyle};
use log::info;
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use crate::app_config::Config;
use crate::language;
use crate::providers::ChatProvider;
use crate::providers::openai::OpenAi;
use crate::publish::{self, FieldKeyMap};
use crate::store::{ContentRecord, ContentStore, JsonStore};
use crate::translation::{Orchestrator, TranslationReport};

// @module: Application controller wiring config, store and provider

/// A content document as accepted by the import command: the editorial
/// record plus optional scalar metadata (SEO fields and the like)
#[derive(Debug, Deserialize)]
struct ImportDocument {
    #[serde(flatten)]
    record: ContentRecord,
    #[serde(default)]
    meta: BTreeMap<String, Value>,
}

/// Main application controller
pub struct Controller {
    // @field: App configuration
    config: Config,
    // @field: Content store
    store: Arc<dyn ContentStore>,
    // @field: Chat-completion provider
    provider: Arc<dyn ChatProvider>,
}

impl Controller {
    /// Create a controller from configuration: JSON store at the
    /// configured path, OpenAI-compatible provider
    pub fn new(config: Config) -> Result<Self> {
        let store: Arc<dyn ContentStore> = Arc::new(JsonStore::open(&config.store_path));
        let provider: Arc<dyn ChatProvider> = Arc::new(OpenAi::new(
            config.provider.api_key.clone(),
            config.provider.endpoint.clone(),
            config.provider.timeout_secs,
        ));
        Ok(Self {
            config,
            store,
            provider,
        })
    }

    /// Create a controller over explicit parts, used by tests
    pub fn with_parts(
        config: Config,
        store: Arc<dyn ContentStore>,
        provider: Arc<dyn ChatProvider>,
    ) -> Self {
        Self {
            config,
            store,
            provider,
        }
    }

    /// Translate one content item into all configured target languages
    pub async fn run_translate(&self, content_id: u64) -> Result<TranslationReport> {
        // Translation talks to the API; reject a bad provider config before
        // any request goes out
        self.config
            .validate()
            .context("Configuration validation failed")?;

        let targets = self.config.target_language_codes();
        let orchestrator = Orchestrator::new(
            self.config.clone(),
            Arc::clone(&self.store),
            Arc::clone(&self.provider),
        );

        let progress = ProgressBar::new(targets.len() as u64);
        progress.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:30.cyan/blue}] {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );

        let report = orchestrator
            .translate_content_with_progress(content_id, |lang| {
                progress.set_message(language::language_name(lang));
                progress.inc(1);
            })
            .await?;
        progress.finish_and_clear();

        let succeeded = report.outcomes.values().filter(|o| o.success).count();
        info!(
            "Translation finished for content {}: {}/{} languages succeeded",
            content_id,
            succeeded,
            report.outcomes.len()
        );
        Ok(report)
    }

    /// Print the per-language translation status of a content item
    pub fn run_status(&self, content_id: u64) -> Result<()> {
        let content = self.store.get_content(content_id)?;
        let rows = self.store.translation_rows(content_id)?;
        let index = self.store.language_index(content_id)?;

        println!("Content {}: \"{}\" [{}]", content.id, content.title, content.slug);
        let targets = self.config.target_language_codes();
        if targets.is_empty() {
            println!("No target languages configured.");
            return Ok(());
        }
        for lang in targets {
            let name = language::language_name(&lang);
            match rows.iter().find(|row| row.language == lang) {
                Some(row) => {
                    let slug = index
                        .iter()
                        .find(|entry| entry.code == lang)
                        .map(|entry| entry.slug.as_str())
                        .unwrap_or("-");
                    println!(
                        "  {} ({}): Translated at {} [slug: {}]",
                        name,
                        lang,
                        row.translated_at.format("%Y-%m-%d %H:%M"),
                        slug
                    );
                }
                None => println!("  {} ({}): Not translated", name, lang),
            }
        }
        Ok(())
    }

    /// Export the exposed fields of a content item under public names
    pub fn run_export(&self, content_id: u64) -> Result<Value> {
        let map = FieldKeyMap::rebuild(self.store.as_ref());
        let exported = publish::export_content(self.store.as_ref(), content_id, &map)?;
        Ok(exported)
    }

    /// Apply a public-named JSON payload to a content item
    pub fn run_apply(&self, content_id: u64, payload: &Value) -> Result<()> {
        let map = FieldKeyMap::rebuild(self.store.as_ref());
        publish::apply_update(self.store.as_ref(), content_id, &map, payload)?;
        Ok(())
    }

    /// Import one content document from a JSON file into the store,
    /// returning its id
    pub fn run_import<P: AsRef<Path>>(&self, path: P) -> Result<u64> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .context(format!("Failed to read content file: {:?}", path))?;
        let document: ImportDocument = serde_json::from_str(&text)
            .context(format!("Failed to parse content file: {:?}", path))?;
        if document.record.id == 0 {
            return Err(anyhow!("Content documents need a non-zero id"));
        }
        let id = document.record.id;
        self.store.insert_content(document.record)?;
        for (key, value) in document.meta {
            self.store.set_meta(id, &key, value)?;
        }
        info!("Imported content {} from {:?}", id, path);
        Ok(id)
    }
}
