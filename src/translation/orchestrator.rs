use chrono::Utc;
use log::{debug, error, info, warn};
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::app_config::Config;
use crate::errors::{ProviderError, StoreError, TranslateError};
use crate::language;
use crate::providers::{ChatProvider, ChatRequest};
use crate::seo::{SeoFields, SeoMeta};
use crate::store::{
    ContentRecord, ContentStatus, ContentStore, FIELD_KNOWN_SLUGS, FIELD_KNOWN_SLUGS_LIST,
    LanguageIndexRow, TranslationRow,
};
use crate::translation::prompts;
use crate::translation::slug;

// @module: Translation orchestration for editorial content

/// Outcome of one target language
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct LanguageOutcome {
    /// Whether every attempted field translated and persisted cleanly
    pub success: bool,

    /// "Created"/"Updated", or the joined per-field error summaries
    pub message: String,

    /// Identifier of the stored translation row, if one was written
    pub row_id: Option<String>,
}

/// Result of a full orchestration run: one entry per configured language
#[derive(Debug, Clone, Serialize, Default)]
pub struct TranslationReport {
    /// Per-language outcomes, keyed by language code
    pub outcomes: BTreeMap<String, LanguageOutcome>,
}

/// Translation orchestrator: for one content identifier, translates all
/// configured fields into all configured target languages and persists
/// the results. Explicitly constructed and passed around; no ambient
/// global instance exists.
pub struct Orchestrator {
    config: Config,
    store: Arc<dyn ContentStore>,
    provider: Arc<dyn ChatProvider>,
    seo: Option<SeoFields>,
}

impl Orchestrator {
    /// Create an orchestrator over a store and a provider
    pub fn new(config: Config, store: Arc<dyn ContentStore>, provider: Arc<dyn ChatProvider>) -> Self {
        let seo = SeoFields::for_integration(config.seo);
        Self {
            config,
            store,
            provider,
            seo,
        }
    }

    /// Translate one content item into every configured target language.
    ///
    /// Global preconditions (credentials, valid source) fail the whole run;
    /// everything after that is caught per language and per field, so one
    /// failing field never prevents the remaining languages from being
    /// attempted. Re-running with unchanged inputs overwrites rows with
    /// identical values.
    pub async fn translate_content(&self, content_id: u64) -> Result<TranslationReport, TranslateError> {
        self.translate_content_with_progress(content_id, |_| {}).await
    }

    /// Same as `translate_content`, invoking `on_language` before each
    /// language is processed (progress reporting hook)
    pub async fn translate_content_with_progress(
        &self,
        content_id: u64,
        on_language: impl Fn(&str) + Send,
    ) -> Result<TranslationReport, TranslateError> {
        if self.config.provider.api_key.trim().is_empty() {
            return Err(TranslateError::MissingCredentials);
        }

        let content = match self.store.get_content(content_id) {
            Ok(content) => content,
            Err(StoreError::NotFound(_)) => return Err(TranslateError::InvalidSource(content_id)),
            Err(e) => return Err(TranslateError::Store(e)),
        };
        if content.status == ContentStatus::Draft {
            return Err(TranslateError::InvalidSource(content_id));
        }

        let source_seo = match &self.seo {
            Some(fields) => fields.read(self.store.as_ref(), content_id)?,
            None => SeoMeta::default(),
        };

        let targets = self.config.target_language_codes();
        if targets.is_empty() {
            debug!("No target languages configured, running index maintenance only");
        }

        let mut report = TranslationReport::default();
        for lang in &targets {
            on_language(lang);
            info!(
                "Translating content {} into {} ({})",
                content_id,
                language::language_name(lang),
                lang
            );
            let outcome = self.translate_language(&content, &source_seo, lang).await;
            if !outcome.success {
                warn!("Language {} finished with errors: {}", lang, outcome.message);
            }
            report.outcomes.insert(lang.clone(), outcome);
        }

        // Always recompute the slug set, even on an empty language list
        if let Err(e) = self.refresh_slug_set(&content) {
            error!("Failed to refresh slug set for content {}: {}", content_id, e);
        }

        Ok(report)
    }

    /// Process one target language: translate each field independently,
    /// persist the row, maintain the language index. Never returns an
    /// error; failures end up in the outcome.
    async fn translate_language(
        &self,
        content: &ContentRecord,
        source_seo: &SeoMeta,
        lang: &str,
    ) -> LanguageOutcome {
        let mut errors: Vec<String> = Vec::new();

        let short_system = prompts::render_system_prompt(&self.config.common.system_prompt, lang);
        let html_template = if self.config.common.html_system_prompt.is_empty() {
            prompts::HTML_SYSTEM_PROMPT
        } else {
            self.config.common.html_system_prompt.as_str()
        };
        let html_system = prompts::render_system_prompt(html_template, lang);

        // Title: short-string prompt, wrapping quotes stripped afterwards
        let title = match self
            .complete(&short_system, prompts::title_user_prompt(&content.title))
            .await
        {
            Ok(text) => Some(prompts::strip_wrapping_quotes(&text)),
            Err(e) => {
                error!("Title translation failed for {}: {}", lang, e);
                errors.push(format!("title: {}", e));
                None
            }
        };

        // Body: HTML prompt, result kept verbatim
        let body = if content.body.trim().is_empty() {
            None
        } else {
            let prepared = prompts::strip_block_delimiters(&content.body);
            match self.complete(&html_system, prepared).await {
                Ok(text) => Some(text),
                Err(e) => {
                    error!("Body translation failed for {}: {}", lang, e);
                    errors.push(format!("body: {}", e));
                    None
                }
            }
        };

        // Extra HTML fields, each independent
        let mut extra_html = BTreeMap::new();
        for (name, html) in &content.extra_html {
            if html.trim().is_empty() {
                continue;
            }
            let prepared = prompts::strip_block_delimiters(html);
            match self.complete(&html_system, prepared).await {
                Ok(text) => {
                    extra_html.insert(name.clone(), text);
                }
                Err(e) => {
                    error!("Field '{}' translation failed for {}: {}", name, lang, e);
                    errors.push(format!("{}: {}", name, e));
                }
            }
        }

        // SEO fields, only when the source carries them
        let seo_title = match &source_seo.title {
            Some(text) => match self
                .complete(&short_system, prompts::seo_title_user_prompt(text))
                .await
            {
                Ok(translated) => Some(prompts::strip_wrapping_quotes(&translated)),
                Err(e) => {
                    error!("SEO title translation failed for {}: {}", lang, e);
                    errors.push(format!("seo_title: {}", e));
                    None
                }
            },
            None => None,
        };
        let seo_description = match &source_seo.description {
            Some(text) => match self
                .complete(&short_system, prompts::seo_description_user_prompt(text))
                .await
            {
                Ok(translated) => Some(prompts::strip_wrapping_quotes(&translated)),
                Err(e) => {
                    error!("SEO description translation failed for {}: {}", lang, e);
                    errors.push(format!("seo_description: {}", e));
                    None
                }
            },
            None => None,
        };

        let translated_anything = title.is_some()
            || body.is_some()
            || !extra_html.is_empty()
            || seo_title.is_some()
            || seo_description.is_some();
        if !translated_anything {
            return LanguageOutcome {
                success: false,
                message: errors.join("; "),
                row_id: None,
            };
        }

        let existed = self
            .store
            .translation_rows(content.id)
            .map(|rows| rows.iter().any(|row| row.language == lang))
            .unwrap_or(false);

        let row = TranslationRow {
            language: lang.to_string(),
            title: title.clone(),
            body,
            extra_html,
            seo_title: seo_title.clone(),
            seo_description: seo_description.clone(),
            translated_at: Utc::now(),
        };

        let row_id = match self.store.upsert_translation(content.id, row) {
            Ok(row_id) => Some(row_id),
            Err(e) => {
                error!("Failed to persist translation row for {}: {}", lang, e);
                errors.push(format!("persistence: {}", e));
                None
            }
        };

        if let Some(fields) = &self.seo {
            if let Err(e) = fields.write_localized(
                self.store.as_ref(),
                content.id,
                lang,
                seo_title.as_deref(),
                seo_description.as_deref(),
            ) {
                error!("Failed to mirror SEO meta for {}: {}", lang, e);
                errors.push(format!("seo meta: {}", e));
            }
        }

        // Language index maintenance only once a row actually exists
        if row_id.is_some() {
            let index_title = title.clone().unwrap_or_else(|| content.title.clone());
            if let Err(e) = self.ensure_language_indexed(content, lang, &index_title).await {
                error!("Failed to index language {} for content {}: {}", lang, content.id, e);
                errors.push(format!("language index: {}", e));
            }
        }

        let message = if errors.is_empty() {
            if existed { "Updated".to_string() } else { "Created".to_string() }
        } else {
            errors.join("; ")
        };

        LanguageOutcome {
            success: errors.is_empty() && row_id.is_some(),
            message,
            row_id,
        }
    }

    /// Append a language index row if no analog of the target language
    /// exists yet. Slug derivation falls through a three-tier chain and
    /// never yields an empty slug.
    async fn ensure_language_indexed(
        &self,
        content: &ContentRecord,
        lang: &str,
        translated_title: &str,
    ) -> Result<(), StoreError> {
        let index = self.store.language_index(content.id)?;
        if index.iter().any(|row| row.code == lang) {
            return Ok(());
        }

        let model_slug = if language::uses_latin_script(lang) {
            None
        } else {
            let system = prompts::render_system_prompt(prompts::NATIVE_SLUG_SYSTEM_PROMPT, lang);
            match self
                .complete(&system, prompts::native_slug_user_prompt(translated_title))
                .await
            {
                Ok(raw) => Some(raw),
                Err(e) => {
                    // Not fatal, the chain falls through to slugified title
                    warn!("Native slug request failed for {}: {}", lang, e);
                    None
                }
            }
        };

        let slug = slug::resolve_slug(model_slug.as_deref(), translated_title, content.id, lang);
        debug!("Indexing language {} with slug '{}'", lang, slug);
        self.store.append_language_index(
            content.id,
            LanguageIndexRow {
                code: lang.to_string(),
                title: translated_title.to_string(),
                slug,
            },
        )
    }

    /// Recompute the global slug set from the source slug and the full
    /// language index, deduplicate preserving order, and persist both the
    /// newline-joined and the array form.
    fn refresh_slug_set(&self, content: &ContentRecord) -> Result<(), StoreError> {
        let mut slugs: Vec<String> = Vec::new();
        if !content.slug.is_empty() {
            slugs.push(content.slug.clone());
        }
        for row in self.store.language_index(content.id)? {
            if !row.slug.is_empty() && !slugs.contains(&row.slug) {
                slugs.push(row.slug);
            }
        }

        self.store.set_meta(
            content.id,
            FIELD_KNOWN_SLUGS,
            Value::String(slugs.join("\n")),
        )?;
        self.store.set_meta(
            content.id,
            FIELD_KNOWN_SLUGS_LIST,
            Value::Array(slugs.into_iter().map(Value::String).collect()),
        )
    }

    async fn complete(&self, system: &str, user: String) -> Result<String, ProviderError> {
        self.provider
            .complete(ChatRequest {
                model: self.config.provider.model.clone(),
                system: system.to_string(),
                user,
                temperature: self.config.common.temperature,
                max_tokens: self.config.common.max_tokens,
            })
            .await
    }
}
