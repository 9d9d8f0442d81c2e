use serde_json::Value;

use crate::app_config::SeoIntegration;
use crate::errors::StoreError;
use crate::store::ContentStore;

/// SEO metadata access strategy.
///
/// The integration is chosen once at startup from configuration; each
/// named integration just fixes which meta keys carry the SEO title and
/// description. No runtime probing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeoFields {
    title_key: &'static str,
    description_key: &'static str,
}

/// Source SEO values read for one content item
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SeoMeta {
    pub title: Option<String>,
    pub description: Option<String>,
}

impl SeoFields {
    /// Resolve the strategy for the configured integration.
    /// `None` integration means SEO fields are skipped entirely.
    pub fn for_integration(integration: SeoIntegration) -> Option<Self> {
        match integration {
            SeoIntegration::None => None,
            SeoIntegration::Yoast => Some(Self {
                title_key: "_yoast_wpseo_title",
                description_key: "_yoast_wpseo_metadesc",
            }),
            SeoIntegration::RankMath => Some(Self {
                title_key: "rank_math_title",
                description_key: "rank_math_description",
            }),
        }
    }

    /// Meta key holding the SEO title
    pub fn title_key(&self) -> &'static str {
        self.title_key
    }

    /// Meta key holding the SEO description
    pub fn description_key(&self) -> &'static str {
        self.description_key
    }

    /// Read the source SEO values for a content item. Missing or
    /// non-string values read as absent.
    pub fn read(&self, store: &dyn ContentStore, id: u64) -> Result<SeoMeta, StoreError> {
        let read_string = |key: &str| -> Result<Option<String>, StoreError> {
            Ok(store
                .get_meta(id, key)?
                .and_then(|v| v.as_str().map(|s| s.to_string()))
                .filter(|s| !s.is_empty()))
        };
        Ok(SeoMeta {
            title: read_string(self.title_key)?,
            description: read_string(self.description_key)?,
        })
    }

    /// Mirror translated SEO values into language-suffixed meta keys on the
    /// source content, so the SEO integration can pick them up per language.
    /// Empty values are not written.
    pub fn write_localized(
        &self,
        store: &dyn ContentStore,
        id: u64,
        language: &str,
        title: Option<&str>,
        description: Option<&str>,
    ) -> Result<(), StoreError> {
        if let Some(title) = title.filter(|t| !t.is_empty()) {
            let key = format!("{}_{}", self.title_key, language);
            store.set_meta(id, &key, Value::String(title.to_string()))?;
        }
        if let Some(description) = description.filter(|d| !d.is_empty()) {
            let key = format!("{}_{}", self.description_key, language);
            store.set_meta(id, &key, Value::String(description.to_string()))?;
        }
        Ok(())
    }
}
