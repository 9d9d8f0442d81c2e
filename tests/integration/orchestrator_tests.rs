/*!
 * End-to-end tests for the translation orchestration workflow, driven
 * through mock providers against an in-memory store
 */

use serde_json::json;
use std::sync::{Arc, Mutex};

use lingopress::app_config::SeoIntegration;
use lingopress::errors::TranslateError;
use lingopress::providers::mock::MockProvider;
use lingopress::providers::ChatProvider;
use lingopress::store::{ContentStatus, ContentStore, MemoryStore};
use lingopress::translation::Orchestrator;

use crate::common;

fn orchestrator_with(
    store: &Arc<MemoryStore>,
    provider: &Arc<MockProvider>,
    targets: &str,
) -> Orchestrator {
    Orchestrator::new(
        common::test_config(targets),
        Arc::clone(store) as Arc<dyn ContentStore>,
        Arc::clone(provider) as Arc<dyn ChatProvider>,
    )
}

#[tokio::test]
async fn test_translate_content_withTwoLanguages_shouldProduceOneOutcomePerLanguage() {
    let store = common::seeded_store(vec![common::sample_content(42)]);
    let provider = Arc::new(MockProvider::working());
    let orchestrator = orchestrator_with(&store, &provider, "es, ar");

    let report = orchestrator.translate_content(42).await.unwrap();

    let codes: Vec<&str> = report.outcomes.keys().map(|k| k.as_str()).collect();
    assert_eq!(codes, vec!["ar", "es"]);
    for (lang, outcome) in &report.outcomes {
        assert!(outcome.success, "language {} failed: {}", lang, outcome.message);
        assert_eq!(outcome.message, "Created");
        assert_eq!(outcome.row_id.as_deref(), Some(format!("42:{}", lang).as_str()));
    }

    let rows = store.translation_rows(42).unwrap();
    assert_eq!(rows.len(), 2);
    for row in &rows {
        assert!(row.title.is_some());
        assert!(row.body.is_some());
    }

    // Title and body per language, plus one native slug request for Arabic
    assert_eq!(provider.request_count(), 5);
}

#[tokio::test]
async fn test_translate_content_withEmptyApiKey_shouldFailBeforeAnyRequest() {
    let store = common::seeded_store(vec![common::sample_content(42)]);
    let provider = Arc::new(MockProvider::working());
    let mut config = common::test_config("es");
    config.provider.api_key = String::new();
    let orchestrator = Orchestrator::new(
        config,
        Arc::clone(&store) as Arc<dyn ContentStore>,
        Arc::clone(&provider) as Arc<dyn ChatProvider>,
    );

    let result = orchestrator.translate_content(42).await;

    assert!(matches!(result, Err(TranslateError::MissingCredentials)));
    assert_eq!(provider.request_count(), 0);
}

#[tokio::test]
async fn test_translate_content_withUnknownId_shouldFailWithInvalidSource() {
    let store = common::seeded_store(vec![]);
    let provider = Arc::new(MockProvider::working());
    let orchestrator = orchestrator_with(&store, &provider, "es");

    let result = orchestrator.translate_content(99).await;

    assert!(matches!(result, Err(TranslateError::InvalidSource(99))));
}

#[tokio::test]
async fn test_translate_content_withDraftContent_shouldFailWithInvalidSource() {
    let mut record = common::sample_content(42);
    record.status = ContentStatus::Draft;
    let store = common::seeded_store(vec![record]);
    let provider = Arc::new(MockProvider::working());
    let orchestrator = orchestrator_with(&store, &provider, "es");

    let result = orchestrator.translate_content(42).await;

    assert!(matches!(result, Err(TranslateError::InvalidSource(42))));
    assert_eq!(provider.request_count(), 0);
}

#[tokio::test]
async fn test_translate_content_runTwice_shouldOverwriteRowsNotDuplicate() {
    let store = common::seeded_store(vec![common::sample_content(42)]);
    let provider = Arc::new(MockProvider::working());
    let orchestrator = orchestrator_with(&store, &provider, "es, ar");

    let first = orchestrator.translate_content(42).await.unwrap();
    let second = orchestrator.translate_content(42).await.unwrap();

    for outcome in first.outcomes.values() {
        assert_eq!(outcome.message, "Created");
    }
    for outcome in second.outcomes.values() {
        assert_eq!(outcome.message, "Updated");
    }

    let rows = store.translation_rows(42).unwrap();
    assert_eq!(rows.len(), 2);
    let index = store.language_index(42).unwrap();
    assert_eq!(index.len(), 2);

    // Identical inputs give identical persisted values on the second run
    let first_titles: Vec<_> = rows.iter().map(|r| (r.language.clone(), r.title.clone())).collect();
    let third = orchestrator.translate_content(42).await.unwrap();
    assert_eq!(third.outcomes.len(), 2);
    let rows_after: Vec<_> = store
        .translation_rows(42)
        .unwrap()
        .iter()
        .map(|r| (r.language.clone(), r.title.clone()))
        .collect();
    assert_eq!(rows_after, first_titles);
}

#[tokio::test]
async fn test_translate_content_withOneFailingLanguage_shouldNotBlockOthers() {
    let store = common::seeded_store(vec![common::sample_content(42)]);
    let provider = Arc::new(MockProvider::failing_when_contains("Spanish"));
    let orchestrator = orchestrator_with(&store, &provider, "es, ar");

    let report = orchestrator.translate_content(42).await.unwrap();

    let es = report.outcomes.get("es").unwrap();
    assert!(!es.success);
    assert!(es.message.contains("title:"));
    assert_eq!(es.row_id, None);

    let ar = report.outcomes.get("ar").unwrap();
    assert!(ar.success, "arabic failed: {}", ar.message);
    assert_eq!(ar.row_id.as_deref(), Some("42:ar"));

    let rows = store.translation_rows(42).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].language, "ar");

    // No row written, so the failing language is not indexed either
    let index = store.language_index(42).unwrap();
    assert_eq!(index.len(), 1);
    assert_eq!(index[0].code, "ar");
}

#[tokio::test]
async fn test_translate_content_withEmptyTargetList_shouldOnlyMaintainSlugSet() {
    let store = common::seeded_store(vec![common::sample_content(42)]);
    let provider = Arc::new(MockProvider::working());
    let orchestrator = orchestrator_with(&store, &provider, "");

    let report = orchestrator.translate_content(42).await.unwrap();

    assert!(report.outcomes.is_empty());
    assert_eq!(provider.request_count(), 0);
    assert_eq!(store.get_meta(42, "known_slugs").unwrap(), Some(json!("welcome")));
    assert_eq!(
        store.get_meta(42, "known_slugs_list").unwrap(),
        Some(json!(["welcome"]))
    );
}

#[tokio::test]
async fn test_translate_content_shouldCollectSlugsFromSourceAndIndex() {
    let store = common::seeded_store(vec![common::sample_content(42)]);
    let provider = Arc::new(MockProvider::working());
    let orchestrator = orchestrator_with(&store, &provider, "es");

    orchestrator.translate_content(42).await.unwrap();

    let index = store.language_index(42).unwrap();
    assert_eq!(index.len(), 1);
    let es_slug = index[0].slug.clone();
    assert!(!es_slug.is_empty());

    let joined = store.get_meta(42, "known_slugs").unwrap().unwrap();
    let joined = joined.as_str().unwrap();
    let slugs: Vec<&str> = joined.split('\n').collect();
    assert_eq!(slugs[0], "welcome");
    assert!(slugs.contains(&es_slug.as_str()));

    let list = store.get_meta(42, "known_slugs_list").unwrap().unwrap();
    assert_eq!(list.as_array().unwrap().len(), slugs.len());
}

#[tokio::test]
async fn test_translate_content_withNonLatinLanguage_shouldRequestNativeSlug() {
    let store = common::seeded_store(vec![common::sample_content(42)]);
    let provider = Arc::new(
        MockProvider::working().with_custom_response(|req| {
            if req.system.contains("URL slugs") {
                "مرحبا بكم".to_string()
            } else {
                req.user.clone()
            }
        }),
    );
    let orchestrator = orchestrator_with(&store, &provider, "ar");

    orchestrator.translate_content(42).await.unwrap();

    let index = store.language_index(42).unwrap();
    assert_eq!(index.len(), 1);
    assert_eq!(index[0].code, "ar");
    assert_eq!(index[0].slug, "مرحبا-بكم");
}

#[tokio::test]
async fn test_translate_content_withEmptyCompletions_shouldStillProduceNonEmptySlug() {
    let store = common::seeded_store(vec![common::sample_content(42)]);
    let provider = Arc::new(MockProvider::empty());
    let orchestrator = orchestrator_with(&store, &provider, "es");

    orchestrator.translate_content(42).await.unwrap();

    let index = store.language_index(42).unwrap();
    assert_eq!(index.len(), 1);
    assert_eq!(index[0].slug, "42-es");
}

#[tokio::test]
async fn test_translate_content_withSeoMeta_shouldTranslateAndMirrorIt() {
    let store = common::seeded_store(vec![common::sample_content(42)]);
    store
        .set_meta(42, "_yoast_wpseo_title", json!("Welcome | Site"))
        .unwrap();
    store
        .set_meta(42, "_yoast_wpseo_metadesc", json!("A welcome page"))
        .unwrap();
    let provider = Arc::new(MockProvider::working());
    let orchestrator = orchestrator_with(&store, &provider, "es");

    let report = orchestrator.translate_content(42).await.unwrap();

    assert!(report.outcomes.get("es").unwrap().success);
    // Title, body, SEO title, SEO description
    assert_eq!(provider.request_count(), 4);

    let rows = store.translation_rows(42).unwrap();
    assert!(rows[0].seo_title.is_some());
    assert!(rows[0].seo_description.is_some());

    let mirrored = store.get_meta(42, "_yoast_wpseo_title_es").unwrap();
    assert!(mirrored.is_some());
}

#[tokio::test]
async fn test_translate_content_withSeoDisabled_shouldSkipSeoRequests() {
    let store = common::seeded_store(vec![common::sample_content(42)]);
    store
        .set_meta(42, "_yoast_wpseo_title", json!("Welcome | Site"))
        .unwrap();
    let provider = Arc::new(MockProvider::working());
    let mut config = common::test_config("es");
    config.seo = SeoIntegration::None;
    let orchestrator = Orchestrator::new(
        config,
        Arc::clone(&store) as Arc<dyn ContentStore>,
        Arc::clone(&provider) as Arc<dyn ChatProvider>,
    );

    orchestrator.translate_content(42).await.unwrap();

    // Title and body only
    assert_eq!(provider.request_count(), 2);
    let rows = store.translation_rows(42).unwrap();
    assert_eq!(rows[0].seo_title, None);
    assert_eq!(store.get_meta(42, "_yoast_wpseo_title_es").unwrap(), None);
}

#[tokio::test]
async fn test_translate_content_withExtraHtmlFields_shouldTranslateEachIndependently() {
    let mut record = common::sample_content(42);
    record
        .extra_html
        .insert("sidebar".to_string(), "<p>Side text</p>".to_string());
    record.extra_html.insert("footer".to_string(), String::new());
    let store = common::seeded_store(vec![record]);
    let provider = Arc::new(MockProvider::working());
    let orchestrator = orchestrator_with(&store, &provider, "es");

    let report = orchestrator.translate_content(42).await.unwrap();

    assert!(report.outcomes.get("es").unwrap().success);
    let rows = store.translation_rows(42).unwrap();
    // The empty footer field is skipped, not translated to an empty string
    assert_eq!(rows[0].extra_html.len(), 1);
    assert!(rows[0].extra_html.contains_key("sidebar"));
}

#[tokio::test]
async fn test_translate_content_with_progress_shouldReportEachLanguageInOrder() {
    let store = common::seeded_store(vec![common::sample_content(42)]);
    let provider = Arc::new(MockProvider::working());
    let orchestrator = orchestrator_with(&store, &provider, "fr, es");

    let seen = Mutex::new(Vec::new());
    orchestrator
        .translate_content_with_progress(42, |lang| {
            seen.lock().unwrap().push(lang.to_string());
        })
        .await
        .unwrap();

    assert_eq!(*seen.lock().unwrap(), vec!["fr", "es"]);
}
