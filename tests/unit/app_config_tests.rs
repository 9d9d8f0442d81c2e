/*!
 * Tests for application configuration functionality
 */

use lingopress::app_config::{Config, LogLevel, SeoIntegration};

use crate::common;

/// Test default configuration values
#[test]
fn test_default_config_withNoParameters_shouldHaveCorrectDefaults() {
    let config = Config::default();

    assert_eq!(config.source_language, "en");
    assert_eq!(config.target_languages, "");
    assert_eq!(config.provider.model, "gpt-4o-mini");
    assert_eq!(config.provider.api_key, "");
    assert_eq!(config.provider.endpoint, "https://api.openai.com/v1");
    assert_eq!(config.provider.timeout_secs, 90);
    assert!((config.common.temperature - 0.5).abs() < f32::EPSILON);
    assert_eq!(config.common.max_tokens, 3000);
    assert!(config.common.html_system_prompt.is_empty());
    assert!(config.common.system_prompt.contains("{language_name}"));
    assert_eq!(config.seo, SeoIntegration::Yoast);
    assert_eq!(config.log_level, LogLevel::Info);
}

#[test]
fn test_target_language_codes_withDuplicatesAndInvalid_shouldFilterAndDedupe() {
    let config = common::test_config("es, fr, es, notalang, Spanish!, de, xx");

    let codes = config.target_language_codes();

    assert_eq!(codes, vec!["es", "fr", "de"]);
}

#[test]
fn test_target_language_codes_withEmptyString_shouldReturnEmptyList() {
    let config = common::test_config("");
    assert!(config.target_language_codes().is_empty());
}

#[test]
fn test_validate_withMissingApiKey_shouldFail() {
    let config = Config::default();
    assert!(config.validate().is_err());
}

#[test]
fn test_validate_withInvalidTemperature_shouldFail() {
    let mut config = common::test_config("es");
    config.common.temperature = 1.5;
    assert!(config.validate().is_err());
}

#[test]
fn test_validate_withInvalidEndpoint_shouldFail() {
    let mut config = common::test_config("es");
    config.provider.endpoint = "not a url".to_string();
    assert!(config.validate().is_err());
}

#[test]
fn test_validate_withValidConfig_shouldPass() {
    let config = common::test_config("es, fr");
    assert!(config.validate().is_ok());
}

#[test]
fn test_from_file_withMissingFile_shouldCreateDefaultConfig() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("conf.json");

    let config = Config::from_file(&path).unwrap();

    assert!(path.exists());
    assert_eq!(config.provider.model, "gpt-4o-mini");
}

#[test]
fn test_config_file_roundtrip_shouldPreserveValues() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("conf.json");

    let mut config = common::test_config("es, ar");
    config.provider.model = "gpt-4o".to_string();
    config.common.max_tokens = 1234;
    config.seo = SeoIntegration::RankMath;
    config.to_file(&path).unwrap();

    let loaded = Config::from_file(&path).unwrap();
    assert_eq!(loaded.target_languages, "es, ar");
    assert_eq!(loaded.provider.model, "gpt-4o");
    assert_eq!(loaded.provider.api_key, "test-api-key");
    assert_eq!(loaded.common.max_tokens, 1234);
    assert_eq!(loaded.seo, SeoIntegration::RankMath);
}

#[test]
fn test_seo_integration_fromStr_shouldParseKnownNames() {
    assert_eq!("none".parse::<SeoIntegration>().unwrap(), SeoIntegration::None);
    assert_eq!("Yoast".parse::<SeoIntegration>().unwrap(), SeoIntegration::Yoast);
    assert_eq!("rankmath".parse::<SeoIntegration>().unwrap(), SeoIntegration::RankMath);
    assert!("unknown".parse::<SeoIntegration>().is_err());
}
