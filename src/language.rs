use anyhow::{Result, anyhow};
use isolang::Language;
use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Language utilities for ISO language code handling
///
/// This module validates ISO 639-1/639-2 target language codes, resolves
/// display names for prompt construction, and decides which slug derivation
/// path a language takes based on its writing system.
/// Display-name overrides for the most common target languages.
/// Anything not listed falls back to the isolang English name, then to the
/// uppercased code itself.
static COMMON_NAMES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("es", "Spanish"),
        ("fr", "French"),
        ("de", "German"),
        ("ru", "Russian"),
        ("it", "Italian"),
        ("ja", "Japanese"),
        ("pt", "Portuguese"),
        ("zh", "Chinese"),
        ("ar", "Arabic"),
    ])
});

/// Languages whose customary orthography is not Latin-based. These take the
/// native-script slug path; everything else is slugified directly.
static NON_LATIN_SCRIPT: Lazy<Vec<&'static str>> = Lazy::new(|| {
    vec![
        "ar", "be", "bg", "bn", "el", "fa", "he", "hi", "hy", "ja", "ka", "kk", "km", "ko", "lo",
        "mk", "mn", "my", "ne", "ps", "ru", "sr", "ta", "te", "th", "uk", "ur", "yi", "zh",
    ]
});

/// Validate that a code is a known ISO 639-1 (2-letter) or 639-3 (3-letter) code
pub fn validate_language_code(code: &str) -> Result<()> {
    let normalized = code.trim().to_lowercase();
    let known = match normalized.len() {
        2 => Language::from_639_1(&normalized).is_some(),
        3 => Language::from_639_3(&normalized).is_some(),
        _ => false,
    };
    if known {
        Ok(())
    } else {
        Err(anyhow!("Invalid language code: {}", code))
    }
}

/// Get the display name for a language code, e.g. "es" -> "Spanish".
/// Unknown codes fall back to the uppercased code so prompt construction
/// never fails on an exotic code.
pub fn language_name(code: &str) -> String {
    let normalized = code.trim().to_lowercase();
    if let Some(name) = COMMON_NAMES.get(normalized.as_str()) {
        return (*name).to_string();
    }
    let resolved = match normalized.len() {
        2 => Language::from_639_1(&normalized),
        3 => Language::from_639_3(&normalized),
        _ => None,
    };
    match resolved {
        Some(lang) => lang.to_name().to_string(),
        None => normalized.to_uppercase(),
    }
}

/// Whether a language customarily uses a Latin-based script.
pub fn uses_latin_script(code: &str) -> bool {
    let normalized = code.trim().to_lowercase();
    !NON_LATIN_SCRIPT.contains(&normalized.as_str())
}

/// Parse a comma-separated target language string into a validated,
/// deduplicated, order-preserving list of codes.
///
/// Entries that are not 2-3 lowercase ASCII letters are silently dropped,
/// matching how the settings form sanitizes its input. An empty result is
/// legal and means "no translation, index maintenance only".
pub fn parse_target_languages(raw: &str) -> Vec<String> {
    let mut codes = Vec::new();
    for part in raw.split(',') {
        let trimmed = part.trim().to_lowercase();
        if trimmed.is_empty() {
            continue;
        }
        let shape_ok = (2..=3).contains(&trimmed.len())
            && trimmed.chars().all(|c| c.is_ascii_lowercase());
        if !shape_ok {
            continue;
        }
        if validate_language_code(&trimmed).is_err() {
            continue;
        }
        if !codes.contains(&trimmed) {
            codes.push(trimmed);
        }
    }
    codes
}
