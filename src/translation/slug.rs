/*!
 * Slug derivation for language index rows.
 *
 * Latin-script languages slugify the translated title directly. Non-Latin
 * languages get a model-provided native-script slug, cleaned down to
 * letters, digits and hyphens. Either path falls back to a slug derived
 * from the content id and language code, so the result is never empty.
 */

/// ASCII slugify: lowercase, keep alphanumerics, collapse everything else
/// into single hyphens. Non-ASCII characters are dropped, so a fully
/// non-Latin title slugifies to an empty string.
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_hyphen = false;
    for c in text.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_hyphen = true;
        }
    }
    slug
}

/// Clean a model-provided native-script slug: keep letters (any script),
/// digits and hyphens; collapse separator runs; trim hyphens.
pub fn clean_native_slug(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_hyphen = false;
    for c in text.trim().chars() {
        if c.is_alphanumeric() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(c);
        } else {
            pending_hyphen = true;
        }
    }
    slug
}

/// Last-resort slug from the content id and language code. Always non-empty.
pub fn fallback_slug(content_id: u64, language_code: &str) -> String {
    format!("{}-{}", content_id, language_code)
}

/// Resolve the final slug for a language index row through the fallback
/// chain: cleaned model slug, slugified translated title, id-and-code slug.
pub fn resolve_slug(
    model_slug: Option<&str>,
    translated_title: &str,
    content_id: u64,
    language_code: &str,
) -> String {
    if let Some(raw) = model_slug {
        let cleaned = clean_native_slug(raw);
        if !cleaned.is_empty() {
            return cleaned;
        }
    }
    let from_title = slugify(translated_title);
    if !from_title.is_empty() {
        return from_title;
    }
    fallback_slug(content_id, language_code)
}
