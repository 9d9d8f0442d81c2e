/*!
 * Prompt assembly for content translation.
 *
 * Two system prompt flavors exist: a short generic "translate fluently"
 * instruction for titles and SEO strings, and a detailed HTML-preserving
 * instruction set for body content. Both carry `{language_name}` and
 * `{language_code}` placeholders substituted at call time.
 */

use once_cell::sync::Lazy;
use regex::Regex;

use crate::language;

/// Default system prompt for short strings (titles, SEO fields)
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are a highly skilled translation assistant. Translate the following text accurately and fluently into {language_name} ({language_code}). Maintain the original meaning and tone. Do not add any extra commentary, just provide the translation.";

/// System prompt for HTML body content. The model must return raw HTML
/// with structure intact and nothing else.
pub const HTML_SYSTEM_PROMPT: &str = r#"You are an expert HTML translator. Your task is to translate the text content within the following HTML document into {language_name} ({language_code}).

RULES:
1. PRESERVE HTML STRUCTURE: Maintain the exact same HTML tags, structure, and attributes as the original document. DO NOT change, add, or remove any HTML tags or attributes (like class, id, style, etc.), except as noted below.
2. TRANSLATE TEXT ONLY: Only translate the actual text content found between HTML tags (e.g., inside <p>, <li>, <h1>, <span>) and text nodes directly within the body.
3. DO NOT TRANSLATE TAG/ATTRIBUTE NAMES: Never translate the names of HTML tags (e.g., `<p>`, `<div>`, `<span>`) or attribute names (e.g., `class=`, `href=`).
4. TRANSLATE SPECIFIC ATTRIBUTE VALUES: You SHOULD translate the TEXT VALUE of the 'alt' attribute in <img> tags and the 'title' attribute in <a> and other relevant tags. Leave values of other attributes like 'href', 'src', 'class', 'id', 'style' completely untouched.
5. HANDLE HTML ENTITIES: Preserve HTML entities like &nbsp;, &amp;, &lt;, &gt; exactly as they are in the original.
6. IGNORE CODE/PRE TAGS: If you encounter text within <code> or <pre> tags, leave that specific text completely untranslated.
7. SHORTCODES: If you see content like `[shortcode attr="value"]...[/shortcode]` or `[shortcode]`, leave the entire shortcode block (including attributes and enclosed content if any) exactly as it is, without translating any part of it.
8. IGNORE HTML COMMENTS: Preserve HTML comments (`<!-- ... -->`) exactly as they are, without translating their content.
9. VALID OUTPUT: Return ONLY the fully translated HTML document. The output must be valid HTML. Do not include any extra text, explanations, apologies, or markdown formatting like ```html ... ``` around the code. Just the raw translated HTML."#;

/// Prompt asking the model for a short native-script URL slug.
/// Used for non-Latin-script target languages only.
pub const NATIVE_SLUG_SYSTEM_PROMPT: &str = "You produce URL slugs. Given a title, respond with a short slug in the native script of {language_name} ({language_code}), using only letters, digits and hyphens. Respond with the slug only, no commentary.";

// Editor block delimiter comments are stripped from the body before
// translation; the model must never see them.
static BLOCK_DELIMITER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)<!--\s*/?wp:.*?-->").expect("valid block delimiter regex"));

/// Substitute the `{language_name}` / `{language_code}` placeholders of a
/// system prompt template for a target language.
pub fn render_system_prompt(template: &str, language_code: &str) -> String {
    let name = language::language_name(language_code);
    template
        .replace("{language_name}", &name)
        .replace("{language_code}", language_code)
}

/// User prompt for a title field
pub fn title_user_prompt(title: &str) -> String {
    format!("Translate this title: {}", title)
}

/// User prompt for an SEO meta title
pub fn seo_title_user_prompt(seo_title: &str) -> String {
    format!("Translate this SEO meta title: {}", seo_title)
}

/// User prompt for an SEO meta description
pub fn seo_description_user_prompt(seo_description: &str) -> String {
    format!("Translate this SEO meta description: {}", seo_description)
}

/// User prompt for the native-script slug request
pub fn native_slug_user_prompt(title: &str) -> String {
    format!("Title: {}", title)
}

/// Strip editor block delimiter comments from body HTML before translation
pub fn strip_block_delimiters(body: &str) -> String {
    BLOCK_DELIMITER_RE.replace_all(body, "").into_owned()
}

/// Strip the wrapping quotation marks models like to add around short
/// translations. Only for short fields; HTML bodies are left untouched.
pub fn strip_wrapping_quotes(text: &str) -> String {
    text.trim_matches(|c| c == ' ' || c == '"' || c == '\'' || c == '\u{201c}' || c == '\u{201d}')
        .to_string()
}
