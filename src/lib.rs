/*!
 * # lingopress
 *
 * A Rust tool for automatic translation of structured editorial content
 * using chat-completion LLM APIs.
 *
 * ## Features
 *
 * - Translate titles, HTML bodies and SEO metadata per target language
 * - HTML-preserving prompts: tags, shortcodes and code blocks survive
 * - Language index with per-language URL slugs (native-script aware)
 * - Language-keyed translation rows, overwritten on every re-run
 * - Public field-name exposure over an opaque-key storage layout
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `store`: Content storage surface (memory and JSON-file backed)
 * - `translation`: The orchestration workflow:
 *   - `translation::orchestrator`: per-content, per-language loop
 *   - `translation::prompts`: prompt assembly
 *   - `translation::slug`: slug derivation
 * - `providers`: Chat-completion clients (OpenAI-compatible, mock)
 * - `publish`: Field-key mapping for public reads/writes
 * - `seo`: SEO metadata integration strategies
 * - `language`: ISO language code utilities
 * - `controller`: Main application controller
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod controller;
pub mod errors;
pub mod language;
pub mod providers;
pub mod publish;
pub mod seo;
pub mod store;
pub mod translation;

// Re-export main types for easier usage
pub use app_config::Config;
pub use controller::Controller;
pub use errors::{AppError, ProviderError, StoreError, TranslateError};
pub use publish::FieldKeyMap;
pub use store::{ContentRecord, ContentStore, JsonStore, MemoryStore};
pub use translation::{LanguageOutcome, Orchestrator, TranslationReport};
