/*!
 * Translation workflow for editorial content.
 *
 * Split into three submodules:
 *
 * - `prompts`: system/user prompt assembly and short-field cleanup
 * - `slug`: slug derivation with its fallback chain
 * - `orchestrator`: the per-content, per-language translation loop
 */

// Re-export main types for easier usage
pub use self::orchestrator::{LanguageOutcome, Orchestrator, TranslationReport};

// Submodules
pub mod orchestrator;
pub mod prompts;
pub mod slug;
