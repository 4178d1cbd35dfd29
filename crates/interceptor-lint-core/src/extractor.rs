//! Language extraction trait.
//!
//! `LanguageExtractor` is the extension point for adding new languages.
//! Implement it to turn raw source text into the [`TokenStream`] that rules
//! consume.

use crate::source::TokenStream;

/// Errors raised while extracting a token stream.
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    /// The parser could not be configured for the language.
    #[error("failed to load {language} grammar: {message}")]
    Language {
        /// Language identifier.
        language: &'static str,
        /// Underlying error message.
        message: String,
    },

    /// The parser produced no syntax tree.
    #[error("failed to parse {language} source")]
    Parse {
        /// Language identifier.
        language: &'static str,
    },
}

/// Trait for language-specific extraction.
pub trait LanguageExtractor: Send + Sync {
    /// Language identifier (e.g., `"php"`).
    fn language_id(&self) -> &'static str;

    /// File extensions this extractor handles, without the dot
    /// (e.g., `&["php", "phtml"]`).
    fn extensions(&self) -> &'static [&'static str];

    /// Extracts tokens and declarations from source code.
    ///
    /// # Errors
    ///
    /// Returns an error if the source cannot be parsed at all. Recoverable
    /// syntax errors still produce a best-effort stream.
    fn extract(&self, source: &str) -> Result<TokenStream, ExtractError>;
}

/// Type alias for boxed extractor trait objects.
pub type ExtractorBox = Box<dyn LanguageExtractor>;
