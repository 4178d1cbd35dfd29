//! # interceptor-lint-core
//!
//! Core framework for linting interceptor (plugin) conventions.
//!
//! This crate provides the foundational traits and types for building
//! declaration-level rules over a flattened token stream. It includes:
//!
//! - [`TokenStream`] and [`Declaration`], the model extractors produce
//! - [`LanguageExtractor`] for plugging in a parser
//! - [`Rule`] and [`Reporter`] for per-declaration rules
//! - [`Analyzer`] for orchestrating lint execution
//! - [`Violation`] for representing lint findings
//!
//! ## Example
//!
//! ```ignore
//! use interceptor_lint_core::Analyzer;
//!
//! let analyzer = Analyzer::builder()
//!     .root("./app/code")
//!     .extractor(PhpExtractor::new())
//!     .rule(PluginMethod::new())
//!     .build()?;
//!
//! let result = analyzer.analyze()?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod analyzer;
mod config;
mod context;
mod extractor;
mod rule;
mod source;
mod types;

pub use analyzer::{Analyzer, AnalyzerBuilder, AnalyzerError};
pub use config::{AnalyzerConfig, Config, ConfigError, RuleConfig};
pub use context::DeclarationContext;
pub use extractor::{ExtractError, ExtractorBox, LanguageExtractor};
pub use rule::{check_file, Reporter, Rule, RuleBox, ViolationCollector};
pub use source::{
    DeclId, Declaration, DeclarationKind, Parameter, SourceFile, Span, Token, TokenKind,
    TokenRange, TokenStream,
};
pub use types::{LintResult, Location, Severity, Violation, ViolationDiagnostic};
