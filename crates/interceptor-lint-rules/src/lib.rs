//! # interceptor-lint-rules
//!
//! Built-in lint rules for interceptor-lint.
//!
//! ## Available Rules
//!
//! | Code | Name | Description |
//! |------|------|-------------|
//! | PluginError | `plugin-method` | Validates `before*`/`around*`/`after*` plugin methods |
//!
//! ## Usage
//!
//! ```ignore
//! use interceptor_lint_core::Analyzer;
//! use interceptor_lint_php::PhpExtractor;
//! use interceptor_lint_rules::PluginMethod;
//!
//! let analyzer = Analyzer::builder()
//!     .root("./app/code")
//!     .extractor(PhpExtractor::new())
//!     .rule(PluginMethod::new().exclude("aroundDispatch"))
//!     .build()?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod plugin_method;
mod presets;

pub use plugin_method::{classify, is_plugin_path, MethodKind, PluginMethod};
pub use presets::{all_rules, rules_from_config};

/// Re-export core types for convenience.
pub use interceptor_lint_core::{Rule, Severity, Violation};
