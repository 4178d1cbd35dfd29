//! # interceptor-lint-php
//!
//! Tree-sitter based PHP support for interceptor-lint.
//!
//! [`PhpExtractor`] implements [`LanguageExtractor`] for PHP sources. It
//! flattens the syntax tree into the token stream rules consume: every
//! function, method, closure, and arrow function becomes a declaration, and
//! every `return` statement becomes a token owned by its innermost enclosing
//! declaration.
//!
//! [`LanguageExtractor`]: interceptor_lint_core::LanguageExtractor

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod php;

pub use php::PhpExtractor;
