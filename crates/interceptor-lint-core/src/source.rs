//! Token and declaration model produced by language extractors.
//!
//! Extractors flatten a parsed file into a [`TokenStream`]: an ordered list
//! of the tokens rules care about plus the function-like declarations found
//! in the file. Every token records its owner, the innermost function-like
//! declaration enclosing it, so rules can ask "does this declaration itself
//! contain a `return`?" without walking a syntax tree.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Position of a token or declaration in the source text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Span {
    /// Line number (1-indexed).
    pub line: usize,
    /// Column number (1-indexed).
    pub column: usize,
    /// Byte offset from the start of the file.
    pub offset: usize,
    /// Length in bytes.
    pub length: usize,
}

impl Span {
    /// Creates a new span.
    #[must_use]
    pub fn new(line: usize, column: usize, offset: usize, length: usize) -> Self {
        Self {
            line,
            column,
            offset,
            length,
        }
    }
}

/// Index of a declaration within its [`TokenStream`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DeclId(pub usize);

/// Kind of a recorded token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    /// Opener of a named function or method.
    Function,
    /// Opener of a closure or arrow function.
    Closure,
    /// A `return` statement.
    Return,
}

/// A single token of interest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// What this token is.
    pub kind: TokenKind,
    /// Where it appears.
    pub span: Span,
    /// Innermost function-like declaration enclosing this token.
    ///
    /// For an opener token this is the declaration it is nested in, not the
    /// declaration it opens.
    pub owner: Option<DeclId>,
}

/// Kind of function-like declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeclarationKind {
    /// Free-standing named function.
    Function,
    /// Method inside a class, trait, interface, or enum.
    Method,
    /// Anonymous function or arrow function.
    Closure,
}

impl std::fmt::Display for DeclarationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Function => write!(f, "function"),
            Self::Method => write!(f, "method"),
            Self::Closure => write!(f, "closure"),
        }
    }
}

/// A declared parameter, kept as written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameter {
    /// Full declaration text (type, name, default).
    pub raw_text: String,
    /// Where the parameter appears.
    pub span: Span,
}

impl Parameter {
    /// Creates a parameter from its raw text.
    #[must_use]
    pub fn new(raw_text: impl Into<String>, span: Span) -> Self {
        Self {
            raw_text: raw_text.into(),
            span,
        }
    }
}

/// Half-open range of token indices covering a declaration body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenRange {
    /// First token index in the body.
    pub start: usize,
    /// One past the last token index in the body.
    pub end: usize,
}

impl TokenRange {
    /// Creates a new range.
    #[must_use]
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }
}

/// One function-like declaration found in a file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Declaration {
    /// Position in [`TokenStream::declarations`].
    pub id: DeclId,
    /// Kind of declaration.
    pub kind: DeclarationKind,
    /// Declared name; `None` for closures.
    pub name: Option<String>,
    /// Parameters in declaration order.
    pub parameters: Vec<Parameter>,
    /// Body extent; `None` for abstract and interface methods.
    pub body: Option<TokenRange>,
    /// Position of the `function`/`fn` keyword.
    pub span: Span,
}

/// Flattened view of one source file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenStream {
    /// Tokens in source order.
    pub tokens: Vec<Token>,
    /// Declarations in source order; `declarations[i].id == DeclId(i)`.
    pub declarations: Vec<Declaration>,
    /// Set when the parser had to recover from syntax errors. Declarations
    /// near the broken region may be missing or truncated.
    #[serde(default)]
    pub syntax_errors: bool,
}

impl TokenStream {
    /// Creates an empty stream.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks up a declaration by id.
    #[must_use]
    pub fn declaration(&self, id: DeclId) -> Option<&Declaration> {
        self.declarations.get(id.0)
    }

    /// Returns the tokens inside `range`, clamped to the stream.
    #[must_use]
    pub fn tokens_in(&self, range: TokenRange) -> &[Token] {
        let end = range.end.min(self.tokens.len());
        let start = range.start.min(end);
        &self.tokens[start..end]
    }

    /// Returns true if `decl` directly contains a `return` statement.
    ///
    /// Only returns owned by `decl` itself count; a return inside a nested
    /// closure or function belongs to that nested declaration.
    #[must_use]
    pub fn has_direct_return(&self, decl: &Declaration) -> bool {
        let Some(body) = decl.body else {
            return false;
        };
        self.tokens_in(body)
            .iter()
            .any(|t| t.kind == TokenKind::Return && t.owner == Some(decl.id))
    }
}

/// A parsed source file handed to rules.
#[derive(Debug, Clone)]
pub struct SourceFile {
    /// Path as discovered (usually absolute).
    pub path: PathBuf,
    /// Path relative to the analysis root, used in reported locations.
    pub relative_path: PathBuf,
    /// File contents.
    pub content: String,
    /// Extracted tokens and declarations.
    pub stream: TokenStream,
}

impl SourceFile {
    /// Creates a source file, computing the relative path from `root`.
    ///
    /// When `root` is the file itself, the relative path is its file name.
    #[must_use]
    pub fn new(path: &Path, root: &Path, content: String, stream: TokenStream) -> Self {
        let relative_path = match path.strip_prefix(root) {
            Ok(rel) if rel.as_os_str().is_empty() => path
                .file_name()
                .map_or_else(|| path.to_path_buf(), PathBuf::from),
            Ok(rel) => rel.to_path_buf(),
            Err(_) => path.to_path_buf(),
        };
        Self {
            path: path.to_path_buf(),
            relative_path,
            content,
            stream,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token(kind: TokenKind, owner: Option<usize>) -> Token {
        Token {
            kind,
            span: Span::default(),
            owner: owner.map(DeclId),
        }
    }

    fn decl(id: usize, body: Option<TokenRange>) -> Declaration {
        Declaration {
            id: DeclId(id),
            kind: DeclarationKind::Method,
            name: Some(format!("m{id}")),
            parameters: Vec::new(),
            body,
            span: Span::default(),
        }
    }

    /// `m0 { $f = function () { return 1; }; }` with a nested closure `1`.
    fn nested_only() -> TokenStream {
        TokenStream {
            syntax_errors: false,
            tokens: vec![
                token(TokenKind::Function, None),
                token(TokenKind::Closure, Some(0)),
                token(TokenKind::Return, Some(1)),
            ],
            declarations: vec![decl(0, Some(TokenRange::new(1, 3))), {
                let mut d = decl(1, Some(TokenRange::new(2, 3)));
                d.kind = DeclarationKind::Closure;
                d.name = None;
                d
            }],
        }
    }

    #[test]
    fn nested_return_does_not_count_for_outer() {
        let stream = nested_only();
        assert!(!stream.has_direct_return(&stream.declarations[0]));
        assert!(stream.has_direct_return(&stream.declarations[1]));
    }

    #[test]
    fn direct_return_counts_even_with_nested_returns() {
        let mut stream = nested_only();
        stream.tokens.push(token(TokenKind::Return, Some(0)));
        stream.declarations[0].body = Some(TokenRange::new(1, 4));
        assert!(stream.has_direct_return(&stream.declarations[0]));
    }

    #[test]
    fn bodyless_declaration_has_no_return() {
        let stream = TokenStream {
            syntax_errors: false,
            tokens: vec![token(TokenKind::Function, None)],
            declarations: vec![decl(0, None)],
        };
        assert!(!stream.has_direct_return(&stream.declarations[0]));
    }

    #[test]
    fn tokens_in_clamps_out_of_bounds_range() {
        let stream = nested_only();
        assert_eq!(stream.tokens_in(TokenRange::new(2, 99)).len(), 1);
        assert!(stream.tokens_in(TokenRange::new(50, 99)).is_empty());
    }

    #[test]
    fn relative_path_falls_back_to_full_path() {
        let file = SourceFile::new(
            Path::new("/other/Plugin/Foo.php"),
            Path::new("/project"),
            String::new(),
            TokenStream::new(),
        );
        assert_eq!(file.relative_path, PathBuf::from("/other/Plugin/Foo.php"));
    }

    #[test]
    fn root_equal_to_file_uses_file_name() {
        let file = SourceFile::new(
            Path::new("/project/Plugin/Foo.php"),
            Path::new("/project/Plugin/Foo.php"),
            String::new(),
            TokenStream::new(),
        );
        assert_eq!(file.relative_path, PathBuf::from("Foo.php"));
    }
}
