//! Context types for rule execution.

use std::path::Path;

use crate::source::{Declaration, SourceFile, Span};
use crate::types::Location;

/// Context provided to rules for a single declaration.
///
/// Pairs the file being analyzed with the declaration the host is currently
/// visiting. Rules read everything they need from here instead of keeping
/// per-invocation state of their own.
#[derive(Debug, Clone, Copy)]
pub struct DeclarationContext<'a> {
    /// The file containing the declaration.
    pub file: &'a SourceFile,
    /// The declaration being checked.
    pub declaration: &'a Declaration,
}

impl<'a> DeclarationContext<'a> {
    /// Creates a new declaration context.
    #[must_use]
    pub fn new(file: &'a SourceFile, declaration: &'a Declaration) -> Self {
        Self { file, declaration }
    }

    /// Path of the containing file as discovered.
    #[must_use]
    pub fn file_path(&self) -> &'a Path {
        &self.file.path
    }

    /// Declared name, if any.
    #[must_use]
    pub fn name(&self) -> Option<&'a str> {
        self.declaration.name.as_deref()
    }

    /// Location of the declaration for reporting.
    #[must_use]
    pub fn location(&self) -> Location {
        self.location_of(self.declaration.span)
    }

    /// Converts a span in this file into a reportable location.
    #[must_use]
    pub fn location_of(&self, span: Span) -> Location {
        Location::new(self.file.relative_path.clone(), span.line, span.column)
            .with_span(span.offset, span.length)
    }

    /// Returns true if the declaration directly contains a `return`.
    #[must_use]
    pub fn has_direct_return(&self) -> bool {
        self.file.stream.has_direct_return(self.declaration)
    }
}
