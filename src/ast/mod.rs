//! Abstract Syntax Tree (AST) representation for Java-like sources
//!
//! The tree covers declarations (package, imports, classes, interfaces, enums and
//! their members) and common statement forms. Expressions are never parsed into
//! trees; they are kept as opaque, bracket-balanced token spans.

mod nodes;
mod visitor;

pub use nodes::*;
pub use visitor::*;

use std::fmt;

/// Source location information
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Location {
    /// Line number (1-indexed)
    pub line: usize,
    /// Column number (1-indexed)
    pub column: usize,
    /// Byte offset from start of file
    pub offset: usize,
}

impl Location {
    pub fn new(line: usize, column: usize, offset: usize) -> Self {
        Self { line, column, offset }
    }

    /// Location of the first character of a file
    pub fn start() -> Self {
        Self { line: 1, column: 1, offset: 0 }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Span of source code: location of the first and of the last token of a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    pub start: Location,
    pub end: Location,
}

impl Span {
    pub fn new(start: Location, end: Location) -> Self {
        Self { start, end }
    }

    /// Span covering a single location
    pub fn single(location: Location) -> Self {
        Self { start: location, end: location }
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.start.line == self.end.line {
            write!(f, "{}:{}-{}", self.start.line, self.start.column, self.end.column)
        } else {
            write!(f, "{}:{}-{}:{}", self.start.line, self.start.column, self.end.line, self.end.column)
        }
    }
}

/// AST node trait that all AST nodes implement
pub trait AstNode {
    /// Get the source span of this node
    fn span(&self) -> Span;

    /// Location of the node's first token
    fn location(&self) -> Location {
        self.span().start
    }

    /// Accept a visitor
    fn accept<V: AstVisitor>(&self, visitor: &mut V);
}

/// Root of a parsed source file
#[derive(Debug, Clone, Default)]
pub struct CompilationUnit {
    pub package_decl: Option<PackageDecl>,
    pub imports: Vec<ImportDecl>,
    pub type_decls: Vec<TypeDecl>,
    pub span: Span,
}

impl CompilationUnit {
    /// True when nothing at all was recovered from the source
    pub fn is_empty(&self) -> bool {
        self.package_decl.is_none() && self.imports.is_empty() && self.type_decls.is_empty()
    }

    /// Find a top-level type declaration by name
    pub fn find_type(&self, name: &str) -> Option<&TypeDecl> {
        self.type_decls.iter().find(|t| t.name() == name)
    }
}

impl AstNode for CompilationUnit {
    fn span(&self) -> Span {
        self.span
    }

    fn accept<V: AstVisitor>(&self, visitor: &mut V) {
        visitor.visit_compilation_unit(self)
    }
}
