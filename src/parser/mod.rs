//! Parser module for Java-like sources
//!
//! This module handles lexical analysis and parsing of source text into the AST.

pub mod lexer;
pub mod parser;
pub mod error;

pub use lexer::{Lexer, LexicalToken, Token, LexError, LexErrorKind};
pub use parser::{Parser, ParseLimits};
pub use error::{ParseError, ParseResult, ErrorRecovery, MAX_ERRORS_ENV};

use crate::ast::CompilationUnit;
use crate::error::Result;
use std::path::Path;

/// Tokenize source text strictly: the first lexical fault is an error
pub fn tokenize(source: &str) -> std::result::Result<Vec<LexicalToken>, LexError> {
    Lexer::new(source).tokenize()
}

/// Parse source text into a compilation unit.
///
/// Never fails: faults are logged and skipped, and the result holds every
/// declaration that could be recovered.
pub fn parse_source(source: &str) -> CompilationUnit {
    parser::parse(source)
}

/// Parse source text, also returning the diagnostics collected on the way
pub fn parse_source_with_diagnostics(source: &str) -> (CompilationUnit, Vec<ParseError>) {
    Parser::from_source(source).parse_with_diagnostics()
}

/// Read and parse a source file
pub fn parse_file(path: &Path) -> Result<CompilationUnit> {
    let source = std::fs::read_to_string(path)?;
    log::debug!("parsing {} ({} bytes)", path.display(), source.len());
    Ok(parse_source(&source))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_class() {
        let source = r#"
package com.example;

public class HelloWorld {
    public static void main(String[] args) {
        System.out.println("Hello, World!");
    }
}
"#;

        let (unit, errors) = parse_source_with_diagnostics(source);
        assert!(errors.is_empty(), "unexpected diagnostics: {:?}", errors);
        assert_eq!(unit.package_decl.as_ref().map(|p| p.name.as_str()), Some("com.example"));
        assert_eq!(unit.type_decls.len(), 1);
    }

    #[test]
    fn test_parse_with_imports() {
        let source = r#"
package com.example;

import java.util.List;
import java.util.ArrayList;
import static java.lang.Math.*;

public class TestClass {
    private List<String> items = new ArrayList<>();
}
"#;

        let unit = parse_source(source);
        assert_eq!(unit.imports.len(), 3);
        assert!(unit.imports[2].is_static);
        assert!(unit.imports[2].is_wildcard);
        assert_eq!(unit.imports[2].name, "java.lang.Math");
    }

    #[test]
    fn test_strict_tokenize_reports_first_fault() {
        let err = tokenize("int x = \"open").unwrap_err();
        assert_eq!(err.kind, LexErrorKind::UnterminatedString);
    }

    #[test]
    fn test_parse_file_reads_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("A.java");
        std::fs::write(&path, "class A { int x; }").unwrap();
        let unit = parse_file(&path).unwrap();
        assert_eq!(unit.type_decls[0].name(), "A");
    }
}
