//! jast: Java-like source to AST and back
//!
//! A toolkit for tooling authors who need to analyze or regenerate the
//! declaration-level structure of Java-like sources.
//!
//! ## Architecture
//!
//! - **parser**: Lexical analysis and recovering recursive-descent parsing into the AST
//! - **ast**: Closed node model; expressions are kept as opaque token spans
//! - **generator**: AST (or summary) back to formatted source text
//! - **summary**: Reduced declarative summaries, loadable from JSON
//! - **bin**: Command-line front end
//!
//! ## Flow
//!
//! ```text
//! source text → Lexer → tokens → Parser → AST → Generator → source text
//!                                          ↓
//!                                      summarize → UnitSummary → skeleton text
//! ```
//!
//! The round trip is structurally idempotent, not byte-exact: comments and
//! original spacing are not preserved.

pub mod ast;
pub mod parser;
pub mod generator;
pub mod summary;
pub mod error;
pub mod config;
pub mod consts;

pub use ast::CompilationUnit;
pub use config::{BraceStyle, Config};
pub use error::{Error, Result};
pub use generator::{generate, Node, NodeKind};
pub use parser::{parse_source, parse_source_with_diagnostics};
pub use summary::{summarize, UnitSummary};

/// Parse source text and regenerate it with the given layout
pub fn format_source(source: &str, config: &Config) -> String {
    let unit = parse_source(source);
    generate(&unit, config)
}

/// Read, parse and regenerate a source file
pub fn format_file(path: impl AsRef<std::path::Path>, config: &Config) -> Result<String> {
    let unit = parser::parse_file(path.as_ref())?;
    Ok(generate(&unit, config))
}

/// Render the stub skeleton described by a summary
pub fn skeleton(summary: &UnitSummary, config: &Config) -> String {
    generate(summary, config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_source_normalizes_layout() {
        let text = format_source("package p;import a.B;class C{int x=1;void f(){x++;}}", &Config::default());
        assert_eq!(
            text,
            "package p;\n\nimport a.B;\n\nclass C {\n    int x = 1;\n\n    void f() {\n        x++;\n    }\n}\n"
        );
    }

    #[test]
    fn test_skeleton_from_parsed_summary() {
        let unit = parse_source("abstract class S { abstract int size(); boolean empty() { return size() == 0; } }");
        let text = skeleton(&summarize(&unit), &Config::default());
        assert!(text.contains("abstract int size();"));
        assert!(text.contains("return false;"));
        assert!(!text.contains("size() == 0"));
    }
}
