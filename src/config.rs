use crate::consts::{GENERATOR_DEFAULT_INDENT_WIDTH, GENERATOR_DEFAULT_NEWLINE};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Placement of the opening brace of a type, member or statement body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BraceStyle {
    /// `class A {`
    #[default]
    SameLine,
    /// `class A` then `{` on its own line
    NextLine,
}

/// Output layout settings for the generator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Spaces per indentation level (ignored when `use_tabs` is set)
    pub indent_width: usize,
    /// Indent with one tab per level instead of spaces
    pub use_tabs: bool,
    /// Line terminator written after every line
    pub newline: String,
    pub brace_style: BraceStyle,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            indent_width: GENERATOR_DEFAULT_INDENT_WIDTH,
            use_tabs: false,
            newline: GENERATOR_DEFAULT_NEWLINE.to_string(),
            brace_style: BraceStyle::SameLine,
        }
    }
}

impl Config {
    /// Load a configuration from a JSON file. Missing keys take their defaults.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        log::debug!("loading generator config from {}", path.display());
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> Result<Self> {
        let config: Config = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings that would produce output the lexer cannot read back
    pub fn validate(&self) -> Result<()> {
        if !matches!(self.newline.as_str(), "\n" | "\r\n" | "\r") {
            return Err(Error::config_error(format!(
                "newline must be \"\\n\", \"\\r\\n\" or \"\\r\", got {:?}",
                self.newline
            )));
        }
        if !self.use_tabs && self.indent_width == 0 {
            return Err(Error::config_error("indent_width must be at least 1 when indenting with spaces"));
        }
        Ok(())
    }

    /// Text of a single indentation level
    pub fn indent_unit(&self) -> String {
        if self.use_tabs {
            "\t".to_string()
        } else {
            " ".repeat(self.indent_width)
        }
    }

    pub fn with_brace_style(mut self, brace_style: BraceStyle) -> Self {
        self.brace_style = brace_style;
        self
    }

    pub fn with_tabs(mut self) -> Self {
        self.use_tabs = true;
        self
    }

    pub fn with_indent_width(mut self, indent_width: usize) -> Self {
        self.indent_width = indent_width;
        self
    }

    pub fn with_newline(mut self, newline: impl Into<String>) -> Self {
        self.newline = newline.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.indent_unit(), "    ");
        assert_eq!(config.newline, "\n");
        assert_eq!(config.brace_style, BraceStyle::SameLine);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = Config::from_json(r#"{ "brace_style": "next-line", "use_tabs": true }"#).unwrap();
        assert_eq!(config.brace_style, BraceStyle::NextLine);
        assert_eq!(config.indent_unit(), "\t");
        assert_eq!(config.indent_width, GENERATOR_DEFAULT_INDENT_WIDTH);
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "indent_width": 2, "newline": "\r\n" }}"#).unwrap();
        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.indent_unit(), "  ");
        assert_eq!(config.newline, "\r\n");
    }

    #[test]
    fn test_invalid_newline_rejected() {
        let err = Config::from_json(r#"{ "newline": "<br>" }"#).unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
    }

    #[test]
    fn test_unknown_brace_style_is_json_error() {
        let err = Config::from_json(r#"{ "brace_style": "gnu" }"#).unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }
}
