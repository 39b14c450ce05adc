use crate::ast::Location;
use crate::consts::PARSER_DEFAULT_MAX_ERRORS;
use crate::error::Error;
use super::lexer::LexError;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum ParseError {
    /// Unexpected token encountered
    UnexpectedToken {
        expected: String,
        found: String,
        location: Location,
    },

    /// Unexpected end of input
    UnexpectedEndOfInput {
        expected: String,
        location: Location,
    },

    /// Lexical fault surfaced while parsing a member or statement
    LexicalError {
        message: String,
        location: Location,
    },

    /// Construct outside the supported subset, skipped as a unit
    Unsupported {
        construct: String,
        location: Location,
    },

    /// A hard iteration cap was hit and the sub-parse was truncated
    LimitExceeded {
        what: String,
        limit: usize,
        location: Location,
    },

    /// The error budget ran out; parsing stopped
    TooManyErrors {
        count: usize,
        location: Location,
    },
}

impl ParseError {
    /// Create a new unexpected token error
    pub fn unexpected_token(expected: &str, found: &str, location: Location) -> Self {
        ParseError::UnexpectedToken {
            expected: expected.to_string(),
            found: found.to_string(),
            location,
        }
    }

    /// Create a new unexpected end of input error
    pub fn unexpected_end_of_input(expected: &str, location: Location) -> Self {
        ParseError::UnexpectedEndOfInput {
            expected: expected.to_string(),
            location,
        }
    }

    pub fn unsupported(construct: &str, location: Location) -> Self {
        ParseError::Unsupported {
            construct: construct.to_string(),
            location,
        }
    }

    pub fn limit_exceeded(what: &str, limit: usize, location: Location) -> Self {
        ParseError::LimitExceeded {
            what: what.to_string(),
            limit,
            location,
        }
    }

    /// Get the location of the error
    pub fn location(&self) -> Location {
        match self {
            ParseError::UnexpectedToken { location, .. }
            | ParseError::UnexpectedEndOfInput { location, .. }
            | ParseError::LexicalError { location, .. }
            | ParseError::Unsupported { location, .. }
            | ParseError::LimitExceeded { location, .. }
            | ParseError::TooManyErrors { location, .. } => *location,
        }
    }

    /// Check if parsing can resynchronize after this error
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, ParseError::TooManyErrors { .. })
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::UnexpectedToken { expected, found, location } => {
                write!(f, "Parse error at {}:{}: expected {}, found {}",
                    location.line, location.column, expected, found)
            }
            ParseError::UnexpectedEndOfInput { expected, location } => {
                write!(f, "Parse error at {}:{}: unexpected end of input, expected {}",
                    location.line, location.column, expected)
            }
            ParseError::LexicalError { message, location } => {
                write!(f, "Lexical error at {}:{}: {}",
                    location.line, location.column, message)
            }
            ParseError::Unsupported { construct, location } => {
                write!(f, "Unsupported construct at {}:{}: {} skipped",
                    location.line, location.column, construct)
            }
            ParseError::LimitExceeded { what, limit, location } => {
                write!(f, "Limit exceeded at {}:{}: more than {} {}, remainder skipped",
                    location.line, location.column, limit, what)
            }
            ParseError::TooManyErrors { count, location } => {
                write!(f, "Parsing stopped at {}:{} after {} errors",
                    location.line, location.column, count)
            }
        }
    }
}

impl std::error::Error for ParseError {}

impl From<LexError> for ParseError {
    fn from(error: LexError) -> Self {
        ParseError::LexicalError {
            message: error.kind.to_string(),
            location: error.location,
        }
    }
}

impl From<ParseError> for Error {
    fn from(parse_error: ParseError) -> Self {
        let location = parse_error.location();
        Error::parse_error(location.line, location.column, parse_error.to_string())
    }
}

/// Result type for parsing operations
pub type ParseResult<T> = Result<T, ParseError>;

/// Environment variable overriding the default error budget
pub const MAX_ERRORS_ENV: &str = "JAST_PARSE_MAX_ERRORS";

/// Error recovery context
#[derive(Debug)]
pub struct ErrorRecovery {
    /// Maximum number of errors to collect before giving up
    pub max_errors: usize,
    /// Collected errors
    pub errors: Vec<ParseError>,
}

impl Default for ErrorRecovery {
    fn default() -> Self {
        Self::new(PARSER_DEFAULT_MAX_ERRORS)
    }
}

impl ErrorRecovery {
    /// Create a new error recovery context
    pub fn new(max_errors: usize) -> Self {
        Self {
            max_errors,
            errors: Vec::new(),
        }
    }

    /// Error budget taken from `JAST_PARSE_MAX_ERRORS` when set
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Error budget read through `lookup`, falling back to the default when
    /// the variable is missing or not a number
    pub fn from_lookup(lookup: impl FnOnce(&str) -> Option<String>) -> Self {
        let max_errors = lookup(MAX_ERRORS_ENV)
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(PARSER_DEFAULT_MAX_ERRORS);
        Self::new(max_errors)
    }

    /// Record an error and report it through the logging facade.
    /// Returns false once the budget is exhausted.
    pub fn add_error(&mut self, error: ParseError) -> bool {
        log::warn!("{}", error);
        self.errors.push(error);
        self.should_continue()
    }

    /// Check if we should continue parsing
    pub fn should_continue(&self) -> bool {
        self.errors.len() < self.max_errors
    }

    /// Get all collected errors
    pub fn into_errors(self) -> Vec<ParseError> {
        self.errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_budget_lookup() {
        let lookup = |value: Option<&str>| {
            let value = value.map(str::to_string);
            ErrorRecovery::from_lookup(move |key| {
                assert_eq!(key, MAX_ERRORS_ENV);
                value
            })
            .max_errors
        };
        assert_eq!(lookup(Some("7")), 7);
        assert_eq!(lookup(Some(" 12 ")), 12);
        assert_eq!(lookup(Some("many")), PARSER_DEFAULT_MAX_ERRORS);
        assert_eq!(lookup(None), PARSER_DEFAULT_MAX_ERRORS);
    }

    #[test]
    fn test_error_budget() {
        let mut recovery = ErrorRecovery::new(2);
        let loc = Location::new(1, 1, 0);
        assert!(recovery.add_error(ParseError::unexpected_token("';'", "'}'", loc)));
        assert!(!recovery.add_error(ParseError::unexpected_token("';'", "'}'", loc)));
        assert_eq!(recovery.into_errors().len(), 2);
    }

    #[test]
    fn test_display_carries_position() {
        let err = ParseError::unexpected_token("identifier", "'('", Location::new(3, 7, 40));
        assert_eq!(err.to_string(), "Parse error at 3:7: expected identifier, found '('");
        assert!(err.is_recoverable());
    }
}
