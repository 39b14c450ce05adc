use logos::Logos;
use crate::ast::Location;
use std::fmt;

/// Token types for Java-like sources
#[derive(Logos, Debug, PartialEq, Clone)]
#[logos(error = LexErrorKind)]
pub enum Token {
    // Keywords
    #[token("package")]
    Package,
    #[token("import")]
    Import,
    #[token("static")]
    Static,
    #[token("public")]
    Public,
    #[token("protected")]
    Protected,
    #[token("private")]
    Private,
    #[token("abstract")]
    Abstract,
    #[token("final")]
    Final,
    #[token("native")]
    Native,
    #[token("synchronized")]
    Synchronized,
    #[token("transient")]
    Transient,
    #[token("volatile")]
    Volatile,
    #[token("strictfp")]
    Strictfp,
    #[token("class")]
    Class,
    #[token("interface")]
    Interface,
    #[token("enum")]
    Enum,
    #[token("extends")]
    Extends,
    #[token("implements")]
    Implements,
    #[token("new")]
    New,
    #[token("this")]
    This,
    #[token("super")]
    Super,
    #[token("instanceof")]
    InstanceOf,
    #[token("void")]
    Void,
    #[token("boolean")]
    Boolean,
    #[token("byte")]
    Byte,
    #[token("short")]
    Short,
    #[token("int")]
    Int,
    #[token("long")]
    Long,
    #[token("char")]
    Char,
    #[token("float")]
    Float,
    #[token("double")]
    Double,
    #[token("if")]
    If,
    #[token("else")]
    Else,
    #[token("for")]
    For,
    #[token("while")]
    While,
    #[token("do")]
    Do,
    #[token("switch")]
    Switch,
    #[token("case")]
    Case,
    #[token("default")]
    Default,
    #[token("assert")]
    Assert,
    #[token("break")]
    Break,
    #[token("continue")]
    Continue,
    #[token("return")]
    Return,
    #[token("throw")]
    Throw,
    #[token("throws")]
    Throws,
    #[token("try")]
    Try,
    #[token("catch")]
    Catch,
    #[token("finally")]
    Finally,
    #[token("const")]
    Const,
    #[token("goto")]
    Goto,
    #[token("true")]
    True,
    #[token("false")]
    False,
    #[token("null")]
    Null,

    // Operators
    #[token("=")]
    Assign,
    #[token("+=")]
    AddAssign,
    #[token("-=")]
    SubAssign,
    #[token("*=")]
    MulAssign,
    #[token("/=")]
    DivAssign,
    #[token("%=")]
    ModAssign,
    #[token("&=")]
    AndAssign,
    #[token("|=")]
    OrAssign,
    #[token("^=")]
    XorAssign,
    #[token("<<=")]
    LShiftAssign,
    #[token(">>=")]
    RShiftAssign,
    #[token(">>>=")]
    URShiftAssign,
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("%")]
    Percent,
    #[token("++")]
    Inc,
    #[token("--")]
    Dec,
    #[token("!")]
    Bang,
    #[token("~")]
    Tilde,
    #[token("&")]
    Amp,
    #[token("|")]
    Pipe,
    #[token("^")]
    Caret,
    #[token("<<")]
    LShift,
    #[token(">>")]
    RShift,
    #[token(">>>")]
    URShift,
    #[token("&&")]
    AndAnd,
    #[token("||")]
    PipePipe,
    #[token("==")]
    Eq,
    #[token("!=")]
    Ne,
    #[token("<")]
    Lt,
    #[token("<=")]
    Le,
    #[token(">")]
    Gt,
    #[token(">=")]
    Ge,
    #[token("?")]
    Question,
    #[token(":")]
    Colon,
    #[token("::")]
    DoubleColon,
    #[token("->")]
    Arrow,

    // Separators
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token(";")]
    Semicolon,
    #[token(",")]
    Comma,
    #[token(".")]
    Dot,
    #[token("@")]
    At,
    #[token("...")]
    Ellipsis,

    // Literals. Quoted literals carry their decoded value.
    #[token("\"", lex_string)]
    StringLiteral(String),
    #[token("'", lex_char)]
    CharLiteral(String),
    // Decimal and octal share one pattern; `0` followed by octal digits is octal
    #[regex(r"[0-9][0-9_]*[lL]?")]
    #[regex(r"0[xX][0-9a-fA-F_]+[lL]?")]
    #[regex(r"0[bB][01_]+[lL]?")]
    IntegerLiteral,
    #[regex(r"[0-9][0-9_]*\.[0-9_]*([eE][+-]?[0-9]+)?[fFdD]?")]
    #[regex(r"\.[0-9][0-9_]*([eE][+-]?[0-9]+)?[fFdD]?")]
    #[regex(r"[0-9][0-9_]*[eE][+-]?[0-9]+[fFdD]?")]
    #[regex(r"[0-9][0-9_]*[fFdD]")]
    FloatLiteral,

    // Identifiers
    #[regex(r"[a-zA-Z_$][a-zA-Z0-9_$]*")]
    Identifier,

    // Comments and whitespace
    #[regex(r"//[^\n]*")]
    LineComment,
    // Block/Javadoc comment (handles /**...*/, /*...*/, and multiple '*')
    #[regex(r"/\*[^*]*\*+([^/*][^*]*\*+)*/", priority = 3)]
    BlockComment,
    #[regex(r"[ \t\n\r\f]+", priority = 2)]
    Whitespace,

    // Unicode BOM (Byte Order Mark) - treat as ignorable whitespace
    #[token("\u{FEFF}")]
    Bom,

    /// Placeholder for a lexical fault in recovering mode; never produced by logos
    Invalid,
    /// End of input marker appended by `tokenize`
    Eof,
}

impl Token {
    /// Check if this token is a keyword
    pub fn is_keyword(&self) -> bool {
        matches!(self,
            Token::Package | Token::Import | Token::Static |
            Token::Public | Token::Protected | Token::Private |
            Token::Abstract | Token::Final | Token::Native |
            Token::Synchronized | Token::Transient | Token::Volatile |
            Token::Strictfp | Token::Default | Token::Class | Token::Interface |
            Token::Enum | Token::Extends | Token::Implements |
            Token::New | Token::This | Token::Super |
            Token::InstanceOf | Token::Void | Token::Boolean |
            Token::Byte | Token::Short | Token::Int |
            Token::Long | Token::Char | Token::Float |
            Token::Double | Token::If | Token::Else |
            Token::For | Token::While | Token::Do |
            Token::Switch | Token::Case | Token::Assert |
            Token::Break | Token::Continue | Token::Return |
            Token::Throw | Token::Throws | Token::Try |
            Token::Catch | Token::Finally | Token::Const |
            Token::Goto | Token::True | Token::False | Token::Null
        )
    }

    /// Check if this token is a modifier
    pub fn is_modifier(&self) -> bool {
        matches!(self,
            Token::Public | Token::Protected | Token::Private |
            Token::Abstract | Token::Final | Token::Native |
            Token::Synchronized | Token::Transient | Token::Volatile |
            Token::Static | Token::Strictfp | Token::Default
        )
    }

    /// Check if this token is a primitive type (`void` excluded)
    pub fn is_primitive_type(&self) -> bool {
        matches!(self,
            Token::Boolean | Token::Byte | Token::Short |
            Token::Int | Token::Long | Token::Char |
            Token::Float | Token::Double
        )
    }

    /// Check if this token is a literal
    pub fn is_literal(&self) -> bool {
        matches!(self,
            Token::StringLiteral(_) | Token::CharLiteral(_) |
            Token::IntegerLiteral | Token::FloatLiteral |
            Token::True | Token::False | Token::Null
        )
    }

    /// Identifiers, keywords and literals: tokens that glue together when
    /// written without a separator
    pub fn is_word(&self) -> bool {
        matches!(self, Token::Identifier | Token::IntegerLiteral | Token::FloatLiteral)
            || self.is_keyword()
    }

    /// Check if this token is an operator
    pub fn is_operator(&self) -> bool {
        matches!(self,
            Token::Assign | Token::AddAssign | Token::SubAssign |
            Token::MulAssign | Token::DivAssign | Token::ModAssign |
            Token::AndAssign | Token::OrAssign | Token::XorAssign |
            Token::LShiftAssign | Token::RShiftAssign | Token::URShiftAssign |
            Token::Plus | Token::Minus | Token::Star | Token::Slash |
            Token::Percent | Token::Inc | Token::Dec | Token::Bang |
            Token::Tilde | Token::Amp | Token::Pipe | Token::Caret |
            Token::LShift | Token::RShift | Token::URShift |
            Token::AndAnd | Token::PipePipe | Token::Eq | Token::Ne |
            Token::Lt | Token::Le | Token::Gt | Token::Ge |
            Token::Question | Token::Colon | Token::Arrow
        )
    }

    /// Tokens dropped from the delivered stream
    pub fn is_trivia(&self) -> bool {
        matches!(self, Token::Whitespace | Token::Bom | Token::LineComment | Token::BlockComment)
    }
}

/// Kind of lexical fault
#[derive(Debug, Clone, PartialEq, Eq, Default, thiserror::Error)]
pub enum LexErrorKind {
    #[error("unterminated string literal")]
    UnterminatedString,
    #[error("unterminated character literal")]
    UnterminatedChar,
    #[error("invalid escape sequence '\\{0}'")]
    InvalidEscape(char),
    #[error("invalid unicode escape (expected exactly 4 hex digits)")]
    InvalidUnicodeEscape,
    #[error("character literal must contain exactly one character")]
    InvalidCharLiteral,
    #[default]
    #[error("unrecognized character")]
    UnrecognizedCharacter,
}

/// Lexical error with the position of the offending token
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind} at {location} (offset {}): '{text}'", .location.offset)]
pub struct LexError {
    pub kind: LexErrorKind,
    pub location: Location,
    /// Source text consumed for the faulty token
    pub text: String,
}

fn lex_string(lex: &mut logos::Lexer<Token>) -> Result<String, LexErrorKind> {
    let (consumed, value) = scan_quoted(lex.remainder(), '"');
    lex.bump(consumed);
    value
}

fn lex_char(lex: &mut logos::Lexer<Token>) -> Result<String, LexErrorKind> {
    let (consumed, value) = scan_quoted(lex.remainder(), '\'');
    lex.bump(consumed);
    let value = value?;
    if value.chars().count() != 1 {
        return Err(LexErrorKind::InvalidCharLiteral);
    }
    Ok(value)
}

/// Scan the body of a quoted literal whose opening quote was already consumed.
///
/// Returns the number of bytes to consume and the decoded value. An
/// unterminated literal stops before the line break so lexing resumes on the
/// next line; a bad escape still consumes through the closing quote.
fn scan_quoted(rest: &str, quote: char) -> (usize, Result<String, LexErrorKind>) {
    let unterminated = if quote == '"' {
        LexErrorKind::UnterminatedString
    } else {
        LexErrorKind::UnterminatedChar
    };
    let mut value = String::new();
    let mut error: Option<LexErrorKind> = None;
    let mut chars = rest.char_indices();

    while let Some((i, ch)) = chars.next() {
        match ch {
            c if c == quote => {
                let consumed = i + c.len_utf8();
                return match error {
                    Some(e) => (consumed, Err(e)),
                    None => (consumed, Ok(value)),
                };
            }
            '\n' | '\r' => return (i, Err(unterminated)),
            '\\' => {
                let Some((j, escaped)) = chars.next() else {
                    return (rest.len(), Err(unterminated));
                };
                let decoded = match escaped {
                    'n' => Some('\n'),
                    't' => Some('\t'),
                    'r' => Some('\r'),
                    'b' => Some('\u{8}'),
                    'f' => Some('\u{c}'),
                    '0' => Some('\0'),
                    '\\' => Some('\\'),
                    '\'' => Some('\''),
                    '"' => Some('"'),
                    'u' => {
                        let hex: String = rest[j + 1..]
                            .chars()
                            .take(4)
                            .take_while(|c| c.is_ascii_hexdigit())
                            .collect();
                        if hex.len() == 4 {
                            for _ in 0..4 {
                                chars.next();
                            }
                            // Lone surrogates cannot be represented in a Rust string
                            u32::from_str_radix(&hex, 16)
                                .ok()
                                .map(|code| char::from_u32(code).unwrap_or('\u{FFFD}'))
                        } else {
                            if error.is_none() {
                                error = Some(LexErrorKind::InvalidUnicodeEscape);
                            }
                            None
                        }
                    }
                    '\n' | '\r' => return (j, Err(unterminated)),
                    other => {
                        if error.is_none() {
                            error = Some(LexErrorKind::InvalidEscape(other));
                        }
                        None
                    }
                };
                if let Some(c) = decoded {
                    value.push(c);
                }
            }
            other => value.push(other),
        }
    }

    (rest.len(), Err(unterminated))
}

/// Lexical token with location information
#[derive(Debug, Clone, PartialEq)]
pub struct LexicalToken {
    pub token: Token,
    pub lexeme: String,
    pub location: Location,
}

impl LexicalToken {
    pub fn new(token: Token, lexeme: String, location: Location) -> Self {
        Self { token, lexeme, location }
    }

    /// Get the token type
    pub fn token_type(&self) -> &Token {
        &self.token
    }

    /// Get the lexeme (actual text)
    pub fn lexeme(&self) -> &str {
        &self.lexeme
    }

    /// Decoded value of string and character literals
    pub fn literal_value(&self) -> Option<&str> {
        match &self.token {
            Token::StringLiteral(value) | Token::CharLiteral(value) => Some(value),
            _ => None,
        }
    }

    /// Get the location
    pub fn location(&self) -> Location {
        self.location
    }

    /// Check if this token matches the given token type, ignoring literal payloads
    pub fn is(&self, token_type: &Token) -> bool {
        std::mem::discriminant(&self.token) == std::mem::discriminant(token_type)
    }
}

impl fmt::Display for LexicalToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} '{}' at {}", self.token, self.lexeme, self.location)
    }
}

/// Lexer for Java-like sources
pub struct Lexer<'a> {
    lexer: logos::Lexer<'a, Token>,
    current_line: usize,
    current_column: usize,
    current_offset: usize,
    previous_was_cr: bool,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            lexer: Token::lexer(source),
            current_line: 1,
            current_column: 1,
            current_offset: 0,
            previous_was_cr: false,
        }
    }

    fn location(&self) -> Location {
        Location::new(self.current_line, self.current_column, self.current_offset)
    }

    /// Get the next token, trivia included
    pub fn next_token(&mut self) -> Option<Result<LexicalToken, LexError>> {
        let token = self.lexer.next()?;
        let lexeme = self.lexer.slice().to_string();
        let location = self.location();
        self.update_position(&lexeme);

        match token {
            Ok(token) => Some(Ok(LexicalToken::new(token, lexeme, location))),
            Err(kind) => Some(Err(LexError { kind, location, text: lexeme })),
        }
    }

    /// Update the current position based on the lexeme
    fn update_position(&mut self, lexeme: &str) {
        for ch in lexeme.chars() {
            match ch {
                '\n' if self.previous_was_cr => {
                    // second half of a \r\n pair, already counted
                }
                '\n' | '\r' => {
                    self.current_line += 1;
                    self.current_column = 1;
                }
                _ => {
                    self.current_column += 1;
                }
            }
            self.previous_was_cr = ch == '\r';
            self.current_offset += ch.len_utf8();
        }
    }

    fn eof_token(&self) -> LexicalToken {
        LexicalToken::new(Token::Eof, String::new(), self.location())
    }

    /// Get all tokens from the source, terminated by an `Eof` token.
    /// The first lexical fault aborts tokenization.
    pub fn tokenize(mut self) -> Result<Vec<LexicalToken>, LexError> {
        let mut tokens = Vec::new();

        while let Some(result) = self.next_token() {
            let token = result?;
            // Skip whitespace, BOM and comments
            if !token.token.is_trivia() {
                tokens.push(token);
            }
        }

        tokens.push(self.eof_token());
        Ok(tokens)
    }

    /// Tokenize without stopping at lexical faults: each fault becomes an
    /// `Invalid` token in the stream and is reported in the returned list.
    pub fn tokenize_recovering(mut self) -> (Vec<LexicalToken>, Vec<LexError>) {
        let mut tokens = Vec::new();
        let mut errors = Vec::new();

        while let Some(result) = self.next_token() {
            match result {
                Ok(token) => {
                    if !token.token.is_trivia() {
                        tokens.push(token);
                    }
                }
                Err(error) => {
                    tokens.push(LexicalToken::new(Token::Invalid, error.text.clone(), error.location));
                    errors.push(error);
                }
            }
        }

        tokens.push(self.eof_token());
        (tokens, errors)
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Result<LexicalToken, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_token()
    }
}
