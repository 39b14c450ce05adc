use jast::ast::Location;
use jast::parser::lexer::Token;
use jast::parser::{tokenize, LexErrorKind, Lexer};

#[test]
fn lexer_keywords() {
    let source = "public class Test extends Object implements Interface";
    let lexer = Lexer::new(source);
    let tokens = lexer.tokenize().expect("Failed to tokenize");

    assert_eq!(tokens.len(), 8);
    assert!(tokens[0].is(&Token::Public));
    assert!(tokens[1].is(&Token::Class));
    assert!(tokens[2].is(&Token::Identifier));
    assert!(tokens[3].is(&Token::Extends));
    assert!(tokens[4].is(&Token::Identifier));
    assert!(tokens[5].is(&Token::Implements));
    assert!(tokens[6].is(&Token::Identifier));
    assert!(tokens[7].is(&Token::Eof));
}

#[test]
fn lexer_operators() {
    let source = "+ - * / % = += -= *= /= %=";
    let lexer = Lexer::new(source);
    let tokens = lexer.tokenize().expect("Failed to tokenize");

    assert_eq!(tokens.len(), 12);
    assert!(tokens[0].is(&Token::Plus));
    assert!(tokens[1].is(&Token::Minus));
    assert!(tokens[2].is(&Token::Star));
    assert!(tokens[3].is(&Token::Slash));
    assert!(tokens[4].is(&Token::Percent));
    assert!(tokens[5].is(&Token::Assign));
    assert!(tokens[6].is(&Token::AddAssign));
    assert!(tokens[7].is(&Token::SubAssign));
    assert!(tokens[8].is(&Token::MulAssign));
    assert!(tokens[9].is(&Token::DivAssign));
    assert!(tokens[10].is(&Token::ModAssign));
}

#[test]
fn lexer_comments_are_skipped() {
    let source = "// This is a comment\n/* This is a block comment */\n/** javadoc */";
    let lexer = Lexer::new(source);
    let tokens = lexer.tokenize().expect("Failed to tokenize");

    assert_eq!(tokens.len(), 1);
    assert!(tokens[0].is(&Token::Eof));
    assert_eq!(tokens[0].location().line, 3);
}

#[test]
fn lexer_number_suffixes_and_bases() {
    let tokens = tokenize("0x1F 017 0b1010 1_000L 3.14f 2e10 .5 1D").unwrap();
    let kinds: Vec<&Token> = tokens.iter().map(|t| t.token_type()).collect();
    assert_eq!(kinds, vec![
        &Token::IntegerLiteral, &Token::IntegerLiteral, &Token::IntegerLiteral, &Token::IntegerLiteral,
        &Token::FloatLiteral, &Token::FloatLiteral, &Token::FloatLiteral, &Token::FloatLiteral,
        &Token::Eof,
    ]);
}

#[test]
fn lexer_string_values_are_decoded() {
    let tokens = tokenize(r#""tab\there" '\u0041' "\u00e9t\u00e9""#).unwrap();
    assert_eq!(tokens[0].literal_value(), Some("tab\there"));
    assert_eq!(tokens[1].literal_value(), Some("A"));
    assert_eq!(tokens[2].literal_value(), Some("été"));
    // Lexeme keeps the source form
    assert_eq!(tokens[0].lexeme(), r#""tab\there""#);
}

#[test]
fn lexer_reports_position_of_faults() {
    let err = tokenize("class A {\n  char c = 'ab';\n}").unwrap_err();
    assert_eq!(err.kind, LexErrorKind::InvalidCharLiteral);
    assert_eq!(err.location.line, 2);
    assert_eq!(err.location.column, 12);

    let err = tokenize("x = \"\\u12\";").unwrap_err();
    assert_eq!(err.kind, LexErrorKind::InvalidUnicodeEscape);

    let err = tokenize("a # b").unwrap_err();
    assert_eq!(err.kind, LexErrorKind::UnrecognizedCharacter);
    assert_eq!(err.location, Location::new(1, 3, 2));
}

#[test]
fn lexer_error_display_includes_location() {
    let err = tokenize("s = \"open").unwrap_err();
    let message = err.to_string();
    assert!(message.contains("unterminated string literal"), "{}", message);
    assert!(message.contains("1:5"), "{}", message);
}

#[test]
fn lexer_byte_order_mark_is_ignored() {
    let tokens = tokenize("\u{feff}class A {}").unwrap();
    assert!(tokens[0].is(&Token::Class));
}

#[test]
fn lexer_recovering_mode_continues_after_faults() {
    let (tokens, errors) = Lexer::new("int a = 1; # int b = \"x\n;").tokenize_recovering();
    assert_eq!(errors.len(), 2);
    assert_eq!(errors[0].kind, LexErrorKind::UnrecognizedCharacter);
    assert_eq!(errors[1].kind, LexErrorKind::UnterminatedString);
    let invalid = tokens.iter().filter(|t| t.is(&Token::Invalid)).count();
    assert_eq!(invalid, 2);
    assert!(tokens.last().unwrap().is(&Token::Eof));
    // The token after the unterminated literal is still delivered
    assert!(tokens[tokens.len() - 2].is(&Token::Semicolon));
}
