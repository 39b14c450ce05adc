use crate::parser::lexer::{LexicalToken, Token};
use logos::Logos;

/// Render an opaque token span back to source text.
///
/// String and char literals are re-quoted from their decoded values. Binary
/// operators get one space on each side; commas and semicolons one space
/// after. Angle brackets that close a generic argument list stay tight.
/// Adjacent word-like tokens are separated by a space, and so are operator
/// pairs that would otherwise lex as a single longer operator. Everything
/// else is concatenated.
pub fn render_tokens(tokens: &[LexicalToken]) -> String {
    let generic = generic_angles(tokens);
    let mut out = String::new();
    let mut previous: Option<&LexicalToken> = None;
    let mut space_pending = false;

    for (idx, token) in tokens.iter().enumerate() {
        let kind = token.token_type();
        let text = token_text(token);
        let padded = is_padded(kind, previous.map(|p| p.token_type()), generic[idx]);

        if let Some(prev) = previous {
            let prev_kind = prev.token_type();
            let needs_space = padded
                || (space_pending && kind != &Token::Semicolon)
                || (is_wordlike(kind) && (is_wordlike(prev_kind) || prev_kind == &Token::Question))
                || would_merge(&token_text(prev), &text);
            if needs_space && !out.ends_with(' ') {
                out.push(' ');
            }
        }

        out.push_str(&text);
        space_pending = padded || matches!(kind, Token::Comma | Token::Semicolon);
        previous = Some(token);
    }

    out
}

/// Mark the `<` ... `>` tokens that bracket generic arguments.
///
/// A `<` opens a generic list when the tokens after it, up to the closer
/// that brings the angle depth back to zero, can only appear in a type.
/// `>>` and `>>>` close two and three levels.
fn generic_angles(tokens: &[LexicalToken]) -> Vec<bool> {
    let mut generic = vec![false; tokens.len()];
    let mut idx = 0;

    while idx < tokens.len() {
        if !tokens[idx].is(&Token::Lt) {
            idx += 1;
            continue;
        }

        let mut depth: isize = 1;
        let mut end = None;
        for (j, token) in tokens.iter().enumerate().skip(idx + 1) {
            let kind = token.token_type();
            match kind {
                Token::Lt => depth += 1,
                Token::Gt => depth -= 1,
                Token::RShift => depth -= 2,
                Token::URShift => depth -= 3,
                Token::Identifier | Token::Dot | Token::Comma | Token::Question |
                Token::Extends | Token::Super | Token::Amp |
                Token::LBracket | Token::RBracket => {}
                other if other.is_primitive_type() => {}
                _ => break,
            }
            if depth < 0 {
                break;
            }
            if depth == 0 {
                end = Some(j);
                break;
            }
        }

        match end {
            Some(end) => {
                for j in idx..=end {
                    if matches!(tokens[j].token_type(), Token::Lt | Token::Gt | Token::RShift | Token::URShift) {
                        generic[j] = true;
                    }
                }
                idx = end + 1;
            }
            None => idx += 1,
        }
    }

    generic
}

/// Source text of a single token
pub fn token_text(token: &LexicalToken) -> String {
    match token.token_type() {
        Token::StringLiteral(value) => format!("\"{}\"", escape(value, '"')),
        Token::CharLiteral(value) => format!("'{}'", escape(value, '\'')),
        _ => token.lexeme().to_string(),
    }
}

/// Escape a decoded literal value for the given quote character
pub fn escape(value: &str, quote: char) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            '\u{8}' => out.push_str("\\b"),
            '\u{c}' => out.push_str("\\f"),
            '\0' => out.push_str("\\0"),
            c if c == quote => {
                out.push('\\');
                out.push(c);
            }
            c if c.is_control() => out.push_str(&format!("\\u{:04x}", c as u32)),
            c => out.push(c),
        }
    }
    out
}

fn is_wordlike(kind: &Token) -> bool {
    kind.is_word() || matches!(kind, Token::StringLiteral(_) | Token::CharLiteral(_))
}

/// Tokens after which `+` and `-` are binary
fn ends_operand(kind: &Token) -> bool {
    matches!(
        kind,
        Token::Identifier | Token::IntegerLiteral | Token::FloatLiteral |
        Token::StringLiteral(_) | Token::CharLiteral(_) |
        Token::True | Token::False | Token::Null | Token::This | Token::Super |
        Token::RParen | Token::RBracket | Token::Inc | Token::Dec
    )
}

fn is_padded(kind: &Token, previous: Option<&Token>, generic: bool) -> bool {
    match kind {
        Token::Lt | Token::Gt | Token::LShift | Token::RShift | Token::URShift => {
            !generic && previous.is_some()
        }
        Token::Assign | Token::AddAssign | Token::SubAssign | Token::MulAssign |
        Token::DivAssign | Token::ModAssign | Token::AndAssign | Token::OrAssign |
        Token::XorAssign | Token::LShiftAssign | Token::RShiftAssign | Token::URShiftAssign |
        Token::Eq | Token::Ne | Token::Le | Token::Ge |
        Token::AndAnd | Token::PipePipe |
        Token::Star | Token::Slash | Token::Percent |
        Token::Amp | Token::Pipe | Token::Caret |
        Token::Colon | Token::Arrow => previous.is_some(),
        // Wildcard `?` in generic arguments stays tight
        Token::Question => previous.map_or(false, |p| !matches!(p, Token::Lt | Token::Comma)),
        Token::Plus | Token::Minus => previous.map_or(false, ends_operand),
        _ => false,
    }
}

/// True when writing `prev` and `next` without a separator would lex the
/// first token differently
fn would_merge(prev: &str, next: &str) -> bool {
    if prev.is_empty() || next.is_empty() {
        return false;
    }
    let joined = format!("{}{}", prev, next);
    let mut lexer = Token::lexer(&joined);
    match lexer.next() {
        Some(_) => lexer.span().end != prev.len(),
        None => false,
    }
}
