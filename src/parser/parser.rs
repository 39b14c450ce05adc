//! Parser implementation for Java-like sources
//!
//! This module implements a recursive descent parser over a fully buffered
//! token array. Lookahead is done by index offset, so the member heuristics
//! can scan arbitrarily far without re-lexing. Expressions, loop headers,
//! conditions and catch parameters are captured as opaque, bracket-balanced
//! token spans.
//!
//! Faults are recovered at statement and member granularity; the top-level
//! entry points always return a (possibly partial) `CompilationUnit`.

use super::error::{ErrorRecovery, ParseError, ParseResult};
use super::lexer::{LexError, Lexer, LexicalToken, Token};
use crate::ast::*;
use crate::consts::{
    PARSER_MAX_BLOCK_STATEMENTS, PARSER_MAX_NESTING_DEPTH, PARSER_MAX_SPAN_TOKENS,
    PARSER_MAX_TYPE_MEMBERS,
};

/// Hard caps applied while parsing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseLimits {
    pub max_block_statements: usize,
    pub max_span_tokens: usize,
    pub max_type_members: usize,
    pub max_nesting_depth: usize,
}

impl Default for ParseLimits {
    fn default() -> Self {
        Self {
            max_block_statements: PARSER_MAX_BLOCK_STATEMENTS,
            max_span_tokens: PARSER_MAX_SPAN_TOKENS,
            max_type_members: PARSER_MAX_TYPE_MEMBERS,
            max_nesting_depth: PARSER_MAX_NESTING_DEPTH,
        }
    }
}

/// Parser for Java-like sources
pub struct Parser {
    tokens: Vec<LexicalToken>,
    current: usize,
    lex_errors: Vec<LexError>,
    recovery: ErrorRecovery,
    limits: ParseLimits,
    depth: usize,
}

impl Parser {
    /// Create a parser over an already tokenized source.
    /// An `Eof` token is appended when the sequence does not end with one.
    pub fn new(mut tokens: Vec<LexicalToken>) -> Self {
        if !tokens.last().map_or(false, |t| t.is(&Token::Eof)) {
            let location = tokens.last().map(|t| t.location()).unwrap_or_else(Location::start);
            tokens.push(LexicalToken::new(Token::Eof, String::new(), location));
        }

        Self {
            tokens,
            current: 0,
            lex_errors: Vec::new(),
            recovery: ErrorRecovery::from_env(),
            limits: ParseLimits::default(),
            depth: 0,
        }
    }

    /// Create a parser from source code. Lexical faults do not fail here;
    /// they surface as diagnostics when the parser reaches them.
    pub fn from_source(source: &str) -> Self {
        let (tokens, lex_errors) = Lexer::new(source).tokenize_recovering();
        for error in &lex_errors {
            log::debug!("lexical fault deferred to parser: {}", error);
        }
        let mut parser = Self::new(tokens);
        parser.lex_errors = lex_errors;
        parser
    }

    pub fn with_limits(mut self, limits: ParseLimits) -> Self {
        self.limits = limits;
        self
    }

    pub fn with_recovery(mut self, recovery: ErrorRecovery) -> Self {
        self.recovery = recovery;
        self
    }

    /// Parse the token stream into a compilation unit
    pub fn parse(self) -> CompilationUnit {
        self.parse_with_diagnostics().0
    }

    /// Parse the token stream, returning the compilation unit together with
    /// every diagnostic recorded while recovering
    pub fn parse_with_diagnostics(mut self) -> (CompilationUnit, Vec<ParseError>) {
        let mut unit = CompilationUnit::default();
        if let Err(error) = self.parse_compilation_unit(&mut unit) {
            log::error!("parsing aborted, returning partial compilation unit: {}", error);
            self.recovery.errors.push(error);
        }
        (unit, self.recovery.into_errors())
    }

    fn parse_compilation_unit(&mut self, unit: &mut CompilationUnit) -> ParseResult<()> {
        let start = self.peek().location();
        unit.span = Span::single(start);

        // Parse package declaration
        if self.check(&Token::Package) {
            match self.parse_package_decl() {
                Ok(package) => unit.package_decl = Some(package),
                Err(e) => {
                    self.report(e)?;
                    self.synchronize_in_block();
                }
            }
        }

        // Parse imports
        while self.check(&Token::Import) {
            match self.parse_import_decl() {
                Ok(import) => unit.imports.push(import),
                Err(e) => {
                    self.report(e)?;
                    self.synchronize_in_block();
                }
            }
        }

        // Parse type declarations
        while !self.is_at_end() {
            if self.match_token(&Token::Semicolon) {
                continue;
            }
            let before = self.current;
            match self.parse_type_decl() {
                Ok(Some(type_decl)) => unit.type_decls.push(type_decl),
                Ok(None) => {}
                Err(e) => {
                    self.report(e)?;
                    self.synchronize_toplevel(before);
                }
            }
            unit.span = self.span_from(start);
        }

        Ok(())
    }

    // Helper methods
    fn is_at_end(&self) -> bool {
        self.peek().is(&Token::Eof)
    }

    fn check(&self, token_type: &Token) -> bool {
        self.peek().is(token_type)
    }

    fn advance(&mut self) -> &LexicalToken {
        if !self.is_at_end() {
            self.current += 1;
        }
        self.previous()
    }

    fn peek(&self) -> &LexicalToken {
        &self.tokens[self.current.min(self.tokens.len() - 1)]
    }

    /// Token kind at an absolute index; past the end reads as `Eof`
    fn kind_at(&self, idx: usize) -> &Token {
        &self.tokens[idx.min(self.tokens.len() - 1)].token
    }

    fn previous(&self) -> &LexicalToken {
        if self.current == 0 { &self.tokens[0] } else { &self.tokens[self.current - 1] }
    }

    fn span_from(&self, start: Location) -> Span {
        let end = self.previous().location();
        Span::new(start, if end < start { start } else { end })
    }

    fn consume(&mut self, token_type: &Token, expected: &str) -> ParseResult<LexicalToken> {
        if self.check(token_type) {
            Ok(self.advance().clone())
        } else {
            Err(self.error_here(expected))
        }
    }

    fn match_token(&mut self, token_type: &Token) -> bool {
        if self.check(token_type) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Build the error for an unexpected current token
    fn error_here(&self, expected: &str) -> ParseError {
        let token = self.peek();
        match token.token_type() {
            Token::Eof => ParseError::unexpected_end_of_input(expected, token.location()),
            Token::Invalid => {
                let message = self
                    .lex_errors
                    .iter()
                    .find(|e| e.location == token.location())
                    .map(|e| e.kind.to_string())
                    .unwrap_or_else(|| format!("invalid token '{}'", token.lexeme()));
                ParseError::LexicalError { message, location: token.location() }
            }
            _ => ParseError::unexpected_token(expected, &format!("'{}'", token.lexeme()), token.location()),
        }
    }

    /// Record a recoverable error; fails once the error budget is spent
    fn report(&mut self, error: ParseError) -> ParseResult<()> {
        if !error.is_recoverable() {
            return Err(error);
        }
        let location = error.location();
        if self.recovery.add_error(error) {
            Ok(())
        } else {
            Err(ParseError::TooManyErrors { count: self.recovery.errors.len(), location })
        }
    }

    /// Run a nested sub-parse, refusing to descend past the nesting cap
    fn nested<T>(&mut self, f: impl FnOnce(&mut Self) -> ParseResult<T>) -> ParseResult<T> {
        if self.depth >= self.limits.max_nesting_depth {
            return Err(ParseError::limit_exceeded(
                "levels of statement nesting",
                self.limits.max_nesting_depth,
                self.peek().location(),
            ));
        }
        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        result
    }

    // Package declaration parsing
    fn parse_package_decl(&mut self) -> ParseResult<PackageDecl> {
        let start = self.peek().location();

        self.consume(&Token::Package, "'package'")?;

        let name = self.parse_qualified_name()?;

        self.consume(&Token::Semicolon, "';' after package name")?;

        Ok(PackageDecl { name, span: self.span_from(start) })
    }

    // Import declaration parsing
    fn parse_import_decl(&mut self) -> ParseResult<ImportDecl> {
        let start = self.peek().location();

        self.consume(&Token::Import, "'import'")?;

        let is_static = self.match_token(&Token::Static);

        // Parse qualified name allowing trailing .* without consuming the '*'
        let mut parts = vec![self.parse_identifier()?];
        while self.check(&Token::Dot) && self.kind_at(self.current + 1) == &Token::Identifier {
            self.advance(); // '.'
            parts.push(self.parse_identifier()?);
        }
        let mut is_wildcard = false;
        if self.match_token(&Token::Dot) {
            self.consume(&Token::Star, "'*' after '.' in import")?;
            is_wildcard = true;
        }

        self.consume(&Token::Semicolon, "';' after import")?;

        Ok(ImportDecl {
            name: parts.join("."),
            is_static,
            is_wildcard,
            span: self.span_from(start),
        })
    }

    // Type declaration parsing. `Ok(None)` means an unsupported declaration was skipped.
    fn parse_type_decl(&mut self) -> ParseResult<Option<TypeDecl>> {
        let start = self.peek().location();
        let (annotations, modifiers) = self.parse_annotations_and_modifiers()?;

        match self.peek().token_type() {
            Token::Class => {
                let class = self.parse_class_decl(start, modifiers, annotations)?;
                Ok(Some(TypeDecl::Class(class)))
            }
            Token::Interface => {
                let interface = self.parse_interface_decl(start, modifiers, annotations)?;
                Ok(Some(TypeDecl::Interface(interface)))
            }
            Token::Enum => {
                let enum_decl = self.parse_enum_decl(start, modifiers, annotations)?;
                Ok(Some(TypeDecl::Enum(enum_decl)))
            }
            Token::At if self.kind_at(self.current + 1) == &Token::Interface => {
                self.skip_unsupported_type("annotation type declaration")?;
                Ok(None)
            }
            _ => Err(self.error_here("type declaration")),
        }
    }

    // Class declaration parsing
    fn parse_class_decl(
        &mut self,
        start: Location,
        modifiers: Vec<Modifier>,
        annotations: Vec<Annotation>,
    ) -> ParseResult<ClassDecl> {
        self.consume(&Token::Class, "'class'")?;

        let name = self.parse_identifier()?;
        let type_params = self.parse_optional_type_params()?;

        let extends = if self.match_token(&Token::Extends) {
            Some(self.parse_type_ref()?)
        } else {
            None
        };

        let implements = if self.match_token(&Token::Implements) {
            self.parse_type_list()?
        } else {
            Vec::new()
        };

        self.consume(&Token::LBrace, "'{' after class declaration")?;
        let members = self.parse_members(&name)?;

        Ok(ClassDecl {
            modifiers,
            annotations,
            name,
            type_params,
            extends,
            implements,
            members,
            span: self.span_from(start),
        })
    }

    fn parse_interface_decl(
        &mut self,
        start: Location,
        modifiers: Vec<Modifier>,
        annotations: Vec<Annotation>,
    ) -> ParseResult<InterfaceDecl> {
        self.consume(&Token::Interface, "'interface'")?;
        let name = self.parse_identifier()?;
        let type_params = self.parse_optional_type_params()?;

        let extends = if self.match_token(&Token::Extends) {
            self.parse_type_list()?
        } else {
            Vec::new()
        };

        self.consume(&Token::LBrace, "'{' after interface declaration")?;
        let members = self.parse_members(&name)?;

        Ok(InterfaceDecl {
            modifiers,
            annotations,
            name,
            type_params,
            extends,
            members,
            span: self.span_from(start),
        })
    }

    fn parse_enum_decl(
        &mut self,
        start: Location,
        modifiers: Vec<Modifier>,
        annotations: Vec<Annotation>,
    ) -> ParseResult<EnumDecl> {
        self.consume(&Token::Enum, "'enum'")?;
        let name = self.parse_identifier()?;

        let implements = if self.match_token(&Token::Implements) {
            self.parse_type_list()?
        } else {
            Vec::new()
        };

        self.consume(&Token::LBrace, "'{' after enum declaration")?;

        let mut constants = Vec::new();
        while !self.check(&Token::Semicolon) && !self.check(&Token::RBrace) && !self.is_at_end() {
            let before = self.current;
            match self.parse_enum_constant() {
                Ok(constant) => constants.push(constant),
                Err(e) => {
                    self.report(e)?;
                    self.synchronize_enum_constant(before);
                }
            }
            if !self.match_token(&Token::Comma) {
                break;
            }
        }

        let members = if self.match_token(&Token::Semicolon) {
            self.parse_members(&name)?
        } else {
            if !self.match_token(&Token::RBrace) {
                let e = self.error_here("',', ';' or '}' after enum constants");
                self.report(e)?;
                self.synchronize_in_type_body(self.current);
                self.match_token(&Token::RBrace);
            }
            Vec::new()
        };

        Ok(EnumDecl {
            modifiers,
            annotations,
            name,
            implements,
            constants,
            members,
            span: self.span_from(start),
        })
    }

    fn parse_enum_constant(&mut self) -> ParseResult<EnumConstant> {
        let start = self.peek().location();
        let annotations = self.parse_annotations()?;
        let name = self.parse_identifier()?;

        let arguments = if self.check(&Token::LParen) {
            Some(self.capture_parenthesized("enum constant arguments", true)?)
        } else {
            None
        };

        if self.check(&Token::LBrace) {
            let location = self.peek().location();
            self.skip_balanced();
            self.report(ParseError::unsupported("enum constant body", location))?;
        }

        Ok(EnumConstant { annotations, name, arguments, span: self.span_from(start) })
    }

    /// Parse members up to and including the closing brace of a type body
    fn parse_members(&mut self, type_name: &str) -> ParseResult<Vec<Member>> {
        let mut members = Vec::new();
        let mut iterations = 0usize;

        while !self.check(&Token::RBrace) && !self.is_at_end() {
            iterations += 1;
            if iterations > self.limits.max_type_members {
                let location = self.peek().location();
                self.report(ParseError::limit_exceeded("members in a type body", self.limits.max_type_members, location))?;
                self.skip_to_block_end();
                break;
            }
            if self.match_token(&Token::Semicolon) {
                continue;
            }
            let before = self.current;
            match self.parse_member(type_name) {
                Ok(mut parsed) => members.append(&mut parsed),
                Err(e) => {
                    self.report(e)?;
                    self.synchronize_in_type_body(before);
                }
            }
        }

        if !self.match_token(&Token::RBrace) {
            let e = self.error_here("'}' to close type body");
            self.report(e)?;
        }

        Ok(members)
    }

    /// Parse one member declaration. Multi-variable fields expand to one
    /// member per variable; skipped nested types yield no member.
    fn parse_member(&mut self, type_name: &str) -> ParseResult<Vec<Member>> {
        let start = self.peek().location();
        let (annotations, modifiers) = self.parse_annotations_and_modifiers()?;

        match self.peek().token_type() {
            Token::Class | Token::Interface | Token::Enum => {
                self.skip_unsupported_type("nested type declaration")?;
                return Ok(Vec::new());
            }
            Token::At if self.kind_at(self.current + 1) == &Token::Interface => {
                self.skip_unsupported_type("nested annotation type declaration")?;
                return Ok(Vec::new());
            }
            Token::LBrace => {
                let body = self.parse_block()?;
                let is_static = modifiers.contains(&Modifier::Static);
                let span = self.span_from(start);
                return Ok(vec![Member::Initializer(InitializerBlock { is_static, body, span })]);
            }
            _ => {}
        }

        let type_params = self.parse_optional_type_params()?;

        // Constructor: identifier immediately followed by '('
        if self.check(&Token::Identifier) && self.kind_at(self.current + 1) == &Token::LParen {
            let ctor = self.parse_constructor_decl(start, type_name, modifiers, annotations, type_params)?;
            return Ok(vec![Member::Constructor(ctor)]);
        }

        // 'void' can only start a method
        if self.check(&Token::Void) || self.lookahead_is_method_signature() {
            let method = self.parse_method_decl(start, modifiers, annotations, type_params)?;
            return Ok(vec![Member::Method(method)]);
        }

        if self.is_type_start() {
            let fields = self.parse_field_decls(start, modifiers, annotations)?;
            return Ok(fields.into_iter().map(Member::Field).collect());
        }

        Err(self.error_here("member declaration"))
    }

    // Lookahead: skip the type (generic arguments and array brackets included)
    // to the member name and check whether '(' follows it
    fn lookahead_is_method_signature(&self) -> bool {
        if !self.is_type_start() {
            return false;
        }
        match self.scan_type(self.current) {
            Some(i) => {
                self.kind_at(i) == &Token::Identifier && self.kind_at(i + 1) == &Token::LParen
            }
            None => false,
        }
    }

    // Lookahead: index just past a type reference starting at `i`, without consuming tokens
    fn scan_type(&self, mut i: usize) -> Option<usize> {
        let first = self.kind_at(i);
        if first.is_primitive_type() {
            i += 1;
        } else if first == &Token::Identifier {
            i += 1;
            loop {
                if self.kind_at(i) == &Token::Lt {
                    i = self.scan_angle(i)?;
                }
                if self.kind_at(i) == &Token::Dot && self.kind_at(i + 1) == &Token::Identifier {
                    i += 2;
                    continue;
                }
                break;
            }
        } else {
            return None;
        }
        // Array dimensions []*
        while self.kind_at(i) == &Token::LBracket && self.kind_at(i + 1) == &Token::RBracket {
            i += 2;
        }
        Some(i)
    }

    // Lookahead: index just past a balanced `<...>` list starting at `i`.
    // `>>` and `>>>` close two and three levels.
    fn scan_angle(&self, mut i: usize) -> Option<usize> {
        let mut depth: isize = 0;
        let mut steps = 0usize;
        loop {
            match self.kind_at(i) {
                Token::Lt => depth += 1,
                Token::Gt => depth -= 1,
                Token::RShift => depth -= 2,
                Token::URShift => depth -= 3,
                Token::Identifier | Token::Question | Token::Comma | Token::Dot |
                Token::Extends | Token::Super | Token::Amp |
                Token::LBracket | Token::RBracket => {}
                t if t.is_primitive_type() => {}
                _ => return None,
            }
            i += 1;
            steps += 1;
            if depth <= 0 {
                return Some(i);
            }
            if steps > self.limits.max_span_tokens {
                return None;
            }
        }
    }

    fn is_type_start(&self) -> bool {
        let kind = self.peek().token_type();
        kind == &Token::Identifier || kind.is_primitive_type()
    }

    fn parse_method_decl(
        &mut self,
        start: Location,
        modifiers: Vec<Modifier>,
        annotations: Vec<Annotation>,
        type_params: Option<String>,
    ) -> ParseResult<MethodDecl> {
        // Parse return type
        let return_type = if self.check(&Token::Void) {
            let location = self.advance().location();
            TypeRef::void(Span::single(location))
        } else {
            self.parse_type_ref()?
        };

        // Parse method name
        let name = self.parse_identifier()?;

        // Parse parameters
        let parameters = self.parse_parameters()?;

        // Parse throws clause
        let throws = if self.match_token(&Token::Throws) {
            self.parse_type_list()?
        } else {
            Vec::new()
        };

        // Parse method body or semicolon
        let body = if self.check(&Token::LBrace) {
            Some(self.parse_block()?)
        } else {
            self.consume(&Token::Semicolon, "'{' or ';' after method signature")?;
            None
        };

        Ok(MethodDecl {
            modifiers,
            annotations,
            type_params,
            return_type,
            name,
            parameters,
            throws,
            body,
            span: self.span_from(start),
        })
    }

    fn parse_constructor_decl(
        &mut self,
        start: Location,
        type_name: &str,
        modifiers: Vec<Modifier>,
        annotations: Vec<Annotation>,
        type_params: Option<String>,
    ) -> ParseResult<ConstructorDecl> {
        let name_location = self.peek().location();
        let name = self.parse_identifier()?;
        if name != type_name {
            log::warn!(
                "constructor-shaped member '{}' at {} does not match enclosing type '{}'",
                name, name_location, type_name
            );
        }

        let parameters = self.parse_parameters()?;
        let throws = if self.match_token(&Token::Throws) {
            self.parse_type_list()?
        } else {
            Vec::new()
        };
        let body = self.parse_block()?;

        Ok(ConstructorDecl {
            modifiers,
            annotations,
            type_params,
            name,
            parameters,
            throws,
            body,
            span: self.span_from(start),
        })
    }

    fn parse_field_decls(
        &mut self,
        start: Location,
        modifiers: Vec<Modifier>,
        annotations: Vec<Annotation>,
    ) -> ParseResult<Vec<FieldDecl>> {
        let type_ref = self.parse_type_ref()?;
        let declarators = self.parse_declarators()?;
        let span = self.span_from(start);

        Ok(declarators
            .into_iter()
            .map(|var| FieldDecl {
                modifiers: modifiers.clone(),
                annotations: annotations.clone(),
                type_ref: TypeRef { array_dims: type_ref.array_dims + var.array_dims, ..type_ref.clone() },
                name: var.name,
                initializer: var.initializer,
                span,
            })
            .collect())
    }

    /// `name [= init] (, name [= init])* ;`
    fn parse_declarators(&mut self) -> ParseResult<Vec<VariableDeclarator>> {
        let mut variables = Vec::new();
        loop {
            let start = self.peek().location();
            let name = self.parse_identifier()?;
            let mut array_dims = 0;
            while self.check(&Token::LBracket) && self.kind_at(self.current + 1) == &Token::RBracket {
                self.advance();
                self.advance();
                array_dims += 1;
            }
            let initializer = if self.match_token(&Token::Assign) {
                Some(self.capture_expression(&[Token::Comma, Token::Semicolon], "initializer")?)
            } else {
                None
            };
            variables.push(VariableDeclarator { name, array_dims, initializer, span: self.span_from(start) });

            if !self.match_token(&Token::Comma) {
                break;
            }
        }
        self.consume(&Token::Semicolon, "';' after variable declaration")?;
        Ok(variables)
    }

    fn parse_parameters(&mut self) -> ParseResult<Vec<Parameter>> {
        self.consume(&Token::LParen, "'(' before parameters")?;
        let mut parameters = Vec::new();
        if !self.check(&Token::RParen) {
            loop {
                parameters.push(self.parse_parameter()?);
                if !self.match_token(&Token::Comma) {
                    break;
                }
            }
        }
        self.consume(&Token::RParen, "')' after parameters")?;
        Ok(parameters)
    }

    fn parse_parameter(&mut self) -> ParseResult<Parameter> {
        let start = self.peek().location();
        let (annotations, modifiers) = self.parse_annotations_and_modifiers()?;
        let mut type_ref = self.parse_type_ref()?;
        // Varargs ( ... ) attaches to the type
        let varargs = self.match_token(&Token::Ellipsis);
        let name = self.parse_identifier()?;

        // C-style array dimensions after the name
        while self.check(&Token::LBracket) && self.kind_at(self.current + 1) == &Token::RBracket {
            self.advance();
            self.advance();
            type_ref.array_dims += 1;
        }

        Ok(Parameter {
            annotations,
            is_final: modifiers.contains(&Modifier::Final),
            type_ref,
            name,
            varargs,
            span: self.span_from(start),
        })
    }

    // Helper parsing methods
    fn parse_annotations_and_modifiers(&mut self) -> ParseResult<(Vec<Annotation>, Vec<Modifier>)> {
        let mut annotations = Vec::new();
        let mut modifiers = Vec::new();
        loop {
            if self.check(&Token::At) && self.kind_at(self.current + 1) != &Token::Interface {
                annotations.push(self.parse_annotation()?);
            } else if let Some(modifier) = Modifier::from_token(self.peek().token_type()) {
                // `synchronized (` opens a statement, not a modifier list
                if modifier == Modifier::Synchronized && self.kind_at(self.current + 1) == &Token::LParen {
                    break;
                }
                self.advance();
                if !modifiers.contains(&modifier) {
                    modifiers.push(modifier);
                }
            } else {
                break;
            }
        }
        Ok((annotations, modifiers))
    }

    fn parse_annotations(&mut self) -> ParseResult<Vec<Annotation>> {
        let mut annotations = Vec::new();
        while self.check(&Token::At) && self.kind_at(self.current + 1) != &Token::Interface {
            annotations.push(self.parse_annotation()?);
        }
        Ok(annotations)
    }

    fn parse_annotation(&mut self) -> ParseResult<Annotation> {
        let start = self.peek().location();
        self.consume(&Token::At, "'@'")?;
        let name = self.parse_qualified_name()?;
        let arguments = if self.check(&Token::LParen) {
            Some(self.capture_parenthesized("annotation arguments", true)?)
        } else {
            None
        };
        Ok(Annotation { name, arguments, span: self.span_from(start) })
    }

    fn parse_identifier(&mut self) -> ParseResult<String> {
        if self.check(&Token::Identifier) {
            Ok(self.advance().lexeme().to_string())
        } else {
            Err(self.error_here("identifier"))
        }
    }

    fn parse_qualified_name(&mut self) -> ParseResult<String> {
        let mut parts = vec![self.parse_identifier()?];
        while self.check(&Token::Dot) && self.kind_at(self.current + 1) == &Token::Identifier {
            self.advance();
            parts.push(self.parse_identifier()?);
        }
        Ok(parts.join("."))
    }

    fn parse_optional_type_params(&mut self) -> ParseResult<Option<String>> {
        if self.check(&Token::Lt) {
            Ok(Some(self.capture_angle_text()?))
        } else {
            Ok(None)
        }
    }

    fn parse_type_ref(&mut self) -> ParseResult<TypeRef> {
        let start = self.peek().location();
        // Either primitive or qualified identifier with generic arguments
        let mut name = if self.peek().token_type().is_primitive_type() {
            self.advance().lexeme().to_string()
        } else if self.check(&Token::Identifier) {
            let mut name = self.parse_identifier()?;
            loop {
                if self.check(&Token::Lt) {
                    name.push_str(&self.capture_angle_text()?);
                }
                if self.check(&Token::Dot) && self.kind_at(self.current + 1) == &Token::Identifier {
                    self.advance();
                    name.push('.');
                    name.push_str(&self.parse_identifier()?);
                    continue;
                }
                break;
            }
            name
        } else {
            return Err(self.error_here("type"));
        };
        name.shrink_to_fit();

        let mut array_dims = 0;
        while self.check(&Token::LBracket) && self.kind_at(self.current + 1) == &Token::RBracket {
            self.advance();
            self.advance();
            array_dims += 1;
        }

        Ok(TypeRef::new(name, array_dims, self.span_from(start)))
    }

    fn parse_type_list(&mut self) -> ParseResult<Vec<TypeRef>> {
        let mut types = vec![self.parse_type_ref()?];
        while self.match_token(&Token::Comma) {
            types.push(self.parse_type_ref()?);
        }
        Ok(types)
    }

    /// Capture a balanced `<...>` list and render it verbatim
    fn capture_angle_text(&mut self) -> ParseResult<String> {
        let mut tokens = Vec::new();
        let mut depth: isize = 0;
        loop {
            match self.peek().token_type() {
                Token::Lt => depth += 1,
                Token::Gt => depth -= 1,
                Token::RShift => depth -= 2,
                Token::URShift => depth -= 3,
                Token::Semicolon | Token::LBrace | Token::RBrace | Token::LParen |
                Token::RParen | Token::Assign | Token::Eof | Token::Invalid => {
                    return Err(self.error_here("'>' to close generic argument list"));
                }
                _ => {}
            }
            if tokens.len() >= self.limits.max_span_tokens {
                return Err(ParseError::limit_exceeded(
                    "tokens in a generic argument list",
                    self.limits.max_span_tokens,
                    self.peek().location(),
                ));
            }
            tokens.push(self.advance().clone());
            if depth <= 0 {
                break;
            }
        }
        Ok(join_type_tokens(&tokens))
    }

    // Block and statement parsing
    fn parse_block(&mut self) -> ParseResult<Block> {
        // The depth check runs before '{' is consumed so that recovery skips
        // the whole brace group
        self.nested(|p| {
            let start = p.peek().location();
            p.consume(&Token::LBrace, "'{'")?;

            let mut statements = Vec::new();
            p.parse_block_statements(&mut statements, false)?;

            if !p.match_token(&Token::RBrace) {
                let e = p.error_here("'}' to close block");
                p.report(e)?;
            }

            Ok(Block { statements, span: p.span_from(start) })
        })
    }

    /// Parse statements until the enclosing `}` (or, inside a switch, the next case label)
    fn parse_block_statements(&mut self, statements: &mut Vec<Stmt>, in_switch: bool) -> ParseResult<()> {
        let mut iterations = 0usize;
        loop {
            if self.is_at_end() || self.check(&Token::RBrace) {
                break;
            }
            if in_switch && (self.check(&Token::Case) || self.check(&Token::Default)) {
                break;
            }
            iterations += 1;
            if iterations > self.limits.max_block_statements {
                let location = self.peek().location();
                self.report(ParseError::limit_exceeded("statements in a block", self.limits.max_block_statements, location))?;
                self.skip_to_block_end();
                break;
            }
            // Skip empty statements
            if self.match_token(&Token::Semicolon) {
                continue;
            }
            if let Err(e) = self.parse_block_statement(statements) {
                self.report(e)?;
                self.synchronize_in_block();
            }
        }
        Ok(())
    }

    /// Parse one statement in block position, where declarations with
    /// modifiers and skipped constructs are allowed
    fn parse_block_statement(&mut self, out: &mut Vec<Stmt>) -> ParseResult<()> {
        match self.peek().token_type() {
            Token::Class | Token::Interface | Token::Enum => {
                return self.skip_unsupported_type("local type declaration");
            }
            Token::Try if self.kind_at(self.current + 1) == &Token::LParen => {
                return self.skip_try_with_resources();
            }
            _ => {}
        }

        if self.starts_modified_declaration() {
            let start = self.peek().location();
            let (annotations, modifiers) = self.parse_annotations_and_modifiers()?;
            if matches!(self.peek().token_type(), Token::Class | Token::Interface | Token::Enum) {
                return self.skip_unsupported_type("local type declaration");
            }
            let fields = self.parse_field_decls(start, modifiers, annotations)?;
            out.extend(fields.into_iter().map(Stmt::Field));
            return Ok(());
        }

        out.push(self.parse_statement()?);
        Ok(())
    }

    fn starts_modified_declaration(&self) -> bool {
        match self.peek().token_type() {
            Token::At => true,
            Token::Synchronized => self.kind_at(self.current + 1) != &Token::LParen,
            Token::Default => false,
            kind => kind.is_modifier(),
        }
    }

    fn parse_statement(&mut self) -> ParseResult<Stmt> {
        self.nested(|p| p.parse_statement_inner())
    }

    fn parse_statement_inner(&mut self) -> ParseResult<Stmt> {
        let start = self.peek().location();

        match self.peek().token_type() {
            Token::LBrace => return Ok(Stmt::Block(self.parse_block()?)),
            Token::Semicolon => {
                self.advance();
                return Ok(Stmt::Block(Block { statements: Vec::new(), span: self.span_from(start) }));
            }
            Token::Return => {
                self.advance();
                let value = if self.check(&Token::Semicolon) {
                    None
                } else {
                    Some(self.capture_expression(&[Token::Semicolon], "return value")?)
                };
                self.consume(&Token::Semicolon, "';' after return")?;
                return Ok(Stmt::Return(ReturnStmt { value, span: self.span_from(start) }));
            }
            Token::If => return self.parse_if_stmt(),
            Token::For => {
                self.advance();
                let header = self.capture_parenthesized("for header", false)?;
                let body = Box::new(self.parse_statement()?);
                return Ok(Stmt::For(ForStmt { header, body, span: self.span_from(start) }));
            }
            Token::While => return self.parse_while_stmt(),
            Token::Do => return self.parse_do_while_stmt(),
            Token::Try if self.kind_at(self.current + 1) == &Token::LParen => {
                self.skip_try_with_resources()?;
                return Ok(Stmt::Block(Block { statements: Vec::new(), span: self.span_from(start) }));
            }
            Token::Try => return self.parse_try_stmt(),
            Token::Switch => return self.parse_switch_stmt(),
            Token::Throw => {
                self.advance();
                let expr = self.capture_expression(&[Token::Semicolon], "thrown expression")?;
                self.consume(&Token::Semicolon, "';' after throw")?;
                return Ok(Stmt::Throw(ThrowStmt { expr, span: self.span_from(start) }));
            }
            Token::Break | Token::Continue => {
                let is_break = self.check(&Token::Break);
                self.advance();
                let label = if self.check(&Token::Identifier) { Some(self.parse_identifier()?) } else { None };
                self.consume(&Token::Semicolon, "';' after break or continue")?;
                let span = self.span_from(start);
                return Ok(if is_break {
                    Stmt::Break(BreakStmt { label, span })
                } else {
                    Stmt::Continue(ContinueStmt { label, span })
                });
            }
            Token::Synchronized if self.kind_at(self.current + 1) == &Token::LParen => {
                self.advance();
                let lock = self.capture_parenthesized("lock expression", false)?;
                let body = self.parse_block()?;
                return Ok(Stmt::Synchronized(SynchronizedStmt { lock, body, span: self.span_from(start) }));
            }
            Token::Assert => {
                self.advance();
                let condition = self.capture_expression(&[Token::Colon, Token::Semicolon], "assertion")?;
                let message = if self.match_token(&Token::Colon) {
                    Some(self.capture_expression(&[Token::Semicolon], "assertion message")?)
                } else {
                    None
                };
                self.consume(&Token::Semicolon, "';' after assert")?;
                return Ok(Stmt::Assert(AssertStmt { condition, message, span: self.span_from(start) }));
            }
            Token::Identifier if self.kind_at(self.current + 1) == &Token::Colon => {
                let label = self.parse_identifier()?;
                self.advance(); // ':'
                let body = Box::new(self.parse_statement()?);
                return Ok(Stmt::Labeled(LabeledStmt { label, body, span: self.span_from(start) }));
            }
            Token::Class | Token::Interface | Token::Enum => {
                return Err(ParseError::unsupported("local type declaration", start));
            }
            Token::Else | Token::Catch | Token::Finally | Token::Case | Token::Default => {
                return Err(self.error_here("statement"));
            }
            _ => {}
        }

        // Variable declaration starting with a type (use lookahead)
        if self.is_variable_declaration_start() {
            return self.parse_variable_declaration_stmt();
        }

        // Expression statement
        let expr = self.capture_expression(&[Token::Semicolon], "expression")?;
        self.consume(&Token::Semicolon, "';' after expression")?;
        Ok(Stmt::Expression(ExprStmt { expr, span: self.span_from(start) }))
    }

    fn is_variable_declaration_start(&self) -> bool {
        match self.scan_type(self.current) {
            Some(i) => {
                self.kind_at(i) == &Token::Identifier
                    && matches!(
                        self.kind_at(i + 1),
                        Token::Assign | Token::Semicolon | Token::Comma | Token::LBracket
                    )
            }
            None => false,
        }
    }

    fn parse_variable_declaration_stmt(&mut self) -> ParseResult<Stmt> {
        let start = self.peek().location();
        let type_ref = self.parse_type_ref()?;
        let variables = self.parse_declarators()?;
        Ok(Stmt::Declaration(VarDeclStmt { type_ref, variables, span: self.span_from(start) }))
    }

    fn parse_if_stmt(&mut self) -> ParseResult<Stmt> {
        let start = self.peek().location();
        self.consume(&Token::If, "'if'")?;
        let condition = self.capture_parenthesized("condition", false)?;
        let then_branch = Box::new(self.parse_statement()?);
        let else_branch = if self.match_token(&Token::Else) {
            Some(Box::new(self.parse_statement()?))
        } else {
            None
        };
        Ok(Stmt::If(IfStmt { condition, then_branch, else_branch, span: self.span_from(start) }))
    }

    fn parse_while_stmt(&mut self) -> ParseResult<Stmt> {
        let start = self.peek().location();
        self.consume(&Token::While, "'while'")?;
        let condition = self.capture_parenthesized("condition", false)?;
        let body = Box::new(self.parse_statement()?);
        Ok(Stmt::While(WhileStmt { condition, body, span: self.span_from(start) }))
    }

    fn parse_do_while_stmt(&mut self) -> ParseResult<Stmt> {
        let start = self.peek().location();
        self.consume(&Token::Do, "'do'")?;
        let body = Box::new(self.parse_statement()?);
        self.consume(&Token::While, "'while' after do-body")?;
        let condition = self.capture_parenthesized("condition", false)?;
        self.consume(&Token::Semicolon, "';' after do-while condition")?;
        Ok(Stmt::DoWhile(DoWhileStmt { body, condition, span: self.span_from(start) }))
    }

    fn parse_try_stmt(&mut self) -> ParseResult<Stmt> {
        let start = self.peek().location();
        self.consume(&Token::Try, "'try'")?;
        let try_block = self.parse_block()?;

        let mut catch_clauses = Vec::new();
        while self.check(&Token::Catch) {
            let catch_start = self.advance().location();
            let parameter = self.capture_parenthesized("catch parameter", false)?;
            let body = self.parse_block()?;
            catch_clauses.push(CatchClause { parameter, body, span: self.span_from(catch_start) });
        }

        let finally_block = if self.match_token(&Token::Finally) {
            Some(self.parse_block()?)
        } else {
            None
        };

        if catch_clauses.is_empty() && finally_block.is_none() {
            log::warn!("try statement at {} has neither catch nor finally", start);
        }

        Ok(Stmt::Try(TryStmt { try_block, catch_clauses, finally_block, span: self.span_from(start) }))
    }

    fn parse_switch_stmt(&mut self) -> ParseResult<Stmt> {
        let start = self.peek().location();
        self.consume(&Token::Switch, "'switch'")?;
        let selector = self.capture_parenthesized("switch selector", false)?;
        self.consume(&Token::LBrace, "'{' to open switch body")?;

        let mut cases = Vec::new();
        while !self.check(&Token::RBrace) && !self.is_at_end() {
            let case_start = self.peek().location();
            let labels = match self.parse_case_labels() {
                Ok(labels) => labels,
                Err(e) => {
                    self.report(e)?;
                    self.synchronize_in_switch();
                    continue;
                }
            };
            if self.check(&Token::Arrow) {
                let location = self.peek().location();
                self.report(ParseError::unsupported("switch rule ('->')", location))?;
                self.skip_to_block_end();
                break;
            }

            let mut statements = Vec::new();
            if let Err(e) = self.nested(|p| p.parse_block_statements(&mut statements, true)) {
                self.report(e)?;
                self.skip_to_block_end();
                break;
            }
            cases.push(SwitchCase { labels, statements, span: self.span_from(case_start) });
        }
        if !self.match_token(&Token::RBrace) {
            let e = self.error_here("'}' to close switch body");
            self.report(e)?;
        }

        Ok(Stmt::Switch(SwitchStmt { selector, cases, span: self.span_from(start) }))
    }

    /// One or more `case X:` / `default:` labels. Stops in front of `->`
    /// so the caller can skip a rule-style switch.
    fn parse_case_labels(&mut self) -> ParseResult<Vec<CaseLabel>> {
        let mut labels = Vec::new();
        while self.check(&Token::Case) || self.check(&Token::Default) {
            if self.match_token(&Token::Default) {
                labels.push(CaseLabel::Default);
            } else {
                self.advance(); // 'case'
                let label = self.capture_span(&[Token::Colon, Token::Arrow], false, "case label")?;
                labels.push(CaseLabel::Case(label));
            }
            if self.check(&Token::Arrow) {
                return Ok(labels);
            }
            self.consume(&Token::Colon, "':' after case label")?;
        }
        if labels.is_empty() {
            return Err(self.error_here("'case' or 'default'"));
        }
        Ok(labels)
    }

    // Opaque span capture

    /// Capture an expression that must not be empty
    fn capture_expression(&mut self, stops: &[Token], what: &str) -> ParseResult<TokenSpan> {
        self.capture_span(stops, true, what)
    }

    /// Capture the tokens between a pair of parentheses, consuming both
    fn capture_parenthesized(&mut self, what: &str, allow_empty: bool) -> ParseResult<TokenSpan> {
        self.consume(&Token::LParen, &format!("'(' before {}", what))?;
        let span = if allow_empty && self.check(&Token::RParen) {
            TokenSpan::default()
        } else {
            self.capture_span(&[Token::RParen], false, what)?
        };
        self.consume(&Token::RParen, &format!("')' after {}", what))?;
        Ok(span)
    }

    /// Capture tokens up to (not including) a stop token at nesting depth zero.
    ///
    /// Brackets are tracked with a stack, so the captured span is always
    /// balanced; an unmatched closer at depth zero ends the span. With
    /// `guard_boundary`, the span also ends before tokens that can only
    /// start a new statement or member (a missing `;`).
    fn capture_span(&mut self, stops: &[Token], guard_boundary: bool, what: &str) -> ParseResult<TokenSpan> {
        let mut tokens: Vec<LexicalToken> = Vec::new();
        let mut closers: Vec<Token> = Vec::new();

        loop {
            let kind = self.peek().token_type();
            match kind {
                Token::Eof => {
                    if !closers.is_empty() {
                        return Err(self.error_here(&format!("closing bracket in {}", what)));
                    }
                    break;
                }
                Token::Invalid => return Err(self.error_here(what)),
                _ => {}
            }

            if closers.is_empty() {
                if stops.contains(kind) || matches!(kind, Token::RParen | Token::RBracket | Token::RBrace) {
                    break;
                }
                if guard_boundary && self.at_statement_boundary(tokens.last()) {
                    break;
                }
            }

            match kind {
                Token::LParen => closers.push(Token::RParen),
                Token::LBracket => closers.push(Token::RBracket),
                Token::LBrace => closers.push(Token::RBrace),
                Token::RParen | Token::RBracket | Token::RBrace => {
                    if closers.last() != Some(kind) {
                        return Err(self.error_here(&format!("matching bracket in {}", what)));
                    }
                    closers.pop();
                }
                _ => {}
            }

            if tokens.len() >= self.limits.max_span_tokens {
                return Err(ParseError::limit_exceeded(
                    &format!("tokens in {}", what),
                    self.limits.max_span_tokens,
                    self.peek().location(),
                ));
            }
            tokens.push(self.advance().clone());
        }

        if tokens.is_empty() {
            return Err(self.error_here(what));
        }
        Ok(TokenSpan::new(tokens))
    }

    /// True when the current token cannot continue an expression at depth zero
    fn at_statement_boundary(&self, previous: Option<&LexicalToken>) -> bool {
        let kind = self.peek().token_type();
        // `String.class` is a class literal, not a declaration
        let after_dot = previous.map_or(false, |p| p.is(&Token::Dot));
        if (!after_dot && kind == &Token::Class)
            || (kind == &Token::Void && self.kind_at(self.current + 1) != &Token::Dot)
            || matches!(kind, Token::At | Token::Interface | Token::Enum | Token::Package | Token::Import)
            || (kind.is_modifier() && kind != &Token::Default)
        {
            return true;
        }
        // Two operands in a row: `x = 5 int y` or `x = a b = c`
        let starts_operand = kind == &Token::Identifier || kind.is_primitive_type();
        let ends_operand = previous.map_or(false, |p| {
            matches!(p.token_type(), Token::Identifier | Token::RBracket) || p.token_type().is_literal()
        });
        starts_operand && ends_operand
    }

    // Skipping and resynchronization

    /// Skip a balanced bracket group starting at the current opener
    fn skip_balanced(&mut self) {
        let mut depth = 0usize;
        while !self.is_at_end() {
            match self.peek().token_type() {
                Token::LParen | Token::LBracket | Token::LBrace => depth += 1,
                Token::RParen | Token::RBracket | Token::RBrace => {
                    depth = depth.saturating_sub(1);
                    if depth == 0 {
                        self.advance();
                        return;
                    }
                }
                _ => {}
            }
            self.advance();
            if depth == 0 {
                return;
            }
        }
    }

    /// Skip to the closing brace of the current block, leaving it unconsumed
    fn skip_to_block_end(&mut self) {
        let mut depth = 0usize;
        while !self.is_at_end() {
            match self.peek().token_type() {
                Token::RBrace if depth == 0 => return,
                Token::LBrace => depth += 1,
                Token::RBrace => depth -= 1,
                _ => {}
            }
            self.advance();
        }
    }

    /// Skip a type declaration the model does not represent, header and body
    fn skip_unsupported_type(&mut self, construct: &str) -> ParseResult<()> {
        let location = self.peek().location();
        while !self.is_at_end() && !self.check(&Token::LBrace) && !self.check(&Token::Semicolon) {
            self.advance();
        }
        if self.check(&Token::LBrace) {
            self.skip_balanced();
        } else {
            self.match_token(&Token::Semicolon);
        }
        self.report(ParseError::unsupported(construct, location))
    }

    /// Skip `try (resources) { } catch (...) { } finally { }` as one unit
    fn skip_try_with_resources(&mut self) -> ParseResult<()> {
        let location = self.peek().location();
        self.advance(); // 'try'
        self.skip_balanced();
        if self.check(&Token::LBrace) {
            self.skip_balanced();
        }
        while self.match_token(&Token::Catch) {
            if self.check(&Token::LParen) {
                self.skip_balanced();
            }
            if self.check(&Token::LBrace) {
                self.skip_balanced();
            }
        }
        if self.match_token(&Token::Finally) && self.check(&Token::LBrace) {
            self.skip_balanced();
        }
        self.report(ParseError::unsupported("try-with-resources statement", location))
    }

    /// Statement-level recovery: skip to the next `;` at the same depth,
    /// past a brace group that returns to that depth, or up to the
    /// enclosing block's `}`
    fn synchronize_in_block(&mut self) {
        let mut depth = 0usize;
        while !self.is_at_end() {
            match self.peek().token_type() {
                Token::Semicolon if depth == 0 => {
                    self.advance();
                    return;
                }
                Token::RBrace if depth == 0 => return,
                Token::LBrace | Token::LParen | Token::LBracket => depth += 1,
                Token::RBrace => {
                    depth -= 1;
                    if depth == 0 {
                        self.advance();
                        return;
                    }
                }
                Token::RParen | Token::RBracket => depth = depth.saturating_sub(1),
                _ => {}
            }
            self.advance();
        }
    }

    /// Switch-body recovery: skip to the next `case`/`default` label or up
    /// to the switch's own `}`
    fn synchronize_in_switch(&mut self) {
        let mut depth = 0usize;
        while !self.is_at_end() {
            match self.peek().token_type() {
                Token::Case | Token::Default | Token::RBrace if depth == 0 => return,
                Token::LBrace | Token::LParen | Token::LBracket => depth += 1,
                Token::RBrace | Token::RParen | Token::RBracket => depth = depth.saturating_sub(1),
                _ => {}
            }
            self.advance();
        }
    }

    /// Member-level recovery: skip to the next `;`, past a brace group,
    /// or up to a token that starts a new member
    fn synchronize_in_type_body(&mut self, start: usize) {
        let mut depth = 0usize;
        while !self.is_at_end() {
            let at_start = self.current == start;
            match self.peek().token_type() {
                Token::Semicolon if depth == 0 => {
                    self.advance();
                    return;
                }
                Token::RBrace if depth == 0 => return,
                _ if depth == 0 && !at_start && self.at_member_start() => return,
                Token::LBrace | Token::LParen | Token::LBracket => depth += 1,
                Token::RBrace => {
                    depth -= 1;
                    if depth == 0 {
                        self.advance();
                        return;
                    }
                }
                Token::RParen | Token::RBracket => depth = depth.saturating_sub(1),
                _ => {}
            }
            self.advance();
        }
    }

    /// True when the current token can begin a member: an annotation, a
    /// modifier, `void`, a constructor name, or a type followed by a name
    fn at_member_start(&self) -> bool {
        match self.peek().token_type() {
            Token::At | Token::Void => true,
            kind if kind.is_modifier() => true,
            Token::Identifier if self.kind_at(self.current + 1) == &Token::LParen => true,
            _ => self
                .scan_type(self.current)
                .map_or(false, |i| self.kind_at(i) == &Token::Identifier),
        }
    }

    /// Enum constant recovery: skip to the next `,`, `;` or `}` at depth zero
    fn synchronize_enum_constant(&mut self, start: usize) {
        let mut depth = 0usize;
        while !self.is_at_end() {
            match self.peek().token_type() {
                Token::Comma | Token::Semicolon | Token::RBrace if depth == 0 => {
                    if self.current == start && self.check(&Token::Comma) {
                        self.advance();
                    }
                    return;
                }
                Token::LBrace | Token::LParen | Token::LBracket => depth += 1,
                Token::RBrace | Token::RParen | Token::RBracket => depth = depth.saturating_sub(1),
                _ => {}
            }
            self.advance();
        }
    }

    /// Top-level recovery: skip to the next token that can start a type
    /// declaration, or past a brace group that returns to depth zero
    fn synchronize_toplevel(&mut self, start: usize) {
        let mut depth = 0usize;
        while !self.is_at_end() {
            let at_start = self.current == start;
            match self.peek().token_type() {
                kind if depth == 0 && !at_start && (
                    matches!(kind, Token::Package | Token::Import | Token::Class | Token::Interface | Token::Enum | Token::At)
                    || kind.is_modifier()
                ) => return,
                Token::LBrace | Token::LParen | Token::LBracket => depth += 1,
                Token::RBrace => {
                    depth = depth.saturating_sub(1);
                    if depth == 0 {
                        self.advance();
                        return;
                    }
                }
                Token::RParen | Token::RBracket => depth = depth.saturating_sub(1),
                _ => {}
            }
            self.advance();
        }
    }
}

/// Render the tokens of a generic argument or type parameter list as text:
/// words are separated by a space, commas and `&` bounds get spacing
fn join_type_tokens(tokens: &[LexicalToken]) -> String {
    let mut text = String::new();
    let mut previous: Option<&Token> = None;
    for token in tokens {
        let kind = token.token_type();
        if let Some(prev) = previous {
            if (kind.is_word() && (prev.is_word() || prev == &Token::Question)) || kind == &Token::Amp {
                text.push(' ');
            }
        }
        text.push_str(token.lexeme());
        if matches!(kind, Token::Comma | Token::Amp) {
            text.push(' ');
        }
        previous = Some(kind);
    }
    text
}

/// Parse source code into a compilation unit
pub fn parse(source: &str) -> CompilationUnit {
    Parser::from_source(source).parse()
}
