use super::{AstNode, AstVisitor, Location, Span};
use crate::parser::lexer::{LexicalToken, Token};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// Package and Import Declarations
#[derive(Debug, Clone)]
pub struct PackageDecl {
    pub name: String,
    pub span: Span,
}

impl AstNode for PackageDecl {
    fn span(&self) -> Span {
        self.span
    }

    fn accept<V: AstVisitor>(&self, visitor: &mut V) {
        visitor.visit_package_decl(self)
    }
}

#[derive(Debug, Clone)]
pub struct ImportDecl {
    /// Imported name without the trailing `.*` of wildcard imports
    pub name: String,
    pub is_static: bool,
    pub is_wildcard: bool,
    pub span: Span,
}

impl AstNode for ImportDecl {
    fn span(&self) -> Span {
        self.span
    }

    fn accept<V: AstVisitor>(&self, visitor: &mut V) {
        visitor.visit_import_decl(self)
    }
}

// Type Declarations
#[derive(Debug, Clone)]
pub enum TypeDecl {
    Class(ClassDecl),
    Interface(InterfaceDecl),
    Enum(EnumDecl),
}

impl TypeDecl {
    pub fn name(&self) -> &str {
        match self {
            TypeDecl::Class(c) => &c.name,
            TypeDecl::Interface(i) => &i.name,
            TypeDecl::Enum(e) => &e.name,
        }
    }

    pub fn modifiers(&self) -> &[Modifier] {
        match self {
            TypeDecl::Class(c) => &c.modifiers,
            TypeDecl::Interface(i) => &i.modifiers,
            TypeDecl::Enum(e) => &e.modifiers,
        }
    }

    pub fn members(&self) -> &[Member] {
        match self {
            TypeDecl::Class(c) => &c.members,
            TypeDecl::Interface(i) => &i.members,
            TypeDecl::Enum(e) => &e.members,
        }
    }

    /// Methods declared directly in this type, in declaration order
    pub fn methods(&self) -> impl Iterator<Item = &MethodDecl> {
        self.members().iter().filter_map(|m| match m {
            Member::Method(method) => Some(method),
            _ => None,
        })
    }

    pub fn constructors(&self) -> impl Iterator<Item = &ConstructorDecl> {
        self.members().iter().filter_map(|m| match m {
            Member::Constructor(ctor) => Some(ctor),
            _ => None,
        })
    }

    pub fn fields(&self) -> impl Iterator<Item = &FieldDecl> {
        self.members().iter().filter_map(|m| match m {
            Member::Field(field) => Some(field),
            _ => None,
        })
    }
}

impl AstNode for TypeDecl {
    fn span(&self) -> Span {
        match self {
            TypeDecl::Class(c) => c.span(),
            TypeDecl::Interface(i) => i.span(),
            TypeDecl::Enum(e) => e.span(),
        }
    }

    fn accept<V: AstVisitor>(&self, visitor: &mut V) {
        match self {
            TypeDecl::Class(c) => c.accept(visitor),
            TypeDecl::Interface(i) => i.accept(visitor),
            TypeDecl::Enum(e) => e.accept(visitor),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ClassDecl {
    pub modifiers: Vec<Modifier>,
    pub annotations: Vec<Annotation>,
    pub name: String,
    /// Verbatim type parameter list, e.g. `<K, V extends Comparable<V>>`
    pub type_params: Option<String>,
    pub extends: Option<TypeRef>,
    pub implements: Vec<TypeRef>,
    pub members: Vec<Member>,
    pub span: Span,
}

impl AstNode for ClassDecl {
    fn span(&self) -> Span {
        self.span
    }

    fn accept<V: AstVisitor>(&self, visitor: &mut V) {
        visitor.visit_class_decl(self)
    }
}

#[derive(Debug, Clone)]
pub struct InterfaceDecl {
    pub modifiers: Vec<Modifier>,
    pub annotations: Vec<Annotation>,
    pub name: String,
    pub type_params: Option<String>,
    pub extends: Vec<TypeRef>,
    pub members: Vec<Member>,
    pub span: Span,
}

impl AstNode for InterfaceDecl {
    fn span(&self) -> Span {
        self.span
    }

    fn accept<V: AstVisitor>(&self, visitor: &mut V) {
        visitor.visit_interface_decl(self)
    }
}

#[derive(Debug, Clone)]
pub struct EnumDecl {
    pub modifiers: Vec<Modifier>,
    pub annotations: Vec<Annotation>,
    pub name: String,
    pub implements: Vec<TypeRef>,
    pub constants: Vec<EnumConstant>,
    pub members: Vec<Member>,
    pub span: Span,
}

impl AstNode for EnumDecl {
    fn span(&self) -> Span {
        self.span
    }

    fn accept<V: AstVisitor>(&self, visitor: &mut V) {
        visitor.visit_enum_decl(self)
    }
}

#[derive(Debug, Clone)]
pub struct EnumConstant {
    pub annotations: Vec<Annotation>,
    pub name: String,
    /// Constructor arguments between the parentheses, if any were written
    pub arguments: Option<TokenSpan>,
    pub span: Span,
}

impl AstNode for EnumConstant {
    fn span(&self) -> Span {
        self.span
    }

    fn accept<V: AstVisitor>(&self, visitor: &mut V) {
        visitor.visit_enum_constant(self)
    }
}

// Modifiers and Annotations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Modifier {
    Public,
    Protected,
    Private,
    Abstract,
    Static,
    Final,
    Native,
    Synchronized,
    Transient,
    Volatile,
    Strictfp,
    // Java 8: default interface method
    Default,
}

impl Modifier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Modifier::Public => "public",
            Modifier::Protected => "protected",
            Modifier::Private => "private",
            Modifier::Abstract => "abstract",
            Modifier::Static => "static",
            Modifier::Final => "final",
            Modifier::Native => "native",
            Modifier::Synchronized => "synchronized",
            Modifier::Transient => "transient",
            Modifier::Volatile => "volatile",
            Modifier::Strictfp => "strictfp",
            Modifier::Default => "default",
        }
    }

    /// Map a modifier keyword token to its modifier
    pub fn from_token(token: &Token) -> Option<Self> {
        let modifier = match token {
            Token::Public => Modifier::Public,
            Token::Protected => Modifier::Protected,
            Token::Private => Modifier::Private,
            Token::Abstract => Modifier::Abstract,
            Token::Static => Modifier::Static,
            Token::Final => Modifier::Final,
            Token::Native => Modifier::Native,
            Token::Synchronized => Modifier::Synchronized,
            Token::Transient => Modifier::Transient,
            Token::Volatile => Modifier::Volatile,
            Token::Strictfp => Modifier::Strictfp,
            Token::Default => Modifier::Default,
            _ => return None,
        };
        Some(modifier)
    }
}

impl fmt::Display for Modifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Modifier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let modifier = match s {
            "public" => Modifier::Public,
            "protected" => Modifier::Protected,
            "private" => Modifier::Private,
            "abstract" => Modifier::Abstract,
            "static" => Modifier::Static,
            "final" => Modifier::Final,
            "native" => Modifier::Native,
            "synchronized" => Modifier::Synchronized,
            "transient" => Modifier::Transient,
            "volatile" => Modifier::Volatile,
            "strictfp" => Modifier::Strictfp,
            "default" => Modifier::Default,
            other => return Err(format!("unknown modifier '{}'", other)),
        };
        Ok(modifier)
    }
}

#[derive(Debug, Clone)]
pub struct Annotation {
    /// Qualified annotation name without the leading `@`
    pub name: String,
    /// Raw argument tokens between the parentheses; `None` for marker annotations
    pub arguments: Option<TokenSpan>,
    pub span: Span,
}

impl AstNode for Annotation {
    fn span(&self) -> Span {
        self.span
    }

    fn accept<V: AstVisitor>(&self, visitor: &mut V) {
        visitor.visit_annotation(self)
    }
}

// Type References
#[derive(Debug, Clone, PartialEq)]
pub struct TypeRef {
    /// Base name, including any verbatim generic arguments (`Map<String, Integer>`)
    pub name: String,
    pub array_dims: usize,
    pub span: Span,
}

impl TypeRef {
    pub fn new(name: impl Into<String>, array_dims: usize, span: Span) -> Self {
        Self { name: name.into(), array_dims, span }
    }

    /// The `void` pseudo-type used as a method return type
    pub fn void(span: Span) -> Self {
        Self::new("void", 0, span)
    }

    pub fn is_array(&self) -> bool {
        self.array_dims > 0
    }

    pub fn is_void(&self) -> bool {
        self.name == "void" && self.array_dims == 0
    }

    /// Base name with the generic argument list stripped
    pub fn erasure(&self) -> &str {
        match self.name.find('<') {
            Some(idx) => &self.name[..idx],
            None => &self.name,
        }
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        for _ in 0..self.array_dims {
            f.write_str("[]")?;
        }
        Ok(())
    }
}

impl AstNode for TypeRef {
    fn span(&self) -> Span {
        self.span
    }

    fn accept<V: AstVisitor>(&self, visitor: &mut V) {
        visitor.visit_type_ref(self)
    }
}

// Class, Interface and Enum Members
#[derive(Debug, Clone)]
pub enum Member {
    Field(FieldDecl),
    Method(MethodDecl),
    Constructor(ConstructorDecl),
    Initializer(InitializerBlock),
}

impl AstNode for Member {
    fn span(&self) -> Span {
        match self {
            Member::Field(f) => f.span,
            Member::Method(m) => m.span,
            Member::Constructor(c) => c.span,
            Member::Initializer(i) => i.span,
        }
    }

    fn accept<V: AstVisitor>(&self, visitor: &mut V) {
        visitor.visit_member(self)
    }
}

#[derive(Debug, Clone)]
pub struct FieldDecl {
    pub modifiers: Vec<Modifier>,
    pub annotations: Vec<Annotation>,
    pub type_ref: TypeRef,
    pub name: String,
    pub initializer: Option<TokenSpan>,
    pub span: Span,
}

impl AstNode for FieldDecl {
    fn span(&self) -> Span {
        self.span
    }

    fn accept<V: AstVisitor>(&self, visitor: &mut V) {
        visitor.visit_field_decl(self)
    }
}

#[derive(Debug, Clone)]
pub struct MethodDecl {
    pub modifiers: Vec<Modifier>,
    pub annotations: Vec<Annotation>,
    pub type_params: Option<String>,
    pub return_type: TypeRef,
    pub name: String,
    pub parameters: Vec<Parameter>,
    pub throws: Vec<TypeRef>,
    /// `None` for abstract and interface signatures terminated by `;`
    pub body: Option<Block>,
    pub span: Span,
}

impl AstNode for MethodDecl {
    fn span(&self) -> Span {
        self.span
    }

    fn accept<V: AstVisitor>(&self, visitor: &mut V) {
        visitor.visit_method_decl(self)
    }
}

#[derive(Debug, Clone)]
pub struct ConstructorDecl {
    pub modifiers: Vec<Modifier>,
    pub annotations: Vec<Annotation>,
    pub type_params: Option<String>,
    pub name: String,
    pub parameters: Vec<Parameter>,
    pub throws: Vec<TypeRef>,
    pub body: Block,
    pub span: Span,
}

impl AstNode for ConstructorDecl {
    fn span(&self) -> Span {
        self.span
    }

    fn accept<V: AstVisitor>(&self, visitor: &mut V) {
        visitor.visit_constructor_decl(self)
    }
}

#[derive(Debug, Clone)]
pub struct Parameter {
    pub annotations: Vec<Annotation>,
    pub is_final: bool,
    pub type_ref: TypeRef,
    pub name: String,
    pub varargs: bool,
    pub span: Span,
}

impl AstNode for Parameter {
    fn span(&self) -> Span {
        self.span
    }

    fn accept<V: AstVisitor>(&self, visitor: &mut V) {
        visitor.visit_parameter(self)
    }
}

#[derive(Debug, Clone)]
pub struct InitializerBlock {
    pub is_static: bool,
    pub body: Block,
    pub span: Span,
}

impl AstNode for InitializerBlock {
    fn span(&self) -> Span {
        self.span
    }

    fn accept<V: AstVisitor>(&self, visitor: &mut V) {
        visitor.visit_initializer(self)
    }
}

// Statements
#[derive(Debug, Clone, Default)]
pub struct Block {
    pub statements: Vec<Stmt>,
    pub span: Span,
}

impl AstNode for Block {
    fn span(&self) -> Span {
        self.span
    }

    fn accept<V: AstVisitor>(&self, visitor: &mut V) {
        visitor.visit_block(self)
    }
}

#[derive(Debug, Clone)]
pub enum Stmt {
    Declaration(VarDeclStmt),
    Expression(ExprStmt),
    Return(ReturnStmt),
    If(IfStmt),
    For(ForStmt),
    While(WhileStmt),
    DoWhile(DoWhileStmt),
    Try(TryStmt),
    /// Local declaration carrying modifiers or annotations
    Field(FieldDecl),
    Block(Block),
    Break(BreakStmt),
    Continue(ContinueStmt),
    Throw(ThrowStmt),
    Switch(SwitchStmt),
    Synchronized(SynchronizedStmt),
    Labeled(LabeledStmt),
    Assert(AssertStmt),
}

impl AstNode for Stmt {
    fn span(&self) -> Span {
        match self {
            Stmt::Declaration(s) => s.span,
            Stmt::Expression(s) => s.span,
            Stmt::Return(s) => s.span,
            Stmt::If(s) => s.span,
            Stmt::For(s) => s.span,
            Stmt::While(s) => s.span,
            Stmt::DoWhile(s) => s.span,
            Stmt::Try(s) => s.span,
            Stmt::Field(s) => s.span,
            Stmt::Block(s) => s.span,
            Stmt::Break(s) => s.span,
            Stmt::Continue(s) => s.span,
            Stmt::Throw(s) => s.span,
            Stmt::Switch(s) => s.span,
            Stmt::Synchronized(s) => s.span,
            Stmt::Labeled(s) => s.span,
            Stmt::Assert(s) => s.span,
        }
    }

    fn accept<V: AstVisitor>(&self, visitor: &mut V) {
        visitor.visit_stmt(self)
    }
}

#[derive(Debug, Clone)]
pub struct VarDeclStmt {
    pub type_ref: TypeRef,
    pub variables: Vec<VariableDeclarator>,
    pub span: Span,
}

impl AstNode for VarDeclStmt {
    fn span(&self) -> Span {
        self.span
    }

    fn accept<V: AstVisitor>(&self, visitor: &mut V) {
        visitor.visit_var_decl_stmt(self)
    }
}

#[derive(Debug, Clone)]
pub struct VariableDeclarator {
    pub name: String,
    /// C-style dimensions written after the name (`int a[]`)
    pub array_dims: usize,
    pub initializer: Option<TokenSpan>,
    pub span: Span,
}

impl AstNode for VariableDeclarator {
    fn span(&self) -> Span {
        self.span
    }

    fn accept<V: AstVisitor>(&self, visitor: &mut V) {
        visitor.visit_variable_declarator(self)
    }
}

#[derive(Debug, Clone)]
pub struct ExprStmt {
    pub expr: TokenSpan,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct ReturnStmt {
    pub value: Option<TokenSpan>,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct IfStmt {
    pub condition: TokenSpan,
    pub then_branch: Box<Stmt>,
    pub else_branch: Option<Box<Stmt>>,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct ForStmt {
    /// Everything between the header parentheses, classic or enhanced form
    pub header: TokenSpan,
    pub body: Box<Stmt>,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct WhileStmt {
    pub condition: TokenSpan,
    pub body: Box<Stmt>,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct DoWhileStmt {
    pub body: Box<Stmt>,
    pub condition: TokenSpan,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct TryStmt {
    pub try_block: Block,
    pub catch_clauses: Vec<CatchClause>,
    pub finally_block: Option<Block>,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct CatchClause {
    /// Raw parameter tokens, e.g. `IOException | SQLException e`
    pub parameter: TokenSpan,
    pub body: Block,
    pub span: Span,
}

impl AstNode for CatchClause {
    fn span(&self) -> Span {
        self.span
    }

    fn accept<V: AstVisitor>(&self, visitor: &mut V) {
        visitor.visit_catch_clause(self)
    }
}

#[derive(Debug, Clone)]
pub struct BreakStmt {
    pub label: Option<String>,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct ContinueStmt {
    pub label: Option<String>,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct ThrowStmt {
    pub expr: TokenSpan,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct SwitchStmt {
    pub selector: TokenSpan,
    pub cases: Vec<SwitchCase>,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct SwitchCase {
    pub labels: Vec<CaseLabel>,
    pub statements: Vec<Stmt>,
    pub span: Span,
}

impl AstNode for SwitchCase {
    fn span(&self) -> Span {
        self.span
    }

    fn accept<V: AstVisitor>(&self, visitor: &mut V) {
        visitor.visit_switch_case(self)
    }
}

#[derive(Debug, Clone)]
pub enum CaseLabel {
    Case(TokenSpan),
    Default,
}

#[derive(Debug, Clone)]
pub struct SynchronizedStmt {
    pub lock: TokenSpan,
    pub body: Block,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct LabeledStmt {
    pub label: String,
    pub body: Box<Stmt>,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct AssertStmt {
    pub condition: TokenSpan,
    pub message: Option<TokenSpan>,
    pub span: Span,
}

// Expressions

/// Opaque, bracket-balanced run of tokens standing in for an expression,
/// a loop header, a condition or a catch parameter
#[derive(Debug, Clone, Default)]
pub struct TokenSpan {
    pub tokens: Vec<LexicalToken>,
}

impl TokenSpan {
    pub fn new(tokens: Vec<LexicalToken>) -> Self {
        Self { tokens }
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Source text of each token, in order
    pub fn lexemes(&self) -> impl Iterator<Item = &str> {
        self.tokens.iter().map(|t| t.lexeme())
    }

    /// True when parentheses, brackets and braces close in order and
    /// nothing is left open at the end of the span
    pub fn is_balanced(&self) -> bool {
        let mut stack = Vec::new();
        for token in &self.tokens {
            match token.token_type() {
                Token::LParen => stack.push(Token::RParen),
                Token::LBracket => stack.push(Token::RBracket),
                Token::LBrace => stack.push(Token::RBrace),
                closer @ (Token::RParen | Token::RBracket | Token::RBrace) => {
                    if stack.pop().as_ref() != Some(closer) {
                        return false;
                    }
                }
                _ => {}
            }
        }
        stack.is_empty()
    }

    pub fn span(&self) -> Span {
        match (self.tokens.first(), self.tokens.last()) {
            (Some(first), Some(last)) => Span::new(first.location(), last.location()),
            _ => Span::default(),
        }
    }

    pub fn location(&self) -> Location {
        self.span().start
    }
}

impl AstNode for TokenSpan {
    fn span(&self) -> Span {
        TokenSpan::span(self)
    }

    fn accept<V: AstVisitor>(&self, visitor: &mut V) {
        visitor.visit_token_span(self)
    }
}
