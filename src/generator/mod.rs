//! Source generation from AST nodes and summaries
//!
//! `generate` renders exactly the node it is given: a whole compilation unit,
//! a single method, a block, one expression span. Summaries render as
//! skeletons whose bodies are synthesized stubs.

mod emitter;
mod skeleton;
pub mod tokens;

pub use skeleton::default_return_value;
pub use tokens::render_tokens;

use crate::ast::*;
use crate::config::Config;
use crate::summary::{MemberSummary, TypeSummary, UnitSummary};
use emitter::{annotation_text, parameter_text, Emitter};
use std::fmt;

/// Borrowed view of any renderable node
#[derive(Debug, Clone, Copy)]
pub enum Node<'a> {
    CompilationUnit(&'a CompilationUnit),
    Package(&'a PackageDecl),
    Import(&'a ImportDecl),
    TypeDecl(&'a TypeDecl),
    Class(&'a ClassDecl),
    Interface(&'a InterfaceDecl),
    Enum(&'a EnumDecl),
    EnumConstant(&'a EnumConstant),
    Member(&'a Member),
    Field(&'a FieldDecl),
    Method(&'a MethodDecl),
    Constructor(&'a ConstructorDecl),
    Initializer(&'a InitializerBlock),
    Parameter(&'a Parameter),
    Annotation(&'a Annotation),
    TypeRef(&'a TypeRef),
    Block(&'a Block),
    Stmt(&'a Stmt),
    Expr(&'a TokenSpan),
    UnitSummary(&'a UnitSummary),
    TypeSummary(&'a TypeSummary),
    MemberSummary(&'a MemberSummary),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    CompilationUnit,
    Package,
    Import,
    TypeDecl,
    Class,
    Interface,
    Enum,
    EnumConstant,
    Member,
    Field,
    Method,
    Constructor,
    Initializer,
    Parameter,
    Annotation,
    TypeRef,
    Block,
    Stmt,
    Expr,
    UnitSummary,
    TypeSummary,
    MemberSummary,
}

impl NodeKind {
    /// Inline nodes render without indentation or a line break
    pub fn is_inline(&self) -> bool {
        matches!(self, NodeKind::Parameter | NodeKind::Annotation | NodeKind::TypeRef | NodeKind::Expr)
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NodeKind::CompilationUnit => "compilation unit",
            NodeKind::Package => "package declaration",
            NodeKind::Import => "import declaration",
            NodeKind::TypeDecl => "type declaration",
            NodeKind::Class => "class declaration",
            NodeKind::Interface => "interface declaration",
            NodeKind::Enum => "enum declaration",
            NodeKind::EnumConstant => "enum constant",
            NodeKind::Member => "member",
            NodeKind::Field => "field",
            NodeKind::Method => "method",
            NodeKind::Constructor => "constructor",
            NodeKind::Initializer => "initializer block",
            NodeKind::Parameter => "parameter",
            NodeKind::Annotation => "annotation",
            NodeKind::TypeRef => "type reference",
            NodeKind::Block => "block",
            NodeKind::Stmt => "statement",
            NodeKind::Expr => "expression",
            NodeKind::UnitSummary => "unit summary",
            NodeKind::TypeSummary => "type summary",
            NodeKind::MemberSummary => "member summary",
        };
        f.write_str(name)
    }
}

impl<'a> Node<'a> {
    pub fn kind(&self) -> NodeKind {
        match self {
            Node::CompilationUnit(_) => NodeKind::CompilationUnit,
            Node::Package(_) => NodeKind::Package,
            Node::Import(_) => NodeKind::Import,
            Node::TypeDecl(_) => NodeKind::TypeDecl,
            Node::Class(_) => NodeKind::Class,
            Node::Interface(_) => NodeKind::Interface,
            Node::Enum(_) => NodeKind::Enum,
            Node::EnumConstant(_) => NodeKind::EnumConstant,
            Node::Member(_) => NodeKind::Member,
            Node::Field(_) => NodeKind::Field,
            Node::Method(_) => NodeKind::Method,
            Node::Constructor(_) => NodeKind::Constructor,
            Node::Initializer(_) => NodeKind::Initializer,
            Node::Parameter(_) => NodeKind::Parameter,
            Node::Annotation(_) => NodeKind::Annotation,
            Node::TypeRef(_) => NodeKind::TypeRef,
            Node::Block(_) => NodeKind::Block,
            Node::Stmt(_) => NodeKind::Stmt,
            Node::Expr(_) => NodeKind::Expr,
            Node::UnitSummary(_) => NodeKind::UnitSummary,
            Node::TypeSummary(_) => NodeKind::TypeSummary,
            Node::MemberSummary(_) => NodeKind::MemberSummary,
        }
    }
}

macro_rules! impl_from_node {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl<'a> From<&'a $ty> for Node<'a> {
                fn from(node: &'a $ty) -> Self {
                    Node::$variant(node)
                }
            }
        )*
    };
}

impl_from_node! {
    CompilationUnit => CompilationUnit,
    PackageDecl => Package,
    ImportDecl => Import,
    TypeDecl => TypeDecl,
    ClassDecl => Class,
    InterfaceDecl => Interface,
    EnumDecl => Enum,
    EnumConstant => EnumConstant,
    Member => Member,
    FieldDecl => Field,
    MethodDecl => Method,
    ConstructorDecl => Constructor,
    InitializerBlock => Initializer,
    Parameter => Parameter,
    Annotation => Annotation,
    TypeRef => TypeRef,
    Block => Block,
    Stmt => Stmt,
    TokenSpan => Expr,
    UnitSummary => UnitSummary,
    TypeSummary => TypeSummary,
    MemberSummary => MemberSummary,
}

/// Render a node as source text.
///
/// Declarations and statements render as complete lines; parameters,
/// annotations, type references and expressions render inline.
pub fn generate<'a>(node: impl Into<Node<'a>>, config: &Config) -> String {
    let node = node.into();
    log::trace!("generating {}", node.kind());

    let mut emitter = Emitter::new(config);
    match node {
        Node::CompilationUnit(unit) => emitter.emit_compilation_unit(unit),
        Node::Package(package) => emitter.emit_package(package),
        Node::Import(import) => emitter.emit_import(import),
        Node::TypeDecl(type_decl) => emitter.emit_type_decl(type_decl),
        Node::Class(class) => emitter.emit_class(class),
        Node::Interface(interface) => emitter.emit_interface(interface),
        Node::Enum(enum_decl) => emitter.emit_enum(enum_decl),
        Node::EnumConstant(constant) => emitter.emit_enum_constant(constant),
        Node::Member(member) => emitter.emit_member(member),
        Node::Field(field) => emitter.emit_field(field),
        Node::Method(method) => emitter.emit_method(method),
        Node::Constructor(ctor) => emitter.emit_constructor(ctor),
        Node::Initializer(init) => emitter.emit_initializer(init),
        Node::Parameter(parameter) => emitter.text(&parameter_text(parameter)),
        Node::Annotation(annotation) => emitter.text(&annotation_text(annotation)),
        Node::TypeRef(type_ref) => emitter.text(&type_ref.to_string()),
        Node::Block(block) => emitter.emit_block(block),
        Node::Stmt(stmt) => emitter.emit_stmt(stmt),
        Node::Expr(expr) => emitter.text(&render_tokens(&expr.tokens)),
        Node::UnitSummary(unit) => emitter.emit_unit_summary(unit),
        Node::TypeSummary(summary) => emitter.emit_type_summary(summary),
        // A lone member is rendered as if it sat in a class body
        Node::MemberSummary(member) => emitter.emit_member_summary(member, false),
    }
    debug_assert_eq!(emitter.indent_level(), 0, "indentation leaked from {}", node.kind());

    emitter.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BraceStyle;
    use crate::parser::parse_source;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_generate_single_method() {
        let unit = parse_source("public class C { public int add(int a, int b) { return a + b; } }");
        let method = unit.type_decls[0].methods().next().unwrap();
        let text = generate(method, &Config::default());
        assert_eq!(text, "public int add(int a, int b) {\n    return a + b;\n}\n");
    }

    #[test]
    fn test_inline_nodes_have_no_line_break() {
        let unit = parse_source("class C { void f(final String... names) { g(x, y); } }");
        let method = unit.type_decls[0].methods().next().unwrap();
        assert_eq!(generate(&method.parameters[0], &Config::default()), "final String... names");
        assert_eq!(generate(&method.return_type, &Config::default()), "void");
        assert!(NodeKind::Expr.is_inline());
    }

    #[test]
    fn test_next_line_braces_and_tabs() {
        let unit = parse_source("class C { void f() { if (a) { b(); } else { c(); } } }");
        let config = Config::default().with_brace_style(BraceStyle::NextLine).with_tabs();
        let text = generate(&unit, &config);
        assert_eq!(
            text,
            "class C\n{\n\tvoid f()\n\t{\n\t\tif (a)\n\t\t{\n\t\t\tb();\n\t\t}\n\t\telse\n\t\t{\n\t\t\tc();\n\t\t}\n\t}\n}\n"
        );
    }

    #[test]
    fn test_same_line_chains_else_and_catch() {
        let unit = parse_source(
            "class C { void f() { if (a) { b(); } else if (c) { d(); } try { e(); } catch (E x) { } finally { g(); } } }",
        );
        let text = generate(&unit, &Config::default());
        assert!(text.contains("} else if (c) {\n"));
        assert!(text.contains("} catch (E x) {\n"));
        assert!(text.contains("} finally {\n"));
    }

    #[test]
    fn test_crlf_newline() {
        let unit = parse_source("class C { int x; }");
        let text = generate(&unit, &Config::default().with_newline("\r\n"));
        assert_eq!(text, "class C {\r\n    int x;\r\n}\r\n");
    }

    #[test]
    fn test_node_kind_names() {
        let unit = CompilationUnit::default();
        assert_eq!(Node::from(&unit).kind(), NodeKind::CompilationUnit);
        assert_eq!(NodeKind::MemberSummary.to_string(), "member summary");
    }
}
