use super::tokens::render_tokens;
use crate::ast::*;
use crate::config::{BraceStyle, Config};

/// Line-oriented output buffer with scoped indentation.
///
/// One emitter is created per `generate` call, so indentation state is never
/// shared between renderings. `indented` restores the level it raised before
/// returning.
pub(super) struct Emitter<'c> {
    config: &'c Config,
    indent_unit: String,
    indent_level: usize,
    output: String,
    join_next: bool,
}

impl<'c> Emitter<'c> {
    pub(super) fn new(config: &'c Config) -> Self {
        Self {
            config,
            indent_unit: config.indent_unit(),
            indent_level: 0,
            output: String::new(),
            join_next: false,
        }
    }

    pub(super) fn finish(self) -> String {
        self.output
    }

    pub(super) fn indent_level(&self) -> usize {
        self.indent_level
    }

    fn write_indent(&mut self) {
        for _ in 0..self.indent_level {
            self.output.push_str(&self.indent_unit);
        }
    }

    /// Write one indented line. After `join_to_closing_brace` the text is
    /// appended to the previous `}` line instead.
    pub(super) fn line(&mut self, text: &str) {
        if self.join_next {
            self.join_next = false;
            let newline_len = self.config.newline.len();
            self.output.truncate(self.output.len() - newline_len);
            self.output.push(' ');
        } else {
            self.write_indent();
        }
        self.output.push_str(text);
        self.output.push_str(&self.config.newline);
    }

    pub(super) fn blank_line(&mut self) {
        self.join_next = false;
        self.output.push_str(&self.config.newline);
    }

    /// Raw text without indentation or line break, for inline nodes
    pub(super) fn text(&mut self, text: &str) {
        self.output.push_str(text);
    }

    pub(super) fn indented(&mut self, f: impl FnOnce(&mut Self)) {
        self.indent_level += 1;
        f(self);
        self.indent_level -= 1;
    }

    /// `header {` ... `}` following the configured brace style.
    /// An empty header opens a bare block.
    pub(super) fn braced(&mut self, header: &str, f: impl FnOnce(&mut Self)) {
        if header.is_empty() {
            self.line("{");
        } else {
            match self.config.brace_style {
                BraceStyle::SameLine => self.line(&format!("{} {{", header)),
                BraceStyle::NextLine => {
                    self.line(header);
                    self.line("{");
                }
            }
        }
        self.indented(f);
        self.line("}");
    }

    /// Continue `else`, `catch`, `finally` and `while` on the closing brace
    /// line when the brace style keeps braces on the same line
    fn join_to_closing_brace(&mut self) {
        let closing = format!("}}{}", self.config.newline);
        if self.config.brace_style == BraceStyle::SameLine && self.output.ends_with(&closing) {
            self.join_next = true;
        }
    }

    pub(super) fn placeholder(&mut self, what: &str, name: &str) {
        log::warn!("no renderer for {} '{}', emitting placeholder", what, name);
        self.line(&format!("/* no renderer for {} '{}' */", what, name));
    }

    // Compilation unit

    pub(super) fn emit_compilation_unit(&mut self, unit: &CompilationUnit) {
        let mut first_section = true;

        if let Some(package) = &unit.package_decl {
            self.emit_package(package);
            first_section = false;
        }

        if !unit.imports.is_empty() {
            if !first_section {
                self.blank_line();
            }
            for import in &unit.imports {
                self.emit_import(import);
            }
            first_section = false;
        }

        for type_decl in &unit.type_decls {
            if !first_section {
                self.blank_line();
            }
            self.emit_type_decl(type_decl);
            first_section = false;
        }
    }

    pub(super) fn emit_package(&mut self, package: &PackageDecl) {
        self.line(&format!("package {};", package.name));
    }

    pub(super) fn emit_import(&mut self, import: &ImportDecl) {
        self.line(&import_text(&import.name, import.is_static, import.is_wildcard));
    }

    // Type declarations

    pub(super) fn emit_type_decl(&mut self, type_decl: &TypeDecl) {
        match type_decl {
            TypeDecl::Class(c) => self.emit_class(c),
            TypeDecl::Interface(i) => self.emit_interface(i),
            TypeDecl::Enum(e) => self.emit_enum(e),
        }
    }

    pub(super) fn emit_class(&mut self, class: &ClassDecl) {
        self.emit_annotation_lines(&class.annotations);
        let extends: Vec<String> = class.extends.iter().map(ToString::to_string).collect();
        let implements: Vec<String> = class.implements.iter().map(ToString::to_string).collect();
        let header = type_header("class", &class.modifiers, &class.name, class.type_params.as_deref(), &extends, &implements);
        self.braced(&header, |e| e.emit_members(&class.members));
    }

    pub(super) fn emit_interface(&mut self, interface: &InterfaceDecl) {
        self.emit_annotation_lines(&interface.annotations);
        let extends: Vec<String> = interface.extends.iter().map(ToString::to_string).collect();
        let header = type_header("interface", &interface.modifiers, &interface.name, interface.type_params.as_deref(), &extends, &[]);
        self.braced(&header, |e| e.emit_members(&interface.members));
    }

    pub(super) fn emit_enum(&mut self, enum_decl: &EnumDecl) {
        self.emit_annotation_lines(&enum_decl.annotations);
        let implements: Vec<String> = enum_decl.implements.iter().map(ToString::to_string).collect();
        let header = type_header("enum", &enum_decl.modifiers, &enum_decl.name, None, &[], &implements);
        let constants: Vec<String> = enum_decl.constants.iter().map(enum_constant_text).collect();
        self.braced(&header, |e| e.emit_enum_body(&constants, |e| e.emit_members(&enum_decl.members), !enum_decl.members.is_empty()));
    }

    /// Constants one per line, then the member section after `;`
    pub(super) fn emit_enum_body(&mut self, constants: &[String], members: impl FnOnce(&mut Self), has_members: bool) {
        for (i, constant) in constants.iter().enumerate() {
            let terminator = if i + 1 < constants.len() {
                ","
            } else if has_members {
                ";"
            } else {
                ""
            };
            self.line(&format!("{}{}", constant, terminator));
        }
        if has_members {
            if constants.is_empty() {
                self.line(";");
            }
            self.blank_line();
            members(self);
        }
    }

    pub(super) fn emit_enum_constant(&mut self, constant: &EnumConstant) {
        self.line(&enum_constant_text(constant));
    }

    // Members

    /// Members separated by blank lines; consecutive fields stay together
    pub(super) fn emit_members(&mut self, members: &[Member]) {
        let mut previous: Option<&Member> = None;
        for member in members {
            if let Some(prev) = previous {
                if !(matches!(prev, Member::Field(_)) && matches!(member, Member::Field(_))) {
                    self.blank_line();
                }
            }
            self.emit_member(member);
            previous = Some(member);
        }
    }

    pub(super) fn emit_member(&mut self, member: &Member) {
        match member {
            Member::Field(f) => self.emit_field(f),
            Member::Method(m) => self.emit_method(m),
            Member::Constructor(c) => self.emit_constructor(c),
            Member::Initializer(i) => self.emit_initializer(i),
        }
    }

    pub(super) fn emit_field(&mut self, field: &FieldDecl) {
        self.emit_annotation_lines(&field.annotations);
        self.line(&format!("{};", field_text(field, false)));
    }

    pub(super) fn emit_method(&mut self, method: &MethodDecl) {
        self.emit_annotation_lines(&method.annotations);
        let parameters: Vec<String> = method.parameters.iter().map(parameter_text).collect();
        let throws: Vec<String> = method.throws.iter().map(ToString::to_string).collect();
        let header = method_header(
            &method.modifiers,
            method.type_params.as_deref(),
            Some(&method.return_type.to_string()),
            &method.name,
            &parameters,
            &throws,
        );
        match &method.body {
            Some(body) => self.braced(&header, |e| e.emit_statements(&body.statements)),
            None => self.line(&format!("{};", header)),
        }
    }

    pub(super) fn emit_constructor(&mut self, ctor: &ConstructorDecl) {
        self.emit_annotation_lines(&ctor.annotations);
        let parameters: Vec<String> = ctor.parameters.iter().map(parameter_text).collect();
        let throws: Vec<String> = ctor.throws.iter().map(ToString::to_string).collect();
        let header = method_header(&ctor.modifiers, ctor.type_params.as_deref(), None, &ctor.name, &parameters, &throws);
        self.braced(&header, |e| e.emit_statements(&ctor.body.statements));
    }

    pub(super) fn emit_initializer(&mut self, init: &InitializerBlock) {
        let header = if init.is_static { "static" } else { "" };
        self.braced(header, |e| e.emit_statements(&init.body.statements));
    }

    fn emit_annotation_lines(&mut self, annotations: &[Annotation]) {
        for annotation in annotations {
            self.line(&annotation_text(annotation));
        }
    }

    // Statements

    pub(super) fn emit_block(&mut self, block: &Block) {
        self.braced("", |e| e.emit_statements(&block.statements));
    }

    pub(super) fn emit_statements(&mut self, statements: &[Stmt]) {
        for stmt in statements {
            self.emit_stmt(stmt);
        }
    }

    /// Header followed by a statement body: blocks get braces, anything
    /// else goes on its own line one level deeper
    fn emit_body(&mut self, header: &str, body: &Stmt) {
        match body {
            Stmt::Block(block) => self.braced(header, |e| e.emit_statements(&block.statements)),
            other => {
                self.line(header);
                self.indented(|e| e.emit_stmt(other));
            }
        }
    }

    pub(super) fn emit_stmt(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::Declaration(decl) => {
                let variables: Vec<String> = decl.variables.iter().map(declarator_text).collect();
                self.line(&format!("{} {};", decl.type_ref, variables.join(", ")));
            }
            Stmt::Expression(s) => self.line(&format!("{};", render_tokens(&s.expr.tokens))),
            Stmt::Return(s) => match &s.value {
                Some(value) => self.line(&format!("return {};", render_tokens(&value.tokens))),
                None => self.line("return;"),
            },
            Stmt::If(s) => self.emit_if(s, ""),
            Stmt::For(s) => self.emit_body(&format!("for ({})", render_tokens(&s.header.tokens)), &s.body),
            Stmt::While(s) => self.emit_body(&format!("while ({})", render_tokens(&s.condition.tokens)), &s.body),
            Stmt::DoWhile(s) => {
                self.emit_body("do", &s.body);
                self.join_to_closing_brace();
                self.line(&format!("while ({});", render_tokens(&s.condition.tokens)));
            }
            Stmt::Try(s) => {
                self.braced("try", |e| e.emit_statements(&s.try_block.statements));
                for clause in &s.catch_clauses {
                    self.join_to_closing_brace();
                    let header = format!("catch ({})", render_tokens(&clause.parameter.tokens));
                    self.braced(&header, |e| e.emit_statements(&clause.body.statements));
                }
                if let Some(finally) = &s.finally_block {
                    self.join_to_closing_brace();
                    self.braced("finally", |e| e.emit_statements(&finally.statements));
                }
            }
            Stmt::Field(field) => self.line(&format!("{};", field_text(field, true))),
            Stmt::Block(block) => self.emit_block(block),
            Stmt::Break(s) => match &s.label {
                Some(label) => self.line(&format!("break {};", label)),
                None => self.line("break;"),
            },
            Stmt::Continue(s) => match &s.label {
                Some(label) => self.line(&format!("continue {};", label)),
                None => self.line("continue;"),
            },
            Stmt::Throw(s) => self.line(&format!("throw {};", render_tokens(&s.expr.tokens))),
            Stmt::Switch(s) => {
                let header = format!("switch ({})", render_tokens(&s.selector.tokens));
                self.braced(&header, |e| {
                    for case in &s.cases {
                        for label in &case.labels {
                            match label {
                                CaseLabel::Case(expr) => e.line(&format!("case {}:", render_tokens(&expr.tokens))),
                                CaseLabel::Default => e.line("default:"),
                            }
                        }
                        e.indented(|e| e.emit_statements(&case.statements));
                    }
                });
            }
            Stmt::Synchronized(s) => {
                let header = format!("synchronized ({})", render_tokens(&s.lock.tokens));
                self.braced(&header, |e| e.emit_statements(&s.body.statements));
            }
            Stmt::Labeled(s) => {
                self.line(&format!("{}:", s.label));
                self.emit_stmt(&s.body);
            }
            Stmt::Assert(s) => match &s.message {
                Some(message) => self.line(&format!(
                    "assert {} : {};",
                    render_tokens(&s.condition.tokens),
                    render_tokens(&message.tokens)
                )),
                None => self.line(&format!("assert {};", render_tokens(&s.condition.tokens))),
            },
        }
    }

    fn emit_if(&mut self, stmt: &IfStmt, prefix: &str) {
        let header = format!("{}if ({})", prefix, render_tokens(&stmt.condition.tokens));
        self.emit_body(&header, &stmt.then_branch);

        if let Some(else_branch) = &stmt.else_branch {
            self.join_to_closing_brace();
            match else_branch.as_ref() {
                Stmt::If(nested) => self.emit_if(nested, "else "),
                other => self.emit_body("else", other),
            }
        }
    }
}

// Text builders shared by AST and summary rendering

pub(super) fn modifiers_prefix(modifiers: &[Modifier]) -> String {
    let mut text = String::new();
    for modifier in modifiers {
        text.push_str(modifier.as_str());
        text.push(' ');
    }
    text
}

pub(super) fn import_text(name: &str, is_static: bool, is_wildcard: bool) -> String {
    format!(
        "import {}{}{};",
        if is_static { "static " } else { "" },
        name,
        if is_wildcard { ".*" } else { "" }
    )
}

pub(super) fn type_header(
    keyword: &str,
    modifiers: &[Modifier],
    name: &str,
    type_params: Option<&str>,
    extends: &[String],
    implements: &[String],
) -> String {
    let mut header = format!("{}{} {}{}", modifiers_prefix(modifiers), keyword, name, type_params.unwrap_or(""));
    if !extends.is_empty() {
        header.push_str(" extends ");
        header.push_str(&extends.join(", "));
    }
    if !implements.is_empty() {
        header.push_str(" implements ");
        header.push_str(&implements.join(", "));
    }
    header
}

/// Method or constructor signature; constructors pass no return type
pub(super) fn method_header(
    modifiers: &[Modifier],
    type_params: Option<&str>,
    return_type: Option<&str>,
    name: &str,
    parameters: &[String],
    throws: &[String],
) -> String {
    let mut header = modifiers_prefix(modifiers);
    if let Some(params) = type_params {
        header.push_str(params);
        header.push(' ');
    }
    if let Some(ret) = return_type {
        header.push_str(ret);
        header.push(' ');
    }
    header.push_str(name);
    header.push('(');
    header.push_str(&parameters.join(", "));
    header.push(')');
    if !throws.is_empty() {
        header.push_str(" throws ");
        header.push_str(&throws.join(", "));
    }
    header
}

pub(super) fn annotation_text(annotation: &Annotation) -> String {
    match &annotation.arguments {
        Some(args) => format!("@{}({})", annotation.name, render_tokens(&args.tokens)),
        None => format!("@{}", annotation.name),
    }
}

pub(super) fn parameter_text(parameter: &Parameter) -> String {
    let mut text = String::new();
    for annotation in &parameter.annotations {
        text.push_str(&annotation_text(annotation));
        text.push(' ');
    }
    if parameter.is_final {
        text.push_str("final ");
    }
    text.push_str(&parameter.type_ref.to_string());
    if parameter.varargs {
        text.push_str("...");
    }
    text.push(' ');
    text.push_str(&parameter.name);
    text
}

fn enum_constant_text(constant: &EnumConstant) -> String {
    let mut text = String::new();
    for annotation in &constant.annotations {
        text.push_str(&annotation_text(annotation));
        text.push(' ');
    }
    text.push_str(&constant.name);
    if let Some(args) = &constant.arguments {
        text.push('(');
        text.push_str(&render_tokens(&args.tokens));
        text.push(')');
    }
    text
}

fn declarator_text(var: &VariableDeclarator) -> String {
    let mut text = var.name.clone();
    for _ in 0..var.array_dims {
        text.push_str("[]");
    }
    if let Some(init) = &var.initializer {
        text.push_str(" = ");
        text.push_str(&render_tokens(&init.tokens));
    }
    text
}

/// Field declaration without the trailing `;`
fn field_text(field: &FieldDecl, inline_annotations: bool) -> String {
    let mut text = String::new();
    if inline_annotations {
        for annotation in &field.annotations {
            text.push_str(&annotation_text(annotation));
            text.push(' ');
        }
    }
    text.push_str(&modifiers_prefix(&field.modifiers));
    text.push_str(&field.type_ref.to_string());
    text.push(' ');
    text.push_str(&field.name);
    if let Some(init) = &field.initializer {
        text.push_str(" = ");
        text.push_str(&render_tokens(&init.tokens));
    }
    text
}
