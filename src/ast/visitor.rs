use super::*;

/// AST visitor trait for traversing and processing AST nodes
///
/// Every method has a default implementation that walks into the node's
/// children in declaration order, so implementors override only the nodes
/// they care about and call the matching `walk_*` function to keep descending.
pub trait AstVisitor {
    // AST root
    fn visit_compilation_unit(&mut self, unit: &CompilationUnit) {
        walk_compilation_unit(self, unit)
    }

    // Package and imports
    fn visit_package_decl(&mut self, _package: &PackageDecl) {}
    fn visit_import_decl(&mut self, _import: &ImportDecl) {}

    // Type declarations
    fn visit_class_decl(&mut self, class: &ClassDecl) {
        walk_annotations(self, &class.annotations);
        walk_members(self, &class.members);
    }

    fn visit_interface_decl(&mut self, interface: &InterfaceDecl) {
        walk_annotations(self, &interface.annotations);
        walk_members(self, &interface.members);
    }

    fn visit_enum_decl(&mut self, enum_decl: &EnumDecl) {
        walk_annotations(self, &enum_decl.annotations);
        for constant in &enum_decl.constants {
            self.visit_enum_constant(constant);
        }
        walk_members(self, &enum_decl.members);
    }

    fn visit_enum_constant(&mut self, _constant: &EnumConstant) {}

    // Members
    fn visit_member(&mut self, member: &Member) {
        match member {
            Member::Field(f) => self.visit_field_decl(f),
            Member::Method(m) => self.visit_method_decl(m),
            Member::Constructor(c) => self.visit_constructor_decl(c),
            Member::Initializer(i) => self.visit_initializer(i),
        }
    }

    fn visit_field_decl(&mut self, field: &FieldDecl) {
        walk_annotations(self, &field.annotations);
        self.visit_type_ref(&field.type_ref);
        if let Some(init) = &field.initializer {
            self.visit_token_span(init);
        }
    }

    fn visit_method_decl(&mut self, method: &MethodDecl) {
        walk_annotations(self, &method.annotations);
        self.visit_type_ref(&method.return_type);
        for parameter in &method.parameters {
            self.visit_parameter(parameter);
        }
        if let Some(body) = &method.body {
            self.visit_block(body);
        }
    }

    fn visit_constructor_decl(&mut self, constructor: &ConstructorDecl) {
        walk_annotations(self, &constructor.annotations);
        for parameter in &constructor.parameters {
            self.visit_parameter(parameter);
        }
        self.visit_block(&constructor.body);
    }

    fn visit_parameter(&mut self, parameter: &Parameter) {
        walk_annotations(self, &parameter.annotations);
        self.visit_type_ref(&parameter.type_ref);
    }

    fn visit_initializer(&mut self, initializer: &InitializerBlock) {
        self.visit_block(&initializer.body);
    }

    // Statements
    fn visit_block(&mut self, block: &Block) {
        for stmt in &block.statements {
            self.visit_stmt(stmt);
        }
    }

    fn visit_stmt(&mut self, stmt: &Stmt) {
        walk_stmt(self, stmt)
    }

    fn visit_var_decl_stmt(&mut self, decl: &VarDeclStmt) {
        self.visit_type_ref(&decl.type_ref);
        for var in &decl.variables {
            self.visit_variable_declarator(var);
        }
    }

    fn visit_variable_declarator(&mut self, var: &VariableDeclarator) {
        if let Some(init) = &var.initializer {
            self.visit_token_span(init);
        }
    }

    fn visit_catch_clause(&mut self, clause: &CatchClause) {
        self.visit_token_span(&clause.parameter);
        self.visit_block(&clause.body);
    }

    fn visit_switch_case(&mut self, case: &SwitchCase) {
        for label in &case.labels {
            if let CaseLabel::Case(expr) = label {
                self.visit_token_span(expr);
            }
        }
        for stmt in &case.statements {
            self.visit_stmt(stmt);
        }
    }

    // Leaves
    fn visit_token_span(&mut self, _span: &TokenSpan) {}
    fn visit_type_ref(&mut self, _type_ref: &TypeRef) {}
    fn visit_annotation(&mut self, _annotation: &Annotation) {}
}

pub fn walk_compilation_unit<V: AstVisitor + ?Sized>(visitor: &mut V, unit: &CompilationUnit) {
    if let Some(package) = &unit.package_decl {
        visitor.visit_package_decl(package);
    }
    for import in &unit.imports {
        visitor.visit_import_decl(import);
    }
    for type_decl in &unit.type_decls {
        match type_decl {
            TypeDecl::Class(c) => visitor.visit_class_decl(c),
            TypeDecl::Interface(i) => visitor.visit_interface_decl(i),
            TypeDecl::Enum(e) => visitor.visit_enum_decl(e),
        }
    }
}

pub fn walk_members<V: AstVisitor + ?Sized>(visitor: &mut V, members: &[Member]) {
    for member in members {
        visitor.visit_member(member);
    }
}

pub fn walk_annotations<V: AstVisitor + ?Sized>(visitor: &mut V, annotations: &[Annotation]) {
    for annotation in annotations {
        visitor.visit_annotation(annotation);
    }
}

pub fn walk_stmt<V: AstVisitor + ?Sized>(visitor: &mut V, stmt: &Stmt) {
    match stmt {
        Stmt::Declaration(decl) => visitor.visit_var_decl_stmt(decl),
        Stmt::Expression(s) => visitor.visit_token_span(&s.expr),
        Stmt::Return(s) => {
            if let Some(value) = &s.value {
                visitor.visit_token_span(value);
            }
        }
        Stmt::If(s) => {
            visitor.visit_token_span(&s.condition);
            visitor.visit_stmt(&s.then_branch);
            if let Some(else_branch) = &s.else_branch {
                visitor.visit_stmt(else_branch);
            }
        }
        Stmt::For(s) => {
            visitor.visit_token_span(&s.header);
            visitor.visit_stmt(&s.body);
        }
        Stmt::While(s) => {
            visitor.visit_token_span(&s.condition);
            visitor.visit_stmt(&s.body);
        }
        Stmt::DoWhile(s) => {
            visitor.visit_stmt(&s.body);
            visitor.visit_token_span(&s.condition);
        }
        Stmt::Try(s) => {
            visitor.visit_block(&s.try_block);
            for clause in &s.catch_clauses {
                visitor.visit_catch_clause(clause);
            }
            if let Some(finally) = &s.finally_block {
                visitor.visit_block(finally);
            }
        }
        Stmt::Field(f) => visitor.visit_field_decl(f),
        Stmt::Block(b) => visitor.visit_block(b),
        Stmt::Break(_) | Stmt::Continue(_) => {}
        Stmt::Throw(s) => visitor.visit_token_span(&s.expr),
        Stmt::Switch(s) => {
            visitor.visit_token_span(&s.selector);
            for case in &s.cases {
                visitor.visit_switch_case(case);
            }
        }
        Stmt::Synchronized(s) => {
            visitor.visit_token_span(&s.lock);
            visitor.visit_block(&s.body);
        }
        Stmt::Labeled(s) => visitor.visit_stmt(&s.body),
        Stmt::Assert(s) => {
            visitor.visit_token_span(&s.condition);
            if let Some(message) = &s.message {
                visitor.visit_token_span(message);
            }
        }
    }
}
