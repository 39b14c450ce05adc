use jast::ast::*;
use jast::parser::{parse_source_with_diagnostics, ErrorRecovery, ParseError, ParseLimits, Parser, MAX_ERRORS_ENV};

fn member_names(decl: &TypeDecl) -> Vec<String> {
    decl.members()
        .iter()
        .filter_map(|m| match m {
            Member::Field(f) => Some(f.name.clone()),
            Member::Method(m) => Some(m.name.clone()),
            Member::Constructor(c) => Some(c.name.clone()),
            Member::Initializer(_) => None,
        })
        .collect()
}

#[test]
fn missing_semicolon_keeps_following_members() {
    let src = r#"
public class A {
    int x = 5
    public int y;
    public void f() { y = 1; }
}
"#;
    let (unit, errors) = parse_source_with_diagnostics(src);
    assert_eq!(errors.len(), 1, "{:?}", errors);
    assert!(matches!(errors[0], ParseError::UnexpectedToken { .. }));
    assert_eq!(errors[0].location().line, 4);
    assert_eq!(member_names(&unit.type_decls[0]), vec!["y", "f"]);
}

#[test]
fn missing_semicolon_before_unmodified_members() {
    let (unit, errors) = parse_source_with_diagnostics("class A {\n    int x = 5\n    void foo() { }\n    int y;\n}");
    assert_eq!(errors.len(), 1, "{:?}", errors);
    assert_eq!(errors[0].location().line, 3);
    assert_eq!(member_names(&unit.type_decls[0]), vec!["foo", "y"]);

    let (unit, errors) = parse_source_with_diagnostics("class A {\n    int x = 5\n    A() { }\n    int y;\n}");
    assert_eq!(errors.len(), 1, "{:?}", errors);
    assert_eq!(member_names(&unit.type_decls[0]), vec!["A", "y"]);
    assert!(matches!(unit.type_decls[0].members()[0], Member::Constructor(_)));

    let (unit, errors) = parse_source_with_diagnostics("class A {\n    int x = 5\n    String name;\n    void f() {}\n}");
    assert_eq!(errors.len(), 1, "{:?}", errors);
    assert_eq!(member_names(&unit.type_decls[0]), vec!["name", "f"]);
}

#[test]
fn void_class_literal_is_not_a_boundary() {
    let (unit, errors) = parse_source_with_diagnostics("class A { Class<?> k = void.class; }");
    assert!(errors.is_empty(), "{:?}", errors);
    assert_eq!(member_names(&unit.type_decls[0]), vec!["k"]);
}

#[test]
fn switch_fault_stays_inside_switch() {
    let src = "class A { void f(int x) { switch (x) { case 1 foo(); } after(); } void g() {} }";
    let (unit, errors) = parse_source_with_diagnostics(src);
    assert_eq!(errors.len(), 1, "{:?}", errors);
    assert!(errors[0].to_string().contains("':' after case label"), "{}", errors[0]);
    let decl = &unit.type_decls[0];
    assert_eq!(member_names(decl), vec!["f", "g"]);

    let body = decl.methods().next().unwrap().body.as_ref().unwrap();
    assert_eq!(body.statements.len(), 2);
    assert!(matches!(&body.statements[0], Stmt::Switch(s) if s.cases.is_empty()));
    assert!(matches!(&body.statements[1], Stmt::Expression(_)));
}

#[test]
fn statement_before_first_case_is_skipped() {
    let src = "class A { void f(int x) { switch (x) { foo(); case 1: break; } } void g() {} }";
    let (unit, errors) = parse_source_with_diagnostics(src);
    assert_eq!(errors.len(), 1, "{:?}", errors);
    let decl = &unit.type_decls[0];
    assert_eq!(member_names(decl), vec!["f", "g"]);

    let body = decl.methods().next().unwrap().body.as_ref().unwrap();
    match &body.statements[0] {
        Stmt::Switch(switch) => {
            assert_eq!(switch.cases.len(), 1);
            assert!(matches!(switch.cases[0].statements.as_slice(), [Stmt::Break(_)]));
        }
        other => panic!("expected switch, got {:?}", other),
    }
}

#[test]
fn switch_rule_is_skipped_with_its_body() {
    let src = "class A { void f(int x) { switch (x) { case 1 -> a(); default -> b(); } done(); } void g() {} }";
    let (unit, errors) = parse_source_with_diagnostics(src);
    assert_eq!(errors.len(), 1, "{:?}", errors);
    assert!(matches!(errors[0], ParseError::Unsupported { .. }));
    let decl = &unit.type_decls[0];
    assert_eq!(member_names(decl), vec!["f", "g"]);
    assert_eq!(decl.methods().next().unwrap().body.as_ref().unwrap().statements.len(), 2);
}

#[test]
fn empty_initializer_resyncs_at_semicolon() {
    let (unit, errors) = parse_source_with_diagnostics("class A { int x = ; int y; void f() {} }");
    assert_eq!(errors.len(), 1);
    assert_eq!(member_names(&unit.type_decls[0]), vec!["y", "f"]);
}

#[test]
fn statement_fault_stays_inside_block() {
    let src = r#"
class A {
    void f() {
        int a = ;
        foo(1, 2);
        if (x) { ) }
        bar();
    }
    void g() {}
}
"#;
    let (unit, errors) = parse_source_with_diagnostics(src);
    assert_eq!(errors.len(), 2, "{:?}", errors);
    let decl = &unit.type_decls[0];
    assert_eq!(member_names(decl), vec!["f", "g"]);

    let body = decl.methods().next().unwrap().body.as_ref().unwrap();
    let last = body.statements.last().unwrap();
    match last {
        Stmt::Expression(stmt) => {
            let lexemes: Vec<&str> = stmt.expr.lexemes().collect();
            assert_eq!(lexemes, vec!["bar", "(", ")"]);
        }
        other => panic!("expected expression statement, got {:?}", other),
    }
}

#[test]
fn lexical_fault_in_member_is_diagnosed() {
    let src = "class A { int a = 1; char c = 'ab'; public void f() {} }";
    let (unit, errors) = parse_source_with_diagnostics(src);
    assert_eq!(errors.len(), 1, "{:?}", errors);
    match &errors[0] {
        ParseError::LexicalError { location, .. } => assert_eq!(location.column, 31),
        other => panic!("expected lexical error, got {:?}", other),
    }
    assert_eq!(member_names(&unit.type_decls[0]), vec!["a", "f"]);
}

#[test]
fn unsupported_constructs_are_skipped_as_units() {
    let src = r#"
class A {
    static class Inner { void hidden() {} }
    void f() {
        try (Reader r = open()) { r.read(); } catch (IOException e) { }
        done();
    }
    int z;
}
"#;
    let (unit, errors) = parse_source_with_diagnostics(src);
    assert_eq!(errors.len(), 2, "{:?}", errors);
    assert!(errors.iter().all(|e| matches!(e, ParseError::Unsupported { .. })));
    assert!(errors[0].to_string().contains("nested type declaration"));
    assert!(errors[1].to_string().contains("try-with-resources"));

    let decl = &unit.type_decls[0];
    assert_eq!(member_names(decl), vec!["f", "z"]);
    let body = decl.methods().next().unwrap().body.as_ref().unwrap();
    assert_eq!(body.statements.len(), 1);
}

#[test]
fn broken_type_does_not_hide_next_type() {
    let src = "class A { void f( { } } class B { int ok; }";
    let (unit, errors) = parse_source_with_diagnostics(src);
    assert!(!errors.is_empty());
    assert!(unit.find_type("B").is_some(), "{:?}", unit);
    let b = unit.find_type("B").unwrap();
    assert_eq!(member_names(b), vec!["ok"]);
}

#[test]
fn garbage_input_yields_partial_unit() {
    let (unit, errors) = parse_source_with_diagnostics("} } ) ; package");
    assert!(!errors.is_empty());
    assert!(unit.type_decls.is_empty());
}

#[test]
fn error_budget_stops_parsing() {
    let src = "package p;\npublic interface I {\n    ? ? ? ;\n    ? ? ? ;\n    ? ? ? ;\n    ? ? ? ;\n";
    let (_, errors) = Parser::from_source(src)
        .with_recovery(ErrorRecovery::new(2))
        .parse_with_diagnostics();
    assert_eq!(errors.len(), 3);
    assert!(matches!(errors.last(), Some(ParseError::TooManyErrors { count: 2, .. })));
    assert!(!errors.last().unwrap().is_recoverable());
}

#[test]
fn error_budget_reads_override() {
    let recovery = ErrorRecovery::from_lookup(|key| (key == MAX_ERRORS_ENV).then(|| "7".to_string()));
    assert_eq!(recovery.max_errors, 7);

    let src = "class A { int ; int ; int ; int ; }";
    let (_, errors) = Parser::from_source(src)
        .with_recovery(ErrorRecovery::from_lookup(|_| Some("3".to_string())))
        .parse_with_diagnostics();
    assert_eq!(errors.len(), 4);
    assert!(matches!(errors.last(), Some(ParseError::TooManyErrors { count: 3, .. })));
}

#[test]
fn span_cap_truncates_with_diagnostic() {
    let limits = ParseLimits { max_span_tokens: 8, ..ParseLimits::default() };
    let src = "class A { int big = 1 + 2 + 3 + 4 + 5 + 6; int small = 1; }";
    let (unit, errors) = Parser::from_source(src).with_limits(limits).parse_with_diagnostics();
    assert_eq!(errors.len(), 1);
    assert!(matches!(errors[0], ParseError::LimitExceeded { limit: 8, .. }));
    assert_eq!(member_names(&unit.type_decls[0]), vec!["small"]);
}

#[test]
fn deep_nesting_is_capped() {
    let depth = 40;
    let src = format!(
        "class A {{ void f() {{ {} x(); {} }} void g() {{}} }}",
        "{".repeat(depth),
        "}".repeat(depth)
    );
    let limits = ParseLimits { max_nesting_depth: 16, ..ParseLimits::default() };
    let (unit, errors) = Parser::from_source(&src).with_limits(limits).parse_with_diagnostics();
    assert!(errors.iter().any(|e| matches!(e, ParseError::LimitExceeded { .. })), "{:?}", errors);
    assert!(unit.type_decls[0].methods().any(|m| m.name == "g"));
}

#[test]
fn deep_if_chain_hits_default_cap() {
    let depth = 60;
    let src = format!("class A {{ void f() {{ {} x(); }} void g() {{}} }}", "if (a) ".repeat(depth));
    let (unit, errors) = parse_source_with_diagnostics(&src);
    assert_eq!(errors.len(), 1, "{:?}", errors);
    assert!(matches!(errors[0], ParseError::LimitExceeded { .. }), "{:?}", errors);
    let decl = &unit.type_decls[0];
    assert_eq!(member_names(decl), vec!["f", "g"]);
}
