use jast::parser::parse_source;
use jast::{format_source, generate, BraceStyle, Config};
use pretty_assertions::assert_eq;

fn format(source: &str) -> String {
    format_source(source, &Config::default())
}

#[test]
fn generates_package_imports_and_class() {
    let source = "package com.example;\nimport java.util.*;\nimport static java.lang.Math.max;\npublic final class Box<T extends Comparable<T>> extends Base implements A, B<T> {}";
    assert_eq!(
        format(source),
        "package com.example;\n\nimport java.util.*;\nimport static java.lang.Math.max;\n\npublic final class Box<T extends Comparable<T>> extends Base implements A, B<T> {\n}\n"
    );
}

#[test]
fn consecutive_fields_stay_together() {
    let source = "class C { private int a; private int b = a + 1; C() { } int get() { return b; } }";
    assert_eq!(
        format(source),
        "class C {\n    private int a;\n    private int b = a + 1;\n\n    C() {\n    }\n\n    int get() {\n        return b;\n    }\n}\n"
    );
}

#[test]
fn generates_interface_members() {
    let source = "public interface Shape { double area(); default String name() { return \"shape\"; } static Shape unit() { return null; } }";
    assert_eq!(
        format(source),
        "public interface Shape {\n    double area();\n\n    default String name() {\n        return \"shape\";\n    }\n\n    static Shape unit() {\n        return null;\n    }\n}\n"
    );
}

#[test]
fn generates_enum_constants_and_members() {
    assert_eq!(format("enum E { A, B }"), "enum E {\n    A,\n    B\n}\n");
    assert_eq!(
        format("public enum Color implements Named { RED(\"r\"), GREEN(\"g\"); private final String code; Color(String code) { this.code = code; } }"),
        "public enum Color implements Named {\n    RED(\"r\"),\n    GREEN(\"g\");\n\n    private final String code;\n\n    Color(String code) {\n        this.code = code;\n    }\n}\n"
    );
}

#[test]
fn generates_annotations_on_their_own_lines() {
    let source = "@Entity class User { @Id @Column(name = \"id\") long id; @Override public String toString() { return \"u\"; } }";
    assert_eq!(
        format(source),
        "@Entity\nclass User {\n    @Id\n    @Column(name = \"id\")\n    long id;\n\n    @Override\n    public String toString() {\n        return \"u\";\n    }\n}\n"
    );
}

#[test]
fn generates_control_flow() {
    let source = r#"
class C {
    int f(int[] xs) throws IOException, InterruptedException {
        int total = 0, n = xs.length;
        for (int i = 0; i < n; i++) total += xs[i];
        while (total > 10) { total -= 10; }
        do total++; while (total < 5);
        switch (total) { case 1: case 2: total = 0; break; default: return -1; }
        outer: for (int x : xs) { if (x < 0) continue outer; else break; }
        synchronized (lock) { notifyAll(); }
        assert total >= 0 : "negative";
        throw new IllegalStateException();
    }
}
"#;
    let expected = "\
class C {
    int f(int[] xs) throws IOException, InterruptedException {
        int total = 0, n = xs.length;
        for (int i = 0; i < n; i++)
            total += xs[i];
        while (total > 10) {
            total -= 10;
        }
        do
            total++;
        while (total < 5);
        switch (total) {
            case 1:
            case 2:
                total = 0;
                break;
            default:
                return -1;
        }
        outer:
        for (int x : xs) {
            if (x < 0)
                continue outer;
            else
                break;
        }
        synchronized (lock) {
            notifyAll();
        }
        assert total >= 0 : \"negative\";
        throw new IllegalStateException();
    }
}
";
    assert_eq!(format(source), expected);
}

#[test]
fn do_while_joins_closing_brace() {
    let text = format("class C { void f() { do { step(); } while (more()); } }");
    assert!(text.contains("        } while (more());\n"), "{}", text);
}

#[test]
fn next_line_braces_keep_clauses_separate() {
    let unit = parse_source("class C { void f() { try { a(); } catch (Exception e) { b(); } } }");
    let config = Config::default().with_brace_style(BraceStyle::NextLine).with_indent_width(2);
    assert_eq!(
        generate(&unit, &config),
        "class C\n{\n  void f()\n  {\n    try\n    {\n      a();\n    }\n    catch (Exception e)\n    {\n      b();\n    }\n  }\n}\n"
    );
}

#[test]
fn local_declarations_with_modifiers_render_inline() {
    let text = format("class C { void f() { final @Nonnull String s = \"x\"; } }");
    assert!(text.contains("        @Nonnull final String s = \"x\";\n"), "{}", text);
}

#[test]
fn string_escapes_are_preserved() {
    let text = format(r#"class C { String s = "line\n\t\"quoted\"\\"; char c = '\''; }"#);
    assert!(text.contains(r#"String s = "line\n\t\"quoted\"\\";"#), "{}", text);
    assert!(text.contains(r"char c = '\'';"), "{}", text);
}

#[test]
fn generating_each_node_is_independent() {
    let unit = parse_source("class A { void f() { if (x) { y(); } } }");
    let config = Config::default();
    let first = generate(&unit, &config);
    let second = generate(&unit, &config);
    assert_eq!(first, second);

    let body = unit.type_decls[0].methods().next().unwrap().body.as_ref().unwrap();
    assert_eq!(generate(body, &config), "{\n    if (x) {\n        y();\n    }\n}\n");
    assert_eq!(generate(&body.statements[0], &config), "if (x) {\n    y();\n}\n");
}

#[test]
fn empty_unit_generates_nothing() {
    assert_eq!(format(""), "");
}
