use jast::parser::parse_source_with_diagnostics;
use jast::{format_source, generate, summarize, BraceStyle, Config};
use pretty_assertions::assert_eq;

const SOURCES: &[&str] = &[
    r#"
package demo.app;

import java.io.*;
import java.util.Map;

/** Entry point */
public final class Main {
    private static final Map<String, Integer> COUNTS = new java.util.HashMap<>();
    int[] grid[] = new int[3][3];

    public static void main(String... args) throws IOException {
        // count every argument
        for (String arg : args) {
            COUNTS.merge(arg, 1, Integer::sum);
        }
        Runnable r = () -> System.out.println(COUNTS.size() > 0 ? "some" : "none");
        r.run();
        long mask = 0xFFL << 4 | 1 >>> 2;
        if (mask != 0 && !(args.length < 2)) {
            System.out.printf("%d%n", mask);
        } else if (args.length == 0) {
            return;
        } else {
            throw new IllegalArgumentException("bad \"args\"");
        }
    }
}
"#,
    r#"
interface Repository<K, V extends Comparable<? super V>> extends AutoCloseable {
    V find(K key);
    default java.util.List<V> all() { return java.util.Collections.emptyList(); }
    static <T> T first(T[] xs) { return xs.length > 0 ? xs[0] : null; }
}
"#,
    r#"
@SuppressWarnings({"unchecked", "rawtypes"})
enum Level implements Comparable<Level> {
    LOW(1), @Deprecated MID(5), HIGH(10);
    private final int weight;
    Level(int weight) { this.weight = weight; }
    static { System.loadLibrary("levels"); }
    int weight() { synchronized (this) { return weight; } }
}
"#,
    r#"
class Loops {
    void run(java.util.List<String> names) {
        int i = 0;
        do { i++; } while (i < 10);
        while (true) { if (i-- <= 0) break; }
        outer:
        for (int a = 0, b = 1; a < b; a++, b--) {
            switch (names.get(a)) {
                case "x": continue outer;
                default: break;
            }
        }
        try { risky(); } catch (RuntimeException | Error e) { throw e; } finally { i = -i; }
        assert i >= 0;
        final String done = "done";
    }
}
"#,
];

#[test]
fn generated_source_is_a_fixed_point() {
    for config in [
        Config::default(),
        Config::default().with_brace_style(BraceStyle::NextLine).with_tabs(),
    ] {
        for source in SOURCES {
            let once = format_source(source, &config);
            let twice = format_source(&once, &config);
            assert_eq!(once, twice);
        }
    }
}

#[test]
fn regenerated_source_parses_cleanly() {
    for source in SOURCES {
        let (unit, errors) = parse_source_with_diagnostics(source);
        assert!(errors.is_empty(), "source did not parse: {:?}", errors);

        let text = generate(&unit, &Config::default());
        let (reparsed, errors) = parse_source_with_diagnostics(&text);
        assert!(errors.is_empty(), "regenerated source did not parse: {:?}\n{}", errors, text);
        assert_eq!(summarize(&reparsed), summarize(&unit));
    }
}

#[test]
fn comments_and_spacing_are_not_preserved() {
    let text = format_source("class   A{/* note */int  x ;}", &Config::default());
    assert_eq!(text, "class A {\n    int x;\n}\n");
}
