//! Tests for the parse → match → rewrite transform.
#![allow(clippy::unwrap_used)]

use delog::cst::{ParseError, Span};
use delog::engine::{process, process_with, scan, Options};
use delog::error::DelogError;
use delog::fix::Strategy;
use delog::matcher::TargetSpec;

fn only(dotted: &[&str]) -> TargetSpec {
    TargetSpec::parse_list(dotted).unwrap()
}

fn comment_options(targets: TargetSpec) -> Options {
    Options {
        targets,
        strategy: Some(Strategy::Comment),
        remove_semicolon: true,
    }
}

#[test]
fn test_identity_without_matches() {
    let source = "const logger = { log() {} };\n\
                  logger.log('x');\n\
                  console.warn('y');\n\
                  // console.log('in a comment')\n\
                  const s = \"console.log('in a string')\";\n";
    let outcome = process(source, &Options::default()).unwrap();

    assert_eq!(outcome.output, source);
    assert!(!outcome.changed());
}

#[test]
fn test_identity_on_empty_source() {
    let outcome = process("", &Options::default()).unwrap();
    assert_eq!(outcome.output, "");
    assert!(outcome.replaced.is_empty());
}

#[test]
fn test_idempotent_under_comment_strategy() {
    let source = "function init(app) {\n\
                  \x20 console.log('init', app);\n\
                  \x20 window.console.info({ app });\n\
                  \x20 return app.start();\n\
                  }\n\
                  console.assert(ready);\n";
    let options = comment_options(TargetSpec::default());

    let once = process(source, &options).unwrap();
    let twice = process(&once.output, &options).unwrap();

    assert_eq!(once.replaced.len(), 3);
    assert_eq!(twice.output, once.output);
    assert!(!twice.changed());
}

#[test]
fn test_ranges_are_valid_ordered_and_disjoint() {
    let source = "console.log(console.info(1), 2);\n\
                  if (x) { console.assert(x, console.log('nested')); }\n\
                  wrap(console.log('a'), window.console.log('b'));\n\
                  console?.info('optional');\n";
    let spans = scan(source, &TargetSpec::default()).unwrap();

    assert_eq!(spans.len(), 5);
    for span in &spans {
        assert!(span.start <= span.end && span.end <= source.len());
    }
    for pair in spans.windows(2) {
        assert!(pair[0].end <= pair[1].start, "{pair:?} overlap");
    }
}

#[test]
fn test_nested_log_collapses_to_outer_call() {
    let source = "console.log(console.log('x'))";
    let spans = scan(source, &only(&["console.log"])).unwrap();

    assert_eq!(spans, vec![Span::new(0, source.len())]);

    let outcome = process(source, &comment_options(only(&["console.log"]))).unwrap();
    assert_eq!(outcome.output, "/* console.log(console.log('x')) */");
}

#[test]
fn test_semicolon_extension_with_comment_strategy() {
    let options = comment_options(TargetSpec::default());
    let outcome = process("console.log('x');", &options).unwrap();

    assert_eq!(outcome.output, "/* console.log('x'); */");
    assert!(!outcome.output.contains("null"));
    assert_eq!(outcome.replaced, vec![Span::new(0, 17)]);
}

#[test]
fn test_semicolon_extension_skips_spaces_but_not_newlines() {
    let options = comment_options(TargetSpec::default());

    let spaced = process("console.log(1) \t;\nnext();", &options).unwrap();
    assert_eq!(spaced.output, "/* console.log(1) \t; */\nnext();");

    let broken = process("console.log(1)\n;next();", &options).unwrap();
    assert_eq!(broken.output, "/* console.log(1) */\n;next();");
}

#[test]
fn test_without_extension_semicolon_stays() {
    let outcome = process("console.info('x');", &Options::default()).unwrap();
    assert_eq!(outcome.output, "null /* console.info('x') */;");
}

#[test]
fn test_selective_namespace_and_method() {
    let source = "logger.log('x'); console.warn('y'); console.log('z');";
    let outcome = process(
        source,
        &Options {
            targets: only(&["console.log"]),
            ..Options::default()
        },
    )
    .unwrap();

    assert_eq!(
        outcome.output,
        "logger.log('x'); console.warn('y'); null /* console.log('z') */;"
    );
}

#[test]
fn test_legacy_method_list_uses_console_namespaces() {
    let source = "window.console.debug(a); console.debug(b); logger.debug(c); console.log(d);";
    let outcome = process(
        source,
        &Options {
            targets: TargetSpec::from_methods(&["debug"]),
            ..Options::default()
        },
    )
    .unwrap();

    assert_eq!(
        outcome.output,
        "null /* window.console.debug(a) */; null /* console.debug(b) */; logger.debug(c); console.log(d);"
    );
}

#[test]
fn test_custom_namespace_chain() {
    let source = "app.services.log.debug('boot');\napp.log.debug('other');";
    let targets = only(&["app.services.log.debug"]);
    let spans = scan(source, &targets).unwrap();

    assert_eq!(spans.len(), 1);
    assert_eq!(spans[0].slice(source), Some("app.services.log.debug('boot')"));
}

#[test]
fn test_parenthesized_namespace_and_callee() {
    let source = "(console).log(1);\n(console.log)(2);\n";
    let outcome = process(source, &Options::default()).unwrap();

    assert_eq!(
        outcome.output,
        "null /* (console).log(1) */;\nnull /* (console.log)(2) */;\n"
    );
}

#[test]
fn test_unresolvable_callees_are_not_errors() {
    let source = "getConsole().log(1); this.console.log(2); console['log'](3); (0, console).log(4);";
    let outcome = process(source, &Options::default()).unwrap();
    assert_eq!(outcome.output, source);
}

#[test]
fn test_multiline_call_and_multibyte_text() {
    let source = "const ok = '✓';\nconsole.log(\n  'héllo',\n  ok,\n);\nrun(); // ünïcode";
    let outcome = process(source, &comment_options(TargetSpec::default())).unwrap();

    assert_eq!(
        outcome.output,
        "const ok = '✓';\n/* console.log(\n  'héllo',\n  ok,\n); */\nrun(); // ünïcode"
    );
}

#[test]
fn test_jsx_and_arrow_bodies() {
    let source = "const el = <button onClick={() => console.log('clicked')}>Go</button>;";
    let outcome = process(source, &Options::default()).unwrap();

    assert_eq!(
        outcome.output,
        "const el = <button onClick={() => null /* console.log('clicked') */}>Go</button>;"
    );
}

#[test]
fn test_expression_position_keeps_valid_syntax() {
    let source = "const value = compute() || console.info('fallback');";
    let outcome = process(source, &Options::default()).unwrap();
    let reparsed = process(&outcome.output, &Options::default()).unwrap();

    assert_eq!(
        outcome.output,
        "const value = compute() || null /* console.info('fallback') */;"
    );
    assert_eq!(reparsed.output, outcome.output);
}

#[test]
fn test_custom_strategy_closure() {
    let source = "console.log(a); console.info(b);";
    let outcome = process_with(
        source,
        &TargetSpec::default(),
        &|call| format!("void {}", call.len()),
        false,
    )
    .unwrap();

    assert_eq!(outcome.output, "void 14; void 15;");
}

#[test]
fn test_template_strategy() {
    let options = Options {
        strategy: Some("if (DEBUG) {call}".parse().unwrap()),
        ..Options::default()
    };
    let outcome = process("console.log(state);", &options).unwrap();
    assert_eq!(outcome.output, "if (DEBUG) console.log(state);");
}

#[test]
fn test_parse_failure_propagates() {
    let err = process("console.log('x'", &Options::default()).unwrap_err();
    assert!(matches!(err, DelogError::Parse(ParseError::Syntax { .. })));

    let err = scan("function ( {", &TargetSpec::default()).unwrap_err();
    assert!(err.to_string().contains("syntax error"));
}

#[test]
fn test_parallel_invocations_are_independent() {
    use rayon::prelude::*;

    let sources: Vec<String> = (0..32)
        .map(|i| format!("let v{i} = {i};\nconsole.log(v{i});\n"))
        .collect();
    let outputs: Vec<String> = sources
        .par_iter()
        .map(|source| process(source, &Options::default()).unwrap().output)
        .collect();

    for (i, output) in outputs.iter().enumerate() {
        assert_eq!(
            output,
            &format!("let v{i} = {i};\nnull /* console.log(v{i}) */;\n")
        );
    }
}

#[test]
fn test_comment_terminator_in_call_is_copied_verbatim() {
    let source = "console.log('*/');\n";
    let once = process(source, &comment_options(TargetSpec::default())).unwrap();
    assert_eq!(once.output, "/* console.log('*/'); */\n");

    let err = process(&once.output, &Options::default()).unwrap_err();
    assert!(matches!(err, DelogError::Parse(ParseError::Syntax { .. })));

    let options = Options {
        strategy: Some("// {call}".parse().unwrap()),
        remove_semicolon: true,
        ..Options::default()
    };
    let line = process(source, &options).unwrap();
    assert_eq!(line.output, "// console.log('*/');\n");
    assert_eq!(process(&line.output, &options).unwrap().output, line.output);
}

#[test]
fn test_long_binary_chain() {
    let terms = vec!["'a'"; 2500].join(" + ");
    let prefix = format!("var s = {terms};\n");
    let source = format!("{prefix}console.log(s);\n");
    let outcome = process(&source, &Options::default()).unwrap();

    assert_eq!(outcome.replaced.len(), 1);
    assert_eq!(outcome.output, format!("{prefix}null /* console.log(s) */;\n"));
}

#[test]
fn test_long_call_chain() {
    let prefix = format!("p{};\n", ".then(f)".repeat(2500));
    let source = format!("{prefix}console.log(1);\n");
    let outcome = process(&source, &Options::default()).unwrap();

    assert_eq!(outcome.output, format!("{prefix}null /* console.log(1) */;\n"));
}

#[test]
fn test_long_member_chain_target() {
    let namespace = format!("root{}", ".next".repeat(2500));
    let targets = TargetSpec::parse_list(&[format!("{namespace}.log")]).unwrap();
    let source = format!("{namespace}.log(1);\n{namespace}.warn(2);\n");
    let outcome = process_with(&source, &targets, &|_| "0".to_owned(), false).unwrap();

    assert_eq!(outcome.output, format!("0;\n{namespace}.warn(2);\n"));
}

#[test]
fn test_deeply_nested_logs_collapse() {
    let levels = 2000;
    let call = format!("{}1{}", "console.log(".repeat(levels), ")".repeat(levels));
    let source = format!("{call};\n");
    let outcome = process(&source, &Options::default()).unwrap();

    assert_eq!(outcome.replaced, vec![Span::new(0, call.len())]);
    assert_eq!(outcome.output, format!("null /* {call} */;\n"));
}
