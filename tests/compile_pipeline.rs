//! End-to-end behavior of the compile pipeline

use rstest::rstest;
use sutra::{compile, CompileError, CompileOptions, Compiler, LoopTracking};

const COUNTDOWN: &str = "आरम्भ
मान x = 3
यावत् (x > 0) {
  मुद्रय(\"नमस्ते\")
  x = x - 1
}
समाप्त
";

#[rstest]
#[case::declare_true("मान x = सत्य", "let x = true;")]
#[case::declare_false("मान y = असत्य", "let y = false;")]
#[case::print_null("मुद्रय(शून्य)", "console.log(null);")]
#[case::literals_inside_expressions(
    "मुद्रय(सत्य && !असत्य || शून्य)",
    "console.log(true && !false || null);"
)]
#[case::keyword_prefix_is_an_identifier("मान सत्यम् = 1", "let सत्यम् = 1;")]
#[case::comment_marker_in_string(
    "मुद्रय(\"सत्य // not a comment\")",
    "console.log(\"true // not a comment\");"
)]
#[case::keyword_inside_string("मुद्रय(\"सत्य है\")", "console.log(\"true है\");")]
#[case::trailing_comment("मान z = 1 // note", "let z = 1 ;")]
#[case::comment_only_line("// nothing here\nमुद्रय(1)", "\nconsole.log(1);")]
#[case::conditional_with_alternate(
    "यदि (x > 1) {\n  मुद्रय(x)\n} अन्यथा {\n  मुद्रय(0)\n}",
    "if (x > 1) {\n  console.log(x);\n} else {\n  console.log(0);\n}"
)]
#[case::chained_alternate(
    "यदि (x > 1) {\n} अन्यथा यदि (x > 0) {\n} अन्यथा {\n}",
    "if (x > 1) {\n} else if (x > 0) {\n} else {\n}"
)]
#[case::break_inside_loop("यावत् (सत्य) {\n  विराम\n}", "while (true) {\n  break;\n}")]
#[case::continue_inside_nested_conditional(
    "यावत् (x > 0) {\n  x = x - 1\n  यदि (x == 1) {\n    अग्रिम\n  }\n}",
    "while (x > 0) {\n  x = x - 1;\n  if (x == 1) {\n    continue;\n  }\n}"
)]
#[case::text_outside_markers_is_ignored(
    "junk }\nआरम्भ\nमुद्रय(1)\nसमाप्त\n{ more junk",
    "console.log(1);"
)]
fn test_compiles(#[case] source: &str, #[case] expected: &str) {
    assert_eq!(compile(source).unwrap(), expected);
}

#[rstest]
#[case::start_without_end("आरम्भ\nमुद्रय(1)", "boundary")]
#[case::end_without_start("मुद्रय(1)\nसमाप्त", "boundary")]
#[case::conditional_brace_on_next_line("यदि (x > 1)\n{\n}", "shape")]
#[case::alternate_with_condition("यदि (x) {\n} अन्यथा (y) {\n}", "shape")]
#[case::alternate_without_brace("यदि (x) {\n}\nअन्यथा\n{\n}", "shape")]
#[case::extra_closing_brace("{ } }", "structure")]
#[case::unclosed_brace("{ {", "structure")]
#[case::break_at_top_level("विराम", "loop-control")]
#[case::continue_in_conditional("यदि (x) {\n  अग्रिम\n}", "loop-control")]
#[case::break_after_loop_closed(
    "यावत् (x > 0) {\n  x = x - 1\n}\nविराम",
    "loop-control"
)]
fn test_rejects(#[case] source: &str, #[case] kind: &str) {
    let err = compile(source).unwrap_err();
    assert_eq!(err.kind(), kind, "unexpected error: {}", err);
}

#[test]
fn test_countdown_program() {
    let js = compile(COUNTDOWN).unwrap();
    assert_eq!(
        js,
        "let x = 3;\nwhile (x > 0) {\n  console.log(\"नमस्ते\");\n  x = x - 1;\n}"
    );
}

#[test]
fn test_errors_after_extraction_ignore_outer_text() {
    // The stray brace before the start marker is never looked at
    let err = compile("}\nआरम्भ\n{\nसमाप्त").unwrap_err();
    let diagnostic = err.diagnostic();
    assert_eq!(diagnostic.message, "unmatched opening brace");
    assert_eq!(diagnostic.line(), 1);
    assert_eq!(diagnostic.snippet, "{");
}

#[test]
fn test_extra_closing_brace_is_reported_where_it_occurs() {
    match compile("{ } }") {
        Err(CompileError::Structure(d)) => {
            assert_eq!(d.message, "unmatched closing brace");
            assert_eq!((d.line(), d.column()), (1, 5));
        }
        other => panic!("expected structure error, got {:?}", other),
    }
}

#[test]
fn test_unclosed_brace_reports_innermost() {
    match compile("{ {") {
        Err(CompileError::Structure(d)) => {
            assert_eq!(d.message, "unmatched opening brace");
            assert_eq!((d.line(), d.column()), (1, 3));
        }
        other => panic!("expected structure error, got {:?}", other),
    }
}

#[test]
fn test_sibling_blocks_inside_loop() {
    let source = "यावत् (x > 0) {\n  यदि (x == 2) {\n    x = 0\n  }\n  विराम\n}";

    assert!(compile(source).is_ok());

    let counter = Compiler::new(CompileOptions {
        loop_tracking: LoopTracking::Counter,
    });
    assert!(matches!(
        counter.compile(source),
        Err(CompileError::LoopControl(_))
    ));
}

#[test]
fn test_compilations_are_independent() {
    assert!(compile("{").is_err());
    assert_eq!(compile("मुद्रय(1)").unwrap(), "console.log(1);");
}
