//! End-to-end formatting scenarios

use kotlinize_core::testing::rewrite_run;
use kotlinize_core::ExecutionContext;
use kotlinize_fixer::{AutoFormat, FormatKotlinSources};
use kotlinize_syntax::kotlin::{lex, TokenKind};
use kotlinize_syntax::{parse_kotlin, KotlinSource};

/// A file already in house style survives the pipeline byte-for-byte
#[test]
fn test_well_formatted_file_unchanged() {
    let source = "\
package com.example

import kotlin.math.max

class Counter(
    private val start: Int,
) {
    private var value = start

    fun bump(step: Int): Int {
        value = max(value + step, 0)
        return value
    }
}
";
    rewrite_run(&FormatKotlinSources, parse_kotlin, source, source);
}

#[test]
fn test_mixed_indentation_and_commas_normalised() {
    rewrite_run(
        &FormatKotlinSources,
        parse_kotlin,
        "fun main() {\n\tval xs = listOf(\n\t\t\"a\",\n\t\t\"b\"\n\t)   \n\tprintln(xs)\n}\n",
        "fun main() {\n    val xs = listOf(\n        \"a\",\n        \"b\",\n    )\n    println(xs)\n}\n",
    );
}

#[test]
fn test_operator_spacing_and_branches() {
    rewrite_run(
        &FormatKotlinSources,
        parse_kotlin,
        "fun scale(n:Int):Int {\nif (n==0) {\nreturn 0\n}\nelse {\nreturn n*2\n}\n}\n",
        "fun scale(n: Int): Int {\n    if (n == 0) {\n        return 0\n    } else {\n        return n * 2\n    }\n}\n",
    );
}

/// Formatting changes layout only: the token stream, ignoring inserted
/// trailing commas, is exactly the input's
#[test]
fn test_semantic_preservation() {
    let source = "fun main() {\n\tval xs = listOf(\n\t\t1,\n\t\t2\n\t)   \n}\n";
    let unit = KotlinSource::parse(source).unwrap();
    let formatted = AutoFormat::new()
        .format(&unit, &ExecutionContext::new())
        .unwrap();

    let significant = |text: &str| {
        lex(text)
            .unwrap()
            .iter()
            .filter(|t| t.kind != TokenKind::Symbol || t.text(text) != ",")
            .map(|t| t.text(text).to_string())
            .collect::<Vec<_>>()
    };
    assert_eq!(significant(&formatted), significant(source));
}

#[test]
fn test_pipeline_twice_equals_once() {
    let source = "class Box(val a:Int,val b:Int) {\nfun sum()=a+b\n}\n";
    let unit = KotlinSource::parse(source).unwrap();
    let ctx = ExecutionContext::new();
    let once = AutoFormat::new().format(&unit, &ctx).unwrap();
    let again = AutoFormat::new()
        .format(&KotlinSource::parse(once.clone()).unwrap(), &ctx)
        .unwrap();
    assert_eq!(again, once);
}

#[test]
fn test_raw_strings_survive_formatting() {
    let source = "fun usage(): String {\n    return \"\"\"\n  usage:   tool [options]\n\t(indented)\n\"\"\"\n}\n";
    rewrite_run(&FormatKotlinSources, parse_kotlin, source, source);
}
