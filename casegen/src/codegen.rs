//
// Copyright (c) 2026 the casegen developers
//
// This file is part of the casegen project covered under
// the MIT License.  For the full license text, please see the LICENSE
// file in the root directory of this project.
// SPDX-License-Identifier: MIT
//

//! C source generation for parsed test cases.
//!
//! The output is one compilation unit: a deduplicated, NUL-terminated
//! byte array per unique subject text, one `struct testcase` literal per
//! case, and a null-terminated `cases[]` pointer table the harness walks
//! without knowing its length.

use std::collections::HashMap;
use std::io::{self, Write};

use log::debug;

use crate::casefile::{TestCase, DEFAULT_ITERATIONS};
use crate::encode::{hex_array, quote};

/// Write the generated source for `cases` in one pass, in order.
pub fn emit<W: Write>(cases: &[TestCase], output: &mut W) -> io::Result<()> {
    write_header(output)?;

    // Payload text -> number of the constant that first carried it.
    let mut text_cache: HashMap<&str, String> = HashMap::new();

    for (i, case) in cases.iter().enumerate() {
        let num = format!("{:03}", i);
        write_case(output, case, &num, &mut text_cache)?;
    }

    write_case_table(output, cases.len())?;
    Ok(())
}

fn write_header<W: Write>(output: &mut W) -> io::Result<()> {
    writeln!(output, "/**")?;
    writeln!(output, " * AUTOMATICALLY GENERATED - DO NOT EDIT")?;
    writeln!(output, " */")?;
    writeln!(output, "#include \"test.h\"")?;
    writeln!(output)?;
    Ok(())
}

fn write_case<'a, W: Write>(
    output: &mut W,
    case: &'a TestCase,
    num: &str,
    text_cache: &mut HashMap<&'a str, String>,
) -> io::Result<()> {
    // The subject text goes out first so the case can reference it. A
    // payload already declared for an earlier case is reused, not
    // re-declared.
    let payload = case.text.as_deref().unwrap_or("");
    let text_num = match text_cache.get(payload) {
        Some(existing) => {
            debug!("case '{}' reuses text_{}", case.name, existing);
            existing.clone()
        }
        None => {
            text_cache.insert(payload, String::from(num));
            writeln!(
                output,
                "const char text_{}[] = {{\n    {} }};",
                num,
                hex_array(payload)
            )?;
            String::from(num)
        }
    };

    writeln!(output, "const struct testcase case_{} = {{", num)?;
    writeln!(output, "\t.group = \"{}\",", case.group)?;
    writeln!(output, "\t.name = \"{}\",", case.name)?;
    writeln!(output, "\t.desc = \"{}\",", case.desc)?;
    writeln!(output, "\t.regex = \"{}\",", quote(&case.regex))?;
    writeln!(output, "\t.text = (char *)text_{},", text_num)?;
    writeln!(output, "\t.groups = {},", case.res.len())?;
    match &case.error {
        Some(tag) => writeln!(output, "\t.error = E_{},", tag)?,
        None => writeln!(output, "\t.error = E_OK,")?,
    }
    writeln!(output, "\t.iter = {},", case.iter.unwrap_or(DEFAULT_ITERATIONS))?;
    if case.flags.is_empty() {
        writeln!(output, "\t.cflags = 0,")?;
    } else {
        let flags: Vec<&str> = case.flags.iter().map(|f| f.symbol()).collect();
        writeln!(output, "\t.cflags = {},", flags.join("|"))?;
    }
    writeln!(output, "\t.res = {},", render_results(&case.res))?;
    writeln!(output, "}};")?;
    Ok(())
}

fn render_results(res: &[(i64, i64)]) -> String {
    if res.is_empty() {
        return String::from("{ }");
    }

    let pairs: Vec<String> = res
        .iter()
        .map(|(start, end)| format!("{{ {}, {} }}", start, end))
        .collect();
    format!("{{ {} }}", pairs.join(", "))
}

// The table is null-terminated so the harness can walk it without a
// length.
fn write_case_table<W: Write>(output: &mut W, count: usize) -> io::Result<()> {
    writeln!(output, "const struct testcase *cases[] = {{")?;
    for i in 0..count {
        writeln!(output, "\t&case_{:03},", i)?;
    }
    writeln!(output, "\t0\n}};")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::casefile::CompileFlag;

    fn case(name: &str, text: &str) -> TestCase {
        TestCase {
            group: String::from("g"),
            name: String::from(name),
            regex: String::from("a"),
            text: Some(String::from(text)),
            ..Default::default()
        }
    }

    fn render(cases: &[TestCase]) -> String {
        let mut out = Vec::new();
        emit(cases, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_header() {
        let out = render(&[]);
        assert!(out.starts_with(
            "/**\n * AUTOMATICALLY GENERATED - DO NOT EDIT\n */\n#include \"test.h\"\n\n"
        ));
    }

    #[test]
    fn test_empty_input_still_emits_table() {
        let out = render(&[]);
        assert!(out.ends_with("const struct testcase *cases[] = {\n\t0\n};\n"));
    }

    #[test]
    fn test_single_case_layout() {
        let mut single = case("alpha", "xy");
        single.desc = String::from("first");
        single.res = vec![(0, 2)];
        let out = render(&[single]);

        assert!(out.contains("const char text_000[] = {\n    0x78, 0x79, 0x00 };\n"));
        assert!(out.contains("const struct testcase case_000 = {\n"));
        assert!(out.contains("\t.group = \"g\",\n"));
        assert!(out.contains("\t.name = \"alpha\",\n"));
        assert!(out.contains("\t.desc = \"first\",\n"));
        assert!(out.contains("\t.regex = \"a\",\n"));
        assert!(out.contains("\t.text = (char *)text_000,\n"));
        assert!(out.contains("\t.groups = 1,\n"));
        assert!(out.contains("\t.res = { { 0, 2 } },\n"));
        assert!(out.ends_with("const struct testcase *cases[] = {\n\t&case_000,\n\t0\n};\n"));
    }

    #[test]
    fn test_field_order_is_fixed() {
        let out = render(&[case("one", "t")]);
        let positions: Vec<usize> = [
            "\t.group =", "\t.name =", "\t.desc =", "\t.regex =", "\t.text =", "\t.groups =",
            "\t.error =", "\t.iter =", "\t.cflags =", "\t.res =",
        ]
        .iter()
        .map(|field| out.find(field).unwrap())
        .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_defaults() {
        let out = render(&[case("d", "t")]);
        assert!(out.contains("\t.error = E_OK,\n"));
        assert!(out.contains("\t.iter = 100000,\n"));
        assert!(out.contains("\t.cflags = 0,\n"));
        assert!(out.contains("\t.res = { },\n"));
    }

    #[test]
    fn test_explicit_error_iter_flags() {
        let mut full = case("f", "t");
        full.error = Some(String::from("MATCHFAIL"));
        full.iter = Some(500);
        full.flags = vec![CompileFlag::Caseless, CompileFlag::Newline];
        let out = render(&[full]);

        assert!(out.contains("\t.error = E_MATCHFAIL,\n"));
        assert!(out.contains("\t.iter = 500,\n"));
        assert!(out.contains("\t.cflags = F_ICASE|F_NEWLINE,\n"));
    }

    #[test]
    fn test_regex_is_quoted() {
        let mut quoted = case("q", "t");
        quoted.regex = String::from("a\"b\\c");
        let out = render(&[quoted]);
        assert!(out.contains("\t.regex = \"a\\\"b\\\\c\",\n"));
    }

    #[test]
    fn test_identical_text_shares_one_constant() {
        let out = render(&[case("one", "shared"), case("two", "shared")]);

        assert_eq!(out.matches("const char text_").count(), 1);
        assert_eq!(out.matches("\t.text = (char *)text_000,\n").count(), 2);
        assert!(out.contains("const struct testcase case_001 = {"));
    }

    #[test]
    fn test_distinct_text_gets_own_constant() {
        let out = render(&[case("one", "first"), case("two", "second")]);

        assert!(out.contains("const char text_000[]"));
        assert!(out.contains("const char text_001[]"));
        assert!(out.contains("\t.text = (char *)text_001,\n"));
    }

    #[test]
    fn test_dedup_is_exact_match() {
        let out = render(&[case("one", "abc"), case("two", "abd")]);
        assert_eq!(out.matches("const char text_").count(), 2);
    }

    #[test]
    fn test_missing_text_encodes_empty_payload() {
        let mut bare = case("bare", "");
        bare.text = None;
        let out = render(&[bare]);
        assert!(out.contains("const char text_000[] = {\n    0x00 };\n"));
    }

    #[test]
    fn test_multiple_result_pairs() {
        let mut multi = case("m", "t");
        multi.res = vec![(0, 5), (6, 10), (-1, -1)];
        let out = render(&[multi]);
        assert!(out.contains("\t.res = { { 0, 5 }, { 6, 10 }, { -1, -1 } },\n"));
        assert!(out.contains("\t.groups = 3,\n"));
    }

    #[test]
    fn test_table_preserves_order() {
        let out = render(&[case("a", "1"), case("b", "2"), case("c", "3")]);
        assert!(out.ends_with(
            "const struct testcase *cases[] = {\n\t&case_000,\n\t&case_001,\n\t&case_002,\n\t0\n};\n"
        ));
    }
}
