//
// Copyright (c) 2026 the casegen developers
//
// This file is part of the casegen project covered under
// the MIT License.  For the full license text, please see the LICENSE
// file in the root directory of this project.
// SPDX-License-Identifier: MIT
//

//! Rendering of text payloads as C literals.
//!
//! All quoting and byte-array encoding for the generated source lives
//! here so the escaping rules are defined (and tested) exactly once.

/// Hex values emitted per line of a byte-array initializer.
const VALUES_PER_LINE: usize = 12;

/// Escape `s` for use inside a double-quoted C string literal.
///
/// Backslash must be replaced first so the backslashes introduced by the
/// later substitutions are not escaped again.
pub fn quote(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
        .replace('\t', "\\t")
}

/// Render `s` as the body of a NUL-terminated `char` array initializer:
/// the UTF-8 bytes of `s` plus a trailing zero byte, as uppercase hex
/// literals, at most [`VALUES_PER_LINE`] per line.
///
/// The continuation separator matches the four-space indent the emitter
/// uses for array bodies, so wrapped lines stay aligned.
pub fn hex_array(s: &str) -> String {
    let mut values: Vec<String> = s.bytes().map(|b| format!("0x{:02X}", b)).collect();
    values.push(String::from("0x00"));

    values
        .chunks(VALUES_PER_LINE)
        .map(|chunk| chunk.join(", "))
        .collect::<Vec<String>>()
        .join(",\n    ")
}
