//
// Copyright (c) 2026 the casegen developers
//
// This file is part of the casegen project covered under
// the MIT License.  For the full license text, please see the LICENSE
// file in the root directory of this project.
// SPDX-License-Identifier: MIT
//

//! Parsing of test-case description files.
//!
//! A description file is a sequence of one-directive-per-line blocks,
//! each block terminated by a blank line:
//!
//! ```text
//! N:alpha-plus          case name (required)
//! D:Greedy plus         description
//! /ab+c                 the regex under test
//! T:xabbbc              subject text, one contribution per line
//! J:CRLF                separator for subsequent contributions
//! GEN:random,2K         generated filler as a contribution
//! CF:CASELESS           compile flag
//! E:MATCHFAIL           expected error tag
//! I:500                 iteration count
//! 0: 1,6                capture group 0 spans [1,6)
//! ```
//!
//! Malformed directives abort the whole run; a block that never names
//! itself is silently discarded at its terminating blank line.

use std::io::BufRead;

use log::debug;
use regex::Regex;

use crate::error::{CasegenError, Result};
use crate::textgen::TextGen;

/// Iterations a case runs for when no `I:` directive overrides it.
pub const DEFAULT_ITERATIONS: u64 = 100000;

/// Compile flags recognized by the `CF:` directive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompileFlag {
    Caseless,
    Newline,
}

impl CompileFlag {
    /// The symbol the test harness declares for this flag.
    pub fn symbol(self) -> &'static str {
        match self {
            CompileFlag::Caseless => "F_ICASE",
            CompileFlag::Newline => "F_NEWLINE",
        }
    }
}

/// Separator inserted between successive text contributions to one case.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Joiner {
    None,
    Nl,
    Cr,
    CrLf,
}

impl Joiner {
    fn separator(self) -> &'static str {
        match self {
            Joiner::None => "",
            Joiner::Nl => "\n",
            Joiner::Cr => "\r",
            Joiner::CrLf => "\r\n",
        }
    }
}

/// One test fixture, as accumulated from a description block.
///
/// `text` distinguishes "never contributed" from "contributed an empty
/// line": an empty `T:` still counts as a contribution, and the next one
/// gets joiner-prefixed.
#[derive(Debug, Clone, Default)]
pub struct TestCase {
    pub group: String,
    pub name: String,
    pub desc: String,
    pub regex: String,
    pub text: Option<String>,
    pub error: Option<String>,
    pub iter: Option<u64>,
    pub flags: Vec<CompileFlag>,
    pub res: Vec<(i64, i64)>,
}

struct ParseState {
    case: TestCase,
    joiner: Joiner,
    res_re: Regex,
    line_number: usize,
    cases: Vec<TestCase>,
}

impl ParseState {
    fn new() -> ParseState {
        ParseState {
            case: TestCase::default(),
            joiner: Joiner::Nl,
            res_re: Regex::new(r"^(\d+):\s*(-?\d+),\s*(-?\d+)").unwrap(),
            line_number: 0,
            cases: Vec::new(),
        }
    }

    // Directive dispatch for one (already right-trimmed) line.
    fn dispatch(&mut self, line: &str, group: &str, textgen: &mut TextGen) -> Result<()> {
        if line.trim_start().starts_with('#') {
            return Ok(());
        }

        if let Some(rest) = line.strip_prefix("N:") {
            self.case.name = String::from(rest);
            return Ok(());
        }

        if let Some(rest) = line.strip_prefix('/') {
            self.case.regex = String::from(rest);
            return Ok(());
        }

        if let Some(rest) = line.strip_prefix("D:") {
            self.case.desc = String::from(rest);
            return Ok(());
        }

        if let Some(rest) = line.strip_prefix("E:") {
            self.case.error = Some(String::from(rest));
            return Ok(());
        }

        if let Some(rest) = line.strip_prefix("I:") {
            // Validated here: this value lands in an int initializer.
            match rest.parse::<u64>() {
                Ok(iter) => self.case.iter = Some(iter),
                Err(_) => {
                    return Err(CasegenError::InvalidIteration {
                        line: self.line_number,
                        value: String::from(rest),
                    });
                }
            }
            return Ok(());
        }

        if let Some(rest) = line.strip_prefix("CF:") {
            match rest {
                "CASELESS" => self.case.flags.push(CompileFlag::Caseless),
                "NEWLINE" => self.case.flags.push(CompileFlag::Newline),
                _ => {
                    return Err(CasegenError::UnknownFlag {
                        line: self.line_number,
                        flag: String::from(rest),
                    });
                }
            }
            return Ok(());
        }

        if let Some(rest) = line.strip_prefix("J:") {
            self.joiner = match rest {
                "NONE" => Joiner::None,
                "NL" => Joiner::Nl,
                "CR" => Joiner::Cr,
                "CRLF" => Joiner::CrLf,
                _ => {
                    return Err(CasegenError::UnknownJoiner {
                        line: self.line_number,
                        value: String::from(rest),
                    });
                }
            };
            return Ok(());
        }

        if let Some(rest) = line.strip_prefix("T:") {
            self.append_text(rest);
            return Ok(());
        }

        if let Some(rest) = line.strip_prefix("GEN:") {
            // Split at the last comma: everything before it is the kind,
            // everything after it is the size.
            let (kind, count_spec) = match rest.rsplit_once(',') {
                Some(split) => split,
                None => {
                    return Err(CasegenError::MalformedGen {
                        line: self.line_number,
                        spec: String::from(rest),
                    });
                }
            };
            let fill = textgen.generate(kind, count_spec, self.line_number)?;
            self.append_text(fill);
            return Ok(());
        }

        if let Some(caps) = self.res_re.captures(line) {
            let index = caps[1].parse::<usize>();
            let start = caps[2].parse::<i64>();
            let end = caps[3].parse::<i64>();
            if let (Ok(index), Ok(start), Ok(end)) = (index, start, end) {
                if index != self.case.res.len() {
                    return Err(CasegenError::ResultsOutOfOrder {
                        line: self.line_number,
                        index,
                        expected: self.case.res.len(),
                    });
                }
                self.case.res.push((start, end));
                return Ok(());
            }
            // Numbers too large to represent fall through as unrecognized.
        }

        if line.is_empty() {
            self.seal(group);
            return Ok(());
        }

        Err(CasegenError::UnrecognizedLine {
            line: self.line_number,
            text: String::from(line),
        })
    }

    fn append_text(&mut self, chunk: &str) {
        match self.case.text {
            Some(ref mut text) => {
                text.push_str(self.joiner.separator());
                text.push_str(chunk);
            }
            None => self.case.text = Some(String::from(chunk)),
        }
    }

    // A blank line ends the current block. Nameless accumulators are
    // discarded without complaint; either way all per-case state resets,
    // including the joiner.
    fn seal(&mut self, group: &str) {
        let mut case = std::mem::take(&mut self.case);
        self.joiner = Joiner::Nl;

        if case.name.is_empty() {
            return;
        }

        case.group = String::from(group);
        debug!("sealed case '{}' ({} results)", case.name, case.res.len());
        self.cases.push(case);
    }
}

/// Parse one description file into sealed cases, in file order. `group`
/// is stamped onto every case; `textgen` is shared across files so
/// equal-size filler is reused run-wide.
pub fn parse_cases<R: BufRead>(
    mut reader: R,
    group: &str,
    textgen: &mut TextGen,
) -> Result<Vec<TestCase>> {
    let mut state = ParseState::new();

    loop {
        let mut raw_line = String::new();
        let n_read = reader.read_line(&mut raw_line)?;
        if n_read == 0 {
            break;
        }

        state.line_number += 1;
        state.dispatch(raw_line.trim_end(), group, textgen)?;
    }

    // A blank line is the only thing that seals a case: a trailing block
    // without one is dropped silently, which is easy to trip over when
    // hand-editing description files.
    // TODO: warn when EOF discards a non-empty accumulator.
    Ok(state.cases)
}
