//
// Copyright (c) 2026 the casegen developers
//
// This file is part of the casegen project covered under
// the MIT License.  For the full license text, please see the LICENSE
// file in the root directory of this project.
// SPDX-License-Identifier: MIT
//

use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use clap::Parser;
use log::debug;

use casefile::TestCase;
use error::{CasegenError, Result};
use textgen::TextGen;

mod casefile;
mod codegen;
mod encode;
pub mod error;
mod textgen;

/// casegen - compile test-case description files into C fixture tables
#[derive(Parser, Debug)]
#[command(version, about)]
pub struct Args {
    /// Write the generated source to this file.
    #[arg(short, long)]
    pub output: PathBuf,

    /// Test-case description file(s) to read.
    #[arg(required = true)]
    pub files: Vec<PathBuf>,
}

/// Parse every input file into one combined case list, then generate the
/// output file in a single pass. The first fatal input error aborts the
/// run; whatever was already written to the output file at that point is
/// unspecified.
pub fn run(args: &Args) -> Result<()> {
    let mut textgen = TextGen::new();
    let mut cases: Vec<TestCase> = Vec::new();

    for path in &args.files {
        let group = group_name(path)?;
        let file = File::open(path).map_err(|e| CasegenError::from(e).in_file(path))?;
        let parsed = casefile::parse_cases(io::BufReader::new(file), &group, &mut textgen)
            .map_err(|e| e.in_file(path))?;
        debug!("{}: parsed {} cases", path.display(), parsed.len());
        cases.extend(parsed);
    }

    debug!("writing {} cases to {}", cases.len(), args.output.display());
    let outfile =
        File::create(&args.output).map_err(|e| CasegenError::from(e).in_file(&args.output))?;
    let mut writer = io::BufWriter::new(outfile);
    codegen::emit(&cases, &mut writer)?;
    writer.flush()?;

    Ok(())
}

// The file stem tags every case parsed from that file.
fn group_name(path: &Path) -> Result<String> {
    match path.file_stem() {
        Some(stem) => Ok(stem.to_string_lossy().into_owned()),
        None => Err(CasegenError::BadInputPath {
            path: path.display().to_string(),
        }),
    }
}
