//
// Copyright (c) 2026 the casegen developers
//
// This file is part of the casegen project covered under
// the MIT License.  For the full license text, please see the LICENSE
// file in the root directory of this project.
// SPDX-License-Identifier: MIT
//

use clap::Parser;

fn main() {
    env_logger::init();

    let args = casegen::Args::parse();

    if let Err(e) = casegen::run(&args) {
        eprintln!("casegen: {}", e);
        std::process::exit(1);
    }
}
