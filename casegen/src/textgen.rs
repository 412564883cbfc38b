//
// Copyright (c) 2026 the casegen developers
//
// This file is part of the casegen project covered under
// the MIT License.  For the full license text, please see the LICENSE
// file in the root directory of this project.
// SPDX-License-Identifier: MIT
//

//! Filler text for the `GEN:` directive.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use log::debug;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::error::{CasegenError, Result};

/// Produces pseudo-random filler text, memoized by size.
///
/// One instance lives for the whole run: every request for a given size
/// returns the identical text, so repeated `GEN:` lines of the same size
/// collapse into a single backing constant downstream.
pub struct TextGen {
    cache: HashMap<usize, String>,
    rng: SmallRng,
}

impl TextGen {
    pub fn new() -> TextGen {
        TextGen {
            cache: HashMap::new(),
            rng: SmallRng::from_entropy(),
        }
    }

    /// Produce `count_spec` characters of filler of the given kind.
    /// Only `random` is recognized; `count_spec` is decimal digits with an
    /// optional `K` suffix multiplying by 1024.
    pub fn generate(&mut self, kind: &str, count_spec: &str, line: usize) -> Result<&str> {
        if kind != "random" {
            return Err(CasegenError::UnknownGenKind {
                line,
                kind: String::from(kind),
            });
        }

        let count = match parse_count(count_spec) {
            Some(count) => count,
            None => {
                return Err(CasegenError::MalformedGen {
                    line,
                    spec: String::from(count_spec),
                });
            }
        };

        let rng = &mut self.rng;
        let fill = match self.cache.entry(count) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(slot) => {
                debug!("generating {} bytes of random filler", count);
                // Printable ASCII without space: letters, digits, punctuation.
                let fill: String = (0..count)
                    .map(|_| rng.gen_range(b'!'..=b'~') as char)
                    .collect();
                slot.insert(fill)
            }
        };

        Ok(fill.as_str())
    }
}

/// Parse a `<digits>[K]` size. Anything else is rejected.
fn parse_count(spec: &str) -> Option<usize> {
    let (digits, mult) = match spec.strip_suffix('K') {
        Some(digits) => (digits, 1024),
        None => (spec, 1),
    };

    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    digits.parse::<usize>().ok()?.checked_mul(mult)
}
