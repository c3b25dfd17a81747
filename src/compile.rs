// Copyright (c) 2026 Mikko Tanner. All rights reserved.
// Licensed under the MIT License or the Apache License, Version 2.0.
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::{
    iptools::{Cidr, CidrError, IpFam},
    pattern::PatternSet,
};
use ipnet::IpNet;
use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/**
Options for turning a CIDR into a regex.

All fields have defaults, so a partial (or empty) serialized config is
valid: `{"anchored": false}` only turns anchoring off.
*/
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    /// Wrap the pattern in `^...$`. Default: `true`.
    pub anchored: bool,
    /// Case-insensitive matching for every family. IPv6 patterns are
    /// always case-insensitive regardless of this flag.
    pub ignore_case: bool,
    /// Report the `g` flag in [CidrRegex::flags]. The Rust engine has no
    /// stateful global mode, so this only affects the exported form.
    pub global: bool,
    /// Also match IPv4 octets zero-padded up to three digits (`010`).
    pub leading_zeros: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            anchored: true,
            ignore_case: false,
            global: false,
            leading_zeros: false,
        }
    }
}

/* -------------------------------------------------------------------------- */

/// A compiled CIDR regex, along with its textual source and flags.
#[derive(Clone, Debug)]
pub struct CidrRegex {
    source: String,
    fam: IpFam,
    ignore_case: bool,
    global: bool,
    regex: Regex,
}

impl CidrRegex {
    fn build(body: &str, fam: IpFam, opts: &Options) -> Result<Self, CidrError> {
        let source: String = match opts.anchored {
            true => format!("^{body}$"),
            false => body.to_string(),
        };
        let ignore_case: bool = opts.ignore_case || fam == IpFam::V6;
        let regex: Regex = RegexBuilder::new(&source)
            .case_insensitive(ignore_case)
            .build()?;
        Ok(Self {
            source,
            fam,
            ignore_case,
            global: opts.global,
            regex,
        })
    }

    /// Pattern source, without flags.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Flags as a string (`g`, `i`) for engines that take them separately.
    pub fn flags(&self) -> String {
        let mut flags: String = String::new();
        if self.global {
            flags.push('g');
        }
        if self.ignore_case {
            flags.push('i');
        }
        flags
    }

    pub fn fam(&self) -> IpFam {
        self.fam
    }

    pub fn regex(&self) -> &Regex {
        &self.regex
    }

    #[inline]
    pub fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }
}

impl fmt::Display for CidrRegex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}/{}", self.source, self.flags())
    }
}

/* -------------------------------------------------------------------------- */

/**
Compile `<address>/<prefix>` into one regex matching exactly the canonical
text of every address in the network: dotted decimal for IPv4, all eight
four-digit groups for IPv6. Host bits in the input address are ignored.

```ignore
let re = cidrex::compile("192.0.2.0/30", &Default::default())?;
assert!(re.is_match("192.0.2.3"));
assert!(!re.is_match("192.0.2.4"));
```
*/
pub fn compile(cidr: &str, opts: &Options) -> Result<CidrRegex, CidrError> {
    compile_cidr(&cidr.parse::<Cidr>()?, opts)
}

/// [compile] for an already parsed [Cidr].
pub fn compile_cidr(cidr: &Cidr, opts: &Options) -> Result<CidrRegex, CidrError> {
    let set: PatternSet = collapsed_set(cidr, opts);
    CidrRegex::build(&set.alternation(), cidr.fam, opts)
}

/// [compile] for an [IpNet].
pub fn compile_net(net: &IpNet, opts: &Options) -> Result<CidrRegex, CidrError> {
    compile_cidr(&Cidr::from(*net), opts)
}

/**
Compile into one regex per collapsed pattern row. A string belongs to the
network iff any of them matches. Order is deterministic.
*/
pub fn compile_all(cidr: &str, opts: &Options) -> Result<Vec<CidrRegex>, CidrError> {
    let cidr: Cidr = cidr.parse()?;
    let set: PatternSet = collapsed_set(&cidr, opts);
    set.rows()
        .iter()
        .map(|row| CidrRegex::build(&format!("(?:{})", row.render(set.fam())), cidr.fam, opts))
        .collect()
}

/// The collapsed pattern rows, for callers embedding the fragments themselves.
pub fn pattern_set(cidr: &str, opts: &Options) -> Result<PatternSet, CidrError> {
    Ok(collapsed_set(&cidr.parse::<Cidr>()?, opts))
}

fn collapsed_set(cidr: &Cidr, opts: &Options) -> PatternSet {
    let candidates: PatternSet = PatternSet::build(&cidr.range(), opts);
    let before: usize = candidates.len();
    let set: PatternSet = candidates.collapse();
    debug!(%cidr, candidates = before, rows = set.len(), "built pattern set");
    set
}

/* -------------------------------------------------------------------------- */
