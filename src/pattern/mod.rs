// Copyright (c) 2026 Mikko Tanner. All rights reserved.
// Licensed under the MIT License or the Apache License, Version 2.0.
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Range-to-pattern compilation: per-segment decomposition of an address
//! interval into regex rows, and their reduction into a small alternation.

mod collapsing;
mod digits;
mod segments;

use crate::{
    iptools::{IpFam, Range},
    Options,
};
use std::collections::HashSet;

pub use digits::hex_cache_len;

/**
One candidate full-address alternative: a regex fragment per segment
position, most significant segment first.

Rows are immutable values; merging builds new rows.
*/
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct PatternRow {
    fragments: Vec<String>,
}

impl PatternRow {
    pub fn new(fragments: Vec<String>) -> Self {
        Self { fragments }
    }

    pub fn fragments(&self) -> &[String] {
        &self.fragments
    }

    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    /// Join the fragments with the (escaped) family separator.
    pub fn render(&self, fam: IpFam) -> String {
        self.fragments.join(separator(fam))
    }

    /// Copy of this row with the fragment at `pos` replaced.
    pub(crate) fn with_fragment(&self, pos: usize, fragment: String) -> Self {
        let mut fragments: Vec<String> = self.fragments.clone();
        fragments[pos] = fragment;
        Self { fragments }
    }
}

/* -------------------------------------------------------------------------- */

/**
A set of [PatternRow]s whose union matches exactly the canonical text of
every address in one [Range], and nothing else.
*/
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PatternSet {
    fam: IpFam,
    rows: Vec<PatternRow>,
}

impl PatternSet {
    /// Decompose `range` into candidate rows, before any collapsing.
    pub fn build(range: &Range, opts: &Options) -> Self {
        let builder = segments::SegmentBuilder::new(range.fam, opts.leading_zeros);
        let rows: Vec<PatternRow> = builder.rows(&range.start_segments(), &range.end_segments());
        Self {
            fam: range.fam,
            rows,
        }
    }

    /// Merge rows that differ in a single position until nothing changes.
    /// The matched language is unchanged and the row count never grows.
    pub fn collapse(self) -> Self {
        Self {
            fam: self.fam,
            rows: collapsing::collapse_rows(self.rows),
        }
    }

    pub fn fam(&self) -> IpFam {
        self.fam
    }

    pub fn rows(&self) -> &[PatternRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// All rows as one unanchored non-capturing alternation.
    pub fn alternation(&self) -> String {
        let rendered: Vec<String> = self.rows.iter().map(|r| r.render(self.fam)).collect();
        format!("(?:{})", rendered.join("|"))
    }
}

/* -------------------------------------------------------------------------- */

#[inline]
pub(crate) fn separator(fam: IpFam) -> &'static str {
    match fam {
        IpFam::V4 => r"\.",
        IpFam::V6 => ":",
    }
}

/// Drop duplicate rows, keeping first occurrences in order.
pub(crate) fn dedup_rows(rows: Vec<PatternRow>) -> Vec<PatternRow> {
    let mut seen: HashSet<PatternRow> = HashSet::with_capacity(rows.len());
    rows.into_iter().filter(|r| seen.insert(r.clone())).collect()
}

/**
Join fragments into one alternation fragment.

Fragments never carry a top-level `|`, so a single fragment is returned
as-is. Fragments that are themselves a single `(?:...)` group get
flattened into the new alternation, and duplicates are dropped.
*/
pub(crate) fn alternation<S: AsRef<str>>(parts: &[S]) -> String {
    let mut seen: HashSet<&str> = HashSet::with_capacity(parts.len());
    let mut alts: Vec<&str> = Vec::with_capacity(parts.len());
    for part in parts {
        let inner: &str = unwrap_group(part.as_ref()).unwrap_or(part.as_ref());
        for alt in split_top_level(inner) {
            if seen.insert(alt) {
                alts.push(alt);
            }
        }
    }
    match alts.as_slice() {
        [] => String::new(),
        [single] => single.to_string(),
        _ => format!("(?:{})", alts.join("|")),
    }
}

/// If `s` is exactly one `(?:...)` group, return its contents.
fn unwrap_group(s: &str) -> Option<&str> {
    let inner: &str = s.strip_prefix("(?:")?.strip_suffix(')')?;
    // the opening paren must close at the very end
    let mut depth: usize = 0;
    for (_, c) in scan(inner) {
        match c {
            '(' => depth += 1,
            ')' if depth == 0 => return None,
            ')' => depth -= 1,
            _ => {}
        }
    }
    (depth == 0).then_some(inner)
}

/// Split on `|` at paren depth zero.
fn split_top_level(s: &str) -> Vec<&str> {
    let mut out: Vec<&str> = Vec::new();
    let mut depth: usize = 0;
    let mut last: usize = 0;
    for (i, c) in scan(s) {
        match c {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            '|' if depth == 0 => {
                out.push(&s[last..i]);
                last = i + 1;
            }
            _ => {}
        }
    }
    out.push(&s[last..]);
    out
}

/// Structural characters of a regex, skipping escapes and bracket classes.
fn scan(s: &str) -> impl Iterator<Item = (usize, char)> + '_ {
    let mut chars = s.char_indices();
    std::iter::from_fn(move || loop {
        let (i, c) = chars.next()?;
        match c {
            '\\' => {
                chars.next();
            }
            '[' => {
                for (_, c) in chars.by_ref() {
                    if c == ']' {
                        break;
                    }
                }
            }
            '(' | ')' | '|' => return Some((i, c)),
            _ => {}
        }
    })
}

/* -------------------------------------------------------------------------- */
