// Copyright (c) 2026 Mikko Tanner. All rights reserved.
// Licensed under the MIT License or the Apache License, Version 2.0.
// SPDX-License-Identifier: MIT OR Apache-2.0

use super::{alternation, dedup_rows, PatternRow};
use std::collections::HashMap;
use tracing::trace;

/**
Collapse rows into an equivalent, smaller set of rows.

For each position in turn, rows that agree on every *other* position are
replaced by one row whose fragment at that position is the alternation of
theirs. Passes over all positions repeat until a pass merges nothing.

Merging only unions fragments of otherwise identical rows, so the matched
language never changes. Deterministic, but not a proof of minimality.
*/
pub(crate) fn collapse_rows(rows: Vec<PatternRow>) -> Vec<PatternRow> {
    let width: usize = rows.first().map_or(0, PatternRow::len);
    let mut rows: Vec<PatternRow> = dedup_rows(rows);
    let mut pass: usize = 0;

    loop {
        let mut merged_any: bool = false;
        for pos in 0..width {
            let (next, merged) = merge_at(&rows, pos);
            rows = next;
            merged_any |= merged;
        }
        pass += 1;
        trace!(pass, rows = rows.len(), merged_any, "collapse pass");
        if !merged_any {
            break;
        }
    }
    rows
}

/**
Merge rows that differ only at `pos`. Groups keep the order in which
their first row appeared. Returns the new rows and whether any group had
more than one variant.
*/
fn merge_at(rows: &[PatternRow], pos: usize) -> (Vec<PatternRow>, bool) {
    let mut index: HashMap<PatternRow, usize> = HashMap::with_capacity(rows.len());
    let mut groups: Vec<(&PatternRow, Vec<&str>)> = Vec::with_capacity(rows.len());

    for row in rows {
        let key: PatternRow = row.with_fragment(pos, String::new());
        let fragment: &str = &row.fragments()[pos];
        match index.get(&key) {
            Some(&i) => {
                if !groups[i].1.contains(&fragment) {
                    groups[i].1.push(fragment);
                }
            }
            None => {
                index.insert(key, groups.len());
                groups.push((row, vec![fragment]));
            }
        }
    }

    let mut merged: bool = false;
    let out: Vec<PatternRow> = groups
        .into_iter()
        .map(|(first, variants)| match variants.len() {
            1 => first.clone(),
            _ => {
                merged = true;
                first.with_fragment(pos, alternation(&variants))
            }
        })
        .collect();
    (out, merged)
}

/* -------------------------------------------------------------------------- */
