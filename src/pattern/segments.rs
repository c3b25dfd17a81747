// Copyright (c) 2026 Mikko Tanner. All rights reserved.
// Licensed under the MIT License or the Apache License, Version 2.0.
// SPDX-License-Identifier: MIT OR Apache-2.0

use super::{
    dedup_rows,
    digits::{hextet_range, octet_range, HEXTET_ANY, OCTET_ANY, OCTET_ANY_PADDED},
    PatternRow,
};
use crate::iptools::IpFam;
use std::iter;

/// Recursive per-segment decomposition of an address interval into rows.
pub(crate) struct SegmentBuilder {
    fam: IpFam,
    padded: bool,
}

impl SegmentBuilder {
    pub fn new(fam: IpFam, padded: bool) -> Self {
        Self {
            fam,
            // only decimal octets have a padded form
            padded: padded && fam == IpFam::V4,
        }
    }

    /**
    Rows matching every address between the segment vectors `lo` and `hi`
    (inclusive, compared lexicographically as whole vectors).

    At the first segment where the bounds differ, the interval splits into
    - `lo[0]` followed by everything from `lo[1..]` up to the maximum
    - the values strictly between, followed by anything
    - `hi[0]` followed by everything from the minimum up to `hi[1..]`

    Once both bounds span the whole remaining space, the rest of the row
    is filled with the any-segment wildcard.
    */
    pub fn rows(&self, lo: &[u16], hi: &[u16]) -> Vec<PatternRow> {
        debug_assert_eq!(lo.len(), hi.len());
        let (Some((&l, lo_rest)), Some((&h, hi_rest))) = (lo.split_first(), hi.split_first())
        else {
            return vec![PatternRow::new(Vec::new())];
        };

        let max: u16 = self.fam.segment_max();
        if lo.iter().all(|&v| v == 0) && hi.iter().all(|&v| v == max) {
            return vec![self.wildcards(lo.len())];
        }

        if l == h {
            return self.prefixed(self.fragment(l, l), lo_rest, hi_rest);
        }

        let n: usize = lo_rest.len();
        let top: Vec<u16> = vec![max; n];
        let bottom: Vec<u16> = vec![0; n];

        let mut out: Vec<PatternRow> = self.prefixed(self.fragment(l, l), lo_rest, &top);
        if l + 1 < h {
            let middle: String = self.fragment(l + 1, h - 1);
            out.push(prepend(middle, &self.wildcards(n)));
        }
        out.extend(self.prefixed(self.fragment(h, h), &bottom, hi_rest));

        dedup_rows(out)
    }

    /// Rows for `lo..=hi`, each preceded by `head`.
    fn prefixed(&self, head: String, lo: &[u16], hi: &[u16]) -> Vec<PatternRow> {
        self.rows(lo, hi)
            .iter()
            .map(|row| prepend(head.clone(), row))
            .collect()
    }

    fn wildcards(&self, n: usize) -> PatternRow {
        PatternRow::new(vec![self.any().to_string(); n])
    }

    fn fragment(&self, low: u16, high: u16) -> String {
        match self.fam {
            IpFam::V4 => octet_range(low, high, self.padded),
            IpFam::V6 => hextet_range(low, high),
        }
    }

    fn any(&self) -> &'static str {
        match (self.fam, self.padded) {
            (IpFam::V4, false) => OCTET_ANY,
            (IpFam::V4, true) => OCTET_ANY_PADDED,
            (IpFam::V6, _) => HEXTET_ANY,
        }
    }
}

#[inline]
fn prepend(head: String, row: &PatternRow) -> PatternRow {
    PatternRow::new(iter::once(head).chain(row.fragments().iter().cloned()).collect())
}

/* -------------------------------------------------------------------------- */
