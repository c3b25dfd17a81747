// Copyright (c) 2026 Mikko Tanner. All rights reserved.
// Licensed under the MIT License or the Apache License, Version 2.0.
// SPDX-License-Identifier: MIT OR Apache-2.0

use super::alternation;
use lazy_static::lazy_static;
use parking_lot::RwLock;
use std::collections::HashMap;

/// Any decimal octet `0..=255`, no leading zeros.
pub(crate) static OCTET_ANY: &str = "(?:25[0-5]|2[0-4][0-9]|1[0-9]{2}|[1-9]?[0-9])";
/// Any decimal octet, zero-padded up to three digits.
pub(crate) static OCTET_ANY_PADDED: &str = "(?:25[0-5]|2[0-4][0-9]|[01]?[0-9]{1,2})";
/// Any four-digit hextet.
pub(crate) static HEXTET_ANY: &str = "[0-9a-f]{4}";

const HEX_WIDTH: usize = 4;
const HEX_CHARS: &[u8; 16] = b"0123456789abcdef";

// Hextet sub-ranges repeat a lot (full range, single values), and the
// result only depends on the bounds.
lazy_static! {
    static ref HEX_CACHE: RwLock<HashMap<(u16, u16), String>> = RwLock::new(HashMap::new());
}

/// Number of memoized hextet ranges.
pub fn hex_cache_len() -> usize {
    HEX_CACHE.read().len()
}

/* -------------------------------------------------------------------------- */

/**
Regex fragment for the decimal octets `low..=high`.

The full range collapses into [OCTET_ANY]; anything else is an
alternation of the individual values. With `padded`, every value also
matches when written with leading zeros, up to three digits in total.
*/
pub(crate) fn octet_range(low: u16, high: u16, padded: bool) -> String {
    debug_assert!(low <= high && high <= 255);
    if low == 0 && high == 255 {
        return match padded {
            true => OCTET_ANY_PADDED.to_string(),
            false => OCTET_ANY.to_string(),
        };
    }
    let values: Vec<String> = (low..=high).map(|v| decimal(v, padded)).collect();
    alternation(&values)
}

#[inline]
fn decimal(v: u16, padded: bool) -> String {
    let s: String = v.to_string();
    match (padded, s.len()) {
        (true, 1) => format!("0{{0,2}}{s}"),
        (true, 2) => format!("0?{s}"),
        _ => s,
    }
}

/* ---------------------------------- */

/**
Regex fragment for the hextets `low..=high`, written as four lowercase
hex digits. Memoized per `(low, high)`.
*/
pub(crate) fn hextet_range(low: u16, high: u16) -> String {
    debug_assert!(low <= high);
    if let Some(hit) = HEX_CACHE.read().get(&(low, high)) {
        return hit.clone();
    }
    let out: String = hex_span(&hex_digits(low), &hex_digits(high));
    HEX_CACHE.write().insert((low, high), out.clone());
    out
}

/**
Compile the digit strings `lo..=hi` (equal length, `lo <= hi`) one digit
position at a time.

After the common prefix, the first differing position splits into:
- the low digit, followed by `lo`'s remainder up to all-`f`
- the digits strictly between, followed by anything
- the high digit, followed by all-`0` up to `hi`'s remainder

A boundary group whose remainder already spans everything is folded
into the middle digit class.
*/
fn hex_span(lo: &[u8], hi: &[u8]) -> String {
    debug_assert_eq!(lo.len(), hi.len());
    if lo == hi {
        return hex_literal(lo);
    }
    if lo.iter().all(|&d| d == 0) && hi.iter().all(|&d| d == 0xf) {
        return any_hex(lo.len());
    }

    let p: usize = match lo.iter().zip(hi).position(|(a, b)| a != b) {
        Some(p) => p,
        None => return hex_literal(lo),
    };
    let (ld, hd) = (lo[p], hi[p]);
    let (lo_rest, hi_rest) = (&lo[p + 1..], &hi[p + 1..]);
    let n: usize = lo_rest.len();
    let lo_open: bool = lo_rest.iter().all(|&d| d == 0);
    let hi_open: bool = hi_rest.iter().all(|&d| d == 0xf);

    let mut alts: Vec<String> = Vec::with_capacity(3);
    let mid_lo: u8 = if lo_open {
        ld
    } else {
        alts.push(format!("{}{}", hex_char(ld), hex_span(lo_rest, &vec![0xf; n])));
        ld + 1
    };
    let mid_hi: u8 = if hi_open { hd } else { hd - 1 };
    if mid_lo <= mid_hi {
        alts.push(match (mid_lo, mid_hi) {
            (0, 0xf) => any_hex(n + 1),
            _ => format!("{}{}", digit_class(mid_lo, mid_hi), any_hex(n)),
        });
    }
    if !hi_open {
        alts.push(format!("{}{}", hex_char(hd), hex_span(&vec![0; n], hi_rest)));
    }

    format!("{}{}", hex_literal(&lo[..p]), alternation(&alts))
}

/**
Character class for the hex digits `a..=b`.

`0-9` and `a-f` are not adjacent in ASCII, so a span crossing the
boundary becomes two ranges in one class: 8..=12 is `[89a-c]`.
*/
fn digit_class(a: u8, b: u8) -> String {
    debug_assert!(a <= b && b <= 0xf);
    if a == b {
        return hex_char(a).to_string();
    }
    let mut class: String = String::from("[");
    if a <= 9 {
        push_span(&mut class, a, b.min(9));
    }
    if b >= 10 {
        push_span(&mut class, a.max(10), b);
    }
    class.push(']');
    class
}

fn push_span(class: &mut String, a: u8, b: u8) {
    class.push(hex_char(a));
    match b - a {
        0 => {}
        1 => class.push(hex_char(b)),
        _ => {
            class.push('-');
            class.push(hex_char(b));
        }
    }
}

#[inline]
fn any_hex(n: usize) -> String {
    match n {
        0 => String::new(),
        1 => "[0-9a-f]".to_string(),
        _ => format!("[0-9a-f]{{{n}}}"),
    }
}

#[inline]
fn hex_char(d: u8) -> char {
    HEX_CHARS[d as usize] as char
}

#[inline]
fn hex_literal(digits: &[u8]) -> String {
    digits.iter().map(|&d| hex_char(d)).collect()
}

#[inline]
fn hex_digits(v: u16) -> [u8; HEX_WIDTH] {
    [(v >> 12) as u8, (v >> 8) as u8 & 0xf, (v >> 4) as u8 & 0xf, v as u8 & 0xf]
}

/* -------------------------------------------------------------------------- */
