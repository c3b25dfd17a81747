// Copyright (c) 2026 Mikko Tanner. All rights reserved.
// Licensed under the MIT License or the Apache License, Version 2.0.
// SPDX-License-Identifier: MIT OR Apache-2.0

use super::{
    strings::*,
    structs::{Cidr, IpFam},
    CidrError,
};
use std::borrow::Cow;
use tracing::debug;

/**
Parse `<address>/<prefix>` into a [Cidr].

The input is trimmed and split on the *last* slash. The family is IPv6 if
the address contains a colon, IPv4 otherwise. The result is all-or-nothing:
either a fully validated [Cidr] or an error, never a partial value.

IPv4 octets may carry leading zeros (`010.000.002.001`), IPv6 may use a
single `::` and/or a trailing embedded IPv4 (`::ffff:1.2.3.4`).
*/
pub(crate) fn parse_cidr(arg: &str) -> Result<Cidr, CidrError> {
    parse_cidr_inner(arg.trim()).inspect_err(|e| debug!("rejected CIDR '{arg}': {e}"))
}

fn parse_cidr_inner(s: &str) -> Result<Cidr, CidrError> {
    let Some((addr, prefix)) = s.rsplit_once(SLASH) else {
        return Err(CidrError::MalformedInput(s.into()));
    };
    if addr.is_empty() || addr.contains(SLASH) || prefix.is_empty() {
        return Err(CidrError::MalformedInput(s.into()));
    }
    if !prefix.bytes().all(|b| b.is_ascii_digit()) {
        return Err(CidrError::MalformedInput(s.into()));
    }

    let fam: IpFam = if addr.contains(':') { IpFam::V6 } else { IpFam::V4 };
    let out_of_range = || CidrError::PrefixOutOfRange {
        prefix: prefix.into(),
        max: fam.bits(),
    };

    // all digits, so the only way to fail is overflow
    let prefix: u8 = prefix.parse::<u8>().map_err(|_| out_of_range())?;
    if prefix > fam.bits() {
        return Err(out_of_range());
    }

    let addr: u128 = match fam {
        IpFam::V4 => parse_ipv4(addr)? as u128,
        IpFam::V6 => parse_ipv6(addr)?,
    };

    Ok(Cidr { fam, addr, prefix })
}

/* ---------------------------------- */

/// Parse a dotted-quad IPv4 address. Leading zeros are accepted.
pub fn parse_ipv4(s: &str) -> Result<u32, CidrError> {
    let err = |reason: &'static str| CidrError::InvalidAddress {
        addr: s.into(),
        reason,
    };

    let parts: Vec<&str> = s.split('.').collect();
    if parts.len() != 4 {
        return Err(err(ERR_V4_COUNT));
    }

    let mut out: u32 = 0;
    for part in parts {
        if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
            return Err(err(ERR_V4_OCTET));
        }
        let octet: u8 = part.parse::<u8>().map_err(|_| err(ERR_V4_OCTET))?;
        out = (out << 8) | octet as u32;
    }
    Ok(out)
}

/**
Parse an IPv6 address in any textual form: full, `::`-compressed, and
with a trailing embedded IPv4 literal. Hex digits are case-insensitive.
*/
pub fn parse_ipv6(s: &str) -> Result<u128, CidrError> {
    let err = |reason: &'static str| CidrError::InvalidAddress {
        addr: s.into(),
        reason,
    };

    // a:b:c:d:e:f:1.2.3.4 -> a:b:c:d:e:f:102:304
    let text: Cow<str> = match s.rfind(':') {
        Some(i) if s[i + 1..].contains('.') => {
            let v4: u32 = parse_ipv4(&s[i + 1..]).map_err(|_| err(ERR_V6_EMBEDDED))?;
            Cow::Owned(format!("{}{:x}:{:x}", &s[..=i], v4 >> 16, v4 & 0xffff))
        }
        _ => Cow::Borrowed(s),
    };

    let groups: Vec<u16> = match text.matches(DCOLON).count() {
        0 => {
            let groups: Vec<u16> = parse_groups(&text).map_err(err)?;
            if groups.len() != 8 {
                return Err(err(ERR_V6_COUNT));
            }
            groups
        }
        1 => {
            let (head, tail) = text.split_once(DCOLON).ok_or_else(|| err(ERR_V6_COUNT))?;
            let head: Vec<u16> = parse_groups(head).map_err(err)?;
            let tail: Vec<u16> = parse_groups(tail).map_err(err)?;
            let fixed: usize = head.len() + tail.len();
            if fixed >= 8 {
                return Err(err(ERR_V6_TOO_MANY));
            }
            let mut groups: Vec<u16> = head;
            groups.resize(8 - tail.len(), 0);
            groups.extend(tail);
            groups
        }
        _ => return Err(err(ERR_V6_MULTI_DCOLON)),
    };

    Ok(groups.iter().fold(0u128, |acc, &g| (acc << 16) | g as u128))
}

/// Parse colon-separated hex groups. An empty string yields no groups.
fn parse_groups(part: &str) -> Result<Vec<u16>, &'static str> {
    if part.is_empty() {
        return Ok(Vec::new());
    }
    part.split(':')
        .map(|g| {
            if g.is_empty() {
                return Err(ERR_V6_EMPTY_GROUP);
            }
            if g.len() > 4 || !g.bytes().all(|b| b.is_ascii_hexdigit()) {
                return Err(ERR_V6_HEXTET);
            }
            u16::from_str_radix(g, 16).map_err(|_| ERR_V6_HEXTET)
        })
        .collect()
}

/* -------------------------------------------------------------------------- */
