// Copyright (c) 2026 Mikko Tanner. All rights reserved.
// Licensed under the MIT License or the Apache License, Version 2.0.
// SPDX-License-Identifier: MIT OR Apache-2.0

//! CIDR parsing and normalization into inclusive numeric ranges.

mod addresses;
pub(crate) mod strings;
mod structs;

use std::{error, fmt};
use strings::*;

pub use addresses::{parse_ipv4, parse_ipv6};
pub use structs::{Cidr, IpFam, Range};

pub(crate) const IPV4_BITS: u8 = 32;
pub(crate) const IPV6_BITS: u8 = 128;

/// Errors produced while turning CIDR text into a regex.
///
/// Everything except [CidrError::RegexBuild] originates in the parser;
/// once a [Cidr] exists, the pattern stages cannot fail.
#[rustfmt::skip]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum CidrError {
    /// wrong overall shape (missing `/`, empty parts, non-decimal prefix)
    MalformedInput(String),
    /// prefix length larger than the family's bit width
    PrefixOutOfRange { prefix: String, max: u8 },
    /// family-specific address syntax violation
    InvalidAddress { addr: String, reason: &'static str },
    /// the regex engine rejected the assembled source
    RegexBuild(String),
}

impl fmt::Display for CidrError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CidrError::MalformedInput(s) => {
                write!(f, "{ERR_MALFORMED}: '{s}'")
            }
            CidrError::PrefixOutOfRange { prefix, max } => {
                write!(f, "{ERR_PREFIX_RANGE}: '{prefix}' (max {max})")
            }
            CidrError::InvalidAddress { addr, reason } => {
                write!(f, "{ERR_INV_ADDR} '{addr}': {reason}")
            }
            CidrError::RegexBuild(e) => {
                write!(f, "{ERR_REGEX}: {e}")
            }
        }
    }
}

impl error::Error for CidrError {}

impl From<regex::Error> for CidrError {
    fn from(err: regex::Error) -> Self {
        CidrError::RegexBuild(err.to_string())
    }
}

/* -------------------------------------------------------------------------- */
