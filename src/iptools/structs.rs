// Copyright (c) 2026 Mikko Tanner. All rights reserved.
// Licensed under the MIT License or the Apache License, Version 2.0.
// SPDX-License-Identifier: MIT OR Apache-2.0

use super::{addresses::parse_cidr, strings::*, CidrError, IPV4_BITS, IPV6_BITS};
use ipnet::IpNet;
use std::{
    fmt,
    net::{IpAddr, Ipv4Addr, Ipv6Addr},
    str::FromStr,
};

/// IP address family
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum IpFam {
    V4,
    V6,
}

impl IpFam {
    /// Address width in bits: 32 or 128.
    #[inline]
    pub const fn bits(self) -> u8 {
        match self {
            IpFam::V4 => IPV4_BITS,
            IpFam::V6 => IPV6_BITS,
        }
    }

    /// Number of segments: 4 octets or 8 hextets.
    #[inline]
    pub const fn segment_count(self) -> usize {
        match self {
            IpFam::V4 => 4,
            IpFam::V6 => 8,
        }
    }

    #[inline]
    pub const fn segment_bits(self) -> u32 {
        match self {
            IpFam::V4 => 8,
            IpFam::V6 => 16,
        }
    }

    /// Largest value a single segment can hold.
    #[inline]
    pub const fn segment_max(self) -> u16 {
        match self {
            IpFam::V4 => u8::MAX as u16,
            IpFam::V6 => u16::MAX,
        }
    }

}

/* -------------------------------------------------------------------------- */

/**
A parsed `<address>/<prefix>` pair.

`addr` is the address exactly as written (host bits are *not* cleared);
use [Cidr::range] to get the normalized network interval.
*/
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Cidr {
    pub fam: IpFam,
    /// fits in `fam.bits()` bits
    pub addr: u128,
    /// **v4**: `0..=32`, **v6**: `0..=128`
    pub prefix: u8,
}

impl Cidr {
    /// Create a [Cidr] from a std address, validating the prefix length.
    pub fn new(addr: IpAddr, prefix: u8) -> Result<Self, CidrError> {
        let (fam, addr) = match addr {
            IpAddr::V4(a) => (IpFam::V4, u32::from(a) as u128),
            IpAddr::V6(a) => (IpFam::V6, u128::from(a)),
        };
        if prefix > fam.bits() {
            return Err(CidrError::PrefixOutOfRange {
                prefix: prefix.to_string(),
                max: fam.bits(),
            });
        }
        Ok(Self { fam, addr, prefix })
    }

    /// The address as a std [IpAddr].
    pub fn ip(&self) -> IpAddr {
        int_to_ip(self.fam, self.addr)
    }

    /// Normalize into the inclusive network interval: host bits cleared at
    /// the low end and set at the high end.
    pub fn range(&self) -> Range {
        let bits: u8 = self.fam.bits();
        let host: u128 = host_mask(bits, self.prefix);
        let beg: u128 = self.addr & !host & width_mask(bits);
        Range {
            fam: self.fam,
            beg,
            end: beg | host,
        }
    }

    /// Same prefix with host bits cleared.
    pub fn network(&self) -> Cidr {
        Cidr {
            addr: self.range().beg,
            ..*self
        }
    }

    /// Returns true if the CIDR represents a single host address.
    pub fn is_host(&self) -> bool {
        self.prefix == self.fam.bits()
    }
}

impl fmt::Display for Cidr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{SLASH}{}", self.ip(), self.prefix)
    }
}

impl FromStr for Cidr {
    type Err = CidrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_cidr(s)
    }
}

impl From<IpNet> for Cidr {
    fn from(net: IpNet) -> Self {
        // IpNet guarantees the prefix fits its family
        match net {
            IpNet::V4(n) => Cidr {
                fam: IpFam::V4,
                addr: u32::from(n.addr()) as u128,
                prefix: n.prefix_len(),
            },
            IpNet::V6(n) => Cidr {
                fam: IpFam::V6,
                addr: u128::from(n.addr()),
                prefix: n.prefix_len(),
            },
        }
    }
}

/* -------------------------------------------------------------------------- */

/// Inclusive range of IP addresses, always `beg <= end`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Range {
    pub(crate) fam: IpFam,
    pub(crate) beg: u128,
    /// inclusive
    pub(crate) end: u128,
}

impl Range {
    /**
    Build a range from raw bounds. Returns `None` when `beg > end` or when
    `end` does not fit the family's bit width.

    Ranges made from a parsed prefix come from [Cidr::range] instead.
    */
    pub fn new(fam: IpFam, beg: u128, end: u128) -> Option<Self> {
        if beg > end || end > width_mask(fam.bits()) {
            return None;
        }
        Some(Self { fam, beg, end })
    }

    #[inline]
    pub fn fam(&self) -> IpFam {
        self.fam
    }

    #[inline]
    pub fn beg(&self) -> u128 {
        self.beg
    }

    #[inline]
    pub fn end(&self) -> u128 {
        self.end
    }

    /// Whether `v` lies inside the range.
    #[inline]
    pub fn contains(&self, v: u128) -> bool {
        self.beg <= v && v <= self.end
    }

    /// Per-segment decomposition of the low end.
    pub fn start_segments(&self) -> Vec<u16> {
        to_segments(self.fam, self.beg)
    }

    /// Per-segment decomposition of the high end.
    pub fn end_segments(&self) -> Vec<u16> {
        to_segments(self.fam, self.end)
    }

    /// The length of the range. Cannot be an [usize] due to IPv6. Saturating.
    pub fn len(&self) -> u128 {
        let diff: u128 = self.end - self.beg;
        if diff == u128::MAX {
            return u128::MAX;
        }
        diff + 1
    }
}

/* ---------------------------------- */

/// Split an address value into its segments, most significant first.
pub(crate) fn to_segments(fam: IpFam, v: u128) -> Vec<u16> {
    let width: u32 = fam.segment_bits();
    let mask: u128 = fam.segment_max() as u128;
    (0..fam.segment_count())
        .rev()
        .map(|i| ((v >> (i as u32 * width)) & mask) as u16)
        .collect()
}

/// Low `bits - prefix` bits set (the host part).
#[inline]
fn host_mask(bits: u8, prefix: u8) -> u128 {
    let host_bits: u8 = bits.saturating_sub(prefix);
    if host_bits >= IPV6_BITS {
        return u128::MAX;
    }
    (1u128 << host_bits) - 1
}

/// All ones in the low `bits` bits.
#[inline]
fn width_mask(bits: u8) -> u128 {
    host_mask(bits, 0)
}

#[inline]
pub(crate) fn int_to_ip(fam: IpFam, v: u128) -> IpAddr {
    match fam {
        IpFam::V4 => IpAddr::V4(Ipv4Addr::from(v as u32)),
        IpFam::V6 => IpAddr::V6(Ipv6Addr::from(v)),
    }
}

/* -------------------------------------------------------------------------- */
