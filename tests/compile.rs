// Copyright (c) 2026 Mikko Tanner. All rights reserved.
// Licensed under the MIT License or the Apache License, Version 2.0.
// SPDX-License-Identifier: MIT OR Apache-2.0

use cidrex::{compile, compile_all, pattern_set, CidrRegex, IpFam, Options, PatternSet, Range};
use ipnet::{Ipv4Net, Ipv6Net};
use proptest::prelude::*;
use regex::{Regex, RegexBuilder};
use std::net::{Ipv4Addr, Ipv6Addr};

fn v4_text(v: u32) -> String {
    Ipv4Addr::from(v).to_string()
}

/// Fully expanded, lowercase IPv6 text.
fn v6_text(v: u128) -> String {
    Ipv6Addr::from(v)
        .segments()
        .iter()
        .map(|s| format!("{s:04x}"))
        .collect::<Vec<String>>()
        .join(":")
}

fn set_regex(set: &PatternSet) -> Regex {
    RegexBuilder::new(&format!("^{}$", set.alternation()))
        .case_insensitive(set.fam() == IpFam::V6)
        .build()
        .unwrap()
}

fn defaults() -> Options {
    Options::default()
}

#[test]
fn documented_examples() {
    let re: CidrRegex = compile("192.0.2.0/30", &defaults()).unwrap();
    for i in 0..4 {
        assert!(re.is_match(&format!("192.0.2.{i}")));
    }
    assert!(!re.is_match("192.0.2.4"));
    assert!(!re.is_match("192.0.2.255"));

    let re: CidrRegex = compile("2001:db8::/126", &defaults()).unwrap();
    let base: u128 = u128::from("2001:db8::".parse::<Ipv6Addr>().unwrap());
    for i in 0..4 {
        assert!(re.is_match(&v6_text(base + i)));
    }
    assert!(!re.is_match(&v6_text(base + 4)));

    let short: CidrRegex = compile("::ff/16", &defaults()).unwrap();
    let long: CidrRegex = compile("0000:0000:0000:0000:0000:0000:0000:00ff/16", &defaults()).unwrap();
    assert_eq!(short.as_str(), long.as_str());
}

#[test]
fn whole_address_space() {
    let re: CidrRegex = compile("0.0.0.0/0", &defaults()).unwrap();
    for ok in ["0.0.0.0", "255.255.255.255", "10.20.30.40", "1.0.99.200"] {
        assert!(re.is_match(ok), "{ok}");
    }
    for bad in ["256.0.0.0", "1.2.3", "1.2.3.4.5", "01.2.3.4", "a.b.c.d"] {
        assert!(!re.is_match(bad), "{bad}");
    }

    let re: CidrRegex = compile("::/0", &defaults()).unwrap();
    assert!(re.is_match(&v6_text(0)));
    assert!(re.is_match(&v6_text(u128::MAX)));
    assert!(re.is_match(&v6_text(u128::MAX).to_uppercase()));
    assert!(!re.is_match("::"));
    assert!(!re.is_match("0:0:0:0:0:0:0:0"));
}

#[test]
fn non_canonical_never_matches() {
    let re: CidrRegex = compile("2001:db8::/32", &defaults()).unwrap();
    assert!(re.is_match("2001:0db8:0000:0000:0000:0000:0000:0001"));
    assert!(!re.is_match("2001:db8::1"));
    assert!(!re.is_match("2001:db8:0:0:0:0:0:1"));

    let re: CidrRegex = compile("10.0.0.0/8", &defaults()).unwrap();
    assert!(!re.is_match("10.1"));
    assert!(!re.is_match("10.0.1"));
}

#[test]
fn host_bits_are_ignored() {
    let a: CidrRegex = compile("10.0.0.5/24", &defaults()).unwrap();
    let b: CidrRegex = compile("10.0.0.0/24", &defaults()).unwrap();
    assert_eq!(a.as_str(), b.as_str());
}

#[test]
fn compile_all_one_per_row() {
    for cidr in ["10.0.0.0/15", "172.16.0.0/12", "2001:db8:8000::/33", "::/0"] {
        let all: Vec<CidrRegex> = compile_all(cidr, &defaults()).unwrap();
        let set: PatternSet = pattern_set(cidr, &defaults()).unwrap();
        assert_eq!(all.len(), set.len(), "{cidr}");
        // aligned prefixes always collapse into a single row
        assert_eq!(set.len(), 1, "{cidr}");
        assert!(all.iter().all(|re| re.as_str().starts_with('^')));
    }
}

#[test]
fn options_from_json() {
    let opts: Options = serde_json::from_str(r#"{"anchored": false}"#).unwrap();
    assert!(!opts.anchored);
    assert!(!opts.ignore_case);

    let opts: Options = serde_json::from_str("{}").unwrap();
    assert_eq!(opts, Options::default());
    assert!(opts.anchored);

    let json: String = serde_json::to_string(&Options { global: true, ..defaults() }).unwrap();
    let back: Options = serde_json::from_str(&json).unwrap();
    assert!(back.global);
}

#[test]
fn inverted_range_is_rejected() {
    assert!(Range::new(IpFam::V6, u128::MAX, 0).is_none());
    assert!(Range::new(IpFam::V4, 0, u128::from(u32::MAX) + 1).is_none());

    let range: Range = Range::new(IpFam::V6, u128::MAX - 1, u128::MAX).unwrap();
    let set: PatternSet = PatternSet::build(&range, &defaults()).collapse();
    let re: Regex = set_regex(&set);
    assert!(re.is_match(&v6_text(u128::MAX)));
    assert!(re.is_match(&v6_text(u128::MAX - 1)));
    assert!(!re.is_match(&v6_text(u128::MAX - 2)));
}

#[test]
fn cache_is_shared() {
    compile("2001:db8::/48", &defaults()).unwrap();
    assert!(cidrex::hex_cache_len() > 0);
}

/* -------------------------------------------------------------------------- */

fn v4_samples(net: &Ipv4Net, extra: &[u32]) -> Vec<u32> {
    let beg: u32 = u32::from(net.network());
    let end: u32 = u32::from(net.broadcast());
    let mut out: Vec<u32> = vec![beg, end];
    out.extend(beg.checked_sub(1));
    out.extend(end.checked_add(1));
    out.extend_from_slice(extra);
    out
}

fn v6_samples(net: &Ipv6Net, extra: &[u128]) -> Vec<u128> {
    let beg: u128 = u128::from(net.network());
    let end: u128 = u128::from(net.broadcast());
    let mut out: Vec<u128> = vec![beg, end];
    out.extend(beg.checked_sub(1));
    out.extend(end.checked_add(1));
    out.extend_from_slice(extra);
    out
}

proptest! {
    #[test]
    fn v4_membership_matches_ipnet(
        addr in any::<u32>(),
        prefix in 0u8..=32,
        extra in prop::collection::vec(any::<u32>(), 8),
    ) {
        let net = Ipv4Net::new(Ipv4Addr::from(addr), prefix).unwrap();
        let re = compile(&format!("{}/{prefix}", v4_text(addr)), &defaults()).unwrap();
        for v in v4_samples(&net, &extra) {
            let ip = Ipv4Addr::from(v);
            prop_assert_eq!(re.is_match(&v4_text(v)), net.contains(&ip), "{} in {}", ip, net);
        }
    }

    #[test]
    fn v4_padded_membership(
        addr in any::<u32>(),
        prefix in 0u8..=32,
        extra in prop::collection::vec(any::<u32>(), 4),
    ) {
        let net = Ipv4Net::new(Ipv4Addr::from(addr), prefix).unwrap();
        let opts = Options { leading_zeros: true, ..defaults() };
        let re = compile(&format!("{}/{prefix}", v4_text(addr)), &opts).unwrap();
        for v in v4_samples(&net, &extra) {
            let padded: String = Ipv4Addr::from(v).octets().iter().map(|o| format!("{o:03}")).collect::<Vec<_>>().join(".");
            let inside: bool = net.contains(&Ipv4Addr::from(v));
            prop_assert_eq!(re.is_match(&padded), inside);
            prop_assert_eq!(re.is_match(&v4_text(v)), inside);
        }
    }

    #[test]
    fn v6_membership_matches_ipnet(
        addr in any::<u128>(),
        prefix in 0u8..=128,
        extra in prop::collection::vec(any::<u128>(), 8),
    ) {
        let net = Ipv6Net::new(Ipv6Addr::from(addr), prefix).unwrap();
        let re = compile(&format!("{}/{prefix}", Ipv6Addr::from(addr)), &defaults()).unwrap();
        for v in v6_samples(&net, &extra) {
            let inside: bool = net.contains(&Ipv6Addr::from(v));
            let text: String = v6_text(v);
            prop_assert_eq!(re.is_match(&text), inside, "{} in {}", text, net);
            prop_assert_eq!(re.is_match(&text.to_uppercase()), inside);
        }
    }

    #[test]
    fn host_prefix_matches_exactly_one(addr in any::<u128>()) {
        let re = compile(&format!("{}/128", Ipv6Addr::from(addr)), &defaults()).unwrap();
        prop_assert!(re.is_match(&v6_text(addr)));
        if let Some(prev) = addr.checked_sub(1) {
            prop_assert!(!re.is_match(&v6_text(prev)));
        }
        if let Some(next) = addr.checked_add(1) {
            prop_assert!(!re.is_match(&v6_text(next)));
        }
    }

    #[test]
    fn normalization_is_idempotent(addr in any::<u32>(), prefix in 0u8..=32) {
        let net = Ipv4Net::new(Ipv4Addr::from(addr), prefix).unwrap();
        let a = compile(&format!("{}/{prefix}", v4_text(addr)), &defaults()).unwrap();
        let b = compile(&net.trunc().to_string(), &defaults()).unwrap();
        prop_assert_eq!(a.as_str(), b.as_str());
    }

    /// Arbitrary (unaligned) intervals exercise every split of the builder.
    #[test]
    fn v4_arbitrary_range_is_exact(
        a in any::<u32>(),
        b in any::<u32>(),
        extra in prop::collection::vec(any::<u32>(), 8),
    ) {
        let range = Range::new(IpFam::V4, a.min(b) as u128, a.max(b) as u128).unwrap();
        let candidates = PatternSet::build(&range, &defaults());
        let collapsed = candidates.clone().collapse();
        prop_assert!(collapsed.len() <= candidates.len());

        let (before, after) = (set_regex(&candidates), set_regex(&collapsed));
        let mut samples: Vec<u32> = vec![a, b, a.min(b).saturating_sub(1), a.max(b).saturating_add(1)];
        samples.extend(extra);
        for v in samples {
            let text: String = v4_text(v);
            let inside: bool = range.contains(v as u128);
            prop_assert_eq!(before.is_match(&text), inside, "{} candidates", text);
            prop_assert_eq!(after.is_match(&text), inside, "{} collapsed", text);
        }
    }

    #[test]
    fn v6_arbitrary_range_is_exact(
        a in any::<u128>(),
        b in any::<u128>(),
        extra in prop::collection::vec(any::<u128>(), 8),
    ) {
        let range = Range::new(IpFam::V6, a.min(b), a.max(b)).unwrap();
        let candidates = PatternSet::build(&range, &defaults());
        let collapsed = candidates.clone().collapse();
        prop_assert!(collapsed.len() <= candidates.len());

        let (before, after) = (set_regex(&candidates), set_regex(&collapsed));
        let mut samples: Vec<u128> = vec![a, b, a.min(b).saturating_sub(1), a.max(b).saturating_add(1)];
        samples.extend(extra);
        for v in samples {
            let text: String = v6_text(v);
            let inside: bool = range.contains(v);
            prop_assert_eq!(before.is_match(&text), inside, "{} candidates", text);
            prop_assert_eq!(after.is_match(&text), inside, "{} collapsed", text);
        }
    }
}
