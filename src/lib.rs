// Copyright (c) 2026 Mikko Tanner. All rights reserved.
// Licensed under the MIT License or the Apache License, Version 2.0.
// SPDX-License-Identifier: MIT OR Apache-2.0

/*!
Compile IPv4/IPv6 CIDR prefixes into regular expressions which match the
canonical text of exactly the addresses inside the prefix.

Useful wherever only regexes are available for filtering (log pipelines,
search queries, rule compilers) and numeric range comparisons are not.

Canonical text is dotted decimal for IPv4 (`192.0.2.1`) and the fully
expanded eight groups of four hex digits for IPv6
(`2001:0db8:0000:0000:0000:0000:0000:0001`, either case). Compressed
IPv6 (`::`) never matches.

```ignore
use cidrex::{compile, Options};

let re = compile("2001:db8::/126", &Options::default())?;
assert!(re.is_match("2001:0DB8:0000:0000:0000:0000:0000:0003"));
```
*/

mod compile;
pub mod iptools;
pub mod pattern;

pub use compile::{compile, compile_all, compile_cidr, compile_net, pattern_set, CidrRegex, Options};
pub use iptools::{Cidr, CidrError, IpFam, Range};
pub use pattern::{hex_cache_len, PatternRow, PatternSet};
