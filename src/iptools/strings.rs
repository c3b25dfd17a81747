// Copyright (c) 2026 Mikko Tanner. All rights reserved.
// Licensed under the MIT License or the Apache License, Version 2.0.
// SPDX-License-Identifier: MIT OR Apache-2.0

pub(crate) static SLASH: &str = "/";
pub(crate) static DCOLON: &str = "::";

// mod.rs
pub(crate) static ERR_MALFORMED: &str = "malformed CIDR (expected '<address>/<prefix>')";
pub(crate) static ERR_PREFIX_RANGE: &str = "prefix length out of range";
pub(crate) static ERR_INV_ADDR: &str = "invalid IP address";
pub(crate) static ERR_REGEX: &str = "failed to build regex";

// addresses.rs
pub(crate) static ERR_V4_COUNT: &str = "IPv4 address needs exactly 4 octets";
pub(crate) static ERR_V4_OCTET: &str = "IPv4 octet must be a decimal number <= 255";
pub(crate) static ERR_V6_MULTI_DCOLON: &str = "more than one '::' in IPv6 address";
pub(crate) static ERR_V6_EMPTY_GROUP: &str = "empty group in IPv6 address";
pub(crate) static ERR_V6_TOO_MANY: &str = "too many groups in compressed IPv6 address";
pub(crate) static ERR_V6_COUNT: &str = "IPv6 address needs exactly 8 groups";
pub(crate) static ERR_V6_HEXTET: &str = "IPv6 group must be 1-4 hex digits";
pub(crate) static ERR_V6_EMBEDDED: &str = "invalid embedded IPv4 in IPv6 address";
