// Copyright (c) 2026 Mikko Tanner. All rights reserved.
// Licensed under the MIT License or the Apache License, Version 2.0.
// SPDX-License-Identifier: MIT OR Apache-2.0

pub(crate) static SLASH: &str = "/";
pub(crate) static SPACE: &str = " ";
pub(crate) static DOT: &str = ".";
pub(crate) static COLON: &str = ":";
pub(crate) static DBL_COLON: &str = "::";

// ipv4.rs / ipv6.rs
pub(crate) static ERR_V4_OCTETS: &str = "IPv4 address must have exactly 4 octets";
pub(crate) static ERR_V4_OCTET: &str = "invalid IPv4 octet";
pub(crate) static ERR_V6_DBL_COLON: &str = "IPv6 address contains more than one '::'";
pub(crate) static ERR_V6_TOO_LONG: &str = "IPv6 address is too long";
pub(crate) static ERR_V6_TOO_SHORT: &str = "IPv6 address is too short";
pub(crate) static ERR_V6_HEXTET: &str = "invalid IPv6 hextet";

// mask.rs
pub(crate) static ERR_PREFIX: &str = "invalid prefix length";
pub(crate) static ERR_PREFIX_RANGE: &str = "prefix length out of range";
pub(crate) static ERR_NETMASK: &str = "netmask contains '1' bits in its host portion";

// ipv4net.rs / ipv6net.rs
pub(crate) static ERR_NET_FMT: &str = "invalid network format (too many slashes)";
pub(crate) static ERR_PAGE: &str = "page is out of range";
pub(crate) static ERR_PAGE_SIZE: &str = "page size too large";

// eui.rs
pub(crate) static ERR_EUI: &str = "invalid EUI, expected hex digits with optional '-', ':' or '.' delimiters";

// netlist.rs
pub(crate) static ERR_LIST_ITEM: &str = "error parsing list item at index";
