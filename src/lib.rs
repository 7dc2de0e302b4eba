// Copyright (c) 2026 Mikko Tanner. All rights reserved.
// Licensed under the MIT License or the Apache License, Version 2.0.
// SPDX-License-Identifier: MIT OR Apache-2.0

//! IPv4/IPv6 address, network and EUI calculations, including relationship
//! testing, summarization and gap filling of network lists.

mod eui;
mod ipv4;
mod ipv4net;
mod ipv6;
mod ipv6net;
mod mask;
mod netlist;
mod strings;

use std::{error, fmt, num::ParseIntError};
use strings::*;

pub use eui::{Eui48, Eui64};
pub use ipv4::Ipv4;
pub use ipv4net::Ipv4Net;
pub use ipv6::Ipv6;
pub use ipv6net::Ipv6Net;
pub use mask::{Mask128, Mask32};
pub use netlist::{Ipv4NetList, Ipv6NetList, NetList, Network};

pub const IPV4_BITS: u8 = 32;
pub const IPV6_BITS: u8 = 128;
/// 32 bits worth of '1'
pub const F32: u32 = u32::MAX;
/// 64 bits worth of '1'
pub const F64: u64 = u64::MAX;
/// page size used by the paging methods when `per_page` is 0
pub const DEFAULT_PAGE_SIZE: u32 = 32;
pub const MAX_PAGE_SIZE: u32 = 65536; // max number of items a single page may hold

#[rustfmt::skip]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum NetaddrError {
    /// wrong number of octets in an IPv4 address
    InvalidIpv4(String),
    InvalidOctet   { input: String, source: ParseIntError },
    InvalidIpv6    { input: String, reason: &'static str },
    InvalidHextet(String),
    InvalidPrefix  { input: String, source: ParseIntError },
    /// prefix length larger than the address width
    InvalidPrefixLength { prefix: u8, max: u8 },
    /// extended (dotted) netmask with non-contiguous bits
    InvalidNetmask(String),
    InvalidNetFmt(String),
    InvalidEui(String),
    PageOutOfRange { page: u64, per_page: u32 },
    PageTooLarge(u32),
    ListItem       { index: usize, source: Box<NetaddrError> },
}

impl fmt::Display for NetaddrError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NetaddrError::InvalidIpv4(ip) => {
                write!(f, "{ERR_V4_OCTETS}: '{ip}'")
            }
            NetaddrError::InvalidOctet { input, source } => {
                write!(f, "{ERR_V4_OCTET} in '{input}': {source}")
            }
            NetaddrError::InvalidIpv6 { input, reason } => {
                write!(f, "{reason}: '{input}'")
            }
            NetaddrError::InvalidHextet(ip) => {
                write!(f, "{ERR_V6_HEXTET} in '{ip}'")
            }
            NetaddrError::InvalidPrefix { input, source } => {
                write!(f, "{ERR_PREFIX}: '{input}': {source}")
            }
            NetaddrError::InvalidPrefixLength { prefix, max } => {
                write!(f, "{ERR_PREFIX_RANGE}: {prefix} (max {max})")
            }
            NetaddrError::InvalidNetmask(mask) => {
                write!(f, "{ERR_NETMASK}: '{mask}'")
            }
            NetaddrError::InvalidNetFmt(net) => {
                write!(f, "{ERR_NET_FMT}: '{net}'")
            }
            NetaddrError::InvalidEui(eui) => {
                write!(f, "{ERR_EUI}: '{eui}'")
            }
            NetaddrError::PageOutOfRange { page, per_page } => {
                write!(f, "{ERR_PAGE}: page {page} with {per_page} per page")
            }
            NetaddrError::PageTooLarge(size) => {
                write!(f, "{ERR_PAGE_SIZE}: {size} (max {MAX_PAGE_SIZE})")
            }
            NetaddrError::ListItem { index, source } => {
                write!(f, "{ERR_LIST_ITEM} {index}: {source}")
            }
        }
    }
}

impl error::Error for NetaddrError {}

/* ######################################################################### */

/**
Returns the prefix length needed to hold `size` IPv4 addresses, i.e. the
longest prefix whose network is at least `size` addresses large.

Returns `None` if `size` exceeds the whole IPv4 address space.
*/
pub fn ipv4_prefix_len(size: u64) -> Option<u8> {
    (0..=IPV4_BITS)
        .rev()
        .find(|&prefix| size <= 1u64 << (IPV4_BITS - prefix))
}

/**
Bounds `[start, end)` of page `page` within `total` items.

A `per_page` of 0 means [DEFAULT_PAGE_SIZE]. Larger pages than
[MAX_PAGE_SIZE] are refused, as are pages starting past the end.
*/
pub(crate) fn page_bounds(total: u128, page: u64, per_page: u32) -> Result<(u128, u128), NetaddrError> {
    let size: u32 = match per_page {
        0 => DEFAULT_PAGE_SIZE,
        n if n > MAX_PAGE_SIZE => return Err(NetaddrError::PageTooLarge(n)),
        n => n,
    };
    let start: u128 = page as u128 * size as u128;
    if start >= total {
        return Err(NetaddrError::PageOutOfRange { page, per_page });
    }
    Ok((start, (start + size as u128).min(total)))
}

/// Serialize/deserialize a type through its [fmt::Display] and [std::str::FromStr] forms.
macro_rules! impl_serde_str {
    ($($t:ty),+ $(,)?) => {$(
        impl serde::Serialize for $t {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: serde::Serializer,
            {
                serializer.collect_str(self)
            }
        }

        impl<'de> serde::Deserialize<'de> for $t {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let s = String::deserialize(deserializer)?;
                s.parse::<$t>().map_err(serde::de::Error::custom)
            }
        }
    )+};
}

impl_serde_str!(Ipv4, Ipv6, Mask32, Mask128, Ipv4Net, Ipv6Net, Eui48, Eui64);

/* ######################################################################### */
