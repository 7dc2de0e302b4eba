// Copyright (c) 2026 Mikko Tanner. All rights reserved.
// Licensed under the MIT License or the Apache License, Version 2.0.
// SPDX-License-Identifier: MIT OR Apache-2.0

use super::{strings::*, Eui48, Ipv4, Ipv6Net, NetaddrError};
use lazy_static::lazy_static;
use regex::Regex;
use std::{fmt, net::Ipv6Addr, str::FromStr};

/// Multicast MAC prefix for IPv6 groups (RFC 2464).
const V6_MCAST_MAC: u64 = 0x333300000000;

lazy_static! {
    static ref HEXTET: Regex = Regex::new(r"^[0-9a-fA-F]{1,4}$").expect("Invalid Regex?");
}

/**
An IPv6 address, stored as the network id (upper 64 bits) and the
host id (lower 64 bits). Ordering is numeric.
*/
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Ipv6 {
    net_id: u64,
    host_id: u64,
}

impl Ipv6 {
    pub const fn new(net_id: u64, host_id: u64) -> Self {
        Self { net_id, host_id }
    }

    pub fn net_id(&self) -> u64 {
        self.net_id
    }

    pub fn host_id(&self) -> u64 {
        self.host_id
    }

    pub fn as_u128(&self) -> u128 {
        (self.net_id as u128) << 64 | self.host_id as u128
    }

    /// The eight 16-bit groups of the address.
    pub fn segments(&self) -> [u16; 8] {
        let mut segs: [u16; 8] = [0; 8];
        for (i, seg) in segs.iter_mut().enumerate() {
            *seg = (self.as_u128() >> (112 - 16 * i)) as u16;
        }
        segs
    }

    pub fn is_zero(&self) -> bool {
        self.net_id == 0 && self.host_id == 0
    }

    /// True for addresses in ff00::/8.
    pub fn is_multicast(&self) -> bool {
        self.net_id >> 56 == 0xff
    }

    /// The following address, or `None` at the top of the address space.
    pub fn next(&self) -> Option<Self> {
        self.as_u128().checked_add(1).map(Self::from)
    }

    /// The preceding address, or `None` at `::`.
    pub fn prev(&self) -> Option<Self> {
        self.as_u128().checked_sub(1).map(Self::from)
    }

    /// Uncompressed form, f.ex. "0001:0000:0000:0000:0000:0000:0000:0000".
    pub fn long(&self) -> String {
        self.segments()
            .iter()
            .map(|seg| format!("{seg:04x}"))
            .collect::<Vec<String>>()
            .join(COLON)
    }

    /**
    Extract an IPv4 address embedded per RFC 6052, where `prefix_len` is the
    length of the translation prefix.

    Prefix lengths 32, 40, 48, 56 and 64 use their RFC bit positions (skipping
    bits 64..71). Any other value, including 96, takes the low 32 bits.
    */
    pub fn ipv4(&self, prefix_len: u8) -> Ipv4 {
        let (n, h) = (self.net_id, self.host_id);
        let addr: u64 = match prefix_len {
            32 => n & 0xffffffff,
            40 => (n & 0xffffff) << 8 | (h >> 48) & 0xff,
            48 => (n & 0xffff) << 16 | (h >> 40) & 0xffff,
            56 => (n & 0xff) << 24 | (h >> 32) & 0xffffff,
            64 => (h >> 24) & 0xffffffff,
            _ => h & 0xffffffff,
        };
        Ipv4::new(addr as u32)
    }

    /**
    Ethernet multicast MAC for this group address: `33-33` followed by the
    low 32 bits of the address. Returns `None` for non-multicast addresses.
    */
    pub fn multicast_mac(&self) -> Option<Eui48> {
        if !self.is_multicast() {
            return None;
        }
        Some(Eui48::new(V6_MCAST_MAC | (self.host_id & 0xffffffff)))
    }

    /// The default network of this address (`/128` or `/64`, see [Ipv6Net::new]).
    pub fn to_net(&self) -> Ipv6Net {
        Ipv6Net::new(*self, None)
    }
}

/// Zero-compressed form per RFC 5952. Use [Ipv6::long] for the uncompressed form.
impl fmt::Display for Ipv6 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let segs: [u16; 8] = self.segments();

        // longest run of zero groups, leftmost wins a tie
        let (mut best_beg, mut best_len) = (0usize, 0usize);
        let mut i: usize = 0;
        while i < segs.len() {
            if segs[i] != 0 {
                i += 1;
                continue;
            }
            let beg: usize = i;
            while i < segs.len() && segs[i] == 0 {
                i += 1;
            }
            if i - beg > best_len {
                (best_beg, best_len) = (beg, i - beg);
            }
        }

        let join = |groups: &[u16]| -> String {
            groups
                .iter()
                .map(|seg| format!("{seg:x}"))
                .collect::<Vec<String>>()
                .join(COLON)
        };

        // a single zero group is never compressed
        if best_len < 2 {
            return write!(f, "{}", join(&segs));
        }
        let head: String = join(&segs[..best_beg]);
        let tail: String = join(&segs[best_beg + best_len..]);
        write!(f, "{head}{DBL_COLON}{tail}")
    }
}

/**
Parse an IPv6 address in full or `::` compressed form. Every group must be
1-4 hex digits. A `::` may appear at most once and stands for at least one
zero group.
*/
impl FromStr for Ipv6 {
    type Err = NetaddrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let input: &str = s.trim();
        if input == DBL_COLON {
            return Ok(Self::default());
        }
        let invalid = |reason: &'static str| NetaddrError::InvalidIpv6 {
            input: s.into(),
            reason,
        };

        let groups: Vec<&str> = if input.contains(DBL_COLON) {
            let halves: Vec<&str> = input.split(DBL_COLON).collect();
            if halves.len() != 2 {
                return Err(invalid(ERR_V6_DBL_COLON));
            }
            let head: Vec<&str> = split_half(halves[0]);
            let tail: Vec<&str> = split_half(halves[1]);
            if head.len() + tail.len() > 7 {
                return Err(invalid(ERR_V6_TOO_LONG));
            }
            let fill: usize = 8 - head.len() - tail.len();
            head.into_iter()
                .chain(std::iter::repeat("0").take(fill))
                .chain(tail)
                .collect()
        } else {
            let groups: Vec<&str> = input.split(COLON).collect();
            match groups.len() {
                8 => groups,
                n if n > 8 => return Err(invalid(ERR_V6_TOO_LONG)),
                _ => return Err(invalid(ERR_V6_TOO_SHORT)),
            }
        };

        let mut addr: u128 = 0;
        for group in groups {
            if !HEXTET.is_match(group) {
                return Err(NetaddrError::InvalidHextet(s.into()));
            }
            let seg: u16 = u16::from_str_radix(group, 16)
                .map_err(|_| NetaddrError::InvalidHextet(s.into()))?;
            addr = addr << 16 | seg as u128;
        }
        Ok(Self::from(addr))
    }
}

/// Groups on one side of a "::" split.
fn split_half(half: &str) -> Vec<&str> {
    if half.is_empty() {
        return Vec::new();
    }
    half.split(COLON).collect()
}

impl From<u128> for Ipv6 {
    fn from(addr: u128) -> Self {
        Self::new((addr >> 64) as u64, addr as u64)
    }
}

impl From<Ipv6> for u128 {
    fn from(ip: Ipv6) -> Self {
        ip.as_u128()
    }
}

impl From<Ipv6Addr> for Ipv6 {
    fn from(ip: Ipv6Addr) -> Self {
        Self::from(u128::from(ip))
    }
}

impl From<Ipv6> for Ipv6Addr {
    fn from(ip: Ipv6) -> Self {
        Ipv6Addr::from(ip.as_u128())
    }
}

/* -------------------------------------------------------------------------- */
