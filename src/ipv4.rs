// Copyright (c) 2026 Mikko Tanner. All rights reserved.
// Licensed under the MIT License or the Apache License, Version 2.0.
// SPDX-License-Identifier: MIT OR Apache-2.0

use super::{strings::*, Eui48, Ipv4Net, NetaddrError};
use std::{fmt, net::Ipv4Addr, str::FromStr};

/// Multicast MAC prefix for IPv4 groups (RFC 1112).
const V4_MCAST_MAC: u64 = 0x01005e000000;

/// An IPv4 address. Ordering is numeric.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Ipv4 {
    addr: u32,
}

impl Ipv4 {
    pub const fn new(addr: u32) -> Self {
        Self { addr }
    }

    pub fn addr(&self) -> u32 {
        self.addr
    }

    pub fn octets(&self) -> [u8; 4] {
        self.addr.to_be_bytes()
    }

    /// The following address, or `None` at 255.255.255.255.
    pub fn next(&self) -> Option<Self> {
        self.addr.checked_add(1).map(Self::new)
    }

    /// The preceding address, or `None` at 0.0.0.0.
    pub fn prev(&self) -> Option<Self> {
        self.addr.checked_sub(1).map(Self::new)
    }

    /// True for addresses in 224.0.0.0/4.
    pub fn is_multicast(&self) -> bool {
        self.addr >> 28 == 0xe
    }

    /**
    Ethernet multicast MAC for this group address: `01-00-5e` followed by the
    low 23 bits of the address. Returns `None` for non-multicast addresses.
    */
    pub fn multicast_mac(&self) -> Option<Eui48> {
        if !self.is_multicast() {
            return None;
        }
        Some(Eui48::new(V4_MCAST_MAC | (self.addr & 0x7fffff) as u64))
    }

    /// The host network (`/32`) of this address.
    pub fn to_net(&self) -> Ipv4Net {
        Ipv4Net::new(*self, None)
    }
}

impl fmt::Display for Ipv4 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d] = self.octets();
        write!(f, "{a}.{b}.{c}.{d}")
    }
}

/// Dotted-quad notation. Whitespace around the address and each octet is ignored.
impl FromStr for Ipv4 {
    type Err = NetaddrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.trim().split(DOT).collect();
        if parts.len() != 4 {
            return Err(NetaddrError::InvalidIpv4(s.into()));
        }

        let mut addr: u32 = 0;
        for part in parts {
            let octet: u8 = part
                .parse()
                .map_err(|source| NetaddrError::InvalidOctet {
                    input: s.into(),
                    source,
                })?;
            addr = addr << 8 | octet as u32;
        }
        Ok(Self::new(addr))
    }
}

impl From<u32> for Ipv4 {
    fn from(addr: u32) -> Self {
        Self::new(addr)
    }
}

impl From<Ipv4> for u32 {
    fn from(ip: Ipv4) -> Self {
        ip.addr
    }
}

impl From<Ipv4Addr> for Ipv4 {
    fn from(ip: Ipv4Addr) -> Self {
        Self::new(u32::from(ip))
    }
}

impl From<Ipv4> for Ipv4Addr {
    fn from(ip: Ipv4) -> Self {
        Ipv4Addr::from(ip.addr)
    }
}

/* -------------------------------------------------------------------------- */
