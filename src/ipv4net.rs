// Copyright (c) 2026 Mikko Tanner. All rights reserved.
// Licensed under the MIT License or the Apache License, Version 2.0.
// SPDX-License-Identifier: MIT OR Apache-2.0

use super::{
    netlist::{self, Network},
    strings::*,
    page_bounds, Ipv4, Ipv4NetList, Mask32, NetaddrError, F32, IPV4_BITS,
};
use std::{cmp::Ordering, fmt, str::FromStr};

/**
An IPv4 network: a base address and a [Mask32].

The base is always the network address (host bits cleared). Ordering is by
base address, then by mask capacity.
*/
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Ipv4Net {
    base: Ipv4,
    mask: Mask32,
}

impl Ipv4Net {
    /// Create a new network from `ip` and `mask`. A missing mask means `/32`.
    pub fn new(ip: Ipv4, mask: Option<Mask32>) -> Self {
        let mask: Mask32 = mask.unwrap_or_else(|| Mask32::init(IPV4_BITS));
        Self {
            base: Ipv4::new(ip.addr() & mask.mask()),
            mask,
        }
    }

    pub fn network(&self) -> Ipv4 {
        self.base
    }

    pub fn netmask(&self) -> Mask32 {
        self.mask
    }

    pub fn prefix_len(&self) -> u8 {
        self.mask.prefix_len()
    }

    pub fn version(&self) -> u8 {
        4
    }

    /// Number of addresses in the network. Always 0 for `/0`.
    pub fn len(&self) -> u32 {
        self.mask.len()
    }

    pub fn contains(&self, ip: &Ipv4) -> bool {
        self.base.addr() == ip.addr() & self.mask.mask()
    }

    /// Network in extended format, f.ex. "10.0.0.0 255.0.0.0".
    pub fn extended(&self) -> String {
        format!("{}{SPACE}{}", self.base, self.mask.extended())
    }

    /**
    Relationship to `other`:
    - `Some(Greater)`: this network is a supernet of `other`
    - `Some(Equal)`: the networks are identical
    - `Some(Less)`: this network is a subnet of `other`
    - `None`: the networks are unrelated
    */
    pub fn rel(&self, other: &Self) -> Option<Ordering> {
        // identical bases differ only by size
        if self.base == other.base {
            return Some(self.mask.cmp(&other.mask));
        }

        let (addr, other_addr) = (self.base.addr(), other.base.addr());
        let hostmask: u32 = self.mask.hostmask();
        let other_hostmask: u32 = other.mask.hostmask();
        if addr | hostmask == other_addr | hostmask {
            Some(Ordering::Greater)
        } else if addr | other_hostmask == other_addr | other_hostmask {
            Some(Ordering::Less)
        } else {
            None
        }
    }

    /**
    Summarize with `other` into the immediate parent network. Only possible
    when both are the same size and the two halves of the same parent.
    */
    pub fn summ(&self, other: &Self) -> Option<Self> {
        let prefix: u8 = self.prefix_len();
        if prefix != other.prefix_len() || prefix == 0 {
            return None;
        }
        // buddies are identical once shifted past the host bits plus one
        let shift: u32 = (IPV4_BITS - prefix + 1) as u32;
        if (self.base.addr() as u64) >> shift != (other.base.addr() as u64) >> shift {
            return None;
        }
        self.resize(prefix - 1)
    }

    /// Copy of this network with a different prefix length, or `None` if `prefix` > 32.
    pub fn resize(&self, prefix: u8) -> Option<Self> {
        let mask: Mask32 = Mask32::new(prefix).ok()?;
        Some(Self::new(self.base, Some(mask)))
    }

    /// The following network of the same size, or `None` at the end of the address space.
    pub fn next_sib(&self) -> Option<Self> {
        self.nth_next_sib(1)
    }

    /// The preceding network of the same size, or `None` at 0.0.0.0.
    pub fn prev_sib(&self) -> Option<Self> {
        let shift: u32 = (IPV4_BITS - self.prefix_len()) as u32;
        let index: u64 = (self.base.addr() as u64) >> shift;
        if index == 0 {
            return None;
        }
        Some(Self {
            base: Ipv4::new(((index - 1) << shift) as u32),
            mask: self.mask,
        })
    }

    /**
    The largest network which directly follows this one, i.e. the next
    sibling grown as far as its base allows.
    */
    pub fn next(&self) -> Option<Self> {
        self.nth_next_sib(1).map(|sib| sib.grow())
    }

    /// The largest network which directly precedes this one.
    pub fn prev(&self) -> Option<Self> {
        self.grow().prev_sib()
    }

    /// Address at `index` within the network, or `None` if `index` >= [Ipv4Net::len].
    pub fn nth(&self, index: u32) -> Option<Ipv4> {
        if index >= self.len() {
            return None;
        }
        Some(Ipv4::new(self.base.addr() + index))
    }

    /**
    Number of `/prefix` subnets within this network. Returns 0 if `prefix`
    is not longer than this network's prefix, exceeds 32, or the count does
    not fit a u32.
    */
    pub fn subnet_count(&self, prefix: u8) -> u32 {
        if prefix <= self.prefix_len() || prefix > IPV4_BITS {
            return 0;
        }
        1u32.checked_shl((prefix - self.prefix_len()) as u32)
            .unwrap_or(0)
    }

    /// The `index`th `/prefix` subnet, see [Ipv4Net::subnet_count].
    pub fn nth_subnet(&self, prefix: u8, index: u32) -> Option<Self> {
        let count: u32 = self.subnet_count(prefix);
        if count == 0 || index >= count {
            return None;
        }
        self.resize(prefix)?.nth_next_sib(index)
    }

    /**
    The subnets of this network found in `list`, with all gaps in between
    filled by the largest possible networks. The result is sorted and covers
    this network completely.

    Entries of `list` which are not subnets of this network are ignored.
    Returns an empty list if none are.
    */
    pub fn fill(&self, list: &[Self]) -> Ipv4NetList {
        netlist::fill(self, list)
    }

    /**
    One page of the addresses in this network.

    A `per_page` of 0 means [crate::DEFAULT_PAGE_SIZE]. Pages which start past the
    end of the network are an error, the last page may be short.
    */
    pub fn ips(&self, page: u64, per_page: u32) -> Result<Vec<Ipv4>, NetaddrError> {
        let total: u128 = 1 << (IPV4_BITS - self.prefix_len());
        let (start, end) = page_bounds(total, page, per_page)?;
        Ok((start..end)
            .map(|i| Ipv4::new(self.base.addr() + i as u32))
            .collect())
    }

    /// One page of the `/prefix` subnets of this network, see [Ipv4Net::ips].
    pub fn subnets(&self, prefix: u8, page: u64, per_page: u32) -> Result<Ipv4NetList, NetaddrError> {
        if prefix <= self.prefix_len() || prefix > IPV4_BITS {
            return Err(NetaddrError::InvalidPrefixLength {
                prefix,
                max: IPV4_BITS,
            });
        }
        let total: u128 = 1 << (prefix - self.prefix_len());
        let (start, end) = page_bounds(total, page, per_page)?;
        let first: Self = Self::new(self.base, Some(Mask32::init(prefix)));
        Ok((start..end)
            .filter_map(|i| first.nth_next_sib(i as u32))
            .collect())
    }

    /// Shorten the prefix for as long as the base stays a valid network address.
    fn grow(&self) -> Self {
        let addr: u32 = self.base.addr();
        let mut prefix: u8 = self.prefix_len();
        while prefix > 0 && addr & !Mask32::init(prefix - 1).mask() == 0 {
            prefix -= 1;
        }
        Self {
            base: self.base,
            mask: Mask32::init(prefix),
        }
    }

    /// The `nth` following sibling, or `None` past the end of the address space.
    fn nth_next_sib(&self, nth: u32) -> Option<Self> {
        let shift: u32 = (IPV4_BITS - self.prefix_len()) as u32;
        let index: u64 = (self.base.addr() as u64) >> shift;
        let max_index: u64 = (F32 as u64) >> shift;
        let new: u64 = index + nth as u64;
        if new > max_index {
            return None;
        }
        Some(Self {
            base: Ipv4::new((new << shift) as u32),
            mask: self.mask,
        })
    }
}

impl Network for Ipv4Net {
    type Addr = Ipv4;

    fn network(&self) -> Ipv4 {
        self.base
    }
    fn prefix_len(&self) -> u8 {
        self.mask.prefix_len()
    }
    fn rel(&self, other: &Self) -> Option<Ordering> {
        Ipv4Net::rel(self, other)
    }
    fn summ(&self, other: &Self) -> Option<Self> {
        Ipv4Net::summ(self, other)
    }
    fn next(&self) -> Option<Self> {
        Ipv4Net::next(self)
    }
    fn prev(&self) -> Option<Self> {
        Ipv4Net::prev(self)
    }
    fn next_sib(&self) -> Option<Self> {
        Ipv4Net::next_sib(self)
    }
    fn resize(&self, prefix: u8) -> Option<Self> {
        Ipv4Net::resize(self, prefix)
    }
}

impl fmt::Display for Ipv4Net {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.base, self.mask)
    }
}

/**
Parse an IPv4 network from:
- a single address: "192.168.1.1" (as a /32)
- CIDR format: "192.168.1.1/24"
- extended format: "192.168.1.1 255.255.255.0"
*/
impl FromStr for Ipv4Net {
    type Err = NetaddrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let input: &str = s.trim();

        let (addr, mask): (&str, Option<Mask32>) = if input.contains(SLASH) {
            let parts: Vec<&str> = input.split(SLASH).collect();
            if parts.len() > 2 {
                return Err(NetaddrError::InvalidNetFmt(s.into()));
            }
            (parts[0], Some(parts[1].parse()?))
        } else if let Some((addr, mask)) = input.split_once(SPACE) {
            (addr, Some(mask.parse()?))
        } else {
            (input, None)
        };

        Ok(Self::new(addr.parse()?, mask))
    }
}

impl From<ipnet::Ipv4Net> for Ipv4Net {
    fn from(net: ipnet::Ipv4Net) -> Self {
        Self::new(net.addr().into(), Some(Mask32::init(net.prefix_len())))
    }
}

impl From<Ipv4Net> for ipnet::Ipv4Net {
    fn from(net: Ipv4Net) -> Self {
        ipnet::Ipv4Net::new_assert(net.base.into(), net.prefix_len())
    }
}

/* -------------------------------------------------------------------------- */
