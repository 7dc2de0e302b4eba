// Copyright (c) 2026 Mikko Tanner. All rights reserved.
// Licensed under the MIT License or the Apache License, Version 2.0.
// SPDX-License-Identifier: MIT OR Apache-2.0

use super::{
    netlist::{self, Network},
    page_bounds,
    strings::*,
    Ipv6, Ipv6NetList, Mask128, NetaddrError, IPV6_BITS,
};
use std::{cmp::Ordering, fmt, str::FromStr};

/// Network ids with only these bits clear default to a /128 (RFC 4291), others to a /64.
const DEFAULT_HOST_BITS: u64 = 0x1fffffffffffffff;

/**
An IPv6 network: a base address and a [Mask128].

The base is always the network address (host bits cleared). Ordering is by
base address, then by mask capacity.
*/
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Ipv6Net {
    base: Ipv6,
    mask: Mask128,
}

impl Ipv6Net {
    /**
    Create a new network from `ip` and `mask`.

    A missing mask is chosen per RFC 4291: `/128` when the network id is
    zero apart from its top 3 bits, `/64` otherwise.
    */
    pub fn new(ip: Ipv6, mask: Option<Mask128>) -> Self {
        let mask: Mask128 = mask.unwrap_or_else(|| {
            if ip.net_id() & DEFAULT_HOST_BITS == 0 {
                Mask128::init(IPV6_BITS)
            } else {
                Mask128::init(64)
            }
        });
        Self {
            base: Ipv6::new(ip.net_id() & mask.net_id_mask(), ip.host_id() & mask.host_id_mask()),
            mask,
        }
    }

    pub fn network(&self) -> Ipv6 {
        self.base
    }

    pub fn netmask(&self) -> Mask128 {
        self.mask
    }

    pub fn prefix_len(&self) -> u8 {
        self.mask.prefix_len()
    }

    pub fn version(&self) -> u8 {
        6
    }

    /// Number of addresses in the network. Always 0 for prefixes of 64 or less.
    pub fn len(&self) -> u64 {
        self.mask.len()
    }

    pub fn contains(&self, ip: &Ipv6) -> bool {
        self.base.as_u128() == ip.as_u128() & self.mask.mask()
    }

    /// Uncompressed form with the prefix, f.ex. "fe80:0000:...:0000/64".
    pub fn long(&self) -> String {
        format!("{}{}", self.base.long(), self.mask)
    }

    /**
    Relationship to `other`:
    - `Some(Greater)`: this network is a supernet of `other`
    - `Some(Equal)`: the networks are identical
    - `Some(Less)`: this network is a subnet of `other`
    - `None`: the networks are unrelated
    */
    pub fn rel(&self, other: &Self) -> Option<Ordering> {
        if self.base == other.base {
            return Some(self.mask.cmp(&other.mask));
        }

        let (net, host) = self.mask.hostmask();
        let (other_net, other_host) = other.mask.hostmask();
        let (a, b) = (self.base, other.base);
        if a.net_id() | net == b.net_id() | net && a.host_id() | host == b.host_id() | host {
            Some(Ordering::Greater)
        } else if a.net_id() | other_net == b.net_id() | other_net
            && a.host_id() | other_host == b.host_id() | other_host
        {
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
        let shift: u32 = (IPV6_BITS - prefix + 1) as u32;
        let addr: u128 = self.base.as_u128().checked_shr(shift).unwrap_or(0);
        let other_addr: u128 = other.base.as_u128().checked_shr(shift).unwrap_or(0);
        if addr != other_addr {
            return None;
        }
        self.resize(prefix - 1)
    }

    /// Copy of this network with a different prefix length, or `None` if `prefix` > 128.
    pub fn resize(&self, prefix: u8) -> Option<Self> {
        let mask: Mask128 = Mask128::new(prefix).ok()?;
        Some(Self::new(self.base, Some(mask)))
    }

    /// The following network of the same size, or `None` at the end of the address space.
    pub fn next_sib(&self) -> Option<Self> {
        self.nth_next_sib(1)
    }

    /// The preceding network of the same size, or `None` at `::`.
    pub fn prev_sib(&self) -> Option<Self> {
        let shift: u32 = (IPV6_BITS - self.prefix_len()) as u32;
        let index: u128 = self.base.as_u128().checked_shr(shift).unwrap_or(0);
        if index == 0 {
            return None;
        }
        Some(Self {
            base: Ipv6::from((index - 1) << shift),
            mask: self.mask,
        })
    }

    /// The largest network which directly follows this one.
    pub fn next(&self) -> Option<Self> {
        self.nth_next_sib(1).map(|sib| sib.grow())
    }

    /// The largest network which directly precedes this one.
    pub fn prev(&self) -> Option<Self> {
        self.grow().prev_sib()
    }

    /**
    Address at `index` within the network.

    Returns `None` for networks larger than a `/64`. A `/64` accepts any
    index, smaller networks require `index` < [Ipv6Net::len].
    */
    pub fn nth(&self, index: u64) -> Option<Ipv6> {
        let prefix: u8 = self.prefix_len();
        if prefix < 64 || (prefix > 64 && index >= self.len()) {
            return None;
        }
        Some(Ipv6::new(self.base.net_id(), self.base.host_id() + index))
    }

    /**
    Number of `/prefix` subnets within this network. Returns 0 if `prefix`
    is not longer than this network's prefix, exceeds 128, or the count does
    not fit a u64.
    */
    pub fn subnet_count(&self, prefix: u8) -> u64 {
        if prefix <= self.prefix_len() || prefix > IPV6_BITS {
            return 0;
        }
        1u64.checked_shl((prefix - self.prefix_len()) as u32)
            .unwrap_or(0)
    }

    /// The `index`th `/prefix` subnet, see [Ipv6Net::subnet_count].
    pub fn nth_subnet(&self, prefix: u8, index: u64) -> Option<Self> {
        let count: u64 = self.subnet_count(prefix);
        if count == 0 || index >= count {
            return None;
        }
        self.resize(prefix)?.nth_next_sib(index as u128)
    }

    /**
    The subnets of this network found in `list`, with all gaps in between
    filled by the largest possible networks. See [crate::Ipv4Net::fill].
    */
    pub fn fill(&self, list: &[Self]) -> Ipv6NetList {
        netlist::fill(self, list)
    }

    /**
    One page of the addresses in this network.

    A `per_page` of 0 means [crate::DEFAULT_PAGE_SIZE]. Pages which start
    past the end of the network are an error, the last page may be short.
    */
    pub fn ips(&self, page: u64, per_page: u32) -> Result<Vec<Ipv6>, NetaddrError> {
        let total: u128 = size_of(IPV6_BITS - self.prefix_len());
        let (start, end) = page_bounds(total, page, per_page)?;
        let base: u128 = self.base.as_u128();
        Ok((start..end).map(|i| Ipv6::from(base + i)).collect())
    }

    /// One page of the `/prefix` subnets of this network, see [Ipv6Net::ips].
    pub fn subnets(&self, prefix: u8, page: u64, per_page: u32) -> Result<Ipv6NetList, NetaddrError> {
        if prefix <= self.prefix_len() || prefix > IPV6_BITS {
            return Err(NetaddrError::InvalidPrefixLength {
                prefix,
                max: IPV6_BITS,
            });
        }
        let total: u128 = size_of(prefix - self.prefix_len());
        let (start, end) = page_bounds(total, page, per_page)?;
        let first: Self = Self::new(self.base, Some(Mask128::init(prefix)));
        Ok((start..end)
            .filter_map(|i| first.nth_next_sib(i))
            .collect())
    }

    /// Shorten the prefix for as long as the base stays a valid network address.
    fn grow(&self) -> Self {
        let addr: u128 = self.base.as_u128();
        let mut prefix: u8 = self.prefix_len();
        while prefix > 0 && addr & !Mask128::init(prefix - 1).mask() == 0 {
            prefix -= 1;
        }
        Self {
            base: self.base,
            mask: Mask128::init(prefix),
        }
    }

    /// The `nth` following sibling, or `None` past the end of the address space.
    fn nth_next_sib(&self, nth: u128) -> Option<Self> {
        let shift: u32 = (IPV6_BITS - self.prefix_len()) as u32;
        let index: u128 = self.base.as_u128().checked_shr(shift).unwrap_or(0);
        let max_index: u128 = u128::MAX.checked_shr(shift).unwrap_or(0);
        let new: u128 = index.checked_add(nth)?;
        if new > max_index {
            return None;
        }
        Some(Self {
            base: Ipv6::from(new.checked_shl(shift).unwrap_or(0)),
            mask: self.mask,
        })
    }
}

/// 2^bits, saturating at u128::MAX for the whole address space.
fn size_of(bits: u8) -> u128 {
    1u128.checked_shl(bits as u32).unwrap_or(u128::MAX)
}

impl Network for Ipv6Net {
    type Addr = Ipv6;

    fn network(&self) -> Ipv6 {
        self.base
    }
    fn prefix_len(&self) -> u8 {
        self.mask.prefix_len()
    }
    fn rel(&self, other: &Self) -> Option<Ordering> {
        Ipv6Net::rel(self, other)
    }
    fn summ(&self, other: &Self) -> Option<Self> {
        Ipv6Net::summ(self, other)
    }
    fn next(&self) -> Option<Self> {
        Ipv6Net::next(self)
    }
    fn prev(&self) -> Option<Self> {
        Ipv6Net::prev(self)
    }
    fn next_sib(&self) -> Option<Self> {
        Ipv6Net::next_sib(self)
    }
    fn resize(&self, prefix: u8) -> Option<Self> {
        Ipv6Net::resize(self, prefix)
    }
}

impl fmt::Display for Ipv6Net {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.base, self.mask)
    }
}

/// Parse "addr" or "addr/N". Without a prefix the mask follows [Ipv6Net::new].
impl FromStr for Ipv6Net {
    type Err = NetaddrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let input: &str = s.trim();
        let parts: Vec<&str> = input.split(SLASH).collect();
        let mask: Option<Mask128> = match parts.len() {
            1 => None,
            2 => Some(parts[1].parse()?),
            _ => return Err(NetaddrError::InvalidNetFmt(s.into())),
        };
        Ok(Self::new(parts[0].parse()?, mask))
    }
}

impl From<ipnet::Ipv6Net> for Ipv6Net {
    fn from(net: ipnet::Ipv6Net) -> Self {
        Self::new(net.addr().into(), Some(Mask128::init(net.prefix_len())))
    }
}

impl From<Ipv6Net> for ipnet::Ipv6Net {
    fn from(net: Ipv6Net) -> Self {
        ipnet::Ipv6Net::new_assert(net.base.into(), net.prefix_len())
    }
}

/* -------------------------------------------------------------------------- */
