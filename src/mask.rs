// Copyright (c) 2026 Mikko Tanner. All rights reserved.
// Licensed under the MIT License or the Apache License, Version 2.0.
// SPDX-License-Identifier: MIT OR Apache-2.0

use super::{strings::*, Ipv4, NetaddrError, F32, F64, IPV4_BITS, IPV6_BITS};
use std::{cmp::Ordering, fmt, str::FromStr};

/**
32-bit netmask used by [crate::Ipv4Net].

Ordering is by capacity, i.e. *inverted* relative to the prefix length:
a `/8` compares greater than a `/24`.
*/
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct Mask32 {
    mask: u32,
    prefix: u8,
}

impl Mask32 {
    /// Create a [Mask32] from a prefix length (`0..=32`).
    pub fn new(prefix: u8) -> Result<Self, NetaddrError> {
        if prefix > IPV4_BITS {
            return Err(NetaddrError::InvalidPrefixLength {
                prefix,
                max: IPV4_BITS,
            });
        }
        Ok(Self::init(prefix))
    }

    /**
    Create a [Mask32] from a raw netmask such as `0xffffff00`.

    The '1' bits must form a contiguous run starting at the most significant
    bit, otherwise [NetaddrError::InvalidNetmask] is returned.
    */
    pub fn from_netmask(mask: u32) -> Result<Self, NetaddrError> {
        let ones: u32 = mask.leading_ones();
        if ones + mask.trailing_zeros() != IPV4_BITS as u32 {
            return Err(NetaddrError::InvalidNetmask(Ipv4::from(mask).to_string()));
        }
        Ok(Self::init(ones as u8))
    }

    /// Caller guarantees `prefix <= 32`.
    pub(crate) fn init(prefix: u8) -> Self {
        debug_assert!(prefix <= IPV4_BITS);
        Self {
            mask: F32 ^ F32.checked_shr(prefix as u32).unwrap_or(0),
            prefix,
        }
    }

    /// Number of addresses covered. Always 0 for `/0` (2^32 does not fit a u32).
    pub fn len(&self) -> u32 {
        if self.mask == 0 {
            return 0;
        }
        (self.mask ^ F32) + 1
    }

    pub fn mask(&self) -> u32 {
        self.mask
    }

    /// Bitwise complement of the mask.
    pub fn hostmask(&self) -> u32 {
        self.mask ^ F32
    }

    pub fn prefix_len(&self) -> u8 {
        self.prefix
    }

    /// The mask in dotted-quad form, f.ex. "255.255.255.0".
    pub fn extended(&self) -> String {
        Ipv4::from(self.mask).to_string()
    }
}

impl Ord for Mask32 {
    fn cmp(&self, other: &Self) -> Ordering {
        other.prefix.cmp(&self.prefix)
    }
}

impl PartialOrd for Mask32 {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Mask32 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{SLASH}{}", self.prefix)
    }
}

/// Accepts a prefix length ("24" or "/24") or an extended netmask ("255.255.255.0").
impl FromStr for Mask32 {
    type Err = NetaddrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s: &str = s.trim();
        if !s.contains(DOT) {
            return Self::new(parse_prefix(s)?);
        }
        let ip: Ipv4 = s.parse()?;
        Self::from_netmask(ip.addr())
    }
}

/* -------------------------------------------------------------------------- */

/**
128-bit netmask used by [crate::Ipv6Net], split into the network id
(upper 64 bits) and host id (lower 64 bits) portions.

Ordering is by capacity, like [Mask32].
*/
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct Mask128 {
    net_id_mask: u64,
    host_id_mask: u64,
    prefix: u8,
}

impl Mask128 {
    /// Create a [Mask128] from a prefix length (`0..=128`).
    pub fn new(prefix: u8) -> Result<Self, NetaddrError> {
        if prefix > IPV6_BITS {
            return Err(NetaddrError::InvalidPrefixLength {
                prefix,
                max: IPV6_BITS,
            });
        }
        Ok(Self::init(prefix))
    }

    /// Caller guarantees `prefix <= 128`.
    pub(crate) fn init(prefix: u8) -> Self {
        debug_assert!(prefix <= IPV6_BITS);
        if prefix <= 64 {
            Self {
                net_id_mask: F64 ^ F64.checked_shr(prefix as u32).unwrap_or(0),
                host_id_mask: 0,
                prefix,
            }
        } else {
            Self {
                net_id_mask: F64,
                host_id_mask: F64 ^ F64.checked_shr((prefix - 64) as u32).unwrap_or(0),
                prefix,
            }
        }
    }

    /**
    Number of addresses covered.

    Only useful for networks smaller than a `/64`: it always returns 0 for
    prefixes <= 64 since the result would not fit a u64.
    */
    pub fn len(&self) -> u64 {
        if self.prefix <= 64 {
            return 0;
        }
        (self.host_id_mask ^ F64) + 1
    }

    pub fn net_id_mask(&self) -> u64 {
        self.net_id_mask
    }

    pub fn host_id_mask(&self) -> u64 {
        self.host_id_mask
    }

    /// The whole mask as a single integer.
    pub fn mask(&self) -> u128 {
        (self.net_id_mask as u128) << 64 | self.host_id_mask as u128
    }

    /// Bitwise complement of the mask as a (net id, host id) pair.
    pub fn hostmask(&self) -> (u64, u64) {
        (self.net_id_mask ^ F64, self.host_id_mask ^ F64)
    }

    pub fn prefix_len(&self) -> u8 {
        self.prefix
    }
}

impl Ord for Mask128 {
    fn cmp(&self, other: &Self) -> Ordering {
        other.prefix.cmp(&self.prefix)
    }
}

impl PartialOrd for Mask128 {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Mask128 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{SLASH}{}", self.prefix)
    }
}

/// Accepts a prefix length, "64" or "/64".
impl FromStr for Mask128 {
    type Err = NetaddrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(parse_prefix(s.trim())?)
    }
}

/// Parse "N" or "/N" into a prefix length (range is checked by the caller).
fn parse_prefix(s: &str) -> Result<u8, NetaddrError> {
    let pre: &str = s.strip_prefix(SLASH).unwrap_or(s);
    pre.parse::<u8>()
        .map_err(|source| NetaddrError::InvalidPrefix {
            input: pre.into(),
            source,
        })
}

/* -------------------------------------------------------------------------- */

#[cfg(test)]
mod tests {
    use super::*;

    #[rustfmt::skip]
    #[test]
    fn test_parse_mask32() {
        let tests: Vec<(&str, Option<(u8, u32)>)> = vec![
            (" 255.0.0.0 ",         Some((8, 0xff000000))),
            ("0.0.0.0",             Some((0, 0))),
            ("255.255.255.255",     Some((32, 0xffffffff))),
            (" 8 ",                 Some((8, 0xff000000))),
            ("/32",                 Some((32, 0xffffffff))),
            ("17",                  Some((17, 0xffff8000))),
            ("//32",                None),
            ("256.0.0.0",           None),
            ("255.248.255.0",       None),
            ("255",                 None),
            ("/33",                 None),
            ("",                    None),
        ];

        for (input, expected) in tests {
            let res: Result<Mask32, NetaddrError> = input.parse();
            match expected {
                Some((prefix, mask)) => {
                    let m32 = res.unwrap_or_else(|e| panic!("Failed: '{input}': {e}"));
                    assert_eq!(m32.prefix_len(), prefix, "Failed: '{input}'");
                    assert_eq!(m32.mask(), mask, "Failed: '{input}'");
                }
                None => assert!(res.is_err(), "Failed: '{input}' should not parse"),
            }
        }
    }

    #[test]
    fn test_new_mask32() {
        assert_eq!(Mask32::new(8).unwrap().mask(), 0xff000000);
        assert_eq!(Mask32::new(17).unwrap().mask(), 0xffff8000);
        assert_eq!(Mask32::new(0).unwrap().mask(), 0);
        assert_eq!(Mask32::new(32).unwrap().mask(), F32);
        assert!(Mask32::new(33).is_err());
    }

    /// Every contiguous mask must be accepted, and every mask with a single
    /// bit flipped (or a second run of ones) must be rejected.
    #[test]
    fn test_netmask_shapes() {
        for prefix in 0..=IPV4_BITS {
            let good: u32 = Mask32::init(prefix).mask();
            assert_eq!(Mask32::from_netmask(good).unwrap().prefix_len(), prefix);

            for bit in 0..32u32 {
                let flipped: u32 = good ^ (1 << bit);
                let valid: bool = flipped.leading_ones() + flipped.trailing_zeros() == 32;
                assert_eq!(
                    Mask32::from_netmask(flipped).is_ok(),
                    valid,
                    "Failed: {flipped:#010x}"
                );
            }
        }

        // two separate runs of ones
        for hi in 1..31u32 {
            for gap in 1..(32 - hi) {
                let run_hi: u32 = F32 << (32 - hi);
                let run_lo: u32 = 1 << (32 - hi - gap - 1);
                assert!(Mask32::from_netmask(run_hi | run_lo).is_err());
            }
        }
    }

    #[test]
    fn test_mask32_extended_and_display() {
        assert_eq!(Mask32::init(32).extended(), "255.255.255.255");
        assert_eq!(Mask32::init(8).extended(), "255.0.0.0");
        assert_eq!(Mask32::init(20).extended(), "255.255.240.0");
        assert_eq!(Mask32::init(32).to_string(), "/32");
        assert_eq!(Mask32::init(8).to_string(), "/8");
    }

    #[test]
    fn test_mask32_cmp() {
        assert_eq!(Mask32::init(25).cmp(&Mask32::init(24)), Ordering::Less);
        assert_eq!(Mask32::init(24).cmp(&Mask32::init(25)), Ordering::Greater);
        assert_eq!(Mask32::init(24).cmp(&Mask32::init(24)), Ordering::Equal);
    }

    #[test]
    fn test_mask32_len() {
        assert_eq!(Mask32::init(32).len(), 1);
        assert_eq!(Mask32::init(26).len(), 64);
        assert_eq!(Mask32::init(1).len(), 1 << 31);
        assert_eq!(Mask32::init(0).len(), 0);
    }

    #[rustfmt::skip]
    #[test]
    fn test_parse_mask128() {
        let tests: Vec<(&str, Option<(u8, u64, u64)>)> = vec![
            (" 8 ",     Some((8,   0xff00000000000000, 0))),
            ("/32",     Some((32,  0xffffffff00000000, 0))),
            ("/128",    Some((128, F64, F64))),
            ("65",      Some((65,  F64, 0x8000000000000000))),
            ("0",       Some((0,   0, 0))),
            ("//32",    None),
            ("/129",    None),
            ("ff",      None),
        ];

        for (input, expected) in tests {
            let res: Result<Mask128, NetaddrError> = input.parse();
            match expected {
                Some((prefix, net, host)) => {
                    let m128 = res.unwrap_or_else(|e| panic!("Failed: '{input}': {e}"));
                    assert_eq!(m128.prefix_len(), prefix, "Failed: '{input}'");
                    assert_eq!(m128.net_id_mask(), net, "Failed: '{input}'");
                    assert_eq!(m128.host_id_mask(), host, "Failed: '{input}'");
                }
                None => assert!(res.is_err(), "Failed: '{input}' should not parse"),
            }
        }
    }

    #[test]
    fn test_mask128_len_and_cmp() {
        assert_eq!(Mask128::init(128).len(), 1);
        assert_eq!(Mask128::init(127).len(), 2);
        assert_eq!(Mask128::init(65).len(), 1 << 63);
        assert_eq!(Mask128::init(64).len(), 0);
        assert_eq!(Mask128::init(0).len(), 0);

        assert_eq!(Mask128::init(25).cmp(&Mask128::init(24)), Ordering::Less);
        assert_eq!(Mask128::init(24).cmp(&Mask128::init(25)), Ordering::Greater);
        assert_eq!(Mask128::init(24), Mask128::init(24));
        assert_eq!(Mask128::init(72).mask(), !0u128 << 56);
        assert_eq!(Mask128::init(128).to_string(), "/128");
    }
}
