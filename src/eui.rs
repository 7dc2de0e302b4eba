// Copyright (c) 2026 Mikko Tanner. All rights reserved.
// Licensed under the MIT License or the Apache License, Version 2.0.
// SPDX-License-Identifier: MIT OR Apache-2.0

use super::{Ipv6, Ipv6Net, NetaddrError};
use lazy_static::lazy_static;
use regex::Regex;
use std::{fmt, str::FromStr};

lazy_static! {
    static ref EUI_DELIMS: Regex = Regex::new(r"[:\-.]").expect("Invalid Regex?");
    static ref HEX_DIGITS: Regex = Regex::new(r"^[0-9a-fA-F]+$").expect("Invalid Regex?");
}

/// Universal/local bit of a modified EUI-64 interface identifier (RFC 4291).
const UL_BIT: u64 = 0x0200000000000000;

/**
Strip the optional delimiters ('-', ':' or '.') and parse what remains as
exactly `digits` hex characters.
*/
fn parse_hex(s: &str, digits: usize) -> Result<u64, NetaddrError> {
    let hex = EUI_DELIMS.replace_all(s.trim(), "");
    if hex.len() != digits || !HEX_DIGITS.is_match(&hex) {
        return Err(NetaddrError::InvalidEui(s.into()));
    }
    u64::from_str_radix(&hex, 16).map_err(|_| NetaddrError::InvalidEui(s.into()))
}

/// Render the low `n` bytes of `val` as "aa-bb-..".
fn write_bytes(f: &mut fmt::Formatter<'_>, val: u64, n: usize) -> fmt::Result {
    let bytes: [u8; 8] = val.to_be_bytes();
    let hex: Vec<String> = bytes[8 - n..].iter().map(|b| format!("{b:02x}")).collect();
    write!(f, "{}", hex.join("-"))
}

/* -------------------------------------------------------------------------- */

/**
A 48-bit Extended Unique Identifier, i.e. a MAC address.

Parses most typical formats: `aa-bb-cc-dd-ee-ff`, `aa:bb:cc:dd:ee:ff`,
`aabb.ccdd.eeff` and `aabbccddeeff`.
*/
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Eui48(u64);

impl Eui48 {
    /// Only the low 48 bits of `val` are kept.
    pub const fn new(val: u64) -> Self {
        Self(val & 0xffffffffffff)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }

    /// Convert into an [Eui64] by inserting `ff-fe` between the OUI and the extension id.
    pub fn to_eui64(&self) -> Eui64 {
        Eui64((self.0 & 0xffffff000000) << 16 | (self.0 & 0xffffff) | 0xfffe000000)
    }
}

impl fmt::Display for Eui48 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_bytes(f, self.0, 6)
    }
}

impl FromStr for Eui48 {
    type Err = NetaddrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_hex(s, 12).map(Self)
    }
}

/* -------------------------------------------------------------------------- */

/// A 64-bit Extended Unique Identifier.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Eui64(u64);

impl Eui64 {
    pub const fn new(val: u64) -> Self {
        Self(val)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }

    pub fn bytes(&self) -> [u8; 8] {
        self.0.to_be_bytes()
    }

    /**
    Build the SLAAC address of this identifier inside `net`: the network id is
    taken from `net` and the host id is the identifier with its
    universal/local bit flipped.

    Returns `None` unless `net` is exactly a `/64`.
    */
    pub fn to_ipv6(&self, net: &Ipv6Net) -> Option<Ipv6> {
        if net.prefix_len() != 64 {
            return None;
        }
        Some(Ipv6::new(net.network().net_id(), self.0 ^ UL_BIT))
    }
}

impl fmt::Display for Eui64 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_bytes(f, self.0, 8)
    }
}

impl FromStr for Eui64 {
    type Err = NetaddrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_hex(s, 16).map(Self)
    }
}

/* -------------------------------------------------------------------------- */
