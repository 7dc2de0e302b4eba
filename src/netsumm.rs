// Copyright (c) 2026 Mikko Tanner. All rights reserved.
// Licensed under the MIT License or the Apache License, Version 2.0.
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Read networks from stdin, one per line, and print their summary.
//!
//! Blank lines and `#` comments are ignored. IPv4 networks are printed first,
//! followed by IPv6 networks.

use netaddr::{Ipv4Net, Ipv4NetList, Ipv6Net, Ipv6NetList};
use std::io::{self, BufRead, Write};

fn main() -> io::Result<()> {
    let mut v4: Vec<Ipv4Net> = Vec::new();
    let mut v6: Vec<Ipv6Net> = Vec::new();

    for (lineno, line) in io::stdin().lock().lines().enumerate() {
        let line: String = line?;
        let item: &str = line.trim();
        if item.is_empty() || item.starts_with('#') {
            continue;
        }
        if let Ok(net) = item.parse::<Ipv4Net>() {
            v4.push(net);
            continue;
        }
        match item.parse::<Ipv6Net>() {
            Ok(net) => v6.push(net),
            Err(e) => {
                eprintln!("line {}: skipping '{item}': {e}", lineno + 1);
            }
        }
    }

    let mut out = io::stdout().lock();
    for net in &Ipv4NetList::from(v4).summ() {
        writeln!(out, "{net}")?;
    }
    for net in &Ipv6NetList::from(v6).summ() {
        writeln!(out, "{net}")?;
    }
    out.flush()
}
