// Copyright (c) 2026 Mikko Tanner. All rights reserved.
// Licensed under the MIT License or the Apache License, Version 2.0.
// SPDX-License-Identifier: MIT OR Apache-2.0

use super::{Ipv4Net, Ipv6Net, NetaddrError};
use std::{
    cmp::Ordering,
    fmt,
    ops::{Deref, DerefMut},
    str::FromStr,
};
use tracing::{debug, trace};

/**
Operations shared by [Ipv4Net] and [Ipv6Net] which the list-level
algorithms (summarization and gap filling) are built upon.

`rel` follows the convention of the concrete types: `None` when unrelated,
`Some(Greater)` when `self` is the supernet, `Some(Less)` when `self` is the
subnet and `Some(Equal)` when both are the same network.
*/
pub trait Network: Clone + Ord + fmt::Display + fmt::Debug {
    type Addr: Copy + Ord + fmt::Debug;

    fn network(&self) -> Self::Addr;
    fn prefix_len(&self) -> u8;
    fn rel(&self, other: &Self) -> Option<Ordering>;
    fn summ(&self, other: &Self) -> Option<Self>;
    fn next(&self) -> Option<Self>;
    fn prev(&self) -> Option<Self>;
    fn next_sib(&self) -> Option<Self>;
    fn resize(&self, prefix: u8) -> Option<Self>;
}

/// A list of networks of one address family.
#[derive(Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct NetList<N>(Vec<N>);

pub type Ipv4NetList = NetList<Ipv4Net>;
pub type Ipv6NetList = NetList<Ipv6Net>;

impl<N: Network> NetList<N> {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Sort by network address, then by mask capacity (smaller networks first).
    pub fn sort(&mut self) -> &mut Self {
        self.0.sort();
        self
    }

    /**
    Sorted copy of the list with every redundant subnet discarded and all
    summarizable peers merged, repeated until nothing more can be merged.
    */
    pub fn summ(&self) -> Self {
        let mut summd: Vec<N> = self.0.clone();
        if summd.len() > 1 {
            summd = discard_subnets(summd);
        }
        if summd.len() > 1 {
            summd = summ_peers(summd);
        }
        debug!(input = self.0.len(), output = summd.len(), "summarized network list");
        Self(summd)
    }

    pub fn into_inner(self) -> Vec<N> {
        self.0
    }
}

impl<N> NetList<N>
where
    N: Network + FromStr<Err = NetaddrError>,
{
    /// Parse every item of `items`. The error names the index of the first bad item.
    pub fn from_strs(items: &[impl AsRef<str>]) -> Result<Self, NetaddrError> {
        items
            .iter()
            .enumerate()
            .map(|(index, s)| {
                s.as_ref()
                    .parse::<N>()
                    .map_err(|e| NetaddrError::ListItem {
                        index,
                        source: Box::new(e),
                    })
            })
            .collect()
    }
}

impl<N> From<Vec<N>> for NetList<N> {
    fn from(list: Vec<N>) -> Self {
        Self(list)
    }
}

impl<N> Deref for NetList<N> {
    type Target = [N];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<N> DerefMut for NetList<N> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl<N> FromIterator<N> for NetList<N> {
    fn from_iter<I: IntoIterator<Item = N>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<N> IntoIterator for NetList<N> {
    type Item = N;
    type IntoIter = std::vec::IntoIter<N>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a, N> IntoIterator for &'a NetList<N> {
    type Item = &'a N;
    type IntoIter = std::slice::Iter<'a, N>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Space separated inside brackets, f.ex. "[10.0.0.0/8 192.168.0.0/16]".
impl<N: fmt::Display> fmt::Display for NetList<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let items: Vec<String> = self.0.iter().map(|n| n.to_string()).collect();
        write!(f, "[{}]", items.join(" "))
    }
}

/* -------------------------------------------------------------------------- */

/**
Remove every entry which is a subnet of (or equal to) another entry.

Works backwards from the last entry: it is kept unless a supernet of it
exists, its subnets and duplicates are dropped, and the survivors are
processed the same way.
*/
pub(crate) fn discard_subnets<N: Network>(list: Vec<N>) -> Vec<N> {
    let mut keepers: Vec<N> = Vec::with_capacity(list.len());
    let mut work: Vec<N> = list;

    while let Some(last) = work.pop() {
        let mut keep_last: bool = true;
        work.retain(|e| match last.rel(e) {
            None => true,
            Some(Ordering::Less) => {
                keep_last = false;
                true
            }
            Some(_) => false,
        });
        if keep_last {
            keepers.push(last);
        }
    }
    keepers
}

/**
Merge consecutive summarizable networks pairwise, left to right, until a
full pass no longer shortens the list. The result is sorted.
*/
pub(crate) fn summ_peers<N: Network>(list: Vec<N>) -> Vec<N> {
    let mut summd: Vec<N> = list;
    let mut pass: usize = 0;

    loop {
        summd.sort();
        let len: usize = summd.len();
        let mut merged: Vec<N> = Vec::with_capacity(len);
        let mut iter = summd.into_iter().peekable();

        while let Some(net) = iter.next() {
            let sum: Option<N> = iter.peek().and_then(|next| net.summ(next));
            match sum {
                Some(sum) => {
                    merged.push(sum);
                    iter.next(); // consumed by the summary
                }
                None => merged.push(net),
            }
        }

        pass += 1;
        trace!(pass, before = len, after = merged.len(), "summ_peers pass");
        summd = merged;
        if summd.len() == len {
            break;
        }
    }
    summd
}

/* -------------------------------------------------------------------------- */

/**
Subnets of `supernet` found in `list` (redundant ones discarded), with every
gap between them filled by the largest possible aligned networks, so that
the result tiles `supernet` exactly.

Entries which are not strict subnets of `supernet` are ignored. An empty
result is returned if no entry is a strict subnet.
*/
pub(crate) fn fill<N: Network>(supernet: &N, list: &[N]) -> NetList<N> {
    let subs: Vec<N> = list
        .iter()
        .filter(|e| supernet.rel(e) == Some(Ordering::Greater))
        .cloned()
        .collect();
    if subs.is_empty() {
        return NetList::new();
    }
    let mut subs: Vec<N> = discard_subnets(subs);
    subs.sort();

    let mut filled: Vec<N> = Vec::new();
    if subs[0].network() != supernet.network() {
        filled = backfill(&subs[0], supernet.network());
    }

    for (i, sub) in subs.iter().enumerate() {
        filled.extend(fwd_fill(sub, supernet, subs.get(i + 1)));
    }

    debug!(
        supernet = %supernet,
        subnets = subs.len(),
        filled = filled.len(),
        "filled supernet"
    );
    NetList(filled)
}

/// Networks preceding `net` down to (and including) `limit`, in ascending order.
fn backfill<N: Network>(net: &N, limit: N::Addr) -> Vec<N> {
    let mut nets: Vec<N> = Vec::new();
    let mut cur: N = net.clone();

    while let Some(prev) = cur.prev() {
        if prev.network() < limit {
            break;
        }
        trace!(net = %prev, "backfill");
        nets.push(prev.clone());
        cur = prev;
    }
    nets.reverse();
    nets
}

/**
`net` followed by the networks between it and `limit`. Without a limit, the
networks up to the end of `supernet`.
*/
fn fwd_fill<N: Network>(net: &N, supernet: &N, limit: Option<&N>) -> Vec<N> {
    let mut nets: Vec<N> = vec![net.clone()];
    let mut cur: N = net.clone();
    let in_supernet = |n: &N| supernet.rel(n) == Some(Ordering::Greater);

    let Some(limit) = limit else {
        while let Some(next) = cur.next() {
            if !in_supernet(&next) {
                break;
            }
            trace!(net = %next, "fwd_fill");
            nets.push(next.clone());
            cur = next;
        }
        return nets;
    };

    while let Some(mut next) = cur.next_sib() {
        if !in_supernet(&next) || next.network() == limit.network() {
            break;
        }

        if next.rel(limit).is_some() {
            // overlaps the limit, shrink until it no longer does
            while next.rel(limit).is_some() {
                match next.resize(next.prefix_len() + 1) {
                    Some(smaller) => next = smaller,
                    None => break,
                }
            }
        } else {
            // grow as long as the base stays aligned and the limit is not reached
            let mut prefix: u8 = next.prefix_len();
            while prefix - 1 > supernet.prefix_len() {
                prefix -= 1;
                let grown: N = match next.resize(prefix) {
                    Some(grown) if grown.network() == next.network() => grown,
                    _ => break,
                };
                if grown.rel(limit).is_some() {
                    break;
                }
                next = grown;
            }
        }

        trace!(net = %next, "fwd_fill");
        nets.push(next.clone());
        cur = next;
    }
    nets
}

/* -------------------------------------------------------------------------- */

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Ipv6;
    use quickcheck_macros::quickcheck;

    fn v4list(items: &[&str]) -> Ipv4NetList {
        Ipv4NetList::from_strs(items).unwrap()
    }

    fn v6list(items: &[&str]) -> Ipv6NetList {
        Ipv6NetList::from_strs(items).unwrap()
    }

    fn strs<N: Network>(list: &NetList<N>) -> Vec<String> {
        list.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn test_from_strs() {
        let list: Ipv4NetList = v4list(&["10.0.0.0/8", "192.168.1.1/24", "1.2.3.4"]);
        assert_eq!(strs(&list), vec!["10.0.0.0/8", "192.168.1.0/24", "1.2.3.4/32"]);

        let err = Ipv4NetList::from_strs(&["10.0.0.0/8", "1.2.3/24"]).unwrap_err();
        assert!(matches!(err, NetaddrError::ListItem { index: 1, .. }));

        let err = Ipv6NetList::from_strs(&["::/0", "fe80::/64", "fe80:::1"]).unwrap_err();
        assert!(matches!(err, NetaddrError::ListItem { index: 2, .. }));
    }

    #[test]
    fn test_display() {
        let list: Ipv4NetList = v4list(&["10.0.0.0/8", "192.168.0.0/16"]);
        assert_eq!(list.to_string(), "[10.0.0.0/8 192.168.0.0/16]");
        assert_eq!(Ipv6NetList::new().to_string(), "[]");
    }

    #[test]
    fn test_sort_v4() {
        let mut list: Ipv4NetList =
            v4list(&["192.168.1.0/24", "10.0.0.0/8", "10.0.0.0/24", "1.1.1.1", "10.0.0.0/8"]);
        list.sort();
        assert_eq!(
            strs(&list),
            vec!["1.1.1.1/32", "10.0.0.0/24", "10.0.0.0/8", "10.0.0.0/8", "192.168.1.0/24"]
        );
    }

    #[test]
    fn test_sort_v6() {
        let mut list: Ipv6NetList = v6list(&["1::/64", "2::/64", "1::/16", "::", "::1", "1::/16"]);
        list.sort();
        assert_eq!(
            strs(&list),
            vec!["::/128", "::1/128", "1::/64", "1::/16", "1::/16", "2::/64"]
        );
    }

    #[test]
    fn test_discard_subnets() {
        let list: Vec<Ipv4Net> =
            v4list(&["10.0.0.0/24", "10.0.0.0/26", "1.0.0.0/8", "10.0.0.0/8", "1.1.1.0/24", "10.0.0.0/24"])
                .into_inner();
        let mut kept: Vec<Ipv4Net> = discard_subnets(list);
        kept.sort();
        let kept: Vec<String> = kept.iter().map(|n| n.to_string()).collect();
        assert_eq!(kept, vec!["1.0.0.0/8", "10.0.0.0/8"]);

        assert!(discard_subnets(Vec::<Ipv4Net>::new()).is_empty());
    }

    #[rustfmt::skip]
    #[test]
    fn test_summ_v4() {
        let tests: Vec<(Vec<&str>, Vec<&str>)> = vec![
            (
                vec!["10.0.0.0/29", "10.0.0.8/30", "10.0.0.12/30", "10.0.0.16/28",
                     "10.0.0.32/27", "10.0.0.64/26", "10.0.0.128/25"],
                vec!["10.0.0.0/24"],
            ),
            (
                vec!["10.0.0.0/24", "1.0.0.0/8", "3.4.5.6/32", "3.4.5.8/31", "0.0.0.0/0"],
                vec!["0.0.0.0/0"],
            ),
            (
                vec!["10.0.1.0/25", "10.0.1.0/26", "10.0.0.16/28", "10.0.0.32/27",
                     "10.0.0.128/26", "10.0.0.192/26", "10.0.0.32/27"],
                vec!["10.0.0.16/28", "10.0.0.32/27", "10.0.0.128/25", "10.0.1.0/25"],
            ),
            (
                vec!["10.0.0.0/24", "10.0.0.64/26", "1.1.1.0/24", "1.0.0.0/8",
                     "3.4.5.6/32", "3.4.5.8/31", "2.2.2.224/27"],
                vec!["1.0.0.0/8", "2.2.2.224/27", "3.4.5.6/32", "3.4.5.8/31", "10.0.0.0/24"],
            ),
            (
                vec!["10.0.0.0/30", "10.0.0.4/30"],
                vec!["10.0.0.0/29"],
            ),
            (vec!["10.0.0.1"],  vec!["10.0.0.1/32"]),
            (vec![],            vec![]),
        ];

        for (input, expected) in tests {
            let list: Ipv4NetList = v4list(&input);
            assert_eq!(strs(&list.summ()), expected, "Failed: {list}");
        }
    }

    #[rustfmt::skip]
    #[test]
    fn test_summ_v6() {
        let tests: Vec<(Vec<&str>, Vec<&str>)> = vec![
            (
                vec!["ff00::/13", "ff08::/14", "ff0c::/14", "ff10::/12",
                     "ff20::/11", "ff40::/10", "ff80::/9"],
                vec!["ff00::/8"],
            ),
            (
                vec!["2::/32", "::1", "fec0::/16", "1::/16", "::/0"],
                vec!["::/0"],
            ),
            (
                vec!["ff80::/9", "ff10::/12", "ff80::/10", "ff20::/12",
                     "fff0::/16", "fff1::/16", "ff80::/10"],
                vec!["ff10::/12", "ff20::/12", "ff80::/9"],
            ),
            (
                // carries over the /64 boundary
                vec!["1::/65", "1:0:0:0:8000::/65", "1:0:0:1::/64"],
                vec!["1::/63"],
            ),
        ];

        for (input, expected) in tests {
            let list: Ipv6NetList = v6list(&input);
            assert_eq!(strs(&list.summ()), expected, "Failed: {list}");
        }
    }

    #[rustfmt::skip]
    #[test]
    fn test_fill_v4() {
        let tests: Vec<(&str, Vec<&str>, Vec<&str>)> = vec![
            (
                "10.0.0.0/24",
                vec!["10.0.0.0/24", "10.0.0.0/8", "10.0.0.8/30", "10.0.0.16/30", "10.0.0.16/28"],
                vec!["10.0.0.0/29", "10.0.0.8/30", "10.0.0.12/30", "10.0.0.16/28",
                     "10.0.0.32/27", "10.0.0.64/26", "10.0.0.128/25"],
            ),
            (
                "128.0.0.0/1",
                vec!["192.0.0.0/2"],
                vec!["128.0.0.0/2", "192.0.0.0/2"],
            ),
            (
                "1.0.0.0/25",
                vec!["1.0.0.0/30", "1.0.0.64/26"],
                vec!["1.0.0.0/30", "1.0.0.4/30", "1.0.0.8/29", "1.0.0.16/28",
                     "1.0.0.32/27", "1.0.0.64/26"],
            ),
            (
                "10.0.0.0/24",
                vec!["10.0.0.0/26"],
                vec!["10.0.0.0/26", "10.0.0.64/26", "10.0.0.128/25"],
            ),
            (
                "0.0.0.0/0",
                vec!["255.255.255.255"],
                vec!["0.0.0.0/1", "128.0.0.0/2", "192.0.0.0/3", "224.0.0.0/4",
                     "240.0.0.0/5", "248.0.0.0/6", "252.0.0.0/7", "254.0.0.0/8",
                     "255.0.0.0/9", "255.128.0.0/10", "255.192.0.0/11", "255.224.0.0/12",
                     "255.240.0.0/13", "255.248.0.0/14", "255.252.0.0/15", "255.254.0.0/16",
                     "255.255.0.0/17", "255.255.128.0/18", "255.255.192.0/19", "255.255.224.0/20",
                     "255.255.240.0/21", "255.255.248.0/22", "255.255.252.0/23", "255.255.254.0/24",
                     "255.255.255.0/25", "255.255.255.128/26", "255.255.255.192/27", "255.255.255.224/28",
                     "255.255.255.240/29", "255.255.255.248/30", "255.255.255.252/31",
                     "255.255.255.254/32", "255.255.255.255/32"],
            ),
            ("10.0.0.0/24", vec!["192.168.0.0/24", "10.0.0.0/24"], vec![]),
            ("10.0.0.0/24", vec![], vec![]),
        ];

        for (supernet, subs, expected) in tests {
            let net: Ipv4Net = supernet.parse().unwrap();
            let filled: Ipv4NetList = net.fill(&v4list(&subs));
            assert_eq!(strs(&filled), expected, "Failed: {supernet}.fill({subs:?})");
        }
    }

    #[rustfmt::skip]
    #[test]
    fn test_fill_v6() {
        let tests: Vec<(&str, Vec<&str>, Vec<&str>)> = vec![
            (
                "ff00::/8",
                vec!["ff08::/14", "fe00::/7", "ff20::/11", "ff20::/12"],
                vec!["ff00::/13", "ff08::/14", "ff0c::/14", "ff10::/12",
                     "ff20::/11", "ff40::/10", "ff80::/9"],
            ),
            (
                "ff00::/121",
                vec!["ff00::/126", "ff00::/120"],
                vec!["ff00::/126", "ff00::4/126", "ff00::8/125", "ff00::10/124",
                     "ff00::20/123", "ff00::40/122"],
            ),
            (
                // gaps on both sides of the /64 boundary
                "1::/62",
                vec!["1:0:0:1::/65"],
                vec!["1::/64", "1:0:0:1::/65", "1:0:0:1:8000::/65", "1:0:0:2::/63"],
            ),
        ];

        for (supernet, subs, expected) in tests {
            let net: Ipv6Net = supernet.parse().unwrap();
            let filled: Ipv6NetList = net.fill(&v6list(&subs));
            assert_eq!(strs(&filled), expected, "Failed: {supernet}.fill({subs:?})");
        }
    }

    /* ------------------------------ properties ---------------------------- */

    /// Random network with a prefix of at least `min_prefix`.
    fn arb_v4(addr: u32, prefix: u8, min_prefix: u8) -> Ipv4Net {
        let prefix: u8 = min_prefix + prefix % (33 - min_prefix);
        Ipv4Net::new(addr.into(), Some(crate::Mask32::new(prefix).unwrap()))
    }

    /// Number of addresses covered by `nets`, which must be pairwise unrelated.
    fn coverage(nets: &[Ipv4Net]) -> u64 {
        nets.iter().map(|n| 1u64 << (32 - n.prefix_len())).sum()
    }

    fn covers(nets: &[Ipv4Net], ip: u32) -> bool {
        nets.iter().any(|n| n.contains(&ip.into()))
    }

    fn pairwise_unrelated<N: Network>(nets: &[N]) -> bool {
        nets.iter()
            .enumerate()
            .all(|(i, a)| nets[i + 1..].iter().all(|b| a.rel(b).is_none()))
    }

    #[quickcheck]
    fn prop_summ_preserves_coverage(input: Vec<(u32, u8)>, probes: Vec<u32>) -> bool {
        // keep the networks small enough that coverage can be reasoned about
        let nets: Vec<Ipv4Net> = input.iter().map(|&(a, p)| arb_v4(a, p, 8)).collect();
        let summd: Ipv4NetList = Ipv4NetList::from(nets.clone()).summ();

        pairwise_unrelated(&summd)
            && probes.iter().all(|&ip| covers(&nets, ip) == covers(&summd, ip))
            && nets.iter().all(|n| covers(&summd, n.network().addr()))
            && summd.summ() == summd
    }

    #[quickcheck]
    fn prop_summ_of_split_network(addr: u32, prefix: u8, extra: u8) -> bool {
        // every subnet of a network at a longer prefix must summarize back to it
        let net: Ipv4Net = arb_v4(addr, prefix, 16);
        let sub_prefix: u8 = (net.prefix_len() + extra % 5).min(32);
        let count: u32 = net.subnet_count(sub_prefix);
        let subs: Ipv4NetList = (0..count)
            .rev()
            .filter_map(|i| net.nth_subnet(sub_prefix, i))
            .collect();
        let summd: Vec<Ipv4Net> = subs.summ().into_inner();

        if count == 0 {
            return subs.is_empty();
        }
        summd == vec![net]
    }

    #[quickcheck]
    fn prop_fill_tiles_supernet(addr: u32, prefix: u8, subs: Vec<(u32, u8)>) -> bool {
        let supernet: Ipv4Net = arb_v4(addr, prefix % 32, 0);
        let base: u32 = supernet.network().addr();
        let hostmask: u32 = supernet.netmask().hostmask();
        let subs: Vec<Ipv4Net> = subs
            .iter()
            .take(8)
            .map(|&(a, p)| arb_v4(base | (a & hostmask), p, supernet.prefix_len() + 1))
            .filter(|s| supernet.rel(s) == Some(Ordering::Greater))
            .collect();
        let filled: Ipv4NetList = supernet.fill(&subs);

        if subs.is_empty() {
            return filled.is_empty();
        }
        let mut sorted: Vec<Ipv4Net> = filled.to_vec();
        sorted.sort();

        pairwise_unrelated(&filled)
            && sorted == filled.to_vec()
            && coverage(&filled) == 1u64 << (32 - supernet.prefix_len())
            && filled.iter().all(|n| supernet.rel(n) == Some(Ordering::Greater))
            && filled.summ().into_inner() == vec![supernet]
    }

    /// Random network with a prefix within `min_prefix..=max_prefix`.
    fn arb_v6(addr: u128, prefix: u8, min_prefix: u8, max_prefix: u8) -> Ipv6Net {
        let prefix: u8 = min_prefix + prefix % (max_prefix - min_prefix + 1);
        Ipv6Net::new(addr.into(), Some(crate::Mask128::new(prefix).unwrap()))
    }

    /// All v6 summ inputs live inside this /56, so they overlap and touch often.
    const V6_BLOCK: u64 = 0x2001_0db8_0000_0000;

    fn v6_addr(low: u8, host_id: u64) -> u128 {
        ((V6_BLOCK | low as u64) as u128) << 64 | host_id as u128
    }

    fn covers_v6(nets: &[Ipv6Net], ip: u128) -> bool {
        nets.iter().any(|n| n.contains(&ip.into()))
    }

    fn last_addr(net: &Ipv6Net) -> u128 {
        net.network().as_u128() | !net.netmask().mask()
    }

    #[quickcheck]
    fn prop_summ_preserves_coverage_v6(input: Vec<(u8, u64, u8)>, probes: Vec<(u8, u64)>) -> bool {
        let nets: Vec<Ipv6Net> = input
            .iter()
            .map(|&(low, host, p)| arb_v6(v6_addr(low, host), p, 56, 72))
            .collect();
        let summd: Ipv6NetList = Ipv6NetList::from(nets.clone()).summ();

        pairwise_unrelated(&summd)
            && probes
                .iter()
                .map(|&(low, host)| v6_addr(low, host))
                .all(|ip| covers_v6(&nets, ip) == covers_v6(&summd, ip))
            && nets.iter().all(|n| {
                covers_v6(&summd, n.network().as_u128()) && covers_v6(&summd, last_addr(n))
            })
            && summd.summ() == summd
    }

    #[quickcheck]
    fn prop_fill_tiles_supernet_v6(addr: (u64, u64), prefix: u8, subs: Vec<(u64, u64, u8)>) -> bool {
        // supernets straddle the /64 boundary
        let supernet: Ipv6Net = arb_v6(Ipv6::new(addr.0, addr.1).as_u128(), prefix, 56, 72);
        let base: u128 = supernet.network().as_u128();
        let hostmask: u128 = !supernet.netmask().mask();
        let subs: Vec<Ipv6Net> = subs
            .iter()
            .take(8)
            .map(|&(n, h, p)| {
                let addr: u128 = base | (Ipv6::new(n, h).as_u128() & hostmask);
                arb_v6(addr, p, supernet.prefix_len() + 1, 128)
            })
            .filter(|s| supernet.rel(s) == Some(Ordering::Greater))
            .collect();
        let filled: Ipv6NetList = supernet.fill(&subs);

        if subs.is_empty() {
            return filled.is_empty();
        }
        let mut sorted: Vec<Ipv6Net> = filled.to_vec();
        sorted.sort();
        let coverage: u128 = filled.iter().map(|n| 1u128 << (128 - n.prefix_len())).sum();

        pairwise_unrelated(&filled)
            && sorted == filled.to_vec()
            && coverage == 1u128 << (128 - supernet.prefix_len())
            && filled.iter().all(|n| supernet.rel(n) == Some(Ordering::Greater))
            && filled.summ().into_inner() == vec![supernet]
    }
}
