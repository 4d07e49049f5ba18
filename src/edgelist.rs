/*
 * Copyright (c) 2022 Frank Fischer <frank-fischer@shadow-soft.de>
 *
 * This program is free software: you can redistribute it and/or
 * modify it under the terms of the GNU General Public License as
 * published by the Free Software Foundation, either version 3 of the
 * License, or (at your option) any later version.
 *
 * This program is distributed in the hope that it will be useful, but
 * WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU
 * General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with this program.  If not, see  <http://www.gnu.org/licenses/>
 */

//! Reading networks from plain edge lists.
//!
//! Many public graph collections are distributed as text files with one
//! edge per line: `<u> <v>` or `<u> <v> <capacity>`. Node ids are 0-based,
//! the number of nodes is one more than the largest id. Edges without a
//! capacity get capacity 1. Lines starting with `#` or `%` are comments,
//! columns may be separated by whitespace or commas, further columns are
//! ignored and lines that cannot be parsed are skipped. Bytes that are not
//! valid UTF-8 are replaced before parsing, so such a line is skipped as
//! well. Node ids must be smaller than a maximal number of nodes
//! ([`DEFAULT_MAX_NODES`] for [`read`]); edges with larger ids are skipped.
//!
//! # Example
//!
//! ```
//! use preflow::edgelist;
//! use preflow::maxflow::pushrelabel;
//!
//! let mut net = edgelist::read::<_, i64>("# a small graph\n0 1 5\n1 2\n0 2 2\n".as_bytes()).unwrap();
//! assert_eq!(net.num_nodes(), 3);
//! assert_eq!(pushrelabel(&mut net, 0, 2), Ok(3));
//! ```

use crate::network::Network;

use crate::num::traits::NumAssign;

use log::warn;
use std::io::{self, BufRead, BufReader, Read};
use std::path::Path;
use std::str::FromStr;

use thiserror::Error;

/// Error when reading an edge list.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

/// The source node of the mock network.
pub const MOCK_SOURCE: usize = 0;

/// The sink node of the mock network.
pub const MOCK_SINK: usize = 5;

/// The default bound on the number of nodes of an edge list.
pub const DEFAULT_MAX_NODES: usize = 1 << 24;

/// Read an edge list with at most [`DEFAULT_MAX_NODES`] nodes.
pub fn read<R: Read, F>(r: R) -> Result<Network<F>>
where
    F: NumAssign + Ord + Copy + FromStr,
{
    read_with_max_nodes(r, DEFAULT_MAX_NODES)
}

/// Read an edge list whose node ids are all smaller than `max_nodes`.
pub fn read_with_max_nodes<R: Read, F>(r: R, max_nodes: usize) -> Result<Network<F>>
where
    F: NumAssign + Ord + Copy + FromStr,
{
    let mut io = BufReader::new(r);
    let mut buf = Vec::new();
    let mut line_number = 0;
    let mut n = 0;
    let mut edges = vec![];

    loop {
        buf.clear();
        if io.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        line_number += 1;

        let text = String::from_utf8_lossy(&buf);
        let line = text.trim();
        if line.is_empty() || line.starts_with('#') || line.starts_with('%') {
            continue;
        }
        match parse_edge::<F>(line, max_nodes) {
            Some((u, v, cap, m)) => {
                n = n.max(m);
                edges.push((u, v, cap));
            }
            None => warn!("Line {}: cannot parse edge '{}', ignored", line_number, line),
        }
    }

    Ok(Network::new_with(n, |net| {
        for (u, v, cap) in edges {
            net.add_edge(u, v, cap);
        }
    }))
}

/// Parse an edge, returns its nodes, its capacity and the number of
/// nodes it requires.
fn parse_edge<F>(line: &str, max_nodes: usize) -> Option<(usize, usize, F, usize)>
where
    F: NumAssign + Ord + Copy + FromStr,
{
    let mut toks = line.split(|c: char| c.is_whitespace() || c == ',').filter(|t| !t.is_empty());
    let u: usize = toks.next()?.parse().ok()?;
    let v: usize = toks.next()?.parse().ok()?;
    let m = u.max(v).checked_add(1)?;
    if m > max_nodes {
        return None;
    }
    let cap = match toks.next() {
        Some(tok) => tok.parse().ok()?,
        None => F::one(),
    };
    if cap < F::zero() {
        return None;
    }
    Some((u, v, cap, m))
}

/// Read an edge list from a named file.
pub fn read_from_file<P, F>(filename: P) -> Result<Network<F>>
where
    P: AsRef<Path>,
    F: NumAssign + Ord + Copy + FromStr,
{
    read(std::fs::File::open(filename)?)
}

/// Return the mock network used when a dataset is unavailable.
///
/// It has 6 nodes and a maximum flow of 23 from [`MOCK_SOURCE`] to
/// [`MOCK_SINK`].
pub fn mock<F>() -> Network<F>
where
    F: NumAssign + Ord + Copy + From<u8>,
{
    Network::new_with(6, |net| {
        for &(u, v, cap) in &[
            (0, 1, 16),
            (0, 2, 13),
            (1, 2, 10),
            (2, 1, 4),
            (1, 3, 12),
            (3, 2, 9),
            (2, 4, 14),
            (4, 3, 7),
            (3, 5, 20),
            (4, 5, 4),
        ] {
            net.add_edge(u, v, F::from(cap));
        }
    })
}

/// Read an edge list from a named file or fall back to the mock network.
///
/// The returned flag is `true` if the file could not be read and the
/// mock network has been returned instead.
pub fn load_or_mock<P, F>(filename: P) -> (Network<F>, bool)
where
    P: AsRef<Path>,
    F: NumAssign + Ord + Copy + FromStr + From<u8>,
{
    match read_from_file(filename.as_ref()) {
        Ok(net) => (net, false),
        Err(err) => {
            warn!(
                "Cannot read dataset {}: {}, using mock network",
                filename.as_ref().display(),
                err
            );
            (mock(), true)
        }
    }
}
