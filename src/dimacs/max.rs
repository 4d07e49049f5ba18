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

//! This module implements a read function for the DIMACS max flow
//! format. A DIMACS file looks as follows.
//!
//! 1. empty lines are allowed and ignored
//! 2. a line starting with `c` is a comment line and is ignored
//! 3. the first non-comment line must have the form `p max <n> <m>`,
//!    where `<n>` is the number of nodes and `<m>` the number of arcs.
//! 4. node lines `n <node> <type>` where `<node>` is the node number
//!    between `1..n` and `<type>` is either `s` (if this is the source
//!    node) or `t` (if this is the sink node).
//! 5. arc lines `a <u> <v> <c>` denoting the source and sink nodes of an
//!    arc as well as the arcs capacity `<c>` (an integer >= 0).
//!
//! The reader is lenient. Only a missing or unreadable problem line is an
//! error. Every other line that cannot be understood (including node and
//! arc lines before the problem line) is skipped with a warning. The
//! number of arc lines is not checked against `<m>`, loops are dropped and
//! parallel arcs are kept. A later node line for the same role replaces an
//! earlier one. Bytes that are not valid UTF-8 never form a valid token.
//!
//! Another problem line starts a new network: all arcs read so far are
//! discarded, but source and sink given so far are kept (and must be
//! valid nodes of the new network when solving).
//!
//! # Example
//!
//! ```
//! use preflow::dimacs::max::{read, Instance};
//!
//! let mut instance: Instance = read("p max 3 2\nn 1 s\nn 3 t\na 1 2 4\na 2 3 3\n".as_bytes()).unwrap();
//! assert_eq!(instance.src, Some(0));
//! assert_eq!(instance.snk, Some(2));
//! assert_eq!(instance.solve(), Ok(3));
//! ```

use super::{DimacsReader, Error, Result, Tokens};
use crate::maxflow::{self, pushrelabel};
use crate::network::Network;

use crate::num::traits::NumAssign;

use log::{debug, warn};
use std::fmt::Display;
use std::io::{Read, Write};
use std::path::Path;
use std::str::FromStr;

/// A max flow instance.
#[derive(Clone, Debug)]
pub struct Instance<F = i64> {
    /// The network.
    pub network: Network<F>,
    /// The source node, if given.
    pub src: Option<usize>,
    /// The sink node, if given.
    pub snk: Option<usize>,
}

impl<F> Instance<F>
where
    F: NumAssign + Ord + Copy,
{
    /// Compute the maximum flow from source to sink.
    ///
    /// Fails if the instance has no source or no sink.
    pub fn solve(&mut self) -> maxflow::Result<F> {
        let src = self.src.ok_or(maxflow::Error::MissingTerminal("source"))?;
        let snk = self.snk.ok_or(maxflow::Error::MissingTerminal("sink"))?;
        pushrelabel(&mut self.network, src, snk)
    }
}

pub fn read<R: Read, F>(r: R) -> Result<Instance<F>>
where
    F: NumAssign + Ord + Copy + FromStr,
    F::Err: Display,
{
    let mut reader = DimacsReader::new(r);
    let mut network: Option<Network<F>> = None;
    let mut src = None;
    let mut snk = None;

    while let Some(mut toks) = reader.read_line()? {
        let line = toks.line;
        let descriptor = match toks.next() {
            Some(d) => d,
            None => continue,
        };

        if descriptor == "p" {
            if network.is_some() {
                warn!("Line {}: another problem line, previous arcs discarded", line);
            }
            let nnodes = read_problem(&mut toks)?;
            debug!("Problem with {} nodes", nnodes);
            network = Some(Network::new(nnodes));
            continue;
        }

        let net = match network.as_mut() {
            Some(net) => net,
            None => {
                warn!("Line {}: '{}' line before problem line ignored", line, descriptor);
                continue;
            }
        };

        let n = net.num_nodes();
        let res = match descriptor {
            "n" => read_node(&mut toks, n).map(|(u, is_src)| {
                if is_src {
                    src = Some(u);
                } else {
                    snk = Some(u);
                }
            }),
            "a" => read_arc(&mut toks, n).map(|(u, v, cap)| {
                if net.add_edge(u, v, cap).is_none() {
                    debug!("Line {}: loop at node {} ignored", line, u + 1);
                }
            }),
            _ => Err(Error::Format {
                line,
                msg: format!("unknown line descriptor '{}'", descriptor),
            }),
        };

        if let Err(err) = res {
            warn!("{} (line ignored)", err);
        }
    }

    let network = network.ok_or(Error::MissingProblemLine)?;
    Ok(Instance { network, src, snk })
}

/// Read the number of nodes from a problem line.
///
/// The problem type and the number of arcs are not enforced.
fn read_problem(toks: &mut Tokens) -> Result<usize> {
    let _kind = toks.str()?;
    toks.number()
}

/// Read a node line, returns the node and whether it is the source.
fn read_node(toks: &mut Tokens, n: usize) -> Result<(usize, bool)> {
    let u = toks.node(n)?;
    match toks.str()? {
        "s" => Ok((u, true)),
        "t" => Ok((u, false)),
        what => Err(Error::Format {
            line: toks.line,
            msg: format!("invalid node type, must be 's' or 't', got: {}", what),
        }),
    }
}

/// Read an arc line.
fn read_arc<F>(toks: &mut Tokens, n: usize) -> Result<(usize, usize, F)>
where
    F: NumAssign + Ord + Copy + FromStr,
    F::Err: Display,
{
    let u = toks.node(n)?;
    let v = toks.node(n)?;
    let cap: F = toks.number()?;
    if cap < F::zero() {
        return Err(Error::Format {
            line: toks.line,
            msg: "negative capacity".to_string(),
        });
    }
    Ok((u, v, cap))
}

pub fn read_from_file<P, F>(filename: P) -> Result<Instance<F>>
where
    P: AsRef<Path>,
    F: NumAssign + Ord + Copy + FromStr,
    F::Err: Display,
{
    read(std::fs::File::open(filename)?)
}

/// Write a max flow instance.
///
/// Node lines are only written for the terminals that are set.
pub fn write<W, F>(mut w: W, instance: &Instance<F>) -> std::io::Result<()>
where
    W: Write,
    F: NumAssign + Ord + Copy + Display,
{
    let g = &instance.network;
    writeln!(w, "p max {} {}", g.num_nodes(), g.num_edges())?;
    if let Some(s) = instance.src {
        writeln!(w, "n {} s", s + 1)?;
    }
    if let Some(t) = instance.snk {
        writeln!(w, "n {} t", t + 1)?;
    }
    for (u, a) in g.edges() {
        writeln!(w, "a {} {} {}", u + 1, a.to() + 1, a.cap())?;
    }

    Ok(())
}

/// Write a max flow instance to a named file.
pub fn write_to_file<P, F>(filename: P, instance: &Instance<F>) -> std::io::Result<()>
where
    P: AsRef<Path>,
    F: NumAssign + Ord + Copy + Display,
{
    write(std::io::BufWriter::new(std::fs::File::create(filename)?), instance)
}

#[cfg(test)]
mod tests {
    use crate::dimacs::{self, max::Instance};
    use crate::maxflow::Error;
    use crate::Network;
    use std::fs;
    use std::io::{self, Cursor};

    #[test]
    fn parse_file_test() {
        let file = "c this is a test file

p max 6 9
n 5 s
n 6 t

c there might be empty lines

a 5 1 10
a 5 2 10
a 1 2 2
a 1 3 4
a 1 4 8
a 2 4 9
a 3 6 10
a 4 3 6
a 4 6 10

c end of the file
";
        let mut instance: Instance = dimacs::max::read(io::Cursor::new(file)).unwrap();

        assert_eq!(instance.network.num_nodes(), 6);
        assert_eq!(instance.network.num_edges(), 9);
        assert_eq!(instance.src, Some(4));
        assert_eq!(instance.snk, Some(5));

        let mut arcs: Vec<_> = instance
            .network
            .edges()
            .map(|(u, a)| (u + 1, a.to() + 1, a.cap()))
            .collect();

        arcs.sort();

        assert_eq!(
            arcs,
            vec![
                (1, 2, 2),
                (1, 3, 4),
                (1, 4, 8),
                (2, 4, 9),
                (3, 6, 10),
                (4, 3, 6),
                (4, 6, 10),
                (5, 1, 10),
                (5, 2, 10),
            ]
        );

        assert_eq!(instance.solve(), Ok(19));
    }

    #[test]
    fn skip_malformed_lines() {
        let file = "a 1 2 100
n 1 s
p max 3 5
n 1 s
n 2 x
n 9 t
n 3 t
a 1 2 abc
a 1 2
a 0 2 4
a 1 2 -3
x 1 2 3
a 2 2 5
a 1 2 4
a 2 3 7
";
        let mut instance: Instance = dimacs::max::read(io::Cursor::new(file)).unwrap();
        assert_eq!(instance.network.num_nodes(), 3);
        assert_eq!(instance.network.num_edges(), 2);
        assert_eq!(instance.src, Some(0));
        assert_eq!(instance.snk, Some(2));
        assert_eq!(instance.solve(), Ok(4));
    }

    #[test]
    fn missing_problem_line() {
        let res = dimacs::max::read::<_, i64>(io::Cursor::new("c nothing\na 1 2 3\n"));
        assert!(matches!(res, Err(dimacs::Error::MissingProblemLine)));

        let res = dimacs::max::read::<_, i64>(io::Cursor::new("p max many\n"));
        assert!(matches!(res, Err(dimacs::Error::Format { line: 1, .. })));
    }

    #[test]
    fn missing_terminal() {
        let mut instance: Instance = dimacs::max::read(io::Cursor::new("p max 2 1\nn 1 s\na 1 2 3\n")).unwrap();
        assert_eq!(instance.solve(), Err(Error::MissingTerminal("sink")));

        let mut instance: Instance = dimacs::max::read(io::Cursor::new("p max 2 1\na 1 2 3\n")).unwrap();
        assert_eq!(instance.solve(), Err(Error::MissingTerminal("source")));
    }

    #[test]
    fn write_test_file() {
        let network = Network::<i64>::new_with(4, |g| {
            g.add_edge(0, 1, 4);
            g.add_edge(0, 2, 2);
            g.add_edge(1, 2, 2);
            g.add_edge(1, 3, 3);
            g.add_edge(2, 3, 5);
        });

        let mut buf = Cursor::new(Vec::new());
        dimacs::max::write(
            &mut buf,
            &Instance {
                network,
                src: Some(0),
                snk: Some(3),
            },
        )
        .unwrap();

        assert_eq!(
            String::from_utf8(buf.into_inner()).unwrap(),
            "p max 4 5
n 1 s
n 4 t
a 1 2 4
a 1 3 2
a 2 3 2
a 2 4 3
a 3 4 5
"
        );
    }

    #[test]
    fn file_roundtrip() {
        let instance = Instance {
            network: Network::<i64>::new_with(3, |g| {
                g.add_edge(0, 1, 7);
                g.add_edge(1, 2, 3);
                g.add_edge(0, 2, 1);
            }),
            src: Some(0),
            snk: Some(2),
        };

        let path = std::env::temp_dir().join(format!("preflow-max-{}.dimacs", std::process::id()));
        dimacs::max::write_to_file(&path, &instance).unwrap();
        let read: dimacs::Result<Instance> = dimacs::max::read_from_file(&path);
        fs::remove_file(&path).unwrap();

        let mut again = read.unwrap();
        assert_eq!(again.src, Some(0));
        assert_eq!(again.snk, Some(2));
        assert_eq!(
            again.network.edges().map(|(u, a)| (u, a.to(), a.cap())).collect::<Vec<_>>(),
            vec![(0, 1, 7), (1, 2, 3), (0, 2, 1)]
        );
        assert_eq!(again.solve(), Ok(4));

        let missing = dimacs::max::read_from_file::<_, i64>(&path);
        assert!(matches!(missing, Err(dimacs::Error::Io(_))));
    }

    #[test]
    fn skip_invalid_utf8() {
        let file: &[u8] = b"p max 2 1\nn 1 s\nn 2 t\nc \xff\xfe\na \xff 2 3\na 1 2 3\n";
        let mut instance: Instance = dimacs::max::read(file).unwrap();
        assert_eq!(instance.network.num_edges(), 1);
        assert_eq!(instance.solve(), Ok(3));
    }

    #[test]
    fn repeated_problem_line() {
        let file = "p max 3 1
n 1 s
n 3 t
a 1 2 5
p max 4 2
a 1 3 4
a 3 4 2
";
        let mut instance: Instance = dimacs::max::read(io::Cursor::new(file)).unwrap();
        assert_eq!(instance.network.num_nodes(), 4);
        assert_eq!(instance.network.num_edges(), 2);
        assert_eq!(instance.src, Some(0));
        assert_eq!(instance.snk, Some(2));
        assert_eq!(instance.solve(), Ok(4));
    }
}
