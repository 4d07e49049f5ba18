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

//! Human readable output of a computed flow.

use crate::network::Network;

use crate::num::traits::NumAssign;

use std::fmt;
use std::io::{self, Write};
use std::time::Duration;

/// The result of a max flow computation.
///
/// # Example
///
/// ```
/// use preflow::report::Report;
/// use std::time::Duration;
///
/// let r = Report { value: 23, elapsed: Some(Duration::from_millis(1500)) };
/// assert_eq!(r.to_string(), "Max Flow: 23 (1.500000 s)");
/// assert_eq!(Report { value: 0, elapsed: None }.to_string(), "Max Flow: 0");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Report<F> {
    /// The flow value.
    pub value: F,
    /// The time the computation took, if measured.
    pub elapsed: Option<Duration>,
}

impl<F> fmt::Display for Report<F>
where
    F: fmt::Display,
{
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        write!(fmt, "Max Flow: {}", self.value)?;
        if let Some(t) = self.elapsed {
            write!(fmt, " ({:.6} s)", t.as_secs_f64())?;
        }
        Ok(())
    }
}

/// Write the flow of every edge with non-zero flow.
///
/// Each edge is written on its own line as `u -> v : flow / cap` with
/// 1-based node numbers, in the order the edges have been added. Returns
/// the number of lines written.
pub fn write_flow<W, F>(mut w: W, net: &Network<F>) -> io::Result<usize>
where
    W: Write,
    F: NumAssign + Ord + Copy + fmt::Display,
{
    let mut cnt = 0;
    for (u, a) in net.edges() {
        if a.flow().is_zero() {
            continue;
        }
        writeln!(w, "{} -> {} : {} / {}", u + 1, a.to() + 1, a.flow(), a.cap())?;
        cnt += 1;
    }
    Ok(cnt)
}
