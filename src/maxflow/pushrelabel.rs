// Copyright (c) 2022 Frank Fischer <frank-fischer@shadow-soft.de>
//
// This program is free software: you can redistribute it and/or
// modify it under the terms of the GNU General Public License as
// published by the Free Software Foundation, either version 3 of the
// License, or (at your option) any later version.
//
// This program is distributed in the hope that it will be useful, but
// WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU
// General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see  <http://www.gnu.org/licenses/>
//

//! This module implements a FIFO push relabel algorithm for solving max
//! flow problems.
//!
//! Active nodes are kept in a FIFO queue. Each node remembers its
//! current arc, so consecutive discharges of a node continue scanning
//! its adjacency list where the last one stopped. Together this gives
//! a running time of `O(n^3)`.
//!
//! This implementation uses the gap heuristic: if the last node of some
//! height `k < n` is about to be relabelled, all nodes of height at least
//! `k` are cut off from the sink and are lifted to height `n + 1` at
//! once. From there they return their excess to the source.
//!
//! # Example
//!
//! ```
//! use preflow::maxflow::PushRelabel;
//! use preflow::Network;
//!
//! //      a---2-->b
//! //     ^|\      ^\
//! //    / | \     | 4
//! //   5  |  \    |  \
//! //  /   |   |   |   v
//! // s    1   1   2    t
//! //  \   |   |   |   ^
//! //   5  |    \  |  /
//! //    \ |     \ | 5
//! //     vv      v|/
//! //      c---2-->d
//! let (s, a, b, c, d, t) = (0, 1, 2, 3, 4, 5);
//! let mut net = Network::new_with(6, |net| {
//!     net.add_edge(s, a, 5);
//!     net.add_edge(s, c, 5);
//!     net.add_edge(a, b, 2);
//!     net.add_edge(a, c, 1);
//!     net.add_edge(a, d, 1);
//!     net.add_edge(c, d, 2);
//!     net.add_edge(d, b, 2);
//!     net.add_edge(b, t, 4);
//!     net.add_edge(d, t, 5);
//! });
//!
//! let mut pr = PushRelabel::new(&mut net);
//! assert_eq!(pr.solve(s, t), Ok(5));
//! assert_eq!(pr.mincut(), vec![s, a, c]);
//! assert!(pr.is_valid_labelling());
//!
//! assert!(net.edges().all(|(_, e)| e.flow() >= 0 && e.flow() <= e.cap()));
//! assert!((0..6)
//!     .filter(|&u| u != s && u != t)
//!     .all(|u| net.net_outflow(u) == 0));
//! ```

use super::{Error, Result};
use crate::collections::{ActiveQueue, ItemQueue};
use crate::network::Network;

use log::{debug, trace};
use std::cmp::min;
use std::collections::VecDeque;

use crate::num::traits::NumAssign;

/// The push-relabel algorithm.
///
/// This struct contains all algorithmic working data. The network is
/// borrowed mutably for the lifetime of the algorithm, its arcs hold the
/// flow after a call to [`PushRelabel::solve`].
pub struct PushRelabel<'a, F> {
    /// The network the flow problem is solved on.
    net: &'a mut Network<F>,

    /// Data associated with each node.
    nodes: Vec<NodeInfo<F>>,
    /// The number of nodes of each height `0..=2n`.
    count: Vec<usize>,
    /// The queue of active nodes.
    queue: ActiveQueue,
    /// The source node of the last solve.
    src: usize,
    /// The sink node of the last solve.
    snk: usize,
    /// The flow value.
    value: F,

    /// Whether to use the gap heuristic.
    pub use_gap_heuristic: bool,
    /// The number of push operations performed during the algorithm.
    pub cnt_push: usize,
    /// The number of relabel operations performed during the algorithm.
    pub cnt_relabel: usize,
    /// The number of gaps found during the algorithm.
    pub cnt_gap: usize,
    /// The number of nodes taken from the queue and discharged.
    pub cnt_discharge: usize,
}

/// Data associated with a node.
#[derive(Clone, Copy)]
struct NodeInfo<Flow> {
    /// The current height of the node.
    height: usize,
    /// The excess of flow of the node.
    excess: Flow,
    /// The current arc.
    iter: usize,
}

impl<'a, F> PushRelabel<'a, F>
where
    F: NumAssign + Ord + Copy,
{
    /// Return a new push-relabel algorithm data structure for the network `net`.
    pub fn new(net: &'a mut Network<F>) -> Self {
        let n = net.num_nodes();
        PushRelabel {
            net,
            nodes: Vec::with_capacity(n),
            count: Vec::with_capacity(2 * n + 1),
            queue: ActiveQueue::new(n),
            src: 0,
            snk: 0,
            value: F::zero(),

            use_gap_heuristic: true,
            cnt_push: 0,
            cnt_relabel: 0,
            cnt_gap: 0,
            cnt_discharge: 0,
        }
    }

    /// Return a reference to the underlying network.
    pub fn as_network(&self) -> &Network<F> {
        &*self.net
    }

    /// Return the flow value.
    ///
    /// The function returns 0 if the flow has not been computed, yet.
    pub fn value(&self) -> F {
        self.value
    }

    /// Return the height of node `u` after the last solve.
    pub fn height(&self, u: usize) -> usize {
        self.nodes[u].height
    }

    /// Return the excess of node `u` after the last solve.
    pub fn excess(&self, u: usize) -> F {
        self.nodes[u].excess
    }

    /// Run the push-relabel algorithm from some source to some sink node.
    ///
    /// The method solves the max flow problem from the source node `src`
    /// to the sink node `snk`. Any flow left in the network from previous
    /// runs is removed first.
    ///
    /// Networks with less than two nodes have flow value 0. Otherwise both
    /// nodes must be valid and distinct.
    pub fn solve(&mut self, src: usize, snk: usize) -> Result<F> {
        let n = self.net.num_nodes();

        self.value = F::zero();
        self.cnt_push = 0;
        self.cnt_relabel = 0;
        self.cnt_gap = 0;
        self.cnt_discharge = 0;
        self.nodes.clear();

        if n < 2 {
            debug!("Network with {} nodes, flow value is 0", n);
            return Ok(F::zero());
        }
        for &u in &[src, snk] {
            if u >= n {
                return Err(Error::InvalidNode { node: u, num_nodes: n });
            }
        }
        if src == snk {
            return Err(Error::SourceIsSink(src));
        }

        debug!(
            "Start push-relabel on {} nodes and {} edges (src: {}, snk: {}, gap: {})",
            n,
            self.net.num_edges(),
            src,
            snk,
            self.use_gap_heuristic
        );

        self.src = src;
        self.snk = snk;
        self.init_preflow();

        while let Some(u) = self.queue.pop() {
            if u == src || u == snk {
                continue;
            }
            self.discharge(u);
        }

        debug_assert!((0..n)
            .filter(|&u| u != src && u != snk)
            .all(|u| self.nodes[u].excess.is_zero()));

        self.value = self.net.net_outflow(src);

        debug!(
            "Finished push-relabel: discharges: {} pushes: {} relabels: {} gaps: {}",
            self.cnt_discharge, self.cnt_push, self.cnt_relabel, self.cnt_gap
        );

        Ok(self.value)
    }

    /// Return the minimal cut associated with the last maximum flow.
    ///
    /// These are the nodes from which the sink cannot be reached in the
    /// residual network, sorted by index. The source is always contained.
    pub fn mincut(&self) -> Vec<usize> {
        let n = self.net.num_nodes();
        if self.nodes.len() != n {
            return vec![];
        }

        // backwards search from the sink
        let mut reaches_sink = vec![false; n];
        let mut queue = VecDeque::new();
        reaches_sink[self.snk] = true;
        queue.push(self.snk);
        while let Some(v) = ItemQueue::pop(&mut queue) {
            for a in self.net.arcs(v) {
                let u = a.to();
                if !reaches_sink[u] && self.net.arc(u, a.rev()).residual() > F::zero() {
                    reaches_sink[u] = true;
                    queue.push(u);
                }
            }
        }

        (0..n).filter(|&u| !reaches_sink[u]).collect()
    }

    /// Return `true` if the current heights are a valid labelling.
    ///
    /// This means `height(u) <= height(v) + 1` for every arc `(u,v)` with
    /// positive residual capacity.
    pub fn is_valid_labelling(&self) -> bool {
        (0..self.nodes.len()).all(|u| self.is_valid_at(u))
    }

    /// Return `true` if all residual arcs leaving `u` satisfy the height condition.
    fn is_valid_at(&self, u: usize) -> bool {
        let h = self.nodes[u].height;
        self.net
            .arcs(u)
            .all(|a| a.residual().is_zero() || h <= self.nodes[a.to()].height + 1)
    }

    /// Initialize preflow algorithm.
    ///
    /// All edges leaving the source node are saturated, the source's
    /// height is set to `n`, all other heights are set to `0`.
    fn init_preflow(&mut self) {
        let n = self.net.num_nodes();
        let (src, snk) = (self.src, self.snk);

        self.net.reset_flow();
        self.nodes.clear();
        self.nodes.resize(
            n,
            NodeInfo {
                height: 0,
                excess: F::zero(),
                iter: 0,
            },
        );
        self.count.clear();
        self.count.resize(2 * n + 1, 0);
        self.queue.reset(n);

        self.nodes[src].height = n;
        self.count[0] = n - 1;
        self.count[n] = 1;

        // source and sink are never discharged
        self.queue.mark(src);
        self.queue.mark(snk);

        // send maximal flow out of source
        for i in 0..self.net.degree(src) {
            let a = self.net.arc(src, i);
            let (v, df) = (a.to(), a.residual());
            if df.is_zero() {
                continue;
            }
            self.net.push_flow(src, i, df);
            self.nodes[src].excess -= df;
            self.nodes[v].excess += df;
            self.cnt_push += 1;
            self.enqueue(v);
        }
    }

    /// Add `v` to the queue if it has positive excess.
    fn enqueue(&mut self, v: usize) {
        if self.nodes[v].excess > F::zero() {
            self.queue.push(v);
        }
    }

    /// Push as much excess as possible over the `i`-th arc of `u`.
    ///
    /// Nothing happens if the arc is saturated or not downhill.
    fn push(&mut self, u: usize, i: usize) {
        let a = self.net.arc(u, i);
        let v = a.to();
        let df = min(self.nodes[u].excess, a.residual());
        if df.is_zero() || self.nodes[u].height <= self.nodes[v].height {
            return;
        }

        self.net.push_flow(u, i, df);
        self.nodes[u].excess -= df;
        self.nodes[v].excess += df;
        self.cnt_push += 1;

        // the reverse arc may have become residual
        debug_assert!(self.nodes[v].height <= self.nodes[u].height + 1);

        self.enqueue(v);
    }

    /// The relabel operation.
    ///
    /// Lifts `u` to one above its lowest residual neighbour, or to `2n`
    /// if there is none, and requeues it.
    fn relabel(&mut self, u: usize) {
        debug_assert!(self.nodes[u].excess > F::zero());

        let n = self.net.num_nodes();
        let h_old = self.nodes[u].height;
        let nodes = &self.nodes;
        let h_new = self
            .net
            .arcs(u)
            .filter(|a| a.residual() > F::zero())
            .map(|a| nodes[a.to()].height + 1)
            .min()
            .unwrap_or(2 * n)
            .min(2 * n);

        debug_assert!(h_new > h_old, "relabel of {} from {} to {}", u, h_old, h_new);

        self.count[h_old] -= 1;
        self.nodes[u].height = h_new;
        self.count[h_new] += 1;
        self.cnt_relabel += 1;

        debug_assert!(self.is_valid_at(u));

        self.enqueue(u);
    }

    /// The gap heuristic.
    ///
    /// Height `k` is about to become empty, so no node of height at least
    /// `k` can reach the sink anymore. All these nodes (except the source)
    /// are lifted to at least `n + 1` and requeued if they have excess.
    fn gap(&mut self, k: usize) {
        let n = self.net.num_nodes();
        let mut lifted = 0;

        for v in 0..n {
            let h = self.nodes[v].height;
            if h < k || v == self.src || v == self.snk {
                continue;
            }
            let h_new = h.max(n + 1);
            if h_new != h {
                self.count[h] -= 1;
                self.count[h_new] += 1;
                self.nodes[v].height = h_new;
                // arcs before the current arc may be admissible now
                self.nodes[v].iter = 0;
                lifted += 1;
            }
            self.enqueue(v);
        }

        self.cnt_gap += 1;
        trace!("Gap at height {}, lifted {} nodes to height >= {}", k, lifted, n + 1);

        debug_assert!(self.count[k] == 0);
        debug_assert!(self.is_valid_labelling());
    }

    /// Discharges node `u`.
    ///
    /// This function does a sequence of push and relabel operations for an
    /// active node `u` until its excess reaches 0. Scanning starts at the
    /// current arc of `u`, which is only reset after a relabel.
    fn discharge(&mut self, u: usize) {
        let n = self.net.num_nodes();
        self.cnt_discharge += 1;

        while self.nodes[u].excess > F::zero() {
            let cur = self.nodes[u].iter;
            if cur < self.net.degree(u) {
                let a = self.net.arc(u, cur);
                if a.residual() > F::zero() && self.nodes[u].height == self.nodes[a.to()].height + 1 {
                    self.push(u, cur);
                } else {
                    // not admissible, go to next arc
                    self.nodes[u].iter += 1;
                }
            } else {
                // We ran out of admissible arcs but the node still has
                // positive excess. Lift it, either alone or together with
                // everything above an emptied level.
                let h = self.nodes[u].height;
                if self.use_gap_heuristic && h < n && self.count[h] == 1 {
                    self.gap(h);
                } else {
                    self.relabel(u);
                }
                self.nodes[u].iter = 0;
            }
        }
    }
}

/// Solve the maxflow problem using the push-relabel algorithm.
///
/// The function solves the max flow problem from the source node `src`
/// to the sink node `snk` on the capacities stored in `net`. The flow on
/// each edge can be read from `net` afterwards.
///
/// The function returns the flow value.
pub fn pushrelabel<F>(net: &mut Network<F>, src: usize, snk: usize) -> Result<F>
where
    F: NumAssign + Ord + Copy,
{
    PushRelabel::new(net).solve(src, snk)
}

#[cfg(test)]
mod tests {
    use super::{pushrelabel, PushRelabel};
    use crate::maxflow::Error;
    use crate::Network;

    fn assert_feasible(net: &Network<i64>, s: usize, t: usize, value: i64) {
        assert!(net.edges().all(|(_, e)| e.flow() >= 0 && e.flow() <= e.cap()));
        assert!((0..net.num_nodes())
            .filter(|&u| u != s && u != t)
            .all(|u| net.net_outflow(u) == 0));
        assert_eq!(net.net_outflow(s), value);
        assert_eq!(net.net_outflow(t), -value);
    }

    #[test]
    fn test_pushrelabel() {
        let (s, t, v1, v2, v3, v4) = (0, 1, 2, 3, 4, 5);
        let mut net = Network::new_with(6, |g| {
            g.add_edge(s, v1, 15);
            g.add_edge(s, v3, 10);
            g.add_edge(v1, v2, 6);
            g.add_edge(v1, v3, 7);
            g.add_edge(v2, t, 5);
            g.add_edge(v2, v4, 2);
            g.add_edge(v3, v2, 11);
            g.add_edge(v3, v4, 4);
            g.add_edge(v4, v2, 4);
            g.add_edge(v4, t, 20);
        });

        let value = pushrelabel(&mut net, s, t).unwrap();
        assert_eq!(value, 11);
        assert_feasible(&net, s, t, value);
    }

    #[test]
    fn test_gap_and_no_gap_agree() {
        let build = || {
            Network::new_with(7, |g| {
                g.add_edge(0, 1, 9);
                g.add_edge(0, 2, 9);
                g.add_edge(1, 3, 4);
                g.add_edge(2, 3, 1);
                g.add_edge(3, 4, 2);
                g.add_edge(4, 6, 8);
                g.add_edge(1, 5, 3);
                g.add_edge(5, 6, 1);
                g.add_edge(5, 1, 2);
            })
        };

        let mut values = vec![];
        for &use_gap in &[true, false] {
            let mut net = build();
            let mut pr = PushRelabel::new(&mut net);
            pr.use_gap_heuristic = use_gap;
            let value = pr.solve(0, 6).unwrap();
            assert!(pr.is_valid_labelling());
            if !use_gap {
                assert_eq!(pr.cnt_gap, 0);
            }
            assert_feasible(&net, 0, 6, value);
            values.push(value);
        }
        assert_eq!(values, vec![3, 3]);
    }

    #[test]
    fn test_gap_is_used() {
        // most of the source's flow cannot reach the sink
        let mut net = Network::new_with(4, |g| {
            g.add_edge(0, 1, 100);
            g.add_edge(1, 2, 100);
            g.add_edge(2, 3, 1);
        });
        let mut pr = PushRelabel::new(&mut net);
        assert_eq!(pr.solve(0, 3), Ok(1));
        assert!(pr.cnt_gap > 0);
        assert_eq!(pr.height(0), 4);
        assert_eq!(pr.height(3), 0);
        assert!(pr.height(1) > 4);
        assert_eq!(pr.excess(1), 0);
        assert_eq!(pr.excess(2), 0);
        assert_eq!(pr.excess(3), 1);
        assert_eq!(pr.mincut(), vec![0, 1, 2]);
    }

    #[test]
    fn test_resolve() {
        let mut net = Network::new_with(3, |g| {
            g.add_edge(0, 1, 4);
            g.add_edge(1, 2, 3);
            g.add_edge(0, 2, 2);
        });
        let mut pr = PushRelabel::new(&mut net);
        assert_eq!(pr.solve(0, 2), Ok(5));
        let pushes = pr.cnt_push;
        assert_eq!(pr.solve(0, 2), Ok(5));
        assert_eq!(pr.cnt_push, pushes);
        assert_eq!(pr.solve(1, 2), Ok(3));
        assert_eq!(pr.mincut(), vec![1]);
    }

    #[test]
    fn test_errors() {
        let mut net = Network::<i64>::new(3);
        net.add_edge(0, 1, 1);
        assert_eq!(
            pushrelabel(&mut net, 0, 3),
            Err(Error::InvalidNode { node: 3, num_nodes: 3 })
        );
        assert_eq!(
            pushrelabel(&mut net, 5, 1),
            Err(Error::InvalidNode { node: 5, num_nodes: 3 })
        );
        assert_eq!(pushrelabel(&mut net, 1, 1), Err(Error::SourceIsSink(1)));
    }

    #[test]
    fn test_tiny_networks() {
        let mut net = Network::<i64>::new(0);
        assert_eq!(pushrelabel(&mut net, 0, 0), Ok(0));
        let mut net = Network::<i64>::new(1);
        assert_eq!(pushrelabel(&mut net, 0, 0), Ok(0));
        let mut net = Network::<i64>::new(2);
        let mut pr = PushRelabel::new(&mut net);
        assert_eq!(pr.solve(0, 1), Ok(0));
        assert_eq!(pr.cnt_discharge, 0);
    }

    #[test]
    fn test_flow_into_source() {
        // the edge back into the source must not count twice
        let mut net = Network::new_with(3, |g| {
            g.add_edge(0, 1, 5);
            g.add_edge(1, 0, 5);
            g.add_edge(1, 2, 2);
        });
        let value = pushrelabel(&mut net, 0, 2).unwrap();
        assert_eq!(value, 2);
        assert_feasible(&net, 0, 2, value);
    }
}
