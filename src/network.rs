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

//! The residual network the flow algorithms work on.
//!
//! Each edge `(u,v)` added to the network is stored as a pair of arcs: a
//! forward arc `u -> v` with the edge's capacity and a backward arc
//! `v -> u` with capacity 0. Both arcs know the position of their partner
//! in the partner's adjacency list. The flow on the backward arc is always
//! the negated flow on the forward arc, hence
//!
//! ```text
//! residual(u -> v) + residual(v -> u) = cap(u -> v) + cap(v -> u)
//! ```
//!
//! holds at all times.
//!
//! # Example
//!
//! ```
//! use preflow::Network;
//!
//! let mut net = Network::new(3);
//! assert_eq!(net.add_edge(0, 1, 5), Some(0));
//! assert_eq!(net.add_edge(1, 2, 3), Some(1));
//! // loops are ignored
//! assert_eq!(net.add_edge(2, 2, 7), None);
//!
//! assert_eq!(net.num_nodes(), 3);
//! assert_eq!(net.num_edges(), 2);
//! assert_eq!(net.arcs(1).count(), 2);
//! assert_eq!(net.outflow(1).collect::<Vec<_>>(), vec![(2, 0, 3)]);
//! ```

use crate::num::traits::NumAssign;

#[cfg(feature = "serialize")]
use serde_derive::{Deserialize, Serialize};

/// An arc of the residual network.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct Arc<F> {
    /// The head of the arc.
    to: usize,
    /// Position of the paired arc in the adjacency list of `to`.
    rev: usize,
    /// Current flow.
    flow: F,
    /// Capacity, 0 for backward arcs.
    cap: F,
}

impl<F> Arc<F>
where
    F: NumAssign + Ord + Copy,
{
    /// The head of the arc.
    pub fn to(&self) -> usize {
        self.to
    }

    /// The position of the paired arc in the adjacency list of `self.to()`.
    pub fn rev(&self) -> usize {
        self.rev
    }

    /// The current flow on this arc.
    ///
    /// The flow of a backward arc is never positive.
    pub fn flow(&self) -> F {
        self.flow
    }

    /// The capacity of this arc.
    pub fn cap(&self) -> F {
        self.cap
    }

    /// The residual capacity `cap - flow`.
    pub fn residual(&self) -> F {
        self.cap - self.flow
    }

    /// Return `true` if this is the forward arc of some edge.
    ///
    /// Edges with capacity 0 look like backward arcs from this point of
    /// view. They can never carry flow anyway.
    pub fn is_forward(&self) -> bool {
        self.cap > F::zero()
    }
}

/// A residual network with `n` nodes `0..n`.
///
/// The network is generic over the flow number type. The default `i64`
/// is wide enough for the sum of all capacities in any reasonable
/// instance. The excess of a node may temporarily hold the sum of all
/// capacities incident to it, so the chosen type must not overflow on
/// that sum.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct Network<F = i64> {
    /// The adjacency list of each node, forward and backward arcs mixed.
    adj: Vec<Vec<Arc<F>>>,
    /// The tail and the position of the forward arc of each edge.
    edges: Vec<(usize, usize)>,
}

impl<F> Network<F>
where
    F: NumAssign + Ord + Copy,
{
    /// Create a network with `n` nodes and no edges.
    pub fn new(n: usize) -> Self {
        Network {
            adj: vec![Vec::new(); n],
            edges: vec![],
        }
    }

    /// Create a network with `n` nodes and pass it to the callback `f`.
    ///
    /// This is convenient for adding the edges in a closure.
    pub fn new_with<B>(n: usize, f: B) -> Self
    where
        B: FnOnce(&mut Self),
    {
        let mut net = Network::new(n);
        f(&mut net);
        net
    }

    /// Return the number of nodes.
    pub fn num_nodes(&self) -> usize {
        self.adj.len()
    }

    /// Return the number of edges.
    ///
    /// Every edge counts once, the backward arcs are not counted.
    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    /// Add an edge from `u` to `v` with capacity `cap`.
    ///
    /// Returns the index of the new edge or `None` if `u == v`; loops
    /// are useless for flows and silently dropped. Parallel edges are
    /// allowed, their capacities are not merged.
    ///
    /// # Panics
    ///
    /// If `u` or `v` is not a node of the network or if `cap` is negative.
    pub fn add_edge(&mut self, u: usize, v: usize, cap: F) -> Option<usize> {
        let n = self.num_nodes();
        assert!(u < n, "invalid node {} (network has {} nodes)", u, n);
        assert!(v < n, "invalid node {} (network has {} nodes)", v, n);
        assert!(cap >= F::zero(), "capacities must be non-negative");

        if u == v {
            return None;
        }

        let fwd = self.adj[u].len();
        let bwd = self.adj[v].len();
        self.adj[u].push(Arc {
            to: v,
            rev: bwd,
            flow: F::zero(),
            cap,
        });
        self.adj[v].push(Arc {
            to: u,
            rev: fwd,
            flow: F::zero(),
            cap: F::zero(),
        });
        self.edges.push((u, fwd));

        Some(self.edges.len() - 1)
    }

    /// Return the `i`-th arc in the adjacency list of `u`.
    pub fn arc(&self, u: usize, i: usize) -> &Arc<F> {
        &self.adj[u][i]
    }

    /// Return the number of arcs (forward and backward) leaving `u`.
    pub fn degree(&self, u: usize) -> usize {
        self.adj[u].len()
    }

    /// Return an iterator over all arcs (forward and backward) leaving `u`.
    pub fn arcs(&self, u: usize) -> impl Iterator<Item = &Arc<F>> + '_ {
        self.adj[u].iter()
    }

    /// Return an iterator over `(to, flow, cap)` of all arcs with positive
    /// capacity leaving `u`.
    pub fn outflow(&self, u: usize) -> impl Iterator<Item = (usize, F, F)> + '_ {
        self.adj[u]
            .iter()
            .filter(|a| a.is_forward())
            .map(|a| (a.to, a.flow, a.cap))
    }

    /// Return the tail and the forward arc of edge `e`.
    pub fn edge(&self, e: usize) -> (usize, &Arc<F>) {
        let (u, i) = self.edges[e];
        (u, &self.adj[u][i])
    }

    /// Return an iterator over all edges in insertion order.
    ///
    /// Each element is the tail of the edge together with its forward arc.
    pub fn edges(&self) -> impl Iterator<Item = (usize, &Arc<F>)> + '_ {
        self.edges.iter().map(move |&(u, i)| (u, &self.adj[u][i]))
    }

    /// Return the flow on edge `e`.
    pub fn flow(&self, e: usize) -> F {
        self.edge(e).1.flow
    }

    /// Return the net flow leaving `u`.
    ///
    /// This is the sum of the flows of all arcs leaving `u`, where the
    /// backward arcs contribute the negated flow of the edges entering `u`.
    pub fn net_outflow(&self, u: usize) -> F {
        self.adj[u].iter().fold(F::zero(), |sum, a| sum + a.flow)
    }

    /// Remove all flow from the network.
    pub fn reset_flow(&mut self) {
        for arcs in &mut self.adj {
            for a in arcs {
                a.flow = F::zero();
            }
        }
    }

    /// Send `df` units of flow over the `i`-th arc of `u`.
    ///
    /// The flow of the paired arc is decreased by the same amount.
    pub(crate) fn push_flow(&mut self, u: usize, i: usize, df: F) {
        let a = &mut self.adj[u][i];
        a.flow += df;
        debug_assert!(a.flow <= a.cap);
        let (v, j) = (a.to, a.rev);
        self.adj[v][j].flow -= df;
    }
}

#[cfg(test)]
mod tests {
    use super::Network;

    #[test]
    fn test_add_edge() {
        let mut net = Network::<i64>::new(3);
        assert_eq!(net.add_edge(0, 1, 4), Some(0));
        assert_eq!(net.add_edge(0, 1, 6), Some(1));
        assert_eq!(net.add_edge(1, 2, 0), Some(2));
        assert_eq!(net.add_edge(1, 1, 3), None);

        assert_eq!(net.num_edges(), 3);
        assert_eq!(net.degree(0), 2);
        assert_eq!(net.degree(1), 3);
        assert_eq!(net.degree(2), 1);

        // every arc knows its partner
        for u in 0..net.num_nodes() {
            for (i, a) in net.arcs(u).enumerate() {
                let b = net.arc(a.to(), a.rev());
                assert_eq!(b.to(), u);
                assert_eq!(b.rev(), i);
            }
        }

        // parallel edges stay separate
        assert_eq!(net.outflow(0).collect::<Vec<_>>(), vec![(1, 0, 4), (1, 0, 6)]);
        assert_eq!(
            net.edges().map(|(u, a)| (u, a.to(), a.cap())).collect::<Vec<_>>(),
            vec![(0, 1, 4), (0, 1, 6), (1, 2, 0)]
        );
    }

    #[test]
    fn test_push_flow() {
        let mut net = Network::<i64>::new(2);
        net.add_edge(0, 1, 5);
        net.push_flow(0, 0, 3);

        assert_eq!(net.flow(0), 3);
        assert_eq!(net.arc(0, 0).residual(), 2);
        assert_eq!(net.arc(1, 0).flow(), -3);
        assert_eq!(net.arc(1, 0).residual(), 3);
        assert_eq!(net.net_outflow(0), 3);
        assert_eq!(net.net_outflow(1), -3);

        // residual(u->v) + residual(v->u) == cap(u->v) + cap(v->u)
        assert_eq!(net.arc(0, 0).residual() + net.arc(1, 0).residual(), 5);

        net.reset_flow();
        assert_eq!(net.flow(0), 0);
        assert_eq!(net.arc(1, 0).flow(), 0);
    }

    #[test]
    #[should_panic]
    fn test_invalid_node() {
        let mut net = Network::<i64>::new(2);
        net.add_edge(0, 2, 1);
    }

    #[test]
    #[should_panic]
    fn test_negative_capacity() {
        let mut net = Network::<i64>::new(2);
        net.add_edge(0, 1, -1);
    }
}
