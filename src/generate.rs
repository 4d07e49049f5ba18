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

//! Random networks.
//!
//! The generator considers every ordered pair of distinct nodes once and
//! adds an edge with a fixed probability. Capacities are drawn uniformly
//! from a range. The random number generator is seeded explicitly, so the
//! same parameters always produce the same network.
//!
//! # Example
//!
//! ```
//! use preflow::generate::Generator;
//! use preflow::Network;
//!
//! let gen = Generator {
//!     nodes: 20,
//!     density: 0.3,
//!     ..Generator::default()
//! };
//! let a: Network = gen.generate();
//! let b: Network = gen.generate();
//! assert_eq!(a.num_nodes(), 20);
//! assert_eq!(a.num_edges(), b.num_edges());
//! ```

use crate::network::Network;

use crate::num::traits::NumAssign;

use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

#[cfg(feature = "serialize")]
use serde_derive::{Deserialize, Serialize};

/// Parameters of a random network.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct Generator {
    /// The number of nodes.
    pub nodes: usize,
    /// The probability of each ordered pair to become an edge.
    ///
    /// Values outside of `[0,1]` are clamped.
    pub density: f64,
    /// The smallest capacity.
    pub min_cap: u32,
    /// The largest capacity.
    pub max_cap: u32,
    /// The seed of the random number generator.
    pub seed: u64,
}

impl Default for Generator {
    fn default() -> Self {
        Generator {
            nodes: 100,
            density: 0.1,
            min_cap: 1,
            max_cap: 100,
            seed: 42,
        }
    }
}

impl Generator {
    /// Generate a random network.
    pub fn generate<F>(&self) -> Network<F>
    where
        F: NumAssign + Ord + Copy + From<u32>,
    {
        let mut rng = StdRng::seed_from_u64(self.seed);
        let density = if self.density.is_nan() {
            0.0
        } else {
            self.density.max(0.0).min(1.0)
        };
        let (lo, hi) = if self.min_cap <= self.max_cap {
            (self.min_cap, self.max_cap)
        } else {
            (self.max_cap, self.min_cap)
        };

        let n = self.nodes;
        let net = Network::new_with(n, |net| {
            for u in 0..n {
                for v in 0..n {
                    if u != v && rng.random_bool(density) {
                        net.add_edge(u, v, F::from(rng.random_range(lo..=hi)));
                    }
                }
            }
        });

        debug!(
            "Generated network with {} nodes and {} edges (density: {}, seed: {})",
            n,
            net.num_edges(),
            density,
            self.seed
        );

        net
    }
}
