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

//#![forbid(unsafe_code)]

//! Maximum flows with a FIFO push-relabel algorithm.
//!
//! The crate consists of a residual [`Network`], the push-relabel
//! engine in [`maxflow`] and a few collaborators that construct or
//! consume networks: readers for DIMACS and plain edge list files, a
//! random generator and a small result presenter.
//!
//! # Example
//!
//! ```
//! use preflow::maxflow::pushrelabel;
//! use preflow::Network;
//!
//! let mut net = Network::new_with(4, |net| {
//!     net.add_edge(0, 1, 10);
//!     net.add_edge(0, 2, 10);
//!     net.add_edge(1, 2, 5);
//!     net.add_edge(1, 3, 10);
//!     net.add_edge(2, 3, 10);
//! });
//!
//! assert_eq!(pushrelabel(&mut net, 0, 3).unwrap(), 20);
//! ```

mod num {
    pub use num_traits as traits;
}

// # Data structures

pub mod network;
pub use self::network::{Arc, Network};

pub mod collections;

// # Algorithms

pub mod maxflow;
pub use self::maxflow::{pushrelabel, PushRelabel};

// # Input and output

#[cfg(feature = "dimacs")]
pub mod dimacs;
pub mod edgelist;
#[cfg(feature = "generate")]
pub mod generate;
pub mod report;
