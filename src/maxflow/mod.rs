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

//! Maximum flow algorithms.

pub mod pushrelabel;
pub use self::pushrelabel::{pushrelabel, PushRelabel};

use thiserror::Error;

/// Error when starting a max flow computation.
///
/// These errors describe a misconfigured problem. A network in which the
/// sink cannot be reached is not an error, its maximal flow is simply 0.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("invalid node {node} (network has {num_nodes} nodes)")]
    InvalidNode { node: usize, num_nodes: usize },
    #[error("source and sink must not be equal (both are {0})")]
    SourceIsSink(usize),
    #[error("no {0} node has been given")]
    MissingTerminal(&'static str),
}

pub type Result<T> = std::result::Result<T, Error>;
