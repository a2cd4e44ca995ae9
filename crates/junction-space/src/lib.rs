//! Grid topology for Junction simulations.
//!
//! [`GridTopology`] is the fixed adjacency between intersections: a
//! rectangular, 4-connected grid whose outer edges absorb traffic. It is
//! built once per environment and never mutated.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod grid;

pub use error::SpaceError;
pub use grid::{Downstream, GridTopology};
