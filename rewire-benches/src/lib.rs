//! Benchmark support crate for rewire.
//!
//! Holds the parameter types and seeded fixtures shared by the Criterion
//! benchmarks for graph generation, rewiring, and node appending.

pub mod error;
pub mod fixtures;
pub mod params;
