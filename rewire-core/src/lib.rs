//! Rewire core library.
//!
//! Builds random degree-regular graphs and derives new graphs from them by
//! connecting neighbour pairs ([`NeighborRewirer`]) or attaching fresh nodes
//! ([`NodeAppender`]). [`GraphPipeline`] chains these steps into an ordered
//! list of [`GraphSnapshot`]s for presentation code to consume.
//!
//! Every transformation reads its input [`Graph`] and returns a new one; no
//! operation mutates a graph after [`GraphBuilder::build`]. Randomness enters
//! only through [`RandomSource`], so seeded runs are reproducible.

mod append;
mod error;
mod generator;
mod graph;
mod pipeline;
mod rewire;
mod sampling;

#[cfg(test)]
mod test_utils;
#[cfg(test)]
mod tests;

pub use crate::{
    append::{DEFAULT_CONNECTIONS, NodeAppender},
    error::{GraphError, GraphErrorCode, Result},
    generator::RandomRegularGraphGenerator,
    graph::{Edge, Graph, GraphBuilder, NodeId},
    pipeline::{
        DEFAULT_DEGREE, DEFAULT_NODE_COUNT, DEFAULT_SEED, GraphPipeline, GraphPipelineBuilder,
        GraphSnapshot, PipelineStep, Stage,
    },
    rewire::NeighborRewirer,
    sampling::{RandomSource, sample_without_replacement, shuffle},
};
