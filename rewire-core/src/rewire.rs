//! Neighbour-pair rewiring.
//!
//! Derives a new graph on the same node set where each node keeps at most
//! two of its original edges and closes a triangle between the two kept
//! neighbours. A node introduces at most three edges per pass, so repeated
//! rewiring cannot grow the edge count beyond `3 * node_count`.

use tracing::{info, instrument};

use crate::{
    graph::{Graph, GraphBuilder, NodeId},
    sampling::{RandomSource, sample_without_replacement},
};

/// Number of neighbours each node keeps and joins together.
const KEPT_NEIGHBOURS: usize = 2;

/// Rebuilds a graph by connecting a random pair of each node's neighbours.
///
/// For every node `v` of the input:
///
/// - an isolated `v` stays isolated;
/// - a `v` with exactly one neighbour keeps that edge;
/// - otherwise two distinct neighbours `a` and `b` are sampled and the edges
///   `(v, a)`, `(v, b)`, and `(a, b)` are added.
///
/// Nodes are visited in ascending order and edges produced by several nodes
/// are stored once.
///
/// # Examples
/// ```
/// use rand::{SeedableRng, rngs::SmallRng};
/// use rewire_core::{GraphBuilder, NeighborRewirer, NodeId};
///
/// let star = GraphBuilder::new()
///     .with_edges([(0_u64, 1), (0, 2), (0, 3)])
///     .build();
/// let mut rng = SmallRng::seed_from_u64(5);
/// let rewired = NeighborRewirer::new().rewire(&mut rng, &star);
/// assert_eq!(rewired.node_count(), 4);
/// assert!(rewired.isolated_nodes().next().is_none());
/// assert!(rewired.contains_edge(NodeId::new(1), NodeId::new(0)));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct NeighborRewirer;

impl NeighborRewirer {
    /// Creates a rewirer.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Returns the rewired counterpart of `graph`, leaving `graph` untouched.
    #[instrument(
        name = "core.rewire",
        skip(self, source, graph),
        fields(nodes = graph.node_count(), edges = graph.edge_count()),
    )]
    pub fn rewire<S>(&self, source: &mut S, graph: &Graph) -> Graph
    where
        S: RandomSource + ?Sized,
    {
        let mut builder = GraphBuilder::new().with_nodes(graph.nodes());
        for node in graph.nodes() {
            let neighbours: Vec<NodeId> = graph.neighbors(node).collect();
            match neighbours.as_slice() {
                [] => {}
                &[only] => {
                    builder.insert_edge(node, only);
                }
                _ => {
                    let chosen = sample_without_replacement(source, &neighbours, KEPT_NEIGHBOURS);
                    if let &[a, b] = chosen.as_slice() {
                        builder.insert_edge(node, a);
                        builder.insert_edge(node, b);
                        builder.insert_edge(a, b);
                    }
                }
            }
        }

        let rewired = builder.build();
        info!(
            edges_before = graph.edge_count(),
            edges_after = rewired.edge_count(),
            "graph rewired"
        );
        rewired
    }
}
