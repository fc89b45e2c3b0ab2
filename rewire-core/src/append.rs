//! Incremental node insertion with random attachment.

use tracing::{debug, instrument};

use crate::{
    graph::{Graph, GraphBuilder, NodeId},
    sampling::{RandomSource, sample_without_replacement},
};

/// Number of attachments used when a step does not specify one.
pub const DEFAULT_CONNECTIONS: usize = 3;

/// Adds a single node joined to randomly chosen existing nodes.
///
/// The new node receives [`Graph::next_node_id`]: the identifier after the
/// current maximum, or `0` for an empty graph. When fewer than `connections` nodes exist the new
/// node is joined to all of them instead.
///
/// # Examples
/// ```
/// use rand::{SeedableRng, rngs::SmallRng};
/// use rewire_core::{Graph, NodeAppender, NodeId};
///
/// let mut rng = SmallRng::seed_from_u64(1);
/// let grown = NodeAppender::new().append_node(&mut rng, &Graph::empty(), 3);
/// assert_eq!(grown.nodes().collect::<Vec<_>>(), vec![NodeId::new(0)]);
/// assert_eq!(grown.edge_count(), 0);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct NodeAppender;

impl NodeAppender {
    /// Creates an appender.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Returns a copy of `graph` extended by one node with up to
    /// `connections` edges.
    #[instrument(
        name = "core.append_node",
        skip(self, source, graph),
        fields(nodes = graph.node_count(), edges = graph.edge_count()),
    )]
    pub fn append_node<S>(&self, source: &mut S, graph: &Graph, connections: usize) -> Graph
    where
        S: RandomSource + ?Sized,
    {
        let new_node = graph.next_node_id();
        let existing: Vec<NodeId> = graph.nodes().collect();
        let targets = if existing.len() > connections {
            sample_without_replacement(source, &existing, connections)
        } else {
            existing
        };

        let mut builder = GraphBuilder::from_graph(graph);
        builder.insert_node(new_node);
        for &target in &targets {
            builder.insert_edge(new_node, target);
        }
        debug!(node = %new_node, attached = targets.len(), "node appended");
        builder.build()
    }
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::SmallRng};
    use rstest::rstest;

    use super::*;
    use crate::test_utils::{ScriptedSource, graph_from_pairs, path_graph};

    fn append_seeded(graph: &Graph, connections: usize, seed: u64) -> Graph {
        NodeAppender::new().append_node(&mut SmallRng::seed_from_u64(seed), graph, connections)
    }

    fn new_edges(before: &Graph, after: &Graph) -> Vec<(NodeId, NodeId)> {
        after
            .edges()
            .filter(|edge| {
                let (a, b) = edge.endpoints();
                !before.contains_edge(a, b)
            })
            .map(|edge| edge.endpoints())
            .collect()
    }

    #[test]
    fn appends_three_edges_to_distinct_existing_nodes() {
        let graph = path_graph(8);
        let grown = append_seeded(&graph, 3, 9);
        let new_node = NodeId::new(8);

        assert_eq!(grown.node_count(), graph.node_count() + 1);
        let added = new_edges(&graph, &grown);
        assert_eq!(added.len(), 3);
        assert!(added.iter().all(|&(_, b)| b == new_node));
        assert_eq!(grown.degree(new_node), Some(3));
    }

    #[rstest]
    #[case::fewer_nodes_than_connections(2, 5)]
    #[case::exactly_enough_nodes(3, 3)]
    fn small_graphs_attach_to_every_node(#[case] len: u64, #[case] connections: usize) {
        let graph = path_graph(len);
        let mut source = ScriptedSource::new([1]);
        let grown = NodeAppender::new().append_node(&mut source, &graph, connections);
        let new_node = NodeId::new(len);

        for node in graph.nodes() {
            assert!(grown.contains_edge(new_node, node));
        }
        assert_eq!(grown.degree(new_node), Some(graph.node_count()));
        assert_eq!(source.draws(), 0, "no sampling is needed");
    }

    #[test]
    fn empty_graph_gains_node_zero_without_edges() {
        let grown = append_seeded(&Graph::empty(), 3, 1);
        assert_eq!(grown.node_count(), 1);
        assert!(grown.contains_node(NodeId::new(0)));
        assert_eq!(grown.edge_count(), 0);
    }

    #[test]
    fn identifier_follows_the_current_maximum() {
        let graph = graph_from_pairs(&[(3, 17)], &[4]);
        let grown = append_seeded(&graph, 1, 2);
        assert_eq!(grown.max_node(), Some(NodeId::new(18)));
    }

    #[test]
    fn saturated_identifiers_reuse_the_first_gap() {
        let graph = graph_from_pairs(&[(0, u64::MAX)], &[]);
        let grown = append_seeded(&graph, 1, 5);
        let new_node = NodeId::new(1);

        assert_eq!(grown.node_count(), 3);
        assert_eq!(grown.edge_count(), 2);
        assert_eq!(grown.degree(new_node), Some(1));
        assert!(grown.contains_edge(NodeId::new(0), NodeId::new(u64::MAX)));
    }

    #[test]
    fn zero_connections_adds_an_isolated_node() {
        let graph = path_graph(4);
        let grown = append_seeded(&graph, 0, 3);
        assert_eq!(grown.degree(NodeId::new(4)), Some(0));
        assert_eq!(grown.edge_count(), graph.edge_count());
    }

    #[test]
    fn input_graph_is_not_modified() {
        let graph = path_graph(5);
        let before = graph.clone();
        let _ = append_seeded(&graph, 3, 4);
        assert_eq!(graph, before);
    }
}
