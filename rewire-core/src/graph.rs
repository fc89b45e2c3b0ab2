//! Undirected simple graph model.
//!
//! [`Graph`] is immutable once built. New graphs are assembled with a
//! [`GraphBuilder`] that owns fresh storage, so a transformation can never
//! alias or modify the graph it reads from. Nodes, neighbours, and edges are
//! iterated in ascending identifier order.

use std::{
    collections::{BTreeMap, BTreeSet},
    fmt,
    ops::Bound,
};

/// Identifier assigned to a graph node.
///
/// # Examples
/// ```
/// use rewire_core::NodeId;
///
/// let id = NodeId::new(4);
/// assert_eq!(id.get(), 4);
/// assert_eq!(id.successor(), Some(NodeId::new(5)));
/// assert_eq!(NodeId::new(u64::MAX).successor(), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u64);

impl NodeId {
    /// Creates a new node identifier.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the underlying numeric identifier.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }

    /// Returns the identifier immediately after this one, or `None` at
    /// `u64::MAX`.
    #[must_use]
    pub const fn successor(self) -> Option<Self> {
        match self.0.checked_add(1) {
            Some(next) => Some(Self(next)),
            None => None,
        }
    }
}

impl From<u64> for NodeId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unordered pair of distinct nodes, stored with the lower identifier first.
///
/// # Examples
/// ```
/// use rewire_core::{Edge, NodeId};
///
/// let edge = Edge::new(NodeId::new(7), NodeId::new(2)).expect("endpoints differ");
/// assert_eq!(edge.endpoints(), (NodeId::new(2), NodeId::new(7)));
/// assert!(Edge::new(NodeId::new(3), NodeId::new(3)).is_none());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Edge {
    low: NodeId,
    high: NodeId,
}

impl Edge {
    /// Builds an edge between `a` and `b`, returning `None` for a self-loop.
    #[must_use]
    pub fn new(a: NodeId, b: NodeId) -> Option<Self> {
        match a.cmp(&b) {
            std::cmp::Ordering::Less => Some(Self { low: a, high: b }),
            std::cmp::Ordering::Greater => Some(Self { low: b, high: a }),
            std::cmp::Ordering::Equal => None,
        }
    }

    /// Returns the endpoints in ascending order.
    #[must_use]
    pub const fn endpoints(self) -> (NodeId, NodeId) {
        (self.low, self.high)
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.low, self.high)
    }
}

/// Immutable undirected graph without self-loops or parallel edges.
///
/// # Examples
/// ```
/// use rewire_core::{GraphBuilder, NodeId};
///
/// let graph = GraphBuilder::new()
///     .with_nodes([0_u64, 1, 2, 3])
///     .with_edges([(0_u64, 1), (1, 2), (2, 0)])
///     .build();
/// assert_eq!(graph.node_count(), 4);
/// assert_eq!(graph.edge_count(), 3);
/// assert_eq!(graph.degree(NodeId::new(1)), Some(2));
/// assert_eq!(graph.isolated_nodes().collect::<Vec<_>>(), vec![NodeId::new(3)]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Graph {
    adjacency: BTreeMap<NodeId, BTreeSet<NodeId>>,
    edge_count: usize,
}

impl Graph {
    /// Returns a graph with no nodes.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Returns the number of nodes.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Returns the number of undirected edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Returns `true` when the graph has no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }

    /// Iterates over node identifiers in ascending order.
    pub fn nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.adjacency.keys().copied()
    }

    /// Iterates over every edge exactly once, ordered by lower endpoint.
    pub fn edges(&self) -> impl Iterator<Item = Edge> + '_ {
        self.adjacency.iter().flat_map(|(&node, neighbours)| {
            neighbours
                .range((Bound::Excluded(node), Bound::Unbounded))
                .map(move |&other| Edge { low: node, high: other })
        })
    }

    /// Iterates over the neighbours of `node` in ascending order.
    ///
    /// Yields nothing when `node` is not part of the graph.
    pub fn neighbors(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.adjacency.get(&node).into_iter().flatten().copied()
    }

    /// Returns the degree of `node`, or `None` when it is not in the graph.
    #[must_use]
    pub fn degree(&self, node: NodeId) -> Option<usize> {
        self.adjacency.get(&node).map(BTreeSet::len)
    }

    /// Returns `true` when `node` belongs to the graph.
    #[must_use]
    pub fn contains_node(&self, node: NodeId) -> bool {
        self.adjacency.contains_key(&node)
    }

    /// Returns `true` when `a` and `b` are joined by an edge.
    #[must_use]
    pub fn contains_edge(&self, a: NodeId, b: NodeId) -> bool {
        self.adjacency
            .get(&a)
            .is_some_and(|neighbours| neighbours.contains(&b))
    }

    /// Returns the largest node identifier, or `None` for an empty graph.
    #[must_use]
    pub fn max_node(&self) -> Option<NodeId> {
        self.adjacency.keys().next_back().copied()
    }

    /// Returns an identifier not yet present in the graph.
    ///
    /// This is `max + 1`, or `0` for an empty graph. When the maximum is
    /// `u64::MAX` the smallest unused identifier is returned instead; one
    /// always exists because a graph cannot hold `2^64` nodes.
    ///
    /// # Examples
    /// ```
    /// use rewire_core::{Graph, GraphBuilder, NodeId};
    ///
    /// assert_eq!(Graph::empty().next_node_id(), NodeId::new(0));
    /// let graph = GraphBuilder::new().with_nodes([0_u64, 4]).build();
    /// assert_eq!(graph.next_node_id(), NodeId::new(5));
    /// let saturated = GraphBuilder::new().with_nodes([0_u64, u64::MAX]).build();
    /// assert_eq!(saturated.next_node_id(), NodeId::new(1));
    /// ```
    #[must_use]
    pub fn next_node_id(&self) -> NodeId {
        match self.max_node() {
            None => NodeId::new(0),
            Some(max) => max.successor().unwrap_or_else(|| self.smallest_unused_id()),
        }
    }

    fn smallest_unused_id(&self) -> NodeId {
        let mut candidate = 0_u64;
        for node in self.adjacency.keys() {
            if node.get() != candidate {
                break;
            }
            candidate = candidate.saturating_add(1);
        }
        NodeId::new(candidate)
    }

    /// Iterates over nodes that have no incident edges.
    pub fn isolated_nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.adjacency
            .iter()
            .filter(|(_, neighbours)| neighbours.is_empty())
            .map(|(&node, _)| node)
    }
}

/// Accumulates nodes and edges for a new [`Graph`].
///
/// Edge insertion is idempotent: repeating an edge, in either orientation,
/// leaves the builder unchanged. Endpoints are added to the node set
/// automatically and self-loops are refused.
///
/// # Examples
/// ```
/// use rewire_core::{GraphBuilder, NodeId};
///
/// let mut builder = GraphBuilder::new();
/// assert!(builder.insert_edge(NodeId::new(0), NodeId::new(1)));
/// assert!(!builder.insert_edge(NodeId::new(1), NodeId::new(0)));
/// assert!(!builder.insert_edge(NodeId::new(2), NodeId::new(2)));
/// let graph = builder.build();
/// assert_eq!(graph.edge_count(), 1);
/// assert_eq!(graph.node_count(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct GraphBuilder {
    adjacency: BTreeMap<NodeId, BTreeSet<NodeId>>,
    edge_count: usize,
}

impl GraphBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a builder seeded with a copy of `graph`'s nodes and edges.
    ///
    /// The builder owns its own storage; changes never reach `graph`.
    #[must_use]
    pub fn from_graph(graph: &Graph) -> Self {
        Self {
            adjacency: graph.adjacency.clone(),
            edge_count: graph.edge_count,
        }
    }

    /// Adds every node yielded by `nodes`.
    #[must_use]
    pub fn with_nodes<I>(mut self, nodes: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<NodeId>,
    {
        for node in nodes {
            self.insert_node(node.into());
        }
        self
    }

    /// Adds every edge yielded by `edges`, skipping self-loops and repeats.
    #[must_use]
    pub fn with_edges<I, N>(mut self, edges: I) -> Self
    where
        I: IntoIterator<Item = (N, N)>,
        N: Into<NodeId>,
    {
        for (a, b) in edges {
            self.insert_edge(a.into(), b.into());
        }
        self
    }

    /// Adds `node`, returning `true` if it was not already present.
    pub fn insert_node(&mut self, node: NodeId) -> bool {
        if self.adjacency.contains_key(&node) {
            return false;
        }
        self.adjacency.insert(node, BTreeSet::new());
        true
    }

    /// Joins `a` and `b`, returning `true` if a new edge was created.
    ///
    /// Returns `false` for self-loops and for edges that already exist.
    pub fn insert_edge(&mut self, a: NodeId, b: NodeId) -> bool {
        if a == b {
            return false;
        }
        let inserted = self.adjacency.entry(a).or_default().insert(b);
        self.adjacency.entry(b).or_default().insert(a);
        if inserted {
            self.edge_count += 1;
        }
        inserted
    }

    /// Finalises the builder into an immutable [`Graph`].
    #[must_use]
    pub fn build(self) -> Graph {
        Graph {
            adjacency: self.adjacency,
            edge_count: self.edge_count,
        }
    }
}
