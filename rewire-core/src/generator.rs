//! Random regular graph generation.
//!
//! Uses the pairing ("stub") model with partial rejection: each node
//! contributes `degree` stubs, the stubs are shuffled and paired, and any pair
//! that would form a self-loop or a parallel edge is returned to the pool for
//! another round. When the leftover stubs admit no valid pair the attempt is
//! abandoned and generation restarts from scratch.
//!
//! Dense requests, where `2 * degree > node_count - 1`, pair stubs for the
//! complementary degree `node_count - 1 - degree` and return the complement.
//! Pairing therefore never runs with more than half of the complete graph's
//! stubs.

use std::{
    collections::{BTreeMap, BTreeSet},
    iter,
};

use tracing::{Span, debug, field, info, instrument, warn};

use crate::{
    Result,
    error::GraphError,
    graph::{Graph, GraphBuilder, NodeId},
    sampling::{RandomSource, shuffle},
};

/// Generates graphs in which every node has the same degree.
///
/// # Examples
/// ```
/// use rand::{SeedableRng, rngs::SmallRng};
/// use rewire_core::{NodeId, RandomRegularGraphGenerator};
///
/// let mut rng = SmallRng::seed_from_u64(8);
/// let graph = RandomRegularGraphGenerator::new()
///     .generate(&mut rng, 6, 2)
///     .expect("6 * 2 is even and 2 < 6");
/// assert_eq!(graph.node_count(), 6);
/// assert_eq!(graph.edge_count(), 6);
/// assert!((0..6).all(|node| graph.degree(NodeId::new(node)) == Some(2)));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomRegularGraphGenerator;

impl RandomRegularGraphGenerator {
    /// Creates a generator.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Checks that a `degree`-regular simple graph on `node_count` nodes
    /// exists.
    ///
    /// # Errors
    /// Returns [`GraphError::InvalidParameters`] when `node_count` is zero,
    /// when `degree >= node_count`, or when `node_count * degree` is odd.
    ///
    /// # Examples
    /// ```
    /// use rewire_core::{GraphError, RandomRegularGraphGenerator};
    ///
    /// assert!(RandomRegularGraphGenerator::validate(6, 2).is_ok());
    /// assert!(matches!(
    ///     RandomRegularGraphGenerator::validate(5, 3),
    ///     Err(GraphError::InvalidParameters { .. })
    /// ));
    /// ```
    pub fn validate(node_count: usize, degree: usize) -> Result<()> {
        if node_count == 0 {
            return Err(GraphError::invalid("node count must be at least 1"));
        }
        if degree >= node_count {
            return Err(GraphError::invalid(format!(
                "degree ({degree}) must be smaller than node count ({node_count})"
            )));
        }
        let stubs = node_count.checked_mul(degree).ok_or_else(|| {
            GraphError::invalid(format!(
                "node count ({node_count}) times degree ({degree}) overflows"
            ))
        })?;
        if !stubs.is_multiple_of(2) {
            return Err(GraphError::invalid(format!(
                "node count ({node_count}) times degree ({degree}) must be even"
            )));
        }
        Ok(())
    }

    /// Generates a random `degree`-regular graph on nodes `0..node_count`.
    ///
    /// # Errors
    /// Returns [`GraphError::InvalidParameters`] under the conditions listed
    /// for [`Self::validate`]. No randomness is consumed in that case.
    #[instrument(
        name = "core.generate",
        err,
        skip(self, source),
        fields(attempts = field::Empty, complemented = field::Empty),
    )]
    pub fn generate<S>(&self, source: &mut S, node_count: usize, degree: usize) -> Result<Graph>
    where
        S: RandomSource + ?Sized,
    {
        if let Err(err) = Self::validate(node_count, degree) {
            warn!(node_count, degree, "rejecting regular graph parameters");
            return Err(err);
        }

        let complemented = 2 * degree > node_count - 1;
        let paired_degree = if complemented {
            node_count - 1 - degree
        } else {
            degree
        };
        let (pairs, attempts) = pair_stubs(source, node_count, paired_degree);
        let span = Span::current();
        span.record("attempts", attempts);
        span.record("complemented", complemented);

        let edges = if complemented {
            complement(node_count, &pairs)
        } else {
            pairs
        };
        let graph = GraphBuilder::new()
            .with_nodes((0..node_count).map(|node| NodeId::new(node as u64)))
            .with_edges(edges.into_iter().map(|(a, b)| (a as u64, b as u64)))
            .build();
        info!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            "regular graph generated"
        );
        Ok(graph)
    }
}

/// Pairs stubs until an attempt completes, returning the edges and the
/// number of attempts taken.
fn pair_stubs<S>(
    source: &mut S,
    node_count: usize,
    degree: usize,
) -> (BTreeSet<(usize, usize)>, u64)
where
    S: RandomSource + ?Sized,
{
    if degree == 0 {
        return (BTreeSet::new(), 0);
    }
    let mut attempts = 1_u64;
    loop {
        if let Some(pairs) = try_pairing(source, node_count, degree) {
            return (pairs, attempts);
        }
        debug!(attempt = attempts, "stub pairing stalled, restarting");
        attempts += 1;
    }
}

/// Returns every pair `(low, high)` on `0..node_count` absent from `edges`.
fn complement(node_count: usize, edges: &BTreeSet<(usize, usize)>) -> BTreeSet<(usize, usize)> {
    (0..node_count)
        .flat_map(|low| (low + 1..node_count).map(move |high| (low, high)))
        .filter(|pair| !edges.contains(pair))
        .collect()
}

/// Runs one pairing attempt, returning `None` when it cannot complete.
fn try_pairing<S>(
    source: &mut S,
    node_count: usize,
    degree: usize,
) -> Option<BTreeSet<(usize, usize)>>
where
    S: RandomSource + ?Sized,
{
    let mut edges = BTreeSet::new();
    let mut stubs: Vec<usize> = (0..node_count)
        .flat_map(|node| iter::repeat_n(node, degree))
        .collect();

    while !stubs.is_empty() {
        shuffle(source, &mut stubs);
        let mut leftover: BTreeMap<usize, usize> = BTreeMap::new();
        for pair in stubs.chunks_exact(2) {
            let &[first, second] = pair else {
                continue;
            };
            let key = (first.min(second), first.max(second));
            if first != second && edges.insert(key) {
                continue;
            }
            *leftover.entry(first).or_default() += 1;
            *leftover.entry(second).or_default() += 1;
        }

        if !admits_new_edge(&edges, &leftover) {
            return None;
        }
        stubs = leftover
            .into_iter()
            .flat_map(|(node, count)| iter::repeat_n(node, count))
            .collect();
    }

    Some(edges)
}

/// Returns `true` when some pair of distinct leftover nodes is not yet joined.
fn admits_new_edge(edges: &BTreeSet<(usize, usize)>, leftover: &BTreeMap<usize, usize>) -> bool {
    if leftover.is_empty() {
        return true;
    }
    leftover.keys().enumerate().any(|(position, &low)| {
        leftover
            .keys()
            .skip(position + 1)
            .any(|&high| !edges.contains(&(low, high)))
    })
}
