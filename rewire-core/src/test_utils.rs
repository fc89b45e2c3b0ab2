//! Shared test utilities for `rewire-core`.

use std::env;

use proptest::test_runner::Config as ProptestConfig;

use crate::{
    graph::{Graph, GraphBuilder},
    sampling::RandomSource,
};

/// Environment variable controlling proptest case counts.
const PROGTEST_CASES_ENV_KEY: &str = "PROGTEST_CASES";

/// Builds a proptest configuration honouring the `PROGTEST_CASES` override.
///
/// Invalid or zero overrides fall back to `default_cases`.
#[must_use]
pub(crate) fn suite_proptest_config(default_cases: u32) -> ProptestConfig {
    let cases = env::var(PROGTEST_CASES_ENV_KEY)
        .ok()
        .and_then(|raw| raw.trim().parse::<u32>().ok())
        .filter(|&cases| cases > 0)
        .unwrap_or(default_cases);
    ProptestConfig {
        cases,
        ..ProptestConfig::default()
    }
}

/// [`RandomSource`] that replays a fixed script of draws.
///
/// Each draw is reduced modulo the requested bound, and the script repeats
/// once exhausted. An empty script always yields zero.
///
/// # Examples
/// ```ignore
/// let mut source = ScriptedSource::new([1, 4]);
/// assert_eq!(source.next_index(3), 1);
/// assert_eq!(source.next_index(3), 1);
/// assert_eq!(source.draws(), 2);
/// ```
#[derive(Clone, Debug)]
pub(crate) struct ScriptedSource {
    script: Vec<usize>,
    draws: usize,
}

impl ScriptedSource {
    /// Creates a source that replays `script` in order.
    pub(crate) fn new(script: impl IntoIterator<Item = usize>) -> Self {
        Self {
            script: script.into_iter().collect(),
            draws: 0,
        }
    }

    /// Returns how many indices have been drawn so far.
    pub(crate) fn draws(&self) -> usize {
        self.draws
    }
}

impl RandomSource for ScriptedSource {
    fn next_index(&mut self, bound: usize) -> usize {
        let raw = if self.script.is_empty() {
            0
        } else {
            self.script[self.draws % self.script.len()]
        };
        self.draws += 1;
        raw % bound
    }
}

/// Builds a graph from `(a, b)` integer pairs plus any extra isolated nodes.
pub(crate) fn graph_from_pairs(pairs: &[(u64, u64)], isolated: &[u64]) -> Graph {
    GraphBuilder::new()
        .with_edges(pairs.iter().copied())
        .with_nodes(isolated.iter().copied())
        .build()
}

/// Builds the path `0 - 1 - ... - (len - 1)`.
pub(crate) fn path_graph(len: u64) -> Graph {
    GraphBuilder::new()
        .with_nodes(0..len)
        .with_edges((1..len).map(|node| (node - 1, node)))
        .build()
}
