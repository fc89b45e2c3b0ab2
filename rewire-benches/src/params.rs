//! Benchmark parameter types.

use std::fmt;

/// Shape of the regular graph a benchmark starts from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RegularGraphParams {
    /// Number of nodes.
    pub node_count: usize,
    /// Degree of every node.
    pub degree: usize,
}

impl fmt::Display for RegularGraphParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n={},d={}", self.node_count, self.degree)
    }
}
