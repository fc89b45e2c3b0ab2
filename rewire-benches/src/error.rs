//! Benchmark setup error type.

use rewire_core::GraphError;

/// Errors that may occur while preparing benchmark inputs.
#[derive(Debug, thiserror::Error)]
pub enum BenchSetupError {
    /// The requested graph parameters were rejected.
    #[error("graph setup failed: {0}")]
    Graph(#[from] GraphError),
}
