//! Seeded graph fixtures.

use rand::{SeedableRng, rngs::SmallRng};
use rewire_core::{Graph, RandomRegularGraphGenerator};

use crate::{error::BenchSetupError, params::RegularGraphParams};

/// Seed shared by every benchmark so runs compare like with like.
pub const BENCH_SEED: u64 = 42;

/// Returns a fresh generator seeded with [`BENCH_SEED`].
#[must_use]
pub fn bench_rng() -> SmallRng {
    SmallRng::seed_from_u64(BENCH_SEED)
}

/// Generates the regular graph described by `params` with a fixed seed.
///
/// # Errors
/// Returns [`BenchSetupError::Graph`] when no such regular graph exists.
pub fn regular_graph(params: RegularGraphParams) -> Result<Graph, BenchSetupError> {
    let graph = RandomRegularGraphGenerator::new().generate(
        &mut bench_rng(),
        params.node_count,
        params.degree,
    )?;
    Ok(graph)
}
