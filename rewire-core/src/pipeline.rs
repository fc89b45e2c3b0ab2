//! Staged graph pipeline.
//!
//! A pipeline generates a random regular graph and then applies an ordered
//! list of [`PipelineStep`]s, keeping every intermediate graph as a
//! [`GraphSnapshot`]. Stages run strictly in sequence and a failure aborts
//! the remaining stages.

use std::{fmt, mem, str::FromStr};

use rand::{SeedableRng, rngs::SmallRng};
use tracing::{info, instrument};

use crate::{
    Result,
    append::{DEFAULT_CONNECTIONS, NodeAppender},
    error::GraphError,
    generator::RandomRegularGraphGenerator,
    graph::Graph,
    rewire::NeighborRewirer,
    sampling::RandomSource,
};

/// Node count used when none is configured.
pub const DEFAULT_NODE_COUNT: usize = 126;
/// Degree used when none is configured.
pub const DEFAULT_DEGREE: usize = 3;
/// RNG seed used when none is configured.
pub const DEFAULT_SEED: u64 = 0x5EED_0126;

/// Transformation applied after the generation stage.
///
/// Steps parse from `rewire`, `append`, or `append:<connections>`.
///
/// # Examples
/// ```
/// use rewire_core::PipelineStep;
///
/// let step: PipelineStep = "append:5".parse().expect("valid step");
/// assert_eq!(step, PipelineStep::Append { connections: 5 });
/// assert_eq!(step.to_string(), "append:5");
/// assert!("append:-1".parse::<PipelineStep>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStep {
    /// Apply [`NeighborRewirer::rewire`].
    Rewire,
    /// Apply [`NodeAppender::append_node`] with the given attachment count.
    Append {
        /// Number of existing nodes the new node is joined to.
        connections: usize,
    },
}

impl PipelineStep {
    /// Returns the stage this step produces.
    #[must_use]
    pub const fn stage(self) -> Stage {
        match self {
            Self::Rewire => Stage::Rewire,
            Self::Append { .. } => Stage::Append,
        }
    }

    /// Applies the step to `graph`, returning the new graph.
    pub fn apply<S>(self, source: &mut S, graph: &Graph) -> Graph
    where
        S: RandomSource + ?Sized,
    {
        match self {
            Self::Rewire => NeighborRewirer::new().rewire(source, graph),
            Self::Append { connections } => {
                NodeAppender::new().append_node(source, graph, connections)
            }
        }
    }
}

impl fmt::Display for PipelineStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rewire => f.write_str("rewire"),
            Self::Append { connections } => write!(f, "append:{connections}"),
        }
    }
}

impl FromStr for PipelineStep {
    type Err = GraphError;

    fn from_str(raw: &str) -> Result<Self> {
        let normalized = raw.trim().to_ascii_lowercase();
        let (name, argument) = match normalized.split_once(':') {
            Some((name, argument)) => (name.trim(), Some(argument.trim())),
            None => (normalized.as_str(), None),
        };

        match (name, argument) {
            ("rewire", None) => Ok(Self::Rewire),
            ("append", None) => Ok(Self::Append {
                connections: DEFAULT_CONNECTIONS,
            }),
            ("append", Some(count)) => parse_connections(count).map(|connections| Self::Append {
                connections,
            }),
            ("rewire", Some(_)) => Err(GraphError::invalid("rewire takes no argument")),
            _ => Err(GraphError::invalid(format!(
                "unknown pipeline step `{}`; expected `rewire` or `append[:<count>]`",
                raw.trim()
            ))),
        }
    }
}

fn parse_connections(raw: &str) -> Result<usize> {
    let count = raw.parse::<i64>().map_err(|err| {
        GraphError::invalid(format!("connection count `{raw}` is not an integer: {err}"))
    })?;
    usize::try_from(count).map_err(|_| {
        GraphError::invalid(format!(
            "connection count must be non-negative (got {count})"
        ))
    })
}

/// Pipeline stage that produced a snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Initial random regular graph.
    Generate,
    /// Output of a rewiring step.
    Rewire,
    /// Output of a node-append step.
    Append,
}

impl Stage {
    /// Returns the stage label used in captions.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Generate => "generate",
            Self::Rewire => "rewire",
            Self::Append => "append",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Immutable graph captured at one pipeline stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphSnapshot {
    index: usize,
    stage: Stage,
    graph: Graph,
}

impl GraphSnapshot {
    fn new(index: usize, stage: Stage, graph: Graph) -> Self {
        Self {
            index,
            stage,
            graph,
        }
    }

    /// Returns the zero-based stage position.
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Returns the stage that produced the snapshot.
    #[must_use]
    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// Returns the stage label used in captions.
    #[must_use]
    pub fn label(&self) -> &'static str {
        self.stage.as_str()
    }

    /// Returns the captured graph.
    #[must_use]
    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// Returns the number of nodes in the captured graph.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Returns the number of edges in the captured graph.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }
}

/// Configures and constructs [`GraphPipeline`] instances.
///
/// # Examples
/// ```
/// use rewire_core::{GraphPipelineBuilder, PipelineStep};
///
/// let pipeline = GraphPipelineBuilder::new()
///     .with_node_count(12)
///     .with_degree(3)
///     .with_step(PipelineStep::Rewire)
///     .with_step(PipelineStep::Append { connections: 3 })
///     .with_seed(7)
///     .build()
///     .expect("12 * 3 is even and 3 < 12");
/// let snapshots = pipeline.run().expect("generation succeeds");
/// assert_eq!(snapshots.len(), 3);
/// assert_eq!(snapshots[0].edge_count(), 18);
/// assert_eq!(snapshots[2].node_count(), 13);
/// ```
#[derive(Debug, Clone)]
pub struct GraphPipelineBuilder {
    node_count: usize,
    degree: usize,
    steps: Vec<PipelineStep>,
    seed: u64,
}

impl Default for GraphPipelineBuilder {
    fn default() -> Self {
        Self {
            node_count: DEFAULT_NODE_COUNT,
            degree: DEFAULT_DEGREE,
            steps: Vec::new(),
            seed: DEFAULT_SEED,
        }
    }
}

impl GraphPipelineBuilder {
    /// Creates a builder populated with default parameters.
    ///
    /// # Examples
    /// ```
    /// use rewire_core::{DEFAULT_DEGREE, DEFAULT_NODE_COUNT, GraphPipelineBuilder};
    ///
    /// let builder = GraphPipelineBuilder::new();
    /// assert_eq!(builder.node_count(), DEFAULT_NODE_COUNT);
    /// assert_eq!(builder.degree(), DEFAULT_DEGREE);
    /// assert!(builder.steps().is_empty());
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the number of nodes in the generated graph.
    #[must_use]
    pub fn with_node_count(mut self, node_count: usize) -> Self {
        self.node_count = node_count;
        self
    }

    /// Returns the configured node count.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.node_count
    }

    /// Overrides the degree of the generated graph.
    #[must_use]
    pub fn with_degree(mut self, degree: usize) -> Self {
        self.degree = degree;
        self
    }

    /// Returns the configured degree.
    #[must_use]
    pub fn degree(&self) -> usize {
        self.degree
    }

    /// Appends one step to the end of the step list.
    #[must_use]
    pub fn with_step(mut self, step: PipelineStep) -> Self {
        self.steps.push(step);
        self
    }

    /// Appends every step yielded by `steps`, preserving order.
    #[must_use]
    pub fn with_steps(mut self, steps: impl IntoIterator<Item = PipelineStep>) -> Self {
        self.steps.extend(steps);
        self
    }

    /// Returns the configured steps.
    #[must_use]
    pub fn steps(&self) -> &[PipelineStep] {
        &self.steps
    }

    /// Seeds the RNG used by [`GraphPipeline::run`].
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Returns the configured seed.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Validates the configuration and constructs a [`GraphPipeline`].
    ///
    /// # Errors
    /// Returns [`GraphError::InvalidParameters`] when no `degree`-regular
    /// graph on `node_count` nodes exists.
    pub fn build(self) -> Result<GraphPipeline> {
        RandomRegularGraphGenerator::validate(self.node_count, self.degree)?;
        Ok(GraphPipeline {
            node_count: self.node_count,
            degree: self.degree,
            steps: self.steps,
            seed: self.seed,
        })
    }
}

/// Generates a regular graph and applies the configured steps in order.
#[derive(Debug, Clone)]
pub struct GraphPipeline {
    node_count: usize,
    degree: usize,
    steps: Vec<PipelineStep>,
    seed: u64,
}

impl GraphPipeline {
    /// Returns the configured node count.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.node_count
    }

    /// Returns the configured degree.
    #[must_use]
    pub fn degree(&self) -> usize {
        self.degree
    }

    /// Returns the configured steps.
    #[must_use]
    pub fn steps(&self) -> &[PipelineStep] {
        &self.steps
    }

    /// Returns the configured seed.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Runs the pipeline with a [`SmallRng`] seeded from the configuration.
    ///
    /// # Errors
    /// Propagates [`GraphError::InvalidParameters`] from the generation stage.
    pub fn run(&self) -> Result<Vec<GraphSnapshot>> {
        let mut rng = SmallRng::seed_from_u64(self.seed);
        self.run_with_source(&mut rng)
    }

    /// Runs the pipeline, drawing all randomness from `source`.
    ///
    /// Returns one snapshot for the generation stage followed by one per
    /// configured step.
    ///
    /// # Errors
    /// Propagates [`GraphError::InvalidParameters`] from the generation stage.
    #[instrument(
        name = "core.pipeline.run",
        err,
        skip(self, source),
        fields(
            node_count = self.node_count,
            degree = self.degree,
            steps = self.steps.len(),
        ),
    )]
    pub fn run_with_source<S>(&self, source: &mut S) -> Result<Vec<GraphSnapshot>>
    where
        S: RandomSource + ?Sized,
    {
        let initial =
            RandomRegularGraphGenerator::new().generate(source, self.node_count, self.degree)?;
        let mut snapshots = Vec::with_capacity(self.steps.len() + 1);
        let mut current = GraphSnapshot::new(0, Stage::Generate, initial);

        for (offset, step) in self.steps.iter().enumerate() {
            let next = step.apply(source, current.graph());
            let previous = mem::replace(
                &mut current,
                GraphSnapshot::new(offset + 1, step.stage(), next),
            );
            snapshots.push(previous);
        }
        snapshots.push(current);

        info!(snapshots = snapshots.len(), "pipeline completed");
        Ok(snapshots)
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::error::GraphErrorCode;

    #[rstest]
    #[case("rewire", PipelineStep::Rewire)]
    #[case(" Rewire ", PipelineStep::Rewire)]
    #[case("append", PipelineStep::Append { connections: DEFAULT_CONNECTIONS })]
    #[case("append:0", PipelineStep::Append { connections: 0 })]
    #[case("APPEND: 12", PipelineStep::Append { connections: 12 })]
    fn parses_supported_steps(#[case] raw: &str, #[case] expected: PipelineStep) {
        let step: PipelineStep = raw.parse().expect("step must parse");
        assert_eq!(step, expected);
    }

    #[rstest]
    #[case::negative("append:-1")]
    #[case::not_a_number("append:three")]
    #[case::empty_count("append:")]
    #[case::rewire_argument("rewire:2")]
    #[case::unknown("shuffle")]
    #[case::blank("")]
    fn rejects_malformed_steps(#[case] raw: &str) {
        let err = raw.parse::<PipelineStep>().expect_err("step must be rejected");
        assert_eq!(err.code(), GraphErrorCode::InvalidParameters);
    }

    #[rstest]
    #[case(PipelineStep::Rewire)]
    #[case(PipelineStep::Append { connections: 4 })]
    fn display_output_parses_back(#[case] step: PipelineStep) {
        let reparsed: PipelineStep = step.to_string().parse().expect("display must parse");
        assert_eq!(reparsed, step);
    }

    #[rstest]
    #[case(5, 3)]
    #[case(3, 3)]
    #[case(0, 0)]
    fn build_rejects_invalid_generation_parameters(#[case] node_count: usize, #[case] degree: usize) {
        let err = GraphPipelineBuilder::new()
            .with_node_count(node_count)
            .with_degree(degree)
            .build()
            .expect_err("configuration must be rejected");
        assert!(matches!(err, GraphError::InvalidParameters { .. }));
    }

    #[test]
    fn snapshots_follow_the_configured_steps() {
        let steps = [
            PipelineStep::Rewire,
            PipelineStep::Append { connections: 2 },
            PipelineStep::Rewire,
        ];
        let snapshots = GraphPipelineBuilder::new()
            .with_node_count(10)
            .with_degree(2)
            .with_steps(steps)
            .build()
            .expect("valid configuration")
            .run()
            .expect("pipeline runs");

        let stages: Vec<Stage> = snapshots.iter().map(GraphSnapshot::stage).collect();
        assert_eq!(
            stages,
            vec![Stage::Generate, Stage::Rewire, Stage::Append, Stage::Rewire]
        );
        let indices: Vec<usize> = snapshots.iter().map(GraphSnapshot::index).collect();
        assert_eq!(indices, vec![0, 1, 2, 3]);
        assert_eq!(snapshots[0].edge_count(), 10);
        assert_eq!(snapshots[2].node_count(), 11);
    }

    #[test]
    fn identical_seeds_reproduce_every_snapshot() {
        let builder = GraphPipelineBuilder::new()
            .with_node_count(20)
            .with_degree(3)
            .with_steps([PipelineStep::Rewire, PipelineStep::Append { connections: 3 }])
            .with_seed(31);
        let first = builder.clone().build().expect("valid").run().expect("runs");
        let second = builder.build().expect("valid").run().expect("runs");
        assert_eq!(first, second);
    }

    #[test]
    fn each_snapshot_extends_its_predecessor() {
        let snapshots = GraphPipelineBuilder::new()
            .with_node_count(8)
            .with_degree(2)
            .with_steps([PipelineStep::Append { connections: 2 }; 4])
            .build()
            .expect("valid configuration")
            .run()
            .expect("pipeline runs");

        assert_eq!(snapshots.len(), 5);
        for pair in snapshots.windows(2) {
            let [previous, next] = pair else {
                panic!("windows(2) yields pairs");
            };
            assert_eq!(next.index(), previous.index() + 1);
            assert_eq!(next.node_count(), previous.node_count() + 1);
            assert_eq!(next.edge_count(), previous.edge_count() + 2);
            for edge in previous.graph().edges() {
                let (a, b) = edge.endpoints();
                assert!(next.graph().contains_edge(a, b));
            }
        }
    }

    #[test]
    fn no_steps_yields_only_the_generated_graph() {
        let snapshots = GraphPipelineBuilder::new()
            .build()
            .expect("defaults are valid")
            .run()
            .expect("pipeline runs");
        assert_eq!(snapshots.len(), 1);
        assert_eq!(snapshots[0].label(), "generate");
        assert_eq!(snapshots[0].node_count(), DEFAULT_NODE_COUNT);
        assert_eq!(
            snapshots[0].edge_count(),
            DEFAULT_NODE_COUNT * DEFAULT_DEGREE / 2
        );
    }
}
