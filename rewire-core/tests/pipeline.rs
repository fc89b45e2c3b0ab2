use rand::{SeedableRng, rngs::SmallRng};
use rewire_core::{
    Graph, GraphBuilder, GraphError, GraphPipelineBuilder, NeighborRewirer, NodeAppender, NodeId,
    PipelineStep, RandomRegularGraphGenerator, Stage,
};
use rstest::rstest;

fn rng(seed: u64) -> SmallRng {
    SmallRng::seed_from_u64(seed)
}

#[test]
fn six_node_two_regular_graph_is_a_union_of_cycles() {
    let graph = RandomRegularGraphGenerator::new()
        .generate(&mut rng(6), 6, 2)
        .expect("6 * 2 is even");
    assert_eq!(graph.node_count(), 6);
    assert_eq!(graph.edge_count(), 6);
    assert!(graph.nodes().all(|node| graph.degree(node) == Some(2)));
}

#[rstest]
#[case::odd_stub_count(5, 3)]
#[case::degree_not_below_node_count(3, 3)]
fn impossible_parameters_fail_before_generation(#[case] node_count: usize, #[case] degree: usize) {
    let result = RandomRegularGraphGenerator::new().generate(&mut rng(1), node_count, degree);
    assert!(matches!(result, Err(GraphError::InvalidParameters { .. })));
}

#[test]
fn appending_to_an_empty_graph_creates_node_zero() {
    let grown = NodeAppender::new().append_node(&mut rng(2), &Graph::empty(), 3);
    assert_eq!(grown.nodes().collect::<Vec<_>>(), vec![NodeId::new(0)]);
    assert_eq!(grown.edge_count(), 0);
}

#[test]
fn appending_beyond_population_connects_every_node_once() {
    let pair = GraphBuilder::new().with_edges([(0_u64, 1)]).build();
    let grown = NodeAppender::new().append_node(&mut rng(3), &pair, 10);
    let new_node = NodeId::new(2);
    assert_eq!(grown.degree(new_node), Some(2));
    assert!(grown.contains_edge(new_node, NodeId::new(0)));
    assert!(grown.contains_edge(new_node, NodeId::new(1)));
    assert_eq!(grown.edge_count(), 3);
}

#[test]
fn rewiring_a_regular_graph_leaves_no_node_isolated() {
    let graph = RandomRegularGraphGenerator::new()
        .generate(&mut rng(4), 30, 3)
        .expect("valid");
    let rewired = NeighborRewirer::new().rewire(&mut rng(5), &graph);
    assert_eq!(rewired.isolated_nodes().count(), 0);
    assert!(rewired.edge_count() <= 3 * graph.node_count());
}

#[test]
fn pipeline_materialises_one_snapshot_per_stage() {
    let steps: Vec<PipelineStep> = ["rewire", "append:3", "append", "rewire"]
        .into_iter()
        .map(str::parse)
        .collect::<Result<_, _>>()
        .expect("steps parse");
    let snapshots = GraphPipelineBuilder::new()
        .with_node_count(16)
        .with_degree(3)
        .with_steps(steps.clone())
        .with_seed(99)
        .build()
        .expect("valid configuration")
        .run()
        .expect("pipeline runs");

    assert_eq!(snapshots.len(), steps.len() + 1);
    assert_eq!(snapshots[0].stage(), Stage::Generate);
    assert_eq!(snapshots[0].edge_count(), 24);
    assert_eq!(snapshots[2].node_count(), 17);
    assert_eq!(snapshots[3].node_count(), 18);
    assert_eq!(snapshots[4].node_count(), 18);
    for snapshot in &snapshots {
        assert_eq!(snapshot.edge_count(), snapshot.graph().edges().count());
    }
}

#[test]
fn injected_source_drives_the_whole_pipeline() {
    let pipeline = GraphPipelineBuilder::new()
        .with_node_count(10)
        .with_degree(2)
        .with_step(PipelineStep::Rewire)
        .build()
        .expect("valid configuration");
    let first = pipeline.run_with_source(&mut rng(12)).expect("runs");
    let second = pipeline.run_with_source(&mut rng(12)).expect("runs");
    assert_eq!(first, second);
}
