//! Unit tests for Kruskal step generation.

use rstest::rstest;
use spanstep_test_support::capture::CaptureLayer;
use tracing_subscriber::layer::SubscriberExt;

use crate::error::StepperError;
use crate::graph::{EdgeId, Graph, NodeId};
use crate::test_utils::{edges, nodes};

use super::{Decision, KruskalRun, generate_steps};

fn run(graph: &Graph) -> KruskalRun {
    match graph.run_kruskal() {
        Ok(run) => run,
        Err(err) => panic!("generation must succeed: {err}"),
    }
}

#[test]
fn sample_graph_matches_reference_walkthrough() {
    let result = run(&Graph::sample());

    let order: Vec<String> = result.sorted_edges().iter().map(|edge| edge.label()).collect();
    assert_eq!(
        order,
        ["D-E", "A-B", "B-D", "C-F", "A-C", "B-C", "E-G", "F-G"]
    );

    let decisions: Vec<(Decision, f64)> = result
        .steps()
        .iter()
        .map(|step| (step.decision(), step.cost()))
        .collect();
    assert_eq!(
        decisions,
        [
            (Decision::Added, 1.0),
            (Decision::Added, 3.0),
            (Decision::Added, 6.0),
            (Decision::Added, 10.0),
            (Decision::Added, 15.0),
            (Decision::Skipped, 15.0),
            (Decision::Added, 21.0),
            (Decision::Skipped, 21.0),
        ]
    );

    assert_eq!(result.final_mst().len(), 6);
    assert_eq!(result.final_cost(), 21.0);
    assert!(result.is_spanning_tree());
    assert_eq!(result.node_count(), 7);
}

#[test]
fn messages_follow_the_decision_template() {
    let result = run(&Graph::sample());
    let messages: Vec<&str> = result.steps().iter().map(|step| step.message()).collect();
    assert_eq!(messages[0], "Considering edge (D, E) — added.");
    assert_eq!(messages[5], "Considering edge (B, C) — skipped (cycle).");
}

#[test]
fn empty_edge_list_is_a_valid_run() {
    let result = match generate_steps(&nodes(&["A"]), &[]) {
        Ok(run) => run,
        Err(err) => panic!("single node must succeed: {err}"),
    };
    assert!(result.steps().is_empty());
    assert!(result.final_mst().is_empty());
    assert_eq!(result.final_cost(), 0.0);
    assert!(result.is_spanning_tree());
}

#[test]
fn rejects_graph_without_nodes() {
    let result = generate_steps(&[], &edges(&[("A", "B", 1.0)]));
    assert_eq!(result, Err(StepperError::InvalidGraph));
}

#[test]
fn reports_edges_with_unknown_endpoints() {
    let result = generate_steps(&nodes(&["A", "B"]), &edges(&[("A", "B", 1.0), ("B", "Q", 2.0)]));
    assert_eq!(
        result,
        Err(StepperError::UnknownEndpoint {
            edge: EdgeId::new(2),
            node: NodeId::from("Q"),
        })
    );
}

#[test]
fn equal_weights_keep_input_order() {
    let input = edges(&[
        ("C", "D", 2.0),
        ("A", "B", 1.0),
        ("B", "C", 2.0),
        ("A", "D", 1.0),
    ]);
    let result = match generate_steps(&nodes(&["A", "B", "C", "D"]), &input) {
        Ok(run) => run,
        Err(err) => panic!("generation must succeed: {err}"),
    };
    let ids: Vec<u64> = result.sorted_edges().iter().map(|edge| edge.id().get()).collect();
    assert_eq!(ids, [2, 4, 1, 3]);
}

#[test]
fn tie_order_decides_which_edge_closes_the_cycle() {
    let input = edges(&[("A", "B", 1.0), ("B", "C", 1.0), ("A", "C", 1.0)]);
    let result = match generate_steps(&nodes(&["A", "B", "C"]), &input) {
        Ok(run) => run,
        Err(err) => panic!("generation must succeed: {err}"),
    };
    let skipped: Vec<String> = result
        .steps()
        .iter()
        .filter(|step| step.decision() == Decision::Skipped)
        .map(|step| step.edge().label())
        .collect();
    assert_eq!(skipped, ["A-C"]);
}

#[rstest]
#[case::two_pairs(&["A", "B", "C", "D"], &[("A", "B", 1.0), ("C", "D", 2.0)], 2, 2)]
#[case::isolated_node(&["A", "B", "C"], &[("A", "B", 4.0)], 1, 2)]
#[case::no_edges(&["A", "B"], &[], 0, 2)]
fn disconnected_graphs_yield_a_forest(
    #[case] ids: &[&str],
    #[case] triples: &[(&str, &str, f64)],
    #[case] expected_edges: usize,
    #[case] expected_components: usize,
) {
    let result = match generate_steps(&nodes(ids), &edges(triples)) {
        Ok(run) => run,
        Err(err) => panic!("disconnected graph must succeed: {err}"),
    };
    assert_eq!(result.final_mst().len(), expected_edges);
    assert_eq!(result.component_count(), expected_components);
    assert!(!result.is_spanning_tree());
}

#[test]
fn self_loops_are_skipped_as_cycles() {
    let result = match generate_steps(&nodes(&["A", "B"]), &edges(&[("A", "A", 1.0), ("A", "B", 2.0)])) {
        Ok(run) => run,
        Err(err) => panic!("generation must succeed: {err}"),
    };
    let decisions: Vec<Decision> = result.steps().iter().map(|step| step.decision()).collect();
    assert_eq!(decisions, [Decision::Skipped, Decision::Added]);
}

#[test]
fn steps_own_their_mst_copies() {
    let result = run(&Graph::sample());
    let first = &result.steps()[0];
    let last = &result.steps()[result.steps().len() - 1];
    assert_eq!(first.mst().len(), 1);
    assert_eq!(last.mst().len(), 6);
    assert_eq!(last.mst(), result.final_mst());
}

#[test]
fn snapshots_reflect_state_after_each_edge() {
    let result = run(&Graph::sample());
    // D-E merges two rank-0 singletons: E hangs under D.
    let first = result.steps()[0].dsu();
    assert_eq!(first.parent_of("E").map(NodeId::as_str), Some("D"));
    assert_eq!(first.rank_of("D"), Some(1));
    assert_eq!(first.parent_of("A").map(NodeId::as_str), Some("A"));

    // B-D: B's root A (rank 1) and D (rank 1) tie, so D hangs under A.
    let third = result.steps()[2].dsu();
    assert_eq!(third.parent_of("D").map(NodeId::as_str), Some("A"));
    assert_eq!(third.rank_of("A"), Some(2));
}

#[test]
fn generation_is_deterministic() {
    let graph = Graph::sample();
    assert_eq!(run(&graph), run(&graph));
}

#[test]
fn generation_emits_summary_event() {
    let layer = CaptureLayer::default();
    let subscriber = tracing_subscriber::registry().with(layer.clone());
    let graph = Graph::sample();
    tracing::subscriber::with_default(subscriber, || {
        let _run = graph.run_kruskal();
    });

    let summaries = layer.events_with_message("kruskal steps generated");
    assert_eq!(summaries.len(), 1);
    assert_eq!(summaries[0].field("steps"), Some("8"));
    assert_eq!(summaries[0].field("mst_edges"), Some("6"));

    let span = match layer.span("steps.generate") {
        Some(span) => span,
        None => panic!("generation span must be recorded"),
    };
    assert_eq!(span.fields.get("nodes").map(String::as_str), Some("7"));
    assert_eq!(span.fields.get("final_cost").map(String::as_str), Some("21"));
}
