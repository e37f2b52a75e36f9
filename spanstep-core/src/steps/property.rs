//! Property-based tests for step generation.
//!
//! Random graphs use a small integer weight range so ties are common, and a
//! naive quick-find oracle decides independently whether each edge should
//! have been skipped.

use proptest::prelude::*;

use crate::graph::{Edge, EdgeId, Node};
use crate::test_utils::suite_proptest_config;

use super::{Decision, generate_steps};

#[derive(Clone, Debug)]
struct Fixture {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
}

fn fixture_strategy() -> impl Strategy<Value = Fixture> {
    (1_usize..12).prop_flat_map(|node_count| {
        let edge = (0..node_count, 0..node_count, 1_u8..6);
        proptest::collection::vec(edge, 0..30).prop_map(move |raw| {
            let nodes = (0..node_count).map(|index| Node::new(format!("n{index}"))).collect();
            let edges = raw
                .into_iter()
                .zip(0_u64..)
                .map(|((from, to, weight), id)| {
                    Edge::new(
                        EdgeId::new(id),
                        format!("n{from}"),
                        format!("n{to}"),
                        f64::from(weight),
                    )
                })
                .collect();
            Fixture { nodes, edges }
        })
    })
}

/// Quick-find labelling: every node stores its component label directly.
struct Oracle {
    labels: Vec<usize>,
}

impl Oracle {
    fn new(count: usize) -> Self {
        Self {
            labels: (0..count).collect(),
        }
    }

    fn label(&self, node: &str) -> usize {
        let index = node
            .trim_start_matches('n')
            .parse::<usize>()
            .unwrap_or(usize::MAX);
        self.labels.get(index).copied().unwrap_or(usize::MAX)
    }

    fn merge(&mut self, left: &str, right: &str) -> bool {
        let from = self.label(right);
        let to = self.label(left);
        if from == to {
            return false;
        }
        for label in &mut self.labels {
            if *label == from {
                *label = to;
            }
        }
        true
    }

    fn components(&self) -> usize {
        let mut labels = self.labels.clone();
        labels.sort_unstable();
        labels.dedup();
        labels.len()
    }
}

proptest! {
    #![proptest_config(suite_proptest_config(128))]

    #[test]
    fn step_sequence_satisfies_kruskal_invariants(fixture in fixture_strategy()) {
        let run = generate_steps(&fixture.nodes, &fixture.edges)
            .map_err(|err| TestCaseError::fail(err.to_string()))?;
        let steps = run.steps();
        prop_assert_eq!(steps.len(), fixture.edges.len());

        for pair in steps.windows(2) {
            let (earlier, later) = (pair[0].edge(), pair[1].edge());
            prop_assert!(earlier.weight() <= later.weight());
            if earlier.weight() == later.weight() {
                // Ids follow input order, so ties must keep ascending ids.
                prop_assert!(earlier.id() < later.id());
            }
            prop_assert!(pair[0].cost() <= pair[1].cost());
        }

        let mut oracle = Oracle::new(fixture.nodes.len());
        let mut added = 0_usize;
        let mut cost = 0.0;
        for step in steps {
            let merged = oracle.merge(step.edge().from().as_str(), step.edge().to().as_str());
            let expected = if merged { Decision::Added } else { Decision::Skipped };
            prop_assert_eq!(step.decision(), expected);
            if merged {
                added += 1;
                cost += step.edge().weight();
            }
            prop_assert_eq!(step.mst().len(), added);
            prop_assert_eq!(step.cost(), cost);
        }

        let node_count = fixture.nodes.len();
        prop_assert!(run.final_mst().len() < node_count);
        prop_assert_eq!(run.component_count(), oracle.components());
        prop_assert_eq!(
            run.final_mst().len() == node_count - 1,
            oracle.components() == 1
        );
        prop_assert_eq!(run.final_cost(), cost);
    }

    #[test]
    fn generation_is_repeatable(fixture in fixture_strategy()) {
        let first = generate_steps(&fixture.nodes, &fixture.edges);
        let second = generate_steps(&fixture.nodes, &fixture.edges);
        prop_assert_eq!(first, second);
    }
}
