//! Shared test utilities for `spanstep-core`.

use proptest::test_runner::Config as ProptestConfig;
use spanstep_test_support::profile::PropertyProfile;

use crate::graph::{Edge, EdgeId, Node};

/// Builds the proptest configuration shared by every property suite.
#[must_use]
pub(crate) fn suite_proptest_config(default_cases: u32) -> ProptestConfig {
    ProptestConfig {
        cases: PropertyProfile::load(default_cases).cases(),
        ..ProptestConfig::default()
    }
}

/// Builds nodes named after `ids`.
pub(crate) fn nodes(ids: &[&str]) -> Vec<Node> {
    ids.iter().map(|id| Node::new(*id)).collect()
}

/// Builds edges from `(from, to, weight)` triples, numbering them from 1 in
/// the order given.
pub(crate) fn edges(triples: &[(&str, &str, f64)]) -> Vec<Edge> {
    triples
        .iter()
        .zip(1_u64..)
        .map(|(&(from, to, weight), id)| Edge::new(EdgeId::new(id), from, to, weight))
        .collect()
}
