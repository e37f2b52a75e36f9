//! Kruskal step generation.
//!
//! [`generate_steps`] sorts a copy of the edge list, drives a fresh
//! [`DisjointSet`] over it and records one [`AlgorithmStep`] per edge. The
//! resulting [`KruskalRun`] is immutable; its step sequence is shared through
//! an [`Arc`] so renderers, exporters and the playback controller can read it
//! side by side.

use std::{fmt, sync::Arc};

use tracing::{Span, debug, field, info, instrument};

use crate::{
    dsu::{DisjointSet, DsuSnapshot},
    error::StepperError,
    graph::{Edge, Node},
};

/// Outcome of considering a single edge.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Decision {
    /// The edge joined two components and became part of the MST.
    Added,
    /// Both endpoints already shared a component; the edge would close a cycle.
    Skipped,
}

impl Decision {
    /// Returns `true` for [`Decision::Added`].
    #[must_use]
    pub const fn is_added(self) -> bool {
        matches!(self, Self::Added)
    }

    /// Returns the label used in step tables.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Added => "Added",
            Self::Skipped => "Skipped",
        }
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything recorded after the algorithm processed one edge.
#[derive(Clone, Debug, PartialEq)]
pub struct AlgorithmStep {
    edge: Edge,
    decision: Decision,
    message: String,
    mst: Vec<Edge>,
    cost: f64,
    dsu: DsuSnapshot,
}

impl AlgorithmStep {
    /// Returns the edge considered in this step.
    #[must_use]
    #[rustfmt::skip]
    pub const fn edge(&self) -> &Edge { &self.edge }

    /// Returns whether the edge was added or skipped.
    #[must_use]
    #[rustfmt::skip]
    pub const fn decision(&self) -> Decision { self.decision }

    /// Returns the human-readable status message.
    #[must_use]
    #[rustfmt::skip]
    pub fn message(&self) -> &str { &self.message }

    /// Returns the MST edges accumulated up to and including this step.
    #[must_use]
    #[rustfmt::skip]
    pub fn mst(&self) -> &[Edge] { &self.mst }

    /// Returns the total weight of [`Self::mst`].
    #[must_use]
    #[rustfmt::skip]
    pub const fn cost(&self) -> f64 { self.cost }

    /// Returns the union-find state right after this edge was processed.
    #[must_use]
    #[rustfmt::skip]
    pub const fn dsu(&self) -> &DsuSnapshot { &self.dsu }
}

/// The complete output of one generation call.
#[derive(Clone, Debug, PartialEq)]
pub struct KruskalRun {
    steps: Arc<[AlgorithmStep]>,
    sorted_edges: Vec<Edge>,
    final_mst: Vec<Edge>,
    final_cost: f64,
    node_count: usize,
    component_count: usize,
}

impl KruskalRun {
    /// Returns the ordered step sequence.
    #[must_use]
    #[rustfmt::skip]
    pub fn steps(&self) -> &[AlgorithmStep] { &self.steps }

    /// Returns a shared handle to the step sequence.
    #[must_use]
    pub fn shared_steps(&self) -> Arc<[AlgorithmStep]> {
        Arc::clone(&self.steps)
    }

    /// Returns the edges in the order the algorithm considered them.
    #[must_use]
    #[rustfmt::skip]
    pub fn sorted_edges(&self) -> &[Edge] { &self.sorted_edges }

    /// Returns the edges of the minimum spanning tree or forest.
    #[must_use]
    #[rustfmt::skip]
    pub fn final_mst(&self) -> &[Edge] { &self.final_mst }

    /// Returns the total weight of [`Self::final_mst`].
    #[must_use]
    #[rustfmt::skip]
    pub const fn final_cost(&self) -> f64 { self.final_cost }

    /// Returns the number of distinct nodes the run covered.
    #[must_use]
    #[rustfmt::skip]
    pub const fn node_count(&self) -> usize { self.node_count }

    /// Returns the number of connected components left after the run.
    #[must_use]
    #[rustfmt::skip]
    pub const fn component_count(&self) -> usize { self.component_count }

    /// Returns `true` when the result spans every node with a single tree.
    #[must_use]
    pub const fn is_spanning_tree(&self) -> bool {
        self.component_count == 1
    }
}

/// Computes every decision Kruskal's algorithm makes for `edges`.
///
/// Edges are stably sorted by ascending weight, so equal weights keep the
/// order the caller supplied. Disconnected graphs produce a minimum spanning
/// forest and an empty edge list produces an empty run; neither is an error.
///
/// # Errors
///
/// Returns an error when:
/// - `nodes` is empty ([`StepperError::InvalidGraph`])
/// - an edge names a node missing from `nodes`
///   ([`StepperError::UnknownEndpoint`])
///
/// # Examples
/// ```
/// use spanstep_core::{Decision, Edge, EdgeId, Node, generate_steps};
///
/// let nodes = [Node::new("A"), Node::new("B"), Node::new("C")];
/// let edges = [
///     Edge::new(EdgeId::new(1), "A", "B", 2.0),
///     Edge::new(EdgeId::new(2), "B", "C", 1.0),
///     Edge::new(EdgeId::new(3), "A", "C", 3.0),
/// ];
/// let run = generate_steps(&nodes, &edges).expect("graph is valid");
/// let decisions: Vec<_> = run.steps().iter().map(|step| step.decision()).collect();
/// assert_eq!(decisions, [Decision::Added, Decision::Added, Decision::Skipped]);
/// assert_eq!(run.final_cost(), 3.0);
/// ```
#[instrument(
    name = "steps.generate",
    err,
    skip_all,
    fields(nodes = nodes.len(), edges = edges.len(), final_cost = field::Empty),
)]
pub fn generate_steps(nodes: &[Node], edges: &[Edge]) -> Result<KruskalRun, StepperError> {
    let mut dsu = DisjointSet::new(nodes.iter().map(|node| node.id().clone()))?;

    let mut sorted_edges = edges.to_vec();
    sorted_edges.sort_by(|left, right| left.weight().total_cmp(&right.weight()));

    let mut steps = Vec::with_capacity(sorted_edges.len());
    let mut mst: Vec<Edge> = Vec::with_capacity(dsu.len().saturating_sub(1));
    let mut cost = 0.0;

    for edge in &sorted_edges {
        let decision = consider(&mut dsu, edge)?;
        if decision.is_added() {
            mst.push(edge.clone());
            cost += edge.weight();
        }
        debug!(
            edge = %edge.id(),
            from = %edge.from(),
            to = %edge.to(),
            weight = edge.weight(),
            decision = decision.as_str(),
            cost,
            "edge considered"
        );
        steps.push(AlgorithmStep {
            edge: edge.clone(),
            decision,
            message: step_message(edge, decision),
            mst: mst.clone(),
            cost,
            dsu: dsu.snapshot(),
        });
    }

    Span::current().record("final_cost", cost);
    info!(
        steps = steps.len(),
        mst_edges = mst.len(),
        components = dsu.component_count(),
        "kruskal steps generated"
    );

    Ok(KruskalRun {
        steps: steps.into(),
        sorted_edges,
        final_mst: mst,
        final_cost: cost,
        node_count: dsu.len(),
        component_count: dsu.component_count(),
    })
}

fn consider(dsu: &mut DisjointSet, edge: &Edge) -> Result<Decision, StepperError> {
    let merged = dsu
        .union(edge.from().as_str(), edge.to().as_str())
        .map_err(|err| match err {
            StepperError::UnknownNode { node } => StepperError::UnknownEndpoint {
                edge: edge.id(),
                node,
            },
            other => other,
        })?;
    Ok(if merged {
        Decision::Added
    } else {
        Decision::Skipped
    })
}

fn step_message(edge: &Edge, decision: Decision) -> String {
    let outcome = match decision {
        Decision::Added => "added.",
        Decision::Skipped => "skipped (cycle).",
    };
    format!(
        "Considering edge ({}, {}) — {outcome}",
        edge.from(),
        edge.to()
    )
}

#[cfg(test)]
mod property;
#[cfg(test)]
mod tests;
