//! Graph input types consumed by the step generator.
//!
//! Nodes and edges are authored and validated elsewhere; this module only
//! describes their shape. Positions are carried through for renderers and have
//! no influence on the algorithm.

use std::{borrow::Borrow, fmt, sync::Arc};

use crate::{error::StepperError, steps::KruskalRun};

/// Unique, cheaply clonable identifier of a graph node.
///
/// # Examples
/// ```
/// use spanstep_core::NodeId;
///
/// let id = NodeId::from("A");
/// assert_eq!(id.as_str(), "A");
/// assert_eq!(id.to_string(), "A");
/// ```
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct NodeId(Arc<str>);

impl NodeId {
    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for NodeId {
    fn from(value: &str) -> Self {
        Self(Arc::from(value))
    }
}

impl From<String> for NodeId {
    fn from(value: String) -> Self {
        Self(Arc::from(value))
    }
}

impl Borrow<str> for NodeId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier assigned to an edge by the graph editor.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct EdgeId(u64);

impl EdgeId {
    /// Wraps a raw edge identifier.
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw identifier.
    #[must_use]
    #[rustfmt::skip]
    pub const fn get(self) -> u64 { self.0 }
}

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Canvas position of a node.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Position {
    /// Horizontal coordinate.
    pub x: f64,
    /// Vertical coordinate.
    pub y: f64,
}

/// A graph vertex.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Node {
    id: NodeId,
    #[cfg_attr(feature = "serde", serde(default))]
    name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    x: f64,
    #[cfg_attr(feature = "serde", serde(default))]
    y: f64,
}

impl Node {
    /// Creates a node whose display name matches its id, placed at the origin.
    #[must_use]
    pub fn new(id: impl Into<NodeId>) -> Self {
        let node_id = id.into();
        let name = node_id.as_str().to_owned();
        Self {
            id: node_id,
            name,
            x: 0.0,
            y: 0.0,
        }
    }

    /// Overrides the display name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Places the node at `(x, y)`.
    #[must_use]
    pub const fn at(mut self, x: f64, y: f64) -> Self {
        self.x = x;
        self.y = y;
        self
    }

    /// Returns the node id.
    #[must_use]
    #[rustfmt::skip]
    pub const fn id(&self) -> &NodeId { &self.id }

    /// Returns the display name, falling back to the id when none was given.
    #[must_use]
    pub fn name(&self) -> &str {
        if self.name.is_empty() { self.id.as_str() } else { &self.name }
    }

    /// Returns the canvas position.
    #[must_use]
    pub const fn position(&self) -> Position {
        Position {
            x: self.x,
            y: self.y,
        }
    }
}

/// A weighted edge between two nodes.
///
/// The endpoints are stored in the order the editor supplied them, but the
/// algorithm treats every edge as undirected.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Edge {
    id: EdgeId,
    from: NodeId,
    to: NodeId,
    weight: f64,
}

impl Edge {
    /// Creates an edge.
    ///
    /// # Examples
    /// ```
    /// use spanstep_core::{Edge, EdgeId};
    ///
    /// let edge = Edge::new(EdgeId::new(1), "A", "B", 2.5);
    /// assert_eq!(edge.from().as_str(), "A");
    /// assert_eq!(edge.label(), "A-B");
    /// ```
    #[must_use]
    pub fn new(id: EdgeId, from: impl Into<NodeId>, to: impl Into<NodeId>, weight: f64) -> Self {
        Self {
            id,
            from: from.into(),
            to: to.into(),
            weight,
        }
    }

    /// Returns the edge id.
    #[must_use]
    #[rustfmt::skip]
    pub const fn id(&self) -> EdgeId { self.id }

    /// Returns the first endpoint.
    #[must_use]
    #[rustfmt::skip]
    pub const fn from(&self) -> &NodeId { &self.from }

    /// Returns the second endpoint.
    #[must_use]
    #[rustfmt::skip]
    pub const fn to(&self) -> &NodeId { &self.to }

    /// Returns the edge weight.
    #[must_use]
    #[rustfmt::skip]
    pub const fn weight(&self) -> f64 { self.weight }

    /// Returns the `U-V` label used in step tables.
    #[must_use]
    pub fn label(&self) -> String {
        format!("{}-{}", self.from, self.to)
    }
}

/// Nodes and edges handed over by the graph editor.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Graph {
    nodes: Vec<Node>,
    #[cfg_attr(feature = "serde", serde(default))]
    edges: Vec<Edge>,
}

impl Graph {
    /// Creates a graph from already validated nodes and edges.
    #[must_use]
    pub const fn new(nodes: Vec<Node>, edges: Vec<Edge>) -> Self {
        Self { nodes, edges }
    }

    /// Returns the seven-node demonstration graph.
    ///
    /// # Examples
    /// ```
    /// use spanstep_core::Graph;
    ///
    /// let graph = Graph::sample();
    /// assert_eq!(graph.nodes().len(), 7);
    /// assert_eq!(graph.edges().len(), 8);
    /// ```
    #[must_use]
    pub fn sample() -> Self {
        let nodes = vec![
            Node::new("A").at(330.0, 100.0),
            Node::new("B").at(610.0, 180.0),
            Node::new("C").at(480.0, 260.0),
            Node::new("D").at(480.0, 380.0),
            Node::new("E").at(610.0, 460.0),
            Node::new("F").at(330.0, 460.0),
            Node::new("G").at(200.0, 380.0),
        ];
        let edges = [
            ("A", "C", 5.0),
            ("A", "B", 2.0),
            ("B", "D", 3.0),
            ("B", "C", 6.0),
            ("C", "F", 4.0),
            ("D", "E", 1.0),
            ("E", "G", 6.0),
            ("F", "G", 7.0),
        ]
        .into_iter()
        .zip(1_u64..)
        .map(|((from, to, weight), id)| Edge::new(EdgeId::new(id), from, to, weight))
        .collect();
        Self { nodes, edges }
    }

    /// Returns the nodes in editor order.
    #[must_use]
    #[rustfmt::skip]
    pub fn nodes(&self) -> &[Node] { &self.nodes }

    /// Returns the edges in editor order.
    #[must_use]
    #[rustfmt::skip]
    pub fn edges(&self) -> &[Edge] { &self.edges }

    /// Runs the step generator over this graph.
    ///
    /// # Errors
    /// Returns [`StepperError::InvalidGraph`] when the graph has no nodes and
    /// [`StepperError::UnknownEndpoint`] when an edge names a missing node.
    pub fn run_kruskal(&self) -> Result<KruskalRun, StepperError> {
        crate::steps::generate_steps(&self.nodes, &self.edges)
    }
}
