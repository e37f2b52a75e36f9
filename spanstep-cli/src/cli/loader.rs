//! JSON graph loading.

use std::fs;
use std::path::Path;

use spanstep_core::Graph;
use tracing::{Span, debug, field, instrument};

use super::CliError;

/// Reads a graph document and rejects edges the graph editor would refuse.
///
/// The document has the shape
/// `{"nodes": [{"id": "A", "name": "A", "x": 0, "y": 0}], "edges": [{"id": 1, "from": "A", "to": "B", "weight": 2}]}`;
/// `name`, `x`, `y` and the `edges` array are optional.
///
/// # Errors
/// Returns [`CliError::Io`] when the file cannot be read,
/// [`CliError::Parse`] for malformed JSON and [`CliError::InvalidEdge`] for a
/// weight that is not positive and finite. Unknown endpoints are left to the
/// step generator.
#[instrument(name = "cli.load_graph", err, fields(path = field::Empty, nodes = field::Empty, edges = field::Empty))]
pub fn load_graph(path: &Path) -> Result<Graph, CliError> {
    let span = Span::current();
    span.record("path", field::display(path.display()));

    let raw = fs::read_to_string(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let graph: Graph = serde_json::from_str(&raw).map_err(|source| CliError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    if let Some(edge) = graph
        .edges()
        .iter()
        .find(|edge| !(edge.weight().is_finite() && edge.weight() > 0.0))
    {
        return Err(CliError::InvalidEdge {
            edge: edge.id(),
            weight: edge.weight(),
        });
    }

    span.record("nodes", graph.nodes().len());
    span.record("edges", graph.edges().len());
    debug!("graph document loaded");
    Ok(graph)
}
