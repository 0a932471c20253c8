use std::io::Write;

use graph_walk_core::{Direction, FilterCondition, GraphRepository, SimpleGraphRepository};
use serde::Serialize;

use crate::error::Result;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct NeighborRow<'a> {
    edge_id: &'a str,
    edge_type: &'a str,
    vertex_id: &'a str,
    vertex_type: &'a str,
}

/// Write one JSON line per neighbor of `start_id` in `direction`.
/// With `vertexes_only` each line is the bare vertex. Returns the count.
pub fn run<W: Write>(
    repo: &SimpleGraphRepository,
    start_id: &str,
    direction: Direction,
    condition: Option<&FilterCondition>,
    vertexes_only: bool,
    out: &mut W,
) -> Result<usize> {
    let start = repo.get_vertex_by_id(start_id)?;
    let steps = repo.get_linked_vertexes(start, direction, condition)?;

    if vertexes_only {
        for vertex in steps.vertexes() {
            serde_json::to_writer(&mut *out, vertex)?;
            writeln!(out)?;
        }
    } else {
        for step in &steps {
            let row = NeighborRow {
                edge_id: &step.edge.id,
                edge_type: &step.edge.edge_type,
                vertex_id: &step.vertex.id,
                vertex_type: &step.vertex.vertex_type,
            };
            serde_json::to_writer(&mut *out, &row)?;
            writeln!(out)?;
        }
    }

    tracing::debug!(start = start_id, %direction, found = steps.len(), "neighbor query");
    Ok(steps.len())
}
