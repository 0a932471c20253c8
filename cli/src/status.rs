use std::io::Write;

use serde::Serialize;

use crate::error::Result;
use crate::load::LoadedGraph;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Status {
    pub source: String,
    pub vertex_count: usize,
    pub edge_count: usize,
    pub memory_bytes: usize,
    pub load_time_ms: f64,
    pub dropped_vertexes: usize,
    pub dropped_edges: usize,
}

impl Status {
    pub fn of(loaded: &LoadedGraph) -> Self {
        Self {
            source: loaded.source.display().to_string(),
            vertex_count: loaded.repo.vertex_count(),
            edge_count: loaded.repo.edge_count(),
            memory_bytes: loaded.repo.memory_usage(),
            load_time_ms: loaded.load_time_ms,
            dropped_vertexes: loaded.dropped_vertexes,
            dropped_edges: loaded.dropped_edges,
        }
    }
}

pub fn run<W: Write>(loaded: &LoadedGraph, out: &mut W) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, &Status::of(loaded))?;
    writeln!(out)?;
    Ok(())
}
