use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::time::Instant;

use graph_walk_core::{Edge, SimpleGraphRepository, Vertex};
use serde::Deserialize;

use crate::config::Settings;
use crate::error::{CliError, Result};
use crate::util::TypeFilter;

/// On-disk graph: `{ "vertexes": [...], "edges": [...] }`.
#[derive(Debug, Default, Deserialize)]
pub struct GraphDocument {
    #[serde(default)]
    pub vertexes: Vec<Vertex>,
    #[serde(default)]
    pub edges: Vec<Edge>,
}

/// A built repository plus where and how it was loaded.
pub struct LoadedGraph {
    pub repo: SimpleGraphRepository,
    pub source: PathBuf,
    pub load_time_ms: f64,
    pub dropped_vertexes: usize,
    pub dropped_edges: usize,
}

pub fn read_document(path: &Path) -> Result<GraphDocument> {
    if !path.exists() {
        return Err(CliError::FileNotFound(path.to_path_buf()));
    }
    let reader = BufReader::new(File::open(path)?);
    Ok(serde_json::from_reader(reader)?)
}

/// Drop records whose type is not listed, then build the repository.
///
/// Edges are kept even when an endpoint was dropped; such edges surface as
/// `VertexNotFound` when a query reaches them.
pub fn build_repository(
    doc: GraphDocument,
    vertex_filter: &TypeFilter,
    edge_filter: &TypeFilter,
) -> (SimpleGraphRepository, usize, usize) {
    let vertex_total = doc.vertexes.len();
    let edge_total = doc.edges.len();

    let vertexes: Vec<Vertex> = doc
        .vertexes
        .into_iter()
        .filter(|v| vertex_filter.matches(&v.vertex_type))
        .collect();
    let edges: Vec<Edge> = doc
        .edges
        .into_iter()
        .filter(|e| edge_filter.matches(&e.edge_type))
        .collect();

    let dropped_vertexes = vertex_total - vertexes.len();
    let dropped_edges = edge_total - edges.len();

    (
        SimpleGraphRepository::new(vertexes, edges),
        dropped_vertexes,
        dropped_edges,
    )
}

/// Resolve the document from settings, load it, and enforce the memory cap.
pub fn load_graph(settings: &Settings) -> Result<LoadedGraph> {
    let start = Instant::now();
    let path = settings.graph.clone().ok_or(CliError::NoGraphSpecified)?;

    let doc = read_document(&path)?;
    let vertex_filter = TypeFilter::parse(&settings.vertex_types);
    let edge_filter = TypeFilter::parse(&settings.edge_types);
    let (repo, dropped_vertexes, dropped_edges) = build_repository(doc, &vertex_filter, &edge_filter);

    let used_mb = repo.memory_usage() / (1024 * 1024);
    if used_mb > settings.max_memory_mb as usize {
        return Err(CliError::MemoryLimit {
            used_mb,
            max_mb: settings.max_memory_mb,
        });
    }

    let load_time_ms = start.elapsed().as_secs_f64() * 1000.0;
    tracing::info!(
        source = %path.display(),
        vertexes = repo.vertex_count(),
        edges = repo.edge_count(),
        dropped_vertexes,
        dropped_edges,
        load_time_ms,
        "graph loaded"
    );

    Ok(LoadedGraph {
        repo,
        source: path,
        load_time_ms,
        dropped_vertexes,
        dropped_edges,
    })
}

#[cfg(test)]
pub(crate) mod tests {
    use std::io::Write;

    use graph_walk_core::{GraphError, GraphRepository};
    use tempfile::NamedTempFile;

    use super::*;

    pub(crate) const TRIANGLE: &str = r#"{
        "vertexes": [
            {"id": "A", "type": "x"},
            {"id": "B", "type": "y"},
            {"id": "C", "type": "x"}
        ],
        "edges": [
            {"id": "ab", "type": "link", "fromId": "A", "toId": "B"},
            {"id": "bc", "type": "link", "fromId": "B", "toId": "C"},
            {"id": "ca", "type": "back", "fromId": "C", "toId": "A"}
        ]
    }"#;

    pub(crate) fn write_document(json: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();
        file
    }

    pub(crate) fn settings_for(path: &Path) -> Settings {
        Settings {
            graph: Some(path.to_path_buf()),
            vertex_types: "*".into(),
            edge_types: "*".into(),
            max_memory_mb: 4096,
            log_level: "info".into(),
        }
    }

    #[test]
    fn test_load_document() {
        let file = write_document(TRIANGLE);
        let loaded = load_graph(&settings_for(file.path())).unwrap();
        assert_eq!(loaded.repo.vertex_count(), 3);
        assert_eq!(loaded.repo.edge_count(), 3);
        assert_eq!(loaded.dropped_vertexes, 0);
        assert_eq!(loaded.source, file.path());
    }

    #[test]
    fn test_load_with_type_lists() {
        let file = write_document(TRIANGLE);
        let mut settings = settings_for(file.path());
        settings.edge_types = "link".into();
        let loaded = load_graph(&settings).unwrap();
        assert_eq!(loaded.repo.edge_count(), 2);
        assert_eq!(loaded.dropped_edges, 1);
        assert!(loaded.repo.get_edge_by_id("ca").is_err());
    }

    #[test]
    fn test_dropped_vertex_leaves_dangling_edge() {
        let file = write_document(TRIANGLE);
        let mut settings = settings_for(file.path());
        settings.vertex_types = "x".into();
        let loaded = load_graph(&settings).unwrap();
        assert_eq!(loaded.dropped_vertexes, 1);
        let a = loaded.repo.get_vertex_by_id("A").unwrap();
        assert_eq!(
            loaded.repo.get_next_vertexes(a, None).unwrap_err(),
            GraphError::VertexNotFound("B".into())
        );
    }

    #[test]
    fn test_empty_document() {
        let file = write_document("{}");
        let loaded = load_graph(&settings_for(file.path())).unwrap();
        assert_eq!(loaded.repo.vertex_count(), 0);
    }

    #[test]
    fn test_missing_graph_setting() {
        let mut settings = settings_for(Path::new("unused"));
        settings.graph = None;
        assert!(matches!(load_graph(&settings), Err(CliError::NoGraphSpecified)));
    }

    #[test]
    fn test_missing_file() {
        let settings = settings_for(Path::new("/nonexistent/graph.json"));
        assert!(matches!(load_graph(&settings), Err(CliError::FileNotFound(_))));
    }

    #[test]
    fn test_malformed_document() {
        let file = write_document(r#"{"vertexes": [{"id": "A"}]}"#);
        assert!(matches!(
            load_graph(&settings_for(file.path())),
            Err(CliError::Json(_))
        ));
    }
}
