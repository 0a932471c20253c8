use std::path::PathBuf;

use clap::Args;
use graph_walk_core::FilterCondition;

/// Process-wide settings. Every flag falls back to an environment variable,
/// then to its default.
#[derive(Args, Debug, Clone)]
pub struct Settings {
    /// JSON graph document to load
    #[arg(short, long, env = "GRAPH_WALK_GRAPH", global = true)]
    pub graph: Option<PathBuf>,

    /// Comma-separated vertex types to load, or * for all
    #[arg(long, env = "GRAPH_WALK_VERTEX_TYPES", default_value = "*", global = true)]
    pub vertex_types: String,

    /// Comma-separated edge types to load, or * for all
    #[arg(long, env = "GRAPH_WALK_EDGE_TYPES", default_value = "*", global = true)]
    pub edge_types: String,

    /// Memory cap for the loaded graph (MB); loading fails above it
    #[arg(
        long,
        env = "GRAPH_WALK_MAX_MEMORY_MB",
        default_value_t = 4096,
        value_parser = clap::value_parser!(u32).range(1..=131_072),
        global = true
    )]
    pub max_memory_mb: u32,

    /// Log filter directive (e.g. "debug", "graph_walk_core=trace")
    #[arg(long, env = "GRAPH_WALK_LOG", default_value = "info", global = true)]
    pub log_level: String,
}

/// Query-time type filter. With no flag given the query runs unfiltered.
#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// Only follow to vertexes of these types
    #[arg(long, value_delimiter = ',')]
    pub only_vertex_types: Option<Vec<String>>,

    /// Never follow to vertexes of these types
    #[arg(long, value_delimiter = ',')]
    pub exclude_vertex_types: Vec<String>,

    /// Only follow edges of these types
    #[arg(long, value_delimiter = ',')]
    pub only_edge_types: Option<Vec<String>>,

    /// Never follow edges of these types
    #[arg(long, value_delimiter = ',')]
    pub exclude_edge_types: Vec<String>,
}

impl FilterArgs {
    pub fn to_condition(&self) -> Option<FilterCondition> {
        let mut condition = FilterCondition::new()
            .exclude_vertex_types(self.exclude_vertex_types.iter().cloned())
            .exclude_edge_types(self.exclude_edge_types.iter().cloned());
        if let Some(types) = &self.only_vertex_types {
            condition = condition.only_vertex_types(types.iter().cloned());
        }
        if let Some(types) = &self.only_edge_types {
            condition = condition.only_edge_types(types.iter().cloned());
        }

        if condition.accepts_all() {
            None
        } else {
            Some(condition)
        }
    }
}
