//! graph-walk-core: In-memory typed graph repository and traversal context.
//!
//! A pure Rust library that indexes vertexes and directed, typed edges for
//! O(1) lookup by id and O(degree) neighbor enumeration under a type filter,
//! and provides the per-step context a traversal driver threads through a
//! walk to detect branch-local cycles.
//!
//! The repository is read-only once built and can be shared freely across
//! threads. A small breadth-first [`walk`] shows the driver contract and is
//! used by the benchmark and the command-line front end.

mod context;
mod error;
mod filter;
mod graph;
mod repository;
mod step;
mod walk;

pub use context::{BranchContext, GlobalPassedVertexes, PassedVertexes, TraverseContext};
pub use error::{GraphError, GraphResult};
pub use filter::{edge_passes, vertex_passes, FilterCondition};
pub use graph::{Direction, Edge, EdgeId, TypeName, Vertex, VertexId};
pub use repository::{GraphRepository, SimpleGraphRepository};
pub use step::{TraverseStep, TraverseSteps};
pub use walk::{walk, WalkOptions, WalkResult, WalkStep};
