use std::collections::HashMap;

use crate::error::{GraphError, GraphResult};
use crate::filter::{edge_passes, vertex_passes, FilterCondition};
use crate::graph::{Direction, Edge, EdgeId, Vertex, VertexId};
use crate::step::{TraverseStep, TraverseSteps};

/// Read access to a typed graph: point lookups plus filtered neighbor
/// queries in either direction.
pub trait GraphRepository {
    fn get_vertex_by_id(&self, id: &str) -> GraphResult<&Vertex>;

    fn get_edge_by_id(&self, id: &str) -> GraphResult<&Edge>;

    /// Neighbors of `vertex` reached through edges in `direction` that pass
    /// `condition`. A vertex with no indexed edges yields an empty result.
    fn get_linked_vertexes<'g>(
        &'g self,
        vertex: &Vertex,
        direction: Direction,
        condition: Option<&FilterCondition>,
    ) -> GraphResult<TraverseSteps<'g>>;

    /// Targets of outgoing edges.
    fn get_next_vertexes<'g>(
        &'g self,
        vertex: &Vertex,
        condition: Option<&FilterCondition>,
    ) -> GraphResult<TraverseSteps<'g>> {
        self.get_linked_vertexes(vertex, Direction::Outgoing, condition)
    }

    /// Sources of incoming edges.
    fn get_prev_vertexes<'g>(
        &'g self,
        vertex: &Vertex,
        condition: Option<&FilterCondition>,
    ) -> GraphResult<TraverseSteps<'g>> {
        self.get_linked_vertexes(vertex, Direction::Incoming, condition)
    }
}

/// Read-only in-memory repository: vertex and edge maps plus forward and
/// reverse adjacency indices.
///
/// Adjacency entries point at edge slots, so for every edge `e`,
/// `outgoing[e.from_id]` and `incoming[e.to_id]` each hold it exactly once,
/// in insertion order. Parallel edges and self-loops stay distinct.
/// Nothing is mutated after [`SimpleGraphRepository::new`] returns.
#[derive(Debug, Clone, Default)]
pub struct SimpleGraphRepository {
    vertexes: Vec<Vertex>,
    vertex_index: HashMap<VertexId, usize>,
    edges: Vec<Edge>,
    edge_index: HashMap<EdgeId, usize>,
    outgoing: HashMap<VertexId, Vec<usize>>,
    incoming: HashMap<VertexId, Vec<usize>>,
}

impl SimpleGraphRepository {
    /// Build the repository in O(V + E).
    ///
    /// A repeated vertex or edge id replaces the earlier record in place,
    /// keeping its original position. Edges may reference vertexes that
    /// are not supplied; queries reaching them fail with `VertexNotFound`.
    pub fn new<V, E>(vertexes: V, edges: E) -> Self
    where
        V: IntoIterator<Item = Vertex>,
        E: IntoIterator<Item = Edge>,
    {
        let vertexes = vertexes.into_iter();
        let edges = edges.into_iter();

        let mut repo = Self {
            vertexes: Vec::with_capacity(vertexes.size_hint().0),
            vertex_index: HashMap::with_capacity(vertexes.size_hint().0),
            edges: Vec::with_capacity(edges.size_hint().0),
            edge_index: HashMap::with_capacity(edges.size_hint().0),
            outgoing: HashMap::new(),
            incoming: HashMap::new(),
        };

        let mut replaced_vertexes = 0usize;
        for vertex in vertexes {
            if let Some(&slot) = repo.vertex_index.get(&vertex.id) {
                repo.vertexes[slot] = vertex;
                replaced_vertexes += 1;
            } else {
                repo.vertex_index.insert(vertex.id.clone(), repo.vertexes.len());
                repo.vertexes.push(vertex);
            }
        }

        let mut replaced_edges = 0usize;
        for edge in edges {
            if let Some(&slot) = repo.edge_index.get(&edge.id) {
                repo.edges[slot] = edge;
                replaced_edges += 1;
            } else {
                repo.edge_index.insert(edge.id.clone(), repo.edges.len());
                repo.edges.push(edge);
            }
        }

        // Indices come from the de-duplicated edge list so a replaced edge
        // never leaves a stale entry under its old endpoints.
        for (slot, edge) in repo.edges.iter().enumerate() {
            repo.outgoing
                .entry(edge.from_id.clone())
                .or_default()
                .push(slot);
            repo.incoming
                .entry(edge.to_id.clone())
                .or_default()
                .push(slot);
        }

        tracing::debug!(
            vertexes = repo.vertexes.len(),
            edges = repo.edges.len(),
            replaced_vertexes,
            replaced_edges,
            "built graph repository"
        );

        repo
    }

    pub fn vertex_count(&self) -> usize {
        self.vertexes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// All vertexes in insertion order.
    pub fn vertexes(&self) -> &[Vertex] {
        &self.vertexes
    }

    /// All edges in insertion order.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn contains_vertex(&self, id: &str) -> bool {
        self.vertex_index.contains_key(id)
    }

    /// Unfiltered count of outgoing edges.
    pub fn out_degree(&self, id: &str) -> usize {
        self.adjacency(Direction::Outgoing, id).len()
    }

    /// Unfiltered count of incoming edges.
    pub fn in_degree(&self, id: &str) -> usize {
        self.adjacency(Direction::Incoming, id).len()
    }

    /// Approximate memory usage in bytes.
    pub fn memory_usage(&self) -> usize {
        use std::mem::size_of;

        let vertex_mem: usize = self
            .vertexes
            .iter()
            .map(|v| size_of::<Vertex>() + v.id.len() + v.vertex_type.len())
            .sum();
        let edge_mem: usize = self
            .edges
            .iter()
            .map(|e| {
                size_of::<Edge>() + e.id.len() + e.edge_type.len() + e.from_id.len() + e.to_id.len()
            })
            .sum();
        // Map keys are cloned ids; 40 bytes per entry covers hash + control bytes
        let index_mem = (self.vertex_index.len() + self.edge_index.len()) * (size_of::<String>() + 40)
            + self.vertex_index.keys().map(|k| k.len()).sum::<usize>()
            + self.edge_index.keys().map(|k| k.len()).sum::<usize>();
        let adjacency_mem: usize = self
            .outgoing
            .iter()
            .chain(self.incoming.iter())
            .map(|(k, v)| size_of::<String>() + k.len() + 40 + v.len() * size_of::<usize>())
            .sum();

        vertex_mem + edge_mem + index_mem + adjacency_mem
    }

    fn adjacency(&self, direction: Direction, id: &str) -> &[usize] {
        let index = match direction {
            Direction::Outgoing => &self.outgoing,
            Direction::Incoming => &self.incoming,
        };
        index.get(id).map(|v| v.as_slice()).unwrap_or(&[])
    }
}

impl GraphRepository for SimpleGraphRepository {
    fn get_vertex_by_id(&self, id: &str) -> GraphResult<&Vertex> {
        self.vertex_index
            .get(id)
            .map(|&slot| &self.vertexes[slot])
            .ok_or_else(|| GraphError::VertexNotFound(id.to_string()))
    }

    fn get_edge_by_id(&self, id: &str) -> GraphResult<&Edge> {
        self.edge_index
            .get(id)
            .map(|&slot| &self.edges[slot])
            .ok_or_else(|| GraphError::EdgeNotFound(id.to_string()))
    }

    fn get_linked_vertexes<'g>(
        &'g self,
        vertex: &Vertex,
        direction: Direction,
        condition: Option<&FilterCondition>,
    ) -> GraphResult<TraverseSteps<'g>> {
        let links = self.adjacency(direction, &vertex.id);
        let mut result = Vec::with_capacity(links.len());

        for &slot in links {
            let edge = &self.edges[slot];
            if !edge_passes(condition, edge) {
                continue;
            }
            // A missing endpoint is a data fault, not a filtered-out neighbor
            let target = self.get_vertex_by_id(edge.target(direction))?;
            if vertex_passes(condition, target) {
                result.push(TraverseStep::new(edge, target));
            }
        }

        tracing::trace!(
            vertex = %vertex.id,
            %direction,
            candidates = links.len(),
            found = result.len(),
            "linked vertexes"
        );

        Ok(TraverseSteps::new(result))
    }
}
