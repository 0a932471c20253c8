use crate::graph::{Edge, Vertex};

/// One neighbor found by a repository query: the edge that was followed and
/// the vertex it leads to. Both borrow from the repository.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraverseStep<'g> {
    pub edge: &'g Edge,
    pub vertex: &'g Vertex,
}

impl<'g> TraverseStep<'g> {
    pub fn new(edge: &'g Edge, vertex: &'g Vertex) -> Self {
        Self { edge, vertex }
    }
}

/// Ordered result of a neighbor query.
///
/// Order follows edge insertion order in the repository. Callers that only
/// need target vertexes use [`TraverseSteps::vertexes`]; callers that also
/// need the connecting edge iterate the steps directly.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TraverseSteps<'g> {
    items: Vec<TraverseStep<'g>>,
}

impl<'g> TraverseSteps<'g> {
    pub fn new(items: Vec<TraverseStep<'g>>) -> Self {
        Self { items }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TraverseStep<'g>> {
        self.items.iter()
    }

    /// Target vertexes only, one per followed edge.
    pub fn vertexes(&self) -> impl Iterator<Item = &'g Vertex> + '_ {
        self.items.iter().map(|s| s.vertex)
    }

    pub fn edges(&self) -> impl Iterator<Item = &'g Edge> + '_ {
        self.items.iter().map(|s| s.edge)
    }
}

impl<'g> IntoIterator for TraverseSteps<'g> {
    type Item = TraverseStep<'g>;
    type IntoIter = std::vec::IntoIter<TraverseStep<'g>>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, 'g> IntoIterator for &'a TraverseSteps<'g> {
    type Item = &'a TraverseStep<'g>;
    type IntoIter = std::slice::Iter<'a, TraverseStep<'g>>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
