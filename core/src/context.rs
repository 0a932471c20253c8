use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::graph::{Edge, Vertex};

/// Insertion-ordered set of vertexes keyed by id.
///
/// Used as a branch path (root first, most recent last) and as the
/// backing store of [`GlobalPassedVertexes`].
#[derive(Debug, Clone, Default)]
pub struct PassedVertexes<'g> {
    order: Vec<&'g Vertex>,
    index: HashMap<&'g str, usize>,
}

impl<'g> PassedVertexes<'g> {
    /// An empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `vertex` unless its id is already present.
    /// Returns true if it was added.
    pub fn insert(&mut self, vertex: &'g Vertex) -> bool {
        if self.index.contains_key(vertex.id.as_str()) {
            return false;
        }
        self.index.insert(vertex.id.as_str(), self.order.len());
        self.order.push(vertex);
        true
    }

    /// True if a vertex with `id` is present.
    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// The stored vertex with `id`, if any.
    pub fn get(&self, id: &str) -> Option<&'g Vertex> {
        self.index.get(id).map(|&i| self.order[i])
    }

    /// Most recently added vertex.
    pub fn last(&self) -> Option<&'g Vertex> {
        self.order.last().copied()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Vertexes in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &'g Vertex> + '_ {
        self.order.iter().copied()
    }

    /// Ids in insertion order.
    pub fn ids(&self) -> Vec<&'g str> {
        self.order.iter().map(|v| v.id.as_str()).collect()
    }
}

impl<'g> FromIterator<&'g Vertex> for PassedVertexes<'g> {
    fn from_iter<I: IntoIterator<Item = &'g Vertex>>(iter: I) -> Self {
        let mut passed = Self::new();
        for vertex in iter {
            passed.insert(vertex);
        }
        passed
    }
}

/// Vertexes seen by any branch of one traversal run.
///
/// Cloning yields another handle to the same set. The set only grows:
/// there is no removal. Access goes through a mutex so a check followed by
/// an append ([`GlobalPassedVertexes::insert`]) is atomic even when
/// branches are explored on several threads.
#[derive(Debug, Clone, Default)]
pub struct GlobalPassedVertexes<'g> {
    inner: Arc<Mutex<PassedVertexes<'g>>>,
}

impl<'g> GlobalPassedVertexes<'g> {
    /// A fresh set for a new run. Clone the handle to share it.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `vertex` unless already present. Returns true if it was added.
    pub fn insert(&self, vertex: &'g Vertex) -> bool {
        self.inner.lock().insert(vertex)
    }

    /// True if any branch has already recorded `id`.
    pub fn contains(&self, id: &str) -> bool {
        self.inner.lock().contains(id)
    }

    /// Number of distinct vertexes recorded so far.
    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    /// Ids in the order they were first recorded.
    pub fn ids(&self) -> Vec<&'g str> {
        self.inner.lock().ids()
    }

    /// Point-in-time copy of the set.
    pub fn snapshot(&self) -> PassedVertexes<'g> {
        self.inner.lock().clone()
    }

    /// Run `f` with the lock held.
    pub fn with<R>(&self, f: impl FnOnce(&PassedVertexes<'g>) -> R) -> R {
        f(&self.inner.lock())
    }

    /// True if both handles refer to the same run's set.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

/// Default per-branch accumulator: the branch's index and the branch it
/// forked from. The root branch is index 0 with no parent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct BranchContext {
    pub index: usize,
    pub parent_index: Option<usize>,
}

impl BranchContext {
    pub fn root() -> Self {
        Self::default()
    }

    /// A new branch with `index`, forked from this one.
    pub fn fork(&self, index: usize) -> Self {
        Self {
            index,
            parent_index: Some(self.index),
        }
    }
}

/// Snapshot of one traversal step.
///
/// Holds the current vertex, the edge that reached it (`None` at a root),
/// the branch accumulator, a private copy of the branch path, and a handle
/// to the run-wide passed set. Loop status is derived from the branch path
/// only.
#[derive(Debug, Clone)]
pub struct TraverseContext<'g, B = BranchContext> {
    vertex: &'g Vertex,
    edge: Option<&'g Edge>,
    branch_context: B,
    passed_vertexes: PassedVertexes<'g>,
    global_passed_vertexes: GlobalPassedVertexes<'g>,
}

impl<'g, B> TraverseContext<'g, B> {
    /// `passed_vertexes` is copied, so later changes to the caller's map are
    /// not seen here. `global_passed_vertexes` is shared.
    pub fn new(
        vertex: &'g Vertex,
        edge: Option<&'g Edge>,
        branch_context: B,
        passed_vertexes: &PassedVertexes<'g>,
        global_passed_vertexes: &GlobalPassedVertexes<'g>,
    ) -> Self {
        Self {
            vertex,
            edge,
            branch_context,
            passed_vertexes: passed_vertexes.clone(),
            global_passed_vertexes: global_passed_vertexes.clone(),
        }
    }

    /// Context for the first vertex of a traversal: no edge, empty path.
    pub fn root(
        vertex: &'g Vertex,
        branch_context: B,
        global_passed_vertexes: &GlobalPassedVertexes<'g>,
    ) -> Self {
        Self::new(
            vertex,
            None,
            branch_context,
            &PassedVertexes::new(),
            global_passed_vertexes,
        )
    }

    pub fn vertex(&self) -> &'g Vertex {
        self.vertex
    }

    pub fn edge(&self) -> Option<&'g Edge> {
        self.edge
    }

    pub fn branch_context(&self) -> &B {
        &self.branch_context
    }

    pub fn passed_vertexes(&self) -> &PassedVertexes<'g> {
        &self.passed_vertexes
    }

    pub fn global_passed_vertexes(&self) -> &GlobalPassedVertexes<'g> {
        &self.global_passed_vertexes
    }

    /// The vertex this branch arrived from, if any.
    pub fn prev_vertex(&self) -> Option<&'g Vertex> {
        self.passed_vertexes.last()
    }

    /// True when the current vertex is already on this branch's path.
    pub fn is_loop(&self) -> bool {
        self.passed_vertexes.contains(&self.vertex.id)
    }

    /// This context's path with the current vertex appended: the map a
    /// driver hands to each child context.
    pub fn path_for_child(&self) -> PassedVertexes<'g> {
        let mut path = self.passed_vertexes.clone();
        path.insert(self.vertex);
        path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vertexes() -> Vec<Vertex> {
        vec![
            Vertex::new("A", "x"),
            Vertex::new("B", "y"),
            Vertex::new("C", "x"),
        ]
    }

    #[test]
    fn test_passed_vertexes_ordered_and_unique() {
        let vs = vertexes();
        let mut passed = PassedVertexes::new();
        assert!(passed.insert(&vs[1]));
        assert!(passed.insert(&vs[0]));
        assert!(!passed.insert(&vs[1]));
        assert_eq!(passed.ids(), vec!["B", "A"]);
        assert_eq!(passed.last().map(|v| v.id.as_str()), Some("A"));
        assert_eq!(passed.get("B"), Some(&vs[1]));
        assert!(passed.get("C").is_none());
    }

    #[test]
    fn test_root_context() {
        let vs = vertexes();
        let global = GlobalPassedVertexes::new();
        let ctx = TraverseContext::root(&vs[0], BranchContext::root(), &global);
        assert!(!ctx.is_loop());
        assert!(ctx.prev_vertex().is_none());
        assert!(ctx.edge().is_none());
        assert_eq!(ctx.branch_context().index, 0);
        assert_eq!(ctx.branch_context().parent_index, None);
    }

    #[test]
    fn test_loop_when_vertex_on_path() {
        let vs = vertexes();
        let global = GlobalPassedVertexes::new();
        let path: PassedVertexes = vs.iter().collect();
        let ctx = TraverseContext::new(&vs[0], None, BranchContext::root(), &path, &global);
        assert!(ctx.is_loop());
        assert_eq!(ctx.prev_vertex().map(|v| v.id.as_str()), Some("C"));
    }

    #[test]
    fn test_no_loop_when_vertex_off_path() {
        let vs = vertexes();
        let global = GlobalPassedVertexes::new();
        let path: PassedVertexes = vs[..2].iter().collect();
        let ctx = TraverseContext::new(&vs[2], None, BranchContext::root(), &path, &global);
        assert!(!ctx.is_loop());
        assert_eq!(ctx.prev_vertex().map(|v| v.id.as_str()), Some("B"));
    }

    #[test]
    fn test_global_map_does_not_affect_loop() {
        let vs = vertexes();
        let global = GlobalPassedVertexes::new();
        global.insert(&vs[0]);
        let ctx = TraverseContext::root(&vs[0], BranchContext::root(), &global);
        assert!(!ctx.is_loop());
        assert!(ctx.global_passed_vertexes().contains("A"));
    }

    #[test]
    fn test_branch_map_is_copied() {
        let vs = vertexes();
        let global = GlobalPassedVertexes::new();
        let mut path = PassedVertexes::new();
        path.insert(&vs[0]);
        let ctx = TraverseContext::new(&vs[1], None, BranchContext::root(), &path, &global);

        path.insert(&vs[1]);
        assert_eq!(ctx.passed_vertexes().ids(), vec!["A"]);
        assert!(!ctx.is_loop());
    }

    #[test]
    fn test_global_map_is_shared() {
        let vs = vertexes();
        let global = GlobalPassedVertexes::new();
        let ctx = TraverseContext::root(&vs[0], BranchContext::root(), &global);
        assert!(ctx.global_passed_vertexes().is_empty());

        global.insert(&vs[2]);
        assert_eq!(ctx.global_passed_vertexes().ids(), vec!["C"]);
        assert!(ctx.global_passed_vertexes().ptr_eq(&global));

        // Appends through a context are visible to the run as well
        ctx.global_passed_vertexes().insert(&vs[1]);
        assert_eq!(global.len(), 2);
    }

    #[test]
    fn test_snapshot_is_detached() {
        let vs = vertexes();
        let global = GlobalPassedVertexes::new();
        global.insert(&vs[0]);
        let snap = global.snapshot();
        global.insert(&vs[1]);
        assert_eq!(snap.len(), 1);
        assert_eq!(global.with(|p| p.len()), 2);
    }

    #[test]
    fn test_path_for_child() {
        let vs = vertexes();
        let global = GlobalPassedVertexes::new();
        let root = TraverseContext::root(&vs[0], BranchContext::root(), &global);
        let child_path = root.path_for_child();
        assert_eq!(child_path.ids(), vec!["A"]);
        // The root's own path is untouched
        assert!(root.passed_vertexes().is_empty());

        let child = TraverseContext::new(&vs[1], None, BranchContext::root(), &child_path, &global);
        assert_eq!(child.prev_vertex().map(|v| v.id.as_str()), Some("A"));
    }

    #[test]
    fn test_branch_fork() {
        let root = BranchContext::root();
        let b = root.fork(3);
        assert_eq!(b.index, 3);
        assert_eq!(b.parent_index, Some(0));
        assert_eq!(b.fork(4).parent_index, Some(3));
    }

    #[test]
    fn test_custom_branch_context() {
        let vs = vertexes();
        let global = GlobalPassedVertexes::new();
        let ctx: TraverseContext<'_, &str> = TraverseContext::root(&vs[0], "left", &global);
        assert_eq!(*ctx.branch_context(), "left");
    }

    #[test]
    fn test_global_handle_crosses_threads() {
        let vs = vertexes();
        let global = GlobalPassedVertexes::new();
        std::thread::scope(|s| {
            for v in &vs {
                let handle = global.clone();
                s.spawn(move || {
                    handle.insert(v);
                    handle.insert(v);
                });
            }
        });
        assert_eq!(global.len(), 3);
    }
}
