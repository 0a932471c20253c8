use std::collections::VecDeque;

use serde::Serialize;

use crate::context::{BranchContext, GlobalPassedVertexes, TraverseContext};
use crate::error::GraphResult;
use crate::filter::FilterCondition;
use crate::graph::{Direction, EdgeId, VertexId};
use crate::repository::GraphRepository;

/// Parameters for [`walk`].
#[derive(Debug, Clone)]
pub struct WalkOptions {
    pub direction: Direction,
    /// Steps beyond the start vertex. 0 records only the start.
    pub max_depth: u32,
    pub condition: Option<FilterCondition>,
    /// Skip a neighbor already discovered by any branch. Cycles then end
    /// before they close, so no loop steps are recorded.
    pub unique_vertexes: bool,
    /// Upper bound on recorded steps. The start vertex is always recorded.
    pub max_steps: usize,
}

impl Default for WalkOptions {
    fn default() -> Self {
        Self {
            direction: Direction::Outgoing,
            max_depth: 8,
            condition: None,
            unique_vertexes: false,
            max_steps: 10_000,
        }
    }
}

/// One context visited by the walk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WalkStep {
    pub vertex_id: VertexId,
    /// `None` for the start vertex.
    pub edge_id: Option<EdgeId>,
    pub branch: usize,
    pub parent_branch: Option<usize>,
    pub depth: u32,
    pub is_loop: bool,
}

#[derive(Debug, Clone, Default)]
pub struct WalkResult {
    /// Steps in visiting order (breadth-first).
    pub steps: Vec<WalkStep>,
    pub branch_count: usize,
    pub loops_detected: usize,
    /// Distinct vertexes discovered by the run.
    pub vertexes_visited: usize,
    /// Set when `max_steps` cut the walk short.
    pub truncated: bool,
}

/// Breadth-first walk from `start_id`, one [`TraverseContext`] per step.
///
/// Each child context gets a copy of its parent's path plus the parent
/// vertex, so a context whose vertex is already on that path is a loop.
/// Loop contexts are recorded but not expanded. The first child of a
/// context stays on the parent's branch; every further child forks a new
/// one. All contexts of the run share one global passed set.
///
/// Every queued context is eventually recorded, so nothing is enqueued once
/// recorded plus queued steps reach `max_steps`.
pub fn walk<R>(repo: &R, start_id: &str, options: &WalkOptions) -> GraphResult<WalkResult>
where
    R: GraphRepository + ?Sized,
{
    let start = repo.get_vertex_by_id(start_id)?;
    let max_steps = options.max_steps.max(1);
    let global = GlobalPassedVertexes::new();
    global.insert(start);

    let mut queue: VecDeque<(TraverseContext<'_>, u32)> = VecDeque::new();
    queue.push_back((TraverseContext::root(start, BranchContext::root(), &global), 0));

    let mut result = WalkResult {
        branch_count: 1,
        ..WalkResult::default()
    };

    while let Some((ctx, depth)) = queue.pop_front() {
        let is_loop = ctx.is_loop();
        let branch = *ctx.branch_context();
        result.steps.push(WalkStep {
            vertex_id: ctx.vertex().id.clone(),
            edge_id: ctx.edge().map(|e| e.id.clone()),
            branch: branch.index,
            parent_branch: branch.parent_index,
            depth,
            is_loop,
        });

        if is_loop {
            result.loops_detected += 1;
            continue;
        }
        if depth >= options.max_depth {
            continue;
        }

        let children =
            repo.get_linked_vertexes(ctx.vertex(), options.direction, options.condition.as_ref())?;
        let path = ctx.path_for_child();
        let mut first = true;

        for step in children {
            if options.unique_vertexes && global.contains(&step.vertex.id) {
                continue;
            }
            if result.steps.len() + queue.len() >= max_steps {
                result.truncated = true;
                break;
            }
            global.insert(step.vertex);

            let child_branch = if first {
                first = false;
                branch
            } else {
                let forked = branch.fork(result.branch_count);
                result.branch_count += 1;
                forked
            };

            queue.push_back((
                TraverseContext::new(step.vertex, Some(step.edge), child_branch, &path, &global),
                depth + 1,
            ));
        }
    }

    result.vertexes_visited = global.len();

    tracing::debug!(
        start = start_id,
        steps = result.steps.len(),
        branches = result.branch_count,
        loops = result.loops_detected,
        visited = result.vertexes_visited,
        truncated = result.truncated,
        "walk finished"
    );

    Ok(result)
}
