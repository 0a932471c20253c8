use std::io::Write;

use graph_walk_core::{walk, SimpleGraphRepository, WalkOptions};

use crate::error::Result;

/// Run the reference walk and write one JSON line per step.
pub fn run<W: Write>(
    repo: &SimpleGraphRepository,
    start_id: &str,
    options: &WalkOptions,
    out: &mut W,
) -> Result<usize> {
    let result = walk(repo, start_id, options)?;

    for step in &result.steps {
        serde_json::to_writer(&mut *out, step)?;
        writeln!(out)?;
    }

    tracing::info!(
        start = start_id,
        direction = %options.direction,
        max_depth = options.max_depth,
        max_steps = options.max_steps,
        steps = result.steps.len(),
        branches = result.branch_count,
        loops = result.loops_detected,
        visited = result.vertexes_visited,
        truncated = result.truncated,
        "walk complete"
    );

    if result.truncated {
        tracing::warn!(
            max_steps = options.max_steps,
            "walk stopped at the step limit; raise --max-steps for more"
        );
    }

    Ok(result.steps.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::load::load_graph;
    use crate::load::tests::{settings_for, write_document, TRIANGLE};

    #[test]
    fn test_walk_lines() {
        let file = write_document(TRIANGLE);
        let repo = load_graph(&settings_for(file.path())).unwrap().repo;
        let mut out = Vec::new();
        let n = run(&repo, "A", &WalkOptions::default(), &mut out).unwrap();
        assert_eq!(n, 4);

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<serde_json::Value> = text
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(lines[0]["vertexId"], "A");
        assert!(lines[0]["edgeId"].is_null());
        assert_eq!(lines[3]["vertexId"], "A");
        assert_eq!(lines[3]["edgeId"], "ca");
        assert_eq!(lines[3]["isLoop"], true);
        assert_eq!(lines[3]["depth"], 3);
    }

    #[test]
    fn test_walk_lines_capped() {
        let file = write_document(TRIANGLE);
        let repo = load_graph(&settings_for(file.path())).unwrap().repo;
        let options = WalkOptions {
            max_steps: 2,
            ..WalkOptions::default()
        };
        let mut out = Vec::new();
        let n = run(&repo, "A", &options, &mut out).unwrap();
        assert_eq!(n, 2);
        assert_eq!(String::from_utf8(out).unwrap().lines().count(), 2);
    }
}
