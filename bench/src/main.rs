use std::collections::VecDeque;
use std::time::Instant;

use clap::{Parser, ValueEnum};
use graph_walk_core::{
    walk, Direction, Edge, FilterCondition, GraphRepository, SimpleGraphRepository, Vertex,
    WalkOptions,
};

/// Benchmark neighbor queries and walks over synthetic typed graphs.
#[derive(Parser, Debug)]
#[command(name = "graph-walk-bench", about, long_about = None)]
struct Args {
    /// Graph generator to run
    #[arg(value_enum, default_value = "all")]
    mode: Mode,

    /// Number of vertexes to generate
    #[arg(default_value_t = 200_000)]
    vertex_count: u64,

    /// Follow edges forward (outgoing) or backward (incoming)
    #[arg(long, value_enum, default_value = "both")]
    direction: BenchDirection,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Mode {
    /// Run all generators and benchmark each
    All,
    /// Fractal branching tree (deep paths)
    Lsystem,
    /// Preferential attachment via edge sampling (hub-and-spoke)
    Scalefree,
    /// Watts-Strogatz ring lattice + shortcuts
    Smallworld,
    /// Erdos-Renyi uniform random edges
    Random,
    /// Organic branching with occasional back-links
    Dla,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum BenchDirection {
    Outgoing,
    Incoming,
    Both,
}

impl BenchDirection {
    fn directions(self) -> &'static [Direction] {
        match self {
            BenchDirection::Outgoing => &[Direction::Outgoing],
            BenchDirection::Incoming => &[Direction::Incoming],
            BenchDirection::Both => &[Direction::Outgoing, Direction::Incoming],
        }
    }
}

type Generator = fn(u64) -> SimpleGraphRepository;

fn main() {
    let args = Args::parse();

    println!("graph-walk-bench");
    println!("================");
    println!();

    let generators: Vec<(&str, Generator)> = match args.mode {
        Mode::Lsystem => vec![("L-system tree", gen_lsystem)],
        Mode::Scalefree => vec![("Scale-free (edge sampling)", gen_scale_free)],
        Mode::Smallworld => vec![("Small-world (Watts-Strogatz)", gen_small_world)],
        Mode::Random => vec![("Erdos-Renyi random", gen_random)],
        Mode::Dla => vec![("DLA (organic branching)", gen_dla)],
        Mode::All => vec![
            ("L-system tree", gen_lsystem as Generator),
            ("Scale-free (edge sampling)", gen_scale_free),
            ("Small-world (Watts-Strogatz)", gen_small_world),
            ("Erdos-Renyi random", gen_random),
            ("DLA (organic branching)", gen_dla),
        ],
    };

    for (name, generator) in generators {
        run_benchmark(name, generator, args.vertex_count, args.direction);
    }
}

fn run_benchmark(name: &str, generator: Generator, vertex_count: u64, direction: BenchDirection) {
    println!("--- {} ---", name);
    println!("Target: {} vertexes", vertex_count);

    let t = Instant::now();
    let repo = generator(vertex_count);
    let gen_time = t.elapsed();
    println!(
        "Generated in {:.2}s: {} vertexes, {} edges, ~{:.0}MB",
        gen_time.as_secs_f64(),
        repo.vertex_count(),
        repo.edge_count(),
        repo.memory_usage() as f64 / 1_048_576.0
    );

    for &dir in direction.directions() {
        println!();
        println!("[{}]", dir);
        bench_neighbor_queries(&repo, dir);
        bench_walks(&repo, dir);
    }
    println!();
}

/// One unfiltered and one filtered neighbor query per vertex.
fn bench_neighbor_queries(repo: &SimpleGraphRepository, direction: Direction) {
    let filter = FilterCondition::new()
        .exclude_edge_types(["CONTRADICTS"])
        .exclude_vertex_types(["Seed"]);

    for (label, condition) in [("unfiltered", None), ("filtered", Some(&filter))] {
        let t = Instant::now();
        let mut found = 0usize;
        let mut errors = 0usize;
        for vertex in repo.vertexes() {
            match repo.get_linked_vertexes(vertex, direction, condition) {
                Ok(steps) => found += steps.len(),
                Err(_) => errors += 1,
            }
        }
        let elapsed = t.elapsed();
        println!(
            "{:>12} queries: {:>10} results {:>6} errors {:>8.1}ms ({:.0}ns/query)",
            label,
            found,
            errors,
            elapsed.as_secs_f64() * 1000.0,
            elapsed.as_nanos() as f64 / repo.vertex_count().max(1) as f64
        );
    }
}

fn bench_walks(repo: &SimpleGraphRepository, direction: Direction) {
    let Some(start) = repo.vertexes().first().map(|v| v.id.clone()) else {
        return;
    };

    println!(
        "{:>8} {:>12} {:>10} {:>8} {:>10}",
        "depth", "steps", "branches", "loops", "time"
    );
    println!("{:->8} {:->12} {:->10} {:->8} {:->10}", "", "", "", "", "");

    for depth in [1, 2, 3, 5, 10, 20, 50] {
        let options = WalkOptions {
            direction,
            max_depth: depth,
            condition: None,
            unique_vertexes: true,
            max_steps: usize::MAX,
        };
        let t = Instant::now();
        let result = match walk(repo, &start, &options) {
            Ok(result) => result,
            Err(e) => {
                println!("{:>8} failed: {}", depth, e);
                break;
            }
        };
        let elapsed = t.elapsed();
        println!(
            "{:>8} {:>12} {:>10} {:>8} {:>8.1}ms",
            depth,
            result.steps.len(),
            result.branch_count,
            result.loops_detected,
            elapsed.as_secs_f64() * 1000.0
        );
        // Stop if we already found everything
        if result.vertexes_visited >= repo.vertex_count() {
            println!("{:>8} (entire graph reached)", "");
            break;
        }
    }

    // Every path, not just every vertex: kept shallow, it grows with degree^depth
    let options = WalkOptions {
        direction,
        max_depth: 3,
        condition: None,
        unique_vertexes: false,
        max_steps: usize::MAX,
    };
    let t = Instant::now();
    if let Ok(result) = walk(repo, &start, &options) {
        println!(
            "all paths to depth 3: {} steps, {} loops in {:.1}ms",
            result.steps.len(),
            result.loops_detected,
            t.elapsed().as_secs_f64() * 1000.0
        );
    }
}

// ---------------------------------------------------------------------------
// Generators: all O(n) or O(n + edges), single-threaded, deterministic
// ---------------------------------------------------------------------------

/// Simple LCG for deterministic, fast pseudo-random numbers.
struct FastRng(u64);

impl FastRng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next(&mut self, max: u64) -> u64 {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.0 >> 33) % max
    }
    fn next_f64(&mut self) -> f64 {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.0 >> 11) as f64 / (1u64 << 53) as f64
    }
}

const EDGE_TYPES: [&str; 5] = ["IMPLIES", "SUPPORTS", "CONTRADICTS", "RELATED_TO", "REQUIRES"];

/// Accumulates vertexes and edges with sequential ids, then builds the
/// repository in one pass.
struct GraphBuilder {
    vertexes: Vec<Vertex>,
    edges: Vec<Edge>,
}

impl GraphBuilder {
    fn with_capacity(vertex_count: u64, edge_count: u64) -> Self {
        Self {
            vertexes: Vec::with_capacity(vertex_count as usize),
            edges: Vec::with_capacity(edge_count as usize),
        }
    }

    fn vertex(&mut self, id: u64, vertex_type: &str) {
        self.vertexes.push(Vertex::new(format!("v{}", id), vertex_type));
    }

    fn edge(&mut self, from: u64, to: u64, rng: &mut FastRng) {
        let edge_type = EDGE_TYPES[rng.next(EDGE_TYPES.len() as u64) as usize];
        self.typed_edge(from, to, edge_type);
    }

    fn typed_edge(&mut self, from: u64, to: u64, edge_type: &str) {
        let id = self.edges.len();
        self.edges.push(Edge::new(
            format!("e{}", id),
            edge_type,
            format!("v{}", from),
            format!("v{}", to),
        ));
    }

    fn build(self) -> SimpleGraphRepository {
        SimpleGraphRepository::new(self.vertexes, self.edges)
    }
}

/// L-system fractal tree: deep branching with self-similar structure.
///
/// Each vertex spawns `branching` children. Produces deep paths (log depth)
/// with exponential width.
fn gen_lsystem(vertex_count: u64) -> SimpleGraphRepository {
    let mut graph = GraphBuilder::with_capacity(vertex_count, vertex_count);
    let mut rng = FastRng::new(42);

    let branching = 3u64;
    graph.vertex(0, "Root");

    let mut next_id: u64 = 1;
    let mut frontier: Vec<u64> = vec![0];

    while next_id < vertex_count && !frontier.is_empty() {
        let mut next_frontier = Vec::with_capacity(frontier.len() * branching as usize);
        for &parent in &frontier {
            for _ in 0..branching {
                if next_id >= vertex_count {
                    break;
                }
                let child = next_id;
                next_id += 1;
                graph.vertex(child, "Concept");
                graph.edge(parent, child, &mut rng);
                next_frontier.push(child);
            }
        }
        frontier = next_frontier;
    }

    graph.build()
}

/// Scale-free via edge-list sampling (O(edges), not O(n²)).
///
/// Preferential attachment by picking a random existing edge endpoint.
/// Vertexes with more edges are more likely to be picked.
fn gen_scale_free(vertex_count: u64) -> SimpleGraphRepository {
    let edges_per_vertex = 10u64;
    let mut graph = GraphBuilder::with_capacity(vertex_count, vertex_count * edges_per_vertex);
    let mut rng = FastRng::new(12345);

    let mut endpoints: Vec<u64> = Vec::with_capacity((vertex_count * edges_per_vertex * 2) as usize);

    // Seed: small clique
    let seed = 5u64.min(vertex_count);
    for i in 0..seed {
        graph.vertex(i, "Seed");
    }
    for i in 0..seed {
        for j in (i + 1)..seed {
            graph.edge(i, j, &mut rng);
            endpoints.push(i);
            endpoints.push(j);
        }
    }

    for new_vertex in seed..vertex_count {
        graph.vertex(new_vertex, "Concept");

        let attach = edges_per_vertex.min(new_vertex);
        for _ in 0..attach {
            let idx = rng.next(endpoints.len() as u64) as usize;
            let target = endpoints[idx];
            if target != new_vertex {
                graph.edge(new_vertex, target, &mut rng);
                endpoints.push(new_vertex);
                endpoints.push(target);
            }
        }
    }

    graph.build()
}

/// Small-world (Watts-Strogatz): ring lattice + random rewiring.
fn gen_small_world(vertex_count: u64) -> SimpleGraphRepository {
    let k = 10u64; // neighbors on each side
    let p = 0.05f64; // rewire probability
    let mut graph = GraphBuilder::with_capacity(vertex_count, vertex_count * k);
    let mut rng = FastRng::new(67890);

    for i in 0..vertex_count {
        graph.vertex(i, "Concept");
    }

    for i in 0..vertex_count {
        for j in 1..=k {
            let neighbor = (i + j) % vertex_count;
            if rng.next_f64() < p {
                let rewired = rng.next(vertex_count);
                graph.edge(i, if rewired != i { rewired } else { neighbor }, &mut rng);
            } else {
                graph.edge(i, neighbor, &mut rng);
            }
        }
    }

    graph.build()
}

/// Erdos-Renyi: ~10 uniform random edges per vertex, self-loops kept.
fn gen_random(vertex_count: u64) -> SimpleGraphRepository {
    let target_edges = vertex_count * 10;
    let mut graph = GraphBuilder::with_capacity(vertex_count, target_edges);
    let mut rng = FastRng::new(54321);

    for i in 0..vertex_count {
        graph.vertex(i, if i % 7 == 0 { "Seed" } else { "Concept" });
    }

    for _ in 0..target_edges {
        let from = rng.next(vertex_count);
        let to = rng.next(vertex_count);
        graph.edge(from, to, &mut rng);
    }

    graph.build()
}

/// DLA-style growth: each new vertex attaches to a recent "surface" vertex,
/// with an occasional second link that closes a cycle.
fn gen_dla(vertex_count: u64) -> SimpleGraphRepository {
    let mut graph = GraphBuilder::with_capacity(vertex_count, vertex_count * 2);
    let mut rng = FastRng::new(77777);

    graph.vertex(0, "Seed");

    let surface_max = 10000usize;
    let mut surface: VecDeque<u64> = VecDeque::with_capacity(surface_max + 1);
    surface.push_back(0);

    for new_vertex in 1..vertex_count {
        graph.vertex(new_vertex, "Concept");

        let attach_to = surface[rng.next(surface.len() as u64) as usize];
        graph.typed_edge(attach_to, new_vertex, "GROWS");

        // 10% chance of a back-link
        if rng.next(10) == 0 && new_vertex > 1 {
            let other = rng.next(new_vertex);
            if other != attach_to {
                graph.edge(new_vertex, other, &mut rng);
            }
        }

        surface.push_back(new_vertex);
        if surface.len() > surface_max {
            surface.pop_front();
        }
    }

    graph.build()
}
