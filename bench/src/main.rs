use std::time::Instant;

use clap::{Parser, ValueEnum};
use graph_engine_core::{breadth_first, depth_first, widest_path, Graph};

/// Benchmark BFS, DFS and widest-path queries on synthetic weighted graphs
#[derive(Parser, Debug)]
#[command(name = "graph-engine-bench")]
struct Args {
    /// Which generator to run
    #[arg(value_enum, default_value = "all")]
    mode: Mode,

    /// Target node count
    #[arg(long, short, default_value_t = 1_000_000)]
    nodes: u64,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    /// Run every generator
    All,
    /// Fractal branching tree (deep paths)
    Lsystem,
    /// Watts-Strogatz ring lattice + shortcuts
    Smallworld,
    /// Erdos-Renyi uniform random edges
    Random,
    /// Two dense clusters joined by a thin, narrow bridge
    Barbell,
}

type Generator = fn(u64) -> Graph;

fn main() {
    let args = Args::parse();

    println!("graph-engine-bench");
    println!("==================");
    println!();

    let generators: Vec<(&str, Generator)> = match args.mode {
        Mode::Lsystem => vec![("L-system tree", gen_lsystem)],
        Mode::Smallworld => vec![("Small-world (Watts-Strogatz)", gen_small_world)],
        Mode::Random => vec![("Erdos-Renyi random", gen_random)],
        Mode::Barbell => vec![("Barbell (cluster-bridge-cluster)", gen_barbell)],
        Mode::All => vec![
            ("L-system tree", gen_lsystem as Generator),
            ("Small-world (Watts-Strogatz)", gen_small_world),
            ("Erdos-Renyi random", gen_random),
            ("Barbell (cluster-bridge-cluster)", gen_barbell),
        ],
    };

    for (name, generator) in generators {
        run_benchmark(name, generator, args.nodes.max(2));
    }
}

fn run_benchmark(name: &str, generator: Generator, node_count: u64) {
    println!("--- {} ---", name);
    println!("Target: {} nodes", node_count);

    let t = Instant::now();
    let graph = generator(node_count);
    println!(
        "Generated in {:.2}s: {} nodes, {} edges",
        t.elapsed().as_secs_f64(),
        graph.node_count(),
        graph.edge_count()
    );

    let start = node_id(0);
    let far = node_id(graph.node_count() as u64 - 1);

    println!();
    println!("{:>8} {:>12} {:>10}", "query", "visited", "time");
    println!("{:->8} {:->12} {:->10}", "", "", "");

    let t = Instant::now();
    match breadth_first(&graph, &start, None) {
        Ok(order) => println!("{:>8} {:>12} {:>8.1}ms", "bfs", order.len(), ms(t)),
        Err(e) => println!("{:>8} error: {}", "bfs", e),
    }

    let t = Instant::now();
    match depth_first(&graph, &start, None) {
        Ok(order) => println!("{:>8} {:>12} {:>8.1}ms", "dfs", order.len(), ms(t)),
        Err(e) => println!("{:>8} error: {}", "dfs", e),
    }

    println!();
    let t = Instant::now();
    match widest_path(&graph, &start, &far, None) {
        Ok(result) if result.is_reachable() => println!(
            "Widest path {} → {}: capacity {}, {} hops in {:.1}ms",
            start,
            far,
            result.capacity,
            result.hops(),
            ms(t)
        ),
        Ok(_) => println!("Widest path {} → {}: no path ({:.1}ms)", start, far, ms(t)),
        Err(e) => println!("Widest path {} → {}: error: {}", start, far, e),
    }
    println!();
}

fn ms(t: Instant) -> f64 {
    t.elapsed().as_secs_f64() * 1000.0
}

fn node_id(i: u64) -> String {
    format!("c_{}", i)
}

// ---------------------------------------------------------------------------
// Generators: O(n + edges), single-threaded, deterministic
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
    /// Edge weight in 1..=100.
    fn weight(&mut self) -> f64 {
        (self.next(100) + 1) as f64
    }
}

fn with_nodes(node_count: u64, edge_hint: u64) -> Graph {
    let mut graph = Graph::with_capacity(node_count as usize, edge_hint as usize);
    for i in 0..node_count {
        graph.add_node(node_id(i));
    }
    graph
}

/// L-system fractal tree: every node spawns three children.
///
/// Log-depth paths with exponential width; the widest path to the last leaf
/// is the unique tree path, so it exercises reconstruction depth.
fn gen_lsystem(node_count: u64) -> Graph {
    let mut graph = with_nodes(node_count, node_count);
    let mut rng = FastRng::new(42);

    let branching = 3u64;
    let mut next_id: u64 = 1;
    let mut frontier: Vec<u64> = vec![0];

    while next_id < node_count && !frontier.is_empty() {
        let mut next_frontier = Vec::with_capacity(frontier.len() * branching as usize);
        for &parent in &frontier {
            for _ in 0..branching {
                if next_id >= node_count {
                    break;
                }
                let child = next_id;
                next_id += 1;
                graph.add_edge(node_id(parent), node_id(child), rng.weight());
                next_frontier.push(child);
            }
        }
        frontier = next_frontier;
    }

    graph
}

/// Small-world (Watts-Strogatz): ring lattice + random rewiring.
///
/// Each node links to its K ring successors; each link is rewired to a random
/// node with probability p. Many alternative routes, so lots of stale
/// frontier entries in the widest-path search.
fn gen_small_world(node_count: u64) -> Graph {
    let k = 5u64;
    let p = 0.05f64;
    let mut graph = with_nodes(node_count, node_count * k);
    let mut rng = FastRng::new(67890);

    for i in 0..node_count {
        for j in 1..=k {
            let mut target = (i + j) % node_count;
            if rng.next_f64() < p {
                let rewired = rng.next(node_count);
                if rewired != i {
                    target = rewired;
                }
            }
            graph.add_edge(node_id(i), node_id(target), rng.weight());
        }
    }

    graph
}

/// Erdos-Renyi: ~5 uniform random edges per node, no structure.
fn gen_random(node_count: u64) -> Graph {
    let target_edges = node_count * 5;
    let mut graph = with_nodes(node_count, target_edges);
    let mut rng = FastRng::new(54321);

    for _ in 0..target_edges {
        let from = rng.next(node_count);
        let to = rng.next(node_count);
        if from != to {
            graph.add_edge(node_id(from), node_id(to), rng.weight());
        }
    }

    graph
}

/// Barbell: two dense clusters joined by a chain of weight-1 bridge edges.
///
/// Every path between the halves crosses the bridge, so whenever node 0
/// reaches the last node the widest path between them has capacity 1.
fn gen_barbell(node_count: u64) -> Graph {
    let bridge_len = 10u64.min(node_count / 2);
    let cluster = (node_count - bridge_len) / 2;
    let total = cluster * 2 + bridge_len;
    let mut graph = with_nodes(total, cluster * 20 + bridge_len + 1);
    let mut rng = FastRng::new(99999);

    let mut fill_cluster = |graph: &mut Graph, offset: u64| {
        for i in 0..cluster {
            for _ in 0..10u64.min(cluster.saturating_sub(1)) {
                let target = rng.next(cluster);
                if target != i {
                    graph.add_edge(node_id(offset + i), node_id(offset + target), rng.weight());
                }
            }
        }
    };

    fill_cluster(&mut graph, 0);
    let b_start = cluster + bridge_len;
    fill_cluster(&mut graph, b_start);

    // Chain: last node of cluster A, through the bridge, to first node of B.
    let mut prev = cluster.saturating_sub(1);
    for id in cluster..=b_start.min(total - 1) {
        graph.add_edge(node_id(prev), node_id(id), 1.0);
        prev = id;
    }

    graph
}
