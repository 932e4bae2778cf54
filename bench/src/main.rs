use std::time::Instant;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use pathtrace_core::{bellman_ford, dijkstra, floyd_warshall, walk_predecessors};
use pathtrace_core::{Graph, NodeId, NodeKind};

fn main() {
    let args: Vec<String> = std::env::args().collect();

    let mode = args.get(1).map(|s| s.as_str()).unwrap_or("all");
    let node_count: usize = args.get(2).and_then(|s| s.parse().ok()).unwrap_or(200);

    if mode == "help" || mode == "--help" {
        println!("Usage: pathtrace-bench [mode] [node_count]");
        println!();
        println!("Modes:");
        println!("  all            Run all three algorithms (default)");
        println!("  bellman-ford   Single-source relaxation over all edges");
        println!("  dijkstra       Priority-frontier single-source search");
        println!("  floyd-warshall All-pairs dynamic programming (O(n^3))");
        println!();
        println!("Default node_count: 200");
        return;
    }

    if node_count == 0 {
        eprintln!("node_count must be at least 1. Use --help for options.");
        return;
    }

    println!("pathtrace-bench");
    println!("===============");
    println!();

    // Sparse, medium, dense — interactive-scale Erdős–Rényi graphs.
    for probability in [0.02, 0.1, 0.3] {
        run_benchmark(mode, node_count, probability);
    }
}

fn run_benchmark(mode: &str, node_count: usize, probability: f64) {
    let mut rng = StdRng::seed_from_u64(42);
    let mut graph = Graph::new(NodeKind::Integer);
    let t = Instant::now();
    if let Err(err) = graph.generate_random(node_count, probability, &mut rng) {
        eprintln!("generation failed: {}", err);
        return;
    }
    reweight(&mut graph, &mut rng);
    let gen_time = t.elapsed();

    println!(
        "--- p = {} — {} nodes, {} edges, generated in {:.1}ms ---",
        probability,
        graph.node_count(),
        graph.edge_count(),
        gen_time.as_secs_f64() * 1000.0
    );

    let source = NodeId::Integer(0);
    let destination = NodeId::Integer(node_count as i64 - 1);

    println!("{:>16} {:>10} {:>8} {:>10}", "algorithm", "time", "hops", "distance");
    println!("{:->16} {:->10} {:->8} {:->10}", "", "", "", "");

    if mode == "all" || mode == "bellman-ford" {
        let t = Instant::now();
        let outcome = bellman_ford(&graph, &source);
        let elapsed = t.elapsed();
        match outcome {
            Ok(tree) => {
                let path = walk_predecessors(&tree.pred, &source, &destination);
                report("bellman-ford", elapsed, &path, tree.distance(&destination));
            }
            Err(err) => println!("{:>16} {:>8.1}ms  {}", "bellman-ford", ms(elapsed), err),
        }
    }

    if mode == "all" || mode == "dijkstra" {
        let t = Instant::now();
        let outcome = dijkstra(&graph, &source);
        let elapsed = t.elapsed();
        match outcome {
            Ok(tree) => {
                let path = walk_predecessors(&tree.pred, &source, &destination);
                report("dijkstra", elapsed, &path, tree.distance(&destination));
            }
            Err(err) => println!("{:>16} {:>8.1}ms  {}", "dijkstra", ms(elapsed), err),
        }
    }

    if mode == "all" || mode == "floyd-warshall" {
        let t = Instant::now();
        let all_pairs = floyd_warshall(&graph);
        let elapsed = t.elapsed();
        let path = all_pairs.path(&source, &destination);
        report(
            "floyd-warshall",
            elapsed,
            &path,
            all_pairs.distance(&source, &destination),
        );
    }

    println!();
}

/// Replace the generator's unit weights with random weights in [0.5, 5).
fn reweight(graph: &mut Graph, rng: &mut StdRng) {
    let edges: Vec<(NodeId, NodeId)> = graph
        .edges()
        .map(|(from, to, _)| (from.clone(), to.clone()))
        .collect();
    for (from, to) in edges {
        let weight: f64 = rng.gen_range(0.5..5.0);
        graph
            .add_edge(from, to, weight)
            .expect("edge endpoints already exist");
    }
}

fn report(name: &str, elapsed: std::time::Duration, path: &[NodeId], distance: Option<f64>) {
    match distance {
        Some(d) => println!(
            "{:>16} {:>8.1}ms {:>8} {:>10.2}",
            name,
            ms(elapsed),
            path.len().saturating_sub(1),
            d
        ),
        None => println!("{:>16} {:>8.1}ms {:>8} {:>10}", name, ms(elapsed), "-", "no path"),
    }
}

fn ms(d: std::time::Duration) -> f64 {
    d.as_secs_f64() * 1000.0
}
