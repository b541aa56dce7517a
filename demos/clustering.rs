//! Every algorithm on a simple 2D dataset, selected through the registry.
//!
//! Run with `RUST_LOG=swarmclust=debug` to see per-run logging.

use swarmclust::{build_clusterer, Algorithm, ClustererConfig, Point};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // Three well-separated clusters in 2D, plus one outlier.
    let data: Vec<Point> = vec![
        // Cluster A (near origin)
        Point::from([0.0, 0.0]),
        Point::from([0.1, 0.2]),
        Point::from([0.2, 0.1]),
        Point::from([-0.1, 0.1]),
        // Cluster B (near (5, 5))
        Point::from([5.0, 5.0]),
        Point::from([5.1, 4.9]),
        Point::from([4.9, 5.1]),
        Point::from([5.2, 5.2]),
        // Cluster C (near (10, 0))
        Point::from([10.0, 0.0]),
        Point::from([10.1, 0.1]),
        Point::from([9.9, -0.1]),
        Point::from([10.2, 0.2]),
        // Outlier
        Point::from([20.0, 20.0]),
    ];

    let mut config = ClustererConfig {
        cluster_count: 3,
        seed: Some(42),
        ..Default::default()
    };
    config.dbscan.epsilon = 1.0;
    config.dbscan.min_points = 2;
    config.aco.grid_size = 40;
    config.aco.ants = 50;
    config.pso.max_iterations = 200;

    for algorithm in Algorithm::ALL {
        let clusterer = match build_clusterer(algorithm, &config) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("{algorithm}: {e}");
                continue;
            }
        };
        let out = match clusterer.cluster(&data) {
            Ok(out) => out,
            Err(e) => {
                eprintln!("{algorithm}: {e}");
                continue;
            }
        };

        println!(
            "=== {algorithm} ({} clusters, {:?}) ===",
            out.n_clusters(),
            out.termination()
        );
        for (i, label) in out.labels().iter().enumerate() {
            let tag = match label {
                Some(l) => format!("cluster {l}"),
                None => "NOISE".to_string(),
            };
            let c = data[i].coords();
            println!("  point {:2} ({:5.1}, {:5.1}) => {}", i, c[0], c[1], tag);
        }
        if let Some(history) = out.best_fitness_history() {
            if let (Some(first), Some(last)) = (history.first(), history.last()) {
                println!("  best fitness: {first:.3} -> {last:.3}");
            }
        }
        println!();
    }
}
