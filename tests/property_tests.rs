use proptest::prelude::*;
use swarmclust::{
    build_clusterer, AcoParams, Algorithm, Clusterer, ClustererConfig, Dbscan, Kmeans,
    KmeansParams, Point,
};

fn points(raw: Vec<Vec<f64>>) -> Vec<Point> {
    raw.into_iter().map(Point::new).collect()
}

fn quick_config(k: usize) -> ClustererConfig {
    let mut config = ClustererConfig {
        cluster_count: k,
        seed: Some(42),
        ..Default::default()
    };
    config.aco.ants = 8;
    config.aco.grid_size = 8;
    config.aco.cycles = 4;
    config.pso.particles = 6;
    config.pso.max_iterations = 10;
    config.competitive.epochs = 10;
    config.dbscan.epsilon = 2.0;
    config.dbscan.min_points = 2;
    config
}

proptest! {
    #[test]
    fn prop_every_point_gets_one_label(
        data in prop::collection::vec(prop::collection::vec(-10.0f64..10.0, 2), 1..20),
        k in 1usize..5
    ) {
        let data = points(data);
        let config = quick_config(k);
        for algorithm in Algorithm::ALL {
            let out = build_clusterer(algorithm, &config).unwrap().cluster(&data).unwrap();
            prop_assert_eq!(out.len(), data.len());
            prop_assert!(out.n_clusters() <= data.len());
            if algorithm != Algorithm::Dbscan {
                prop_assert!(out.n_clusters() <= k);
                prop_assert!(out.noise().is_empty());
            }
            // Contiguous labels: every label in range and every cluster non-empty.
            for l in out.labels().iter().flatten() {
                prop_assert!(*l < out.n_clusters());
            }
            prop_assert!(out.clusters().iter().all(|c| !c.is_empty()));
        }
    }

    #[test]
    fn prop_kmeans_seeded_determinism(
        data in prop::collection::vec(prop::collection::vec(-10.0f64..10.0, 3), 1..30),
        k in 1usize..6,
        seed in any::<u64>()
    ) {
        let data = points(data);
        let params = KmeansParams { k, seed: Some(seed), ..Default::default() };
        let a = Kmeans::new(params.clone()).unwrap().cluster(&data).unwrap();
        let b = Kmeans::new(params).unwrap().cluster(&data).unwrap();
        prop_assert_eq!(a, b);
    }

    #[test]
    fn prop_dbscan_isolated_point_is_noise(
        data in prop::collection::vec(prop::collection::vec(0.0f64..5.0, 2), 1..15),
        min_points in 2usize..6
    ) {
        let mut data = points(data);
        data.push(Point::from([100.0, 100.0]));
        let out = Dbscan::with(1.0, min_points).unwrap().cluster(&data).unwrap();
        prop_assert_eq!(out.label(data.len() - 1), None);
    }

    #[test]
    fn prop_dbscan_min_points_one_has_no_noise(
        data in prop::collection::vec(prop::collection::vec(-50.0f64..50.0, 2), 1..25),
        epsilon in 0.1f64..5.0
    ) {
        let data = points(data);
        let out = Dbscan::with(epsilon, 1).unwrap().cluster(&data).unwrap();
        prop_assert!(out.noise().is_empty());
    }

    #[test]
    fn prop_swarm_best_fitness_monotone(
        data in prop::collection::vec(prop::collection::vec(-10.0f64..10.0, 2), 2..12),
        seed in any::<u64>()
    ) {
        let data = points(data);
        let mut config = quick_config(2);
        config.seed = Some(seed);
        for algorithm in [Algorithm::Pso, Algorithm::Aco] {
            let out = build_clusterer(algorithm, &config).unwrap().cluster(&data).unwrap();
            let history = out.best_fitness_history().unwrap();
            prop_assert!(history.windows(2).all(|w| w[1] <= w[0]));
        }
    }
}

#[test]
fn aco_default_params_roundtrip_through_config() {
    assert_eq!(ClustererConfig::default().aco_params(), AcoParams::default());
}
