use swarmclust::{
    build_clusterer, build_clusterer_by_name, Algorithm, Clusterer, ClustererConfig, Error,
    Point, Termination,
};

/// Two groups of three: A near (0,0)-(1,1), B near (10,10)-(11,11).
fn two_groups() -> Vec<Point> {
    vec![
        Point::from([0.0, 0.0]),
        Point::from([1.0, 0.0]),
        Point::from([1.0, 1.0]),
        Point::from([10.0, 10.0]),
        Point::from([11.0, 10.0]),
        Point::from([11.0, 11.0]),
    ]
}

fn scenario_config() -> ClustererConfig {
    let mut config = ClustererConfig {
        cluster_count: 2,
        seed: Some(2024),
        ..Default::default()
    };
    // Keep the swarm runs short; the scenario is easy.
    config.aco.ants = 40;
    config.aco.grid_size = 30;
    config.aco.cycles = 20;
    config.pso.particles = 30;
    config.pso.max_iterations = 100;
    config.dbscan.epsilon = 2.0;
    config.dbscan.min_points = 2;
    config
}

fn assert_two_group_partition(algorithm: Algorithm, labels: &[Option<usize>]) {
    assert_eq!(labels.len(), 6, "{algorithm}");
    assert!(labels.iter().all(Option::is_some), "{algorithm}: {labels:?}");
    assert!(
        labels[0] == labels[1] && labels[1] == labels[2],
        "{algorithm}: {labels:?}"
    );
    assert!(
        labels[3] == labels[4] && labels[4] == labels[5],
        "{algorithm}: {labels:?}"
    );
    assert_ne!(labels[0], labels[3], "{algorithm}: {labels:?}");
}

#[test]
fn every_algorithm_finds_the_two_groups() {
    let data = two_groups();
    let config = scenario_config();
    for algorithm in Algorithm::ALL {
        let clusterer = build_clusterer(algorithm, &config).unwrap();
        let out = clusterer.cluster(&data).unwrap();
        assert_eq!(out.n_clusters(), 2, "{algorithm}");
        assert_two_group_partition(algorithm, out.labels());
        assert!(out.noise().is_empty(), "{algorithm}");
    }
}

#[test]
fn default_swarm_settings_find_the_two_groups() {
    let data = two_groups();
    let mut config = ClustererConfig {
        cluster_count: 2,
        seed: Some(5),
        ..Default::default()
    };
    config.pso.max_iterations = 50;
    let out = build_clusterer(Algorithm::Pso, &config)
        .unwrap()
        .cluster(&data)
        .unwrap();
    assert_two_group_partition(Algorithm::Pso, out.labels());
}

#[test]
fn centroid_diagnostics_are_exposed() {
    let data = two_groups();
    let config = scenario_config();
    for algorithm in [
        Algorithm::Kmeans,
        Algorithm::Competitive,
        Algorithm::Pso,
        Algorithm::Aco,
    ] {
        let out = build_clusterer(algorithm, &config)
            .unwrap()
            .cluster(&data)
            .unwrap();
        let centroids = out.centroids().unwrap();
        assert_eq!(centroids.len(), 2, "{algorithm}");
        assert!(centroids.iter().all(|c| c.dim() == 2));
    }

    let kmeans = build_clusterer(Algorithm::Kmeans, &config)
        .unwrap()
        .cluster(&data)
        .unwrap();
    let a = &kmeans.centroids().unwrap()[kmeans.label(0).unwrap()];
    assert!((a.coords()[0] - 2.0 / 3.0).abs() < 1e-9);
    assert!((a.coords()[1] - 1.0 / 3.0).abs() < 1e-9);
    assert!(matches!(
        kmeans.termination(),
        Termination::Converged { .. }
    ));
}

#[test]
fn isolated_point_is_dbscan_noise_only() {
    let mut data = two_groups();
    data.push(Point::from([50.0, -50.0]));
    let config = scenario_config();
    let out = build_clusterer(Algorithm::Dbscan, &config)
        .unwrap()
        .cluster(&data)
        .unwrap();
    assert_eq!(out.noise(), vec![6]);
    assert_eq!(out.n_clusters(), 2);
}

#[test]
fn invalid_input_is_reported_at_call_time() {
    let config = scenario_config();
    let mixed = vec![Point::from([0.0, 0.0]), Point::from([1.0, 2.0, 3.0])];
    for algorithm in Algorithm::ALL {
        let clusterer = build_clusterer(algorithm, &config).unwrap();
        assert_eq!(clusterer.cluster(&[]).unwrap_err(), Error::EmptyInput);
        let err = clusterer.cluster(&mixed).unwrap_err();
        assert!(err.is_invalid_input(), "{algorithm}: {err}");
    }
}

#[test]
fn huge_finite_coordinates_never_panic() {
    let data = vec![
        Point::from([1e200, -1e200]),
        Point::from([-1e200, 1e200]),
        Point::from([0.0, 0.0]),
    ];
    let config = scenario_config();
    for algorithm in Algorithm::ALL {
        let out = build_clusterer(algorithm, &config)
            .unwrap()
            .cluster(&data)
            .unwrap();
        assert_eq!(out.len(), 3, "{algorithm}");
        for l in out.labels().iter().flatten() {
            assert!(*l < out.n_clusters(), "{algorithm}: {:?}", out.labels());
        }
    }
}

#[test]
fn unknown_identifier_is_rejected() {
    let err = build_clusterer_by_name("genetic", &ClustererConfig::default()).err();
    assert!(matches!(err, Some(Error::UnknownAlgorithm(name)) if name == "genetic"));
}

#[test]
fn clusterers_can_run_on_separate_threads() {
    let config = scenario_config();
    let data = two_groups();
    std::thread::scope(|s| {
        let handles: Vec<_> = Algorithm::ALL
            .into_iter()
            .map(|algorithm| {
                let clusterer = build_clusterer(algorithm, &config).unwrap();
                let data = &data;
                s.spawn(move || clusterer.cluster(data).unwrap())
            })
            .collect();
        for h in handles {
            assert_eq!(h.join().unwrap().len(), 6);
        }
    });
}
