//! Pluggable point clustering.
//!
//! `swarmclust` groups points in Euclidean space with one of five
//! interchangeable algorithms behind the [`Clusterer`] trait:
//! - k-means (random distinct-point seeding, Lloyd iterations)
//! - competitive learning (online winner-take-all neurons)
//! - DBSCAN (density clustering with noise labeling)
//! - particle swarm optimization over centroid sets
//! - ant colony optimization over a grid of candidate centers
//!
//! Algorithms live under [`cluster`]. [`registry::build_clusterer`] builds one
//! from an [`Algorithm`] and a [`ClustererConfig`].
//!
//! ```rust
//! use swarmclust::{build_clusterer, Algorithm, ClustererConfig, Clusterer, Point};
//!
//! let points: Vec<Point> = vec![
//!     Point::from([0.0, 0.0]),
//!     Point::from([1.0, 1.0]),
//!     Point::from([10.0, 10.0]),
//!     Point::from([11.0, 11.0]),
//! ];
//! let config = ClustererConfig { cluster_count: 2, seed: Some(1), ..Default::default() };
//! let kmeans = build_clusterer(Algorithm::Kmeans, &config).unwrap();
//! let out = kmeans.cluster(&points).unwrap();
//! assert_eq!(out.n_clusters(), 2);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod cluster;
pub mod config;
pub mod error;
pub mod registry;

pub use cluster::{
    AcoClusterer, AcoParams, Assignment, Clusterer, CompetitiveLearning, CompetitiveParams,
    Dbscan, DbscanParams, Diagnostics, Kmeans, KmeansParams, PheromoneGrid, Point,
    PresentationOrder, PsoClusterer, PsoParams, Termination, NOISE,
};
pub use config::ClustererConfig;
pub use error::{Error, Result};
pub use registry::{build_clusterer, build_clusterer_by_name, Algorithm};
