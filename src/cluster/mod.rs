//! Clustering algorithms for grouping points in Euclidean space.
//!
//! Every algorithm implements [`Clusterer`]: hand it a slice of [`Point`]s,
//! get back an [`Assignment`] with one label per point.
//!
//! ## Algorithms
//!
//! ### K-means
//!
//! The classic algorithm: assign each point to the nearest centroid, then
//! update centroids to the mean of their points. Repeat until nothing moves.
//!
//! **Objective**: Minimize within-cluster sum of squares:
//!
//! ```text
//! J = Σ_k Σ_{x ∈ C_k} ||x - μ_k||²
//! ```
//!
//! ### Competitive learning
//!
//! An online, winner-take-all variant of the same objective: points are
//! presented one at a time and only the closest neuron moves toward each.
//!
//! ### DBSCAN
//!
//! Density-based clustering that can discover non-convex clusters and identify
//! outliers (noise points). DBSCAN does not require specifying the number of
//! clusters in advance.
//!
//! ### PSO and ACO
//!
//! Two population-based global optimizers of the k-means objective. A
//! particle swarm searches continuous centroid space; an ant colony searches a
//! discretized grid of candidate centers, guided by pheromone. Both run a
//! fixed budget and report their best-so-far fitness per iteration.
//!
//! ## Usage
//!
//! ```rust
//! use swarmclust::cluster::{Clusterer, Dbscan, Kmeans, KmeansParams, Point};
//!
//! let data: Vec<Point> = vec![
//!     Point::from([0.0, 0.0]),
//!     Point::from([0.1, 0.1]),
//!     Point::from([10.0, 10.0]),
//!     Point::from([10.1, 10.1]),
//! ];
//!
//! // Hard clustering with K-means
//! let kmeans = Kmeans::new(KmeansParams { k: 2, seed: Some(42), ..Default::default() }).unwrap();
//! let out = kmeans.cluster(&data).unwrap();
//! assert_eq!(out.label(0), out.label(1));  // First two together
//! assert_ne!(out.label(0), out.label(2));  // Separate from last two
//!
//! // Density-based clustering with DBSCAN (noise as `None`)
//! let out = Dbscan::with(0.5, 2).unwrap().cluster(&data).unwrap();
//! assert_eq!(out.len(), data.len());
//! assert!(out.noise().is_empty());
//! ```

mod aco;
mod assignment;
mod competitive;
mod dbscan;
mod kmeans;
mod point;
mod pso;
mod traits;
mod util;

pub use aco::{AcoClusterer, AcoParams};
pub use assignment::{Assignment, Diagnostics, PheromoneGrid, Termination};
pub use competitive::{CompetitiveLearning, CompetitiveParams, PresentationOrder};
pub use dbscan::{Dbscan, DbscanParams, NOISE};
pub use kmeans::{Kmeans, KmeansParams};
pub use point::Point;
pub use pso::{PsoClusterer, PsoParams};
pub use traits::Clusterer;
