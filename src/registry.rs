//! Algorithm selection: identifier + configuration → clusterer.

use crate::cluster::{AcoClusterer, Clusterer, CompetitiveLearning, Dbscan, Kmeans, PsoClusterer};
use crate::config::ClustererConfig;
use crate::error::{Error, Result};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// The fixed set of available algorithms.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Algorithm {
    /// Ant colony optimization.
    Aco,
    /// Particle swarm optimization.
    Pso,
    /// Winner-take-all competitive network.
    Competitive,
    /// Density-based clustering.
    Dbscan,
    /// Lloyd's k-means.
    Kmeans,
}

impl Algorithm {
    /// Every algorithm, in a stable order.
    pub const ALL: [Algorithm; 5] = [
        Algorithm::Aco,
        Algorithm::Pso,
        Algorithm::Competitive,
        Algorithm::Dbscan,
        Algorithm::Kmeans,
    ];

    /// Canonical identifier.
    pub fn as_str(self) -> &'static str {
        match self {
            Algorithm::Aco => "aco",
            Algorithm::Pso => "pso",
            Algorithm::Competitive => "competitive",
            Algorithm::Dbscan => "dbscan",
            Algorithm::Kmeans => "kmeans",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Algorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "aco" | "ant-colony" => Ok(Algorithm::Aco),
            "pso" | "particle-swarm" => Ok(Algorithm::Pso),
            "competitive" | "competitive-network" => Ok(Algorithm::Competitive),
            "dbscan" => Ok(Algorithm::Dbscan),
            "kmeans" | "k-means" => Ok(Algorithm::Kmeans),
            _ => Err(Error::UnknownAlgorithm(s.to_string())),
        }
    }
}

/// Build a validated clusterer for `algorithm` from `config`.
///
/// Out-of-domain tunables fail here, before any point is seen.
pub fn build_clusterer(
    algorithm: Algorithm,
    config: &ClustererConfig,
) -> Result<Box<dyn Clusterer + Send + Sync>> {
    debug!(%algorithm, "building clusterer");
    let clusterer: Box<dyn Clusterer + Send + Sync> = match algorithm {
        Algorithm::Aco => Box::new(AcoClusterer::new(config.aco_params())?),
        Algorithm::Pso => Box::new(PsoClusterer::new(config.pso_params())?),
        Algorithm::Competitive => Box::new(CompetitiveLearning::new(config.competitive_params())?),
        Algorithm::Dbscan => Box::new(Dbscan::new(config.dbscan_params())?),
        Algorithm::Kmeans => Box::new(Kmeans::new(config.kmeans_params())?),
    };
    Ok(clusterer)
}

/// [`build_clusterer`] keyed by identifier string.
pub fn build_clusterer_by_name(
    name: &str,
    config: &ClustererConfig,
) -> Result<Box<dyn Clusterer + Send + Sync>> {
    build_clusterer(name.parse()?, config)
}
