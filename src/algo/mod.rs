//! Ranking algorithms: random-surfer sampling and fixed-point iteration.
//!
//! Both take a read-only [`LinkGraph`] and return a fresh [`RankVector`];
//! neither depends on the other.

pub mod iteration;
pub mod sampling;

pub use iteration::{iterate_pagerank, iterate_pagerank_with_stats, IterationOutcome};
pub use sampling::{sample_pagerank, sample_pagerank_with_rng};

use crate::config::RankConfig;
use crate::error::Result;
use crate::graph::LinkGraph;
use crate::rank::RankVector;

/// Which ranker to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Sampling,
    Iteration,
}

impl Method {
    pub const ALL: [Method; 2] = [Method::Sampling, Method::Iteration];

    pub fn rank(self, graph: &LinkGraph, config: RankConfig) -> Result<RankVector> {
        match self {
            Self::Sampling => sample_pagerank(graph, config),
            Self::Iteration => iterate_pagerank(graph, config),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Sampling => "sampling",
            Self::Iteration => "iteration",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_methods_agree_on_cycle() {
        let graph =
            LinkGraph::from_links([("a", vec!["b"]), ("b", vec!["c"]), ("c", vec!["a"])]).unwrap();
        let cfg = RankConfig::default().with_seed(7).with_sample_count(30_000);
        let sampled = Method::Sampling.rank(&graph, cfg).unwrap();
        let iterated = Method::Iteration.rank(&graph, cfg).unwrap();
        for (page, score) in iterated.iter() {
            assert!((score - 1.0 / 3.0).abs() < 1e-3);
            assert!((sampled.get(page.as_str()).unwrap() - score).abs() < 0.02);
        }
    }
}
