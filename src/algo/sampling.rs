//! Random-surfer PageRank estimate.
//!
//! Simulates one long walk: the first page is drawn uniformly, every later
//! page from the current page's transition distribution. A page's rank is the
//! share of steps spent on it, so the ranks sum to 1.0 without a separate
//! normalization pass.

use crate::config::RankConfig;
use crate::error::Result;
use crate::graph::LinkGraph;
use crate::rank::RankVector;
use crate::transition::TransitionTable;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::debug;

/// Estimate PageRank by sampling `config.sample_count` pages.
///
/// Seeded from `config.seed` when present, so runs are reproducible;
/// otherwise the walk draws from OS entropy.
pub fn sample_pagerank(graph: &LinkGraph, config: RankConfig) -> Result<RankVector> {
    let mut rng = match config.seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    };
    sample_pagerank_with_rng(graph, config, &mut rng)
}

/// Same as [`sample_pagerank`], driven by a caller-supplied generator.
/// `config.seed` is ignored.
#[allow(clippy::cast_precision_loss)]
pub fn sample_pagerank_with_rng<R: Rng>(
    graph: &LinkGraph,
    config: RankConfig,
    rng: &mut R,
) -> Result<RankVector> {
    config.validate()?;
    let adj = graph.adjacency()?;
    let n = adj.len();
    let table = TransitionTable::new(&adj, config.damping);

    let mut visits = vec![0usize; n];
    let mut current = rng.gen_range(0..n);
    visits[current] += 1;
    for _ in 1..config.sample_count {
        current = table.step(current, rng);
        visits[current] += 1;
    }

    let samples = config.sample_count as f64;
    let scores: Vec<f64> = visits.iter().map(|&v| v as f64 / samples).collect();
    let ranks = RankVector::from_aligned(&adj.pages, &scores);

    let total = ranks.sum();
    debug_assert!((total - 1.0).abs() < 1e-9, "visit shares sum to {total}");
    debug!(
        pages = n,
        samples = config.sample_count,
        total,
        "random-surfer sampling finished"
    );
    Ok(ranks)
}
