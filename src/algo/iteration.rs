//! Iterative PageRank.
//!
//! Starts every page at `1/N` and applies the PageRank recurrence
//!
//! ```text
//! new_rank(p) = (1 - d) / N + d * sum(rank(q) / |links(q)|  for q linking to p)
//! ```
//!
//! one full sweep at a time, until the ranks stop moving. Dangling pages
//! count as linking to every page, the same policy as the transition model.
//! Each sweep reads the previous snapshot and writes a fresh one, so the
//! result does not depend on the order pages are visited in.

use crate::config::{ConvergenceCriterion, RankConfig};
use crate::error::{Error, Result};
use crate::graph::{Adjacency, LinkGraph};
use crate::rank::{normalize, RankVector};
use std::collections::VecDeque;
use tracing::{debug, trace, warn};

/// Ranks plus how the solver got there.
#[derive(Debug, Clone, PartialEq)]
pub struct IterationOutcome {
    /// Normalized ranks.
    pub ranks: RankVector,
    /// Number of sweeps performed.
    pub iterations: usize,
    /// Largest absolute per-page change in the final sweep.
    pub delta: f64,
}

/// Compute PageRank by fixed-point iteration.
pub fn iterate_pagerank(graph: &LinkGraph, config: RankConfig) -> Result<RankVector> {
    iterate_pagerank_with_stats(graph, config).map(|outcome| outcome.ranks)
}

/// Compute PageRank by fixed-point iteration, reporting sweep count and the
/// final change.
///
/// Fails with [`Error::NonConvergence`] if `config.max_iterations` sweeps go
/// by without meeting `config.criterion`.
#[allow(clippy::cast_precision_loss)]
pub fn iterate_pagerank_with_stats(
    graph: &LinkGraph,
    config: RankConfig,
) -> Result<IterationOutcome> {
    config.validate()?;
    let adj = graph.adjacency()?;
    let n = adj.len();
    let n_f64 = n as f64;

    let mut ranks = vec![1.0 / n_f64; n];
    let mut next = vec![0.0; n];
    let mut stop = StopRule::new(config.criterion, config.convergence_threshold);
    let mut delta = f64::MAX;

    for iteration in 1..=config.max_iterations {
        sweep(&adj, &ranks, &mut next, config.damping);

        delta = 0.0;
        for (&old, &new) in ranks.iter().zip(next.iter()) {
            let change = old - new;
            delta = delta.max(change.abs());
            stop.record(change);
        }
        std::mem::swap(&mut ranks, &mut next);
        trace!(iteration, delta, "sweep");

        if stop.is_settled(delta) {
            let mut ranks = RankVector::from_aligned(&adj.pages, &ranks);
            normalize(&mut ranks)?;
            debug!(pages = n, iterations = iteration, delta, "iterative pagerank converged");
            return Ok(IterationOutcome {
                ranks,
                iterations: iteration,
                delta,
            });
        }
    }

    warn!(
        iterations = config.max_iterations,
        delta, "iterative pagerank hit its iteration cap"
    );
    Err(Error::NonConvergence {
        iterations: config.max_iterations,
        delta,
    })
}

/// One Jacobi sweep: `next` is rebuilt entirely from `ranks`.
#[allow(clippy::cast_precision_loss)]
fn sweep(adj: &Adjacency, ranks: &[f64], next: &mut [f64], damping: f64) {
    let n_f64 = adj.len() as f64;

    // dangling pages spread their rank over every page
    let dangling: f64 = adj
        .out
        .iter()
        .zip(ranks)
        .filter(|(links, _)| links.is_empty())
        .map(|(_, &r)| r)
        .sum();
    next.fill((1.0 - damping) / n_f64 + damping * dangling / n_f64);

    for (state, links) in adj.out.iter().enumerate() {
        if links.is_empty() {
            continue;
        }
        let share = damping * ranks[state] / links.len() as f64;
        for &link in links {
            next[link] += share;
        }
    }
}

/// Tracks the configured convergence criterion across sweeps.
#[derive(Debug)]
enum StopRule {
    MaxSweep { threshold: f64 },
    Trailing { threshold: f64, recent: VecDeque<f64>, window: usize },
}

impl StopRule {
    fn new(criterion: ConvergenceCriterion, threshold: f64) -> Self {
        match criterion {
            ConvergenceCriterion::MaxSweepDelta => Self::MaxSweep { threshold },
            ConvergenceCriterion::TrailingDeltas { window } => Self::Trailing {
                threshold,
                recent: VecDeque::with_capacity(window),
                window,
            },
        }
    }

    fn record(&mut self, change: f64) {
        if let Self::Trailing { recent, window, .. } = self {
            if recent.len() == *window {
                recent.pop_back();
            }
            recent.push_front(change);
        }
    }

    fn is_settled(&self, sweep_delta: f64) -> bool {
        match self {
            Self::MaxSweep { threshold } => sweep_delta < *threshold,
            Self::Trailing {
                threshold,
                recent,
                window,
            } => recent.len() == *window && recent.iter().all(|d| d.abs() < *threshold),
        }
    }
}
