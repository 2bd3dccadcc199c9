//! Transition model: where the random surfer goes next.
//!
//! From a page with links, the surfer follows one of them with probability
//! `damping` (split evenly across the links), and otherwise jumps to any page
//! uniformly. A dangling page (no links) behaves as if it linked to every
//! page, itself included, so each page gets exactly `1/N`.
//!
//! Sampling and iteration both go through [`transition_row`], so the two
//! rankers always agree on the dangling policy.

use crate::config::check_damping;
use crate::error::{Error, Result};
use crate::graph::{Adjacency, LinkGraph, Page};
use rand::Rng;
use std::collections::BTreeMap;

/// Next-page distribution for one source page.
#[derive(Debug, Clone, PartialEq)]
pub struct TransitionDistribution {
    source: Page,
    probabilities: BTreeMap<Page, f64>,
}

impl TransitionDistribution {
    pub fn source(&self) -> &Page {
        &self.source
    }

    /// Probability of moving to `page`; 0.0 for pages outside the graph.
    pub fn probability(&self, page: &str) -> f64 {
        self.probabilities.get(page).copied().unwrap_or(0.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Page, f64)> {
        self.probabilities.iter().map(|(p, &w)| (p, w))
    }

    pub fn len(&self) -> usize {
        self.probabilities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.probabilities.is_empty()
    }

    /// Sum of all probabilities (1.0 up to rounding).
    pub fn total(&self) -> f64 {
        self.probabilities.values().sum()
    }

    /// Draw the next page.
    pub fn choose<R: Rng>(&self, rng: &mut R) -> Option<&Page> {
        let mut r = rng.gen::<f64>() * self.total();
        let mut last = None;
        for (page, &w) in &self.probabilities {
            if r < w {
                return Some(page);
            }
            r -= w;
            last = Some(page);
        }
        // rounding left a sliver past the final bucket
        last
    }
}

/// Build the transition distribution of `page`.
pub fn transition_model(
    graph: &LinkGraph,
    page: &str,
    damping: f64,
) -> Result<TransitionDistribution> {
    check_damping(damping)?;
    let adj = graph.adjacency()?;
    let idx = adj
        .index_of(page)
        .ok_or_else(|| Error::InvalidGraph(format!("`{page}` is not a page of the graph")))?;

    let row = transition_row(&adj.out[idx], adj.len(), damping);
    Ok(TransitionDistribution {
        source: adj.pages[idx].clone(),
        probabilities: adj.pages.iter().cloned().zip(row).collect(),
    })
}

/// Dense transition probabilities out of a page with out-links `links`,
/// indexed like the page list.
#[allow(clippy::cast_precision_loss)]
pub(crate) fn transition_row(links: &[usize], n: usize, damping: f64) -> Vec<f64> {
    let n_f64 = n as f64;
    if links.is_empty() {
        return vec![1.0 / n_f64; n];
    }
    let mut row = vec![(1.0 - damping) / n_f64; n];
    let follow = damping / links.len() as f64;
    for &target in links {
        row[target] += follow;
    }
    row
}

/// Cumulative transition rows for every page, for repeated sampling.
#[derive(Debug, Clone)]
pub(crate) struct TransitionTable {
    cumulative: Vec<Vec<f64>>,
}

impl TransitionTable {
    pub(crate) fn new(adj: &Adjacency, damping: f64) -> Self {
        let n = adj.len();
        let cumulative = adj
            .out
            .iter()
            .map(|links| {
                let mut acc = 0.0;
                transition_row(links, n, damping)
                    .into_iter()
                    .map(|p| {
                        acc += p;
                        acc
                    })
                    .collect()
            })
            .collect();
        Self { cumulative }
    }

    /// Index of the page visited after `from`.
    pub(crate) fn step<R: Rng>(&self, from: usize, rng: &mut R) -> usize {
        let row = &self.cumulative[from];
        let total = row.last().copied().unwrap_or(0.0);
        let r = rng.gen::<f64>() * total;
        row.partition_point(|&c| c <= r).min(row.len().saturating_sub(1))
    }
}
