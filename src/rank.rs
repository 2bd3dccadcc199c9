//! Rank vectors and normalization.

use crate::error::{Error, Result};
use crate::graph::Page;
use serde::Serialize;
use std::collections::BTreeMap;

/// Page -> non-negative score.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct RankVector {
    scores: BTreeMap<Page, f64>,
}

impl RankVector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, page: impl Into<Page>, score: f64) -> Option<f64> {
        self.scores.insert(page.into(), score)
    }

    /// Score of a page, or `None` if the page is not ranked.
    pub fn get(&self, page: &str) -> Option<f64> {
        self.scores.get(page).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Page, f64)> {
        self.scores.iter().map(|(p, &s)| (p, s))
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    /// Total mass.
    pub fn sum(&self) -> f64 {
        self.scores.values().sum()
    }

    /// Top `n` pages by score, highest first; ties keep page order.
    pub fn top_n(&self, n: usize) -> Vec<(&Page, f64)> {
        let mut ranked: Vec<_> = self.iter().collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
        ranked.truncate(n);
        ranked
    }

    /// Normalize in place and hand the vector back.
    pub fn normalized(mut self) -> Result<Self> {
        normalize(&mut self)?;
        Ok(self)
    }

    pub fn into_inner(self) -> BTreeMap<Page, f64> {
        self.scores
    }

    /// Build from scores aligned with `pages`.
    pub(crate) fn from_aligned(pages: &[Page], scores: &[f64]) -> Self {
        Self {
            scores: pages.iter().cloned().zip(scores.iter().copied()).collect(),
        }
    }
}

impl FromIterator<(Page, f64)> for RankVector {
    fn from_iter<T: IntoIterator<Item = (Page, f64)>>(iter: T) -> Self {
        Self {
            scores: iter.into_iter().collect(),
        }
    }
}

/// Rescale `ranks` so its values sum to 1.0.
///
/// Fails with [`Error::InvalidInput`] when the vector has no mass to spread,
/// or holds a negative or non-finite value.
pub fn normalize(ranks: &mut RankVector) -> Result<()> {
    if let Some((page, score)) = ranks.iter().find(|(_, s)| !s.is_finite() || *s < 0.0) {
        return Err(Error::InvalidInput(format!(
            "rank of `{page}` is {score}; ranks must be finite and non-negative"
        )));
    }
    let peak = ranks.scores.values().copied().fold(0.0, f64::max);
    if peak <= 0.0 {
        return Err(Error::InvalidInput(
            "cannot normalize a rank vector with zero total mass".to_string(),
        ));
    }
    // scale into [0, 1] first so the sum cannot overflow
    for score in ranks.scores.values_mut() {
        *score /= peak;
    }
    let total = ranks.sum();
    for score in ranks.scores.values_mut() {
        *score /= total;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ranks(pairs: &[(&str, f64)]) -> RankVector {
        pairs.iter().map(|&(p, s)| (Page::from(p), s)).collect()
    }

    #[test]
    fn test_normalize_sums_to_one() {
        let mut r = ranks(&[("a", 2.0), ("b", 6.0)]);
        normalize(&mut r).unwrap();
        assert!((r.get("a").unwrap() - 0.25).abs() < 1e-12);
        assert!((r.get("b").unwrap() - 0.75).abs() < 1e-12);
        assert!((r.sum() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let once = ranks(&[("a", 0.3), ("b", 0.2), ("c", 0.9)]).normalized().unwrap();
        let twice = once.clone().normalized().unwrap();
        for (page, score) in once.iter() {
            assert!((twice.get(page.as_str()).unwrap() - score).abs() < 1e-12);
        }
    }

    #[test]
    fn test_zero_mass_rejected() {
        let mut zero = ranks(&[("a", 0.0), ("b", 0.0)]);
        assert!(matches!(normalize(&mut zero), Err(Error::InvalidInput(_))));
        assert!(matches!(
            RankVector::new().normalized(),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn test_huge_values_do_not_overflow() {
        let mut r = ranks(&[("a", f64::MAX), ("b", f64::MAX), ("c", 0.0)]);
        normalize(&mut r).unwrap();
        assert!((r.get("a").unwrap() - 0.5).abs() < 1e-12);
        assert!((r.get("b").unwrap() - 0.5).abs() < 1e-12);
        assert_eq!(r.get("c"), Some(0.0));
        assert!((r.sum() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_negative_and_nan_rejected() {
        assert!(ranks(&[("a", -1.0), ("b", 3.0)]).normalized().is_err());
        assert!(ranks(&[("a", f64::NAN)]).normalized().is_err());
    }

    #[test]
    fn test_top_n_orders_by_score() {
        let r = ranks(&[("a", 0.1), ("b", 0.6), ("c", 0.3)]);
        let top: Vec<&str> = r.top_n(2).into_iter().map(|(p, _)| p.as_str()).collect();
        assert_eq!(top, vec!["b", "c"]);
    }
}
