//! Sampling primitives shared by the catalog and event generators.

use rand::Rng;
use rand::distr::Distribution;
use rand::distr::weighted::WeightedIndex;
use rand::seq::IndexedRandom;
use rand_distr::LogNormal;

use crate::config::LogNormalParams;
use crate::errors::{ClickgenError, Result};

/// A categorical distribution over a fixed value table.
///
/// Weights are relative shares; they need not sum to one.
#[derive(Debug, Clone)]
pub struct Categorical<T> {
    values: Vec<T>,
    index: WeightedIndex<f64>,
}

impl<T: Clone> Categorical<T> {
    pub fn new(table: &[(T, f64)]) -> Result<Self> {
        let index = WeightedIndex::new(table.iter().map(|(_, w)| *w))?;
        Ok(Self {
            values: table.iter().map(|(v, _)| v.clone()).collect(),
            index,
        })
    }

    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> T {
        self.values[self.index.sample(rng)].clone()
    }

    pub fn sample_n<R: Rng + ?Sized>(&self, rng: &mut R, n: usize) -> Vec<T> {
        (0..n).map(|_| self.sample(rng)).collect()
    }
}

/// `n` draws with replacement from `pool`.
pub fn with_replacement<T: Clone, R: Rng + ?Sized>(
    rng: &mut R,
    pool: &[T],
    n: usize,
) -> Result<Vec<T>> {
    if n > 0 && pool.is_empty() {
        return Err(ClickgenError::sampling(format!(
            "cannot draw {} values from an empty population",
            n
        )));
    }
    Ok((0..n).filter_map(|_| pool.choose(rng).cloned()).collect())
}

/// `k` distinct positions of `pool`.
pub fn without_replacement<T: Clone, R: Rng + ?Sized>(
    rng: &mut R,
    pool: &[T],
    k: usize,
) -> Result<Vec<T>> {
    if k > pool.len() {
        return Err(ClickgenError::sampling(format!(
            "cannot take a sample of {} larger than the population of {} without replacement",
            k,
            pool.len()
        )));
    }
    Ok(pool.choose_multiple(rng, k).cloned().collect())
}

/// `n` log-normal draws. Requires finite `mu` and `sigma >= 0`.
pub fn log_normal<R: Rng + ?Sized>(
    rng: &mut R,
    params: &LogNormalParams,
    n: usize,
) -> Result<Vec<f64>> {
    // rand_distr accepts a negative sigma and mirrors the draws
    if !params.mu.is_finite() || !params.sigma.is_finite() || params.sigma < 0.0 {
        return Err(ClickgenError::sampling(format!(
            "invalid log-normal parameters (mu={}, sigma={})",
            params.mu, params.sigma
        )));
    }
    let dist = LogNormal::new(params.mu, params.sigma).map_err(|e| {
        ClickgenError::sampling(format!(
            "invalid log-normal parameters (mu={}, sigma={}): {}",
            params.mu, params.sigma, e
        ))
    })?;
    Ok((0..n).map(|_| dist.sample(rng)).collect())
}
