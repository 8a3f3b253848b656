//! Maximum-likelihood estimate of the Zipf exponent.
//!
//! Word frequencies are modelled as a discrete power law. For a candidate
//! `beta` the negative log likelihood of the observed counts `c` is
//!
//! ```text
//! nll(beta) = -Σ ln( (1/c)^(beta-1) - (1/(c+1))^(beta-1) )
//! ```
//!
//! which is minimized over `beta ∈ (1, 4]`. The Zipf exponent is then
//! `alpha = 1 / (beta - 1)`.

use std::path::Path;

use tracing::debug;
use zipf_core::models::WordCounts;
use zipf_core::{Result, ZipfError};

use crate::reader::read_counts;

/// Lower end of the search interval for `beta`.
pub const BETA_MIN: f64 = 1.0 + 1e-10;
/// Upper end of the search interval for `beta`.
pub const BETA_MAX: f64 = 4.0;

const TOLERANCE: f64 = 1e-9;
const MAX_ITERATIONS: usize = 500;

/// Result of fitting a power law to a set of word counts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PowerLawFit {
    pub alpha: f64,
    pub beta: f64,
    /// Negative log likelihood at `beta`.
    pub nll: f64,
    /// Number of non-zero counts used.
    pub samples: usize,
}

/// Negative log likelihood of `counts` under exponent `beta`.
///
/// Zero counts carry no information and must be filtered out beforehand.
pub fn nlog_likelihood(beta: f64, counts: &[f64]) -> f64 {
    let exponent = beta - 1.0;
    -counts
        .iter()
        .map(|&c| ((1.0 / c).powf(exponent) - (1.0 / (c + 1.0)).powf(exponent)).ln())
        .sum::<f64>()
}

/// Fit a power law to `counts`; `None` when there are no non-zero counts.
pub fn fit_power_law(counts: &WordCounts) -> Option<PowerLawFit> {
    let samples: Vec<f64> = counts.counts().filter(|&c| c > 0).map(|c| c as f64).collect();
    if samples.is_empty() {
        return None;
    }

    let beta = golden_section_min(|b| nlog_likelihood(b, &samples), BETA_MIN, BETA_MAX);
    let fit = PowerLawFit {
        alpha: 1.0 / (beta - 1.0),
        beta,
        nll: nlog_likelihood(beta, &samples),
        samples: samples.len(),
    };
    debug!(
        "Power law fit: alpha={:.4}, beta={:.4}, nll={:.2}, n={}",
        fit.alpha, fit.beta, fit.nll, fit.samples
    );
    Some(fit)
}

/// Read a word-count CSV file and fit a power law to it.
pub fn fit_file(path: &Path) -> Result<PowerLawFit> {
    let counts = read_counts(path)?;
    fit_power_law(&counts).ok_or_else(|| ZipfError::EmptyCounts(path.to_path_buf()))
}

/// Minimize a unimodal `f` on `[lo, hi]` by golden-section search.
fn golden_section_min(f: impl Fn(f64) -> f64, mut lo: f64, mut hi: f64) -> f64 {
    let inv_phi = (5f64.sqrt() - 1.0) / 2.0;

    let mut x1 = hi - inv_phi * (hi - lo);
    let mut x2 = lo + inv_phi * (hi - lo);
    let mut f1 = f(x1);
    let mut f2 = f(x2);

    for _ in 0..MAX_ITERATIONS {
        if (hi - lo).abs() < TOLERANCE {
            break;
        }
        if f1 < f2 {
            hi = x2;
            x2 = x1;
            f2 = f1;
            x1 = hi - inv_phi * (hi - lo);
            f1 = f(x1);
        } else {
            lo = x1;
            x1 = x2;
            f1 = f2;
            x2 = lo + inv_phi * (hi - lo);
            f2 = f(x2);
        }
    }

    (lo + hi) / 2.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn tally(counts: &[u64]) -> WordCounts {
        let mut wc = WordCounts::new();
        for (i, &c) in counts.iter().enumerate() {
            wc.add(&format!("w{i}"), c).unwrap();
        }
        wc
    }

    #[test]
    fn test_golden_section_finds_parabola_minimum() {
        let x = golden_section_min(|x| (x - 2.5).powi(2), 1.0, 4.0);
        assert!((x - 2.5).abs() < 1e-6);
    }

    #[test]
    fn test_golden_section_boundary_minimum() {
        let x = golden_section_min(|x| -x, 1.0, 4.0);
        assert!((x - 4.0).abs() < 1e-6);
    }

    #[test]
    fn test_fit_all_singletons_hits_upper_bound() {
        // With every count equal to 1 the likelihood keeps improving as beta
        // grows, so the fit ends at BETA_MAX.
        let fit = fit_power_law(&tally(&[1; 50])).unwrap();
        assert!((fit.beta - BETA_MAX).abs() < 1e-6);
        assert!((fit.alpha - 1.0 / 3.0).abs() < 1e-6);
        assert_eq!(fit.samples, 50);
    }

    #[test]
    fn test_fit_is_a_local_minimum() {
        let counts: Vec<u64> = (1..=200).map(|r| 2000 / r).collect();
        let fit = fit_power_law(&tally(&counts)).unwrap();
        assert!(fit.beta > BETA_MIN && fit.beta < BETA_MAX);

        let samples: Vec<f64> = counts.iter().map(|&c| c as f64).collect();
        let here = nlog_likelihood(fit.beta, &samples);
        assert!(here <= nlog_likelihood(fit.beta - 0.01, &samples));
        assert!(here <= nlog_likelihood(fit.beta + 0.01, &samples));
        assert!(fit.alpha > 0.0);
    }

    #[test]
    fn test_fit_ignores_zero_counts() {
        let fit = fit_power_law(&tally(&[0, 0, 1, 1])).unwrap();
        assert_eq!(fit.samples, 2);
    }

    #[test]
    fn test_fit_empty_is_none() {
        assert!(fit_power_law(&WordCounts::new()).is_none());
        assert!(fit_power_law(&tally(&[0])).is_none());
    }

    #[test]
    fn test_fit_file_empty_is_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("empty.csv");
        std::fs::write(&path, "").unwrap();

        let err = fit_file(&path).unwrap_err();
        assert!(matches!(err, ZipfError::EmptyCounts(_)));
    }

    #[test]
    fn test_fit_file_reads_counts() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("counts.csv");
        std::fs::write(&path, "the,1000\nof,500\nand,333\nto,250\na,200\n").unwrap();

        let fit = fit_file(&path).unwrap();
        assert_eq!(fit.samples, 5);
        assert!(fit.alpha.is_finite());
    }
}
