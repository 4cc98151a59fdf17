//! Elementwise vector arithmetic and the 1-norm.
//!
//! These are the leaf operations of the scoring engine. All binary
//! operations are strict about lengths: mixing vectors of different sizes
//! is a [`RankError::LengthMismatch`], not a silent truncation.

use crate::error::RankError;

/// Sum of the absolute values of `v`.
///
/// Used as a normalization divisor; callers must guard against a zero
/// vector before dividing (the engine surfaces that as
/// [`RankError::DegenerateDistribution`]).
pub fn norm1(v: &[f64]) -> f64 {
    v.iter().map(|x| x.abs()).sum()
}

/// Elementwise `a + b`.
pub fn add(a: &[f64], b: &[f64]) -> Result<Vec<f64>, RankError> {
    check_lengths(a, b)?;
    Ok(a.iter().zip(b).map(|(x, y)| x + y).collect())
}

/// Elementwise `a - b`.
pub fn subtract(a: &[f64], b: &[f64]) -> Result<Vec<f64>, RankError> {
    check_lengths(a, b)?;
    Ok(a.iter().zip(b).map(|(x, y)| x - y).collect())
}

/// Elementwise `v * k`.
pub fn scale(v: &[f64], k: f64) -> Vec<f64> {
    v.iter().map(|x| x * k).collect()
}

fn check_lengths(a: &[f64], b: &[f64]) -> Result<(), RankError> {
    if a.len() == b.len() {
        Ok(())
    } else {
        Err(RankError::LengthMismatch {
            left: a.len(),
            right: b.len(),
        })
    }
}
