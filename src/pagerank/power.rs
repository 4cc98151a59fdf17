//! Sparse damped power iteration.
//!
//! The engine repeatedly propagates score mass along the compressed
//! triplets, normalizes, and damps toward the initial uniform vector until
//! the 1-norm of successive score deltas drops below the tolerance.
//!
//! Accumulation happens in triplet order (row-major) and sequentially, so
//! the floating-point result is reproducible across runs and platforms.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use super::RankResult;
use crate::error::RankError;
use crate::matrix::CompressedTriplets;
use crate::vector;

/// How the propagation accumulator `y` behaves between iterations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccumulatorMode {
    /// `y` carries over between iterations: each propagation pass adds onto
    /// the previous iteration's normalized accumulator instead of starting
    /// fresh.
    #[default]
    Cumulative,
    /// `y` is zeroed at the start of every iteration (the textbook power
    /// step). Converges to the same fixed point as `Cumulative` but along a
    /// different trajectory, so scores at the stopping iteration differ at
    /// the tolerance scale.
    Reset,
}

/// Damped power-iteration engine.
#[derive(Debug, Clone, PartialEq)]
pub struct PowerIteration {
    /// Weight on the freshly propagated scores; the remaining mass teleports
    /// to the initial uniform vector, which never changes.
    pub damping: f64,
    /// Convergence tolerance on the 1-norm of successive score deltas.
    pub epsilon: f64,
    /// Iteration bound; exceeding it is a [`RankError::NonConvergent`].
    pub max_iterations: usize,
    /// Accumulator behavior between iterations.
    pub accumulator: AccumulatorMode,
}

impl Default for PowerIteration {
    fn default() -> Self {
        Self {
            damping: 0.85,
            epsilon: 1e-5,
            max_iterations: 1000,
            accumulator: AccumulatorMode::default(),
        }
    }
}

impl PowerIteration {
    /// Create an engine with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the damping factor.
    pub fn with_damping(mut self, damping: f64) -> Self {
        self.damping = damping;
        self
    }

    /// Set the convergence tolerance.
    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    /// Set the iteration bound.
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Set the accumulator mode.
    pub fn with_accumulator(mut self, accumulator: AccumulatorMode) -> Self {
        self.accumulator = accumulator;
        self
    }

    /// Run the iteration over `triplets` for a graph of `num_nodes` nodes.
    ///
    /// Scores are seeded uniformly at `1/num_nodes`. Each iteration
    /// accumulates `y[row] += value * old[col]` over the triplets in order,
    /// normalizes `y` by its 1-norm, and mixes
    /// `new = damping * y + (1 - damping) * initial`. Convergence is
    /// declared when `norm1(new - old) < epsilon`.
    ///
    /// Errors with [`RankError::DegenerateDistribution`] when the propagated
    /// mass has zero norm, and [`RankError::NonConvergent`] when the bound
    /// runs out.
    pub fn run(
        &self,
        triplets: &CompressedTriplets,
        num_nodes: usize,
    ) -> Result<RankResult, RankError> {
        if num_nodes == 0 {
            return Ok(RankResult::new(vec![], 0, 0.0));
        }

        let initial = vec![1.0 / num_nodes as f64; num_nodes];
        let teleport = vector::scale(&initial, 1.0 - self.damping);

        let mut old = initial;
        let mut y = vec![0.0; num_nodes];
        let mut last_delta = f64::MAX;

        for iteration in 1..=self.max_iterations {
            if self.accumulator == AccumulatorMode::Reset {
                y.fill(0.0);
            }

            for (value, row, col) in triplets.iter() {
                y[row as usize] += value * old[col as usize];
            }

            let mass = vector::norm1(&y);
            if mass == 0.0 {
                return Err(RankError::DegenerateDistribution { iteration });
            }
            y = vector::scale(&y, 1.0 / mass);

            let new = vector::add(&vector::scale(&y, self.damping), &teleport)?;
            let delta = vector::norm1(&vector::subtract(&new, &old)?);
            trace!(iteration, delta, "power iteration step");

            if delta < self.epsilon {
                debug!(iterations = iteration, delta, "power iteration converged");
                return Ok(RankResult::new(new, iteration, delta));
            }

            last_delta = delta;
            old = new;
        }

        Err(RankError::NonConvergent {
            max_iterations: self.max_iterations,
            last_delta,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::LinkMatrix;
    use approx::assert_relative_eq;

    fn triplets(rows: Vec<Vec<f64>>) -> (CompressedTriplets, usize) {
        let matrix = LinkMatrix::from_rows(rows).unwrap();
        let n = matrix.num_rows();
        (CompressedTriplets::from_dense(&matrix), n)
    }

    #[test]
    fn test_single_node_converges_first_iteration() {
        let (t, n) = triplets(vec![vec![1.0]]);
        let result = PowerIteration::new().run(&t, n).unwrap();

        assert_eq!(result.iterations, 1);
        assert_eq!(result.scores, vec![1.0]);
        assert_relative_eq!(result.delta, 0.0);
    }

    #[test]
    fn test_two_node_cycle_splits_evenly() {
        let (t, n) = triplets(vec![vec![0.0, 1.0], vec![1.0, 0.0]]);
        let result = PowerIteration::new().run(&t, n).unwrap();

        assert_eq!(result.iterations, 1);
        assert_relative_eq!(result.scores[0], 0.5);
        assert_relative_eq!(result.scores[1], 0.5);
    }

    #[test]
    fn test_scores_sum_to_one() {
        // Asymmetric 3-node chain with column-normalized weights.
        let (t, n) = triplets(vec![
            vec![0.0, 0.5, 1.0],
            vec![1.0, 0.0, 0.0],
            vec![0.0, 0.5, 0.0],
        ]);

        for mode in [AccumulatorMode::Cumulative, AccumulatorMode::Reset] {
            let result = PowerIteration::new()
                .with_accumulator(mode)
                .run(&t, n)
                .unwrap();
            let sum: f64 = result.scores.iter().sum();
            assert!((sum - 1.0).abs() < 1e-3, "mode {mode:?}: sum {sum}");
        }
    }

    #[test]
    fn test_accumulator_modes_agree_on_symmetric_graph() {
        let (t, n) = triplets(vec![vec![0.0, 1.0], vec![1.0, 0.0]]);

        let cumulative = PowerIteration::new().run(&t, n).unwrap();
        let reset = PowerIteration::new()
            .with_accumulator(AccumulatorMode::Reset)
            .run(&t, n)
            .unwrap();

        for (c, r) in cumulative.scores.iter().zip(&reset.scores) {
            assert_relative_eq!(*c, *r, max_relative = 1e-9);
        }
    }

    #[test]
    fn test_zero_mass_is_degenerate() {
        let (t, n) = triplets(vec![vec![0.0, 0.0], vec![0.0, 0.0]]);
        let err = PowerIteration::new().run(&t, n).unwrap_err();

        assert_eq!(err, RankError::DegenerateDistribution { iteration: 1 });
    }

    #[test]
    fn test_unreachable_threshold_is_non_convergent() {
        let (t, n) = triplets(vec![vec![0.0, 1.0], vec![1.0, 0.0]]);
        let err = PowerIteration::new()
            .with_epsilon(0.0) // delta < 0.0 never holds
            .with_max_iterations(5)
            .run(&t, n)
            .unwrap_err();

        let RankError::NonConvergent { max_iterations, .. } = err else {
            panic!("expected NonConvergent, got {err:?}");
        };
        assert_eq!(max_iterations, 5);
    }

    #[test]
    fn test_zero_iteration_bound_is_non_convergent() {
        let (t, n) = triplets(vec![vec![1.0]]);
        let err = PowerIteration::new()
            .with_max_iterations(0)
            .run(&t, n)
            .unwrap_err();

        assert!(matches!(err, RankError::NonConvergent { .. }));
    }

    #[test]
    fn test_empty_graph_returns_empty_result() {
        let result = PowerIteration::new()
            .run(&CompressedTriplets::default(), 0)
            .unwrap();

        assert!(result.scores.is_empty());
        assert_eq!(result.iterations, 0);
    }

    #[test]
    fn test_damping_pulls_toward_uniform() {
        // Node 0 receives all propagated mass; more teleport weight
        // (lower damping) should flatten the distribution.
        let (t, n) = triplets(vec![
            vec![0.0, 1.0, 1.0],
            vec![0.5, 0.0, 0.0],
            vec![0.5, 0.0, 0.0],
        ]);

        let peaked = PowerIteration::new().with_damping(0.95).run(&t, n).unwrap();
        let flat = PowerIteration::new().with_damping(0.5).run(&t, n).unwrap();

        assert!(peaked.scores[0] > flat.scores[0]);
    }

    #[test]
    fn test_accumulator_mode_serde_names() {
        let json = serde_json::to_string(&AccumulatorMode::Cumulative).unwrap();
        assert_eq!(json, r#""cumulative""#);
        let mode: AccumulatorMode = serde_json::from_str(r#""reset""#).unwrap();
        assert_eq!(mode, AccumulatorMode::Reset);
    }
}
