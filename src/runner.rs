//! End-to-end ranking runs.
//!
//! [`RankingRun`] wires the fixed stage sequence — topology, compression,
//! power iteration, ordering, table building — threading each stage's
//! artifact into the next and logging per-stage timings.

use std::time::Instant;

use tracing::debug;

use crate::error::RankError;
use crate::matrix::CompressedTriplets;
use crate::pagerank::{PowerIteration, RankResult};
use crate::ranking::rank_descending;
use crate::report::RankTable;
use crate::topology::ChiefTribe;

/// Configuration for one ranking run.
#[derive(Debug, Clone, PartialEq)]
pub struct RankingRun {
    num_groups: usize,
    engine: PowerIteration,
}

/// Everything a completed run produces.
#[derive(Debug, Clone)]
pub struct RankingOutcome {
    /// Converged scores with iteration metadata.
    pub result: RankResult,
    /// Page indices in descending score order.
    pub ranking: Vec<u32>,
    /// The display table.
    pub table: RankTable,
}

impl Default for RankingRun {
    fn default() -> Self {
        Self {
            num_groups: 20,
            engine: PowerIteration::default(),
        }
    }
}

impl RankingRun {
    /// A run over the default 20-group network with default engine settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the group count of the generated network.
    pub fn with_num_groups(mut self, num_groups: usize) -> Self {
        self.num_groups = num_groups;
        self
    }

    /// Replace the engine configuration.
    pub fn with_engine(mut self, engine: PowerIteration) -> Self {
        self.engine = engine;
        self
    }

    /// Execute all stages and return the outcome.
    pub fn execute(&self) -> Result<RankingOutcome, RankError> {
        let clock = Instant::now();
        let matrix = ChiefTribe::new(self.num_groups).link_matrix()?;
        debug!(
            stage = "topology",
            pages = matrix.num_rows(),
            elapsed_us = clock.elapsed().as_micros() as u64
        );

        let clock = Instant::now();
        let triplets = CompressedTriplets::from_dense(&matrix);
        debug!(
            stage = "compress",
            nonzeros = triplets.len(),
            elapsed_us = clock.elapsed().as_micros() as u64
        );

        let clock = Instant::now();
        let result = self.engine.run(&triplets, matrix.num_rows())?;
        debug!(
            stage = "rank",
            iterations = result.iterations,
            delta = result.delta,
            elapsed_us = clock.elapsed().as_micros() as u64
        );

        let clock = Instant::now();
        let ranking = rank_descending(&result.scores);
        let table = RankTable::build(&ranking, &result.scores);
        debug!(
            stage = "format",
            rows = table.rows().len(),
            elapsed_us = clock.elapsed().as_micros() as u64
        );

        Ok(RankingOutcome {
            result,
            ranking,
            table,
        })
    }
}
