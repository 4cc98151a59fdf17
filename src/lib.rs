//! chiefrank — sparse power-iteration PageRank over synthetic chief-tribe
//! networks.
//!
//! A chief-tribe network is a parametric topology: G disjoint groups, each
//! internally fully connected, whose designated chief pages form a second
//! fully connected layer. This crate generates that topology, compresses
//! its column-normalized link matrix into sparse triplets, runs damped
//! power iteration to convergence, and renders a ranked table with the
//! chief/tribe display-collapsing policy.
//!
//! # Quick start
//!
//! ```rust,ignore
//! use chiefrank::RankingRun;
//!
//! let outcome = RankingRun::new().with_num_groups(20).execute()?;
//! print!("{}", outcome.table.render());
//! ```
//!
//! The pipeline stages are available individually: [`topology::ChiefTribe`]
//! builds the link matrix, [`matrix::CompressedTriplets`] compresses it,
//! [`pagerank::PowerIteration`] scores it, [`ranking::rank_descending`]
//! orders it, and [`report::RankTable`] formats it.

pub mod error;
pub mod matrix;
pub mod pagerank;
pub mod ranking;
pub mod report;
pub mod runner;
pub mod topology;
pub mod vector;

pub use error::RankError;
pub use matrix::{CompressedTriplets, LinkMatrix};
pub use pagerank::{AccumulatorMode, PowerIteration, RankResult};
pub use ranking::rank_descending;
pub use report::{RankRow, RankTable};
pub use runner::{RankingOutcome, RankingRun};
pub use topology::ChiefTribe;
