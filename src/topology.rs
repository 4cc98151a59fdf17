//! Chief-tribe network generation.
//!
//! A chief-tribe network with G groups has one chief per group plus g + 1
//! tribe members in group g (0-indexed), for a total of G + G(G+1)/2 pages.
//! Every group is internally fully connected, and the chiefs form a second
//! fully connected layer among themselves.
//!
//! The generator produces the column-normalized link matrix consumed by
//! the scoring engine; the engine itself never assumes this structure.

use tracing::debug;

use crate::error::RankError;
use crate::matrix::LinkMatrix;

/// Deterministic chief-tribe topology with a fixed group count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChiefTribe {
    num_groups: usize,
}

impl ChiefTribe {
    /// A topology with `num_groups` groups.
    pub fn new(num_groups: usize) -> Self {
        Self { num_groups }
    }

    /// The configured group count.
    pub fn num_groups(&self) -> usize {
        self.num_groups
    }

    /// Total page count: G chiefs plus 1 + 2 + ... + G tribe members.
    pub fn num_pages(&self) -> usize {
        self.num_groups + self.num_groups * (self.num_groups + 1) / 2
    }

    /// Page id of group `g`'s chief.
    pub fn chief_of(group: usize) -> usize {
        group * (group + 3) / 2
    }

    /// Page ids of all chiefs, ascending.
    pub fn chiefs(&self) -> Vec<usize> {
        (0..self.num_groups).map(Self::chief_of).collect()
    }

    /// The contiguous page span of group `g` (chief first).
    pub fn group_span(group: usize) -> std::ops::Range<usize> {
        let chief = Self::chief_of(group);
        chief..chief + group + 2
    }

    /// Group count of a network with `num_pages` pages (inverse of
    /// [`ChiefTribe::num_pages`]).
    pub fn groups_for_pages(num_pages: usize) -> usize {
        (((8 * num_pages + 9) as f64).sqrt() - 3.0) as usize / 2
    }

    /// Group of the chief at page id `chief` (inverse of
    /// [`ChiefTribe::chief_of`]).
    pub fn group_of_chief(chief: usize) -> usize {
        (((8 * chief + 9) as f64).sqrt() - 3.0) as usize / 2
    }

    /// The 0/1 adjacency matrix: full connectivity inside each group, full
    /// connectivity among chiefs, no self-links.
    pub fn adjacency(&self) -> Vec<Vec<f64>> {
        let num_pages = self.num_pages();
        let mut adjacency = vec![vec![0.0; num_pages]; num_pages];

        for group in 0..self.num_groups {
            let span = Self::group_span(group);
            for page in span.clone() {
                for target in span.clone() {
                    if target != page {
                        adjacency[page][target] = 1.0;
                    }
                }
            }
        }

        let chiefs = self.chiefs();
        for &chief in &chiefs {
            for &target in &chiefs {
                if target != chief {
                    adjacency[chief][target] = 1.0;
                }
            }
        }

        adjacency
    }

    /// The link matrix: the adjacency with each column divided by its
    /// incoming-link count, so every linked column sums to 1.
    pub fn link_matrix(&self) -> Result<LinkMatrix, RankError> {
        let mut matrix = self.adjacency();
        let num_pages = matrix.len();

        for page in 0..num_pages {
            let incoming: f64 = matrix.iter().map(|pointed_by| pointed_by[page]).sum();
            if incoming > 0.0 {
                for row in &mut matrix {
                    row[page] /= incoming;
                }
            }
        }

        debug!(
            num_groups = self.num_groups,
            num_pages, "built chief-tribe link matrix"
        );
        LinkMatrix::from_rows(matrix)
    }
}
