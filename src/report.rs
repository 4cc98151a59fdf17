//! Ranked-table formatting with group collapsing.
//!
//! The formatter is the only component that knows about chief-tribe
//! structure. Group and chief metadata are recovered purely from the page
//! count via the inverse group-size formulas; the scoring core hands over
//! nothing but a flat (index, score) result.
//!
//! Display policy, in rank order: chief pages always get their own row;
//! the first non-chief page seen for a group produces one collapsed row
//! spanning to the group's last member; any further non-chief pages of
//! that group are skipped without consuming a display rank.

use rustc_hash::FxHashSet;
use serde::Serialize;

use crate::topology::ChiefTribe;

/// One displayed row of the ranking table. Page, group, and rank ids are
/// 1-based display values.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankRow {
    /// Display rank, starting at 1.
    pub rank: usize,
    /// First page of the row.
    pub first_page: usize,
    /// Last page of the row; equals `first_page` for single-page rows.
    pub last_page: usize,
    /// Group the page(s) belong to.
    pub group: usize,
    /// Importance score of `first_page`.
    pub score: f64,
}

impl RankRow {
    /// `true` when the row collapses a span of tribe pages.
    pub fn is_range(&self) -> bool {
        self.last_page != self.first_page
    }
}

/// The rendered ranking table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankTable {
    rows: Vec<RankRow>,
}

impl RankTable {
    /// Build the table from a ranking permutation and its score vector.
    ///
    /// `scores.len()` must be a chief-tribe page count (G + G(G+1)/2 for
    /// some G >= 1); the group layout is reconstructed from it alone.
    pub fn build(ranking: &[u32], scores: &[f64]) -> Self {
        let num_groups = ChiefTribe::groups_for_pages(scores.len());
        let chiefs: Vec<usize> = (0..num_groups).map(ChiefTribe::chief_of).collect();
        let chief_set: FxHashSet<usize> = chiefs.iter().copied().collect();

        let mut displayed_groups = FxHashSet::default();
        let mut rows = Vec::new();
        let mut rank = 0;

        for &page in ranking {
            let page = page as usize;
            // The owning group's chief is the last chief at or before this page.
            let chief = chiefs[chiefs.partition_point(|&c| c <= page) - 1];
            let group = ChiefTribe::group_of_chief(chief);

            if chief_set.contains(&page) {
                rank += 1;
                rows.push(RankRow {
                    rank,
                    first_page: page + 1,
                    last_page: page + 1,
                    group: group + 1,
                    score: scores[page],
                });
            } else if displayed_groups.insert(group) {
                let last_group_page = chief + group + 1;
                rank += 1;
                rows.push(RankRow {
                    rank,
                    first_page: page + 1,
                    last_page: last_group_page + 1,
                    group: group + 1,
                    score: scores[page],
                });
            }
        }

        Self { rows }
    }

    /// The displayed rows, in rank order.
    pub fn rows(&self) -> &[RankRow] {
        &self.rows
    }

    /// Render the plain-text table.
    pub fn render(&self) -> String {
        let mut out = String::from("Rank\tPage(s)\t\tGroup\tImportance score\n");
        for row in &self.rows {
            if row.is_range() {
                out.push_str(&format!(
                    "{:>2}\t{:>3} to {:>3}\t{:>2}\t{:.5}\n",
                    row.rank, row.first_page, row.last_page, row.group, row.score
                ));
            } else {
                out.push_str(&format!(
                    "{:>2}\t{:>3}\t\t{:>2}\t{:.5}\n",
                    row.rank, row.first_page, row.group, row.score
                ));
            }
        }
        out
    }
}
