use std::fmt::Display;

use operation_runs::OperationRuns;

use crate::score::Score;

pub mod operation_runs;

/// A global alignment of a query against a target together with its statistics.
///
/// `matches` counts aligned symbol pairs whose nucleotide codes intersect,
/// regardless of the score the scoring matrix assigns to them.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[must_use]
pub struct AlignmentResult {
    /// The optimal score reported by the dynamic program.
    pub score: Score,
    /// The score of `operations`, replayed against the scoring model during traceback.
    pub recomputed_score: Score,
    pub matches: usize,
    pub mismatches: usize,
    /// Alignment columns that are not matches.
    pub differences: usize,
    /// The number of gap runs.
    pub gap_opens: usize,
    /// The number of gap symbols.
    pub indels: usize,
    pub alignment_length: usize,
    pub operations: OperationRuns,
}

impl AlignmentResult {
    pub fn cigar(&self) -> String {
        self.operations.cigar()
    }

    /// True if the traceback reproduced the score of the dynamic program.
    pub fn is_consistent(&self) -> bool {
        self.score == self.recomputed_score
    }

    /// Gap symbols that extend a gap run instead of opening it.
    pub fn gap_extensions(&self) -> usize {
        self.indels - self.gap_opens
    }

    /// Percentage of alignment columns that are matches.
    pub fn identity(&self) -> f64 {
        percentage(self.matches, self.alignment_length)
    }

    /// Percentage of alignment columns that are gaps.
    pub fn percent_gaps(&self) -> f64 {
        percentage(self.indels, self.alignment_length)
    }

    /// Percentage of the query that is aligned to target symbols.
    pub fn query_coverage(&self, query_length: usize) -> f64 {
        percentage(self.matches + self.mismatches, query_length)
    }

    /// Percentage of the target that is aligned to query symbols.
    pub fn target_coverage(&self, target_length: usize) -> f64 {
        percentage(self.matches + self.mismatches, target_length)
    }
}

fn percentage(amount: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        100.0 * amount as f64 / total as f64
    }
}

impl Display for AlignmentResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} cols, {} ids ({:.1}%), {} gaps ({:.1}%), score {}, {}",
            self.alignment_length,
            self.matches,
            self.identity(),
            self.indels,
            self.percent_gaps(),
            self.score,
            self.operations,
        )
    }
}
