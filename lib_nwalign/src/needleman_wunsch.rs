//! Global alignment with affine gap costs that differ between terminal and interior gaps.
//!
//! The query indexes the rows and the target the columns of the dynamic programming matrix.
//! Columns are filled one after another, keeping only the running scores of the
//! previous column, while the direction flags of every cell are kept for the traceback.

use std::fmt::Display;

use log::trace;
use ndarray::ArrayViewMut2;

use crate::{
    alignment_result::AlignmentResult,
    alphabet::nucleotide_code,
    costs::{GapCostSet, GapSide, ScoringMatrix},
    error::Result,
    score::Score,
    workspace::{AlignmentWorkspace, DirectionFlags},
};

pub mod consistency;
mod traceback;

#[cfg(test)]
mod tests;

/// Identifies an aligned pair in diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SequencePairId {
    pub query: usize,
    pub target: usize,
}

impl SequencePairId {
    pub fn new(query: usize, target: usize) -> Self {
        Self { query, target }
    }
}

impl Display for SequencePairId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "query no {} and target sequence no {}",
            self.query, self.target
        )
    }
}

/// Computes an optimal global alignment of `query` against `target`.
///
/// The sequences are expected to consist of nucleotide symbols only.
/// The only error is a failure to grow the workspace, after which no alignment can be computed.
/// If the traceback does not reproduce the optimal score, a warning is logged
/// and the alignment is returned nonetheless.
pub fn needleman_wunsch_align(
    query: &[u8],
    target: &[u8],
    scoring_matrix: &ScoringMatrix,
    gap_costs: &GapCostSet,
    workspace: &mut AlignmentWorkspace,
    pair_id: SequencePairId,
) -> Result<AlignmentResult> {
    workspace.ensure_capacity(query.len(), target.len())?;
    let (mut directions, scores) = workspace.prepare(query.len(), target.len());

    let score = fill(
        query,
        target,
        scoring_matrix,
        gap_costs,
        &mut directions,
        scores,
    );
    trace!("Optimal score of {pair_id} is {score}");

    let result = traceback::traceback(
        query,
        target,
        scoring_matrix,
        gap_costs,
        directions.view(),
        score,
    );
    consistency::check_score_consistency(&result, pair_id);

    Ok(result)
}

/// Fills the direction matrix and returns the optimal score.
///
/// `scores` holds two slots per query position: the best score of the previous
/// column and the best score of a gap in the query reaching the current column.
fn fill(
    query: &[u8],
    target: &[u8],
    scoring_matrix: &ScoringMatrix,
    gap_costs: &GapCostSet,
    directions: &mut ArrayViewMut2<'_, DirectionFlags>,
    scores: &mut [Score],
) -> Score {
    let query_length = query.len();
    let target_length = target.len();

    if query_length == 0 {
        return -gap_costs.query_left.penalty(target_length);
    }

    // Column before the first target symbol: a leading gap in the target.
    for (query_index, slot) in scores.chunks_exact_mut(2).enumerate() {
        let leading = -gap_costs.target_left.penalty(query_index + 1);
        let query_gap = gap_costs.for_gap(GapSide::Query, query_index + 1, query_length);
        slot[0] = leading;
        slot[1] = leading - query_gap.open_and_extend();
    }

    for (target_index, &target_symbol) in target.iter().enumerate() {
        let target_code = nucleotide_code(target_symbol);
        let target_gap = gap_costs.for_gap(GapSide::Target, target_index + 1, target_length);

        // Diagonal predecessor of the first row and the gap in the target entering it.
        let mut h = -gap_costs.query_left.penalty(target_index);
        let mut f = -gap_costs.query_left.penalty(target_index + 1) - target_gap.open_and_extend();

        for (query_index, slot) in scores.chunks_exact_mut(2).enumerate() {
            let query_gap = gap_costs.for_gap(GapSide::Query, query_index + 1, query_length);
            let previous_h = slot[0];
            let mut e = slot[1];
            let mut flags = DirectionFlags::EMPTY;

            h += scoring_matrix.code_score(nucleotide_code(query[query_index]), target_code);
            if f > h {
                h = f;
                flags |= DirectionFlags::UP;
            }
            if e > h {
                h = e;
                flags |= DirectionFlags::LEFT;
            }
            slot[0] = h;

            let h_e = h - query_gap.open_and_extend();
            e -= query_gap.extend;
            let h_f = h - target_gap.open_and_extend();
            f -= target_gap.extend;

            if f > h_f {
                flags |= DirectionFlags::EXTEND_UP;
            } else {
                f = h_f;
            }
            if e > h_e {
                flags |= DirectionFlags::EXTEND_LEFT;
            } else {
                e = h_e;
            }

            slot[1] = e;
            directions[[target_index, query_index]] = flags;
            h = previous_h;
        }
    }

    scores[2 * query_length - 2]
}
