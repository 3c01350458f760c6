//! Replaying an alignment against the scoring model.

use log::warn;

use super::SequencePairId;
use crate::{
    alignment_result::{
        AlignmentResult,
        operation_runs::{AlignmentOperation, OperationRuns},
    },
    costs::{GapCostSet, GapSide, ScoringMatrix},
    error::{Error, Result},
    score::Score,
};

/// Computes the score of `operations` aligning `query` to `target` from scratch.
///
/// Every maximal gap run is charged its opening cost once and its extension cost per symbol,
/// with the position class taken from how many symbols of the opposite sequence precede it.
pub fn rescore(
    query: &[u8],
    target: &[u8],
    operations: &OperationRuns,
    scoring_matrix: &ScoringMatrix,
    gap_costs: &GapCostSet,
) -> Result<Score> {
    if operations.query_length() != query.len() || operations.target_length() != target.len() {
        return Err(Error::InvalidOperationRuns(format!(
            "{operations} does not cover sequences of lengths {} and {}",
            query.len(),
            target.len()
        )));
    }

    let mut score = Score::ZERO;
    let mut query_index = 0;
    let mut target_index = 0;
    let mut previous = None;

    for &(count, operation) in operations.runs() {
        match operation {
            AlignmentOperation::Match => {
                score += query[query_index..query_index + count]
                    .iter()
                    .zip(&target[target_index..target_index + count])
                    .fold(Score::ZERO, |sum, (&q, &t)| {
                        sum + scoring_matrix.score(q, t)
                    });
                query_index += count;
                target_index += count;
            }
            AlignmentOperation::Insertion => {
                let costs = gap_costs.for_gap(GapSide::Query, query_index, query.len());
                if previous != Some(operation) {
                    score -= costs.open;
                }
                score -= costs.extend.times(count);
                target_index += count;
            }
            AlignmentOperation::Deletion => {
                let costs = gap_costs.for_gap(GapSide::Target, target_index, target.len());
                if previous != Some(operation) {
                    score -= costs.open;
                }
                score -= costs.extend.times(count);
                query_index += count;
            }
        }

        if count > 0 {
            previous = Some(operation);
        }
    }

    Ok(score)
}

/// Returns true if the traceback reproduced the score of the dynamic program.
///
/// A disagreement is logged as a warning.
pub fn check_score_consistency(result: &AlignmentResult, pair_id: SequencePairId) -> bool {
    if result.is_consistent() {
        true
    } else {
        warn!(
            "Score mismatch for {pair_id}: alignment score {} but traceback score {} for {}",
            result.score,
            result.recomputed_score,
            result.cigar()
        );
        false
    }
}
