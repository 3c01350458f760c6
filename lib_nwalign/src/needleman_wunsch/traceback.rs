use ndarray::ArrayView2;

use crate::{
    alignment_result::{
        AlignmentResult,
        operation_runs::{AlignmentOperation, OperationRuns},
    },
    alphabet::symbols_match,
    costs::{GapCostSet, GapCosts, GapSide, ScoringMatrix},
    score::Score,
    workspace::DirectionFlags,
};

/// Accumulates the statistics of the operations emitted during traceback.
struct TracebackState {
    operations: OperationRuns,
    previous: Option<AlignmentOperation>,
    recomputed_score: Score,
    matches: usize,
    mismatches: usize,
    gap_opens: usize,
    indels: usize,
}

impl TracebackState {
    fn new(capacity: usize) -> Self {
        Self {
            operations: OperationRuns::with_capacity(capacity),
            previous: None,
            recomputed_score: Score::ZERO,
            matches: 0,
            mismatches: 0,
            gap_opens: 0,
            indels: 0,
        }
    }

    fn push_gap(&mut self, operation: AlignmentOperation, costs: &GapCosts) {
        if self.previous != Some(operation) {
            self.recomputed_score -= costs.open;
            self.gap_opens += 1;
        }
        self.recomputed_score -= costs.extend;
        self.indels += 1;
        self.push(operation);
    }

    fn push_match(&mut self, query_symbol: u8, target_symbol: u8, scoring_matrix: &ScoringMatrix) {
        self.recomputed_score += scoring_matrix.score(query_symbol, target_symbol);
        if symbols_match(query_symbol, target_symbol) {
            self.matches += 1;
        } else {
            self.mismatches += 1;
        }
        self.push(AlignmentOperation::Match);
    }

    fn push(&mut self, operation: AlignmentOperation) {
        self.operations.push(operation);
        self.previous = Some(operation);
    }

    fn into_result(mut self, score: Score) -> AlignmentResult {
        self.operations.reverse();
        self.operations.shrink_to_fit();
        let alignment_length = self.matches + self.mismatches + self.indels;

        AlignmentResult {
            score,
            recomputed_score: self.recomputed_score,
            matches: self.matches,
            mismatches: self.mismatches,
            differences: alignment_length - self.matches,
            gap_opens: self.gap_opens,
            indels: self.indels,
            alignment_length,
            operations: self.operations,
        }
    }
}

/// Walks the direction matrix from the bottom right cell back to the origin.
///
/// Operations are emitted from the end of the alignment towards its start.
/// Gap extensions take precedence over opening a new gap, and gaps take precedence over matches.
pub(super) fn traceback(
    query: &[u8],
    target: &[u8],
    scoring_matrix: &ScoringMatrix,
    gap_costs: &GapCostSet,
    directions: ArrayView2<'_, DirectionFlags>,
    score: Score,
) -> AlignmentResult {
    let query_length = query.len();
    let target_length = target.len();
    let mut state = TracebackState::new(query_length + target_length);
    let mut query_index = query_length;
    let mut target_index = target_length;

    while query_index > 0 && target_index > 0 {
        let flags = directions[[target_index - 1, query_index - 1]];
        let query_gap = gap_costs.for_gap(GapSide::Query, query_index, query_length);
        let target_gap = gap_costs.for_gap(GapSide::Target, target_index, target_length);

        let extends_insertion = state.previous == Some(AlignmentOperation::Insertion)
            && flags.contains(DirectionFlags::EXTEND_LEFT);
        let extends_deletion = state.previous == Some(AlignmentOperation::Deletion)
            && flags.contains(DirectionFlags::EXTEND_UP);

        if extends_insertion || (!extends_deletion && flags.contains(DirectionFlags::LEFT)) {
            state.push_gap(AlignmentOperation::Insertion, query_gap);
            target_index -= 1;
        } else if extends_deletion || flags.contains(DirectionFlags::UP) {
            state.push_gap(AlignmentOperation::Deletion, target_gap);
            query_index -= 1;
        } else {
            state.push_match(
                query[query_index - 1],
                target[target_index - 1],
                scoring_matrix,
            );
            query_index -= 1;
            target_index -= 1;
        }
    }

    while query_index > 0 {
        state.push_gap(AlignmentOperation::Deletion, &gap_costs.target_left);
        query_index -= 1;
    }

    while target_index > 0 {
        state.push_gap(AlignmentOperation::Insertion, &gap_costs.query_left);
        target_index -= 1;
    }

    state.into_result(score)
}
