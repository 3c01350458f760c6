use proptest::prelude::*;

use crate::{
    AlignmentWorkspace, SequencePairId,
    costs::{GapCostSet, GapCosts, ScoringMatrix},
    needleman_wunsch::consistency::rescore,
    needleman_wunsch_align,
    score::Score,
};

/// Textbook Gotoh with a single gap cost for every gap.
fn gotoh_score(
    query: &[u8],
    target: &[u8],
    scoring_matrix: &ScoringMatrix,
    gap_costs: GapCosts,
) -> i64 {
    const NEGATIVE_INFINITY: i64 = i64::MIN / 4;
    let open = gap_costs.open.as_i64();
    let extend = gap_costs.extend.as_i64();
    let rows = query.len() + 1;
    let columns = target.len() + 1;

    let mut h = vec![vec![NEGATIVE_INFINITY; columns]; rows];
    let mut e = vec![vec![NEGATIVE_INFINITY; columns]; rows];
    let mut f = vec![vec![NEGATIVE_INFINITY; columns]; rows];
    h[0][0] = 0;
    for i in 1..rows {
        f[i][0] = -(open + i as i64 * extend);
        h[i][0] = f[i][0];
    }
    for j in 1..columns {
        e[0][j] = -(open + j as i64 * extend);
        h[0][j] = e[0][j];
    }

    for i in 1..rows {
        for j in 1..columns {
            e[i][j] = (e[i][j - 1] - extend).max(h[i][j - 1] - open - extend);
            f[i][j] = (f[i - 1][j] - extend).max(h[i - 1][j] - open - extend);
            let diagonal =
                h[i - 1][j - 1] + scoring_matrix.score(query[i - 1], target[j - 1]).as_i64();
            h[i][j] = diagonal.max(e[i][j]).max(f[i][j]);
        }
    }

    h[rows - 1][columns - 1]
}

fn gap_costs() -> impl Strategy<Value = GapCosts> {
    (0i64..25, 0i64..6).prop_map(|(open, extend)| GapCosts::new(open, extend))
}

fn gap_cost_set() -> impl Strategy<Value = GapCostSet> {
    prop::array::uniform6(gap_costs()).prop_map(|costs| GapCostSet {
        query_left: costs[0],
        query_interior: costs[1],
        query_right: costs[2],
        target_left: costs[3],
        target_interior: costs[4],
        target_right: costs[5],
    })
}

fn scoring_matrix() -> impl Strategy<Value = ScoringMatrix> {
    (0i64..6, -8i64..1).prop_map(|(match_score, mismatch_score)| {
        ScoringMatrix::nucleotide(match_score, mismatch_score)
    })
}

proptest! {
    #[test]
    fn traceback_reproduces_score(
        query in "[ACGTN]{0,40}",
        target in "[ACGTN]{0,40}",
        scoring_matrix in scoring_matrix(),
        gap_costs in gap_cost_set(),
    ) {
        let mut workspace = AlignmentWorkspace::new();
        let result = needleman_wunsch_align(
            query.as_bytes(),
            target.as_bytes(),
            &scoring_matrix,
            &gap_costs,
            &mut workspace,
            SequencePairId::default(),
        ).unwrap();

        prop_assert_eq!(result.score, result.recomputed_score, "{}", result);
        prop_assert_eq!(
            rescore(query.as_bytes(), target.as_bytes(), &result.operations, &scoring_matrix, &gap_costs).unwrap(),
            result.score
        );
    }

    #[test]
    fn operations_cover_both_sequences(
        query in "[ACGT]{0,40}",
        target in "[ACGT]{0,40}",
        gap_costs in gap_cost_set(),
    ) {
        let mut workspace = AlignmentWorkspace::new();
        let result = needleman_wunsch_align(
            query.as_bytes(),
            target.as_bytes(),
            &ScoringMatrix::default(),
            &gap_costs,
            &mut workspace,
            SequencePairId::default(),
        ).unwrap();

        prop_assert_eq!(result.operations.query_length(), query.len());
        prop_assert_eq!(result.operations.target_length(), target.len());
        prop_assert_eq!(result.operations.alignment_length(), result.alignment_length);
        prop_assert_eq!(result.alignment_length, result.matches + result.mismatches + result.indels);
        prop_assert_eq!(result.differences, result.alignment_length - result.matches);
        prop_assert!(result.alignment_length >= query.len().max(target.len()));
        prop_assert!(result.alignment_length <= query.len() + target.len());
        prop_assert!(result.gap_opens <= result.indels);

        let runs = result.operations.runs();
        prop_assert!(runs.iter().all(|&(count, _)| count > 0));
        prop_assert!(runs.windows(2).all(|pair| pair[0].1 != pair[1].1));
    }

    #[test]
    fn alignment_is_deterministic(
        query in "[ACGTN]{0,30}",
        target in "[ACGTN]{0,30}",
        other_query in "[ACGT]{0,50}",
        other_target in "[ACGT]{0,50}",
        gap_costs in gap_cost_set(),
    ) {
        let scoring_matrix = ScoringMatrix::default();
        let mut fresh = AlignmentWorkspace::new();
        let expected = needleman_wunsch_align(
            query.as_bytes(),
            target.as_bytes(),
            &scoring_matrix,
            &gap_costs,
            &mut fresh,
            SequencePairId::default(),
        ).unwrap();

        let mut reused = AlignmentWorkspace::new();
        let warm_up = needleman_wunsch_align(
            other_query.as_bytes(),
            other_target.as_bytes(),
            &scoring_matrix,
            &gap_costs,
            &mut reused,
            SequencePairId::new(1, 1),
        ).unwrap();
        prop_assert!(warm_up.is_consistent());
        let actual = needleman_wunsch_align(
            query.as_bytes(),
            target.as_bytes(),
            &scoring_matrix,
            &gap_costs,
            &mut reused,
            SequencePairId::default(),
        ).unwrap();

        prop_assert_eq!(expected, actual);
    }

    #[test]
    fn uniform_costs_give_gotoh_score(
        query in "[ACGTN]{0,30}",
        target in "[ACGTN]{0,30}",
        scoring_matrix in scoring_matrix(),
        gap_costs in gap_costs(),
    ) {
        let mut workspace = AlignmentWorkspace::new();
        let result = needleman_wunsch_align(
            query.as_bytes(),
            target.as_bytes(),
            &scoring_matrix,
            &GapCostSet::uniform(gap_costs),
            &mut workspace,
            SequencePairId::default(),
        ).unwrap();

        prop_assert_eq!(
            result.score,
            Score::new(gotoh_score(query.as_bytes(), target.as_bytes(), &scoring_matrix, gap_costs))
        );
    }
}
