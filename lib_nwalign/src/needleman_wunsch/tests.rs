use crate::{
    alignment_result::AlignmentResult,
    costs::{GapCostSet, GapCosts, ScoringMatrix},
    error::Error,
    score::Score,
    workspace::AlignmentWorkspace,
};

use super::{
    SequencePairId,
    consistency::{check_score_consistency, rescore},
    needleman_wunsch_align,
};

const FIFTY_MER: &[u8] = b"ACGTTGCATGCAAGTCCTAGGATCCGATTACAGCTTGACGGTACCATGAC";

fn align_with(query: &[u8], target: &[u8], gap_costs: &GapCostSet) -> AlignmentResult {
    let scoring_matrix = ScoringMatrix::default();
    let mut workspace = AlignmentWorkspace::new();
    let result = needleman_wunsch_align(
        query,
        target,
        &scoring_matrix,
        gap_costs,
        &mut workspace,
        SequencePairId::default(),
    )
    .unwrap();

    assert!(result.is_consistent(), "{result}");
    assert_eq!(result.operations.query_length(), query.len());
    assert_eq!(result.operations.target_length(), target.len());
    assert_eq!(
        rescore(query, target, &result.operations, &scoring_matrix, gap_costs).unwrap(),
        result.score
    );
    result
}

fn align(query: &[u8], target: &[u8]) -> AlignmentResult {
    align_with(query, target, &GapCostSet::default())
}

#[test]
fn single_deletion_with_uniform_costs() {
    let result = align_with(b"ACGT", b"AGT", &GapCostSet::uniform(GapCosts::new(2, 1)));
    assert_eq!(result.cigar(), "MD2M");
    assert_eq!(result.score, Score::new(3));
    assert_eq!(result.alignment_length, 4);
    assert_eq!(result.matches, 3);
    assert_eq!(result.differences, 1);
    assert_eq!(result.gap_opens, 1);
    assert_eq!(result.indels, 1);
}

#[test]
fn identical_sequences() {
    let result = align(FIFTY_MER, FIFTY_MER);
    assert_eq!(result.cigar(), "50M");
    assert_eq!(result.score, Score::new(100));
    assert_eq!(result.matches, 50);
    assert_eq!(result.differences, 0);
    assert_eq!(result.gap_opens, 0);
}

#[test]
fn single_substitution() {
    let mut target = FIFTY_MER.to_vec();
    target[20] = b'A';
    let result = align(FIFTY_MER, &target);
    assert_eq!(result.cigar(), "50M");
    assert_eq!(result.score, Score::new(94));
    assert_eq!(result.mismatches, 1);
    assert_eq!(result.differences, 1);
    assert_eq!(result.gap_opens, 0);
    assert_eq!(result.indels, 0);
}

#[test]
fn single_interior_deletion() {
    let target = [&FIFTY_MER[..25], &FIFTY_MER[26..]].concat();
    let result = align(FIFTY_MER, &target);
    assert_eq!(result.cigar(), "25MD24M");
    assert_eq!(result.score, Score::new(76));
    assert_eq!(result.alignment_length, 50);
    assert_eq!(result.differences, 1);
    assert_eq!(result.gap_opens, 1);
    assert_eq!(result.indels, 1);
}

#[test]
fn leading_insertion_uses_terminal_costs() {
    let result = align(b"ACGTACGT", b"ACGTTTTTACGT");
    assert_eq!(result.cigar(), "4I8M");
    assert_eq!(result.score, Score::new(-8));
    assert_eq!(result.alignment_length, 12);
    assert_eq!(result.matches, 5);
    assert_eq!(result.differences, 7);
    assert_eq!(result.gap_opens, 1);
    assert_eq!(result.indels, 4);

    let result = align(b"ACGTTTTTACGT", b"ACGTACGT");
    assert_eq!(result.cigar(), "4D8M");
    assert_eq!(result.score, Score::new(-8));

    let result = align(b"ACGT", b"TTACGT");
    assert_eq!(result.cigar(), "2I4M");
    assert_eq!(result.score, Score::new(4));
    assert_eq!(result.differences, 2);
}

#[test]
fn terminal_gaps_on_both_ends() {
    let result = align(b"AAACGTAAA", b"CGT");
    assert_eq!(result.cigar(), "3D3M3D");
    assert_eq!(result.score, Score::new(-4));
    assert_eq!(result.alignment_length, 9);
    assert_eq!(result.differences, 6);
    assert_eq!(result.gap_opens, 2);

    let result = align(b"CGT", b"AAACGTAAA");
    assert_eq!(result.cigar(), "3I3M3I");
    assert_eq!(result.score, Score::new(-4));

    let result = align_with(
        b"AAACGTAAA",
        b"CGT",
        &GapCostSet::uniform(GapCosts::new(0, 0)),
    );
    assert_eq!(result.cigar(), "3D3M3D");
    assert_eq!(result.score, Score::new(6));
}

#[test]
fn sides_and_positions_are_costed_separately() {
    let mut gap_costs = GapCostSet::default();
    gap_costs.target_left = GapCosts::new(1000, 1000);
    let result = align_with(b"AAACGTAAA", b"CGT", &gap_costs);
    assert_eq!(result.cigar(), "3I9D");
    assert_eq!(result.score, Score::new(-16));
    assert_eq!(result.gap_opens, 2);
    assert_eq!(result.indels, 12);

    let mut gap_costs = GapCostSet::default();
    gap_costs.target_right = GapCosts::new(1000, 1000);
    let result = align_with(b"AAACGTAAA", b"CGT", &gap_costs);
    assert_eq!(result.cigar(), "9D3I");
    assert_eq!(result.score, Score::new(-16));
}

#[test]
fn ambiguous_symbols_score_zero_but_match() {
    let result = align(b"ACGNT", b"ACGAT");
    assert_eq!(result.cigar(), "5M");
    assert_eq!(result.score, Score::new(8));
    assert_eq!(result.differences, 0);

    let result = align(b"ACRT", b"acgt");
    assert_eq!(result.cigar(), "4M");
    assert_eq!(result.score, Score::new(6));
    assert_eq!(result.matches, 4);
}

#[test]
fn empty_sequences() {
    let result = align(b"", b"ACG");
    assert_eq!(result.cigar(), "3I");
    assert_eq!(result.score, Score::new(-5));
    assert_eq!(result.gap_opens, 1);
    assert_eq!(result.indels, 3);

    let result = align(b"ACG", b"");
    assert_eq!(result.cigar(), "3D");
    assert_eq!(result.score, Score::new(-5));

    let result = align(b"", b"");
    assert_eq!(result.cigar(), "");
    assert!(result.operations.is_empty());
    assert_eq!(result.score, Score::ZERO);
    assert_eq!(result.alignment_length, 0);
}

#[test]
fn workspace_is_reused_across_pairs() {
    let scoring_matrix = ScoringMatrix::default();
    let gap_costs = GapCostSet::default();
    let mut workspace = AlignmentWorkspace::new();
    let target = [&FIFTY_MER[..25], &FIFTY_MER[26..]].concat();

    let first = needleman_wunsch_align(
        FIFTY_MER,
        &target,
        &scoring_matrix,
        &gap_costs,
        &mut workspace,
        SequencePairId::new(0, 1),
    )
    .unwrap();
    let capacity = workspace.direction_capacity();

    let small = needleman_wunsch_align(
        b"ACGT",
        b"AGT",
        &scoring_matrix,
        &gap_costs,
        &mut workspace,
        SequencePairId::new(0, 2),
    )
    .unwrap();
    assert_eq!(workspace.direction_capacity(), capacity);

    let second = needleman_wunsch_align(
        FIFTY_MER,
        &target,
        &scoring_matrix,
        &gap_costs,
        &mut workspace,
        SequencePairId::new(0, 1),
    )
    .unwrap();

    assert_eq!(first, second);
    assert_eq!(small, align(b"ACGT", b"AGT"));
}

#[test]
fn returned_operations_are_compacted() {
    let result = align(FIFTY_MER, FIFTY_MER);
    assert_eq!(result.operations.runs().len(), 1);
    assert_eq!(result.operations.capacity(), result.operations.runs().len());

    let result = align(b"AAACGTAAA", b"CGT");
    assert_eq!(result.operations.capacity(), result.operations.runs().len());
}

#[test]
fn score_disagreement_is_reported_but_kept() {
    let mut result = align_with(b"ACGT", b"AGT", &GapCostSet::uniform(GapCosts::new(2, 1)));
    assert!(check_score_consistency(&result, SequencePairId::new(0, 0)));

    result.recomputed_score = result.score - Score::new(1);
    let unchanged = result.clone();
    assert!(!result.is_consistent());
    assert!(!check_score_consistency(&result, SequencePairId::new(3, 7)));
    assert_eq!(result, unchanged);
}

#[test]
fn rescore_rejects_operations_of_other_lengths() {
    let gap_costs = GapCostSet::default();
    let scoring_matrix = ScoringMatrix::default();
    assert!(matches!(
        rescore(b"ACGT", b"AGT", &"3M".parse().unwrap(), &scoring_matrix, &gap_costs),
        Err(Error::InvalidOperationRuns(_))
    ));
    assert!(matches!(
        rescore(b"ACGT", b"AGT", &"MD3M".parse().unwrap(), &scoring_matrix, &gap_costs),
        Err(Error::InvalidOperationRuns(_))
    ));
}
