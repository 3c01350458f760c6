use crate::{
    alphabet::{CODE_COUNT, is_ambiguous, nucleotide_code},
    score::Score,
};

/// Substitution scores for every ordered pair of four-bit nucleotide codes.
///
/// Rows are indexed by the query code and columns by the target code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoringMatrix {
    table: [Score; CODE_COUNT * CODE_COUNT],
}

impl ScoringMatrix {
    /// Scores `match_score` for identical bases, `mismatch_score` for different bases
    /// and zero whenever one of the codes is ambiguous.
    pub fn nucleotide(match_score: i64, mismatch_score: i64) -> Self {
        Self::from_fn(|query_code, target_code| {
            if is_ambiguous(query_code) || is_ambiguous(target_code) {
                0
            } else if query_code == target_code {
                match_score
            } else {
                mismatch_score
            }
        })
    }

    pub fn from_fn(mut score: impl FnMut(u8, u8) -> i64) -> Self {
        let mut table = [Score::ZERO; CODE_COUNT * CODE_COUNT];
        for (index, entry) in table.iter_mut().enumerate() {
            *entry = score((index / CODE_COUNT) as u8, (index % CODE_COUNT) as u8).into();
        }
        Self { table }
    }

    pub fn from_table(table: [[i64; CODE_COUNT]; CODE_COUNT]) -> Self {
        Self::from_fn(|query_code, target_code| {
            table[usize::from(query_code)][usize::from(target_code)]
        })
    }

    /// The score of aligning two four-bit codes.
    #[inline]
    pub fn code_score(&self, query_code: u8, target_code: u8) -> Score {
        self.table[(usize::from(query_code) << 4) + usize::from(target_code)]
    }

    /// The score of aligning two ASCII nucleotide symbols.
    #[inline]
    pub fn score(&self, query_symbol: u8, target_symbol: u8) -> Score {
        self.code_score(nucleotide_code(query_symbol), nucleotide_code(target_symbol))
    }
}

impl Default for ScoringMatrix {
    fn default() -> Self {
        Self::nucleotide(2, -4)
    }
}
