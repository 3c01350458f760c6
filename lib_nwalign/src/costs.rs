pub mod gap_affine;
pub mod substitution_matrix;

pub use gap_affine::{GapCostSet, GapCosts, GapPosition, GapSide};
pub use substitution_matrix::ScoringMatrix;
