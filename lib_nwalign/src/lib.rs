pub mod alignment_result;
pub mod alphabet;
pub mod costs;
pub mod error;
mod io;
pub mod needleman_wunsch;
pub mod score;
pub mod workspace;

#[cfg(test)]
mod tests;

pub use alignment_result::{AlignmentResult, operation_runs::OperationRuns};
pub use needleman_wunsch::{SequencePairId, needleman_wunsch_align};
pub use workspace::AlignmentWorkspace;
