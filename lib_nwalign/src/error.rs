use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("A parsing error of kind '{kind:?}' occurred when the remaining input was '{input}'.")]
    Parser {
        input: String,
        kind: nom::error::ErrorKind,
    },

    #[error("Parsing was unsuccessful due to incomplete input: {0:?}.")]
    ParserIncomplete(nom::Needed),

    #[error("The character {character:?} at position {position} is not a nucleotide symbol.")]
    UnknownNucleotide { character: char, position: usize },

    #[error("The gap penalty specification is invalid: {0}.")]
    InvalidGapPenalty(String),

    #[error("The operation string is invalid: {0}.")]
    InvalidOperationRuns(String),

    #[error(
        "Unable to grow the alignment workspace to {requested_bytes} bytes. The aligner cannot run without its working set."
    )]
    WorkspaceAllocation { requested_bytes: usize },
}
